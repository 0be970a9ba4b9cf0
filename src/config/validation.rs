//! Catalog validation that reports every problem at once.
//!
//! A catalog file with three typos should produce three messages, not one
//! per run. Each check returns a `Validation` and the results are combined
//! with `Validation::all_vec`, which keeps every failure.

use super::file::{CatalogFile, PriceSpec};
use crate::core::{Item, Money, MoneyParseError, VendingMachine};
use std::collections::HashSet;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;
use thiserror::Error;

/// A single problem found in a catalog file.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum CatalogViolation {
    #[error("No machines configured")]
    NoMachines,

    #[error("Machine #{index} has an empty name")]
    EmptyMachineName { index: usize },

    #[error("Machine '{name}' is listed more than once")]
    DuplicateMachine { name: String },

    #[error("Item #{index} of machine '{machine}' has an empty name")]
    EmptyItemName { machine: String, index: usize },

    #[error("Item '{item}' is listed more than once in machine '{machine}'")]
    DuplicateItem { machine: String, item: String },

    #[error("Item '{item}' of machine '{machine}' has an invalid price: {reason}")]
    InvalidPrice {
        machine: String,
        item: String,
        reason: MoneyParseError,
    },

    #[error("Starting balance is invalid: {0}")]
    InvalidBalance(MoneyParseError),
}

type Check<T> = Validation<T, NonEmptyVec<CatalogViolation>>;

/// Output of a single check: either nothing to keep, or a validated item
/// for the machine at the given position.
#[derive(Clone, Debug)]
enum Checked {
    Nothing,
    Balance(Money),
    Item(usize, Item),
}

/// A catalog that passed validation.
#[derive(Clone, Debug, PartialEq)]
pub struct ValidCatalog {
    pub balance: Option<Money>,
    pub machines: Vec<VendingMachine>,
}

fn require(ok: bool, violation: impl FnOnce() -> CatalogViolation) -> Check<Checked> {
    if ok {
        Validation::success(Checked::Nothing)
    } else {
        Validation::fail(violation())
    }
}

/// Validate a parsed catalog, accumulating ALL violations.
pub fn validate(file: &CatalogFile) -> Check<ValidCatalog> {
    let mut checks: Vec<Check<Checked>> = Vec::new();

    checks.push(require(!file.machines.is_empty(), || {
        CatalogViolation::NoMachines
    }));

    if let Some(balance) = &file.balance {
        checks.push(match balance.to_money() {
            Ok(money) => Validation::success(Checked::Balance(money)),
            Err(reason) => Validation::fail(CatalogViolation::InvalidBalance(reason)),
        });
    }

    let mut machine_names = HashSet::new();
    for (m, machine) in file.machines.iter().enumerate() {
        let name = machine.name.trim();
        checks.push(require(!name.is_empty(), || {
            CatalogViolation::EmptyMachineName { index: m + 1 }
        }));
        if !name.is_empty() {
            checks.push(require(machine_names.insert(name.to_string()), || {
                CatalogViolation::DuplicateMachine {
                    name: name.to_string(),
                }
            }));
        }

        let mut item_names = HashSet::new();
        for (i, item) in machine.items.iter().enumerate() {
            let item_name = item.name.trim();
            if item_name.is_empty() {
                checks.push(Validation::fail(CatalogViolation::EmptyItemName {
                    machine: name.to_string(),
                    index: i + 1,
                }));
                continue;
            }
            checks.push(require(item_names.insert(item_name.to_string()), || {
                CatalogViolation::DuplicateItem {
                    machine: name.to_string(),
                    item: item_name.to_string(),
                }
            }));
            checks.push(check_item(m, name, item_name, &item.price, item.stock));
        }
    }

    Validation::all_vec(checks).map(|checked| assemble(file, checked))
}

fn check_item(
    machine_index: usize,
    machine: &str,
    name: &str,
    price: &PriceSpec,
    stock: u32,
) -> Check<Checked> {
    match price.to_money() {
        Ok(price) => Validation::success(Checked::Item(
            machine_index,
            Item::new(name, price, stock),
        )),
        Err(reason) => Validation::fail(CatalogViolation::InvalidPrice {
            machine: machine.to_string(),
            item: name.to_string(),
            reason,
        }),
    }
}

fn assemble(file: &CatalogFile, checked: Vec<Checked>) -> ValidCatalog {
    let mut machines: Vec<VendingMachine> = file
        .machines
        .iter()
        .map(|machine| VendingMachine::new(machine.name.trim()))
        .collect();
    let mut balance = None;

    for entry in checked {
        match entry {
            Checked::Nothing => {}
            Checked::Balance(money) => balance = Some(money),
            Checked::Item(index, item) => machines[index].add_items([item]),
        }
    }

    ValidCatalog { balance, machines }
}
