//! Catalog items.

use super::money::Money;
use serde::{Deserialize, Serialize};

/// A product slot in a vending machine.
///
/// Only `stock` changes after startup, and only through
/// [`VendingMachine::commit`](super::VendingMachine::commit).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub name: String,
    pub price: Money,
    pub stock: u32,
}

impl Item {
    pub fn new(name: impl Into<String>, price: Money, stock: u32) -> Self {
        Self {
            name: name.into(),
            price,
            stock,
        }
    }

    /// Name with each word capitalised, as shown on the menus.
    pub fn display_name(&self) -> String {
        title_case(&self.name)
    }
}

pub(crate) fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut at_word_start = true;
    for c in text.chars() {
        if c.is_alphabetic() {
            if at_word_start {
                out.extend(c.to_uppercase());
            } else {
                out.extend(c.to_lowercase());
            }
            at_word_start = false;
        } else {
            out.push(c);
            at_word_start = true;
        }
    }
    out
}
