//! Startup configuration.
//!
//! A session needs a starting balance and at least one vending machine. The
//! built-in default is a single machine stocked with chips and chocolate and
//! a balance of $100. A TOML catalog file can replace the machines; a
//! command-line balance overrides whatever the file says.

mod file;
mod validation;

pub use file::{CatalogFile, ItemSpec, MachineSpec, PriceSpec};
pub use validation::{validate, CatalogViolation, ValidCatalog};

use crate::core::{Item, Money, VendingMachine};
use std::path::{Path, PathBuf};
use stillwater::validation::Validation;
use thiserror::Error;

pub const DEFAULT_BALANCE: Money = Money::from_dollars(100);
pub const DEFAULT_MACHINE: &str = "inventory";

/// Errors raised while loading a catalog.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read catalog {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("cannot parse catalog: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("{} problem(s) in catalog: {}", .0.len(), join(.0))]
    Invalid(Vec<CatalogViolation>),
}

fn join(violations: &[CatalogViolation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Everything a session is built from.
#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    pub balance: Money,
    pub machines: Vec<VendingMachine>,
}

impl Default for Config {
    fn default() -> Self {
        let mut machine = VendingMachine::new(DEFAULT_MACHINE);
        machine.add_items([
            Item::new("chips", Money::from_dollars(20), 10),
            Item::new("chocolate", Money::from_dollars(20), 10),
        ]);
        Self {
            balance: DEFAULT_BALANCE,
            machines: vec![machine],
        }
    }
}

impl Config {
    /// Load a catalog file from disk.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml(&text)?;
        log::info!(
            "loaded {} machine(s) from {}",
            config.machines.len(),
            path.display()
        );
        Ok(config)
    }

    /// Parse and validate catalog text.
    ///
    /// The balance falls back to [`DEFAULT_BALANCE`] when the file has none.
    pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
        let file: CatalogFile = toml::from_str(text)?;
        match validate(&file) {
            Validation::Success(catalog) => Ok(Self {
                balance: catalog.balance.unwrap_or(DEFAULT_BALANCE),
                machines: catalog.machines,
            }),
            Validation::Failure(errors) => {
                Err(ConfigError::Invalid(errors.iter().cloned().collect()))
            }
        }
    }

    pub fn with_balance(mut self, balance: Money) -> Self {
        self.balance = balance;
        self
    }
}
