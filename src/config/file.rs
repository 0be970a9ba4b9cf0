//! On-disk catalog format.
//!
//! ```toml
//! balance = "250"
//!
//! [[machines]]
//! name = "snacks"
//!
//! [[machines.items]]
//! name = "chips"
//! price = "2.50"
//! stock = 10
//! ```

use crate::core::{Money, MoneyParseError};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CatalogFile {
    #[serde(default)]
    pub balance: Option<PriceSpec>,
    #[serde(default)]
    pub machines: Vec<MachineSpec>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MachineSpec {
    pub name: String,
    #[serde(default)]
    pub items: Vec<ItemSpec>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ItemSpec {
    pub name: String,
    pub price: PriceSpec,
    pub stock: u32,
}

/// A dollar amount as written in the file: `"2.50"`, `20` or `2.5`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PriceSpec {
    Text(String),
    Whole(u64),
    Dollars(f64),
}

impl PriceSpec {
    pub fn to_money(&self) -> Result<Money, MoneyParseError> {
        match self {
            Self::Text(text) => text.parse(),
            Self::Whole(dollars) => dollars
                .checked_mul(100)
                .map(Money::from_cents)
                .ok_or_else(|| MoneyParseError::Overflow(dollars.to_string())),
            Self::Dollars(dollars) => Money::from_dollars_f64(*dollars),
        }
    }
}
