//! The person at the machine.

use super::machine::Receipt;
use super::money::Money;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Session user: the balance they hold and what they have bought so far.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub balance: Money,
    purchased: BTreeMap<String, u32>,
    receipts: Vec<Receipt>,
}

impl User {
    pub fn new(balance: Money) -> Self {
        Self {
            balance,
            purchased: BTreeMap::new(),
            receipts: Vec::new(),
        }
    }

    /// Accumulated quantity per item name, ordered by name.
    pub fn purchased(&self) -> &BTreeMap<String, u32> {
        &self.purchased
    }

    pub fn receipts(&self) -> &[Receipt] {
        &self.receipts
    }

    pub(crate) fn credit(&mut self, item: &str, quantity: u32) {
        let held = self.purchased.entry(item.to_string()).or_insert(0);
        *held = held.saturating_add(quantity);
    }

    pub(crate) fn file_receipt(&mut self, receipt: Receipt) {
        self.receipts.push(receipt);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_user_has_nothing() {
        let user = User::new(Money::from_dollars(100));
        assert_eq!(user.balance, Money::from_dollars(100));
        assert!(user.purchased().is_empty());
        assert!(user.receipts().is_empty());
    }

    #[test]
    fn credit_accumulates_per_item() {
        let mut user = User::new(Money::ZERO);
        user.credit("chips", 2);
        user.credit("chocolate", 1);
        user.credit("chips", 3);

        assert_eq!(user.purchased().get("chips"), Some(&5));
        assert_eq!(user.purchased().get("chocolate"), Some(&1));
    }
}
