//! Vending machine catalog and purchase settlement.
//!
//! Buying happens in two steps, the same way a state machine step is
//! computed first and applied afterwards:
//!
//! 1. [`attempt_purchase`] is pure. It checks the order and returns a
//!    [`Settlement`] describing what would happen. Nothing is mutated.
//! 2. [`VendingMachine::commit`] applies a settlement once the user has
//!    confirmed it: stock goes down, the user's balance and inventory change,
//!    and a [`Receipt`] is filed.
//!
//! Between the two steps the user can still walk away.

use super::item::Item;
use super::money::Money;
use super::user::User;
use crate::error::{IndexTarget, VendingError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Handle of a machine owned by the session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MachineId(pub usize);

/// An ordered catalog of items.
///
/// Catalog order never changes; it defines the 1-based index shown to the
/// user.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VendingMachine {
    name: String,
    inventory: Vec<Item>,
}

/// Outcome of a successful [`attempt_purchase`], not yet applied.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settlement {
    pub item: String,
    pub quantity: u32,
    pub order_price: Money,
    pub tendered: Money,
    pub change: Money,
    pub new_balance: Money,
}

/// Record of a committed purchase.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Receipt {
    pub id: Uuid,
    pub machine: String,
    pub item: String,
    pub quantity: u32,
    pub total: Money,
    pub tendered: Money,
    pub change: Money,
    pub balance_after: Money,
    pub timestamp: DateTime<Utc>,
}

impl VendingMachine {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            inventory: Vec::new(),
        }
    }

    /// Append items to the end of the catalog, keeping their order.
    pub fn add_items(&mut self, items: impl IntoIterator<Item = Item>) {
        self.inventory.extend(items);
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn items(&self) -> &[Item] {
        &self.inventory
    }

    pub fn len(&self) -> usize {
        self.inventory.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inventory.is_empty()
    }

    /// Look up an item by the number shown next to it (1-based).
    ///
    /// Returns the zero-based slot alongside the item so the caller can
    /// commit against it later.
    pub fn lookup_by_display_index(&self, index: i64) -> Result<(usize, &Item), VendingError> {
        let out_of_range = || VendingError::IndexOutOfRange {
            target: IndexTarget::Catalog,
            index,
            len: self.inventory.len(),
        };
        let slot = usize::try_from(index)
            .ok()
            .and_then(|i| i.checked_sub(1))
            .ok_or_else(out_of_range)?;
        self.inventory
            .get(slot)
            .map(|item| (slot, item))
            .ok_or_else(out_of_range)
    }

    /// Apply a confirmed settlement to the item in `slot` and to `user`.
    ///
    /// The slot must still hold the settled item. The settlement is then
    /// re-derived against the current stock and balance before anything
    /// changes, so a stale settlement can never overdraw.
    pub fn commit(
        &mut self,
        slot: usize,
        settlement: &Settlement,
        user: &mut User,
    ) -> Result<Receipt, VendingError> {
        let len = self.inventory.len();
        let item = self
            .inventory
            .get_mut(slot)
            .ok_or(VendingError::IndexOutOfRange {
                target: IndexTarget::Catalog,
                index: slot as i64 + 1,
                len,
            })?;
        if item.name != settlement.item {
            return Err(VendingError::SlotMismatch {
                expected: settlement.item.clone(),
                found: item.name.clone(),
            });
        }

        let fresh = attempt_purchase(item, settlement.quantity, settlement.tendered, user.balance)?;

        item.stock -= fresh.quantity;
        user.balance = fresh.new_balance;
        user.credit(&item.name, fresh.quantity);

        let receipt = Receipt {
            id: Uuid::new_v4(),
            machine: self.name.clone(),
            item: fresh.item,
            quantity: fresh.quantity,
            total: fresh.order_price,
            tendered: fresh.tendered,
            change: fresh.change,
            balance_after: fresh.new_balance,
            timestamp: Utc::now(),
        };
        user.file_receipt(receipt.clone());
        Ok(receipt)
    }
}

/// Check an order against stock, the user's balance and the tendered
/// amount.
///
/// Checks run in a fixed order: quantity, stock, balance, tender. An empty
/// slot reports a stock failure even when the money is also short.
///
/// # Example
///
/// ```rust
/// use vending::core::{attempt_purchase, Item, Money};
///
/// let crisps = Item::new("crisps", Money::from_cents(250), 5);
/// let settlement = attempt_purchase(
///     &crisps,
///     2,
///     Money::from_dollars(10),
///     Money::from_dollars(10),
/// )
/// .unwrap();
///
/// assert_eq!(settlement.change, Money::from_dollars(5));
/// assert_eq!(settlement.new_balance, Money::from_dollars(5));
/// assert_eq!(crisps.stock, 5);
/// ```
pub fn attempt_purchase(
    item: &Item,
    quantity: u32,
    tendered: Money,
    balance: Money,
) -> Result<Settlement, VendingError> {
    if quantity == 0 {
        return Err(VendingError::NonPositiveQuantity);
    }

    let order_price = item.price.times(quantity);

    if item.stock < quantity {
        return Err(VendingError::InsufficientStock {
            item: item.name.clone(),
        });
    }
    if tendered > balance {
        return Err(VendingError::InsufficientBalance {
            item: item.name.clone(),
        });
    }
    if order_price > tendered {
        return Err(VendingError::InsufficientTender {
            item: item.name.clone(),
        });
    }

    // tendered <= balance and order_price <= tendered, so neither subtraction
    // can underflow.
    let change = tendered.saturating_sub(order_price);
    let new_balance = balance
        .saturating_sub(tendered)
        .checked_add(change)
        .unwrap_or(balance);

    Ok(Settlement {
        item: item.name.clone(),
        quantity,
        order_price,
        tendered,
        change,
        new_balance,
    })
}

impl Settlement {
    /// Line shown to the user after a committed purchase.
    pub fn message(&self) -> String {
        let name = super::item::title_case(&self.item);
        if self.change.is_zero() {
            format!("Successfully purchased {name}! No change.")
        } else {
            format!("Successfully purchased {name}! Change returned: {}", self.change)
        }
    }
}
