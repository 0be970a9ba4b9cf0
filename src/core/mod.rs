//! Pure vending domain.
//!
//! This module holds the values the menus operate on:
//! - `Money` for every amount (integer cents)
//! - `Item` and `VendingMachine` for the catalog
//! - `User` for the balance and purchased goods
//! - `attempt_purchase` / `VendingMachine::commit` for settlement
//!
//! Nothing here reads input or prints. Settlement is computed by a pure
//! function and applied separately, after the user confirms.

mod item;
mod machine;
mod money;
mod user;

pub use item::Item;
pub(crate) use item::title_case;
pub use machine::{attempt_purchase, MachineId, Receipt, Settlement, VendingMachine};
pub use money::{Money, MoneyParseError};
pub use user::User;
