//! Vending: a text-menu vending machine simulation
//!
//! The program is a pure core with a thin interactive shell around it.
//! Navigation and purchase rules are ordinary functions over plain values;
//! reading input and printing happen only in [`session`].
//!
//! # Core Concepts
//!
//! - **Screens**: a tree of named screens held in an arena, addressed by
//!   `ScreenId` handles
//! - **Navigator**: the focused screen plus its numbered routes (`0` goes
//!   back, `1..=N` go to children)
//! - **Settlement**: `attempt_purchase` checks an order without touching
//!   anything; `VendingMachine::commit` applies it after confirmation
//!
//! # Example
//!
//! ```rust
//! use vending::core::{attempt_purchase, Item, Money};
//! use vending::screens::{Navigator, ScreenKind, ScreenTree};
//!
//! let mut tree = ScreenTree::new();
//! let home = tree.add_root("home", "Welcome!", ScreenKind::Plain).unwrap();
//! let info = tree.add_child(home, "info", "Read me", ScreenKind::Plain).unwrap();
//!
//! let mut nav = Navigator::new(&tree, home);
//! let target = nav.resolve_index(1).unwrap();
//! nav.go_to_screen(&tree, target);
//! assert_eq!(nav.focus(), info);
//! assert_eq!(nav.resolve_index(0), Ok(home));
//!
//! let gum = Item::new("gum", Money::from_cents(150), 3);
//! let settlement = attempt_purchase(&gum, 2, Money::from_dollars(5), Money::from_dollars(20)).unwrap();
//! assert_eq!(settlement.change, Money::from_dollars(2));
//! assert_eq!(settlement.new_balance, Money::from_dollars(17));
//! ```

pub mod config;
pub mod core;
pub mod error;
pub mod screens;
pub mod session;
pub mod view;

// Re-export commonly used types
pub use crate::core::{attempt_purchase, Item, Money, Settlement, User, VendingMachine};
pub use config::Config;
pub use error::{Error, VendingError};
pub use screens::{Navigator, ScreenId, ScreenKind, ScreenTree};
pub use session::{Outcome, Session};
