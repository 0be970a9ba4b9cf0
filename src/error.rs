//! Error types.
//!
//! `VendingError` is everything a user can trigger from the menu. Each one is
//! recovered by the session: the message is shown and the current screen is
//! rendered again. `Error` is for the things that can actually stop the
//! program (I/O on the terminal, a broken configuration).

use crate::config::ConfigError;
use crate::screens::BuildError;
use thiserror::Error;

/// Recoverable errors produced by user input.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum VendingError {
    #[error("Please enter an integer")]
    Parse { input: String },

    #[error("{}", .target.message())]
    IndexOutOfRange {
        target: IndexTarget,
        index: i64,
        len: usize,
    },

    #[error("Not enough stock to purchase {item}.")]
    InsufficientStock { item: String },

    #[error("Not enough balance to purchase {item}.")]
    InsufficientBalance { item: String },

    #[error("Not enough money inserted to purchase {item}.")]
    InsufficientTender { item: String },

    #[error("Please enter a positive integer")]
    NonPositiveQuantity,

    #[error("Selected slot holds {found}, not {expected}.")]
    SlotMismatch { expected: String, found: String },
}

/// What an out-of-range index was meant to select.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexTarget {
    Screen,
    Catalog,
}

impl IndexTarget {
    fn message(self) -> &'static str {
        match self {
            Self::Screen => "Invalid Index",
            Self::Catalog => "Index out of range.",
        }
    }
}

/// Fatal errors surfaced to `main`.
#[derive(Debug, Error)]
pub enum Error {
    #[error("terminal I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("could not build screens: {0}")]
    Build(#[from] BuildError),

    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_item() {
        let err = VendingError::InsufficientStock {
            item: "chips".to_string(),
        };
        assert_eq!(err.to_string(), "Not enough stock to purchase chips.");

        let err = VendingError::InsufficientBalance {
            item: "chips".to_string(),
        };
        assert_eq!(err.to_string(), "Not enough balance to purchase chips.");
    }

    #[test]
    fn index_message_depends_on_target() {
        let err = VendingError::IndexOutOfRange {
            target: IndexTarget::Screen,
            index: 9,
            len: 2,
        };
        assert_eq!(err.to_string(), "Invalid Index");

        let err = VendingError::IndexOutOfRange {
            target: IndexTarget::Catalog,
            index: 0,
            len: 2,
        };
        assert_eq!(err.to_string(), "Index out of range.");
    }
}
