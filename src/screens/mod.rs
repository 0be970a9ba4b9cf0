//! Screen graph and navigation.
//!
//! - `ScreenTree`: arena of screens linked by handles
//! - `Navigator`: the focused screen and its index → screen routes
//! - `NavigationHistory`: append-only record of focus changes
//! - `layout`: the standard menu tree

pub mod layout;
mod history;
mod navigator;
mod tree;

pub use history::{NavigationHistory, NavigationStep};
pub use layout::{Layout, MachineScreens};
pub use navigator::{Navigator, BACK_INDEX};
pub use tree::{BuildError, Screen, ScreenId, ScreenKind, ScreenTree};
