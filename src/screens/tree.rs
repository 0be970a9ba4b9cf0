//! Arena-backed screen tree.
//!
//! Screens live in a flat `Vec` and refer to each other through
//! [`ScreenId`] handles. A node stores its parent handle and an ordered list
//! of child handles, so back-links never form ownership cycles.

use crate::core::MachineId;
use serde::{Deserialize, Serialize};
use std::ops::Index;
use thiserror::Error;

/// Handle of a screen inside a [`ScreenTree`].
///
/// Handles are only minted by the tree that owns the screen.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ScreenId(usize);

impl ScreenId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// What a screen does besides showing its text.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScreenKind {
    /// Text and routes only.
    Plain,
    /// Read-only listing of a machine's catalog.
    Inventory(MachineId),
    /// Numeric input selects a catalog item to buy.
    Buy(MachineId),
    /// Yes/No overlay.
    Confirm,
    /// Reaching it asks whether to leave.
    Exit,
    /// What the user has bought.
    UserInventory,
}

impl ScreenKind {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Plain => "Plain",
            Self::Inventory(_) => "Inventory",
            Self::Buy(_) => "Buy",
            Self::Confirm => "Confirm",
            Self::Exit => "Exit",
            Self::UserInventory => "UserInventory",
        }
    }

    /// Exit is the only screen that can end a session.
    pub fn is_final(&self) -> bool {
        matches!(self, Self::Exit)
    }

    /// Machine whose catalog this screen presents, if any.
    pub fn machine(&self) -> Option<MachineId> {
        match self {
            Self::Inventory(id) | Self::Buy(id) => Some(*id),
            _ => None,
        }
    }

    pub fn shows_balance(&self) -> bool {
        matches!(self, Self::Inventory(_) | Self::Buy(_) | Self::UserInventory)
    }
}

/// One node of the tree.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Screen {
    name: String,
    content: String,
    kind: ScreenKind,
    parent: Option<ScreenId>,
    children: Vec<ScreenId>,
}

impl Screen {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn kind(&self) -> ScreenKind {
        self.kind
    }

    pub fn parent(&self) -> Option<ScreenId> {
        self.parent
    }

    /// Children in insertion order. Position `i` is shown as index `i + 1`.
    pub fn children(&self) -> &[ScreenId] {
        &self.children
    }
}

/// Errors raised while assembling a tree.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BuildError {
    #[error("Parent screen #{0} does not exist in this tree")]
    UnknownParent(usize),

    #[error("Screen name must not be empty")]
    EmptyName,

    #[error("No machines configured. Add at least one machine")]
    NoMachines,
}

/// Owner of every screen in a session.
///
/// # Example
///
/// ```rust
/// use vending::screens::{ScreenKind, ScreenTree};
///
/// let mut tree = ScreenTree::new();
/// let home = tree.add_root("home", "Welcome!", ScreenKind::Plain).unwrap();
/// let info = tree.add_child(home, "info", "About us", ScreenKind::Plain).unwrap();
///
/// assert_eq!(tree[info].parent(), Some(home));
/// assert_eq!(tree[home].children(), &[info]);
/// ```
#[derive(Clone, Debug, Default)]
pub struct ScreenTree {
    screens: Vec<Screen>,
}

impl ScreenTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a screen with no parent.
    ///
    /// Used for the home screen and for overlays such as the confirmation
    /// prompt, which are focused directly rather than navigated to.
    pub fn add_root(
        &mut self,
        name: impl Into<String>,
        content: impl Into<String>,
        kind: ScreenKind,
    ) -> Result<ScreenId, BuildError> {
        self.insert(name.into(), content.into(), kind, None)
    }

    /// Add a screen as the last child of `parent`.
    pub fn add_child(
        &mut self,
        parent: ScreenId,
        name: impl Into<String>,
        content: impl Into<String>,
        kind: ScreenKind,
    ) -> Result<ScreenId, BuildError> {
        if parent.0 >= self.screens.len() {
            return Err(BuildError::UnknownParent(parent.0));
        }
        let id = self.insert(name.into(), content.into(), kind, Some(parent))?;
        self.screens[parent.0].children.push(id);
        Ok(id)
    }

    fn insert(
        &mut self,
        name: String,
        content: String,
        kind: ScreenKind,
        parent: Option<ScreenId>,
    ) -> Result<ScreenId, BuildError> {
        if name.trim().is_empty() {
            return Err(BuildError::EmptyName);
        }
        let id = ScreenId(self.screens.len());
        self.screens.push(Screen {
            name,
            content,
            kind,
            parent,
            children: Vec::new(),
        });
        Ok(id)
    }

    pub fn get(&self, id: ScreenId) -> Option<&Screen> {
        self.screens.get(id.0)
    }

    pub fn len(&self) -> usize {
        self.screens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.screens.is_empty()
    }

    /// All handles in insertion order.
    pub fn ids(&self) -> impl Iterator<Item = ScreenId> + '_ {
        (0..self.screens.len()).map(ScreenId)
    }

    /// First screen with this name.
    pub fn find(&self, name: &str) -> Option<ScreenId> {
        self.screens
            .iter()
            .position(|screen| screen.name == name)
            .map(ScreenId)
    }

    /// Every screen reachable from `root` through child links, depth first.
    pub fn descendants(&self, root: ScreenId) -> Vec<ScreenId> {
        let mut found = Vec::new();
        let mut stack = vec![root];
        while let Some(id) = stack.pop() {
            found.push(id);
            stack.extend(self[id].children.iter().rev().copied());
        }
        found
    }
}

impl Index<ScreenId> for ScreenTree {
    type Output = Screen;

    /// # Panics
    ///
    /// Panics if `id` was minted by a different tree and is out of bounds.
    fn index(&self, id: ScreenId) -> &Screen {
        &self.screens[id.0]
    }
}
