//! Focus tracking over a [`ScreenTree`].
//!
//! The navigator is the menu's state machine. Its state is the focused
//! screen; its inputs are the numbers printed next to each route. Index `0`
//! is the parent (when there is one) and `1..=N` are the children in order.
//! The index map is derived from the focus and rebuilt on every change.

use super::history::{NavigationHistory, NavigationStep};
use super::tree::{ScreenId, ScreenTree};
use crate::error::{IndexTarget, VendingError};
use chrono::Utc;
use std::collections::BTreeMap;

/// Index reserved for "back to parent".
pub const BACK_INDEX: usize = 0;

#[derive(Clone, Debug)]
pub struct Navigator {
    focus: ScreenId,
    available: BTreeMap<usize, ScreenId>,
    history: NavigationHistory,
}

impl Navigator {
    /// Start with `initial` focused.
    pub fn new(tree: &ScreenTree, initial: ScreenId) -> Self {
        let mut navigator = Self {
            focus: initial,
            available: BTreeMap::new(),
            history: NavigationHistory::new(),
        };
        navigator.refresh(tree);
        navigator
    }

    pub fn focus(&self) -> ScreenId {
        self.focus
    }

    /// Index → screen map for the focused screen.
    pub fn available_screens(&self) -> &BTreeMap<usize, ScreenId> {
        &self.available
    }

    pub fn history(&self) -> &NavigationHistory {
        &self.history
    }

    /// Focus `screen`. Any screen of the tree is accepted.
    pub fn go_to_screen(&mut self, tree: &ScreenTree, screen: ScreenId) {
        log::debug!(
            "focus {} -> {}",
            tree[self.focus].name(),
            tree[screen].name()
        );
        self.history.push(NavigationStep {
            from: self.focus,
            to: screen,
            timestamp: Utc::now(),
        });
        self.focus = screen;
        self.refresh(tree);
    }

    /// Focus the parent of the current screen. Does nothing at a root.
    pub fn go_back(&mut self, tree: &ScreenTree) {
        if let Some(parent) = tree[self.focus].parent() {
            self.go_to_screen(tree, parent);
        }
    }

    /// Screen bound to a displayed index.
    pub fn resolve_index(&self, index: i64) -> Result<ScreenId, VendingError> {
        usize::try_from(index)
            .ok()
            .and_then(|i| self.available.get(&i).copied())
            .ok_or(VendingError::IndexOutOfRange {
                target: IndexTarget::Screen,
                index,
                len: self.available.len(),
            })
    }

    fn refresh(&mut self, tree: &ScreenTree) {
        let screen = &tree[self.focus];
        self.available.clear();
        if let Some(parent) = screen.parent() {
            self.available.insert(BACK_INDEX, parent);
        }
        self.available.extend(
            screen
                .children()
                .iter()
                .enumerate()
                .map(|(i, child)| (i + 1, *child)),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::screens::ScreenKind;

    struct Fixture {
        tree: ScreenTree,
        home: ScreenId,
        info: ScreenId,
        shop: ScreenId,
        about: ScreenId,
    }

    fn fixture() -> Fixture {
        let mut tree = ScreenTree::new();
        let home = tree.add_root("home", "", ScreenKind::Plain).unwrap();
        let info = tree.add_child(home, "info", "", ScreenKind::Plain).unwrap();
        let shop = tree.add_child(home, "shop", "", ScreenKind::Plain).unwrap();
        let about = tree.add_child(info, "about", "", ScreenKind::Plain).unwrap();
        Fixture {
            tree,
            home,
            info,
            shop,
            about,
        }
    }

    #[test]
    fn root_has_no_back_route() {
        let f = fixture();
        let nav = Navigator::new(&f.tree, f.home);

        assert_eq!(nav.focus(), f.home);
        assert!(matches!(
            nav.resolve_index(0),
            Err(VendingError::IndexOutOfRange {
                target: IndexTarget::Screen,
                ..
            })
        ));
        assert_eq!(nav.resolve_index(1), Ok(f.info));
        assert_eq!(nav.resolve_index(2), Ok(f.shop));
        assert!(nav.resolve_index(3).is_err());
        assert!(nav.resolve_index(-1).is_err());
    }

    #[test]
    fn child_maps_zero_to_parent() {
        let f = fixture();
        let mut nav = Navigator::new(&f.tree, f.home);
        nav.go_to_screen(&f.tree, f.info);

        assert_eq!(nav.resolve_index(0), Ok(f.home));
        assert_eq!(nav.resolve_index(1), Ok(f.about));
        assert!(nav.resolve_index(2).is_err());
    }

    #[test]
    fn leaf_only_goes_back() {
        let f = fixture();
        let mut nav = Navigator::new(&f.tree, f.about);

        let keys: Vec<_> = nav.available_screens().keys().copied().collect();
        assert_eq!(keys, vec![0]);
        assert_eq!(nav.resolve_index(0), Ok(f.info));

        nav.go_back(&f.tree);
        assert_eq!(nav.focus(), f.info);
    }

    #[test]
    fn go_back_at_root_is_a_no_op() {
        let f = fixture();
        let mut nav = Navigator::new(&f.tree, f.home);
        let before = nav.available_screens().clone();

        nav.go_back(&f.tree);

        assert_eq!(nav.focus(), f.home);
        assert_eq!(nav.available_screens(), &before);
        assert!(nav.history().is_empty());
    }

    #[test]
    fn round_trip_restores_mapping() {
        let f = fixture();
        let mut nav = Navigator::new(&f.tree, f.home);
        let before = nav.available_screens().clone();

        nav.go_to_screen(&f.tree, f.shop);
        nav.go_back(&f.tree);

        assert_eq!(nav.focus(), f.home);
        assert_eq!(nav.available_screens(), &before);
    }

    #[test]
    fn history_follows_focus() {
        let f = fixture();
        let mut nav = Navigator::new(&f.tree, f.home);
        nav.go_to_screen(&f.tree, f.info);
        nav.go_to_screen(&f.tree, f.about);
        nav.go_back(&f.tree);

        assert_eq!(
            nav.history().get_path(),
            vec![f.home, f.info, f.about, f.info]
        );
    }

    #[test]
    fn history_grows_one_step_per_focus_change() {
        let f = fixture();
        let mut nav = Navigator::new(&f.tree, f.home);
        for _ in 0..500 {
            nav.go_to_screen(&f.tree, f.shop);
            nav.go_back(&f.tree);
        }

        assert_eq!(nav.history().len(), 1000);
        assert_eq!(nav.history().steps()[999].to, f.home);
    }
}
