//! Navigation history tracking.
//!
//! Keeps an append-only record of focus changes so a session can report the
//! path a user took through the menus.

use super::tree::ScreenId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Record of a single focus change.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigationStep {
    /// The screen focus left
    pub from: ScreenId,
    /// The screen focus moved to
    pub to: ScreenId,
    /// When the change happened
    pub timestamp: DateTime<Utc>,
}

/// Ordered history of focus changes.
///
/// `record` returns a new history with the step added and leaves the
/// receiver untouched. Owners that keep a single live history use `push`.
///
/// # Example
///
/// ```rust
/// use vending::screens::{NavigationHistory, NavigationStep, ScreenKind, ScreenTree};
/// use chrono::Utc;
///
/// let mut tree = ScreenTree::new();
/// let home = tree.add_root("home", "", ScreenKind::Plain).unwrap();
/// let info = tree.add_child(home, "info", "", ScreenKind::Plain).unwrap();
///
/// let history = NavigationHistory::new().record(NavigationStep {
///     from: home,
///     to: info,
///     timestamp: Utc::now(),
/// });
///
/// assert_eq!(history.get_path(), vec![home, info]);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigationHistory {
    steps: Vec<NavigationStep>,
}

impl NavigationHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a step, returning a new history.
    pub fn record(&self, step: NavigationStep) -> Self {
        let mut next = self.clone();
        next.push(step);
        next
    }

    /// Append a step in place.
    pub fn push(&mut self, step: NavigationStep) {
        self.steps.push(step);
    }

    /// Screens visited in order: the first origin, then every destination.
    pub fn get_path(&self) -> Vec<ScreenId> {
        let mut path = Vec::with_capacity(self.steps.len() + 1);
        if let Some(first) = self.steps.first() {
            path.push(first.from);
        }
        path.extend(self.steps.iter().map(|step| step.to));
        path
    }

    /// Time between the first and last recorded step.
    ///
    /// `None` when nothing has been recorded.
    pub fn duration(&self) -> Option<Duration> {
        let (first, last) = (self.steps.first()?, self.steps.last()?);
        last.timestamp
            .signed_duration_since(first.timestamp)
            .to_std()
            .ok()
    }

    pub fn steps(&self) -> &[NavigationStep] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::screens::{ScreenKind, ScreenTree};

    fn three_screens() -> (ScreenId, ScreenId, ScreenId) {
        let mut tree = ScreenTree::new();
        let home = tree.add_root("home", "", ScreenKind::Plain).unwrap();
        let info = tree.add_child(home, "info", "", ScreenKind::Plain).unwrap();
        let about = tree.add_child(info, "about", "", ScreenKind::Plain).unwrap();
        (home, info, about)
    }

    #[test]
    fn new_history_is_empty() {
        let history = NavigationHistory::new();
        assert!(history.is_empty());
        assert!(history.get_path().is_empty());
        assert!(history.duration().is_none());
    }

    #[test]
    fn record_is_immutable() {
        let (home, info, _) = three_screens();
        let history = NavigationHistory::new();

        let next = history.record(NavigationStep {
            from: home,
            to: info,
            timestamp: Utc::now(),
        });

        assert_eq!(history.len(), 0);
        assert_eq!(next.len(), 1);
    }

    #[test]
    fn push_matches_record() {
        let (home, info, about) = three_screens();
        let step = |from, to| NavigationStep {
            from,
            to,
            timestamp: Utc::now(),
        };
        let first = step(home, info);
        let second = step(info, about);

        let mut pushed = NavigationHistory::new();
        pushed.push(first.clone());
        pushed.push(second.clone());

        let recorded = NavigationHistory::new().record(first).record(second);
        assert_eq!(pushed, recorded);
        assert_eq!(pushed.get_path(), vec![home, info, about]);
    }

    #[test]
    fn get_path_returns_screen_sequence() {
        let (home, info, about) = three_screens();
        let history = NavigationHistory::new()
            .record(NavigationStep {
                from: home,
                to: info,
                timestamp: Utc::now(),
            })
            .record(NavigationStep {
                from: info,
                to: about,
                timestamp: Utc::now(),
            });

        assert_eq!(history.get_path(), vec![home, info, about]);
    }

    #[test]
    fn duration_spans_first_to_last() {
        let (home, info, _) = three_screens();
        let start = Utc::now();
        let history = NavigationHistory::new()
            .record(NavigationStep {
                from: home,
                to: info,
                timestamp: start,
            })
            .record(NavigationStep {
                from: info,
                to: home,
                timestamp: start + chrono::Duration::milliseconds(250),
            });

        assert_eq!(history.duration(), Some(Duration::from_millis(250)));
    }

    #[test]
    fn history_serializes_correctly() {
        let (home, info, _) = three_screens();
        let history = NavigationHistory::new().record(NavigationStep {
            from: home,
            to: info,
            timestamp: Utc::now(),
        });

        let json = serde_json::to_string(&history).unwrap();
        let back: NavigationHistory = serde_json::from_str(&json).unwrap();
        assert_eq!(back, history);
    }
}
