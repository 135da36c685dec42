#![forbid(unsafe_code)]

//! One-shot scroll reveal.
//!
//! Cards and section titles fade in the first time they scroll into view.
//! The host observes them; the tracker decides which intersection reports
//! start an animation. Each element animates at most once.

use std::collections::BTreeSet;

#[derive(Debug, Clone, Default)]
pub struct RevealTracker {
    observed: BTreeSet<String>,
}

impl RevealTracker {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start tracking `element`.
    pub fn observe(&mut self, element: impl Into<String>) {
        self.observed.insert(element.into());
    }

    #[must_use]
    pub fn is_observed(&self, element: &str) -> bool {
        self.observed.contains(element)
    }

    #[must_use]
    pub fn pending(&self) -> usize {
        self.observed.len()
    }

    /// Report an intersection change. Returns `true` when the element should
    /// be revealed now; it is no longer tracked afterwards.
    pub fn intersect(&mut self, element: &str, visible: bool) -> bool {
        visible && self.observed.remove(element)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reveals_once() {
        let mut tracker = RevealTracker::new();
        tracker.observe("skill-1");
        assert!(!tracker.intersect("skill-1", false));
        assert!(tracker.intersect("skill-1", true));
        assert!(!tracker.intersect("skill-1", true));
        assert_eq!(tracker.pending(), 0);
    }

    #[test]
    fn unobserved_elements_are_ignored() {
        let mut tracker = RevealTracker::new();
        assert!(!tracker.intersect("ghost", true));
    }
}
