#![forbid(unsafe_code)]

//! Scroll-spy: highlight the navigation link of the section under the
//! fixed header.
//!
//! Page scroll fires far more often than the highlight can change, so
//! samples are coalesced: [`ScrollSpy::observe`] only records the latest
//! sample and [`ScrollSpy::flush`] evaluates it at most once per frame.

use serde::{Deserialize, Serialize};

/// Probe distance below the top of the viewport, clearing the fixed header.
pub const DEFAULT_SPY_OFFSET: f64 = 100.0;

/// Vertical extent of one `section[id]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionBounds {
    pub id: String,
    /// `offsetTop`.
    pub top: f64,
    /// `clientHeight`.
    pub height: f64,
}

impl SectionBounds {
    #[must_use]
    pub fn new(id: impl Into<String>, top: f64, height: f64) -> Self {
        Self {
            id: id.into(),
            top,
            height,
        }
    }

    #[must_use]
    pub fn contains(&self, y: f64) -> bool {
        y >= self.top && y < self.top + self.height
    }
}

/// Id of the last section containing `probe`, if any.
#[must_use]
pub fn active_section(probe: f64, sections: &[SectionBounds]) -> Option<&str> {
    sections
        .iter()
        .rev()
        .find(|s| s.contains(probe))
        .map(|s| s.id.as_str())
}

/// Coalescing scroll-spy state.
#[derive(Debug, Clone, Default)]
pub struct ScrollSpy {
    offset: f64,
    active: Option<String>,
    pending: Option<(f64, Vec<SectionBounds>)>,
}

impl ScrollSpy {
    #[must_use]
    pub fn new(offset: f64) -> Self {
        Self {
            offset,
            active: None,
            pending: None,
        }
    }

    /// Currently highlighted section id.
    #[must_use]
    pub fn active(&self) -> Option<&str> {
        self.active.as_deref()
    }

    /// Whether a sample is waiting for the next frame.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Record a page scroll sample, replacing any unprocessed one.
    pub fn observe(&mut self, scroll_y: f64, sections: Vec<SectionBounds>) {
        self.pending = Some((scroll_y, sections));
    }

    /// Evaluate the pending sample.
    ///
    /// Returns the newly active section id when the highlight changes. When
    /// no section contains the probe the previous highlight is kept.
    pub fn flush(&mut self) -> Option<String> {
        let (scroll_y, sections) = self.pending.take()?;
        let probe = scroll_y + self.offset;
        let current = active_section(probe, &sections)?;
        if self.active.as_deref() == Some(current) {
            return None;
        }
        tracing::debug!(target: "folio.spy", section = current, probe, "active section changed");
        self.active = Some(current.to_owned());
        self.active.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page() -> Vec<SectionBounds> {
        vec![
            SectionBounds::new("home", 0.0, 600.0),
            SectionBounds::new("projects", 600.0, 800.0),
            SectionBounds::new("contact", 1400.0, 500.0),
        ]
    }

    #[test]
    fn probe_uses_offset() {
        let mut spy = ScrollSpy::new(DEFAULT_SPY_OFFSET);
        spy.observe(520.0, page());
        assert_eq!(spy.flush().as_deref(), Some("projects"));
    }

    #[test]
    fn keeps_highlight_in_gaps() {
        let mut spy = ScrollSpy::new(DEFAULT_SPY_OFFSET);
        spy.observe(0.0, page());
        assert_eq!(spy.flush().as_deref(), Some("home"));
        spy.observe(5000.0, page());
        assert_eq!(spy.flush(), None);
        assert_eq!(spy.active(), Some("home"));
    }

    #[test]
    fn coalesces_samples_and_dedupes() {
        let mut spy = ScrollSpy::new(DEFAULT_SPY_OFFSET);
        spy.observe(0.0, page());
        spy.observe(700.0, page());
        spy.observe(1350.0, page());
        assert_eq!(spy.flush().as_deref(), Some("contact"));
        assert!(!spy.is_pending());
        assert_eq!(spy.flush(), None);
        spy.observe(1360.0, page());
        assert_eq!(spy.flush(), None);
    }

    #[test]
    fn later_section_wins_on_overlap() {
        let sections = vec![
            SectionBounds::new("a", 0.0, 1000.0),
            SectionBounds::new("b", 500.0, 1000.0),
        ];
        assert_eq!(active_section(600.0, &sections), Some("b"));
    }
}
