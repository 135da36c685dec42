#![forbid(unsafe_code)]

//! Host measurement snapshots.
//!
//! All lengths are CSS pixels as reported by the browser. Values are
//! sanitized on entry: non-finite or negative inputs collapse to `0.0`, so
//! downstream arithmetic never sees NaN.

use serde::{Deserialize, Serialize};

/// Live measurement of one horizontally scrolling slide list.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SectionMetrics {
    /// Current `scrollLeft` of the container.
    #[serde(default)]
    pub scroll_left: f64,
    /// Visible width of the container (`clientWidth`).
    #[serde(default)]
    pub client_width: f64,
    /// Total scrollable width of the container (`scrollWidth`).
    #[serde(default)]
    pub scroll_width: f64,
    /// Rendered width of the first slide, or `None` when the list is empty.
    #[serde(default)]
    pub slide_width: Option<f64>,
}

impl SectionMetrics {
    /// Create a snapshot with no slide width (empty list).
    #[must_use]
    pub const fn new(scroll_left: f64, client_width: f64, scroll_width: f64) -> Self {
        Self {
            scroll_left,
            client_width,
            scroll_width,
            slide_width: None,
        }
    }

    /// Set the first slide's rendered width.
    #[must_use]
    pub fn with_slide_width(mut self, width: f64) -> Self {
        self.slide_width = Some(width);
        self
    }

    /// Copy with every length passed through [`sanitize_length`].
    ///
    /// A zero or negative slide width is treated as "no slides".
    #[must_use]
    pub fn sanitized(self) -> Self {
        Self {
            scroll_left: sanitize_length(self.scroll_left),
            client_width: sanitize_length(self.client_width),
            scroll_width: sanitize_length(self.scroll_width),
            slide_width: self
                .slide_width
                .map(sanitize_length)
                .filter(|&w| w > 0.0),
        }
    }
}

/// Collapse NaN, infinities, and negatives to `0.0`.
#[inline]
#[must_use]
pub fn sanitize_length(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}

/// Clamp `value` into `[0, max]`, treating a non-finite value as `0.0`.
#[inline]
#[must_use]
pub fn clamp_offset(value: f64, max: f64) -> f64 {
    if !value.is_finite() {
        return 0.0;
    }
    value.clamp(0.0, max.max(0.0))
}
