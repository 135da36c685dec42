#![forbid(unsafe_code)]

//! Canonical input events fed into [`crate::Portfolio::update`].
//!
//! Events carry everything the core needs from the DOM: presence flags for
//! optional elements and live measurements. The core never queries the host.

use serde::{Deserialize, Serialize};

use crate::carousel::Control;
use crate::catalog::ProjectId;
use crate::geometry::SectionMetrics;
use crate::keys::Key;
use crate::modal::ModalLink;
use crate::scroll_spy::SectionBounds;

/// A named page region holding one horizontally scrolling slide list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Section {
    /// The project card carousel.
    Projects,
    /// The certificate card carousel.
    Certificates,
}

impl Section {
    /// Every section, in page order.
    pub const ALL: [Section; 2] = [Section::Projects, Section::Certificates];

    /// Stable lowercase name, matching the DOM section id.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Projects => "projects",
            Self::Certificates => "certificates",
        }
    }

    /// Parse a DOM section id.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "projects" => Some(Self::Projects),
            "certificates" => Some(Self::Certificates),
            _ => None,
        }
    }
}

impl core::fmt::Display for Section {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of the host resolving a section's elements at startup.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SectionAttach {
    /// Whether the scroll container exists on this page variant.
    pub container: bool,
    /// Whether the previous control exists.
    pub prev: bool,
    /// Whether the next control exists.
    pub next: bool,
    /// Initial measurement, if the container could be measured.
    pub metrics: Option<SectionMetrics>,
}

impl SectionAttach {
    /// A fully present section with the given measurement.
    #[must_use]
    pub fn present(metrics: SectionMetrics) -> Self {
        Self {
            container: true,
            prev: true,
            next: true,
            metrics: Some(metrics),
        }
    }

    /// A section whose container is missing from the page.
    #[must_use]
    pub fn absent() -> Self {
        Self::default()
    }
}

/// Click targets the host reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Click {
    /// A carousel previous/next control.
    Control { section: Section, control: Control },
    /// The body of a project card (opens the modal immediately).
    ProjectCard(ProjectId),
    /// A "view details" button (loading state, then the modal).
    ProjectDetails(ProjectId),
    /// The modal close button.
    ModalClose,
    /// The backdrop around the modal content.
    ModalOverlay,
    /// A demo or code link inside the open modal.
    ModalLink(ModalLink),
    /// The theme toggle button.
    ThemeToggle,
}

/// One page scroll sample for scroll-spy.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PageScroll {
    /// `window.scrollY`.
    pub scroll_y: f64,
    /// Every `section[id]` on the page, in document order.
    #[serde(default)]
    pub sections: Vec<SectionBounds>,
}

/// Canonical input event.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// A carousel section was resolved in the DOM.
    Attach { section: Section, attach: SectionAttach },
    /// The section's container scrolled.
    Scroll { section: Section, metrics: SectionMetrics },
    /// The viewport resized; `metrics` is the section's fresh measurement.
    Resize { section: Section, metrics: SectionMetrics },
    /// A click on a known target.
    Click(Click),
    /// A global key press.
    Key(Key),
    /// The page itself scrolled.
    PageScroll(PageScroll),
    /// The system color-scheme preference changed.
    SystemTheme { dark: bool },
    /// The host started observing an element for scroll reveal.
    Observe { element: String },
    /// An observed element's intersection state changed.
    Intersect { element: String, visible: bool },
}

impl Event {
    /// Short stable name, matching the host JSON `kind`.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Attach { .. } => "attach",
            Self::Scroll { .. } => "scroll",
            Self::Resize { .. } => "resize",
            Self::Click(_) => "click",
            Self::Key(_) => "key",
            Self::PageScroll(_) => "page_scroll",
            Self::SystemTheme { .. } => "system_theme",
            Self::Observe { .. } => "observe",
            Self::Intersect { .. } => "intersect",
        }
    }
}
