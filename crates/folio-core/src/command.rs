#![forbid(unsafe_code)]

//! Host commands emitted by [`crate::Portfolio`].
//!
//! Commands are the only way the core affects the page. They serialize to
//! JSON objects tagged by `kind`, which the web runner hands to JavaScript.

use serde::Serialize;

use crate::carousel::{Affordance, Control};
use crate::catalog::ProjectId;
use crate::event::Section;
use crate::modal::ModalLink;
use crate::theme::Theme;

/// Elements the core may ask the host to focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FocusTarget {
    /// The modal close button.
    ModalClose,
}

/// A single DOM mutation request.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Command {
    /// Scroll a section's container to `left`.
    ScrollTo {
        section: Section,
        left: f64,
        smooth: bool,
    },
    /// Apply a control's affordance.
    Control {
        section: Section,
        control: Control,
        enabled: bool,
        emphasized: bool,
        visible: bool,
    },
    /// Fill the modal body with `html` and show it.
    ShowModal { project: ProjectId, html: String },
    /// Hide the modal.
    HideModal,
    /// Lock or unlock page scrolling behind the modal.
    ScrollLock { locked: bool },
    /// Toggle the loading state of a project's "view details" button.
    Loading { project: ProjectId, active: bool },
    /// Toggle the loading state of a modal link button.
    LinkLoading { link: ModalLink, active: bool },
    /// Open `url` in a new tab.
    OpenUrl { url: String },
    /// Move keyboard focus.
    Focus { target: FocusTarget },
    /// Apply a color theme and update the toggle icon.
    SetTheme {
        theme: Theme,
        icon: &'static str,
        label: &'static str,
    },
    /// Mark one navigation link as active.
    SetActiveNav { section: String },
    /// Start the reveal animation of an element and stop observing it.
    Reveal { element: String },
}

impl Command {
    /// Build a [`Command::Control`] from an affordance.
    #[must_use]
    pub fn control(section: Section, control: Control, affordance: Affordance) -> Self {
        Self::Control {
            section,
            control,
            enabled: affordance.contains(Affordance::ENABLED),
            emphasized: affordance.contains(Affordance::EMPHASIZED),
            visible: affordance.contains(Affordance::VISIBLE),
        }
    }

    /// Build a [`Command::SetTheme`] with the toggle icon for `theme`.
    #[must_use]
    pub fn set_theme(theme: Theme) -> Self {
        Self::SetTheme {
            theme,
            icon: theme.toggle_icon(),
            label: theme.toggle_label(),
        }
    }

    /// Short stable name, used in logs.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::ScrollTo { .. } => "scroll_to",
            Self::Control { .. } => "control",
            Self::ShowModal { .. } => "show_modal",
            Self::HideModal => "hide_modal",
            Self::ScrollLock { .. } => "scroll_lock",
            Self::Loading { .. } => "loading",
            Self::LinkLoading { .. } => "link_loading",
            Self::OpenUrl { .. } => "open_url",
            Self::Focus { .. } => "focus",
            Self::SetTheme { .. } => "set_theme",
            Self::SetActiveNav { .. } => "set_active_nav",
            Self::Reveal { .. } => "reveal",
        }
    }
}
