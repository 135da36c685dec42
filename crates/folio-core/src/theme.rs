#![forbid(unsafe_code)]

//! Light/dark theme switching.
//!
//! The page starts in the system color scheme and follows it until the
//! visitor presses the toggle. After that the visitor's choice wins for the
//! rest of the session. Nothing is persisted across reloads.

use serde::{Deserialize, Serialize};

/// Page color theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    #[must_use]
    pub const fn from_dark(dark: bool) -> Self {
        if dark { Self::Dark } else { Self::Light }
    }

    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    /// Icon shown on the toggle: the theme you would switch to.
    #[must_use]
    pub const fn toggle_icon(self) -> &'static str {
        match self {
            Self::Light => "moon",
            Self::Dark => "sun",
        }
    }

    /// Accessible label of the toggle.
    #[must_use]
    pub const fn toggle_label(self) -> &'static str {
        match self {
            Self::Light => "Switch to dark mode",
            Self::Dark => "Switch to light mode",
        }
    }
}

/// Session theme state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ThemeState {
    current: Theme,
    chosen: bool,
}

impl ThemeState {
    /// Start from the system preference.
    #[must_use]
    pub const fn from_system(dark: bool) -> Self {
        Self {
            current: Theme::from_dark(dark),
            chosen: false,
        }
    }

    #[must_use]
    pub const fn current(&self) -> Theme {
        self.current
    }

    /// Whether the visitor picked the theme this session.
    #[must_use]
    pub const fn is_chosen(&self) -> bool {
        self.chosen
    }

    /// Flip the theme on behalf of the visitor.
    pub fn toggle(&mut self) -> Theme {
        self.current = self.current.toggled();
        self.chosen = true;
        tracing::debug!(target: "folio.theme", theme = self.current.as_str(), "theme toggled");
        self.current
    }

    /// Apply a system preference change. Returns the new theme if it changed.
    pub fn system_changed(&mut self, dark: bool) -> Option<Theme> {
        if self.chosen {
            tracing::trace!(target: "folio.theme", dark, "system change ignored; theme chosen");
            return None;
        }
        let next = Theme::from_dark(dark);
        if next == self.current {
            return None;
        }
        self.current = next;
        Some(next)
    }
}
