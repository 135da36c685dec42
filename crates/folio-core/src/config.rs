#![forbid(unsafe_code)]

//! Tunable parameters of the interaction core.
//!
//! [`FolioConfig`] gathers every delay, gap and tolerance into one struct
//! that can be loaded from JSON (or TOML with the `toml` feature) at
//! startup:
//!
//! ```toml
//! settle_delay_ms = 300
//! keyboard_section = "projects"
//!
//! [certificates]
//! gap = 25.0
//! hide_when_fits = true
//! ```
//!
//! Every field has a default matching the live site, so
//! `FolioConfig::default()` reproduces its behavior.

use core::time::Duration;
use std::path::Path;

use serde::{Deserialize, Deserializer, Serialize};

use crate::carousel::CarouselConfig;
use crate::event::Section;
use crate::scroll_spy::DEFAULT_SPY_OFFSET;

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FolioConfig {
    /// Project carousel tuning.
    #[serde(deserialize_with = "projects_carousel")]
    pub projects: CarouselConfig,
    /// Certificate carousel tuning.
    #[serde(deserialize_with = "certificates_carousel")]
    pub certificates: CarouselConfig,
    /// Delay before affordances are re-checked after an animated move.
    pub settle_delay_ms: u64,
    /// Loading state duration of a "view details" button.
    pub modal_open_delay_ms: u64,
    /// Delay before the modal close button takes focus.
    pub modal_focus_delay_ms: u64,
    /// Loading state of a modal demo/code link before its URL opens.
    pub link_open_delay_ms: u64,
    /// Delay after opening a link before its button is restored.
    pub link_restore_delay_ms: u64,
    /// Scroll-spy probe offset below the viewport top.
    pub spy_offset: f64,
    /// Section driven by the arrow keys.
    pub keyboard_section: Section,
}

impl Default for FolioConfig {
    fn default() -> Self {
        Self {
            projects: CarouselConfig::projects(),
            certificates: CarouselConfig::certificates(),
            settle_delay_ms: 300,
            modal_open_delay_ms: 800,
            modal_focus_delay_ms: 100,
            link_open_delay_ms: 1000,
            link_restore_delay_ms: 500,
            spy_offset: DEFAULT_SPY_OFFSET,
            keyboard_section: Section::Projects,
        }
    }
}

impl FolioConfig {
    /// Load from a JSON string.
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(s).map_err(ConfigError::Json)?;
        config.validated()
    }

    /// Load from a JSON file on disk.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(ConfigError::Io)?;
        Self::from_json_str(&content)
    }

    /// Load from a TOML string.
    #[cfg(feature = "toml")]
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s).map_err(ConfigError::Toml)?;
        config.validated()
    }

    /// Load from a TOML file on disk.
    #[cfg(feature = "toml")]
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(ConfigError::Io)?;
        Self::from_toml_str(&content)
    }

    /// Tuning for `section`.
    #[must_use]
    pub const fn carousel(&self, section: Section) -> CarouselConfig {
        match section {
            Section::Projects => self.projects,
            Section::Certificates => self.certificates,
        }
    }

    #[must_use]
    pub const fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.settle_delay_ms)
    }

    #[must_use]
    pub const fn modal_open_delay(&self) -> Duration {
        Duration::from_millis(self.modal_open_delay_ms)
    }

    #[must_use]
    pub const fn modal_focus_delay(&self) -> Duration {
        Duration::from_millis(self.modal_focus_delay_ms)
    }

    #[must_use]
    pub const fn link_open_delay(&self) -> Duration {
        Duration::from_millis(self.link_open_delay_ms)
    }

    #[must_use]
    pub const fn link_restore_delay(&self) -> Duration {
        Duration::from_millis(self.link_restore_delay_ms)
    }

    /// Validate all parameters are within acceptable ranges.
    ///
    /// Returns a list of validation errors. An empty list means the config
    /// is valid.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        for section in Section::ALL {
            let c = self.carousel(section);
            if !c.gap.is_finite() || c.gap < 0.0 {
                errors.push(format!("{section}.gap must be finite and >= 0, got {}", c.gap));
            }
            if !c.epsilon.is_finite() || c.epsilon < 0.0 {
                errors.push(format!(
                    "{section}.epsilon must be finite and >= 0, got {}",
                    c.epsilon
                ));
            }
        }
        if !self.spy_offset.is_finite() {
            errors.push(format!("spy_offset must be finite, got {}", self.spy_offset));
        }
        errors
    }

    fn validated(self) -> Result<Self, ConfigError> {
        let errors = self.validate();
        if errors.is_empty() {
            Ok(self)
        } else {
            Err(ConfigError::Validation(errors))
        }
    }
}

/// Partial carousel table. Absent fields keep the section's own defaults.
#[derive(Debug, Default, Deserialize)]
struct CarouselOverrides {
    gap: Option<f64>,
    epsilon: Option<f64>,
    hide_when_fits: Option<bool>,
}

impl CarouselOverrides {
    fn apply(self, base: CarouselConfig) -> CarouselConfig {
        CarouselConfig {
            gap: self.gap.unwrap_or(base.gap),
            epsilon: self.epsilon.unwrap_or(base.epsilon),
            hide_when_fits: self.hide_when_fits.unwrap_or(base.hide_when_fits),
        }
    }
}

fn projects_carousel<'de, D: Deserializer<'de>>(d: D) -> Result<CarouselConfig, D::Error> {
    CarouselOverrides::deserialize(d).map(|o| o.apply(CarouselConfig::projects()))
}

fn certificates_carousel<'de, D: Deserializer<'de>>(d: D) -> Result<CarouselConfig, D::Error> {
    CarouselOverrides::deserialize(d).map(|o| o.apply(CarouselConfig::certificates()))
}

/// Errors from loading a [`FolioConfig`].
#[derive(Debug)]
pub enum ConfigError {
    /// I/O error reading a file.
    Io(std::io::Error),
    /// JSON parse error.
    Json(serde_json::Error),
    /// TOML parse error.
    #[cfg(feature = "toml")]
    Toml(toml::de::Error),
    /// Validation errors.
    Validation(Vec<String>),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::Json(e) => write!(f, "JSON parse error: {e}"),
            #[cfg(feature = "toml")]
            Self::Toml(e) => write!(f, "TOML parse error: {e}"),
            Self::Validation(errors) => {
                write!(f, "validation errors: {}", errors.join("; "))
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Json(e) => Some(e),
            #[cfg(feature = "toml")]
            Self::Toml(e) => Some(e),
            Self::Validation(_) => None,
        }
    }
}
