#![forbid(unsafe_code)]

//! Global keyboard routing.
//!
//! Keys are routed in one of two mutually exclusive modes, selected solely
//! by whether the project modal is visible:
//!
//! | Mode       | `ArrowLeft`          | `ArrowRight`     | `Escape`       |
//! |------------|----------------------|------------------|----------------|
//! | `Carousel` | navigate previous    | navigate next    | ignored        |
//! | `Modal`    | ignored              | ignored          | dismiss modal  |

use crate::carousel::Direction;
use crate::event::Section;

/// A key press, identified by the DOM `KeyboardEvent.key` value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Key {
    ArrowLeft,
    ArrowRight,
    Escape,
    /// Any key without a binding.
    Other(String),
}

impl Key {
    /// Map a DOM key name.
    #[must_use]
    pub fn from_dom(key: &str) -> Self {
        match key {
            "ArrowLeft" | "Left" => Self::ArrowLeft,
            "ArrowRight" | "Right" => Self::ArrowRight,
            "Escape" | "Esc" => Self::Escape,
            other => Self::Other(other.to_owned()),
        }
    }
}

/// Which handler owns the keyboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyMode {
    Carousel,
    Modal,
}

impl KeyMode {
    #[must_use]
    pub const fn from_modal_open(open: bool) -> Self {
        if open { Self::Modal } else { Self::Carousel }
    }
}

/// Outcome of routing one key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyIntent {
    /// Move the bound carousel.
    Navigate { section: Section, direction: Direction },
    /// Close the modal.
    DismissModal,
    /// Nothing to do.
    Ignore,
}

/// Maps keys to intents for a keyboard-bound carousel section.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyRouter {
    section: Section,
}

impl Default for KeyRouter {
    fn default() -> Self {
        Self::new(Section::Projects)
    }
}

impl KeyRouter {
    /// Route arrow keys to `section`.
    #[must_use]
    pub const fn new(section: Section) -> Self {
        Self { section }
    }

    #[must_use]
    pub const fn section(&self) -> Section {
        self.section
    }

    #[must_use]
    pub fn route(&self, key: &Key, mode: KeyMode) -> KeyIntent {
        match (mode, key) {
            (KeyMode::Modal, Key::Escape) => KeyIntent::DismissModal,
            (KeyMode::Modal, _) => KeyIntent::Ignore,
            (KeyMode::Carousel, Key::ArrowLeft) => KeyIntent::Navigate {
                section: self.section,
                direction: Direction::Previous,
            },
            (KeyMode::Carousel, Key::ArrowRight) => KeyIntent::Navigate {
                section: self.section,
                direction: Direction::Next,
            },
            (KeyMode::Carousel, _) => KeyIntent::Ignore,
        }
    }
}
