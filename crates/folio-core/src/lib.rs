#![forbid(unsafe_code)]

//! Host-independent interaction core for the Folio portfolio site.
//!
//! Every browser behavior of the site (carousel navigation, the project
//! detail modal, theme switching, scroll-spy, scroll reveal) is expressed
//! here as a deterministic state transition: the host measures the DOM,
//! feeds an [`Event`] into [`Portfolio::update`], and applies the returned
//! [`Command`] list. Nothing in this crate touches the DOM or a real clock.
//!
//! # Role in Folio
//! `folio-core` owns all state. `folio-web` wraps it in a host-driven WASM
//! runner that parses JSON input from JavaScript and serializes commands
//! back out.
//!
//! # Module map
//! - [`carousel`]: scroll-offset state and control affordances per section.
//! - [`modal`] / [`catalog`]: project records and the detail view lifecycle.
//! - [`keys`]: keyboard routing between carousel and modal modes.
//! - [`theme`], [`scroll_spy`], [`reveal`]: independent page behaviors.
//! - [`schedule`]: deterministic deferred continuations.
//! - [`portfolio`]: the model that composes everything.

pub mod carousel;
pub mod catalog;
pub mod command;
pub mod config;
pub mod event;
pub mod geometry;
pub mod keys;
pub mod modal;
pub mod portfolio;
pub mod reveal;
pub mod schedule;
pub mod scroll_spy;
pub mod theme;

pub use carousel::{
    Affordance, CarouselConfig, CarouselController, CarouselState, Control, Direction,
};
pub use catalog::{CatalogError, ProjectCatalog, ProjectId, ProjectRecord};
pub use command::{Command, FocusTarget};
pub use config::{ConfigError, FolioConfig};
pub use event::{Click, Event, PageScroll, Section, SectionAttach};
pub use geometry::SectionMetrics;
pub use keys::{Key, KeyIntent, KeyMode, KeyRouter};
pub use modal::{ModalLink, ModalPhase, ProjectModal, render_project_detail};
pub use portfolio::Portfolio;
pub use reveal::RevealTracker;
pub use schedule::{DeterministicClock, Scheduler};
pub use scroll_spy::{ScrollSpy, SectionBounds, active_section};
pub use theme::{Theme, ThemeState};
