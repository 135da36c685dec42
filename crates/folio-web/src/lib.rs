#![forbid(unsafe_code)]

//! WASM runner for the Folio portfolio site.
//!
//! This crate provides `PortfolioRunner`, a
//! `wasm-bindgen`-exported struct that wraps [`folio_core::Portfolio`] and
//! exposes it to JavaScript for host-driven execution:
//!
//! 1. `pushEncodedInput(json)` for every DOM event the page listens to.
//! 2. `step()` once per animation frame.
//! 3. `advanceTime(dt_ms)` from the host's timers.
//! 4. `takeCommands()` and apply each command to the DOM.
//!
//! [`input_parser`] and [`runner_core`] hold the platform-independent logic
//! and are tested natively.

pub mod input_parser;
pub mod runner_core;

#[cfg(target_arch = "wasm32")]
mod wasm;

#[cfg(target_arch = "wasm32")]
pub use wasm::PortfolioRunner;

pub use input_parser::{InputParseError, parse_encoded_input};
pub use runner_core::{RunnerCore, StepResult};
