#![forbid(unsafe_code)]

//! Platform-independent runner core wrapping [`Portfolio`].
//!
//! This module contains the logic shared between the wasm-bindgen exports
//! and the native test harness. No JS/WASM types here.

use core::time::Duration;
use std::collections::VecDeque;

use folio_core::{Command, Event, FolioConfig, Portfolio, ProjectCatalog};

use crate::input_parser::parse_encoded_input;

/// Outcome of one [`RunnerCore::step`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepResult {
    /// Queued events handled during this step.
    pub events_processed: u32,
    /// Commands waiting in the outbox after this step.
    pub commands_pending: u32,
}

/// Platform-independent runner wrapping [`Portfolio`].
///
/// Inputs are queued by [`Self::push_encoded_input`] and processed by
/// [`Self::step`]. Time only moves when the host calls
/// [`Self::advance_time_ms`] or [`Self::set_time_ms`]. Every resulting
/// command lands in one outbox the host drains after each call.
#[derive(Debug)]
pub struct RunnerCore {
    portfolio: Portfolio,
    queue: VecDeque<Event>,
    outbox: Vec<Command>,
    logs: Vec<String>,
    initialized: bool,
}

impl Default for RunnerCore {
    fn default() -> Self {
        Self::new()
    }
}

impl RunnerCore {
    /// Create a runner with the default config and built-in project catalog.
    pub fn new() -> Self {
        Self::with_portfolio(Portfolio::default())
    }

    /// Create a runner from host-supplied JSON.
    ///
    /// Either source may be omitted to use the defaults. Errors are
    /// rendered for display in the host console.
    pub fn from_json_sources(config: Option<&str>, catalog: Option<&str>) -> Result<Self, String> {
        let config = match config {
            Some(json) => {
                FolioConfig::from_json_str(json).map_err(|e| format!("config error: {e}"))?
            }
            None => FolioConfig::default(),
        };
        let catalog = match catalog {
            Some(json) => {
                ProjectCatalog::from_json_str(json).map_err(|e| format!("catalog error: {e}"))?
            }
            None => ProjectCatalog::builtin(),
        };
        Ok(Self::with_portfolio(Portfolio::new(config, catalog)))
    }

    fn with_portfolio(portfolio: Portfolio) -> Self {
        Self {
            portfolio,
            queue: VecDeque::new(),
            outbox: Vec::new(),
            logs: Vec::new(),
            initialized: false,
        }
    }

    #[must_use]
    pub const fn portfolio(&self) -> &Portfolio {
        &self.portfolio
    }

    #[must_use]
    pub const fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Apply the starting theme. Call exactly once; later calls are ignored.
    pub fn init(&mut self, system_dark: bool) {
        if self.initialized {
            return;
        }
        self.initialized = true;
        let commands = self.portfolio.init(system_dark);
        self.outbox.extend(commands);
    }

    /// Advance the deterministic clock by `dt_ms` milliseconds.
    pub fn advance_time_ms(&mut self, dt_ms: f64) {
        // Host timers can report NaN/inf/negative deltas. Ignore them so the
        // clock stays monotonic and finite.
        if !dt_ms.is_finite() || dt_ms <= 0.0 {
            return;
        }
        let commands = self.portfolio.advance(duration_from_ms(dt_ms));
        self.outbox.extend(commands);
    }

    /// Set the deterministic clock to absolute milliseconds.
    ///
    /// Non-finite, negative and backwards timestamps are ignored.
    pub fn set_time_ms(&mut self, ts_ms: f64) {
        if !ts_ms.is_finite() || ts_ms <= 0.0 {
            return;
        }
        let commands = self.portfolio.set_time(duration_from_ms(ts_ms));
        self.outbox.extend(commands);
    }

    /// Milliseconds until the next deferred task is due, if any.
    ///
    /// Hosts use this to arm a single `setTimeout` instead of polling.
    #[must_use]
    pub fn ms_until_next_deadline(&self) -> Option<f64> {
        let deadline = self.portfolio.next_deadline()?;
        let remaining = deadline.saturating_sub(self.portfolio.now());
        Some(remaining.as_micros() as f64 / 1000.0)
    }

    /// Parse a JSON-encoded input and push it to the event queue.
    ///
    /// Returns `true` if the input was accepted, `false` if it was
    /// malformed or unsupported. Rejections are recorded in the logs.
    pub fn push_encoded_input(&mut self, json: &str) -> bool {
        match parse_encoded_input(json) {
            Ok(event) => {
                self.queue.push_back(event);
                true
            }
            Err(err) => {
                tracing::warn!(target: "folio.runner", error = %err, "input rejected");
                self.logs.push(format!("input_rejected: {err}"));
                false
            }
        }
    }

    /// Queue an already-parsed event.
    pub fn push_event(&mut self, event: Event) {
        self.queue.push_back(event);
    }

    /// Process queued events, then evaluate per-frame work.
    ///
    /// Initializes with the light theme first if [`Self::init`] was never
    /// called.
    pub fn step(&mut self) -> StepResult {
        if !self.initialized {
            self.logs
                .push("runner_auto_init: init() not called before step()".to_owned());
            self.init(false);
        }
        let mut events_processed = 0u32;
        while let Some(event) = self.queue.pop_front() {
            let commands = self.portfolio.update(event);
            self.outbox.extend(commands);
            events_processed = events_processed.saturating_add(1);
        }
        let frame = self.portfolio.frame();
        self.outbox.extend(frame);
        tracing::trace!(
            target: "folio.runner",
            events_processed,
            pending = self.outbox.len(),
            "step"
        );
        StepResult {
            events_processed,
            commands_pending: u32::try_from(self.outbox.len()).unwrap_or(u32::MAX),
        }
    }

    /// Drain pending commands.
    pub fn take_commands(&mut self) -> Vec<Command> {
        std::mem::take(&mut self.outbox)
    }

    /// Drain pending commands as a JSON array.
    pub fn take_commands_json(&mut self) -> String {
        let commands = self.take_commands();
        match serde_json::to_string(&commands) {
            Ok(json) => json,
            Err(err) => {
                self.logs.push(format!("command_encode_error: {err}"));
                "[]".to_owned()
            }
        }
    }

    /// Take accumulated log lines.
    pub fn take_logs(&mut self) -> Vec<String> {
        std::mem::take(&mut self.logs)
    }
}

/// Finite, positive milliseconds to a whole-nanosecond duration.
fn duration_from_ms(ms: f64) -> Duration {
    let nanos = (ms * 1_000_000.0).round().min(u64::MAX as f64);
    Duration::from_nanos(nanos as u64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_core::{Section, Theme};
    use pretty_assertions::assert_eq;

    const ATTACH: &str = r#"{"kind":"attach","section":"projects","container":true,"prev":true,"next":true,
        "metrics":{"scroll_left":0,"client_width":900,"scroll_width":1620,"slide_width":300}}"#;

    #[test]
    fn init_is_idempotent() {
        let mut core = RunnerCore::new();
        core.init(true);
        core.init(false);
        assert_eq!(core.take_commands(), vec![Command::set_theme(Theme::Dark)]);
        assert_eq!(core.portfolio().theme(), Theme::Dark);
    }

    #[test]
    fn step_auto_initializes_when_needed() {
        let mut core = RunnerCore::new();
        let result = core.step();
        assert!(core.is_initialized());
        assert_eq!(result.events_processed, 0);
        assert_eq!(result.commands_pending, 1);
        assert!(core.take_logs()[0].starts_with("runner_auto_init"));
    }

    #[test]
    fn inputs_wait_for_step() {
        let mut core = RunnerCore::new();
        core.init(false);
        core.take_commands();
        assert!(core.push_encoded_input(ATTACH));
        assert!(core.take_commands().is_empty());
        let result = core.step();
        assert_eq!(result.events_processed, 1);
        assert_eq!(result.commands_pending, 3);
    }

    #[test]
    fn rejected_input_is_logged() {
        let mut core = RunnerCore::new();
        assert!(!core.push_encoded_input(r#"{"kind":"hover"}"#));
        assert!(!core.push_encoded_input("nope"));
        let logs = core.take_logs();
        assert_eq!(logs.len(), 2);
        assert!(logs[0].contains("unknown input kind: hover"));
    }

    #[test]
    fn noisy_time_deltas_are_ignored() {
        let mut core = RunnerCore::new();
        core.advance_time_ms(f64::NAN);
        core.advance_time_ms(f64::INFINITY);
        core.advance_time_ms(-5.0);
        core.set_time_ms(f64::NEG_INFINITY);
        assert_eq!(core.portfolio().now(), Duration::ZERO);
        core.advance_time_ms(16.5);
        assert_eq!(core.portfolio().now(), Duration::from_micros(16_500));
    }

    #[test]
    fn deadline_hint_tracks_settle() {
        let mut core = RunnerCore::new();
        core.init(false);
        core.push_encoded_input(ATTACH);
        core.push_encoded_input(r#"{"kind":"key","key":"ArrowRight"}"#);
        core.step();
        assert_eq!(core.ms_until_next_deadline(), Some(300.0));
        core.advance_time_ms(120.0);
        assert_eq!(core.ms_until_next_deadline(), Some(180.0));
        core.advance_time_ms(180.0);
        assert_eq!(core.ms_until_next_deadline(), None);
        assert_eq!(
            core.portfolio().carousel(Section::Projects).scroll_offset(),
            324.0
        );
    }

    #[test]
    fn commands_serialize_tagged() {
        let mut core = RunnerCore::new();
        core.init(true);
        let json = core.take_commands_json();
        assert_eq!(
            json,
            r#"[{"kind":"set_theme","theme":"dark","icon":"sun","label":"Switch to light mode"}]"#
        );
        assert_eq!(core.take_commands_json(), "[]");
    }

    #[test]
    fn bad_config_is_reported() {
        let err = RunnerCore::from_json_sources(Some(r#"{"spy_offset": "far"}"#), None)
            .unwrap_err();
        assert!(err.starts_with("config error:"));
        let err = RunnerCore::from_json_sources(None, Some("[]x")).unwrap_err();
        assert!(err.starts_with("catalog error:"));
    }
}
