#![forbid(unsafe_code)]

//! Carousel navigation and control affordances.
//!
//! A [`CarouselController`] binds one horizontally scrolling slide list and
//! its previous/next controls. It tracks a single [`CarouselState`]; whether
//! the list sits at its start or end is always derived from that state on
//! read, never stored, so the two can never disagree.
//!
//! # Offsets
//!
//! ```text
//!   0                 offset                        max_scroll
//!   |--------------------|------------------------------|
//!   |<- epsilon ->|                     |<- epsilon ->|
//!     at_start                               at_end
//! ```
//!
//! `max_scroll = max(0, content_width - viewport_width)`. Every programmatic
//! move is clamped into `[0, max_scroll]` before it is applied.
//!
//! # Animated moves
//!
//! A move issues a smooth scroll and remembers its target as the in-flight
//! offset until the settle continuation runs. Rapid moves chain from the
//! previous target instead of a half-animated live position, and affordances
//! reflect where the list is heading.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

use crate::command::Command;
use crate::event::{Section, SectionAttach};
use crate::geometry::{SectionMetrics, clamp_offset, sanitize_length};

/// Default boundary tolerance in pixels, absorbing sub-pixel rounding.
pub const DEFAULT_EPSILON: f64 = 10.0;
/// Inter-slide gap of the project list.
pub const PROJECTS_GAP: f64 = 24.0;
/// Inter-slide gap of the certificate list.
pub const CERTIFICATES_GAP: f64 = 25.0;

/// Navigation direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Previous,
    Next,
}

impl Direction {
    /// The control that triggers this direction.
    #[must_use]
    pub const fn control(self) -> Control {
        match self {
            Self::Previous => Control::Prev,
            Self::Next => Control::Next,
        }
    }
}

/// One of the two navigation controls of a carousel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Control {
    Prev,
    Next,
}

impl Control {
    /// Both controls, previous first.
    pub const BOTH: [Control; 2] = [Control::Prev, Control::Next];

    /// The direction this control navigates.
    #[must_use]
    pub const fn direction(self) -> Direction {
        match self {
            Self::Prev => Direction::Previous,
            Self::Next => Direction::Next,
        }
    }

    const fn slot(self) -> usize {
        match self {
            Self::Prev => 0,
            Self::Next => 1,
        }
    }
}

bitflags! {
    /// Presentation and actionability of a navigation control.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Affordance: u8 {
        /// The control is actionable.
        const ENABLED = 0b001;
        /// Full opacity and pointer cursor; cleared means de-emphasized.
        const EMPHASIZED = 0b010;
        /// The control is displayed at all.
        const VISIBLE = 0b100;
    }
}

impl Affordance {
    /// Visible, actionable, emphasized.
    pub const ACTIVE: Self = Self::ENABLED.union(Self::EMPHASIZED).union(Self::VISIBLE);
    /// Visible but inert and de-emphasized.
    pub const INERT: Self = Self::VISIBLE;
}

/// Per-section tuning.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CarouselConfig {
    /// Gap added to the first slide's width to form one navigation step.
    pub gap: f64,
    /// Boundary tolerance for the start/end checks.
    pub epsilon: f64,
    /// Hide both controls (not just disable them) when every slide fits.
    pub hide_when_fits: bool,
}

impl CarouselConfig {
    /// Tuning for the project list.
    #[must_use]
    pub const fn projects() -> Self {
        Self {
            gap: PROJECTS_GAP,
            epsilon: DEFAULT_EPSILON,
            hide_when_fits: false,
        }
    }

    /// Tuning for the certificate list.
    #[must_use]
    pub const fn certificates() -> Self {
        Self {
            gap: CERTIFICATES_GAP,
            epsilon: DEFAULT_EPSILON,
            hide_when_fits: true,
        }
    }

    /// Default tuning for `section`.
    #[must_use]
    pub const fn for_section(section: Section) -> Self {
        match section {
            Section::Projects => Self::projects(),
            Section::Certificates => Self::certificates(),
        }
    }
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self::projects()
    }
}

/// Scroll state of one slide list.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CarouselState {
    live_offset: f64,
    in_flight: Option<f64>,
    viewport_width: f64,
    content_width: f64,
    epsilon: f64,
}

impl CarouselState {
    /// State at offset `0` for the given widths.
    #[must_use]
    pub fn new(viewport_width: f64, content_width: f64, epsilon: f64) -> Self {
        Self {
            live_offset: 0.0,
            in_flight: None,
            viewport_width: sanitize_length(viewport_width),
            content_width: sanitize_length(content_width),
            epsilon: sanitize_length(epsilon),
        }
    }

    /// State built from a live measurement.
    #[must_use]
    pub fn from_metrics(metrics: SectionMetrics, epsilon: f64) -> Self {
        let metrics = metrics.sanitized();
        let mut state = Self::new(metrics.client_width, metrics.scroll_width, epsilon);
        state.live_offset = clamp_offset(metrics.scroll_left, state.max_scroll());
        state
    }

    /// Effective offset: the in-flight target if a move is settling,
    /// otherwise the last measured position.
    #[must_use]
    pub fn scroll_offset(&self) -> f64 {
        self.in_flight.unwrap_or(self.live_offset)
    }

    #[must_use]
    pub const fn viewport_width(&self) -> f64 {
        self.viewport_width
    }

    #[must_use]
    pub const fn content_width(&self) -> f64 {
        self.content_width
    }

    #[must_use]
    pub const fn epsilon(&self) -> f64 {
        self.epsilon
    }

    /// Whether an animated move has not settled yet.
    #[must_use]
    pub const fn is_moving(&self) -> bool {
        self.in_flight.is_some()
    }

    /// `max(0, content_width - viewport_width)`.
    #[must_use]
    pub fn max_scroll(&self) -> f64 {
        (self.content_width - self.viewport_width).max(0.0)
    }

    /// Every slide is visible at once.
    #[must_use]
    pub fn fits(&self) -> bool {
        self.content_width <= self.viewport_width
    }

    #[must_use]
    pub fn at_start(&self) -> bool {
        self.scroll_offset() <= self.epsilon
    }

    #[must_use]
    pub fn at_end(&self) -> bool {
        self.scroll_offset() >= self.max_scroll() - self.epsilon
    }

    /// Clamped destination of one step of `step` pixels in `direction`.
    ///
    /// Pure: does not change the state.
    #[must_use]
    pub fn target(&self, direction: Direction, step: f64) -> f64 {
        let step = sanitize_length(step);
        let delta = match direction {
            Direction::Previous => -step,
            Direction::Next => step,
        };
        clamp_offset(self.scroll_offset() + delta, self.max_scroll())
    }

    /// Affordance of `control` under the current state.
    #[must_use]
    pub fn affordance(&self, control: Control, hide_when_fits: bool) -> Affordance {
        if self.fits() {
            return if hide_when_fits {
                Affordance::empty()
            } else {
                Affordance::INERT
            };
        }
        let blocked = match control {
            Control::Prev => self.at_start(),
            Control::Next => self.at_end(),
        };
        if blocked {
            Affordance::INERT
        } else {
            Affordance::ACTIVE
        }
    }

    /// Refresh from a live measurement.
    ///
    /// An in-flight target survives, re-clamped to the new bounds.
    pub fn remeasure(&mut self, metrics: SectionMetrics) {
        let metrics = metrics.sanitized();
        self.viewport_width = metrics.client_width;
        self.content_width = metrics.scroll_width;
        let max = self.max_scroll();
        self.live_offset = clamp_offset(metrics.scroll_left, max);
        if let Some(target) = self.in_flight {
            self.in_flight = Some(clamp_offset(target, max));
        }
    }

    /// Start an animated move toward `target`.
    pub fn begin_move(&mut self, target: f64) {
        self.in_flight = Some(clamp_offset(target, self.max_scroll()));
    }

    /// Finish the in-flight move.
    ///
    /// When the host never reported the scroll, the target is assumed to
    /// have been reached.
    pub fn settle(&mut self, measured_since_move: bool) {
        if let Some(target) = self.in_flight.take()
            && !measured_since_move
        {
            self.live_offset = target;
        }
    }

    /// Jump to `offset` immediately (no animation).
    pub fn reset_to(&mut self, offset: f64) {
        self.in_flight = None;
        self.live_offset = clamp_offset(offset, self.max_scroll());
    }
}

#[derive(Debug, Clone)]
struct Binding {
    state: CarouselState,
    has_control: [bool; 2],
    published: [Option<Affordance>; 2],
    slide_width: Option<f64>,
    measured_since_move: bool,
}

/// Controller for one section's carousel.
///
/// A controller whose container is missing stays detached and ignores every
/// operation.
#[derive(Debug, Clone)]
pub struct CarouselController {
    section: Section,
    config: CarouselConfig,
    binding: Option<Binding>,
    /// Settle generation of the latest move. Survives re-attaching so a
    /// settle queued before it can never match a later move.
    generation: u64,
}

impl CarouselController {
    /// Create a detached controller.
    #[must_use]
    pub fn new(section: Section, config: CarouselConfig) -> Self {
        Self {
            section,
            config,
            binding: None,
            generation: 0,
        }
    }

    #[must_use]
    pub const fn section(&self) -> Section {
        self.section
    }

    #[must_use]
    pub const fn config(&self) -> &CarouselConfig {
        &self.config
    }

    #[must_use]
    pub const fn is_attached(&self) -> bool {
        self.binding.is_some()
    }

    /// Current state, if attached.
    #[must_use]
    pub fn state(&self) -> Option<&CarouselState> {
        self.binding.as_ref().map(|b| &b.state)
    }

    /// Effective offset, `0.0` when detached.
    #[must_use]
    pub fn scroll_offset(&self) -> f64 {
        self.state().map_or(0.0, CarouselState::scroll_offset)
    }

    /// Live affordance of `control`; empty when detached or the control is
    /// missing.
    #[must_use]
    pub fn affordance(&self, control: Control) -> Affordance {
        match &self.binding {
            Some(b) if b.has_control[control.slot()] => {
                b.state.affordance(control, self.config.hide_when_fits)
            }
            _ => Affordance::empty(),
        }
    }

    /// Bind to the section's elements and reset to offset `0`.
    ///
    /// A missing container leaves the controller detached.
    pub fn attach(&mut self, attach: SectionAttach, out: &mut Vec<Command>) {
        if !attach.container {
            tracing::debug!(
                target: "folio.carousel",
                section = %self.section,
                "container absent; controller stays inert"
            );
            self.binding = None;
            return;
        }
        let metrics = attach.metrics.unwrap_or_default().sanitized();
        let mut state = CarouselState::from_metrics(metrics, self.config.epsilon);
        state.reset_to(0.0);
        self.binding = Some(Binding {
            state,
            has_control: [attach.prev, attach.next],
            published: [None, None],
            slide_width: metrics.slide_width,
            measured_since_move: false,
        });
        tracing::debug!(
            target: "folio.carousel",
            section = %self.section,
            viewport = state.viewport_width(),
            content = state.content_width(),
            "carousel attached"
        );
        out.push(Command::ScrollTo {
            section: self.section,
            left: 0.0,
            smooth: false,
        });
        self.publish(true, out);
    }

    /// Handle a click on one of the controls.
    ///
    /// Returns the settle generation when a move started.
    pub fn click(&mut self, control: Control, out: &mut Vec<Command>) -> Option<u64> {
        self.navigate(control.direction(), out)
    }

    /// Move one step in `direction`.
    ///
    /// No-op when detached, when the list is empty, or when the control for
    /// `direction` is currently disabled. Returns the settle generation of
    /// the started move.
    pub fn navigate(&mut self, direction: Direction, out: &mut Vec<Command>) -> Option<u64> {
        let section = self.section;
        let gap = self.config.gap;
        let hide_when_fits = self.config.hide_when_fits;
        let binding = self.binding.as_mut()?;
        let control = direction.control();
        if !binding
            .state
            .affordance(control, hide_when_fits)
            .contains(Affordance::ENABLED)
        {
            tracing::trace!(
                target: "folio.carousel",
                section = %section,
                ?direction,
                "navigation blocked by disabled control"
            );
            return None;
        }
        let Some(slide_width) = binding.slide_width else {
            tracing::trace!(target: "folio.carousel", section = %section, "no slides");
            return None;
        };
        let from = binding.state.scroll_offset();
        let target = binding.state.target(direction, slide_width + gap);
        binding.state.begin_move(target);
        binding.measured_since_move = false;
        self.generation = self.generation.wrapping_add(1);
        let generation = self.generation;
        tracing::debug!(
            target: "folio.carousel",
            section = %section,
            ?direction,
            from,
            to = target,
            generation,
            "carousel move"
        );
        out.push(Command::ScrollTo {
            section,
            left: target,
            smooth: true,
        });
        self.publish(false, out);
        Some(generation)
    }

    /// The container scrolled.
    pub fn on_scroll(&mut self, metrics: SectionMetrics, out: &mut Vec<Command>) {
        self.remeasure(metrics, out);
    }

    /// The viewport resized.
    pub fn on_resize(&mut self, metrics: SectionMetrics, out: &mut Vec<Command>) {
        self.remeasure(metrics, out);
    }

    /// Settle continuation of the move tagged `generation`.
    ///
    /// Stale generations (superseded by a later move) are ignored.
    pub fn settle(&mut self, generation: u64, out: &mut Vec<Command>) {
        let Some(binding) = self.binding.as_mut() else {
            return;
        };
        if self.generation != generation || !binding.state.is_moving() {
            return;
        }
        binding.state.settle(binding.measured_since_move);
        self.publish(false, out);
    }

    fn remeasure(&mut self, metrics: SectionMetrics, out: &mut Vec<Command>) {
        let Some(binding) = self.binding.as_mut() else {
            return;
        };
        let metrics = metrics.sanitized();
        binding.state.remeasure(metrics);
        binding.slide_width = metrics.slide_width;
        binding.measured_since_move = true;
        self.publish(false, out);
    }

    fn publish(&mut self, force: bool, out: &mut Vec<Command>) {
        let section = self.section;
        let hide_when_fits = self.config.hide_when_fits;
        let Some(binding) = self.binding.as_mut() else {
            return;
        };
        for control in Control::BOTH {
            let slot = control.slot();
            if !binding.has_control[slot] {
                continue;
            }
            let affordance = binding.state.affordance(control, hide_when_fits);
            if force || binding.published[slot] != Some(affordance) {
                binding.published[slot] = Some(affordance);
                out.push(Command::control(section, control, affordance));
            }
        }
    }
}
