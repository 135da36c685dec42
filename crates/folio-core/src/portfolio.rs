#![forbid(unsafe_code)]

//! The page model.
//!
//! [`Portfolio`] composes the carousels, the project modal, the theme,
//! scroll-spy and scroll reveal. It follows the update pattern of an
//! Elm-style runtime: each [`Event`] runs to completion and yields the
//! [`Command`]s the host must apply. Deferred work is queued on a
//! [`Scheduler`] and fires as the host advances time.
//!
//! The pieces share no state. In particular opening or closing the modal
//! never changes any carousel offset.

use core::time::Duration;

use crate::carousel::{CarouselController, Direction};
use crate::catalog::{ProjectCatalog, ProjectId};
use crate::command::{Command, FocusTarget};
use crate::config::FolioConfig;
use crate::event::{Click, Event, Section};
use crate::keys::{KeyIntent, KeyMode, KeyRouter};
use crate::modal::{ModalLink, ProjectModal};
use crate::reveal::RevealTracker;
use crate::schedule::Scheduler;
use crate::scroll_spy::ScrollSpy;
use crate::theme::{Theme, ThemeState};

/// Continuations queued on the scheduler.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Deferred {
    Settle { section: Section, generation: u64 },
    FinishLoading(ProjectId),
    FocusModalClose,
    OpenLink { link: ModalLink, url: String },
    RestoreLink(ModalLink),
}

/// Interaction model of the whole page.
#[derive(Debug)]
pub struct Portfolio {
    config: FolioConfig,
    projects: CarouselController,
    certificates: CarouselController,
    modal: ProjectModal,
    keys: KeyRouter,
    theme: ThemeState,
    spy: ScrollSpy,
    reveal: RevealTracker,
    scheduler: Scheduler<Deferred>,
}

impl Default for Portfolio {
    fn default() -> Self {
        Self::new(FolioConfig::default(), ProjectCatalog::builtin())
    }
}

impl Portfolio {
    #[must_use]
    pub fn new(config: FolioConfig, catalog: ProjectCatalog) -> Self {
        Self {
            projects: CarouselController::new(Section::Projects, config.projects),
            certificates: CarouselController::new(Section::Certificates, config.certificates),
            modal: ProjectModal::new(catalog),
            keys: KeyRouter::new(config.keyboard_section),
            theme: ThemeState::default(),
            spy: ScrollSpy::new(config.spy_offset),
            reveal: RevealTracker::new(),
            scheduler: Scheduler::new(),
            config,
        }
    }

    #[must_use]
    pub const fn config(&self) -> &FolioConfig {
        &self.config
    }

    #[must_use]
    pub fn carousel(&self, section: Section) -> &CarouselController {
        match section {
            Section::Projects => &self.projects,
            Section::Certificates => &self.certificates,
        }
    }

    fn carousel_mut(&mut self, section: Section) -> &mut CarouselController {
        match section {
            Section::Projects => &mut self.projects,
            Section::Certificates => &mut self.certificates,
        }
    }

    #[must_use]
    pub const fn modal(&self) -> &ProjectModal {
        &self.modal
    }

    #[must_use]
    pub const fn theme(&self) -> Theme {
        self.theme.current()
    }

    #[must_use]
    pub fn active_nav(&self) -> Option<&str> {
        self.spy.active()
    }

    /// Current deterministic time.
    #[must_use]
    pub const fn now(&self) -> Duration {
        self.scheduler.now()
    }

    /// Deadline of the next deferred continuation, if any.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Duration> {
        self.scheduler.next_deadline()
    }

    /// Apply the starting theme. Call once at page load.
    pub fn init(&mut self, system_dark: bool) -> Vec<Command> {
        self.theme = ThemeState::from_system(system_dark);
        tracing::debug!(
            target: "folio.theme",
            theme = self.theme.current().as_str(),
            "initial theme from system preference"
        );
        vec![Command::set_theme(self.theme.current())]
    }

    /// Process one event.
    pub fn update(&mut self, event: Event) -> Vec<Command> {
        let _span = tracing::debug_span!("portfolio.update", event = event.kind()).entered();
        let mut out = Vec::new();
        match event {
            Event::Attach { section, attach } => {
                self.scheduler.cancel(
                    |task| matches!(task, Deferred::Settle { section: s, .. } if *s == section),
                );
                self.carousel_mut(section).attach(attach, &mut out);
            }
            Event::Scroll { section, metrics } => {
                self.carousel_mut(section).on_scroll(metrics, &mut out);
            }
            Event::Resize { section, metrics } => {
                self.carousel_mut(section).on_resize(metrics, &mut out);
            }
            Event::Click(click) => self.click(click, &mut out),
            Event::Key(key) => {
                let mode = KeyMode::from_modal_open(self.modal.is_open());
                match self.keys.route(&key, mode) {
                    KeyIntent::Navigate { section, direction } => {
                        self.navigate(section, direction, &mut out);
                    }
                    KeyIntent::DismissModal => {
                        self.close_modal(&mut out);
                    }
                    KeyIntent::Ignore => {}
                }
            }
            Event::PageScroll(sample) => {
                self.spy.observe(sample.scroll_y, sample.sections);
            }
            Event::SystemTheme { dark } => {
                if let Some(theme) = self.theme.system_changed(dark) {
                    out.push(Command::set_theme(theme));
                }
            }
            Event::Observe { element } => self.reveal.observe(element),
            Event::Intersect { element, visible } => {
                if self.reveal.intersect(&element, visible) {
                    out.push(Command::Reveal { element });
                }
            }
        }
        out
    }

    /// Evaluate coalesced per-frame work (scroll-spy).
    pub fn frame(&mut self) -> Vec<Command> {
        self.spy
            .flush()
            .map(|section| Command::SetActiveNav { section })
            .into_iter()
            .collect()
    }

    /// Advance the clock by `dt`, firing due continuations.
    pub fn advance(&mut self, dt: Duration) -> Vec<Command> {
        let until = self.scheduler.now().saturating_add(dt);
        self.run_until(until)
    }

    /// Move the clock to `now`, firing due continuations. Moving backwards
    /// is ignored.
    pub fn set_time(&mut self, now: Duration) -> Vec<Command> {
        if now <= self.scheduler.now() {
            return Vec::new();
        }
        self.run_until(now)
    }

    fn run_until(&mut self, until: Duration) -> Vec<Command> {
        let mut out = Vec::new();
        while let Some(task) = self.scheduler.pop_due(until) {
            self.fire(task, &mut out);
        }
        self.scheduler.finish_at(until);
        out
    }

    fn fire(&mut self, task: Deferred, out: &mut Vec<Command>) {
        let _span = tracing::debug_span!("portfolio.deferred", task = ?task).entered();
        match task {
            Deferred::Settle {
                section,
                generation,
            } => self.carousel_mut(section).settle(generation, out),
            Deferred::FinishLoading(project) => {
                if self.modal.finish_loading(project, out) {
                    self.schedule_focus();
                }
            }
            Deferred::FocusModalClose => {
                if self.modal.is_open() {
                    out.push(Command::Focus {
                        target: FocusTarget::ModalClose,
                    });
                }
            }
            Deferred::OpenLink { link, url } => {
                out.push(Command::OpenUrl { url });
                self.scheduler
                    .schedule(self.config.link_restore_delay(), Deferred::RestoreLink(link));
            }
            Deferred::RestoreLink(link) => self.modal.finish_link(link, out),
        }
    }

    fn click(&mut self, click: Click, out: &mut Vec<Command>) {
        match click {
            Click::Control { section, control } => {
                self.navigate(section, control.direction(), out);
            }
            Click::ProjectCard(project) => {
                if self.modal.open(project, out) {
                    self.schedule_focus();
                }
            }
            Click::ProjectDetails(project) => {
                if self.modal.begin_loading(project, out) {
                    // Supersedes a pending task from an earlier click.
                    self.scheduler
                        .cancel(|task| *task == Deferred::FinishLoading(project));
                    self.scheduler
                        .schedule(self.config.modal_open_delay(), Deferred::FinishLoading(project));
                }
            }
            Click::ModalClose | Click::ModalOverlay => self.close_modal(out),
            Click::ModalLink(link) => {
                if let Some(url) = self.modal.begin_link(link, out) {
                    self.scheduler
                        .schedule(self.config.link_open_delay(), Deferred::OpenLink { link, url });
                }
            }
            Click::ThemeToggle => {
                let theme = self.theme.toggle();
                out.push(Command::set_theme(theme));
            }
        }
    }

    fn navigate(&mut self, section: Section, direction: Direction, out: &mut Vec<Command>) {
        let delay = self.config.settle_delay();
        if let Some(generation) = self.carousel_mut(section).navigate(direction, out) {
            self.scheduler.schedule(
                delay,
                Deferred::Settle {
                    section,
                    generation,
                },
            );
        }
    }

    fn close_modal(&mut self, out: &mut Vec<Command>) {
        if self.modal.close(out) {
            self.scheduler
                .cancel(|task| matches!(task, Deferred::FocusModalClose));
        }
    }

    fn schedule_focus(&mut self) {
        self.scheduler
            .cancel(|task| matches!(task, Deferred::FocusModalClose));
        self.scheduler
            .schedule(self.config.modal_focus_delay(), Deferred::FocusModalClose);
    }
}
