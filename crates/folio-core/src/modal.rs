#![forbid(unsafe_code)]

//! Project detail modal.
//!
//! # State machine
//!
//! ```text
//!              card click                 close / overlay / Esc
//!   Closed ───────────────────▶ Open ───────────────────────────▶ Closed
//!     │                          ▲
//!     │ details click            │ loading delay elapsed
//!     ▼                          │
//!   Loading ─────────────────────┘
//! ```
//!
//! While `Loading` the modal is not visible yet; only the details button
//! shows a loading state. Opening locks page scroll, closing unlocks it.
//! The modal never reads or writes carousel state.
//!
//! The demo and code links inside an open modal have their own short
//! loading state: the button spins, the URL opens after a delay, and the
//! button is restored a little later. See [`ProjectModal::begin_link`].

use std::fmt::Write as _;

use serde::{Deserialize, Serialize};

use crate::catalog::{ProjectCatalog, ProjectId, ProjectRecord};
use crate::command::Command;

/// A link button inside the detail view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModalLink {
    /// The live demo link (`.btn-demo`).
    Demo,
    /// The source code link (`.btn-code`).
    Code,
}

impl ModalLink {
    /// Stable lowercase name, matching the host JSON.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Demo => "demo",
            Self::Code => "code",
        }
    }

    /// Parse a host link name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "demo" => Some(Self::Demo),
            "code" => Some(Self::Code),
            _ => None,
        }
    }

    const fn slot(self) -> usize {
        match self {
            Self::Demo => 0,
            Self::Code => 1,
        }
    }
}

/// Lifecycle phase of the modal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ModalPhase {
    #[default]
    Closed,
    /// A details button is showing its loading state.
    Loading { project: ProjectId },
    Open { project: ProjectId },
}

/// Modal controller backed by a [`ProjectCatalog`].
#[derive(Debug, Clone)]
pub struct ProjectModal {
    catalog: ProjectCatalog,
    phase: ModalPhase,
    link_busy: [bool; 2],
}

impl ProjectModal {
    #[must_use]
    pub fn new(catalog: ProjectCatalog) -> Self {
        Self {
            catalog,
            phase: ModalPhase::Closed,
            link_busy: [false; 2],
        }
    }

    #[must_use]
    pub const fn phase(&self) -> ModalPhase {
        self.phase
    }

    #[must_use]
    pub const fn catalog(&self) -> &ProjectCatalog {
        &self.catalog
    }

    /// Whether the modal is visible.
    #[must_use]
    pub const fn is_open(&self) -> bool {
        matches!(self.phase, ModalPhase::Open { .. })
    }

    /// Show `project` immediately. Returns `true` if the modal opened.
    ///
    /// Unknown ids are ignored. Opening over an open modal replaces its
    /// content without touching the scroll lock again.
    pub fn open(&mut self, project: ProjectId, out: &mut Vec<Command>) -> bool {
        let Some(record) = self.catalog.get(project) else {
            tracing::warn!(target: "folio.modal", %project, "unknown project id");
            return false;
        };
        let html = render_project_detail(record);
        let was_open = self.is_open();
        self.phase = ModalPhase::Open { project };
        tracing::debug!(target: "folio.modal", %project, "modal opened");
        out.push(Command::ShowModal { project, html });
        if !was_open {
            out.push(Command::ScrollLock { locked: true });
        }
        true
    }

    /// Start the details button's loading state for `project`.
    ///
    /// Returns `true` when the caller should schedule
    /// [`Self::finish_loading`]. Ignored unless the modal is closed.
    pub fn begin_loading(&mut self, project: ProjectId, out: &mut Vec<Command>) -> bool {
        if self.phase != ModalPhase::Closed {
            tracing::trace!(target: "folio.modal", %project, phase = ?self.phase, "details click ignored");
            return false;
        }
        if !self.catalog.contains(project) {
            tracing::warn!(target: "folio.modal", %project, "unknown project id");
            return false;
        }
        self.phase = ModalPhase::Loading { project };
        out.push(Command::Loading {
            project,
            active: true,
        });
        true
    }

    /// Loading delay for `project` elapsed.
    ///
    /// Clears the button's loading state and opens the modal if nothing
    /// else opened or closed it meanwhile. Returns `true` if it opened.
    pub fn finish_loading(&mut self, project: ProjectId, out: &mut Vec<Command>) -> bool {
        out.push(Command::Loading {
            project,
            active: false,
        });
        if self.phase != (ModalPhase::Loading { project }) {
            return false;
        }
        self.phase = ModalPhase::Closed;
        self.open(project, out)
    }

    /// Start the loading state of `link` in the open modal.
    ///
    /// Returns the URL to open once the link delay elapses. `None` when the
    /// modal is closed, the project has no usable URL for `link`, or the
    /// button is already loading.
    pub fn begin_link(&mut self, link: ModalLink, out: &mut Vec<Command>) -> Option<String> {
        let ModalPhase::Open { project } = self.phase else {
            return None;
        };
        if self.link_busy[link.slot()] {
            tracing::trace!(target: "folio.modal", link = link.as_str(), "link already loading");
            return None;
        }
        let record = self.catalog.get(project)?;
        let url = match link {
            ModalLink::Demo => record.demo_url.as_deref(),
            ModalLink::Code => record.code_url.as_deref(),
        };
        let url = url.map(str::trim).filter(|u| !u.is_empty() && *u != "#")?;
        self.link_busy[link.slot()] = true;
        tracing::debug!(target: "folio.modal", %project, link = link.as_str(), "link loading");
        out.push(Command::LinkLoading { link, active: true });
        Some(url.to_owned())
    }

    /// Whether `link` is showing its loading state.
    #[must_use]
    pub const fn is_link_loading(&self, link: ModalLink) -> bool {
        self.link_busy[link.slot()]
    }

    /// Restore `link` after its URL was opened.
    pub fn finish_link(&mut self, link: ModalLink, out: &mut Vec<Command>) {
        if std::mem::take(&mut self.link_busy[link.slot()]) {
            out.push(Command::LinkLoading {
                link,
                active: false,
            });
        }
    }

    /// Hide the modal. No-op unless it is open.
    pub fn close(&mut self, out: &mut Vec<Command>) -> bool {
        let ModalPhase::Open { project } = self.phase else {
            return false;
        };
        self.phase = ModalPhase::Closed;
        tracing::debug!(target: "folio.modal", %project, "modal closed");
        out.push(Command::HideModal);
        out.push(Command::ScrollLock { locked: false });
        true
    }
}

/// Render the modal body for `record` as an HTML fragment.
///
/// Every text value is escaped. Link buttons appear only for the URLs the
/// record has.
#[must_use]
pub fn render_project_detail(record: &ProjectRecord) -> String {
    let title = escape_html(&record.title);
    let mut html = String::with_capacity(512);
    html.push_str("<div class=\"row\">");
    let _ = write!(
        html,
        "<div class=\"col-lg-6\"><img src=\"{}\" alt=\"{title}\" class=\"modal-project-image\"></div>",
        escape_html(&record.image),
    );
    html.push_str("<div class=\"col-lg-6\">");
    let _ = write!(html, "<h2 class=\"modal-project-title\">{title}</h2>");
    let _ = write!(
        html,
        "<p class=\"modal-project-description\">{}</p>",
        escape_html(&record.description)
    );
    html.push_str("<div class=\"modal-project-tech\">");
    for tech in &record.tech_stack {
        let _ = write!(html, "<span class=\"modal-tech-tag\">{}</span>", escape_html(tech));
    }
    html.push_str("</div><div class=\"modal-project-links\">");
    if let Some(url) = &record.demo_url {
        push_link(&mut html, url, "btn-demo", "View live demo", "eye", "Live Demo");
    }
    if let Some(url) = &record.code_url {
        push_link(&mut html, url, "btn-code", "View source code", "github", "View Code");
    }
    html.push_str("</div></div></div>");
    html
}

fn push_link(html: &mut String, url: &str, class: &str, aria: &str, icon: &str, text: &str) {
    let _ = write!(
        html,
        "<a href=\"{}\" target=\"_blank\" rel=\"noopener noreferrer\" class=\"{class}\" \
         aria-label=\"{aria}\"><i data-lucide=\"{icon}\"></i>{text}</a>",
        escape_html(url)
    );
}

fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}
