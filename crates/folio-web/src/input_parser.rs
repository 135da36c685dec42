#![forbid(unsafe_code)]

//! JSON input parser for converting host-encoded DOM inputs to
//! [`folio_core::Event`] values.
//!
//! The JavaScript side measures the DOM and posts one JSON object per input,
//! discriminated by `kind`:
//!
//! ```json
//! {"kind":"attach","section":"projects","container":true,"prev":true,"next":true,
//!  "metrics":{"scroll_left":0,"client_width":900,"scroll_width":1620,"slide_width":300}}
//! {"kind":"click","target":"next","section":"projects"}
//! {"kind":"click","target":"project_details","project":3}
//! {"kind":"click","target":"modal_link","link":"demo"}
//! {"kind":"key","key":"ArrowRight"}
//! ```
//!
//! Parsing is strict about required fields and lenient about extra ones, so
//! the host can attach debugging data without breaking the runner.

use folio_core::{
    Click, Control, Event, Key, ModalLink, PageScroll, ProjectId, Section, SectionAttach,
    SectionBounds, SectionMetrics,
};
use serde::Deserialize;

/// Errors from parsing encoded input JSON.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputParseError {
    /// Malformed JSON.
    Json(String),
    /// Missing required field.
    MissingField(&'static str),
    /// Unknown `kind` value.
    UnknownKind(String),
    /// Unknown carousel section name.
    UnknownSection(String),
    /// Unknown click target.
    UnknownTarget(String),
    /// Unknown modal link name.
    UnknownLink(String),
}

impl core::fmt::Display for InputParseError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Json(msg) => write!(f, "JSON parse error: {msg}"),
            Self::MissingField(field) => write!(f, "missing required field: {field}"),
            Self::UnknownKind(kind) => write!(f, "unknown input kind: {kind}"),
            Self::UnknownSection(section) => write!(f, "unknown section: {section}"),
            Self::UnknownTarget(target) => write!(f, "unknown click target: {target}"),
            Self::UnknownLink(link) => write!(f, "unknown modal link: {link}"),
        }
    }
}

impl std::error::Error for InputParseError {}

/// Internal deserialization target matching the host's JSON schema.
#[derive(Debug, Deserialize)]
struct RawInput {
    kind: String,
    #[serde(default)]
    section: Option<String>,
    #[serde(default)]
    container: Option<bool>,
    #[serde(default)]
    prev: Option<bool>,
    #[serde(default)]
    next: Option<bool>,
    #[serde(default)]
    metrics: Option<SectionMetrics>,
    #[serde(default)]
    target: Option<String>,
    #[serde(default)]
    project: Option<ProjectId>,
    #[serde(default)]
    link: Option<String>,
    #[serde(default)]
    key: Option<String>,
    #[serde(default)]
    scroll_y: Option<f64>,
    #[serde(default)]
    sections: Option<Vec<SectionBounds>>,
    #[serde(default)]
    dark: Option<bool>,
    #[serde(default)]
    element: Option<String>,
    #[serde(default)]
    visible: Option<bool>,
}

/// Parse one JSON-encoded host input into an [`Event`].
///
/// Returns `Err` for malformed JSON, unknown kinds or targets, and missing
/// required fields.
pub fn parse_encoded_input(json: &str) -> Result<Event, InputParseError> {
    let raw: RawInput =
        serde_json::from_str(json).map_err(|e| InputParseError::Json(e.to_string()))?;

    match raw.kind.as_str() {
        "attach" => parse_attach(raw),
        "scroll" => {
            let (section, metrics) = parse_measurement(raw)?;
            Ok(Event::Scroll { section, metrics })
        }
        "resize" => {
            let (section, metrics) = parse_measurement(raw)?;
            Ok(Event::Resize { section, metrics })
        }
        "click" => parse_click(&raw).map(Event::Click),
        "key" => {
            let key = raw.key.ok_or(InputParseError::MissingField("key"))?;
            Ok(Event::Key(Key::from_dom(&key)))
        }
        "page_scroll" => Ok(Event::PageScroll(PageScroll {
            scroll_y: raw.scroll_y.ok_or(InputParseError::MissingField("scroll_y"))?,
            sections: raw.sections.unwrap_or_default(),
        })),
        "system_theme" => Ok(Event::SystemTheme {
            dark: raw.dark.ok_or(InputParseError::MissingField("dark"))?,
        }),
        "observe" => Ok(Event::Observe {
            element: raw.element.ok_or(InputParseError::MissingField("element"))?,
        }),
        "intersect" => Ok(Event::Intersect {
            element: raw.element.ok_or(InputParseError::MissingField("element"))?,
            visible: raw.visible.ok_or(InputParseError::MissingField("visible"))?,
        }),
        other => Err(InputParseError::UnknownKind(other.to_owned())),
    }
}

fn parse_section(section: Option<&str>) -> Result<Section, InputParseError> {
    let name = section.ok_or(InputParseError::MissingField("section"))?;
    Section::from_name(name).ok_or_else(|| InputParseError::UnknownSection(name.to_owned()))
}

fn parse_attach(raw: RawInput) -> Result<Event, InputParseError> {
    let section = parse_section(raw.section.as_deref())?;
    let attach = SectionAttach {
        container: raw
            .container
            .ok_or(InputParseError::MissingField("container"))?,
        prev: raw.prev.unwrap_or(false),
        next: raw.next.unwrap_or(false),
        metrics: raw.metrics,
    };
    Ok(Event::Attach { section, attach })
}

fn parse_measurement(raw: RawInput) -> Result<(Section, SectionMetrics), InputParseError> {
    let section = parse_section(raw.section.as_deref())?;
    let metrics = raw.metrics.ok_or(InputParseError::MissingField("metrics"))?;
    Ok((section, metrics))
}

fn parse_click(raw: &RawInput) -> Result<Click, InputParseError> {
    let target = raw
        .target
        .as_deref()
        .ok_or(InputParseError::MissingField("target"))?;
    let project = || raw.project.ok_or(InputParseError::MissingField("project"));
    match target {
        "prev" | "next" => Ok(Click::Control {
            section: parse_section(raw.section.as_deref())?,
            control: if target == "prev" {
                Control::Prev
            } else {
                Control::Next
            },
        }),
        "project_card" => Ok(Click::ProjectCard(project()?)),
        "project_details" => Ok(Click::ProjectDetails(project()?)),
        "modal_close" => Ok(Click::ModalClose),
        "modal_overlay" => Ok(Click::ModalOverlay),
        "modal_link" => {
            let name = raw
                .link
                .as_deref()
                .ok_or(InputParseError::MissingField("link"))?;
            ModalLink::from_name(name)
                .map(Click::ModalLink)
                .ok_or_else(|| InputParseError::UnknownLink(name.to_owned()))
        }
        "theme_toggle" => Ok(Click::ThemeToggle),
        other => Err(InputParseError::UnknownTarget(other.to_owned())),
    }
}
