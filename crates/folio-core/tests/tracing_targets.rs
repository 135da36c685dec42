#![forbid(unsafe_code)]

//! Structured logging checks.
//!
//! Verify that state changes are logged under the `folio.*` targets with
//! structured fields, nested inside the `portfolio.update` or
//! `portfolio.deferred` span that caused them.
//!
//! Run:
//!   cargo test -p folio-core --test tracing_targets

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use folio_core::{
    Click, Event, Key, Portfolio, ProjectId, Section, SectionAttach, SectionMetrics,
};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry::LookupSpan;

#[derive(Debug, Clone)]
struct CapturedEvent {
    target: String,
    fields: HashMap<String, String>,
    parent_span_name: Option<String>,
}

struct EventCapture {
    events: Arc<Mutex<Vec<CapturedEvent>>>,
}

struct FieldVisitor(Vec<(String, String)>);

impl tracing::field::Visit for FieldVisitor {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        self.0.push((field.name().to_string(), format!("{value:?}")));
    }

    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        self.0.push((field.name().to_string(), value.to_string()));
    }
}

impl<S> tracing_subscriber::Layer<S> for EventCapture
where
    S: tracing::Subscriber + for<'a> LookupSpan<'a>,
{
    fn on_event(&self, event: &tracing::Event<'_>, ctx: tracing_subscriber::layer::Context<'_, S>) {
        let mut visitor = FieldVisitor(Vec::new());
        event.record(&mut visitor);
        let parent_span_name = ctx
            .current_span()
            .id()
            .and_then(|id| ctx.span(id))
            .map(|span_ref| span_ref.name().to_string());
        self.events.lock().unwrap().push(CapturedEvent {
            target: event.metadata().target().to_string(),
            fields: visitor.0.into_iter().collect(),
            parent_span_name,
        });
    }
}

fn with_captured_events<F: FnOnce()>(f: F) -> Vec<CapturedEvent> {
    let events = Arc::new(Mutex::new(Vec::new()));
    let subscriber = tracing_subscriber::registry()
        .with(tracing_subscriber::filter::LevelFilter::TRACE)
        .with(EventCapture {
            events: events.clone(),
        });
    tracing::subscriber::with_default(subscriber, f);
    let captured = events.lock().unwrap().clone();
    captured
}

fn attached_page() -> Portfolio {
    let mut page = Portfolio::default();
    page.update(Event::Attach {
        section: Section::Projects,
        attach: SectionAttach::present(
            SectionMetrics::new(0.0, 900.0, 1620.0).with_slide_width(300.0),
        ),
    });
    page
}

#[test]
fn carousel_moves_log_under_update_span() {
    let mut page = attached_page();
    let events = with_captured_events(|| {
        page.update(Event::Key(Key::ArrowRight));
    });
    let moved = events
        .iter()
        .find(|e| e.target == "folio.carousel" && e.fields.contains_key("generation"))
        .expect("carousel move event");
    assert_eq!(moved.parent_span_name.as_deref(), Some("portfolio.update"));
    assert_eq!(moved.fields.get("section").map(String::as_str), Some("projects"));
    assert!(moved.fields.contains_key("to"));
}

#[test]
fn modal_events_use_modal_target() {
    let mut page = attached_page();
    let events = with_captured_events(|| {
        page.update(Event::Click(Click::ProjectCard(ProjectId::new(99))));
        page.update(Event::Click(Click::ProjectDetails(ProjectId::new(1))));
        page.advance(Duration::from_millis(800));
    });
    let modal: Vec<_> = events.iter().filter(|e| e.target == "folio.modal").collect();
    assert!(
        modal.iter().any(|e| e.fields.get("project").map(String::as_str) == Some("99")),
        "unknown project warning missing: {modal:?}"
    );
    assert!(
        modal
            .iter()
            .any(|e| e.parent_span_name.as_deref() == Some("portfolio.deferred")),
        "deferred open should log inside the deferred span: {modal:?}"
    );
}

#[test]
fn every_library_event_has_structured_fields() {
    let mut page = attached_page();
    let events = with_captured_events(|| {
        page.init(true);
        page.update(Event::Click(Click::ThemeToggle));
        page.update(Event::Key(Key::ArrowRight));
        page.advance(Duration::from_millis(300));
        page.update(Event::Click(Click::ProjectCard(ProjectId::new(2))));
        page.update(Event::Key(Key::Escape));
    });
    assert!(!events.is_empty());
    for event in events.iter().filter(|e| e.target.starts_with("folio.")) {
        assert!(
            event.fields.keys().any(|k| k != "message"),
            "event without structured fields: {event:?}"
        );
    }
}
