use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use divwin_core::{MemoryStore, MemorySurface, Position, Size};
use divwin_window::{CaptionTarget, WindowHost};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry::LookupSpan;

#[derive(Debug, Clone)]
struct CapturedEvent {
    level: tracing::Level,
    target: String,
    fields: HashMap<String, String>,
}

impl CapturedEvent {
    fn message(&self) -> &str {
        self.fields.get("message").map_or("", String::as_str)
    }
}

struct EventCapture {
    events: Arc<Mutex<Vec<CapturedEvent>>>,
}

struct FieldVisitor(Vec<(String, String)>);

impl tracing::field::Visit for FieldVisitor {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        self.0.push((field.name().to_string(), format!("{value:?}")));
    }
    fn record_u64(&mut self, field: &tracing::field::Field, value: u64) {
        self.0.push((field.name().to_string(), value.to_string()));
    }
    fn record_i64(&mut self, field: &tracing::field::Field, value: i64) {
        self.0.push((field.name().to_string(), value.to_string()));
    }
    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        self.0.push((field.name().to_string(), value.to_string()));
    }
    fn record_bool(&mut self, field: &tracing::field::Field, value: bool) {
        self.0.push((field.name().to_string(), value.to_string()));
    }
}

impl<S> tracing_subscriber::Layer<S> for EventCapture
where
    S: tracing::Subscriber + for<'a> LookupSpan<'a>,
{
    fn on_event(&self, event: &tracing::Event<'_>, _ctx: tracing_subscriber::layer::Context<'_, S>) {
        let mut visitor = FieldVisitor(Vec::new());
        event.record(&mut visitor);
        self.events.lock().unwrap().push(CapturedEvent {
            level: *event.metadata().level(),
            target: event.metadata().target().to_string(),
            fields: visitor.0.into_iter().collect(),
        });
    }
}

fn with_captured_events<F: FnOnce()>(f: F) -> Vec<CapturedEvent> {
    let events = Arc::new(Mutex::new(Vec::new()));
    let layer = EventCapture {
        events: events.clone(),
    };
    let subscriber = tracing_subscriber::registry().with(layer);
    tracing::subscriber::with_default(subscriber, f);
    let captured = events.lock().unwrap().clone();
    captured
}

fn host() -> WindowHost<MemorySurface, MemoryStore> {
    let mut surface = MemorySurface::new(Size::new(800, 600));
    surface.insert_element(None, "w").unwrap();
    WindowHost::new(surface, MemoryStore::new())
}

#[test]
fn construction_logs_an_info_event() {
    let events = with_captured_events(|| {
        host().open("w", None).unwrap();
    });
    let constructed = events
        .iter()
        .find(|e| e.target == "divwin.window" && e.message() == "window constructed")
        .expect("construction event");
    assert_eq!(constructed.level, tracing::Level::INFO);
    assert_eq!(constructed.fields.get("window").map(String::as_str), Some("w"));
    assert_eq!(constructed.fields.get("nested").map(String::as_str), Some("false"));
}

#[test]
fn malformed_declared_options_log_a_warning() {
    let events = with_captured_events(|| {
        let mut host = host();
        host.surface_mut()
            .set_attribute("w", "divWindowOptions", "{oops")
            .unwrap();
        host.open("w", None).unwrap();
    });
    assert!(events.iter().any(|e| e.target == "divwin.options"
        && e.level == tracing::Level::WARN
        && e.fields.get("window").map(String::as_str) == Some("w")));
}

#[test]
fn layout_save_reports_counts() {
    let events = with_captured_events(|| {
        let mut host = host();
        host.open("w", None).unwrap();
        host.save_layout(None).unwrap();
    });
    let saved = events
        .iter()
        .find(|e| e.target == "divwin.layout" && e.message() == "layout saved")
        .expect("layout saved event");
    assert_eq!(saved.fields.get("saved").map(String::as_str), Some("1"));
    assert_eq!(saved.fields.get("skipped").map(String::as_str), Some("0"));
}

#[test]
fn drag_lifecycle_is_logged_under_the_drag_target() {
    let events = with_captured_events(|| {
        let mut host = host();
        host.open("w", None).unwrap();
        host.caption_pointer_down("w", CaptionTarget::DragStrip, 3, Position::new(1, 1))
            .unwrap();
        host.pointer_up(3, Position::new(1, 1));
    });
    let drag: Vec<&str> = events
        .iter()
        .filter(|e| e.target == "divwin.drag" && e.level == tracing::Level::DEBUG)
        .map(CapturedEvent::message)
        .collect();
    assert_eq!(drag, vec!["drag started", "drag ended"]);
    assert!(events.iter().any(|e| e.target == "divwin.zorder"));
}

#[test]
fn drag_end_reports_pointer_travel() {
    let events = with_captured_events(|| {
        let mut host = host();
        host.open("w", None).unwrap();
        host.caption_pointer_down("w", CaptionTarget::DragStrip, 1, Position::new(100, 100))
            .unwrap();
        host.pointer_move(1, Position::new(103, 104)).unwrap();
        host.pointer_move(1, Position::new(105, 107)).unwrap();
        host.pointer_up(1, Position::new(105, 107));
    });
    let ended = events
        .iter()
        .find(|e| e.target == "divwin.drag" && e.message() == "drag ended")
        .expect("drag ended event");
    assert_eq!(ended.fields.get("travel_x").map(String::as_str), Some("5"));
    assert_eq!(ended.fields.get("travel_y").map(String::as_str), Some("7"));
}
