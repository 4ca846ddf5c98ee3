//! Tracing layer that forwards events to the browser console.

use std::fmt::Write;

use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::Layer;
use web_sys::console;

/// A [`tracing_subscriber::Layer`] that prints each event with the matching
/// `console.*` method so browser devtools can filter by level.
pub struct ConsoleLayer;

/// Collects the message and the remaining fields of an event.
struct MessageVisitor {
    message: String,
    fields: String,
}

impl MessageVisitor {
    fn new() -> Self {
        Self {
            message: String::new(),
            fields: String::new(),
        }
    }

    fn push_field(&mut self, name: &str, value: &dyn std::fmt::Display) {
        let _ = write!(self.fields, " {}={}", name, value);
    }
}

impl Visit for MessageVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        if field.name() == "message" {
            self.message = format!("{:?}", value);
        } else {
            let _ = write!(self.fields, " {}={:?}", field.name(), value);
        }
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            self.message = value.to_string();
        } else {
            self.push_field(field.name(), &value);
        }
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        self.push_field(field.name(), &value);
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.push_field(field.name(), &value);
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        self.push_field(field.name(), &value);
    }
}

impl<S> Layer<S> for ConsoleLayer
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let mut visitor = MessageVisitor::new();
        event.record(&mut visitor);

        let meta = event.metadata();
        let line = format!(
            "{} {}: {}{}",
            meta.level(),
            meta.target(),
            visitor.message,
            visitor.fields
        );
        let line = wasm_bindgen::JsValue::from(line);
        match *meta.level() {
            Level::ERROR => console::error_1(&line),
            Level::WARN => console::warn_1(&line),
            Level::INFO => console::info_1(&line),
            _ => console::debug_1(&line),
        }
    }
}

/// Install the console layer as the global subscriber.
pub fn init(max_level: LevelFilter) {
    let subscriber = tracing_subscriber::registry().with(ConsoleLayer.with_filter(max_level));
    if tracing::subscriber::set_global_default(subscriber).is_err() {
        console::warn_1(&"tracing subscriber already installed".into());
    }
}
