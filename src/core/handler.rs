//! Handler contract and the shared entry renderer

use super::{
    config::{Formats, HandlerOptions},
    entry::Entry,
    error::Result,
    template::{self, Field},
    timestamp::TimestampFormat,
};
use chrono::{DateTime, Local};
use std::borrow::Cow;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// A destination for log entries: console, file, syslog or anything custom.
///
/// Handlers are shared between every logger they are subscribed to, possibly
/// across threads, so `log` takes `&self` and each handler guards its own sink.
pub trait Handler: Send + Sync {
    /// Render the entry and write it to the sink.
    ///
    /// Sink failures are returned, never swallowed; the logger reports them
    /// and keeps notifying the remaining handlers.
    fn log(&self, entry: &Entry) -> Result<()>;

    fn flush(&self) -> Result<()> {
        Ok(())
    }

    fn name(&self) -> &str;

    fn formats(&self) -> &Formats;

    /// Application name recorded when the handler was constructed
    fn application(&self) -> Option<&str>;
}

pub type SharedHandler = Arc<dyn Handler>;

/// A handler type that can be registered by constructor reference
/// (see [`Logful::use_custom`](crate::Logful::use_custom)).
pub trait ConstructHandler: Handler + Sized + 'static {
    fn construct(options: HandlerOptions) -> Result<Self>;
}

/// Something handlers can subscribe to
pub trait EntrySource {
    fn subscribe(&self, handler: SharedHandler);
}

/// Raw value of a single template field, before any transform runs
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldValue<'a> {
    Text(&'a str),
    Rank(u8),
    Pid(u32),
    Timestamp(&'a DateTime<Local>),
    Absent,
}

impl<'a> FieldValue<'a> {
    pub fn of(field: Field, entry: &'a Entry) -> Self {
        match field {
            Field::LevelCode => FieldValue::Rank(entry.level.rank()),
            Field::LevelName => FieldValue::Text(entry.level.short_name()),
            Field::LevelLongName => FieldValue::Text(entry.level.long_name()),
            Field::Message => FieldValue::Text(&entry.message),
            Field::Timestamp => FieldValue::Timestamp(&entry.timestamp),
            Field::Identity => FieldValue::Text(&entry.origin.identity),
            Field::Application => FieldValue::Text(&entry.origin.application),
            Field::Module => entry
                .origin
                .module
                .as_deref()
                .map_or(FieldValue::Absent, FieldValue::Text),
            Field::Pid => FieldValue::Pid(entry.origin.pid),
        }
    }

    /// Verbatim text of the value; absent values render empty
    pub fn to_text(&self) -> Cow<'a, str> {
        match *self {
            FieldValue::Text(text) => Cow::Borrowed(text),
            FieldValue::Rank(rank) => Cow::Owned(rank.to_string()),
            FieldValue::Pid(pid) => Cow::Owned(pid.to_string()),
            FieldValue::Timestamp(timestamp) => Cow::Owned(timestamp.to_rfc3339()),
            FieldValue::Absent => Cow::Borrowed(""),
        }
    }
}

/// Per-field hook: receives the raw value, the entry being rendered and the
/// renderer itself so it can read the handler's formats.
pub type Transform = Arc<dyn Fn(&FieldValue<'_>, &Entry, &Renderer) -> String + Send + Sync>;

/// Turns entries into lines for one handler.
///
/// Holds the handler's merged formats and its table of field transforms. A
/// timestamp transform formatting with `formats.timestamp` is always
/// registered unless explicitly replaced or cleared.
#[derive(Clone)]
pub struct Renderer {
    formats: Formats,
    application: Option<String>,
    timestamp_format: TimestampFormat,
    transforms: HashMap<Field, Transform>,
}

impl Renderer {
    pub fn new(defaults: &Formats, options: &HandlerOptions) -> Self {
        let formats = defaults.merged(&options.formats);
        let timestamp_format = TimestampFormat::new(formats.timestamp.clone());

        let mut renderer = Self {
            formats,
            application: options.application.clone(),
            timestamp_format,
            transforms: HashMap::new(),
        };
        renderer.set_transform(Field::Timestamp, Arc::new(format_timestamp));
        renderer
    }

    #[must_use]
    pub fn with_transform<F>(mut self, field: Field, transform: F) -> Self
    where
        F: Fn(&FieldValue<'_>, &Entry, &Renderer) -> String + Send + Sync + 'static,
    {
        self.set_transform(field, Arc::new(transform));
        self
    }

    pub fn set_transform(&mut self, field: Field, transform: Transform) {
        self.transforms.insert(field, transform);
    }

    pub fn clear_transform(&mut self, field: Field) -> Option<Transform> {
        self.transforms.remove(&field)
    }

    pub fn has_transform(&self, field: Field) -> bool {
        self.transforms.contains_key(&field)
    }

    pub fn formats(&self) -> &Formats {
        &self.formats
    }

    pub fn application(&self) -> Option<&str> {
        self.application.as_deref()
    }

    pub fn timestamp_format(&self) -> &TimestampFormat {
        &self.timestamp_format
    }

    /// Value of one field for this entry, after its transform if any
    pub fn process_field(&self, field: Field, entry: &Entry) -> String {
        let value = FieldValue::of(field, entry);
        match self.transforms.get(&field) {
            Some(transform) => transform(&value, entry, self),
            None => value.to_text().into_owned(),
        }
    }

    /// Render an entry through an arbitrary template
    pub fn compile_entry(&self, entry: &Entry, template: &str) -> String {
        template::compile(template, |name| {
            Field::from_name(name).map(|field| Cow::Owned(self.process_field(field, entry)))
        })
    }

    /// Render an entry through the handler's message format
    pub fn render(&self, entry: &Entry) -> String {
        self.compile_entry(entry, &self.formats.message)
    }

    /// The rendered message plus a trailing line terminator
    pub fn render_line(&self, entry: &Entry) -> String {
        let mut line = self.render(entry);
        line.push('\n');
        line
    }
}

impl fmt::Debug for Renderer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut fields: Vec<&str> = self.transforms.keys().map(Field::name).collect();
        fields.sort_unstable();

        f.debug_struct("Renderer")
            .field("formats", &self.formats)
            .field("application", &self.application)
            .field("transforms", &fields)
            .finish()
    }
}

fn format_timestamp(value: &FieldValue<'_>, _entry: &Entry, renderer: &Renderer) -> String {
    match value {
        FieldValue::Timestamp(timestamp) => renderer.timestamp_format().format(*timestamp),
        other => other.to_text().into_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::FormatOverrides;
    use crate::core::entry::Origin;
    use crate::core::severity::Severity;
    use chrono::TimeZone;

    fn entry(module: Option<&str>) -> Entry {
        let timestamp = Local
            .with_ymd_and_hms(2025, 1, 8, 10, 30, 45)
            .single()
            .expect("valid datetime");
        Entry::new(Severity::Warn, "timeout", Origin::new("svc", module)).with_timestamp(timestamp)
    }

    fn defaults() -> Formats {
        Formats::new("{identity} {message}", "HH:mm:ss.SSS")
    }

    #[test]
    fn test_render_default_template() {
        let renderer = Renderer::new(&defaults(), &HandlerOptions::default());
        assert_eq!(renderer.render(&entry(Some("http"))), "svc\\http timeout");
        assert_eq!(renderer.render_line(&entry(None)), "svc timeout\n");
    }

    #[test]
    fn test_every_field() {
        let renderer = Renderer::new(&defaults(), &HandlerOptions::default());
        let line = renderer.compile_entry(
            &entry(Some("http")),
            "{levelCode}|{levelName}|{levelLongName}|{message}|{timestamp}|{identity}|{application}|{module}|{pid}",
        );

        assert_eq!(
            line,
            format!(
                "4|warn|Warning|timeout|10:30:45.000|svc\\http|svc|http|{}",
                std::process::id()
            )
        );
    }

    #[test]
    fn test_absent_module_renders_empty() {
        let renderer = Renderer::new(&defaults(), &HandlerOptions::default());
        assert_eq!(renderer.compile_entry(&entry(None), "{module}: {message}"), ": timeout");
    }

    #[test]
    fn test_unknown_placeholder_left_literal() {
        let renderer = Renderer::new(&defaults(), &HandlerOptions::default());
        assert_eq!(renderer.compile_entry(&entry(None), "{bogus} {message}"), "{bogus} timeout");
    }

    #[test]
    fn test_without_transform_value_is_verbatim() {
        let renderer = Renderer::new(&defaults(), &HandlerOptions::default());
        assert!(!renderer.has_transform(Field::Message));
        assert_eq!(renderer.process_field(Field::Message, &entry(None)), "timeout");
    }

    #[test]
    fn test_transform_is_invoked() {
        let renderer = Renderer::new(&defaults(), &HandlerOptions::default())
            .with_transform(Field::Message, |value, _, _| format!("processed {}", value.to_text()));

        assert_eq!(renderer.render(&entry(None)), "svc processed timeout");
    }

    #[test]
    fn test_transform_sees_entry_and_renderer() {
        let options = HandlerOptions::default().with_application("billing");
        let renderer = Renderer::new(&defaults(), &options).with_transform(
            Field::Identity,
            |value, entry, renderer| {
                format!(
                    "{}@{}[{}]",
                    value.to_text(),
                    renderer.application().unwrap_or("-"),
                    entry.level
                )
            },
        );

        assert_eq!(renderer.render(&entry(None)), "svc@billing[warn] timeout");
    }

    #[test]
    fn test_timestamp_uses_merged_format() {
        let options = HandlerOptions::default().with_formats(FormatOverrides::timestamp("YYYY-MM-DD"));
        let renderer = Renderer::new(&defaults(), &options);

        assert_eq!(renderer.formats().message, "{identity} {message}");
        assert_eq!(renderer.process_field(Field::Timestamp, &entry(None)), "2025-01-08");
    }

    #[test]
    fn test_cleared_timestamp_transform_falls_back_to_rfc3339() {
        let mut renderer = Renderer::new(&defaults(), &HandlerOptions::default());
        assert!(renderer.clear_transform(Field::Timestamp).is_some());

        let rendered = renderer.process_field(Field::Timestamp, &entry(None));
        assert!(rendered.starts_with("2025-01-08T10:30:45"));
    }
}
