//! Console handler implementation
//!
//! Writes rendered entries to stderr (`console`) or stdout (`stdout`), with
//! terminal colours chosen by severity.

use super::{write_line, BoxedWriter};
use crate::core::{
    ConstructHandler, Entry, Field, FieldValue, Formats, Handler, HandlerOptions, Renderer,
    Result, Severity,
};
use colored::Colorize;
use parking_lot::Mutex;
use std::io::{self, Write};

/// Which standard stream a console handler writes to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsoleStream {
    Stderr,
    Stdout,
}

impl ConsoleStream {
    /// Registry name of the handler writing to this stream
    pub fn handler_name(&self) -> &'static str {
        match self {
            ConsoleStream::Stderr => "console",
            ConsoleStream::Stdout => "stdout",
        }
    }

    fn writer(&self) -> BoxedWriter {
        match self {
            ConsoleStream::Stderr => Box::new(io::stderr()),
            ConsoleStream::Stdout => Box::new(io::stdout()),
        }
    }
}

pub struct ConsoleHandler {
    name: &'static str,
    renderer: Renderer,
    dest: Mutex<BoxedWriter>,
}

impl ConsoleHandler {
    /// Message `{identity} {message}`, timestamp `HH:mm:ss.SSS`
    pub fn default_formats() -> Formats {
        Formats::new("{identity} {message}", "HH:mm:ss.SSS")
    }

    /// Handler writing to stderr
    pub fn new(options: HandlerOptions) -> Self {
        Self::with_stream(ConsoleStream::Stderr, options)
    }

    /// Handler writing to stdout
    pub fn stdout(options: HandlerOptions) -> Self {
        Self::with_stream(ConsoleStream::Stdout, options)
    }

    pub fn with_stream(stream: ConsoleStream, options: HandlerOptions) -> Self {
        Self {
            name: stream.handler_name(),
            renderer: Self::build_renderer(&options),
            dest: Mutex::new(stream.writer()),
        }
    }

    /// Handler writing to any destination, mostly useful for tests
    ///
    /// # Example
    ///
    /// ```
    /// use logful::handlers::ConsoleHandler;
    /// use logful::HandlerOptions;
    ///
    /// let handler = ConsoleHandler::with_writer(
    ///     HandlerOptions::new().with_colors(false),
    ///     Vec::new(),
    /// );
    /// ```
    pub fn with_writer<W>(options: HandlerOptions, writer: W) -> Self
    where
        W: Write + Send + 'static,
    {
        Self {
            name: ConsoleStream::Stderr.handler_name(),
            renderer: Self::build_renderer(&options),
            dest: Mutex::new(Box::new(writer)),
        }
    }

    pub fn renderer(&self) -> &Renderer {
        &self.renderer
    }

    fn build_renderer(options: &HandlerOptions) -> Renderer {
        let renderer = Renderer::new(&Self::default_formats(), options);
        if !options.colors.unwrap_or(true) {
            return renderer;
        }

        renderer
            .with_transform(Field::Message, |value, entry, _| {
                style(entry.level, &value.to_text())
            })
            .with_transform(Field::Identity, highlight)
            .with_transform(Field::Application, highlight)
            .with_transform(Field::Module, highlight)
    }
}

/// Apply the terminal style of `severity` to `text`
pub fn style(severity: Severity, text: &str) -> String {
    match severity {
        Severity::Emerg => text.black().bold().underline().on_red().to_string(),
        Severity::Alert => text.red().bold().underline().to_string(),
        Severity::Crit => text.red().underline().to_string(),
        Severity::Error => text.red().to_string(),
        Severity::Warn => text.yellow().to_string(),
        Severity::Notice => text.white().to_string(),
        Severity::Info => text.normal().to_string(),
        Severity::Debug => text.bright_black().to_string(),
    }
}

fn highlight(value: &FieldValue<'_>, _entry: &Entry, _renderer: &Renderer) -> String {
    value.to_text().blue().to_string()
}

impl ConstructHandler for ConsoleHandler {
    fn construct(options: HandlerOptions) -> Result<Self> {
        Ok(Self::new(options))
    }
}

impl Handler for ConsoleHandler {
    fn log(&self, entry: &Entry) -> Result<()> {
        let line = self.renderer.render_line(entry);
        let mut dest = self.dest.lock();
        write_line(self.name, &mut **dest, &line)
    }

    fn flush(&self) -> Result<()> {
        self.dest.lock().flush()?;
        Ok(())
    }

    fn name(&self) -> &str {
        self.name
    }

    fn formats(&self) -> &Formats {
        self.renderer.formats()
    }

    fn application(&self) -> Option<&str> {
        self.renderer.application()
    }
}
