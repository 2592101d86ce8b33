//! File handler implementation

use super::{write_line, BoxedWriter};
use crate::core::{
    ConstructHandler, Entry, Formats, Handler, HandlerOptions, LoggerError, Renderer, Result,
    SinkOptions,
};
use parking_lot::Mutex;
use std::fs::OpenOptions;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

pub struct FileHandler {
    path: Option<PathBuf>,
    renderer: Renderer,
    dest: Mutex<BoxedWriter>,
}

impl FileHandler {
    /// Message `{timestamp}\t{levelName}\t{identity}:\t{message}`,
    /// timestamp `YYYY-MM-DD HH:mm:ss.SSS`
    pub fn default_formats() -> Formats {
        Formats::new(
            "{timestamp}\t{levelName}\t{identity}:\t{message}",
            "YYYY-MM-DD HH:mm:ss.SSS",
        )
    }

    /// Open `path` for writing and build a handler around it
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use logful::handlers::FileHandler;
    /// use logful::HandlerOptions;
    ///
    /// let handler = FileHandler::open("/var/log/app.log", HandlerOptions::default())
    ///     .expect("log file opened");
    /// ```
    pub fn open(path: impl Into<PathBuf>, options: HandlerOptions) -> Result<Self> {
        let path = path.into();
        let file = open_file(&path, options.sink_options)?;

        Ok(Self {
            renderer: Renderer::new(&Self::default_formats(), &options),
            dest: Mutex::new(Box::new(BufWriter::new(file))),
            path: Some(path),
        })
    }

    /// Handler writing to any destination instead of a file
    pub fn with_writer<W>(options: HandlerOptions, writer: W) -> Self
    where
        W: Write + Send + 'static,
    {
        Self {
            path: None,
            renderer: Renderer::new(&Self::default_formats(), &options),
            dest: Mutex::new(Box::new(writer)),
        }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn renderer(&self) -> &Renderer {
        &self.renderer
    }
}

fn open_file(path: &Path, sink: SinkOptions) -> Result<std::fs::File> {
    OpenOptions::new()
        .write(true)
        .create(sink.create)
        .append(sink.append)
        .truncate(!sink.append)
        .open(path)
        .map_err(|e| {
            LoggerError::io_operation(
                "opening log file",
                format!("cannot open '{}'", path.display()),
                e,
            )
        })
}

impl ConstructHandler for FileHandler {
    fn construct(options: HandlerOptions) -> Result<Self> {
        let path = options
            .path
            .clone()
            .ok_or_else(|| LoggerError::config("FileHandler", "a 'path' option is required"))?;
        Self::open(path, options)
    }
}

impl Handler for FileHandler {
    fn log(&self, entry: &Entry) -> Result<()> {
        let line = self.renderer.render_line(entry);
        let mut dest = self.dest.lock();
        write_line(self.name(), &mut **dest, &line)
    }

    fn flush(&self) -> Result<()> {
        self.dest.lock().flush()?;
        Ok(())
    }

    fn name(&self) -> &str {
        "file"
    }

    fn formats(&self) -> &Formats {
        self.renderer.formats()
    }

    fn application(&self) -> Option<&str> {
        self.renderer.application()
    }
}

impl Drop for FileHandler {
    fn drop(&mut self) {
        // Ensure all buffered data is flushed to disk
        let _ = self.dest.get_mut().flush();
    }
}
