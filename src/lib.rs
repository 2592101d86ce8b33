//! # logful
//!
//! A severity-leveled event logger. Per-module [`Logger`]s emit entries on
//! the eight syslog severities; a shared [`Logful`] context filters them by a
//! minimum severity and fans them out to the handlers it has loaded.
//!
//! ## Features
//!
//! - **Syslog severities**: `emerg` through `debug`, with a single threshold
//! - **Pluggable handlers**: console, stdout, file and syslog built in; any
//!   type implementing [`Handler`] can be loaded
//! - **Templates**: message lines and timestamps are rendered from
//!   per-handler format strings such as `{timestamp}\t{levelName}\t{message}`
//! - **Isolation**: a failing or panicking handler never stops the others
//!
//! ## Example
//!
//! ```
//! use logful::prelude::*;
//!
//! let logful = Logful::new();
//! logful.set_application_name("svc");
//! logful.use_handler("stdout", HandlerOptions::new().with_colors(false))?;
//!
//! let logger = logful.logger("http");
//! logger.info("listening").warn("slow response");
//! # Ok::<(), LoggerError>(())
//! ```

pub mod core;
pub mod handlers;
pub mod macros;

pub mod prelude {
    #[cfg(feature = "console")]
    pub use crate::handlers::ConsoleHandler;
    #[cfg(feature = "file")]
    pub use crate::handlers::FileHandler;
    #[cfg(feature = "syslog")]
    pub use crate::handlers::SyslogHandler;
    pub use crate::core::{
        ConstructHandler, Entry, EntrySource, Field, FieldValue, FormatOverrides, Formats,
        Handler, HandlerOptions, LogfulConfig, Logful, Logger, LoggerError, LoggerMetrics,
        Renderer, Result, Severity, SharedHandler, TimestampFormat,
    };
}

#[cfg(feature = "console")]
pub use handlers::ConsoleHandler;
#[cfg(feature = "file")]
pub use handlers::FileHandler;
#[cfg(feature = "syslog")]
pub use handlers::SyslogHandler;
pub use core::{
    ConstructHandler, Entry, EntrySource, Facility, Field, FieldValue, FormatOverrides, Formats,
    Handler, HandlerConfig, HandlerErrorCallback, HandlerOptions, LogfulConfig, Logful, Logger,
    LoggerError, LoggerMetrics, Origin, Renderer, Result, Severity, SharedHandler, SinkOptions,
    SyslogOptions, TimestampFormat, DEFAULT_APPLICATION, DEFAULT_THRESHOLD, SEVERITIES,
};
