//! Core logger types and traits

pub mod config;
pub mod entry;
pub mod error;
pub mod handler;
pub mod logger;
pub mod metrics;
pub mod registry;
pub mod severity;
pub mod template;
pub mod timestamp;

pub use config::{
    Facility, FormatOverrides, Formats, HandlerConfig, HandlerOptions, LogfulConfig, SinkOptions,
    SyslogOptions,
};
pub use entry::{identity_of, Entry, Origin, IDENTITY_SEPARATOR};
pub use error::{LoggerError, Result};
pub use handler::{
    ConstructHandler, EntrySource, FieldValue, Handler, Renderer, SharedHandler, Transform,
};
pub use logger::{
    HandlerErrorCallback, Logful, Logger, DEFAULT_APPLICATION, DEFAULT_THRESHOLD,
};
pub use metrics::LoggerMetrics;
pub use registry::HandlerRegistry;
pub use severity::{Severity, SEVERITIES};
pub use template::{compile, Field};
pub use timestamp::TimestampFormat;
