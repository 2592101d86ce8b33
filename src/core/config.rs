//! Handler and logger configuration
//!
//! All configuration types deserialize from JSON so a whole logging setup can
//! live in a config file:
//!
//! ```json
//! {
//!   "application": "svc",
//!   "level": "notice",
//!   "handlers": [
//!     { "handler": "console", "colors": false },
//!     { "handler": "file", "path": "/var/log/svc.log",
//!       "formats": { "timestamp": "YYYY-MM-DD HH:mm:ss" } }
//!   ]
//! }
//! ```

use super::error::{LoggerError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Message and timestamp templates used by a handler
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Formats {
    pub message: String,
    pub timestamp: String,
}

impl Formats {
    pub fn new(message: impl Into<String>, timestamp: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            timestamp: timestamp.into(),
        }
    }

    /// Merge caller overrides over handler defaults, key by key.
    ///
    /// ```
    /// use logful::{FormatOverrides, Formats};
    ///
    /// let defaults = Formats::new("{identity} {message}", "HH:mm:ss.SSS");
    /// let merged = defaults.merged(&FormatOverrides::timestamp("YY-MM-D"));
    /// assert_eq!(merged.message, "{identity} {message}");
    /// assert_eq!(merged.timestamp, "YY-MM-D");
    /// ```
    #[must_use]
    pub fn merged(&self, overrides: &FormatOverrides) -> Self {
        Self {
            message: overrides
                .message
                .clone()
                .unwrap_or_else(|| self.message.clone()),
            timestamp: overrides
                .timestamp
                .clone()
                .unwrap_or_else(|| self.timestamp.clone()),
        }
    }
}

/// Caller-supplied format overrides; unset keys keep the handler default
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormatOverrides {
    pub message: Option<String>,
    pub timestamp: Option<String>,
}

impl FormatOverrides {
    pub fn message(template: impl Into<String>) -> Self {
        Self {
            message: Some(template.into()),
            timestamp: None,
        }
    }

    pub fn timestamp(pattern: impl Into<String>) -> Self {
        Self {
            message: None,
            timestamp: Some(pattern.into()),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.message.is_none() && self.timestamp.is_none()
    }
}

/// How the file handler opens its destination
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SinkOptions {
    /// Append to existing content; when false the file is truncated
    pub append: bool,
    /// Create the file if it does not exist
    pub create: bool,
}

impl Default for SinkOptions {
    fn default() -> Self {
        Self {
            append: true,
            create: true,
        }
    }
}

/// Syslog facilities a handler may log under
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Facility {
    Kern,
    #[default]
    User,
    Mail,
    Daemon,
    Auth,
    Syslog,
    Lpr,
    News,
    Local0,
    Local1,
    Local2,
    Local3,
    Local4,
    Local5,
    Local6,
    Local7,
}

impl Facility {
    pub fn code(&self) -> u8 {
        match self {
            Facility::Kern => 0,
            Facility::User => 1,
            Facility::Mail => 2,
            Facility::Daemon => 3,
            Facility::Auth => 4,
            Facility::Syslog => 5,
            Facility::Lpr => 6,
            Facility::News => 7,
            Facility::Local0 => 16,
            Facility::Local1 => 17,
            Facility::Local2 => 18,
            Facility::Local3 => 19,
            Facility::Local4 => 20,
            Facility::Local5 => 21,
            Facility::Local6 => 22,
            Facility::Local7 => 23,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SyslogOptions {
    /// Local syslog socket; `/dev/log` when unset
    pub socket: Option<PathBuf>,
    pub facility: Facility,
}

/// Construction options handed to every handler.
///
/// Only `formats` and `application` are common to all handlers; the remaining
/// fields are read by the handlers that need them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HandlerOptions {
    pub formats: FormatOverrides,
    pub application: Option<String>,
    /// Destination of the file handler
    pub path: Option<PathBuf>,
    pub sink_options: SinkOptions,
    /// Terminal styling for console handlers; on unless set to false
    pub colors: Option<bool>,
    pub syslog: SyslogOptions,
}

impl HandlerOptions {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_formats(mut self, formats: FormatOverrides) -> Self {
        self.formats = formats;
        self
    }

    #[must_use]
    pub fn with_message_format(mut self, template: impl Into<String>) -> Self {
        self.formats.message = Some(template.into());
        self
    }

    #[must_use]
    pub fn with_timestamp_format(mut self, pattern: impl Into<String>) -> Self {
        self.formats.timestamp = Some(pattern.into());
        self
    }

    #[must_use]
    pub fn with_application(mut self, application: impl Into<String>) -> Self {
        self.application = Some(application.into());
        self
    }

    #[must_use]
    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }

    #[must_use]
    pub fn with_sink_options(mut self, sink_options: SinkOptions) -> Self {
        self.sink_options = sink_options;
        self
    }

    #[must_use]
    pub fn with_colors(mut self, colors: bool) -> Self {
        self.colors = Some(colors);
        self
    }

    #[must_use]
    pub fn with_syslog(mut self, syslog: SyslogOptions) -> Self {
        self.syslog = syslog;
        self
    }
}

/// One handler listed in a [`LogfulConfig`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HandlerConfig {
    /// Built-in handler name
    pub handler: String,
    #[serde(flatten)]
    pub options: HandlerOptions,
}

/// Process-wide logging setup
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogfulConfig {
    pub application: Option<String>,
    pub level: Option<String>,
    pub handlers: Vec<HandlerConfig>,
}

impl LogfulConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            LoggerError::io_operation(
                "reading logger configuration",
                format!("cannot read '{}'", path.display()),
                e,
            )
        })?;
        Self::from_json_str(&content)
    }
}
