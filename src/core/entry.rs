//! Log entry structure

use super::severity::Severity;
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

/// Separator placed between the application and module names in an identity
pub const IDENTITY_SEPARATOR: char = '\\';

/// Information about the source of an entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Origin {
    pub identity: String,
    pub application: String,
    pub module: Option<String>,
    pub pid: u32,
}

impl Origin {
    pub fn new(application: impl Into<String>, module: Option<&str>) -> Self {
        let application = application.into();
        let module = module.filter(|m| !m.is_empty()).map(str::to_string);

        Self {
            identity: identity_of(&application, module.as_deref()),
            application,
            module,
            pid: std::process::id(),
        }
    }
}

/// Combine an application name and an optional module name.
///
/// ```
/// use logful::core::entry::identity_of;
///
/// assert_eq!(identity_of("billing", Some("queue")), "billing\\queue");
/// assert_eq!(identity_of("billing", None), "billing");
/// ```
pub fn identity_of(application: &str, module: Option<&str>) -> String {
    match module {
        Some(module) if !module.is_empty() => {
            format!("{}{}{}", application, IDENTITY_SEPARATOR, module)
        }
        _ => application.to_string(),
    }
}

/// One logged event. Built once by the logger and shared read-only with
/// every handler during a single notification pass.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Entry {
    pub level: Severity,
    pub message: String,
    pub timestamp: DateTime<Local>,
    pub origin: Origin,
}

impl Entry {
    pub fn new(level: Severity, message: impl Into<String>, origin: Origin) -> Self {
        Self {
            level,
            message: message.into(),
            timestamp: Local::now(),
            origin,
        }
    }

    /// Replace the capture time, used when replaying or testing entries
    #[must_use]
    pub fn with_timestamp(mut self, timestamp: DateTime<Local>) -> Self {
        self.timestamp = timestamp;
        self
    }
}
