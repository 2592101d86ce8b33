//! Severity level definitions
//!
//! The table mirrors the syslog severity model: eight fixed levels, ranked
//! from 0 (most severe) to 7 (least severe).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::error::LoggerError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[derive(Default)]
pub enum Severity {
    /// System is unusable
    Emerg = 0,
    /// Action must be taken immediately
    Alert = 1,
    /// Critical conditions
    Crit = 2,
    /// Error conditions
    Error = 3,
    /// Warning conditions
    Warn = 4,
    /// Normal but significant condition
    Notice = 5,
    /// Informational messages
    #[default]
    Info = 6,
    /// Debug-level messages
    Debug = 7,
}

/// Every known severity, ordered by rank
pub const SEVERITIES: [Severity; 8] = [
    Severity::Emerg,
    Severity::Alert,
    Severity::Crit,
    Severity::Error,
    Severity::Warn,
    Severity::Notice,
    Severity::Info,
    Severity::Debug,
];

impl Severity {
    /// Numeric rank; lower is more severe
    #[inline]
    pub const fn rank(&self) -> u8 {
        *self as u8
    }

    pub const fn short_name(&self) -> &'static str {
        match self {
            Severity::Emerg => "emerg",
            Severity::Alert => "alert",
            Severity::Crit => "crit",
            Severity::Error => "error",
            Severity::Warn => "warn",
            Severity::Notice => "notice",
            Severity::Info => "info",
            Severity::Debug => "debug",
        }
    }

    pub const fn long_name(&self) -> &'static str {
        match self {
            Severity::Emerg => "Emergency",
            Severity::Alert => "Alert",
            Severity::Crit => "Critical",
            Severity::Error => "Error",
            Severity::Warn => "Warning",
            Severity::Notice => "Notice",
            Severity::Info => "Info",
            Severity::Debug => "Debug",
        }
    }

    /// Look up a severity by its short name.
    ///
    /// Names are case-sensitive and lowercase; anything else is absent.
    ///
    /// # Examples
    ///
    /// ```
    /// use logful::Severity;
    ///
    /// assert_eq!(Severity::resolve("crit"), Some(Severity::Crit));
    /// assert_eq!(Severity::resolve("CRIT"), None);
    /// ```
    pub fn resolve(name: &str) -> Option<Self> {
        SEVERITIES
            .iter()
            .copied()
            .find(|severity| severity.short_name() == name)
    }

    pub fn is_valid(name: &str) -> bool {
        Self::resolve(name).is_some()
    }

    pub fn from_rank(rank: u8) -> Option<Self> {
        SEVERITIES.get(rank as usize).copied()
    }

    /// Whether an entry of this severity passes the given threshold
    #[inline]
    pub fn passes(&self, threshold: Severity) -> bool {
        self.rank() <= threshold.rank()
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.short_name())
    }
}

impl FromStr for Severity {
    type Err = LoggerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::resolve(s).ok_or_else(|| LoggerError::invalid_severity(s))
    }
}
