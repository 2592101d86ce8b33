//! Error types for the logger system

pub type Result<T> = std::result::Result<T, LoggerError>;

#[derive(Debug, thiserror::Error)]
pub enum LoggerError {
    /// Severity name not present in the severity table
    #[error("\"{name}\" is not a supported severity level")]
    InvalidSeverity { name: String },

    /// Handler name with no built-in resolution
    #[error("Unknown handler '{name}': expected one of console, stdout, file, syslog")]
    UnknownHandler { name: String },

    /// Invalid configuration with details
    #[error("Invalid configuration for {component}: {message}")]
    InvalidConfiguration { component: String, message: String },

    /// IO error with context
    #[error("IO error while {operation}: {message}")]
    IoOperation {
        operation: String,
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Generic IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON (de)serialization error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// A handler failed to write to its sink
    #[error("Handler '{handler}' failed to write: {message}")]
    SinkWrite { handler: String, message: String },

    /// A handler panicked while processing an entry
    #[error("Handler '{handler}' panicked: {message}")]
    HandlerPanicked { handler: String, message: String },

    /// One or more handlers failed during a single notification pass
    #[error("{} handler(s) failed: {}", failures.len(), describe_failures(failures))]
    Dispatch { failures: Vec<(String, String)> },

    /// Generic error
    #[error("{0}")]
    Other(String),
}

fn describe_failures(failures: &[(String, String)]) -> String {
    failures
        .iter()
        .map(|(handler, message)| format!("{}: {}", handler, message))
        .collect::<Vec<_>>()
        .join("; ")
}

impl LoggerError {
    /// Create an invalid severity error
    pub fn invalid_severity(name: impl Into<String>) -> Self {
        LoggerError::InvalidSeverity { name: name.into() }
    }

    /// Create an unknown handler error
    pub fn unknown_handler(name: impl Into<String>) -> Self {
        LoggerError::UnknownHandler { name: name.into() }
    }

    /// Create an invalid configuration error
    pub fn config(component: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::InvalidConfiguration {
            component: component.into(),
            message: message.into(),
        }
    }

    /// Create an IO operation error with context
    pub fn io_operation(
        operation: impl Into<String>,
        message: impl Into<String>,
        source: std::io::Error,
    ) -> Self {
        LoggerError::IoOperation {
            operation: operation.into(),
            message: message.into(),
            source,
        }
    }

    /// Create a sink write error
    pub fn sink_write(handler: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::SinkWrite {
            handler: handler.into(),
            message: message.into(),
        }
    }

    pub fn handler_panicked(handler: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::HandlerPanicked {
            handler: handler.into(),
            message: message.into(),
        }
    }

    /// Create a generic error
    pub fn other<S: Into<String>>(msg: S) -> Self {
        LoggerError::Other(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let err = LoggerError::invalid_severity("trace");
        assert!(matches!(err, LoggerError::InvalidSeverity { .. }));

        let err = LoggerError::config("FileHandler", "missing path");
        assert!(matches!(err, LoggerError::InvalidConfiguration { .. }));

        let err = LoggerError::unknown_handler("carrier-pigeon");
        assert!(matches!(err, LoggerError::UnknownHandler { .. }));
    }

    #[test]
    fn test_error_display() {
        let err = LoggerError::invalid_severity("undef");
        assert_eq!(err.to_string(), "\"undef\" is not a supported severity level");

        let err = LoggerError::sink_write("file", "Disk full");
        assert_eq!(err.to_string(), "Handler 'file' failed to write: Disk full");

        let err = LoggerError::Dispatch {
            failures: vec![
                ("file".to_string(), "Disk full".to_string()),
                ("syslog".to_string(), "socket closed".to_string()),
            ],
        };
        assert_eq!(
            err.to_string(),
            "2 handler(s) failed: file: Disk full; syslog: socket closed"
        );
    }

    #[test]
    fn test_io_operation_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "access denied");
        let err = LoggerError::io_operation("opening log file", "cannot open /var/log/x", io_err);

        assert!(matches!(err, LoggerError::IoOperation { .. }));
        assert!(err.to_string().contains("opening log file"));
        assert!(err.to_string().contains("cannot open /var/log/x"));
    }
}
