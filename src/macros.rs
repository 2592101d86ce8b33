//! Logging macros for ergonomic log message formatting.
//!
//! These macros provide a convenient interface for logging with automatic
//! string formatting, similar to `println!` and `format!`. Each one expands
//! to a call on a [`Logger`](crate::Logger) and evaluates to `&Logger`.
//!
//! # Examples
//!
//! ```
//! use logful::Logful;
//! use logful::info;
//!
//! let logger = Logful::new().logger("server");
//!
//! // Basic logging
//! info!(logger, "Server started");
//!
//! // With format arguments
//! let port = 8080;
//! info!(logger, "Server listening on port {}", port);
//! ```

/// Log a message at a severity given by name.
///
/// An unknown name is demoted to `warn`, exactly like
/// [`Logger::log`](crate::Logger::log).
///
/// ```
/// # let logger = logful::Logful::new().logger("db");
/// use logful::log;
/// log!(logger, "notice", "Simple message");
/// log!(logger, "error", "Error code: {}", 500);
/// ```
#[macro_export]
macro_rules! log {
    ($logger:expr, $severity:expr, $($arg:tt)+) => {
        $logger.log($severity, format!($($arg)+))
    };
}

/// Log a debug-level message.
#[macro_export]
macro_rules! debug {
    ($logger:expr, $($arg:tt)+) => {
        $logger.emit($crate::Severity::Debug, format!($($arg)+))
    };
}

/// Log an info-level message.
///
/// ```
/// # let logger = logful::Logful::new().logger("jobs");
/// use logful::info;
/// info!(logger, "Processing {} items", 100);
/// ```
#[macro_export]
macro_rules! info {
    ($logger:expr, $($arg:tt)+) => {
        $logger.emit($crate::Severity::Info, format!($($arg)+))
    };
}

/// Log a notice-level message.
#[macro_export]
macro_rules! notice {
    ($logger:expr, $($arg:tt)+) => {
        $logger.emit($crate::Severity::Notice, format!($($arg)+))
    };
}

/// Log a warning-level message.
///
/// ```
/// # let logger = logful::Logful::new().logger("net");
/// use logful::warn;
/// warn!(logger, "Retry attempt {} of {}", 3, 5);
/// ```
#[macro_export]
macro_rules! warn {
    ($logger:expr, $($arg:tt)+) => {
        $logger.emit($crate::Severity::Warn, format!($($arg)+))
    };
}

/// Log an error-level message.
#[macro_export]
macro_rules! error {
    ($logger:expr, $($arg:tt)+) => {
        $logger.emit($crate::Severity::Error, format!($($arg)+))
    };
}

/// Log a critical-level message.
#[macro_export]
macro_rules! crit {
    ($logger:expr, $($arg:tt)+) => {
        $logger.emit($crate::Severity::Crit, format!($($arg)+))
    };
}

/// Log an alert-level message.
#[macro_export]
macro_rules! alert {
    ($logger:expr, $($arg:tt)+) => {
        $logger.emit($crate::Severity::Alert, format!($($arg)+))
    };
}

/// Log an emergency-level message.
#[macro_export]
macro_rules! emerg {
    ($logger:expr, $($arg:tt)+) => {
        $logger.emit($crate::Severity::Emerg, format!($($arg)+))
    };
}

#[cfg(test)]
mod tests {
    use crate::core::{Entry, Formats, Handler, Logful, Result, SharedHandler};
    use parking_lot::Mutex;
    use std::sync::Arc;

    struct Capture {
        lines: Mutex<Vec<String>>,
        formats: Formats,
    }

    impl Handler for Capture {
        fn log(&self, entry: &Entry) -> Result<()> {
            self.lines
                .lock()
                .push(format!("{} {}", entry.level, entry.message));
            Ok(())
        }

        fn name(&self) -> &str {
            "capture"
        }

        fn formats(&self) -> &Formats {
            &self.formats
        }

        fn application(&self) -> Option<&str> {
            None
        }
    }

    fn setup() -> (Logful, Arc<Capture>) {
        let logful = Logful::new();
        logful.set_threshold(crate::Severity::Debug);
        let capture = Arc::new(Capture {
            lines: Mutex::new(Vec::new()),
            formats: Formats::new("{message}", "HH:mm"),
        });
        let handler = capture.clone();
        logful
            .use_with("capture", Default::default(), move |_| Ok(handler as SharedHandler))
            .unwrap();
        (logful, capture)
    }

    #[test]
    fn test_log_macro() {
        let (logful, capture) = setup();
        let logger = logful.logger("m");
        log!(logger, "notice", "Test message");
        log!(logger, "error", "Formatted: {}", 42);
        log!(logger, "verbose", "odd");

        let lines = capture.lines.lock();
        assert_eq!(lines[0], "notice Test message");
        assert_eq!(lines[1], "error Formatted: 42");
        assert!(lines[2].starts_with("warn \"verbose\" is not a supported severity level"));
    }

    #[test]
    fn test_severity_macros() {
        let (logful, capture) = setup();
        let logger = logful.logger("m");
        debug!(logger, "d {}", 1);
        info!(logger, "i {}", 2);
        notice!(logger, "n");
        warn!(logger, "w");
        error!(logger, "e");
        crit!(logger, "c");
        alert!(logger, "a");
        emerg!(logger, "x {}", "y");

        assert_eq!(
            *capture.lines.lock(),
            vec![
                "debug d 1",
                "info i 2",
                "notice n",
                "warn w",
                "error e",
                "crit c",
                "alert a",
                "emerg x y",
            ]
        );
    }

    #[test]
    fn test_macros_chain() {
        let (logful, capture) = setup();
        let logger = logful.logger("m");
        info!(logger, "first").debug("second");
        assert_eq!(capture.lines.lock().len(), 2);
    }
}
