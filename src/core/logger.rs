//! Main logger implementation
//!
//! [`Logful`] is the shared logging context: application name, minimum
//! severity and the handler registry, behind one lock. [`Logger`] is a
//! per-module event source created from a context; at construction it
//! subscribes every handler registered at that moment.
//!
//! Handlers registered after a logger was created are not added to it. A
//! logger's subscriber list is fixed when the logger is built, so long-lived
//! loggers should be created after the handlers are loaded.

use super::{
    config::{HandlerOptions, LogfulConfig},
    entry::{identity_of, Entry, Origin},
    error::{LoggerError, Result},
    handler::{ConstructHandler, EntrySource, SharedHandler},
    metrics::LoggerMetrics,
    registry::HandlerRegistry,
    severity::{Severity, SEVERITIES},
};
use crate::handlers;
use once_cell::sync::Lazy;
use parking_lot::RwLock;
use std::any::type_name;
use std::error::Error as StdError;
use std::fmt;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;

/// Application name used until [`Logful::set_application_name`] is called
pub const DEFAULT_APPLICATION: &str = "app";

/// Minimum severity used until the threshold is changed
pub const DEFAULT_THRESHOLD: Severity = Severity::Info;

/// Called with the handler name and the error whenever a handler fails
/// during fan-out
pub type HandlerErrorCallback = Arc<dyn Fn(&str, &LoggerError) + Send + Sync>;

struct State {
    application: String,
    threshold: Severity,
    registry: HandlerRegistry,
}

struct Shared {
    state: RwLock<State>,
    metrics: LoggerMetrics,
    on_error: RwLock<Option<HandlerErrorCallback>>,
}

static GLOBAL: Lazy<Logful> = Lazy::new(Logful::new);

/// Shared logging context
///
/// Cloning is cheap and every clone refers to the same state. One process-wide
/// instance is available through [`Logful::global`]; independent instances can
/// be created with [`Logful::new`].
///
/// # Example
///
/// ```
/// use logful::prelude::*;
///
/// let logful = Logful::new();
/// logful.set_application_name("svc");
/// logful.set_minimum_severity("notice")?;
/// logful.use_handler("console", HandlerOptions::new().with_colors(false))?;
///
/// let logger = logful.logger("http");
/// logger.warn("timeout");
/// # Ok::<(), logful::LoggerError>(())
/// ```
#[derive(Clone)]
pub struct Logful {
    shared: Arc<Shared>,
}

impl Logful {
    #[must_use]
    pub fn new() -> Self {
        Self {
            shared: Arc::new(Shared {
                state: RwLock::new(State {
                    application: DEFAULT_APPLICATION.to_string(),
                    threshold: DEFAULT_THRESHOLD,
                    registry: HandlerRegistry::new(),
                }),
                metrics: LoggerMetrics::new(),
                on_error: RwLock::new(None),
            }),
        }
    }

    /// The process-wide context used by [`Logger::new`]
    pub fn global() -> &'static Logful {
        &GLOBAL
    }

    /// Create a logger for `module`; an empty name means no module
    #[must_use]
    pub fn logger(&self, module: &str) -> Logger {
        let module = Some(module).filter(|m| !m.is_empty()).map(str::to_string);
        let subscribers = self.shared.state.read().registry.handlers().cloned().collect();

        Logger {
            module,
            logful: self.clone(),
            subscribers: RwLock::new(subscribers),
        }
    }

    /// Create a logger whose identity is the application name alone
    #[must_use]
    pub fn root_logger(&self) -> Logger {
        self.logger("")
    }

    pub fn application(&self) -> String {
        self.shared.state.read().application.clone()
    }

    /// Rename the application; existing loggers pick the new name up on
    /// their next entry
    pub fn set_application_name(&self, name: impl Into<String>) -> &Self {
        self.shared.state.write().application = name.into();
        self
    }

    pub fn minimum_severity(&self) -> Severity {
        self.shared.state.read().threshold
    }

    /// Set the threshold by severity name
    ///
    /// # Errors
    ///
    /// Returns [`LoggerError::InvalidSeverity`] if `name` is not one of the
    /// eight known severities; the threshold is left unchanged.
    pub fn set_minimum_severity(&self, name: &str) -> Result<&Self> {
        let severity = Severity::resolve(name).ok_or_else(|| LoggerError::invalid_severity(name))?;
        Ok(self.set_threshold(severity))
    }

    pub fn set_threshold(&self, severity: Severity) -> &Self {
        self.shared.state.write().threshold = severity;
        self
    }

    pub fn is_valid_level(name: &str) -> bool {
        Severity::is_valid(name)
    }

    /// The frozen severity table
    pub fn severities() -> &'static [Severity; 8] {
        &SEVERITIES
    }

    /// Load a built-in handler by name: `console`, `stdout`, `file` or `syslog`.
    ///
    /// Loading a name that is already registered does nothing. The current
    /// application name is injected into `options` unless one is given.
    ///
    /// # Errors
    ///
    /// [`LoggerError::UnknownHandler`] for any other name, or whatever the
    /// handler's constructor returns.
    pub fn use_handler(&self, name: &str, options: HandlerOptions) -> Result<&Self> {
        if !handlers::is_builtin(name) {
            return Err(LoggerError::unknown_handler(name));
        }
        self.use_with(name, options, |options| handlers::construct_builtin(name, options))
    }

    /// Load a handler by constructor reference.
    ///
    /// The registry key is the type name of `H`, so repeated calls with the
    /// same type construct it only once.
    pub fn use_custom<H: ConstructHandler>(&self, options: HandlerOptions) -> Result<&Self> {
        self.use_with(type_name::<H>(), options, |options| {
            Ok(Arc::new(H::construct(options)?) as SharedHandler)
        })
    }

    /// Register the handler built by `constructor` under `key`, unless the key
    /// is already taken.
    ///
    /// The registry stays locked while `constructor` runs, which is what keeps
    /// concurrent calls for the same key down to one construction. The
    /// constructor must not call back into this context.
    pub fn use_with<F>(&self, key: &str, mut options: HandlerOptions, constructor: F) -> Result<&Self>
    where
        F: FnOnce(HandlerOptions) -> Result<SharedHandler>,
    {
        let mut state = self.shared.state.write();
        if state.registry.has(key) {
            return Ok(self);
        }

        if options.application.is_none() {
            options.application = Some(state.application.clone());
        }
        let handler = constructor(options)?;
        state.registry.register(key, handler);

        Ok(self)
    }

    pub fn has_handler(&self, key: &str) -> bool {
        self.shared.state.read().registry.has(key)
    }

    pub fn handler(&self, key: &str) -> Option<SharedHandler> {
        self.shared.state.read().registry.get(key).cloned()
    }

    pub fn handler_keys(&self) -> Vec<String> {
        self.shared
            .state
            .read()
            .registry
            .keys()
            .map(str::to_string)
            .collect()
    }

    /// Flush every registered handler
    pub fn flush(&self) -> Result<()> {
        let handlers: Vec<SharedHandler> = self.shared.state.read().registry.handlers().cloned().collect();
        for handler in handlers {
            handler.flush()?;
        }
        Ok(())
    }

    pub fn metrics(&self) -> &LoggerMetrics {
        &self.shared.metrics
    }

    /// Replace the default stderr report of handler failures
    ///
    /// # Example
    ///
    /// ```
    /// use logful::Logful;
    /// use std::sync::Arc;
    ///
    /// let logful = Logful::new();
    /// logful.on_handler_error(Arc::new(|handler, err| {
    ///     eprintln!("ALERT: {} failed: {}", handler, err);
    /// }));
    /// ```
    pub fn on_handler_error(&self, callback: HandlerErrorCallback) -> &Self {
        *self.shared.on_error.write() = Some(callback);
        self
    }

    /// Apply a configuration: application name, threshold, then every listed
    /// handler in order.
    pub fn configure(&self, config: &LogfulConfig) -> Result<&Self> {
        if let Some(ref application) = config.application {
            self.set_application_name(application.clone());
        }
        if let Some(ref level) = config.level {
            self.set_minimum_severity(level)?;
        }
        for handler in &config.handlers {
            self.use_handler(&handler.handler, handler.options.clone())?;
        }
        Ok(self)
    }

    fn report(&self, failures: &[(String, LoggerError)]) {
        if failures.is_empty() {
            return;
        }

        let callback = self.shared.on_error.read().clone();
        for (handler, err) in failures {
            match callback {
                Some(ref callback) => callback(handler.as_str(), err),
                None => match err {
                    LoggerError::HandlerPanicked { .. } => eprintln!(
                        "[LOGGER CRITICAL] {}. Other handlers continue to function.",
                        err
                    ),
                    _ => eprintln!("[LOGGER ERROR] {}", err),
                },
            }
        }
    }
}

impl Default for Logful {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Logful {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.shared.state.read();
        f.debug_struct("Logful")
            .field("application", &state.application)
            .field("threshold", &state.threshold)
            .field("handlers", &state.registry)
            .finish()
    }
}

/// Per-module event source
///
/// Every method that logs returns the logger for chaining:
///
/// ```
/// use logful::Logful;
///
/// let logger = Logful::new().logger("queue");
/// logger.info("started").debug("polling").warn("backlog growing");
/// ```
pub struct Logger {
    module: Option<String>,
    logful: Logful,
    subscribers: RwLock<Vec<SharedHandler>>,
}

impl Logger {
    /// Create a logger from the process-wide context
    #[must_use]
    pub fn new(module: &str) -> Self {
        Logful::global().logger(module)
    }

    pub fn module(&self) -> Option<&str> {
        self.module.as_deref()
    }

    /// `application\module`, or just the application when there is no module
    pub fn identity(&self) -> String {
        identity_of(&self.logful.application(), self.module())
    }

    /// The context this logger reads its settings from
    pub fn context(&self) -> &Logful {
        &self.logful
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.read().len()
    }

    /// Log `message` at the severity called `severity`.
    ///
    /// An unknown severity never fails: it is turned into a `warn` entry
    /// naming the bad level and carrying the original message. Handler
    /// failures are reported through the context's error hook.
    pub fn log(&self, severity: &str, message: impl Into<String>) -> &Self {
        let failures = self.dispatch(severity, message.into());
        self.logful.report(&failures);
        self
    }

    /// Log at a known severity
    pub fn emit(&self, severity: Severity, message: impl Into<String>) -> &Self {
        let failures = self.dispatch_severity(severity, message.into());
        self.logful.report(&failures);
        self
    }

    /// Log an error value: its description followed by its source chain
    pub fn log_error(&self, severity: &str, error: &(dyn StdError + 'static)) -> &Self {
        self.log(severity, describe_error(error))
    }

    /// Like [`log`](Self::log) but hands handler failures back to the caller
    /// instead of the error hook.
    ///
    /// # Errors
    ///
    /// [`LoggerError::Dispatch`] listing every handler that failed. The
    /// remaining handlers were still notified.
    pub fn try_log(&self, severity: &str, message: impl Into<String>) -> Result<()> {
        let failures = self.dispatch(severity, message.into());
        if failures.is_empty() {
            return Ok(());
        }

        Err(LoggerError::Dispatch {
            failures: failures
                .into_iter()
                .map(|(handler, err)| (handler, err.to_string()))
                .collect(),
        })
    }

    pub fn flush(&self) -> Result<()> {
        let subscribers = self.subscribers.read().clone();
        for handler in subscribers {
            handler.flush()?;
        }
        Ok(())
    }

    #[inline]
    pub fn debug(&self, message: impl Into<String>) -> &Self {
        self.emit(Severity::Debug, message)
    }

    #[inline]
    pub fn info(&self, message: impl Into<String>) -> &Self {
        self.emit(Severity::Info, message)
    }

    #[inline]
    pub fn notice(&self, message: impl Into<String>) -> &Self {
        self.emit(Severity::Notice, message)
    }

    #[inline]
    pub fn warn(&self, message: impl Into<String>) -> &Self {
        self.emit(Severity::Warn, message)
    }

    /// Alias for [`warn`](Self::warn)
    #[inline]
    pub fn warning(&self, message: impl Into<String>) -> &Self {
        self.warn(message)
    }

    #[inline]
    pub fn error(&self, message: impl Into<String>) -> &Self {
        self.emit(Severity::Error, message)
    }

    #[inline]
    pub fn crit(&self, message: impl Into<String>) -> &Self {
        self.emit(Severity::Crit, message)
    }

    /// Alias for [`crit`](Self::crit)
    #[inline]
    pub fn critical(&self, message: impl Into<String>) -> &Self {
        self.crit(message)
    }

    #[inline]
    pub fn alert(&self, message: impl Into<String>) -> &Self {
        self.emit(Severity::Alert, message)
    }

    #[inline]
    pub fn emerg(&self, message: impl Into<String>) -> &Self {
        self.emit(Severity::Emerg, message)
    }

    /// Alias for [`emerg`](Self::emerg)
    #[inline]
    pub fn emergency(&self, message: impl Into<String>) -> &Self {
        self.emerg(message)
    }

    /// Alias for [`emerg`](Self::emerg)
    #[inline]
    pub fn panic(&self, message: impl Into<String>) -> &Self {
        self.emerg(message)
    }

    fn dispatch(&self, severity: &str, message: String) -> Vec<(String, LoggerError)> {
        match Severity::resolve(severity) {
            Some(severity) => self.dispatch_severity(severity, message),
            None => {
                self.logful.metrics().record_demotion();
                let warning = format!(
                    "\"{}\" is not a supported severity level (original message: \"{}\")",
                    severity, message
                );
                self.dispatch_severity(Severity::Warn, warning)
            }
        }
    }

    fn dispatch_severity(&self, severity: Severity, message: String) -> Vec<(String, LoggerError)> {
        let metrics = self.logful.metrics();

        let application = {
            let state = self.logful.shared.state.read();
            if !severity.passes(state.threshold) {
                metrics.record_suppressed();
                return Vec::new();
            }
            state.application.clone()
        };

        let entry = Entry::new(severity, message, Origin::new(application, self.module()));
        metrics.record_dispatched();

        // Snapshot so a handler subscribed mid-pass does not see this entry
        let subscribers = self.subscribers.read().clone();
        notify(&subscribers, &entry, metrics)
    }
}

impl EntrySource for Logger {
    fn subscribe(&self, handler: SharedHandler) {
        self.subscribers.write().push(handler);
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("module", &self.module)
            .field("subscribers", &self.subscriber_count())
            .finish()
    }
}

/// Deliver an entry to every handler, isolating each one.
///
/// A handler that returns an error or panics is recorded and skipped; the
/// remaining handlers still receive the entry.
fn notify(
    handlers: &[SharedHandler],
    entry: &Entry,
    metrics: &LoggerMetrics,
) -> Vec<(String, LoggerError)> {
    let mut failures = Vec::new();

    for handler in handlers {
        match catch_unwind(AssertUnwindSafe(|| handler.log(entry))) {
            Ok(Ok(())) => {
                metrics.record_delivery();
            }
            Ok(Err(e)) => {
                metrics.record_failure();
                failures.push((handler.name().to_string(), e));
            }
            Err(panic_info) => {
                let panic_msg = if let Some(s) = panic_info.downcast_ref::<&str>() {
                    s.to_string()
                } else if let Some(s) = panic_info.downcast_ref::<String>() {
                    s.clone()
                } else {
                    "Unknown panic".to_string()
                };
                metrics.record_failure();
                let name = handler.name().to_string();
                let err = LoggerError::handler_panicked(name.clone(), panic_msg);
                failures.push((name, err));
            }
        }
    }

    failures
}

fn describe_error(error: &(dyn StdError + 'static)) -> String {
    let mut text = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        text.push_str(": ");
        text.push_str(&cause.to_string());
        source = cause.source();
    }
    text
}
