//! Registry of loaded handlers, keyed by handler name or constructor key

use super::handler::SharedHandler;
use std::fmt;

/// Insertion-ordered map from key to handler.
///
/// At most one handler exists per key; registering an existing key keeps the
/// first handler.
#[derive(Default, Clone)]
pub struct HandlerRegistry {
    entries: Vec<(String, SharedHandler)>,
}

impl HandlerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a handler under `key`.
    ///
    /// Returns `false` and leaves the registry untouched if the key is taken.
    pub fn register(&mut self, key: impl Into<String>, handler: SharedHandler) -> bool {
        let key = key.into();
        if self.has(&key) {
            return false;
        }
        self.entries.push((key, handler));
        true
    }

    pub fn has(&self, key: &str) -> bool {
        self.entries.iter().any(|(k, _)| k == key)
    }

    pub fn get(&self, key: &str) -> Option<&SharedHandler> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, h)| h)
    }

    /// Every `(key, handler)` pair in registration order
    pub fn all(&self) -> impl Iterator<Item = (&str, &SharedHandler)> {
        self.entries.iter().map(|(k, h)| (k.as_str(), h))
    }

    pub fn handlers(&self) -> impl Iterator<Item = &SharedHandler> {
        self.entries.iter().map(|(_, h)| h)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Debug for HandlerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.keys()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{config::Formats, entry::Entry, error::Result, handler::Handler};
    use std::sync::Arc;

    struct NamedHandler {
        name: &'static str,
        formats: Formats,
    }

    impl NamedHandler {
        fn shared(name: &'static str) -> SharedHandler {
            Arc::new(Self {
                name,
                formats: Formats::new("{message}", "HH"),
            })
        }
    }

    impl Handler for NamedHandler {
        fn log(&self, _entry: &Entry) -> Result<()> {
            Ok(())
        }

        fn name(&self) -> &str {
            self.name
        }

        fn formats(&self) -> &Formats {
            &self.formats
        }

        fn application(&self) -> Option<&str> {
            None
        }
    }

    #[test]
    fn test_register_once_per_key() {
        let mut registry = HandlerRegistry::new();

        assert!(registry.register("console", NamedHandler::shared("first")));
        assert!(!registry.register("console", NamedHandler::shared("second")));

        assert_eq!(registry.len(), 1);
        assert_eq!(registry.get("console").map(|h| h.name()), Some("first"));
    }

    #[test]
    fn test_insertion_order() {
        let mut registry = HandlerRegistry::new();
        registry.register("file", NamedHandler::shared("file"));
        registry.register("console", NamedHandler::shared("console"));
        registry.register("syslog", NamedHandler::shared("syslog"));

        let keys: Vec<&str> = registry.all().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["file", "console", "syslog"]);
    }

    #[test]
    fn test_lookup_missing() {
        let registry = HandlerRegistry::new();
        assert!(registry.is_empty());
        assert!(!registry.has("file"));
        assert!(registry.get("file").is_none());
    }

    #[test]
    fn test_debug_lists_keys() {
        let mut registry = HandlerRegistry::new();
        registry.register("stdout", NamedHandler::shared("stdout"));
        assert_eq!(format!("{:?}", registry), "[\"stdout\"]");
    }
}
