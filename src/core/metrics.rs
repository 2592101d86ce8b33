//! Logger metrics for observability
//!
//! Counters describing how entries flowed through the dispatch core: how many
//! were dispatched, how many the threshold suppressed, and how handler
//! deliveries went.

use std::sync::atomic::{AtomicU64, Ordering};

/// Metrics shared by every logger created from the same [`Logful`](crate::Logful)
///
/// # Example
///
/// ```
/// use logful::LoggerMetrics;
///
/// let metrics = LoggerMetrics::new();
///
/// metrics.record_dispatched();
/// metrics.record_delivery();
/// metrics.record_failure();
///
/// assert_eq!(metrics.entries_dispatched(), 1);
/// assert_eq!(metrics.handler_failures(), 1);
/// assert_eq!(metrics.failure_rate(), 50.0);
/// ```
#[derive(Debug)]
pub struct LoggerMetrics {
    entries_dispatched: AtomicU64,
    entries_suppressed: AtomicU64,
    severity_demotions: AtomicU64,
    handler_deliveries: AtomicU64,
    handler_failures: AtomicU64,
}

impl LoggerMetrics {
    pub fn new() -> Self {
        Self {
            entries_dispatched: AtomicU64::new(0),
            entries_suppressed: AtomicU64::new(0),
            severity_demotions: AtomicU64::new(0),
            handler_deliveries: AtomicU64::new(0),
            handler_failures: AtomicU64::new(0),
        }
    }

    /// Record an entry that passed the threshold and was fanned out
    #[inline]
    pub fn record_dispatched(&self) -> u64 {
        self.entries_dispatched.fetch_add(1, Ordering::Relaxed)
    }

    /// Record an entry dropped by the threshold
    #[inline]
    pub fn record_suppressed(&self) -> u64 {
        self.entries_suppressed.fetch_add(1, Ordering::Relaxed)
    }

    /// Record an unknown severity demoted to a warning
    #[inline]
    pub fn record_demotion(&self) -> u64 {
        self.severity_demotions.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_delivery(&self) -> u64 {
        self.handler_deliveries.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_failure(&self) -> u64 {
        self.handler_failures.fetch_add(1, Ordering::Relaxed)
    }

    pub fn entries_dispatched(&self) -> u64 {
        self.entries_dispatched.load(Ordering::Relaxed)
    }

    pub fn entries_suppressed(&self) -> u64 {
        self.entries_suppressed.load(Ordering::Relaxed)
    }

    pub fn severity_demotions(&self) -> u64 {
        self.severity_demotions.load(Ordering::Relaxed)
    }

    pub fn handler_deliveries(&self) -> u64 {
        self.handler_deliveries.load(Ordering::Relaxed)
    }

    pub fn handler_failures(&self) -> u64 {
        self.handler_failures.load(Ordering::Relaxed)
    }

    /// Percentage of handler deliveries that failed
    pub fn failure_rate(&self) -> f64 {
        let failed = self.handler_failures();
        let total = self.handler_deliveries() + failed;

        if total == 0 {
            0.0
        } else {
            (failed as f64 / total as f64) * 100.0
        }
    }

    pub fn reset(&self) {
        self.entries_dispatched.store(0, Ordering::Relaxed);
        self.entries_suppressed.store(0, Ordering::Relaxed);
        self.severity_demotions.store(0, Ordering::Relaxed);
        self.handler_deliveries.store(0, Ordering::Relaxed);
        self.handler_failures.store(0, Ordering::Relaxed);
    }
}

impl Default for LoggerMetrics {
    fn default() -> Self {
        Self::new()
    }
}
