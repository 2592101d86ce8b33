//! Stress tests for concurrent logging
//!
//! These tests verify:
//! - No entry is lost or torn when many threads share one file handler
//! - Concurrent registration of the same key constructs the handler once
//! - Threshold and application changes are safe while other threads log

use logful::prelude::*;
use std::fs;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Barrier};
use std::thread;
use tempfile::TempDir;

const THREADS: usize = 8;
const PER_THREAD: usize = 500;

/// Every line written by every thread arrives whole
#[test]
fn test_concurrent_file_logging() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let log_file = temp_dir.path().join("stress.log");

    let logful = Logful::new();
    logful.set_application_name("stress");
    logful
        .use_handler(
            "file",
            HandlerOptions::new()
                .with_path(&log_file)
                .with_message_format("{levelName} {identity} {message}"),
        )
        .expect("file handler loaded");

    let handles: Vec<_> = (0..THREADS)
        .map(|t| {
            let logger = logful.logger(&format!("worker{}", t));
            thread::spawn(move || {
                for i in 0..PER_THREAD {
                    logger.info(format!("message {}", i));
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().expect("worker panicked");
    }
    logful.flush().expect("Failed to flush");

    let content = fs::read_to_string(&log_file).expect("Failed to read log file");
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), THREADS * PER_THREAD);
    for line in lines {
        assert!(line.starts_with("info stress\\worker"), "torn line: {}", line);
    }

    assert_eq!(
        logful.metrics().entries_dispatched(),
        (THREADS * PER_THREAD) as u64
    );
}

static RACED_CONSTRUCTIONS: AtomicUsize = AtomicUsize::new(0);

struct Raced(Formats);

impl Handler for Raced {
    fn log(&self, _entry: &Entry) -> Result<()> {
        Ok(())
    }

    fn name(&self) -> &str {
        "raced"
    }

    fn formats(&self) -> &Formats {
        &self.0
    }

    fn application(&self) -> Option<&str> {
        None
    }
}

impl ConstructHandler for Raced {
    fn construct(_options: HandlerOptions) -> Result<Self> {
        RACED_CONSTRUCTIONS.fetch_add(1, Ordering::SeqCst);
        Ok(Raced(Formats::new("{message}", "HH:mm")))
    }
}

/// Racing registrations of one type construct it exactly once
#[test]
fn test_concurrent_registration() {
    let logful = Logful::new();
    let barrier = Arc::new(Barrier::new(THREADS));

    let handles: Vec<_> = (0..THREADS)
        .map(|_| {
            let logful = logful.clone();
            let barrier = barrier.clone();
            thread::spawn(move || {
                barrier.wait();
                logful
                    .use_custom::<Raced>(HandlerOptions::default())
                    .map(|_| ())
            })
        })
        .collect();

    for handle in handles {
        handle.join().expect("thread panicked").expect("registered");
    }

    assert_eq!(RACED_CONSTRUCTIONS.load(Ordering::SeqCst), 1);
    assert_eq!(logful.handler_keys().len(), 1);
}

/// Reconfiguring while logging neither deadlocks nor loses accounting
#[test]
fn test_reconfigure_while_logging() {
    let logful = Logful::new();
    let logger = Arc::new(logful.logger("busy"));
    let total = THREADS * PER_THREAD;

    let writers: Vec<_> = (0..THREADS)
        .map(|_| {
            let logger = logger.clone();
            thread::spawn(move || {
                for i in 0..PER_THREAD {
                    logger.notice(format!("tick {}", i));
                }
            })
        })
        .collect();

    let reconfigure = {
        let logful = logful.clone();
        thread::spawn(move || {
            for i in 0..200 {
                let level = if i % 2 == 0 { "error" } else { "debug" };
                logful.set_minimum_severity(level).expect("valid severity");
                logful.set_application_name(format!("app{}", i));
            }
        })
    };

    for handle in writers {
        handle.join().expect("writer panicked");
    }
    reconfigure.join().expect("reconfigure panicked");

    let metrics = logful.metrics();
    assert_eq!(
        metrics.entries_dispatched() + metrics.entries_suppressed(),
        total as u64
    );
    assert_eq!(logful.application(), "app199");
}
