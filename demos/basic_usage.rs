//! Basic logger usage example
//!
//! Demonstrates the global context, the console handler and the severity
//! threshold.
//!
//! Run with: cargo run --example basic_usage

use logful::prelude::*;
use logful::{info, warn};

fn main() -> Result<()> {
    println!("=== logful - Basic Usage Example ===\n");

    let logful = Logful::global();
    logful.set_application_name("demo");
    logful.use_handler("console", HandlerOptions::default())?;

    // Loggers subscribe to the handlers loaded before they are created
    let logger = Logger::new("main");

    println!("1. Logging at every severity (threshold: debug):");
    logful.set_minimum_severity("debug")?;
    logger
        .debug("This is a debug message")
        .info("This is an info message")
        .notice("This is a notice message")
        .warn("This is a warning message")
        .error("This is an error message")
        .crit("This is a critical message")
        .alert("This is an alert message")
        .emerg("This is an emergency message");

    println!("\n2. Raising the threshold to warn:");
    logful.set_minimum_severity("warn")?;
    logger.info("Info message (hidden)");
    logger.warn("Warning message (visible)");

    println!("\n3. Formatting macros:");
    let port = 8080;
    info!(logger, "Listening on port {} (hidden)", port);
    warn!(logger, "Port {} is not privileged", port);

    println!("\n4. Unknown severities are demoted to warn:");
    logger.log("verbose", "Something chatty");

    println!("\n=== Example completed successfully! ===");

    Ok(())
}
