//! File logging example
//!
//! Demonstrates logging to both the console and a file with custom formats.
//!
//! Run with: cargo run --example file_logging

use logful::prelude::*;

fn main() -> Result<()> {
    println!("=== logful - File Logging Example ===\n");

    let logful = Logful::new();
    logful.set_application_name("shop");

    logful.use_handler("console", HandlerOptions::default())?;
    logful.use_handler(
        "file",
        HandlerOptions::new()
            .with_path("application.log")
            .with_timestamp_format("YYYY-MM-DD HH:mm:ss"),
    )?;

    let logger = logful.logger("checkout");

    println!("1. Logging to both console and file:");
    logger.info("Application started");
    logger.debug("Loading configuration (below threshold)");
    logger.info("Configuration loaded successfully");
    logger.warn("Using default settings for some options");
    logger.error("Failed to load optional plugin");

    println!("\n2. Performing some operations:");
    for i in 1..=5 {
        logger.info(format!("Processing order {}/5", i));
        if i == 3 {
            logger.notice("Order 3 took longer than expected");
        }
    }

    println!("\n3. Logging an error with its causes:");
    let io = std::io::Error::new(std::io::ErrorKind::NotFound, "coupon table missing");
    let err = LoggerError::io_operation("loading coupons", "cannot read 'coupons.db'", io);
    logger.log_error("error", &err);

    logful.flush()?;

    println!("\n=== Example completed successfully! ===");
    println!("Check 'application.log' for the file output");

    Ok(())
}
