//! JSON configuration example
//!
//! Builds a whole logging setup from a JSON document.
//!
//! Run with: cargo run --example json_config

use logful::prelude::*;

const CONFIG: &str = r#"{
    "application": "billing",
    "level": "notice",
    "handlers": [
        { "handler": "stdout", "colors": false,
          "formats": { "message": "{timestamp} [{levelLongName}] {identity}: {message}",
                       "timestamp": "HH:mm:ss" } },
        { "handler": "file", "path": "billing.log",
          "sink_options": { "append": false } }
    ]
}"#;

fn main() -> Result<()> {
    println!("=== logful - JSON Configuration Example ===\n");

    let config = LogfulConfig::from_json_str(CONFIG)?;
    let logful = Logful::new();
    logful.configure(&config)?;

    println!("Loaded handlers: {:?}\n", logful.handler_keys());

    let invoices = logful.logger("invoices");
    invoices.info("Not shown: below notice");
    invoices.notice("Invoice run started");
    invoices.warn("Customer 42 has no billing address");
    invoices.crit("Payment gateway unreachable");

    logful.flush()?;

    println!("\n=== Example completed successfully! ===");

    Ok(())
}
