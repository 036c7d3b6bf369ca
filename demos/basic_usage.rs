//! Basic logger usage example
//!
//! Demonstrates the leveled emission methods, field chaining and the
//! escalation behavior of `error`/`panic`.
//!
//! Run with: cargo run --example basic_usage

use rust_context_logger::prelude::*;
use rust_context_logger::info;

fn main() -> Result<()> {
    println!("=== Rust Context Logger - Basic Usage Example ===\n");

    // Root logger writing JSON lines to stdout with a date/time header
    let logger = Logger::builder()
        .stdout()
        .prefix("[basic] ")
        .flags(WriterFlags::STD)
        .build();

    println!("1. Logging at non-terminating levels:");
    logger.debug("This is a debug message");
    logger.info("This is an info message");
    logger.warn("This is a warning message");
    info!(logger, "Formatted message: {} + {} = {}", 2, 2, 4);

    println!("\n2. Attaching fields:");
    let service = logger.with_field("service", "billing");
    let request = service.with_fields([("request_id", "req-001"), ("method", "POST")]);
    request.info("Request received");
    service.info("Parent handle is unchanged");

    println!("\n3. Recording the caller:");
    logger.with_caller(1).info("Logged from main");

    println!("\n4. Escalating on error:");
    let outcome = catch_escalation(|| {
        request.with_field("attempt", 3).error("Payment gateway unavailable");
    });
    match outcome {
        Ok(()) => println!("   no escalation"),
        Err(escalation) => println!("   caught escalation at level {}", escalation.level()),
    }

    println!("\n5. Metrics:");
    let metrics = logger.metrics();
    println!("   lines written: {}", metrics.lines_written());
    println!("   escalations:   {}", metrics.escalations());

    logger.flush()?;
    println!("\n=== Example completed successfully! ===");

    Ok(())
}
