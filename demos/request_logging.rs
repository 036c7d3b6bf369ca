//! Request-scoped logging example
//!
//! Demonstrates per-request handles derived concurrently from one root,
//! request contexts surfaced through an enricher, and full caller stacks.
//!
//! Run with: cargo run --example request_logging

use rust_context_logger::prelude::*;
use std::thread;

fn handle_request(root: &Logger, id: usize) {
    let ctx = RequestContext::traced(format!("trace-{:04}", id), format!("span-{}", id))
        .with_value("tenant", if id % 2 == 0 { "acme" } else { "globex" });

    let logger = root
        .with_context(ctx)
        .with_fields([("request_id", format!("req-{}", id))]);

    logger.info("Request started");
    load_order(&logger, id);
    logger.infof(format_args!("Request {} finished", id));
}

fn load_order(logger: &Logger, id: usize) {
    if id == 3 {
        logger
            .with_callers_frames()
            .with_field("order_id", id)
            .warn("Slow order lookup");
    }
}

fn main() -> Result<()> {
    println!("=== Rust Context Logger - Request Logging Example ===\n");

    let root = Logger::builder()
        .stdout()
        .enricher(tracing_enricher())
        .build()
        .with_field("service", "orders");

    thread::scope(|scope| {
        for id in 0..4 {
            let root = &root;
            scope.spawn(move || handle_request(root, id));
        }
    });

    root.flush()?;
    println!(
        "\n{} lines written by {} request handlers",
        root.metrics().lines_written(),
        4
    );
    println!("\n=== Example completed successfully! ===");

    Ok(())
}
