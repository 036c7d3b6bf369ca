//! File logging example
//!
//! Demonstrates appending JSON lines to a file and reading them back.
//!
//! Run with: cargo run --example file_logging

use rust_context_logger::prelude::*;
use std::fs;

fn main() -> Result<()> {
    println!("=== Rust Context Logger - File Logging Example ===\n");

    let path = std::env::temp_dir().join("rust_context_logger_demo.jsonl");
    let _ = fs::remove_file(&path);

    let logger = Logger::builder()
        .file(&path)?
        .flags(WriterFlags::UTC | WriterFlags::DATE | WriterFlags::TIME)
        .build()
        .with_field("app", "file_logging");

    println!("1. Logging to {}:", path.display());

    logger.info("Application started");
    logger.debug("Loading configuration...");
    logger.warn("Using default settings for some options");

    println!("\n2. Performing some operations:");
    for i in 1..=5 {
        let item = logger.with_field("item", i);
        item.infof(format_args!("Processing item {}/5", i));
        if i == 3 {
            item.warn("Item 3 took longer than expected");
        }
    }

    logger.info("Application shutting down");
    logger.flush()?;

    println!("\n3. Contents of the log file:");
    let content = fs::read_to_string(&path)?;
    for line in content.lines() {
        println!("   {}", line);
    }

    println!("\n   {} lines written", logger.metrics().lines_written());
    println!("\n=== Example completed successfully! ===");

    Ok(())
}
