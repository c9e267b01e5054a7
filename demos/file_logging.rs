//! File logging example
//!
//! Writes to `logs/application.log` and mirrors every line to the console.
//!
//! Run with: cargo run --example file_logging

use wterm::prelude::*;

fn main() -> Result<()> {
    let mut logger = FileLogger::builder()
        .filename("logs/application.log")
        .name("app")
        .level_name("debug")
        .tee(true)
        .build()?;

    logger.info("Application started")?;
    logger.debug("Loading configuration...")?;
    for i in 1..=3 {
        wterm::info!(logger, "Processing item {}/3", i)?;
    }
    logger.warning("Using default settings for some options")?;
    logger.error("Failed to load optional plugin")?;

    if let Some(path) = logger.path() {
        println!("Log written to {}", path.display());
    }
    logger.close()
}
