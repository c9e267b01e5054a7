//! Console styling example
//!
//! Run with: cargo run --example console_demo

use wterm::prelude::*;

fn main() -> Result<()> {
    let mut console = ConsoleWriter::new();

    console.log("=== wterm console demo ===")?;

    for color in NamedColor::ALL {
        console.log(&color.paint(color.name()))?;
    }

    let loud = WriteOptions::new().style(Style::new().fg(Color::Rgb(255, 128, 0)).bold(true));
    console.log_with("truecolor + bold", &loud)?;
    console.log_colored("256-color index 208", "208")?;

    console.configure(console.config().clone().with_prefix(Prefix::computed(|| {
        chrono::Local::now().format("%H:%M:%S").to_string()
    })));
    console.info("prefixed with the current time")?;
    console.warning("goes to stderr with a [warning] tag")?;

    if let Err(e) = console.log_colored("never printed", "chartreuse") {
        console.error(&format!("rejected style: {e}"))?;
    }

    let mut logger = Logger::builder().name("demo").min_level(DEBUG).build()?;
    logger.debug("logger lines are plain text")?;
    logger.info("routed to stdout")?;
    logger.error("routed to stderr")?;

    console.flush()
}
