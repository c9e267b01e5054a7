//! Integration tests for wterm
//!
//! These tests verify:
//! - Level filtering and severity routing
//! - Line formatting with the default template
//! - Terminal gating of writes
//! - Style errors leave no partial output
//! - File-backed logging, directory creation and append behavior

use regex::Regex;
use std::fs;
use tempfile::TempDir;
use wterm::prelude::*;
use wterm::LevelPrefixes;

fn capture_logger(min_level: Level) -> (Logger, MemorySink, MemorySink) {
    let out = MemorySink::new();
    let err = MemorySink::new();
    let logger = Logger::builder()
        .stdout(out.clone())
        .stderr(err.clone())
        .min_level(min_level)
        .build()
        .expect("Failed to build logger");
    (logger, out, err)
}

#[test]
fn test_warning_threshold_filters_lower_levels() {
    let (mut logger, out, err) = capture_logger(WARNING);

    logger.debug("x").unwrap();
    logger.info("x").unwrap();
    assert!(out.is_empty());
    assert!(err.is_empty());

    logger.warning("x").unwrap();
    assert_eq!(err.lines().len(), 1);
    logger.error("x").unwrap();
    assert_eq!(err.lines().len(), 2);
    assert!(out.is_empty());
}

#[test]
fn test_default_template_output() {
    let out = MemorySink::new();
    let mut logger = Logger::builder()
        .name("svc")
        .min_level(INFO)
        .stdout(out.clone())
        .build()
        .unwrap();

    logger.info("hello").unwrap();

    let line = Regex::new(r"^\S+ svc \[info\] hello$").unwrap();
    let stamp = Regex::new(r"^\d{4}-\d{2}-\d{2}T\d{2}:\d{2}:\d{2} ").unwrap();
    let lines = out.lines();
    assert_eq!(lines.len(), 1, "exactly one line expected");
    assert!(line.is_match(&lines[0]), "line {:?}", lines[0]);
    assert!(stamp.is_match(&lines[0]), "timestamp in {:?}", lines[0]);
}

#[test]
fn test_notty_gate_on_non_interactive_sink() {
    let emitted = MemorySink::new();
    let mut writer = ConsoleWriter::builder()
        .stdout(emitted.clone())
        .tty(false)
        .notty(true)
        .build();
    writer.log("visible").unwrap();
    assert_eq!(emitted.lines(), ["visible"]);

    for tty in [true, false] {
        let silent = MemorySink::new();
        let mut writer = ConsoleWriter::builder()
            .stdout(silent.clone())
            .tty(tty)
            .notty(false)
            .build();
        writer.log("invisible").unwrap();
        assert!(silent.is_empty(), "tty={tty} must not matter");
    }
}

#[test]
fn test_unknown_color_has_no_partial_output() {
    let out = MemorySink::terminal();
    let mut writer = ConsoleWriter::builder().stdout(out.clone()).build();

    let err = writer.log_colored("text", "chartreuse").unwrap_err();
    assert!(matches!(err, WtermError::Format { .. }));
    assert!(out.is_empty());

    let err = Style::new().try_bg("chartreuse").unwrap_err();
    assert!(matches!(err, WtermError::Format { .. }));
}

#[test]
fn test_styled_terminal_output_is_plain_in_pipes() {
    let terminal = MemorySink::terminal();
    let pipe = MemorySink::new();
    let style = WriteOptions::new().style(Style::new().fg(NamedColor::Yellow).bold(true));

    let mut writer = ConsoleWriter::builder()
        .stdout(terminal.clone())
        .stderr(pipe.clone())
        .build();
    writer.print(Stream::Primary, Some("note"), &style).unwrap();
    writer.print(Stream::Secondary, Some("note"), &style).unwrap();

    assert_eq!(terminal.contents(), "\x1b[33m\x1b[1mnote\x1b[0m\n");
    assert_eq!(pipe.contents(), "note\n");
}

#[test]
fn test_writer_level_prefixes() {
    let out = MemorySink::new();
    let err = MemorySink::new();
    let mut writer = ConsoleWriter::builder()
        .stdout(out.clone())
        .stderr(err.clone())
        .level_prefixes(LevelPrefixes {
            debug: Some("[debug]".to_string()),
            ..LevelPrefixes::default()
        })
        .build();

    writer.debug("d").unwrap();
    writer.info("i").unwrap();
    writer.warning("w").unwrap();

    assert_eq!(out.lines(), ["[debug] d", "i"]);
    assert_eq!(err.lines(), ["[warning] w"]);
}

#[test]
fn test_file_logger_creates_directory_and_appends() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let target = temp_dir.path().join("logs/app.log");
    assert!(!target.parent().unwrap().exists());

    for run in 1..=2 {
        let mut logger = FileLogger::builder()
            .filename(&target)
            .name("app")
            .format("{name} [{level}] run {message}")
            .build()
            .expect("Failed to create file logger");
        logger.info(&run.to_string()).unwrap();
        logger.error(&run.to_string()).unwrap();
        // Dropping the logger flushes and releases the file.
    }

    assert!(target.parent().unwrap().is_dir());
    let content = fs::read_to_string(&target).expect("Failed to read log file");
    assert_eq!(
        content,
        "app [info] run 1\napp [error] run 1\napp [info] run 2\napp [error] run 2\n"
    );
}

#[test]
fn test_file_logger_resolves_absolute_path() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let logger = FileLogger::builder()
        .filename(temp_dir.path().join("sub/c.log"))
        .build()
        .unwrap();
    let path = logger.path().expect("file path");
    assert!(path.is_absolute());
    assert!(path.ends_with("c.log"));
}

#[test]
fn test_file_logger_tee_failure_keeps_primary_write() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let target = temp_dir.path().join("primary.log");
    let broken = FileSink::open(temp_dir.path().join("tee.log")).unwrap();
    broken.close().unwrap();

    let mut logger = FileLogger::builder()
        .filename(&target)
        .tee_out(broken)
        .format("{message}")
        .build()
        .unwrap();

    assert!(logger.info("kept").is_err());
    logger.close().unwrap();
    assert_eq!(fs::read_to_string(&target).unwrap(), "kept\n");
}

#[test]
fn test_file_logger_unwritable_location_fails_loudly() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let blocker = temp_dir.path().join("not_a_dir");
    fs::write(&blocker, "plain file").unwrap();

    let result = FileLogger::builder()
        .filename(blocker.join("app.log"))
        .build();
    assert!(matches!(result, Err(WtermError::IoOperation { .. })));
}

#[test]
fn test_custom_registry_levels() {
    let registry = LevelRegistry::standard()
        .with_level(Level::new("trace", 0))
        .and_then(|r| r.with_level(Level::new("fatal", 9).with_stream(Stream::Secondary)))
        .unwrap();
    assert!(matches!(
        registry.clone().with_level(Level::new("fatal", 10)),
        Err(WtermError::DuplicateLevel { .. })
    ));

    let out = MemorySink::new();
    let err = MemorySink::new();
    let mut logger = Logger::builder()
        .registry(std::sync::Arc::new(registry))
        .level_name("error")
        .stdout(out.clone())
        .stderr(err.clone())
        .format("{level}:{message}")
        .build()
        .unwrap();

    logger.log_named("trace", "hidden").unwrap();
    logger.log_named("fatal", "boom").unwrap();
    assert!(out.is_empty());
    assert_eq!(err.lines(), ["fatal:boom"]);
}
