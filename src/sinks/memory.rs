//! In-memory capture sink

use super::Sink;
use crate::core::Result;
use parking_lot::Mutex;
use std::sync::Arc;

/// Records every write in a shared buffer.
///
/// Clones share the buffer, so a caller can hand one clone to a writer and
/// keep another to inspect the output.
///
/// ```
/// use wterm::sinks::{MemorySink, Sink};
///
/// let capture = MemorySink::new();
/// let mut sink = capture.clone();
/// sink.write_str("hello").unwrap();
/// assert_eq!(capture.contents(), "hello");
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    writes: Arc<Mutex<Vec<String>>>,
    terminal: bool,
}

impl MemorySink {
    /// A non-interactive capture sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// A capture sink that claims to be an interactive terminal.
    pub fn terminal() -> Self {
        Self {
            writes: Arc::default(),
            terminal: true,
        }
    }

    /// Everything written so far, concatenated.
    pub fn contents(&self) -> String {
        self.writes.lock().concat()
    }

    pub fn lines(&self) -> Vec<String> {
        self.contents().lines().map(String::from).collect()
    }

    /// Individual write calls, in order.
    pub fn writes(&self) -> Vec<String> {
        self.writes.lock().clone()
    }

    pub fn is_empty(&self) -> bool {
        self.writes.lock().is_empty()
    }

    pub fn clear(&self) {
        self.writes.lock().clear();
    }
}

impl Sink for MemorySink {
    fn write_str(&mut self, text: &str) -> Result<()> {
        self.writes.lock().push(text.to_string());
        Ok(())
    }

    fn is_terminal(&self) -> bool {
        self.terminal
    }

    fn flush(&mut self) -> Result<()> {
        Ok(())
    }

    fn name(&self) -> &str {
        "memory"
    }
}
