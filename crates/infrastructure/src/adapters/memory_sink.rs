//! In-memory diagnostic sink

use std::sync::Arc;

use apiprobe_application::ports::DiagnosticSink;
use parking_lot::Mutex;

/// Collects traces in memory so tests can assert on them.
///
/// Clones share the same buffer.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    traces: Arc<Mutex<Vec<String>>>,
}

impl MemorySink {
    /// Creates an empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// All traces written so far, oldest first.
    #[must_use]
    pub fn traces(&self) -> Vec<String> {
        self.traces.lock().clone()
    }

    /// The most recent trace.
    #[must_use]
    pub fn last(&self) -> Option<String> {
        self.traces.lock().last().cloned()
    }

    /// Number of traces written.
    #[must_use]
    pub fn len(&self) -> usize {
        self.traces.lock().len()
    }

    /// Returns true if nothing was written.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.traces.lock().is_empty()
    }

    /// Removes and returns every trace.
    pub fn drain(&self) -> Vec<String> {
        std::mem::take(&mut *self.traces.lock())
    }
}

impl DiagnosticSink for MemorySink {
    fn write(&self, text: &str) {
        self.traces.lock().push(text.to_string());
    }
}
