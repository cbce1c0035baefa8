//! Diagnostic sink that forwards traces to `tracing`.

use apiprobe_application::ports::DiagnosticSink;
use tracing::Level;

/// Target used for every forwarded trace.
pub const TRACE_TARGET: &str = "apiprobe::trace";

/// Writes each diagnostic trace as one `tracing` event.
///
/// Traces land wherever the installed subscriber sends them, which under
/// `cargo test` is the per-test captured output.
#[derive(Debug, Clone, Copy)]
pub struct TracingSink {
    level: Level,
}

impl TracingSink {
    /// Creates a sink emitting at `INFO`.
    #[must_use]
    pub const fn new() -> Self {
        Self { level: Level::INFO }
    }

    /// Creates a sink emitting at `level`.
    #[must_use]
    pub const fn at_level(level: Level) -> Self {
        Self { level }
    }

    /// Level traces are emitted at.
    #[must_use]
    pub const fn level(&self) -> Level {
        self.level
    }
}

impl Default for TracingSink {
    fn default() -> Self {
        Self::new()
    }
}

impl DiagnosticSink for TracingSink {
    fn write(&self, text: &str) {
        // `tracing` needs the level at compile time.
        match self.level {
            Level::ERROR => tracing::error!(target: TRACE_TARGET, "{text}"),
            Level::WARN => tracing::warn!(target: TRACE_TARGET, "{text}"),
            Level::INFO => tracing::info!(target: TRACE_TARGET, "{text}"),
            Level::DEBUG => tracing::debug!(target: TRACE_TARGET, "{text}"),
            Level::TRACE => tracing::trace!(target: TRACE_TARGET, "{text}"),
        }
    }
}
