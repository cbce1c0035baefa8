//! Diagnostic sink port

/// Destination for human-readable request/response traces.
///
/// Called synchronously on the request's own call path, after the response
/// has been read.
pub trait DiagnosticSink: Send + Sync {
    /// Receives one formatted trace.
    fn write(&self, text: &str);
}

impl<F> DiagnosticSink for F
where
    F: Fn(&str) + Send + Sync,
{
    fn write(&self, text: &str) {
        self(text);
    }
}
