//! Reporting channels for diagnostics.
//!
//! A reporter is a one-way sink: it receives each [`Diagnostic`] as soon as
//! it is produced and must not block the caller.

use crate::diagnostic::Diagnostic;
use std::fmt;
use std::io::{self, Write};
use std::sync::{Arc, Mutex, PoisonError};

/// Sink for diagnostics
pub trait Reporter: Send + Sync {
    /// Emit one diagnostic
    fn report(&self, diagnostic: &Diagnostic);
}

/// Emits diagnostics as `tracing` warnings (the default channel)
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingReporter;

impl Reporter for TracingReporter {
    fn report(&self, diagnostic: &Diagnostic) {
        tracing::warn!(
            component = %diagnostic.component_name,
            prop = %diagnostic.prop_name,
            kind = diagnostic.kind.label(),
            "{}",
            diagnostic
        );
    }
}

/// Writes each message as a line on standard error, unprefixed
#[derive(Debug, Clone, Copy, Default)]
pub struct StderrReporter;

impl StderrReporter {
    fn write_line(out: &mut impl Write, diagnostic: &Diagnostic) -> io::Result<()> {
        writeln!(out, "{diagnostic}")
    }
}

impl Reporter for StderrReporter {
    fn report(&self, diagnostic: &Diagnostic) {
        // A closed stderr must not reach the caller.
        let _ = Self::write_line(&mut io::stderr().lock(), diagnostic);
    }
}

/// Collects diagnostics in memory.
///
/// Clones share the same buffer, so a test can keep one handle and give the
/// other to the controller.
#[derive(Debug, Clone, Default)]
pub struct MemoryReporter {
    entries: Arc<Mutex<Vec<Diagnostic>>>,
}

impl MemoryReporter {
    /// Create an empty reporter
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of every diagnostic received so far
    #[must_use]
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Rendered messages, in emission order
    #[must_use]
    pub fn messages(&self) -> Vec<String> {
        self.diagnostics().iter().map(Diagnostic::message).collect()
    }

    /// Number of diagnostics received
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Check if nothing was reported
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop everything collected so far
    pub fn clear(&self) {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

impl Reporter for MemoryReporter {
    fn report(&self, diagnostic: &Diagnostic) {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(diagnostic.clone());
    }
}

/// Forwards each rendered message to a closure
pub struct FnReporter<F> {
    sink: F,
}

impl<F> FnReporter<F>
where
    F: Fn(&str) + Send + Sync,
{
    /// Wrap a closure
    pub const fn new(sink: F) -> Self {
        Self { sink }
    }
}

impl<F> fmt::Debug for FnReporter<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnReporter").finish_non_exhaustive()
    }
}

impl<F> Reporter for FnReporter<F>
where
    F: Fn(&str) + Send + Sync,
{
    fn report(&self, diagnostic: &Diagnostic) {
        (self.sink)(&diagnostic.message());
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_memory_reporter_shares_buffer() {
        let reporter = MemoryReporter::new();
        let handle = reporter.clone();
        reporter.report(&Diagnostic::undeclared("Card", "bang"));
        assert_eq!(handle.len(), 1);
        assert!(handle.messages()[0].starts_with("Card: received prop \"bang\""));
        handle.clear();
        assert!(reporter.is_empty());
    }

    #[test]
    fn test_fn_reporter_receives_message() {
        let calls = Arc::new(AtomicUsize::new(0));
        let seen = Arc::clone(&calls);
        let reporter = FnReporter::new(move |message: &str| {
            assert!(message.contains("Maybe you meant \"foobar\""));
            seen.fetch_add(1, Ordering::SeqCst);
        });
        reporter.report(&Diagnostic::similarity("X", "foobbar", "foobar"));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_stderr_line_is_message_verbatim() {
        let d = Diagnostic::similarity("Toggle", "chekced", "checked");
        let mut out = Vec::new();
        StderrReporter::write_line(&mut out, &d).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), format!("{}\n", d.message()));
        assert_eq!(
            d.message(),
            "Toggle: received prop \"chekced\". Maybe you meant \"checked\"?"
        );
    }

    #[test]
    fn test_tracing_and_stderr_reporters_do_not_panic() {
        let d = Diagnostic::similarity("X", "a", "b");
        TracingReporter.report(&d);
        StderrReporter.report(&d);
    }
}
