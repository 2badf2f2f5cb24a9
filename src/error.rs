//! Error types and the error sink shared by the parser and the generator.
//!
//! Fatal conditions (`InputUnreadable`, `OutputUnwritable`) abort the current
//! operation and are reported both through the returned [`Result`] and the
//! [`ErrorSink`]. Recoverable problems (malformed tokens or operators) only
//! produce sink warnings; parsing continues past them.

/// Result type alias for conversion operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur during PostScript parsing and PDF generation.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The PostScript input could not be opened or read.
    #[error("cannot read PostScript input '{path}': {source}")]
    InputUnreadable {
        /// Path of the unreadable input file
        path: String,
        /// Underlying I/O failure
        source: std::io::Error,
    },

    /// The PDF output destination could not be created or written.
    #[error("cannot write PDF output '{path}': {source}")]
    OutputUnwritable {
        /// Path of the unwritable output file
        path: String,
        /// Underlying I/O failure
        source: std::io::Error,
    },

    /// A lexical token could not be interpreted (recoverable).
    #[error("malformed token '{0}'")]
    MalformedToken(String),

    /// An operator was seen without its required operands (recoverable).
    #[error("operator '{op}' skipped: {reason}")]
    MalformedOperator {
        /// The operator spelling as it appeared in the input
        op: String,
        /// Why the operator could not be applied
        reason: String,
    },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Numeric error codes reported through the [`ErrorSink`] on fatal failures.
///
/// The codes match the ones the conversion front ends have historically
/// surfaced to callers.
pub mod code {
    /// Input file could not be opened.
    pub const INPUT_OPEN_FAILED: i32 = -1;
    /// PostScript parsing aborted.
    pub const PARSE_FAILED: i32 = -2;
    /// PDF object graph construction failed.
    pub const PDF_CREATE_FAILED: i32 = -3;
    /// Output file could not be created.
    pub const OUTPUT_OPEN_FAILED: i32 = -4;
    /// Writing the assembled PDF failed.
    pub const PDF_WRITE_FAILED: i32 = -5;
}

/// Severity of a message recorded in the [`ErrorSink`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Informational progress message
    Info,
    /// Recoverable problem; the offending input was skipped
    Warning,
    /// Operation-level failure
    Error,
    /// Unrecoverable failure
    Fatal,
}

/// Collects the fatal error and log lines for one conversion.
///
/// An explicit sink value is passed into every parse/generate call instead of
/// a process-wide singleton, so independent conversions never share mutable
/// state. Messages are mirrored to the `log` facade as they are recorded.
#[derive(Debug, Default)]
pub struct ErrorSink {
    fatal: Option<(i32, String)>,
    entries: Vec<(String, Severity)>,
}

impl ErrorSink {
    /// Create an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a fatal `(code, message)` pair.
    ///
    /// The first fatal error wins; later calls only add a log entry so the
    /// most specific failure stays visible to the caller.
    pub fn set_error(&mut self, code: i32, message: impl Into<String>) {
        let message = message.into();
        log::error!("{}", message);
        self.entries.push((message.clone(), Severity::Error));
        if self.fatal.is_none() {
            self.fatal = Some((code, message));
        }
    }

    /// Record a log line with the given severity.
    pub fn log(&mut self, message: impl Into<String>, severity: Severity) {
        let message = message.into();
        match severity {
            Severity::Info => log::info!("{}", message),
            Severity::Warning => log::warn!("{}", message),
            Severity::Error | Severity::Fatal => log::error!("{}", message),
        }
        self.entries.push((message, severity));
    }

    /// Record a warning.
    pub fn warn(&mut self, message: impl Into<String>) {
        self.log(message, Severity::Warning);
    }

    /// Record an informational message.
    pub fn info(&mut self, message: impl Into<String>) {
        self.log(message, Severity::Info);
    }

    /// Whether a fatal error has been recorded.
    pub fn has_error(&self) -> bool {
        self.fatal.is_some()
    }

    /// The recorded fatal error, if any.
    pub fn error(&self) -> Option<(i32, &str)> {
        self.fatal.as_ref().map(|(code, msg)| (*code, msg.as_str()))
    }

    /// All recorded log entries in order.
    pub fn entries(&self) -> &[(String, Severity)] {
        &self.entries
    }

    /// Warning messages only, in order.
    pub fn warnings(&self) -> impl Iterator<Item = &str> {
        self.entries
            .iter()
            .filter(|(_, sev)| *sev == Severity::Warning)
            .map(|(msg, _)| msg.as_str())
    }

    /// Clear the fatal error and all log entries.
    pub fn clear(&mut self) {
        self.fatal = None;
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_fatal_error_wins() {
        let mut sink = ErrorSink::new();
        assert!(!sink.has_error());

        sink.set_error(code::INPUT_OPEN_FAILED, "cannot open a.ps");
        sink.set_error(code::PARSE_FAILED, "later failure");

        let (code, msg) = sink.error().unwrap();
        assert_eq!(code, code::INPUT_OPEN_FAILED);
        assert!(msg.contains("a.ps"));
    }

    #[test]
    fn test_warnings_do_not_set_error() {
        let mut sink = ErrorSink::new();
        sink.warn("operator 'moveto' skipped: missing operands");
        sink.info("parsing completed");

        assert!(!sink.has_error());
        assert_eq!(sink.warnings().count(), 1);
        assert_eq!(sink.entries().len(), 2);
    }

    #[test]
    fn test_clear() {
        let mut sink = ErrorSink::new();
        sink.set_error(code::OUTPUT_OPEN_FAILED, "cannot create out.pdf");
        sink.clear();
        assert!(!sink.has_error());
        assert!(sink.entries().is_empty());
    }

    #[test]
    fn test_error_display() {
        let err = Error::MalformedOperator {
            op: "rg".to_string(),
            reason: "expects 3 numeric operands".to_string(),
        };
        let msg = format!("{}", err);
        assert!(msg.contains("'rg'"));
        assert!(msg.contains("3 numeric operands"));
    }

    #[test]
    fn test_error_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Error>();
    }
}
