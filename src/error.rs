use std::fmt;
use thiserror::Error;

/// Result type for scan operations
pub type Result<T> = std::result::Result<T, ScanError>;

/// Errors that abort the processing of a single header.
///
/// Once one of these is raised the scanner's position tracking can no longer
/// be trusted, so no document is produced for the file.
#[derive(Error, Debug)]
pub enum ScanError {
    /// A fixed keyword or identifier was required but something else was found
    #[error("line {line}: expected {expected}, found `{found}`")]
    UnexpectedToken {
        line: usize,
        expected: &'static str,
        found: String,
    },

    /// `#elif`, `#else` or `#endif` with no open conditional on top of the scope stack
    #[error("line {line}: `{directive}` does not match an open conditional")]
    UnbalancedDirective { line: usize, directive: String },

    /// A conditional block is still open when its enclosing scope ends
    #[error("conditional opened at line {line} is never closed")]
    UnterminatedConditional { line: usize },

    /// The syntax tree could not be produced
    #[error("Parse error: {0}")]
    Parse(String),

    /// IO error occurred
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ScanError {
    pub fn unexpected(line: usize, expected: &'static str, found: impl Into<String>) -> Self {
        Self::UnexpectedToken {
            line,
            expected,
            found: found.into(),
        }
    }

    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }
}

/// A best-effort finding reported while scanning; never aborts the file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// 1-based source line
    pub line: usize,
    pub kind: DiagnosticKind,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiagnosticKind {
    /// A node no classification rule recognises
    UnhandledNode { kind: String, text: String },
    /// A default parameter value that is neither a string nor a number literal
    UnsupportedDefault { kind: String },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            DiagnosticKind::UnhandledNode { kind, text } => {
                write!(f, "line {}: unhandled {} `{}`", self.line, kind, text)
            }
            DiagnosticKind::UnsupportedDefault { kind } => write!(
                f,
                "line {}: default value of kind {} is not supported",
                self.line, kind
            ),
        }
    }
}
