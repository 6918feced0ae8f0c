use std::path::PathBuf;

use crate::format::FormatKind;

/// Every error sift can produce. Displayed as user-facing messages on stderr.
#[derive(Debug)]
pub enum SiftError {
    /// The pattern is empty or does not compile in the regex dialect.
    InvalidPattern { pattern: String, reason: String },
    /// A named source could not be opened. Aborts the whole run.
    SourceOpen {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Read or write failure while a source was being scanned.
    Io {
        source_id: String,
        source: std::io::Error,
    },
    /// No formatter registered for the selector. Configuration invariant —
    /// unreachable once the default registry is in place.
    UnknownFormat { selector: FormatKind },
}

impl std::fmt::Display for SiftError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidPattern { pattern, reason } => {
                write!(f, "invalid pattern \"{pattern}\": {reason}")
            }
            Self::SourceOpen { path, source } => {
                write!(f, "{}: {source}", path.display())
            }
            Self::Io { source_id, source } => {
                write!(f, "{source_id}: {source}")
            }
            Self::UnknownFormat { selector } => {
                write!(f, "no formatter registered for \"{selector}\"")
            }
        }
    }
}

impl std::error::Error for SiftError {}

impl SiftError {
    /// Exit code reported by the binary for this failure.
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::SourceOpen { .. } | Self::Io { .. } => 2,
            Self::InvalidPattern { .. } => 3,
            Self::UnknownFormat { .. } => 4,
        }
    }
}
