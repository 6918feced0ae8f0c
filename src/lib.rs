#![warn(clippy::pedantic)]
#![allow(
    clippy::module_name_repetitions, // Rust naming conventions
    clippy::missing_errors_doc,      // failure modes live in SiftError variants
    clippy::missing_panics_doc       // same
)]

pub mod error;
pub mod format;
pub mod matcher;
pub mod scan;
pub mod types;

use std::io::Write;
use std::path::PathBuf;

use error::SiftError;
use format::{FormatKind, FormatterRegistry};
use matcher::PatternMatcher;
use scan::Source;

/// The single public API. Compile the pattern, resolve the formatter, scan
/// every source in order, streaming formatted matches into `out`.
///
/// Both the pattern and the formatter are validated before any source is
/// opened — a bad invocation never produces partial output.
pub fn run<W: Write>(
    pattern: &str,
    files: &[PathBuf],
    format: FormatKind,
    out: &mut W,
) -> Result<(), SiftError> {
    let matcher = PatternMatcher::new(pattern)?;
    let registry = FormatterRegistry::with_defaults();
    let formatter = registry.resolve(format)?;
    let sources = Source::from_paths(files);
    scan::scan(&sources, &matcher, formatter.as_ref(), out)
}
