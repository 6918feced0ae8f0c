use std::fs::File;
use std::io::{self, Write};
use std::path::PathBuf;

use grep_searcher::Searcher;
use grep_searcher::sinks::UTF8;
use log::debug;

use crate::error::SiftError;
use crate::format::LineFormatter;
use crate::matcher::PatternMatcher;
use crate::types::MatchedLine;

/// One input to scan: a named file, or standard input when no files were
/// given.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    Stdin,
    File(PathBuf),
}

impl Source {
    /// Map the CLI file list to sources. An empty list means read stdin.
    #[must_use]
    pub fn from_paths(paths: &[PathBuf]) -> Vec<Source> {
        if paths.is_empty() {
            vec![Source::Stdin]
        } else {
            paths.iter().cloned().map(Source::File).collect()
        }
    }

    /// Identifier used in output prefixes. Stdin follows the `-` convention.
    #[must_use]
    pub fn id(&self) -> String {
        match self {
            Self::Stdin => "-".to_string(),
            Self::File(path) => path.display().to_string(),
        }
    }
}

/// Scan each source fully, in order, streaming formatted output to `out` as
/// matching lines are found. A source that fails to open aborts the run.
pub fn scan<W: Write>(
    sources: &[Source],
    matcher: &PatternMatcher,
    formatter: &dyn LineFormatter,
    out: &mut W,
) -> Result<(), SiftError> {
    let mut searcher = Searcher::new();
    for source in sources {
        scan_source(&mut searcher, source, matcher, formatter, out)?;
    }
    Ok(())
}

/// Line numbering restarts at 1 here; no state carries over between sources.
fn scan_source<W: Write>(
    searcher: &mut Searcher,
    source: &Source,
    matcher: &PatternMatcher,
    formatter: &dyn LineFormatter,
    out: &mut W,
) -> Result<(), SiftError> {
    let id = source.id();
    debug!("scanning {id} for /{}/", matcher.pattern());

    // The searcher only surfaces lines the pattern matches; the interval
    // list is recomputed on the terminator-stripped text it hands over.
    let sink = UTF8(|line_number, line| {
        let text = trim_terminator(line);
        let intervals = matcher.find_matches(text);
        if intervals.is_empty() {
            return Ok(true);
        }
        let record = MatchedLine {
            source: &id,
            line_number,
            text,
            matches: &intervals,
        };
        writeln!(out, "{}", formatter.format(&record))?;
        Ok(true)
    });

    let result = match source {
        Source::File(path) => {
            let file = File::open(path).map_err(|e| SiftError::SourceOpen {
                path: path.clone(),
                source: e,
            })?;
            // `file` drops at the end of this arm — closed on success and
            // failure alike.
            searcher.search_file(matcher.regex(), &file, sink)
        }
        Source::Stdin => searcher.search_reader(matcher.regex(), io::stdin().lock(), sink),
    };

    result.map_err(|e| SiftError::Io {
        source_id: id,
        source: e,
    })
}

/// Strip one trailing line terminator (`\n` or `\r\n`), nothing else.
fn trim_terminator(line: &str) -> &str {
    let line = line.strip_suffix('\n').unwrap_or(line);
    line.strip_suffix('\r').unwrap_or(line)
}
