use grep_matcher::Matcher;
use grep_regex::RegexMatcher;

use crate::error::SiftError;
use crate::types::MatchInterval;

/// A compiled search pattern. Compilation happens exactly once, before any
/// source is read; scanning only ever sees a valid matcher.
#[derive(Debug)]
pub struct PatternMatcher {
    regex: RegexMatcher,
    pattern: String,
}

impl PatternMatcher {
    /// Compile `pattern`. The empty pattern is rejected outright rather than
    /// matching at every position.
    pub fn new(pattern: &str) -> Result<Self, SiftError> {
        if pattern.is_empty() {
            return Err(SiftError::InvalidPattern {
                pattern: String::new(),
                reason: "pattern is empty".to_string(),
            });
        }
        let regex = RegexMatcher::new(pattern).map_err(|e| SiftError::InvalidPattern {
            pattern: pattern.to_string(),
            reason: e.to_string(),
        })?;
        Ok(Self {
            regex,
            pattern: pattern.to_string(),
        })
    }

    /// All non-overlapping matches in `line`, left to right, as byte-offset
    /// intervals. The underlying iteration advances at least one byte past a
    /// zero-length match, so patterns like `a*` terminate; zero-length
    /// matches themselves are dropped (an interval requires `start < end`).
    #[must_use]
    pub fn find_matches(&self, line: &str) -> Vec<MatchInterval> {
        let mut intervals = Vec::new();
        // RegexMatcher's matcher error is `NoError`; the Err arm cannot occur.
        let _ = self.regex.find_iter(line.as_bytes(), |m| {
            if m.start() < m.end() {
                intervals.push(MatchInterval::new(m.start(), m.end()));
            }
            true
        });
        intervals
    }

    #[must_use]
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// The compiled engine, for the line searcher.
    pub(crate) fn regex(&self) -> &RegexMatcher {
        &self.regex
    }
}
