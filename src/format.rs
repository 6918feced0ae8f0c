use std::collections::HashMap;
use std::fmt::Write;

use crate::error::SiftError;
use crate::types::MatchedLine;

const HIGHLIGHT_START: &str = "\x1b[95m";
const HIGHLIGHT_END: &str = "\x1b[0m";

/// Which output shape the run produces. Chosen once per invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormatKind {
    Default,
    Color,
    Underscore,
    Machine,
}

impl std::fmt::Display for FormatKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Default => write!(f, "default"),
            Self::Color => write!(f, "color"),
            Self::Underscore => write!(f, "underscore"),
            Self::Machine => write!(f, "machine"),
        }
    }
}

/// Renders one matched line. Returns a single string, possibly with embedded
/// newlines. Only invoked when the interval list is non-empty.
pub trait LineFormatter: std::fmt::Debug {
    fn format(&self, line: &MatchedLine<'_>) -> String;
}

/// `source:lineNumber:line` — matches are not visually distinguished.
#[derive(Debug)]
pub struct DefaultFormatter;

impl LineFormatter for DefaultFormatter {
    fn format(&self, line: &MatchedLine<'_>) -> String {
        format!("{}:{}:{}", line.source, line.line_number, line.text)
    }
}

/// `source:lineNumber:line` with each matched span wrapped in highlight
/// escapes. Unmatched spans pass through verbatim.
#[derive(Debug)]
pub struct ColorFormatter;

impl LineFormatter for ColorFormatter {
    fn format(&self, line: &MatchedLine<'_>) -> String {
        let mut out = format!("{}:{}:", line.source, line.line_number);
        let mut last_end = 0;
        for iv in line.matches {
            out.push_str(&line.text[last_end..iv.start]);
            out.push_str(HIGHLIGHT_START);
            out.push_str(&line.text[iv.start..iv.end]);
            out.push_str(HIGHLIGHT_END);
            last_end = iv.end;
        }
        out.push_str(&line.text[last_end..]);
        out
    }
}

/// The default line plus a second line of equal length carrying `^` under
/// every matched character. Caret positions account for the
/// `source:lineNumber:` prefix.
#[derive(Debug)]
pub struct UnderscoreFormatter;

impl LineFormatter for UnderscoreFormatter {
    fn format(&self, line: &MatchedLine<'_>) -> String {
        let prefix = format!("{}:{}:", line.source, line.line_number);
        let mut out =
            String::with_capacity((prefix.len() + line.text.len()) * 2 + 1);
        out.push_str(&prefix);
        out.push_str(line.text);
        out.push('\n');
        for _ in prefix.chars() {
            out.push(' ');
        }
        // One caret per character, keyed by its byte offset, so alignment
        // holds for multi-byte text too.
        for (offset, _) in line.text.char_indices() {
            let marked = line.matches.iter().any(|iv| iv.contains(offset));
            out.push(if marked { '^' } else { ' ' });
        }
        out
    }
}

/// One line per match: `source:lineNumber:matchStart:matchedText`.
#[derive(Debug)]
pub struct MachineFormatter;

impl LineFormatter for MachineFormatter {
    fn format(&self, line: &MatchedLine<'_>) -> String {
        let mut out = String::new();
        for (i, iv) in line.matches.iter().enumerate() {
            if i > 0 {
                out.push('\n');
            }
            let _ = write!(
                out,
                "{}:{}:{}:{}",
                line.source,
                line.line_number,
                iv.start,
                &line.text[iv.start..iv.end]
            );
        }
        out
    }
}

type FormatterFactory = fn() -> Box<dyn LineFormatter>;

/// Selector → formatter-constructor map. Built once at startup and passed
/// down explicitly; holds no scan state.
pub struct FormatterRegistry {
    formatters: HashMap<FormatKind, FormatterFactory>,
}

impl FormatterRegistry {
    /// An empty registry. Resolving anything against it fails.
    #[must_use]
    pub fn new() -> Self {
        Self {
            formatters: HashMap::new(),
        }
    }

    /// A registry with all four variants registered.
    #[must_use]
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(FormatKind::Default, || Box::new(DefaultFormatter));
        registry.register(FormatKind::Color, || Box::new(ColorFormatter));
        registry.register(FormatKind::Underscore, || Box::new(UnderscoreFormatter));
        registry.register(FormatKind::Machine, || Box::new(MachineFormatter));
        registry
    }

    pub fn register(&mut self, kind: FormatKind, factory: FormatterFactory) {
        self.formatters.insert(kind, factory);
    }

    /// Instantiate the formatter for `kind`. Fails if the selector was never
    /// registered — a configuration error, checked before scanning begins.
    pub fn resolve(&self, kind: FormatKind) -> Result<Box<dyn LineFormatter>, SiftError> {
        self.formatters
            .get(&kind)
            .map(|factory| factory())
            .ok_or(SiftError::UnknownFormat { selector: kind })
    }
}

impl Default for FormatterRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::MatchInterval;

    fn sample<'a>(matches: &'a [MatchInterval]) -> MatchedLine<'a> {
        MatchedLine {
            source: "myfilename",
            line_number: 1,
            text: "text mypattern text mypattern",
            matches,
        }
    }

    #[test]
    fn default_output_is_bit_exact() {
        let matches = [MatchInterval::new(5, 14), MatchInterval::new(20, 29)];
        assert_eq!(
            DefaultFormatter.format(&sample(&matches)),
            "myfilename:1:text mypattern text mypattern"
        );
    }

    #[test]
    fn color_output_wraps_each_match() {
        let matches = [MatchInterval::new(5, 14), MatchInterval::new(20, 29)];
        assert_eq!(
            ColorFormatter.format(&sample(&matches)),
            "myfilename:1:text \x1b[95mmypattern\x1b[0m text \x1b[95mmypattern\x1b[0m"
        );
    }

    #[test]
    fn underscore_output_places_carets_under_matches() {
        let matches = [MatchInterval::new(5, 14), MatchInterval::new(20, 29)];
        let expected = "myfilename:1:text mypattern text mypattern\n\
                        \u{20}                 ^^^^^^^^^      ^^^^^^^^^";
        assert_eq!(UnderscoreFormatter.format(&sample(&matches)), expected);
    }

    #[test]
    fn underscore_caret_line_matches_first_line_length() {
        let matches = [MatchInterval::new(0, 4)];
        let line = MatchedLine {
            source: "f",
            line_number: 12,
            text: "text and more",
            matches: &matches,
        };
        let out = UnderscoreFormatter.format(&line);
        let (first, second) = out.split_once('\n').unwrap();
        assert_eq!(first.chars().count(), second.chars().count());
        assert_eq!(second.trim_end(), "     ^^^^");
    }

    #[test]
    fn machine_output_is_one_line_per_match() {
        let matches = [MatchInterval::new(5, 14), MatchInterval::new(20, 29)];
        assert_eq!(
            MachineFormatter.format(&sample(&matches)),
            "myfilename:1:5:mypattern\nmyfilename:1:20:mypattern"
        );
    }

    #[test]
    fn machine_output_single_match_has_no_trailing_newline() {
        let matches = [MatchInterval::new(5, 14)];
        assert_eq!(
            MachineFormatter.format(&sample(&matches)),
            "myfilename:1:5:mypattern"
        );
    }

    #[test]
    fn registry_resolves_every_default_variant() {
        let registry = FormatterRegistry::with_defaults();
        for kind in [
            FormatKind::Default,
            FormatKind::Color,
            FormatKind::Underscore,
            FormatKind::Machine,
        ] {
            assert!(registry.resolve(kind).is_ok(), "unresolved: {kind}");
        }
    }

    #[test]
    fn resolving_an_unregistered_selector_fails() {
        let mut registry = FormatterRegistry::new();
        registry.register(FormatKind::Default, || Box::new(DefaultFormatter));

        let err = registry.resolve(FormatKind::Machine).unwrap_err();
        assert!(matches!(
            err,
            SiftError::UnknownFormat {
                selector: FormatKind::Machine
            }
        ));
        assert_eq!(err.to_string(), "no formatter registered for \"machine\"");
    }

    #[test]
    fn resolved_formatters_are_fresh_instances() {
        let registry = FormatterRegistry::with_defaults();
        let matches = [MatchInterval::new(0, 4)];
        let line = sample(&matches);
        let a = registry.resolve(FormatKind::Default).unwrap();
        let b = registry.resolve(FormatKind::Default).unwrap();
        assert_eq!(a.format(&line), b.format(&line));
    }
}
