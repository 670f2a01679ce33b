//! Segment name extraction from SQL statements
//!
//! Names are pulled from the line that opens a segment using a short,
//! priority-ordered list of keyword phrases. The heuristic is deliberately
//! shallow: quoted identifiers, schema-qualified names and `IF [NOT] EXISTS`
//! modifiers yield no name, and the caller falls back to positional naming.

use regex::Regex;
use std::sync::OnceLock;

/// Keyword phrases in priority order
const KEYWORD_PHRASES: &[&str] = &[
    "CREATE TABLE",
    "CREATE VIEW",
    "CREATE FUNCTION",
    "CREATE PROCEDURE",
    "DROP TABLE",
];

/// Modifier keyword that may follow a phrase but is never a name
const IF_KEYWORD: &str = "IF";

static NAME_PATTERNS: OnceLock<Vec<NamePattern>> = OnceLock::new();

/// A keyword phrase paired with the rule capturing the identifier after it
#[derive(Debug)]
struct NamePattern {
    phrase: &'static str,
    capture: Regex,
}

impl NamePattern {
    fn new(phrase: &'static str) -> Result<Self, regex::Error> {
        let capture = Regex::new(&format!(r"{}\s+(\w+)(?:$|[^.\w])", regex::escape(phrase)))?;
        Ok(Self { phrase, capture })
    }

    fn capture<'a>(&self, line: &'a str) -> Option<&'a str> {
        let name = self.capture.captures(line)?.get(1)?.as_str();
        if name.eq_ignore_ascii_case(IF_KEYWORD) {
            return None;
        }
        log::trace!("{} matched name '{}'", self.phrase, name);
        Some(name)
    }
}

fn compile_patterns() -> Result<Vec<NamePattern>, regex::Error> {
    KEYWORD_PHRASES.iter().copied().map(NamePattern::new).collect()
}

/// Extracts object names from segment-opening lines
#[derive(Debug, Clone, Copy)]
pub struct NameExtractor {
    patterns: &'static [NamePattern],
}

impl Default for NameExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl NameExtractor {
    /// Create an extractor over the built-in keyword phrases
    pub fn new() -> Self {
        let patterns = NAME_PATTERNS
            .get_or_init(|| compile_patterns().expect("Failed to compile built-in name patterns"));
        Self { patterns }
    }

    /// Extract the identifier following the first matching keyword phrase
    pub fn extract(&self, line: &str) -> Option<String> {
        self.patterns
            .iter()
            .find_map(|pattern| pattern.capture(line))
            .map(str::to_string)
    }
}
