//! ATX heading extraction.

use crate::fence::classify_lines;

/// An ATX heading found outside code regions.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Heading {
    /// Heading level, 1 through 6.
    pub level: u8,
    /// Heading text with surrounding whitespace trimmed.
    pub text: String,
    /// 1-based line number.
    pub line: usize,
}

/// Parse `line` as an ATX heading, returning its level and trimmed text.
///
/// The line must start at column 0 with one to six `#` characters followed by whitespace and
/// non-empty text.
pub fn parse_heading(line: &str) -> Option<(u8, &str)> {
    let bytes = line.as_bytes();
    let count = bytes.iter().take_while(|b| **b == b'#').count();
    if count == 0 || count > 6 {
        return None;
    }
    let rest = &line[count..];
    if !rest.chars().next().is_some_and(char::is_whitespace) {
        return None;
    }
    let text = rest.trim();
    if text.is_empty() {
        return None;
    }
    u8::try_from(count).ok().map(|level| (level, text))
}

/// Collect every heading of `text` in document order, skipping code regions.
pub fn extract_headings(text: &str) -> Vec<Heading> {
    classify_lines(text)
        .into_iter()
        .filter(|line| !line.class.is_code())
        .filter_map(|line| {
            parse_heading(line.text).map(|(level, heading)| Heading {
                level,
                text: heading.to_string(),
                line: line.number,
            })
        })
        .collect()
}

/// Find the first non-code line that is a level-2 heading with exactly `title`.
///
/// Returns the 0-based line index so callers can split the raw text around it.
pub fn find_h2(text: &str, title: &str) -> Option<usize> {
    classify_lines(text)
        .into_iter()
        .filter(|line| !line.class.is_code())
        .find(|line| parse_heading(line.text) == Some((2, title)))
        .map(|line| line.number - 1)
}
