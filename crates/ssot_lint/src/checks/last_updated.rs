use super::*;

use ssot_markdown::frontmatter::{date_field, is_iso_date};
use thiserror::Error;

const FRONTMATTER_KEY: &str = "last_updated";
const UPDATE_LOG_HEADING: &str = "Update Log";

/// Why the top Update Log entry yielded no date.
#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
pub enum TopEntryError {
    /// The document has no `## Update Log` heading outside code.
    #[error("no '## Update Log' section")]
    NoSection,
    /// Only blank lines follow the heading.
    #[error("no entries after '## Update Log'")]
    EmptySection,
    /// Another `##` heading came before any entry.
    #[error("next heading reached before any entry")]
    Heading,
    /// The first entry is not a `-` list item.
    #[error("first entry is not a list item")]
    NotBullet,
    /// The first entry is a list item without a leading `YYYY-MM-DD` date.
    #[error("first entry does not start with a YYYY-MM-DD date")]
    UndatedBullet,
}

/// Date of the first non-blank line after the `## Update Log` heading.
///
/// The line must be a `-` item whose text opens with the date, optionally bolded and optionally
/// followed by a `T..Z` time, e.g. `- **2025-01-10**: ...` or `- 2025-01-10T08:00:00Z ...`.
pub fn update_log_top_date(text: &str) -> Result<&str, TopEntryError> {
    let heading = find_h2(text, UPDATE_LOG_HEADING).ok_or(TopEntryError::NoSection)?;
    let line = text
        .lines()
        .skip(heading + 1)
        .find(|line| !line.trim().is_empty())
        .ok_or(TopEntryError::EmptySection)?;

    if line.starts_with("##") {
        return Err(TopEntryError::Heading);
    }
    if let Some(date) = dated_bullet(line) {
        return Ok(date);
    }
    if line.trim_start().starts_with('-') {
        Err(TopEntryError::UndatedBullet)
    } else {
        Err(TopEntryError::NotBullet)
    }
}

pub(super) fn lint(document: &Document) -> Option<Violation> {
    let text = document.text();
    let message = match date_field(text, FRONTMATTER_KEY) {
        None => "missing frontmatter last_updated".to_string(),
        Some(last_updated) => match update_log_top_date(text) {
            Err(err) => format!("missing or invalid Update Log top entry date ({err})"),
            Ok(top) if top == last_updated => return None,
            Ok(top) => format!(
                "last_updated '{last_updated}' does not match Update Log top date '{top}'"
            ),
        },
    };
    Some(Violation::new(Check::LastUpdated, document.path(), message))
}

fn dated_bullet(line: &str) -> Option<&str> {
    let rest = line.trim_start().strip_prefix('-')?.trim_start();
    let rest = rest.strip_prefix("**").unwrap_or(rest);
    let date = rest.get(..10).filter(|date| is_iso_date(date))?;
    let after_date = &rest[10..];

    let mut ends = vec![after_date];
    ends.extend(time_suffix(after_date));
    ends.into_iter()
        .any(|end| {
            word_boundary(true, end)
                || end
                    .strip_prefix("**")
                    .is_some_and(|after_bold| word_boundary(false, after_bold))
        })
        .then_some(date)
}

/// Text after a `T<digits and colons>Z` prefix.
fn time_suffix(text: &str) -> Option<&str> {
    let rest = text.strip_prefix('T')?;
    let len = rest
        .bytes()
        .take_while(|b| b.is_ascii_digit() || *b == b':')
        .count();
    if len == 0 {
        return None;
    }
    rest[len..].strip_prefix('Z')
}

fn word_boundary(before_is_word: bool, after: &str) -> bool {
    let after_is_word = after
        .chars()
        .next()
        .is_some_and(|c| c.is_alphanumeric() || c == '_');
    before_is_word != after_is_word
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn doc(last_updated: &str, log: &str) -> String {
        format!(
            "---\ntitle: Doc\nlast_updated: {last_updated}\n---\n\n# Doc\n\n## Update Log\n\n{log}\n\n## See Also\n"
        )
    }

    fn messages(text: &str) -> Vec<String> {
        lint(&Document::new("doc.md", text))
            .into_iter()
            .map(|v| v.message())
            .collect()
    }

    #[test]
    fn matching_dates_pass() {
        let text = doc("2025-01-10", "- **2025-01-10**: tightened wording\n- 2024-12-01: first");
        assert_eq!(messages(&text), Vec::<String>::new());
    }

    #[test]
    fn mismatch_reports_both_dates() {
        let text = doc("2025-01-09", "- **2025-01-10**: tightened wording");
        assert_eq!(
            messages(&text),
            vec!["last_updated '2025-01-09' does not match Update Log top date '2025-01-10'"]
        );
    }

    #[test]
    fn missing_frontmatter_field_is_reported_first() {
        assert_eq!(
            messages("# Doc\n\n## Update Log\n\n- 2025-01-10: x\n"),
            vec!["missing frontmatter last_updated"]
        );
        assert_eq!(
            messages("---\ntitle: x\nlast_updated: soon\n---\n"),
            vec!["missing frontmatter last_updated"]
        );
    }

    #[test]
    fn invalid_top_entries_carry_a_reason() {
        let cases = [
            (
                "---\nlast_updated: 2025-01-10\n---\n# Doc\n".to_string(),
                "no '## Update Log' section",
            ),
            (
                "---\nlast_updated: 2025-01-10\n---\n## Update Log\n\n   \n".to_string(),
                "no entries after '## Update Log'",
            ),
            (doc("2025-01-10", ""), "next heading reached before any entry"),
            (doc("2025-01-10", "Latest: 2025-01-10"), "first entry is not a list item"),
            (
                doc("2025-01-10", "- Jan 10 2025: x"),
                "first entry does not start with a YYYY-MM-DD date",
            ),
        ];
        for (text, reason) in cases {
            assert_eq!(
                messages(&text),
                vec![format!("missing or invalid Update Log top entry date ({reason})")]
            );
        }
    }

    #[test]
    fn dated_bullet_accepts_bold_and_timestamps() {
        assert_eq!(dated_bullet("- 2025-01-10: x"), Some("2025-01-10"));
        assert_eq!(dated_bullet("  -**2025-01-10**"), Some("2025-01-10"));
        assert_eq!(dated_bullet("- 2025-01-10T08:30:00Z tweak"), Some("2025-01-10"));
        assert_eq!(dated_bullet("- **2025-01-10T08:30Z**: x"), Some("2025-01-10"));
        assert_eq!(dated_bullet("- 2025-01-10"), Some("2025-01-10"));
        assert_eq!(dated_bullet("- **2025-01-10**"), Some("2025-01-10"));
    }

    #[test]
    fn dated_bullet_requires_a_word_boundary_after_the_date() {
        assert_eq!(dated_bullet("- 2025-01-101"), None);
        assert_eq!(dated_bullet("- 2025-01-10abc"), None);
        assert_eq!(dated_bullet("- **2025-01-10_x"), None);
        assert_eq!(dated_bullet("* 2025-01-10"), None);
        assert_eq!(dated_bullet("- 2025-1-10"), None);
    }

    #[test]
    fn fenced_update_log_heading_is_ignored() {
        let text = "---\nlast_updated: 2025-01-10\n---\n```\n## Update Log\n- 2025-01-10\n```\n";
        assert_eq!(update_log_top_date(text), Err(TopEntryError::NoSection));
    }
}
