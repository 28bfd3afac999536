use super::*;

use std::cmp::Ordering;
use std::collections::BTreeSet;

use ssot_markdown::frontmatter::is_iso_date;

const REFERENCES_HEADING: &str = "References";
const URL_SCHEMES: &[&str] = &["http://", "https://"];
const DATE_KEYWORDS: &[&str] = &["(retrieved", "(accessed"];

/// Citation id as written (`"7"` for `[R7]`), ordered numerically.
#[derive(Clone, Debug, Eq, PartialEq)]
struct RefId(String);

impl RefId {
    fn significant(&self) -> &str {
        let trimmed = self.0.trim_start_matches('0');
        if trimmed.is_empty() {
            "0"
        } else {
            trimmed
        }
    }
}

impl Ord for RefId {
    fn cmp(&self, other: &Self) -> Ordering {
        let (a, b) = (self.significant(), other.significant());
        a.len()
            .cmp(&b.len())
            .then_with(|| a.cmp(b))
            .then_with(|| self.0.cmp(&other.0))
    }
}

impl PartialOrd for RefId {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

struct Definition<'a> {
    id: RefId,
    line: &'a str,
}

pub(super) fn lint(document: &Document) -> Vec<Violation> {
    let text = document.text();
    let path = document.path();
    let lines: Vec<&str> = text.lines().collect();
    let split = find_h2(text, REFERENCES_HEADING);

    let body = lines[..split.unwrap_or(lines.len())].join("\n");
    let used = usages(&strip_code(&body));
    let definitions = match split {
        Some(start) => collect_definitions(text, start),
        None => Vec::new(),
    };
    let defined: BTreeSet<RefId> = definitions.iter().map(|d| d.id.clone()).collect();

    let mut violations = Vec::new();
    let undefined: Vec<&RefId> = used.difference(&defined).collect();
    if !undefined.is_empty() {
        violations.push(Violation::new(
            Check::References,
            path,
            format!("undefined references used in body: {}", join_ids(&undefined)),
        ));
    }
    let unused: Vec<&RefId> = defined.difference(&used).collect();
    if !unused.is_empty() {
        violations.push(Violation::new(
            Check::References,
            path,
            format!(
                "unused references defined (never used in body): {}",
                join_ids(&unused)
            ),
        ));
    }

    for def in &definitions {
        let line = def.line.trim();
        if !has_url(line) {
            violations.push(Violation::new(
                Check::References,
                path,
                format!("reference [R{}] missing URL: {line}", def.id.0),
            ));
        }
        if !has_retrieval_date(line) {
            violations.push(Violation::new(
                Check::References,
                path,
                format!(
                    "reference [R{}] missing '(retrieved|accessed YYYY-MM-DD)': {line}",
                    def.id.0
                ),
            ));
        }
    }

    if split.is_some() && definitions.is_empty() {
        violations.push(Violation::new(
            Check::References,
            path,
            "has '## References' but no [R##] definitions found.",
        ));
    }

    violations
}

fn join_ids(ids: &[&RefId]) -> String {
    ids.iter()
        .map(|id| format!("R{}", id.0))
        .collect::<Vec<_>>()
        .join(", ")
}

fn usages(body: &str) -> BTreeSet<RefId> {
    let mut found = BTreeSet::new();
    let mut rest = body;
    while let Some(idx) = rest.find("[R") {
        let after = &rest[idx + 2..];
        let digits = leading_digits(after);
        if digits > 0 && after.as_bytes().get(digits) == Some(&b']') {
            found.insert(RefId(after[..digits].to_string()));
        }
        rest = after;
    }
    found
}

/// Definition lines at or after 0-based line `start`, fenced lines excluded.
fn collect_definitions(text: &str, start: usize) -> Vec<Definition<'_>> {
    classify_lines(text)
        .into_iter()
        .skip(start)
        .filter(|line| !line.class.is_fenced())
        .filter_map(|line| {
            definition_id(line.text).map(|id| Definition {
                id: RefId(id.to_string()),
                line: line.text,
            })
        })
        .collect()
}

/// `- [R12] text` or `* [r12] text`, returning `"12"`.
fn definition_id(line: &str) -> Option<&str> {
    let rest = line
        .trim_start()
        .strip_prefix(['-', '*'])?
        .trim_start()
        .strip_prefix('[')?
        .strip_prefix(['R', 'r'])?;
    let digits = leading_digits(rest);
    if digits == 0 {
        return None;
    }
    let mut tail = rest[digits..].strip_prefix(']')?.chars();
    let spaced = tail.next().is_some_and(char::is_whitespace);
    (spaced && tail.next().is_some()).then(|| &rest[..digits])
}

fn leading_digits(text: &str) -> usize {
    text.bytes().take_while(u8::is_ascii_digit).count()
}

fn has_url(line: &str) -> bool {
    URL_SCHEMES.iter().any(|scheme| {
        line.match_indices(scheme).any(|(idx, _)| {
            line[idx + scheme.len()..]
                .chars()
                .next()
                .is_some_and(|c| !c.is_whitespace())
        })
    })
}

fn has_retrieval_date(line: &str) -> bool {
    let lower = line.to_ascii_lowercase();
    DATE_KEYWORDS.iter().any(|keyword| {
        lower.match_indices(keyword).any(|(idx, _)| {
            let rest = &lower[idx + keyword.len()..];
            let date = rest.trim_start();
            date.len() < rest.len() && date.get(..10).is_some_and(is_iso_date)
        })
    })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    const R1: &str = "- [R1] Spec A. https://example.com/a (retrieved 2025-01-10)";
    const R2: &str = "- [R2] Spec B. https://example.com/b (Accessed 2025-01-11)";

    fn messages(text: &str) -> Vec<String> {
        lint(&Document::new("doc.md", text))
            .into_iter()
            .map(|v| v.message())
            .collect()
    }

    fn doc(body: &str, defs: &[&str]) -> String {
        format!("# Doc\n\n{body}\n\n## References\n\n{}\n", defs.join("\n"))
    }

    #[test]
    fn used_and_defined_references_pass() {
        let text = doc("Uses [R1] and [R2].", &[R1, R2]);
        assert_eq!(messages(&text), Vec::<String>::new());
    }

    #[test]
    fn removing_a_definition_reports_it_as_undefined() {
        let text = doc("Uses [R1] and [R2].", &[R1]);
        assert_eq!(
            messages(&text),
            vec!["undefined references used in body: R2"]
        );
    }

    #[test]
    fn extra_definition_is_reported_as_unused() {
        let r3 = "* [r3] Extra. https://example.com/c (retrieved 2025-02-01)";
        let text = doc("Uses [R1] and [R2].", &[R1, R2, r3]);
        assert_eq!(
            messages(&text),
            vec!["unused references defined (never used in body): R3"]
        );
    }

    #[test]
    fn ids_sort_numerically() {
        let text = doc("[R10] [R2] [R1]", &[]);
        assert_eq!(
            messages(&text),
            vec![
                "undefined references used in body: R1, R2, R10",
                "has '## References' but no [R##] definitions found.",
            ]
        );
    }

    #[test]
    fn repeated_ids_count_once_but_each_definition_line_is_checked() {
        let mirror = "- [R1] Mirror copy (retrieved 2025-01-10)";
        let text = doc("Uses [R1], then [R1] again.", &[R1, mirror]);
        assert_eq!(
            messages(&text),
            vec!["reference [R1] missing URL: - [R1] Mirror copy (retrieved 2025-01-10)"]
        );
    }

    #[test]
    fn zero_padded_ids_are_distinct() {
        let text = doc("Uses [R01].", &[R1]);
        assert_eq!(
            messages(&text),
            vec![
                "undefined references used in body: R01",
                "unused references defined (never used in body): R1",
            ]
        );
        assert_ne!(RefId("01".into()), RefId("1".into()));
        assert!(RefId("1".into()) < RefId("01".into()));
        assert!(RefId("01".into()) < RefId("2".into()));
    }

    #[test]
    fn definitions_without_url_or_date_are_reported_per_line() {
        let text = doc("[R1]", &["- [R1] Offline book, 2nd edition"]);
        assert_eq!(
            messages(&text),
            vec![
                "reference [R1] missing URL: - [R1] Offline book, 2nd edition",
                "reference [R1] missing '(retrieved|accessed YYYY-MM-DD)': - [R1] Offline book, 2nd edition",
            ]
        );
    }

    #[test]
    fn citations_in_code_are_not_usages() {
        let text = doc("```\n[R9]\n```\n    [R8] indented\nUses [R1].", &[R1]);
        assert_eq!(messages(&text), Vec::<String>::new());
    }

    #[test]
    fn missing_references_section_reports_all_usages() {
        assert_eq!(
            messages("# Doc\n\nSee [R2] and [R1].\n"),
            vec!["undefined references used in body: R1, R2"]
        );
    }

    #[test]
    fn fenced_references_heading_does_not_split() {
        let text = format!("Uses [R1].\n```\n## References\n```\n\n## References\n\n{R1}\n");
        assert_eq!(messages(&text), Vec::<String>::new());
    }

    #[test]
    fn definition_needs_content_after_the_id() {
        assert_eq!(definition_id("- [R1] x"), Some("1"));
        assert_eq!(definition_id("  *[R22]\tbook"), Some("22"));
        assert_eq!(definition_id("- [R1]"), None);
        assert_eq!(definition_id("- [R1] "), None);
        assert_eq!(definition_id("- [R1]x"), None);
        assert_eq!(definition_id("[R1] no bullet"), None);
    }

    #[test]
    fn retrieval_dates_need_whitespace_before_the_date() {
        assert!(has_retrieval_date("(RETRIEVED 2024-12-31)"));
        assert!(!has_retrieval_date("(retrieved2024-12-31)"));
        assert!(!has_retrieval_date("(retrieved 2024-12)"));
        assert!(!has_retrieval_date("retrieved 2024-12-31"));
    }
}
