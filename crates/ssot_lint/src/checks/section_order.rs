use super::*;

use std::collections::HashMap;

/// Canonical `##` sections, in the order every document must present them.
pub const REQUIRED_SECTIONS: [&str; 10] = [
    "Agent Contract",
    "TL;DR",
    "Canonical Definitions",
    "Core Patterns",
    "Decision Checklist",
    "Anti-patterns / Pitfalls",
    "Evaluation",
    "Update Log",
    "See Also",
    "References",
];

/// Section allowed only strictly between `Evaluation` and `Update Log`.
pub const OPTIONAL_SECTION: &str = "Practical Examples";

const NORMATIVE_DOCUMENT: &str = "SSOT.md";
const NORMATIVE_TOKENS: [&str; 3] = ["BCP 14", "RFC 2119", "RFC 8174"];

pub(super) fn lint(document: &Document) -> Vec<Violation> {
    let path = document.path();
    let mut positions: HashMap<String, usize> = HashMap::new();
    for (idx, heading) in extract_headings(document.text())
        .into_iter()
        .filter(|h| h.level == 2)
        .enumerate()
    {
        positions.entry(heading.text).or_insert(idx);
    }

    let missing: Vec<String> = REQUIRED_SECTIONS
        .iter()
        .filter(|name| !positions.contains_key(**name))
        .map(|name| format!("## {name}"))
        .collect();
    if !missing.is_empty() {
        return vec![Violation::new(
            Check::SectionOrder,
            path,
            format!("missing required headings: {}", missing.join(", ")),
        )];
    }

    let position = |name: &str| positions.get(name).copied().unwrap_or_default();
    let mut violations = Vec::new();

    if let Some(pair) = REQUIRED_SECTIONS
        .windows(2)
        .find(|pair| position(pair[0]) >= position(pair[1]))
    {
        violations.push(Violation::new(
            Check::SectionOrder,
            path,
            format!("section order violation at '## {}'", pair[0]),
        ));
    }

    if let Some(&optional) = positions.get(OPTIONAL_SECTION) {
        if !(position("Evaluation") < optional && optional < position("Update Log")) {
            violations.push(Violation::new(
                Check::SectionOrder,
                path,
                format!(
                    "'## {OPTIONAL_SECTION}' must appear between '## Evaluation' and '## Update Log'"
                ),
            ));
        }
    }

    if document.file_name() == Some(NORMATIVE_DOCUMENT) {
        if let Some(token) = NORMATIVE_TOKENS
            .iter()
            .find(|token| !document.text().contains(**token))
        {
            violations.push(Violation::new(
                Check::SectionOrder,
                path,
                format!("missing '{token}' in Normative Keywords section"),
            ));
        }
    }

    violations
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn canonical(sections: &[&str]) -> String {
        sections
            .iter()
            .map(|name| format!("## {name}\n\nBody.\n"))
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn with_optional() -> Vec<&'static str> {
        let mut sections = REQUIRED_SECTIONS.to_vec();
        sections.insert(7, OPTIONAL_SECTION);
        sections
    }

    fn messages(name: &str, text: &str) -> Vec<String> {
        lint(&Document::new(name, text))
            .into_iter()
            .map(|v| v.message())
            .collect()
    }

    #[test]
    fn canonical_document_with_optional_section_passes() {
        assert_eq!(messages("a.md", &canonical(&with_optional())), Vec::<String>::new());
    }

    #[test]
    fn swapped_sections_report_the_first_out_of_place_heading() {
        let mut sections = REQUIRED_SECTIONS.to_vec();
        sections.swap(2, 3);
        assert_eq!(
            messages("a.md", &canonical(&sections)),
            vec!["section order violation at '## Canonical Definitions'"]
        );
    }

    #[test]
    fn only_the_first_inversion_is_reported() {
        let mut sections = REQUIRED_SECTIONS.to_vec();
        sections.swap(2, 3);
        let agent_contract = sections.remove(0);
        sections.push(agent_contract);
        assert_eq!(
            messages("a.md", &canonical(&sections)),
            vec!["section order violation at '## Agent Contract'"]
        );
    }

    #[test]
    fn missing_sections_are_listed_together() {
        let sections: Vec<_> = REQUIRED_SECTIONS
            .iter()
            .copied()
            .filter(|name| *name != "TL;DR" && *name != "See Also")
            .collect();
        assert_eq!(
            messages("a.md", &canonical(&sections)),
            vec!["missing required headings: ## TL;DR, ## See Also"]
        );
    }

    #[test]
    fn optional_section_outside_its_slot_is_reported() {
        let mut sections = REQUIRED_SECTIONS.to_vec();
        sections.insert(2, OPTIONAL_SECTION);
        assert_eq!(
            messages("a.md", &canonical(&sections)),
            vec!["'## Practical Examples' must appear between '## Evaluation' and '## Update Log'"]
        );
    }

    #[test]
    fn fenced_headings_do_not_count() {
        let mut text = canonical(&REQUIRED_SECTIONS);
        text = text.replace("## Evaluation\n", "```\n## Evaluation\n```\n");
        assert_eq!(
            messages("a.md", &text),
            vec!["missing required headings: ## Evaluation"]
        );
    }

    #[test]
    fn later_duplicates_do_not_move_first_occurrence() {
        let mut text = canonical(&REQUIRED_SECTIONS);
        text.push_str("\n## TL;DR\n");
        assert_eq!(messages("a.md", &text), Vec::<String>::new());
    }

    #[test]
    fn ssot_document_needs_normative_tokens() {
        let mut text = canonical(&REQUIRED_SECTIONS);
        text.push_str("\nKeywords per BCP 14 and RFC 8174.\n");
        assert_eq!(
            messages("SSOT.md", &text),
            vec!["missing 'RFC 2119' in Normative Keywords section"]
        );
        assert_eq!(messages("other.md", &text), Vec::<String>::new());

        text.push_str("See RFC 2119.\n");
        assert_eq!(messages("SSOT.md", &text), Vec::<String>::new());
    }
}
