use super::*;

const TOC_HEADINGS: &[&str] = &["## Table of Contents", "## Contents"];

pub(super) fn lint(document: &Document) -> Vec<Violation> {
    let text = document.text();
    let anchors = AnchorSet::from_headings(&extract_headings(text));
    let mut violations = Vec::new();
    let mut in_toc = false;

    for line in classify_lines(text) {
        if line.class.is_fenced() {
            continue;
        }
        if !line.class.is_code() {
            if TOC_HEADINGS.contains(&line.text.trim()) {
                in_toc = true;
                continue;
            }
            if in_toc && line.text.starts_with('#') {
                in_toc = false;
                continue;
            }
        }
        if !in_toc {
            continue;
        }

        for link in extract_links(line.text) {
            let Some(anchor) = link.target.strip_prefix('#') else {
                continue;
            };
            if link.label.is_empty() || anchor.is_empty() {
                continue;
            }
            if !anchors.contains(anchor) {
                violations.push(Violation::new(
                    Check::Toc,
                    document.path(),
                    format!("TOC anchor not found: #{anchor}"),
                ));
            }
        }
    }

    violations
}
