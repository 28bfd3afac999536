use super::*;

use ssot_markdown::unclosed_fence;

pub(super) fn lint(document: &Document) -> Option<Violation> {
    let opened_at = unclosed_fence(document.text())?;
    Some(Violation::new(
        Check::Fences,
        document.path(),
        format!("unclosed fence starting at line {opened_at}"),
    ))
}
