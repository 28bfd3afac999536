//! Leading `---` frontmatter block.

const FRONTMATTER_DELIM: &str = "---";

/// Lines between a leading `---` line and the next `---` line.
///
/// Returns `None` when the document does not start with a delimiter or the block never closes.
pub fn frontmatter_lines(text: &str) -> Option<Vec<&str>> {
    let mut lines = text.lines();
    if lines.next()? != FRONTMATTER_DELIM {
        return None;
    }
    let mut block = Vec::new();
    for line in lines {
        if line == FRONTMATTER_DELIM {
            return Some(block);
        }
        block.push(line);
    }
    None
}

/// Value of the first `key: YYYY-MM-DD` line in the frontmatter block.
pub fn date_field<'a>(text: &'a str, key: &str) -> Option<&'a str> {
    frontmatter_lines(text)?.into_iter().find_map(|line| {
        let value = line.strip_prefix(key)?.strip_prefix(':')?.trim();
        is_iso_date(value).then_some(value)
    })
}

/// Whether `value` has the `YYYY-MM-DD` shape.
pub fn is_iso_date(value: &str) -> bool {
    let bytes = value.as_bytes();
    bytes.len() == 10
        && bytes.iter().enumerate().all(|(idx, b)| match idx {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        })
}
