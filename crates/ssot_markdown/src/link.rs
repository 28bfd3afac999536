//! Inline link extraction and target normalization.

/// Target prefixes that point outside the repository.
pub const EXTERNAL_PREFIXES: &[&str] = &["http://", "https://", "mailto:", "tel:"];

/// A normalized inline link target.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum LinkTarget {
    /// Nothing left after normalization.
    Empty,
    /// In-page anchor such as `#usage`.
    Fragment(String),
    /// Known external scheme (`https://`, `mailto:`, ...).
    External(String),
    /// Path part containing a colon that is not explicitly relative, e.g. `C:/x` or `urn:x`.
    Opaque(String),
    /// Filesystem path relative to the containing document.
    Relative {
        /// Target as written, after normalization.
        written: String,
        /// Path part before any `#`.
        path: String,
    },
}

impl LinkTarget {
    /// Normalize a raw `(...)` link target.
    ///
    /// Unless the target is angle-bracketed, anything after the first whitespace is an inline
    /// title and is dropped. Surrounding angle brackets are then trimmed.
    pub fn parse(raw: &str) -> Self {
        let mut target = raw.trim();
        if !target.starts_with('<') {
            if let Some(idx) = target.find(char::is_whitespace) {
                target = &target[..idx];
            }
        }
        let target = target.trim_matches(|c| c == '<' || c == '>');

        if target.is_empty() {
            return Self::Empty;
        }
        if target.starts_with('#') {
            return Self::Fragment(target.to_string());
        }
        if EXTERNAL_PREFIXES.iter().any(|p| target.starts_with(p)) {
            return Self::External(target.to_string());
        }

        let path = target.split_once('#').map_or(target, |(path, _)| path);
        if path.contains(':') && !path.starts_with("./") && !path.starts_with("../") {
            return Self::Opaque(target.to_string());
        }

        Self::Relative {
            written: target.to_string(),
            path: path.to_string(),
        }
    }
}

/// A raw inline link as written in the source.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct InlineLink<'a> {
    /// Text between `[` and `]`.
    pub label: &'a str,
    /// Raw text between `(` and `)`.
    pub target: &'a str,
}

/// Extract `[label](target)` links from `text`, images included.
///
/// The label runs to the first `]` and the target to the first `)`; the target must be
/// non-empty. Matching resumes after each accepted link.
pub fn extract_links(text: &str) -> Vec<InlineLink<'_>> {
    let bytes = text.as_bytes();
    let mut out = Vec::new();
    let mut i = 0usize;

    while i < bytes.len() {
        if bytes[i] != b'[' {
            i += 1;
            continue;
        }
        let Some(label_end) = find_byte(bytes, b']', i + 1) else {
            break;
        };
        if bytes.get(label_end + 1) != Some(&b'(') {
            i += 1;
            continue;
        }
        let target_start = label_end + 2;
        match find_byte(bytes, b')', target_start) {
            Some(target_end) if target_end > target_start => {
                out.push(InlineLink {
                    label: &text[i + 1..label_end],
                    target: &text[target_start..target_end],
                });
                i = target_end + 1;
            }
            _ => i += 1,
        }
    }

    out
}

fn find_byte(bytes: &[u8], target: u8, start: usize) -> Option<usize> {
    bytes
        .get(start..)?
        .iter()
        .position(|b| *b == target)
        .map(|offset| start + offset)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn targets(text: &str) -> Vec<&str> {
        extract_links(text).into_iter().map(|link| link.target).collect()
    }

    #[test]
    fn extract_links_finds_links_and_images() {
        let text = "See [a](./a.md) and ![img](img.png \"Title\").\n[b](../b.md#part)";
        assert_eq!(
            targets(text),
            vec!["./a.md", "img.png \"Title\"", "../b.md#part"]
        );
    }

    #[test]
    fn extract_links_skips_reference_style_and_empty_targets() {
        let text = "[R1] cited, [empty]() and [label] [ok](x.md)";
        assert_eq!(targets(text), vec!["x.md"]);
    }

    #[test]
    fn extract_links_keeps_labels() {
        assert_eq!(
            extract_links("- [Core Patterns](#core-patterns)"),
            vec![InlineLink {
                label: "Core Patterns",
                target: "#core-patterns",
            }]
        );
    }

    #[test]
    fn extract_links_label_may_contain_open_bracket() {
        assert_eq!(targets("[a [b](c.md)"), vec!["c.md"]);
    }

    #[test]
    fn parse_drops_inline_titles_and_angle_brackets() {
        assert_eq!(
            LinkTarget::parse("./guide.md \"Guide\""),
            LinkTarget::Relative {
                written: "./guide.md".into(),
                path: "./guide.md".into(),
            }
        );
        assert_eq!(
            LinkTarget::parse("<dir with space/file.md#top>"),
            LinkTarget::Relative {
                written: "dir with space/file.md#top".into(),
                path: "dir with space/file.md".into(),
            }
        );
    }

    #[test]
    fn parse_classifies_non_filesystem_targets() {
        assert_eq!(LinkTarget::parse("  "), LinkTarget::Empty);
        assert_eq!(
            LinkTarget::parse("#anchor"),
            LinkTarget::Fragment("#anchor".into())
        );
        assert_eq!(
            LinkTarget::parse("https://example.com"),
            LinkTarget::External("https://example.com".into())
        );
        assert_eq!(
            LinkTarget::parse("mailto:someone@example.com"),
            LinkTarget::External("mailto:someone@example.com".into())
        );
        assert_eq!(
            LinkTarget::parse("C:/docs/a.md"),
            LinkTarget::Opaque("C:/docs/a.md".into())
        );
    }

    #[test]
    fn parse_keeps_colons_in_explicitly_relative_paths() {
        assert_eq!(
            LinkTarget::parse("./notes:draft.md"),
            LinkTarget::Relative {
                written: "./notes:draft.md".into(),
                path: "./notes:draft.md".into(),
            }
        );
    }

    #[test]
    fn parse_treats_empty_path_before_fragment_as_fragment() {
        assert_eq!(LinkTarget::parse("<#x>"), LinkTarget::Fragment("#x".into()));
    }
}
