//! Heading anchor slugs.
//!
//! The transform mirrors the renderer the documents are published with: trim, lowercase, drop
//! every character that is neither a word character, whitespace, nor `-`, then collapse each run
//! of whitespace and hyphens into a single `-` and trim hyphens from both ends. Duplicate slugs
//! within one document get `-1`, `-2`, ... suffixes in order of occurrence.

use std::collections::{HashMap, HashSet};

use crate::heading::Heading;

/// Compute the base anchor slug for heading `text`.
pub fn slugify(text: &str) -> String {
    let mut out = String::new();
    let mut pending_dash = false;

    for ch in text.trim().to_lowercase().chars() {
        if ch.is_whitespace() || ch == '-' {
            pending_dash = true;
            continue;
        }
        if !(ch.is_alphanumeric() || ch == '_') {
            continue;
        }
        if pending_dash && !out.is_empty() {
            out.push('-');
        }
        pending_dash = false;
        out.push(ch);
    }

    out
}

/// Unique anchors of one document, assigned in heading order.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct AnchorSet {
    anchors: Vec<String>,
    lookup: HashSet<String>,
}

impl AnchorSet {
    /// Build the anchor set for `headings` in document order.
    pub fn from_headings(headings: &[Heading]) -> Self {
        Self::from_texts(headings.iter().map(|h| h.text.as_str()))
    }

    /// Build the anchor set for raw heading texts in document order.
    pub fn from_texts<'a>(texts: impl IntoIterator<Item = &'a str>) -> Self {
        let mut counts: HashMap<String, usize> = HashMap::new();
        let mut set = Self::default();

        for text in texts {
            let base = slugify(text);
            let anchor = match counts.get_mut(&base) {
                Some(count) => {
                    *count += 1;
                    format!("{base}-{count}")
                }
                None => {
                    counts.insert(base.clone(), 0);
                    base
                }
            };
            set.lookup.insert(anchor.clone());
            set.anchors.push(anchor);
        }

        set
    }

    /// Whether `anchor` (without a leading `#`) exists in the document.
    pub fn contains(&self, anchor: &str) -> bool {
        self.lookup.contains(anchor)
    }

    /// Anchors in heading order, one per heading.
    pub fn anchors(&self) -> &[String] {
        &self.anchors
    }
}
