//! The structural checks and their dispatch.
//!
//! Every check is a pure function from one [`Document`] to its violations, emitted in a stable
//! per-document order. Checks never look at each other's output.

use std::fmt::{self, Display, Formatter};
use std::path::{Path, PathBuf};

use ssot_markdown::{
    classify_lines, extract_headings, extract_links, find_h2, strip_code, AnchorSet, LinkTarget,
};

use crate::document::Document;
use crate::violation::Violation;

mod fences;
mod last_updated;
mod links;
mod references;
mod section_order;
mod toc;

pub use last_updated::{update_log_top_date, TopEntryError};
pub use section_order::{OPTIONAL_SECTION, REQUIRED_SECTIONS};

/// One structural check.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum Check {
    /// Every fence opened in a document is closed.
    Fences,
    /// Table-of-contents anchors point at real headings.
    Toc,
    /// `[R<n>]` citations match the References section.
    References,
    /// Required `##` sections appear in canonical order.
    SectionOrder,
    /// Frontmatter `last_updated` matches the newest Update Log entry.
    LastUpdated,
    /// Relative link targets exist on disk.
    Links,
}

impl Check {
    /// Every check, in the order `all` runs them.
    pub const ALL: [Self; 6] = [
        Self::Fences,
        Self::Toc,
        Self::References,
        Self::SectionOrder,
        Self::LastUpdated,
        Self::Links,
    ];

    /// Command-line name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Fences => "fences",
            Self::Toc => "toc",
            Self::References => "references",
            Self::SectionOrder => "section-order",
            Self::LastUpdated => "last-updated",
            Self::Links => "links",
        }
    }

    /// Parse a command-line name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|check| check.name() == name)
    }

    /// One-line summary for help output.
    pub fn description(self) -> &'static str {
        match self {
            Self::Fences => "report fenced code blocks that never close",
            Self::Toc => "validate table-of-contents anchors against headings",
            Self::References => "cross-check [R<n>] citations against ## References",
            Self::SectionOrder => "require the canonical ## section sequence",
            Self::LastUpdated => "match frontmatter last_updated to the Update Log",
            Self::Links => "resolve relative link targets on disk",
        }
    }

    /// Whether the check ignores files under the configured skip directories.
    ///
    /// `fences` and `links` guard every file, templates included.
    pub fn honors_skip_dirs(self) -> bool {
        !matches!(self, Self::Fences | Self::Links)
    }

    /// Run the check over one document.
    pub fn lint(self, document: &Document) -> Vec<Violation> {
        match self {
            Self::Fences => fences::lint(document).into_iter().collect(),
            Self::Toc => toc::lint(document),
            Self::References => references::lint(document),
            Self::SectionOrder => section_order::lint(document),
            Self::LastUpdated => last_updated::lint(document).into_iter().collect(),
            Self::Links => links::lint(document),
        }
    }
}

impl Display for Check {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
