//! Fence-aware structural analysis for SSOT-style Markdown documents.
//!
//! Every analyzer in the workspace reads raw document text through this crate so that headings,
//! links, and citations trapped inside fenced or indented code are treated as inert text in
//! exactly one place. The pieces build on each other:
//!
//! - [`fence`] classifies each line (text, fence marker, fenced content, indented code) with a
//!   single explicit [`FenceState`] machine.
//! - [`heading`] extracts ATX headings from non-code lines.
//! - [`slug`] turns heading text into renderer-compatible anchors.
//! - [`link`] extracts and normalizes inline link targets.
//! - [`frontmatter`] reads the leading `---` metadata block.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

pub mod fence;
pub mod frontmatter;
pub mod heading;
pub mod link;
pub mod slug;

pub use fence::{classify_lines, strip_code, unclosed_fence, ClassifiedLine, FenceState, LineClass};
pub use heading::{extract_headings, find_h2, parse_heading, Heading};
pub use link::{extract_links, InlineLink, LinkTarget};
pub use slug::{slugify, AnchorSet};
