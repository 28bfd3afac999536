//! Structural convention checks for SSOT-style Markdown corpora.
//!
//! Each [`Check`] is an independent pure pass from one [`Document`] to its [`Violation`]s. The
//! passes share the fence-aware analysis layer in [`ssot_markdown`], never each other's output.
//! [`corpus`] enumerates documents under a root and drives a check across them.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

pub mod checks;
pub mod corpus;
pub mod document;
pub mod violation;

pub use checks::Check;
pub use corpus::{run_check, CheckReport, Corpus, CorpusError};
pub use document::Document;
pub use violation::{Violation, ViolationDetail};
