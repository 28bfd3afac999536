//! Violation records produced by the checks.

use std::fmt::{self, Display, Formatter};
use std::path::{Path, PathBuf};

use crate::checks::Check;

/// What is wrong with a document.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ViolationDetail {
    /// Free-text description.
    Message(String),
    /// A relative link whose target does not exist.
    BrokenLink {
        /// Target as written in the document, after normalization.
        target: String,
        /// Absolute path the target resolved to.
        resolved: PathBuf,
    },
}

/// One structural violation in one document.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Violation {
    /// Check that produced the violation.
    pub check: Check,
    /// Offending document.
    pub path: PathBuf,
    /// Violation details.
    pub detail: ViolationDetail,
}

impl Violation {
    /// Create a message violation.
    pub fn new(check: Check, path: &Path, message: impl Into<String>) -> Self {
        Self {
            check,
            path: path.to_path_buf(),
            detail: ViolationDetail::Message(message.into()),
        }
    }

    /// Create a broken-link violation.
    pub fn broken_link(path: &Path, target: impl Into<String>, resolved: PathBuf) -> Self {
        Self {
            check: Check::Links,
            path: path.to_path_buf(),
            detail: ViolationDetail::BrokenLink {
                target: target.into(),
                resolved,
            },
        }
    }

    /// Description without the document path.
    pub fn message(&self) -> String {
        match &self.detail {
            ViolationDetail::Message(message) => message.clone(),
            ViolationDetail::BrokenLink { target, resolved } => {
                format!("{target} -> {}", resolved.display())
            }
        }
    }
}

impl Display for Violation {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match &self.detail {
            ViolationDetail::Message(message) => {
                write!(f, "{}: {message}", self.path.display())
            }
            ViolationDetail::BrokenLink { target, resolved } => write!(
                f,
                "{}:{target} -> {}",
                self.path.display(),
                resolved.display()
            ),
        }
    }
}
