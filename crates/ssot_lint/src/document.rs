//! Loaded Markdown documents.

use std::fs;
use std::path::{Path, PathBuf};

use crate::corpus::CorpusError;

/// A document path and its raw text.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Document {
    path: PathBuf,
    text: String,
}

impl Document {
    /// Wrap already-loaded text.
    pub fn new(path: impl Into<PathBuf>, text: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            text: text.into(),
        }
    }

    /// Read `path`, replacing invalid UTF-8 sequences instead of failing.
    pub fn load(path: &Path) -> Result<Self, CorpusError> {
        let bytes = fs::read(path).map_err(|source| CorpusError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::new(path, String::from_utf8_lossy(&bytes).into_owned()))
    }

    /// Path the document was loaded from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Raw document text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Final path component, when it is valid UTF-8.
    pub fn file_name(&self) -> Option<&str> {
        self.path.file_name().and_then(|name| name.to_str())
    }
}
