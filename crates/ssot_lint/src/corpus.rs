//! Markdown corpus discovery and per-check runs.

use std::ffi::OsStr;
use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};

use thiserror::Error;
use tracing::debug;

use crate::checks::Check;
use crate::document::Document;
use crate::violation::Violation;

const MARKDOWN_SUFFIX: &str = ".md";

/// Failures that stop a corpus run before or during analysis.
#[derive(Debug, Error)]
pub enum CorpusError {
    /// The corpus root does not exist.
    #[error("not a directory: {} (path does not exist)", .0.display())]
    Missing(PathBuf),
    /// The corpus root exists but is not a directory.
    #[error("not a directory: {}", .0.display())]
    NotADirectory(PathBuf),
    /// The corpus root contains no Markdown files.
    #[error("no markdown files found under: {}", .0.display())]
    NoMarkdown(PathBuf),
    /// A file or directory could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Read {
        /// Unreadable path.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
}

impl CorpusError {
    /// Whether the error is about the requested input rather than a read failure mid-run.
    pub fn is_input_error(&self) -> bool {
        !matches!(self, Self::Read { .. })
    }
}

/// Sorted Markdown files found recursively under a root directory.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Corpus {
    root: PathBuf,
    files: Vec<PathBuf>,
}

impl Corpus {
    /// Enumerate every `*.md` file under `root`.
    ///
    /// # Errors
    ///
    /// Returns an input error when `root` is missing, not a directory, or holds no Markdown
    /// files, and [`CorpusError::Read`] when a directory cannot be listed.
    pub fn discover(root: &Path) -> Result<Self, CorpusError> {
        if !root.exists() {
            return Err(CorpusError::Missing(root.to_path_buf()));
        }
        if !root.is_dir() {
            return Err(CorpusError::NotADirectory(root.to_path_buf()));
        }

        let mut files = Vec::new();
        collect_markdown(root, &mut files)?;
        files.sort();
        if files.is_empty() {
            return Err(CorpusError::NoMarkdown(root.to_path_buf()));
        }

        debug!(root = %root.display(), files = files.len(), "discovered markdown corpus");
        Ok(Self {
            root: root.to_path_buf(),
            files,
        })
    }

    /// All discovered files.
    pub fn files(&self) -> &[PathBuf] {
        &self.files
    }

    /// Files whose path below the root has no component named in `skip_dirs`.
    pub fn select(&self, skip_dirs: &[String]) -> Vec<PathBuf> {
        self.files
            .iter()
            .filter(|path| !is_skipped(&self.root, path, skip_dirs))
            .cloned()
            .collect()
    }
}

/// Whether `path`, relative to `root`, passes through a directory named in `skip_dirs`.
pub fn is_skipped(root: &Path, path: &Path, skip_dirs: &[String]) -> bool {
    let Ok(rel) = path.strip_prefix(root) else {
        return false;
    };
    rel.components().any(|component| match component {
        Component::Normal(part) => skip_dirs.iter().any(|dir| part == OsStr::new(dir)),
        _ => false,
    })
}

fn collect_markdown(dir: &Path, out: &mut Vec<PathBuf>) -> Result<(), CorpusError> {
    let read_err = |source| CorpusError::Read {
        path: dir.to_path_buf(),
        source,
    };
    let mut entries: Vec<_> = fs::read_dir(dir)
        .map_err(read_err)?
        .collect::<Result<Vec<_>, _>>()
        .map_err(read_err)?;
    entries.sort_by_key(|e| e.path());

    for entry in entries {
        let path = entry.path();
        // Symlinked directories are not descended into.
        let file_type = entry.file_type().map_err(|source| CorpusError::Read {
            path: path.clone(),
            source,
        })?;
        if file_type.is_dir() {
            collect_markdown(&path, out)?;
        } else if path.is_file() && path.to_string_lossy().ends_with(MARKDOWN_SUFFIX) {
            out.push(path);
        }
    }

    Ok(())
}

/// Outcome of one check over a list of documents.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CheckReport {
    /// Check that ran.
    pub check: Check,
    /// Number of documents analyzed.
    pub checked: usize,
    /// Violations sorted by document path, in per-document emission order.
    pub violations: Vec<Violation>,
}

impl CheckReport {
    /// Whether no violations were found.
    pub fn is_clean(&self) -> bool {
        self.violations.is_empty()
    }
}

/// Load each path fresh and run `check` on it.
///
/// # Errors
///
/// Returns [`CorpusError::Read`] on the first unreadable file; no partial report is produced.
pub fn run_check(check: Check, paths: &[PathBuf]) -> Result<CheckReport, CorpusError> {
    let mut violations = Vec::new();

    for path in paths {
        let document = Document::load(path)?;
        let found = check.lint(&document);
        debug!(
            check = check.name(),
            path = %path.display(),
            violations = found.len(),
            "linted document"
        );
        violations.extend(found);
    }

    violations.sort_by(|a, b| a.path.cmp(&b.path));
    Ok(CheckReport {
        check,
        checked: paths.len(),
        violations,
    })
}
