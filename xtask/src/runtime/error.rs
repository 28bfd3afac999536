//! Structured xtask error types.

use std::fmt::{self, Display, Formatter};
use std::path::Path;

use ssot_lint::CorpusError;

/// Stable error categories for xtask workflows.
///
/// Each category maps to one process exit code, see [`XtaskErrorCategory::exit_code`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum XtaskErrorCategory {
    /// Invalid or unreadable configuration.
    Config,
    /// The requested corpus directory is missing, not a directory, or has no Markdown files.
    Input,
    /// Malformed command-line arguments.
    Usage,
    /// Filesystem or general I/O failure.
    Io,
    /// One or more documents violate a convention.
    Validation,
}

impl XtaskErrorCategory {
    /// Process exit code for failures of this category.
    pub fn exit_code(self) -> u8 {
        match self {
            Self::Validation | Self::Io => 1,
            Self::Input | Self::Usage | Self::Config => 2,
        }
    }
}

/// Structured xtask error with contextual metadata.
///
/// The formatted display output is CLI-friendly. Optional `operation`, `target`, and `hint`
/// fields can be attached as the error propagates.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct XtaskError {
    /// High-level error category.
    pub category: XtaskErrorCategory,
    /// Human-readable message.
    pub message: String,
    /// Optional operation name.
    pub operation: Option<String>,
    /// Optional path target.
    pub target: Option<String>,
    /// Optional remediation hint.
    pub hint: Option<String>,
}

/// Convenience result type for xtask internals.
pub type XtaskResult<T> = Result<T, XtaskError>;

impl XtaskError {
    /// Create an error with the given category and message.
    pub fn new(category: XtaskErrorCategory, message: impl Into<String>) -> Self {
        Self {
            category,
            message: message.into(),
            operation: None,
            target: None,
            hint: None,
        }
    }

    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::new(XtaskErrorCategory::Config, message)
    }

    /// Create an input error.
    pub fn input(message: impl Into<String>) -> Self {
        Self::new(XtaskErrorCategory::Input, message)
    }

    /// Create a usage error.
    pub fn usage(message: impl Into<String>) -> Self {
        Self::new(XtaskErrorCategory::Usage, message)
    }

    /// Create an IO error.
    pub fn io(message: impl Into<String>) -> Self {
        Self::new(XtaskErrorCategory::Io, message)
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(XtaskErrorCategory::Validation, message)
    }

    /// Attach an operation label.
    pub fn with_operation(mut self, operation: impl Into<String>) -> Self {
        self.operation = Some(operation.into());
        self
    }

    /// Attach a target path.
    pub fn with_path(mut self, path: &Path) -> Self {
        self.target = Some(path.display().to_string());
        self
    }

    /// Attach a remediation hint.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    /// Process exit code for this error.
    pub fn exit_code(&self) -> u8 {
        self.category.exit_code()
    }
}

impl Display for XtaskError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)?;
        if let Some(operation) = &self.operation {
            write!(f, " [operation: {operation}]")?;
        }
        if let Some(target) = &self.target {
            write!(f, " [target: {target}]")?;
        }
        if let Some(hint) = &self.hint {
            write!(f, " [hint: {hint}]")?;
        }
        Ok(())
    }
}

impl std::error::Error for XtaskError {}

impl From<CorpusError> for XtaskError {
    fn from(value: CorpusError) -> Self {
        if value.is_input_error() {
            XtaskError::input(value.to_string())
        } else {
            XtaskError::io(value.to_string())
        }
    }
}
