//! Shared command context passed into command families.

use crate::lint_config::{load_lint_config, LintConfig};
use crate::runtime::error::{XtaskError, XtaskResult};
use std::env;
use std::path::{Path, PathBuf};

/// Environment variable overriding the workspace root.
pub const ROOT_ENV: &str = "SSOT_LINT_ROOT";

/// Shared execution context for xtask command families.
#[derive(Clone, Debug)]
pub struct CommandContext {
    root: PathBuf,
    config: LintConfig,
}

impl CommandContext {
    /// Create a context rooted at `SSOT_LINT_ROOT` or the current directory.
    pub fn new() -> XtaskResult<Self> {
        let root = workspace_root()?;
        let config = load_lint_config(&root)?;
        Ok(Self::with_config(root, config))
    }

    /// Create a context from already-resolved parts.
    pub fn with_config(root: PathBuf, config: LintConfig) -> Self {
        Self { root, config }
    }

    /// Workspace root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Loaded lint configuration.
    pub fn config(&self) -> &LintConfig {
        &self.config
    }

    /// Resolve a user-supplied path against the workspace root.
    pub fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root.join(path)
        }
    }

    /// Configured default corpus directory.
    pub fn docs_dir(&self) -> PathBuf {
        self.root.join(&self.config.docs_dir)
    }
}

fn workspace_root() -> XtaskResult<PathBuf> {
    if let Ok(raw) = env::var(ROOT_ENV) {
        if raw.trim().is_empty() {
            return Err(XtaskError::config(format!(
                "{ROOT_ENV} is set but empty; expected a filesystem path"
            )));
        }
        return Ok(PathBuf::from(raw));
    }
    env::current_dir().map_err(|err| {
        XtaskError::io(format!("failed to resolve current directory: {err}"))
            .with_operation("resolve workspace root")
    })
}
