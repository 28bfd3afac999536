//! Typed configuration loading helpers.

use crate::runtime::error::{XtaskError, XtaskResult};
use serde::de::DeserializeOwned;
use std::fs;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};
use tracing::debug;

/// TOML file under the workspace root, deserialized into `T`.
///
/// Only reading and parsing happen here; what the values mean is up to the caller.
///
/// ```rust
/// # use std::path::Path;
/// # use xtask::lint_config::{LintConfig, LINT_CONFIG_PATH};
/// # use xtask::runtime::config::ConfigLoader;
/// let loader = ConfigLoader::<LintConfig>::new(Path::new("/no/such/workspace"), LINT_CONFIG_PATH);
/// let config = loader.load_or_default().expect("absent file falls back to defaults");
/// assert_eq!(config.docs_dir, "docs");
/// ```
#[derive(Clone, Debug)]
pub struct ConfigLoader<T> {
    path: PathBuf,
    _marker: PhantomData<T>,
}

impl<T> ConfigLoader<T>
where
    T: DeserializeOwned,
{
    /// Loader for `relative_path` under `root`.
    pub fn new(root: &Path, relative_path: &str) -> Self {
        Self {
            path: root.join(relative_path),
            _marker: PhantomData,
        }
    }

    /// Read and parse the file. Every failure is a `Config` error naming the path.
    pub fn load(&self) -> XtaskResult<T> {
        let body = fs::read_to_string(&self.path).map_err(|err| {
            XtaskError::config(format!("failed to read {}: {err}", self.path.display()))
        })?;
        toml::from_str(&body).map_err(|err| {
            XtaskError::config(format!("failed to parse {}: {err}", self.path.display()))
                .with_path(&self.path)
        })
    }

    /// Like [`ConfigLoader::load`], but an absent file yields `T::default()`.
    pub fn load_or_default(&self) -> XtaskResult<T>
    where
        T: Default,
    {
        if !self.path.exists() {
            debug!(path = %self.path.display(), "config file absent, using defaults");
            return Ok(T::default());
        }
        self.load()
    }
}
