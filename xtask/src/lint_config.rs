//! Versioned lint configuration for the Markdown corpus.

use crate::runtime::config::ConfigLoader;
use crate::runtime::error::XtaskResult;
use serde::Deserialize;
use std::path::Path;

/// Workspace-relative location of the optional lint config.
pub const LINT_CONFIG_PATH: &str = "tools/docs/ssot_lint.toml";

/// Corpus layout shared by every lint check.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct LintConfig {
    /// Default corpus directory, relative to the workspace root.
    pub docs_dir: String,
    /// Directory names excluded from `toc`, `references`, `section-order`, and `last-updated`.
    pub skip_dirs: Vec<String>,
    /// Workspace-root documents that `fences` and `links` always scan when present.
    pub root_documents: Vec<String>,
}

impl Default for LintConfig {
    fn default() -> Self {
        Self {
            docs_dir: "docs".into(),
            skip_dirs: vec!["_templates".into(), "overrides".into()],
            root_documents: vec!["README.md".into(), "AGENTS.md".into(), "SSOT.md".into()],
        }
    }
}

/// Load `tools/docs/ssot_lint.toml`, falling back to defaults when it is absent.
pub fn load_lint_config(root: &Path) -> XtaskResult<LintConfig> {
    ConfigLoader::<LintConfig>::new(root, LINT_CONFIG_PATH)
        .load_or_default()
        .map_err(|err| err.with_operation("load lint config"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn partial_config_keeps_remaining_defaults() {
        let config: LintConfig = toml::from_str("docs_dir = \"handbook\"\n").expect("parse");
        assert_eq!(
            config,
            LintConfig {
                docs_dir: "handbook".into(),
                ..LintConfig::default()
            }
        );
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(toml::from_str::<LintConfig>("skip = [\"x\"]\n").is_err());
    }
}
