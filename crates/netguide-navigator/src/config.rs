//! Guide configuration
//!
//! TOML file with every field optional:
//!
//! ```toml
//! tree = "trees/network.yaml"
//! root = "start"
//! cycle_policy = "allow"
//! log_filter = "netguide_navigator=debug"
//! ```
//!
//! A relative `tree` path in a file loaded with [`GuideConfig::load`] is
//! resolved against the directory holding that file.

use crate::error::ConfigError;
use crate::step::StepId;
use crate::validation::{CyclePolicy, ValidationContext};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Guide configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GuideConfig {
    /// Step table file; the built-in catalog is used when absent
    pub tree: Option<PathBuf>,
    /// Root override
    pub root: Option<StepId>,
    /// Cycle handling at validation
    pub cycle_policy: CyclePolicy,
    /// `tracing` filter directive
    pub log_filter: Option<String>,
}

impl GuideConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse from TOML text
    ///
    /// # Errors
    /// [`ConfigError::Parse`] on malformed TOML or unknown keys.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    /// Read and parse a config file
    ///
    /// A relative `tree` is rebased onto the config file's directory.
    ///
    /// # Errors
    /// [`ConfigError::Io`] if the file cannot be read, otherwise as
    /// [`GuideConfig::from_toml_str`].
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config = Self::from_toml_str(&text)?;
        if let (Some(tree), Some(base)) = (config.tree.as_mut(), path.parent()) {
            if tree.is_relative() {
                *tree = base.join(&*tree);
            }
        }
        Ok(config)
    }

    /// With a step table file
    #[inline]
    #[must_use]
    pub fn with_tree(mut self, tree: impl Into<PathBuf>) -> Self {
        self.tree = Some(tree.into());
        self
    }

    /// With a root override
    #[inline]
    #[must_use]
    pub fn with_root(mut self, root: impl Into<StepId>) -> Self {
        self.root = Some(root.into());
        self
    }

    /// With a cycle policy
    #[inline]
    #[must_use]
    pub fn with_cycle_policy(mut self, policy: CyclePolicy) -> Self {
        self.cycle_policy = policy;
        self
    }

    /// Validation context derived from this config
    #[must_use]
    pub fn validation_context(&self) -> ValidationContext {
        ValidationContext {
            cycle_policy: self.cycle_policy,
        }
    }
}
