//! Error types for the navigator
//!
//! Two families with different lifetimes:
//! - [`ValidationError`]: the step table is malformed. Raised while building a
//!   [`DecisionTree`](crate::DecisionTree); no tree or navigator is produced.
//! - [`NavigationError`]: a traversal request the current state cannot honour.
//!   The navigator state is left untouched.
//!
//! Loading and configuration failures ([`LoadError`], [`ConfigError`]) sit in
//! front of validation and are folded into [`GuideError`] together with the two
//! families above.

use crate::step::{OptionId, StepId};
use std::path::PathBuf;

/// Step table rejected at load time
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// Requested root does not name any step
    #[error("root step '{0}' does not exist")]
    UnknownRoot(StepId),

    /// Option points at a step that is not in the table
    #[error("option '{option_id}' of step '{step_id}' points to a missing step")]
    DanglingReference {
        /// Step owning the option
        step_id: StepId,
        /// Offending option
        option_id: OptionId,
    },

    /// Question step without any option
    #[error("question step '{0}' has no options")]
    EmptyOptionList(StepId),

    /// Solution or error step carrying options
    #[error("terminal step '{0}' must not have options")]
    TerminalWithOptions(StepId),

    /// Two steps share an id
    #[error("step id '{0}' is defined more than once")]
    DuplicateStepId(StepId),

    /// Two options of one step share an id
    #[error("option id '{option_id}' appears more than once in step '{step_id}'")]
    DuplicateOptionId {
        /// Step owning the options
        step_id: StepId,
        /// Repeated option id
        option_id: OptionId,
    },

    /// Terminal step without resolution text
    #[error("terminal step '{0}' has no resolution text")]
    MissingResolution(StepId),

    /// Question step carrying resolution text
    #[error("question step '{0}' must not carry resolution text")]
    QuestionWithResolution(StepId),

    /// Directed cycle found while cycles are rejected
    #[error("cycle detected through step '{0}'")]
    CycleDetected(StepId),
}

impl ValidationError {
    /// Step the violation is attached to, if any
    #[must_use]
    pub fn step_id(&self) -> &StepId {
        match self {
            Self::UnknownRoot(id)
            | Self::EmptyOptionList(id)
            | Self::TerminalWithOptions(id)
            | Self::DuplicateStepId(id)
            | Self::MissingResolution(id)
            | Self::QuestionWithResolution(id)
            | Self::CycleDetected(id) => id,
            Self::DanglingReference { step_id, .. } | Self::DuplicateOptionId { step_id, .. } => {
                step_id
            }
        }
    }
}

/// Traversal request rejected by the navigator
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NavigationError {
    /// Option id not offered by the current step
    #[error("step '{step_id}' has no option '{option_id}'")]
    UnknownOption {
        /// Current step
        step_id: StepId,
        /// Requested option
        option_id: OptionId,
    },

    /// Forward transition requested on a solution or error step
    #[error("step '{0}' is terminal and accepts no selection")]
    NoOptionsAtTerminal(StepId),

    /// Step back requested with an empty history
    #[error("no previous step to return to")]
    NoHistory,

    /// Explicit start or restart target is not in the tree
    #[error("step '{0}' does not exist")]
    UnknownStep(StepId),
}

/// Step table could not be read or decoded
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// Underlying file read failed
    #[error("failed to read {path}: {source}")]
    Io {
        /// File being read
        path: PathBuf,
        /// I/O failure
        #[source]
        source: std::io::Error,
    },

    /// JSON decoding failed
    #[error("invalid JSON step table: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML decoding failed
    #[error("invalid YAML step table: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// TOML decoding failed
    #[error("invalid TOML step table: {0}")]
    Toml(#[from] toml::de::Error),

    /// File extension is not one of json, yaml, yml, toml
    #[error("unsupported step table format: {}", .0.display())]
    UnsupportedFormat(PathBuf),
}

/// Configuration file problems
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Config file could not be read
    #[error("failed to read config {path}: {source}")]
    Io {
        /// Config path
        path: PathBuf,
        /// I/O failure
        #[source]
        source: std::io::Error,
    },

    /// Config file is not valid TOML for [`GuideConfig`](crate::GuideConfig)
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Umbrella error for callers that drive the whole load-and-walk flow
#[derive(Debug, thiserror::Error)]
pub enum GuideError {
    /// Malformed tree
    #[error("invalid troubleshooting tree: {0}")]
    Validation(#[from] ValidationError),

    /// Rejected traversal
    #[error("navigation rejected: {0}")]
    Navigation(#[from] NavigationError),

    /// Step table not loadable
    #[error("could not load troubleshooting tree: {0}")]
    Load(#[from] LoadError),

    /// Bad configuration
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl GuideError {
    /// Navigation misuse can be reported and ignored; everything else stops a session
    #[inline]
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::Navigation(_))
    }

    /// Errors caused by authoring data or settings rather than by the user
    #[inline]
    #[must_use]
    pub fn is_configuration_error(&self) -> bool {
        matches!(self, Self::Validation(_) | Self::Load(_) | Self::Config(_))
    }
}
