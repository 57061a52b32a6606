//! NetGuide Navigator
//!
//! Guided troubleshooting over validated decision trees.
//!
//! # Overview
//!
//! - **StepTable / StepDefinition**: authoring data as loaded from files or code
//! - **TreeValidator**: load-time checks producing an immutable [`DecisionTree`]
//! - **Navigator**: per-session walker with `select`, `back` and `restart`
//! - **StepSource**: seam for loaders (files, built-in catalog)
//!
//! # Example
//!
//! ```rust
//! use netguide_navigator::{catalog, Navigator, OptionId, StepKind, TreeValidator};
//! use std::sync::Arc;
//!
//! let tree = TreeValidator::new()
//!     .validate_table(&catalog::network_troubleshooting(), None)
//!     .unwrap();
//! let mut nav = Navigator::from_tree(Arc::new(tree));
//!
//! nav.select(&OptionId::from("opt1")).unwrap();
//! nav.select(&OptionId::from("opt2")).unwrap();
//! assert_eq!(nav.current_step().kind(), StepKind::Solution);
//!
//! nav.back().unwrap();
//! assert_eq!(nav.current_step().id.as_str(), "internet-issue");
//! ```

#![warn(missing_docs)]

pub mod catalog;
pub mod config;
pub mod definition;
pub mod error;
pub mod loader;
pub mod navigator;
pub mod step;
pub mod tree;
pub mod validation;

// Re-exports
pub use config::GuideConfig;
pub use definition::{OptionDefinition, StepDefinition, StepTable, DEFAULT_ROOT};
pub use error::{ConfigError, GuideError, LoadError, NavigationError, ValidationError};
pub use loader::{load_tree, FileSource, StaticSource, StepSource, TableFormat};
pub use navigator::{Navigator, NavigatorState, Progress};
pub use step::{OptionId, Step, StepBody, StepId, StepKind, StepOption};
pub use tree::{DecisionTree, TreeReport};
pub use validation::{CyclePolicy, TreeValidator, ValidationContext};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for driving a session
    pub use crate::{
        DecisionTree, GuideError, NavigationError, Navigator, OptionId, Step, StepDefinition,
        StepId, StepKind, StepTable, TreeValidator, ValidationError,
    };
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
