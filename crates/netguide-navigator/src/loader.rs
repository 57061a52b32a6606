//! Step table sources
//!
//! A [`StepSource`] produces a raw [`StepTable`]; [`load_tree`] adds validation
//! on top. Files are decoded by extension: `.json`, `.yaml`/`.yml`, `.toml`.

use crate::definition::StepTable;
use crate::error::{GuideError, LoadError};
use crate::step::StepId;
use crate::tree::DecisionTree;
use crate::validation::{TreeValidator, ValidationContext};
use std::path::{Path, PathBuf};

/// Anything that can supply a step table
pub trait StepSource {
    /// Read the table
    ///
    /// # Errors
    /// [`LoadError`] if the table cannot be read or decoded.
    fn load(&self) -> Result<StepTable, LoadError>;

    /// Human-readable origin for diagnostics
    fn describe(&self) -> String;
}

/// Supported file encodings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableFormat {
    /// JSON document
    Json,
    /// YAML document
    Yaml,
    /// TOML document with `[[steps]]` tables
    Toml,
}

impl TableFormat {
    /// Pick a format from a file extension
    #[must_use]
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "json" => Some(Self::Json),
            "yaml" | "yml" => Some(Self::Yaml),
            "toml" => Some(Self::Toml),
            _ => None,
        }
    }

    /// Decode a table from text
    ///
    /// # Errors
    /// The decoder's error wrapped in [`LoadError`].
    pub fn parse(self, text: &str) -> Result<StepTable, LoadError> {
        let table = match self {
            Self::Json => serde_json::from_str(text)?,
            Self::Yaml => serde_yaml::from_str(text)?,
            Self::Toml => toml::from_str(text)?,
        };
        Ok(table)
    }
}

/// Step table stored in a file
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    /// Source reading `path`
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl StepSource for FileSource {
    fn load(&self) -> Result<StepTable, LoadError> {
        let format = TableFormat::from_path(&self.path)
            .ok_or_else(|| LoadError::UnsupportedFormat(self.path.clone()))?;
        let text = std::fs::read_to_string(&self.path).map_err(|source| LoadError::Io {
            path: self.path.clone(),
            source,
        })?;
        let table = format.parse(&text)?;
        tracing::debug!(path = %self.path.display(), steps = table.steps.len(), "loaded step table");
        Ok(table)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// Step table held in memory
#[derive(Debug, Clone)]
pub struct StaticSource {
    name: String,
    table: StepTable,
}

impl StaticSource {
    /// Wrap a table under a display name
    #[must_use]
    pub fn new(name: impl Into<String>, table: StepTable) -> Self {
        Self {
            name: name.into(),
            table,
        }
    }
}

impl StepSource for StaticSource {
    fn load(&self) -> Result<StepTable, LoadError> {
        Ok(self.table.clone())
    }

    fn describe(&self) -> String {
        self.name.clone()
    }
}

/// Load from `source` and validate
///
/// Root precedence: `root_override`, then the table's own root, then
/// [`DEFAULT_ROOT`](crate::DEFAULT_ROOT).
///
/// # Errors
/// [`GuideError::Load`] or [`GuideError::Validation`].
pub fn load_tree(
    source: &dyn StepSource,
    context: ValidationContext,
    root_override: Option<&StepId>,
) -> Result<DecisionTree, GuideError> {
    let table = source.load()?;
    let tree = TreeValidator::with_context(context)
        .validate_table(&table, root_override)
        .map_err(|err| {
            tracing::error!(source = %source.describe(), error = %err, "step table rejected");
            err
        })?;
    Ok(tree)
}
