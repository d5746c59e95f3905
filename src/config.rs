//! Loader configuration
//!
//! [`LoaderConfig`] holds settings that depend on the destination rather than
//! on one load (the value ceiling, an explicit dialect). It can be read from a
//! `deltaload.toml` file. [`LoadOptions`] holds the per-call choices.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use deltaload_types::{ColumnType, Dialect};
use serde::Deserialize;

use crate::planner::DEFAULT_VALUE_CEILING;
use crate::resolver::ExistsPolicy;

pub const CONFIG_FILE: &str = "deltaload.toml";

// ============================================================================
// LoaderConfig
// ============================================================================

/// Destination-wide settings
///
/// ```toml
/// value_ceiling = 500000
/// dialect = "databricks"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoaderConfig {
    /// Maximum literal values carried by one insert statement
    pub value_ceiling: usize,
    /// Overrides the dialect reported by the connection
    pub dialect: Option<Dialect>,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            value_ceiling: DEFAULT_VALUE_CEILING,
            dialect: None,
        }
    }
}

impl LoaderConfig {
    pub fn with_value_ceiling(mut self, value_ceiling: usize) -> Self {
        self.value_ceiling = value_ceiling;
        self
    }

    pub fn with_dialect(mut self, dialect: Dialect) -> Self {
        self.dialect = Some(dialect);
        self
    }

    /// Load from the default config file
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(Path::new(CONFIG_FILE))
    }

    /// Load from specific path
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ConfigError::NotFound(path.into())
            } else {
                ConfigError::Io(path.into(), e)
            }
        })?;

        let config: Self =
            toml::from_str(&content).map_err(|e| ConfigError::Parse(path.into(), e))?;
        config.validate()?;
        Ok(config)
    }

    /// Parse and validate TOML text
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)
            .map_err(|e| ConfigError::Parse(PathBuf::from("<inline>"), e))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.value_ceiling == 0 {
            return Err(ConfigError::Invalid(
                "value_ceiling must be greater than zero".into(),
            ));
        }
        Ok(())
    }
}

// ============================================================================
// LoadOptions
// ============================================================================

/// Choices for a single load
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadOptions {
    pub exists_policy: ExistsPolicy,
    /// Rows per insert statement; `None` lets the planner size batches
    pub batch_rows: Option<i64>,
    /// Column types that replace the inferred ones when creating the table
    pub column_types: HashMap<String, ColumnType>,
    /// Accepted for compatibility with frame libraries; no index column is
    /// ever written
    pub index: bool,
}

impl LoadOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn exists_policy(mut self, policy: ExistsPolicy) -> Self {
        self.exists_policy = policy;
        self
    }

    pub fn batch_rows(mut self, rows: i64) -> Self {
        self.batch_rows = Some(rows);
        self
    }

    pub fn column_type(mut self, column: impl Into<String>, column_type: ColumnType) -> Self {
        self.column_types.insert(column.into(), column_type);
        self
    }

    pub fn index(mut self, index: bool) -> Self {
        self.index = index;
        self
    }
}

// ============================================================================
// Errors
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("failed to read {}: {}", .0.display(), .1)]
    Io(PathBuf, #[source] std::io::Error),

    #[error("failed to parse {}: {}", .0.display(), .1)]
    Parse(PathBuf, #[source] toml::de::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

// ============================================================================
// Tests
// ============================================================================
