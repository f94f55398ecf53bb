//! Configuration system for spawncheck.
//!
//! Load projection and report settings from TOML files to change which
//! record kinds are projected, which fields are ignored, and how the orphan
//! report filters items, without code changes. The built-in defaults match
//! the game data format the tool was written against.
//!
//! # Examples
//!
//! Load configuration from a TOML string:
//!
//! ```
//! use spawncheck_config::AuditConfig;
//!
//! let config = AuditConfig::from_toml_str(r#"
//!     [projection]
//!     record_kinds = ["FVRObject", "ObjectTableDef"]
//!
//!     [projection.key_columns]
//!     FVRObject = "ItemID"
//!     ObjectTableDef = "m_Name"
//!
//!     [report]
//!     category = 1
//!     skip_tables = ["FA_ALL"]
//! "#).unwrap();
//!
//! assert!(config.projection.is_whitelisted("FVRObject"));
//! assert_eq!(config.report.category, 1);
//! ```
//!
//! Use the defaults when no file is present:
//!
//! ```
//! use spawncheck_config::AuditConfig;
//!
//! let config = AuditConfig::load("spawncheck.toml").unwrap_or_default();
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Top-level configuration: projection whitelist plus report filters.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct AuditConfig {
    #[serde(default)]
    pub projection: ProjectionConfig,

    #[serde(default)]
    pub report: ReportConfig,
}

impl AuditConfig {
    /// Parses configuration from a TOML string.
    pub fn from_toml_str(toml_str: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(toml_str)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.projection.validate()
    }
}

/// Controls which record kinds are projected and how tables are keyed.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct ProjectionConfig {
    /// Record kinds to project; everything else in the stream is skipped.
    #[serde(default = "default_record_kinds")]
    pub record_kinds: Vec<String>,

    /// Field names dropped before mapping resolution (engine bookkeeping).
    #[serde(default = "default_ignored_fields")]
    pub ignored_fields: Vec<String>,

    /// Primary-key column per record kind, assigned after projection.
    #[serde(default = "default_key_columns")]
    pub key_columns: BTreeMap<String, String>,
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self {
            record_kinds: default_record_kinds(),
            ignored_fields: default_ignored_fields(),
            key_columns: default_key_columns(),
        }
    }
}

impl ProjectionConfig {
    pub fn is_whitelisted(&self, kind: &str) -> bool {
        self.record_kinds.iter().any(|k| k == kind)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.record_kinds.is_empty() {
            return Err(ConfigError::Invalid(
                "record_kinds must not be empty".to_string(),
            ));
        }
        for kind in self.key_columns.keys() {
            if !self.is_whitelisted(kind) {
                return Err(ConfigError::Invalid(format!(
                    "key column configured for `{kind}`, which is not in record_kinds"
                )));
            }
        }
        Ok(())
    }
}

/// Filters applied by the orphan report.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct ReportConfig {
    /// Only items of this category are checked for reachability.
    #[serde(default = "default_category")]
    pub category: i32,

    /// Spawn tables excluded from the reachability scan (catch-all pools).
    #[serde(default = "default_skip_tables")]
    pub skip_tables: Vec<String>,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            category: default_category(),
            skip_tables: default_skip_tables(),
        }
    }
}

fn default_record_kinds() -> Vec<String> {
    vec![
        "FVRObject".to_string(),
        "ItemSpawnerID".to_string(),
        "ObjectTableDef".to_string(),
    ]
}

fn default_ignored_fields() -> Vec<String> {
    vec![
        "m_GameObject".to_string(),
        "m_Enabled".to_string(),
        "m_Script".to_string(),
        "m_anvilPrefab".to_string(),
    ]
}

fn default_key_columns() -> BTreeMap<String, String> {
    BTreeMap::from([
        ("FVRObject".to_string(), "ItemID".to_string()),
        ("ItemSpawnerID".to_string(), "ItemID".to_string()),
        ("ObjectTableDef".to_string(), "m_Name".to_string()),
    ])
}

fn default_category() -> i32 {
    1
}

fn default_skip_tables() -> Vec<String> {
    vec!["FA_ALL".to_string()]
}

#[cfg(test)]
mod tests;
