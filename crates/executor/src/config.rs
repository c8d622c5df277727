//! Resolver configuration via `rownode.toml`
//!
//! Every key is optional; an empty file yields [`NodeConfig::default`].

use crate::error::ConfigError;
use rownode_core::QualifiedName;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

/// Config file name
pub const CONFIG_FILE_NAME: &str = "rownode.toml";

/// Root field naming options
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InflectionConfig {
    /// Appended to every per-type root field name (e.g. `"ByNodeId"`)
    #[serde(default)]
    pub field_suffix: String,
}

/// Resolver configuration loaded from `rownode.toml`.
///
/// # Example
///
/// ```toml
/// node_id_field_name = "nodeId"
/// node_field_name = "node"
/// omit_read = ["audit.events"]
///
/// [inflection]
/// field_suffix = ""
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeConfig {
    /// Name of the identifier argument on per-type root fields
    #[serde(default = "default_node_id_field_name")]
    pub node_id_field_name: String,
    /// Name of the generic node lookup field; no row type may take it
    #[serde(default = "default_node_field_name")]
    pub node_field_name: String,
    /// Tables (`namespace.table`) hidden from both lookup paths
    #[serde(default)]
    pub omit_read: Vec<String>,
    /// Root field naming
    #[serde(default)]
    pub inflection: InflectionConfig,
}

fn default_node_id_field_name() -> String {
    "nodeId".to_string()
}

fn default_node_field_name() -> String {
    "node".to_string()
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self {
            node_id_field_name: default_node_id_field_name(),
            node_field_name: default_node_field_name(),
            omit_read: Vec::new(),
            inflection: InflectionConfig::default(),
        }
    }
}

impl NodeConfig {
    /// Returns the default config file content with comments.
    pub fn default_toml() -> &'static str {
        r#"# rownode configuration
#
# Name of the identifier argument on per-type root fields.
node_id_field_name = "nodeId"

# Name of the generic node lookup field. Row types never get this name.
node_field_name = "node"

# Tables hidden from identifier lookups, as "namespace.table".
omit_read = []

[inflection]
# Suffix appended to every per-type root field name.
field_suffix = ""
"#
    }

    /// Parse config from TOML text and validate it.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not valid TOML or a value is invalid.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: NodeConfig = toml::from_str(content).map_err(|e| ConfigError::Parse {
            reason: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse config from a file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        Self::from_toml_str(&content)
    }

    /// Write the default config file if it does not already exist.
    pub fn write_default_if_missing(path: &Path) -> Result<(), ConfigError> {
        if !path.exists() {
            std::fs::write(path, Self::default_toml()).map_err(|e| ConfigError::Io {
                path: path.display().to_string(),
                reason: e.to_string(),
            })?;
        }
        Ok(())
    }

    /// Serialize this config to TOML and write it to the given path.
    pub fn write_to_file(&self, path: &Path) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self).map_err(|e| ConfigError::Parse {
            reason: e.to_string(),
        })?;
        std::fs::write(path, content).map_err(|e| ConfigError::Io {
            path: path.display().to_string(),
            reason: e.to_string(),
        })
    }

    /// Check field names and omitted table names.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.node_id_field_name.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                key: "node_id_field_name".into(),
                reason: "must not be empty".into(),
            });
        }
        if self.node_field_name.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                key: "node_field_name".into(),
                reason: "must not be empty".into(),
            });
        }
        self.omitted_tables().map(|_| ())
    }

    /// Parsed `omit_read` entries.
    pub fn omitted_tables(&self) -> Result<HashSet<QualifiedName>, ConfigError> {
        self.omit_read
            .iter()
            .map(|entry| {
                QualifiedName::parse(entry).ok_or_else(|| ConfigError::InvalidValue {
                    key: "omit_read".into(),
                    reason: format!("'{}' is not of the form namespace.table", entry),
                })
            })
            .collect()
    }
}
