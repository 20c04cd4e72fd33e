//! Configuration document loading
//!
//! Loads declared configuration documents from YAML or JSON. The document
//! maps entity-type keys to an enablement flag and ordered lists of operation
//! identifiers; resolution of identifiers to operation instances happens
//! separately, in [`ConfigSet::from_document`](crate::config::ConfigSet::from_document).
//!
//! The legacy camelCase field names (`isEnabled`,
//! `beforeTriggersOpsClassNames`, `afterTriggerOpsClassNames`) are accepted as
//! aliases. The aliases cover field names only: entity keys and operation
//! identifiers must be lowercase snake_case, which
//! [`ConfigValidator`](crate::config::ConfigValidator) enforces when the
//! configuration set is built.

use std::{collections::HashMap, fs, path::Path};

use serde::{Deserialize, Serialize};

use crate::error::{Result, TriggerError};

/// Declared configuration for one entity type
///
/// Expected YAML shape:
///
/// ```yaml
/// enabled: true
/// before_operations:
///   - prospect_phone_validation
/// after_operations:
///   - employee_headcount_cascade
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntityConfigSpec {
    /// Whether dispatch is enabled for the entity type
    #[serde(default = "default_enabled", alias = "isEnabled")]
    pub enabled: bool,

    /// Identifiers of BEFORE-phase operations, in execution order
    #[serde(default, alias = "beforeTriggersOpsClassNames")]
    pub before_operations: Vec<String>,

    /// Identifiers of AFTER-phase operations, in execution order
    #[serde(default, alias = "afterTriggerOpsClassNames")]
    pub after_operations: Vec<String>,
}

fn default_enabled() -> bool {
    true
}

/// A declared configuration document
///
/// Expected YAML format:
///
/// ```yaml
/// entities:
///   account:
///     enabled: true
///     before_operations: [prospect_phone_validation]
///     after_operations: [employee_headcount_cascade]
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigDocument {
    /// Entity-type key to declared configuration
    #[serde(default)]
    pub entities: HashMap<String, EntityConfigSpec>,
}

/// Loader for configuration documents
pub struct ConfigLoader;

impl ConfigLoader {
    /// Parse a YAML document
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfiguration` if the content is not valid YAML or
    /// does not match the document shape.
    pub fn from_yaml_str(content: &str) -> Result<ConfigDocument> {
        serde_yaml::from_str(content)
            .map_err(|e| TriggerError::InvalidConfiguration(format!("Invalid YAML: {}", e)))
    }

    /// Parse a JSON document
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfiguration` if the content is not valid JSON or
    /// does not match the document shape.
    pub fn from_json_str(content: &str) -> Result<ConfigDocument> {
        serde_json::from_str(content)
            .map_err(|e| TriggerError::InvalidConfiguration(format!("Invalid JSON: {}", e)))
    }

    /// Load a document from a file path
    ///
    /// The format is chosen by extension: `.json` parses as JSON, anything
    /// else as YAML.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or does not parse.
    pub fn from_path(path: &Path) -> Result<ConfigDocument> {
        let content = fs::read_to_string(path).map_err(|e| {
            TriggerError::InvalidConfiguration(format!(
                "Failed to read config file {}: {}",
                path.display(),
                e
            ))
        })?;

        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Self::from_json_str(&content),
            _ => Self::from_yaml_str(&content),
        }
    }
}
