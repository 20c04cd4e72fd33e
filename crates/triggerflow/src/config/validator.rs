//! Configuration document validation
//!
//! Validates declared documents before identifier resolution: entity keys and
//! operation identifiers must be non-empty and lowercase with underscores.
//! An operation listed in both the before- and after-list of one entity is
//! permitted but unusual, so it is logged rather than rejected.

use std::collections::HashSet;

use tracing::warn;

use crate::{
    config::loader::{ConfigDocument, EntityConfigSpec},
    error::{Result, TriggerError},
};

/// Validator for configuration documents
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate a whole document
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfiguration` on the first malformed entity key or
    /// operation identifier.
    pub fn validate_document(document: &ConfigDocument) -> Result<()> {
        for (entity, spec) in &document.entities {
            Self::validate_key(entity, "Entity key")?;
            Self::validate_spec(entity, spec)?;
        }
        Ok(())
    }

    /// Validate one entity's declared configuration
    pub fn validate_spec(entity: &str, spec: &EntityConfigSpec) -> Result<()> {
        for identifier in spec.before_operations.iter().chain(&spec.after_operations) {
            Self::validate_key(identifier, "Operation identifier")?;
        }

        let before: HashSet<&String> = spec.before_operations.iter().collect();
        for identifier in &spec.after_operations {
            if before.contains(identifier) {
                warn!(
                    entity = %entity,
                    identifier = %identifier,
                    "Operation appears in both before- and after-lists"
                );
            }
        }

        Ok(())
    }

    /// Keys must be non-empty, lowercase, with underscores
    fn validate_key(key: &str, what: &str) -> Result<()> {
        if key.is_empty() {
            return Err(TriggerError::InvalidConfiguration(format!(
                "{} cannot be empty",
                what
            )));
        }

        if !key
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_')
        {
            return Err(TriggerError::InvalidConfiguration(format!(
                "Invalid {} format: '{}'. Keys must be lowercase with underscores.",
                what.to_lowercase(),
                key
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn spec(before: &[&str], after: &[&str]) -> EntityConfigSpec {
        EntityConfigSpec {
            enabled: true,
            before_operations: before.iter().map(|s| s.to_string()).collect(),
            after_operations: after.iter().map(|s| s.to_string()).collect(),
        }
    }

    fn document(entity: &str, spec: EntityConfigSpec) -> ConfigDocument {
        let mut entities = HashMap::new();
        entities.insert(entity.to_string(), spec);
        ConfigDocument { entities }
    }

    #[test]
    fn test_validate_valid_document() {
        let doc = document("account", spec(&["op_one"], &["op_two"]));
        assert!(ConfigValidator::validate_document(&doc).is_ok());
    }

    #[test]
    fn test_validate_empty_entity_key() {
        let doc = document("", spec(&[], &[]));
        assert!(ConfigValidator::validate_document(&doc).is_err());
    }

    #[test]
    fn test_validate_uppercase_entity_key() {
        let doc = document("Account", spec(&[], &[]));
        assert!(ConfigValidator::validate_document(&doc).is_err());
    }

    #[test]
    fn test_validate_invalid_operation_identifier() {
        let doc = document("account", spec(&["Op-One"], &[]));
        assert!(ConfigValidator::validate_document(&doc).is_err());
    }

    #[test]
    fn test_validate_empty_operation_identifier() {
        let doc = document("account", spec(&[""], &[]));
        assert!(ConfigValidator::validate_document(&doc).is_err());
    }

    #[test]
    fn test_operation_in_both_lists_is_permitted() {
        let doc = document("account", spec(&["op_one"], &["op_one"]));
        assert!(ConfigValidator::validate_document(&doc).is_ok());
    }

    #[test]
    fn test_numeric_characters_allowed() {
        let doc = document("account_v2", spec(&["op_1"], &[]));
        assert!(ConfigValidator::validate_document(&doc).is_ok());
    }
}
