//! Configuration model and provider
//!
//! Configuration comes in two layers. The declared layer
//! ([`ConfigDocument`](crate::config::loader::ConfigDocument)) is what a YAML
//! or JSON document deserializes into: per entity type, an enablement flag and
//! ordered lists of operation identifiers. The resolved layer ([`EntityConfig`]
//! and [`ConfigSet`]) is what the dispatcher consumes: identifiers replaced by
//! live operation instances, built exactly once at startup and immutable
//! thereafter.
//!
//! Both construction paths, programmatic ([`ConfigSetBuilder`]) and
//! document-driven ([`ConfigSet::from_document`]), produce structurally
//! identical configuration sets; the dispatcher is source-agnostic.

pub mod loader;
pub mod validator;

pub use loader::{ConfigDocument, ConfigLoader, EntityConfigSpec};
pub use validator::ConfigValidator;

use std::collections::HashMap;

use tracing::{debug, info};

use crate::{
    error::{Result, TriggerError},
    operation::OperationRef,
    registry::OperationRegistry,
    types::Phase,
};

/// Resolved configuration for one entity type
///
/// Immutable after construction. The operation lists are ordered: list order
/// is execution order. Duplicates are permitted, and the same operation may
/// appear in both the before- and after-list.
#[derive(Clone, Default)]
pub struct EntityConfig {
    enabled: bool,
    before: Vec<OperationRef>,
    after: Vec<OperationRef>,
}

impl EntityConfig {
    /// Config with dispatch enabled and no operations yet
    pub fn enabled() -> Self {
        Self {
            enabled: true,
            before: Vec::new(),
            after: Vec::new(),
        }
    }

    /// Config with dispatch disabled
    ///
    /// A disabled config short-circuits all dispatch for the entity type
    /// regardless of phase; its operation lists are never consulted.
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            before: Vec::new(),
            after: Vec::new(),
        }
    }

    /// Append an operation to the BEFORE-phase list
    pub fn with_before(mut self, operation: OperationRef) -> Self {
        self.before.push(operation);
        self
    }

    /// Append an operation to the AFTER-phase list
    pub fn with_after(mut self, operation: OperationRef) -> Self {
        self.after.push(operation);
        self
    }

    /// Whether dispatch is enabled for this entity type
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// BEFORE-phase operations, in execution order
    pub fn before_operations(&self) -> &[OperationRef] {
        &self.before
    }

    /// AFTER-phase operations, in execution order
    pub fn after_operations(&self) -> &[OperationRef] {
        &self.after
    }

    /// The operation list for a phase
    pub fn operations_for(&self, phase: Phase) -> &[OperationRef] {
        match phase {
            Phase::Before => &self.before,
            Phase::After => &self.after,
        }
    }
}

impl std::fmt::Debug for EntityConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EntityConfig")
            .field("enabled", &self.enabled)
            .field(
                "before",
                &self.before.iter().map(|op| op.name()).collect::<Vec<_>>(),
            )
            .field(
                "after",
                &self.after.iter().map(|op| op.name()).collect::<Vec<_>>(),
            )
            .finish()
    }
}

/// Immutable table of entity-type configurations
///
/// Built once during process startup and shared (typically behind an `Arc`)
/// with every dispatch call site. There is no lazy initialization and no
/// runtime mutation, so concurrent transactions never observe a partially
/// built table.
#[derive(Debug, Default)]
pub struct ConfigSet {
    configs: HashMap<String, EntityConfig>,
}

impl ConfigSet {
    /// Start building a config set programmatically
    pub fn builder() -> ConfigSetBuilder {
        ConfigSetBuilder::default()
    }

    /// Build a config set from a declared document
    ///
    /// Every operation identifier in the document is resolved through the
    /// registry here, eagerly; the first unresolvable identifier fails the
    /// build. The document is validated first.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfiguration` for a malformed document and
    /// `UnknownOperation`, carrying the entity type whose declaration
    /// referenced it, for an unregistered identifier.
    pub fn from_document(document: &ConfigDocument, registry: &OperationRegistry) -> Result<Self> {
        ConfigValidator::validate_document(document)?;

        let mut configs = HashMap::new();
        for (entity, spec) in &document.entities {
            let mut config = if spec.enabled {
                EntityConfig::enabled()
            } else {
                EntityConfig::disabled()
            };

            for identifier in &spec.before_operations {
                let operation = registry
                    .resolve(identifier)
                    .map_err(|e| e.with_entity(entity))?;
                config = config.with_before(operation);
            }
            for identifier in &spec.after_operations {
                let operation = registry
                    .resolve(identifier)
                    .map_err(|e| e.with_entity(entity))?;
                config = config.with_after(operation);
            }

            debug!(
                entity = %entity,
                enabled = spec.enabled,
                before_count = spec.before_operations.len(),
                after_count = spec.after_operations.len(),
                "Resolved entity configuration"
            );
            configs.insert(entity.clone(), config);
        }

        info!(entity_count = configs.len(), "Built configuration set");
        Ok(Self { configs })
    }

    /// Configuration for an entity type
    ///
    /// # Errors
    ///
    /// Returns `ConfigNotFound` if no configuration is registered for the
    /// key.
    pub fn get(&self, entity: &str) -> Result<&EntityConfig> {
        self.configs
            .get(entity)
            .ok_or_else(|| TriggerError::ConfigNotFound(entity.to_string()))
    }

    /// Whether a configuration exists for an entity type
    pub fn contains(&self, entity: &str) -> bool {
        self.configs.contains_key(entity)
    }

    /// Configured entity-type keys, in no particular order
    pub fn entities(&self) -> Vec<&str> {
        self.configs.keys().map(String::as_str).collect()
    }
}

/// Programmatic builder for a [`ConfigSet`]
///
/// The in-code equivalent of a configuration document: entity configs are
/// declared with live operation instances, no registry involved.
#[derive(Debug, Default)]
pub struct ConfigSetBuilder {
    configs: HashMap<String, EntityConfig>,
}

impl ConfigSetBuilder {
    /// Declare the configuration for an entity type
    ///
    /// A repeated key replaces the earlier declaration.
    pub fn entity(mut self, key: impl Into<String>, config: EntityConfig) -> Self {
        self.configs.insert(key.into(), config);
        self
    }

    /// Finish building
    pub fn build(self) -> ConfigSet {
        ConfigSet {
            configs: self.configs,
        }
    }
}
