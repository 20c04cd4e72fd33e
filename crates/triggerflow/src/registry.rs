//! Operation registry
//!
//! Maps operation identifiers, as they appear in configuration documents, to
//! factories for the concrete operation types. The registry is populated
//! explicitly at process startup; there is no runtime type-name resolution.
//! Every identifier a configuration document references is resolved eagerly
//! while the configuration set is built, so an unresolvable identifier fails
//! before any event can be dispatched.
//!
//! # Examples
//!
//! ```
//! use std::sync::Arc;
//! use triggerflow::{
//!     operations::ProspectPhoneValidation,
//!     registry::OperationRegistry,
//! };
//!
//! let mut registry = OperationRegistry::new();
//! registry
//!     .register("prospect_phone_validation", || Arc::new(ProspectPhoneValidation))
//!     .unwrap();
//!
//! let op = registry.resolve("prospect_phone_validation").unwrap();
//! assert_eq!(op.name(), "prospect_phone_validation");
//! ```

use std::collections::HashMap;

use tracing::debug;

use crate::{
    error::{Result, TriggerError},
    operation::OperationRef,
};

type OperationFactory = Box<dyn Fn() -> OperationRef + Send + Sync>;

/// Explicit identifier-to-factory table for operations
///
/// Built once at startup and handed (by reference) to the configuration
/// builder. Not consulted again after configuration resolution.
#[derive(Default)]
pub struct OperationRegistry {
    factories: HashMap<String, OperationFactory>,
}

impl OperationRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a factory under an identifier
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfiguration` if the identifier is empty or already
    /// registered. Duplicate registration is refused rather than silently
    /// overwritten so a wiring mistake surfaces at startup.
    pub fn register<F>(&mut self, identifier: impl Into<String>, factory: F) -> Result<()>
    where
        F: Fn() -> OperationRef + Send + Sync + 'static,
    {
        let identifier = identifier.into();
        if identifier.is_empty() {
            return Err(TriggerError::InvalidConfiguration(
                "Operation identifier cannot be empty".to_string(),
            ));
        }
        if self.factories.contains_key(&identifier) {
            return Err(TriggerError::InvalidConfiguration(format!(
                "Operation identifier already registered: '{}'",
                identifier
            )));
        }

        debug!(identifier = %identifier, "Registered operation factory");
        self.factories.insert(identifier, Box::new(factory));
        Ok(())
    }

    /// Instantiate the operation registered under an identifier
    ///
    /// # Errors
    ///
    /// Returns `UnknownOperation` if no factory is registered.
    pub fn resolve(&self, identifier: &str) -> Result<OperationRef> {
        self.factories
            .get(identifier)
            .map(|factory| factory())
            .ok_or_else(|| TriggerError::UnknownOperation {
                identifier: identifier.to_string(),
                entity: None,
            })
    }

    /// Whether an identifier is registered
    pub fn contains(&self, identifier: &str) -> bool {
        self.factories.contains_key(identifier)
    }

    /// Registered identifiers, in no particular order
    pub fn identifiers(&self) -> Vec<&str> {
        self.factories.keys().map(String::as_str).collect()
    }
}

impl std::fmt::Debug for OperationRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OperationRegistry")
            .field("identifiers", &self.identifiers())
            .finish()
    }
}
