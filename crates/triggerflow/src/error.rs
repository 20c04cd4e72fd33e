//! Error types for the trigger dispatch engine
//!
//! This module defines the error taxonomy for the engine with clear messages
//! and context. All errors use the `thiserror` crate for ergonomic error
//! handling.
//!
//! # Error Handling Patterns
//!
//! The engine distinguishes three failure surfaces:
//!
//! 1. **Configuration-time errors**: malformed documents, unknown operation
//!    identifiers, and validation failures are raised while the configuration
//!    set is being built, before any event can be dispatched.
//!
//! 2. **Dispatch-time errors**: an unhandled failure inside an operation's
//!    `execute` aborts the remaining operations in the phase list and
//!    propagates to the caller. The dispatcher performs no local recovery.
//!
//! 3. **Record-level rejections**: business-rule rejections are not `Err`s at
//!    all. Operations attach them to the offending records via
//!    [`Record::add_error`](crate::types::Record::add_error) and the host
//!    inspects them after dispatch returns.

use thiserror::Error;

/// Errors that can occur in the trigger dispatch engine
///
/// Each variant includes context about what went wrong and where it was
/// detected.
#[derive(Debug, Error)]
pub enum TriggerError {
    /// No configuration registered for an entity type
    ///
    /// Raised by [`ConfigSet::get`](crate::config::ConfigSet::get) when the
    /// entity key has no declaration. Absence of configuration is usually a
    /// deployment gap rather than a data error; the entry point can be told
    /// to degrade to a no-op instead of propagating this.
    #[error("No configuration found for entity type: {0}")]
    ConfigNotFound(String),

    /// An operation identifier could not be resolved
    ///
    /// Raised while building a configuration set from a document. Resolution
    /// is eager, so an unresolvable identifier fails the build before any
    /// event is dispatched. `entity` names the entity type whose declaration
    /// referenced the identifier; it is `None` when the registry is queried
    /// directly.
    #[error("Unknown operation identifier '{identifier}'{}", entity_context(.entity))]
    UnknownOperation {
        /// The identifier that failed to resolve
        identifier: String,
        /// Entity type whose configuration referenced the identifier
        entity: Option<String>,
    },

    /// Invalid configuration document
    ///
    /// The string contains details about what is wrong with the document.
    /// Common causes:
    /// - Malformed YAML or JSON syntax
    /// - Empty entity keys or operation identifiers
    /// - Invalid identifier format
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// An operation failed during dispatch
    ///
    /// This aborts the remaining operations in the phase list and the whole
    /// dispatch (fail-fast, no partial application).
    #[error("Operation '{operation}' failed: {message}")]
    ExecutionFailed {
        /// Name of the operation that failed
        operation: String,
        /// What went wrong
        message: String,
    },

    /// Record store error
    ///
    /// Raised by [`RecordStore`](crate::store::RecordStore) implementations
    /// when a related-record read or write fails.
    #[error("Record store error: {0}")]
    StoreError(String),

    /// YAML serialization error
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_yaml::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl TriggerError {
    /// Attach entity-type context to an `UnknownOperation` error
    ///
    /// Other variants pass through unchanged.
    pub(crate) fn with_entity(self, entity: &str) -> Self {
        match self {
            Self::UnknownOperation { identifier, .. } => Self::UnknownOperation {
                identifier,
                entity: Some(entity.to_string()),
            },
            other => other,
        }
    }
}

fn entity_context(entity: &Option<String>) -> String {
    match entity {
        Some(entity) => format!(" for entity type '{}'", entity),
        None => String::new(),
    }
}

/// Result type for engine operations
///
/// This is the standard result type used throughout the engine. All public
/// APIs return `Result<T>` where `T` is the success type.
pub type Result<T> = std::result::Result<T, TriggerError>;
