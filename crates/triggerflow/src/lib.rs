//! Triggerflow
//!
//! Configuration-driven dispatch for record-trigger hooks: which lifecycle
//! phase fired, whether dispatch is enabled, which records qualify, and which
//! operations run, all decided by the engine so that operation authors write
//! small, independently testable units instead of monolithic trigger bodies.
//!
//! # Architecture
//!
//! The engine consists of five components:
//!
//! 1. **Operation contract** (`operation`): the enable/filter/execute unit of
//!    business logic
//! 2. **Operation registry** (`registry`): explicit identifier-to-factory
//!    table, populated at startup
//! 3. **Configuration** (`config`): per-entity enablement and ordered
//!    operation lists, built once and immutable
//! 4. **Dispatcher** (`dispatcher`): runs the phase-appropriate operations in
//!    declared order against the record subsets they ask for
//! 5. **Entry point** (`entry`): the thin adapter between the host platform's
//!    mutation notifications and the dispatcher
//!
//! Data flow: platform mutation event → entry point → dispatcher → for each
//! qualifying operation: `filter(batch)` → `execute(subset)`.
//!
//! # Quick Start
//!
//! ```
//! use std::sync::Arc;
//! use serde_json::json;
//! use triggerflow::{
//!     ConfigLoader, ConfigSet, EmployeeHeadcountCascade, InMemoryRecordStore,
//!     MutationEvent, OperationRegistry, Phase, ProspectPhoneValidation, Record,
//!     TriggerEntryPoint,
//! };
//!
//! // Register operation factories at startup; identifiers in configuration
//! // documents resolve against this table.
//! let mut registry = OperationRegistry::new();
//! registry
//!     .register("prospect_phone_validation", || Arc::new(ProspectPhoneValidation))
//!     .unwrap();
//! registry
//!     .register("employee_headcount_cascade", || {
//!         Arc::new(EmployeeHeadcountCascade::new())
//!     })
//!     .unwrap();
//!
//! // Build the immutable configuration set from a declared document.
//! let document = ConfigLoader::from_yaml_str(
//!     r#"
//! entities:
//!   account:
//!     enabled: true
//!     before_operations: [prospect_phone_validation]
//!     after_operations: [employee_headcount_cascade]
//! "#,
//! )
//! .unwrap();
//! let configs = Arc::new(ConfigSet::from_document(&document, &registry).unwrap());
//!
//! // Dispatch an event through the entry point.
//! let entry = TriggerEntryPoint::new(configs);
//! let store = InMemoryRecordStore::new();
//! let mut event = MutationEvent::inserted(
//!     Phase::Before,
//!     vec![Record::new("acc-1").with_field("type", json!("Prospect"))],
//! );
//!
//! entry.dispatch("account", &mut event, &store).unwrap();
//! assert_eq!(event.rejected_records().len(), 1);
//! ```
//!
//! # Configuration
//!
//! Configuration documents map entity-type keys to an enablement flag and
//! ordered operation identifier lists (YAML or JSON):
//!
//! ```yaml
//! entities:
//!   account:
//!     enabled: true
//!     before_operations:
//!       - prospect_phone_validation
//!     after_operations:
//!       - employee_headcount_cascade
//! ```
//!
//! List order is execution order. Identifiers are resolved eagerly while the
//! configuration set is built, so a typo fails at startup, not mid-dispatch.
//! A programmatic builder ([`ConfigSet::builder`]) produces structurally
//! identical configuration sets; the dispatcher cannot tell the sources
//! apart.
//!
//! # Error Handling
//!
//! All operations return [`Result<T>`](error::Result), an alias for
//! `std::result::Result<T, TriggerError>`. Business-rule rejections are not
//! errors: they attach to individual records ([`Record::add_error`]) and the
//! host inspects them after dispatch. An operation `Err` aborts the remaining
//! operations in the phase list and propagates to the host transaction
//! (fail-fast, no partial application).
//!
//! # Concurrency
//!
//! Dispatch is synchronous and in-process: one call per mutation event, no
//! internal threading, no retry, no timeouts. The configuration set is built
//! once at startup and shared immutably, so there is no lazy-initialization
//! race. All public types are `Send + Sync`; hosts may dispatch from multiple
//! worker threads as long as each event is owned by one of them.

pub mod config;
pub mod dispatcher;
pub mod entry;
pub mod error;
pub mod operation;
pub mod operations;
pub mod registry;
pub mod store;
pub mod types;

// Re-export public types
pub use config::{
    ConfigDocument, ConfigLoader, ConfigSet, ConfigSetBuilder, ConfigValidator, EntityConfig,
    EntityConfigSpec,
};
pub use dispatcher::{DefaultTriggerDispatcher, TriggerDispatcher};
pub use entry::{MissingConfigPolicy, TriggerEntryPoint};
pub use error::{Result, TriggerError};
pub use operation::{OperationRef, TriggerOperation};
pub use operations::{EmployeeHeadcountCascade, ProspectPhoneValidation};
pub use registry::OperationRegistry;
pub use store::{InMemoryRecordStore, NullRecordStore, RecordStore};
pub use types::{ChangeKind, MutationEvent, Phase, Record};
