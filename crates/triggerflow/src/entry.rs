//! Entry point adapter
//!
//! The thin layer between the host platform's mutation notifications and the
//! dispatcher. It looks up the entity's configuration, applies the missing-
//! configuration policy, and hands the event to the dispatcher. It performs
//! no business logic itself and must be invoked for every phase and change
//! kind the configuration set declares interest in; individual operations
//! self-filter from there.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::{
    config::ConfigSet,
    dispatcher::{DefaultTriggerDispatcher, TriggerDispatcher},
    error::{Result, TriggerError},
    store::RecordStore,
    types::MutationEvent,
};

/// What to do when an entity type has no configuration
///
/// Absence of configuration is usually a deployment gap rather than a data
/// error, so the default is to log and skip rather than abort the host
/// transaction. This is a construction-time decision: pick the policy when
/// wiring the entry point, not per event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MissingConfigPolicy {
    /// Log a warning and dispatch nothing
    #[default]
    Ignore,
    /// Propagate `ConfigNotFound` to the caller
    Fail,
}

/// Per-entity trigger entry point
///
/// # Examples
///
/// ```ignore
/// let entry = TriggerEntryPoint::new(configs);
/// entry.dispatch("account", &mut event, &store)?;
/// ```
pub struct TriggerEntryPoint {
    configs: Arc<ConfigSet>,
    dispatcher: Arc<dyn TriggerDispatcher>,
    missing: MissingConfigPolicy,
}

impl TriggerEntryPoint {
    /// Entry point with the default dispatcher and missing-config policy
    pub fn new(configs: Arc<ConfigSet>) -> Self {
        Self {
            configs,
            dispatcher: Arc::new(DefaultTriggerDispatcher::new()),
            missing: MissingConfigPolicy::default(),
        }
    }

    /// Replace the dispatcher
    pub fn with_dispatcher(mut self, dispatcher: Arc<dyn TriggerDispatcher>) -> Self {
        self.dispatcher = dispatcher;
        self
    }

    /// Set the missing-configuration policy
    pub fn with_missing_policy(mut self, policy: MissingConfigPolicy) -> Self {
        self.missing = policy;
        self
    }

    /// Translate one platform notification into a dispatch
    ///
    /// # Errors
    ///
    /// Propagates `ConfigNotFound` when the policy is `Fail`, and any
    /// operation failure from the dispatcher.
    pub fn dispatch(
        &self,
        entity: &str,
        event: &mut MutationEvent,
        store: &dyn RecordStore,
    ) -> Result<()> {
        let config = match self.configs.get(entity) {
            Ok(config) => config,
            Err(TriggerError::ConfigNotFound(key)) => {
                return match self.missing {
                    MissingConfigPolicy::Ignore => {
                        warn!(
                            entity = %key,
                            "No configuration for entity type, skipping dispatch"
                        );
                        Ok(())
                    }
                    MissingConfigPolicy::Fail => Err(TriggerError::ConfigNotFound(key)),
                };
            }
            Err(e) => return Err(e),
        };

        debug!(
            entity = %entity,
            phase = ?event.phase(),
            change = ?event.change(),
            "Entry point dispatching event"
        );
        self.dispatcher.handle(event, config, store)
    }
}
