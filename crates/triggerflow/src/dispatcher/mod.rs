//! Dispatcher for mutation events

pub mod engine;

pub use engine::DefaultTriggerDispatcher;

use crate::{
    config::EntityConfig,
    error::Result,
    store::RecordStore,
    types::MutationEvent,
};

/// Trait for dispatching one mutation event
///
/// The dispatcher is responsible for:
/// 1. Honoring the configuration's enablement short-circuit
/// 2. Selecting the phase-appropriate operation list
/// 3. Running each operation's enable/filter/execute contract in declared
///    order
/// 4. Relaying operation failures to the caller unchanged (fail-fast)
///
/// # Examples
///
/// ```ignore
/// let dispatcher = DefaultTriggerDispatcher;
/// let config = configs.get("account")?;
/// dispatcher.handle(&mut event, config, &store)?;
/// ```
pub trait TriggerDispatcher: Send + Sync {
    /// Dispatch a mutation event against an entity configuration
    ///
    /// Runs the configured operations for the event's phase, strictly
    /// sequentially and in declared order. The first operation `Err` aborts
    /// the remaining operations and propagates; the dispatcher performs no
    /// recovery and no retry.
    fn handle(
        &self,
        event: &mut MutationEvent,
        config: &EntityConfig,
        store: &dyn RecordStore,
    ) -> Result<()>;
}
