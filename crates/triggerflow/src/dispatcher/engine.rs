//! Dispatch algorithm implementation

use tracing::{debug, error, info};

use crate::{
    config::EntityConfig,
    error::Result,
    store::RecordStore,
    types::MutationEvent,
};

/// Default implementation of [`TriggerDispatcher`](super::TriggerDispatcher)
///
/// Stateless; all dispatch state lives on the event and the configuration.
/// Operations run strictly sequentially, so a BEFORE-phase operation's
/// in-place record mutation is visible to the operations after it in the same
/// list.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultTriggerDispatcher;

impl DefaultTriggerDispatcher {
    /// Create a dispatcher
    pub fn new() -> Self {
        Self
    }
}

impl super::TriggerDispatcher for DefaultTriggerDispatcher {
    fn handle(
        &self,
        event: &mut MutationEvent,
        config: &EntityConfig,
        store: &dyn RecordStore,
    ) -> Result<()> {
        if !config.is_enabled() {
            debug!(
                phase = ?event.phase(),
                change = ?event.change(),
                "Dispatch disabled by configuration"
            );
            return Ok(());
        }

        let operations = config.operations_for(event.phase());
        debug!(
            phase = ?event.phase(),
            change = ?event.change(),
            operation_count = operations.len(),
            batch_size = event.candidates().len(),
            "Dispatching event"
        );

        for operation in operations {
            if !operation.is_enabled(event) {
                debug!(
                    operation = %operation.name(),
                    "Operation not enabled for this event, skipping"
                );
                continue;
            }

            let subset = operation.filter(event);
            if subset.is_empty() {
                debug!(
                    operation = %operation.name(),
                    "No qualifying records, skipping"
                );
                continue;
            }

            info!(
                operation = %operation.name(),
                record_count = subset.len(),
                "Executing operation"
            );

            // Fail-fast: the first error aborts the remaining operations and
            // propagates to the host transaction untouched.
            operation.execute(event, &subset, store).map_err(|e| {
                error!(
                    operation = %operation.name(),
                    error = %e,
                    "Operation failed, aborting dispatch"
                );
                e
            })?;
        }

        Ok(())
    }
}
