//! The operation contract
//!
//! An operation is a named, stateless unit of business logic bound to one
//! entity type. Operations never see the whole dispatch: the dispatcher asks
//! each one whether it is active for the current event, which records it
//! cares about, and then hands it exactly that subset.

use std::sync::Arc;

use crate::{
    error::Result,
    store::RecordStore,
    types::MutationEvent,
};

/// A unit of trigger business logic
///
/// Implementations must be `Send + Sync`; one shared instance may serve many
/// dispatches, so any per-dispatch state belongs on the event, not on the
/// operation.
///
/// # Contract
///
/// * [`is_enabled`](TriggerOperation::is_enabled) is a pure predicate over the
///   event context (typically phase and change kind). It lets an operation be
///   conditionally active, for example "only on update", independent of the
///   configuration's static enablement.
/// * [`filter`](TriggerOperation::filter) selects the subset of the candidate
///   batch this operation must process, returned as record ids. It must not
///   mutate the event; an empty result means nothing qualifies and `execute`
///   will not be called.
/// * [`execute`](TriggerOperation::execute) is the side-effecting body. In the
///   BEFORE phase it may mutate records in place (affecting what is persisted)
///   and attach record-level rejections; in the AFTER phase it is limited to
///   external writes through the store. An `Err` aborts the remaining
///   operations in the phase list.
///
/// # Examples
///
/// ```
/// use triggerflow::{
///     error::Result,
///     operation::TriggerOperation,
///     store::RecordStore,
///     types::{ChangeKind, MutationEvent, Phase},
/// };
///
/// struct RequireName;
///
/// impl TriggerOperation for RequireName {
///     fn name(&self) -> &str {
///         "require_name"
///     }
///
///     fn is_enabled(&self, event: &MutationEvent) -> bool {
///         event.phase() == Phase::Before && event.change() == ChangeKind::Insert
///     }
///
///     fn filter(&self, event: &MutationEvent) -> Vec<String> {
///         event
///             .candidates()
///             .iter()
///             .filter(|r| r.is_null("name"))
///             .map(|r| r.id.clone())
///             .collect()
///     }
///
///     fn execute(
///         &self,
///         event: &mut MutationEvent,
///         subset: &[String],
///         _store: &dyn RecordStore,
///     ) -> Result<()> {
///         for id in subset {
///             if let Some(record) = event.record_mut(id) {
///                 record.add_error("Name is required");
///             }
///         }
///         Ok(())
///     }
/// }
/// ```
pub trait TriggerOperation: Send + Sync {
    /// Logical identity of the operation, used in logs and error messages
    fn name(&self) -> &str;

    /// Whether this operation is active for the given event
    ///
    /// Evaluated before `filter`; a `false` skips the operation entirely.
    fn is_enabled(&self, event: &MutationEvent) -> bool;

    /// Ids of the candidate records this operation must process
    ///
    /// Must not mutate the event. Returns an empty vector when nothing
    /// qualifies.
    fn filter(&self, event: &MutationEvent) -> Vec<String>;

    /// Run the business logic against the filtered subset
    ///
    /// Called only when `filter` returned a non-empty subset.
    fn execute(
        &self,
        event: &mut MutationEvent,
        subset: &[String],
        store: &dyn RecordStore,
    ) -> Result<()>;
}

/// Shared handle to an operation, as stored in resolved configurations
pub type OperationRef = Arc<dyn TriggerOperation>;
