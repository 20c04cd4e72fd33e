//! Core data types for the trigger dispatch engine
//!
//! This module defines the record model and the mutation event that carries
//! one lifecycle notification through the engine.
//!
//! # Examples
//!
//! Building an update event for the BEFORE phase:
//!
//! ```
//! use serde_json::json;
//! use triggerflow::types::{ChangeKind, MutationEvent, Phase, Record};
//!
//! let old = Record::new("acc-1").with_field("number_of_employees", json!(40));
//! let new = Record::new("acc-1").with_field("number_of_employees", json!(60));
//!
//! let event = MutationEvent::updated(Phase::Before, vec![new], vec![old]);
//! assert_eq!(event.change(), ChangeKind::Update);
//! assert_eq!(event.candidates().len(), 1);
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Lifecycle phase of a mutation event
///
/// BEFORE runs pre-persistence: operations may mutate records in place to
/// affect what is persisted, and may attach record-level rejections. AFTER
/// runs post-persistence: records are committed, so operations are limited to
/// external writes such as related-record updates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    /// Pre-persistence, in-place mutation allowed
    Before,
    /// Post-persistence, external writes only
    After,
}

/// Kind of record mutation that produced an event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeKind {
    /// New records are being created
    Insert,
    /// Existing records are being modified
    Update,
    /// Records are being removed
    Delete,
    /// Previously deleted records are being restored
    Undelete,
}

/// A single record with typed fields
///
/// Fields are stored as `serde_json::Value` so operations can read and write
/// typed values without the engine knowing the entity's schema. Records also
/// carry their rejection surface: an operation that rejects a record attaches
/// a human-readable message via [`Record::add_error`], and the host treats any
/// record with errors as blocked from persistence.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Record {
    /// Record identifier, assigned by the host platform
    pub id: String,

    /// Field name to value
    pub fields: BTreeMap<String, Value>,

    /// Rejection messages attached by operations
    #[serde(default)]
    pub errors: Vec<String>,
}

impl Record {
    /// Create a record with the given id and no fields
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            fields: BTreeMap::new(),
            errors: Vec::new(),
        }
    }

    /// Builder-style field assignment
    pub fn with_field(mut self, name: impl Into<String>, value: Value) -> Self {
        self.fields.insert(name.into(), value);
        self
    }

    /// Get a field value
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    /// Set a field value
    pub fn set(&mut self, name: impl Into<String>, value: Value) {
        self.fields.insert(name.into(), value);
    }

    /// Get a field as a string slice, if present and textual
    pub fn text(&self, name: &str) -> Option<&str> {
        self.fields.get(name).and_then(|v| v.as_str())
    }

    /// Get a field as an integer, if present and numeric
    pub fn int(&self, name: &str) -> Option<i64> {
        self.fields.get(name).and_then(|v| v.as_i64())
    }

    /// True when the field is absent or explicitly null
    pub fn is_null(&self, name: &str) -> bool {
        match self.fields.get(name) {
            None => true,
            Some(v) => v.is_null(),
        }
    }

    /// Attach a record-level rejection message
    ///
    /// Rejected records are still part of the batch for later operations, but
    /// the host must not persist them.
    pub fn add_error(&mut self, message: impl Into<String>) {
        self.errors.push(message.into());
    }

    /// True when at least one rejection message is attached
    pub fn is_rejected(&self) -> bool {
        !self.errors.is_empty()
    }
}

/// One invocation of an entity's lifecycle hook
///
/// Constructed by the host platform per invocation and discarded after the
/// dispatcher returns. The presence of new/old record sets depends on the
/// change kind and is enforced by the constructors:
///
/// | change   | new records | old records |
/// |----------|-------------|-------------|
/// | insert   | yes         | no          |
/// | update   | yes         | yes         |
/// | delete   | no          | yes         |
/// | undelete | yes         | no          |
///
/// All lifecycle context an operation needs (phase, change kind, old and new
/// state) travels on this event; there is no ambient state.
#[derive(Debug, Clone)]
pub struct MutationEvent {
    phase: Phase,
    change: ChangeKind,
    new_records: Vec<Record>,
    old_records: Vec<Record>,
}

impl MutationEvent {
    /// Event for records being created
    pub fn inserted(phase: Phase, new_records: Vec<Record>) -> Self {
        Self {
            phase,
            change: ChangeKind::Insert,
            new_records,
            old_records: Vec::new(),
        }
    }

    /// Event for records being modified
    ///
    /// `old_records` holds the prior state of each record, matched to
    /// `new_records` by id.
    pub fn updated(phase: Phase, new_records: Vec<Record>, old_records: Vec<Record>) -> Self {
        Self {
            phase,
            change: ChangeKind::Update,
            new_records,
            old_records,
        }
    }

    /// Event for records being removed
    pub fn deleted(phase: Phase, old_records: Vec<Record>) -> Self {
        Self {
            phase,
            change: ChangeKind::Delete,
            new_records: Vec::new(),
            old_records,
        }
    }

    /// Event for previously deleted records being restored
    pub fn undeleted(phase: Phase, new_records: Vec<Record>) -> Self {
        Self {
            phase,
            change: ChangeKind::Undelete,
            new_records,
            old_records: Vec::new(),
        }
    }

    /// Lifecycle phase of this event
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Kind of mutation that produced this event
    pub fn change(&self) -> ChangeKind {
        self.change
    }

    /// New-state records (empty for delete events)
    pub fn new_records(&self) -> &[Record] {
        &self.new_records
    }

    /// Prior-state records (empty for insert and undelete events)
    pub fn old_records(&self) -> &[Record] {
        &self.old_records
    }

    /// Prior state of a record by id
    pub fn old_record(&self, id: &str) -> Option<&Record> {
        self.old_records.iter().find(|r| r.id == id)
    }

    /// The record batch operations filter over
    ///
    /// New records for insert, update, and undelete; old records for delete,
    /// since deleted records have no new state.
    pub fn candidates(&self) -> &[Record] {
        match self.change {
            ChangeKind::Delete => &self.old_records,
            _ => &self.new_records,
        }
    }

    /// Mutable access to the candidate batch
    ///
    /// BEFORE-phase operations use this to mutate records in place; the
    /// mutation is visible to later operations in the same phase list.
    pub fn candidates_mut(&mut self) -> &mut [Record] {
        match self.change {
            ChangeKind::Delete => &mut self.old_records,
            _ => &mut self.new_records,
        }
    }

    /// Mutable access to a candidate record by id
    pub fn record_mut(&mut self, id: &str) -> Option<&mut Record> {
        self.candidates_mut().iter_mut().find(|r| r.id == id)
    }

    /// Records with at least one rejection message attached
    pub fn rejected_records(&self) -> Vec<&Record> {
        self.candidates().iter().filter(|r| r.is_rejected()).collect()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn account(id: &str, employees: i64) -> Record {
        Record::new(id)
            .with_field("name", json!(format!("Account {}", id)))
            .with_field("number_of_employees", json!(employees))
    }

    #[test]
    fn test_record_field_accessors() {
        let record = account("acc-1", 40);

        assert_eq!(record.text("name"), Some("Account acc-1"));
        assert_eq!(record.int("number_of_employees"), Some(40));
        assert!(record.is_null("phone"));
        assert!(record.get("phone").is_none());
    }

    #[test]
    fn test_record_null_field() {
        let record = Record::new("acc-1").with_field("phone", json!(null));

        assert!(record.is_null("phone"));
        assert!(record.get("phone").is_some());
    }

    #[test]
    fn test_record_rejection() {
        let mut record = account("acc-1", 40);
        assert!(!record.is_rejected());

        record.add_error("missing phone");

        assert!(record.is_rejected());
        assert_eq!(record.errors.len(), 1);
    }

    #[test]
    fn test_insert_event_has_no_old_records() {
        let event = MutationEvent::inserted(Phase::Before, vec![account("acc-1", 10)]);

        assert_eq!(event.change(), ChangeKind::Insert);
        assert_eq!(event.new_records().len(), 1);
        assert!(event.old_records().is_empty());
    }

    #[test]
    fn test_delete_event_candidates_are_old_records() {
        let event = MutationEvent::deleted(Phase::Before, vec![account("acc-1", 10)]);

        assert!(event.new_records().is_empty());
        assert_eq!(event.candidates().len(), 1);
        assert_eq!(event.candidates()[0].id, "acc-1");
    }

    #[test]
    fn test_undelete_event_candidates_are_new_records() {
        let event = MutationEvent::undeleted(Phase::After, vec![account("acc-1", 10)]);

        assert_eq!(event.change(), ChangeKind::Undelete);
        assert!(event.old_records().is_empty());
        assert!(event.old_record("acc-1").is_none());
        assert_eq!(event.candidates().len(), 1);
        assert_eq!(event.candidates()[0].id, "acc-1");
    }

    #[test]
    fn test_update_event_old_record_lookup() {
        let event = MutationEvent::updated(
            Phase::After,
            vec![account("acc-1", 60)],
            vec![account("acc-1", 40)],
        );

        let old = event.old_record("acc-1").unwrap();
        assert_eq!(old.int("number_of_employees"), Some(40));
        assert!(event.old_record("acc-2").is_none());
    }

    #[test]
    fn test_record_mut_targets_candidate_batch() {
        let mut event = MutationEvent::inserted(Phase::Before, vec![account("acc-1", 10)]);

        event
            .record_mut("acc-1")
            .unwrap()
            .set("name", json!("Renamed"));

        assert_eq!(event.candidates()[0].text("name"), Some("Renamed"));
    }

    #[test]
    fn test_rejected_records() {
        let mut event = MutationEvent::inserted(
            Phase::Before,
            vec![account("acc-1", 10), account("acc-2", 20)],
        );

        event.record_mut("acc-2").unwrap().add_error("rejected");

        let rejected = event.rejected_records();
        assert_eq!(rejected.len(), 1);
        assert_eq!(rejected[0].id, "acc-2");
    }
}
