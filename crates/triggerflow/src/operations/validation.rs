//! Prospect phone validation

use crate::{
    error::Result,
    operation::TriggerOperation,
    store::RecordStore,
    types::{ChangeKind, MutationEvent, Phase},
};

/// Rejection message attached to prospect accounts without a phone number
pub const MISSING_PHONE_MESSAGE: &str = "A prospect account must have a phone number";

/// Rejects prospect accounts that have no phone number
///
/// Active in the BEFORE phase on insert and update. Filters records whose
/// `type` is `"Prospect"` and whose `phone` is null or missing, and attaches
/// a record-level rejection to each. Records that do not match are untouched
/// and persist normally.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProspectPhoneValidation;

impl TriggerOperation for ProspectPhoneValidation {
    fn name(&self) -> &str {
        "prospect_phone_validation"
    }

    fn is_enabled(&self, event: &MutationEvent) -> bool {
        event.phase() == Phase::Before
            && matches!(event.change(), ChangeKind::Insert | ChangeKind::Update)
    }

    fn filter(&self, event: &MutationEvent) -> Vec<String> {
        event
            .candidates()
            .iter()
            .filter(|record| record.text("type") == Some("Prospect") && record.is_null("phone"))
            .map(|record| record.id.clone())
            .collect()
    }

    fn execute(
        &self,
        event: &mut MutationEvent,
        subset: &[String],
        _store: &dyn RecordStore,
    ) -> Result<()> {
        for id in subset {
            if let Some(record) = event.record_mut(id) {
                record.add_error(MISSING_PHONE_MESSAGE);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::{
        store::NullRecordStore,
        types::Record,
    };

    fn prospect(id: &str, phone: Option<&str>) -> Record {
        let record = Record::new(id).with_field("type", json!("Prospect"));
        match phone {
            Some(number) => record.with_field("phone", json!(number)),
            None => record.with_field("phone", json!(null)),
        }
    }

    fn customer(id: &str) -> Record {
        Record::new(id).with_field("type", json!("Customer"))
    }

    #[test]
    fn test_enabled_only_before_insert_and_update() {
        let op = ProspectPhoneValidation;

        let before_insert = MutationEvent::inserted(Phase::Before, vec![]);
        let before_update = MutationEvent::updated(Phase::Before, vec![], vec![]);
        let before_delete = MutationEvent::deleted(Phase::Before, vec![]);
        let before_undelete = MutationEvent::undeleted(Phase::Before, vec![]);
        let after_insert = MutationEvent::inserted(Phase::After, vec![]);

        assert!(op.is_enabled(&before_insert));
        assert!(op.is_enabled(&before_update));
        assert!(!op.is_enabled(&before_delete));
        assert!(!op.is_enabled(&before_undelete));
        assert!(!op.is_enabled(&after_insert));
    }

    #[test]
    fn test_filter_matches_prospects_without_phone() {
        let op = ProspectPhoneValidation;
        let event = MutationEvent::inserted(
            Phase::Before,
            vec![
                prospect("acc-1", None),
                prospect("acc-2", Some("555-0100")),
                customer("acc-3"),
            ],
        );

        assert_eq!(op.filter(&event), vec!["acc-1".to_string()]);
    }

    #[test]
    fn test_filter_matches_missing_phone_field() {
        let op = ProspectPhoneValidation;
        let event = MutationEvent::inserted(
            Phase::Before,
            vec![Record::new("acc-1").with_field("type", json!("Prospect"))],
        );

        assert_eq!(op.filter(&event).len(), 1);
    }

    #[test]
    fn test_execute_attaches_rejection() {
        let op = ProspectPhoneValidation;
        let mut event = MutationEvent::inserted(
            Phase::Before,
            vec![prospect("acc-1", None), prospect("acc-2", Some("555-0100"))],
        );

        let subset = op.filter(&event);
        op.execute(&mut event, &subset, &NullRecordStore).unwrap();

        let rejected = event.rejected_records();
        assert_eq!(rejected.len(), 1);
        assert_eq!(rejected[0].id, "acc-1");
        assert_eq!(rejected[0].errors, vec![MISSING_PHONE_MESSAGE.to_string()]);
    }

    #[test]
    fn test_unmatched_records_untouched() {
        let op = ProspectPhoneValidation;
        let mut event = MutationEvent::inserted(
            Phase::Before,
            vec![prospect("acc-1", None), customer("acc-2")],
        );

        let subset = op.filter(&event);
        op.execute(&mut event, &subset, &NullRecordStore).unwrap();

        let untouched = event
            .candidates()
            .iter()
            .find(|r| r.id == "acc-2")
            .unwrap();
        assert!(!untouched.is_rejected());
    }
}
