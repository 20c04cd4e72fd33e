//! Employee headcount cascade

use serde_json::json;
use tracing::debug;

use crate::{
    error::Result,
    operation::TriggerOperation,
    store::RecordStore,
    types::{ChangeKind, MutationEvent, Phase},
};

/// Default headcount threshold for the cascade
pub const DEFAULT_THRESHOLD: i64 = 50;

/// Cascades a description update to related records when an account grows
/// past a headcount threshold
///
/// Active in the AFTER phase on update. Filters records whose
/// `number_of_employees` crossed the threshold between old and new state
/// (old at or below, new above). For every matched account, rewrites the
/// `description` of each related record and saves them through the store.
/// Unmatched accounts cause zero store calls; the filter makes a second
/// dispatch over already-updated records a no-op.
#[derive(Debug, Clone, Copy)]
pub struct EmployeeHeadcountCascade {
    threshold: i64,
}

impl EmployeeHeadcountCascade {
    /// Cascade with the default threshold of 50 employees
    pub fn new() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
        }
    }

    /// Cascade with a custom threshold
    pub fn with_threshold(threshold: i64) -> Self {
        Self { threshold }
    }

    fn crossed_threshold(&self, old: Option<i64>, new: Option<i64>) -> bool {
        match (old, new) {
            (Some(old), Some(new)) => old <= self.threshold && new > self.threshold,
            _ => false,
        }
    }
}

impl Default for EmployeeHeadcountCascade {
    fn default() -> Self {
        Self::new()
    }
}

impl TriggerOperation for EmployeeHeadcountCascade {
    fn name(&self) -> &str {
        "employee_headcount_cascade"
    }

    fn is_enabled(&self, event: &MutationEvent) -> bool {
        event.phase() == Phase::After && event.change() == ChangeKind::Update
    }

    fn filter(&self, event: &MutationEvent) -> Vec<String> {
        event
            .candidates()
            .iter()
            .filter(|record| {
                let old = event
                    .old_record(&record.id)
                    .and_then(|r| r.int("number_of_employees"));
                self.crossed_threshold(old, record.int("number_of_employees"))
            })
            .map(|record| record.id.clone())
            .collect()
    }

    fn execute(
        &self,
        event: &mut MutationEvent,
        subset: &[String],
        store: &dyn RecordStore,
    ) -> Result<()> {
        for id in subset {
            let account_name = event
                .candidates()
                .iter()
                .find(|r| &r.id == id)
                .and_then(|r| r.text("name"))
                .unwrap_or(id)
                .to_string();

            let mut related = store.related(id)?;
            if related.is_empty() {
                debug!(account = %id, "No related records to cascade to");
                continue;
            }

            for record in &mut related {
                record.set(
                    "description",
                    json!(format!(
                        "Related to {}, which now has more than {} employees",
                        account_name, self.threshold
                    )),
                );
            }

            debug!(
                account = %id,
                related_count = related.len(),
                "Cascading description update to related records"
            );
            store.save(related)?;
        }
        Ok(())
    }
}
