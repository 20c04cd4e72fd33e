//! Property-based tests for the dispatch algorithm

use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc, Mutex,
};

use proptest::prelude::*;
use serde_json::json;
use triggerflow::{
    error::Result,
    ChangeKind, DefaultTriggerDispatcher, EntityConfig, MutationEvent, NullRecordStore, Phase,
    Record, RecordStore, TriggerDispatcher, TriggerOperation,
};

/// Operation that records its own invocations
struct ProbeOperation {
    name: String,
    phase: Option<Phase>,
    invocations: Arc<Mutex<Vec<String>>>,
    execute_count: Arc<AtomicUsize>,
}

impl ProbeOperation {
    fn new(name: String, invocations: Arc<Mutex<Vec<String>>>) -> Arc<Self> {
        Arc::new(Self {
            name,
            phase: None,
            invocations,
            execute_count: Arc::new(AtomicUsize::new(0)),
        })
    }

    fn for_phase(name: String, phase: Phase) -> Arc<Self> {
        Arc::new(Self {
            name,
            phase: Some(phase),
            invocations: Arc::new(Mutex::new(Vec::new())),
            execute_count: Arc::new(AtomicUsize::new(0)),
        })
    }
}

impl TriggerOperation for ProbeOperation {
    fn name(&self) -> &str {
        &self.name
    }

    fn is_enabled(&self, event: &MutationEvent) -> bool {
        match self.phase {
            Some(phase) => event.phase() == phase,
            None => true,
        }
    }

    fn filter(&self, event: &MutationEvent) -> Vec<String> {
        event.candidates().iter().map(|r| r.id.clone()).collect()
    }

    fn execute(
        &self,
        _event: &mut MutationEvent,
        _subset: &[String],
        _store: &dyn RecordStore,
    ) -> Result<()> {
        self.execute_count.fetch_add(1, Ordering::SeqCst);
        self.invocations.lock().unwrap().push(self.name.clone());
        Ok(())
    }
}

/// Strategy for generating operation names
fn op_names_strategy() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec("[a-z_]{3,12}", 1..8)
}

/// Strategy for generating non-empty record batches
fn batch_strategy() -> impl Strategy<Value = Vec<Record>> {
    prop::collection::vec("[a-z0-9]{4,10}", 1..20).prop_map(|ids| {
        ids.into_iter()
            .enumerate()
            .map(|(i, id)| {
                Record::new(format!("{}-{}", id, i)).with_field("seq", json!(i as i64))
            })
            .collect()
    })
}

proptest! {
    /// Operation invocation order equals declaration order, for any list of
    /// operations and any batch, deterministically.
    #[test]
    fn prop_invocation_order_is_declaration_order(
        names in op_names_strategy(),
        batch in batch_strategy(),
    ) {
        let invocations = Arc::new(Mutex::new(Vec::new()));

        let mut config = EntityConfig::enabled();
        for name in &names {
            config = config.with_before(ProbeOperation::new(name.clone(), invocations.clone()));
        }

        let mut event = MutationEvent::inserted(Phase::Before, batch);
        DefaultTriggerDispatcher::new()
            .handle(&mut event, &config, &NullRecordStore)
            .unwrap();

        prop_assert_eq!(&*invocations.lock().unwrap(), &names);
    }

    /// Repeated dispatch over an identical event produces the identical
    /// invocation sequence.
    #[test]
    fn prop_dispatch_is_deterministic(
        names in op_names_strategy(),
        batch in batch_strategy(),
    ) {
        let first = Arc::new(Mutex::new(Vec::new()));
        let second = Arc::new(Mutex::new(Vec::new()));

        for invocations in [&first, &second] {
            let mut config = EntityConfig::enabled();
            for name in &names {
                config = config.with_before(ProbeOperation::new(name.clone(), invocations.clone()));
            }
            let mut event = MutationEvent::inserted(Phase::Before, batch.clone());
            DefaultTriggerDispatcher::new()
                .handle(&mut event, &config, &NullRecordStore)
                .unwrap();
        }

        prop_assert_eq!(&*first.lock().unwrap(), &*second.lock().unwrap());
    }

    /// A disabled configuration performs zero invocations for any event shape.
    #[test]
    fn prop_disabled_config_never_invokes(
        names in op_names_strategy(),
        batch in batch_strategy(),
        before in any::<bool>(),
    ) {
        let invocations = Arc::new(Mutex::new(Vec::new()));

        let mut config = EntityConfig::disabled();
        for name in &names {
            config = config
                .with_before(ProbeOperation::new(name.clone(), invocations.clone()))
                .with_after(ProbeOperation::new(name.clone(), invocations.clone()));
        }

        let phase = if before { Phase::Before } else { Phase::After };
        let mut event = MutationEvent::inserted(phase, batch);
        DefaultTriggerDispatcher::new()
            .handle(&mut event, &config, &NullRecordStore)
            .unwrap();

        prop_assert!(invocations.lock().unwrap().is_empty());
    }

    /// Only the phase-list matching the event's phase runs, for any batch.
    #[test]
    fn prop_phase_lists_are_exclusive(
        batch in batch_strategy(),
        before in any::<bool>(),
    ) {
        let before_op = ProbeOperation::for_phase("before_op".to_string(), Phase::Before);
        let after_op = ProbeOperation::for_phase("after_op".to_string(), Phase::After);

        let config = EntityConfig::enabled()
            .with_before(before_op.clone())
            .with_after(after_op.clone());

        let phase = if before { Phase::Before } else { Phase::After };
        let mut event = MutationEvent::inserted(phase, batch);
        DefaultTriggerDispatcher::new()
            .handle(&mut event, &config, &NullRecordStore)
            .unwrap();

        let before_runs = before_op.execute_count.load(Ordering::SeqCst);
        let after_runs = after_op.execute_count.load(Ordering::SeqCst);
        if before {
            prop_assert_eq!((before_runs, after_runs), (1, 0));
        } else {
            prop_assert_eq!((before_runs, after_runs), (0, 1));
        }
    }

    /// Delete events filter over old records; every candidate id is an old
    /// record id.
    #[test]
    fn prop_delete_candidates_are_old_records(batch in batch_strategy()) {
        let event = MutationEvent::deleted(Phase::Before, batch.clone());

        prop_assert_eq!(event.change(), ChangeKind::Delete);
        prop_assert_eq!(event.candidates().len(), batch.len());
        for record in event.candidates() {
            prop_assert!(event.old_record(&record.id).is_some());
        }
    }
}
