//! Record store collaborator
//!
//! The engine does not persist anything itself. Operations that need to read
//! or write related records do so through the [`RecordStore`] trait, and the
//! host supplies an implementation scoped to its own transaction. The
//! in-memory implementation here backs tests and examples.

use std::{
    collections::HashMap,
    sync::{Arc, RwLock},
};

use crate::{
    error::{Result, TriggerError},
    types::Record,
};

/// Data-access collaborator for operations
///
/// Reads and writes are expected to be bounded by the host platform's
/// transaction; the engine defines no retry or timeout semantics of its own.
pub trait RecordStore: Send + Sync {
    /// Load the records related to a parent record
    fn related(&self, parent_id: &str) -> Result<Vec<Record>>;

    /// Persist records
    ///
    /// Writes participate in the same transaction as the triggering event.
    fn save(&self, records: Vec<Record>) -> Result<()>;
}

/// In-memory record store
///
/// Holds related records keyed by parent id. `save` updates matching related
/// records in place and keeps a log of everything written, so tests can
/// assert on write counts and contents.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRecordStore {
    related: Arc<RwLock<HashMap<String, Vec<Record>>>>,
    saved: Arc<RwLock<Vec<Record>>>,
}

impl InMemoryRecordStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed related records for a parent
    pub fn insert_related(
        &self,
        parent_id: impl Into<String>,
        records: Vec<Record>,
    ) -> Result<()> {
        let mut related = self
            .related
            .write()
            .map_err(|e| TriggerError::StoreError(format!("Failed to acquire write lock: {}", e)))?;
        related.insert(parent_id.into(), records);
        Ok(())
    }

    /// Snapshot of every record passed to `save`, in write order
    pub fn saved(&self) -> Result<Vec<Record>> {
        let saved = self
            .saved
            .read()
            .map_err(|e| TriggerError::StoreError(format!("Failed to acquire read lock: {}", e)))?;
        Ok(saved.clone())
    }

    /// Number of records written so far
    pub fn save_count(&self) -> Result<usize> {
        let saved = self
            .saved
            .read()
            .map_err(|e| TriggerError::StoreError(format!("Failed to acquire read lock: {}", e)))?;
        Ok(saved.len())
    }
}

impl RecordStore for InMemoryRecordStore {
    fn related(&self, parent_id: &str) -> Result<Vec<Record>> {
        let related = self
            .related
            .read()
            .map_err(|e| TriggerError::StoreError(format!("Failed to acquire read lock: {}", e)))?;

        Ok(related.get(parent_id).cloned().unwrap_or_default())
    }

    fn save(&self, records: Vec<Record>) -> Result<()> {
        let mut related = self
            .related
            .write()
            .map_err(|e| TriggerError::StoreError(format!("Failed to acquire write lock: {}", e)))?;

        for record in &records {
            for children in related.values_mut() {
                if let Some(existing) = children.iter_mut().find(|c| c.id == record.id) {
                    *existing = record.clone();
                }
            }
        }
        drop(related);

        let mut saved = self
            .saved
            .write()
            .map_err(|e| TriggerError::StoreError(format!("Failed to acquire write lock: {}", e)))?;
        saved.extend(records);

        Ok(())
    }
}

/// Store for dispatches that touch no related data
///
/// `related` always returns an empty batch and `save` rejects writes, so an
/// operation that unexpectedly reaches for the store fails loudly.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullRecordStore;

impl RecordStore for NullRecordStore {
    fn related(&self, _parent_id: &str) -> Result<Vec<Record>> {
        Ok(Vec::new())
    }

    fn save(&self, _records: Vec<Record>) -> Result<()> {
        Err(TriggerError::StoreError(
            "NullRecordStore does not accept writes".to_string(),
        ))
    }
}
