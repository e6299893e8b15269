// Generic record store backed by best-effort key-value storage

use crate::error::StorageError;
use crate::filter::Filter;
use crate::pipeline::filter_stage;
use crate::record::{Record, RecordId};
use crate::storage::{KeyValueStorage, validate_key};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Default number of records returned by `get_others`
pub const DEFAULT_RELATED_LIMIT: usize = 6;

/// Canonical in-memory collection for one record type
///
/// The collection is only ever mutated through `add`. Every mutation writes the
/// whole collection back to storage under `R::collection_name()`.
pub struct RecordStore<R: Record> {
    records: Vec<R>,
    storage: Arc<dyn KeyValueStorage>,
}

impl<R: Record> RecordStore<R> {
    /// Hydrate from storage, falling back to `seed` on any load error
    pub fn open(storage: Arc<dyn KeyValueStorage>, seed: Vec<R>) -> Self {
        let collection = R::collection_name();

        let records = match Self::load(storage.as_ref()) {
            Ok(records) => {
                info!(collection, count = records.len(), "Loaded records from storage");
                records
            }
            Err(StorageError::NotFound { .. }) | Err(StorageError::Unavailable) => {
                debug!(collection, count = seed.len(), "Nothing stored, using seed data");
                seed
            }
            Err(e) => {
                warn!(collection, error = %e, "Stored records unusable, using seed data");
                seed
            }
        };

        Self { records, storage }
    }

    /// Read the stored collection for `R`
    ///
    /// A missing key, a value that is not a JSON array of `R`, an empty array and
    /// a collection with repeated ids are all errors. The caller decides what to
    /// fall back to.
    pub fn load(storage: &dyn KeyValueStorage) -> Result<Vec<R>, StorageError> {
        let key = R::collection_name();
        validate_key(key)?;

        let raw = storage.get(key)?.ok_or_else(|| StorageError::NotFound { key: key.to_string() })?;

        let records: Vec<R> = serde_json::from_str(&raw).map_err(|source| StorageError::Parse {
            key: key.to_string(),
            source,
        })?;

        if records.is_empty() {
            return Err(StorageError::Empty { key: key.to_string() });
        }

        let mut seen = HashSet::with_capacity(records.len());
        for record in &records {
            if !seen.insert(record.id()) {
                return Err(StorageError::DuplicateId {
                    key: key.to_string(),
                    id: record.id().to_string(),
                });
            }
        }

        Ok(records)
    }

    /// Write the full collection to storage
    pub fn save(&self) -> Result<(), StorageError> {
        let key = R::collection_name();
        let json = serde_json::to_string(&self.records).map_err(|source| StorageError::Serialize {
            key: key.to_string(),
            source,
        })?;

        self.storage.set(key, &json)?;
        debug!(collection = key, count = self.records.len(), "Saved records");
        Ok(())
    }

    /// Insert a new record built from `draft` at the front of the collection
    ///
    /// Persistence is best-effort: a failed write is logged and the in-memory
    /// insert stands.
    pub fn add(&mut self, draft: R::Draft) -> &R {
        let id = self.fresh_id();
        debug!(collection = R::collection_name(), %id, "Adding record");

        self.records.insert(0, R::from_draft(id, draft));

        if let Err(e) = self.save() {
            warn!(collection = R::collection_name(), error = %e, "Failed to persist records");
        }

        &self.records[0]
    }

    fn fresh_id(&self) -> RecordId {
        loop {
            let id = RecordId::Text(Uuid::now_v7().to_string());
            if !self.records.iter().any(|r| r.id() == &id) {
                return id;
            }
        }
    }

    /// Look up a record by stringified id
    pub fn get_by_id(&self, id: &str) -> Option<&R> {
        self.records.iter().find(|r| r.id().matches(id))
    }

    /// Up to `limit` records other than `exclude_id`, in collection order
    pub fn get_others(&self, exclude_id: &str, limit: usize) -> Vec<&R> {
        self.records
            .iter()
            .filter(|r| !r.id().matches(exclude_id))
            .take(limit)
            .collect()
    }

    /// Records matching every filter, in collection order
    pub fn list(&self, filters: &[Filter]) -> Vec<&R> {
        filter_stage(self.records.iter().collect(), filters)
    }

    pub fn records(&self) -> &[R] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
