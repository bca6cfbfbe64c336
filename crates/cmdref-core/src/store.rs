use crate::error::Error;
use crate::model::Record;
use std::collections::HashSet;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::{debug, warn};

static NEXT_STORE_ID: AtomicU64 = AtomicU64::new(1);

/// Process-unique identity of a [`RecordStore`]. Clones share it; every
/// freshly constructed store gets a new one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StoreId(u64);

impl StoreId {
    fn next() -> Self {
        StoreId(NEXT_STORE_ID.fetch_add(1, Ordering::SeqCst))
    }
}

/// Immutable, validated collection of records for one domain.
#[derive(Debug)]
pub struct RecordStore<T> {
    id: StoreId,
    records: Arc<[T]>,
}

impl<T> Clone for RecordStore<T> {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            records: Arc::clone(&self.records),
        }
    }
}

impl<T: Record> RecordStore<T> {
    /// Validate and freeze `records`. Ids must be unique and every record
    /// needs a non-empty category; incomplete records are kept but logged.
    pub fn new(records: Vec<T>) -> Result<Self, Error> {
        {
            let mut seen: HashSet<&str> = HashSet::with_capacity(records.len());
            for record in &records {
                if !seen.insert(record.id()) {
                    return Err(Error::DuplicateId(record.id().to_string()));
                }
                if record.category().is_empty() {
                    return Err(Error::EmptyCategory(record.id().to_string()));
                }
                if !record.is_complete() {
                    warn!("{} '{}' is incomplete", T::KIND.singular(), record.id());
                }
            }
        }

        let id = StoreId::next();
        debug!(
            "Record store {:?} holds {} {}",
            id,
            records.len(),
            T::KIND.plural()
        );

        Ok(Self {
            id,
            records: records.into(),
        })
    }

    pub fn get(&self, id: &str) -> Option<&T> {
        self.records.iter().find(|r| r.id() == id)
    }
}

impl<T> RecordStore<T> {
    pub fn id(&self) -> StoreId {
        self.id
    }

    pub fn records(&self) -> &[T] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.records.iter()
    }
}
