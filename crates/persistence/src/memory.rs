// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{PassStore, PersistenceError};
use exit_pass_audit::AuditEvent;
use exit_pass_domain::{PassFilter, PassRequest, PassRequestId};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, RwLock};
use tracing::debug;

/// A stored record and its audit timeline.
#[derive(Debug)]
struct Entry {
    request: PassRequest,
    timeline: Vec<AuditEvent>,
}

type Slot = Arc<Mutex<Entry>>;

/// An in-memory store with one lock per record.
///
/// The outer map lock is held only long enough to find or insert a slot;
/// all reads and writes of a record happen under that record's own lock.
#[derive(Debug, Default)]
pub struct InMemoryPassStore {
    records: RwLock<HashMap<PassRequestId, Slot>>,
}

impl InMemoryPassStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of stored records.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::LockPoisoned` if the map lock is poisoned.
    pub fn len(&self) -> Result<usize, PersistenceError> {
        let records = self
            .records
            .read()
            .map_err(|_| PersistenceError::LockPoisoned)?;
        Ok(records.len())
    }

    /// Returns true if the store holds no records.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::LockPoisoned` if the map lock is poisoned.
    pub fn is_empty(&self) -> Result<bool, PersistenceError> {
        Ok(self.len()? == 0)
    }

    fn slot(&self, id: &PassRequestId) -> Result<Slot, PersistenceError> {
        let records = self
            .records
            .read()
            .map_err(|_| PersistenceError::LockPoisoned)?;
        records
            .get(id)
            .cloned()
            .ok_or_else(|| PersistenceError::NotFound(id.clone()))
    }

    fn slots(&self) -> Result<Vec<Slot>, PersistenceError> {
        let records = self
            .records
            .read()
            .map_err(|_| PersistenceError::LockPoisoned)?;
        Ok(records.values().cloned().collect())
    }
}

fn lock(slot: &Slot) -> Result<MutexGuard<'_, Entry>, PersistenceError> {
    slot.lock().map_err(|_| PersistenceError::LockPoisoned)
}

impl PassStore for InMemoryPassStore {
    fn create(
        &self,
        request: PassRequest,
        event: AuditEvent,
    ) -> Result<PassRequest, PersistenceError> {
        let mut records = self
            .records
            .write()
            .map_err(|_| PersistenceError::LockPoisoned)?;
        if records.contains_key(&request.id) {
            return Err(PersistenceError::DuplicateId(request.id));
        }

        let entry: Entry = Entry {
            request: request.clone(),
            timeline: vec![event],
        };
        records.insert(request.id.clone(), Arc::new(Mutex::new(entry)));
        Ok(request)
    }

    fn get_by_id(&self, id: &PassRequestId) -> Result<PassRequest, PersistenceError> {
        let slot: Slot = self.slot(id)?;
        let entry = lock(&slot)?;
        Ok(entry.request.clone())
    }

    fn update_if_version(
        &self,
        id: &PassRequestId,
        expected_version: u64,
        mutator: &mut dyn FnMut(&mut PassRequest),
        event: AuditEvent,
    ) -> Result<PassRequest, PersistenceError> {
        let slot: Slot = self.slot(id)?;
        let mut entry = lock(&slot)?;

        let actual: u64 = entry.request.version;
        if actual != expected_version {
            debug!(
                request_id = %id,
                expected = expected_version,
                actual,
                "Rejected stale update"
            );
            return Err(PersistenceError::VersionConflict {
                request_id: id.clone(),
                expected: expected_version,
                actual,
            });
        }

        let mut updated: PassRequest = entry.request.clone();
        mutator(&mut updated);
        if &updated.id != id {
            return Err(PersistenceError::IdentityChanged(id.clone()));
        }
        updated.version = expected_version.saturating_add(1);

        entry.request = updated.clone();
        entry.timeline.push(event);
        Ok(updated)
    }

    fn query(&self, filter: &PassFilter) -> Result<Vec<PassRequest>, PersistenceError> {
        let mut matches: Vec<PassRequest> = Vec::new();
        for slot in self.slots()? {
            let entry = lock(&slot)?;
            if filter.matches(&entry.request) {
                matches.push(entry.request.clone());
            }
        }
        Ok(matches)
    }

    fn timeline(&self, id: &PassRequestId) -> Result<Vec<AuditEvent>, PersistenceError> {
        let slot: Slot = self.slot(id)?;
        let entry = lock(&slot)?;
        Ok(entry.timeline.clone())
    }
}
