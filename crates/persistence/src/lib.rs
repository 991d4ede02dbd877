// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Record store for pass requests.
//!
//! The lifecycle engine reads a record, computes the next state as a pure
//! function, and writes it back with a compare-and-swap on the record's
//! version. Every write carries exactly one audit event, stored atomically
//! with the record so a request's timeline always matches its state.
//!
//! [`InMemoryPassStore`] keeps one lock per record, so writers to
//! different requests never contend with each other.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

mod error;
mod memory;

#[cfg(test)]
mod tests;

use exit_pass_audit::AuditEvent;
use exit_pass_domain::{PassFilter, PassRequest, PassRequestId};

pub use error::PersistenceError;
pub use memory::InMemoryPassStore;

/// Storage for pass requests and their audit timelines.
pub trait PassStore: Send + Sync {
    /// Inserts a new record together with its creation event.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::DuplicateId` if the id is already taken.
    fn create(
        &self,
        request: PassRequest,
        event: AuditEvent,
    ) -> Result<PassRequest, PersistenceError>;

    /// Loads a record by id.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::NotFound` if no record has this id.
    fn get_by_id(&self, id: &PassRequestId) -> Result<PassRequest, PersistenceError>;

    /// Applies `mutator` to the stored record if its version still equals
    /// `expected_version`, then advances the version and appends `event`.
    ///
    /// Readers observe either the record before the update or after it,
    /// never a partial write.
    ///
    /// # Arguments
    ///
    /// * `id` - The record to update
    /// * `expected_version` - The version the caller's change was computed from
    /// * `mutator` - Rewrites the stored record in place
    /// * `event` - The audit event describing the change
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::NotFound` if the record does not exist,
    /// `PersistenceError::VersionConflict` if another writer got there first,
    /// and `PersistenceError::IdentityChanged` if the mutator rewrote the id.
    fn update_if_version(
        &self,
        id: &PassRequestId,
        expected_version: u64,
        mutator: &mut dyn FnMut(&mut PassRequest),
        event: AuditEvent,
    ) -> Result<PassRequest, PersistenceError>;

    /// Returns a snapshot of every record matching `filter`, in no particular order.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    fn query(&self, filter: &PassFilter) -> Result<Vec<PassRequest>, PersistenceError>;

    /// Returns the audit events recorded for a request, oldest first.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::NotFound` if no record has this id.
    fn timeline(&self, id: &PassRequestId) -> Result<Vec<AuditEvent>, PersistenceError>;
}
