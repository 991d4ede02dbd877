// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use exit_pass_domain::PassRequestId;

/// Errors that can occur during persistence operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PersistenceError {
    /// The requested record was not found.
    NotFound(PassRequestId),
    /// A record with this id already exists.
    DuplicateId(PassRequestId),
    /// The stored version no longer matches the version the caller read.
    VersionConflict {
        /// The contested record.
        request_id: PassRequestId,
        /// The version the caller expected.
        expected: u64,
        /// The version actually stored.
        actual: u64,
    },
    /// An update tried to change a record's identity.
    IdentityChanged(PassRequestId),
    /// A lock was poisoned by a panicking writer.
    LockPoisoned,
}

impl std::fmt::Display for PersistenceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound(id) => write!(f, "Pass request not found: {id}"),
            Self::DuplicateId(id) => write!(f, "Pass request already exists: {id}"),
            Self::VersionConflict {
                request_id,
                expected,
                actual,
            } => write!(
                f,
                "Version conflict on {request_id}: expected {expected}, found {actual}"
            ),
            Self::IdentityChanged(id) => {
                write!(f, "Update attempted to change the identity of {id}")
            }
            Self::LockPoisoned => write!(f, "Store lock poisoned"),
        }
    }
}

impl std::error::Error for PersistenceError {}
