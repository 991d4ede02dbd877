// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.

use exit_pass::{CoreError, LifecycleError, PermissionError};
use exit_pass_domain::{PassRequestId, ValidationErrors};
use exit_pass_persistence::PersistenceError;
use thiserror::Error;

/// API-level errors.
///
/// Every variant is recoverable: callers re-prompt, refetch, or show an
/// access-denied message. Nothing here is fatal to the process.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// One or more submission or payload fields are invalid.
    #[error(transparent)]
    Validation(#[from] ValidationErrors),

    /// The actor may not perform the action, or not from the current status.
    #[error(transparent)]
    Permission(#[from] PermissionError),

    /// The lifecycle refused the transition.
    #[error(transparent)]
    Lifecycle(#[from] LifecycleError),

    /// No request has the given id.
    #[error("Pass request not found: {0}")]
    NotFound(PassRequestId),

    /// The caller's identity could not be resolved.
    #[error("Authentication failed: {reason}")]
    AuthenticationFailed {
        /// Why the lookup failed.
        reason: String,
    },

    /// The record store failed.
    #[error("Storage error: {0}")]
    Storage(String),
}

impl ApiError {
    /// A short machine-readable name for the error category.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Validation(_) => "validation",
            Self::Permission(PermissionError::Forbidden { .. }) => "forbidden",
            Self::Permission(PermissionError::InvalidState { .. }) => "invalid_state",
            Self::Lifecycle(LifecycleError::AlreadyInTerminalState { .. }) => {
                "already_in_terminal_state"
            }
            Self::Lifecycle(LifecycleError::ConcurrentModification { .. }) => {
                "concurrent_modification"
            }
            Self::Lifecycle(LifecycleError::InvalidTransition { .. }) => "invalid_transition",
            Self::NotFound(_) => "not_found",
            Self::AuthenticationFailed { .. } => "authentication_failed",
            Self::Storage(_) => "storage",
        }
    }
}

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Validation(errors) => Self::Validation(errors),
            CoreError::Permission(err) => Self::Permission(err),
            CoreError::Lifecycle(err) => Self::Lifecycle(err),
        }
    }
}

impl From<PersistenceError> for ApiError {
    fn from(err: PersistenceError) -> Self {
        match err {
            PersistenceError::NotFound(id) => Self::NotFound(id),
            PersistenceError::VersionConflict {
                request_id,
                expected,
                ..
            } => Self::Lifecycle(LifecycleError::ConcurrentModification {
                request_id,
                expected_version: expected,
            }),
            other => Self::Storage(other.to_string()),
        }
    }
}
