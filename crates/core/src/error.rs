// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::command::LifecycleAction;
use exit_pass_domain::{PassRequestId, PassStatus, ValidationErrors};

/// The actor may not perform the action on this request.
///
/// `Forbidden` and `InvalidState` are kept apart so callers can tell an
/// access-denied situation from a stale view of the request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PermissionError {
    /// The actor's role, ownership or hostel scope does not allow the action.
    Forbidden {
        /// The attempted action.
        action: LifecycleAction,
        /// The actor's role.
        role: String,
        /// Why access was refused.
        reason: String,
    },
    /// The role may perform the action, but not from the request's current status.
    InvalidState {
        /// The attempted action.
        action: LifecycleAction,
        /// The request's current status.
        status: PassStatus,
    },
}

impl std::fmt::Display for PermissionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Forbidden {
                action,
                role,
                reason,
            } => write!(f, "Forbidden: {role} may not {action}: {reason}"),
            Self::InvalidState { action, status } => {
                write!(f, "Cannot {action} a request that is {status}")
            }
        }
    }
}

impl std::error::Error for PermissionError {}

/// The transition cannot be applied to the record as it stands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LifecycleError {
    /// The request has already reached `completed`, `denied` or `cancelled`.
    AlreadyInTerminalState {
        /// The terminal status.
        status: PassStatus,
    },
    /// Another transition on the same request won the race.
    ConcurrentModification {
        /// The contested request.
        request_id: PassRequestId,
        /// The version this caller read.
        expected_version: u64,
    },
    /// The transition would break the status graph or attribution rules.
    InvalidTransition {
        /// Status before the transition.
        from: PassStatus,
        /// Attempted action.
        action: LifecycleAction,
        /// Why it was refused.
        reason: String,
    },
}

impl std::fmt::Display for LifecycleError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AlreadyInTerminalState { status } => {
                write!(f, "Request is already {status} and can no longer change")
            }
            Self::ConcurrentModification {
                request_id,
                expected_version,
            } => write!(
                f,
                "Request {request_id} was modified concurrently (expected version {expected_version})"
            ),
            Self::InvalidTransition {
                from,
                action,
                reason,
            } => write!(f, "Invalid transition: cannot {action} from {from}: {reason}"),
        }
    }
}

impl std::error::Error for LifecycleError {}

/// Errors that can occur while applying a lifecycle command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// Payload or temporal validation failed.
    Validation(ValidationErrors),
    /// The actor is not allowed to perform the action.
    Permission(PermissionError),
    /// The lifecycle refuses the transition.
    Lifecycle(LifecycleError),
}

impl std::fmt::Display for CoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Permission(err) => write!(f, "{err}"),
            Self::Lifecycle(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for CoreError {}

impl From<ValidationErrors> for CoreError {
    fn from(err: ValidationErrors) -> Self {
        Self::Validation(err)
    }
}

impl From<PermissionError> for CoreError {
    fn from(err: PermissionError) -> Self {
        Self::Permission(err)
    }
}

impl From<LifecycleError> for CoreError {
    fn from(err: LifecycleError) -> Self {
        Self::Lifecycle(err)
    }
}
