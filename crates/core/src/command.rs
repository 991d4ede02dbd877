// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use time::OffsetDateTime;

/// The actions the lifecycle recognizes, used as the key of the permission table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LifecycleAction {
    /// Submit a new request.
    Create,
    /// Escalate a pending request to an approving authority.
    Forward,
    /// First-level (CSO) approval.
    Approve,
    /// Senior (DSA) approval of a CSO-approved request.
    ApproveSenior,
    /// Reject the request.
    Deny,
    /// Record the student's departure.
    Checkout,
    /// Record the student's return.
    Checkin,
    /// Withdraw the request.
    Cancel,
}

impl LifecycleAction {
    /// Every action that operates on an existing request.
    pub const TRANSITIONS: [Self; 7] = [
        Self::Forward,
        Self::Approve,
        Self::ApproveSenior,
        Self::Deny,
        Self::Checkout,
        Self::Checkin,
        Self::Cancel,
    ];

    /// Returns the wire name of the action.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Forward => "forward",
            Self::Approve => "approve",
            Self::ApproveSenior => "approve_senior",
            Self::Deny => "deny",
            Self::Checkout => "checkout",
            Self::Checkin => "checkin",
            Self::Cancel => "cancel",
        }
    }
}

impl FromStr for LifecycleAction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted: String = s.trim().to_ascii_lowercase().replace('-', "_");
        std::iter::once(Self::Create)
            .chain(Self::TRANSITIONS)
            .find(|action| action.as_str() == wanted)
            .ok_or_else(|| format!("Unknown lifecycle action: {s}"))
    }
}

impl std::fmt::Display for LifecycleAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Caller-supplied data that accompanies a transition.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TransitionPayload {
    /// Required for `deny` and `cancel`.
    pub reason: Option<String>,
    /// Event time for `checkout` and `checkin`; defaults to the current instant.
    pub at: Option<OffsetDateTime>,
}

/// A request to move a pass request along its lifecycle.
///
/// Commands are data only; `apply` decides whether they are legal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Porter/security escalation.
    Forward,
    /// CSO or assistant CSO approval.
    Approve,
    /// DSA approval.
    ApproveSenior,
    /// Denial by an approving authority.
    Deny {
        /// Why the request is denied.
        reason: String,
    },
    /// Departure through the gate.
    Checkout {
        /// When the student left. `None` means now.
        at: Option<OffsetDateTime>,
    },
    /// Return through the gate.
    Checkin {
        /// When the student returned. `None` means now.
        at: Option<OffsetDateTime>,
    },
    /// Withdrawal by the owning student.
    Cancel {
        /// Why the student is withdrawing.
        reason: String,
    },
}

impl Command {
    /// Builds a command from an action and its payload.
    ///
    /// Returns `None` for `Create`, which is not a transition of an existing request.
    #[must_use]
    pub fn from_parts(action: LifecycleAction, payload: TransitionPayload) -> Option<Self> {
        let reason: String = payload.reason.unwrap_or_default();
        match action {
            LifecycleAction::Create => None,
            LifecycleAction::Forward => Some(Self::Forward),
            LifecycleAction::Approve => Some(Self::Approve),
            LifecycleAction::ApproveSenior => Some(Self::ApproveSenior),
            LifecycleAction::Deny => Some(Self::Deny { reason }),
            LifecycleAction::Checkout => Some(Self::Checkout { at: payload.at }),
            LifecycleAction::Checkin => Some(Self::Checkin { at: payload.at }),
            LifecycleAction::Cancel => Some(Self::Cancel { reason }),
        }
    }

    /// Returns the permission-table key for this command.
    #[must_use]
    pub const fn action(&self) -> LifecycleAction {
        match self {
            Self::Forward => LifecycleAction::Forward,
            Self::Approve => LifecycleAction::Approve,
            Self::ApproveSenior => LifecycleAction::ApproveSenior,
            Self::Deny { .. } => LifecycleAction::Deny,
            Self::Checkout { .. } => LifecycleAction::Checkout,
            Self::Checkin { .. } => LifecycleAction::Checkin,
            Self::Cancel { .. } => LifecycleAction::Cancel,
        }
    }
}
