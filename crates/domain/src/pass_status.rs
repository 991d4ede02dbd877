// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Pass request status and the edges of the lifecycle graph.
//!
//! ```text
//! pending ─► forwarded ─► cso_approved ─► approved ─► checked_out ─► completed
//!    │           │              │
//!    │           └──────────────┼──► approved   (single-step approval)
//!    └──────────────────────────┘
//! pending | forwarded | cso_approved ─► denied
//! pending | forwarded                ─► cancelled
//! ```
//!
//! Status only moves forward. `completed`, `denied` and `cancelled` are terminal.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// The lifecycle state of a pass request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PassStatus {
    /// Submitted by the student, awaiting staff action.
    Pending,
    /// Escalated by a porter or security officer.
    Forwarded,
    /// Approved by the CSO, awaiting senior (DSA) approval.
    CsoApproved,
    /// Fully approved; the student may leave.
    Approved,
    /// The student has physically left.
    CheckedOut,
    /// The student has returned.
    Completed,
    /// Rejected by an approving authority.
    Denied,
    /// Withdrawn by the student.
    Cancelled,
}

impl PassStatus {
    /// Every status, in lifecycle order.
    pub const ALL: [Self; 8] = [
        Self::Pending,
        Self::Forwarded,
        Self::CsoApproved,
        Self::Approved,
        Self::CheckedOut,
        Self::Completed,
        Self::Denied,
        Self::Cancelled,
    ];

    /// Returns the string representation used on the wire and in storage.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Forwarded => "forwarded",
            Self::CsoApproved => "cso_approved",
            Self::Approved => "approved",
            Self::CheckedOut => "checked_out",
            Self::Completed => "completed",
            Self::Denied => "denied",
            Self::Cancelled => "cancelled",
        }
    }

    /// Returns true if no further transition is possible from this status.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Denied | Self::Cancelled)
    }

    /// Checks whether `target` is reachable from this status in one step.
    #[must_use]
    pub const fn can_transition_to(&self, target: Self) -> bool {
        matches!(
            (self, target),
            (Self::Pending, Self::Forwarded)
                | (Self::Pending | Self::Forwarded, Self::CsoApproved)
                | (
                    Self::Pending | Self::Forwarded | Self::CsoApproved,
                    Self::Approved | Self::Denied
                )
                | (Self::Pending | Self::Forwarded, Self::Cancelled)
                | (Self::Approved, Self::CheckedOut)
                | (Self::CheckedOut, Self::Completed)
        )
    }
}

impl FromStr for PassStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| DomainError::InvalidPassStatus {
                status: s.to_string(),
            })
    }
}

impl std::fmt::Display for PassStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
