// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use exit_pass_audit::{AuditEvent, StateSnapshot};
use exit_pass_domain::PassRequest;

/// Converts a request to a snapshot for audit purposes.
#[must_use]
pub fn snapshot_of(request: &PassRequest) -> StateSnapshot {
    StateSnapshot::new(format!(
        "status={},version={}",
        request.status.as_str(),
        request.version
    ))
}

/// Snapshot used as the `before` side of a creation event.
#[must_use]
pub fn empty_snapshot() -> StateSnapshot {
    StateSnapshot::new(String::from("status=none,version=0"))
}

/// The result of a successful lifecycle transition.
///
/// Transitions are atomic: they either succeed completely or fail without side effects.
/// `new_request` carries the next version; a store accepts it only if the
/// stored version still equals the one it was computed from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionResult {
    /// The request after the transition.
    pub new_request: PassRequest,
    /// The audit event recording this transition.
    pub audit_event: AuditEvent,
}
