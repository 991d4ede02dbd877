// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Capability computation for authorization-aware UI gating.
//!
//! Capabilities tell a client which lifecycle buttons to show for a request.
//! They are advisory only and do not replace the check `transition` performs.

use exit_pass::{ApprovalPolicy, LifecycleAction, authorize};
use exit_pass_domain::{ActorIdentity, PassRequest};
use serde::Serialize;

/// Whether an action is currently available.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Capability {
    /// The action would pass authorization right now.
    Allowed,
    /// The action would be refused.
    Denied,
}

impl Capability {
    const fn from_allowed(allowed: bool) -> Self {
        if allowed { Self::Allowed } else { Self::Denied }
    }

    /// Returns true for `Allowed`.
    #[must_use]
    pub const fn is_allowed(self) -> bool {
        matches!(self, Self::Allowed)
    }
}

/// Lifecycle actions an actor may take on one request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PassCapabilities {
    /// Forward to an approving authority.
    pub can_forward: Capability,
    /// First-level approval.
    pub can_approve: Capability,
    /// Senior approval.
    pub can_approve_senior: Capability,
    /// Deny.
    pub can_deny: Capability,
    /// Record departure.
    pub can_checkout: Capability,
    /// Record return.
    pub can_checkin: Capability,
    /// Cancel.
    pub can_cancel: Capability,
}

impl PassCapabilities {
    /// Returns the allowed actions in lifecycle order.
    #[must_use]
    pub fn allowed_actions(&self) -> Vec<LifecycleAction> {
        LifecycleAction::TRANSITIONS
            .into_iter()
            .filter(|action| self.get(*action).is_allowed())
            .collect()
    }

    /// Returns the capability for `action`. `Create` is never a per-request capability.
    #[must_use]
    pub const fn get(&self, action: LifecycleAction) -> Capability {
        match action {
            LifecycleAction::Create => Capability::Denied,
            LifecycleAction::Forward => self.can_forward,
            LifecycleAction::Approve => self.can_approve,
            LifecycleAction::ApproveSenior => self.can_approve_senior,
            LifecycleAction::Deny => self.can_deny,
            LifecycleAction::Checkout => self.can_checkout,
            LifecycleAction::Checkin => self.can_checkin,
            LifecycleAction::Cancel => self.can_cancel,
        }
    }
}

/// Computes what `actor` may do with `request` under `policy`.
///
/// Terminal requests deny everything.
///
/// # Arguments
///
/// * `actor` - The resolved identity of the caller
/// * `request` - The request as currently stored
/// * `policy` - The approval policy in force
#[must_use]
pub fn compute_pass_capabilities(
    actor: &ActorIdentity,
    request: &PassRequest,
    policy: &ApprovalPolicy,
) -> PassCapabilities {
    let check = |action: LifecycleAction| -> Capability {
        Capability::from_allowed(
            !request.status.is_terminal() && authorize(actor, action, request, policy).is_ok(),
        )
    };

    PassCapabilities {
        can_forward: check(LifecycleAction::Forward),
        can_approve: check(LifecycleAction::Approve),
        can_approve_senior: check(LifecycleAction::ApproveSenior),
        can_deny: check(LifecycleAction::Deny),
        can_checkout: check(LifecycleAction::Checkout),
        can_checkin: check(LifecycleAction::Checkin),
        can_cancel: check(LifecycleAction::Cancel),
    }
}
