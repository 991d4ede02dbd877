// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Role and status gating for lifecycle actions.
//!
//! Every action is described by one row of [`PERMISSIONS`]: the roles that
//! may perform it and the statuses it may be performed from. `authorize`
//! evaluates a row against an actor and a request; it never mutates anything.

use crate::command::LifecycleAction;
use crate::error::PermissionError;
use crate::policy::{ApprovalPolicy, PassPolicy};
use exit_pass_domain::{ActorIdentity, PassRequest, PassStatus, Role};

/// One row of the permission table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PermissionRule {
    /// The action this row governs.
    pub action: LifecycleAction,
    /// Roles allowed to perform the action.
    pub roles: &'static [Role],
    /// Statuses the action may be performed from. Empty for `create`.
    pub from: &'static [PassStatus],
}

/// The permission table.
pub const PERMISSIONS: &[PermissionRule] = &[
    PermissionRule {
        action: LifecycleAction::Create,
        roles: &[Role::Student],
        from: &[],
    },
    PermissionRule {
        action: LifecycleAction::Forward,
        roles: &[Role::Porter, Role::Security],
        from: &[PassStatus::Pending],
    },
    PermissionRule {
        action: LifecycleAction::Approve,
        roles: &[Role::Cso, Role::AssistantCso],
        from: &[PassStatus::Pending, PassStatus::Forwarded],
    },
    PermissionRule {
        action: LifecycleAction::ApproveSenior,
        roles: &[Role::Dsa],
        from: &[PassStatus::CsoApproved],
    },
    PermissionRule {
        action: LifecycleAction::Deny,
        roles: &[Role::Cso, Role::AssistantCso, Role::Dsa],
        from: &[
            PassStatus::Pending,
            PassStatus::Forwarded,
            PassStatus::CsoApproved,
        ],
    },
    PermissionRule {
        action: LifecycleAction::Checkout,
        roles: &[Role::Porter, Role::Security],
        from: &[PassStatus::Approved],
    },
    PermissionRule {
        action: LifecycleAction::Checkin,
        roles: &[Role::Porter, Role::Security],
        from: &[PassStatus::CheckedOut],
    },
    PermissionRule {
        action: LifecycleAction::Cancel,
        roles: &[Role::Student],
        from: &[PassStatus::Pending, PassStatus::Forwarded],
    },
];

/// Returns the table row for `action`.
#[must_use]
pub fn rule_for(action: LifecycleAction) -> Option<&'static PermissionRule> {
    PERMISSIONS.iter().find(|rule| rule.action == action)
}

impl PermissionRule {
    /// Returns true if `role` appears in this row.
    #[must_use]
    pub fn allows_role(&self, role: &Role) -> bool {
        self.roles.contains(role)
    }

    /// Returns true if the action may be taken from `status` under `policy`.
    ///
    /// The policy can narrow the table: mandatory forwarding removes
    /// `pending` as a source for CSO approval. Senior approval depends only
    /// on the request having reached `cso_approved`, so a request approved
    /// under a two-step chain can still be finished after the chain for its
    /// pass type is shortened.
    #[must_use]
    pub fn allows_status(&self, status: PassStatus, policy: &PassPolicy) -> bool {
        if !self.from.contains(&status) {
            return false;
        }
        match self.action {
            LifecycleAction::Approve => {
                !(policy.requires_forwarding && status == PassStatus::Pending)
            }
            _ => true,
        }
    }
}

fn forbidden(action: LifecycleAction, actor: &ActorIdentity, reason: &str) -> PermissionError {
    PermissionError::Forbidden {
        action,
        role: actor.role.to_string(),
        reason: String::from(reason),
    }
}

/// Checks that `actor` may submit a new request.
///
/// # Errors
///
/// Returns `PermissionError::Forbidden` if the actor is not a student.
pub fn authorize_create(actor: &ActorIdentity) -> Result<(), PermissionError> {
    let allowed: bool =
        rule_for(LifecycleAction::Create).is_some_and(|rule| rule.allows_role(&actor.role));
    if allowed {
        Ok(())
    } else {
        Err(forbidden(
            LifecycleAction::Create,
            actor,
            "only students may submit exit passes",
        ))
    }
}

/// Checks that `actor` may perform `action` on `request`.
///
/// Checks run in a fixed order so the error reflects the most fundamental
/// problem: role, then ownership (for `cancel`), then hostel scope, then
/// the request's current status.
///
/// # Arguments
///
/// * `actor` - The resolved identity of the caller
/// * `action` - The lifecycle action being attempted
/// * `request` - The request as currently stored
/// * `policy` - The approval policy in force
///
/// # Errors
///
/// Returns `PermissionError::Forbidden` if the role, ownership or hostel
/// scope does not allow the action, and `PermissionError::InvalidState` if
/// the action is not legal from the request's current status.
pub fn authorize(
    actor: &ActorIdentity,
    action: LifecycleAction,
    request: &PassRequest,
    policy: &ApprovalPolicy,
) -> Result<(), PermissionError> {
    let Some(rule) = rule_for(action) else {
        return Err(forbidden(action, actor, "action is not permitted"));
    };

    if !rule.allows_role(&actor.role) {
        return Err(forbidden(
            action,
            actor,
            "role is not permitted to perform this action",
        ));
    }

    if action == LifecycleAction::Cancel && !request.is_owned_by(&actor.id) {
        return Err(forbidden(
            action,
            actor,
            "only the student who submitted the request may cancel it",
        ));
    }

    if actor.role.is_staff()
        && let Some(actor_hostel) = &actor.hostel_id
        && request.hostel_id.as_ref() != Some(actor_hostel)
    {
        return Err(forbidden(
            action,
            actor,
            "request belongs to a different hostel",
        ));
    }

    let pass_policy: &PassPolicy = policy.for_pass_type(request.details.pass_type);
    if !rule.allows_status(request.status, pass_policy) {
        return Err(PermissionError::InvalidState {
            action,
            status: request.status,
        });
    }

    Ok(())
}
