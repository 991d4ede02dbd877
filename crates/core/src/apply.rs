// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::command::{Command, LifecycleAction};
use crate::error::{CoreError, LifecycleError};
use crate::permission::{authorize, authorize_create};
use crate::policy::{ApprovalSteps, LifecycleConfig};
use crate::state::{TransitionResult, empty_snapshot, snapshot_of};
use exit_pass_audit::{Action, Actor, AuditEvent, Cause, StateSnapshot};
use exit_pass_domain::{
    ActorIdentity, Attribution, PassDetails, PassRequest, PassRequestId, PassStatus,
    ValidationErrors,
};
use time::OffsetDateTime;

const MAX_REASON_LENGTH: usize = 500;

/// Creates a new pending request from validated details.
///
/// # Arguments
///
/// * `details` - Submission details that have already passed validation
/// * `id` - The identifier to assign
/// * `student` - The submitting student
/// * `cause` - The cause or reason for this action
/// * `now` - The current instant
///
/// # Errors
///
/// Returns `CoreError::Permission` if the actor is not a student.
pub fn apply_create(
    details: PassDetails,
    id: PassRequestId,
    student: &ActorIdentity,
    cause: Cause,
    now: OffsetDateTime,
) -> Result<TransitionResult, CoreError> {
    authorize_create(student)?;

    let new_request: PassRequest = PassRequest::new(
        id,
        student.id.clone(),
        student.hostel_id.clone(),
        details,
        now,
    );

    let action: Action = Action::new(
        String::from(LifecycleAction::Create.as_str()),
        Some(format!(
            "Submitted {} pass to {}",
            new_request.details.pass_type, new_request.details.destination
        )),
    );
    let audit_event: AuditEvent = AuditEvent::new(
        new_request.id.clone(),
        Actor::from(student),
        cause,
        action,
        empty_snapshot(),
        snapshot_of(&new_request),
        now,
    );

    Ok(TransitionResult {
        new_request,
        audit_event,
    })
}

/// Applies a lifecycle command to a request, producing the updated request and an audit event.
///
/// The input request is never modified. Failure at any step yields an error
/// and no new state.
///
/// # Arguments
///
/// * `config` - The lifecycle configuration in force
/// * `request` - The request as currently stored (immutable)
/// * `command` - The command to apply
/// * `actor` - The resolved identity of the caller
/// * `cause` - The cause or reason for this action
/// * `now` - The current instant
///
/// # Errors
///
/// Returns an error if:
/// - The request is already in a terminal state
/// - The actor is not permitted to perform the action
/// - A required reason is missing or a checkout/checkin time is out of order
/// - The transition would overwrite an existing attribution
#[allow(clippy::too_many_lines)]
pub fn apply(
    config: &LifecycleConfig,
    request: &PassRequest,
    command: Command,
    actor: &ActorIdentity,
    cause: Cause,
    now: OffsetDateTime,
) -> Result<TransitionResult, CoreError> {
    if request.status.is_terminal() {
        return Err(LifecycleError::AlreadyInTerminalState {
            status: request.status,
        }
        .into());
    }

    let action: LifecycleAction = command.action();
    authorize(actor, action, request, &config.policy)?;

    let before: StateSnapshot = snapshot_of(request);
    let mut new_request: PassRequest = request.clone();
    let details: Option<String>;

    match command {
        Command::Forward => {
            stamp(&mut new_request.forwarded, request, action, actor, now)?;
            new_request.status = PassStatus::Forwarded;
            details = Some(format!("Forwarded by {}", actor.role));
        }
        Command::Approve => {
            stamp(&mut new_request.cso_approval, request, action, actor, now)?;
            let steps: ApprovalSteps = config
                .policy
                .for_pass_type(request.details.pass_type)
                .approval_steps;
            new_request.status = match steps {
                ApprovalSteps::Single => PassStatus::Approved,
                ApprovalSteps::TwoStep => PassStatus::CsoApproved,
            };
            details = Some(format!("Approved by {}", actor.role));
        }
        Command::ApproveSenior => {
            stamp(&mut new_request.senior_approval, request, action, actor, now)?;
            new_request.status = PassStatus::Approved;
            details = Some(format!("Final approval by {}", actor.role));
        }
        Command::Deny { reason } => {
            let reason: String = require_reason(&reason)?;
            stamp(&mut new_request.denial, request, action, actor, now)?;
            new_request.status = PassStatus::Denied;
            details = Some(format!("Denied: {reason}"));
            new_request.denial_reason = Some(reason);
        }
        Command::Checkout { at } => {
            let at: OffsetDateTime = at.unwrap_or(now);
            if at < now {
                return Err(ValidationErrors::single(
                    "checkedOutAt",
                    "Checkout time cannot be earlier than the current time.",
                )
                .into());
            }
            stamp(&mut new_request.checked_out, request, action, actor, at)?;
            new_request.status = PassStatus::CheckedOut;
            details = Some(format!("Checked out at {at}"));
        }
        Command::Checkin { at } => {
            let at: OffsetDateTime = at.unwrap_or(now);
            let Some(checked_out) = &request.checked_out else {
                return Err(invalid(request, action, "no checkout has been recorded"));
            };
            if at < checked_out.at {
                return Err(ValidationErrors::single(
                    "checkedInAt",
                    "Checkin time cannot be earlier than the checkout time.",
                )
                .into());
            }
            stamp(&mut new_request.checked_in, request, action, actor, at)?;
            new_request.status = PassStatus::Completed;
            details = Some(format!("Checked in at {at}"));
        }
        Command::Cancel { reason } => {
            let reason: String = require_reason(&reason)?;
            stamp(&mut new_request.cancellation, request, action, actor, now)?;
            new_request.status = PassStatus::Cancelled;
            details = Some(format!("Cancelled: {reason}"));
            new_request.cancellation_reason = Some(reason);
        }
    }

    if !request.status.can_transition_to(new_request.status) {
        return Err(invalid(
            request,
            action,
            &format!("{} is not reachable", new_request.status),
        ));
    }

    new_request.updated_at = now;
    new_request.version = request.version.saturating_add(1);

    let audit_event: AuditEvent = AuditEvent::new(
        request.id.clone(),
        Actor::from(actor),
        cause,
        Action::new(String::from(action.as_str()), details),
        before,
        snapshot_of(&new_request),
        now,
    );

    Ok(TransitionResult {
        new_request,
        audit_event,
    })
}

/// Records who performed an action and when. Attribution slots are write-once.
fn stamp(
    slot: &mut Option<Attribution>,
    request: &PassRequest,
    action: LifecycleAction,
    actor: &ActorIdentity,
    at: OffsetDateTime,
) -> Result<(), CoreError> {
    if slot.is_some() {
        return Err(invalid(request, action, "attribution is already recorded"));
    }
    *slot = Some(Attribution::new(actor.id.clone(), at));
    Ok(())
}

fn require_reason(reason: &str) -> Result<String, CoreError> {
    let reason: &str = reason.trim();
    if reason.is_empty() {
        return Err(ValidationErrors::single("reason", "A reason is required.").into());
    }
    if reason.chars().count() > MAX_REASON_LENGTH {
        return Err(
            ValidationErrors::single("reason", "Reason must be at most 500 characters.").into(),
        );
    }
    Ok(String::from(reason))
}

fn invalid(request: &PassRequest, action: LifecycleAction, reason: &str) -> CoreError {
    CoreError::Lifecycle(LifecycleError::InvalidTransition {
        from: request.status,
        action,
        reason: String::from(reason),
    })
}
