// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The service façade the UI or any other client calls.
//!
//! Each operation resolves the caller's identity, reads the record store,
//! runs the pure lifecycle function and writes the result back with a
//! version check. Nothing here holds state between calls apart from the
//! collaborators handed to [`PassService::new`].

use crate::capabilities::{PassCapabilities, compute_pass_capabilities};
use crate::clock::Clock;
use crate::error::ApiError;
use crate::identity::IdentityProvider;
use crate::summary::StatusSummary;
use exit_pass::{
    Command, LifecycleAction, LifecycleConfig, LifecycleError, TransitionPayload,
    TransitionResult, apply, apply_create, authorize_create,
};
use exit_pass_audit::{AuditEvent, Cause};
use exit_pass_domain::{
    ActorIdentity, PassFilter, PassRequest, PassRequestId, PassSubmission, Role, ValidatedRequest,
    validate,
};
use exit_pass_persistence::PassStore;
use time::OffsetDateTime;
use tracing::{debug, info, warn};

/// Lifecycle operations over a record store.
#[derive(Debug)]
pub struct PassService<S, I, C> {
    store: S,
    identities: I,
    clock: C,
    config: LifecycleConfig,
}

impl<S, I, C> PassService<S, I, C>
where
    S: PassStore,
    I: IdentityProvider,
    C: Clock,
{
    /// Creates a service.
    ///
    /// # Arguments
    ///
    /// * `store` - The record store
    /// * `identities` - Resolves actor ids to roles
    /// * `clock` - Supplies the current instant
    /// * `config` - Approval policy and local offset
    #[must_use]
    pub const fn new(store: S, identities: I, clock: C, config: LifecycleConfig) -> Self {
        Self {
            store,
            identities,
            clock,
            config,
        }
    }

    /// Returns the record store.
    #[must_use]
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Returns the clock.
    #[must_use]
    pub const fn clock(&self) -> &C {
        &self.clock
    }

    /// Returns the lifecycle configuration.
    #[must_use]
    pub const fn config(&self) -> &LifecycleConfig {
        &self.config
    }

    fn now(&self) -> OffsetDateTime {
        self.clock.now().to_offset(self.config.utc_offset)
    }

    fn resolve(&self, actor_id: &str) -> Result<ActorIdentity, ApiError> {
        self.identities
            .resolve(actor_id)
            .ok_or_else(|| ApiError::AuthenticationFailed {
                reason: format!("unknown actor '{actor_id}'"),
            })
    }

    /// Validates a submission and stores it as a new pending request.
    ///
    /// # Arguments
    ///
    /// * `actor_id` - The submitting student
    /// * `submission` - The raw form payload
    /// * `cause` - The cause or reason for this action
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The actor is unknown or not a student
    /// - Any submission field is invalid
    /// - The store rejects the record
    pub fn submit(
        &self,
        actor_id: &str,
        submission: &PassSubmission,
        cause: Cause,
    ) -> Result<PassRequest, ApiError> {
        let actor: ActorIdentity = self.resolve(actor_id)?;
        authorize_create(&actor).inspect_err(|err| {
            warn!(actor = %actor.id, error = %err, "Rejected submission");
        })?;

        let now: OffsetDateTime = self.now();
        let details: ValidatedRequest = validate(submission, now).inspect_err(|errors| {
            warn!(actor = %actor.id, errors = errors.len(), "Submission failed validation");
        })?;

        let result: TransitionResult =
            apply_create(details, PassRequestId::generate(), &actor, cause, now)?;
        let stored: PassRequest = self
            .store
            .create(result.new_request, result.audit_event)?;

        info!(
            request_id = %stored.id,
            actor = %actor.id,
            pass_type = %stored.details.pass_type,
            "Submitted pass request"
        );
        Ok(stored)
    }

    /// Applies a lifecycle action to a stored request.
    ///
    /// The record is read once, the transition is computed from that read,
    /// and the write succeeds only if nobody else has written in between.
    /// A rejected transition leaves the record untouched.
    ///
    /// # Arguments
    ///
    /// * `request_id` - The request to act on
    /// * `action` - The lifecycle action
    /// * `actor_id` - The acting user
    /// * `payload` - Reason and/or event time, where the action needs them
    /// * `cause` - The cause or reason for this action
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The actor is unknown
    /// - The request does not exist
    /// - The actor is not permitted, or the status does not allow the action
    /// - The request is already terminal
    /// - A reason is missing or a checkout/checkin time is out of order
    /// - Another transition on the same request landed first
    pub fn transition(
        &self,
        request_id: &PassRequestId,
        action: LifecycleAction,
        actor_id: &str,
        payload: TransitionPayload,
        cause: Cause,
    ) -> Result<PassRequest, ApiError> {
        let actor: ActorIdentity = self.resolve(actor_id)?;
        let current: PassRequest = self.store.get_by_id(request_id)?;

        let Some(command) = Command::from_parts(action, payload) else {
            return Err(ApiError::Lifecycle(LifecycleError::InvalidTransition {
                from: current.status,
                action,
                reason: String::from("create is not a transition of an existing request"),
            }));
        };

        let result: TransitionResult =
            apply(&self.config, &current, command, &actor, cause, self.now()).map_err(|err| {
                let err: ApiError = ApiError::from(err);
                warn!(
                    request_id = %request_id,
                    action = %action,
                    actor = %actor.id,
                    status = %current.status,
                    kind = err.kind(),
                    "Rejected transition"
                );
                err
            })?;

        let next: PassRequest = result.new_request;
        let updated: PassRequest = self
            .store
            .update_if_version(
                request_id,
                current.version,
                &mut |stored: &mut PassRequest| *stored = next.clone(),
                result.audit_event,
            )
            .map_err(|err| {
                debug!(request_id = %request_id, action = %action, error = %err, "Write lost race");
                ApiError::from(err)
            })?;

        info!(
            request_id = %request_id,
            action = %action,
            actor = %actor.id,
            status = %updated.status,
            version = updated.version,
            "Applied transition"
        );
        Ok(updated)
    }

    /// Loads one request.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::NotFound` if no request has this id.
    pub fn get(&self, request_id: &PassRequestId) -> Result<PassRequest, ApiError> {
        Ok(self.store.get_by_id(request_id)?)
    }

    /// Lists requests matching `filter`, newest submission first.
    ///
    /// The result is a snapshot taken at call time; call again to re-evaluate.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    pub fn list(
        &self,
        filter: &PassFilter,
    ) -> Result<impl Iterator<Item = PassRequest> + use<S, I, C>, ApiError> {
        let mut requests: Vec<PassRequest> = self.store.query(filter)?;
        requests.sort_by(|a, b| {
            b.submitted_at
                .cmp(&a.submitted_at)
                .then_with(|| a.id.cmp(&b.id))
        });
        debug!(matches = requests.len(), "Listed pass requests");
        Ok(requests.into_iter())
    }

    /// Lists requests visible to `actor_id`.
    ///
    /// Students only ever see their own requests, whatever the filter says.
    ///
    /// # Errors
    ///
    /// Returns an error if the actor is unknown or the store cannot be read.
    pub fn list_for_actor(
        &self,
        actor_id: &str,
        filter: PassFilter,
    ) -> Result<impl Iterator<Item = PassRequest> + use<S, I, C>, ApiError> {
        let actor: ActorIdentity = self.resolve(actor_id)?;
        let filter: PassFilter = if actor.role == Role::Student {
            filter.for_student(actor.id)
        } else {
            filter
        };
        self.list(&filter)
    }

    /// Counts matching requests by status.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    pub fn summarize(&self, filter: &PassFilter) -> Result<StatusSummary, ApiError> {
        let requests: Vec<PassRequest> = self.store.query(filter)?;
        Ok(StatusSummary::from_requests(&requests))
    }

    /// Returns a request's audit events, oldest first.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::NotFound` if no request has this id.
    pub fn timeline(&self, request_id: &PassRequestId) -> Result<Vec<AuditEvent>, ApiError> {
        Ok(self.store.timeline(request_id)?)
    }

    /// Returns which actions `actor_id` may currently take on a request.
    ///
    /// # Errors
    ///
    /// Returns an error if the actor is unknown or the request does not exist.
    pub fn capabilities(
        &self,
        actor_id: &str,
        request_id: &PassRequestId,
    ) -> Result<PassCapabilities, ApiError> {
        let actor: ActorIdentity = self.resolve(actor_id)?;
        let request: PassRequest = self.store.get_by_id(request_id)?;
        Ok(compute_pass_capabilities(
            &actor,
            &request,
            &self.config.policy,
        ))
    }
}
