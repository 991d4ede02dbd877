// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Replay of scripted lifecycle scenarios against an in-memory store.
//!
//! A script names its actors, an optional starting instant, and a list of
//! steps. Requests are referred to by the order in which they were
//! submitted, starting at zero.

use color_eyre::eyre::{Result, bail};
use exit_pass::{LifecycleAction, LifecycleConfig, TransitionPayload};
use exit_pass_api::{
    ApiError, DirectoryEntry, FixedClock, PassService, StaticDirectory, StatusSummary,
};
use exit_pass_audit::Cause;
use exit_pass_domain::{PassFilter, PassRequest, PassStatus, PassSubmission};
use exit_pass_persistence::InMemoryPassStore;
use serde::{Deserialize, Serialize};
use time::{Duration, OffsetDateTime};
use tracing::debug;

/// A replay script.
#[derive(Debug, Clone, Deserialize)]
pub struct Script {
    /// Starting instant. Defaults to the current time.
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub now: Option<OffsetDateTime>,
    /// The user directory.
    pub actors: Vec<DirectoryEntry>,
    /// Steps to run in order.
    pub steps: Vec<Step>,
}

/// One scripted step.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    /// A student submits a pass.
    Submit {
        /// The submitting actor.
        actor: String,
        /// The raw form payload.
        submission: PassSubmission,
    },
    /// An actor acts on a previously submitted request.
    Transition {
        /// Index of the request in submission order.
        request: usize,
        /// The lifecycle action.
        action: LifecycleAction,
        /// The acting user.
        actor: String,
        /// Reason for `deny` and `cancel`.
        #[serde(default)]
        reason: Option<String>,
        /// Event time for `checkout` and `checkin`.
        #[serde(default, with = "time::serde::rfc3339::option")]
        at: Option<OffsetDateTime>,
    },
    /// Moves the clock forward.
    Advance {
        /// Minutes to advance by.
        minutes: i64,
    },
}

/// What happened at one step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum Outcome {
    /// The step succeeded.
    Ok {
        /// The affected request.
        request_id: String,
        /// Its status afterwards.
        status: PassStatus,
        /// Its version afterwards.
        version: u64,
    },
    /// The service refused the step.
    Rejected {
        /// Error category.
        kind: &'static str,
        /// Human-readable message.
        message: String,
    },
    /// The clock moved.
    ClockAdvanced {
        /// The new current instant.
        #[serde(with = "time::serde::rfc3339")]
        now: OffsetDateTime,
    },
}

impl From<Result<PassRequest, ApiError>> for Outcome {
    fn from(result: Result<PassRequest, ApiError>) -> Self {
        match result {
            Ok(request) => Self::Ok {
                request_id: request.id.value().to_string(),
                status: request.status,
                version: request.version,
            },
            Err(err) => Self::Rejected {
                kind: err.kind(),
                message: err.to_string(),
            },
        }
    }
}

/// Outcome of one step, numbered from one.
#[derive(Debug, Clone, Serialize)]
pub struct StepReport {
    /// Step number.
    pub step: usize,
    /// Short description of what was attempted.
    pub description: String,
    /// What happened.
    pub outcome: Outcome,
}

/// Everything a replay produced.
#[derive(Debug, Clone, Serialize)]
pub struct ReplayReport {
    /// Per-step outcomes.
    pub steps: Vec<StepReport>,
    /// Final state of every request, newest first.
    pub requests: Vec<PassRequest>,
    /// Final status counts.
    pub summary: StatusSummary,
}

/// Runs `script` against a fresh in-memory store.
///
/// Rejected steps are recorded and the replay continues; only malformed
/// scripts abort it.
///
/// # Errors
///
/// Returns an error if the actor list is invalid, a step refers to a
/// request that has not been submitted, or an `advance` step would move
/// the clock out of range.
pub fn replay(script: &Script, config: LifecycleConfig) -> Result<ReplayReport> {
    let directory: StaticDirectory = StaticDirectory::from_entries(&script.actors)?;
    let clock: FixedClock = FixedClock::new(script.now.unwrap_or_else(OffsetDateTime::now_utc));
    let service = PassService::new(InMemoryPassStore::new(), directory, clock, config);

    let mut submitted: Vec<PassRequest> = Vec::new();
    let mut steps: Vec<StepReport> = Vec::new();

    for (index, step) in script.steps.iter().enumerate() {
        let number: usize = index + 1;
        let (description, outcome): (String, Outcome) = match step {
            Step::Submit { actor, submission } => {
                let description: String =
                    format!("{actor} submits a {} pass", submission.pass_type);
                let result: Result<PassRequest, ApiError> =
                    service.submit(actor, submission, step_cause(number, &description));
                if let Ok(request) = &result {
                    submitted.push(request.clone());
                }
                (description, Outcome::from(result))
            }
            Step::Transition {
                request,
                action,
                actor,
                reason,
                at,
            } => {
                let Some(target) = submitted.get(*request) else {
                    bail!(
                        "step {number} refers to request {request}, but only {} were submitted",
                        submitted.len()
                    );
                };
                let description: String = format!("{actor} {action} request {request}");
                let payload: TransitionPayload = TransitionPayload {
                    reason: reason.clone(),
                    at: *at,
                };
                let result: Result<PassRequest, ApiError> = service.transition(
                    &target.id,
                    *action,
                    actor,
                    payload,
                    step_cause(number, &description),
                );
                (description, Outcome::from(result))
            }
            Step::Advance { minutes } => {
                let Some(now) = minutes
                    .checked_mul(60)
                    .and_then(|seconds| service.clock().advance(Duration::seconds(seconds)))
                else {
                    bail!("step {number} advances the clock by {minutes} minutes, out of range");
                };
                (
                    format!("clock advances {minutes} minutes"),
                    Outcome::ClockAdvanced { now },
                )
            }
        };
        debug!(step = number, ?outcome, "Replayed step");
        steps.push(StepReport {
            step: number,
            description,
            outcome,
        });
    }

    let requests: Vec<PassRequest> = service.list(&PassFilter::all())?.collect();
    let summary: StatusSummary = service.summarize(&PassFilter::all())?;

    Ok(ReplayReport {
        steps,
        requests,
        summary,
    })
}

fn step_cause(number: usize, description: &str) -> Cause {
    Cause::new(format!("replay-step-{number}"), String::from(description))
}
