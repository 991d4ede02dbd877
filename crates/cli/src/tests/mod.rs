// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Tests for the command-line tooling.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use crate::describe_chain;
use crate::script::{Outcome, ReplayReport, Script, replay};
use exit_pass::{ApprovalPolicy, ApprovalSteps, LifecycleConfig, PassPolicy};
use exit_pass_domain::PassStatus;
use serde_json::{Value, json};

fn actors() -> Value {
    json!([
        { "id": "stu-1", "role": "student", "hostel": "hall-a" },
        { "id": "stu-2", "role": "Student", "hostel": "hall-a" },
        { "id": "porter-a", "role": "Porter", "hostel": "hall-a" },
        { "id": "porter-b", "role": "porter", "hostel": "hall-b" },
        { "id": "cso-1", "role": "CSO" },
        { "id": "dsa-1", "role": "DSA" }
    ])
}

fn short_submission() -> Value {
    json!({
        "passType": "short",
        "reasonForExit": "Research for final year project",
        "destination": "City Library",
        "departureDate": "2026-03-02",
        "departureTime": "09:00",
        "emergencyContact": "Jane Doe",
        "emergencyPhone": "+2348012345678",
        "parentNotification": "on"
    })
}

fn long_submission() -> Value {
    json!({
        "passType": "long",
        "reason": "Attend cousin's wedding ceremony",
        "destination": "Accra",
        "departureDate": "2026-03-05",
        "departureTime": "06:00",
        "returnDate": "2026-03-08",
        "returnTime": "20:00",
        "emergencyContact": "John Mensah",
        "emergencyPhone": "0241234567"
    })
}

fn script(steps: &Value) -> Script {
    serde_json::from_value(json!({
        "now": "2026-03-01T08:00:00Z",
        "actors": actors(),
        "steps": steps,
    }))
    .unwrap()
}

fn run(steps: &Value) -> ReplayReport {
    replay(&script(steps), LifecycleConfig::default()).unwrap()
}

fn status_of(outcome: &Outcome) -> PassStatus {
    match outcome {
        Outcome::Ok { status, .. } => *status,
        other => panic!("expected a successful step, got {other:?}"),
    }
}

fn rejection_kind(outcome: &Outcome) -> &'static str {
    match outcome {
        Outcome::Rejected { kind, .. } => *kind,
        other => panic!("expected a rejected step, got {other:?}"),
    }
}

#[test]
fn test_replay_short_pass_round_trip() {
    let report: ReplayReport = run(&json!([
        { "submit": { "actor": "stu-1", "submission": short_submission() } },
        { "transition": { "request": 0, "action": "forward", "actor": "porter-a" } },
        { "transition": { "request": 0, "action": "approve", "actor": "cso-1" } },
        {
            "transition": {
                "request": 0,
                "action": "checkout",
                "actor": "porter-a",
                "at": "2026-03-02T09:05:00Z"
            }
        },
        {
            "transition": {
                "request": 0,
                "action": "checkin",
                "actor": "porter-a",
                "at": "2026-03-02T17:30:00Z"
            }
        }
    ]));

    let statuses: Vec<PassStatus> = report
        .steps
        .iter()
        .map(|step| status_of(&step.outcome))
        .collect();
    assert_eq!(
        statuses,
        vec![
            PassStatus::Pending,
            PassStatus::Forwarded,
            PassStatus::Approved,
            PassStatus::CheckedOut,
            PassStatus::Completed,
        ]
    );
    assert_eq!(report.requests.len(), 1);
    assert_eq!(report.requests[0].version, 5);
    assert_eq!(report.summary.count(PassStatus::Completed), 1);
}

#[test]
fn test_replay_records_rejections_and_continues() {
    let report: ReplayReport = run(&json!([
        { "submit": { "actor": "stu-1", "submission": short_submission() } },
        { "transition": { "request": 0, "action": "approve", "actor": "porter-a" } },
        { "transition": { "request": 0, "action": "forward", "actor": "porter-b" } },
        { "transition": { "request": 0, "action": "cancel", "actor": "stu-2", "reason": "x" } },
        { "transition": { "request": 0, "action": "deny", "actor": "cso-1" } },
        { "transition": { "request": 0, "action": "deny", "actor": "cso-1", "reason": "Exams" } }
    ]));

    assert_eq!(rejection_kind(&report.steps[1].outcome), "forbidden");
    assert_eq!(rejection_kind(&report.steps[2].outcome), "forbidden");
    assert_eq!(rejection_kind(&report.steps[3].outcome), "forbidden");
    assert_eq!(rejection_kind(&report.steps[4].outcome), "validation");
    assert_eq!(status_of(&report.steps[5].outcome), PassStatus::Denied);
    assert_eq!(report.requests[0].denial_reason.as_deref(), Some("Exams"));
    assert_eq!(report.requests[0].version, 2);
}

#[test]
fn test_replay_long_pass_needs_senior_approval() {
    let report: ReplayReport = run(&json!([
        { "submit": { "actor": "stu-1", "submission": long_submission() } },
        { "transition": { "request": 0, "action": "approve", "actor": "cso-1" } },
        { "transition": { "request": 0, "action": "checkout", "actor": "porter-a" } },
        { "transition": { "request": 0, "action": "approve_senior", "actor": "dsa-1" } },
        { "transition": { "request": 0, "action": "checkout", "actor": "porter-a" } }
    ]));

    assert_eq!(status_of(&report.steps[1].outcome), PassStatus::CsoApproved);
    assert_eq!(rejection_kind(&report.steps[2].outcome), "invalid_state");
    assert_eq!(status_of(&report.steps[3].outcome), PassStatus::Approved);
    assert_eq!(status_of(&report.steps[4].outcome), PassStatus::CheckedOut);
}

#[test]
fn test_replay_single_step_policy_for_long_passes() {
    let config: LifecycleConfig = LifecycleConfig {
        policy: ApprovalPolicy {
            long: PassPolicy::new(ApprovalSteps::Single),
            ..ApprovalPolicy::default()
        },
        ..LifecycleConfig::default()
    };
    let report: ReplayReport = replay(
        &script(&json!([
            { "submit": { "actor": "stu-1", "submission": long_submission() } },
            { "transition": { "request": 0, "action": "approve", "actor": "cso-1" } }
        ])),
        config,
    )
    .unwrap();

    assert_eq!(status_of(&report.steps[1].outcome), PassStatus::Approved);
}

#[test]
fn test_replay_advance_moves_the_clock() {
    let report: ReplayReport = run(&json!([
        { "advance": { "minutes": 90 } },
        { "submit": { "actor": "stu-1", "submission": short_submission() } }
    ]));

    match &report.steps[0].outcome {
        Outcome::ClockAdvanced { now } => {
            assert_eq!(now.hour(), 9);
            assert_eq!(now.minute(), 30);
        }
        other => panic!("expected the clock to advance, got {other:?}"),
    }
    assert_eq!(report.requests[0].submitted_at, report.requests[0].updated_at);
    assert_eq!(report.requests[0].submitted_at.hour(), 9);
}

#[test]
fn test_replay_advance_out_of_range_aborts() {
    for minutes in [9_000_000_000_000_000_i64, i64::MAX, -9_000_000_000_000_000] {
        let result = replay(
            &script(&json!([{ "advance": { "minutes": minutes } }])),
            LifecycleConfig::default(),
        );

        let message: String = result.unwrap_err().to_string();
        assert!(message.contains("step 1"), "{minutes}: {message}");
    }
}

#[test]
fn test_replay_rejects_invalid_submission() {
    let mut submission: Value = short_submission();
    submission["departureDate"] = json!("2026-02-27");
    submission["emergencyPhone"] = json!("12ab");

    let report: ReplayReport = run(&json!([
        { "submit": { "actor": "stu-1", "submission": submission } },
        { "submit": { "actor": "porter-a", "submission": short_submission() } },
        { "submit": { "actor": "nobody", "submission": short_submission() } }
    ]));

    assert_eq!(rejection_kind(&report.steps[0].outcome), "validation");
    assert_eq!(rejection_kind(&report.steps[1].outcome), "forbidden");
    assert_eq!(rejection_kind(&report.steps[2].outcome), "authentication_failed");
    assert!(report.requests.is_empty());
    assert_eq!(report.summary.total, 0);
}

#[test]
fn test_replay_unknown_request_index_aborts() {
    let result = replay(
        &script(&json!([
            { "submit": { "actor": "stu-1", "submission": short_submission() } },
            { "transition": { "request": 3, "action": "forward", "actor": "porter-a" } }
        ])),
        LifecycleConfig::default(),
    );

    let message: String = result.unwrap_err().to_string();
    assert!(message.contains("step 2"));
    assert!(message.contains("only 1 were submitted"));
}

#[test]
fn test_replay_blank_actor_id_aborts() {
    let script: Script = serde_json::from_value(json!({
        "actors": [{ "id": "  ", "role": "student" }],
        "steps": []
    }))
    .unwrap();

    assert!(replay(&script, LifecycleConfig::default()).is_err());
}

#[test]
fn test_script_rejects_unknown_action() {
    let result: Result<Script, _> = serde_json::from_value(json!({
        "actors": actors(),
        "steps": [{ "transition": { "request": 0, "action": "teleport", "actor": "cso-1" } }]
    }));

    assert!(result.is_err());
}

#[test]
fn test_outcome_serializes_with_result_tag() {
    let report: ReplayReport = run(&json!([
        { "submit": { "actor": "stu-1", "submission": short_submission() } },
        { "transition": { "request": 0, "action": "checkin", "actor": "porter-a" } }
    ]));

    let encoded: Value = serde_json::to_value(&report).unwrap();
    assert_eq!(encoded["steps"][0]["outcome"]["result"], "ok");
    assert_eq!(encoded["steps"][0]["outcome"]["status"], "pending");
    assert_eq!(encoded["steps"][1]["outcome"]["result"], "rejected");
    assert_eq!(encoded["steps"][1]["outcome"]["kind"], "invalid_state");
    assert_eq!(encoded["summary"]["by_status"]["pending"], 1);
}

#[test]
fn test_describe_chain() {
    assert_eq!(
        describe_chain(&PassPolicy::new(ApprovalSteps::Single)),
        "approve"
    );
    assert_eq!(
        describe_chain(&PassPolicy::new(ApprovalSteps::TwoStep).with_required_forwarding()),
        "forward -> approve -> approve_senior"
    );
}
