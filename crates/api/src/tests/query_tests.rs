// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::helpers::{
    TestService, act, create_long_submission, create_short_submission, create_test_cause,
    create_test_service, reason,
};
use crate::StatusSummary;
use exit_pass::{LifecycleAction, TransitionPayload};
use exit_pass_domain::{PassFilter, PassRequest, PassStatus, PassSubmission};
use time::Duration;

/// Three students, one submission each, a minute apart.
fn seeded_service() -> (TestService, Vec<PassRequest>) {
    let service: TestService = create_test_service();
    let mut requests: Vec<PassRequest> = Vec::new();
    let submissions: [(&str, PassSubmission); 3] = [
        ("stu-1", create_short_submission()),
        ("stu-2", create_long_submission()),
        (
            "stu-3",
            PassSubmission {
                destination: String::from("Teaching Hospital"),
                reason: String::from("Dental appointment"),
                ..create_short_submission()
            },
        ),
    ];
    for (student, submission) in submissions {
        requests.push(
            service
                .submit(student, &submission, create_test_cause())
                .unwrap(),
        );
        service.clock().advance(Duration::minutes(1)).unwrap();
    }
    (service, requests)
}

#[test]
fn test_list_orders_newest_first() {
    let (service, requests) = seeded_service();

    let listed: Vec<PassRequest> = service.list(&PassFilter::all()).unwrap().collect();

    let ids: Vec<&str> = listed.iter().map(|r| r.id.value()).collect();
    let expected: Vec<&str> = requests.iter().rev().map(|r| r.id.value()).collect();
    assert_eq!(ids, expected);
}

#[test]
fn test_list_is_restartable_against_current_state() {
    let (service, requests) = seeded_service();
    let filter: PassFilter = PassFilter::all().with_status(PassStatus::Pending);

    assert_eq!(service.list(&filter).unwrap().count(), 3);

    act(
        &service,
        &requests[0],
        LifecycleAction::Forward,
        "porter-a",
        TransitionPayload::default(),
    );

    assert_eq!(service.list(&filter).unwrap().count(), 2);
}

#[test]
fn test_free_text_search_covers_reason_destination_and_id() {
    let (service, requests) = seeded_service();

    let by_reason: Vec<PassRequest> = service
        .list(&PassFilter::all().with_search("DENTAL"))
        .unwrap()
        .collect();
    assert_eq!(by_reason.len(), 1);
    assert_eq!(by_reason[0].id, requests[2].id);

    let by_destination: usize = service
        .list(&PassFilter::all().with_search("accra"))
        .unwrap()
        .count();
    assert_eq!(by_destination, 1);

    let by_id: usize = service
        .list(&PassFilter::all().with_search(requests[0].id.value()))
        .unwrap()
        .count();
    assert_eq!(by_id, 1);
}

#[test]
fn test_students_only_see_their_own_requests() {
    let (service, requests) = seeded_service();

    let own: Vec<PassRequest> = service
        .list_for_actor("stu-2", PassFilter::all())
        .unwrap()
        .collect();
    assert_eq!(own.len(), 1);
    assert_eq!(own[0].id, requests[1].id);

    let staff: usize = service
        .list_for_actor("cso-1", PassFilter::all())
        .unwrap()
        .count();
    assert_eq!(staff, 3);
}

#[test]
fn test_summary_counts_by_status() {
    let (service, requests) = seeded_service();
    act(
        &service,
        &requests[0],
        LifecycleAction::Approve,
        "cso-1",
        TransitionPayload::default(),
    );
    act(
        &service,
        &requests[1],
        LifecycleAction::Deny,
        "cso-1",
        reason("Clashes with exams"),
    );

    let summary: StatusSummary = service.summarize(&PassFilter::all()).unwrap();

    assert_eq!(summary.total, 3);
    assert_eq!(summary.count(PassStatus::Approved), 1);
    assert_eq!(summary.count(PassStatus::Denied), 1);
    assert_eq!(summary.count(PassStatus::Pending), 1);
    assert_eq!(summary.count(PassStatus::Completed), 0);
    assert_eq!(summary.awaiting_decision(), 1);
    assert_eq!(summary.by_status.len(), PassStatus::ALL.len());
}
