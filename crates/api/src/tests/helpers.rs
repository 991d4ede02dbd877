// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Test helper functions and fixtures.

use crate::{FixedClock, PassService, StaticDirectory};
use exit_pass::{LifecycleAction, LifecycleConfig, TransitionPayload};
use exit_pass_audit::Cause;
use exit_pass_domain::{ActorId, ActorIdentity, HostelId, PassRequest, PassSubmission, Role};
use exit_pass_persistence::{InMemoryPassStore, PassStore};
use time::OffsetDateTime;
use time::macros::datetime;

pub const NOW: OffsetDateTime = datetime!(2026-03-01 08:00 UTC);

pub type TestService<S = InMemoryPassStore> = PassService<S, StaticDirectory, FixedClock>;

fn identity(id: &str, role: Role, hostel: Option<&str>) -> ActorIdentity {
    ActorIdentity::new(ActorId::new(id).unwrap(), role, hostel.map(HostelId::new))
}

pub fn create_test_directory() -> StaticDirectory {
    StaticDirectory::new()
        .with(identity("stu-1", Role::Student, Some("hall-a")))
        .with(identity("stu-2", Role::Student, Some("hall-a")))
        .with(identity("stu-3", Role::Student, Some("hall-b")))
        .with(identity("porter-a", Role::Porter, Some("hall-a")))
        .with(identity("porter-b", Role::Porter, Some("hall-b")))
        .with(identity("sec-1", Role::Security, None))
        .with(identity("cso-1", Role::Cso, None))
        .with(identity("cso-2", Role::Cso, None))
        .with(identity("acso-1", Role::AssistantCso, None))
        .with(identity("dsa-1", Role::Dsa, None))
}

pub fn create_test_cause() -> Cause {
    Cause::new(String::from("api-req-456"), String::from("API request"))
}

pub fn create_service_with<S: PassStore>(store: S, config: LifecycleConfig) -> TestService<S> {
    PassService::new(store, create_test_directory(), FixedClock::new(NOW), config)
}

pub fn create_test_service() -> TestService {
    create_service_with(InMemoryPassStore::new(), LifecycleConfig::default())
}

/// The submission a student sends for a trip to the library tomorrow morning.
pub fn create_short_submission() -> PassSubmission {
    PassSubmission {
        pass_type: String::from("short"),
        reason: String::from("Research for final year project"),
        destination: String::from("City Library"),
        departure_date: String::from("2026-03-02"),
        departure_time: String::from("09:00"),
        emergency_contact: String::from("Jane Doe"),
        emergency_phone: String::from("+2348012345678"),
        ..PassSubmission::default()
    }
}

pub fn create_long_submission() -> PassSubmission {
    PassSubmission {
        pass_type: String::from("long"),
        reason: String::from("Attend cousin's wedding ceremony"),
        destination: String::from("Accra"),
        departure_date: String::from("2026-03-05"),
        departure_time: String::from("06:00"),
        return_date: Some(String::from("2026-03-08")),
        return_time: Some(String::from("20:00")),
        emergency_contact: String::from("John Mensah"),
        emergency_phone: String::from("0241234567"),
        ..PassSubmission::default()
    }
}

pub fn reason(text: &str) -> TransitionPayload {
    TransitionPayload {
        reason: Some(String::from(text)),
        at: None,
    }
}

pub fn at(instant: OffsetDateTime) -> TransitionPayload {
    TransitionPayload {
        reason: None,
        at: Some(instant),
    }
}

/// Runs `action` and unwraps the result.
pub fn act<S: PassStore>(
    service: &TestService<S>,
    request: &PassRequest,
    action: LifecycleAction,
    actor_id: &str,
    payload: TransitionPayload,
) -> PassRequest {
    service
        .transition(&request.id, action, actor_id, payload, create_test_cause())
        .unwrap()
}
