// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::expect_used, clippy::unwrap_used)]


use exit_pass::{Command, LifecycleConfig, TransitionResult, apply, apply_create};
use exit_pass_audit::Cause;
use exit_pass_domain::{
    ActorId, ActorIdentity, EmergencyContact, HostelId, PassDetails, PassRequest, PassRequestId,
    PassType, Role,
};
use time::OffsetDateTime;
use time::macros::{date, datetime, time};

pub const NOW: OffsetDateTime = datetime!(2026-03-01 08:00 UTC);

pub fn create_test_cause() -> Cause {
    Cause::new(String::from("test-cause"), String::from("Test operation"))
}

pub fn create_student(id: &str, hostel: &str) -> ActorIdentity {
    ActorIdentity::new(
        ActorId::new(id).unwrap(),
        Role::Student,
        Some(HostelId::new(hostel)),
    )
}

pub fn create_porter() -> ActorIdentity {
    ActorIdentity::new(ActorId::new("porter-1").unwrap(), Role::Porter, None)
}

pub fn create_cso() -> ActorIdentity {
    ActorIdentity::new(ActorId::new("cso-1").unwrap(), Role::Cso, None)
}

pub fn create_details(destination: &str) -> PassDetails {
    PassDetails {
        pass_type: PassType::Short,
        reason: String::from("Library research"),
        destination: String::from(destination),
        departure_date: date!(2026 - 03 - 02),
        departure_time: time!(09:00),
        return_date: None,
        return_time: None,
        emergency_contact: EmergencyContact {
            name: String::from("Jane Doe"),
            phone: String::from("+2348012345678"),
        },
        additional_notes: None,
        parent_notification: false,
    }
}

/// Builds a pending request and its creation event without storing it.
pub fn create_submission(id: &str, student: &ActorIdentity, destination: &str) -> TransitionResult {
    apply_create(
        create_details(destination),
        PassRequestId::new(id),
        student,
        create_test_cause(),
        NOW,
    )
    .unwrap()
}

/// Computes the forward transition of `request` by the test porter.
pub fn forward(request: &PassRequest) -> TransitionResult {
    apply(
        &LifecycleConfig::default(),
        request,
        Command::Forward,
        &create_porter(),
        create_test_cause(),
        NOW,
    )
    .unwrap()
}

/// Returns a mutator that replaces the stored record with `next`.
pub fn replace_with(next: PassRequest) -> impl FnMut(&mut PassRequest) {
    move |stored: &mut PassRequest| *stored = next.clone()
}
