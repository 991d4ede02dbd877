// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{Command, LifecycleConfig, TransitionResult, apply, apply_create};
use exit_pass_audit::Cause;
use exit_pass_domain::{
    ActorId, ActorIdentity, EmergencyContact, HostelId, PassDetails, PassRequest, PassRequestId,
    PassType, Role,
};
use time::OffsetDateTime;
use time::macros::{date, datetime, time};

pub const NOW: OffsetDateTime = datetime!(2026-03-01 08:00 UTC);

pub fn create_actor(id: &str, role: Role, hostel: Option<&str>) -> ActorIdentity {
    ActorIdentity::new(ActorId::new(id).unwrap(), role, hostel.map(HostelId::new))
}

pub fn student() -> ActorIdentity {
    create_actor("stu-1", Role::Student, Some("hall-a"))
}

pub fn other_student() -> ActorIdentity {
    create_actor("stu-2", Role::Student, Some("hall-a"))
}

pub fn porter() -> ActorIdentity {
    create_actor("porter-1", Role::Porter, Some("hall-a"))
}

pub fn security() -> ActorIdentity {
    create_actor("sec-1", Role::Security, None)
}

pub fn cso() -> ActorIdentity {
    create_actor("cso-1", Role::Cso, None)
}

pub fn assistant_cso() -> ActorIdentity {
    create_actor("acso-1", Role::AssistantCso, None)
}

pub fn dsa() -> ActorIdentity {
    create_actor("dsa-1", Role::Dsa, None)
}

pub fn create_test_cause() -> Cause {
    Cause::new(String::from("test-cause"), String::from("Test operation"))
}

pub fn create_details(pass_type: PassType) -> PassDetails {
    let (return_date, return_time) = match pass_type {
        PassType::Short => (None, None),
        PassType::Long => (Some(date!(2026 - 03 - 08)), Some(time!(20:00))),
    };
    PassDetails {
        pass_type,
        reason: String::from("Visit family"),
        destination: String::from("Accra"),
        departure_date: date!(2026 - 03 - 05),
        departure_time: time!(06:00),
        return_date,
        return_time,
        emergency_contact: EmergencyContact {
            name: String::from("Jane Doe"),
            phone: String::from("+2348012345678"),
        },
        additional_notes: None,
        parent_notification: true,
    }
}

pub fn create_pending_request(pass_type: PassType) -> PassRequest {
    apply_create(
        create_details(pass_type),
        PassRequestId::new("REQ-001"),
        &student(),
        create_test_cause(),
        NOW,
    )
    .unwrap()
    .new_request
}

/// Applies `command` with the default configuration and returns the new request.
pub fn run(request: &PassRequest, command: Command, actor: &ActorIdentity) -> PassRequest {
    let result: TransitionResult = apply(
        &LifecycleConfig::default(),
        request,
        command,
        actor,
        create_test_cause(),
        NOW,
    )
    .unwrap();
    result.new_request
}
