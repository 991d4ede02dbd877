// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{
    ActorId, EmergencyContact, HostelId, PassDetails, PassRequest, PassRequestId,
    PassSubmission, PassType,
};
use time::OffsetDateTime;
use time::macros::{date, datetime, time};

/// The fixed "current instant" used across domain tests.
pub const NOW: OffsetDateTime = datetime!(2026-03-01 08:00 UTC);

pub fn create_short_submission() -> PassSubmission {
    PassSubmission {
        pass_type: String::from("short"),
        reason: String::from("Research for final year project"),
        destination: String::from("City Library"),
        departure_date: String::from("2026-03-02"),
        departure_time: String::from("09:00"),
        return_date: None,
        return_time: None,
        emergency_contact: String::from("Jane Doe"),
        emergency_phone: String::from("+2348012345678"),
        additional_notes: None,
        parent_notification: false,
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
        additional_notes: Some(String::from("Travelling by bus")),
        parent_notification: true,
    }
}

pub fn create_test_request(id: &str, student: &str, destination: &str) -> PassRequest {
    let details: PassDetails = PassDetails {
        pass_type: PassType::Short,
        reason: String::from("Dental checkup at University Hospital"),
        destination: String::from(destination),
        departure_date: date!(2026 - 03 - 02),
        departure_time: time!(14:00),
        return_date: Some(date!(2026 - 03 - 02)),
        return_time: Some(time!(17:00)),
        emergency_contact: EmergencyContact {
            name: String::from("Jane Doe"),
            phone: String::from("+2348012345678"),
        },
        additional_notes: None,
        parent_notification: false,
    };
    PassRequest::new(
        PassRequestId::new(id),
        ActorId::new(student).unwrap(),
        Some(HostelId::new("hall-a")),
        details,
        NOW,
    )
}
