// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Validation and normalization of raw pass-request submissions.

use crate::error::ValidationErrors;
use crate::types::{EmergencyContact, PassDetails, PassType};
use serde::{Deserialize, Deserializer, Serialize};
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use time::{Date, OffsetDateTime, PrimitiveDateTime, Time};

const DATE_FORMAT: &[BorrowedFormatItem<'_>] = format_description!("[year]-[month]-[day]");
const TIME_FORMAT: &[BorrowedFormatItem<'_>] = format_description!("[hour]:[minute]");

const REASON_MAX: usize = 500;
const DESTINATION_MAX: usize = 200;
const CONTACT_MAX: usize = 100;
const NOTES_MAX: usize = 1000;
const PHONE_MIN_DIGITS: usize = 10;
const PHONE_MAX_DIGITS: usize = 15;

/// A validated submission, ready to become a pass request.
pub type ValidatedRequest = PassDetails;

/// A raw pass-request submission as sent by a web form or API client.
///
/// Every field is optional at the wire level so that missing values are
/// reported as validation errors rather than as decode failures.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PassSubmission {
    /// `short` or `long`.
    pub pass_type: String,
    /// Reason for exit.
    #[serde(alias = "reasonForExit")]
    pub reason: String,
    /// Destination.
    pub destination: String,
    /// `YYYY-MM-DD`.
    pub departure_date: String,
    /// `HH:MM`, 24-hour.
    pub departure_time: String,
    /// `YYYY-MM-DD`; required for long passes.
    pub return_date: Option<String>,
    /// `HH:MM`, 24-hour.
    pub return_time: Option<String>,
    /// Emergency contact name.
    pub emergency_contact: String,
    /// Emergency contact phone.
    pub emergency_phone: String,
    /// Optional notes.
    pub additional_notes: Option<String>,
    /// Parent notification; accepts a boolean or the checkbox value `"on"`.
    #[serde(deserialize_with = "deserialize_checkbox")]
    pub parent_notification: bool,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum CheckboxValue {
    Flag(bool),
    Text(String),
}

fn deserialize_checkbox<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<CheckboxValue> = Option::deserialize(deserializer)?;
    Ok(match value {
        Some(CheckboxValue::Flag(flag)) => flag,
        Some(CheckboxValue::Text(text)) => matches!(
            text.trim().to_ascii_lowercase().as_str(),
            "on" | "true" | "yes" | "1"
        ),
        None => false,
    })
}

/// Validates and normalizes a raw submission.
///
/// Text fields are trimmed; blank optional fields become `None`. All
/// violations are collected and reported together.
///
/// `now` is the submission instant, expressed in the campus UTC offset. The
/// departure date and time are interpreted in that same offset.
///
/// # Arguments
///
/// * `submission` - The raw submission
/// * `now` - The current instant in the campus offset
///
/// # Errors
///
/// Returns every field violation found, keyed by wire field name.
pub fn validate(
    submission: &PassSubmission,
    now: OffsetDateTime,
) -> Result<ValidatedRequest, ValidationErrors> {
    let mut errors: ValidationErrors = ValidationErrors::new();

    let pass_type: Option<PassType> = submission.pass_type.parse().ok();
    if pass_type.is_none() {
        errors.push("passType", "Pass type must be 'short' or 'long'.");
    }

    let reason: String = submission.reason.trim().to_string();
    check_length(&mut errors, "reason", &reason, REASON_MAX, "Reason for exit");

    let destination: String = submission.destination.trim().to_string();
    check_length(
        &mut errors,
        "destination",
        &destination,
        DESTINATION_MAX,
        "Destination",
    );

    let departure_date: Option<Date> = parse_date(&submission.departure_date);
    if departure_date.is_none() {
        errors.push("departureDate", "Invalid departure date.");
    }

    let departure_time: Option<Time> = parse_clock_time(&submission.departure_time);
    if departure_time.is_none() {
        errors.push("departureTime", "Invalid time format (HH:MM).");
    }

    if let (Some(date), Some(time)) = (departure_date, departure_time) {
        let departure: OffsetDateTime =
            PrimitiveDateTime::new(date, time).assume_offset(now.offset());
        if departure < now {
            errors.push("departureDate", "Departure must not be in the past.");
        }
    }

    let return_date: Option<Date> = match non_blank(submission.return_date.as_deref()) {
        Some(raw) => {
            let parsed: Option<Date> = parse_date(raw);
            if parsed.is_none() {
                errors.push("returnDate", "Invalid return date.");
            }
            parsed
        }
        None => None,
    };
    let return_date_malformed: bool =
        non_blank(submission.return_date.as_deref()).is_some() && return_date.is_none();

    let return_time: Option<Time> = match non_blank(submission.return_time.as_deref()) {
        Some(raw) => {
            let parsed: Option<Time> = parse_clock_time(raw);
            if parsed.is_none() {
                errors.push("returnTime", "Invalid time format (HH:MM).");
            }
            parsed
        }
        None => None,
    };

    let contact_name: String = submission.emergency_contact.trim().to_string();
    check_length(
        &mut errors,
        "emergencyContact",
        &contact_name,
        CONTACT_MAX,
        "Emergency contact",
    );

    let phone: String = submission.emergency_phone.trim().to_string();
    if phone.is_empty() {
        errors.push("emergencyPhone", "Emergency phone is required.");
    } else if !is_valid_phone(&phone) {
        errors.push(
            "emergencyPhone",
            "Invalid phone format: use 10-15 digits with an optional leading '+'.",
        );
    }

    let additional_notes: Option<String> =
        non_blank(submission.additional_notes.as_deref()).map(str::to_string);
    if additional_notes
        .as_deref()
        .is_some_and(|notes| notes.chars().count() > NOTES_MAX)
    {
        errors.push("additionalNotes", "Notes too long.");
    }

    // Cross-field trip window rules
    match (pass_type, departure_date) {
        (Some(PassType::Long), Some(departure)) if !return_date_malformed => {
            if return_date.is_none_or(|returning| returning <= departure) {
                errors.push(
                    "returnDate",
                    "For long passes, return date must be after departure date.",
                );
            }
        }
        (Some(PassType::Short), Some(departure)) => {
            if return_date.is_some_and(|returning| returning != departure) {
                errors.push(
                    "returnDate",
                    "Short passes must return on the departure date.",
                );
            } else if let (Some(leaving), Some(returning)) = (departure_time, return_time)
                && returning <= leaving
            {
                errors.push("returnTime", "Return time must be after departure time.");
            }
        }
        _ => {}
    }

    let (Some(pass_type), Some(departure_date), Some(departure_time)) =
        (pass_type, departure_date, departure_time)
    else {
        return Err(errors);
    };

    errors.into_result(PassDetails {
        pass_type,
        reason,
        destination,
        departure_date,
        departure_time,
        return_date,
        return_time,
        emergency_contact: EmergencyContact {
            name: contact_name,
            phone,
        },
        additional_notes,
        parent_notification: submission.parent_notification,
    })
}

fn check_length(errors: &mut ValidationErrors, field: &str, value: &str, max: usize, label: &str) {
    let length: usize = value.chars().count();
    if length == 0 {
        errors.push(field, &format!("{label} is required."));
    } else if length > max {
        errors.push(field, &format!("{label} must be at most {max} characters."));
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn parse_date(value: &str) -> Option<Date> {
    Date::parse(value.trim(), DATE_FORMAT).ok()
}

/// Parses strict 24-hour `HH:MM` (two-digit hour and minute).
pub(crate) fn parse_clock_time(value: &str) -> Option<Time> {
    Time::parse(value.trim(), TIME_FORMAT).ok()
}

/// Checks `^\+?\d{10,15}$`.
fn is_valid_phone(value: &str) -> bool {
    let digits: &str = value.strip_prefix('+').unwrap_or(value);
    (PHONE_MIN_DIGITS..=PHONE_MAX_DIGITS).contains(&digits.len())
        && digits.bytes().all(|b| b.is_ascii_digit())
}
