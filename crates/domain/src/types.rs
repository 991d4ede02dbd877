// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::pass_status::PassStatus;
use crate::role::Role;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use time::{Date, OffsetDateTime, PrimitiveDateTime, Time, UtcOffset};

time::serde::format_description!(pass_date, Date, "[year]-[month]-[day]");
time::serde::format_description!(clock_time, Time, "[hour]:[minute]");

/// Opaque identifier of a pass request.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PassRequestId(String);

impl PassRequestId {
    /// Wraps an existing identifier.
    #[must_use]
    pub fn new(id: &str) -> Self {
        Self(id.to_string())
    }

    /// Generates a fresh random identifier.
    #[must_use]
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    /// Returns the identifier value.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for PassRequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of a student or staff member, as issued by the identity provider.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActorId(String);

impl ActorId {
    /// Creates an actor identifier.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::EmptyIdentifier` if `id` is blank.
    pub fn new(id: &str) -> Result<Self, DomainError> {
        let trimmed: &str = id.trim();
        if trimmed.is_empty() {
            return Err(DomainError::EmptyIdentifier("Actor ID"));
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Returns the identifier value.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ActorId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of a hostel.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HostelId(String);

impl HostelId {
    /// Creates a hostel identifier.
    #[must_use]
    pub fn new(id: &str) -> Self {
        Self(id.trim().to_string())
    }

    /// Returns the identifier value.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.0
    }
}

/// A resolved identity: who is acting, in what role, and for which hostel.
///
/// Staff with no hostel act campus-wide.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActorIdentity {
    /// The actor's identifier.
    pub id: ActorId,
    /// The actor's role.
    pub role: Role,
    /// The hostel the actor belongs to, if any.
    pub hostel_id: Option<HostelId>,
}

impl ActorIdentity {
    /// Creates a new identity.
    #[must_use]
    pub const fn new(id: ActorId, role: Role, hostel_id: Option<HostelId>) -> Self {
        Self {
            id,
            role,
            hostel_id,
        }
    }
}

/// Short (same-day) or long (multi-day) exit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PassType {
    /// Single-day exit with a same-day return.
    Short,
    /// Multi-day exit with a later return date.
    Long,
}

impl PassType {
    /// Returns the wire representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Short => "short",
            Self::Long => "long",
        }
    }
}

impl FromStr for PassType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "short" => Ok(Self::Short),
            "long" => Ok(Self::Long),
            _ => Err(DomainError::InvalidPassType(s.to_string())),
        }
    }
}

impl std::fmt::Display for PassType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Who performed a lifecycle step, and when.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attribution {
    /// The acting identity.
    pub by: ActorId,
    /// When the step was recorded.
    #[serde(with = "time::serde::rfc3339")]
    pub at: OffsetDateTime,
}

impl Attribution {
    /// Creates an attribution record.
    #[must_use]
    pub const fn new(by: ActorId, at: OffsetDateTime) -> Self {
        Self { by, at }
    }
}

/// The person to contact if something goes wrong while the student is away.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmergencyContact {
    /// Contact name.
    pub name: String,
    /// Contact phone: 10-15 digits with an optional leading `+`.
    pub phone: String,
}

/// The immutable details of a pass request, fixed at submission.
///
/// Values of this type are only produced by submission validation, so every
/// field already satisfies its length, format and cross-field rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PassDetails {
    /// Short or long pass.
    pub pass_type: PassType,
    /// Why the student is leaving.
    pub reason: String,
    /// Where the student is going.
    pub destination: String,
    /// Departure date.
    #[serde(with = "pass_date")]
    pub departure_date: Date,
    /// Departure time of day.
    #[serde(with = "clock_time")]
    pub departure_time: Time,
    /// Return date.
    #[serde(default, with = "pass_date::option")]
    pub return_date: Option<Date>,
    /// Return time of day.
    #[serde(default, with = "clock_time::option")]
    pub return_time: Option<Time>,
    /// Emergency contact for the trip.
    pub emergency_contact: EmergencyContact,
    /// Free-form notes.
    pub additional_notes: Option<String>,
    /// Whether the student's parent or guardian should be notified.
    pub parent_notification: bool,
}

impl PassDetails {
    /// Returns the departure instant, interpreting the wall-clock values at `offset`.
    #[must_use]
    pub const fn departure_at(&self, offset: UtcOffset) -> OffsetDateTime {
        PrimitiveDateTime::new(self.departure_date, self.departure_time).assume_offset(offset)
    }
}

/// A student's exit-pass request and its lifecycle attribution.
///
/// Attribution slots are filled once, by the transition that owns them, and
/// never overwritten.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PassRequest {
    /// Unique request identifier.
    pub id: PassRequestId,
    /// The owning student.
    pub student_id: ActorId,
    /// The student's hostel at submission time.
    pub hostel_id: Option<HostelId>,
    /// Submission details.
    pub details: PassDetails,
    /// Current lifecycle status.
    pub status: PassStatus,
    /// Porter/security forwarding.
    pub forwarded: Option<Attribution>,
    /// CSO (or assistant) approval.
    pub cso_approval: Option<Attribution>,
    /// Senior (DSA) approval.
    pub senior_approval: Option<Attribution>,
    /// Denial.
    pub denial: Option<Attribution>,
    /// Why the request was denied.
    pub denial_reason: Option<String>,
    /// Physical departure.
    pub checked_out: Option<Attribution>,
    /// Physical return.
    pub checked_in: Option<Attribution>,
    /// Cancellation by the owner.
    pub cancellation: Option<Attribution>,
    /// Why the request was cancelled.
    pub cancellation_reason: Option<String>,
    /// Creation timestamp.
    #[serde(with = "time::serde::rfc3339")]
    pub submitted_at: OffsetDateTime,
    /// Timestamp of the most recent change.
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
    /// Optimistic-concurrency version, bumped by the store on every update.
    pub version: u64,
}

impl PassRequest {
    /// Creates a new request in the `pending` state.
    #[must_use]
    pub const fn new(
        id: PassRequestId,
        student_id: ActorId,
        hostel_id: Option<HostelId>,
        details: PassDetails,
        submitted_at: OffsetDateTime,
    ) -> Self {
        Self {
            id,
            student_id,
            hostel_id,
            details,
            status: PassStatus::Pending,
            forwarded: None,
            cso_approval: None,
            senior_approval: None,
            denial: None,
            denial_reason: None,
            checked_out: None,
            checked_in: None,
            cancellation: None,
            cancellation_reason: None,
            submitted_at,
            updated_at: submitted_at,
            version: 1,
        }
    }

    /// Returns true if `actor` is the student who owns this request.
    #[must_use]
    pub fn is_owned_by(&self, actor: &ActorId) -> bool {
        &self.student_id == actor
    }
}
