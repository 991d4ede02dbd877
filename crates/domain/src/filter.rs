// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Dashboard filters over pass requests.
//!
//! Text matching is case-insensitive substring matching. Date ranges are
//! inclusive at both ends and apply to the departure date.

use crate::pass_status::PassStatus;
use crate::types::{ActorId, HostelId, PassRequest, PassType};
use time::Date;

/// An inclusive range of calendar dates. Either bound may be open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DateRange {
    /// Earliest date included.
    pub from: Option<Date>,
    /// Latest date included.
    pub to: Option<Date>,
}

impl DateRange {
    /// Creates a range.
    #[must_use]
    pub const fn new(from: Option<Date>, to: Option<Date>) -> Self {
        Self { from, to }
    }

    /// Returns true if `date` lies within the range.
    #[must_use]
    pub fn contains(&self, date: Date) -> bool {
        self.from.is_none_or(|from| date >= from) && self.to.is_none_or(|to| date <= to)
    }
}

/// Criteria for selecting pass requests. Unset criteria match everything.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PassFilter {
    /// Exact status.
    pub status: Option<PassStatus>,
    /// Exact pass type.
    pub pass_type: Option<PassType>,
    /// Owning student.
    pub student_id: Option<ActorId>,
    /// Hostel of the owning student.
    pub hostel_id: Option<HostelId>,
    /// Departure date window.
    pub departure: Option<DateRange>,
    /// Substring of the destination.
    pub destination: Option<String>,
    /// Substring of the reason, destination or request id.
    pub search: Option<String>,
}

impl PassFilter {
    /// A filter that matches every request.
    #[must_use]
    pub fn all() -> Self {
        Self::default()
    }

    /// Restricts to one status.
    #[must_use]
    pub const fn with_status(mut self, status: PassStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Restricts to one pass type.
    #[must_use]
    pub const fn with_pass_type(mut self, pass_type: PassType) -> Self {
        self.pass_type = Some(pass_type);
        self
    }

    /// Restricts to one student's requests.
    #[must_use]
    pub fn for_student(mut self, student_id: ActorId) -> Self {
        self.student_id = Some(student_id);
        self
    }

    /// Restricts to one hostel.
    #[must_use]
    pub fn for_hostel(mut self, hostel_id: HostelId) -> Self {
        self.hostel_id = Some(hostel_id);
        self
    }

    /// Restricts to departures within `range`.
    #[must_use]
    pub const fn departing_within(mut self, range: DateRange) -> Self {
        self.departure = Some(range);
        self
    }

    /// Restricts to destinations containing `text`.
    #[must_use]
    pub fn with_destination(mut self, text: &str) -> Self {
        self.destination = Some(text.to_string());
        self
    }

    /// Restricts to requests whose reason, destination or id contains `text`.
    #[must_use]
    pub fn with_search(mut self, text: &str) -> Self {
        self.search = Some(text.to_string());
        self
    }

    /// Returns true if `request` satisfies every set criterion.
    #[must_use]
    pub fn matches(&self, request: &PassRequest) -> bool {
        if self.status.is_some_and(|status| status != request.status) {
            return false;
        }
        if self
            .pass_type
            .is_some_and(|pass_type| pass_type != request.details.pass_type)
        {
            return false;
        }
        if self
            .student_id
            .as_ref()
            .is_some_and(|student| student != &request.student_id)
        {
            return false;
        }
        if self
            .hostel_id
            .as_ref()
            .is_some_and(|hostel| request.hostel_id.as_ref() != Some(hostel))
        {
            return false;
        }
        if self
            .departure
            .is_some_and(|range| !range.contains(request.details.departure_date))
        {
            return false;
        }
        if let Some(text) = non_blank(self.destination.as_deref())
            && !contains_ignore_case(&request.details.destination, text)
        {
            return false;
        }
        if let Some(text) = non_blank(self.search.as_deref()) {
            return contains_ignore_case(&request.details.reason, text)
                || contains_ignore_case(&request.details.destination, text)
                || contains_ignore_case(request.id.value(), text);
        }
        true
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}
