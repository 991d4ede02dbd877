// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use exit_pass_domain::{PassRequest, PassStatus};
use serde::Serialize;
use std::collections::BTreeMap;

/// Per-status request counts for dashboard cards.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct StatusSummary {
    /// Number of requests counted.
    pub total: usize,
    /// Count per status. Every status is present, possibly with zero.
    pub by_status: BTreeMap<PassStatus, usize>,
}

impl StatusSummary {
    /// Tallies `requests` by status.
    pub fn from_requests<'a>(requests: impl IntoIterator<Item = &'a PassRequest>) -> Self {
        let mut by_status: BTreeMap<PassStatus, usize> =
            PassStatus::ALL.iter().map(|status| (*status, 0)).collect();
        let mut total: usize = 0;
        for request in requests {
            *by_status.entry(request.status).or_insert(0) += 1;
            total += 1;
        }
        Self { total, by_status }
    }

    /// Returns the count for `status`.
    #[must_use]
    pub fn count(&self, status: PassStatus) -> usize {
        self.by_status.get(&status).copied().unwrap_or(0)
    }

    /// Requests still awaiting a decision (`pending`, `forwarded` or `cso_approved`).
    #[must_use]
    pub fn awaiting_decision(&self) -> usize {
        self.count(PassStatus::Pending)
            + self.count(PassStatus::Forwarded)
            + self.count(PassStatus::CsoApproved)
    }
}
