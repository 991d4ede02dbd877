// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod error;
mod filter;
mod pass_status;
mod role;
mod types;
mod validation;

#[cfg(test)]
mod tests;

pub use error::{DomainError, FieldError, ValidationErrors};
pub use filter::{DateRange, PassFilter};
pub use pass_status::PassStatus;
pub use role::Role;
pub use types::{
    ActorId, ActorIdentity, Attribution, EmergencyContact, HostelId, PassDetails, PassRequest,
    PassRequestId, PassType,
};
pub use validation::{PassSubmission, ValidatedRequest, validate};
