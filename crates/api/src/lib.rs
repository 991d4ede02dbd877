// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Service boundary for the exit-pass lifecycle.
//!
//! Clients pass an actor id on every call; the service resolves it through
//! an [`IdentityProvider`], so no session state lives here.

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
#![allow(clippy::multiple_crate_versions)]

mod capabilities;
mod clock;
mod error;
mod identity;
mod service;
mod summary;

#[cfg(test)]
mod tests;

pub use capabilities::{Capability, PassCapabilities, compute_pass_capabilities};
pub use clock::{Clock, FixedClock, SystemClock};
pub use error::ApiError;
pub use identity::{DirectoryEntry, IdentityProvider, StaticDirectory};
pub use service::PassService;
pub use summary::StatusSummary;
