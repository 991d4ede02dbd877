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

mod apply;
mod command;
mod error;
mod permission;
mod policy;
mod state;

#[cfg(test)]
mod tests;

// Re-export public types and functions
pub use apply::{apply, apply_create};
pub use command::{Command, LifecycleAction, TransitionPayload};
pub use error::{CoreError, LifecycleError, PermissionError};
pub use permission::{PERMISSIONS, PermissionRule, authorize, authorize_create, rule_for};
pub use policy::{ApprovalPolicy, ApprovalSteps, LifecycleConfig, PassPolicy};
pub use state::{TransitionResult, empty_snapshot, snapshot_of};
