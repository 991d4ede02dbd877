// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Approval-chain configuration.

use exit_pass_domain::PassType;
use serde::{Deserialize, Serialize};
use time::UtcOffset;

/// How many approvals a pass needs before it becomes `approved`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApprovalSteps {
    /// CSO approval alone is final.
    Single,
    /// CSO approval leads to `cso_approved`; DSA approval is final.
    TwoStep,
}

/// The approval chain for one pass type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PassPolicy {
    /// Number of approval steps.
    pub approval_steps: ApprovalSteps,
    /// When set, the CSO may only approve a request a porter has forwarded.
    #[serde(default)]
    pub requires_forwarding: bool,
}

impl PassPolicy {
    /// A chain with the given number of steps and optional forwarding.
    #[must_use]
    pub const fn new(approval_steps: ApprovalSteps) -> Self {
        Self {
            approval_steps,
            requires_forwarding: false,
        }
    }

    /// Makes porter forwarding mandatory before CSO approval.
    #[must_use]
    pub const fn with_required_forwarding(mut self) -> Self {
        self.requires_forwarding = true;
        self
    }
}

/// Approval chains keyed by pass type.
///
/// Defaults to single-step short passes and two-step long passes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApprovalPolicy {
    /// Chain for short passes.
    pub short: PassPolicy,
    /// Chain for long passes.
    pub long: PassPolicy,
}

impl ApprovalPolicy {
    /// Returns the chain for `pass_type`.
    #[must_use]
    pub const fn for_pass_type(&self, pass_type: PassType) -> &PassPolicy {
        match pass_type {
            PassType::Short => &self.short,
            PassType::Long => &self.long,
        }
    }
}

impl Default for ApprovalPolicy {
    fn default() -> Self {
        Self {
            short: PassPolicy::new(ApprovalSteps::Single),
            long: PassPolicy::new(ApprovalSteps::TwoStep),
        }
    }
}

/// Everything the lifecycle needs besides the record and the actor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LifecycleConfig {
    /// Approval chains.
    pub policy: ApprovalPolicy,
    /// Offset in which submitted departure dates and times are interpreted.
    pub utc_offset: UtcOffset,
}

impl LifecycleConfig {
    /// Creates a configuration.
    #[must_use]
    pub const fn new(policy: ApprovalPolicy, utc_offset: UtcOffset) -> Self {
        Self { policy, utc_offset }
    }
}

impl Default for LifecycleConfig {
    fn default() -> Self {
        Self::new(ApprovalPolicy::default(), UtcOffset::UTC)
    }
}
