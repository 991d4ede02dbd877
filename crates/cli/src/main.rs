// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! # exit-pass
//!
//! Offline tooling for the exit-pass lifecycle.
//!
//! - `exit-pass validate <FILE>` checks a submission and prints the normalized details
//! - `exit-pass check-policy <FILE>` loads an approval policy and prints each chain
//! - `exit-pass permissions` prints the role and status table
//! - `exit-pass replay <SCRIPT>` runs a scripted scenario against an in-memory store

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf
)]
#![allow(clippy::multiple_crate_versions)]

mod script;

#[cfg(test)]
mod tests;

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use clap_verbosity_flag::{InfoLevel, Verbosity};
use color_eyre::{
    Result,
    eyre::{Context, bail},
};
use exit_pass::{ApprovalPolicy, ApprovalSteps, LifecycleConfig, PERMISSIONS, PassPolicy};
use exit_pass_domain::{
    PassDetails, PassStatus, PassSubmission, PassType, ValidationErrors, validate,
};
use serde::de::DeserializeOwned;
use time::format_description::well_known::Rfc3339;
use time::{OffsetDateTime, UtcOffset};
use tracing::level_filters::LevelFilter;
use tracing::{info, warn};
use tracing_log::AsTrace;

use crate::script::{ReplayReport, Script, replay};

fn main() -> Result<()> {
    color_eyre::install()?;
    let args = Args::parse();
    tracing_subscriber::fmt()
        .with_max_level(args.log_level())
        .with_writer(std::io::stderr)
        .without_time()
        .init();

    match args.run() {
        Ok(()) => (),
        Err(err) => {
            tracing::error!("{err:#}");
            std::process::exit(1);
        }
    }
    Ok(())
}

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,

    #[command(flatten)]
    verbosity: Verbosity<InfoLevel>,
}

impl Args {
    fn run(self) -> Result<()> {
        self.command.run()
    }

    fn log_level(&self) -> LevelFilter {
        self.verbosity.log_level_filter().as_trace()
    }
}

#[derive(Clone, Debug, Subcommand)]
enum Command {
    /// Validate a JSON pass submission
    #[command(visible_alias = "v")]
    Validate {
        /// Path to the submission file
        file: PathBuf,

        /// Instant to validate against, RFC 3339. Defaults to now
        #[arg(long, value_parser = parse_instant)]
        now: Option<OffsetDateTime>,

        /// Offset in which departure dates and times are interpreted, in hours
        #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
        utc_offset_hours: i8,
    },

    /// Load an approval policy file and print its chains
    #[command(visible_alias = "cp")]
    CheckPolicy {
        /// Path to the policy file
        file: PathBuf,
    },

    /// Print which roles may perform each action, and from which statuses
    #[command(visible_alias = "p")]
    Permissions,

    /// Replay a scripted scenario and print the resulting report
    #[command(visible_alias = "r")]
    Replay {
        /// Path to the script file
        script: PathBuf,

        /// Approval policy file. Defaults to single-step short and two-step long passes
        #[arg(long)]
        policy: Option<PathBuf>,

        /// Offset in which departure dates and times are interpreted, in hours
        #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
        utc_offset_hours: i8,
    },
}

impl Command {
    fn run(self) -> Result<()> {
        match self {
            Self::Validate {
                file,
                now,
                utc_offset_hours,
            } => validate_file(&file, now, utc_offset_hours),
            Self::CheckPolicy { file } => check_policy(&file),
            Self::Permissions => {
                permissions();
                Ok(())
            }
            Self::Replay {
                script,
                policy,
                utc_offset_hours,
            } => replay_file(&script, policy.as_deref(), utc_offset_hours),
        }
    }
}

fn parse_instant(value: &str) -> Result<OffsetDateTime, time::error::Parse> {
    OffsetDateTime::parse(value, &Rfc3339)
}

fn offset_from_hours(hours: i8) -> Result<UtcOffset> {
    UtcOffset::from_hms(hours, 0, 0)
        .wrap_err_with(|| format!("{hours} is not a valid UTC offset in hours"))
}

fn load_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let text: String =
        fs::read_to_string(path).wrap_err_with(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&text).wrap_err_with(|| format!("Failed to parse {}", path.display()))
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    let text: String = serde_json::to_string_pretty(value).wrap_err("Failed to encode output")?;
    println!("{text}");
    Ok(())
}

/// Validate a submission file
fn validate_file(path: &Path, now: Option<OffsetDateTime>, utc_offset_hours: i8) -> Result<()> {
    let offset: UtcOffset = offset_from_hours(utc_offset_hours)?;
    let now: OffsetDateTime = now.unwrap_or_else(OffsetDateTime::now_utc).to_offset(offset);
    let submission: PassSubmission = load_json(path)?;

    let details: PassDetails = match validate(&submission, now) {
        Ok(details) => details,
        Err(errors) => {
            report_validation_errors(&errors);
            bail!("{} has {} invalid field(s)", path.display(), errors.len());
        }
    };

    info!(pass_type = %details.pass_type, "Submission is valid");
    print_json(&details)
}

fn report_validation_errors(errors: &ValidationErrors) {
    for error in errors {
        warn!(field = %error.field, "{}", error.message);
    }
}

/// Check a policy file
fn check_policy(path: &Path) -> Result<()> {
    let policy: ApprovalPolicy = load_json(path)?;
    for pass_type in [PassType::Short, PassType::Long] {
        println!("{pass_type}: {}", describe_chain(policy.for_pass_type(pass_type)));
    }
    Ok(())
}

fn describe_chain(policy: &PassPolicy) -> String {
    let mut steps: Vec<&str> = Vec::new();
    if policy.requires_forwarding {
        steps.push("forward");
    }
    steps.push("approve");
    if policy.approval_steps == ApprovalSteps::TwoStep {
        steps.push("approve_senior");
    }
    steps.join(" -> ")
}

/// Print the permission table
fn permissions() {
    for rule in PERMISSIONS {
        let roles: Vec<String> = rule.roles.iter().map(ToString::to_string).collect();
        let from: Vec<&str> = rule.from.iter().map(PassStatus::as_str).collect();
        let from: String = if from.is_empty() {
            String::from("(new request)")
        } else {
            from.join(", ")
        };
        println!("{:<15} {:<30} {from}", rule.action.as_str(), roles.join(", "));
    }
}

/// Replay a script file
fn replay_file(path: &Path, policy: Option<&Path>, utc_offset_hours: i8) -> Result<()> {
    let policy: ApprovalPolicy = match policy {
        Some(policy_path) => load_json(policy_path)?,
        None => ApprovalPolicy::default(),
    };
    let offset: UtcOffset = offset_from_hours(utc_offset_hours)?;
    let config: LifecycleConfig = LifecycleConfig::new(policy, offset);
    let script: Script = load_json(path)?;

    let report: ReplayReport = replay(&script, config)?;
    info!(
        steps = report.steps.len(),
        requests = report.summary.total,
        "Replay finished"
    );
    print_json(&report)
}
