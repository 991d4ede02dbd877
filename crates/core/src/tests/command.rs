// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{Command, LifecycleAction, TransitionPayload};
use std::str::FromStr;
use time::macros::datetime;

#[test]
fn test_action_names_parse_leniently() {
    assert_eq!(
        LifecycleAction::from_str("approve-senior").unwrap(),
        LifecycleAction::ApproveSenior
    );
    assert_eq!(
        LifecycleAction::from_str(" Checkout ").unwrap(),
        LifecycleAction::Checkout
    );
    assert!(LifecycleAction::from_str("escalate").is_err());
}

#[test]
fn test_create_is_not_a_transition_command() {
    assert_eq!(
        Command::from_parts(LifecycleAction::Create, TransitionPayload::default()),
        None
    );
}

#[test]
fn test_from_parts_carries_payload() {
    let payload: TransitionPayload = TransitionPayload {
        reason: Some(String::from("Insufficient notice")),
        at: Some(datetime!(2026-03-02 09:00 UTC)),
    };

    assert_eq!(
        Command::from_parts(LifecycleAction::Deny, payload.clone()),
        Some(Command::Deny {
            reason: String::from("Insufficient notice")
        })
    );
    assert_eq!(
        Command::from_parts(LifecycleAction::Checkout, payload),
        Some(Command::Checkout {
            at: Some(datetime!(2026-03-02 09:00 UTC))
        })
    );
}

#[test]
fn test_every_transition_action_round_trips_through_a_command() {
    for action in LifecycleAction::TRANSITIONS {
        let command: Command =
            Command::from_parts(action, TransitionPayload::default()).unwrap();
        assert_eq!(command.action(), action);
    }
}
