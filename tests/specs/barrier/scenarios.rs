//! Barrier scenarios
//!
//! A flow ends exactly once, when its last expectation clears or it is
//! forced to end, and its background grant is released with it.

use crate::prelude::*;
use crate::prelude::assert_eq;

#[test]
fn single_acknowledgement_ends_the_flow() {
    let fakes = Fakes::new();
    let coordinator = fakes.background_tasks();
    let completions = Completions::new();

    let id = coordinator.start_flow("upload", [attachment_ack("x", 0)], Some(completions.handler()));
    coordinator.update_expectations(&id, &[attachment_ack("x", 0)], &[]);

    assert_eq!(completions.of(&id), vec![FlowOutcome::Success]);
    let grant = fakes.background.begun()[0];
    assert_eq!(fakes.background.end_count(grant), 1);
}

#[test]
fn unsatisfied_wake_times_out() {
    let fakes = Fakes::with_config(
        CoordinatorConfig::default().with_push_deadline(Duration::from_secs(5)),
    );
    let coordinator = fakes.remote_notifications();
    let completions = Completions::new();
    let handler = completions.handler();

    let id = coordinator.start_wake(handler);
    fakes.timer.advance(Duration::from_secs(5));

    assert_eq!(
        completions.of(&id),
        vec![FlowOutcome::Failed(FailureCause::DeadlineExpired)]
    );
    assert!(fakes.background.active().is_empty());
}

#[test]
fn two_removals_produce_one_ending() {
    let fakes = Fakes::new();
    let coordinator = fakes.background_tasks();
    let completions = Completions::new();
    let a = attachment_ack("x", 0);
    let b = attachment_ack("x", 1);

    let id = coordinator.start_flow("upload", [a.clone(), b.clone()], Some(completions.handler()));
    coordinator.update_expectations(&id, &[a.clone()], &[]);
    coordinator.update_expectations(&id, &[b.clone()], &[]);
    coordinator.update_expectations(&id, &[a, b], &[]);
    coordinator.end_flow(&id, FlowOutcome::Success);

    assert_eq!(completions.all().len(), 1);
}

#[test]
fn cross_flow_clearing_releases_every_waiting_flow() {
    let fakes = Fakes::new();
    let coordinator = fakes.background_tasks();
    let completions = Completions::new();
    let shared = attachment_ack("m", 0);

    let first = coordinator.start_flow("first", [shared.clone()], Some(completions.handler()));
    let second = coordinator.start_flow("second", [shared.clone()], Some(completions.handler()));
    coordinator.update_all_expectations(&[shared]);

    assert_eq!(
        completions.all(),
        vec![(first, FlowOutcome::Success), (second, FlowOutcome::Success)]
    );
    assert!(fakes.background.active().is_empty());
}

#[test]
fn unknown_flows_are_tolerated() {
    let fakes = Fakes::new();
    let coordinator = fakes.background_tasks();
    let stranger = FlowId::from("elsewhere");

    coordinator.update_expectations(&stranger, &[attachment_ack("m", 0)], &[]);
    coordinator.end_flow(&stranger, FlowOutcome::Success);

    assert_eq!(coordinator.active_flow_count(), 0);
    assert!(fakes.background.calls().is_empty());
}

#[test]
fn host_revocation_is_reported_apart_from_timeout() {
    let fakes = Fakes::new();
    let coordinator = fakes.remote_notifications();
    let completions = Completions::new();

    let id = coordinator.start_wake(completions.handler());
    fakes.background.revoke(fakes.background.begun()[0]);

    assert_eq!(
        completions.of(&id),
        vec![FlowOutcome::Failed(FailureCause::ResourceRevoked)]
    );
    assert_eq!(fakes.timer.pending_count(), 0);
}
