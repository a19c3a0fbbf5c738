//! Flows against a host that budgets background time
//!
//! Runs on tokio with paused time: the host budget and the push deadline
//! are real timers racing each other.

use crate::prelude::*;
use crate::prelude::assert_eq;

#[tokio::test(start_paused = true)]
async fn lapsed_budget_revokes_a_flow_without_deadline() {
    let host = OnTokio::new(
        CoordinatorConfig::default().with_background_budget(Duration::from_secs(30)),
    );
    let coordinator = host.builder.build_background_tasks().unwrap();
    let completions = Completions::new();

    let id = coordinator.start_flow("upload", [attachment_ack("m", 0)], Some(completions.handler()));
    tokio::time::sleep(Duration::from_secs(29)).await;
    assert!(coordinator.is_active(&id));

    tokio::time::sleep(Duration::from_secs(2)).await;
    assert_eq!(
        completions.of(&id),
        vec![FlowOutcome::Failed(FailureCause::ResourceRevoked)]
    );
    assert_eq!(host.grants.active_count(), 0);
}

#[tokio::test(start_paused = true)]
async fn push_deadline_beats_the_budget() {
    let config = CoordinatorConfig::from_toml_str(
        r#"
        push_deadline = "5s"
        background_budget = "30s"
        "#,
    )
    .unwrap();
    let host = OnTokio::new(config);
    let coordinator = host.builder.build_remote_notifications().unwrap();
    let completions = Completions::new();

    let id = coordinator.start_wake(completions.handler());
    tokio::time::sleep(Duration::from_secs(6)).await;

    assert_eq!(
        completions.of(&id),
        vec![FlowOutcome::Failed(FailureCause::DeadlineExpired)]
    );
    assert_eq!(host.grants.active_count(), 0);
    assert_eq!(host.timer.armed_count(), 0);
}

#[tokio::test(start_paused = true)]
async fn finished_wake_disarms_both_timers() {
    let host = OnTokio::new(CoordinatorConfig::default());
    let coordinator = host.builder.build_remote_notifications().unwrap();
    let completions = Completions::new();

    let id = coordinator.start_wake(completions.handler());
    assert_eq!(host.timer.armed_count(), 2);

    coordinator.apply_event(
        Some(&id),
        &FlowEvent::MessagesToDownloadDiscovered {
            messages: Vec::new(),
        },
    );

    assert_eq!(completions.of(&id), vec![FlowOutcome::NoNewData]);
    assert_eq!(host.timer.armed_count(), 0);
    tokio::time::sleep(Duration::from_secs(60)).await;
    assert_eq!(completions.all().len(), 1);
}
