//! Remote-notification wake-ups
//!
//! A wake-up reports `NoNewData` when the server had nothing for it and
//! `Success` once the work it discovered has been carried out.

use crate::prelude::*;
use crate::prelude::assert_eq;

#[test]
fn nothing_to_download_is_no_new_data() {
    let fakes = Fakes::new();
    let coordinator = fakes.remote_notifications();
    let completions = Completions::new();

    let id = coordinator.start_wake(completions.handler());
    coordinator.apply_event(
        Some(&id),
        &FlowEvent::MessagesToDownloadDiscovered {
            messages: Vec::new(),
        },
    );

    assert_eq!(completions.of(&id), vec![FlowOutcome::NoNewData]);
}

#[test]
fn full_download_pipeline_is_success() {
    let fakes = Fakes::new();
    let coordinator = fakes.remote_notifications();
    let completions = Completions::new();
    let messages = vec![MessageId::from("a"), MessageId::from("b")];

    let id = coordinator.start_wake(completions.handler());
    coordinator.apply_event(
        Some(&id),
        &FlowEvent::MessagesToDownloadDiscovered {
            messages: messages.clone(),
        },
    );
    for message in &messages {
        coordinator.apply_event(
            Some(&id),
            &FlowEvent::MessageDownloaded {
                message: message.clone(),
                attachments: Vec::new(),
            },
        );
    }
    for message in &messages {
        assert!(completions.all().is_empty());
        coordinator.apply_event(
            Some(&id),
            &FlowEvent::MessageDecrypted {
                message: message.clone(),
                protocol_message: None,
            },
        );
    }

    assert_eq!(completions.of(&id), vec![FlowOutcome::Success]);
    assert_eq!(fakes.timer.pending_count(), 0);
}

#[test]
fn completion_is_delivered_before_the_deadline_even_when_work_is_stuck() {
    let fakes = Fakes::with_config(
        CoordinatorConfig::default().with_push_deadline(Duration::from_secs(10)),
    );
    let coordinator = fakes.remote_notifications();
    let completions = Completions::new();

    let id = coordinator.start_wake(completions.handler());
    coordinator.apply_event(
        Some(&id),
        &FlowEvent::MessagesToDownloadDiscovered {
            messages: vec![MessageId::from("stuck")],
        },
    );
    fakes.timer.advance(Duration::from_secs(10));

    assert_eq!(
        completions.of(&id),
        vec![FlowOutcome::Failed(FailureCause::DeadlineExpired)]
    );
}
