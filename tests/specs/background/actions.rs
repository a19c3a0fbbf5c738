//! Action-triggered flows
//!
//! Sending a message, posting a receipt and resuming a protocol each keep
//! the process alive until the subsystems involved report back.

use crate::prelude::*;
use crate::prelude::assert_eq;

#[test]
fn sending_a_message_holds_until_upload_and_attachments_are_done() {
    let fakes = Fakes::new();
    let coordinator = fakes.background_tasks();
    let completions = Completions::new();
    let message = MessageId::from("m1");
    let attachments = vec![AttachmentId::new("m1", 0), AttachmentId::new("m1", 1)];

    let id = coordinator.start_posting_message(&message, &attachments, Some(completions.handler()));

    coordinator.apply_event(Some(&id), &FlowEvent::OutboxMessageUploaded { message: message.clone() });
    coordinator.apply_event(Some(&id), &FlowEvent::OutboxMessageDeleted { message });
    coordinator.apply_event(
        None,
        &FlowEvent::AttachmentUploadTakenCareOf {
            attachment: attachments[0].clone(),
        },
    );
    assert!(coordinator.is_active(&id));
    assert_eq!(
        coordinator.expectations_of(&id),
        Some(vec![attachment_ack("m1", 1)])
    );

    coordinator.apply_event(
        None,
        &FlowEvent::AttachmentUploadTakenCareOf {
            attachment: attachments[1].clone(),
        },
    );
    assert_eq!(completions.of(&id), vec![FlowOutcome::Success]);
}

#[test]
fn receipts_and_protocol_messages_each_get_a_flow() {
    let fakes = Fakes::new();
    let coordinator = fakes.background_tasks();
    let completions = Completions::new();
    let identity = OwnedIdentityId::from("me");
    let message = MessageId::from("m2");
    let protocol_message = ProtocolMessageId::from("p9");

    let receipt = coordinator.start_posting_return_receipt(&identity, &message, Some(completions.handler()));
    let protocol = coordinator.start_processing_protocol_message(&protocol_message, Some(completions.handler()));
    assert_eq!(coordinator.active_flow_count(), 2);

    coordinator.apply_event(Some(&protocol), &FlowEvent::ProtocolMessageProcessed { protocol_message });
    coordinator.apply_event(
        Some(&receipt),
        &FlowEvent::ReturnReceiptPosted {
            owned_identity: identity,
            message,
        },
    );

    assert_eq!(
        completions.all(),
        vec![(protocol, FlowOutcome::Success), (receipt, FlowOutcome::Success)]
    );
    assert_eq!(fakes.background.begun().len(), 2);
    assert!(fakes.background.active().is_empty());
}

#[test]
fn dropping_the_coordinator_abandons_live_flows() {
    let fakes = Fakes::new();
    let coordinator = fakes.background_tasks();
    let completions = Completions::new();

    let id = coordinator.start_flow("upload", [attachment_ack("m", 0)], Some(completions.handler()));
    drop(coordinator);

    assert_eq!(
        completions.of(&id),
        vec![FlowOutcome::Failed(FailureCause::Abandoned)]
    );
    assert!(fakes.background.active().is_empty());
}
