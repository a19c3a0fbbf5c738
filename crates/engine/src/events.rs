// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Translation of subsystem events into expectation updates
//!
//! Network, protocol and channel subsystems report what they finished; each
//! report clears the matching expectation and, when the finished work reveals
//! more work, adds the expectations for it.

use hf_core::{AttachmentId, Expectation, MessageId, OwnedIdentityId, ProtocolMessageId};

/// Something a subsystem finished
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlowEvent {
    /// The server listed the messages a wake-up has to download
    MessagesToDownloadDiscovered { messages: Vec<MessageId> },
    /// A listed message was fetched; its attachments now need a decision
    MessageDownloaded {
        message: MessageId,
        attachments: Vec<AttachmentId>,
    },
    /// A fetched message was decrypted, possibly yielding a protocol message
    MessageDecrypted {
        message: MessageId,
        protocol_message: Option<ProtocolMessageId>,
    },
    ProtocolMessageProcessed {
        protocol_message: ProtocolMessageId,
    },
    OutboxMessageUploaded {
        message: MessageId,
    },
    OutboxMessageDeleted {
        message: MessageId,
    },
    /// Some flow now owns this upload; nobody else needs to wait for it
    AttachmentUploadTakenCareOf {
        attachment: AttachmentId,
    },
    AttachmentDownloadDecisionMade {
        attachment: AttachmentId,
    },
    ReturnReceiptPosted {
        owned_identity: OwnedIdentityId,
        message: MessageId,
    },
    /// An outgoing message and its attachments were cancelled and deleted
    OutboxMessageCancelled {
        message: MessageId,
        attachments: Vec<AttachmentId>,
    },
}

/// Which flows an update applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateScope {
    /// The flow the event was reported against
    Flow,
    /// Every flow waiting on the removed expectations
    AllFlows,
}

/// Remove/add pair derived from one event
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpectationUpdate {
    pub scope: UpdateScope,
    pub remove: Vec<Expectation>,
    pub add: Vec<Expectation>,
}

impl ExpectationUpdate {
    fn flow(remove: Vec<Expectation>, add: Vec<Expectation>) -> Self {
        Self {
            scope: UpdateScope::Flow,
            remove,
            add,
        }
    }

    fn all_flows(remove: Vec<Expectation>) -> Self {
        Self {
            scope: UpdateScope::AllFlows,
            remove,
            add: Vec::new(),
        }
    }
}

impl FlowEvent {
    pub fn name(&self) -> &'static str {
        match self {
            FlowEvent::MessagesToDownloadDiscovered { .. } => "messages_to_download_discovered",
            FlowEvent::MessageDownloaded { .. } => "message_downloaded",
            FlowEvent::MessageDecrypted { .. } => "message_decrypted",
            FlowEvent::ProtocolMessageProcessed { .. } => "protocol_message_processed",
            FlowEvent::OutboxMessageUploaded { .. } => "outbox_message_uploaded",
            FlowEvent::OutboxMessageDeleted { .. } => "outbox_message_deleted",
            FlowEvent::AttachmentUploadTakenCareOf { .. } => "attachment_upload_taken_care_of",
            FlowEvent::AttachmentDownloadDecisionMade { .. } => "attachment_download_decision_made",
            FlowEvent::ReturnReceiptPosted { .. } => "return_receipt_posted",
            FlowEvent::OutboxMessageCancelled { .. } => "outbox_message_cancelled",
        }
    }

    pub fn to_update(&self) -> ExpectationUpdate {
        match self {
            FlowEvent::MessagesToDownloadDiscovered { messages } => ExpectationUpdate::flow(
                vec![Expectation::MessagesToDownloadAreKnown],
                messages
                    .iter()
                    .map(|m| Expectation::MessageDownloaded { message: m.clone() })
                    .collect(),
            ),
            FlowEvent::MessageDownloaded {
                message,
                attachments,
            } => {
                let mut add = vec![Expectation::MessageDecrypted {
                    message: message.clone(),
                }];
                add.extend(attachments.iter().map(|a| {
                    Expectation::AttachmentDownloadDecisionMade {
                        attachment: a.clone(),
                    }
                }));
                ExpectationUpdate::flow(
                    vec![Expectation::MessageDownloaded {
                        message: message.clone(),
                    }],
                    add,
                )
            }
            FlowEvent::MessageDecrypted {
                message,
                protocol_message,
            } => ExpectationUpdate::flow(
                vec![Expectation::MessageDecrypted {
                    message: message.clone(),
                }],
                protocol_message
                    .iter()
                    .map(|p| Expectation::ProtocolMessageProcessed {
                        protocol_message: p.clone(),
                    })
                    .collect(),
            ),
            FlowEvent::ProtocolMessageProcessed { protocol_message } => ExpectationUpdate::flow(
                vec![Expectation::ProtocolMessageProcessed {
                    protocol_message: protocol_message.clone(),
                }],
                Vec::new(),
            ),
            FlowEvent::OutboxMessageUploaded { message } => ExpectationUpdate::flow(
                vec![Expectation::OutboxMessageUploaded {
                    message: message.clone(),
                }],
                Vec::new(),
            ),
            FlowEvent::OutboxMessageDeleted { message } => ExpectationUpdate::flow(
                vec![Expectation::OutboxMessageDeleted {
                    message: message.clone(),
                }],
                Vec::new(),
            ),
            FlowEvent::AttachmentUploadTakenCareOf { attachment } => {
                ExpectationUpdate::all_flows(vec![Expectation::AttachmentUploadTakenCareOf {
                    attachment: attachment.clone(),
                }])
            }
            FlowEvent::AttachmentDownloadDecisionMade { attachment } => ExpectationUpdate::flow(
                vec![Expectation::AttachmentDownloadDecisionMade {
                    attachment: attachment.clone(),
                }],
                Vec::new(),
            ),
            FlowEvent::ReturnReceiptPosted {
                owned_identity,
                message,
            } => ExpectationUpdate::flow(
                vec![Expectation::ReturnReceiptPosted {
                    owned_identity: owned_identity.clone(),
                    message: message.clone(),
                }],
                Vec::new(),
            ),
            FlowEvent::OutboxMessageCancelled {
                message,
                attachments,
            } => {
                let mut remove = vec![
                    Expectation::OutboxMessageUploaded {
                        message: message.clone(),
                    },
                    Expectation::OutboxMessageDeleted {
                        message: message.clone(),
                    },
                ];
                remove.extend(
                    attachments
                        .iter()
                        .map(|a| Expectation::AttachmentUploadTakenCareOf {
                            attachment: a.clone(),
                        }),
                );
                ExpectationUpdate::all_flows(remove)
            }
        }
    }
}

#[cfg(test)]
#[path = "events_tests.rs"]
mod tests;
