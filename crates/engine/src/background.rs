// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Coordinator for flows triggered by the app's own actions
//!
//! Sending a message, posting a return receipt or resuming a protocol each
//! start a flow that keeps the process alive until the subsystems involved
//! report back. These flows have no deadline and their completion handler
//! is for cleanup only.

use crate::barrier::ExpectationBarrier;
use crate::events::FlowEvent;
use crate::registry::CompletionHandler;
use hf_core::{
    AttachmentId, Clock, Expectation, FlowId, FlowOutcome, MessageId, OwnedIdentityId,
    ProtocolMessageId, SystemClock,
};

pub struct BackgroundTaskCoordinator<C: Clock = SystemClock> {
    barrier: ExpectationBarrier<C>,
}

impl<C: Clock> Clone for BackgroundTaskCoordinator<C> {
    fn clone(&self) -> Self {
        Self {
            barrier: self.barrier.clone(),
        }
    }
}

impl<C: Clock> BackgroundTaskCoordinator<C> {
    pub(crate) fn new(barrier: ExpectationBarrier<C>) -> Self {
        Self { barrier }
    }

    /// Start a flow waiting on `expectations`
    ///
    /// May be started empty and grown later with
    /// [`update_expectations`](Self::update_expectations); an empty flow that
    /// is never grown ends immediately.
    pub fn start_flow(
        &self,
        label: &str,
        expectations: impl IntoIterator<Item = Expectation>,
        completion: Option<CompletionHandler>,
    ) -> FlowId {
        self.barrier.start_flow(label, expectations, completion, None)
    }

    /// Keep running until an outgoing message is uploaded and deleted, and
    /// every attachment upload has been taken care of
    pub fn start_posting_message(
        &self,
        message: &MessageId,
        attachments: &[AttachmentId],
        completion: Option<CompletionHandler>,
    ) -> FlowId {
        let mut expectations = vec![
            Expectation::OutboxMessageUploaded {
                message: message.clone(),
            },
            Expectation::OutboxMessageDeleted {
                message: message.clone(),
            },
        ];
        expectations.extend(
            attachments
                .iter()
                .map(|a| Expectation::AttachmentUploadTakenCareOf {
                    attachment: a.clone(),
                }),
        );
        self.start_flow("post-message", expectations, completion)
    }

    pub fn start_posting_return_receipt(
        &self,
        owned_identity: &OwnedIdentityId,
        message: &MessageId,
        completion: Option<CompletionHandler>,
    ) -> FlowId {
        self.start_flow(
            "post-return-receipt",
            [Expectation::ReturnReceiptPosted {
                owned_identity: owned_identity.clone(),
                message: message.clone(),
            }],
            completion,
        )
    }

    pub fn start_processing_protocol_message(
        &self,
        protocol_message: &ProtocolMessageId,
        completion: Option<CompletionHandler>,
    ) -> FlowId {
        self.start_flow(
            "process-protocol-message",
            [Expectation::ProtocolMessageProcessed {
                protocol_message: protocol_message.clone(),
            }],
            completion,
        )
    }

    pub fn update_expectations(&self, id: &FlowId, remove: &[Expectation], add: &[Expectation]) {
        self.barrier.update_expectations(id, remove, add);
    }

    pub fn update_all_expectations(&self, remove: &[Expectation]) {
        self.barrier.update_all_expectations(remove);
    }

    pub fn apply_event(&self, flow: Option<&FlowId>, event: &FlowEvent) {
        self.barrier.apply_event(flow, event);
    }

    pub fn end_flow(&self, id: &FlowId, outcome: FlowOutcome) {
        self.barrier.end_flow(id, outcome);
    }

    pub fn is_active(&self, id: &FlowId) -> bool {
        self.barrier.is_active(id)
    }

    pub fn active_flow_count(&self) -> usize {
        self.barrier.active_flow_count()
    }

    pub fn expectations_of(&self, id: &FlowId) -> Option<Vec<Expectation>> {
        self.barrier.expectations_of(id)
    }
}

#[cfg(test)]
#[path = "background_tests.rs"]
mod tests;
