// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Expectations: pending sub-completions a flow waits on
//!
//! An expectation is a plain value. Two expectations are the same when they
//! have the same kind and the same correlating identifiers, which is what
//! makes adding a present expectation (or removing an absent one) a no-op.

use serde::{Deserialize, Serialize};

/// Identifier of an application or network message
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MessageId(pub String);

impl std::fmt::Display for MessageId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for MessageId {
    fn from(s: &str) -> Self {
        MessageId(s.to_string())
    }
}

/// Identifier of one attachment of a message
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AttachmentId {
    pub message: MessageId,
    pub number: u32,
}

impl AttachmentId {
    pub fn new(message: impl Into<MessageId>, number: u32) -> Self {
        Self {
            message: message.into(),
            number,
        }
    }
}

impl std::fmt::Display for AttachmentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}#{}", self.message, self.number)
    }
}

/// Identifier of a protocol message handled by the protocol engine
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ProtocolMessageId(pub String);

impl std::fmt::Display for ProtocolMessageId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ProtocolMessageId {
    fn from(s: &str) -> Self {
        ProtocolMessageId(s.to_string())
    }
}

/// Identifier of one of the local user's identities
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct OwnedIdentityId(pub String);

impl std::fmt::Display for OwnedIdentityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for OwnedIdentityId {
    fn from(s: &str) -> Self {
        OwnedIdentityId(s.to_string())
    }
}

/// A pending sub-completion
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Expectation {
    /// The set of messages a push wake-up must download is not yet known
    MessagesToDownloadAreKnown,
    /// A message listed by the server has been fetched
    MessageDownloaded { message: MessageId },
    /// A fetched message has been decrypted and handed to the application
    MessageDecrypted { message: MessageId },
    /// The protocol engine finished processing a protocol message
    ProtocolMessageProcessed { protocol_message: ProtocolMessageId },
    /// The server acknowledged an outbox message
    OutboxMessageUploaded { message: MessageId },
    /// An acknowledged outbox message was deleted locally
    OutboxMessageDeleted { message: MessageId },
    /// Someone took charge of uploading an attachment
    AttachmentUploadTakenCareOf { attachment: AttachmentId },
    /// The app decided whether to download an attachment
    AttachmentDownloadDecisionMade { attachment: AttachmentId },
    /// A return receipt was posted to the server
    ReturnReceiptPosted {
        owned_identity: OwnedIdentityId,
        message: MessageId,
    },
}

impl Expectation {
    /// Short kind name, used in logs
    pub fn kind(&self) -> &'static str {
        match self {
            Expectation::MessagesToDownloadAreKnown => "messages_to_download_are_known",
            Expectation::MessageDownloaded { .. } => "message_downloaded",
            Expectation::MessageDecrypted { .. } => "message_decrypted",
            Expectation::ProtocolMessageProcessed { .. } => "protocol_message_processed",
            Expectation::OutboxMessageUploaded { .. } => "outbox_message_uploaded",
            Expectation::OutboxMessageDeleted { .. } => "outbox_message_deleted",
            Expectation::AttachmentUploadTakenCareOf { .. } => "attachment_upload_taken_care_of",
            Expectation::AttachmentDownloadDecisionMade { .. } => {
                "attachment_download_decision_made"
            }
            Expectation::ReturnReceiptPosted { .. } => "return_receipt_posted",
        }
    }

    /// The message this expectation is about, if any
    pub fn message(&self) -> Option<&MessageId> {
        match self {
            Expectation::MessagesToDownloadAreKnown
            | Expectation::ProtocolMessageProcessed { .. } => None,
            Expectation::MessageDownloaded { message }
            | Expectation::MessageDecrypted { message }
            | Expectation::OutboxMessageUploaded { message }
            | Expectation::OutboxMessageDeleted { message }
            | Expectation::ReturnReceiptPosted { message, .. } => Some(message),
            Expectation::AttachmentUploadTakenCareOf { attachment }
            | Expectation::AttachmentDownloadDecisionMade { attachment } => {
                Some(&attachment.message)
            }
        }
    }
}

impl std::fmt::Display for Expectation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Expectation::MessagesToDownloadAreKnown => write!(f, "{}", self.kind()),
            Expectation::ProtocolMessageProcessed { protocol_message } => {
                write!(f, "{}({})", self.kind(), protocol_message)
            }
            Expectation::AttachmentUploadTakenCareOf { attachment }
            | Expectation::AttachmentDownloadDecisionMade { attachment } => {
                write!(f, "{}({})", self.kind(), attachment)
            }
            Expectation::ReturnReceiptPosted {
                owned_identity,
                message,
            } => write!(f, "{}({}, {})", self.kind(), owned_identity, message),
            Expectation::MessageDownloaded { message }
            | Expectation::MessageDecrypted { message }
            | Expectation::OutboxMessageUploaded { message }
            | Expectation::OutboxMessageDeleted { message } => {
                write!(f, "{}({})", self.kind(), message)
            }
        }
    }
}

#[cfg(test)]
#[path = "expectation_tests.rs"]
mod tests;
