// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use std::collections::HashSet;
use yare::parameterized;

fn upload(message: &str, number: u32) -> Expectation {
    Expectation::AttachmentUploadTakenCareOf {
        attachment: AttachmentId::new(message, number),
    }
}

#[test]
fn equality_is_structural() {
    assert_eq!(upload("m1", 0), upload("m1", 0));
    assert_ne!(upload("m1", 0), upload("m1", 1));
    assert_ne!(upload("m1", 0), upload("m2", 0));
}

#[test]
fn same_identifiers_with_different_kinds_differ() {
    let uploaded = Expectation::OutboxMessageUploaded {
        message: MessageId::from("m1"),
    };
    let deleted = Expectation::OutboxMessageDeleted {
        message: MessageId::from("m1"),
    };
    assert_ne!(uploaded, deleted);
}

#[test]
fn inserting_twice_into_a_set_keeps_one() {
    let mut set = HashSet::new();
    assert!(set.insert(upload("m1", 0)));
    assert!(!set.insert(upload("m1", 0)));
    assert_eq!(set.len(), 1);
}

#[parameterized(
    discovery = { Expectation::MessagesToDownloadAreKnown, "messages_to_download_are_known" },
    protocol = {
        Expectation::ProtocolMessageProcessed { protocol_message: ProtocolMessageId::from("p7") },
        "protocol_message_processed(p7)"
    },
    attachment = { upload("m1", 2), "attachment_upload_taken_care_of(m1#2)" },
    receipt = {
        Expectation::ReturnReceiptPosted {
            owned_identity: OwnedIdentityId::from("alice"),
            message: MessageId::from("m9"),
        },
        "return_receipt_posted(alice, m9)"
    },
)]
fn display_names_kind_and_identifiers(expectation: Expectation, expected: &str) {
    assert_eq!(expectation.to_string(), expected);
}

#[test]
fn message_correlation() {
    assert_eq!(upload("m1", 0).message(), Some(&MessageId::from("m1")));
    assert_eq!(Expectation::MessagesToDownloadAreKnown.message(), None);
}
