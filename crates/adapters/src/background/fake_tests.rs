// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use std::sync::atomic::{AtomicUsize, Ordering};

#[test]
fn fake_background_records_calls() {
    let adapter = FakeBackgroundAdapter::new();

    let handle = adapter.begin("post-message", Box::new(|| {})).unwrap();
    adapter.end(handle);

    assert_eq!(
        adapter.calls(),
        vec![
            BackgroundCall::Begin {
                handle,
                label: "post-message".to_string()
            },
            BackgroundCall::End { handle },
        ]
    );
    assert!(adapter.active().is_empty());
    assert_eq!(adapter.end_count(handle), 1);
}

#[test]
fn revoke_fires_expiration_once() {
    let adapter = FakeBackgroundAdapter::new();
    let expired = Arc::new(AtomicUsize::new(0));
    let hits = Arc::clone(&expired);

    let handle = adapter
        .begin(
            "wake",
            Box::new(move || {
                hits.fetch_add(1, Ordering::SeqCst);
            }),
        )
        .unwrap();

    assert!(adapter.revoke(handle));
    assert!(!adapter.revoke(handle));
    assert_eq!(expired.load(Ordering::SeqCst), 1);
}

#[test]
fn ended_handles_cannot_be_revoked() {
    let adapter = FakeBackgroundAdapter::new();
    let handle = adapter.begin("wake", Box::new(|| {})).unwrap();
    adapter.end(handle);
    assert!(!adapter.revoke(handle));
}

#[test]
fn refuse_next_fails_one_begin() {
    let adapter = FakeBackgroundAdapter::new();
    adapter.refuse_next("host busy");

    assert_eq!(
        adapter.begin("a", Box::new(|| {})),
        Err(BackgroundError::Unavailable("host busy".to_string()))
    );
    assert!(adapter.begin("b", Box::new(|| {})).is_ok());
}
