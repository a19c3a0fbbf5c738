// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake background adapter for testing
#![cfg_attr(coverage_nightly, coverage(off))]

use super::{BackgroundError, BackgroundHandle, BackgroundResourceAdapter, ExpirationCallback};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Recorded background call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackgroundCall {
    Begin {
        handle: BackgroundHandle,
        label: String,
    },
    End {
        handle: BackgroundHandle,
    },
}

#[derive(Default)]
struct FakeBackgroundState {
    next: u64,
    active: HashMap<BackgroundHandle, ExpirationCallback>,
    calls: Vec<BackgroundCall>,
    refuse_next: Option<String>,
}

/// Fake background adapter for testing
///
/// Grants never lapse on their own; tests revoke them with
/// [`FakeBackgroundAdapter::revoke`].
#[derive(Clone, Default)]
pub struct FakeBackgroundAdapter {
    state: Arc<Mutex<FakeBackgroundState>>,
}

impl FakeBackgroundAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get all recorded calls
    pub fn calls(&self) -> Vec<BackgroundCall> {
        self.state
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .calls
            .clone()
    }

    /// Handles begun and not yet ended or revoked
    pub fn active(&self) -> Vec<BackgroundHandle> {
        let state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        let mut handles: Vec<_> = state.active.keys().copied().collect();
        handles.sort();
        handles
    }

    /// Handles issued so far, in order
    pub fn begun(&self) -> Vec<BackgroundHandle> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                BackgroundCall::Begin { handle, .. } => Some(handle),
                BackgroundCall::End { .. } => None,
            })
            .collect()
    }

    /// How many times `end` was called for `handle`
    pub fn end_count(&self, handle: BackgroundHandle) -> usize {
        self.calls()
            .iter()
            .filter(|c| matches!(c, BackgroundCall::End { handle: h } if *h == handle))
            .count()
    }

    /// Make the next `begin` fail
    pub fn refuse_next(&self, reason: impl Into<String>) {
        self.state
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .refuse_next = Some(reason.into());
    }

    /// Simulate the host revoking a grant; returns false if it was not active
    pub fn revoke(&self, handle: BackgroundHandle) -> bool {
        let on_expire = self
            .state
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .active
            .remove(&handle);
        match on_expire {
            Some(on_expire) => {
                on_expire();
                true
            }
            None => false,
        }
    }
}

impl BackgroundResourceAdapter for FakeBackgroundAdapter {
    fn begin(
        &self,
        label: &str,
        on_expire: ExpirationCallback,
    ) -> Result<BackgroundHandle, BackgroundError> {
        let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(reason) = state.refuse_next.take() {
            return Err(BackgroundError::Unavailable(reason));
        }
        state.next += 1;
        let handle = BackgroundHandle(state.next);
        state.active.insert(handle, on_expire);
        state.calls.push(BackgroundCall::Begin {
            handle,
            label: label.to_string(),
        });
        Ok(handle)
    }

    fn end(&self, handle: BackgroundHandle) {
        let removed = {
            let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());
            state.calls.push(BackgroundCall::End { handle });
            state.active.remove(&handle)
        };
        drop(removed);
    }
}

#[cfg(test)]
#[path = "fake_tests.rs"]
mod tests;
