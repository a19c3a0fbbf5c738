// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Traced adapter wrappers for consistent observability

use crate::background::{
    BackgroundError, BackgroundHandle, BackgroundResourceAdapter, ExpirationCallback,
};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Instant;

/// Wrapper that adds tracing to any BackgroundResourceAdapter
///
/// Logs how long each grant was held and whether it ended normally or was
/// revoked by the host.
pub struct TracedBackgroundAdapter<A> {
    inner: A,
    held_since: Arc<Mutex<HashMap<BackgroundHandle, Instant>>>,
}

impl<A> TracedBackgroundAdapter<A> {
    pub fn new(inner: A) -> Self {
        Self {
            inner,
            held_since: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    pub fn inner(&self) -> &A {
        &self.inner
    }
}

impl<A: BackgroundResourceAdapter> BackgroundResourceAdapter for TracedBackgroundAdapter<A> {
    fn begin(
        &self,
        label: &str,
        on_expire: ExpirationCallback,
    ) -> Result<BackgroundHandle, BackgroundError> {
        let span = tracing::info_span!("background.begin", label);
        let _guard = span.enter();

        let expired_label = label.to_string();
        let on_expire: ExpirationCallback = Box::new(move || {
            tracing::warn!(label = %expired_label, "background grant revoked by host");
            on_expire();
        });

        let result = self.inner.begin(label, on_expire);
        match &result {
            Ok(handle) => {
                self.held_since
                    .lock()
                    .unwrap_or_else(|e| e.into_inner())
                    .insert(*handle, Instant::now());
                tracing::debug!(%handle, "grant acquired");
            }
            Err(e) => tracing::error!(error = %e, "grant refused"),
        }
        result
    }

    fn end(&self, handle: BackgroundHandle) {
        let span = tracing::info_span!("background.end", %handle);
        let _guard = span.enter();

        let since = self
            .held_since
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .remove(&handle);
        self.inner.end(handle);

        match since {
            Some(since) => tracing::debug!(
                held_ms = since.elapsed().as_millis() as u64,
                "grant released"
            ),
            None => tracing::warn!("released a grant this adapter did not issue"),
        }
    }
}

#[cfg(test)]
#[path = "traced_tests.rs"]
mod tests;
