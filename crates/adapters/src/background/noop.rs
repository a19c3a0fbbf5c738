// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! No-op background adapter for hosts without background grants.

use super::{BackgroundError, BackgroundHandle, BackgroundResourceAdapter, ExpirationCallback};
use std::sync::atomic::{AtomicU64, Ordering};

/// Background adapter that hands out handles and never expires them.
///
/// Used on hosts where the process is never suspended, and as the fallback
/// when no adapter was configured.
#[derive(Debug, Default)]
pub struct NoOpBackgroundAdapter {
    next: AtomicU64,
}

impl NoOpBackgroundAdapter {
    pub fn new() -> Self {
        Self::default()
    }
}

impl BackgroundResourceAdapter for NoOpBackgroundAdapter {
    fn begin(
        &self,
        _label: &str,
        _on_expire: ExpirationCallback,
    ) -> Result<BackgroundHandle, BackgroundError> {
        Ok(BackgroundHandle(self.next.fetch_add(1, Ordering::SeqCst) + 1))
    }

    fn end(&self, _handle: BackgroundHandle) {}
}
