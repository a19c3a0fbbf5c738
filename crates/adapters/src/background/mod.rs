// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Background execution grants
//!
//! The host lets the process keep running after the triggering event only
//! while it holds a grant. A grant is begun with an expiration callback the
//! host may invoke if it revokes the grant early, and must be ended exactly
//! once by its holder.

mod budgeted;
mod noop;

pub use budgeted::BudgetedBackgroundAdapter;
pub use noop::NoOpBackgroundAdapter;

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::{BackgroundCall, FakeBackgroundAdapter};

use thiserror::Error;

/// Errors from beginning a background grant
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BackgroundError {
    #[error("background execution unavailable: {0}")]
    Unavailable(String),
}

/// Invoked at most once if the host revokes a grant before it is ended
pub type ExpirationCallback = Box<dyn FnOnce() + Send + 'static>;

/// Identifies one grant within the adapter that issued it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BackgroundHandle(pub u64);

impl std::fmt::Display for BackgroundHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "bg-{}", self.0)
    }
}

/// Adapter over the host's "keep running in background" primitive
///
/// `end` may be called from any thread. Once `end` has been called for a
/// handle, its expiration callback will not be invoked.
pub trait BackgroundResourceAdapter: Send + Sync + 'static {
    fn begin(
        &self,
        label: &str,
        on_expire: ExpirationCallback,
    ) -> Result<BackgroundHandle, BackgroundError>;

    fn end(&self, handle: BackgroundHandle);
}
