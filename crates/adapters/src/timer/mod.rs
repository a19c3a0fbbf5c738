// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! One-shot deadline timers

mod runtime;

pub use runtime::TokioDeadlineTimer;

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::{FakeDeadlineTimer, TimerCall};

use std::time::Duration;
use thiserror::Error;

/// Errors from constructing a timer facility
#[derive(Debug, Error)]
pub enum TimerError {
    #[error("no tokio runtime available: {0}")]
    NoRuntime(String),
}

/// Work to run once when a timer fires
pub type TimerCallback = Box<dyn FnOnce() + Send + 'static>;

/// Identifies one scheduled timer within the facility that issued it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerHandle(pub u64);

impl std::fmt::Display for TimerHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "timer-{}", self.0)
    }
}

/// Monotonic one-shot timer facility
///
/// A callback fires at most once. Cancelling prevents the callback unless it
/// has already begun firing; cancelling an unknown or already fired handle is
/// a no-op.
pub trait DeadlineTimer: Send + Sync + 'static {
    fn schedule(&self, after: Duration, callback: TimerCallback) -> TimerHandle;

    fn cancel(&self, handle: TimerHandle);
}
