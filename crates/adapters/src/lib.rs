// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]
// Enable coverage(off) attribute for excluding test infrastructure
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Adapters for the host facilities a flow coordinator consumes:
//! background execution grants and one-shot deadline timers.

pub mod background;
pub mod timer;
pub mod traced;

pub use background::{
    BackgroundError, BackgroundHandle, BackgroundResourceAdapter, BudgetedBackgroundAdapter,
    ExpirationCallback, NoOpBackgroundAdapter,
};
pub use timer::{DeadlineTimer, TimerCallback, TimerError, TimerHandle, TokioDeadlineTimer};
pub use traced::TracedBackgroundAdapter;

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
pub use background::{BackgroundCall, FakeBackgroundAdapter};
#[cfg(any(test, feature = "test-support"))]
pub use timer::{FakeDeadlineTimer, TimerCall};
