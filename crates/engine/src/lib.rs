// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! Holdfast flow coordination engine
//!
//! Keeps background execution grants alive for exactly as long as the flows
//! that need them have outstanding expectations.

mod background;
mod barrier;
mod builder;
mod deadline;
mod error;
mod events;
mod registry;
mod remote;

pub use background::BackgroundTaskCoordinator;
pub use barrier::{ExhaustionOutcome, ExpectationBarrier};
pub use builder::CoordinatorBuilder;
pub use error::CoordinatorError;
pub use events::{ExpectationUpdate, FlowEvent, UpdateScope};
pub use registry::CompletionHandler;
pub use remote::RemoteNotificationCoordinator;
