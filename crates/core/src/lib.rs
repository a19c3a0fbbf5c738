// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! hf-core: Core types for the Holdfast background flow coordinator
//!
//! This crate provides:
//! - Expectations, the hashable tags a flow waits on
//! - Flow identifiers and their generators
//! - Terminal flow outcomes
//! - Clock abstraction and coordinator configuration

pub mod clock;
pub mod config;
pub mod expectation;
pub mod id;
pub mod outcome;

pub use clock::{Clock, FakeClock, SystemClock};
pub use config::{ConfigError, CoordinatorConfig};
pub use expectation::{AttachmentId, Expectation, MessageId, OwnedIdentityId, ProtocolMessageId};
pub use id::{FlowId, IdGen, SequentialIdGen, UuidIdGen};
pub use outcome::{FailureCause, FlowOutcome};
