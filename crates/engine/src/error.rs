// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for coordinator construction

use hf_core::ConfigError;
use thiserror::Error;

/// Errors that can occur while assembling a coordinator
///
/// Once built, coordinators never return errors: anomalies are logged and
/// forced endings are reported through the flow outcome.
#[derive(Debug, Error)]
pub enum CoordinatorError {
    #[error("missing collaborator: {0}")]
    MissingCollaborator(&'static str),
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
}
