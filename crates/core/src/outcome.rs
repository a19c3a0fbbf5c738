// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Terminal dispositions of a flow

use serde::{Deserialize, Serialize};

/// Why a flow was forced to end before its expectations were exhausted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureCause {
    /// The flow's own deadline timer fired
    DeadlineExpired,
    /// The host revoked the background execution grant
    ResourceRevoked,
    /// A caller ended the flow explicitly while work was still pending
    Abandoned,
}

/// Outcome delivered to a flow's completion callback, exactly once
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlowOutcome {
    /// Every expectation was satisfied and new work was handled
    Success,
    /// Every expectation was satisfied but there was nothing to do
    NoNewData,
    /// The flow was forced to end
    Failed(FailureCause),
}

impl FlowOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, FlowOutcome::Success | FlowOutcome::NoNewData)
    }

    pub fn failure_cause(&self) -> Option<FailureCause> {
        match self {
            FlowOutcome::Failed(cause) => Some(*cause),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            FlowOutcome::Success => "success",
            FlowOutcome::NoNewData => "no_new_data",
            FlowOutcome::Failed(FailureCause::DeadlineExpired) => "failed:deadline_expired",
            FlowOutcome::Failed(FailureCause::ResourceRevoked) => "failed:resource_revoked",
            FlowOutcome::Failed(FailureCause::Abandoned) => "failed:abandoned",
        }
    }
}

impl std::fmt::Display for FlowOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
