// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Flow identifiers and their generators

use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Opaque token naming one flow for its whole lifetime
///
/// Identifiers are never reused. Once a flow ends its identifier is simply
/// unknown to the coordinator that issued it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct FlowId(pub String);

impl std::fmt::Display for FlowId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for FlowId {
    fn from(s: String) -> Self {
        FlowId(s)
    }
}

impl From<&str> for FlowId {
    fn from(s: &str) -> Self {
        FlowId(s.to_string())
    }
}

/// Generates process-unique flow identifiers
///
/// A single generator may be shared by several coordinators.
pub trait IdGen: Send + Sync {
    fn next_flow_id(&self) -> FlowId;
}

impl<G: IdGen + ?Sized> IdGen for Arc<G> {
    fn next_flow_id(&self) -> FlowId {
        (**self).next_flow_id()
    }
}

/// UUID-based generator for production use
#[derive(Clone, Copy, Debug, Default)]
pub struct UuidIdGen;

impl IdGen for UuidIdGen {
    fn next_flow_id(&self) -> FlowId {
        FlowId(uuid::Uuid::new_v4().to_string())
    }
}

/// Sequential generator for tests
#[derive(Clone, Debug)]
pub struct SequentialIdGen {
    prefix: String,
    counter: Arc<AtomicU64>,
}

impl SequentialIdGen {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            counter: Arc::new(AtomicU64::new(1)),
        }
    }
}

impl Default for SequentialIdGen {
    fn default() -> Self {
        Self::new("flow")
    }
}

impl IdGen for SequentialIdGen {
    fn next_flow_id(&self) -> FlowId {
        let n = self.counter.fetch_add(1, Ordering::SeqCst);
        FlowId(format!("{}-{}", self.prefix, n))
    }
}

#[cfg(test)]
#[path = "id_tests.rs"]
mod tests;
