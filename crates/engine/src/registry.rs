// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Flow registry: the table of live flows owned by one coordinator
//!
//! The registry is plain data. It is only ever touched while the owning
//! barrier's mutex is held, and it never calls out to adapters or
//! callbacks; flows leaving the registry are handed back to the caller to
//! be finalized outside the lock.

use hf_adapters::{BackgroundHandle, TimerHandle};
use hf_core::{Expectation, FlowId, FlowOutcome};
use std::collections::{BTreeMap, HashSet};
use std::time::Instant;

/// Invoked exactly once when a flow ends
pub type CompletionHandler = Box<dyn FnOnce(FlowId, FlowOutcome) + Send + 'static>;

/// Mutable state of one live flow
pub(crate) struct FlowState {
    pub label: String,
    pub expectations: HashSet<Expectation>,
    pub resource: Option<BackgroundHandle>,
    pub deadline: Option<TimerHandle>,
    pub completion: Option<CompletionHandler>,
    pub started_at: Instant,
    /// Set once an update adds an expectation the flow was not started with
    pub discovered_work: bool,
}

impl FlowState {
    pub fn new(
        label: impl Into<String>,
        expectations: HashSet<Expectation>,
        completion: Option<CompletionHandler>,
        started_at: Instant,
    ) -> Self {
        Self {
            label: label.into(),
            expectations,
            resource: None,
            deadline: None,
            completion,
            started_at,
            discovered_work: false,
        }
    }

    /// `(old - remove) ∪ add`; returns true if the set is now empty
    pub fn apply(&mut self, remove: &[Expectation], add: &[Expectation]) -> bool {
        for expectation in remove {
            self.expectations.remove(expectation);
        }
        for expectation in add {
            if self.expectations.insert(expectation.clone()) {
                self.discovered_work = true;
            }
        }
        self.expectations.is_empty()
    }

    pub fn intersects(&self, expectations: &[Expectation]) -> bool {
        expectations.iter().any(|e| self.expectations.contains(e))
    }

    /// Leftover expectations in a stable order, for diagnostics
    pub fn leftovers(&self) -> Vec<String> {
        let mut leftovers: Vec<&Expectation> = self.expectations.iter().collect();
        leftovers.sort();
        leftovers.into_iter().map(|e| e.to_string()).collect()
    }
}

/// Result of applying an update to one flow
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum UpdateResult {
    UnknownFlow,
    Pending,
    Exhausted,
}

/// FlowId → FlowState, ordered so cross-flow sweeps visit flows consistently
#[derive(Default)]
pub(crate) struct FlowRegistry {
    flows: BTreeMap<FlowId, FlowState>,
}

impl FlowRegistry {
    pub fn insert(&mut self, id: FlowId, state: FlowState) {
        self.flows.insert(id, state);
    }

    pub fn get(&self, id: &FlowId) -> Option<&FlowState> {
        self.flows.get(id)
    }

    pub fn get_mut(&mut self, id: &FlowId) -> Option<&mut FlowState> {
        self.flows.get_mut(id)
    }

    pub fn remove(&mut self, id: &FlowId) -> Option<FlowState> {
        self.flows.remove(id)
    }

    pub fn len(&self) -> usize {
        self.flows.len()
    }

    pub fn contains(&self, id: &FlowId) -> bool {
        self.flows.contains_key(id)
    }

    /// Apply an update to a single flow
    pub fn update(
        &mut self,
        id: &FlowId,
        remove: &[Expectation],
        add: &[Expectation],
    ) -> UpdateResult {
        let Some(state) = self.flows.get_mut(id) else {
            return UpdateResult::UnknownFlow;
        };
        if state.apply(remove, add) {
            UpdateResult::Exhausted
        } else {
            UpdateResult::Pending
        }
    }

    /// Remove `remove` from every flow waiting on any of it
    ///
    /// Returns the ids of affected flows, and separately those whose
    /// expectation set became empty.
    pub fn update_all(&mut self, remove: &[Expectation]) -> (Vec<FlowId>, Vec<FlowId>) {
        let mut affected = Vec::new();
        let mut exhausted = Vec::new();
        for (id, state) in self.flows.iter_mut() {
            if !state.intersects(remove) {
                continue;
            }
            affected.push(id.clone());
            if state.apply(remove, &[]) {
                exhausted.push(id.clone());
            }
        }
        (affected, exhausted)
    }

    /// Take every flow out of the registry
    pub fn drain(&mut self) -> Vec<(FlowId, FlowState)> {
        std::mem::take(&mut self.flows).into_iter().collect()
    }
}

#[cfg(test)]
#[path = "registry_tests.rs"]
mod tests;
