// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Expectation barrier
//!
//! Holds each flow open, together with its background grant, until every
//! expectation of the flow has been satisfied. Any caller on any thread may
//! report progress; the registry mutex is the single serialization point.
//!
//! Adapter calls and completion handlers always run after the mutex has been
//! released, so a completion handler may start or update other flows.

use crate::deadline::DeadlineGuard;
use crate::events::{FlowEvent, UpdateScope};
use crate::registry::{CompletionHandler, FlowRegistry, FlowState, UpdateResult};
use hf_adapters::{BackgroundResourceAdapter, DeadlineTimer};
use hf_core::{Clock, Expectation, FailureCause, FlowId, FlowOutcome, IdGen, SystemClock};
use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard, Weak};
use std::time::Duration;

/// How a flow whose expectations are all satisfied is reported
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExhaustionOutcome {
    /// Always [`FlowOutcome::Success`]
    Success,
    /// [`FlowOutcome::Success`] if work beyond the initial expectations was
    /// discovered, [`FlowOutcome::NoNewData`] otherwise
    SuccessIfWorkDiscovered,
}

struct Shared<C: Clock> {
    name: &'static str,
    registry: Mutex<FlowRegistry>,
    background: Arc<dyn BackgroundResourceAdapter>,
    deadlines: DeadlineGuard,
    id_gen: Arc<dyn IdGen>,
    clock: C,
    exhaustion: ExhaustionOutcome,
}

impl<C: Clock> Shared<C> {
    fn registry(&self) -> MutexGuard<'_, FlowRegistry> {
        self.registry.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn exhausted_outcome(&self, state: &FlowState) -> FlowOutcome {
        match self.exhaustion {
            ExhaustionOutcome::Success => FlowOutcome::Success,
            ExhaustionOutcome::SuccessIfWorkDiscovered if state.discovered_work => {
                FlowOutcome::Success
            }
            ExhaustionOutcome::SuccessIfWorkDiscovered => FlowOutcome::NoNewData,
        }
    }

    /// Release everything a flow owns and report its outcome
    ///
    /// Must be called without the registry lock held.
    fn finish(&self, id: FlowId, mut state: FlowState, outcome: FlowOutcome) {
        if !state.expectations.is_empty() {
            tracing::warn!(
                coordinator = self.name,
                flow = %id,
                %outcome,
                leftovers = ?state.leftovers(),
                "flow ended with pending expectations"
            );
        }
        if let Some(handle) = state.deadline.take() {
            self.deadlines.disarm(&id, handle);
        }
        if let Some(handle) = state.resource.take() {
            self.background.end(handle);
        }
        tracing::info!(
            coordinator = self.name,
            flow = %id,
            label = %state.label,
            %outcome,
            elapsed_ms = self.clock.elapsed_since(state.started_at).as_millis() as u64,
            "flow ended"
        );
        if let Some(completion) = state.completion.take() {
            completion(id, outcome);
        }
    }

    fn end_flow(&self, id: &FlowId, outcome: FlowOutcome) {
        let state = self.registry().remove(id);
        match state {
            Some(state) => self.finish(id.clone(), state, outcome),
            None => tracing::debug!(
                coordinator = self.name,
                flow = %id,
                %outcome,
                "end of unknown flow ignored"
            ),
        }
    }

    /// End `id` if its expectation set is empty
    fn end_if_exhausted(&self, id: &FlowId) {
        let ended = {
            let mut registry = self.registry();
            match registry.get(id) {
                Some(state) if state.expectations.is_empty() => {
                    let outcome = self.exhausted_outcome(state);
                    registry.remove(id).map(|state| (state, outcome))
                }
                _ => None,
            }
        };
        if let Some((state, outcome)) = ended {
            self.finish(id.clone(), state, outcome);
        }
    }
}

impl<C: Clock> Drop for Shared<C> {
    fn drop(&mut self) {
        let flows = self.registry().drain();
        for (id, state) in flows {
            tracing::warn!(coordinator = self.name, flow = %id, "coordinator dropped with live flow");
            self.finish(id, state, FlowOutcome::Failed(FailureCause::Abandoned));
        }
    }
}

/// Thread-safe barrier over a registry of flows
///
/// Cloning yields another handle to the same registry. Live flows are
/// abandoned when the last handle is dropped; a completion handler that
/// captures a handle keeps the barrier alive until its flow ends.
pub struct ExpectationBarrier<C: Clock = SystemClock> {
    shared: Arc<Shared<C>>,
}

impl<C: Clock> Clone for ExpectationBarrier<C> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl<C: Clock> ExpectationBarrier<C> {
    pub fn new(
        name: &'static str,
        background: Arc<dyn BackgroundResourceAdapter>,
        timer: Option<Arc<dyn DeadlineTimer>>,
        id_gen: Arc<dyn IdGen>,
        clock: C,
        exhaustion: ExhaustionOutcome,
    ) -> Self {
        Self {
            shared: Arc::new(Shared {
                name,
                registry: Mutex::new(FlowRegistry::default()),
                background,
                deadlines: DeadlineGuard::new(timer),
                id_gen,
                clock,
                exhaustion,
            }),
        }
    }

    pub fn name(&self) -> &'static str {
        self.shared.name
    }

    /// Whether deadlines passed to [`start_flow`](Self::start_flow) are enforced
    pub fn enforces_deadlines(&self) -> bool {
        self.shared.deadlines.can_enforce()
    }

    /// Start a flow and begin holding a background grant for it
    ///
    /// Returns without waiting for any expectation. A flow started with no
    /// expectations has already ended, and its completion has already run,
    /// by the time this returns.
    pub fn start_flow(
        &self,
        label: &str,
        initial: impl IntoIterator<Item = Expectation>,
        completion: Option<CompletionHandler>,
        deadline: Option<Duration>,
    ) -> FlowId {
        let shared = &self.shared;
        let id = shared.id_gen.next_flow_id();
        let span = tracing::info_span!("flow.start", coordinator = shared.name, flow = %id, label);
        let _guard = span.enter();

        let expectations: HashSet<Expectation> = initial.into_iter().collect();
        tracing::info!(expectations = expectations.len(), ?deadline, "flow started");

        // Register first so that an expiry fired while the grant is being
        // obtained finds the flow.
        shared.registry().insert(
            id.clone(),
            FlowState::new(label, expectations, completion, shared.clock.now()),
        );

        let resource = {
            let weak = Arc::downgrade(shared);
            let flow = id.clone();
            shared.background.begin(
                label,
                Box::new(move || {
                    end_through(&weak, &flow, FlowOutcome::Failed(FailureCause::ResourceRevoked))
                }),
            )
        };
        let resource = match resource {
            Ok(handle) => Some(handle),
            Err(e) => {
                tracing::warn!(error = %e, "running flow without a background grant");
                None
            }
        };

        let timer = deadline.and_then(|after| {
            let weak = Arc::downgrade(shared);
            let flow = id.clone();
            shared.deadlines.arm(&id, after, move || {
                end_through(&weak, &flow, FlowOutcome::Failed(FailureCause::DeadlineExpired))
            })
        });

        let attached = {
            let mut registry = shared.registry();
            match registry.get_mut(&id) {
                Some(state) => {
                    state.resource = resource;
                    state.deadline = timer;
                    true
                }
                None => false,
            }
        };
        if !attached {
            // Ended (revoked or timed out) before the handles were attached
            if let Some(handle) = timer {
                shared.deadlines.disarm(&id, handle);
            }
            if let Some(handle) = resource {
                shared.background.end(handle);
            }
        }

        shared.end_if_exhausted(&id);
        id
    }

    /// Replace a flow's expectations with `(old - remove) ∪ add`
    ///
    /// Ends the flow if nothing is left. Unknown flows are ignored: callers
    /// may race with the end of the flow they report to.
    pub fn update_expectations(&self, id: &FlowId, remove: &[Expectation], add: &[Expectation]) {
        let shared = &self.shared;
        let span = tracing::debug_span!("flow.update", coordinator = shared.name, flow = %id);
        let _guard = span.enter();

        let ended = {
            let mut registry = shared.registry();
            match registry.update(id, remove, add) {
                UpdateResult::UnknownFlow => {
                    tracing::debug!(
                        removed = remove.len(),
                        added = add.len(),
                        "update for unknown flow ignored"
                    );
                    None
                }
                UpdateResult::Pending => {
                    tracing::debug!(
                        removed = remove.len(),
                        added = add.len(),
                        "expectations updated"
                    );
                    None
                }
                UpdateResult::Exhausted => registry.remove(id).map(|state| {
                    let outcome = shared.exhausted_outcome(&state);
                    (state, outcome)
                }),
            }
        };

        if let Some((state, outcome)) = ended {
            shared.finish(id.clone(), state, outcome);
        }
    }

    /// Remove `remove` from every live flow that waits on any of it
    ///
    /// Each affected flow whose set becomes empty ends on its own.
    pub fn update_all_expectations(&self, remove: &[Expectation]) {
        let shared = &self.shared;
        let span = tracing::debug_span!("flow.update_all", coordinator = shared.name);
        let _guard = span.enter();

        let ended: Vec<(FlowId, FlowState, FlowOutcome)> = {
            let mut registry = shared.registry();
            let (affected, exhausted) = registry.update_all(remove);
            tracing::debug!(
                affected = affected.len(),
                exhausted = exhausted.len(),
                "cross-flow update applied"
            );
            exhausted
                .into_iter()
                .filter_map(|id| {
                    registry.remove(&id).map(|state| {
                        let outcome = shared.exhausted_outcome(&state);
                        (id, state, outcome)
                    })
                })
                .collect()
        };

        for (id, state, outcome) in ended {
            shared.finish(id, state, outcome);
        }
    }

    /// Translate a subsystem event into an update
    ///
    /// Events bound to a flow update that flow. Events that concern every
    /// flow, and flow events without a flow that only clear expectations,
    /// clear them everywhere. A flow event without a flow that discovers new
    /// work is ignored: its removals would end flows that still have that
    /// work to wait for.
    pub fn apply_event(&self, flow: Option<&FlowId>, event: &FlowEvent) {
        let update = event.to_update();
        match (update.scope, flow) {
            (UpdateScope::Flow, Some(id)) => {
                self.update_expectations(id, &update.remove, &update.add)
            }
            (UpdateScope::Flow, None) if !update.add.is_empty() => {
                tracing::warn!(
                    coordinator = self.shared.name,
                    event = event.name(),
                    discovered = update.add.len(),
                    "event discovering work has no flow; ignored"
                );
            }
            (UpdateScope::Flow, None) | (UpdateScope::AllFlows, _) => {
                self.update_all_expectations(&update.remove)
            }
        }
    }

    /// End a flow now with `outcome`; ending an unknown flow is a no-op
    pub fn end_flow(&self, id: &FlowId, outcome: FlowOutcome) {
        self.shared.end_flow(id, outcome);
    }

    pub fn is_active(&self, id: &FlowId) -> bool {
        self.shared.registry().contains(id)
    }

    pub fn active_flow_count(&self) -> usize {
        self.shared.registry().len()
    }

    /// Current expectations of a live flow, sorted
    pub fn expectations_of(&self, id: &FlowId) -> Option<Vec<Expectation>> {
        self.shared.registry().get(id).map(|state| {
            let mut expectations: Vec<Expectation> = state.expectations.iter().cloned().collect();
            expectations.sort();
            expectations
        })
    }
}

/// End a flow from a timer or expiry callback, if the barrier still exists
fn end_through<C: Clock>(shared: &Weak<Shared<C>>, id: &FlowId, outcome: FlowOutcome) {
    if let Some(shared) = shared.upgrade() {
        shared.end_flow(id, outcome);
    }
}

#[cfg(test)]
#[path = "barrier_tests.rs"]
mod tests;
