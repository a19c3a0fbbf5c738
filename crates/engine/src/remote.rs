// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Coordinator for wake-ups triggered by remote notifications
//!
//! The host gives the process a short execution budget per wake-up and must
//! be told how the wake-up went before the budget runs out. Every flow here
//! therefore carries a deadline and a mandatory completion handler.

use crate::barrier::ExpectationBarrier;
use crate::events::FlowEvent;
use crate::registry::CompletionHandler;
use hf_core::{Clock, Expectation, FlowId, FlowOutcome, SystemClock};
use std::time::Duration;

pub struct RemoteNotificationCoordinator<C: Clock = SystemClock> {
    barrier: ExpectationBarrier<C>,
    deadline: Duration,
}

impl<C: Clock> Clone for RemoteNotificationCoordinator<C> {
    fn clone(&self) -> Self {
        Self {
            barrier: self.barrier.clone(),
            deadline: self.deadline,
        }
    }
}

impl<C: Clock> RemoteNotificationCoordinator<C> {
    pub(crate) fn new(barrier: ExpectationBarrier<C>, deadline: Duration) -> Self {
        Self { barrier, deadline }
    }

    pub fn deadline(&self) -> Duration {
        self.deadline
    }

    /// Start handling a wake-up
    ///
    /// The flow waits on [`Expectation::MessagesToDownloadAreKnown`] until
    /// the download list arrives; `completion` receives
    /// [`FlowOutcome::Success`], [`FlowOutcome::NoNewData`] or
    /// [`FlowOutcome::Failed`] before the deadline lapses.
    pub fn start_wake(
        &self,
        completion: impl FnOnce(FlowId, FlowOutcome) + Send + 'static,
    ) -> FlowId {
        let completion: CompletionHandler = Box::new(completion);
        self.barrier.start_flow(
            "remote-notification",
            [Expectation::MessagesToDownloadAreKnown],
            Some(completion),
            Some(self.deadline),
        )
    }

    pub fn update_expectations(&self, id: &FlowId, remove: &[Expectation], add: &[Expectation]) {
        self.barrier.update_expectations(id, remove, add);
    }

    pub fn update_all_expectations(&self, remove: &[Expectation]) {
        self.barrier.update_all_expectations(remove);
    }

    pub fn apply_event(&self, flow: Option<&FlowId>, event: &FlowEvent) {
        self.barrier.apply_event(flow, event);
    }

    pub fn end_flow(&self, id: &FlowId, outcome: FlowOutcome) {
        self.barrier.end_flow(id, outcome);
    }

    pub fn is_active(&self, id: &FlowId) -> bool {
        self.barrier.is_active(id)
    }

    pub fn active_flow_count(&self) -> usize {
        self.barrier.active_flow_count()
    }

    pub fn expectations_of(&self, id: &FlowId) -> Option<Vec<Expectation>> {
        self.barrier.expectations_of(id)
    }
}

#[cfg(test)]
#[path = "remote_tests.rs"]
mod tests;
