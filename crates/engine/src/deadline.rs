// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Deadline guard: per-flow timers that force a flow to end

use hf_adapters::{DeadlineTimer, TimerHandle};
use hf_core::FlowId;
use std::sync::Arc;
use std::time::Duration;

/// Arms and disarms flow deadlines on a timer facility
///
/// A guard without a timer cannot enforce deadlines; arming on it is logged
/// as an error and the flow simply runs without one.
#[derive(Clone, Default)]
pub(crate) struct DeadlineGuard {
    timer: Option<Arc<dyn DeadlineTimer>>,
}

impl DeadlineGuard {
    pub fn new(timer: Option<Arc<dyn DeadlineTimer>>) -> Self {
        Self { timer }
    }

    pub fn can_enforce(&self) -> bool {
        self.timer.is_some()
    }

    /// Schedule `on_expiry` to run once `after` has elapsed
    pub fn arm(
        &self,
        flow: &FlowId,
        after: Duration,
        on_expiry: impl FnOnce() + Send + 'static,
    ) -> Option<TimerHandle> {
        let Some(timer) = &self.timer else {
            tracing::error!(%flow, ?after, "no deadline timer configured; deadline not enforced");
            return None;
        };
        let handle = timer.schedule(after, Box::new(on_expiry));
        tracing::debug!(%flow, %handle, deadline_ms = after.as_millis() as u64, "deadline armed");
        Some(handle)
    }

    /// Cancel a deadline so it cannot force-end a flow that already ended
    pub fn disarm(&self, flow: &FlowId, handle: TimerHandle) {
        if let Some(timer) = &self.timer {
            timer.cancel(handle);
            tracing::trace!(%flow, %handle, "deadline disarmed");
        }
    }
}
