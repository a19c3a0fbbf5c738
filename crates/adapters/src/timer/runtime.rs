// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Deadline timers backed by the tokio runtime

use super::{DeadlineTimer, TimerCallback, TimerError, TimerHandle};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::task::AbortHandle;

/// Timer facility that sleeps on a tokio runtime
///
/// Each scheduled timer is a spawned task. A timer is armed while its entry
/// is present in `armed`; whichever of firing or cancelling removes the entry
/// first wins.
#[derive(Clone)]
pub struct TokioDeadlineTimer {
    runtime: Handle,
    next: Arc<AtomicU64>,
    armed: Arc<Mutex<HashMap<TimerHandle, AbortHandle>>>,
}

impl TokioDeadlineTimer {
    pub fn new(runtime: Handle) -> Self {
        Self {
            runtime,
            next: Arc::new(AtomicU64::new(1)),
            armed: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Use the runtime of the calling context
    pub fn try_current() -> Result<Self, TimerError> {
        Handle::try_current()
            .map(Self::new)
            .map_err(|e| TimerError::NoRuntime(e.to_string()))
    }

    /// Number of timers that have neither fired nor been cancelled
    pub fn armed_count(&self) -> usize {
        self.armed.lock().unwrap_or_else(|e| e.into_inner()).len()
    }
}

impl DeadlineTimer for TokioDeadlineTimer {
    fn schedule(&self, after: Duration, callback: TimerCallback) -> TimerHandle {
        let handle = TimerHandle(self.next.fetch_add(1, Ordering::SeqCst));
        let armed = Arc::clone(&self.armed);

        // Hold the lock across spawn so the task cannot look up its entry
        // before it has been inserted.
        let mut guard = self.armed.lock().unwrap_or_else(|e| e.into_inner());
        let task = self.runtime.spawn(async move {
            tokio::time::sleep(after).await;
            let still_armed = armed
                .lock()
                .unwrap_or_else(|e| e.into_inner())
                .remove(&handle)
                .is_some();
            if still_armed {
                tracing::trace!(%handle, "deadline timer fired");
                callback();
            }
        });
        guard.insert(handle, task.abort_handle());
        drop(guard);

        handle
    }

    fn cancel(&self, handle: TimerHandle) {
        let removed = self
            .armed
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .remove(&handle);
        if let Some(task) = removed {
            task.abort();
            tracing::trace!(%handle, "deadline timer cancelled");
        }
    }
}

#[cfg(test)]
#[path = "runtime_tests.rs"]
mod tests;
