// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake deadline timer for testing
#![cfg_attr(coverage_nightly, coverage(off))]

use super::{DeadlineTimer, TimerCallback, TimerHandle};
use hf_core::{Clock, FakeClock};
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

/// Recorded timer call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimerCall {
    Schedule { handle: TimerHandle, after: Duration },
    Cancel { handle: TimerHandle },
}

struct PendingTimer {
    fire_at: Instant,
    callback: TimerCallback,
}

#[derive(Default)]
struct FakeTimerState {
    next: u64,
    pending: BTreeMap<TimerHandle, PendingTimer>,
    calls: Vec<TimerCall>,
}

/// Timer facility driven by a [`FakeClock`]
///
/// Nothing fires on its own: tests call [`FakeDeadlineTimer::advance`] (or
/// advance the clock and call [`FakeDeadlineTimer::fire_due`]).
#[derive(Clone)]
pub struct FakeDeadlineTimer {
    clock: FakeClock,
    state: Arc<Mutex<FakeTimerState>>,
}

impl FakeDeadlineTimer {
    pub fn new(clock: FakeClock) -> Self {
        Self {
            clock,
            state: Arc::new(Mutex::new(FakeTimerState::default())),
        }
    }

    pub fn clock(&self) -> &FakeClock {
        &self.clock
    }

    /// Advance the clock and fire every timer that became due
    pub fn advance(&self, duration: Duration) -> usize {
        self.clock.advance(duration);
        self.fire_due()
    }

    /// Fire every timer due at the current clock time, earliest first
    ///
    /// Callbacks run without the internal lock held, so they may schedule or
    /// cancel other timers.
    pub fn fire_due(&self) -> usize {
        let now = self.clock.now();
        let mut due: Vec<(Instant, TimerHandle, TimerCallback)> = {
            let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());
            let handles: Vec<TimerHandle> = state
                .pending
                .iter()
                .filter(|(_, t)| t.fire_at <= now)
                .map(|(h, _)| *h)
                .collect();
            handles
                .into_iter()
                .filter_map(|h| state.pending.remove(&h).map(|t| (t.fire_at, h, t.callback)))
                .collect()
        };
        due.sort_by_key(|(fire_at, handle, _)| (*fire_at, *handle));

        let fired = due.len();
        for (_, _, callback) in due {
            callback();
        }
        fired
    }

    /// Number of timers still waiting to fire
    pub fn pending_count(&self) -> usize {
        self.state
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .pending
            .len()
    }

    /// Get all recorded calls
    pub fn calls(&self) -> Vec<TimerCall> {
        self.state
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .calls
            .clone()
    }
}

impl DeadlineTimer for FakeDeadlineTimer {
    fn schedule(&self, after: Duration, callback: TimerCallback) -> TimerHandle {
        let fire_at = self.clock.now() + after;
        let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        state.next += 1;
        let handle = TimerHandle(state.next);
        state.pending.insert(handle, PendingTimer { fire_at, callback });
        state.calls.push(TimerCall::Schedule { handle, after });
        handle
    }

    fn cancel(&self, handle: TimerHandle) {
        let removed = {
            let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());
            state.calls.push(TimerCall::Cancel { handle });
            state.pending.remove(&handle)
        };
        // Dropped outside the lock: the callback may own things whose Drop
        // touches this timer.
        drop(removed);
    }
}

#[cfg(test)]
#[path = "fake_tests.rs"]
mod tests;
