// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Time-limited background grants
//!
//! Emulates a host that allows each background activity a fixed execution
//! budget and revokes the grant when it lapses.

use super::{BackgroundError, BackgroundHandle, BackgroundResourceAdapter, ExpirationCallback};
use crate::timer::{DeadlineTimer, TimerHandle};
use hf_core::CoordinatorConfig;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

struct Grant {
    label: String,
    timer: Option<TimerHandle>,
    on_expire: ExpirationCallback,
}

#[derive(Default)]
struct GrantTable {
    next: u64,
    grants: HashMap<BackgroundHandle, Grant>,
}

/// Background adapter granting each activity a fixed budget
#[derive(Clone)]
pub struct BudgetedBackgroundAdapter {
    budget: Duration,
    max_grants: Option<usize>,
    timer: Arc<dyn DeadlineTimer>,
    table: Arc<Mutex<GrantTable>>,
}

impl BudgetedBackgroundAdapter {
    pub fn new(budget: Duration, timer: Arc<dyn DeadlineTimer>) -> Self {
        Self {
            budget,
            max_grants: None,
            timer,
            table: Arc::new(Mutex::new(GrantTable::default())),
        }
    }

    pub fn from_config(config: &CoordinatorConfig, timer: Arc<dyn DeadlineTimer>) -> Self {
        Self::new(config.background_budget, timer)
    }

    /// Refuse new grants while `max` are outstanding
    pub fn with_max_grants(mut self, max: usize) -> Self {
        self.max_grants = Some(max);
        self
    }

    pub fn budget(&self) -> Duration {
        self.budget
    }

    /// Number of grants neither ended nor expired
    pub fn active_count(&self) -> usize {
        self.table
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .grants
            .len()
    }

    fn expire(table: &Mutex<GrantTable>, handle: BackgroundHandle) {
        let grant = table
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .grants
            .remove(&handle);
        if let Some(grant) = grant {
            tracing::info!(%handle, label = %grant.label, "background grant expired");
            (grant.on_expire)();
        }
    }
}

impl BackgroundResourceAdapter for BudgetedBackgroundAdapter {
    fn begin(
        &self,
        label: &str,
        on_expire: ExpirationCallback,
    ) -> Result<BackgroundHandle, BackgroundError> {
        let handle = {
            let mut table = self.table.lock().unwrap_or_else(|e| e.into_inner());
            if let Some(max) = self.max_grants {
                if table.grants.len() >= max {
                    return Err(BackgroundError::Unavailable(format!(
                        "{max} background grants already outstanding"
                    )));
                }
            }
            table.next += 1;
            let handle = BackgroundHandle(table.next);
            table.grants.insert(
                handle,
                Grant {
                    label: label.to_string(),
                    timer: None,
                    on_expire,
                },
            );
            handle
        };

        let table = Arc::downgrade(&self.table);
        let timer = self.timer.schedule(
            self.budget,
            Box::new(move || {
                if let Some(table) = table.upgrade() {
                    Self::expire(&table, handle);
                }
            }),
        );

        // The grant may already be gone if the budget lapsed or the holder
        // ended it while the timer was being scheduled.
        let attached = {
            let mut table = self.table.lock().unwrap_or_else(|e| e.into_inner());
            match table.grants.get_mut(&handle) {
                Some(grant) => {
                    grant.timer = Some(timer);
                    true
                }
                None => false,
            }
        };
        if !attached {
            self.timer.cancel(timer);
        }

        Ok(handle)
    }

    fn end(&self, handle: BackgroundHandle) {
        let grant = self
            .table
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .grants
            .remove(&handle);
        match grant {
            Some(grant) => {
                if let Some(timer) = grant.timer {
                    self.timer.cancel(timer);
                }
            }
            None => tracing::debug!(%handle, "ending unknown or expired background grant"),
        }
    }
}

#[cfg(test)]
#[path = "budgeted_tests.rs"]
mod tests;
