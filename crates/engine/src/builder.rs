// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Assembly of coordinators from their collaborators
//!
//! Both coordinators may be built from one builder, in which case they share
//! the id generator and adapters but each owns its own registry.

use crate::background::BackgroundTaskCoordinator;
use crate::barrier::{ExhaustionOutcome, ExpectationBarrier};
use crate::error::CoordinatorError;
use crate::remote::RemoteNotificationCoordinator;
use hf_adapters::{
    BackgroundResourceAdapter, DeadlineTimer, NoOpBackgroundAdapter, TokioDeadlineTimer,
};
use hf_core::{Clock, CoordinatorConfig, IdGen, SystemClock, UuidIdGen};
use std::sync::Arc;
use std::time::Duration;

#[derive(Clone)]
pub struct CoordinatorBuilder<C: Clock = SystemClock> {
    config: CoordinatorConfig,
    background: Option<Arc<dyn BackgroundResourceAdapter>>,
    timer: Option<Arc<dyn DeadlineTimer>>,
    id_gen: Arc<dyn IdGen>,
    clock: C,
}

impl Default for CoordinatorBuilder<SystemClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl CoordinatorBuilder<SystemClock> {
    pub fn new() -> Self {
        Self {
            config: CoordinatorConfig::default(),
            background: None,
            timer: None,
            id_gen: Arc::new(UuidIdGen),
            clock: SystemClock,
        }
    }
}

impl<C: Clock> CoordinatorBuilder<C> {
    pub fn config(mut self, config: CoordinatorConfig) -> Self {
        self.config = config;
        self
    }

    pub fn background(mut self, adapter: impl BackgroundResourceAdapter) -> Self {
        self.background = Some(Arc::new(adapter));
        self
    }

    pub fn timer(mut self, timer: impl DeadlineTimer) -> Self {
        self.timer = Some(Arc::new(timer));
        self
    }

    pub fn id_gen(mut self, id_gen: impl IdGen + 'static) -> Self {
        self.id_gen = Arc::new(id_gen);
        self
    }

    pub fn clock<C2: Clock>(self, clock: C2) -> CoordinatorBuilder<C2> {
        CoordinatorBuilder {
            config: self.config,
            background: self.background,
            timer: self.timer,
            id_gen: self.id_gen,
            clock,
        }
    }

    /// Build the action-triggered coordinator
    ///
    /// Requires a background adapter.
    pub fn build_background_tasks(&self) -> Result<BackgroundTaskCoordinator<C>, CoordinatorError> {
        let background = self
            .background
            .clone()
            .ok_or(CoordinatorError::MissingCollaborator("background resource adapter"))?;
        Ok(self.background_with(background))
    }

    /// Build the push-wake coordinator
    ///
    /// Requires a background adapter, a deadline timer and a valid config.
    pub fn build_remote_notifications(
        &self,
    ) -> Result<RemoteNotificationCoordinator<C>, CoordinatorError> {
        self.config.validate()?;
        let background = self
            .background
            .clone()
            .ok_or(CoordinatorError::MissingCollaborator("background resource adapter"))?;
        let timer = self
            .timer
            .clone()
            .ok_or(CoordinatorError::MissingCollaborator("deadline timer"))?;
        Ok(self.remote_with(background, Some(timer), self.config.push_deadline))
    }

    /// Like [`build_background_tasks`](Self::build_background_tasks), but a
    /// missing adapter fails a debug assertion, and is replaced by a no-op
    /// adapter in release builds
    pub fn build_background_tasks_or_noop(&self) -> BackgroundTaskCoordinator<C> {
        let background = self.background.clone().unwrap_or_else(|| {
            tracing::error!("no background resource adapter configured; using no-op");
            debug_assert!(self.background.is_some(), "no background resource adapter");
            Arc::new(NoOpBackgroundAdapter::new()) as Arc<dyn BackgroundResourceAdapter>
        });
        self.background_with(background)
    }

    /// Like [`build_remote_notifications`](Self::build_remote_notifications),
    /// but missing collaborators fail debug assertions and are substituted in
    /// release builds: a no-op background adapter, the tokio timer of the
    /// current runtime if there is one, and the default push deadline if the
    /// config is invalid
    pub fn build_remote_notifications_or_noop(&self) -> RemoteNotificationCoordinator<C> {
        let deadline = match self.config.validate() {
            Ok(()) => self.config.push_deadline,
            Err(e) => {
                tracing::error!(error = %e, "invalid coordinator config; using default deadline");
                debug_assert!(self.config.validate().is_ok(), "{e}");
                CoordinatorConfig::default().push_deadline
            }
        };
        let background = self.background.clone().unwrap_or_else(|| {
            tracing::error!("no background resource adapter configured; using no-op");
            debug_assert!(self.background.is_some(), "no background resource adapter");
            Arc::new(NoOpBackgroundAdapter::new()) as Arc<dyn BackgroundResourceAdapter>
        });
        let timer = self.timer.clone().or_else(|| {
            tracing::error!("no deadline timer configured");
            debug_assert!(self.timer.is_some(), "no deadline timer");
            TokioDeadlineTimer::try_current()
                .ok()
                .map(|t| Arc::new(t) as Arc<dyn DeadlineTimer>)
        });
        self.remote_with(background, timer, deadline)
    }

    fn background_with(
        &self,
        background: Arc<dyn BackgroundResourceAdapter>,
    ) -> BackgroundTaskCoordinator<C> {
        BackgroundTaskCoordinator::new(ExpectationBarrier::new(
            "background-task",
            background,
            self.timer.clone(),
            Arc::clone(&self.id_gen),
            self.clock.clone(),
            ExhaustionOutcome::Success,
        ))
    }

    fn remote_with(
        &self,
        background: Arc<dyn BackgroundResourceAdapter>,
        timer: Option<Arc<dyn DeadlineTimer>>,
        deadline: Duration,
    ) -> RemoteNotificationCoordinator<C> {
        RemoteNotificationCoordinator::new(
            ExpectationBarrier::new(
                "remote-notification",
                background,
                timer,
                Arc::clone(&self.id_gen),
                self.clock.clone(),
                ExhaustionOutcome::SuccessIfWorkDiscovered,
            ),
            deadline,
        )
    }
}

#[cfg(test)]
#[path = "builder_tests.rs"]
mod tests;
