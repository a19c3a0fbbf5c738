//! Shared fixtures for coordinator specs

#![allow(dead_code)]

pub use hf_adapters::{
    BackgroundResourceAdapter, BudgetedBackgroundAdapter, DeadlineTimer, FakeBackgroundAdapter,
    FakeDeadlineTimer, TokioDeadlineTimer, TracedBackgroundAdapter,
};
pub use hf_core::{
    AttachmentId, CoordinatorConfig, Expectation, FailureCause, FakeClock, FlowId, FlowOutcome,
    MessageId, OwnedIdentityId, ProtocolMessageId, SequentialIdGen,
};
pub use hf_engine::{
    BackgroundTaskCoordinator, CompletionHandler, CoordinatorBuilder, FlowEvent,
    RemoteNotificationCoordinator,
};
pub use similar_asserts::assert_eq;
pub use std::sync::Arc;
pub use std::time::Duration;

use std::sync::Mutex;

/// Collects every completion delivered to the handlers it hands out
#[derive(Clone, Default)]
pub struct Completions {
    seen: Arc<Mutex<Vec<(FlowId, FlowOutcome)>>>,
}

impl Completions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn handler(&self) -> CompletionHandler {
        let seen = Arc::clone(&self.seen);
        Box::new(move |id, outcome| seen.lock().unwrap().push((id, outcome)))
    }

    pub fn all(&self) -> Vec<(FlowId, FlowOutcome)> {
        self.seen.lock().unwrap().clone()
    }

    pub fn of(&self, id: &FlowId) -> Vec<FlowOutcome> {
        self.all()
            .into_iter()
            .filter(|(f, _)| f == id)
            .map(|(_, o)| o)
            .collect()
    }
}

/// Coordinators wired to fake adapters on a shared fake clock
pub struct Fakes {
    pub background: FakeBackgroundAdapter,
    pub timer: FakeDeadlineTimer,
    pub builder: CoordinatorBuilder<FakeClock>,
}

impl Fakes {
    pub fn new() -> Self {
        Self::with_config(CoordinatorConfig::default())
    }

    pub fn with_config(config: CoordinatorConfig) -> Self {
        let clock = FakeClock::new();
        let background = FakeBackgroundAdapter::new();
        let timer = FakeDeadlineTimer::new(clock.clone());
        let builder = CoordinatorBuilder::new()
            .config(config)
            .background(background.clone())
            .timer(timer.clone())
            .id_gen(SequentialIdGen::new("flow"))
            .clock(clock);
        Self {
            background,
            timer,
            builder,
        }
    }

    pub fn background_tasks(&self) -> BackgroundTaskCoordinator<FakeClock> {
        self.builder.build_background_tasks().unwrap()
    }

    pub fn remote_notifications(&self) -> RemoteNotificationCoordinator<FakeClock> {
        self.builder.build_remote_notifications().unwrap()
    }
}

/// Budgeted grants and deadlines running on the current tokio runtime
pub struct OnTokio {
    pub grants: BudgetedBackgroundAdapter,
    pub timer: TokioDeadlineTimer,
    pub builder: CoordinatorBuilder,
}

impl OnTokio {
    pub fn new(config: CoordinatorConfig) -> Self {
        let timer = TokioDeadlineTimer::try_current().unwrap();
        let grants = BudgetedBackgroundAdapter::from_config(&config, Arc::new(timer.clone()));
        let builder = CoordinatorBuilder::new()
            .config(config)
            .background(TracedBackgroundAdapter::new(grants.clone()))
            .timer(timer.clone());
        Self {
            grants,
            timer,
            builder,
        }
    }
}

pub fn attachment_ack(message: &str, number: u32) -> Expectation {
    Expectation::AttachmentUploadTakenCareOf {
        attachment: AttachmentId::new(message, number),
    }
}
