//! Concurrent reporting
//!
//! Subsystems report from their own tasks; every flow still ends once.

use crate::prelude::*;
use crate::prelude::assert_eq;

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn reports_from_many_tasks_end_each_flow_once() {
    let fakes = Fakes::new();
    let coordinator = fakes.background_tasks();
    let completions = Completions::new();

    let flows: Vec<(FlowId, Vec<Expectation>)> = (0..8)
        .map(|f| {
            let message = format!("m{f}");
            let expectations: Vec<Expectation> =
                (0..16).map(|n| attachment_ack(&message, n)).collect();
            let id = coordinator.start_flow("upload", expectations.clone(), Some(completions.handler()));
            (id, expectations)
        })
        .collect();

    let mut tasks = Vec::new();
    for (id, expectations) in flows.clone() {
        for expectation in expectations {
            let coordinator = coordinator.clone();
            let id = id.clone();
            tasks.push(tokio::spawn(async move {
                coordinator.update_expectations(&id, std::slice::from_ref(&expectation), &[]);
                coordinator.update_all_expectations(&[expectation]);
            }));
        }
    }
    for task in tasks {
        task.await.unwrap();
    }

    for (id, _) in &flows {
        assert_eq!(completions.of(id), vec![FlowOutcome::Success]);
    }
    assert!(fakes.background.active().is_empty());
    assert_eq!(coordinator.active_flow_count(), 0);
}
