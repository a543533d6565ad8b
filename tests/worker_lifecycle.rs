// tests/worker_lifecycle.rs

mod common;
use crate::common::with_timeout;

use std::time::Duration;

use taskdag::dag::{CompletionPublisher, ScheduledTask, WorkerState};
use taskdag_test_utils::builders::{ConfigFileBuilder, TaskConfigBuilder};

#[test]
fn worker_states_only_move_forward() {
    use WorkerState::*;

    assert!(Pending.can_advance_to(Waiting));
    assert!(Waiting.can_advance_to(Running));
    assert!(Waiting.can_advance_to(Skipped));
    assert!(Running.can_advance_to(Reported));
    assert!(Skipped.can_advance_to(Reported));
    assert!(Reported.can_advance_to(Done));

    assert!(!Pending.can_advance_to(Running));
    assert!(!Running.can_advance_to(Skipped));
    assert!(!Skipped.can_advance_to(Running));
    assert!(!Reported.can_advance_to(Waiting));
    assert!(!Done.can_advance_to(Pending));
}

#[test]
fn scheduled_task_rejects_illegal_transition() {
    let graph = ConfigFileBuilder::new()
        .with_task("A", TaskConfigBuilder::echo("A").build())
        .build_graph();
    let node = graph.task("A").unwrap();

    let mut task = ScheduledTask::from_task_node(node, 0);
    assert_eq!(task.state(), WorkerState::Pending);
    assert_eq!(task.argv, vec!["echo", "A"]);

    assert!(!task.advance(WorkerState::Running));
    assert_eq!(task.state(), WorkerState::Pending);

    assert!(task.advance(WorkerState::Waiting));
    assert!(task.advance(WorkerState::Running));
    assert!(task.advance(WorkerState::Reported));
    assert!(task.advance(WorkerState::Done));
    assert_eq!(task.state(), WorkerState::Done);
}

#[tokio::test]
async fn every_subscriber_sees_the_published_outcome() {
    let publisher = CompletionPublisher::new();
    let waiters: Vec<_> = (0..8).map(|_| publisher.subscribe()).collect();
    assert_eq!(publisher.subscriber_count(), 8);

    let handles: Vec<_> = waiters
        .into_iter()
        .map(|w| tokio::spawn(w.wait()))
        .collect();

    tokio::time::sleep(Duration::from_millis(10)).await;
    publisher.publish(true);

    for handle in handles {
        assert!(with_timeout(handle).await.unwrap());
    }
}

#[tokio::test]
async fn waiter_that_arrives_late_still_sees_failure() {
    let publisher = CompletionPublisher::new();
    let waiter = publisher.subscribe();

    // Nobody is awaiting yet when the outcome lands.
    publisher.publish(false);

    assert!(!with_timeout(waiter.wait()).await);
}

#[tokio::test]
async fn publish_without_subscribers_does_not_block() {
    let publisher = CompletionPublisher::new();
    assert_eq!(publisher.subscriber_count(), 0);
    publisher.publish(true);
}

#[tokio::test]
async fn dropped_publisher_reads_as_failure() {
    let publisher = CompletionPublisher::new();
    let waiter = publisher.subscribe();
    drop(publisher);

    assert!(!with_timeout(waiter.wait()).await);
}
