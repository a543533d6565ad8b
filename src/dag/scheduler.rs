use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

use crate::dag::graph::{TaskGraph, TaskSignals};
use crate::dag::task_info::{ScheduledTask, WorkerState};
use crate::exec::CommandRunner;
use crate::types::{TaskReport, TaskStatus};

/// Scheduler holds the immutable, validated graph and the command runner.
///
/// It is responsible for:
/// - wiring one completion signal per task to the tasks that wait on it
/// - spawning exactly one worker per task
///
/// Each worker is responsible for:
/// - waiting for all of its prerequisites to report
/// - deciding to run or skip
/// - pushing its report to the collector
/// - notifying its dependents
pub struct Scheduler {
    graph: Arc<TaskGraph>,
    runner: Arc<dyn CommandRunner>,
}

impl std::fmt::Debug for Scheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scheduler")
            .field("graph", &self.graph)
            .finish_non_exhaustive()
    }
}

impl Scheduler {
    /// Construct a scheduler from an acyclic [`TaskGraph`].
    pub fn new(graph: TaskGraph, runner: Arc<dyn CommandRunner>) -> Self {
        Self {
            graph: Arc::new(graph),
            runner,
        }
    }

    /// Number of reports a full run produces.
    pub fn task_count(&self) -> usize {
        self.graph.len()
    }

    /// Spawn one worker per task, all at once.
    ///
    /// Every worker sends exactly one [`TaskReport`] on `results`. The channel
    /// should have room for [`Scheduler::task_count`] reports so no worker
    /// ever waits on the collector.
    pub fn dispatch(&self, results: mpsc::Sender<TaskReport>) -> JoinSet<()> {
        let signals = self.graph.allocate_signals();
        let mut workers = JoinSet::new();

        for (node, signals) in self.graph.tasks().zip(signals) {
            let task = ScheduledTask::from_task_node(node, signals.publisher.subscriber_count());
            debug!(
                task = %task.name,
                wait_count = task.wait_count,
                dependents = task.dependent_count,
                "spawning worker"
            );
            workers.spawn(run_worker(
                task,
                signals,
                Arc::clone(&self.runner),
                results.clone(),
            ));
        }

        info!(workers = workers.len(), "all task workers dispatched");
        workers
    }
}

/// Body of one task's worker.
async fn run_worker(
    mut task: ScheduledTask,
    signals: TaskSignals,
    runner: Arc<dyn CommandRunner>,
    results: mpsc::Sender<TaskReport>,
) {
    let TaskSignals {
        publisher,
        prerequisites,
    } = signals;

    task.advance(WorkerState::Waiting);

    // Receive every signal before deciding, even after a failure.
    let mut upstream_ok = true;
    for waiter in prerequisites {
        if !waiter.wait().await {
            upstream_ok = false;
        }
    }

    let report = if upstream_ok {
        task.advance(WorkerState::Running);
        info!(task = %task.name, argv = ?task.argv, "running task");

        let out = runner.run(&task.argv).await;
        let status = if out.success {
            TaskStatus::Succeeded
        } else {
            TaskStatus::Failed
        };
        debug!(
            task = %task.name,
            %status,
            duration_ms = out.duration.as_millis() as u64,
            "task command finished"
        );

        TaskReport {
            name: task.name.clone(),
            status,
            output: out.output,
            duration: out.duration,
        }
    } else {
        task.advance(WorkerState::Skipped);
        warn!(task = %task.name, "prerequisite did not succeed; skipping task");
        TaskReport::skipped(task.name.clone())
    };

    let success = report.succeeded();
    if results.send(report).await.is_err() {
        warn!(task = %task.name, "result collector is gone; report dropped");
    }
    task.advance(WorkerState::Reported);

    publisher.publish(success);
    task.advance(WorkerState::Done);

    debug!(
        task = %task.name,
        success,
        notified = task.dependent_count,
        "worker done"
    );
}
