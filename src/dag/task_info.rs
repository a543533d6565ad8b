// src/dag/task_info.rs

//! Per-worker task metadata and lifecycle state.

use tracing::trace;

use crate::dag::graph::TaskNode;
use crate::types::TaskName;

/// Lifecycle of one task's worker within a run.
///
/// `Pending -> Waiting -> {Skipped | Running} -> Reported -> Done`
///
/// A worker only ever moves forward; see [`WorkerState::can_advance_to`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkerState {
    /// Spawned, nothing observed yet.
    Pending,
    /// Receiving prerequisite signals.
    Waiting,
    /// At least one prerequisite did not succeed; the command will not run.
    Skipped,
    /// The command has been handed to the runner.
    Running,
    /// The result has been pushed to the collector.
    Reported,
    /// Dependents have been notified.
    Done,
}

impl WorkerState {
    /// Whether `next` is a legal successor of `self`.
    pub fn can_advance_to(self, next: WorkerState) -> bool {
        use WorkerState::*;
        matches!(
            (self, next),
            (Pending, Waiting)
                | (Waiting, Skipped)
                | (Waiting, Running)
                | (Skipped, Reported)
                | (Running, Reported)
                | (Reported, Done)
        )
    }
}

/// What a worker needs to know about its task once the graph is wired.
#[derive(Debug, Clone)]
pub struct ScheduledTask {
    pub name: TaskName,
    pub argv: Vec<String>,
    pub wait_count: usize,
    /// Number of dependents that will observe this task's completion.
    pub dependent_count: usize,
    state: WorkerState,
}

impl ScheduledTask {
    pub fn from_task_node(node: &TaskNode, dependent_count: usize) -> Self {
        Self {
            name: node.name.clone(),
            argv: node.argv.clone(),
            wait_count: node.wait_count,
            dependent_count,
            state: WorkerState::Pending,
        }
    }

    pub fn state(&self) -> WorkerState {
        self.state
    }

    /// Move to `next`. Illegal transitions are ignored and return `false`.
    pub fn advance(&mut self, next: WorkerState) -> bool {
        if !self.state.can_advance_to(next) {
            tracing::error!(
                task = %self.name,
                from = ?self.state,
                to = ?next,
                "illegal worker state transition; ignoring"
            );
            return false;
        }
        trace!(task = %self.name, from = ?self.state, to = ?next, "worker state transition");
        self.state = next;
        true
    }
}
