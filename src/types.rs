use std::fmt;
use std::time::Duration;

/// Canonical task name type used throughout the crate.
pub type TaskName = String;

/// Reason recorded for a task that never ran.
pub const UPSTREAM_FAILURE_REASON: &str = "not run: upstream failure";

/// Terminal outcome of a single task in a run.
///
/// - `Succeeded`: the command ran and exited successfully.
/// - `Failed`: the command ran (or failed to launch) and did not succeed.
/// - `Skipped`: the command never ran because a prerequisite did not succeed.
///
/// `Failed` and `Skipped` propagate identically to dependents; they are kept
/// apart so the operator can tell "broke" from "never ran".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskStatus {
    Succeeded,
    Failed,
    Skipped,
}

impl TaskStatus {
    pub fn is_success(self) -> bool {
        matches!(self, TaskStatus::Succeeded)
    }

    /// Whether the task's command was actually executed.
    pub fn was_run(self) -> bool {
        !matches!(self, TaskStatus::Skipped)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TaskStatus::Succeeded => "succeeded",
            TaskStatus::Failed => "failed",
            TaskStatus::Skipped => "skipped",
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One result message per task, pushed by its worker to the collector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskReport {
    pub name: TaskName,
    pub status: TaskStatus,
    /// Combined stdout/stderr of the command, or the skip reason.
    pub output: String,
    pub duration: Duration,
}

impl TaskReport {
    /// Synthetic report for a task whose prerequisites did not all succeed.
    pub fn skipped(name: TaskName) -> Self {
        Self {
            name,
            status: TaskStatus::Skipped,
            output: UPSTREAM_FAILURE_REASON.to_string(),
            duration: Duration::ZERO,
        }
    }

    pub fn succeeded(&self) -> bool {
        self.status.is_success()
    }
}
