// src/dag/mod.rs

//! Dependency graph and scheduling.
//!
//! - [`graph`] turns task declarations into a resolved graph (wait counts,
//!   dependents, completion signals).
//! - [`cycle`] rejects graphs that are not acyclic before anything runs.
//! - [`signal`] is the one-shot completion primitive shared between a task
//!   and its dependents.
//! - [`scheduler`] spawns one worker per task and drives the
//!   wait / decide / run / report / notify protocol.
//! - [`task_info`] provides the per-worker task view and lifecycle state.

pub mod cycle;
pub mod graph;
pub mod scheduler;
pub mod signal;
pub mod task_info;

pub use cycle::{ensure_acyclic, find_cycle};
pub use graph::{TaskGraph, TaskNode, TaskSignals};
pub use scheduler::Scheduler;
pub use signal::{CompletionPublisher, CompletionWaiter};
pub use task_info::{ScheduledTask, WorkerState};
