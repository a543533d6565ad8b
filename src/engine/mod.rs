// src/engine/mod.rs

//! Run orchestration for taskdag.
//!
//! This module ties together:
//! - the scheduler (one worker per task)
//! - the result collector (one report per task, in arrival order)
//! - report rendering
//!
//! The fan-in lives in [`collector`]; the async shell that wires a run
//! together is implemented in [`runtime`].

/// Options that shape a run, built once from the command line.
#[derive(Debug, Clone, Copy)]
pub struct RuntimeOptions {
    /// Include each task's captured output in its report block.
    pub show_output: bool,
}

impl Default for RuntimeOptions {
    fn default() -> Self {
        Self { show_output: true }
    }
}

pub mod collector;
pub mod runtime;

pub use crate::types::{TaskName, TaskReport, TaskStatus};
pub use collector::{
    ConsoleReporter, MemorySink, ReportSink, ResultCollector, RunSummary, render_report,
    render_summary,
};
pub use runtime::Runtime;
