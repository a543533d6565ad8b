// src/exec/mod.rs

//! Process execution layer.
//!
//! This module is responsible for actually running the commands declared by
//! tasks and handing back a [`CommandOutput`] (success, combined output,
//! duration) to the worker that asked.
//!
//! - [`backend`] provides the `CommandRunner` trait that workers call, and
//!   which tests can replace with a fake implementation.
//! - [`task_runner`] holds `ProcessRunner`, the `tokio::process` backed
//!   implementation used in production.

pub mod backend;
pub mod task_runner;

pub use backend::{CommandOutput, CommandRunner};
pub use task_runner::{ProcessRunner, run_command};
