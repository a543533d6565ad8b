// src/exec/backend.rs

//! Pluggable command runner abstraction.
//!
//! Workers talk to a `CommandRunner` instead of spawning processes directly.
//! This makes it easy to swap in a fake runner in tests while keeping the
//! production implementation in [`super::task_runner`].

use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

/// What running one command produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutput {
    /// Exit status was success. A command that failed to launch is `false`.
    pub success: bool,
    /// Combined stdout and stderr, plus any launch or exit-status error text.
    pub output: String,
    /// Wall-clock time from launch to exit.
    pub duration: Duration,
}

/// Trait abstracting how a task's command is executed.
///
/// Production code uses [`super::ProcessRunner`]; tests can provide their
/// own implementation that doesn't spawn real processes.
pub trait CommandRunner: Send + Sync {
    /// Run `argv` (program followed by arguments) to completion.
    ///
    /// Must not fail: launch errors are reported as an unsuccessful
    /// [`CommandOutput`].
    fn run<'a>(
        &'a self,
        argv: &'a [String],
    ) -> Pin<Box<dyn Future<Output = CommandOutput> + Send + 'a>>;
}
