#![allow(dead_code)]

use std::sync::Arc;

use taskdag::dag::{Scheduler, TaskGraph};
use taskdag::engine::{MemorySink, RunSummary, Runtime};
use taskdag_test_utils::fake_runner::FakeRunner;

pub use taskdag_test_utils::init_tracing;

/// Run a future with a 5-second timeout.
pub async fn with_timeout<F, T>(f: F) -> T
where
    F: std::future::Future<Output = T>,
{
    tokio::time::timeout(std::time::Duration::from_secs(5), f)
        .await
        .expect("Test timed out after 5 seconds")
}

/// Run `graph` to completion against `runner`, collecting into memory.
pub async fn run_with(graph: TaskGraph, runner: &FakeRunner) -> (RunSummary, MemorySink) {
    let scheduler = Scheduler::new(graph, Arc::new(runner.clone()));
    let mut runtime = Runtime::new(scheduler, MemorySink::default());
    let summary = with_timeout(runtime.run()).await;
    (summary, runtime.into_sink())
}
