// src/engine/runtime.rs

use std::fmt;
use std::time::Instant;

use tokio::sync::mpsc;
use tracing::{error, info};

use crate::dag::Scheduler;
use crate::types::TaskReport;

use super::collector::{ReportSink, ResultCollector, RunSummary};

/// Drives one run: dispatches every worker through the [`Scheduler`] and
/// drains their reports through a [`ResultCollector`] into a [`ReportSink`].
pub struct Runtime<S: ReportSink> {
    scheduler: Scheduler,
    sink: S,
}

impl<S: ReportSink> fmt::Debug for Runtime<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Runtime")
            .field("scheduler", &self.scheduler)
            .finish_non_exhaustive()
    }
}

impl<S: ReportSink> Runtime<S> {
    pub fn new(scheduler: Scheduler, sink: S) -> Self {
        Self { scheduler, sink }
    }

    /// Run every task to a terminal state and return the summary.
    ///
    /// Individual task failures are part of the summary, not errors.
    pub async fn run(&mut self) -> RunSummary {
        let expected = self.scheduler.task_count();
        info!(tasks = expected, "taskdag run started");

        // Room for every report: a worker's single send never waits.
        let (results_tx, results_rx) = mpsc::channel::<TaskReport>(expected.max(1));

        let started = Instant::now();
        let mut workers = self.scheduler.dispatch(results_tx);

        let summary = ResultCollector::new(expected, results_rx)
            .collect(started, &mut self.sink)
            .await;

        while let Some(joined) = workers.join_next().await {
            if let Err(err) = joined {
                error!(error = %err, "task worker did not finish cleanly");
            }
        }

        info!(
            elapsed_ms = summary.elapsed.as_millis() as u64,
            succeeded = summary.succeeded(),
            failed = summary.failed(),
            skipped = summary.skipped(),
            "taskdag run finished"
        );

        summary
    }

    pub fn into_sink(self) -> S {
        self.sink
    }
}
