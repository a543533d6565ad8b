// src/engine/collector.rs

//! Fan-in of task reports.
//!
//! Reports arrive in completion order, which is neither declaration order
//! nor stable between runs. Nothing here assumes any relation between
//! arrival order and the dependency graph.

use std::io::{self, Write};
use std::time::{Duration, Instant};

use tokio::sync::mpsc;
use tracing::{debug, error, warn};

use crate::engine::RuntimeOptions;
use crate::types::{TaskReport, TaskStatus};

/// Receives reports as the collector drains them.
pub trait ReportSink: Send {
    /// Called once per report, in arrival order.
    fn task_finished(&mut self, report: &TaskReport);

    /// Called once after the last report (or after the channel closed early).
    fn run_finished(&mut self, summary: &RunSummary);
}

/// Aggregate outcome of one run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Reports in arrival order.
    pub reports: Vec<TaskReport>,
    /// Number of tasks that were dispatched.
    pub expected: usize,
    /// From dispatch start to the last report received.
    pub elapsed: Duration,
}

impl RunSummary {
    pub fn total(&self) -> usize {
        self.reports.len()
    }

    pub fn count(&self, status: TaskStatus) -> usize {
        self.reports.iter().filter(|r| r.status == status).count()
    }

    pub fn succeeded(&self) -> usize {
        self.count(TaskStatus::Succeeded)
    }

    pub fn failed(&self) -> usize {
        self.count(TaskStatus::Failed)
    }

    pub fn skipped(&self) -> usize {
        self.count(TaskStatus::Skipped)
    }

    /// Tasks whose command was actually executed.
    pub fn tasks_run(&self) -> usize {
        self.reports.iter().filter(|r| r.status.was_run()).count()
    }

    /// Tasks that never reported (only non-zero if a worker panicked).
    pub fn missing(&self) -> usize {
        self.expected.saturating_sub(self.reports.len())
    }

    pub fn all_succeeded(&self) -> bool {
        self.missing() == 0 && self.reports.iter().all(TaskReport::succeeded)
    }

    pub fn report(&self, name: &str) -> Option<&TaskReport> {
        self.reports.iter().find(|r| r.name == name)
    }

    /// Arrival position of a task's report.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.reports.iter().position(|r| r.name == name)
    }
}

/// Drains exactly one report per task from the result channel.
#[derive(Debug)]
pub struct ResultCollector {
    expected: usize,
    rx: mpsc::Receiver<TaskReport>,
}

impl ResultCollector {
    pub fn new(expected: usize, rx: mpsc::Receiver<TaskReport>) -> Self {
        Self { expected, rx }
    }

    /// Receive `expected` reports, handing each to `sink` as it arrives.
    ///
    /// If every sender is dropped first, logs how many reports are missing
    /// and returns what was received instead of waiting forever.
    pub async fn collect<S>(mut self, started: Instant, sink: &mut S) -> RunSummary
    where
        S: ReportSink + ?Sized,
    {
        let mut reports = Vec::with_capacity(self.expected);

        while reports.len() < self.expected {
            match self.rx.recv().await {
                Some(report) => {
                    debug!(
                        task = %report.name,
                        status = %report.status,
                        received = reports.len() + 1,
                        expected = self.expected,
                        "report received"
                    );
                    sink.task_finished(&report);
                    reports.push(report);
                }
                None => {
                    error!(
                        missing = self.expected - reports.len(),
                        "result channel closed before every task reported"
                    );
                    break;
                }
            }
        }

        let summary = RunSummary {
            reports,
            expected: self.expected,
            elapsed: started.elapsed(),
        };
        sink.run_finished(&summary);
        summary
    }
}

/// Format the block printed for one finished task.
pub fn render_report(report: &TaskReport, show_output: bool) -> String {
    let mut out = format!(
        "--------------Finished '{}' {} [{} ms]----------------\n",
        report.name,
        report.status,
        report.duration.as_millis()
    );

    let body = report.output.trim_end();
    let show_body = show_output || report.status == TaskStatus::Skipped;
    if show_body && !body.is_empty() {
        out.push_str(body);
        out.push('\n');
    }
    out.push('\n');
    out
}

/// Format the closing summary line(s).
pub fn render_summary(summary: &RunSummary) -> String {
    let mut out = format!(
        "Finished {} tasks in {} ms ({} run: {} succeeded, {} failed, {} skipped)\n",
        summary.total(),
        summary.elapsed.as_millis(),
        summary.tasks_run(),
        summary.succeeded(),
        summary.failed(),
        summary.skipped()
    );
    if summary.missing() > 0 {
        out.push_str(&format!("{} tasks never reported\n", summary.missing()));
    }
    out
}

/// Writes reports to any `io::Write` (stdout in production).
#[derive(Debug)]
pub struct ConsoleReporter<W: Write + Send> {
    out: W,
    show_output: bool,
}

impl ConsoleReporter<io::Stdout> {
    pub fn stdout(options: &RuntimeOptions) -> Self {
        Self::new(io::stdout(), options)
    }
}

impl<W: Write + Send> ConsoleReporter<W> {
    pub fn new(out: W, options: &RuntimeOptions) -> Self {
        Self {
            out,
            show_output: options.show_output,
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn emit(&mut self, text: &str) {
        if let Err(e) = self.out.write_all(text.as_bytes()).and_then(|_| self.out.flush()) {
            warn!(error = %e, "failed to write task report");
        }
    }
}

impl<W: Write + Send> ReportSink for ConsoleReporter<W> {
    fn task_finished(&mut self, report: &TaskReport) {
        let text = render_report(report, self.show_output);
        self.emit(&text);
    }

    fn run_finished(&mut self, summary: &RunSummary) {
        let text = render_summary(summary);
        self.emit(&text);
    }
}

/// Sink that only keeps what it is given; handy for embedding and tests.
#[derive(Debug, Default)]
pub struct MemorySink {
    pub reports: Vec<TaskReport>,
    pub summary: Option<RunSummary>,
}

impl ReportSink for MemorySink {
    fn task_finished(&mut self, report: &TaskReport) {
        self.reports.push(report.clone());
    }

    fn run_finished(&mut self, summary: &RunSummary) {
        self.summary = Some(summary.clone());
    }
}
