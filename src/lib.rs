// src/lib.rs

pub mod cli;
pub mod config;
pub mod dag;
pub mod engine;
pub mod errors;
pub mod exec;
pub mod logging;
pub mod types;

use std::path::Path;
use std::sync::Arc;

use tracing::{info, warn};

use crate::cli::CliArgs;
use crate::config::loader::load_and_validate;
use crate::dag::{Scheduler, TaskGraph, TaskNode, ensure_acyclic};
use crate::engine::{ConsoleReporter, Runtime};
use crate::errors::Result;
use crate::exec::{CommandRunner, ProcessRunner};

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - task file loading and validation
/// - graph building and the cycle check
/// - either the graph listing (`--show-graph`) or a full run
///
/// Everything fatal happens before the first task is spawned. Once a run
/// starts it always completes, and task failures do not turn into an error.
pub async fn run(args: CliArgs) -> Result<()> {
    let graph = load_graph(&args.taskfile)?;

    if args.show_graph {
        print!("{}", describe_graph(&graph));
        return Ok(());
    }

    let runner: Arc<dyn CommandRunner> = Arc::new(ProcessRunner::new());
    let scheduler = Scheduler::new(graph, runner);
    let reporter = ConsoleReporter::stdout(&args.runtime_options());

    let mut runtime = Runtime::new(scheduler, reporter);
    let summary = runtime.run().await;

    if summary.all_succeeded() {
        info!(tasks = summary.total(), "all tasks succeeded");
    } else {
        warn!(
            failed = summary.failed(),
            skipped = summary.skipped(),
            "some tasks did not succeed"
        );
    }

    Ok(())
}

/// Load a task file and turn it into a validated, acyclic [`TaskGraph`].
///
/// Fails on unreadable or malformed input, unknown `after` references and
/// cycles. Has no side effects, so loading twice yields identical graphs.
pub fn load_graph(path: impl AsRef<Path>) -> Result<TaskGraph> {
    let cfg = load_and_validate(path)?;
    let graph = TaskGraph::from_config(&cfg)?;
    ensure_acyclic(&graph)?;
    Ok(graph)
}

/// Human-readable listing of the resolved graph, in dependency order.
pub fn describe_graph(graph: &TaskGraph) -> String {
    let order: Vec<&TaskNode> = graph
        .topological_order()
        .unwrap_or_else(|| graph.tasks().collect());

    let mut out = format!("taskdag graph ({} tasks)\n\n", graph.len());
    for task in order {
        out.push_str(&describe_task(graph, task));
    }
    out
}

fn describe_task(graph: &TaskGraph, task: &TaskNode) -> String {
    let mut lines = vec![format!("task:  {}", task.name)];
    if let Some(ref descr) = task.description {
        lines.push(format!("descr: {descr}"));
    }
    if !task.after.is_empty() {
        lines.push(format!("  after: {}", task.after.join(", ")));
    }
    lines.push(format!("  cmd: {:?}", task.argv));
    lines.push(format!("  waits for: {}", task.wait_count));

    let dependents = graph.dependents_of(&task.name);
    if !dependents.is_empty() {
        lines.push(format!("  after this we'll run: {}", dependents.join(", ")));
    }
    lines.push("------------------".to_string());

    let mut block = lines.join("\n");
    block.push('\n');
    block
}
