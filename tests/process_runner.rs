// tests/process_runner.rs
#![cfg(unix)]

mod common;
use crate::common::{init_tracing, with_timeout};

use std::io::Write;
use std::sync::Arc;

use tempfile::NamedTempFile;

use taskdag::dag::Scheduler;
use taskdag::engine::{MemorySink, Runtime};
use taskdag::exec::{ProcessRunner, run_command};
use taskdag::types::TaskStatus;

fn argv(parts: &[&str]) -> Vec<String> {
    parts.iter().map(|s| s.to_string()).collect()
}

#[tokio::test]
async fn exit_status_decides_success() {
    init_tracing();

    let ok = with_timeout(run_command(&argv(&["true"]))).await;
    assert!(ok.success);

    let bad = with_timeout(run_command(&argv(&["false"]))).await;
    assert!(!bad.success);
    assert!(bad.output.contains("exit status: 1"), "{:?}", bad.output);
}

#[tokio::test]
async fn captures_stdout_and_stderr_together() {
    init_tracing();

    let out = with_timeout(run_command(&argv(&[
        "sh",
        "-c",
        "echo to-out; echo to-err 1>&2",
    ])))
    .await;

    assert!(out.success);
    assert!(out.output.contains("to-out\n"));
    assert!(out.output.contains("to-err\n"));
}

#[tokio::test]
async fn missing_program_is_a_failure_with_the_error_text() {
    init_tracing();

    let out = with_timeout(run_command(&argv(&["taskdag-no-such-program-xyz"]))).await;

    assert!(!out.success);
    assert!(
        out.output.contains("taskdag-no-such-program-xyz"),
        "{:?}",
        out.output
    );
}

#[tokio::test]
async fn empty_argv_is_a_failure() {
    let out = run_command(&[]).await;
    assert!(!out.success);
    assert!(out.output.contains("empty command"));
}

#[tokio::test]
async fn task_file_runs_end_to_end() {
    init_tracing();

    let mut file = NamedTempFile::new().unwrap();
    write!(
        file,
        r#"
[task.prepare]
cmd = ["echo", "prepared"]

[task.build]
cmd = "echo building && exit 3"
after = ["prepare"]

[task.package]
cmd = ["echo", "packaged"]
after = ["build"]

[task.lint]
cmd = ["sh", "-c", "echo lint ok"]
after = ["prepare"]
"#
    )
    .unwrap();

    let graph = taskdag::load_graph(file.path()).unwrap();
    let scheduler = Scheduler::new(graph, Arc::new(ProcessRunner::new()));
    let mut runtime = Runtime::new(scheduler, MemorySink::default());
    let summary = with_timeout(runtime.run()).await;

    assert_eq!(summary.total(), 4);

    let prepare = summary.report("prepare").unwrap();
    assert_eq!(prepare.status, TaskStatus::Succeeded);
    assert_eq!(prepare.output, "prepared\n");

    let build = summary.report("build").unwrap();
    assert_eq!(build.status, TaskStatus::Failed);
    assert!(build.output.contains("building"));
    assert!(build.output.contains("exit status: 3"));

    assert_eq!(summary.report("package").unwrap().status, TaskStatus::Skipped);
    assert_eq!(summary.report("lint").unwrap().status, TaskStatus::Succeeded);
    assert!(summary.report("lint").unwrap().output.contains("lint ok"));
}
