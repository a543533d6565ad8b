// tests/graph_building.rs

mod common;
use crate::common::init_tracing;

use std::error::Error;
use std::io::Write;

use tempfile::NamedTempFile;

use taskdag::dag::TaskGraph;
use taskdag::errors::TaskdagError;
use taskdag_test_utils::builders::{ConfigFileBuilder, TaskConfigBuilder};

type TestResult = Result<(), Box<dyn Error>>;

/// A, B independent; C after A and B; D after C.
fn diamond() -> ConfigFileBuilder {
    ConfigFileBuilder::new()
        .with_task("A", TaskConfigBuilder::echo("A").build())
        .with_task("B", TaskConfigBuilder::echo("B").build())
        .with_task("C", TaskConfigBuilder::echo("C").after("A").after("B").build())
        .with_task("D", TaskConfigBuilder::echo("D").after("C").build())
}

#[test]
fn wait_count_is_number_of_own_prerequisites() -> TestResult {
    init_tracing();
    let graph = diamond().build_graph();

    assert_eq!(graph.len(), 4);
    assert_eq!(graph.wait_count("A"), Some(0));
    assert_eq!(graph.wait_count("B"), Some(0));
    assert_eq!(graph.wait_count("C"), Some(2));
    assert_eq!(graph.wait_count("D"), Some(1));
    assert_eq!(graph.wait_count("nope"), None);

    Ok(())
}

#[test]
fn dependents_are_the_tasks_that_wait_on_you() -> TestResult {
    init_tracing();
    let graph = diamond().build_graph();

    assert_eq!(graph.dependents_of("A"), vec!["C"]);
    assert_eq!(graph.dependents_of("B"), vec!["C"]);
    assert_eq!(graph.dependents_of("C"), vec!["D"]);
    assert!(graph.dependents_of("D").is_empty());

    assert_eq!(graph.dependencies_of("C"), ["A".to_string(), "B".to_string()]);
    assert_eq!(graph.roots(), vec!["A", "B"]);

    Ok(())
}

#[test]
fn fan_out_wait_count_does_not_depend_on_dependents() -> TestResult {
    let graph = ConfigFileBuilder::new()
        .with_task("root", TaskConfigBuilder::echo("root").build())
        .with_task("x", TaskConfigBuilder::echo("x").after("root").build())
        .with_task("y", TaskConfigBuilder::echo("y").after("root").build())
        .with_task("z", TaskConfigBuilder::echo("z").after("root").build())
        .build_graph();

    assert_eq!(graph.wait_count("root"), Some(0));
    assert_eq!(graph.dependents_of("root"), vec!["x", "y", "z"]);

    Ok(())
}

#[test]
fn allocated_signals_match_wait_counts_and_dependents() -> TestResult {
    let graph = diamond().build_graph();
    let signals = graph.allocate_signals();

    assert_eq!(signals.len(), graph.len());
    for (task, signal) in graph.tasks().zip(signals.iter()) {
        assert_eq!(signal.prerequisites.len(), task.wait_count, "task {}", task.name);
        assert_eq!(
            signal.publisher.subscriber_count(),
            graph.dependents_of(&task.name).len(),
            "task {}",
            task.name
        );
    }

    Ok(())
}

#[test]
fn duplicate_after_entries_are_counted_once() -> TestResult {
    let graph = ConfigFileBuilder::new()
        .with_task("A", TaskConfigBuilder::echo("A").build())
        .with_task("B", TaskConfigBuilder::echo("B").after("A").after("A").build())
        .build_graph();

    assert_eq!(graph.wait_count("B"), Some(1));
    assert_eq!(graph.dependencies_of("B"), ["A".to_string()]);
    assert_eq!(graph.dependents_of("A"), vec!["B"]);

    Ok(())
}

#[test]
fn dangling_reference_is_rejected_at_build_time() -> TestResult {
    let cfg = ConfigFileBuilder::new()
        .with_task("X", TaskConfigBuilder::echo("X").after("nonexistent").build())
        .build();

    match TaskGraph::from_config(&cfg) {
        Err(TaskdagError::DanglingReference { task, missing }) => {
            assert_eq!(task, "X");
            assert_eq!(missing, "nonexistent");
        }
        Err(e) => panic!("Expected DanglingReference, got: {:?}", e),
        Ok(_) => panic!("Expected error, got Ok"),
    }

    Ok(())
}

#[test]
fn dangling_reference_from_file_fails_load() -> TestResult {
    let mut file = NamedTempFile::new()?;
    write!(
        file,
        r#"
[task.X]
cmd = ["echo", "X"]
after = ["nonexistent"]
"#
    )?;

    let err = taskdag::load_graph(file.path()).expect_err("dangling reference must fail");
    assert!(matches!(err, TaskdagError::DanglingReference { .. }));
    assert!(err.to_string().contains("nonexistent"));

    Ok(())
}

#[test]
fn loading_twice_yields_identical_graphs() -> TestResult {
    let mut file = NamedTempFile::new()?;
    write!(
        file,
        r#"
[task.A]
cmd = ["echo", "A"]

[task.B]
cmd = ["echo", "B"]

[task.C]
cmd = ["echo", "C"]
after = ["A", "B"]

[task.D]
cmd = "echo D"
after = ["C"]
descr = "last"
"#
    )?;

    let first = taskdag::load_graph(file.path())?;
    let second = taskdag::load_graph(file.path())?;

    let first_nodes: Vec<_> = first.tasks().cloned().collect();
    let second_nodes: Vec<_> = second.tasks().cloned().collect();
    assert_eq!(first_nodes, second_nodes);

    for name in first.task_names() {
        assert_eq!(first.wait_count(name), second.wait_count(name));
        assert_eq!(first.dependents_of(name), second.dependents_of(name));
    }

    Ok(())
}

#[test]
fn describe_graph_lists_prerequisites_commands_and_dependents() -> TestResult {
    let graph = diamond()
        .with_task(
            "E",
            TaskConfigBuilder::new(&["make", "-j4"]).descr("build things").build(),
        )
        .build_graph();

    let text = taskdag::describe_graph(&graph);

    assert!(text.contains("taskdag graph (5 tasks)"));
    assert!(text.contains("task:  C"));
    assert!(text.contains("after: A, B"));
    assert!(text.contains("after this we'll run: C"));
    assert!(text.contains("descr: build things"));
    assert!(text.contains(r#"cmd: ["make", "-j4"]"#));

    // Prerequisites are listed before their dependents.
    let pos = |needle: &str| text.find(needle).unwrap();
    assert!(pos("task:  A") < pos("task:  C"));
    assert!(pos("task:  B") < pos("task:  C"));
    assert!(pos("task:  C") < pos("task:  D"));

    Ok(())
}

#[test]
fn describe_graph_renders_one_block_per_task() {
    let graph = ConfigFileBuilder::new()
        .with_task("fetch", TaskConfigBuilder::new(&["git", "fetch"]).build())
        .with_task("build", TaskConfigBuilder::echo("build").after("fetch").build())
        .build_graph();

    assert_eq!(
        taskdag::describe_graph(&graph),
        "taskdag graph (2 tasks)\n\
         \n\
         task:  fetch\n  \
         cmd: [\"git\", \"fetch\"]\n  \
         waits for: 0\n  \
         after this we'll run: build\n\
         ------------------\n\
         task:  build\n  \
         after: fetch\n  \
         cmd: [\"echo\", \"build\"]\n  \
         waits for: 1\n\
         ------------------\n"
    );
}
