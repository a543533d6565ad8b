// tests/cli_args.rs

use std::path::PathBuf;

use clap::Parser;
use taskdag::cli::{CliArgs, LogLevel};
use taskdag::logging::build_filter;
use tracing::level_filters::LevelFilter;

#[test]
fn taskfile_is_required() {
    assert!(CliArgs::try_parse_from(["taskdag"]).is_err());
}

#[test]
fn defaults_run_with_output() {
    let args = CliArgs::try_parse_from(["taskdag", "--taskfile", "Tasks.toml"]).unwrap();

    assert_eq!(args.taskfile, PathBuf::from("Tasks.toml"));
    assert!(!args.show_graph);
    assert!(!args.quiet);
    assert!(args.log_level.is_none());
    assert!(args.runtime_options().show_output);
}

#[test]
fn dry_run_is_an_alias_for_show_graph() {
    let args =
        CliArgs::try_parse_from(["taskdag", "--taskfile", "t.toml", "--dry-run"]).unwrap();
    assert!(args.show_graph);
}

#[test]
fn quiet_hides_output_and_log_level_parses() {
    let args = CliArgs::try_parse_from([
        "taskdag",
        "--taskfile",
        "t.toml",
        "-q",
        "--log-level",
        "debug",
    ])
    .unwrap();

    assert!(!args.runtime_options().show_output);
    assert!(matches!(args.log_level, Some(LogLevel::Debug)));
}

#[test]
fn log_level_flag_overrides_environment() {
    let filter = build_filter(Some(LogLevel::Debug), Some("trace"));
    assert_eq!(filter.max_level_hint(), Some(LevelFilter::DEBUG));

    let filter = build_filter(Some(LogLevel::Error), None);
    assert_eq!(filter.max_level_hint(), Some(LevelFilter::ERROR));
}

#[test]
fn environment_directives_are_honoured() {
    let filter = build_filter(None, Some("warn"));
    assert_eq!(filter.max_level_hint(), Some(LevelFilter::WARN));

    let filter = build_filter(None, Some("taskdag::dag=trace,warn"));
    assert_eq!(filter.max_level_hint(), Some(LevelFilter::TRACE));
}

#[test]
fn missing_or_blank_environment_defaults_to_info() {
    for value in [None, Some(""), Some("   ")] {
        let filter = build_filter(None, value);
        assert_eq!(filter.max_level_hint(), Some(LevelFilter::INFO), "{value:?}");
    }
}
