// src/config/model.rs

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::types::TaskName;

/// Top-level task file as read from TOML, before semantic validation.
///
/// ```toml
/// [task.fetch]
/// cmd = ["git", "fetch"]
/// descr = "update sources"
///
/// [task.build]
/// cmd = ["cargo", "build"]
/// after = ["fetch"]
/// ```
///
/// Keys of `task` are the *task names*; a task's name is never stored again
/// inside its own record.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct RawConfigFile {
    #[serde(default)]
    pub task: BTreeMap<TaskName, TaskConfig>,
}

/// Validated task file.
///
/// Only obtainable through `ConfigFile::try_from(RawConfigFile)` (see
/// `config::validate`), so holders can rely on every task having a runnable
/// command.
#[derive(Debug, Clone)]
pub struct ConfigFile {
    task: BTreeMap<TaskName, TaskConfig>,
}

impl ConfigFile {
    pub(crate) fn new_unchecked(task: BTreeMap<TaskName, TaskConfig>) -> Self {
        Self { task }
    }

    /// All declared tasks, keyed and ordered by name.
    pub fn tasks(&self) -> &BTreeMap<TaskName, TaskConfig> {
        &self.task
    }

    pub fn len(&self) -> usize {
        self.task.len()
    }

    pub fn is_empty(&self) -> bool {
        self.task.is_empty()
    }
}

/// `[task.<name>]` section.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct TaskConfig {
    /// Tasks that must finish before this one may run.
    #[serde(default)]
    pub after: Vec<TaskName>,

    /// The command to execute.
    pub cmd: CommandSpec,

    /// Free text; only shown by `--show-graph`.
    #[serde(default)]
    pub descr: Option<String>,
}

/// Either an explicit argument vector or a single shell line.
///
/// `cmd = ["make", "-j4"]` runs `make` directly; `cmd = "make -j4 && echo ok"`
/// is handed to the platform shell.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum CommandSpec {
    Argv(Vec<String>),
    Shell(String),
}

impl CommandSpec {
    /// Resolve to the argument vector handed to the command runner.
    pub fn argv(&self) -> Vec<String> {
        match self {
            CommandSpec::Argv(argv) => argv.clone(),
            CommandSpec::Shell(line) => {
                if cfg!(windows) {
                    vec!["cmd".to_string(), "/C".to_string(), line.clone()]
                } else {
                    vec!["sh".to_string(), "-c".to_string(), line.clone()]
                }
            }
        }
    }

    /// True when there is nothing to execute.
    pub fn is_blank(&self) -> bool {
        match self {
            CommandSpec::Argv(argv) => argv.first().is_none_or(|prog| prog.trim().is_empty()),
            CommandSpec::Shell(line) => line.trim().is_empty(),
        }
    }
}

impl From<Vec<String>> for CommandSpec {
    fn from(argv: Vec<String>) -> Self {
        CommandSpec::Argv(argv)
    }
}

impl From<&[&str]> for CommandSpec {
    fn from(argv: &[&str]) -> Self {
        CommandSpec::Argv(argv.iter().map(|s| s.to_string()).collect())
    }
}
