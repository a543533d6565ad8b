#![allow(dead_code)]

use std::collections::BTreeMap;

use taskdag::config::{CommandSpec, ConfigFile, RawConfigFile, TaskConfig};
use taskdag::dag::{TaskGraph, ensure_acyclic};
use taskdag::errors::Result;

/// Builder for `ConfigFile` to simplify test setup.
pub struct ConfigFileBuilder {
    config: RawConfigFile,
}

impl ConfigFileBuilder {
    pub fn new() -> Self {
        Self {
            config: RawConfigFile {
                task: BTreeMap::new(),
            },
        }
    }

    pub fn with_task(mut self, name: &str, task: TaskConfig) -> Self {
        self.config.task.insert(name.to_string(), task);
        self
    }

    pub fn try_build(self) -> Result<ConfigFile> {
        ConfigFile::try_from(self.config)
    }

    pub fn build(self) -> ConfigFile {
        self.try_build()
            .expect("Failed to build valid config from builder")
    }

    /// Build the graph and run the cycle check, as `taskdag::load_graph` does.
    pub fn try_build_graph(self) -> Result<TaskGraph> {
        let cfg = self.try_build()?;
        let graph = TaskGraph::from_config(&cfg)?;
        ensure_acyclic(&graph)?;
        Ok(graph)
    }

    pub fn build_graph(self) -> TaskGraph {
        self.try_build_graph()
            .expect("Failed to build acyclic graph from builder")
    }
}

impl Default for ConfigFileBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for `TaskConfig`.
pub struct TaskConfigBuilder {
    task: TaskConfig,
}

impl TaskConfigBuilder {
    pub fn new(argv: &[&str]) -> Self {
        Self {
            task: TaskConfig {
                after: vec![],
                cmd: CommandSpec::from(argv),
                descr: None,
            },
        }
    }

    /// `echo <word>`: the command the fake runner keys on is `"echo <word>"`.
    pub fn echo(word: &str) -> Self {
        Self::new(&["echo", word])
    }

    pub fn after(mut self, dep: &str) -> Self {
        self.task.after.push(dep.to_string());
        self
    }

    pub fn descr(mut self, text: &str) -> Self {
        self.task.descr = Some(text.to_string());
        self
    }

    pub fn build(self) -> TaskConfig {
        self.task
    }
}
