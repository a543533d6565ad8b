// src/errors.rs

//! Crate-wide error type and result alias.
//!
//! Every variant here is fatal and is raised before any task runs. A task
//! whose command fails, or which is skipped because something upstream
//! failed, is *not* an error: see [`crate::types::TaskStatus`].

use std::path::PathBuf;

use thiserror::Error;

use crate::types::TaskName;

#[derive(Error, Debug)]
pub enum TaskdagError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error reading {}: {source}", .path.display())]
    IoError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    /// An `after` entry names a task that was never declared.
    #[error("task '{task}' is declared to run after unknown task '{missing}'")]
    DanglingReference { task: TaskName, missing: TaskName },

    /// The `after` relation loops back on itself. `path` is the traversal
    /// path from the root it was found under, ending with the repeated task.
    #[error("cycle detected in task graph: {}", .path.join(" -> "))]
    DagCycle { path: Vec<TaskName> },

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl TaskdagError {
    /// True for the "input unreadable or malformed" family.
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            TaskdagError::ConfigError(_) | TaskdagError::IoError { .. } | TaskdagError::TomlError(_)
        )
    }
}

pub use anyhow::Error;
pub type Result<T> = std::result::Result<T, TaskdagError>;
