// src/dag/graph.rs

use std::collections::{HashMap, HashSet};

use petgraph::Direction;
use petgraph::algo::toposort;
use petgraph::graph::{DiGraph, NodeIndex};
use tracing::{debug, warn};

use crate::config::model::ConfigFile;
use crate::dag::signal::{CompletionPublisher, CompletionWaiter};
use crate::errors::{Result, TaskdagError};
use crate::types::TaskName;

/// A declared task plus the derived fields the scheduler needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskNode {
    pub name: TaskName,
    /// Prerequisites in declaration order, duplicates removed.
    pub after: Vec<TaskName>,
    /// Program followed by its arguments.
    pub argv: Vec<String>,
    pub description: Option<String>,
    /// Number of prerequisite signals this task waits for (`after.len()`).
    pub wait_count: usize,
}

/// Completion wiring for one task, handed to its worker.
#[derive(Debug)]
pub struct TaskSignals {
    /// Resolved by this task's worker once it has reported.
    pub publisher: CompletionPublisher,
    /// One waiter per prerequisite, in `after` order.
    pub prerequisites: Vec<CompletionWaiter>,
}

/// Resolved dependency graph.
///
/// Nodes are owned by a single `petgraph` store and addressed by index.
/// Edges point from a prerequisite to its dependent: for
///
/// ```toml
/// [task.B]
/// after = ["A"]
/// ```
///
/// there is an edge A -> B. Nodes are inserted in name order, so node
/// indices are stable for a given task file.
#[derive(Debug, Clone)]
pub struct TaskGraph {
    graph: DiGraph<TaskNode, ()>,
    index: HashMap<TaskName, NodeIndex>,
}

impl TaskGraph {
    /// Build the graph from a validated [`ConfigFile`].
    ///
    /// Every `after` entry must name a declared task; the first one that does
    /// not is reported as [`TaskdagError::DanglingReference`]. This does not
    /// check for cycles, see [`crate::dag::ensure_acyclic`].
    pub fn from_config(cfg: &ConfigFile) -> Result<Self> {
        let mut graph: DiGraph<TaskNode, ()> = DiGraph::with_capacity(cfg.len(), 0);
        let mut index: HashMap<TaskName, NodeIndex> = HashMap::with_capacity(cfg.len());

        // First pass: one node per declared task.
        for (name, task) in cfg.tasks().iter() {
            let mut seen = HashSet::new();
            let mut after = Vec::with_capacity(task.after.len());
            for dep in task.after.iter() {
                if seen.insert(dep.as_str()) {
                    after.push(dep.clone());
                } else {
                    warn!(task = %name, dep = %dep, "duplicate entry in `after`; counting it once");
                }
            }

            let node = graph.add_node(TaskNode {
                name: name.clone(),
                after,
                argv: task.cmd.argv(),
                description: task.descr.clone(),
                wait_count: 0,
            });
            index.insert(name.clone(), node);
        }

        // Second pass: T waits on P, P notifies T.
        let nodes: Vec<NodeIndex> = graph.node_indices().collect();
        for node in nodes {
            let after = graph[node].after.clone();
            for dep in after {
                let Some(&dep_node) = index.get(&dep) else {
                    return Err(TaskdagError::DanglingReference {
                        task: graph[node].name.clone(),
                        missing: dep,
                    });
                };
                graph.add_edge(dep_node, node, ());
                graph[node].wait_count += 1;
            }
        }

        debug!(
            tasks = graph.node_count(),
            edges = graph.edge_count(),
            "task graph built"
        );

        Ok(Self { graph, index })
    }

    pub fn len(&self) -> usize {
        self.graph.node_count()
    }

    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    /// All tasks, in name order.
    pub fn tasks(&self) -> impl Iterator<Item = &TaskNode> {
        self.graph.node_weights()
    }

    /// All task names, in name order.
    pub fn task_names(&self) -> impl Iterator<Item = &str> {
        self.tasks().map(|t| t.name.as_str())
    }

    pub fn task(&self, name: &str) -> Option<&TaskNode> {
        self.index.get(name).map(|&node| &self.graph[node])
    }

    pub fn wait_count(&self, name: &str) -> Option<usize> {
        self.task(name).map(|t| t.wait_count)
    }

    /// Immediate prerequisites of a task (its `after` list).
    pub fn dependencies_of(&self, name: &str) -> &[TaskName] {
        self.task(name).map(|t| t.after.as_slice()).unwrap_or(&[])
    }

    /// Tasks that list `name` in their `after`, sorted by name.
    pub fn dependents_of(&self, name: &str) -> Vec<&str> {
        let Some(&node) = self.index.get(name) else {
            return Vec::new();
        };
        let mut dependents: Vec<&str> = self
            .graph
            .neighbors_directed(node, Direction::Outgoing)
            .map(|n| self.graph[n].name.as_str())
            .collect();
        dependents.sort_unstable();
        dependents
    }

    /// Tasks with no prerequisites.
    pub fn roots(&self) -> Vec<&str> {
        self.tasks()
            .filter(|t| t.wait_count == 0)
            .map(|t| t.name.as_str())
            .collect()
    }

    /// Tasks in an order where every task follows all of its prerequisites.
    ///
    /// Returns `None` if the graph contains a cycle.
    pub fn topological_order(&self) -> Option<Vec<&TaskNode>> {
        toposort(&self.graph, None)
            .ok()
            .map(|order| order.into_iter().map(|n| &self.graph[n]).collect())
    }

    /// Allocate a fresh completion signal per task and subscribe each task to
    /// the signals of its prerequisites.
    ///
    /// The returned vector is parallel to [`TaskGraph::tasks`]. Each
    /// publisher ends up with exactly one subscriber per dependent.
    pub fn allocate_signals(&self) -> Vec<TaskSignals> {
        let publishers: Vec<CompletionPublisher> =
            self.graph.node_indices().map(|_| CompletionPublisher::new()).collect();

        let waiters: Vec<Vec<CompletionWaiter>> = self
            .graph
            .node_weights()
            .map(|task| {
                task.after
                    .iter()
                    .filter_map(|dep| self.index.get(dep))
                    .map(|dep_node| publishers[dep_node.index()].subscribe())
                    .collect()
            })
            .collect();

        publishers
            .into_iter()
            .zip(waiters)
            .map(|(publisher, prerequisites)| TaskSignals {
                publisher,
                prerequisites,
            })
            .collect()
    }

    /// Underlying petgraph store, for traversals.
    pub(crate) fn inner(&self) -> &DiGraph<TaskNode, ()> {
        &self.graph
    }
}
