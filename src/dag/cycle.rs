// src/dag/cycle.rs

//! Pre-flight cycle detection.
//!
//! Three-colour depth-first search over the "dependents" edges, started from
//! every task in name order so disconnected components are covered. A task is
//! `OnPath` while it sits on the current root-to-node path and `Done` once
//! all of its dependents have been explored. Meeting an `OnPath` task again is
//! a cycle; meeting a `Done` task is just a shared descendant (diamond) and is
//! skipped. Each node and edge is visited once overall.

use petgraph::Direction;
use petgraph::graph::{DiGraph, NodeIndex};
use tracing::debug;

use crate::dag::graph::{TaskGraph, TaskNode};
use crate::errors::{Result, TaskdagError};
use crate::types::TaskName;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mark {
    Unvisited,
    OnPath,
    Done,
}

/// Fail with [`TaskdagError::DagCycle`] if the graph is not a DAG.
pub fn ensure_acyclic(graph: &TaskGraph) -> Result<()> {
    match find_cycle(graph) {
        Some(path) => Err(TaskdagError::DagCycle { path }),
        None => {
            debug!(tasks = graph.len(), "task graph is acyclic");
            Ok(())
        }
    }
}

/// Return the first cycle found, if any.
///
/// The returned path starts at the traversal root and ends with the task
/// that was reached a second time, e.g. `["A", "B", "A"]`.
pub fn find_cycle(graph: &TaskGraph) -> Option<Vec<TaskName>> {
    let g = graph.inner();
    let mut marks = vec![Mark::Unvisited; g.node_count()];
    // Current path: each frame is a node plus the cursor into its dependents.
    let mut stack: Vec<(NodeIndex, Vec<NodeIndex>, usize)> = Vec::new();

    for root in g.node_indices() {
        if marks[root.index()] != Mark::Unvisited {
            continue;
        }

        marks[root.index()] = Mark::OnPath;
        stack.push((root, dependents(g, root), 0));

        while let Some((node, children, cursor)) = stack.last_mut() {
            let Some(&child) = children.get(*cursor) else {
                marks[node.index()] = Mark::Done;
                stack.pop();
                continue;
            };
            *cursor += 1;

            match marks[child.index()] {
                Mark::Done => {}
                Mark::OnPath => {
                    let mut path: Vec<TaskName> =
                        stack.iter().map(|(n, _, _)| g[*n].name.clone()).collect();
                    path.push(g[child].name.clone());
                    return Some(path);
                }
                Mark::Unvisited => {
                    marks[child.index()] = Mark::OnPath;
                    stack.push((child, dependents(g, child), 0));
                }
            }
        }
    }

    None
}

fn dependents(g: &DiGraph<TaskNode, ()>, node: NodeIndex) -> Vec<NodeIndex> {
    let mut out: Vec<NodeIndex> = g.neighbors_directed(node, Direction::Outgoing).collect();
    out.sort_unstable();
    out
}
