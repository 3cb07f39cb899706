/*
[INPUT]:  Task trees from the catalog and free-text search queries
[OUTPUT]: Filtered trees and root-to-leaf TaskPaths
[POS]:    Navigation layer - hierarchy search/filter and leaf-path enumeration
[UPDATE]: When filter policy or path representation changes
*/

use std::fmt;

use crate::catalog::Task;

/// Separator used when a path is displayed or sent to the parser
pub const PATH_SEPARATOR: &str = " > ";

/// Root-to-leaf chain of task names; the only dependable task identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TaskPath(Vec<String>);

impl TaskPath {
    pub fn new<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(segments.into_iter().map(Into::into).collect())
    }

    /// Parse a path in its joined form (`A > B > C`).
    ///
    /// Only the full separator splits, so names such as `Input->Output` stay whole.
    pub fn parse(joined: &str) -> Self {
        Self::new(
            joined
                .trim()
                .split(PATH_SEPARATOR)
                .map(str::trim)
                .filter(|segment| !segment.is_empty()),
        )
    }

    pub fn segments(&self) -> &[String] {
        &self.0
    }

    /// Last name of the path, i.e. the selected leaf task
    pub fn leaf(&self) -> Option<&str> {
        self.0.last().map(String::as_str)
    }

    pub fn depth(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn joined(&self) -> String {
        self.0.join(PATH_SEPARATOR)
    }

    /// Whether this path is a walk from a root task to a leaf in `tasks`
    pub fn resolves_in(&self, tasks: &[Task]) -> bool {
        walk(tasks, &self.0)
    }
}

impl fmt::Display for TaskPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.joined())
    }
}

// Names are not unique among siblings, so every same-named sibling is tried.
fn walk(tasks: &[Task], segments: &[String]) -> bool {
    let Some((head, rest)) = segments.split_first() else {
        return false;
    };
    tasks
        .iter()
        .filter(|task| &task.name == head)
        .any(|task| {
            if rest.is_empty() {
                task.is_leaf()
            } else {
                walk(task.children(), rest)
            }
        })
}

/// Prune `tasks` to the nodes whose name contains `query` (case-insensitive).
///
/// A matching task keeps its full, unfiltered subtree. A non-matching task is
/// kept only when some descendant matches, and then carries just the
/// filtered descendants. An empty query returns the input unchanged.
pub fn filter_tasks(tasks: &[Task], query: &str) -> Vec<Task> {
    let needle = query.to_lowercase();
    if needle.is_empty() {
        return tasks.to_vec();
    }
    tasks
        .iter()
        .filter_map(|task| filter_task(task, &needle))
        .collect()
}

fn filter_task(task: &Task, needle: &str) -> Option<Task> {
    if task.name.to_lowercase().contains(needle) {
        return Some(task.clone());
    }

    let kept: Vec<Task> = task
        .children()
        .iter()
        .filter_map(|child| filter_task(child, needle))
        .collect();

    if kept.is_empty() {
        None
    } else {
        Some(Task::branch(task.name.clone(), kept))
    }
}

/// Every root-to-leaf path in pre-order, left to right.
pub fn enumerate_leaf_paths(tasks: &[Task]) -> Vec<TaskPath> {
    let mut paths = Vec::new();
    let mut prefix = Vec::new();
    collect_leaf_paths(tasks, &mut prefix, &mut paths);
    paths
}

fn collect_leaf_paths(tasks: &[Task], prefix: &mut Vec<String>, paths: &mut Vec<TaskPath>) {
    for task in tasks {
        prefix.push(task.name.clone());
        if task.is_leaf() {
            paths.push(TaskPath(prefix.clone()));
        } else {
            collect_leaf_paths(task.children(), prefix, paths);
        }
        prefix.pop();
    }
}
