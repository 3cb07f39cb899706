/*
[INPUT]:  Static project/task catalog file (JSON or YAML)
[OUTPUT]: Validated, immutable project -> task tree model
[POS]:    Data layer - task tree model loaded once at startup
[UPDATE]: When the catalog schema or validation rules change
*/

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub type ProjectId = i64;

/// One node of the task hierarchy. Depth is unbounded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtasks: Option<Vec<Task>>,
}

impl Task {
    pub fn leaf(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            subtasks: None,
        }
    }

    pub fn branch(name: impl Into<String>, subtasks: Vec<Task>) -> Self {
        Self {
            name: name.into(),
            subtasks: Some(subtasks),
        }
    }

    /// A task without subtasks, or with an empty list, is a leaf
    pub fn is_leaf(&self) -> bool {
        self.subtasks.as_ref().is_none_or(Vec::is_empty)
    }

    pub fn children(&self) -> &[Task] {
        self.subtasks.as_deref().unwrap_or(&[])
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub id: ProjectId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub tasks: Vec<Task>,
}

/// Errors raised while loading the catalog. All of them are fatal at startup.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read catalog {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid catalog JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid catalog YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("unsupported catalog format: {0} (expected .json, .yaml or .yml)")]
    UnsupportedFormat(String),

    #[error("invalid catalog: {0}")]
    Invalid(String),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum CatalogFile {
    Wrapped { projects: Vec<Project> },
    Bare(Vec<Project>),
}

impl CatalogFile {
    fn into_projects(self) -> Vec<Project> {
        match self {
            CatalogFile::Wrapped { projects } => projects,
            CatalogFile::Bare(projects) => projects,
        }
    }
}

/// All projects known to the process. Read-only after construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    projects: Vec<Project>,
}

impl Catalog {
    /// Build a catalog from already-parsed projects, validating them
    pub fn new(projects: Vec<Project>) -> Result<Self, CatalogError> {
        validate(&projects)?;
        Ok(Self { projects })
    }

    /// Load a catalog file; the format is chosen by extension
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();

        let content = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let catalog = match extension.as_str() {
            "json" => Self::from_json_str(&content)?,
            "yaml" | "yml" => Self::from_yaml_str(&content)?,
            other => return Err(CatalogError::UnsupportedFormat(other.to_string())),
        };

        tracing::info!(
            path = %path.display(),
            projects = catalog.projects.len(),
            "catalog loaded"
        );
        Ok(catalog)
    }

    pub fn from_json_str(content: &str) -> Result<Self, CatalogError> {
        let file: CatalogFile = serde_json::from_str(content)?;
        Self::new(file.into_projects())
    }

    pub fn from_yaml_str(content: &str) -> Result<Self, CatalogError> {
        let file: CatalogFile = serde_yaml::from_str(content)?;
        Self::new(file.into_projects())
    }

    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    pub fn project(&self, id: ProjectId) -> Option<&Project> {
        self.projects.iter().find(|project| project.id == id)
    }

    /// Top-level tasks of a project; empty for an unknown id
    pub fn tasks_for(&self, id: ProjectId) -> &[Task] {
        self.project(id)
            .map(|project| project.tasks.as_slice())
            .unwrap_or(&[])
    }
}

fn validate(projects: &[Project]) -> Result<(), CatalogError> {
    if projects.is_empty() {
        return Err(CatalogError::Invalid("catalog contains no projects".to_string()));
    }

    let mut seen = HashSet::new();
    for project in projects {
        if !seen.insert(project.id) {
            return Err(CatalogError::Invalid(format!(
                "duplicate project id {}",
                project.id
            )));
        }
        if project.name.trim().is_empty() {
            return Err(CatalogError::Invalid(format!(
                "project {} has an empty name",
                project.id
            )));
        }
        if project.tasks.is_empty() {
            return Err(CatalogError::Invalid(format!(
                "project {} ({}) has no tasks",
                project.id, project.name
            )));
        }
        validate_tasks(&project.tasks, &project.name)?;
    }
    Ok(())
}

fn validate_tasks(tasks: &[Task], parent: &str) -> Result<(), CatalogError> {
    for task in tasks {
        if task.name.trim().is_empty() {
            return Err(CatalogError::Invalid(format!(
                "task with an empty name under '{parent}'"
            )));
        }
        validate_tasks(task.children(), &task.name)?;
    }
    Ok(())
}
