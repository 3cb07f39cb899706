/*
[INPUT]:  Public API exports for timelog-workflow crate
[OUTPUT]: Module declarations and public re-exports
[POS]:    Crate root - library entry point
[UPDATE]: When adding new modules or public exports
*/

pub mod catalog;
pub mod config;
pub mod export;
pub mod session;
pub mod tree;
pub mod workflow;

// Re-export main types for convenience
pub use catalog::{Catalog, CatalogError, Project, ProjectId, Task};
pub use config::AppConfig;
pub use export::{ExportArtifact, ExportError, export_artifact, to_delimited_text, write_export};
pub use session::{PendingParse, Session};
pub use tree::{PATH_SEPARATOR, TaskPath, enumerate_leaf_paths, filter_tasks};
pub use workflow::{Event, ParseFailure, RequestId, Step, TransitionError, WorkflowState};
