/*
[INPUT]:  API schema definitions and serde requirements
[OUTPUT]: Typed Rust request structs with serialization support
[POS]:    Data layer - type definitions for API communication
[UPDATE]: When API schema changes or new types added
*/

use serde::{Deserialize, Serialize};

/// Body of `POST /api/v1/parse-text`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseRequest {
    pub text: String,
    /// Selected task path joined with ` > `; empty when no task is selected
    #[serde(default)]
    pub task_path: String,
}

impl ParseRequest {
    pub fn new(text: impl Into<String>, task_path: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            task_path: task_path.into(),
        }
    }
}
