/*
[INPUT]:  WorkflowState, workflow events, and the task catalog
[OUTPUT]: Validated next WorkflowState or a TransitionError
[POS]:    Workflow domain logic - four-step state machine
[UPDATE]: When steps, events, or transition rules change
*/

use std::fmt;

use thiserror::Error;
use timelog_adapter::{ParseRequest, ParserError, ResultRow};

use crate::catalog::{Catalog, ProjectId};
use crate::tree::TaskPath;

/// Step of the user journey
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Step {
    #[default]
    ProjectSelect,
    TaskSelect,
    LogInput,
    Results,
}

impl Step {
    pub const ALL: [Step; 4] = [
        Step::ProjectSelect,
        Step::TaskSelect,
        Step::LogInput,
        Step::Results,
    ];

    pub fn index(self) -> usize {
        match self {
            Step::ProjectSelect => 0,
            Step::TaskSelect => 1,
            Step::LogInput => 2,
            Step::Results => 3,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Step::ProjectSelect => "1 Project",
            Step::TaskSelect => "2 Task",
            Step::LogInput => "3 Time log",
            Step::Results => "4 Results",
        }
    }
}

/// Identifies one parse submission.
///
/// `generation` is bumped on every reset, so an id issued before a reset can
/// never match a request issued after it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RequestId {
    pub generation: u64,
    pub serial: u64,
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.generation, self.serial)
    }
}

/// Why a parse attempt failed, reduced to what the user is shown
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseFailure {
    /// Server reachable, answered with a non-success status
    Rejected { status: u16, detail: String },
    /// Server unreachable, timed out, or answered with garbage
    Unreachable { cause: String },
}

impl ParseFailure {
    pub fn message(&self) -> String {
        match self {
            ParseFailure::Rejected { status, detail } => format!("Error: {status} - {detail}"),
            ParseFailure::Unreachable { .. } => "An unexpected error occurred.".to_string(),
        }
    }
}

impl From<&ParserError> for ParseFailure {
    fn from(err: &ParserError) -> Self {
        match err {
            ParserError::Api { status, detail } => ParseFailure::Rejected {
                status: *status,
                detail: detail.clone(),
            },
            other => ParseFailure::Unreachable {
                cause: other.to_string(),
            },
        }
    }
}

/// Everything that can move the workflow
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    SelectProject(ProjectId),
    SelectTask(TaskPath),
    Submit {
        text: String,
        request: RequestId,
    },
    ParseSucceeded {
        request: RequestId,
        rows: Vec<ResultRow>,
        warnings: Vec<String>,
    },
    ParseFailed {
        request: RequestId,
        failure: ParseFailure,
    },
    Back,
    Reset,
}

impl Event {
    pub fn name(&self) -> &'static str {
        match self {
            Event::SelectProject(_) => "select-project",
            Event::SelectTask(_) => "select-task",
            Event::Submit { .. } => "submit",
            Event::ParseSucceeded { .. } => "parse-succeeded",
            Event::ParseFailed { .. } => "parse-failed",
            Event::Back => "back",
            Event::Reset => "reset",
        }
    }
}

/// Refused transitions. The state is left untouched when one is returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransitionError {
    #[error("cannot {event} during step {step:?}")]
    InvalidTransition { step: Step, event: &'static str },

    #[error("unknown project id {0}")]
    UnknownProject(ProjectId),

    #[error("task path '{0}' is not a leaf of the selected project")]
    UnknownTaskPath(String),

    #[error("time log text is empty")]
    EmptyText,

    #[error("a parse request is already in flight")]
    RequestPending,

    #[error("ignoring stale response for request {0}")]
    StaleResponse(RequestId),
}

/// Transient selections of one session
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WorkflowState {
    pub step: Step,
    pub selected_project_id: Option<ProjectId>,
    pub selected_task_path: Option<TaskPath>,
    pub raw_log_text: Option<String>,
    pub result_rows: Vec<ResultRow>,
    pub last_error: Option<String>,
    /// In-flight parse request, if any
    pub pending: Option<RequestId>,
    /// Parser warnings delivered with the rows
    pub parse_warnings: Vec<String>,
}

impl WorkflowState {
    pub fn initial() -> Self {
        Self::default()
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Payload for the remote parser built from the current selections
    pub fn parse_request(&self) -> Option<ParseRequest> {
        let text = self.raw_log_text.as_ref()?;
        let task_path = self
            .selected_task_path
            .as_ref()
            .map(TaskPath::joined)
            .unwrap_or_default();
        Some(ParseRequest::new(text.clone(), task_path))
    }

    /// Apply `event`, returning the next state.
    pub fn apply(&self, event: Event, catalog: &Catalog) -> Result<Self, TransitionError> {
        let step = self.step;
        let invalid = |event: &Event| TransitionError::InvalidTransition {
            step,
            event: event.name(),
        };

        match (step, event) {
            (_, Event::Reset) => Ok(Self::initial()),

            (Step::ProjectSelect, Event::SelectProject(id)) => {
                if catalog.project(id).is_none() {
                    return Err(TransitionError::UnknownProject(id));
                }
                Ok(Self {
                    step: Step::TaskSelect,
                    selected_project_id: Some(id),
                    selected_task_path: None,
                    ..self.clone()
                })
            }

            (Step::TaskSelect, Event::SelectTask(path)) => {
                let tasks = self
                    .selected_project_id
                    .map(|id| catalog.tasks_for(id))
                    .unwrap_or(&[]);
                if !path.resolves_in(tasks) {
                    return Err(TransitionError::UnknownTaskPath(path.joined()));
                }
                Ok(Self {
                    step: Step::LogInput,
                    selected_task_path: Some(path),
                    ..self.clone()
                })
            }

            (Step::LogInput, Event::Submit { text, request }) => {
                if self.is_pending() {
                    return Err(TransitionError::RequestPending);
                }
                if text.trim().is_empty() {
                    return Err(TransitionError::EmptyText);
                }
                Ok(Self {
                    raw_log_text: Some(text),
                    pending: Some(request),
                    last_error: None,
                    ..self.clone()
                })
            }

            (
                Step::LogInput,
                Event::ParseSucceeded {
                    request,
                    rows,
                    warnings,
                },
            ) if self.pending == Some(request) => Ok(Self {
                step: Step::Results,
                result_rows: rows,
                parse_warnings: warnings,
                pending: None,
                last_error: None,
                ..self.clone()
            }),

            (Step::LogInput, Event::ParseFailed { request, failure })
                if self.pending == Some(request) =>
            {
                Ok(Self {
                    pending: None,
                    last_error: Some(failure.message()),
                    ..self.clone()
                })
            }

            (_, Event::ParseSucceeded { request, .. } | Event::ParseFailed { request, .. }) => {
                Err(TransitionError::StaleResponse(request))
            }

            (Step::TaskSelect, Event::Back) => Ok(Self::initial()),

            (Step::LogInput, Event::Back) => {
                if self.is_pending() {
                    return Err(TransitionError::RequestPending);
                }
                Ok(Self {
                    step: Step::TaskSelect,
                    selected_task_path: None,
                    last_error: None,
                    ..self.clone()
                })
            }

            (Step::Results, Event::Back) => Ok(Self {
                step: Step::LogInput,
                result_rows: Vec::new(),
                parse_warnings: Vec::new(),
                ..self.clone()
            }),

            (_, event) => Err(invalid(&event)),
        }
    }
}
