/*
[INPUT]:  User intents, parser outcomes, and the shared catalog
[OUTPUT]: Current WorkflowState plus request bookkeeping
[POS]:    Workflow driver - owns one user's session and talks to the parser
[UPDATE]: When request tracking or session lifecycle changes
*/

use std::sync::Arc;

use timelog_adapter::{ParseRequest, ParseResponse, ParserError, RemoteParser};
use tracing::{debug, info, warn};

use crate::catalog::{Catalog, Project, ProjectId};
use crate::export::{ExportArtifact, export_artifact};
use crate::tree::{TaskPath, enumerate_leaf_paths, filter_tasks};
use crate::workflow::{Event, ParseFailure, RequestId, TransitionError, WorkflowState};

/// A submission accepted by the state machine and ready to be sent
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingParse {
    pub request: RequestId,
    pub payload: ParseRequest,
}

/// One interactive session over a shared, read-only catalog.
///
/// Completions are matched against the in-flight `RequestId`; anything else
/// (a response from before a reset, or a duplicate) is dropped.
#[derive(Debug, Clone)]
pub struct Session {
    catalog: Arc<Catalog>,
    state: WorkflowState,
    generation: u64,
    serial: u64,
}

impl Session {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self {
            catalog,
            state: WorkflowState::initial(),
            generation: 0,
            serial: 0,
        }
    }

    pub fn state(&self) -> &WorkflowState {
        &self.state
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn selected_project(&self) -> Option<&Project> {
        self.state
            .selected_project_id
            .and_then(|id| self.catalog.project(id))
    }

    /// Apply an event; the state only changes when the transition is accepted
    pub fn apply(&mut self, event: Event) -> Result<(), TransitionError> {
        let name = event.name();
        match self.state.apply(event, &self.catalog) {
            Ok(next) => {
                debug!(event = name, from = ?self.state.step, to = ?next.step, "transition");
                self.state = next;
                Ok(())
            }
            Err(TransitionError::StaleResponse(request)) => {
                debug!(%request, "dropping stale parse completion");
                Err(TransitionError::StaleResponse(request))
            }
            Err(err) => {
                debug!(event = name, error = %err, "transition refused");
                Err(err)
            }
        }
    }

    pub fn select_project(&mut self, id: ProjectId) -> Result<(), TransitionError> {
        self.apply(Event::SelectProject(id))
    }

    pub fn select_task(&mut self, path: TaskPath) -> Result<(), TransitionError> {
        self.apply(Event::SelectTask(path))
    }

    pub fn back(&mut self) -> Result<(), TransitionError> {
        self.apply(Event::Back)
    }

    /// Discard every selection and invalidate all in-flight requests
    pub fn reset(&mut self) {
        self.generation += 1;
        self.serial = 0;
        self.state = WorkflowState::initial();
        info!(generation = self.generation, "session reset");
    }

    /// Accept `text` for parsing and mark a request as in flight.
    ///
    /// The caller is expected to send `payload` and hand the outcome back to
    /// [`Session::complete`].
    pub fn begin_submit(&mut self, text: impl Into<String>) -> Result<PendingParse, TransitionError> {
        let request = RequestId {
            generation: self.generation,
            serial: self.serial + 1,
        };
        self.apply(Event::Submit {
            text: text.into(),
            request,
        })?;
        self.serial = request.serial;

        let payload = self
            .state
            .parse_request()
            .unwrap_or_else(|| ParseRequest::new(String::new(), String::new()));
        info!(%request, task_path = %payload.task_path, "parse submitted");
        Ok(PendingParse { request, payload })
    }

    /// Feed a parser outcome back into the workflow
    pub fn complete(
        &mut self,
        request: RequestId,
        outcome: Result<ParseResponse, ParserError>,
    ) -> Result<(), TransitionError> {
        let event = match outcome {
            Ok(response) => {
                info!(
                    %request,
                    rows = response.data.len(),
                    warnings = response.errors.len(),
                    "parse succeeded"
                );
                Event::ParseSucceeded {
                    request,
                    rows: response.data,
                    warnings: response.errors,
                }
            }
            Err(err) => {
                let failure = ParseFailure::from(&err);
                warn!(%request, error = %err, "parse failed");
                Event::ParseFailed { request, failure }
            }
        };
        self.apply(event)
    }

    /// Submit and wait for the parser in one step
    pub async fn submit<P>(&mut self, parser: &P, text: impl Into<String>) -> Result<(), TransitionError>
    where
        P: RemoteParser + ?Sized,
    {
        let pending = self.begin_submit(text)?;
        let outcome = parser.parse(pending.payload).await;
        self.complete(pending.request, outcome)
    }

    /// Leaf paths of the selected project after applying `query`
    pub fn visible_paths(&self, query: &str) -> Vec<TaskPath> {
        let Some(id) = self.state.selected_project_id else {
            return Vec::new();
        };
        enumerate_leaf_paths(&filter_tasks(self.catalog.tasks_for(id), query))
    }

    /// Export of the current result rows; `None` before results exist
    pub fn export_artifact(&self) -> Option<ExportArtifact> {
        if self.state.result_rows.is_empty() {
            return None;
        }
        Some(export_artifact(&self.state.result_rows))
    }
}
