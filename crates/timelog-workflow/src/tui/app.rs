/*
[INPUT]:  Workflow session, remote parser handle, log buffer, key-driven intents
[OUTPUT]: AppState helpers for TUI rendering and workflow control
[POS]:    TUI app state and parse dispatch
[UPDATE]: When adding view state or changing how intents reach the session
*/

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result, anyhow};
use ratatui::widgets::{ListState, TableState};
use timelog_adapter::{ParseResponse, ParserError, RemoteParser};
use timelog_workflow::{Project, RequestId, Session, Step, TaskPath, TransitionError, write_export};
use tokio::sync::mpsc;
use tui_input::{Input, InputRequest};

use crate::tui::LogBufferHandle;

/// Where the `e` hotkey writes the results
#[derive(Debug, Clone)]
pub struct ExportTarget {
    pub directory: PathBuf,
    pub file_name: String,
}

/// Outcome of a spawned parse call, routed back to the UI loop
pub(super) struct Completion {
    pub(super) request: RequestId,
    pub(super) outcome: Result<ParseResponse, ParserError>,
}

pub(super) struct AppState {
    pub(super) session: Session,
    pub(super) parser: Arc<dyn RemoteParser>,
    pub(super) log_buffer: LogBufferHandle,
    pub(super) export: ExportTarget,
    pub(super) project_list: ListState,
    pub(super) task_list: ListState,
    pub(super) result_table: TableState,
    pub(super) filter: Input,
    pub(super) filter_focused: bool,
    pub(super) visible_paths: Vec<TaskPath>,
    pub(super) log_text: String,
    pub(super) show_logs: bool,
    pub(super) status_message: String,
    pub(super) spinner_frame: usize,
    completion_tx: mpsc::UnboundedSender<Completion>,
}

impl AppState {
    pub(super) fn new(
        session: Session,
        parser: Arc<dyn RemoteParser>,
        log_buffer: LogBufferHandle,
        export: ExportTarget,
        completion_tx: mpsc::UnboundedSender<Completion>,
    ) -> Self {
        let mut project_list = ListState::default();
        project_list.select(Some(0));
        Self {
            session,
            parser,
            log_buffer,
            export,
            project_list,
            task_list: ListState::default(),
            result_table: TableState::default(),
            filter: Input::default(),
            filter_focused: false,
            visible_paths: Vec::new(),
            log_text: String::new(),
            show_logs: false,
            status_message: "Ready".to_string(),
            spinner_frame: 0,
            completion_tx,
        }
    }

    pub(super) fn step(&self) -> Step {
        self.session.state().step
    }

    pub(super) fn is_pending(&self) -> bool {
        self.session.state().is_pending()
    }

    pub(super) fn projects(&self) -> &[Project] {
        self.session.catalog().projects()
    }

    pub(super) fn move_selection(&mut self, delta: isize) {
        match self.step() {
            Step::ProjectSelect => {
                let len = self.session.catalog().projects().len();
                self.project_list.select(next_index(self.project_list.selected(), len, delta));
            }
            Step::TaskSelect => {
                let len = self.visible_paths.len();
                self.task_list.select(next_index(self.task_list.selected(), len, delta));
            }
            Step::Results => {
                let len = self.session.state().result_rows.len();
                self.result_table.select(next_index(self.result_table.selected(), len, delta));
            }
            Step::LogInput => {}
        }
    }

    /// Enter on a list: pick the highlighted project or task path
    pub(super) fn confirm_selection(&mut self) {
        let result = match self.step() {
            Step::ProjectSelect => {
                let index = self.project_list.selected().unwrap_or(0);
                let Some(id) = self.projects().get(index).map(|project| project.id) else {
                    return;
                };
                self.session.select_project(id).map(|()| {
                    self.clear_filter();
                    self.status_message = format!("project selected: {id}");
                })
            }
            Step::TaskSelect => {
                let index = self.task_list.selected().unwrap_or(0);
                let Some(path) = self.visible_paths.get(index).cloned() else {
                    self.status_message = "no task matches the filter".to_string();
                    return;
                };
                let label = path.joined();
                self.session.select_task(path).map(|()| {
                    self.filter_focused = false;
                    self.status_message = format!("task selected: {label}");
                })
            }
            Step::LogInput | Step::Results => return,
        };
        if let Err(err) = result {
            self.status_message = err.to_string();
        }
    }

    pub(super) fn handle_filter_request(&mut self, request: InputRequest) {
        if self.filter.handle(request).is_some() {
            self.refresh_visible_paths();
        }
    }

    pub(super) fn clear_filter(&mut self) {
        self.filter.reset();
        self.filter_focused = false;
        self.refresh_visible_paths();
    }

    pub(super) fn refresh_visible_paths(&mut self) {
        self.visible_paths = self.session.visible_paths(self.filter.value().trim());
        if self.visible_paths.is_empty() {
            self.task_list.select(None);
        } else {
            let selected = self.task_list.selected().unwrap_or(0);
            self.task_list
                .select(Some(selected.min(self.visible_paths.len() - 1)));
        }
    }

    /// Send the typed text to the parser without blocking the UI loop
    pub(super) fn submit(&mut self) {
        let pending = match self.session.begin_submit(self.log_text.clone()) {
            Ok(pending) => pending,
            Err(TransitionError::EmptyText) => {
                self.status_message = "enter some time log text first".to_string();
                return;
            }
            Err(err) => {
                self.status_message = err.to_string();
                return;
            }
        };

        let parser = Arc::clone(&self.parser);
        let tx = self.completion_tx.clone();
        tokio::spawn(async move {
            let outcome = parser.parse(pending.payload).await;
            let _ = tx.send(Completion {
                request: pending.request,
                outcome,
            });
        });
        self.status_message = "parsing...".to_string();
    }

    pub(super) fn apply_completion(&mut self, completion: Completion) {
        match self.session.complete(completion.request, completion.outcome) {
            Ok(()) => {
                let state = self.session.state();
                self.status_message = match &state.last_error {
                    Some(error) => error.clone(),
                    None => format!("parsed {} rows", state.result_rows.len()),
                };
                if state.step == Step::Results && !state.result_rows.is_empty() {
                    self.result_table.select(Some(0));
                }
            }
            Err(TransitionError::StaleResponse(_)) => {}
            Err(err) => self.status_message = err.to_string(),
        }
    }

    pub(super) fn back(&mut self) {
        let from = self.step();
        match self.session.back() {
            Ok(()) => {
                match from {
                    Step::TaskSelect => self.clear_filter(),
                    Step::LogInput => {
                        self.refresh_visible_paths();
                    }
                    Step::Results => self.result_table.select(None),
                    Step::ProjectSelect => {}
                }
                self.status_message = "back".to_string();
            }
            Err(err) => self.status_message = err.to_string(),
        }
    }

    /// Start over; any response still in flight will be ignored
    pub(super) fn reset(&mut self) {
        self.session.reset();
        self.filter.reset();
        self.filter_focused = false;
        self.visible_paths.clear();
        self.log_text.clear();
        self.project_list.select(Some(0));
        self.task_list.select(None);
        self.result_table.select(None);
        self.status_message = "reset".to_string();
    }

    pub(super) fn export(&mut self) {
        match self.export_results() {
            Ok(path) => {
                self.status_message = format!(
                    "Exported to CSV! {} ({})",
                    path.display(),
                    chrono::Local::now().format("%H:%M:%S")
                );
            }
            Err(err) => self.status_message = format!("export failed: {err:#}"),
        }
    }

    fn export_results(&self) -> Result<PathBuf> {
        let state = self.session.state();
        if state.step != Step::Results {
            return Err(anyhow!("nothing to export yet"));
        }
        if state.result_rows.is_empty() {
            return Err(anyhow!("no rows to export"));
        }
        write_export(
            &state.result_rows,
            &self.export.directory,
            &self.export.file_name,
        )
        .context("write export")
    }

    pub(super) fn toggle_logs(&mut self) {
        self.show_logs = !self.show_logs;
    }

    pub(super) fn tick(&mut self) {
        if self.is_pending() {
            self.spinner_frame = self.spinner_frame.wrapping_add(1);
        }
    }
}

fn next_index(current: Option<usize>, len: usize, delta: isize) -> Option<usize> {
    if len == 0 {
        return None;
    }
    let current = current.unwrap_or(0) as isize;
    Some((current + delta).clamp(0, (len - 1) as isize) as usize)
}
