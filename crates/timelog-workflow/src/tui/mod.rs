/*
[INPUT]:  Workflow session, remote parser handle, export target, and log buffer
[OUTPUT]: Ratatui-based TUI walking the four workflow steps
[POS]:    TUI module for the timelog binary
[UPDATE]: When changing TUI layout, keybindings, or runtime controls
*/

mod app;
mod events;
mod runtime;
mod terminal;
mod ui;

pub use app::ExportTarget;
pub use runtime::{LOG_BUFFER_CAPACITY, LogBuffer, LogBufferHandle, LogWriterFactory, run_tui_with_log};
