/*
[INPUT]:  TUI app state for each workflow step
[OUTPUT]: UI component render functions and module exports
[POS]:    TUI UI module root
[UPDATE]: When adding or renaming step panels
*/

mod layout;
mod log_input;
mod logs;
mod project_list;
mod results;
mod task_list;

pub(in crate::tui) use layout::draw_steps;
pub(in crate::tui) use log_input::draw_log_input;
pub(in crate::tui) use logs::draw_logs;
pub(in crate::tui) use project_list::draw_project_list;
pub(in crate::tui) use results::draw_results;
pub(in crate::tui) use task_list::draw_task_select;
