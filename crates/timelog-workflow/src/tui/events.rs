/*
[INPUT]:  Crossterm key events
[OUTPUT]: Workflow intents applied to AppState
[POS]:    TUI key routing per workflow step
[UPDATE]: When hotkeys change
*/

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use timelog_workflow::Step;
use tui_input::InputRequest;

use super::app::AppState;

/// Handles key events for the TUI.
///
/// Returns `true` if quit is requested, `false` otherwise.
pub(super) fn handle_key_event(app: &mut AppState, key: KeyEvent) -> bool {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        match key.code {
            KeyCode::Char('c') => return true,
            KeyCode::Char('r') => {
                app.reset();
                return false;
            }
            KeyCode::Char('s') => {
                if app.step() == Step::LogInput {
                    app.submit();
                }
                return false;
            }
            _ => {}
        }
    }

    if key.code == KeyCode::F(2) {
        app.toggle_logs();
        return false;
    }

    match app.step() {
        Step::ProjectSelect => handle_list_key(app, key.code),
        Step::TaskSelect if app.filter_focused => {
            handle_filter_key(app, key.code);
            false
        }
        Step::TaskSelect => match key.code {
            KeyCode::Char('/') => {
                app.filter_focused = true;
                false
            }
            KeyCode::Char('b') | KeyCode::Backspace | KeyCode::Esc => {
                app.back();
                false
            }
            code => handle_list_key(app, code),
        },
        Step::LogInput => {
            handle_text_key(app, key.code);
            false
        }
        Step::Results => match key.code {
            KeyCode::Char('e') => {
                app.export();
                false
            }
            KeyCode::Char('r') => {
                app.reset();
                false
            }
            KeyCode::Char('b') | KeyCode::Backspace | KeyCode::Esc => {
                app.back();
                false
            }
            code => handle_list_key(app, code),
        },
    }
}

fn handle_list_key(app: &mut AppState, code: KeyCode) -> bool {
    match code {
        KeyCode::Char('q') => return true,
        KeyCode::Up | KeyCode::Char('k') => app.move_selection(-1),
        KeyCode::Down | KeyCode::Char('j') => app.move_selection(1),
        KeyCode::Enter => app.confirm_selection(),
        _ => {}
    }
    false
}

fn handle_filter_key(app: &mut AppState, code: KeyCode) {
    let request = match code {
        KeyCode::Esc | KeyCode::Tab => {
            app.filter_focused = false;
            return;
        }
        KeyCode::Enter => {
            app.confirm_selection();
            return;
        }
        KeyCode::Up => {
            app.move_selection(-1);
            return;
        }
        KeyCode::Down => {
            app.move_selection(1);
            return;
        }
        KeyCode::Char(ch) => InputRequest::InsertChar(ch),
        KeyCode::Backspace => InputRequest::DeletePrevChar,
        KeyCode::Delete => InputRequest::DeleteNextChar,
        KeyCode::Left => InputRequest::GoToPrevChar,
        KeyCode::Right => InputRequest::GoToNextChar,
        KeyCode::Home => InputRequest::GoToStart,
        KeyCode::End => InputRequest::GoToEnd,
        _ => return,
    };
    app.handle_filter_request(request);
}

// Plain text area: typed characters go into the log text, Esc steps back.
fn handle_text_key(app: &mut AppState, code: KeyCode) {
    if app.is_pending() {
        return;
    }
    match code {
        KeyCode::Esc => app.back(),
        KeyCode::Enter => app.log_text.push('\n'),
        KeyCode::Tab => app.log_text.push('\t'),
        KeyCode::Backspace => {
            app.log_text.pop();
        }
        KeyCode::Char(ch) => app.log_text.push(ch),
        _ => {}
    }
}
