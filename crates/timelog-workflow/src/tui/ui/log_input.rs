/*
[INPUT]:  Typed time-log text, pending flag, and last parse error
[OUTPUT]: Text area with selection summary rendered into Ratatui frame
[POS]:    TUI UI step 3 panel
[UPDATE]: When the text area or error display changes
*/

use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use unicode_width::UnicodeWidthStr;

use crate::tui::app::AppState;
use crate::tui::runtime::{border_style, error_style, focused_border_style, spinner_label};

pub(in crate::tui) fn draw_log_input(
    frame: &mut ratatui::Frame,
    area: ratatui::layout::Rect,
    app: &mut AppState,
) {
    let split = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(5),
            Constraint::Length(3),
        ])
        .split(area);

    let state = app.session.state();
    let task = state
        .selected_task_path
        .as_ref()
        .map(|path| path.joined())
        .unwrap_or_default();
    let project = app
        .session
        .selected_project()
        .map(|project| project.name.clone())
        .unwrap_or_default();
    let summary = Paragraph::new(Line::from(vec![
        Span::styled(project, Style::default().fg(Color::Cyan)),
        Span::raw("  /  "),
        Span::raw(task),
    ]))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style())
            .title("Selection"),
    );
    frame.render_widget(summary, split[0]);

    // Keep the end of the text in view; lines are not wrapped.
    let text_area = split[1];
    let inner_height = text_area.height.saturating_sub(2) as usize;
    let lines: Vec<&str> = app.log_text.split('\n').collect();
    let scroll = lines.len().saturating_sub(inner_height);
    let editor = Paragraph::new(app.log_text.as_str())
        .scroll((scroll as u16, 0))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(focused_border_style())
                .title("Paste or type the time log"),
        );
    frame.render_widget(editor, text_area);

    if !state.is_pending() {
        let last = lines.last().copied().unwrap_or_default();
        let row = (lines.len() - 1 - scroll) as u16;
        let col = (last.width() as u16).min(text_area.width.saturating_sub(3));
        frame.set_cursor_position((text_area.x + 1 + col, text_area.y + 1 + row));
    }

    let status = if state.is_pending() {
        Line::from(format!("{} Processing...", spinner_label(app.spinner_frame)))
    } else if let Some(error) = &state.last_error {
        Line::from(Span::styled(error.clone(), error_style()))
    } else {
        Line::from("Press Ctrl+S to process the text")
    };
    let status = Paragraph::new(status).wrap(Wrap { trim: true }).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style()),
    );
    frame.render_widget(status, split[2]);
}
