/*
[INPUT]:  Parsed result rows, parser warnings, and the results TableState
[OUTPUT]: Results table rendered into Ratatui frame
[POS]:    TUI UI step 4 panel
[UPDATE]: When result columns change
*/

use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::{Color, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table, Wrap};
use timelog_workflow::export::EXPORT_HEADER;

use crate::tui::app::AppState;
use crate::tui::runtime::{border_style, header_style, highlight_style};

pub(in crate::tui) fn draw_results(
    frame: &mut ratatui::Frame,
    area: ratatui::layout::Rect,
    app: &mut AppState,
) {
    let warnings = app.session.state().parse_warnings.clone();
    let warning_height = if warnings.is_empty() {
        0
    } else {
        (warnings.len() as u16 + 2).min(area.height / 3)
    };
    let split = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(warning_height)])
        .split(area);

    let header = Row::new(EXPORT_HEADER.iter().map(|title| Cell::from(*title))).style(header_style());
    let rows = app
        .session
        .state()
        .result_rows
        .iter()
        .map(|row| {
            Row::new(vec![
                Cell::from(row.employee.clone()),
                Cell::from(row.date.clone()),
                Cell::from(row.time.clone()),
                Cell::from(row.description.clone()),
                Cell::from(row.subtask.clone()),
            ])
        })
        .collect::<Vec<_>>();
    let count = rows.len();

    let table = Table::new(
        rows,
        [
            Constraint::Percentage(16),
            Constraint::Percentage(14),
            Constraint::Percentage(14),
            Constraint::Percentage(38),
            Constraint::Percentage(18),
        ],
    )
    .header(header)
    .row_highlight_style(highlight_style())
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style())
            .title(format!("Results ({count})")),
    );
    frame.render_stateful_widget(table, split[0], &mut app.result_table);

    if !warnings.is_empty() {
        let lines = warnings.into_iter().map(Line::from).collect::<Vec<_>>();
        let widget = Paragraph::new(lines)
            .style(Style::default().fg(Color::Yellow))
            .wrap(Wrap { trim: true })
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(border_style())
                    .title("Parser warnings"),
            );
        frame.render_widget(widget, split[1]);
    }
}
