/*
[INPUT]:  Catalog projects and the project ListState
[OUTPUT]: Project picker rendered into Ratatui frame
[POS]:    TUI UI step 1 panel
[UPDATE]: When project list columns change
*/

use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, Paragraph, Wrap};

use crate::tui::app::AppState;
use crate::tui::runtime::{border_style, highlight_style};

pub(in crate::tui) fn draw_project_list(
    frame: &mut ratatui::Frame,
    area: ratatui::layout::Rect,
    app: &mut AppState,
) {
    let split = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(4)])
        .split(area);

    let items = app
        .projects()
        .iter()
        .map(|project| {
            ListItem::new(Line::from(vec![
                Span::styled(
                    format!("{:>4}  ", project.id),
                    Style::default().add_modifier(Modifier::DIM),
                ),
                Span::raw(project.name.clone()),
            ]))
        })
        .collect::<Vec<_>>();

    let description = app
        .project_list
        .selected()
        .and_then(|index| app.projects().get(index))
        .map(|project| project.description.clone())
        .unwrap_or_default();

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border_style())
                .title("Select a project"),
        )
        .highlight_style(highlight_style())
        .highlight_symbol("> ");
    frame.render_stateful_widget(list, split[0], &mut app.project_list);

    let details = Paragraph::new(description)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border_style())
                .title("Description"),
        );
    frame.render_widget(details, split[1]);
}
