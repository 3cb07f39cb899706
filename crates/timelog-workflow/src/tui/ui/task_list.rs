/*
[INPUT]:  Filter input, visible leaf paths, and the task ListState
[OUTPUT]: Task filter box and path picker rendered into Ratatui frame
[POS]:    TUI UI step 2 panel
[UPDATE]: When task list rendering or filter box behavior changes
*/

use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, Paragraph};
use timelog_workflow::PATH_SEPARATOR;

use crate::tui::app::AppState;
use crate::tui::runtime::{border_style, focused_border_style, highlight_style};

pub(in crate::tui) fn draw_task_select(
    frame: &mut ratatui::Frame,
    area: ratatui::layout::Rect,
    app: &mut AppState,
) {
    let split = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(3)])
        .split(area);

    let project_name = app
        .session
        .selected_project()
        .map(|project| project.name.clone())
        .unwrap_or_default();

    let filter_area = split[0];
    let width = filter_area.width.saturating_sub(2) as usize;
    let scroll = app.filter.visual_scroll(width);
    let filter_border = if app.filter_focused {
        focused_border_style()
    } else {
        border_style()
    };
    let filter = Paragraph::new(app.filter.value())
        .scroll((0, scroll as u16))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(filter_border)
                .title("Search tasks [/]"),
        );
    frame.render_widget(filter, filter_area);
    if app.filter_focused {
        let cursor = app.filter.visual_cursor().saturating_sub(scroll) as u16;
        frame.set_cursor_position((filter_area.x + 1 + cursor, filter_area.y + 1));
    }

    let items = if app.visible_paths.is_empty() {
        vec![ListItem::new("No tasks match the search")]
    } else {
        app.visible_paths
            .iter()
            .map(|path| {
                let Some((leaf, ancestors)) = path.segments().split_last() else {
                    return ListItem::new("");
                };
                let mut spans = ancestors
                    .iter()
                    .flat_map(|name| {
                        [
                            Span::styled(name.clone(), Style::default().add_modifier(Modifier::DIM)),
                            Span::styled(PATH_SEPARATOR, Style::default().add_modifier(Modifier::DIM)),
                        ]
                    })
                    .collect::<Vec<_>>();
                spans.push(Span::raw(leaf.clone()));
                ListItem::new(Line::from(spans))
            })
            .collect()
    };

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border_style())
                .title(format!("Select a task ({project_name})")),
        )
        .highlight_style(highlight_style())
        .highlight_symbol("> ");
    frame.render_stateful_widget(list, split[1], &mut app.task_list);
}
