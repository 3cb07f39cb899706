/*
[INPUT]:  Current workflow step
[OUTPUT]: Step indicator rendered as a tab bar
[POS]:    TUI UI layout helpers
[UPDATE]: When the step list changes
*/

use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Tabs};
use timelog_workflow::Step;

use crate::tui::runtime::{border_style, header_style};

pub(in crate::tui) fn draw_steps(frame: &mut ratatui::Frame, area: ratatui::layout::Rect, step: Step) {
    let titles = Step::ALL
        .iter()
        .map(|step| Line::from(step.title()))
        .collect::<Vec<_>>();

    let tabs = Tabs::new(titles)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border_style())
                .title("Time Log"),
        )
        .highlight_style(header_style())
        .select(step.index());

    frame.render_widget(tabs, area);
}
