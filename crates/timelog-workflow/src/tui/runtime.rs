/*
[INPUT]:  Workflow session, remote parser handle, export target, and log buffer
[OUTPUT]: Ratatui-based TUI run loop, rendering, and log buffer utilities
[POS]:    TUI runtime loop and shared helpers
[UPDATE]: When changing TUI layout, keybindings, or runtime controls
*/

use std::collections::VecDeque;
use std::io::{self, Write};
use std::sync::Arc;
use std::sync::Mutex as StdMutex;
use std::time::Duration;

use anyhow::Result;
use crossterm::event::{Event as CrosstermEvent, KeyEventKind};
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use timelog_adapter::RemoteParser;
use timelog_workflow::{Session, Step};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::info;
use tracing_subscriber::fmt::MakeWriter;

use super::app::{AppState, ExportTarget};
use super::events::handle_key_event;
use super::terminal::TerminalGuard;
use super::ui::*;

const UI_TICK_INTERVAL: Duration = Duration::from_millis(250);
const INPUT_POLL_INTERVAL: Duration = Duration::from_millis(200);
pub const LOG_BUFFER_CAPACITY: usize = 2000;
const SPINNER: [&str; 4] = ["|", "/", "-", "\\"];

pub type LogBufferHandle = Arc<StdMutex<LogBuffer>>;

/// Bounded in-memory tail of formatted log lines
#[derive(Debug, Default)]
pub struct LogBuffer {
    lines: VecDeque<String>,
    capacity: usize,
}

impl LogBuffer {
    pub fn new(capacity: usize) -> Self {
        Self {
            lines: VecDeque::new(),
            capacity,
        }
    }

    pub fn push_line(&mut self, line: String) {
        if self.capacity == 0 {
            return;
        }
        if self.lines.len() >= self.capacity {
            self.lines.pop_front();
        }
        self.lines.push_back(line);
    }

    /// The last `count` lines, oldest first
    pub fn tail(&self, count: usize) -> Vec<String> {
        let skip = self.lines.len().saturating_sub(count);
        self.lines.iter().skip(skip).cloned().collect()
    }
}

/// `MakeWriter` that routes tracing output into a [`LogBuffer`]
#[derive(Clone)]
pub struct LogWriterFactory {
    buffer: LogBufferHandle,
}

impl LogWriterFactory {
    pub fn new(buffer: LogBufferHandle) -> Self {
        Self { buffer }
    }
}

pub struct LogWriter {
    buffer: LogBufferHandle,
    partial: String,
}

impl LogWriter {
    fn push(&self, line: String) {
        // A poisoned buffer only loses log lines.
        if let Ok(mut guard) = self.buffer.lock() {
            guard.push_line(line);
        }
    }
}

impl Write for LogWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.partial.push_str(&String::from_utf8_lossy(buf));
        while let Some(pos) = self.partial.find('\n') {
            let line = self.partial[..pos].trim_end_matches('\r').to_string();
            self.partial.drain(..=pos);
            self.push(line);
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        if !self.partial.is_empty() {
            let line = std::mem::take(&mut self.partial);
            self.push(line);
        }
        Ok(())
    }
}

impl Drop for LogWriter {
    fn drop(&mut self) {
        let _ = self.flush();
    }
}

impl<'a> MakeWriter<'a> for LogWriterFactory {
    type Writer = LogWriter;

    fn make_writer(&'a self) -> Self::Writer {
        LogWriter {
            buffer: self.buffer.clone(),
            partial: String::new(),
        }
    }
}

enum UiEvent {
    Input(CrosstermEvent),
}

pub(crate) fn border_style() -> Style {
    Style::default().fg(Color::Magenta)
}

pub(crate) fn focused_border_style() -> Style {
    Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD)
}

pub(crate) fn header_style() -> Style {
    Style::default()
        .fg(Color::Black)
        .bg(Color::Cyan)
        .add_modifier(Modifier::BOLD)
}

pub(crate) fn highlight_style() -> Style {
    Style::default()
        .fg(Color::White)
        .bg(Color::Blue)
        .add_modifier(Modifier::BOLD)
}

pub(crate) fn error_style() -> Style {
    Style::default()
        .fg(Color::LightRed)
        .add_modifier(Modifier::BOLD)
}

pub(crate) fn spinner_label(frame: usize) -> &'static str {
    SPINNER[frame % SPINNER.len()]
}

pub async fn run_tui_with_log(
    session: Session,
    parser: Arc<dyn RemoteParser>,
    log_buffer: LogBufferHandle,
    export: ExportTarget,
) -> Result<()> {
    let mut terminal = TerminalGuard::new()?;
    let (event_tx, mut event_rx) = mpsc::unbounded_channel();
    let (completion_tx, mut completion_rx) = mpsc::unbounded_channel();
    let input_shutdown = CancellationToken::new();
    let input_shutdown_clone = input_shutdown.clone();

    tokio::task::spawn_blocking(move || {
        while !input_shutdown_clone.is_cancelled() {
            if crossterm::event::poll(INPUT_POLL_INTERVAL).unwrap_or(false) {
                if let Ok(event) = crossterm::event::read() {
                    let _ = event_tx.send(UiEvent::Input(event));
                }
            }
        }
    });

    let mut app = AppState::new(session, parser, log_buffer, export, completion_tx);
    info!(projects = app.projects().len(), "tui started");

    let mut tick = tokio::time::interval(UI_TICK_INTERVAL);
    let mut should_quit = false;

    while !should_quit {
        tokio::select! {
            _ = tick.tick() => app.tick(),
            maybe_completion = completion_rx.recv() => {
                if let Some(completion) = maybe_completion {
                    app.apply_completion(completion);
                }
            }
            maybe_event = event_rx.recv() => {
                match maybe_event {
                    Some(UiEvent::Input(CrosstermEvent::Key(key))) if key.kind == KeyEventKind::Press => {
                        should_quit = handle_key_event(&mut app, key);
                    }
                    Some(_) => {}
                    None => should_quit = true,
                }
            }
        }

        terminal.draw(|frame| draw_ui(frame, &mut app))?;
    }

    input_shutdown.cancel();
    info!("tui stopped");
    Ok(())
}

fn draw_ui(frame: &mut ratatui::Frame, app: &mut AppState) {
    let area = frame.area();
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(8),
            Constraint::Length(4),
        ])
        .split(area);

    draw_steps(frame, layout[0], app.step());

    let content = if app.show_logs {
        let split = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(layout[1]);
        draw_logs(frame, split[1], &app.log_buffer);
        split[0]
    } else {
        layout[1]
    };

    match app.step() {
        Step::ProjectSelect => draw_project_list(frame, content, app),
        Step::TaskSelect => draw_task_select(frame, content, app),
        Step::LogInput => draw_log_input(frame, content, app),
        Step::Results => draw_results(frame, content, app),
    }

    draw_footer(frame, layout[2], app);
}

fn draw_footer(frame: &mut ratatui::Frame, area: Rect, app: &AppState) {
    let key_style = Style::default()
        .fg(Color::Black)
        .bg(Color::Yellow)
        .add_modifier(Modifier::BOLD);

    let mut keys: Vec<(&str, &str)> = match app.step() {
        Step::ProjectSelect => vec![("[Up/Down]", " Select  "), ("[Enter]", " Open  "), ("[q]", " Quit  ")],
        Step::TaskSelect if app.filter_focused => {
            vec![("[type]", " Filter  "), ("[Enter]", " Choose  "), ("[Esc]", " Leave filter  ")]
        }
        Step::TaskSelect => vec![
            ("[Up/Down]", " Select  "),
            ("[/]", " Filter  "),
            ("[Enter]", " Choose  "),
            ("[b]", " Back  "),
            ("[q]", " Quit  "),
        ],
        Step::LogInput => vec![("[Ctrl+S]", " Process text  "), ("[Esc]", " Back  "), ("[Ctrl+C]", " Quit  ")],
        Step::Results => {
            let mut keys = vec![("[b]", " Back  "), ("[r]", " Start over  "), ("[q]", " Quit  ")];
            if !app.session.state().result_rows.is_empty() {
                keys.insert(0, ("[e]", " Export CSV  "));
            }
            keys
        }
    };
    keys.push(("[F2]", " Logs  "));
    keys.push(("[Ctrl+R]", " Reset"));

    let line1 = Line::from(
        keys.into_iter()
            .flat_map(|(key, label)| [Span::styled(key, key_style), Span::raw(label)])
            .collect::<Vec<_>>(),
    );
    let line2 = Line::from(format!("Status: {}", app.status_message));

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style())
        .title("Hotkeys");
    let widget = Paragraph::new(Text::from(vec![line1, line2]))
        .block(block)
        .wrap(Wrap { trim: true });
    frame.render_widget(widget, area);
}
