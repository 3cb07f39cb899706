/*
[INPUT]:  Project id, task path, raw time-log text (file or stdin), remote parser
[OUTPUT]: Parsed rows on stdout and an optional export file
[POS]:    CLI headless walk through all four workflow steps
[UPDATE]: When the headless flow or its output format changes
*/

use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result, anyhow};
use clap::Args;
use console::style;
use timelog_adapter::{RemoteParser, ResultRow};
use timelog_workflow::export::EXPORT_HEADER;
use timelog_workflow::{Catalog, ProjectId, Session, TaskPath, to_delimited_text, write_export};
use tracing::info;
use unicode_width::UnicodeWidthStr;

#[derive(Args, Debug, Clone)]
pub struct RunArgs {
    /// Project id from the catalog
    #[arg(long, value_name = "ID")]
    pub project: ProjectId,
    /// Leaf task path, e.g. "Engineering > Backend > API"
    #[arg(long, value_name = "PATH")]
    pub task: String,
    /// File holding the time log; stdin when omitted or "-"
    #[arg(long, value_name = "FILE")]
    pub input: Option<PathBuf>,
    /// Write the CSV export into this directory
    #[arg(long = "export-dir", value_name = "DIR")]
    pub export_dir: Option<PathBuf>,
    /// Print the rows as CSV instead of a table
    #[arg(long)]
    pub csv: bool,
}

pub async fn run(
    catalog: Arc<Catalog>,
    parser: &dyn RemoteParser,
    args: &RunArgs,
    export_file_name: &str,
) -> Result<()> {
    let mut session = Session::new(catalog);
    session.select_project(args.project)?;
    session.select_task(TaskPath::parse(&args.task))?;

    let text = read_input(args.input.as_deref())?;
    session.submit(parser, text).await?;

    let state = session.state();
    if let Some(error) = &state.last_error {
        eprintln!("{}", style(error).red().bold());
        return Err(anyhow!("time log could not be processed"));
    }

    if args.csv {
        println!("{}", to_delimited_text(&state.result_rows));
    } else {
        print_table(&state.result_rows);
    }
    for warning in &state.parse_warnings {
        eprintln!("{} {}", style("warning:").yellow().bold(), warning);
    }

    match &args.export_dir {
        Some(_) if state.result_rows.is_empty() => {
            eprintln!("{} no rows to export", style("warning:").yellow().bold());
        }
        Some(dir) => {
            let path = write_export(&state.result_rows, dir, export_file_name)?;
            eprintln!("{} {}", style("Exported to CSV!").green(), path.display());
        }
        None => {}
    }

    info!(rows = state.result_rows.len(), "run finished");
    Ok(())
}

fn read_input(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) if path != Path::new("-") => std::fs::read_to_string(path)
            .with_context(|| format!("read time log {}", path.display())),
        _ => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .context("read time log from stdin")?;
            Ok(text)
        }
    }
}

fn cells(row: &ResultRow) -> [&str; 5] {
    [
        row.employee.as_str(),
        row.date.as_str(),
        row.time.as_str(),
        row.description.as_str(),
        row.subtask.as_str(),
    ]
}

fn print_table(rows: &[ResultRow]) {
    let mut widths = EXPORT_HEADER.map(|title| title.width());
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(cells(row)) {
            *width = (*width).max(cell.width());
        }
    }

    let render = |fields: [&str; 5]| {
        fields
            .iter()
            .zip(widths)
            .map(|(field, width)| format!("{field}{}", " ".repeat(width - field.width())))
            .collect::<Vec<_>>()
            .join("  ")
    };

    println!("{}", style(render(EXPORT_HEADER).trim_end()).bold());
    for row in rows {
        println!("{}", render(cells(row)).trim_end());
    }
}
