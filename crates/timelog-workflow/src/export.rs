/*
[INPUT]:  Parsed result rows
[OUTPUT]: Delimited text artifact and the exported file on disk
[POS]:    Output layer - CSV export of the results table
[UPDATE]: When the export columns, quoting, or file naming change
*/

use std::path::{Path, PathBuf};

use thiserror::Error;
use timelog_adapter::ResultRow;

pub const EXPORT_FILE_NAME: &str = "time_log_export.csv";
pub const EXPORT_CONTENT_TYPE: &str = "text/csv";
pub const EXPORT_HEADER: [&str; 5] = ["Employee", "Date", "Time", "Description", "Subtask"];

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to create export directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write export file {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Downloadable form of the results table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportArtifact {
    pub file_name: String,
    pub content_type: &'static str,
    pub bytes: Vec<u8>,
}

/// Render rows as delimited text.
///
/// Description and Subtask are always wrapped in double quotes with inner
/// quotes doubled. Employee, Date and Time are written as-is. Lines are
/// joined with `\n` and there is no trailing newline.
pub fn to_delimited_text(rows: &[ResultRow]) -> String {
    let mut lines = Vec::with_capacity(rows.len() + 1);
    lines.push(EXPORT_HEADER.join(","));
    lines.extend(rows.iter().map(|row| {
        format!(
            "{},{},{},{},{}",
            row.employee,
            row.date,
            row.time,
            quote(&row.description),
            quote(&row.subtask)
        )
    }));
    lines.join("\n")
}

fn quote(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}

pub fn export_artifact(rows: &[ResultRow]) -> ExportArtifact {
    ExportArtifact {
        file_name: EXPORT_FILE_NAME.to_string(),
        content_type: EXPORT_CONTENT_TYPE,
        bytes: to_delimited_text(rows).into_bytes(),
    }
}

/// Write the export into `dir`, creating it if needed and overwriting any
/// previous export of the same name.
pub fn write_export(
    rows: &[ResultRow],
    dir: impl AsRef<Path>,
    file_name: &str,
) -> Result<PathBuf, ExportError> {
    let dir = dir.as_ref();
    std::fs::create_dir_all(dir).map_err(|source| ExportError::CreateDir {
        path: dir.to_path_buf(),
        source,
    })?;

    let path = dir.join(file_name);
    let artifact = export_artifact(rows);
    std::fs::write(&path, &artifact.bytes).map_err(|source| ExportError::Write {
        path: path.clone(),
        source,
    })?;

    tracing::info!(path = %path.display(), rows = rows.len(), "results exported");
    Ok(path)
}
