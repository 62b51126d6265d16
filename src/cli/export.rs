//! Export CLI command

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use clap::ValueEnum;

use crate::error::{TrackerError, TrackerResult};
use crate::export::{export_expenses_csv, export_full_json, export_full_yaml};
use crate::session::Session;
use crate::storage::Storage;

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ExportFormat {
    /// CSV (expenses only)
    Csv,
    /// JSON (expenses and budget goals)
    Json,
    /// YAML (expenses and budget goals, human-readable)
    Yaml,
}

/// Export to `output`, or to stdout when no file is given
pub fn handle_export_command(
    storage: &Storage,
    session: &Session,
    format: ExportFormat,
    output: Option<PathBuf>,
    pretty: bool,
) -> TrackerResult<()> {
    let mut writer: Box<dyn Write> = match &output {
        Some(path) => {
            let file = File::create(path).map_err(|e| {
                TrackerError::Export(format!("Failed to create file {}: {}", path.display(), e))
            })?;
            Box::new(BufWriter::new(file))
        }
        None => Box::new(io::stdout().lock()),
    };

    match format {
        ExportFormat::Csv => export_expenses_csv(storage, session, &mut writer)?,
        ExportFormat::Json => {
            export_full_json(storage, session, &mut writer, pretty)?;
            writeln!(writer)?;
        }
        ExportFormat::Yaml => export_full_yaml(storage, session, &mut writer)?,
    }
    writer.flush()?;

    if let Some(path) = output {
        eprintln!("Exported {:?} to {}", format, path.display());
    }
    Ok(())
}
