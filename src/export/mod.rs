// src/export/mod.rs

mod json_csv;

pub use json_csv::{write_pairs_csv, write_pairs_json};

use crate::errors::{AppError, AppResult};
use crate::models::EvaluationPair;
use crate::ui::messages::{success, warning};
use clap::ValueEnum;
use std::fs::File;
use std::io::{self, BufRead, BufWriter, Write};
use std::path::Path;

/// Common helper for export completion messages.
pub(crate) fn notify_export_success(label: &str, count: usize, path: &Path) {
    success(format!(
        "{label} export completed: {count} pairs → {}",
        path.display()
    ));
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    Json,
    Csv,
}

impl ExportFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExportFormat::Json => "json",
            ExportFormat::Csv => "csv",
        }
    }

    fn write<W: Write>(&self, pairs: &[EvaluationPair], out: W) -> AppResult<()> {
        match self {
            ExportFormat::Json => write_pairs_json(pairs, out),
            ExportFormat::Csv => write_pairs_csv(pairs, out),
        }
    }
}

/// Write pairs to `path`, or to stdout when no path is given.
pub fn export_pairs(
    pairs: &[EvaluationPair],
    format: ExportFormat,
    path: Option<&Path>,
    force: bool,
) -> AppResult<()> {
    match path {
        Some(p) => {
            if p.exists() && !force && !confirm_overwrite(p, io::stdin().lock())? {
                return Err(AppError::Other(format!(
                    "{} already exists; pairs not written (use --force to overwrite)",
                    p.display()
                )));
            }
            let file = BufWriter::new(File::create(p)?);
            format.write(pairs, file)?;
            notify_export_success(&format.as_str().to_uppercase(), pairs.len(), p);
        }
        None => {
            let stdout = io::stdout();
            format.write(pairs, stdout.lock())?;
        }
    }
    Ok(())
}

/// Ask on stdout whether an existing pairs file may be replaced.
fn confirm_overwrite<R: BufRead>(path: &Path, mut answers: R) -> AppResult<bool> {
    warning(format!("{} already exists.", path.display()));
    print!("Replace it with the new pairs? [y/N]: ");
    io::stdout().flush()?;

    let mut answer = String::new();
    answers.read_line(&mut answer)?;
    Ok(matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes"))
}
