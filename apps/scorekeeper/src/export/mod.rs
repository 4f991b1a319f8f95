//! Tabular export of a game's scoresheet.
//!
//! Both encodings are produced from the same [`ExportRow`] list, so a CSV and
//! a spreadsheet of the same game always agree cell for cell.

use thiserror::Error;

use crate::errors::domain::DomainError;

pub mod csv;
pub mod rows;
pub mod xlsx;

pub use rows::{export_rows, header, ExportRow};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Xlsx,
}

impl ExportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Xlsx => "xlsx",
        }
    }

    pub fn mime_type(self) -> &'static str {
        match self {
            ExportFormat::Csv => "text/csv;charset=utf-8",
            ExportFormat::Xlsx => {
                "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
            }
        }
    }
}

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("no game is loaded")]
    NoGame,
    #[error(transparent)]
    Domain(#[from] DomainError),
    #[error("date formatting failed: {0}")]
    Date(#[from] time::error::Format),
    #[error("csv encoding failed: {0}")]
    Csv(#[from] ::csv::Error),
    #[error("csv buffer flush failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("xlsx encoding failed: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),
}

/// Encode rows in the requested format.
pub fn encode(
    format: ExportFormat,
    header: &[String],
    rows: &[ExportRow],
) -> Result<Vec<u8>, ExportError> {
    match format {
        ExportFormat::Csv => csv::to_csv(header, rows),
        ExportFormat::Xlsx => xlsx::to_xlsx(header, rows),
    }
}
