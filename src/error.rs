use std::io;

use thiserror::Error;

/// Error type for report inputs, structural checks and output failures.
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("missing required input sources: {}", missing.join(", "))]
    MissingSources { missing: Vec<String> },
    #[error("'{value}' is not a valid date in the format '{format}'")]
    InvalidDate { value: String, format: &'static str },
    #[error("start date {start} is after end date {end}")]
    InvalidDateRange {
        start: chrono::NaiveDate,
        end: chrono::NaiveDate,
    },
    #[error("{source_name}: could not find column with any of these names: {candidates:?}")]
    MissingColumn {
        source_name: String,
        candidates: Vec<String>,
    },
    #[error("payroll sheet is malformed: {0}")]
    PayrollStructure(String),
    #[error("failed to read {path}: {source}")]
    Csv {
        path: String,
        #[source]
        source: csv::Error,
    },
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error("failed to write workbook: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),
}

pub type Result<T> = std::result::Result<T, ReportError>;
