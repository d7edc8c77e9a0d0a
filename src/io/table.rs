//! In-memory tabular data loaded from CSV exports.

use crate::error::{ReportError, Result};
use std::io::Read;
use std::path::Path;

/// Cell values read as missing, alongside empty cells.
pub const MISSING_TOKENS: &[&str] = &[
    "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// A fully loaded table. Empty, whitespace-only and [`MISSING_TOKENS`] cells
/// are `None`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    /// Source name used in error messages
    pub name: String,

    /// Column headers (empty for headerless sheets)
    pub headers: Vec<String>,

    /// Rows, each padded to the table width
    pub rows: Vec<Vec<Option<String>>>,
}

impl Table {
    /// Load a CSV file whose first row is a header.
    pub fn from_csv_path(name: &str, path: &Path) -> Result<Self> {
        Self::read_path(name, path, true)
    }

    /// Load a CSV file without a header row (positional columns only).
    pub fn from_headerless_csv_path(name: &str, path: &Path) -> Result<Self> {
        Self::read_path(name, path, false)
    }

    /// Parse CSV from any reader.
    pub fn from_reader<R: Read>(name: &str, reader: R, has_headers: bool) -> Result<Self> {
        Self::read(name, reader, has_headers).map_err(|source| ReportError::Csv {
            path: name.to_string(),
            source,
        })
    }

    fn read_path(name: &str, path: &Path, has_headers: bool) -> Result<Self> {
        std::fs::File::open(path)
            .map_err(csv::Error::from)
            .and_then(|file| Self::read(name, file, has_headers))
            .map_err(|source| ReportError::Csv {
                path: path.display().to_string(),
                source,
            })
    }

    fn read<R: Read>(name: &str, reader: R, has_headers: bool) -> csv::Result<Self> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(has_headers)
            .flexible(true)
            .from_reader(reader);

        let headers: Vec<String> = if has_headers {
            csv_reader
                .headers()?
                .iter()
                .map(|h| h.trim().to_string())
                .collect()
        } else {
            Vec::new()
        };

        let mut rows = Vec::new();
        for record in csv_reader.records() {
            let record = record?;
            let row: Vec<Option<String>> = record
                .iter()
                .map(|cell| {
                    let cell = cell.trim();
                    (!is_missing(cell)).then(|| cell.to_string())
                })
                .collect();
            rows.push(row);
        }

        // Ragged rows are padded with missing cells, like a spreadsheet grid
        let width = rows
            .iter()
            .map(Vec::len)
            .chain(std::iter::once(headers.len()))
            .max()
            .unwrap_or(0);
        for row in &mut rows {
            row.resize(width, None);
        }

        tracing::debug!("Loaded {} rows x {} columns from {}", rows.len(), width, name);

        Ok(Self {
            name: name.to_string(),
            headers,
            rows,
        })
    }

    /// Find a column by checking multiple possible names.
    pub fn find_column(&self, names: &[&str]) -> Result<usize> {
        for name in names {
            if let Some(idx) = self.headers.iter().position(|h| h == name) {
                return Ok(idx);
            }
        }
        Err(ReportError::MissingColumn {
            source_name: self.name.clone(),
            candidates: names.iter().map(|n| n.to_string()).collect(),
        })
    }

    /// Cell value at `(row, col)`, `None` when missing or out of range.
    pub fn cell(&self, row: usize, col: usize) -> Option<&str> {
        self.rows.get(row)?.get(col)?.as_deref()
    }

    /// Number of columns.
    pub fn width(&self) -> usize {
        self.rows
            .first()
            .map(Vec::len)
            .unwrap_or(self.headers.len())
    }

    /// Number of data rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Check if the table has no data rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Whether every present cell of `col` parses as a number.
    ///
    /// A column with no present cells counts as numeric; callers decide what
    /// an entirely missing column means.
    pub fn is_numeric_column(&self, col: usize) -> bool {
        self.rows
            .iter()
            .filter_map(|row| row.get(col).and_then(|c| c.as_deref()))
            .all(|cell| parse_number(cell).is_some())
    }
}

fn is_missing(cell: &str) -> bool {
    cell.is_empty() || MISSING_TOKENS.contains(&cell)
}

/// Parse a finite numeric cell, tolerating surrounding whitespace.
pub fn parse_number(cell: &str) -> Option<f64> {
    cell.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}
