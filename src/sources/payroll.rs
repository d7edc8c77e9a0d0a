//! Paylocity timecard summary: a headerless, semi-structured sheet.
//!
//! Each agent block starts with a row whose first cell contains `ID:` and whose
//! second cell holds `"LASTNAME, firstname ..."`. The agent's approved hours
//! sit in column 4 of a later row that has at least one empty cell.

use crate::io::{parse_number, Table};

/// Marker identifying the first row of an agent block.
pub const ID_MARKER: &str = "ID:";

/// Column holding the agent name on `ID:` rows.
pub const NAME_COLUMN: usize = 1;

/// Column holding the hours figure on summary rows.
pub const HOURS_COLUMN: usize = 4;

/// An `ID:` marker row.
#[derive(Debug, Clone, PartialEq)]
pub struct IdRow {
    /// Zero-based row position in the sheet
    pub row: usize,
    pub raw_name: Option<String>,
}

/// A parseable hours figure.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HoursRow {
    /// Zero-based row position in the sheet
    pub row: usize,
    pub hours: f64,
}

/// Rows of interest scanned out of the payroll sheet, in sheet order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PayrollSheet {
    pub id_rows: Vec<IdRow>,
    pub hours_rows: Vec<HoursRow>,

    /// Column-4 values on gap rows that were not numbers
    pub skipped_cells: usize,
}

impl PayrollSheet {
    /// Scan the raw sheet for `ID:` rows and hours rows.
    ///
    /// Hours come from rows holding at least one missing cell; values that do
    /// not parse as numbers are skipped, since the export carries stray text
    /// in that column.
    pub fn scan(table: &Table) -> Self {
        let mut sheet = Self::default();

        for (idx, row) in table.rows.iter().enumerate() {
            if row.iter().any(Option::is_none) {
                if let Some(value) = row.get(HOURS_COLUMN).and_then(|c| c.as_deref()) {
                    match parse_number(value) {
                        Some(hours) => sheet.hours_rows.push(HoursRow { row: idx, hours }),
                        None => sheet.skipped_cells += 1,
                    }
                }
            }

            let is_id_row = row
                .first()
                .and_then(|c| c.as_deref())
                .is_some_and(|c| c.contains(ID_MARKER));
            if is_id_row {
                sheet.id_rows.push(IdRow {
                    row: idx,
                    raw_name: row.get(NAME_COLUMN).cloned().flatten(),
                });
            }
        }

        sheet
    }
}
