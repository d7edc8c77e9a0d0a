//! Excel output for the finished report table.

use crate::error::Result;
use crate::transform::AgentMetricsRow;
use rust_xlsxwriter::{Format, FormatAlign, FormatBorder, Workbook, Worksheet};
use std::path::Path;

/// Worksheet holding the report table.
pub const SHEET_NAME: &str = "Agent Metrics";

/// Report column headers, in output order.
pub const REPORT_COLUMNS: [&str; 11] = [
    "AGENT FIRST NAME",
    "Dials",
    "Contacts",
    "Sets",
    "Sets/Dial",
    "Sets/Contact",
    "Five9 Calling Hours",
    "Five9 Calling Hours (Rounded)",
    "Sets/Five9 Calling Hours",
    "Paylocity Working Hours",
    "Five9 Calling Hours/Paylocity Hours",
];

/// A single worksheet cell value.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Text(String),
    Number(f64),
    Blank,
}

impl From<Option<f64>> for CellValue {
    fn from(value: Option<f64>) -> Self {
        value.map_or(CellValue::Blank, CellValue::Number)
    }
}

impl From<Option<&str>> for CellValue {
    fn from(value: Option<&str>) -> Self {
        value.map_or(CellValue::Blank, |s| CellValue::Text(s.to_string()))
    }
}

/// Cells of one report row, aligned with [`REPORT_COLUMNS`].
pub fn row_cells(row: &AgentMetricsRow) -> [CellValue; 11] {
    [
        CellValue::Text(row.display_name.clone()),
        row.dials.into(),
        row.contacts.into(),
        row.sets.map(|s| s as f64).into(),
        row.sets_per_dial.into(),
        row.sets_per_contact.into(),
        row.five9_hours.into(),
        row.five9_hours_rounded.into(),
        row.sets_per_five9_hour.into(),
        row.paylocity_hours.as_deref().into(),
        row.five9_paylocity_ratio.as_deref().into(),
    ]
}

/// Writes report rows into a single-sheet workbook.
#[derive(Debug, Default)]
pub struct XlsxReportWriter;

impl XlsxReportWriter {
    pub fn new() -> Self {
        Self
    }

    /// Write the workbook to `path`.
    pub fn write(&self, rows: &[AgentMetricsRow], path: &Path) -> Result<()> {
        let mut workbook = self.build(rows)?;
        workbook.save(path)?;
        tracing::info!("Wrote {} report rows to {}", rows.len(), path.display());
        Ok(())
    }

    /// Render the workbook into memory.
    pub fn render_to_bytes(&self, rows: &[AgentMetricsRow]) -> Result<Vec<u8>> {
        let mut workbook = self.build(rows)?;
        Ok(workbook.save_to_buffer()?)
    }

    fn build(&self, rows: &[AgentMetricsRow]) -> Result<Workbook> {
        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet();
        sheet.set_name(SHEET_NAME)?;

        let header = Format::new()
            .set_bold()
            .set_align(FormatAlign::Center)
            .set_border(FormatBorder::Thin);

        for (col, title) in REPORT_COLUMNS.iter().enumerate() {
            sheet.write_string_with_format(0, col as u16, *title, &header)?;
            sheet.set_column_width(col as u16, column_width(title))?;
        }
        sheet.set_freeze_panes(1, 0)?;

        for (idx, row) in rows.iter().enumerate() {
            write_row(sheet, idx as u32 + 1, row)?;
        }

        Ok(workbook)
    }
}

fn write_row(sheet: &mut Worksheet, row_num: u32, row: &AgentMetricsRow) -> Result<()> {
    for (col, cell) in row_cells(row).into_iter().enumerate() {
        match cell {
            CellValue::Text(text) => {
                sheet.write_string(row_num, col as u16, text)?;
            }
            CellValue::Number(value) => {
                sheet.write_number(row_num, col as u16, value)?;
            }
            CellValue::Blank => {}
        }
    }
    Ok(())
}

fn column_width(title: &str) -> f64 {
    (title.len() as f64 + 2.0).max(10.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::AgentKey;

    fn sample_row() -> AgentMetricsRow {
        AgentMetricsRow {
            agent: Some(AgentKey::from_login("jdoe")),
            display_name: "John D".to_string(),
            dials: Some(200.0),
            contacts: Some(40.0),
            sets: Some(10),
            sets_per_dial: Some(5.0),
            sets_per_contact: Some(0.25),
            five9_hours: Some(30.6),
            five9_hours_rounded: Some(30.5),
            sets_per_five9_hour: Some(0.33),
            paylocity_hours: Some("40.0".to_string()),
            five9_paylocity_ratio: Some("76.50%".to_string()),
        }
    }

    #[test]
    fn test_row_cells_follow_column_order() {
        let cells = row_cells(&sample_row());

        assert_eq!(cells[0], CellValue::Text("John D".to_string()));
        assert_eq!(cells[3], CellValue::Number(10.0));
        assert_eq!(cells[7], CellValue::Number(30.5));
        assert_eq!(cells[9], CellValue::Text("40.0".to_string()));
        assert_eq!(cells[10], CellValue::Text("76.50%".to_string()));
    }

    #[test]
    fn test_missing_values_are_blank() {
        let mut row = sample_row();
        row.sets_per_dial = None;
        row.paylocity_hours = None;
        let cells = row_cells(&row);

        assert_eq!(cells[4], CellValue::Blank);
        assert_eq!(cells[9], CellValue::Blank);
    }

    #[test]
    fn test_render_produces_xlsx_archive() {
        let bytes = XlsxReportWriter::new()
            .render_to_bytes(&[sample_row()])
            .unwrap();
        assert!(bytes.starts_with(b"PK"));
    }

    #[test]
    fn test_write_to_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.xlsx");
        XlsxReportWriter::new().write(&[sample_row()], &path).unwrap();

        assert!(path.exists());
        assert!(std::fs::metadata(&path).unwrap().len() > 0);
    }
}
