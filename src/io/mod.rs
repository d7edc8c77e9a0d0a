//! I/O: CSV table loading and Excel report writing.

mod table;
mod xlsx_writer;

pub use table::{parse_number, Table, MISSING_TOKENS};
pub use xlsx_writer::{row_cells, CellValue, XlsxReportWriter, REPORT_COLUMNS, SHEET_NAME};
