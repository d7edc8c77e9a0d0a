//! Typed views over the five report inputs.

mod activity;
mod call_log;
mod five9;
mod payroll;

pub use activity::{ActivityLog, ActivityRow, CategoryCounts};
pub use call_log::{CallRecord, ZERO_BONUS};
pub use five9::{DurationParts, Five9Row};
pub use payroll::{HoursRow, IdRow, PayrollSheet, HOURS_COLUMN, ID_MARKER, NAME_COLUMN};

use crate::config::InputConfig;
use crate::error::Result;
use crate::io::Table;
use crate::pipeline::RunMetrics;

/// Source name of the call-center master list.
pub const CALL_CENTER_DATA: &str = "call_center_data";
/// Source name of the warm dial totals.
pub const DIALS_DATA: &str = "dials_data";
/// Source name of the warm contact totals.
pub const CONTACTS_DATA: &str = "contacts_data";
/// Source name of the Five9 agent daily summary.
pub const FIVE9_DATA: &str = "five9_data";
/// Source name of the Paylocity timecard summary.
pub const PAYLOCITY_DATA: &str = "paylocity_data";

/// Every source a report run needs.
pub const REQUIRED_SOURCES: [&str; 5] = [
    CALL_CENTER_DATA,
    DIALS_DATA,
    CONTACTS_DATA,
    FIVE9_DATA,
    PAYLOCITY_DATA,
];

/// All five inputs, fully loaded before any stage runs.
#[derive(Debug, Clone, Default)]
pub struct InputTables {
    pub calls: Vec<CallRecord>,
    pub contacts: ActivityLog,
    pub dials: ActivityLog,
    pub five9: Vec<Five9Row>,
    pub payroll: Table,
}

impl InputTables {
    /// Load every source named in the input configuration.
    ///
    /// The configuration must already be validated; a missing source name is
    /// reported here as well so this can be called on its own.
    pub fn load(input: &InputConfig, metrics: &mut RunMetrics) -> Result<Self> {
        input.check_sources()?;

        let calls_table = Table::from_csv_path(CALL_CENTER_DATA, input.source(CALL_CENTER_DATA)?)?;
        let contacts_table = Table::from_csv_path(CONTACTS_DATA, input.source(CONTACTS_DATA)?)?;
        let dials_table = Table::from_csv_path(DIALS_DATA, input.source(DIALS_DATA)?)?;
        let five9_table = Table::from_csv_path(FIVE9_DATA, input.source(FIVE9_DATA)?)?;
        let payroll =
            Table::from_headerless_csv_path(PAYLOCITY_DATA, input.source(PAYLOCITY_DATA)?)?;

        metrics.record_loaded(CALL_CENTER_DATA, calls_table.len());
        metrics.record_loaded(CONTACTS_DATA, contacts_table.len());
        metrics.record_loaded(DIALS_DATA, dials_table.len());
        metrics.record_loaded(FIVE9_DATA, five9_table.len());
        metrics.record_loaded(PAYLOCITY_DATA, payroll.len());

        let tables = Self {
            calls: CallRecord::from_table(&calls_table)?,
            contacts: ActivityLog::from_table(&contacts_table, &[])?,
            dials: ActivityLog::from_table(&dials_table, &input.grouping_columns)?,
            five9: Five9Row::from_table(&five9_table)?,
            payroll,
        };

        tracing::info!(
            "Loaded inputs: {} calls, {} contact rows, {} dial rows, {} Five9 rows, {} payroll rows",
            tables.calls.len(),
            tables.contacts.len(),
            tables.dials.len(),
            tables.five9.len(),
            tables.payroll.len()
        );

        Ok(tables)
    }
}
