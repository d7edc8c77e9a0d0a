//! Call-center master list: one row per call attempt.

use crate::error::Result;
use crate::io::Table;

/// Bonus value marking a call that did not convert.
pub const ZERO_BONUS: &str = "$0.00";

/// A single row of the call log.
#[derive(Debug, Clone, PartialEq)]
pub struct CallRecord {
    /// Raw `Date/Time` value
    pub timestamp: Option<String>,

    /// Caller username as typed in the call log
    pub caller: Option<String>,

    /// Currency-formatted bonus amount
    pub bonus: Option<String>,
}

impl CallRecord {
    /// A call is a completed set unless its bonus is literally `$0.00`.
    ///
    /// The comparison is on the raw string: negative, malformed and missing
    /// bonus values all count.
    pub fn is_completed_set(&self) -> bool {
        self.bonus.as_deref() != Some(ZERO_BONUS)
    }

    /// Extract call records from the call-log table.
    pub fn from_table(table: &Table) -> Result<Vec<Self>> {
        let timestamp_col = table.find_column(&["Date/Time", "Date Time", "Timestamp"])?;
        let caller_col = table.find_column(&["BCI Caller", "Caller"])?;
        let bonus_col = table.find_column(&["WT/SA Bonus", "Bonus"])?;

        Ok((0..table.len())
            .map(|row| CallRecord {
                timestamp: table.cell(row, timestamp_col).map(str::to_string),
                caller: table.cell(row, caller_col).map(str::to_string),
                bonus: table.cell(row, bonus_col).map(str::to_string),
            })
            .collect())
    }
}
