//! Five9 agent daily summary: per-agent, per-day state durations.

use crate::error::Result;
use crate::io::Table;
use std::ops::AddAssign;

const AGENT_COLUMNS: &[&str] = &["AGENT", "Agent"];
const ON_CALL_COLUMNS: &[&str] = &["On Call / AGENT STATE TIME", "On Call"];
const READY_COLUMNS: &[&str] = &["Ready / AGENT STATE TIME", "Ready"];

/// Hour, minute and second components kept apart so they can be summed
/// independently across rows.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DurationParts {
    pub hours: f64,
    pub minutes: f64,
    pub seconds: f64,
}

impl DurationParts {
    /// Split an `H:MM:SS` string. Hours may exceed 24.
    ///
    /// Returns `None` unless there are exactly three numeric components.
    pub fn parse(value: &str) -> Option<Self> {
        let mut parts = value.trim().split(':').map(|p| p.trim().parse::<f64>());
        let hours = parts.next()?.ok()?;
        let minutes = parts.next()?.ok()?;
        let seconds = parts.next()?.ok()?;
        if parts.next().is_some() {
            return None;
        }
        Some(Self { hours, minutes, seconds })
    }

    /// Fractional hours: `hours + minutes / 60 + seconds / 3600`.
    pub fn as_hours(&self) -> f64 {
        self.hours + self.minutes / 60.0 + self.seconds / 3600.0
    }
}

impl AddAssign for DurationParts {
    fn add_assign(&mut self, rhs: Self) {
        self.hours += rhs.hours;
        self.minutes += rhs.minutes;
        self.seconds += rhs.seconds;
    }
}

/// One Five9 summary row with its raw duration strings.
#[derive(Debug, Clone, PartialEq)]
pub struct Five9Row {
    /// Raw agent identifier (email-like)
    pub agent: Option<String>,
    pub on_call: Option<String>,
    pub ready: Option<String>,
}

impl Five9Row {
    /// Extract rows from the Five9 summary table.
    pub fn from_table(table: &Table) -> Result<Vec<Self>> {
        let agent_col = table.find_column(AGENT_COLUMNS)?;
        let on_call_col = table.find_column(ON_CALL_COLUMNS)?;
        let ready_col = table.find_column(READY_COLUMNS)?;

        Ok((0..table.len())
            .map(|row| Five9Row {
                agent: table.cell(row, agent_col).map(str::to_string),
                on_call: table.cell(row, on_call_col).map(str::to_string),
                ready: table.cell(row, ready_col).map(str::to_string),
            })
            .collect())
    }
}
