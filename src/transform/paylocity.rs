//! Approved working hours per agent from the Paylocity timecard summary.

use crate::agent::{display_name, NameTables};
use crate::error::{ReportError, Result};
use crate::io::Table;
use crate::pipeline::RunMetrics;
use crate::sources::{PayrollSheet, HOURS_COLUMN};
use std::collections::BTreeMap;

/// One agent block of the payroll sheet, paired with its hours figure.
#[derive(Debug, Clone, PartialEq)]
pub struct PayrollBlock {
    /// Position of the block among the `ID:` rows
    pub block_index: usize,
    pub raw_name: String,
    pub hours: f64,
}

/// Payroll hours keyed by the `"First L"` display name.
#[derive(Debug, Clone, PartialEq)]
pub struct PayrollHours {
    pub display_name: String,

    /// Hours as a numeric string (`40.0`, `37.5`)
    pub hours: String,
}

/// Pair `ID:` rows with hours rows by position.
///
/// The sheet carries no explicit link between a name and its hours; the
/// n-th name owns the n-th parseable hours figure. Unequal counts mean the
/// export layout changed and abort the run.
pub fn pair_blocks(sheet: &PayrollSheet) -> Result<Vec<PayrollBlock>> {
    if sheet.id_rows.len() != sheet.hours_rows.len() {
        return Err(ReportError::PayrollStructure(format!(
            "found {} agent ID rows but {} hours rows in column {}",
            sheet.id_rows.len(),
            sheet.hours_rows.len(),
            HOURS_COLUMN
        )));
    }

    sheet
        .id_rows
        .iter()
        .zip(&sheet.hours_rows)
        .enumerate()
        .map(|(block_index, (id, hours))| {
            let raw_name = id.raw_name.clone().ok_or_else(|| {
                ReportError::PayrollStructure(format!("ID row {} has no agent name", id.row + 1))
            })?;
            if hours.row < id.row {
                tracing::warn!(
                    "Hours on row {} precede the ID row {} they are paired with ({})",
                    hours.row + 1,
                    id.row + 1,
                    raw_name
                );
            }
            Ok(PayrollBlock {
                block_index,
                raw_name,
                hours: hours.hours,
            })
        })
        .collect()
}

/// Build the `"First L"` display name from `"LASTNAME, firstname ..."`.
///
/// The first word of the field after the first comma is lower-cased,
/// capitalized and passed through the nickname table; later comma fields
/// (suffixes) are ignored. The initial is the first character of the raw
/// name. A name without a comma is returned trimmed as-is.
pub fn payroll_display_name(raw_name: &str, names: &NameTables) -> String {
    let Some(given) = raw_name.split(',').nth(1) else {
        tracing::warn!("Payroll name '{}' is not in 'Last, First' form", raw_name);
        return raw_name.trim().to_string();
    };
    let first = capitalize(given.split_whitespace().next().unwrap_or(""));
    let first = names.expand_nickname(&first);
    display_name(first, raw_name)
}

/// Upper-case the first character and lower-case the rest.
fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(c) => c.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

/// Format hours the way the payroll column is shown: at least one decimal.
pub fn format_hours(hours: f64) -> String {
    if hours.fract() == 0.0 {
        format!("{hours:.1}")
    } else {
        hours.to_string()
    }
}

/// Extract payroll hours per display name.
///
/// Display names that occur in several blocks are merged by summing hours.
pub fn extract_payroll_hours(
    payroll: &Table,
    names: &NameTables,
    metrics: &mut RunMetrics,
) -> Result<Vec<PayrollHours>> {
    let sheet = PayrollSheet::scan(payroll);
    metrics.add_payroll_cells_skipped(sheet.skipped_cells);

    let blocks = pair_blocks(&sheet)?;

    let mut hours_by_name: BTreeMap<String, f64> = BTreeMap::new();
    for block in &blocks {
        let name = payroll_display_name(&block.raw_name, names);
        if let Some(existing) = hours_by_name.get_mut(&name) {
            tracing::warn!(
                "Payroll block {} repeats display name '{}'; summing hours",
                block.block_index,
                name
            );
            *existing += block.hours;
        } else {
            hours_by_name.insert(name, block.hours);
        }
    }

    tracing::info!(
        "Payroll: {} agent blocks, {} display names, {} non-numeric cells skipped",
        blocks.len(),
        hours_by_name.len(),
        sheet.skipped_cells
    );

    Ok(hours_by_name
        .into_iter()
        .map(|(display_name, hours)| PayrollHours {
            display_name,
            hours: format_hours(hours),
        })
        .collect())
}
