//! Warm dial and warm contact totals: one row per agent with a variable set
//! of per-category count columns.

use crate::error::Result;
use crate::io::{parse_number, Table};
use std::collections::{BTreeMap, BTreeSet};

const AGENT_COLUMNS: &[&str] = &["AGENT", "Agent", "AGENT EMAIL"];
const FIRST_NAME_COLUMNS: &[&str] = &["AGENT FIRST NAME", "First Name"];
const LAST_NAME_COLUMNS: &[&str] = &["AGENT LAST NAME", "Last Name"];

/// Per-category counts for one agent row.
///
/// A category maps to `None` when its cell was empty. Whether an empty cell
/// counts as zero depends on the rest of the column, see
/// [`ActivityLog::contributing_categories`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CategoryCounts {
    counts: BTreeMap<String, Option<f64>>,
}

impl CategoryCounts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, category: impl Into<String>, value: Option<f64>) {
        self.counts.insert(category.into(), value);
    }

    /// Count for a category, `None` when absent or empty.
    pub fn get(&self, category: &str) -> Option<f64> {
        self.counts.get(category).copied().flatten()
    }

    /// Sum over the contributing categories, missing cells as zero.
    pub fn total(&self, contributing: &BTreeSet<String>) -> f64 {
        contributing
            .iter()
            .map(|category| self.get(category).unwrap_or(0.0))
            .sum()
    }

    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.counts.keys().map(String::as_str)
    }
}

impl<S: Into<String>> FromIterator<(S, Option<f64>)> for CategoryCounts {
    fn from_iter<I: IntoIterator<Item = (S, Option<f64>)>>(iter: I) -> Self {
        Self {
            counts: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}

/// One agent row of a dial or contact export.
#[derive(Debug, Clone, PartialEq)]
pub struct ActivityRow {
    /// Email-like login identifying the agent
    pub login: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub counts: CategoryCounts,
}

/// A dial or contact export reduced to typed rows.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ActivityLog {
    pub rows: Vec<ActivityRow>,
}

impl ActivityLog {
    /// Extract activity rows, dropping `excluded` columns before the
    /// numeric category columns are identified.
    pub fn from_table(table: &Table, excluded: &[String]) -> Result<Self> {
        let agent_col = table.find_column(AGENT_COLUMNS)?;
        let first_col = table.find_column(FIRST_NAME_COLUMNS).ok();
        let last_col = table.find_column(LAST_NAME_COLUMNS).ok();

        let identity: BTreeSet<usize> = [Some(agent_col), first_col, last_col]
            .into_iter()
            .flatten()
            .collect();

        let category_cols: Vec<(usize, &str)> = table
            .headers
            .iter()
            .enumerate()
            .filter(|(idx, header)| {
                !identity.contains(idx)
                    && !excluded.iter().any(|e| e == *header)
                    && table.is_numeric_column(*idx)
            })
            .map(|(idx, header)| (idx, header.as_str()))
            .collect();

        tracing::debug!(
            "{}: {} category columns {:?}",
            table.name,
            category_cols.len(),
            category_cols.iter().map(|(_, h)| *h).collect::<Vec<_>>()
        );

        let rows = (0..table.len())
            .map(|row| ActivityRow {
                login: table.cell(row, agent_col).map(str::to_string),
                first_name: first_col
                    .and_then(|col| table.cell(row, col))
                    .map(str::to_string),
                last_name: last_col
                    .and_then(|col| table.cell(row, col))
                    .map(str::to_string),
                counts: category_cols
                    .iter()
                    .map(|(col, header)| (*header, table.cell(row, *col).and_then(parse_number)))
                    .collect(),
            })
            .collect();

        Ok(Self { rows })
    }

    /// Categories with at least one present value anywhere in the log.
    ///
    /// Entirely empty categories are excluded from totals rather than
    /// treated as zero contributors.
    pub fn contributing_categories(&self) -> BTreeSet<String> {
        self.rows
            .iter()
            .flat_map(|row| {
                row.counts
                    .counts
                    .iter()
                    .filter(|(_, value)| value.is_some())
                    .map(|(category, _)| category.clone())
            })
            .collect()
    }

    /// Each row paired with its total over the contributing categories.
    pub fn totals(&self) -> Vec<(&ActivityRow, f64)> {
        let contributing = self.contributing_categories();
        self.rows
            .iter()
            .map(|row| (row, row.counts.total(&contributing)))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
