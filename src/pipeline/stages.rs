//! Report pipeline: load every input, then run the stages in a fixed order.
//!
//! ```text
//! calls ──▶ sets ──▶ contacts ──▶ dials ─┐
//!                                        ├──▶ consolidate ──▶ workbook
//! five9 ──▶ talk time ───────────────────┤
//! payroll ──▶ payroll hours ─────────────┘
//! ```
//!
//! Every input is fully loaded before the first stage runs, and each stage
//! only reads the outputs of the stages before it. Running the same inputs
//! over the same window always yields the same rows.

use crate::agent::NameTables;
use crate::config::Config;
use crate::date_range::DateRange;
use crate::error::Result;
use crate::io::XlsxReportWriter;
use crate::pipeline::{MetricsSnapshot, RunMetrics};
use crate::sources::InputTables;
use crate::transform::{
    aggregate_contacts, aggregate_dials, aggregate_talk_time, consolidate, extract_payroll_hours,
    extract_sets, AgentMetricsRow, RoundingTiers,
};
use std::path::{Path, PathBuf};

/// Loaded inputs plus the tables that shape the stages.
#[derive(Debug, Clone)]
pub struct Pipeline {
    inputs: InputTables,
    names: NameTables,
    tiers: RoundingTiers,
}

impl Pipeline {
    /// Create a new pipeline over already-loaded inputs.
    pub fn new(inputs: InputTables, names: NameTables, tiers: RoundingTiers) -> Self {
        Self {
            inputs,
            names,
            tiers,
        }
    }

    /// Load every configured source and build a pipeline over them.
    pub fn from_config(config: &Config, metrics: &mut RunMetrics) -> Result<Self> {
        let inputs = InputTables::load(&config.input, metrics)?;
        Ok(Self::new(
            inputs,
            config.names.clone(),
            config.rounding.clone(),
        ))
    }

    pub fn inputs(&self) -> &InputTables {
        &self.inputs
    }

    /// Run all stages for one reporting window.
    pub fn run(&self, range: &DateRange, metrics: &mut RunMetrics) -> Result<Report> {
        tracing::info!("Building agent metrics for {} to {}", range.start(), range.end());

        let sets = extract_sets(&self.inputs.calls, range, &self.names, metrics);
        let contacts = aggregate_contacts(&self.inputs.contacts, &sets, metrics);
        let activity = aggregate_dials(&self.inputs.dials, &contacts, metrics);
        let talk_time = aggregate_talk_time(&self.inputs.five9, metrics);
        let payroll = extract_payroll_hours(&self.inputs.payroll, &self.names, metrics)?;

        let rows = consolidate(&activity, &talk_time, &payroll, &self.tiers, metrics);
        metrics.set_output_rows(rows.len());

        Ok(Report {
            date_range: *range,
            rows,
        })
    }
}

/// The finished report for one window.
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub date_range: DateRange,
    pub rows: Vec<AgentMetricsRow>,
}

impl Report {
    /// `agent_call_center_metrics_<start>_<end>.xlsx`
    pub fn file_name(&self) -> String {
        format!("agent_call_center_metrics_{}.xlsx", self.date_range)
    }

    /// Write the workbook into `directory`, returning its path.
    pub fn write_xlsx(&self, directory: &Path) -> Result<PathBuf> {
        std::fs::create_dir_all(directory)?;
        let path = directory.join(self.file_name());
        XlsxReportWriter::new().write(&self.rows, &path)?;
        Ok(path)
    }
}

impl std::fmt::Display for Report {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} rows for {} to {}",
            self.rows.len(),
            self.date_range.start(),
            self.date_range.end()
        )
    }
}

/// Result of a complete report run.
#[derive(Debug, Clone)]
pub struct ReportOutcome {
    pub path: PathBuf,
    pub report: Report,
    pub metrics: MetricsSnapshot,
}

/// Validate the configuration, load the inputs, build the report and write
/// the workbook.
pub fn run_report(config: &Config, range: DateRange) -> anyhow::Result<ReportOutcome> {
    config.validate()?;

    let mut metrics = RunMetrics::new();
    let pipeline = Pipeline::from_config(config, &mut metrics)?;
    let report = pipeline.run(&range, &mut metrics)?;
    let path = report.write_xlsx(&config.output.directory)?;

    let snapshot = metrics.snapshot();
    tracing::info!("Report complete: {}", report);
    tracing::info!("{}", snapshot);

    if let Some(metrics_path) = &config.output.metrics_path {
        snapshot.save_to_file(metrics_path)?;
    }

    Ok(ReportOutcome {
        path,
        report,
        metrics: snapshot,
    })
}
