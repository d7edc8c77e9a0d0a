//! Agent Call-Center Metrics
//!
//! Builds the weekly per-agent performance report for a call center from five
//! exported CSV files, and writes it as a single-sheet Excel workbook.
//!
//! # Architecture
//!
//! The report is built in stages:
//!
//! - **Sources**: typed views over the call log, dial and contact logs, the
//!   Five9 daily summary and the Paylocity timecard sheet
//! - **Transform**: set extraction, activity joins, talk time, payroll hours
//!   and the final consolidation with derived ratios
//! - **Pipeline**: stage ordering and run metrics
//! - **I/O**: CSV tables in, xlsx workbook out
//!
//! # Usage
//!
//! ```no_run
//! use agent_metrics::{parse_report_date, run_report, Config, DateRange};
//! use std::path::Path;
//!
//! fn main() -> anyhow::Result<()> {
//!     let config = Config::from_file(Path::new("config.yaml"))?;
//!     let range = DateRange::new(
//!         parse_report_date("2024-01-08")?,
//!         parse_report_date("2024-01-14")?,
//!     )?;
//!     let outcome = run_report(&config, range)?;
//!     println!("{}", outcome.path.display());
//!     Ok(())
//! }
//! ```

pub mod agent;
pub mod config;
pub mod date_range;
pub mod error;
pub mod io;
pub mod pipeline;
pub mod sources;
pub mod transform;

pub use agent::{AgentKey, NameTables};
pub use config::Config;
pub use date_range::{parse_report_date, DateRange};
pub use error::ReportError;
pub use pipeline::{run_report, MetricsSnapshot, Pipeline, Report, ReportOutcome, RunMetrics};
pub use transform::{AgentMetricsRow, RoundingTiers};
