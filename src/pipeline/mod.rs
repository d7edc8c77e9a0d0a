//! Pipeline orchestration and run metrics.

mod metrics;
mod stages;

#[cfg(test)]
mod pipeline_integration_tests;

pub use metrics::{MetricsSnapshot, OuterJoinCounts, RunMetrics};
pub use stages::{run_report, Pipeline, Report, ReportOutcome};
