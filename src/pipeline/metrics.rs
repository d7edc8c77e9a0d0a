//! Run metrics: what was loaded, skipped and dropped along the way.

use serde::{Serialize, Serializer};
use std::collections::BTreeMap;
use std::path::Path;
use std::time::{Duration, Instant};

fn serialize_duration<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_f64(duration.as_secs_f64())
}

/// Outcome of the payroll outer join.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct OuterJoinCounts {
    /// Activity rows that found a payroll entry
    pub matched: usize,

    /// Activity rows without payroll hours
    pub activity_only: usize,

    /// Payroll entries without activity
    pub payroll_only: usize,
}

/// Counters collected while the pipeline runs.
///
/// Owned by the pipeline and lent mutably to one stage at a time.
#[derive(Debug, Default)]
pub struct RunMetrics {
    /// Data rows read per source
    pub rows_loaded: BTreeMap<String, usize>,

    /// Calls whose date fell inside the report window
    pub calls_in_range: usize,

    /// Completed sets counted inside the window
    pub completed_sets: u64,

    /// Calls skipped for a missing or unreadable timestamp
    pub unreadable_timestamps: usize,

    /// Five9 rows skipped for a malformed duration
    pub malformed_durations: usize,

    /// Non-numeric payroll hours cells skipped
    pub payroll_cells_skipped: usize,

    /// Agents dropped by each inner join, keyed by stage
    pub dropped_rows: BTreeMap<String, usize>,

    pub outer_join: OuterJoinCounts,

    /// Rows in the finished report
    pub output_rows: usize,

    start_time: Option<Instant>,
}

impl RunMetrics {
    /// Create new metrics.
    pub fn new() -> Self {
        Self {
            start_time: Some(Instant::now()),
            ..Self::default()
        }
    }

    /// Record rows loaded from a source.
    pub fn record_loaded(&mut self, source: &str, rows: usize) {
        self.rows_loaded.insert(source.to_string(), rows);
    }

    /// Record an unreadable call timestamp.
    pub fn add_unreadable_timestamp(&mut self) {
        self.unreadable_timestamps += 1;
    }

    pub fn add_calls_in_range(&mut self, count: usize) {
        self.calls_in_range += count;
    }

    pub fn add_completed_sets(&mut self, count: u64) {
        self.completed_sets += count;
    }

    /// Record a Five9 row with a malformed duration.
    pub fn add_malformed_duration(&mut self) {
        self.malformed_durations += 1;
    }

    pub fn add_payroll_cells_skipped(&mut self, count: usize) {
        self.payroll_cells_skipped += count;
    }

    /// Record agents dropped by an inner join.
    pub fn record_dropped(&mut self, stage: &str, count: usize) {
        *self.dropped_rows.entry(stage.to_string()).or_insert(0) += count;
    }

    /// Record the payroll outer join outcome.
    pub fn record_outer_join(&mut self, matched: usize, activity_only: usize, payroll_only: usize) {
        self.outer_join = OuterJoinCounts {
            matched,
            activity_only,
            payroll_only,
        };
    }

    pub fn set_output_rows(&mut self, rows: usize) {
        self.output_rows = rows;
    }

    /// Get elapsed time since start.
    pub fn elapsed(&self) -> Duration {
        self.start_time.map_or(Duration::ZERO, |t| t.elapsed())
    }

    /// Get a snapshot of current metrics.
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            rows_loaded: self.rows_loaded.clone(),
            calls_in_range: self.calls_in_range,
            completed_sets: self.completed_sets,
            unreadable_timestamps: self.unreadable_timestamps,
            malformed_durations: self.malformed_durations,
            payroll_cells_skipped: self.payroll_cells_skipped,
            dropped_rows: self.dropped_rows.clone(),
            outer_join: self.outer_join,
            output_rows: self.output_rows,
            elapsed: self.elapsed(),
        }
    }
}

/// Snapshot of run metrics at a point in time.
#[derive(Debug, Clone, Serialize)]
pub struct MetricsSnapshot {
    pub rows_loaded: BTreeMap<String, usize>,
    pub calls_in_range: usize,
    pub completed_sets: u64,
    pub unreadable_timestamps: usize,
    pub malformed_durations: usize,
    pub payroll_cells_skipped: usize,
    pub dropped_rows: BTreeMap<String, usize>,
    pub outer_join: OuterJoinCounts,
    pub output_rows: usize,
    #[serde(serialize_with = "serialize_duration")]
    pub elapsed: Duration,
}

impl MetricsSnapshot {
    /// Save metrics to a JSON file.
    pub fn save_to_file(&self, path: &Path) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        tracing::info!("Metrics saved to {}", path.display());
        Ok(())
    }

    fn total_dropped(&self) -> usize {
        self.dropped_rows.values().sum()
    }
}

impl std::fmt::Display for MetricsSnapshot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Rows: {} | Calls in range: {} | Sets: {} | \
             Skipped: {} timestamps, {} durations, {} payroll cells | \
             Dropped by joins: {} | Payroll: {} matched, {} activity only, {} payroll only | \
             Elapsed: {:.2}s",
            self.output_rows,
            self.calls_in_range,
            self.completed_sets,
            self.unreadable_timestamps,
            self.malformed_durations,
            self.payroll_cells_skipped,
            self.total_dropped(),
            self.outer_join.matched,
            self.outer_join.activity_only,
            self.outer_join.payroll_only,
            self.elapsed.as_secs_f64()
        )
    }
}
