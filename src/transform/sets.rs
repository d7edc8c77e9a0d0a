//! Completed-set counts per agent from the call log.

use crate::agent::{AgentKey, NameTables};
use crate::date_range::{parse_call_date, DateRange};
use crate::pipeline::RunMetrics;
use crate::sources::CallRecord;
use std::collections::BTreeMap;

/// Completed sets per canonical agent. Agents without a set in range are
/// absent rather than zero.
pub type SetCounts = BTreeMap<AgentKey, u64>;

/// Count completed sets per caller inside `range`.
///
/// Callers are matched case-insensitively and aliased callers are summed
/// into their canonical key. Calls with a missing caller are ignored; calls
/// whose timestamp cannot be read are skipped and counted.
pub fn extract_sets(
    calls: &[CallRecord],
    range: &DateRange,
    names: &NameTables,
    metrics: &mut RunMetrics,
) -> SetCounts {
    let mut sets = SetCounts::new();
    let mut in_range = 0usize;

    for call in calls {
        let date = match call.timestamp.as_deref().map(|ts| (ts, parse_call_date(ts))) {
            Some((_, Some(date))) => date,
            Some((raw, None)) => {
                tracing::warn!("Skipping call with unreadable timestamp '{}'", raw);
                metrics.add_unreadable_timestamp();
                continue;
            }
            None => {
                metrics.add_unreadable_timestamp();
                continue;
            }
        };
        if !range.contains(date) {
            continue;
        }
        in_range += 1;

        if !call.is_completed_set() {
            continue;
        }
        let Some(caller) = call.caller.as_deref() else {
            continue;
        };
        *sets.entry(AgentKey::from_caller(caller, names)).or_insert(0) += 1;
    }

    let completed: u64 = sets.values().sum();
    metrics.add_calls_in_range(in_range);
    metrics.add_completed_sets(completed);

    tracing::info!(
        "Sets: {} calls in {}, {} completed sets across {} agents",
        in_range,
        range,
        completed,
        sets.len()
    );

    sets
}
