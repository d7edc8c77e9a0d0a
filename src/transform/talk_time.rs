//! Five9 "On Call" + "Ready" hours per agent.

use crate::agent::AgentKey;
use crate::pipeline::RunMetrics;
use crate::sources::{DurationParts, Five9Row};
use crate::transform::round2;
use std::collections::BTreeMap;

/// Summed state durations for one agent.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
struct StateTotals {
    on_call: DurationParts,
    ready: DurationParts,
}

/// Calling hours for one agent.
#[derive(Debug, Clone, PartialEq)]
pub struct TalkTime {
    pub agent: AgentKey,

    /// On Call plus Ready, fractional hours rounded to 2 decimals
    pub five9_hours: f64,
}

/// Total Five9 calling hours per agent.
///
/// Hour, minute and second components are summed separately per raw agent
/// identifier before conversion. Identifiers that collapse to one agent key
/// are merged. Rows with a malformed duration are skipped; an empty duration
/// cell counts as zero.
pub fn aggregate_talk_time(rows: &[Five9Row], metrics: &mut RunMetrics) -> Vec<TalkTime> {
    let mut by_raw: BTreeMap<&str, StateTotals> = BTreeMap::new();

    for row in rows {
        let Some(agent) = row.agent.as_deref() else {
            continue;
        };
        let (Some(on_call), Some(ready)) = (parse_cell(&row.on_call), parse_cell(&row.ready)) else {
            tracing::warn!(
                "Skipping Five9 row for {} with malformed duration (on call {:?}, ready {:?})",
                agent,
                row.on_call,
                row.ready
            );
            metrics.add_malformed_duration();
            continue;
        };
        let totals = by_raw.entry(agent).or_default();
        totals.on_call += on_call;
        totals.ready += ready;
    }

    let mut by_key: BTreeMap<AgentKey, StateTotals> = BTreeMap::new();
    for (raw, totals) in by_raw {
        let merged = by_key.entry(AgentKey::from_login(raw)).or_default();
        merged.on_call += totals.on_call;
        merged.ready += totals.ready;
    }

    let talk_time: Vec<TalkTime> = by_key
        .into_iter()
        .map(|(agent, totals)| {
            let on_call = round2(totals.on_call.as_hours());
            let ready = round2(totals.ready.as_hours());
            tracing::debug!("{}: on call {:.2}h, ready {:.2}h", agent, on_call, ready);
            TalkTime {
                agent,
                five9_hours: round2(on_call + ready),
            }
        })
        .collect();

    tracing::info!("Talk time: {} agents with Five9 hours", talk_time.len());
    talk_time
}

fn parse_cell(cell: &Option<String>) -> Option<DurationParts> {
    match cell.as_deref() {
        Some(value) => DurationParts::parse(value),
        None => Some(DurationParts::default()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(agent: &str, on_call: &str, ready: &str) -> Five9Row {
        Five9Row {
            agent: Some(agent.to_string()),
            on_call: Some(on_call.to_string()),
            ready: Some(ready.to_string()),
        }
    }

    #[test]
    fn test_components_summed_before_conversion() {
        let rows = vec![
            row("jdoe@x.com", "2:45:00", "0:30:00"),
            row("jdoe@x.com", "3:30:00", "0:15:00"),
        ];
        let mut metrics = RunMetrics::new();
        let totals = aggregate_talk_time(&rows, &mut metrics);

        // On call: 5h + 75m = 6.25; ready: 45m = 0.75
        assert_eq!(totals.len(), 1);
        assert_eq!(totals[0].agent.as_str(), "jdoe");
        assert_eq!(totals[0].five9_hours, 7.0);
    }

    #[test]
    fn test_seconds_and_rounding() {
        let rows = vec![row("jdoe@x.com", "1:00:36", "0:00:00")];
        let mut metrics = RunMetrics::new();
        let totals = aggregate_talk_time(&rows, &mut metrics);

        // 36s = 0.01h
        assert_eq!(totals[0].five9_hours, 1.01);
    }

    #[test]
    fn test_raw_identifiers_sharing_a_key_are_merged() {
        let rows = vec![
            row("jdoe@x.com", "1:00:00", "0:00:00"),
            row("JDOE@y.org", "2:00:00", "0:30:00"),
        ];
        let mut metrics = RunMetrics::new();
        let totals = aggregate_talk_time(&rows, &mut metrics);

        assert_eq!(totals.len(), 1);
        assert_eq!(totals[0].five9_hours, 3.5);
    }

    #[test]
    fn test_malformed_rows_are_skipped_and_empty_cells_are_zero() {
        let rows = vec![
            row("jdoe@x.com", "bad", "0:30:00"),
            Five9Row {
                agent: Some("jdoe@x.com".to_string()),
                on_call: Some("1:00:00".to_string()),
                ready: None,
            },
        ];
        let mut metrics = RunMetrics::new();
        let totals = aggregate_talk_time(&rows, &mut metrics);

        assert_eq!(totals[0].five9_hours, 1.0);
        assert_eq!(metrics.malformed_durations, 1);
    }
}
