//! Dial totals per agent, joined with contacts and sets, plus the
//! per-dial and per-contact conversion ratios.

use crate::agent::{display_name, AgentKey};
use crate::pipeline::RunMetrics;
use crate::sources::ActivityLog;
use crate::transform::{ratio, round2, ContactSummary};
use std::collections::BTreeMap;

/// Activity chain output: one row per agent present in every activity source.
#[derive(Debug, Clone, PartialEq)]
pub struct DialSummary {
    pub agent: AgentKey,

    /// `"First L"`
    pub display_name: String,
    pub dials: f64,
    pub contacts: f64,
    pub sets: u64,

    /// Sets per 100 dials, 2 decimals; `None` with no dials
    pub sets_per_dial: Option<f64>,

    /// Sets per contact, 2 decimals; `None` with no contacts
    pub sets_per_contact: Option<f64>,
}

struct DialTotal {
    first_name: String,
    last_name: String,
    dials: f64,
}

/// Sum dials per agent key and inner-join with the contact summaries.
///
/// Several rows for one key are summed; the first row's names are kept.
pub fn aggregate_dials(
    dials: &ActivityLog,
    contacts: &[ContactSummary],
    metrics: &mut RunMetrics,
) -> Vec<DialSummary> {
    let mut totals: BTreeMap<AgentKey, DialTotal> = BTreeMap::new();
    for (row, total) in dials.totals() {
        let Some(login) = row.login.as_deref() else {
            continue;
        };
        totals
            .entry(AgentKey::from_login(login))
            .and_modify(|t| t.dials += total)
            .or_insert_with(|| DialTotal {
                first_name: row.first_name.clone().unwrap_or_default(),
                last_name: row.last_name.clone().unwrap_or_default(),
                dials: total,
            });
    }

    let joined: Vec<DialSummary> = contacts
        .iter()
        .filter_map(|summary| {
            let total = totals.get(&summary.agent)?;
            let sets = summary.sets as f64;
            Some(DialSummary {
                agent: summary.agent.clone(),
                display_name: display_name(&total.first_name, &total.last_name),
                dials: total.dials,
                contacts: summary.contacts,
                sets: summary.sets,
                sets_per_dial: ratio(sets, total.dials).map(|r| round2(r * 100.0)),
                sets_per_contact: ratio(sets, summary.contacts).map(round2),
            })
        })
        .collect();

    let dropped = totals.len() + contacts.len() - 2 * joined.len();
    metrics.record_dropped("dials", dropped);
    tracing::info!(
        "Dials: {} agents with dials, {} joined with contacts, {} dropped",
        totals.len(),
        joined.len(),
        dropped
    );

    joined
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sources::{ActivityRow, CategoryCounts};

    fn row(login: &str, first: &str, last: &str, dials: f64) -> ActivityRow {
        ActivityRow {
            login: Some(login.to_string()),
            first_name: Some(first.to_string()),
            last_name: Some(last.to_string()),
            counts: [("Outbound", Some(dials))].into_iter().collect::<CategoryCounts>(),
        }
    }

    fn contact(agent: &str, contacts: f64, sets: u64) -> ContactSummary {
        ContactSummary {
            agent: AgentKey::from_login(agent),
            contacts,
            sets,
        }
    }

    #[test]
    fn test_sets_per_dial_is_a_percentage() {
        let log = ActivityLog { rows: vec![row("jdoe@x.com", "John", "Doe", 20.0)] };
        let contacts = vec![contact("jdoe", 20.0, 5)];

        let mut metrics = RunMetrics::new();
        let joined = aggregate_dials(&log, &contacts, &mut metrics);

        assert_eq!(joined.len(), 1);
        let row = &joined[0];
        assert_eq!(row.display_name, "John D");
        assert_eq!(row.dials, 20.0);
        assert_eq!(row.sets_per_dial, Some(25.0));
        assert_eq!(row.sets_per_contact, Some(0.25));
    }

    #[test]
    fn test_zero_denominators_are_missing() {
        let log = ActivityLog { rows: vec![row("jdoe@x.com", "John", "Doe", 0.0)] };
        let contacts = vec![contact("jdoe", 0.0, 2)];

        let mut metrics = RunMetrics::new();
        let joined = aggregate_dials(&log, &contacts, &mut metrics);

        assert_eq!(joined[0].sets_per_dial, None);
        assert_eq!(joined[0].sets_per_contact, None);
    }

    #[test]
    fn test_agents_missing_from_either_side_are_dropped() {
        let log = ActivityLog {
            rows: vec![
                row("jdoe@x.com", "John", "Doe", 10.0),
                row("dialonly@x.com", "Dee", "Al", 10.0),
            ],
        };
        let contacts = vec![contact("jdoe", 5.0, 1), contact("contactonly", 5.0, 1)];

        let mut metrics = RunMetrics::new();
        let joined = aggregate_dials(&log, &contacts, &mut metrics);

        assert_eq!(joined.len(), 1);
        assert_eq!(joined[0].agent.as_str(), "jdoe");
        assert_eq!(metrics.dropped_rows.get("dials"), Some(&2));
    }
}
