//! Contact totals per agent, joined with completed sets.

use crate::agent::AgentKey;
use crate::pipeline::RunMetrics;
use crate::sources::ActivityLog;
use crate::transform::SetCounts;
use std::collections::BTreeMap;

/// An agent with both contacts and completed sets.
#[derive(Debug, Clone, PartialEq)]
pub struct ContactSummary {
    pub agent: AgentKey,
    pub contacts: f64,
    pub sets: u64,
}

/// Sum contacts per agent key and inner-join with `sets`.
///
/// Agents with contacts but no sets, or sets but no contacts, are dropped.
/// Several rows for the same key are merged.
pub fn aggregate_contacts(
    contacts: &ActivityLog,
    sets: &SetCounts,
    metrics: &mut RunMetrics,
) -> Vec<ContactSummary> {
    let mut totals: BTreeMap<AgentKey, f64> = BTreeMap::new();
    for (row, total) in contacts.totals() {
        let Some(login) = row.login.as_deref() else {
            continue;
        };
        *totals.entry(AgentKey::from_login(login)).or_insert(0.0) += total;
    }

    let joined: Vec<ContactSummary> = totals
        .iter()
        .filter_map(|(agent, contacts)| {
            sets.get(agent).map(|sets| ContactSummary {
                agent: agent.clone(),
                contacts: *contacts,
                sets: *sets,
            })
        })
        .collect();

    let dropped = totals.len() + sets.len() - 2 * joined.len();
    metrics.record_dropped("contacts", dropped);
    tracing::info!(
        "Contacts: {} agents with contacts, {} joined with sets, {} dropped",
        totals.len(),
        joined.len(),
        dropped
    );

    joined
}
