//! Final report table: activity chain joined with talk time and payroll.

use crate::agent::AgentKey;
use crate::pipeline::RunMetrics;
use crate::transform::{
    ratio, round2, DialSummary, PayrollHours, RoundingTiers, TalkTime,
};
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};

/// One row of the finished report.
///
/// Rows that only exist in the payroll export carry a display name and the
/// payroll hours; every activity field is `None`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AgentMetricsRow {
    pub agent: Option<AgentKey>,
    pub display_name: String,
    pub dials: Option<f64>,
    pub contacts: Option<f64>,
    pub sets: Option<u64>,
    pub sets_per_dial: Option<f64>,
    pub sets_per_contact: Option<f64>,
    pub five9_hours: Option<f64>,
    pub five9_hours_rounded: Option<f64>,
    pub sets_per_five9_hour: Option<f64>,
    pub paylocity_hours: Option<String>,

    /// Five9 hours as a percentage of payroll hours, e.g. `"87.50%"`
    pub five9_paylocity_ratio: Option<String>,
}

impl AgentMetricsRow {
    fn from_activity(summary: &DialSummary, five9_hours: f64, tiers: &RoundingTiers) -> Self {
        let rounded = tiers.round_hours(five9_hours);
        Self {
            agent: Some(summary.agent.clone()),
            display_name: summary.display_name.clone(),
            dials: Some(summary.dials),
            contacts: Some(summary.contacts),
            sets: Some(summary.sets),
            sets_per_dial: summary.sets_per_dial,
            sets_per_contact: summary.sets_per_contact,
            five9_hours: Some(five9_hours),
            five9_hours_rounded: Some(rounded),
            sets_per_five9_hour: ratio(summary.sets as f64, rounded),
            paylocity_hours: None,
            five9_paylocity_ratio: None,
        }
    }

    fn payroll_only(payroll: &PayrollHours) -> Self {
        Self {
            agent: None,
            display_name: payroll.display_name.clone(),
            dials: None,
            contacts: None,
            sets: None,
            sets_per_dial: None,
            sets_per_contact: None,
            five9_hours: None,
            five9_hours_rounded: None,
            sets_per_five9_hour: None,
            paylocity_hours: Some(payroll.hours.clone()),
            five9_paylocity_ratio: None,
        }
    }
}

/// Five9 hours over payroll hours, as a 2-decimal percentage string.
///
/// A payroll value that is not a number is passed through unchanged; a zero
/// denominator or a missing side gives `None`.
pub fn five9_paylocity_ratio(five9_hours: Option<f64>, paylocity: Option<&str>) -> Option<String> {
    let paylocity = paylocity?;
    let Ok(denominator) = paylocity.trim().parse::<f64>() else {
        return Some(paylocity.to_string());
    };
    let value = ratio(five9_hours?, denominator)? * 100.0;
    Some(format!("{:.2}%", round2(value)))
}

/// Join the activity chain with talk time and payroll hours into the final,
/// sorted report rows.
pub fn consolidate(
    activity: &[DialSummary],
    talk_time: &[TalkTime],
    payroll: &[PayrollHours],
    tiers: &RoundingTiers,
    metrics: &mut RunMetrics,
) -> Vec<AgentMetricsRow> {
    let hours_by_agent: BTreeMap<&AgentKey, f64> = talk_time
        .iter()
        .map(|t| (&t.agent, t.five9_hours))
        .collect();

    let mut rows: Vec<AgentMetricsRow> = activity
        .iter()
        .filter_map(|summary| {
            let five9_hours = round2(*hours_by_agent.get(&summary.agent)?);
            Some(AgentMetricsRow::from_activity(summary, five9_hours, tiers))
        })
        .collect();

    let dropped = activity.len() + talk_time.len() - 2 * rows.len();
    metrics.record_dropped("talk_time", dropped);

    // Outer join on display name: many activity rows may share one payroll entry
    let payroll_by_name: BTreeMap<&str, &PayrollHours> = payroll
        .iter()
        .map(|p| (p.display_name.as_str(), p))
        .collect();
    let mut matched: BTreeSet<&str> = BTreeSet::new();
    let mut activity_only = 0usize;

    for row in &mut rows {
        match payroll_by_name.get_key_value(row.display_name.as_str()) {
            Some((name, entry)) => {
                matched.insert(*name);
                row.paylocity_hours = Some(entry.hours.clone());
                row.five9_paylocity_ratio =
                    five9_paylocity_ratio(row.five9_hours, row.paylocity_hours.as_deref());
            }
            None => activity_only += 1,
        }
    }

    let payroll_only: Vec<AgentMetricsRow> = payroll
        .iter()
        .filter(|p| !matched.contains(p.display_name.as_str()))
        .map(AgentMetricsRow::payroll_only)
        .collect();

    metrics.record_outer_join(matched.len(), activity_only, payroll_only.len());
    tracing::info!(
        "Consolidate: {} activity rows, {} matched payroll, {} activity only, {} payroll only",
        rows.len(),
        matched.len(),
        activity_only,
        payroll_only.len()
    );

    rows.extend(payroll_only);
    rows.sort_by(compare_rows);

    for row in &mut rows {
        row.sets_per_dial = row.sets_per_dial.map(round2);
        row.sets_per_contact = row.sets_per_contact.map(round2);
        row.five9_hours = row.five9_hours.map(round2);
        row.sets_per_five9_hour = row.sets_per_five9_hour.map(round2);
    }

    rows
}

/// Sets descending with missing sets last, then display name ascending.
fn compare_rows(a: &AgentMetricsRow, b: &AgentMetricsRow) -> Ordering {
    let by_sets = match (a.sets, b.sets) {
        (Some(x), Some(y)) => y.cmp(&x),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    };
    by_sets.then_with(|| a.display_name.cmp(&b.display_name))
}
