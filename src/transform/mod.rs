//! Report stages: per-source aggregation, joins and derived ratios.

mod consolidate;
mod contacts;
mod dials;
mod paylocity;
mod rounding;
mod sets;
mod talk_time;

pub use consolidate::{consolidate, five9_paylocity_ratio, AgentMetricsRow};
pub use contacts::{aggregate_contacts, ContactSummary};
pub use dials::{aggregate_dials, DialSummary};
pub use paylocity::{
    extract_payroll_hours, format_hours, pair_blocks, payroll_display_name, PayrollBlock,
    PayrollHours,
};
pub use rounding::{RoundingTier, RoundingTiers, SplitHours};
pub use sets::{extract_sets, SetCounts};
pub use talk_time::{aggregate_talk_time, TalkTime};

/// Round to 2 decimal places, halves away from zero.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// `numerator / denominator`, or `None` when the result would not be a
/// finite number.
pub fn ratio(numerator: f64, denominator: f64) -> Option<f64> {
    if denominator == 0.0 {
        return None;
    }
    let value = numerator / denominator;
    value.is_finite().then_some(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ratio_zero_denominator() {
        assert_eq!(ratio(5.0, 0.0), None);
        assert_eq!(ratio(0.0, 0.0), None);
        assert_eq!(ratio(5.0, 20.0), Some(0.25));
    }

    #[test]
    fn test_round2() {
        assert_eq!(round2(1.234), 1.23);
        assert_eq!(round2(1.236), 1.24);
        assert_eq!(round2(33.333333), 33.33);
    }
}
