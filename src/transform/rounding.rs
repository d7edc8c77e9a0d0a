//! Quarter-hour rounding of Five9 hours.
//!
//! Five9 hours arrive as a decimal like `7.60`. The integer part is kept and
//! the two decimal digits are read directly as a minute figure (`60`, not a
//! sexagesimal `36`), which is then snapped to a quarter-hour step.

use serde::{Deserialize, Serialize};

/// One tier: minute figures from `min_minutes` up to the next tier's lower
/// bound (exclusive) round to `value` hours.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RoundingTier {
    pub min_minutes: u32,
    pub value: f64,
}

/// Ordered, half-open rounding tiers. The last tier is unbounded above.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundingTiers {
    pub tiers: Vec<RoundingTier>,
}

impl Default for RoundingTiers {
    fn default() -> Self {
        let tier = |min_minutes, value| RoundingTier { min_minutes, value };
        Self {
            tiers: vec![
                tier(0, 0.0),
                tier(15, 0.25),
                tier(40, 0.50),
                tier(65, 0.75),
                tier(90, 1.0),
            ],
        }
    }
}

impl RoundingTiers {
    /// Tiers must start at zero and have strictly increasing lower bounds,
    /// so every minute figure falls in exactly one tier.
    pub fn validate(&self) -> anyhow::Result<()> {
        match self.tiers.first() {
            None => anyhow::bail!("Rounding tiers must not be empty"),
            Some(first) if first.min_minutes != 0 => {
                anyhow::bail!("First rounding tier must start at 0 minutes")
            }
            _ => {}
        }
        if self
            .tiers
            .windows(2)
            .any(|pair| pair[0].min_minutes >= pair[1].min_minutes)
        {
            anyhow::bail!("Rounding tier bounds must be strictly increasing");
        }
        Ok(())
    }

    /// Tier value for a minute figure.
    pub fn round_minutes(&self, minutes: u32) -> f64 {
        let idx = self.tiers.partition_point(|tier| tier.min_minutes <= minutes);
        idx.checked_sub(1)
            .and_then(|i| self.tiers.get(i))
            .map_or(0.0, |tier| tier.value)
    }

    /// Rounded hours: integer hour part plus the tier value of its minute
    /// figure.
    pub fn round_hours(&self, hours: f64) -> f64 {
        let split = SplitHours::from_hours(hours);
        split.whole_hours as f64 + self.round_minutes(split.minutes)
    }
}

/// Five9 hours split into an integer hour part and a hundredths "minute"
/// figure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SplitHours {
    pub whole_hours: u64,
    pub minutes: u32,
}

impl SplitHours {
    pub fn from_hours(hours: f64) -> Self {
        let hours = hours.max(0.0);
        let whole = hours.trunc();
        let minutes = ((hours - whole) * 100.0).round() as u32;
        Self {
            whole_hours: whole as u64,
            minutes,
        }
    }
}
