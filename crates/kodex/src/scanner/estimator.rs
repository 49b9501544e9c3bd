//! Indicative fine exposure from annual turnover and per-tier percentage ranges.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::domain::RiskBucket;

pub const DEFAULT_CURRENCY: &str = "EUR";
pub const MISSING_TURNOVER: &str = "Set turnover to run simulation";

const FALLBACK_MIN_PERCENT: f64 = 0.5;
const FALLBACK_MAX_PERCENT: f64 = 3.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum PenaltyTier {
    A,
    B,
    C,
}

impl PenaltyTier {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::A => "A",
            Self::B => "B",
            Self::C => "C",
        }
    }

    /// Unknown labels fall back to the least strict tier.
    pub fn for_bucket_label(label: &str) -> Self {
        match RiskBucket::from_label(label) {
            Some(RiskBucket::Prohibited) => Self::C,
            Some(RiskBucket::HighRisk) => Self::B,
            _ => Self::A,
        }
    }
}

impl fmt::Display for PenaltyTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn fallback_min_percent() -> f64 {
    FALLBACK_MIN_PERCENT
}

fn fallback_max_percent() -> f64 {
    FALLBACK_MAX_PERCENT
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TierParameters {
    #[serde(default = "fallback_min_percent")]
    pub min_percent: f64,
    #[serde(default = "fallback_max_percent")]
    pub max_percent: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fixed_max: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Default for TierParameters {
    fn default() -> Self {
        Self {
            min_percent: FALLBACK_MIN_PERCENT,
            max_percent: FALLBACK_MAX_PERCENT,
            fixed_max: None,
            description: None,
        }
    }
}

/// Tier table keyed by tier letter, as stored in owner settings.
pub type TierTable = BTreeMap<String, TierParameters>;

pub fn default_tier_parameters() -> TierTable {
    let mut table = TierTable::new();
    table.insert(
        PenaltyTier::A.as_str().to_string(),
        TierParameters {
            min_percent: 0.5,
            max_percent: 3.0,
            fixed_max: None,
            description: Some("General AI Act violations".to_string()),
        },
    );
    table.insert(
        PenaltyTier::B.as_str().to_string(),
        TierParameters {
            min_percent: 1.5,
            max_percent: 7.0,
            fixed_max: None,
            description: Some("High-risk system violations".to_string()),
        },
    );
    table.insert(
        PenaltyTier::C.as_str().to_string(),
        TierParameters {
            min_percent: 2.0,
            max_percent: 6.0,
            fixed_max: Some(35_000_000.0),
            description: Some("Prohibited AI practices".to_string()),
        },
    );
    table
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EstimatorInputs {
    #[serde(default)]
    pub turnover: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    #[serde(default)]
    pub tier_parameters: TierTable,
}

impl EstimatorInputs {
    pub fn currency(&self) -> &str {
        self.currency
            .as_deref()
            .filter(|currency| !currency.is_empty())
            .unwrap_or(DEFAULT_CURRENCY)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FineEstimate {
    Exposure {
        min: f64,
        max: f64,
        currency: String,
        tier: PenaltyTier,
        assumptions: Vec<String>,
    },
    Unavailable {
        error: String,
        min: Option<f64>,
        max: Option<f64>,
        assumptions: Vec<String>,
    },
}

impl FineEstimate {
    fn unavailable() -> Self {
        Self::Unavailable {
            error: MISSING_TURNOVER.to_string(),
            min: None,
            max: None,
            assumptions: Vec::new(),
        }
    }

    pub fn is_available(&self) -> bool {
        matches!(self, Self::Exposure { .. })
    }

    /// `(min, max)` when turnover was usable.
    pub fn range(&self) -> Option<(f64, f64)> {
        match self {
            Self::Exposure { min, max, .. } => Some((*min, *max)),
            Self::Unavailable { .. } => None,
        }
    }
}

fn round_cents(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}

/// Whole-unit amount with comma thousands separators, e.g. `10,000,000`.
fn group_thousands(amount: f64) -> String {
    let rounded = amount.round();
    let digits = format!("{:.0}", rounded.abs());
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    if rounded < 0.0 {
        grouped.insert(0, '-');
    }
    grouped
}

/// Estimate the fine range for a classification bucket label.
///
/// Never fails: unusable turnover yields [`FineEstimate::Unavailable`], unknown buckets map to
/// tier A and tiers absent from the table use a 0.5 % to 3 % range.
pub fn estimate_fine(bucket: &str, inputs: &EstimatorInputs) -> FineEstimate {
    let turnover = match inputs.turnover {
        Some(turnover) if turnover.is_finite() && turnover > 0.0 => turnover,
        _ => return FineEstimate::unavailable(),
    };

    let tier = PenaltyTier::for_bucket_label(bucket);
    let params = inputs
        .tier_parameters
        .get(tier.as_str())
        .cloned()
        .unwrap_or_default();

    let mut min = turnover * params.min_percent / 100.0;
    let mut max = turnover * params.max_percent / 100.0;
    if let Some(cap) = params.fixed_max {
        // The cap bounds both ends of the range.
        max = max.min(cap);
        min = min.min(max);
    }

    let currency = inputs.currency().to_string();
    let assumptions = vec![
        format!("Annual turnover: {currency} {}", group_thousands(turnover)),
        format!(
            "Penalty tier: {tier} ({})",
            params
                .description
                .as_deref()
                .unwrap_or("Based on classification")
        ),
        format!(
            "Percentage range: {}% - {}%",
            params.min_percent, params.max_percent
        ),
    ];

    debug!(bucket, tier = tier.as_str(), turnover, "fine exposure estimated");

    FineEstimate::Exposure {
        min: round_cents(min),
        max: round_cents(max),
        currency,
        tier,
        assumptions,
    }
}
