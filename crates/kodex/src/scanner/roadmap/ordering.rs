use super::super::domain::RiskBucket;
use super::catalog::{TaskPriority, Theme};

/// Moves every task of `theme` ahead by `half_tiers` when the roadmap is built for `bucket`.
///
/// One half tier places a task between its own priority tier and the one above it; two half
/// tiers promote it a full tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThemeBoost {
    pub bucket: RiskBucket,
    pub theme: Theme,
    pub half_tiers: u8,
}

pub static THEME_BOOSTS: &[ThemeBoost] = &[
    ThemeBoost {
        bucket: RiskBucket::HighRisk,
        theme: Theme::Documentation,
        half_tiers: 1,
    },
    ThemeBoost {
        bucket: RiskBucket::Prohibited,
        theme: Theme::GovernanceBasics,
        half_tiers: 2,
    },
];

/// Sort key for roadmap tasks: boosted tier first, then theme label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct RankKey {
    pub half_tier: i16,
    pub theme: &'static str,
}

/// Ranks tasks by priority tier with per-bucket theme boosts.
#[derive(Debug, Clone, Copy)]
pub struct OrderingPolicy {
    boosts: &'static [ThemeBoost],
}

impl OrderingPolicy {
    pub const fn standard() -> Self {
        Self {
            boosts: THEME_BOOSTS,
        }
    }

    pub const fn with_boosts(boosts: &'static [ThemeBoost]) -> Self {
        Self { boosts }
    }

    /// First matching boost wins; unmatched themes are not moved.
    pub fn boost(&self, bucket: RiskBucket, theme: Theme) -> u8 {
        self.boosts
            .iter()
            .find(|boost| boost.bucket == bucket && boost.theme == theme)
            .map_or(0, |boost| boost.half_tiers)
    }

    pub fn rank(&self, bucket: RiskBucket, priority: TaskPriority, theme: Theme) -> RankKey {
        let base = i16::from(priority.ordinal()) * 2;
        RankKey {
            half_tier: base - i16::from(self.boost(bucket, theme)),
            theme: theme.label(),
        }
    }
}

impl Default for OrderingPolicy {
    fn default() -> Self {
        Self::standard()
    }
}
