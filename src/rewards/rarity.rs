//! Reward rarity tiers.
//!
//! Each tier carries a probability threshold. A single uniform draw picks a
//! target tier; the thresholds split `[0, 1)` into five buckets:
//!
//! | tier        | bucket          |
//! |-------------|-----------------|
//! | VERY_COMMON | `(0.5, 1)`      |
//! | COMMON      | `(0.25, 0.5]`   |
//! | NORMAL      | `(0.1, 0.25]`   |
//! | RARE        | `(0.02, 0.1]`   |
//! | VERY_RARE   | `[0, 0.02]`     |
//!
//! A draw that lands exactly on a threshold belongs to the rarer bucket.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::core::RuleError;

/// Rarity tier, ordered from most to least common.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Rarity {
    VeryCommon,
    Common,
    Normal,
    Rare,
    VeryRare,
}

impl Rarity {
    /// All tiers, most common first.
    pub const ALL: [Rarity; 5] = [
        Rarity::VeryCommon,
        Rarity::Common,
        Rarity::Normal,
        Rarity::Rare,
        Rarity::VeryRare,
    ];

    /// Probability threshold for this tier.
    #[must_use]
    pub const fn threshold(self) -> f64 {
        match self {
            Rarity::VeryCommon => 0.5,
            Rarity::Common => 0.25,
            Rarity::Normal => 0.1,
            Rarity::Rare => 0.02,
            Rarity::VeryRare => 0.005,
        }
    }

    /// Position in [`Rarity::ALL`].
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Persisted name, e.g. `VERY_COMMON`.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Rarity::VeryCommon => "VERY_COMMON",
            Rarity::Common => "COMMON",
            Rarity::Normal => "NORMAL",
            Rarity::Rare => "RARE",
            Rarity::VeryRare => "VERY_RARE",
        }
    }

    /// One step toward `VERY_COMMON`. Saturates at `VERY_COMMON`.
    #[must_use]
    pub fn next(self) -> Self {
        Self::ALL[self.index().saturating_sub(1)]
    }

    /// One step toward `VERY_RARE`. Saturates at `VERY_RARE`.
    #[must_use]
    pub fn previous(self) -> Self {
        Self::ALL[(self.index() + 1).min(Self::ALL.len() - 1)]
    }

    /// Map a uniform draw in `[0, 1)` to its target tier.
    #[must_use]
    pub fn from_roll(roll: f64) -> Self {
        Self::ALL
            .iter()
            .copied()
            .find(|rarity| roll > rarity.threshold())
            .unwrap_or(Rarity::VeryRare)
    }

    /// Tiers in the order the fallback search visits them.
    ///
    /// Starts at `self` and walks toward `VERY_COMMON`; once past it, the walk
    /// restarts from `self` and continues toward `VERY_RARE`. Every tier is
    /// visited exactly once.
    pub fn search_order(self) -> impl Iterator<Item = Rarity> {
        let start = self.index();
        let upward = (0..=start).rev();
        let downward = start + 1..Self::ALL.len();
        upward.chain(downward).map(|idx| Self::ALL[idx])
    }
}

impl std::fmt::Display for Rarity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Rarity {
    type Err = RuleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|rarity| rarity.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| RuleError::malformed("rarity", format!("unknown rarity '{}'", s)))
    }
}
