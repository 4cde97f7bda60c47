//! Difficulty tiers derived from the Player Performance Score.
//!
//! A tier is never stored: it is a pure function of the current PPS evaluated
//! on demand against fixed, non-overlapping thresholds.

/// Six ordered challenge bands, weakest player first.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumIter,
    strum::EnumCount,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case")]
pub enum DifficultyTier {
    Struggling,
    Learning1,
    #[default]
    Learning2,
    Thriving1,
    Thriving2,
    Mastering,
}

impl DifficultyTier {
    /// Upper PPS bound (inclusive) of each tier below [`DifficultyTier::Mastering`].
    pub const THRESHOLDS: [(f32, DifficultyTier); 5] = [
        (-2.0, Self::Struggling),
        (-0.5, Self::Learning1),
        (1.0, Self::Learning2),
        (2.5, Self::Thriving1),
        (4.0, Self::Thriving2),
    ];

    /// Maps a PPS value to its tier.
    pub fn from_pps(pps: f32) -> Self {
        Self::THRESHOLDS
            .iter()
            .find(|(bound, _)| pps <= *bound)
            .map(|&(_, tier)| tier)
            .unwrap_or(Self::Mastering)
    }

    /// 0 for Struggling up to 5 for Mastering.
    pub const fn challenge_index(self) -> u8 {
        self as u8
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Struggling => "Struggling",
            Self::Learning1 => "Learning (Low)",
            Self::Learning2 => "Learning (High)",
            Self::Thriving1 => "Thriving (Low)",
            Self::Thriving2 => "Thriving (High)",
            Self::Mastering => "Mastering",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn thresholds_are_inclusive() {
        assert_eq!(DifficultyTier::from_pps(-5.0), DifficultyTier::Struggling);
        assert_eq!(DifficultyTier::from_pps(-2.0), DifficultyTier::Struggling);
        assert_eq!(DifficultyTier::from_pps(-1.99), DifficultyTier::Learning1);
        assert_eq!(DifficultyTier::from_pps(0.0), DifficultyTier::Learning2);
        assert_eq!(DifficultyTier::from_pps(1.0), DifficultyTier::Learning2);
        assert_eq!(DifficultyTier::from_pps(2.5), DifficultyTier::Thriving1);
        assert_eq!(DifficultyTier::from_pps(4.0), DifficultyTier::Thriving2);
        assert_eq!(DifficultyTier::from_pps(4.01), DifficultyTier::Mastering);
    }

    proptest! {
        #[test]
        fn tier_is_monotonic(a in -5.0f32..10.0, b in -5.0f32..10.0) {
            let (low, high) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(
                DifficultyTier::from_pps(low).challenge_index()
                    <= DifficultyTier::from_pps(high).challenge_index()
            );
        }
    }
}
