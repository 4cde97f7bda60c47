//! Per-tier narrative lines announced when the difficulty tier changes.

use std::collections::HashMap;

use bathala_core::DifficultyTier;
use rand::RngCore;
use rand::seq::SliceRandom;

/// Tier-keyed pools of flavor lines.
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct NarrativePools {
    pools: HashMap<DifficultyTier, Vec<String>>,
}

impl NarrativePools {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, tier: DifficultyTier, lines: Vec<String>) {
        self.pools.insert(tier, lines);
    }

    pub fn lines(&self, tier: DifficultyTier) -> &[String] {
        self.pools.get(&tier).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Draws one line for `tier`; `None` when its pool is empty.
    pub fn pick(&self, tier: DifficultyTier, rng: &mut dyn RngCore) -> Option<&str> {
        self.lines(tier).choose(rng).map(String::as_str)
    }

    /// The built-in pools, three lines per tier.
    pub fn builtin() -> Self {
        let table: [(DifficultyTier, [&str; 3]); 6] = [
            (
                DifficultyTier::Struggling,
                [
                    "An ancestor's spirit notices your struggle and offers a blessing.",
                    "The spirits take pity and weaken your enemies' resolve.",
                    "A gentle wind carries the wisdom of ancient protectors.",
                ],
            ),
            (
                DifficultyTier::Learning1,
                [
                    "The spirits recognize your growing strength.",
                    "Your determination catches the attention of benevolent ancestors.",
                    "The elements begin to respond to your improving focus.",
                ],
            ),
            (
                DifficultyTier::Learning2,
                [
                    "The cosmic balance shifts as you find your rhythm.",
                    "Your skills stabilize, earning the spirits' neutral regard.",
                    "The natural order acknowledges your steady progress.",
                ],
            ),
            (
                DifficultyTier::Thriving1,
                [
                    "The spirits sense your growing power and send stronger trials.",
                    "Your enemies, sensing your confidence, fight with renewed vigor.",
                    "The elements themselves take notice of your prowess.",
                ],
            ),
            (
                DifficultyTier::Thriving2,
                [
                    "The spirits, impressed by your skill, send greater challenges.",
                    "Your reputation spreads - more dangerous foes seek you out.",
                    "The cosmic forces align to test your true potential.",
                ],
            ),
            (
                DifficultyTier::Mastering,
                [
                    "The spirits unleash their full might to challenge a true master.",
                    "Your enemies fight with desperate fury against your dominance.",
                    "The universe itself conspires to test your legendary skills.",
                ],
            ),
        ];

        let mut pools = Self::new();
        for (tier, lines) in table {
            pools.set(tier, lines.iter().map(|line| line.to_string()).collect());
        }
        pools
    }
}
