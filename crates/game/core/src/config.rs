/// Game configuration constants and tunable parameters.
///
/// Every tunable has a `DEFAULT_*` constant; TOML files may override any subset
/// of fields.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GameConfig {
    pub ai: AiTuning,
    pub dda: DdaTuning,
}

impl GameConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Checks every tunable for range errors.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.ai.validate()?;
        self.dda.validate()
    }
}

/// Opponent AI tunables.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct AiTuning {
    /// Largest card pool the strategy engine will enumerate.
    pub max_pool_size: usize,
    /// Absolute floor for the fallback play when nothing clears the personality threshold.
    pub min_viable_play: i32,
    /// A special ability replaces the best play when worth this multiple of it.
    pub special_ability_threshold: f32,
    /// Probability the fixed-action scorer takes its top action instead of a weighted pick.
    pub best_action_probability: f32,
    pub combat_memory_capacity: usize,
    pub decision_history_capacity: usize,
    /// A bluff succeeds when the play still deals more than this.
    pub bluff_success_threshold: u32,
    /// Number of recent opponent plays used for adaptive adjustments.
    pub opponent_window: usize,
}

impl AiTuning {
    pub const DEFAULT_MAX_POOL_SIZE: usize = 12;
    pub const DEFAULT_MIN_VIABLE_PLAY: i32 = 5;
    pub const DEFAULT_SPECIAL_ABILITY_THRESHOLD: f32 = 1.3;
    pub const DEFAULT_BEST_ACTION_PROBABILITY: f32 = 0.8;
    pub const DEFAULT_COMBAT_MEMORY_CAPACITY: usize = 20;
    pub const DEFAULT_DECISION_HISTORY_CAPACITY: usize = 50;
    pub const DEFAULT_BLUFF_SUCCESS_THRESHOLD: u32 = 20;
    pub const DEFAULT_OPPONENT_WINDOW: usize = 5;

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_pool_size == 0 || self.max_pool_size > Self::POOL_HARD_LIMIT {
            return Err(ConfigError::OutOfRange {
                field: "ai.max_pool_size",
                value: self.max_pool_size as f32,
            });
        }
        if !(0.0..=1.0).contains(&self.best_action_probability) {
            return Err(ConfigError::OutOfRange {
                field: "ai.best_action_probability",
                value: self.best_action_probability,
            });
        }
        if self.special_ability_threshold <= 0.0 {
            return Err(ConfigError::OutOfRange {
                field: "ai.special_ability_threshold",
                value: self.special_ability_threshold,
            });
        }
        if self.opponent_window == 0 {
            return Err(ConfigError::OutOfRange {
                field: "ai.opponent_window",
                value: 0.0,
            });
        }
        Ok(())
    }

    /// Above this the subset enumeration stops being turn-time cheap.
    pub const POOL_HARD_LIMIT: usize = 16;
}

impl Default for AiTuning {
    fn default() -> Self {
        Self {
            max_pool_size: Self::DEFAULT_MAX_POOL_SIZE,
            min_viable_play: Self::DEFAULT_MIN_VIABLE_PLAY,
            special_ability_threshold: Self::DEFAULT_SPECIAL_ABILITY_THRESHOLD,
            best_action_probability: Self::DEFAULT_BEST_ACTION_PROBABILITY,
            combat_memory_capacity: Self::DEFAULT_COMBAT_MEMORY_CAPACITY,
            decision_history_capacity: Self::DEFAULT_DECISION_HISTORY_CAPACITY,
            bluff_success_threshold: Self::DEFAULT_BLUFF_SUCCESS_THRESHOLD,
            opponent_window: Self::DEFAULT_OPPONENT_WINDOW,
        }
    }
}

/// Dynamic difficulty tunables.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DdaTuning {
    pub pps_min: f32,
    pub pps_max: f32,
    pub pps_history_capacity: usize,
    pub event_history_capacity: usize,
    /// Number of trailing PPS values used for the trend slope; at most
    /// `pps_history_capacity`.
    pub trend_window: usize,
    /// Fraction of the remaining distance covered per update, in `(0, 1)`.
    /// A rate of one would snap straight to the target.
    pub adaptation_rate: f32,
    /// Health or damage modifiers closer than this to the target are left alone.
    pub stability_threshold: f32,
    pub narrative_capacity: usize,
}

impl DdaTuning {
    pub const DEFAULT_PPS_MIN: f32 = -5.0;
    pub const DEFAULT_PPS_MAX: f32 = 10.0;
    pub const DEFAULT_PPS_HISTORY_CAPACITY: usize = 100;
    pub const DEFAULT_EVENT_HISTORY_CAPACITY: usize = 200;
    pub const DEFAULT_TREND_WINDOW: usize = 10;
    pub const DEFAULT_ADAPTATION_RATE: f32 = 0.1;
    pub const DEFAULT_STABILITY_THRESHOLD: f32 = 0.02;
    pub const DEFAULT_NARRATIVE_CAPACITY: usize = 50;

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.pps_min >= self.pps_max {
            return Err(ConfigError::InvalidPpsRange {
                min: self.pps_min,
                max: self.pps_max,
            });
        }
        if !(self.adaptation_rate > 0.0 && self.adaptation_rate < 1.0) {
            return Err(ConfigError::OutOfRange {
                field: "dda.adaptation_rate",
                value: self.adaptation_rate,
            });
        }
        if self.stability_threshold < 0.0 {
            return Err(ConfigError::OutOfRange {
                field: "dda.stability_threshold",
                value: self.stability_threshold,
            });
        }
        if self.trend_window < 2 || self.trend_window > self.pps_history_capacity {
            return Err(ConfigError::OutOfRange {
                field: "dda.trend_window",
                value: self.trend_window as f32,
            });
        }
        Ok(())
    }
}

impl Default for DdaTuning {
    fn default() -> Self {
        Self {
            pps_min: Self::DEFAULT_PPS_MIN,
            pps_max: Self::DEFAULT_PPS_MAX,
            pps_history_capacity: Self::DEFAULT_PPS_HISTORY_CAPACITY,
            event_history_capacity: Self::DEFAULT_EVENT_HISTORY_CAPACITY,
            trend_window: Self::DEFAULT_TREND_WINDOW,
            adaptation_rate: Self::DEFAULT_ADAPTATION_RATE,
            stability_threshold: Self::DEFAULT_STABILITY_THRESHOLD,
            narrative_capacity: Self::DEFAULT_NARRATIVE_CAPACITY,
        }
    }
}

/// Opponent difficulty level, always within `1..=10`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(from = "u8", into = "u8"))]
pub struct DifficultyLevel(u8);

impl DifficultyLevel {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 10;

    /// Clamps any input into the valid range.
    pub const fn new(level: u8) -> Self {
        if level < Self::MIN {
            Self(Self::MIN)
        } else if level > Self::MAX {
            Self(Self::MAX)
        } else {
            Self(level)
        }
    }

    pub const fn get(self) -> u8 {
        self.0
    }

    /// Damage/value multiplier: `0.6 + 0.09 * level`, within `[0.6, 2.0]`.
    pub fn modifier(self) -> f32 {
        (0.6 + self.0 as f32 * 0.09).clamp(0.6, 2.0)
    }

    #[must_use]
    pub const fn raised(self) -> Self {
        Self::new(self.0.saturating_add(1))
    }

    #[must_use]
    pub const fn lowered(self) -> Self {
        Self::new(self.0.saturating_sub(1))
    }
}

impl Default for DifficultyLevel {
    fn default() -> Self {
        Self(5)
    }
}

impl From<u8> for DifficultyLevel {
    fn from(level: u8) -> Self {
        Self::new(level)
    }
}

impl From<DifficultyLevel> for u8 {
    fn from(level: DifficultyLevel) -> Self {
        level.0
    }
}

impl core::fmt::Display for DifficultyLevel {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("{field} out of range: {value}")]
    OutOfRange { field: &'static str, value: f32 },

    #[error("pps range is empty: min {min} >= max {max}")]
    InvalidPpsRange { min: f32, max: f32 },
}

impl crate::error::GameError for ConfigError {
    fn severity(&self) -> crate::error::ErrorSeverity {
        crate::error::ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::OutOfRange { .. } => "CONFIG_OUT_OF_RANGE",
            Self::InvalidPpsRange { .. } => "CONFIG_INVALID_PPS_RANGE",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_validate() {
        assert_eq!(GameConfig::new().validate(), Ok(()));
    }

    #[test]
    fn rejects_bad_adaptation_rate() {
        let mut config = GameConfig::new();
        config.dda.adaptation_rate = 0.0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::OutOfRange {
                field: "dda.adaptation_rate",
                ..
            })
        ));
    }

    #[test]
    fn full_rate_would_snap() {
        let mut config = GameConfig::new();
        config.dda.adaptation_rate = 1.0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::OutOfRange {
                field: "dda.adaptation_rate",
                ..
            })
        ));
        config.dda.adaptation_rate = 0.99;
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn trend_window_fits_history() {
        let mut config = GameConfig::new();
        config.dda.pps_history_capacity = 8;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::OutOfRange {
                field: "dda.trend_window",
                value,
            }) if value == 10.0
        ));
        config.dda.trend_window = 8;
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn difficulty_level_clamps() {
        assert_eq!(DifficultyLevel::new(0).get(), 1);
        assert_eq!(DifficultyLevel::new(42).get(), 10);
        assert_eq!(DifficultyLevel::new(10).raised().get(), 10);
        assert!((DifficultyLevel::new(5).modifier() - 1.05).abs() < 1e-5);
        assert!((DifficultyLevel::new(1).modifier() - 0.69).abs() < 1e-5);
    }
}
