//! Runtime errors.
//!
//! Precondition violations (deciding before a combat exists, oversized card
//! pools, invalid hands) surface here. A turn with no viable play is not an
//! error; it yields an end-turn decision.

use bathala_core::{ConfigError, ErrorSeverity, GameError, HandError};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum RuntimeError {
    #[error("combat not initialized; call initialize_combat first")]
    CombatNotInitialized,

    #[error("no combat is being tracked")]
    NoActiveCombat,

    #[error("card pool of {size} exceeds the enumeration limit of {max}")]
    PoolTooLarge { size: usize, max: usize },

    #[error(transparent)]
    InvalidHand(#[from] HandError),

    #[error(transparent)]
    InvalidConfig(#[from] ConfigError),
}

impl GameError for RuntimeError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::CombatNotInitialized => ErrorSeverity::Internal,
            Self::NoActiveCombat => ErrorSeverity::Recoverable,
            Self::PoolTooLarge { .. } => ErrorSeverity::Validation,
            Self::InvalidHand(err) => err.severity(),
            Self::InvalidConfig(err) => err.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::CombatNotInitialized => "RUNTIME_COMBAT_NOT_INITIALIZED",
            Self::NoActiveCombat => "RUNTIME_NO_ACTIVE_COMBAT",
            Self::PoolTooLarge { .. } => "RUNTIME_POOL_TOO_LARGE",
            Self::InvalidHand(err) => err.error_code(),
            Self::InvalidConfig(err) => err.error_code(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrapped_errors_keep_their_codes() {
        let err = RuntimeError::from(HandError::TooManyCards { count: 6 });
        assert_eq!(err.error_code(), "HAND_TOO_MANY_CARDS");
        assert_eq!(err.severity(), ErrorSeverity::Validation);
        assert_eq!(err.to_string(), "a hand holds at most 5 cards, got 6");
    }

    #[test]
    fn missing_combat_is_internal() {
        assert_eq!(
            RuntimeError::CombatNotInitialized.severity(),
            ErrorSeverity::Internal
        );
    }
}
