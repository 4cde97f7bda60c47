//! Per-decision snapshots of the combat.
//!
//! The external game loop owns the authoritative [`CombatState`]; the engine only
//! ever reads a [`GameContext`] derived from it and never mutates health or block.

/// Health ratio below which the opponent is considered desperate.
pub const DESPERATE_HEALTH_RATIO: f32 = 0.3;

/// Guarded `current / max`, clamped to `[0, 1]`.
///
/// A zero maximum yields `0.0`: an actor without a health pool is treated as
/// having none left.
pub fn health_ratio(current: u32, max: u32) -> f32 {
    if max == 0 {
        return 0.0;
    }
    (current as f32 / max as f32).clamp(0.0, 1.0)
}

/// Read-only scoring input for one decision.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameContext {
    pub player_health: u32,
    pub player_max_health: u32,
    pub player_block: u32,
    pub ai_health: u32,
    pub ai_max_health: u32,
    pub ai_block: u32,
    pub turn_number: u32,
    pub cards_remaining: u32,
}

impl GameContext {
    pub fn player_health_ratio(&self) -> f32 {
        health_ratio(self.player_health, self.player_max_health)
    }

    pub fn ai_health_ratio(&self) -> f32 {
        health_ratio(self.ai_health, self.ai_max_health)
    }

    /// Own health below 30%.
    pub fn is_desperate(&self) -> bool {
        self.ai_health_ratio() < DESPERATE_HEALTH_RATIO
    }

    /// Opponent below 30% while own health is above half.
    pub fn is_winning_position(&self) -> bool {
        self.player_health_ratio() < DESPERATE_HEALTH_RATIO && self.ai_health_ratio() > 0.5
    }
}

impl Default for GameContext {
    fn default() -> Self {
        Self {
            player_health: 100,
            player_max_health: 100,
            player_block: 0,
            ai_health: 100,
            ai_max_health: 100,
            ai_block: 0,
            turn_number: 1,
            cards_remaining: 8,
        }
    }
}

/// Combat phase reported by the game loop.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum CombatPhase {
    #[default]
    PlayerTurn,
    EnemyTurn,
    Victory,
    Defeat,
}

/// Authoritative combat state as the external loop sees it.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatState {
    pub phase: CombatPhase,
    pub turn_number: u32,
    pub player_health: u32,
    pub player_max_health: u32,
    pub player_block: u32,
    pub ai_health: u32,
    pub ai_max_health: u32,
    pub ai_block: u32,
    pub player_hand_size: u32,
    pub ai_hand_size: u32,
}

impl CombatState {
    /// Projects the state into the scoring context.
    pub fn to_context(&self) -> GameContext {
        GameContext {
            player_health: self.player_health,
            player_max_health: self.player_max_health,
            player_block: self.player_block,
            ai_health: self.ai_health,
            ai_max_health: self.ai_max_health,
            ai_block: self.ai_block,
            turn_number: self.turn_number,
            cards_remaining: self.ai_hand_size,
        }
    }
}

impl Default for CombatState {
    fn default() -> Self {
        Self {
            phase: CombatPhase::EnemyTurn,
            turn_number: 1,
            player_health: 100,
            player_max_health: 100,
            player_block: 0,
            ai_health: 100,
            ai_max_health: 100,
            ai_block: 0,
            player_hand_size: 8,
            ai_hand_size: 8,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_max_health_is_guarded() {
        assert_eq!(health_ratio(10, 0), 0.0);
        assert_eq!(health_ratio(150, 100), 1.0);
        assert!((health_ratio(25, 100) - 0.25).abs() < f32::EPSILON);
    }

    #[test]
    fn desperation_and_winning() {
        let ctx = GameContext {
            ai_health: 20,
            player_health: 20,
            ..GameContext::default()
        };
        assert!(ctx.is_desperate());
        assert!(!ctx.is_winning_position());

        let ctx = GameContext {
            player_health: 10,
            ..GameContext::default()
        };
        assert!(ctx.is_winning_position());
    }

    #[test]
    fn combat_state_projection() {
        let state = CombatState {
            ai_hand_size: 5,
            turn_number: 7,
            ..CombatState::default()
        };
        let ctx = state.to_context();
        assert_eq!(ctx.cards_remaining, 5);
        assert_eq!(ctx.turn_number, 7);
    }
}
