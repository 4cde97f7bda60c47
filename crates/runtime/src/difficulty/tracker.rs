//! Player Performance Score (PPS) tracking.
//!
//! The tracker is an event-sourced accumulator: every recorded event yields a
//! PPS delta that goes through one clamped update path. Trend and volatility
//! are derived for reporting only and never feed back into the score.

use std::collections::{BTreeMap, VecDeque};
use std::time::{SystemTime, UNIX_EPOCH};

use bathala_core::{DdaTuning, DifficultyTier, HandCategory, HandEvaluation, health_ratio};

use crate::error::{Result, RuntimeError};

// ============================================================================
// PPS deltas
// ============================================================================

const VICTORY_BONUS: f32 = 0.5;
const DEFEAT_PENALTY: f32 = -0.8;
const HEALTH_EFFICIENCY_BONUS: f32 = 0.3;
const HEALTH_EFFICIENCY_PENALTY: f32 = -0.4;
const QUICK_COMBAT_BONUS: f32 = 0.2;
const SLOW_COMBAT_PENALTY: f32 = -0.3;
const STRATEGIC_QUALITY_BONUS: f32 = 0.25;

const HIGH_QUALITY_HAND_BONUS: f32 = 0.2;
const STRONG_HAND_BONUS: f32 = 0.1;
const WEAK_HAND_PENALTY: f32 = -0.1;
const LATE_TURN_PENALTY: f32 = -0.25;

const CRITICAL_DAMAGE_PENALTY: f32 = -0.4;
const HEAVY_DAMAGE_PENALTY: f32 = -0.2;

const RESOURCE_PENALTY_PER_UNIT: f32 = -0.1;

// ============================================================================
// Types
// ============================================================================

/// Sequential identifier of a tracked combat.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(transparent)]
pub struct CombatId(pub u64);

impl core::fmt::Display for CombatId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "combat-{}", self.0)
    }
}

/// Consumables whose use signals a struggling player.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumString,
    serde::Serialize,
    serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum ResourceKind {
    Potion,
    DiscardCharge,
    Gold,
    Other,
}

#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum EventKind {
    CombatStarted,
    CombatEnded,
    CardsPlayed,
    DamageTaken,
    ResourceUsed,
}

/// Payload of a performance event.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum EventDetails {
    CombatStarted {
        starting_health: u32,
    },
    CombatEnded {
        victory: bool,
        ending_health: u32,
        turns: u32,
        health_efficiency: f32,
    },
    CardsPlayed {
        category: HandCategory,
        total_value: i32,
        turn: u32,
    },
    DamageTaken {
        damage: u32,
        current_health: u32,
        max_health: u32,
    },
    ResourceUsed {
        kind: ResourceKind,
        amount: u32,
    },
}

impl EventDetails {
    pub fn kind(&self) -> EventKind {
        match self {
            Self::CombatStarted { .. } => EventKind::CombatStarted,
            Self::CombatEnded { .. } => EventKind::CombatEnded,
            Self::CardsPlayed { .. } => EventKind::CardsPlayed,
            Self::DamageTaken { .. } => EventKind::DamageTaken,
            Self::ResourceUsed { .. } => EventKind::ResourceUsed,
        }
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PerformanceEvent {
    pub combat: CombatId,
    /// Milliseconds since the Unix epoch.
    pub timestamp_ms: u64,
    pub pps_delta: f32,
    pub pps_after: f32,
    pub details: EventDetails,
}

impl PerformanceEvent {
    pub fn kind(&self) -> EventKind {
        self.details.kind()
    }
}

/// Per-combat accumulation, finalized by [`PerformanceTracker::end_combat`].
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CombatMetrics {
    pub id: CombatId,
    pub starting_health: u32,
    pub ending_health: Option<u32>,
    pub turns: u32,
    pub hands_played: u32,
    pub high_quality_hands: u32,
    pub total_hand_value: i64,
    pub damage_taken: u32,
    pub resources_used: BTreeMap<ResourceKind, u32>,
    pub victory: Option<bool>,
    /// `1 - health_lost / starting_health`, set when the combat ends.
    pub health_efficiency: f32,
    /// Player hand value per turn, set when the combat ends.
    pub damage_per_turn: f32,
    /// Combat-level PPS delta, set when the combat ends.
    pub pps_delta: f32,
}

impl CombatMetrics {
    fn new(id: CombatId, starting_health: u32) -> Self {
        Self {
            id,
            starting_health,
            ending_health: None,
            turns: 0,
            hands_played: 0,
            high_quality_hands: 0,
            total_hand_value: 0,
            damage_taken: 0,
            resources_used: BTreeMap::new(),
            victory: None,
            health_efficiency: 0.0,
            damage_per_turn: 0.0,
            pps_delta: 0.0,
        }
    }

    pub fn health_lost(&self) -> u32 {
        self.ending_health
            .map_or(0, |ending| self.starting_health.saturating_sub(ending))
    }

    /// Share of hands that were Four of a Kind or better.
    pub fn high_quality_ratio(&self) -> f32 {
        if self.hands_played == 0 {
            return 0.0;
        }
        self.high_quality_hands as f32 / self.hands_played as f32
    }

    pub fn is_finished(&self) -> bool {
        self.victory.is_some()
    }
}

/// Reporting view of the tracker.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PerformanceSummary {
    pub pps: f32,
    pub tier: DifficultyTier,
    pub trend: f32,
    pub volatility: f32,
    pub combats: usize,
    pub wins: u32,
    pub losses: u32,
    pub win_rate: f32,
    pub recent_events: Vec<PerformanceEvent>,
}

// ============================================================================
// Tracker
// ============================================================================

#[derive(Clone, Debug)]
pub struct PerformanceTracker {
    tuning: DdaTuning,
    pps: f32,
    pps_history: VecDeque<f32>,
    events: VecDeque<PerformanceEvent>,
    combats: Vec<CombatMetrics>,
    current: Option<CombatMetrics>,
    next_id: u64,
    wins: u32,
    losses: u32,
    trend: f32,
    volatility: f32,
}

impl Default for PerformanceTracker {
    fn default() -> Self {
        Self::new(DdaTuning::default())
    }
}

impl PerformanceTracker {
    pub fn new(tuning: DdaTuning) -> Self {
        Self {
            tuning,
            pps: 0.0,
            pps_history: VecDeque::new(),
            events: VecDeque::new(),
            combats: Vec::new(),
            current: None,
            next_id: 1,
            wins: 0,
            losses: 0,
            trend: 0.0,
            volatility: 0.0,
        }
    }

    /// Opens metrics for a new combat. The PPS is unchanged.
    ///
    /// A combat still open is discarded without scoring.
    pub fn start_combat(&mut self, starting_health: u32) -> CombatId {
        let id = CombatId(self.next_id);
        self.next_id += 1;

        if let Some(previous) = self.current.take() {
            tracing::warn!("{} replaced by {} before it ended", previous.id, id);
        }
        self.current = Some(CombatMetrics::new(id, starting_health));
        self.push_event(
            id,
            0.0,
            EventDetails::CombatStarted { starting_health },
        );
        tracing::info!("{} started at {} health (PPS {:.2})", id, starting_health, self.pps);
        id
    }

    /// Finalizes the open combat and scores it.
    ///
    /// # Factors
    ///
    /// - victory +0.5, defeat -0.8
    /// - health efficiency >= 0.9: +0.3; <= 0.2: -0.4
    /// - 5 turns or fewer: +0.2; 10 or more: -0.3
    /// - at least 30% high-quality hands: +0.25
    ///
    /// # Returns
    ///
    /// The combat's PPS delta before clamping.
    ///
    /// # Errors
    ///
    /// [`RuntimeError::NoActiveCombat`] when no combat is open.
    pub fn end_combat(&mut self, victory: bool, ending_health: u32, turns: u32) -> Result<f32> {
        let mut metrics = self.current.take().ok_or(RuntimeError::NoActiveCombat)?;

        metrics.ending_health = Some(ending_health);
        metrics.turns = turns;
        metrics.victory = Some(victory);
        metrics.health_efficiency = if metrics.starting_health == 0 {
            0.0
        } else {
            1.0 - metrics.health_lost() as f32 / metrics.starting_health as f32
        };
        metrics.damage_per_turn = if turns == 0 {
            0.0
        } else {
            metrics.total_hand_value as f32 / turns as f32
        };

        let mut delta = if victory {
            VICTORY_BONUS
        } else {
            DEFEAT_PENALTY
        };
        if metrics.health_efficiency >= 0.9 {
            delta += HEALTH_EFFICIENCY_BONUS;
        } else if metrics.health_efficiency <= 0.2 {
            delta += HEALTH_EFFICIENCY_PENALTY;
        }
        if turns <= 5 {
            delta += QUICK_COMBAT_BONUS;
        } else if turns >= 10 {
            delta += SLOW_COMBAT_PENALTY;
        }
        if metrics.high_quality_ratio() >= 0.3 {
            delta += STRATEGIC_QUALITY_BONUS;
        }
        metrics.pps_delta = delta;

        if victory {
            self.wins += 1;
        } else {
            self.losses += 1;
        }

        let id = metrics.id;
        let health_efficiency = metrics.health_efficiency;
        self.combats.push(metrics);
        self.update_pps(delta);
        self.push_event(
            id,
            delta,
            EventDetails::CombatEnded {
                victory,
                ending_health,
                turns,
                health_efficiency,
            },
        );

        tracing::info!(
            "{} {} in {} turns: PPS {:+.2} -> {:.2} ({})",
            id,
            if victory { "won" } else { "lost" },
            turns,
            delta,
            self.pps,
            self.tier().label()
        );
        Ok(delta)
    }

    /// Scores a hand the player played.
    ///
    /// # Factors
    ///
    /// - Four of a Kind or better: +0.2
    /// - total value >= 50: +0.1; <= 10: -0.1
    /// - past turn 8: -0.25
    pub fn record_cards_played(&mut self, evaluation: &HandEvaluation, turn: u32) -> Result<f32> {
        let metrics = self.current.as_mut().ok_or(RuntimeError::NoActiveCombat)?;
        let high_quality = evaluation.category.is_high_quality();

        metrics.hands_played += 1;
        metrics.total_hand_value += i64::from(evaluation.total_value);
        metrics.turns = metrics.turns.max(turn);
        if high_quality {
            metrics.high_quality_hands += 1;
        }
        let id = metrics.id;

        let mut delta = 0.0;
        if high_quality {
            delta += HIGH_QUALITY_HAND_BONUS;
        }
        if evaluation.total_value >= 50 {
            delta += STRONG_HAND_BONUS;
        } else if evaluation.total_value <= 10 {
            delta += WEAK_HAND_PENALTY;
        }
        if turn > 8 {
            delta += LATE_TURN_PENALTY;
        }

        if delta != 0.0 {
            self.update_pps(delta);
            self.push_event(
                id,
                delta,
                EventDetails::CardsPlayed {
                    category: evaluation.category,
                    total_value: evaluation.total_value,
                    turn,
                },
            );
        }
        Ok(delta)
    }

    /// Scores damage the player took; the most severe band applies.
    ///
    /// Damage that leaves the player above half health is counted in the
    /// combat metrics but neither moves the PPS nor logs an event.
    ///
    /// # Factors
    ///
    /// - health ratio <= 0.2: -0.4
    /// - health ratio <= 0.5: -0.2
    pub fn record_damage_taken(
        &mut self,
        damage: u32,
        current_health: u32,
        max_health: u32,
    ) -> Result<f32> {
        let metrics = self.current.as_mut().ok_or(RuntimeError::NoActiveCombat)?;
        metrics.damage_taken = metrics.damage_taken.saturating_add(damage);
        let id = metrics.id;

        let ratio = health_ratio(current_health, max_health);
        let delta = if ratio <= 0.2 {
            CRITICAL_DAMAGE_PENALTY
        } else if ratio <= 0.5 {
            HEAVY_DAMAGE_PENALTY
        } else {
            0.0
        };

        if delta != 0.0 {
            self.update_pps(delta);
            self.push_event(
                id,
                delta,
                EventDetails::DamageTaken {
                    damage,
                    current_health,
                    max_health,
                },
            );
        }
        Ok(delta)
    }

    /// Scores consumable use: -0.1 per unit.
    pub fn record_resource_usage(&mut self, kind: ResourceKind, amount: u32) -> Result<f32> {
        let metrics = self.current.as_mut().ok_or(RuntimeError::NoActiveCombat)?;
        *metrics.resources_used.entry(kind).or_default() += amount;
        let id = metrics.id;

        let delta = RESOURCE_PENALTY_PER_UNIT * amount as f32;
        self.update_pps(delta);
        self.push_event(id, delta, EventDetails::ResourceUsed { kind, amount });
        Ok(delta)
    }

    /// The single PPS mutation path: add, clamp, record, re-derive statistics.
    fn update_pps(&mut self, delta: f32) {
        self.pps = (self.pps + delta).clamp(self.tuning.pps_min, self.tuning.pps_max);

        if self.pps_history.len() >= self.tuning.pps_history_capacity {
            self.pps_history.pop_front();
        }
        if self.tuning.pps_history_capacity > 0 {
            self.pps_history.push_back(self.pps);
        }

        let window = self.tuning.trend_window;
        if self.pps_history.len() >= window {
            let recent: Vec<f32> = self
                .pps_history
                .iter()
                .skip(self.pps_history.len() - window)
                .copied()
                .collect();
            self.trend = slope(&recent);
            self.volatility = change_stddev(&recent);
        }
    }

    fn push_event(&mut self, combat: CombatId, pps_delta: f32, details: EventDetails) {
        if self.tuning.event_history_capacity == 0 {
            return;
        }
        if self.events.len() >= self.tuning.event_history_capacity {
            self.events.pop_front();
        }
        self.events.push_back(PerformanceEvent {
            combat,
            timestamp_ms: now_ms(),
            pps_delta,
            pps_after: self.pps,
            details,
        });
    }

    // ------------------------------------------------------------------------
    // Reporting
    // ------------------------------------------------------------------------

    pub fn pps(&self) -> f32 {
        self.pps
    }

    pub fn tier(&self) -> DifficultyTier {
        DifficultyTier::from_pps(self.pps)
    }

    /// Least-squares slope of the trailing PPS window; zero until it fills.
    pub fn trend(&self) -> f32 {
        self.trend
    }

    /// Standard deviation of consecutive PPS changes over the trailing window.
    pub fn volatility(&self) -> f32 {
        self.volatility
    }

    pub fn pps_history(&self) -> impl Iterator<Item = f32> + '_ {
        self.pps_history.iter().copied()
    }

    pub fn events(&self) -> impl Iterator<Item = &PerformanceEvent> {
        self.events.iter()
    }

    pub fn combats(&self) -> &[CombatMetrics] {
        &self.combats
    }

    pub fn current_combat(&self) -> Option<&CombatMetrics> {
        self.current.as_ref()
    }

    pub fn wins(&self) -> u32 {
        self.wins
    }

    pub fn losses(&self) -> u32 {
        self.losses
    }

    pub fn win_rate(&self) -> f32 {
        let total = self.wins + self.losses;
        if total == 0 {
            return 0.0;
        }
        self.wins as f32 / total as f32
    }

    pub fn tuning(&self) -> &DdaTuning {
        &self.tuning
    }

    pub fn summary(&self, recent: usize) -> PerformanceSummary {
        PerformanceSummary {
            pps: self.pps,
            tier: self.tier(),
            trend: self.trend,
            volatility: self.volatility,
            combats: self.combats.len(),
            wins: self.wins,
            losses: self.losses,
            win_rate: self.win_rate(),
            recent_events: self
                .events
                .iter()
                .skip(self.events.len().saturating_sub(recent))
                .cloned()
                .collect(),
        }
    }

    /// Back to a fresh tracker with the same tuning.
    pub fn reset(&mut self) {
        *self = Self::new(self.tuning.clone());
    }
}

fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis() as u64)
        .unwrap_or_default()
}

/// Least-squares slope of `values` against their index.
fn slope(values: &[f32]) -> f32 {
    let n = values.len() as f32;
    if values.len() < 2 {
        return 0.0;
    }
    let mean_x = (n - 1.0) / 2.0;
    let mean_y = values.iter().sum::<f32>() / n;
    let (mut numerator, mut denominator) = (0.0f32, 0.0f32);
    for (index, value) in values.iter().enumerate() {
        let dx = index as f32 - mean_x;
        numerator += dx * (value - mean_y);
        denominator += dx * dx;
    }
    if denominator == 0.0 {
        0.0
    } else {
        numerator / denominator
    }
}

/// Population standard deviation of consecutive differences.
fn change_stddev(values: &[f32]) -> f32 {
    if values.len() < 2 {
        return 0.0;
    }
    let changes: Vec<f32> = values.windows(2).map(|pair| pair[1] - pair[0]).collect();
    let mean = changes.iter().sum::<f32>() / changes.len() as f32;
    let variance =
        changes.iter().map(|change| (change - mean).powi(2)).sum::<f32>() / changes.len() as f32;
    variance.sqrt()
}
