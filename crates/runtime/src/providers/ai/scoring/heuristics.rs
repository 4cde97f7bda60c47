//! Card-play heuristics.
//!
//! Pure functions that turn one evaluated card subset into the numbers the
//! strategy engine ranks by. Randomness only enters through the explicit `rng`
//! argument of [`personality_adjustment`].
//!
//! # Strategic Value
//!
//! ```text
//! raw   = damage_weight × total + elemental_weight × synergy + hand_type_weight × type_bonus
//! value = adaptive(personality(raw × context_multiplier))
//! ```
//!
//! clamped to `>= 0`.

use bathala_core::{
    Card, Element, ElementCounts, GameContext, HandCategory, HandEvaluation, PersonalityArchetype,
    PersonalityProfile,
};
use rand::{Rng, RngCore};

use crate::providers::ai::memory::OpponentMemory;

// ============================================================================
// Value Components
// ============================================================================

/// Strategic preference for the elements in a play.
///
/// Separate from the hand's elemental bonus: water scores here as a
/// defensive preference even though it never adds damage.
///
/// # Factors
///
/// - fire: +3 per card
/// - earth: `2 × count + 3` once two or more are present
/// - all air, more than one card: +20
/// - water: +2 per card
/// - a single element over more than two cards: +10
/// - Elemental personalities dislike more than two elements: -8
pub fn elemental_synergy(cards: &[Card], profile: &PersonalityProfile) -> f32 {
    if cards.is_empty() {
        return 0.0;
    }
    let counts = ElementCounts::of(cards);
    let mut synergy = 0.0;

    synergy += counts.get(Element::Fire) as f32 * 3.0;

    let earth = counts.get(Element::Earth) as f32;
    if earth >= 2.0 {
        synergy += earth * 2.0 + 3.0;
    }

    if counts.get(Element::Air) as usize == cards.len() && cards.len() > 1 {
        synergy += 20.0;
    }

    synergy += counts.get(Element::Water) as f32 * 2.0;

    let distinct = counts.distinct();
    if distinct == 1 && cards.len() > 2 {
        synergy += 10.0;
    }
    if distinct > 2 && profile.is(PersonalityArchetype::Elemental) {
        synergy -= 8.0;
    }
    synergy
}

/// Flat preference per hand category, on top of its base value.
pub const fn hand_type_bonus(category: HandCategory) -> f32 {
    match category {
        HandCategory::HighCard => 0.0,
        HandCategory::Pair => 5.0,
        HandCategory::TwoPair => 10.0,
        HandCategory::ThreeOfAKind => 15.0,
        HandCategory::Straight | HandCategory::Flush => 20.0,
        HandCategory::FullHouse => 30.0,
        HandCategory::FourOfAKind => 40.0,
        HandCategory::StraightFlush => 50.0,
        HandCategory::RoyalFlush => 60.0,
    }
}

/// Most frequent element of a play; ties go to the earliest card.
pub fn dominant_element(cards: &[Card]) -> Element {
    let counts = ElementCounts::of(cards);
    let mut best = Element::Neutral;
    let mut best_count = 0;
    for card in cards {
        let count = counts.get(card.element);
        if count > best_count {
            best = card.element;
            best_count = count;
        }
    }
    best
}

// ============================================================================
// Modifiers
// ============================================================================

/// Urgency multiplier from the health picture and the turn count.
///
/// # Factors
///
/// - own health below 30%: ×1.4; above 80%: ×0.9
/// - opponent below 30% and the play totals more than 25: ×1.6
/// - past turn 8 and the play totals more than 20: ×1.3
/// - desperate: ×1.5
/// - winning position: ×1.2
pub fn context_multiplier(ctx: &GameContext, total_value: i32) -> f32 {
    let mut factor = 1.0;

    let ai_ratio = ctx.ai_health_ratio();
    if ai_ratio < 0.3 {
        factor *= 1.4;
    } else if ai_ratio > 0.8 {
        factor *= 0.9;
    }

    if ctx.player_health_ratio() < 0.3 && total_value > 25 {
        factor *= 1.6;
    }
    if ctx.turn_number > 8 && total_value > 20 {
        factor *= 1.3;
    }
    if ctx.is_desperate() {
        factor *= 1.5;
    }
    if ctx.is_winning_position() {
        factor *= 1.2;
    }
    factor
}

/// Archetype-specific reweighting.
///
/// # Archetypes
///
/// - **Cautious**: +5 per water card below half health; ×0.8 above 40 damage
/// - **Aggressive**: ×1.5 above 30, ×0.6 below 15, +3 per fire card
/// - **Calculating**: ×1.3 above 8 damage per card, ×1.1 for totals in 15..=35
/// - **Elemental**: ×1.4 for a preferred dominant element, ×1.6 for one element
/// - **Chaotic**: ±7.5 noise, ×1.3 for one card or four and more, 30% chance of ×1.5
/// - **Adaptive**: once more than three plays are known, ×0.9 against an opponent
///   averaging above 30, ×1.1 below 15
pub fn personality_adjustment(
    value: f32,
    evaluation: &HandEvaluation,
    cards: &[Card],
    ctx: &GameContext,
    profile: &PersonalityProfile,
    memory: &OpponentMemory,
    rng: &mut dyn RngCore,
) -> f32 {
    let counts = ElementCounts::of(cards);
    let total = evaluation.total_value;
    let mut value = value;

    match profile.archetype {
        PersonalityArchetype::Cautious => {
            if ctx.ai_health_ratio() < 0.5 {
                value += counts.get(Element::Water) as f32 * 5.0;
            }
            if total > 40 {
                value *= 0.8;
            }
        }
        PersonalityArchetype::Aggressive => {
            if total > 30 {
                value *= 1.5;
            }
            if total < 15 {
                value *= 0.6;
            }
            value += counts.get(Element::Fire) as f32 * 3.0;
        }
        PersonalityArchetype::Calculating => {
            if efficiency(total, cards.len()) > 8.0 {
                value *= 1.3;
            }
            if (15..=35).contains(&total) {
                value *= 1.1;
            }
        }
        PersonalityArchetype::Elemental => {
            if profile.preferred_elements.has(dominant_element(cards)) {
                value *= 1.4;
            }
            if counts.distinct() == 1 {
                value *= 1.6;
            }
        }
        PersonalityArchetype::Chaotic => {
            value += (rng.gen_range(0.0f32..1.0) - 0.5) * 15.0;
            if cards.len() == 1 || cards.len() >= 4 {
                value *= 1.3;
            }
            if rng.gen_bool(0.3) {
                value *= 1.5;
            }
        }
        PersonalityArchetype::Adaptive => {
            if memory.len() > 3
                && let Some(ema) = memory.ema()
            {
                if ema > 30.0 {
                    value *= 0.9;
                } else if ema < 15.0 {
                    value *= 1.1;
                }
            }
        }
    }
    value.max(0.0)
}

/// Counter-play learned from the opponent's recent plays.
///
/// Skipped when the profile does not adapt or nothing has been observed.
///
/// # Factors
///
/// - opponent averaging above 25: +3 per water card
/// - opponent averaging below 15: ×1.2 for plays totalling more than 20
/// - +2 per card of the element that counters the opponent's favourite
pub fn adaptive_adjustment(
    value: f32,
    evaluation: &HandEvaluation,
    cards: &[Card],
    profile: &PersonalityProfile,
    memory: &OpponentMemory,
    window: usize,
) -> f32 {
    if profile.adaptation_rate <= 0.0 || memory.is_empty() {
        return value;
    }
    let counts = ElementCounts::of(cards);
    let mut value = value;

    if let Some(average) = memory.average_recent(window) {
        if average > 25.0 {
            value += counts.get(Element::Water) as f32 * 3.0;
        } else if average < 15.0 && evaluation.total_value > 20 {
            value *= 1.2;
        }
    }

    if let Some(counter) = memory
        .most_common_element(window)
        .and_then(Element::counter)
    {
        value += counts.get(counter) as f32 * 2.0;
    }
    value
}

// ============================================================================
// Confidence & Risk
// ============================================================================

/// Confidence in a play, bounded to `[0.1, 1.0]`.
pub fn confidence(
    evaluation: &HandEvaluation,
    synergy: f32,
    ctx: &GameContext,
    profile: &PersonalityProfile,
    memory: &OpponentMemory,
) -> f32 {
    let total = evaluation.total_value;
    let mut confidence = 0.5;

    confidence += match total {
        t if t > 35 => 0.3,
        t if t > 20 => 0.2,
        t if t > 12 => 0.1,
        _ => 0.0,
    };
    confidence += (synergy / 40.0).min(0.2);
    confidence += (1.0 - profile.randomness_weight) * 0.2;
    if ctx.is_desperate() && total > 25 {
        confidence += 0.3;
    }
    if evaluation.category.is_rare() {
        confidence += 0.2;
    }
    confidence += (memory.len() as f32 / 100.0).min(0.1);

    confidence.clamp(0.1, 1.0)
}

/// Risk of a play, bounded to `[0.0, 1.0]`.
pub fn risk_level(evaluation: &HandEvaluation, cards: &[Card], ctx: &GameContext) -> f32 {
    let mut risk: f32 = 0.5;
    if evaluation.total_value > 40 {
        risk += 0.3;
    } else if evaluation.total_value < 10 {
        risk += 0.2;
    }
    if ElementCounts::of(cards).distinct() > 2 {
        risk += 0.1;
    }
    if ctx.is_desperate() {
        risk -= 0.2;
    }
    if cards.len() >= 4 {
        risk += 0.1;
    }
    risk.clamp(0.0, 1.0)
}

pub fn efficiency(total_value: i32, card_count: usize) -> f32 {
    if card_count == 0 {
        return 0.0;
    }
    total_value as f32 / card_count as f32
}

// ============================================================================
// Reasoning
// ============================================================================

/// Human-readable explanation of a play.
pub fn reasoning(
    evaluation: &HandEvaluation,
    cards: &[Card],
    ctx: &GameContext,
    strategic_value: f32,
    profile: &PersonalityProfile,
) -> String {
    let mut reasons = Vec::new();

    if evaluation.category != HandCategory::HighCard {
        reasons.push(format!(
            "Playing {} for {} base damage",
            evaluation.category.name().to_lowercase(),
            evaluation.base_value
        ));
    }
    if evaluation.elemental_bonus > 0 {
        reasons.push(format!(
            "{} synergy adds {} damage",
            dominant_element(cards),
            evaluation.elemental_bonus
        ));
    }

    if ctx.is_desperate() {
        reasons.push("Desperate situation requires aggressive play".to_string());
    } else if ctx.is_winning_position() {
        reasons.push("Maintaining pressure in winning position".to_string());
    } else if strategic_value > 40.0 {
        reasons.push("High strategic value justifies this play".to_string());
    }

    reasons.push(format!("{} AI strategy", profile.name()));

    if ctx.player_health_ratio() < 0.4 {
        reasons.push("Player is vulnerable, going for finish".to_string());
    } else if ctx.turn_number > 10 {
        reasons.push("Late game demands decisive action".to_string());
    }

    reasons.join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use bathala_core::{HandEvaluator, Rank, Suit, seeded_rng};

    fn card(rank: Rank, element: Element) -> Card {
        Card::new(rank, Suit::Spades, element)
    }

    #[test]
    fn synergy_counts_water_as_preference() {
        let profile = PersonalityProfile::default();
        let cards = [card(Rank::Two, Element::Water), card(Rank::Nine, Element::Water)];
        assert_eq!(elemental_synergy(&cards, &profile), 4.0);

        let air = [
            card(Rank::Two, Element::Air),
            card(Rank::Five, Element::Air),
            card(Rank::Nine, Element::Air),
        ];
        // all-air 20 + purity 10
        assert_eq!(elemental_synergy(&air, &profile), 30.0);
    }

    #[test]
    fn elemental_profile_dislikes_mixed_hands() {
        let profile = PersonalityProfile::for_archetype(PersonalityArchetype::Elemental);
        let cards = [
            card(Rank::Two, Element::Fire),
            card(Rank::Five, Element::Water),
            card(Rank::Nine, Element::Neutral),
        ];
        assert_eq!(elemental_synergy(&cards, &profile), 3.0 + 2.0 - 8.0);
    }

    #[test]
    fn hand_type_bonus_is_monotonic() {
        use strum::IntoEnumIterator;
        let bonuses: Vec<f32> = HandCategory::iter().map(hand_type_bonus).collect();
        assert!(bonuses.windows(2).all(|pair| pair[0] <= pair[1]));
    }

    #[test]
    fn desperate_context_multiplies() {
        let ctx = GameContext {
            ai_health: 20,
            player_health: 20,
            ..GameContext::default()
        };
        // 1.4 (low health) × 1.6 (finisher) × 1.5 (desperate)
        let factor = context_multiplier(&ctx, 30);
        assert!((factor - 1.4 * 1.6 * 1.5).abs() < 1e-4);
        assert!((context_multiplier(&GameContext::default(), 30) - 0.9).abs() < 1e-6);
    }

    #[test]
    fn chaotic_noise_is_seeded() {
        let profile = PersonalityProfile::for_archetype(PersonalityArchetype::Chaotic);
        let cards = [card(Rank::Ace, Element::Fire)];
        let evaluation = HandEvaluator::evaluate_cards(&cards).unwrap();
        let memory = OpponentMemory::new(5, 0.4);
        let ctx = GameContext::default();
        let roll = |seed| {
            let mut rng = seeded_rng(seed);
            personality_adjustment(20.0, &evaluation, &cards, &ctx, &profile, &memory, &mut rng)
        };
        assert_eq!(roll(11), roll(11));
        assert!(roll(11) >= 0.0);
    }

    #[test]
    fn bounds_hold() {
        let cards = [
            card(Rank::Two, Element::Fire),
            card(Rank::Three, Element::Water),
            card(Rank::Four, Element::Earth),
            card(Rank::Six, Element::Air),
        ];
        let evaluation = HandEvaluator::evaluate_cards(&cards).unwrap();
        let ctx = GameContext {
            ai_health: 10,
            ..GameContext::default()
        };
        let risk = risk_level(&evaluation, &cards, &ctx);
        assert!((0.0..=1.0).contains(&risk));
        let memory = OpponentMemory::new(5, 0.1);
        let conf = confidence(&evaluation, -50.0, &ctx, &PersonalityProfile::default(), &memory);
        assert!((0.1..=1.0).contains(&conf));
    }

    #[test]
    fn reasoning_mentions_personality() {
        let cards = [card(Rank::King, Element::Fire), card(Rank::King, Element::Fire)];
        let evaluation = HandEvaluator::evaluate_cards(&cards).unwrap();
        let text = reasoning(
            &evaluation,
            &cards,
            &GameContext::default(),
            10.0,
            &PersonalityProfile::default(),
        );
        assert!(text.starts_with("Playing pair for 10 base damage"));
        assert!(text.contains("fire synergy adds"));
        assert!(text.contains("Calculating AI strategy"));
    }
}
