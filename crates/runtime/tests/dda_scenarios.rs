use bathala_content::NarrativePools;
use bathala_core::{
    Card, DdaTuning, DifficultyTier, Element, HandCategory, HandEvaluator, Rank, Suit, seeded_rng,
};
use bathala_runtime::{
    AdaptiveModifiers, DifficultyAdjuster, EventKind, PerformanceTracker, ResourceKind,
};
use proptest::prelude::*;

fn four_aces() -> Vec<Card> {
    [Suit::Hearts, Suit::Spades, Suit::Clubs, Suit::Diamonds]
        .into_iter()
        .map(|suit| Card::new(Rank::Ace, suit, Element::Neutral))
        .collect()
}

#[test]
fn flawless_quick_victory() {
    let mut tracker = PerformanceTracker::default();
    tracker.start_combat(100);
    let evaluation = HandEvaluator::evaluate_cards(&four_aces()).unwrap();
    assert_eq!(evaluation.category, HandCategory::FourOfAKind);
    for turn in 1..=3 {
        tracker.record_cards_played(&evaluation, turn).unwrap();
    }

    let delta = tracker.end_combat(true, 95, 3).unwrap();
    assert!((delta - 1.25).abs() < 1e-5, "delta was {delta}");

    let combat = &tracker.combats()[0];
    assert_eq!(combat.high_quality_hands, 3);
    assert_eq!(combat.health_lost(), 5);
    assert!((combat.health_efficiency - 0.95).abs() < 1e-6);
    assert_eq!(tracker.wins(), 1);
}

#[test]
fn critical_damage_takes_the_severe_branch() {
    let mut tracker = PerformanceTracker::default();
    tracker.start_combat(100);
    let delta = tracker.record_damage_taken(50, 20, 100).unwrap();
    assert!((delta + 0.4).abs() < 1e-6);

    let delta = tracker.record_damage_taken(10, 50, 100).unwrap();
    assert!((delta + 0.2).abs() < 1e-6);

    let logged = tracker.events().count();
    let delta = tracker.record_damage_taken(5, 51, 100).unwrap();
    assert_eq!(delta, 0.0);
    assert_eq!(tracker.events().count(), logged);
    assert_eq!(tracker.pps_history().count(), 2);
    assert_eq!(
        tracker.events().last().map(|event| event.kind()),
        Some(EventKind::DamageTaken)
    );
}

#[test]
fn struggling_player_gets_easier_enemies() {
    let mut adjuster = DifficultyAdjuster::new(DdaTuning::default(), NarrativePools::builtin());
    let mut rng = seeded_rng(11);
    let tracker = adjuster.tracker_mut();
    tracker.start_combat(100);
    tracker.record_resource_usage(ResourceKind::Potion, 8).unwrap();
    tracker.end_combat(false, 0, 14).unwrap();
    assert_eq!(adjuster.current_tier(), DifficultyTier::Struggling);

    for _ in 0..30 {
        adjuster.update(&mut rng);
    }
    let modifiers = adjuster.modifiers();
    assert!(modifiers.enemy_health < 0.8);
    assert!(modifiers.gold_rewards > 1.15);
    assert_eq!(adjuster.recent_narrative(10).count(), 1);
}

#[derive(Clone, Debug)]
enum Event {
    Combat {
        victory: bool,
        ending_health: u32,
        turns: u32,
    },
    Damage {
        current: u32,
    },
    Resource {
        amount: u32,
    },
}

fn arb_event() -> impl Strategy<Value = Event> {
    prop_oneof![
        (any::<bool>(), 0u32..=100, 1u32..=15).prop_map(|(victory, ending_health, turns)| {
            Event::Combat {
                victory,
                ending_health,
                turns,
            }
        }),
        (0u32..=100).prop_map(|current| Event::Damage { current }),
        (1u32..=5).prop_map(|amount| Event::Resource { amount }),
    ]
}

proptest! {
    #[test]
    fn pps_stays_clamped(events in prop::collection::vec(arb_event(), 1..120)) {
        let tuning = DdaTuning::default();
        let mut tracker = PerformanceTracker::new(tuning.clone());
        tracker.start_combat(100);
        for event in events {
            match event {
                Event::Combat { victory, ending_health, turns } => {
                    tracker.end_combat(victory, ending_health, turns).unwrap();
                    tracker.start_combat(100);
                }
                Event::Damage { current } => {
                    tracker.record_damage_taken(100 - current, current, 100).unwrap();
                }
                Event::Resource { amount } => {
                    tracker.record_resource_usage(ResourceKind::Other, amount).unwrap();
                }
            }
            prop_assert!(tracker.pps() >= tuning.pps_min && tracker.pps() <= tuning.pps_max);
        }
        prop_assert!(tracker.pps_history().count() <= tuning.pps_history_capacity);
    }

    #[test]
    fn tier_never_drops_as_pps_rises(a in -5.0f32..10.0, b in -5.0f32..10.0) {
        let (low, high) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(
            DifficultyTier::from_pps(low).challenge_index()
                <= DifficultyTier::from_pps(high).challenge_index()
        );
    }

    #[test]
    fn one_update_closes_the_gap(wins in 0usize..6, losses in 0usize..4) {
        let mut adjuster = DifficultyAdjuster::default();
        let tracker = adjuster.tracker_mut();
        for _ in 0..wins {
            tracker.start_combat(100);
            tracker.end_combat(true, 100, 3).unwrap();
        }
        for _ in 0..losses {
            tracker.start_combat(100);
            tracker.end_combat(false, 0, 12).unwrap();
        }

        let target = AdaptiveModifiers::for_tier(adjuster.current_tier());
        let before = (adjuster.modifiers().enemy_health - target.enemy_health).abs();
        let changed = adjuster.update(&mut seeded_rng(0));
        let after = (adjuster.modifiers().enemy_health - target.enemy_health).abs();

        if before < adjuster.tracker().tuning().stability_threshold {
            prop_assert!(!changed);
        } else {
            prop_assert!(changed);
            prop_assert!(after < before);
            prop_assert!(after > 0.0);
        }
    }
}
