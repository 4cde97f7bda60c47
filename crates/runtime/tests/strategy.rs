use bathala_content::{ContentTables, Roster, ThemedSupplier};
use bathala_core::{
    AiTuning, Card, Element, Enemy, GameContext, PersonalityArchetype, PersonalityProfile, Rank,
    Suit, seeded_rng,
};
use bathala_runtime::{AiConfig, AiManager, OpponentMemory, StrategyEngine};
use proptest::prelude::*;
use strum::IntoEnumIterator;

fn card(rank: Rank, suit: Suit, element: Element) -> Card {
    Card::new(rank, suit, element)
}

#[test]
fn empty_pool_means_end_turn() {
    let engine = StrategyEngine::default();
    let profile = PersonalityProfile::default();
    let play = engine
        .select_play(
            &[],
            &GameContext::default(),
            &profile,
            &OpponentMemory::default(),
            &mut seeded_rng(1),
        )
        .unwrap();
    assert!(play.is_none());
}

#[test]
fn unknown_creature_plays_calculating() {
    let roster = Roster::builtin();
    let calculating = PersonalityProfile::for_archetype(PersonalityArchetype::Calculating);
    assert_eq!(roster.profile_for("Glimmering Stranger"), calculating);

    let mut manager = AiManager::new(
        AiConfig::default(),
        AiTuning::default(),
        ContentTables::builtin(),
        Box::new(ThemedSupplier::new()),
        7,
    );
    let controller = manager.initialize_combat(Enemy::new("Glimmering Stranger", 30, 6));
    assert_eq!(controller.profile(), &calculating);
}

#[test]
fn pair_beats_scattered_high_cards() {
    let engine = StrategyEngine::default();
    let profile = PersonalityProfile::for_archetype(PersonalityArchetype::Calculating);
    let pool = [
        card(Rank::King, Suit::Hearts, Element::Fire),
        card(Rank::King, Suit::Spades, Element::Fire),
        card(Rank::Three, Suit::Clubs, Element::Water),
    ];
    let play = engine
        .select_play(
            &pool,
            &GameContext::default(),
            &profile,
            &OpponentMemory::default(),
            &mut seeded_rng(2),
        )
        .unwrap()
        .expect("a pair of kings clears every threshold");
    assert!(play.evaluation.total_value >= profile.min_playable_value);
    assert_eq!(play.cards.iter().filter(|c| c.rank == Rank::King).count(), 2);
}

fn arb_card() -> impl Strategy<Value = Card> {
    let ranks: Vec<Rank> = Rank::iter().collect();
    let suits: Vec<Suit> = Suit::iter().collect();
    let elements: Vec<Element> = Element::iter().collect();
    (
        prop::sample::select(ranks),
        prop::sample::select(suits),
        prop::sample::select(elements),
    )
        .prop_map(|(rank, suit, element)| Card::new(rank, suit, element))
}

fn arb_archetype() -> impl Strategy<Value = PersonalityArchetype> {
    prop::sample::select(PersonalityArchetype::iter().collect::<Vec<_>>())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn selected_play_respects_thresholds(
        pool in prop::collection::vec(arb_card(), 0..7),
        archetype in arb_archetype(),
        seed in any::<u64>(),
    ) {
        let tuning = AiTuning::default();
        let engine = StrategyEngine::new(tuning.clone());
        let profile = PersonalityProfile::for_archetype(archetype);
        let ctx = GameContext::default();
        let memory = OpponentMemory::default();

        let play = engine
            .select_play(&pool, &ctx, &profile, &memory, &mut seeded_rng(seed))
            .unwrap();

        if let Some(play) = play {
            let total = play.evaluation.total_value;
            if total < profile.min_playable_value {
                // Only the fallback may go below the personality threshold.
                prop_assert!(total >= tuning.min_viable_play);
                let best = engine
                    .score_all(&pool, &ctx, &profile, &memory, &mut seeded_rng(seed))
                    .unwrap()
                    .iter()
                    .map(|candidate| candidate.evaluation.total_value)
                    .max()
                    .unwrap_or(0);
                prop_assert!(best < profile.min_playable_value);
            }
            prop_assert!(!play.cards.is_empty());
            prop_assert!(play.cards.iter().all(|card| pool.contains(card)));
        }
    }
}
