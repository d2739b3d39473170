//! Property tests: no card is created or lost, whatever the seed or table size

use point_salad_rs::config::GameConfig;
use point_salad_rs::core::{Card, CardId, Criterion, Vegetable};
use point_salad_rs::game::{
    GameLoop, GameState, HeuristicController, NullNotifier, Phase, PlayerController,
};
use point_salad_rs::loader::StaticCatalogue;
use proptest::prelude::*;
use smallvec::smallvec;
use std::collections::HashSet;

fn catalogue() -> StaticCatalogue {
    let shapes = |vegetable: Vegetable, n: u32| match n % 5 {
        0 => Criterion::Most {
            vegetable,
            points: 10,
        },
        1 => Criterion::PerVeggie {
            terms: smallvec![(vegetable, 2), (Vegetable::Onion, -1)],
        },
        2 => Criterion::CompleteSet { points: 12 },
        3 => Criterion::FewestTotal { points: 7 },
        _ => Criterion::PerVeggieType {
            threshold: 2,
            points: 3,
        },
    };
    let mut cards = Vec::new();
    for (v, vegetable) in Vegetable::ALL.into_iter().enumerate() {
        for n in 0..18u32 {
            let id = v as u32 * 18 + n;
            cards.push(Card::new(CardId::new(id), vegetable, Some(shapes(vegetable, n))));
        }
    }
    StaticCatalogue::new(cards)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn cards_are_conserved_through_a_whole_game(seed in any::<u64>(), players in 2usize..=6) {
        let catalogue = catalogue();
        let seats: Vec<(String, bool)> = (0..players).map(|i| (format!("Bot {i}"), true)).collect();
        let refs: Vec<(&str, bool)> = seats.iter().map(|(n, b)| (n.as_str(), *b)).collect();
        let mut game = GameState::with_players(GameConfig::default(), &refs);
        game.seed_rng(seed);

        let mut controllers: Vec<Box<dyn PlayerController>> = game
            .players
            .iter()
            .map(|p| Box::new(HeuristicController::new(p.id)) as Box<dyn PlayerController>)
            .collect();

        let expected = players * 18;
        let mut notifier = NullNotifier;
        let mut game_loop = GameLoop::new(&mut game, &catalogue, &mut notifier);
        while let Some(phase) = game_loop.step(&mut controllers).unwrap() {
            prop_assert_eq!(game_loop.game.card_count(), expected);
            if phase == Phase::Drafting {
                prop_assert!(!game_loop.game.market.is_empty());
            }
        }

        // every card ends in exactly one hand
        prop_assert!(game_loop.game.market.is_empty());
        let ids: HashSet<CardId> = game_loop
            .game
            .players
            .iter()
            .flat_map(|p| p.hand.cards().iter().map(|c| c.id))
            .collect();
        prop_assert_eq!(ids.len(), expected);
        prop_assert_eq!(game_loop.turns_elapsed() as usize >= expected / 2, true);
    }
}
