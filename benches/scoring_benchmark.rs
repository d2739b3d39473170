//! Performance benchmarks for scoring and full bot games
//!
//! - **score_hand**: scoring an 18-card end-of-game hand against opponents
//! - **flip_choice**: the bot's exhaustive flip search over the same hand
//! - **bot_game**: a complete heuristic-vs-heuristic match per player count

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use point_salad_rs::{
    config::GameConfig,
    core::{Card, CardId, Criterion as ScoringRule, Face, Vegetable},
    game::{calculate_score, HeuristicController},
    loader::{CardCatalogue, ManifestCatalogue, StaticCatalogue},
    tournament::play_bot_game,
    zones::Hand,
};
use std::path::PathBuf;

fn manifest_cards() -> Vec<Card> {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("assets/point_salad_manifest.json");
    ManifestCatalogue::new(path)
        .load_cards()
        .expect("shipped manifest should load")
}

/// Six criteria and twelve vegetables, like a typical final hand
fn end_of_game_hand(cards: &[Card], offset: usize) -> Vec<Card> {
    let mut hand = Vec::new();
    for (i, card) in cards.iter().skip(offset).step_by(7).take(18).enumerate() {
        let mut card = card.clone();
        if i % 3 == 0 {
            card.show(Face::Criterion);
        }
        hand.push(card);
    }
    hand
}

fn bench_score_hand(c: &mut Criterion) {
    let cards = manifest_cards();
    let hand = end_of_game_hand(&cards, 0);
    let opponent_a = end_of_game_hand(&cards, 1);
    let opponent_b = end_of_game_hand(&cards, 2);
    let others: [&[Card]; 2] = [&opponent_a, &opponent_b];

    c.bench_function("score_hand", |b| {
        b.iter(|| calculate_score(black_box(&hand), black_box(&others)))
    });

    let rule = ScoringRule::Most {
        vegetable: Vegetable::Carrot,
        points: 10,
    };
    let single = vec![Card::new(CardId::new(0), Vegetable::Carrot, Some(rule)).with_face(Face::Criterion)];
    c.bench_function("score_single_criterion", |b| {
        b.iter(|| calculate_score(black_box(&single), black_box(&others)))
    });
}

fn bench_flip_choice(c: &mut Criterion) {
    let cards = manifest_cards();
    let hand = Hand::from_cards(end_of_game_hand(&cards, 3));
    let opponent = end_of_game_hand(&cards, 4);
    let others: [&[Card]; 1] = [&opponent];

    c.bench_function("flip_choice", |b| {
        b.iter(|| HeuristicController::flip_choice(black_box(&hand), black_box(&others)))
    });
}

fn bench_bot_game(c: &mut Criterion) {
    let catalogue = StaticCatalogue::new(manifest_cards());
    let config = GameConfig::default();
    let mut group = c.benchmark_group("bot_game");
    group.sample_size(20);

    for players in [2usize, 4, 6] {
        group.bench_with_input(BenchmarkId::from_parameter(players), &players, |b, &players| {
            let mut seed = 0u64;
            b.iter(|| {
                seed = seed.wrapping_add(1);
                play_bot_game(&catalogue, players, seed, &config).expect("bot game should finish")
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_score_hand, bench_flip_choice, bench_bot_game);
criterion_main!(benches);
