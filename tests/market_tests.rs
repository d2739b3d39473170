//! Market behaviour over a real deck: setup, drafting, refilling and exhaustion

use point_salad_rs::config::GameConfig;
use point_salad_rs::core::{Card, CardId, Criterion, Vegetable};
use point_salad_rs::game::setup::setup_game;
use point_salad_rs::game::{DraftCommand, GameState, Market, MarketError};
use point_salad_rs::loader::StaticCatalogue;
use point_salad_rs::zones::Pile;

fn full_catalogue() -> StaticCatalogue {
    let mut cards = Vec::new();
    let mut id = 0;
    for vegetable in Vegetable::ALL {
        for points in 0..18 {
            cards.push(Card::new(
                CardId::new(id),
                vegetable,
                Some(Criterion::Most { vegetable, points }),
            ));
            id += 1;
        }
    }
    StaticCatalogue::new(cards)
}

fn set_up(players: usize, seed: u64) -> GameState {
    let seats: Vec<(String, bool)> = (0..players).map(|i| (format!("P{i}"), true)).collect();
    let refs: Vec<(&str, bool)> = seats.iter().map(|(n, b)| (n.as_str(), *b)).collect();
    let mut game = GameState::with_players(GameConfig::default(), &refs);
    game.seed_rng(seed);
    setup_game(&mut game, &full_catalogue()).unwrap();
    game
}

fn ordered_market(cards: u32) -> Market {
    let mut market = Market::new(&GameConfig::default());
    let deck = Pile::from_cards(
        (0..cards)
            .map(|i| Card::new(CardId::new(i), Vegetable::Tomato, None))
            .collect(),
    );
    market.install_piles(deck.split_into(3));
    market
}

#[test]
fn test_setup_deals_deck_for_table_size() {
    for players in 2..=6 {
        let game = set_up(players, 3);
        assert_eq!(game.card_count(), players * 18, "{players} players");
        assert_eq!(game.market.available_slots().len(), 6);
        assert!(game.current_turn.is_some_and(|t| t < players));
        for (_, card) in game.market.available_piles() {
            assert!(card.is_criterion_side_up());
        }
        for (_, card) in game.market.available_slots() {
            assert!(card.is_vegetable_side_up());
        }
    }
}

#[test]
fn test_draft_then_refill_conserves_cards() {
    let mut game = set_up(2, 17);
    let before = game.market.card_count();

    let taken = game.market.draft_cards("AF").unwrap();
    assert_eq!(taken.len(), 2);
    assert!(taken.iter().all(Card::is_vegetable_side_up));
    assert_eq!(game.market.card_count(), before - 2);

    game.market.refill();
    assert_eq!(game.market.card_count(), before - 2);
    assert_eq!(game.market.available_slots().len(), 6);

    let taken = game.market.draft_cards("1").unwrap();
    assert!(taken[0].is_criterion_side_up());
    assert_eq!(game.market.card_count(), before - 3);
}

#[test]
fn test_invalid_drafts_are_rejected_without_change() {
    let mut game = set_up(2, 5);
    let snapshot = game.market.clone();

    assert!(matches!(
        game.market.draft_cards("ABC"),
        Err(MarketError::InvalidToken { .. })
    ));
    assert!(matches!(
        game.market.draft_cards("G"),
        Err(MarketError::SlotOutOfRange(6))
    ));
    assert!(matches!(
        game.market.draft_cards("5"),
        Err(MarketError::PileOutOfRange(5))
    ));
    assert!(matches!(
        game.market.draft_cards("1A"),
        Err(MarketError::InvalidToken { .. })
    ));
    assert!(matches!(
        game.market.draft_cards(""),
        Err(MarketError::InvalidToken { .. })
    ));
    assert_eq!(game.market, snapshot);

    game.market.draft_cards("B").unwrap();
    assert!(matches!(
        game.market.draft_cards("AB"),
        Err(MarketError::EmptySource(_))
    ));
}

#[test]
fn test_lowercase_tokens_are_accepted() {
    let mut game = set_up(3, 8);
    assert!(game.market.is_cards_string_valid("cd"));
    assert_eq!(game.market.draft_cards(" cd ").unwrap().len(), 2);
}

#[test]
fn test_slots_are_fed_by_their_pile() {
    // three piles of four, tops are the last ids of each pile
    let mut market = ordered_market(12);
    market.refill();
    let fed: Vec<u32> = market
        .slots()
        .iter()
        .map(|s| s.as_ref().map(|c| c.id.as_u32()).unwrap_or(u32::MAX))
        .collect();
    // slot i draws from pile i % 3
    assert_eq!(fed, vec![3, 7, 11, 2, 6, 10]);
}

#[test]
fn test_emptying_a_pile_rebalances_from_the_largest() {
    let mut market = ordered_market(12);
    market.refill();
    // piles now hold two cards each
    market.draft_cards("0").unwrap();
    market.draft_cards("0").unwrap();
    assert!(market.piles()[0].is_empty());

    let summary = market.refill();
    assert_eq!(summary.piles_rebalanced, 1);
    assert_eq!(market.piles()[0].len(), 1);
    assert_eq!(market.card_count(), 10);
}

#[test]
fn test_market_drains_to_empty() {
    let mut market = ordered_market(12);
    market.refill();
    let mut drafted = 0;
    while !market.is_empty() {
        let token = match market.available_vegetable_tokens().first() {
            Some(letter) => letter.clone(),
            None => market.available_criteria_tokens()[0].clone(),
        };
        drafted += market.draft_cards(&token).unwrap().len();
        market.refill();
    }
    assert_eq!(drafted, 12);
    assert_eq!(market.card_count(), 0);
}

#[test]
fn test_draft_command_display_round_trip() {
    let command = DraftCommand::parse("fa").unwrap();
    assert_eq!(command.to_string(), "FA");
    assert!(!command.is_criteria());
    assert_eq!(command.indices(), &[5, 0]);
}
