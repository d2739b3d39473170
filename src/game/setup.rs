//! Match setup: deck construction and the opening market

use crate::config::GameConfig;
use crate::core::{Card, Face, Vegetable};
use crate::game::GameState;
use crate::loader::CardCatalogue;
use crate::zones::Pile;
use crate::{Result, SaladError};
use rand::Rng;

/// Build the draw piles for `players` seats from a full catalogue
///
/// Cards are grouped by vegetable, each group is shuffled and trimmed to the
/// per-vegetable count for this table size, then the groups are combined,
/// shuffled, turned criterion face up and dealt into the configured piles.
pub fn build_draw_piles(
    cards: Vec<Card>,
    players: usize,
    config: &GameConfig,
    rng: &mut impl Rng,
) -> Result<Vec<Pile>> {
    let per_vegetable = config.each_vegetable_count(players);

    let mut by_vegetable: Vec<Pile> = vec![Pile::new(); Vegetable::COUNT];
    for card in cards {
        by_vegetable[card.vegetable.index()].add(card);
    }

    for (vegetable, pile) in Vegetable::ALL.iter().zip(by_vegetable.iter_mut()) {
        if pile.len() < per_vegetable {
            return Err(SaladError::Catalogue(format!(
                "{players} players need {per_vegetable} {vegetable} cards, catalogue has {}",
                pile.len()
            )));
        }
        pile.shuffle(rng);
        let surplus = pile.len() - per_vegetable;
        pile.draw_many(surplus);
    }

    let mut deck: Pile = by_vegetable.into_iter().collect();
    deck.shuffle(rng);
    deck.show_all(Face::Criterion);
    Ok(deck.split_into(config.num_draw_piles))
}

/// Run the Setup phase against a game whose seats are already added
///
/// Loads the catalogue, installs the draw piles, fills the vegetable slots and
/// picks the starting seat uniformly at random.
pub fn setup_game(game: &mut GameState, catalogue: &dyn CardCatalogue) -> Result<()> {
    let players = game.players.len();
    game.config.check_player_count(players)?;

    let cards = catalogue.load_cards()?;
    let piles = {
        let mut rng = game.rng.borrow_mut();
        build_draw_piles(cards, players, &game.config, &mut *rng)?
    };
    game.market.install_piles(piles);
    let summary = game.market.refill();
    game.logger.verbose(&format!(
        "Market set up with {} cards ({} slots filled)",
        game.market.card_count(),
        summary.slots_filled
    ));

    let start = game.rng.borrow_mut().gen_range(0..players);
    game.current_turn = Some(start);
    Ok(())
}
