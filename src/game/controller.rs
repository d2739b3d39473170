//! Player controller trait and game state view
//!
//! The game loop asks the controller of the seat holding the turn for a move
//! token. Controllers see the game only through a read-only view; the token they
//! return is parsed and validated by the loop, never trusted.

use crate::config::GameConfig;
use crate::core::{Card, PlayerId};
use crate::game::{GameLogger, GameState, Market, Phase};
use crate::zones::Hand;
use crate::Result;
use rand_chacha::ChaCha12Rng;

/// Read-only view of game state for controllers
pub struct GameStateView<'a> {
    game: &'a GameState,
    player_id: PlayerId,
}

impl<'a> GameStateView<'a> {
    /// Create a new view of the game state from a player's perspective
    pub fn new(game: &'a GameState, player_id: PlayerId) -> Self {
        GameStateView { game, player_id }
    }

    pub fn player_id(&self) -> PlayerId {
        self.player_id
    }

    /// Phase the move is requested for
    pub fn phase(&self) -> Phase {
        self.game.phase
    }

    pub fn market(&self) -> &Market {
        &self.game.market
    }

    pub fn config(&self) -> &GameConfig {
        &self.game.config
    }

    /// This player's hand (empty if the id is unknown)
    pub fn hand(&self) -> &'a [Card] {
        self.game
            .get_player(self.player_id)
            .map(|p| p.hand.cards())
            .unwrap_or(&[])
    }

    pub fn full_hand(&self) -> Option<&'a Hand> {
        self.game.get_player(self.player_id).ok().map(|p| &p.hand)
    }

    /// Every opponent's hand, in seat order
    pub fn other_hands(&self) -> Vec<&'a [Card]> {
        self.game.other_hands(self.player_id)
    }

    pub fn player_name(&self, id: PlayerId) -> Option<&'a str> {
        self.game.get_player(id).ok().map(|p| p.name.as_str())
    }

    pub fn num_players(&self) -> usize {
        self.game.players.len()
    }

    /// Borrow the game's RNG for a random decision
    ///
    /// Controllers that draw from here stay deterministic under a seeded game.
    pub fn with_rng<T>(&self, f: impl FnOnce(&mut ChaCha12Rng) -> T) -> T {
        let mut rng = self.game.rng.borrow_mut();
        f(&mut rng)
    }

    pub fn logger(&self) -> &GameLogger {
        &self.game.logger
    }
}

/// Player controller trait
///
/// Implement this trait to create bots or connect a human seat.
pub trait PlayerController {
    /// Get the player ID this controller is responsible for
    fn player_id(&self) -> PlayerId;

    /// Automated seats are re-asked silently after a bad token, up to `MAX_BOT_ATTEMPTS` times
    fn is_bot(&self) -> bool;

    /// Produce a move token for the phase shown by `view`
    ///
    /// `instruction` is the human-readable prompt for the move. An error means the
    /// move source itself failed (closed input, exhausted script, bot fault).
    fn choose_move(&mut self, view: &GameStateView, instruction: &str) -> Result<String>;

    /// Called when the game ends (for cleanup/logging)
    fn on_game_end(&mut self, _view: &GameStateView, _won: bool) {}
}
