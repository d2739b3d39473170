//! Main game state structure

use crate::config::GameConfig;
use crate::core::{Card, Player, PlayerId};
use crate::game::{GameLogger, Market, Phase};
use crate::{Result, SaladError};
use rand::SeedableRng;
use rand_chacha::ChaCha12Rng;
use std::cell::RefCell;

/// Complete state of one match
///
/// Exactly one exists per match. Phases borrow it mutably in turn; nothing else
/// holds a reference across a phase boundary.
#[derive(Debug, Clone)]
pub struct GameState {
    /// Seats in id order; turn order follows this vector
    pub players: Vec<Player>,

    /// Index into `players` of the seat holding the turn, if any
    pub current_turn: Option<usize>,

    pub market: Market,

    pub phase: Phase,

    pub config: GameConfig,

    /// Random number generator for shuffles, the starting seat and bot coin flips
    ///
    /// Wrapped in RefCell so controllers reading the state through a shared view
    /// can still draw from it.
    pub rng: RefCell<ChaCha12Rng>,

    /// Centralized logger for game events
    pub logger: GameLogger,
}

impl GameState {
    /// Create an empty table; seats are added with [`GameState::add_player`]
    pub fn new(config: GameConfig) -> Self {
        GameState {
            players: Vec::new(),
            current_turn: None,
            market: Market::new(&config),
            phase: Phase::Setup,
            config,
            rng: RefCell::new(ChaCha12Rng::seed_from_u64(0)), // reseeded by callers that care
            logger: GameLogger::new(),
        }
    }

    /// Convenience constructor from `(name, is_bot)` pairs in seat order
    pub fn with_players(config: GameConfig, seats: &[(&str, bool)]) -> Self {
        let mut game = GameState::new(config);
        for (name, is_bot) in seats {
            game.add_player(*name, *is_bot);
        }
        game
    }

    /// Seed the RNG for deterministic games
    pub fn seed_rng(&mut self, seed: u64) {
        *self.rng.borrow_mut() = ChaCha12Rng::seed_from_u64(seed);
    }

    /// Add a seat; ids are handed out in seat order starting at 0
    pub fn add_player(&mut self, name: impl Into<String>, is_bot: bool) -> PlayerId {
        let id = PlayerId::new(self.players.len() as u32);
        self.players.push(Player::new(id, name, is_bot));
        id
    }

    pub fn get_player(&self, id: PlayerId) -> Result<&Player> {
        self.players
            .iter()
            .find(|p| p.id == id)
            .ok_or_else(|| SaladError::Phase(format!("no player with id {id}")))
    }

    pub fn get_player_mut(&mut self, id: PlayerId) -> Result<&mut Player> {
        self.players
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| SaladError::Phase(format!("no player with id {id}")))
    }

    pub fn get_player_idx(&self, id: PlayerId) -> Option<usize> {
        self.players.iter().position(|p| p.id == id)
    }

    /// The seat holding the turn, or a phase error if nobody does
    pub fn current_player(&self) -> Result<&Player> {
        self.current_turn
            .and_then(|idx| self.players.get(idx))
            .ok_or_else(|| SaladError::Phase(format!("no player holds the turn in {}", self.phase)))
    }

    pub fn current_player_id(&self) -> Option<PlayerId> {
        self.current_turn
            .and_then(|idx| self.players.get(idx))
            .map(|p| p.id)
    }

    /// Hands of every seat except `id`, in seat order
    pub fn other_hands(&self, id: PlayerId) -> Vec<&[Card]> {
        self.players
            .iter()
            .filter(|p| p.id != id)
            .map(|p| p.hand.cards())
            .collect()
    }

    /// Cards in the market plus every hand
    pub fn card_count(&self) -> usize {
        self.market.card_count() + self.players.iter().map(|p| p.hand.len()).sum::<usize>()
    }

    /// Pass the turn to the next seat, wrapping around
    pub fn advance_turn(&mut self) -> Result<()> {
        let current = self
            .current_turn
            .ok_or_else(|| SaladError::Phase("cannot advance: nobody holds the turn".to_string()))?;
        if self.players.is_empty() {
            return Err(SaladError::Phase("cannot advance: no players".to_string()));
        }
        self.current_turn = Some((current + 1) % self.players.len());
        Ok(())
    }
}
