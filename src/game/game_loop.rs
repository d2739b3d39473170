//! Game loop implementation
//!
//! Drives a match through Setup, Drafting, Flipping and Scoring. Each phase
//! function runs to completion against the borrowed `GameState` and returns the
//! phase to enter next.

/// Macro for conditional logging that avoids allocation when feature is disabled
///
/// When verbose-logging feature is disabled, this becomes a no-op at compile time,
/// eliminating the format! allocations.
macro_rules! log_if_verbose {
    ($logger:expr, $($arg:tt)*) => {
        #[cfg(feature = "verbose-logging")]
        {
            $logger.verbose(&format!($($arg)*));
        }
        #[cfg(not(feature = "verbose-logging"))]
        {
            let _ = &$logger; // Suppress unused variable warning
        }
    };
}

use crate::core::PlayerId;
use crate::game::command::{DraftCommand, FlipCommand};
use crate::game::controller::{GameStateView, PlayerController};
use crate::game::notifier::Notifier;
use crate::game::scorer::calculate_score;
use crate::game::setup::setup_game;
use crate::game::{GameState, Phase};
use crate::loader::CardCatalogue;
use crate::{Result, SaladError};
use serde::Serialize;

const TURN_RULE: &str = "****************************************************************";

/// Consecutive rejected tokens a bot may return before the match is aborted
pub const MAX_BOT_ATTEMPTS: u32 = 64;

/// Result of running a game to completion
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameResult {
    /// Highest score; ties go to the lowest player id
    pub winner: PlayerId,
    /// Final score of every seat, in seat order
    pub scores: Vec<(PlayerId, i32)>,
    /// Number of drafting turns taken
    pub turns_played: u32,
}

impl GameResult {
    pub fn score_of(&self, player: PlayerId) -> Option<i32> {
        self.scores.iter().find(|(id, _)| *id == player).map(|(_, s)| *s)
    }

    pub fn winning_score(&self) -> i32 {
        self.score_of(self.winner).unwrap_or_default()
    }
}

/// Pick the winner from final scores: highest score, ties to the lowest id
pub fn select_winner(scores: &[(PlayerId, i32)]) -> Option<(PlayerId, i32)> {
    let mut best: Option<(PlayerId, i32)> = None;
    for &(id, score) in scores {
        best = match best {
            Some((best_id, best_score))
                if best_score > score || (best_score == score && best_id < id) =>
            {
                Some((best_id, best_score))
            }
            _ => Some((id, score)),
        };
    }
    best
}

/// Game loop manager
pub struct GameLoop<'a> {
    /// The game state
    pub game: &'a mut GameState,
    catalogue: &'a dyn CardCatalogue,
    notifier: &'a mut dyn Notifier,
    /// Maximum drafting turns before the match is aborted
    max_turns: u32,
    turns_elapsed: u32,
    result: Option<GameResult>,
}

impl<'a> GameLoop<'a> {
    /// Create a new game loop for the given game state
    pub fn new(
        game: &'a mut GameState,
        catalogue: &'a dyn CardCatalogue,
        notifier: &'a mut dyn Notifier,
    ) -> Self {
        GameLoop {
            game,
            catalogue,
            notifier,
            max_turns: 10_000,
            turns_elapsed: 0,
            result: None,
        }
    }

    /// Set the turn limit; exceeding it is a phase error
    pub fn with_max_turns(mut self, max_turns: u32) -> Self {
        self.max_turns = max_turns;
        self
    }

    pub fn turns_elapsed(&self) -> u32 {
        self.turns_elapsed
    }

    /// Result of the match once Scoring has run
    pub fn result(&self) -> Option<&GameResult> {
        self.result.as_ref()
    }

    /// Run the match from its current phase until Scoring completes
    pub fn run_game(
        &mut self,
        controllers: &mut [Box<dyn PlayerController>],
    ) -> Result<GameResult> {
        self.check_controllers(controllers)?;

        while self.step(controllers)?.is_some() {}

        let result = self
            .result
            .clone()
            .ok_or_else(|| SaladError::Phase("game ended without a result".to_string()))?;

        for controller in controllers.iter_mut() {
            let player_id = controller.player_id();
            let view = GameStateView::new(self.game, player_id);
            controller.on_game_end(&view, player_id == result.winner);
        }

        Ok(result)
    }

    /// Process the current phase and move to the next one
    ///
    /// Returns the phase entered, or None once Scoring has completed.
    pub fn step(
        &mut self,
        controllers: &mut [Box<dyn PlayerController>],
    ) -> Result<Option<Phase>> {
        let next = match self.game.phase {
            Phase::Setup => self.setup_phase()?,
            Phase::Drafting => self.drafting_phase(controllers)?,
            Phase::Flipping => self.flipping_phase(controllers)?,
            Phase::Scoring => {
                if self.result.is_none() {
                    self.scoring_phase()?;
                }
                return Ok(None);
            }
        };

        if !self.game.phase.can_transition_to(next) {
            return Err(SaladError::Phase(format!(
                "illegal transition {} -> {next}",
                self.game.phase
            )));
        }
        self.game.phase = next;
        Ok(Some(next))
    }

    /// Every seat needs exactly one controller that agrees on being a bot
    fn check_controllers(&self, controllers: &[Box<dyn PlayerController>]) -> Result<()> {
        for player in &self.game.players {
            let matching: Vec<_> = controllers
                .iter()
                .filter(|c| c.player_id() == player.id)
                .collect();
            match matching.as_slice() {
                [controller] if controller.is_bot() == player.is_bot => {}
                [_] => {
                    return Err(SaladError::Phase(format!(
                        "controller for {} disagrees on being a bot",
                        player.label()
                    )))
                }
                [] => {
                    return Err(SaladError::Phase(format!(
                        "no controller for {}",
                        player.label()
                    )))
                }
                _ => {
                    return Err(SaladError::Phase(format!(
                        "several controllers for {}",
                        player.label()
                    )))
                }
            }
        }
        Ok(())
    }

    fn controller_for(
        controllers: &mut [Box<dyn PlayerController>],
        player: PlayerId,
    ) -> Result<&mut Box<dyn PlayerController>> {
        controllers
            .iter_mut()
            .find(|c| c.player_id() == player)
            .ok_or_else(|| SaladError::Phase(format!("no controller for player {player}")))
    }

    /// Bots are re-asked silently; one that never produces a legal move is a fault
    fn check_bot_attempts(label: &str, attempts: u32) -> Result<()> {
        if attempts >= MAX_BOT_ATTEMPTS {
            return Err(SaladError::Actor(format!(
                "bot {label} returned {attempts} invalid moves in a row"
            )));
        }
        Ok(())
    }

    fn setup_phase(&mut self) -> Result<Phase> {
        setup_game(self.game, self.catalogue)?;

        let first = self.game.current_player()?;
        self.game.logger.normal(&format!(
            "Game started with {} players; {} goes first",
            self.game.players.len(),
            first.label()
        ));
        let announcement = format!("The game begins! {} will start.", first.label());
        self.notifier.send_to_all(&announcement)?;
        Ok(Phase::Drafting)
    }

    fn drafting_phase(
        &mut self,
        controllers: &mut [Box<dyn PlayerController>],
    ) -> Result<Phase> {
        self.turns_elapsed += 1;
        if self.turns_elapsed > self.max_turns {
            return Err(SaladError::Phase(format!(
                "turn limit of {} exceeded",
                self.max_turns
            )));
        }

        let player = self.game.current_player()?;
        let (player_id, label, is_bot) = (player.id, player.label(), player.is_bot);
        let controller = Self::controller_for(controllers, player_id)?;

        self.notifier
            .send_to_all_except(player_id, &format!("Waiting for {label} to draft..."))?;
        let instruction = format!(
            "\n{TURN_RULE}\nIt's your turn! Your hand is:\n{}\n{}\n{}",
            self.game.get_player(player_id)?.hand,
            self.game.market,
            self.game.market.drafting_instruction()
        );

        let mut attempts = 0;
        let (command, cards) = loop {
            let token = {
                let view = GameStateView::new(self.game, player_id);
                controller.choose_move(&view, &instruction)?
            };
            let attempt =
                DraftCommand::parse(&token).and_then(|cmd| self.game.market.draft(&cmd).map(|c| (cmd, c)));
            match attempt {
                Ok(drafted) => break drafted,
                Err(e) if is_bot => {
                    attempts += 1;
                    log_if_verbose!(self.game.logger, "{label} returned an invalid draft '{token}': {e}");
                    Self::check_bot_attempts(&label, attempts)?;
                }
                Err(e) => {
                    self.notifier.send_to(
                        player_id,
                        &format!("Invalid draft ({e}). Please try again."),
                    )?;
                }
            }
        };

        let names: Vec<String> = cards.iter().map(ToString::to_string).collect();
        self.game
            .logger
            .controller_choice(&label, &format!("drafted {command}: {}", names.join(", ")));
        self.game.get_player_mut(player_id)?.hand.add_cards(cards);

        let summary = self.game.market.refill();
        log_if_verbose!(
            self.game.logger,
            "Market refill: {} slot(s) filled, {} pile(s) rebalanced, {} card(s) left",
            summary.slots_filled,
            summary.piles_rebalanced,
            self.game.market.card_count()
        );

        Ok(Phase::Flipping)
    }

    fn flipping_phase(
        &mut self,
        controllers: &mut [Box<dyn PlayerController>],
    ) -> Result<Phase> {
        let player = self.game.current_player()?;
        let (player_id, label, is_bot) = (player.id, player.label(), player.is_bot);
        let has_criteria = player.hand.has_criterion_cards();

        if has_criteria {
            let controller = Self::controller_for(controllers, player_id)?;
            let instruction = format!(
                "\n{}\nWould you like to turn a criterion card into a veggie card? (Syntax example: n or 2)",
                self.game.get_player(player_id)?.hand
            );
            let mut attempts = 0;
            loop {
                let token = {
                    let view = GameStateView::new(self.game, player_id);
                    controller.choose_move(&view, &instruction)?
                };
                let hand = &mut self.game.get_player_mut(player_id)?.hand;
                let applied = match FlipCommand::parse(&token) {
                    Ok(FlipCommand::Keep) => Some("kept every criterion".to_string()),
                    Ok(FlipCommand::Flip(index)) => {
                        let name = hand.criterion_cards().nth(index).map(ToString::to_string);
                        if name.is_some() && hand.flip_criterion(index) {
                            name.map(|name| format!("flipped {name}"))
                        } else {
                            None
                        }
                    }
                    Err(_) => None,
                };

                match applied {
                    Some(message) => {
                        self.game.logger.controller_choice(&label, &message);
                        break;
                    }
                    None if is_bot => {
                        attempts += 1;
                        log_if_verbose!(self.game.logger, "{label} returned an invalid flip '{token}'");
                        Self::check_bot_attempts(&label, attempts)?;
                    }
                    None => {
                        self.notifier
                            .send_to(player_id, "Invalid answer. Please try again.")?;
                    }
                }
            }
        }

        if !is_bot {
            self.notifier
                .send_to(player_id, &format!("\nYour turn is completed\n{TURN_RULE}\n"))?;
        }
        let hand = &self.game.get_player(player_id)?.hand;
        self.notifier
            .send_to_all_except(player_id, &format!("{label}'s hand is now: \n{hand}\n"))?;

        if self.game.market.is_empty() {
            self.game.current_turn = None;
            Ok(Phase::Scoring)
        } else {
            self.game.advance_turn()?;
            Ok(Phase::Drafting)
        }
    }

    fn scoring_phase(&mut self) -> Result<()> {
        self.notifier
            .send_to_all("The game is over! Computing the final scores...")?;

        let scores: Vec<(PlayerId, i32)> = self
            .game
            .players
            .iter()
            .map(|p| {
                let others = self.game.other_hands(p.id);
                (p.id, calculate_score(p.hand.cards(), &others))
            })
            .collect();
        for (player, &(_, score)) in self.game.players.iter_mut().zip(&scores) {
            player.score = score;
        }

        let (winner, max_score) = select_winner(&scores)
            .ok_or_else(|| SaladError::Phase("cannot score a game without players".to_string()))?;
        let winner_label = self.game.get_player(winner)?.label();

        self.game.logger.minimal(&format!(
            "{winner_label} is the winner with a score of {max_score}!"
        ));
        for player in &self.game.players {
            self.game.logger.minimal(&format!(
                "{} has a score of {}.",
                player.label(),
                player.score
            ));
        }

        for player in &self.game.players {
            if player.is_bot {
                continue;
            }
            let message = if player.id == winner {
                format!("\nCongratulations! You are the winner with a score of {max_score}")
            } else {
                format!(
                    "\nYou lost with a score of {}... {winner_label} is the winner with a score of {max_score}.",
                    player.score
                )
            };
            self.notifier.send_to(player.id, &message)?;
        }

        self.result = Some(GameResult {
            winner,
            scores,
            turns_played: self.turns_elapsed,
        });
        Ok(())
    }
}
