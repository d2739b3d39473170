//! Interactive controller for human players
//!
//! Reads move tokens from stdin (or any reader). The game loop's prompt already
//! carries the hand and market; `m` and `h` redisplay them on demand.

use crate::core::PlayerId;
use crate::game::controller::GameStateView;
use crate::game::controller::PlayerController;
use crate::{Result, SaladError};
use std::io::{self, BufRead, Write};

/// A controller that prompts a human player for moves
pub struct InteractiveController {
    player_id: PlayerId,
    input: Box<dyn BufRead>,
}

impl InteractiveController {
    /// Create a controller reading from stdin
    pub fn new(player_id: PlayerId) -> Self {
        Self::with_reader(player_id, Box::new(io::BufReader::new(io::stdin())))
    }

    /// Create a controller reading from any line source
    pub fn with_reader(player_id: PlayerId, input: Box<dyn BufRead>) -> Self {
        InteractiveController { player_id, input }
    }

    fn display_help(&self) {
        println!("\n=== Commands ===");
        println!("  m  show the market");
        println!("  h  show your hand");
        println!("  ?  show this help");
        println!("Drafting: a pile number (e.g. 0) or up to two slot letters (e.g. AD)");
        println!("Flipping: 'n' to keep, or the number of a criterion card to flip\n");
    }

}

impl PlayerController for InteractiveController {
    fn player_id(&self) -> PlayerId {
        self.player_id
    }

    fn is_bot(&self) -> bool {
        false
    }

    fn choose_move(&mut self, view: &GameStateView, instruction: &str) -> Result<String> {
        loop {
            print!("\n{instruction} ");
            io::stdout().flush()?;

            let mut input = String::new();
            if self.input.read_line(&mut input)? == 0 {
                return Err(SaladError::Actor(format!(
                    "input closed for player {}",
                    self.player_id
                )));
            }

            match input.trim() {
                "?" => self.display_help(),
                "m" | "M" => println!("\n{}", view.market()),
                "h" | "H" => {
                    if let Some(hand) = view.full_hand() {
                        println!("\n{hand}");
                    }
                }
                "" => {}
                token => return Ok(token.to_string()),
            }
        }
    }

    fn on_game_end(&mut self, view: &GameStateView, won: bool) {
        println!("\n=== Game Over ===");
        println!("You {}", if won { "WON!" } else { "LOST!" });
        if let Some(hand) = view.full_hand() {
            println!("Final hand:\n{hand}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::game::GameState;
    use std::io::Cursor;

    #[test]
    fn test_skips_info_commands_and_blank_lines() {
        let game = GameState::with_players(GameConfig::default(), &[("Ann", false), ("Bob", false)]);
        let view = GameStateView::new(&game, PlayerId::new(0));
        let mut controller = InteractiveController::with_reader(
            PlayerId::new(0),
            Box::new(Cursor::new("?\n\nh\n ad \n")),
        );
        assert_eq!(controller.choose_move(&view, "Your move:").unwrap(), "ad");
    }

    #[test]
    fn test_closed_input_is_actor_error() {
        let game = GameState::with_players(GameConfig::default(), &[("Ann", false), ("Bob", false)]);
        let view = GameStateView::new(&game, PlayerId::new(0));
        let mut controller =
            InteractiveController::with_reader(PlayerId::new(0), Box::new(Cursor::new("")));
        assert!(matches!(
            controller.choose_move(&view, "Your move:"),
            Err(SaladError::Actor(_))
        ));
    }
}
