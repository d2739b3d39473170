//! Fixed script controller for deterministic testing
//!
//! Replays a predetermined sequence of move tokens. Running past the end of the
//! script is an actor error, so a test notices when a game asks for more moves
//! than it expected.

use crate::core::PlayerId;
use crate::game::controller::GameStateView;
use crate::game::controller::PlayerController;
use crate::{Result, SaladError};

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct FixedScriptController {
    player_id: PlayerId,
    /// The predetermined sequence of move tokens
    script: Vec<String>,
    /// Current position in the script
    pub current_index: usize,
    /// Report as a bot (bad tokens become fatal) or as a human (re-prompted)
    is_bot: bool,
}

impl FixedScriptController {
    /// Create a scripted human seat
    ///
    /// # Example
    /// ```
    /// use point_salad_rs::game::FixedScriptController;
    /// use point_salad_rs::core::PlayerId;
    ///
    /// let controller = FixedScriptController::new(PlayerId::new(0), ["AB", "n", "1", "0"]);
    /// ```
    pub fn new<I, S>(player_id: PlayerId, script: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        FixedScriptController {
            player_id,
            script: script.into_iter().map(Into::into).collect(),
            current_index: 0,
            is_bot: false,
        }
    }

    /// Parse a space- or comma-separated script ("AB n 1 0")
    pub fn from_text(player_id: PlayerId, text: &str) -> Self {
        Self::new(
            player_id,
            text.split(|c: char| c == ',' || c.is_whitespace())
                .filter(|s| !s.is_empty()),
        )
    }

    pub fn as_bot(mut self) -> Self {
        self.is_bot = true;
        self
    }

    pub fn remaining(&self) -> usize {
        self.script.len().saturating_sub(self.current_index)
    }
}

impl PlayerController for FixedScriptController {
    fn player_id(&self) -> PlayerId {
        self.player_id
    }

    fn is_bot(&self) -> bool {
        self.is_bot
    }

    fn choose_move(&mut self, _view: &GameStateView, _instruction: &str) -> Result<String> {
        let token = self.script.get(self.current_index).cloned().ok_or_else(|| {
            SaladError::Actor(format!(
                "script for player {} exhausted after {} moves",
                self.player_id,
                self.script.len()
            ))
        })?;
        self.current_index += 1;
        Ok(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::game::GameState;

    #[test]
    fn test_replays_then_fails() {
        let game = GameState::with_players(GameConfig::default(), &[("A", false), ("B", false)]);
        let view = GameStateView::new(&game, PlayerId::new(0));
        let mut controller = FixedScriptController::from_text(PlayerId::new(0), "AB, n 1");
        assert_eq!(controller.remaining(), 3);
        assert_eq!(controller.choose_move(&view, "").unwrap(), "AB");
        assert_eq!(controller.choose_move(&view, "").unwrap(), "n");
        assert_eq!(controller.choose_move(&view, "").unwrap(), "1");
        assert!(matches!(
            controller.choose_move(&view, ""),
            Err(SaladError::Actor(_))
        ));
    }

    #[test]
    fn test_bot_flag() {
        let controller = FixedScriptController::new(PlayerId::new(1), ["0"]);
        assert!(!controller.is_bot());
        assert!(controller.as_bot().is_bot());
    }
}
