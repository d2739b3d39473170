//! Game configuration
//!
//! Table sizes and draft limits. Every field has a default so that a config file
//! only needs to name what it overrides.

use crate::core::Vegetable;
use crate::{Result, SaladError};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Slot letters run from 'A', so at most 26 slots can be addressed
pub const MAX_VEGETABLE_SLOTS: usize = 26;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub num_draw_piles: usize,
    pub num_vegetable_slots: usize,
    /// Criterion cards taken per criterion draft
    pub criterion_draft: usize,
    /// Vegetable cards taken per vegetable draft
    pub vegetable_draft: usize,
    pub min_players: usize,
    pub max_players: usize,
    /// Deck size contributed by each seat
    pub cards_per_player: usize,
    pub manifest_path: String,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            num_draw_piles: 3,
            num_vegetable_slots: 6,
            criterion_draft: 1,
            vegetable_draft: 2,
            min_players: 2,
            max_players: 6,
            cards_per_player: 18,
            manifest_path: "assets/point_salad_manifest.json".to_string(),
        }
    }
}

impl GameConfig {
    /// Load overrides from a JSON file and validate them
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| SaladError::Config(format!("cannot read {}: {e}", path.display())))?;
        let config: GameConfig = serde_json::from_str(&text)
            .map_err(|e| SaladError::Config(format!("malformed config {}: {e}", path.display())))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.num_draw_piles == 0 {
            return Err(SaladError::Config("at least one draw pile is required".to_string()));
        }
        if self.num_vegetable_slots < self.num_draw_piles {
            return Err(SaladError::Config(format!(
                "{} vegetable slots cannot be fed by {} piles",
                self.num_vegetable_slots, self.num_draw_piles
            )));
        }
        if self.num_vegetable_slots > MAX_VEGETABLE_SLOTS {
            return Err(SaladError::Config(format!(
                "at most {MAX_VEGETABLE_SLOTS} vegetable slots are supported, got {}",
                self.num_vegetable_slots
            )));
        }
        if self.num_draw_piles > 10 {
            return Err(SaladError::Config(format!(
                "piles are addressed by one digit, got {} piles",
                self.num_draw_piles
            )));
        }
        if self.criterion_draft == 0 || self.vegetable_draft == 0 {
            return Err(SaladError::Config("draft sizes must be positive".to_string()));
        }
        if self.min_players == 0 || self.min_players > self.max_players {
            return Err(SaladError::Config(format!(
                "invalid player range {}..={}",
                self.min_players, self.max_players
            )));
        }
        Ok(())
    }

    /// Check a seat count against the configured range
    pub fn check_player_count(&self, players: usize) -> Result<()> {
        if players < self.min_players || players > self.max_players {
            return Err(SaladError::Phase(format!(
                "{players} players cannot play; expected {} to {}",
                self.min_players, self.max_players
            )));
        }
        Ok(())
    }

    /// Cards of each vegetable kept in the deck for `players` seats
    pub fn each_vegetable_count(&self, players: usize) -> usize {
        players * self.cards_per_player / Vegetable::COUNT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = GameConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.each_vegetable_count(2), 6);
        assert_eq!(config.each_vegetable_count(6), 18);
    }

    #[test]
    fn test_partial_json_takes_defaults() {
        let config: GameConfig = serde_json::from_str(r#"{ "max_players": 4 }"#).unwrap();
        assert_eq!(config.max_players, 4);
        assert_eq!(config.num_draw_piles, 3);
        assert_eq!(config.vegetable_draft, 2);
    }

    #[test]
    fn test_validate_rejects_bad_tables() {
        let config = GameConfig {
            num_vegetable_slots: 2,
            ..GameConfig::default()
        };
        assert!(matches!(config.validate(), Err(SaladError::Config(_))));

        let config = GameConfig {
            min_players: 5,
            max_players: 3,
            ..GameConfig::default()
        };
        assert!(config.validate().is_err());

        let config = GameConfig {
            num_vegetable_slots: 27,
            ..GameConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_player_count_range() {
        let config = GameConfig::default();
        assert!(config.check_player_count(1).is_err());
        assert!(config.check_player_count(2).is_ok());
        assert!(config.check_player_count(6).is_ok());
        assert!(config.check_player_count(7).is_err());
    }
}
