//! Game phases

use serde::{Deserialize, Serialize};
use std::fmt;

/// Phases of a match
///
/// `Setup -> Drafting -> Flipping -> (Drafting | Scoring)`; Scoring is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Phase {
    #[default]
    Setup,
    Drafting,
    Flipping,
    Scoring,
}

impl Phase {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Phase::Scoring)
    }

    /// Whether the state machine may move from `self` to `next`
    pub fn can_transition_to(&self, next: Phase) -> bool {
        matches!(
            (self, next),
            (Phase::Setup, Phase::Drafting)
                | (Phase::Drafting, Phase::Flipping)
                | (Phase::Flipping, Phase::Drafting)
                | (Phase::Flipping, Phase::Scoring)
        )
    }

    /// Phases in which a player holds the turn
    pub fn has_active_player(&self) -> bool {
        matches!(self, Phase::Drafting | Phase::Flipping)
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Phase::Setup => "Setup",
            Phase::Drafting => "Drafting",
            Phase::Flipping => "Flipping",
            Phase::Scoring => "Scoring",
        };
        f.write_str(name)
    }
}
