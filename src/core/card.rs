//! Two-sided Point Salad cards

use crate::core::{Criterion, Vegetable, VeggieCounts};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Simple integer ID for cards
///
/// IDs are assigned once when the catalogue is loaded and stay stable for the
/// whole match. Cards are never created or destroyed mid-game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CardId(u32);

impl CardId {
    pub fn new(id: u32) -> Self {
        CardId(id)
    }

    pub fn as_u32(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for CardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Which side of a card is showing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Face {
    #[default]
    Vegetable,
    Criterion,
}

/// A card with a vegetable face and a criterion face
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    pub id: CardId,
    pub vegetable: Vegetable,
    pub criterion: Option<Criterion>,
    face: Face,
}

impl Card {
    /// New card, vegetable face up
    pub fn new(id: CardId, vegetable: Vegetable, criterion: Option<Criterion>) -> Self {
        Card {
            id,
            vegetable,
            criterion,
            face: Face::Vegetable,
        }
    }

    /// Builder helper for tests and fixtures
    pub fn with_face(mut self, face: Face) -> Self {
        self.face = face;
        self
    }

    pub fn face(&self) -> Face {
        self.face
    }

    pub fn is_criterion_side_up(&self) -> bool {
        self.face == Face::Criterion
    }

    pub fn is_vegetable_side_up(&self) -> bool {
        self.face == Face::Vegetable
    }

    pub fn flip(&mut self) {
        self.face = match self.face {
            Face::Vegetable => Face::Criterion,
            Face::Criterion => Face::Vegetable,
        };
    }

    /// Turn the card so that `face` is showing
    pub fn show(&mut self, face: Face) {
        self.face = face;
    }

    /// The criterion this card currently contributes, if criterion face up
    pub fn active_criterion(&self) -> Option<&Criterion> {
        if self.is_criterion_side_up() {
            self.criterion.as_ref()
        } else {
            None
        }
    }

    /// Tally the vegetable-face-up cards of a hand
    pub fn count_vegetables(cards: &[Card]) -> VeggieCounts {
        cards
            .iter()
            .filter(|c| c.is_vegetable_side_up())
            .map(|c| c.vegetable)
            .collect()
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.face, &self.criterion) {
            (Face::Criterion, Some(criterion)) => write!(f, "{criterion} ({})", self.vegetable),
            (Face::Criterion, None) => write!(f, "<no criterion> ({})", self.vegetable),
            (Face::Vegetable, _) => write!(f, "{}", self.vegetable),
        }
    }
}
