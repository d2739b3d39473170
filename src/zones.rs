//! Card zones: draw piles and player hands

use crate::core::{Card, Face, VeggieCounts};
use serde::{Deserialize, Serialize};
use std::fmt;

/// An ordered stack of cards; the top is the end of the vector
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pile {
    cards: Vec<Card>,
}

impl Pile {
    pub fn new() -> Self {
        Pile { cards: Vec::new() }
    }

    pub fn from_cards(cards: Vec<Card>) -> Self {
        Pile { cards }
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn into_cards(self) -> Vec<Card> {
        self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Put a card on top
    pub fn add(&mut self, card: Card) {
        self.cards.push(card);
    }

    /// Look at top card without removing it
    pub fn peek_top(&self) -> Option<&Card> {
        self.cards.last()
    }

    /// Draw from top
    pub fn draw_top(&mut self) -> Option<Card> {
        self.cards.pop()
    }

    /// Draw up to `count` cards from the top, in draw order
    pub fn draw_many(&mut self, count: usize) -> Vec<Card> {
        let count = count.min(self.cards.len());
        let mut drawn = self.cards.split_off(self.cards.len() - count);
        drawn.reverse();
        drawn
    }

    /// Remove the bottom half (rounded down) and return it as a new pile
    ///
    /// Relative order inside both halves is preserved.
    pub fn split_in_two(&mut self) -> Pile {
        let half = self.cards.len() / 2;
        let top = self.cards.split_off(half);
        let bottom = std::mem::replace(&mut self.cards, top);
        Pile::from_cards(bottom)
    }

    /// Partition into `parts` near-equal piles; the first piles take the remainder
    pub fn split_into(self, parts: usize) -> Vec<Pile> {
        if parts == 0 {
            return Vec::new();
        }
        let base = self.cards.len() / parts;
        let mut remainder = self.cards.len() % parts;
        let mut rest = self.cards.into_iter();
        let mut piles = Vec::with_capacity(parts);
        for _ in 0..parts {
            let mut size = base;
            if remainder > 0 {
                size += 1;
                remainder -= 1;
            }
            piles.push(Pile::from_cards(rest.by_ref().take(size).collect()));
        }
        piles
    }

    /// Append every card of `other` on top of this pile
    pub fn concat(&mut self, other: Pile) {
        self.cards.extend(other.cards);
    }

    /// Shuffle the pile
    pub fn shuffle(&mut self, rng: &mut impl rand::Rng) {
        use rand::seq::SliceRandom;
        self.cards.shuffle(rng);
    }

    /// Toggle the face of every card
    pub fn flip_all(&mut self) {
        for card in &mut self.cards {
            card.flip();
        }
    }

    /// Turn every card so that `face` is showing
    pub fn show_all(&mut self, face: Face) {
        for card in &mut self.cards {
            card.show(face);
        }
    }
}

impl FromIterator<Pile> for Pile {
    fn from_iter<I: IntoIterator<Item = Pile>>(iter: I) -> Self {
        let mut combined = Pile::new();
        for pile in iter {
            combined.concat(pile);
        }
        combined
    }
}

/// Cards held by one player, kept in the order they were drafted
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hand {
    cards: Vec<Card>,
}

impl Hand {
    pub fn new() -> Self {
        Hand { cards: Vec::new() }
    }

    pub fn from_cards(cards: Vec<Card>) -> Self {
        Hand { cards }
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn add(&mut self, card: Card) {
        self.cards.push(card);
    }

    pub fn add_cards(&mut self, cards: impl IntoIterator<Item = Card>) {
        self.cards.extend(cards);
    }

    /// Positions (in the full hand) of the criterion-face-up cards
    pub fn criterion_positions(&self) -> Vec<usize> {
        self.cards
            .iter()
            .enumerate()
            .filter(|(_, c)| c.is_criterion_side_up())
            .map(|(i, _)| i)
            .collect()
    }

    /// The criterion-face-up cards, in hand order
    pub fn criterion_cards(&self) -> impl Iterator<Item = &Card> {
        self.cards.iter().filter(|c| c.is_criterion_side_up())
    }

    pub fn has_criterion_cards(&self) -> bool {
        self.cards.iter().any(Card::is_criterion_side_up)
    }

    /// Flip the `index`-th criterion-face-up card to its vegetable face
    ///
    /// Returns false if no such card exists.
    pub fn flip_criterion(&mut self, index: usize) -> bool {
        match self.criterion_positions().get(index) {
            Some(&pos) => {
                self.cards[pos].flip();
                true
            }
            None => false,
        }
    }

    pub fn veggie_counts(&self) -> VeggieCounts {
        Card::count_vegetables(&self.cards)
    }
}

impl fmt::Display for Hand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Criteria: ")?;
        for (i, card) in self.criterion_cards().enumerate() {
            write!(f, "[{i}] {card}\t\t")?;
        }
        f.write_str("\nVegetables: ")?;
        for (veg, count) in self.veggie_counts().iter().filter(|(_, n)| *n > 0) {
            write!(f, "{veg}: {count}\t\t")?;
        }
        Ok(())
    }
}
