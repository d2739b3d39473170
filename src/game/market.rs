//! The shared market: criterion draw piles and face-up vegetable slots
//!
//! Piles hold cards criterion face up; the top of each pile is offered as a
//! criterion draft. Slots hold single cards vegetable face up. Slot `i` is always
//! fed from pile `i % piles`, and an exhausted pile is rebuilt from the bottom half
//! of the largest pile, so no randomness is introduced after setup.

use crate::config::GameConfig;
use crate::core::{Card, Face};
use crate::game::command::{slot_letter, DraftCommand};
use crate::zones::Pile;
use std::fmt;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MarketError {
    #[error("invalid choice '{token}': {reason}")]
    InvalidToken { token: String, reason: String },

    #[error("pile {0} does not exist")]
    PileOutOfRange(usize),

    #[error("vegetable slot {0} does not exist")]
    SlotOutOfRange(usize),

    #[error("{0} is empty")]
    EmptySource(String),
}

impl MarketError {
    pub(crate) fn invalid(token: &str, reason: &str) -> Self {
        MarketError::InvalidToken {
            token: token.to_string(),
            reason: reason.to_string(),
        }
    }
}

/// What a refill pass changed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RefillSummary {
    pub slots_filled: usize,
    pub piles_rebalanced: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Market {
    piles: Vec<Pile>,
    slots: Vec<Option<Card>>,
    criterion_draft: usize,
    vegetable_draft: usize,
}

impl Market {
    /// An empty market sized by the config
    pub fn new(config: &GameConfig) -> Self {
        Market {
            piles: vec![Pile::new(); config.num_draw_piles],
            slots: vec![None; config.num_vegetable_slots],
            criterion_draft: config.criterion_draft,
            vegetable_draft: config.vegetable_draft,
        }
    }

    /// Replace the draw piles (setup); extra piles are ignored, missing ones stay empty
    pub fn install_piles(&mut self, piles: Vec<Pile>) {
        let count = self.piles.len();
        let mut piles = piles.into_iter();
        for slot in 0..count {
            self.piles[slot] = piles.next().unwrap_or_default();
        }
    }

    pub fn piles(&self) -> &[Pile] {
        &self.piles
    }

    pub fn slots(&self) -> &[Option<Card>] {
        &self.slots
    }

    pub fn num_piles(&self) -> usize {
        self.piles.len()
    }

    pub fn num_slots(&self) -> usize {
        self.slots.len()
    }

    pub fn criterion_draft(&self) -> usize {
        self.criterion_draft
    }

    pub fn vegetable_draft(&self) -> usize {
        self.vegetable_draft
    }

    /// Check a drafting token without touching the market
    pub fn is_cards_string_valid(&self, token: &str) -> bool {
        DraftCommand::parse(token)
            .and_then(|command| self.validate(&command))
            .is_ok()
    }

    /// Check a parsed draft against the current market
    pub fn validate(&self, command: &DraftCommand) -> Result<(), MarketError> {
        let token = command.to_string();
        match command {
            DraftCommand::Criteria(piles) => {
                if piles.is_empty() || piles.len() > self.criterion_draft {
                    return Err(MarketError::invalid(
                        &token,
                        &format!("draft up to {} criterion card(s)", self.criterion_draft),
                    ));
                }
                for &pile in piles {
                    let source = self.piles.get(pile).ok_or(MarketError::PileOutOfRange(pile))?;
                    if source.is_empty() {
                        return Err(MarketError::EmptySource(format!("pile {pile}")));
                    }
                }
            }
            DraftCommand::Vegetables(slots) => {
                if slots.is_empty() || slots.len() > self.vegetable_draft {
                    return Err(MarketError::invalid(
                        &token,
                        &format!("draft up to {} vegetable card(s)", self.vegetable_draft),
                    ));
                }
                for &slot in slots {
                    let source = self.slots.get(slot).ok_or(MarketError::SlotOutOfRange(slot))?;
                    if source.is_none() {
                        return Err(MarketError::EmptySource(format!(
                            "vegetable slot {}",
                            slot_letter(slot)
                        )));
                    }
                }
            }
        }
        Ok(())
    }

    /// Parse, validate and take the cards named by a token
    pub fn draft_cards(&mut self, token: &str) -> Result<Vec<Card>, MarketError> {
        let command = DraftCommand::parse(token)?;
        self.draft(&command)
    }

    /// Take the cards named by a draft
    ///
    /// Validation happens first, so a failed draft leaves the market untouched.
    /// Criterion cards come out criterion face up, vegetables vegetable face up.
    pub fn draft(&mut self, command: &DraftCommand) -> Result<Vec<Card>, MarketError> {
        self.validate(command)?;

        let mut cards = Vec::with_capacity(command.len());
        match command {
            DraftCommand::Criteria(piles) => {
                for &pile in piles {
                    if let Some(mut card) = self.piles[pile].draw_top() {
                        card.show(Face::Criterion);
                        cards.push(card);
                    }
                }
            }
            DraftCommand::Vegetables(slots) => {
                for &slot in slots {
                    if let Some(mut card) = self.slots[slot].take() {
                        card.show(Face::Vegetable);
                        cards.push(card);
                    }
                }
            }
        }
        Ok(cards)
    }

    /// Rebuild one empty pile from the bottom half of the largest pile
    ///
    /// Returns true if any card moved. Ties for the largest pile go to the lowest
    /// index. Nothing happens if the pile is not empty or every pile is empty.
    pub fn refill_pile_at(&mut self, pile: usize) -> Result<bool, MarketError> {
        if pile >= self.piles.len() {
            return Err(MarketError::PileOutOfRange(pile));
        }
        if !self.piles[pile].is_empty() {
            return Ok(false);
        }

        let mut largest = None;
        let mut largest_size = 0;
        for (i, candidate) in self.piles.iter().enumerate() {
            if candidate.len() > largest_size {
                largest = Some(i);
                largest_size = candidate.len();
            }
        }

        let Some(largest) = largest else {
            return Ok(false);
        };
        let bottom = self.piles[largest].split_in_two();
        let moved = !bottom.is_empty();
        self.piles[pile] = bottom;
        Ok(moved)
    }

    /// Rebalance every empty pile; returns the number of piles rebuilt
    pub fn balance_piles(&mut self) -> usize {
        let mut rebuilt = 0;
        for pile in 0..self.piles.len() {
            if let Ok(true) = self.refill_pile_at(pile) {
                rebuilt += 1;
            }
        }
        rebuilt
    }

    /// Fill every empty slot from its feeding pile
    ///
    /// Piles are balanced before and after; an empty feeding pile is rebalanced
    /// on the spot. A slot stays empty when its pile cannot be rebuilt.
    pub fn refill(&mut self) -> RefillSummary {
        if self.piles.is_empty() {
            return RefillSummary::default();
        }

        let mut summary = RefillSummary {
            piles_rebalanced: self.balance_piles(),
            ..RefillSummary::default()
        };

        for slot in 0..self.slots.len() {
            if self.slots[slot].is_some() {
                continue;
            }
            let pile = slot % self.piles.len();
            if self.piles[pile].is_empty() {
                if let Ok(true) = self.refill_pile_at(pile) {
                    summary.piles_rebalanced += 1;
                }
            }
            if let Some(mut card) = self.piles[pile].draw_top() {
                card.show(Face::Vegetable);
                self.slots[slot] = Some(card);
                summary.slots_filled += 1;
            }
        }

        summary.piles_rebalanced += self.balance_piles();
        summary
    }

    /// True once every pile and every slot is empty; ends the game
    pub fn is_empty(&self) -> bool {
        self.piles.iter().all(Pile::is_empty) && self.slots.iter().all(Option::is_none)
    }

    /// Cards still in the market
    pub fn card_count(&self) -> usize {
        self.piles.iter().map(Pile::len).sum::<usize>() + self.slots.iter().flatten().count()
    }

    /// Non-empty piles with their top card
    pub fn available_piles(&self) -> Vec<(usize, &Card)> {
        self.piles
            .iter()
            .enumerate()
            .filter_map(|(i, pile)| pile.peek_top().map(|card| (i, card)))
            .collect()
    }

    /// Occupied slots with their card
    pub fn available_slots(&self) -> Vec<(usize, &Card)> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(i, slot)| slot.as_ref().map(|card| (i, card)))
            .collect()
    }

    /// Single-pile criterion tokens currently accepted ("0", "2", ...)
    pub fn available_criteria_tokens(&self) -> Vec<String> {
        self.available_piles()
            .into_iter()
            .map(|(i, _)| i.to_string())
            .collect()
    }

    /// Letters of occupied slots ("A", "D", ...)
    pub fn available_vegetable_tokens(&self) -> Vec<String> {
        self.available_slots()
            .into_iter()
            .map(|(i, _)| slot_letter(i).to_string())
            .collect()
    }

    /// Prompt text for a drafting turn
    pub fn drafting_instruction(&self) -> String {
        format!(
            "Take either {} point card (Syntax example: 2) or up to {} vegetable cards (Syntax example: CF):",
            self.criterion_draft, self.vegetable_draft
        )
    }
}

impl fmt::Display for Market {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Market:")?;
        f.write_str("Point cards:\t")?;
        for (i, pile) in self.piles.iter().enumerate() {
            match pile.peek_top() {
                Some(card) => write!(f, "[{i}] {card}\t")?,
                None => write!(f, "[{i}] Empty\t")?,
            }
        }

        f.write_str("\nVeggie cards:\t")?;
        let per_line = self.piles.len();
        for (i, slot) in self.slots.iter().enumerate() {
            if i > 0 && i % per_line == 0 {
                f.write_str("\n\t\t")?;
            }
            match slot {
                Some(card) => write!(f, "[{}] {card}\t", slot_letter(i))?,
                None => write!(f, "[{}] Empty\t", slot_letter(i))?,
            }
        }
        Ok(())
    }
}
