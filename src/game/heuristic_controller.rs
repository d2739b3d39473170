//! Heuristic bot controller
//!
//! Picks moves by scoring hypothetical hands with the real scorer:
//! - Drafting: a coin flip chooses between a criterion draft and a vegetable
//!   draft, falling back to the other kind if the chosen one is unavailable.
//!   Criterion drafts take the pile tops that raise the hand's score the most;
//!   vegetable drafts take the first occupied slots.
//! - Flipping: flips the one criterion card whose removal raises the score the
//!   most, and only if the score strictly improves.
//!
//! The controller owns no RNG; the coin flip draws from the game's RNG through
//! the view so seeded games replay exactly.

use crate::core::{Card, Face, PlayerId};
use crate::game::command::slot_letter;
use crate::game::controller::{GameStateView, PlayerController};
use crate::game::scorer::calculate_score;
use crate::game::{Market, Phase};
use crate::zones::Hand;
use crate::{Result, SaladError};
use rand::Rng;

pub struct HeuristicController {
    player_id: PlayerId,
}

impl HeuristicController {
    pub fn new(player_id: PlayerId) -> Self {
        HeuristicController { player_id }
    }

    /// Best criterion draft token, or None if every pile is empty
    ///
    /// Each available pile top is scored as if added to the hand. Piles are
    /// taken in descending score order; equal scores keep pile order.
    pub fn criterion_draft(hand: &[Card], other_hands: &[&[Card]], market: &Market) -> Option<String> {
        let mut scored: Vec<(usize, i32)> = market
            .available_piles()
            .into_iter()
            .map(|(pile, top)| {
                let mut candidate = top.clone();
                candidate.show(Face::Criterion);
                let mut hypothetical = hand.to_vec();
                hypothetical.push(candidate);
                (pile, calculate_score(&hypothetical, other_hands))
            })
            .collect();

        if scored.is_empty() {
            return None;
        }
        // stable: ties keep first-seen order
        scored.sort_by(|a, b| b.1.cmp(&a.1));
        Some(
            scored
                .iter()
                .take(market.criterion_draft())
                .map(|(pile, _)| pile.to_string())
                .collect(),
        )
    }

    /// First occupied slots up to the draft size, or None if every slot is empty
    pub fn vegetable_draft(market: &Market) -> Option<String> {
        let token: String = market
            .available_slots()
            .into_iter()
            .take(market.vegetable_draft())
            .map(|(slot, _)| slot_letter(slot))
            .collect();
        if token.is_empty() {
            None
        } else {
            Some(token)
        }
    }

    /// Flip token: the index of the best criterion card to flip, or "n"
    pub fn flip_choice(hand: &Hand, other_hands: &[&[Card]]) -> String {
        let current = calculate_score(hand.cards(), other_hands);

        let mut best: Option<(usize, i32)> = None;
        for index in 0..hand.criterion_positions().len() {
            let mut hypothetical = hand.clone();
            if !hypothetical.flip_criterion(index) {
                continue;
            }
            let score = calculate_score(hypothetical.cards(), other_hands);
            if best.map_or(true, |(_, best_score)| score > best_score) {
                best = Some((index, score));
            }
        }

        match best {
            Some((index, score)) if score > current => index.to_string(),
            _ => "n".to_string(),
        }
    }

    fn drafting_move(&self, view: &GameStateView) -> Result<String> {
        let market = view.market();
        let hand = view.hand();
        let others = view.other_hands();

        let criterion_first = view.with_rng(|rng| rng.gen_bool(0.5));
        let token = if criterion_first {
            Self::criterion_draft(hand, &others, market).or_else(|| Self::vegetable_draft(market))
        } else {
            Self::vegetable_draft(market).or_else(|| Self::criterion_draft(hand, &others, market))
        };

        token.ok_or_else(|| {
            SaladError::Actor(format!(
                "bot {} found nothing to draft in a non-empty market",
                self.player_id
            ))
        })
    }
}

impl PlayerController for HeuristicController {
    fn player_id(&self) -> PlayerId {
        self.player_id
    }

    fn is_bot(&self) -> bool {
        true
    }

    fn choose_move(&mut self, view: &GameStateView, _instruction: &str) -> Result<String> {
        match view.phase() {
            Phase::Drafting => self.drafting_move(view),
            Phase::Flipping => {
                let hand = view.full_hand().ok_or_else(|| {
                    SaladError::Actor(format!("bot {} has no seat", self.player_id))
                })?;
                Ok(Self::flip_choice(hand, &view.other_hands()))
            }
            phase => Err(SaladError::Actor(format!(
                "bot {} cannot move during {phase}",
                self.player_id
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::core::{CardId, Criterion, Vegetable};
    use crate::zones::Pile;
    use smallvec::smallvec;

    fn crit(id: u32, criterion: Criterion) -> Card {
        Card::new(CardId::new(id), Vegetable::Pepper, Some(criterion)).with_face(Face::Criterion)
    }

    #[test]
    fn test_flip_turns_losing_criterion_into_vegetable() {
        let hand = Hand::from_cards(vec![
            crit(
                0,
                Criterion::PerVeggie {
                    terms: smallvec![
                        (Vegetable::Carrot, 2),
                        (Vegetable::Cabbage, 2),
                        (Vegetable::Onion, -4)
                    ],
                },
            ),
            Card::new(CardId::new(1), Vegetable::Onion, None),
        ]);
        assert_eq!(calculate_score(hand.cards(), &[]), -4);
        assert_eq!(HeuristicController::flip_choice(&hand, &[]), "0");
    }

    #[test]
    fn test_flip_keeps_when_nothing_improves() {
        let hand = Hand::from_cards(vec![
            crit(0, Criterion::PerMissingType { points: 1 }),
            Card::new(CardId::new(1), Vegetable::Onion, None),
        ]);
        assert_eq!(HeuristicController::flip_choice(&hand, &[]), "n");
        assert_eq!(HeuristicController::flip_choice(&Hand::new(), &[]), "n");
    }

    #[test]
    fn test_criterion_draft_prefers_highest_score() {
        let mut market = Market::new(&GameConfig::default());
        market.install_piles(vec![
            Pile::from_cards(vec![crit(0, Criterion::CompleteSet { points: 12 })]),
            Pile::from_cards(vec![crit(
                1,
                Criterion::PerVeggie {
                    terms: smallvec![(Vegetable::Onion, 3)],
                },
            )]),
            Pile::new(),
        ]);
        let hand = vec![
            Card::new(CardId::new(2), Vegetable::Onion, None),
            Card::new(CardId::new(3), Vegetable::Onion, None),
        ];
        assert_eq!(
            HeuristicController::criterion_draft(&hand, &[], &market).as_deref(),
            Some("1")
        );
        // no vegetables in the slots yet
        assert_eq!(HeuristicController::vegetable_draft(&market), None);
    }

    #[test]
    fn test_vegetable_draft_takes_first_slots() {
        let mut market = Market::new(&GameConfig::default());
        market.install_piles(vec![Pile::from_cards(
            (0..9).map(|i| crit(i, Criterion::CompleteSet { points: 12 })).collect(),
        )]);
        market.refill();
        market.draft_cards("A").unwrap();
        assert_eq!(HeuristicController::vegetable_draft(&market).as_deref(), Some("BC"));
    }
}
