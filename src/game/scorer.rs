//! Score aggregation

use crate::core::{Card, VeggieCounts};

/// Sum of every criterion-face-up card's criterion applied to `hand`
///
/// Pure; safe to call on hypothetical hands.
pub fn calculate_score(hand: &[Card], other_hands: &[&[Card]]) -> i32 {
    let others: Vec<VeggieCounts> = other_hands
        .iter()
        .map(|h| Card::count_vegetables(h))
        .collect();
    score_with_tallies(hand, &others)
}

/// Same as [`calculate_score`] with opponents' tallies already counted
pub fn score_with_tallies(hand: &[Card], others: &[VeggieCounts]) -> i32 {
    let own = Card::count_vegetables(hand);
    hand.iter()
        .filter_map(Card::active_criterion)
        .map(|criterion| criterion.score(&own, others))
        .sum()
}
