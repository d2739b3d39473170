//! Scoring criteria printed on the back of each card
//!
//! Every criterion is one of ten fixed shapes. A criterion only ever looks at
//! vegetable tallies: the owner's [`VeggieCounts`] and those of the other
//! players. Cards that are criterion-face-up are not vegetables, so callers
//! build the tallies from vegetable-face-up cards only.

use crate::core::{Card, Vegetable, VeggieCounts};
use crate::loader::criterion::{parse_criterion, CriterionParseError};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::fmt;

/// Discriminant of [`Criterion`], used in diagnostics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CriterionShape {
    Most,
    Fewest,
    MostTotal,
    FewestTotal,
    EvenOdd,
    PerVeggie,
    Combination,
    CompleteSet,
    PerMissingType,
    PerVeggieType,
}

impl fmt::Display for CriterionShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CriterionShape::Most => "MOST",
            CriterionShape::Fewest => "FEWEST",
            CriterionShape::MostTotal => "MOST_TOTAL",
            CriterionShape::FewestTotal => "FEWEST_TOTAL",
            CriterionShape::EvenOdd => "EVEN_ODD",
            CriterionShape::PerVeggie => "PER_VEGGIE",
            CriterionShape::Combination => "COMBINATION",
            CriterionShape::CompleteSet => "COMPLETE_SET",
            CriterionShape::PerMissingType => "MISSING_TYPE",
            CriterionShape::PerVeggieType => "PER_VEGGIE_TYPE",
        };
        f.write_str(name)
    }
}

/// A scoring rule
///
/// Serialized as its canonical text form (the same text the manifest uses).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Criterion {
    /// `MOST LETTUCE = 10`
    Most { vegetable: Vegetable, points: i32 },
    /// `FEWEST CARROT = 7`
    Fewest { vegetable: Vegetable, points: i32 },
    /// `MOST TOTAL VEGETABLE = 10`
    MostTotal { points: i32 },
    /// `FEWEST TOTAL VEGETABLE = 7`
    FewestTotal { points: i32 },
    /// `ONION: EVEN=7, ODD=3`
    EvenOdd {
        vegetable: Vegetable,
        even_points: i32,
        odd_points: i32,
    },
    /// `3 / CARROT, -2 / ONION`
    PerVeggie {
        terms: SmallVec<[(Vegetable, i32); 3]>,
    },
    /// `CABBAGE + ONION = 5`
    Combination {
        vegetables: SmallVec<[Vegetable; 3]>,
        points: i32,
    },
    /// `COMPLETE SET = 12`
    CompleteSet { points: i32 },
    /// `5 / MISSING VEGETABLE TYPE`
    PerMissingType { points: i32 },
    /// `5 / VEGETABLE TYPE >= 3`
    PerVeggieType { threshold: u32, points: i32 },
}

impl Criterion {
    pub fn shape(&self) -> CriterionShape {
        match self {
            Criterion::Most { .. } => CriterionShape::Most,
            Criterion::Fewest { .. } => CriterionShape::Fewest,
            Criterion::MostTotal { .. } => CriterionShape::MostTotal,
            Criterion::FewestTotal { .. } => CriterionShape::FewestTotal,
            Criterion::EvenOdd { .. } => CriterionShape::EvenOdd,
            Criterion::PerVeggie { .. } => CriterionShape::PerVeggie,
            Criterion::Combination { .. } => CriterionShape::Combination,
            Criterion::CompleteSet { .. } => CriterionShape::CompleteSet,
            Criterion::PerMissingType { .. } => CriterionShape::PerMissingType,
            Criterion::PerVeggieType { .. } => CriterionShape::PerVeggieType,
        }
    }

    /// Points this criterion grants to `own`, given every opponent's tallies
    pub fn score(&self, own: &VeggieCounts, others: &[VeggieCounts]) -> i32 {
        match self {
            Criterion::Most { vegetable, points } => {
                let mine = own.get(*vegetable);
                let best = others.iter().map(|c| c.get(*vegetable)).fold(mine, u32::max);
                if mine == best {
                    *points
                } else {
                    0
                }
            }
            Criterion::Fewest { vegetable, points } => {
                let mine = own.get(*vegetable);
                let least = others.iter().map(|c| c.get(*vegetable)).fold(mine, u32::min);
                if mine == least {
                    *points
                } else {
                    0
                }
            }
            Criterion::MostTotal { points } => {
                let mine = own.total();
                let best = others.iter().map(VeggieCounts::total).fold(mine, u32::max);
                if mine == best {
                    *points
                } else {
                    0
                }
            }
            Criterion::FewestTotal { points } => {
                let mine = own.total();
                let least = others.iter().map(VeggieCounts::total).fold(mine, u32::min);
                if mine == least {
                    *points
                } else {
                    0
                }
            }
            Criterion::EvenOdd {
                vegetable,
                even_points,
                odd_points,
            } => {
                if own.get(*vegetable) % 2 == 0 {
                    *even_points
                } else {
                    *odd_points
                }
            }
            Criterion::PerVeggie { terms } => terms
                .iter()
                .map(|(veg, per_unit)| own.get(*veg) as i32 * per_unit)
                .sum(),
            Criterion::Combination { vegetables, points } => {
                if vegetables.is_empty() {
                    return 0;
                }
                let required: VeggieCounts = vegetables.iter().copied().collect();
                let completions = required
                    .iter()
                    .filter(|(_, needed)| *needed > 0)
                    .map(|(veg, needed)| own.get(veg) / needed)
                    .min()
                    .unwrap_or(0);
                completions as i32 * points
            }
            Criterion::CompleteSet { points } => {
                if own.missing_kinds() == 0 {
                    *points
                } else {
                    0
                }
            }
            Criterion::PerMissingType { points } => own.missing_kinds() as i32 * points,
            Criterion::PerVeggieType { threshold, points } => {
                own.kinds_at_least(*threshold) as i32 * points
            }
        }
    }

    /// Score against whole hands rather than precomputed tallies
    pub fn score_hand(&self, hand: &[Card], other_hands: &[&[Card]]) -> i32 {
        let own = Card::count_vegetables(hand);
        let others: Vec<VeggieCounts> = other_hands
            .iter()
            .map(|h| Card::count_vegetables(h))
            .collect();
        self.score(&own, &others)
    }
}

impl fmt::Display for Criterion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Criterion::Most { vegetable, points } => write!(f, "MOST {vegetable} = {points}"),
            Criterion::Fewest { vegetable, points } => write!(f, "FEWEST {vegetable} = {points}"),
            Criterion::MostTotal { points } => write!(f, "MOST TOTAL VEGETABLE = {points}"),
            Criterion::FewestTotal { points } => write!(f, "FEWEST TOTAL VEGETABLE = {points}"),
            Criterion::EvenOdd {
                vegetable,
                even_points,
                odd_points,
            } => write!(f, "{vegetable}: EVEN={even_points}, ODD={odd_points}"),
            Criterion::PerVeggie { terms } => {
                for (i, (veg, per_unit)) in terms.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{per_unit} / {veg}")?;
                }
                Ok(())
            }
            Criterion::Combination { vegetables, points } => {
                for (i, veg) in vegetables.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" + ")?;
                    }
                    write!(f, "{veg}")?;
                }
                write!(f, " = {points}")
            }
            Criterion::CompleteSet { points } => write!(f, "COMPLETE SET = {points}"),
            Criterion::PerMissingType { points } => write!(f, "{points} / MISSING VEGETABLE TYPE"),
            Criterion::PerVeggieType { threshold, points } => {
                write!(f, "{points} / VEGETABLE TYPE >= {threshold}")
            }
        }
    }
}

impl From<Criterion> for String {
    fn from(criterion: Criterion) -> Self {
        criterion.to_string()
    }
}

impl TryFrom<String> for Criterion {
    type Error = CriterionParseError;

    fn try_from(text: String) -> Result<Self, Self::Error> {
        parse_criterion(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use smallvec::smallvec;

    fn counts(vegs: &[(Vegetable, u32)]) -> VeggieCounts {
        let mut c = VeggieCounts::new();
        for &(veg, n) in vegs {
            for _ in 0..n {
                c.add(veg);
            }
        }
        c
    }

    #[test]
    fn test_most_requires_tie_with_maximum() {
        let rule = Criterion::Most {
            vegetable: Vegetable::Carrot,
            points: 7,
        };
        let others = [counts(&[(Vegetable::Carrot, 2)]), counts(&[(Vegetable::Carrot, 5)])];
        assert_eq!(rule.score(&counts(&[]), &others), 0);
        assert_eq!(rule.score(&counts(&[(Vegetable::Carrot, 6)]), &others), 7);
        assert_eq!(rule.score(&counts(&[(Vegetable::Carrot, 5)]), &others), 7);
    }

    #[test]
    fn test_fewest_counts_zero_as_fewest() {
        let rule = Criterion::Fewest {
            vegetable: Vegetable::Onion,
            points: 7,
        };
        let others = [counts(&[(Vegetable::Onion, 1)])];
        assert_eq!(rule.score(&counts(&[]), &others), 7);
        assert_eq!(rule.score(&counts(&[(Vegetable::Onion, 2)]), &others), 0);
    }

    #[test]
    fn test_most_total_includes_own_hand() {
        let rule = Criterion::MostTotal { points: 10 };
        let others = [counts(&[(Vegetable::Pepper, 3)])];
        assert_eq!(rule.score(&counts(&[(Vegetable::Onion, 4)]), &others), 10);
        assert_eq!(rule.score(&counts(&[(Vegetable::Onion, 2)]), &others), 0);
        assert_eq!(rule.score(&counts(&[]), &[]), 10);
    }

    #[test]
    fn test_fewest_total() {
        let rule = Criterion::FewestTotal { points: 7 };
        let others = [counts(&[(Vegetable::Pepper, 3)]), counts(&[(Vegetable::Tomato, 1)])];
        assert_eq!(rule.score(&counts(&[(Vegetable::Onion, 1)]), &others), 7);
        assert_eq!(rule.score(&counts(&[(Vegetable::Onion, 2)]), &others), 0);
    }

    #[test]
    fn test_even_odd_treats_zero_as_even() {
        let rule = Criterion::EvenOdd {
            vegetable: Vegetable::Onion,
            even_points: 7,
            odd_points: 3,
        };
        assert_eq!(rule.score(&counts(&[]), &[]), 7);
        assert_eq!(rule.score(&counts(&[(Vegetable::Onion, 3)]), &[]), 3);
        assert_eq!(rule.score(&counts(&[(Vegetable::Onion, 4)]), &[]), 7);
    }

    #[test]
    fn test_per_veggie_allows_negative_points() {
        let rule = Criterion::PerVeggie {
            terms: smallvec![(Vegetable::Carrot, 3), (Vegetable::Onion, -2)],
        };
        let own = counts(&[(Vegetable::Carrot, 2), (Vegetable::Onion, 4)]);
        assert_eq!(rule.score(&own, &[]), 6 - 8);
    }

    #[test]
    fn test_combination_uses_required_multiplicity() {
        let rule = Criterion::Combination {
            vegetables: smallvec![Vegetable::Lettuce, Vegetable::Lettuce, Vegetable::Lettuce],
            points: 8,
        };
        assert_eq!(rule.score(&counts(&[(Vegetable::Lettuce, 7)]), &[]), 16);

        let mixed = Criterion::Combination {
            vegetables: smallvec![Vegetable::Cabbage, Vegetable::Onion],
            points: 5,
        };
        let own = counts(&[(Vegetable::Cabbage, 3), (Vegetable::Onion, 1)]);
        assert_eq!(mixed.score(&own, &[]), 5);
    }

    #[test]
    fn test_set_based_shapes() {
        let full = counts(&[
            (Vegetable::Pepper, 1),
            (Vegetable::Lettuce, 3),
            (Vegetable::Carrot, 1),
            (Vegetable::Cabbage, 1),
            (Vegetable::Onion, 2),
            (Vegetable::Tomato, 1),
        ]);
        let partial = counts(&[(Vegetable::Pepper, 3), (Vegetable::Lettuce, 3)]);

        let complete = Criterion::CompleteSet { points: 12 };
        assert_eq!(complete.score(&full, &[]), 12);
        assert_eq!(complete.score(&partial, &[]), 0);

        let missing = Criterion::PerMissingType { points: 5 };
        assert_eq!(missing.score(&full, &[]), 0);
        assert_eq!(missing.score(&partial, &[]), 20);

        let per_type = Criterion::PerVeggieType {
            threshold: 3,
            points: 5,
        };
        assert_eq!(per_type.score(&partial, &[]), 10);
        assert_eq!(per_type.score(&full, &[]), 5);
    }

    #[test]
    fn test_serde_uses_text_form() {
        let rule = Criterion::Most {
            vegetable: Vegetable::Lettuce,
            points: 10,
        };
        let json = serde_json::to_string(&rule).unwrap();
        assert_eq!(json, "\"MOST LETTUCE = 10\"");
        let back: Criterion = serde_json::from_str(&json).unwrap();
        assert_eq!(back, rule);
    }
}
