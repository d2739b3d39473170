//! Criterion text parser
//!
//! Reads the compact encodings printed on the criterion face of the cards,
//! e.g. `"MOST LETTUCE = 10"`, `"ONION: EVEN=7, ODD=3"`, `"2 / TOMATO"`,
//! `"LETTUCE + LETTUCE = 5"` or `"5 / VEGETABLE TYPE >= 3"`.
//!
//! The shape is inferred first from keywords, checked in a fixed priority
//! order so that overlapping patterns resolve the same way every time
//! ("MOST TOTAL" before "MOST", "MISSING" and "VEGETABLE TYPE" before the
//! bare "/" of per-vegetable rules). Shape-specific tokenization follows.

use crate::core::{Criterion, CriterionShape, Vegetable};
use smallvec::SmallVec;
use thiserror::Error;

/// Failure to read a criterion encoding
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid criterion '{text}': {reason} (at '{fragment}', shape {})", shape_label(.shape))]
pub struct CriterionParseError {
    /// The full text being parsed
    pub text: String,
    /// The substring that could not be understood
    pub fragment: String,
    /// The shape inferred before the failure, if any
    pub shape: Option<CriterionShape>,
    pub reason: String,
}

fn shape_label(shape: &Option<CriterionShape>) -> String {
    match shape {
        Some(shape) => shape.to_string(),
        None => "unknown".to_string(),
    }
}

/// Keyword checks in priority order
const SHAPE_RULES: [(&str, CriterionShape); 10] = [
    ("EVEN", CriterionShape::EvenOdd),
    ("+", CriterionShape::Combination),
    ("MOST TOTAL", CriterionShape::MostTotal),
    ("FEWEST TOTAL", CriterionShape::FewestTotal),
    ("COMPLETE SET", CriterionShape::CompleteSet),
    ("MISSING", CriterionShape::PerMissingType),
    ("VEGETABLE TYPE", CriterionShape::PerVeggieType),
    ("MOST", CriterionShape::Most),
    ("FEWEST", CriterionShape::Fewest),
    ("/", CriterionShape::PerVeggie),
];

/// Infer the shape of an encoding without parsing its values
pub fn detect_shape(text: &str) -> Option<CriterionShape> {
    let upper = text.to_ascii_uppercase();
    SHAPE_RULES
        .iter()
        .find(|(needle, _)| upper.contains(needle))
        .map(|&(_, shape)| shape)
}

/// Parse one criterion encoding into its concrete shape
pub fn parse_criterion(text: &str) -> Result<Criterion, CriterionParseError> {
    let upper = text.trim().to_ascii_uppercase();
    let shape = detect_shape(&upper).ok_or_else(|| CriterionParseError {
        text: text.to_string(),
        fragment: text.to_string(),
        shape: None,
        reason: "no known criterion shape matches".to_string(),
    })?;

    let parser = ShapeParser {
        text,
        upper: &upper,
        shape,
    };
    parser.parse()
}

struct ShapeParser<'a> {
    /// Original text, kept for diagnostics
    text: &'a str,
    upper: &'a str,
    shape: CriterionShape,
}

impl ShapeParser<'_> {
    fn parse(&self) -> Result<Criterion, CriterionParseError> {
        match self.shape {
            CriterionShape::Most | CriterionShape::Fewest => {
                let keyword = if self.shape == CriterionShape::Most {
                    "MOST"
                } else {
                    "FEWEST"
                };
                let (left, right) = self.split_once(self.upper, '=')?;
                let veg_text = left.trim().strip_prefix(keyword).unwrap_or(left);
                let vegetable = self.vegetable(veg_text)?;
                let points = self.points(right)?;
                Ok(if self.shape == CriterionShape::Most {
                    Criterion::Most { vegetable, points }
                } else {
                    Criterion::Fewest { vegetable, points }
                })
            }
            CriterionShape::MostTotal => {
                let (_, right) = self.split_once(self.upper, '=')?;
                Ok(Criterion::MostTotal {
                    points: self.points(right)?,
                })
            }
            CriterionShape::FewestTotal => {
                let (_, right) = self.split_once(self.upper, '=')?;
                Ok(Criterion::FewestTotal {
                    points: self.points(right)?,
                })
            }
            CriterionShape::CompleteSet => {
                let (_, right) = self.split_once(self.upper, '=')?;
                Ok(Criterion::CompleteSet {
                    points: self.points(right)?,
                })
            }
            CriterionShape::EvenOdd => self.parse_even_odd(),
            CriterionShape::PerVeggie => self.parse_per_veggie(),
            CriterionShape::Combination => self.parse_combination(),
            CriterionShape::PerMissingType => {
                let (left, _) = self.split_once(self.upper, '/')?;
                Ok(Criterion::PerMissingType {
                    points: self.points(left)?,
                })
            }
            CriterionShape::PerVeggieType => {
                let (left, _) = self.split_once(self.upper, '/')?;
                let points = self.points(left)?;
                let (_, threshold_text) = self.upper.split_once(">=").ok_or_else(|| {
                    self.error(self.upper, "expected '>=' followed by a threshold")
                })?;
                let threshold = threshold_text
                    .trim()
                    .parse::<u32>()
                    .map_err(|_| self.error(threshold_text, "could not parse the threshold"))?;
                Ok(Criterion::PerVeggieType { threshold, points })
            }
        }
    }

    fn parse_even_odd(&self) -> Result<Criterion, CriterionParseError> {
        let (veg_text, rest) = self.split_once(self.upper, ':')?;
        let vegetable = self.vegetable(veg_text)?;

        let mut even_points = None;
        let mut odd_points = None;
        for part in rest.split(',') {
            let (key, value) = self.split_once(part, '=')?;
            match key.trim() {
                "EVEN" => even_points = Some(self.points(value)?),
                "ODD" => odd_points = Some(self.points(value)?),
                other => return Err(self.error(other, "expected EVEN or ODD")),
            }
        }

        match (even_points, odd_points) {
            (Some(even_points), Some(odd_points)) => Ok(Criterion::EvenOdd {
                vegetable,
                even_points,
                odd_points,
            }),
            _ => Err(self.error(rest, "both EVEN and ODD points are required")),
        }
    }

    fn parse_per_veggie(&self) -> Result<Criterion, CriterionParseError> {
        let mut terms = SmallVec::new();
        for part in self.upper.split(',') {
            let (points_text, veg_text) = self.split_once(part, '/')?;
            let per_unit = self.points(points_text)?;
            let vegetable = self.vegetable(veg_text)?;
            terms.push((vegetable, per_unit));
        }
        Ok(Criterion::PerVeggie { terms })
    }

    fn parse_combination(&self) -> Result<Criterion, CriterionParseError> {
        let (left, right) = self.split_once(self.upper, '=')?;
        let points = self.points(right)?;
        let vegetables = left
            .split('+')
            .filter(|part| !part.trim().is_empty())
            .map(|part| self.vegetable(part))
            .collect::<Result<SmallVec<[Vegetable; 3]>, _>>()?;

        if vegetables.is_empty() {
            return Err(self.error(left, "a combination needs at least one vegetable"));
        }
        if vegetables.len() < 2 {
            eprintln!(
                "Warning: combination criterion '{}' names fewer than two vegetables, using a per-vegetable criterion instead",
                self.text
            );
            let terms = vegetables.into_iter().map(|veg| (veg, points)).collect();
            return Ok(Criterion::PerVeggie { terms });
        }

        Ok(Criterion::Combination { vegetables, points })
    }

    fn split_once<'s>(&self, s: &'s str, sep: char) -> Result<(&'s str, &'s str), CriterionParseError> {
        s.split_once(sep)
            .ok_or_else(|| self.error(s, &format!("expected '{sep}'")))
    }

    fn vegetable(&self, fragment: &str) -> Result<Vegetable, CriterionParseError> {
        fragment
            .trim()
            .parse()
            .map_err(|_| self.error(fragment, "could not parse the vegetable"))
    }

    fn points(&self, fragment: &str) -> Result<i32, CriterionParseError> {
        fragment
            .trim()
            .parse()
            .map_err(|_| self.error(fragment, "could not parse the points"))
    }

    fn error(&self, fragment: &str, reason: &str) -> CriterionParseError {
        CriterionParseError {
            text: self.text.to_string(),
            fragment: fragment.trim().to_string(),
            shape: Some(self.shape),
            reason: reason.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use smallvec::smallvec;

    #[test]
    fn test_detect_shape_priority() {
        assert_eq!(detect_shape("MOST TOTAL VEGETABLE = 10"), Some(CriterionShape::MostTotal));
        assert_eq!(detect_shape("MOST LETTUCE = 10"), Some(CriterionShape::Most));
        assert_eq!(detect_shape("FEWEST TOTAL VEGETABLE = 7"), Some(CriterionShape::FewestTotal));
        assert_eq!(detect_shape("5 / MISSING VEGETABLE TYPE"), Some(CriterionShape::PerMissingType));
        assert_eq!(detect_shape("3 / VEGETABLE TYPE >= 2"), Some(CriterionShape::PerVeggieType));
        assert_eq!(detect_shape("2 / TOMATO"), Some(CriterionShape::PerVeggie));
        assert_eq!(detect_shape("ONION: EVEN=7, ODD=3"), Some(CriterionShape::EvenOdd));
        assert_eq!(detect_shape("CABBAGE + ONION = 5"), Some(CriterionShape::Combination));
        assert_eq!(detect_shape("GARBAGE"), None);
    }

    #[test]
    fn test_parse_most_and_fewest() {
        assert_eq!(
            parse_criterion("MOST LETTUCE = 10").unwrap(),
            Criterion::Most {
                vegetable: Vegetable::Lettuce,
                points: 10
            }
        );
        assert_eq!(
            parse_criterion("fewest carrot = 7").unwrap(),
            Criterion::Fewest {
                vegetable: Vegetable::Carrot,
                points: 7
            }
        );
    }

    #[test]
    fn test_parse_per_veggie_without_spaces() {
        assert_eq!(
            parse_criterion("4/LETTUCE, -2/TOMATO, -2/CABBAGE").unwrap(),
            Criterion::PerVeggie {
                terms: smallvec![
                    (Vegetable::Lettuce, 4),
                    (Vegetable::Tomato, -2),
                    (Vegetable::Cabbage, -2)
                ]
            }
        );
    }

    #[test]
    fn test_single_vegetable_combination_degrades() {
        assert_eq!(
            parse_criterion("LETTUCE + = 5").unwrap(),
            Criterion::PerVeggie {
                terms: smallvec![(Vegetable::Lettuce, 5)]
            }
        );
        let err = parse_criterion(" + = 4").unwrap_err();
        assert_eq!(err.shape, Some(CriterionShape::Combination));
        let err = parse_criterion("LETTUCE + POTATO = 4").unwrap_err();
        assert_eq!(err.fragment, "POTATO");
    }

    #[test]
    fn test_error_names_fragment_and_shape() {
        let err = parse_criterion("MOST POTATO = 10").unwrap_err();
        assert_eq!(err.fragment, "POTATO");
        assert_eq!(err.shape, Some(CriterionShape::Most));

        let err = parse_criterion("COMPLETE SET = lots").unwrap_err();
        assert_eq!(err.fragment, "LOTS");
        assert_eq!(err.shape, Some(CriterionShape::CompleteSet));

        let err = parse_criterion("ONION: EVEN=7").unwrap_err();
        assert_eq!(err.shape, Some(CriterionShape::EvenOdd));

        let err = parse_criterion("nonsense").unwrap_err();
        assert_eq!(err.shape, None);
        assert!(err.to_string().contains("shape unknown"));
    }
}
