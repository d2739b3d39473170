//! Typed move commands
//!
//! Move tokens arrive as short strings ("0", "AB", "n", "1"). They are parsed
//! here, once, at the boundary; the market and the game loop only see these types.

use crate::game::market::MarketError;
use smallvec::SmallVec;
use std::fmt;

/// Index list for one draft; two entries cover every standard draft
pub type DraftIndices = SmallVec<[usize; 2]>;

/// A drafting move
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DraftCommand {
    /// Take the top criterion card of each listed pile (digit tokens)
    Criteria(DraftIndices),
    /// Take the card of each listed vegetable slot (letter tokens)
    Vegetables(DraftIndices),
}

impl DraftCommand {
    /// Parse a drafting token
    ///
    /// Digits select piles, letters select slots. Mixed or repeated characters are
    /// rejected. Range and availability checks belong to the market.
    pub fn parse(token: &str) -> Result<Self, MarketError> {
        let token = token.trim().to_ascii_uppercase();
        if token.is_empty() {
            return Err(MarketError::invalid(&token, "empty choice"));
        }

        let mut indices = DraftIndices::new();
        let command = if token.chars().all(|c| c.is_ascii_digit()) {
            for c in token.chars() {
                indices.push(c as usize - '0' as usize);
            }
            DraftCommand::Criteria(indices)
        } else if token.chars().all(|c| c.is_ascii_uppercase()) {
            for c in token.chars() {
                indices.push(c as usize - 'A' as usize);
            }
            DraftCommand::Vegetables(indices)
        } else {
            return Err(MarketError::invalid(
                &token,
                "use digits for criterion piles or letters for vegetable slots, not both",
            ));
        };

        let picked = command.indices();
        for (i, index) in picked.iter().enumerate() {
            if picked[..i].contains(index) {
                return Err(MarketError::invalid(&token, "each card may be picked only once"));
            }
        }

        Ok(command)
    }

    pub fn indices(&self) -> &[usize] {
        match self {
            DraftCommand::Criteria(piles) => piles,
            DraftCommand::Vegetables(slots) => slots,
        }
    }

    pub fn is_criteria(&self) -> bool {
        matches!(self, DraftCommand::Criteria(_))
    }

    /// Number of cards this command takes
    pub fn len(&self) -> usize {
        self.indices().len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices().is_empty()
    }
}

impl fmt::Display for DraftCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DraftCommand::Criteria(piles) => {
                for pile in piles {
                    write!(f, "{pile}")?;
                }
            }
            DraftCommand::Vegetables(slots) => {
                for &slot in slots {
                    write!(f, "{}", slot_letter(slot))?;
                }
            }
        }
        Ok(())
    }
}

/// Letter code of a vegetable slot
pub fn slot_letter(slot: usize) -> char {
    (b'A' + (slot % 26) as u8) as char
}

/// A flipping move
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlipCommand {
    /// Leave every criterion card as it is ("n")
    Keep,
    /// Flip the n-th criterion-face-up card of the hand to its vegetable face
    Flip(usize),
}

impl FlipCommand {
    pub fn parse(token: &str) -> Result<Self, MarketError> {
        let token = token.trim();
        if token.eq_ignore_ascii_case("n") {
            return Ok(FlipCommand::Keep);
        }
        if token.is_empty() || !token.chars().all(|c| c.is_ascii_digit()) {
            return Err(MarketError::invalid(token, "enter 'n' or the number of a criterion card"));
        }
        token
            .parse()
            .map(FlipCommand::Flip)
            .map_err(|_| MarketError::invalid(token, "criterion number is too large"))
    }
}

impl fmt::Display for FlipCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FlipCommand::Keep => f.write_str("n"),
            FlipCommand::Flip(index) => write!(f, "{index}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use smallvec::smallvec;

    #[test]
    fn test_parse_draft_tokens() {
        assert_eq!(DraftCommand::parse("1").unwrap(), DraftCommand::Criteria(smallvec![1]));
        assert_eq!(DraftCommand::parse("af").unwrap(), DraftCommand::Vegetables(smallvec![0, 5]));
        assert_eq!(DraftCommand::parse(" C ").unwrap(), DraftCommand::Vegetables(smallvec![2]));
        assert_eq!(DraftCommand::parse("af").unwrap().to_string(), "AF");
    }

    #[test]
    fn test_reject_mixed_and_repeated() {
        assert!(DraftCommand::parse("1A").is_err());
        assert!(DraftCommand::parse("AA").is_err());
        assert!(DraftCommand::parse("aA").is_err());
        assert!(DraftCommand::parse("").is_err());
        assert!(DraftCommand::parse("?").is_err());
    }

    #[test]
    fn test_parse_flip_tokens() {
        assert_eq!(FlipCommand::parse("n").unwrap(), FlipCommand::Keep);
        assert_eq!(FlipCommand::parse("N").unwrap(), FlipCommand::Keep);
        assert_eq!(FlipCommand::parse("2").unwrap(), FlipCommand::Flip(2));
        assert!(FlipCommand::parse("-1").is_err());
        assert!(FlipCommand::parse("yes").is_err());
    }
}
