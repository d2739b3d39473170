//! Vegetable kinds and per-hand vegetable tallies

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The six vegetable kinds, in their fixed display order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Vegetable {
    Pepper,
    Lettuce,
    Carrot,
    Cabbage,
    Onion,
    Tomato,
}

impl Vegetable {
    pub const COUNT: usize = 6;

    pub const ALL: [Vegetable; Vegetable::COUNT] = [
        Vegetable::Pepper,
        Vegetable::Lettuce,
        Vegetable::Carrot,
        Vegetable::Cabbage,
        Vegetable::Onion,
        Vegetable::Tomato,
    ];

    /// Position of this vegetable in [`Vegetable::ALL`]
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Vegetable::Pepper => "PEPPER",
            Vegetable::Lettuce => "LETTUCE",
            Vegetable::Carrot => "CARROT",
            Vegetable::Cabbage => "CABBAGE",
            Vegetable::Onion => "ONION",
            Vegetable::Tomato => "TOMATO",
        }
    }
}

impl fmt::Display for Vegetable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string names no vegetable
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownVegetable(pub String);

impl fmt::Display for UnknownVegetable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown vegetable '{}'", self.0)
    }
}

impl std::error::Error for UnknownVegetable {}

impl FromStr for Vegetable {
    type Err = UnknownVegetable;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Vegetable::ALL
            .into_iter()
            .find(|veg| veg.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| UnknownVegetable(trimmed.to_string()))
    }
}

/// Number of vegetable-face-up cards of each kind in a hand
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VeggieCounts([u32; Vegetable::COUNT]);

impl VeggieCounts {
    pub fn new() -> Self {
        VeggieCounts::default()
    }

    pub fn add(&mut self, vegetable: Vegetable) {
        self.0[vegetable.index()] += 1;
    }

    pub fn get(&self, vegetable: Vegetable) -> u32 {
        self.0[vegetable.index()]
    }

    pub fn total(&self) -> u32 {
        self.0.iter().sum()
    }

    /// Number of vegetable kinds with a count of zero
    pub fn missing_kinds(&self) -> u32 {
        self.0.iter().filter(|&&count| count == 0).count() as u32
    }

    /// Number of vegetable kinds whose count is at least `threshold`
    pub fn kinds_at_least(&self, threshold: u32) -> u32 {
        self.0.iter().filter(|&&count| count >= threshold).count() as u32
    }

    /// Iterate over (vegetable, count) pairs in display order
    pub fn iter(&self) -> impl Iterator<Item = (Vegetable, u32)> + '_ {
        Vegetable::ALL.into_iter().map(move |veg| (veg, self.get(veg)))
    }
}

impl FromIterator<Vegetable> for VeggieCounts {
    fn from_iter<I: IntoIterator<Item = Vegetable>>(iter: I) -> Self {
        let mut counts = VeggieCounts::new();
        for veg in iter {
            counts.add(veg);
        }
        counts
    }
}
