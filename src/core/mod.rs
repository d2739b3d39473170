//! Core types: vegetables, cards, criteria, players

pub mod card;
pub mod criterion;
pub mod player;
pub mod vegetable;

pub use card::{Card, CardId, Face};
pub use criterion::{Criterion, CriterionShape};
pub use player::{Player, PlayerId};
pub use vegetable::{UnknownVegetable, Vegetable, VeggieCounts};
