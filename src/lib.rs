//! Point Salad rules engine
//!
//! Card drafting game engine: the market of draw piles and vegetable slots, the
//! ten criterion shapes and their text parser, scoring, the phase state machine
//! and a heuristic bot.

pub mod config;
pub mod core;
pub mod error;
pub mod game;
pub mod loader;
pub mod tournament;
pub mod zones;

pub use error::{Result, SaladError};
