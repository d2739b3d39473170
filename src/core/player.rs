//! Player representation

use crate::zones::Hand;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable player identifier (seat number, starting at 0)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PlayerId(u32);

impl PlayerId {
    pub fn new(id: u32) -> Self {
        PlayerId(id)
    }

    pub fn as_u32(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A seat at the table
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,

    /// Display name
    pub name: String,

    /// Automated players get no rejection or turn-end messages
    pub is_bot: bool,

    pub hand: Hand,

    /// Zero until the Scoring phase fixes it
    pub score: i32,
}

impl Player {
    pub fn new(id: PlayerId, name: impl Into<String>, is_bot: bool) -> Self {
        Player {
            id,
            name: name.into(),
            is_bot,
            hand: Hand::new(),
            score: 0,
        }
    }

    /// "Name (Player ID: n)" label used in announcements
    pub fn label(&self) -> String {
        format!("{} (Player ID: {})", self.name, self.id)
    }
}
