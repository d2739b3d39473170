//! Outbound messages to the players at the table
//!
//! The game loop reports turn prompts, rejections, turn-end hands and the final
//! result through this trait. Delivery is best effort: a notifier error ends the
//! match, but nothing waits for acknowledgement.

use crate::core::PlayerId;
use crate::{Result, SaladError};
use std::collections::HashSet;
use std::io::Write;

pub trait Notifier {
    /// Send to one player
    fn send_to(&mut self, player: PlayerId, text: &str) -> Result<()>;

    /// Send to every player
    fn send_to_all(&mut self, text: &str) -> Result<()>;

    /// Send to every player except one
    fn send_to_all_except(&mut self, player: PlayerId, text: &str) -> Result<()>;
}

/// Prints to stdout for the seats that sit at this terminal
///
/// Bot seats and remote seats are not in `local`, so their messages are dropped.
#[derive(Debug, Clone, Default)]
pub struct ConsoleNotifier {
    local: HashSet<PlayerId>,
}

impl ConsoleNotifier {
    pub fn new(local: impl IntoIterator<Item = PlayerId>) -> Self {
        ConsoleNotifier {
            local: local.into_iter().collect(),
        }
    }

    fn print(text: &str) -> Result<()> {
        let mut out = std::io::stdout().lock();
        writeln!(out, "{text}").map_err(|e| SaladError::Notifier(format!("stdout: {e}")))
    }
}

impl Notifier for ConsoleNotifier {
    fn send_to(&mut self, player: PlayerId, text: &str) -> Result<()> {
        if self.local.contains(&player) {
            Self::print(text)?;
        }
        Ok(())
    }

    fn send_to_all(&mut self, text: &str) -> Result<()> {
        if !self.local.is_empty() {
            Self::print(text)?;
        }
        Ok(())
    }

    fn send_to_all_except(&mut self, player: PlayerId, text: &str) -> Result<()> {
        // one terminal: print if anyone but `player` is watching it
        if self.local.iter().any(|p| *p != player) {
            Self::print(text)?;
        }
        Ok(())
    }
}

/// Discards everything
#[derive(Debug, Clone, Copy, Default)]
pub struct NullNotifier;

impl Notifier for NullNotifier {
    fn send_to(&mut self, _player: PlayerId, _text: &str) -> Result<()> {
        Ok(())
    }

    fn send_to_all(&mut self, _text: &str) -> Result<()> {
        Ok(())
    }

    fn send_to_all_except(&mut self, _player: PlayerId, _text: &str) -> Result<()> {
        Ok(())
    }
}

/// Who a recorded message was addressed to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Recipient {
    One(PlayerId),
    All,
    AllExcept(PlayerId),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedMessage {
    pub to: Recipient,
    pub text: String,
}

/// Keeps every message for inspection
#[derive(Debug, Clone, Default)]
pub struct RecordingNotifier {
    pub messages: Vec<RecordedMessage>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Messages that `player` would have received, in order
    pub fn received_by(&self, player: PlayerId) -> Vec<&str> {
        self.messages
            .iter()
            .filter(|m| match m.to {
                Recipient::One(p) => p == player,
                Recipient::All => true,
                Recipient::AllExcept(p) => p != player,
            })
            .map(|m| m.text.as_str())
            .collect()
    }

    pub fn contains(&self, needle: &str) -> bool {
        self.messages.iter().any(|m| m.text.contains(needle))
    }
}

impl Notifier for RecordingNotifier {
    fn send_to(&mut self, player: PlayerId, text: &str) -> Result<()> {
        self.messages.push(RecordedMessage {
            to: Recipient::One(player),
            text: text.to_string(),
        });
        Ok(())
    }

    fn send_to_all(&mut self, text: &str) -> Result<()> {
        self.messages.push(RecordedMessage {
            to: Recipient::All,
            text: text.to_string(),
        });
        Ok(())
    }

    fn send_to_all_except(&mut self, player: PlayerId, text: &str) -> Result<()> {
        self.messages.push(RecordedMessage {
            to: Recipient::AllExcept(player),
            text: text.to_string(),
        });
        Ok(())
    }
}
