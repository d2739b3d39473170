//! Error types for the Point Salad engine

use crate::game::market::MarketError;
use crate::loader::criterion::CriterionParseError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SaladError {
    #[error("Catalogue error: {0}")]
    Catalogue(String),

    #[error("Parse error: {0}")]
    Parse(#[from] CriterionParseError),

    #[error("Market error: {0}")]
    Market(#[from] MarketError),

    #[error("Actor error: {0}")]
    Actor(String),

    #[error("Phase error: {0}")]
    Phase(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Notifier error: {0}")]
    Notifier(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Task join error: {0}")]
    Join(#[from] tokio::task::JoinError),
}

pub type Result<T> = std::result::Result<T, SaladError>;
