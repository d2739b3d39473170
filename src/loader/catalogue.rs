//! Card catalogue: the JSON manifest of criterion texts and the sources that load it
//!
//! A manifest entry describes one "row" of the physical deck: for each of the six
//! vegetables it gives the criterion printed on the back of that vegetable's card.
//! Loading a manifest therefore yields six cards per entry.

use crate::core::{Card, CardId, Vegetable};
use crate::loader::criterion::parse_criterion;
use crate::{Result, SaladError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Top-level manifest document
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CardManifest {
    pub cards: Vec<ManifestEntry>,
}

/// One manifest row: a criterion text per vegetable name
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManifestEntry {
    pub id: u32,
    pub criteria: BTreeMap<String, String>,
}

impl CardManifest {
    /// Parse a manifest from JSON text
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Build the cards described by this manifest
    ///
    /// Card ids are assigned in load order: entry by entry, vegetables in their
    /// fixed order.
    pub fn build_cards(&self) -> Result<Vec<Card>> {
        let mut cards = Vec::with_capacity(self.cards.len() * Vegetable::COUNT);
        let mut next_id = 0u32;

        for entry in &self.cards {
            for vegetable in Vegetable::ALL {
                let text = entry.criterion_text(vegetable).ok_or_else(|| {
                    SaladError::Catalogue(format!(
                        "manifest entry {} has no criterion for {vegetable}",
                        entry.id
                    ))
                })?;
                let criterion = parse_criterion(text).map_err(|e| {
                    SaladError::Catalogue(format!("manifest entry {} ({vegetable}): {e}", entry.id))
                })?;
                cards.push(Card::new(CardId::new(next_id), vegetable, Some(criterion)));
                next_id += 1;
            }
        }

        Ok(cards)
    }
}

impl ManifestEntry {
    /// Look up the criterion text for a vegetable; keys match case-insensitively
    pub fn criterion_text(&self, vegetable: Vegetable) -> Option<&str> {
        self.criteria
            .iter()
            .find(|(key, _)| key.trim().eq_ignore_ascii_case(vegetable.as_str()))
            .map(|(_, text)| text.as_str())
    }
}

/// Source of the full list of cards for one match
pub trait CardCatalogue: Send + Sync {
    /// Return every card of the game, vegetable face up, with stable ids
    fn load_cards(&self) -> Result<Vec<Card>>;
}

/// Catalogue backed by a manifest file on disk
#[derive(Debug, Clone)]
pub struct ManifestCatalogue {
    path: PathBuf,
}

impl ManifestCatalogue {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        ManifestCatalogue { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CardCatalogue for ManifestCatalogue {
    fn load_cards(&self) -> Result<Vec<Card>> {
        let text = std::fs::read_to_string(&self.path).map_err(|e| {
            SaladError::Catalogue(format!("cannot read {}: {e}", self.path.display()))
        })?;
        let manifest = CardManifest::from_json(&text).map_err(|e| {
            SaladError::Catalogue(format!("malformed manifest {}: {e}", self.path.display()))
        })?;
        manifest.build_cards()
    }
}

/// Catalogue over an already-loaded card list
///
/// Used by the tournament runner (load once, play many) and by tests.
#[derive(Debug, Clone, Default)]
pub struct StaticCatalogue {
    cards: Vec<Card>,
}

impl StaticCatalogue {
    pub fn new(cards: Vec<Card>) -> Self {
        StaticCatalogue { cards }
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }
}

impl CardCatalogue for StaticCatalogue {
    fn load_cards(&self) -> Result<Vec<Card>> {
        if self.cards.is_empty() {
            return Err(SaladError::Catalogue("catalogue is empty".to_string()));
        }
        Ok(self.cards.clone())
    }
}

/// Read and build a manifest without blocking the async runtime
pub async fn load_manifest_async(path: impl AsRef<Path>) -> Result<Vec<Card>> {
    let path = path.as_ref();
    let text = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| SaladError::Catalogue(format!("cannot read {}: {e}", path.display())))?;

    // Criterion parsing is CPU work; keep it off the reactor thread
    let cards = tokio::task::spawn_blocking(move || {
        CardManifest::from_json(&text).and_then(|manifest| manifest.build_cards())
    })
    .await??;

    Ok(cards)
}
