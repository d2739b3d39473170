//! Card catalogue loading
//!
//! The criterion text parser and the JSON manifest that feeds it

pub mod catalogue;
pub mod criterion;

pub use catalogue::{
    load_manifest_async, CardCatalogue, CardManifest, ManifestCatalogue, ManifestEntry,
    StaticCatalogue,
};
pub use criterion::{detect_shape, parse_criterion, CriterionParseError};
