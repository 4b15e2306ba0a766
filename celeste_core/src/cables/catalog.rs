//! Built-in cable catalog.
//!
//! Entries live in `data/cables.toml`, embedded at compile time and parsed
//! once on first use.

use once_cell::sync::Lazy;
use serde::Deserialize;

use super::CableSpec;
use crate::errors::{CalcError, CalcResult};

const CATALOG_TOML: &str = include_str!("../../data/cables.toml");

#[derive(Deserialize)]
struct CatalogFile {
    cable: Vec<CableSpec>,
}

static CATALOG: Lazy<Vec<CableSpec>> = Lazy::new(|| {
    let file: CatalogFile =
        toml::from_str(CATALOG_TOML).expect("embedded cable catalog must be valid TOML");
    tracing::debug!(entries = file.cable.len(), "cable catalog loaded");
    file.cable
});

/// All catalog entries, in file order.
pub fn catalog() -> &'static [CableSpec] {
    &CATALOG
}

/// Catalog designations, in file order.
pub fn names() -> Vec<&'static str> {
    CATALOG.iter().map(|c| c.name.as_str()).collect()
}

/// Look a cable up by designation, ignoring case and surrounding spaces.
pub fn find(name: &str) -> CalcResult<CableSpec> {
    let wanted = normalize(name);
    CATALOG
        .iter()
        .find(|c| normalize(&c.name) == wanted)
        .cloned()
        .ok_or_else(|| CalcError::cable_not_found(name.trim()))
}

fn normalize(name: &str) -> String {
    name.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}
