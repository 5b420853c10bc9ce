// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
pub mod alerts;
pub mod fingerprint;
pub mod history;
pub mod inspect;
pub mod prove;
pub mod verify;

use anyhow::Context;
use axiom_kernel::AxiomConfiguration;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{ContentArrangement, Table};
use std::path::Path;

pub(crate) fn table(header: Vec<&str>) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(header);
    table
}

/// Loads a configuration document (`{"weights": [...]}`) from a JSON file.
pub fn load_config(path: &Path) -> anyhow::Result<AxiomConfiguration> {
    let raw = std::fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    let document: serde_json::Value =
        serde_json::from_slice(&raw).with_context(|| format!("parsing {}", path.display()))?;
    Ok(AxiomConfiguration::from_document(Some(&document))?)
}

/// First ten hex digits of a `0x` hash, for table cells.
pub(crate) fn short_hash(hash: &str) -> String {
    match hash.get(..12) {
        Some(head) if hash.len() > 12 => format!("{}…", head),
        _ => hash.to_string(),
    }
}
