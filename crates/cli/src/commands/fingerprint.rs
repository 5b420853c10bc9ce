// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
use axiom_kernel::canonical::canonical_serialization;
use axiom_kernel::{compute_fingerprint, Fingerprint};
use std::path::Path;

use super::load_config;

pub fn run(config_path: &Path) -> anyhow::Result<Fingerprint> {
    let config = load_config(config_path)?;
    let fingerprint = compute_fingerprint(&config);

    println!("Weights:       {}", config.len());
    println!("Serialization: {}", canonical_serialization(&config));
    println!("Fingerprint:   {}", fingerprint);
    Ok(fingerprint)
}
