// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
use anyhow::Context;
use axiom_kernel::proof::DivergenceProof;
use axiom_kernel::{DivergenceEvaluator, Fingerprint};
use std::path::Path;

use super::load_config;

pub fn run(config_path: &Path, anchor: &str, threshold: f64) -> anyhow::Result<DivergenceProof> {
    if !(0.0..=1.0).contains(&threshold) {
        anyhow::bail!("threshold must be within [0, 1], got {}", threshold);
    }
    let config = load_config(config_path)?;
    let anchored: Fingerprint = anchor.parse().context("parsing --anchor")?;

    let proof = DivergenceProof::build(&config, anchored, &DivergenceEvaluator::new(threshold));
    println!("{}", serde_json::to_string_pretty(&proof)?);
    Ok(proof)
}
