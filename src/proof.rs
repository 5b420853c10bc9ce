// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Offline divergence proofs.

use serde::{Deserialize, Serialize};

use crate::axioms::AxiomConfiguration;
use crate::canonical::canonical_serialization;
use crate::divergence::{AuditStatus, DivergenceEvaluator};
use crate::fingerprint::{compute_fingerprint, Fingerprint};

/// A self-contained receipt of one comparison.
///
/// Carries the exact serialization that was hashed, so a third party can
/// recompute the fingerprint with any Keccak-256 implementation and check the
/// verdict against the anchor without trusting this tool.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DivergenceProof {
    pub serialization: String,
    pub fingerprint: Fingerprint,
    pub anchored_hash: Fingerprint,
    pub divergence_score: f64,
    pub status: AuditStatus,
    pub hash_match: bool,
}

impl DivergenceProof {
    pub fn build(config: &AxiomConfiguration, anchored_hash: Fingerprint, evaluator: &DivergenceEvaluator) -> Self {
        let serialization = canonical_serialization(config);
        let fingerprint = compute_fingerprint(config);
        let divergence = evaluator.evaluate(&fingerprint.to_hex(), &anchored_hash.to_hex());
        Self {
            serialization,
            fingerprint,
            anchored_hash,
            divergence_score: divergence.score,
            status: divergence.status,
            hash_match: divergence.hash_match,
        }
    }
}
