// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
use crate::axioms::AxiomConfiguration;
use crate::divergence::{AuditStatus, DivergenceEvaluator};
use crate::fingerprint::{compute_fingerprint, keccak256, Fingerprint};
use crate::proof::DivergenceProof;

#[test]
fn test_proof_is_independently_checkable() {
    let config = AxiomConfiguration::new(vec![0.5, 0.25, 0.125]).unwrap();
    let anchor = compute_fingerprint(&config);

    let proof = DivergenceProof::build(&config, anchor, &DivergenceEvaluator::default());

    // Recompute from the published serialization alone.
    assert_eq!(Fingerprint(keccak256(proof.serialization.as_bytes())), proof.fingerprint);
    assert_eq!(proof.status, AuditStatus::Ok);
    assert!(proof.hash_match);
}

#[test]
fn test_proof_reports_drift() {
    let config = AxiomConfiguration::new(vec![0.5, 0.25, 0.125]).unwrap();
    let proof = DivergenceProof::build(&config, Fingerprint([0u8; 32]), &DivergenceEvaluator::default());
    assert_eq!(proof.divergence_score, 1.0);
    assert_eq!(proof.status, AuditStatus::Drift);

    let json = serde_json::to_value(&proof).unwrap();
    assert_eq!(json["anchoredHash"], serde_json::json!(format!("0x{}", "00".repeat(32))));
}
