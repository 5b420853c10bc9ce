// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
use crate::axioms::AxiomConfiguration;
use crate::divergence::{AuditStatus, DivergenceEvaluator};
use crate::fingerprint::compute_fingerprint;
use crate::records::AuditRecord;
use chrono::Utc;

#[test]
fn test_case_differing_anchor_matches() {
    let local = compute_fingerprint(&AxiomConfiguration::new(vec![1.0, 2.0, 3.0]).unwrap()).to_hex();
    let anchored = format!("0x{}", local[2..].to_uppercase());

    let divergence = DivergenceEvaluator::default().evaluate(&local, &anchored);
    assert_eq!(divergence.score, 0.0);
    assert_eq!(divergence.status, AuditStatus::Ok);

    let record = AuditRecord::new(Utc::now(), local, anchored, &divergence);
    assert!(record.hash_match);
}

#[test]
fn test_nudged_weight_is_drift() {
    let a = compute_fingerprint(&AxiomConfiguration::new(vec![1.0, 2.0, 3.0]).unwrap());
    let b = compute_fingerprint(&AxiomConfiguration::new(vec![1.0, 2.0, 3.0000001]).unwrap());

    let divergence = DivergenceEvaluator::default().evaluate(&a.to_hex(), &b.to_hex());
    assert_eq!(divergence.score, 1.0);
    assert_eq!(divergence.status, AuditStatus::Drift);
    assert!(!divergence.hash_match);
}

#[test]
fn test_threshold_governs_status() {
    // With a threshold at or above 1.0 even a mismatch is tolerated.
    let lenient = DivergenceEvaluator::new(1.0);
    let d = lenient.evaluate("0x01", "0x02");
    assert_eq!(d.score, 1.0);
    assert_eq!(d.status, AuditStatus::Ok);

    let strict = DivergenceEvaluator::new(0.0);
    assert_eq!(strict.evaluate("0x01", "0x01").status, AuditStatus::Ok);
    assert_eq!(strict.evaluate("0x01", "0x02").status, AuditStatus::Drift);
}
