// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
use axiom_cli::commands::{alerts, fingerprint, history, inspect, prove, verify};
use axiom_kernel::AuditStatus;
use axiom_persistence::fixtures;
use std::fs;
use tempfile::tempdir;

#[test]
fn test_integration_workflow() {
    let dir = tempdir().unwrap();
    fixtures::generate_test_scenario(dir.path()).unwrap();

    assert!(inspect::run(dir.path()).is_ok());
    assert!(verify::run(dir.path()).is_ok(), "Verification should succeed on valid fixtures");

    assert_eq!(history::run(dir.path(), 24).unwrap(), 3);
    assert_eq!(history::run(dir.path(), 2).unwrap(), 2);
    assert_eq!(alerts::run(dir.path()).unwrap(), 1);
}

#[test]
fn test_verify_detects_corruption() {
    let dir = tempdir().unwrap();
    fixtures::generate_corrupt_scenario(dir.path()).unwrap();

    let result = verify::run(dir.path());
    assert!(result.is_err());
    assert!(result.unwrap_err().to_string().contains("auditHistory"));

    // Inspect reports the damage instead of failing.
    assert!(inspect::run(dir.path()).is_ok());
}

#[test]
fn test_verify_detects_tampered_document() {
    let dir = tempdir().unwrap();
    fixtures::generate_test_scenario(dir.path()).unwrap();

    let doc = dir.path().join("systemConfig").join("core_axioms.doc");
    let mut data = fs::read(&doc).unwrap();
    let last = data.len() - 2;
    data[last] ^= 0x01;
    fs::write(&doc, &data).unwrap();

    assert!(verify::run(dir.path()).is_err());
}

#[test]
fn test_fingerprint_matches_fixture_anchor() {
    let dir = tempdir().unwrap();
    let paths = fixtures::generate_test_scenario(dir.path()).unwrap();

    let computed = fingerprint::run(&paths.config_json).unwrap();
    assert_eq!(computed, paths.anchor);
}

#[test]
fn test_prove_against_matching_and_foreign_anchor() {
    let dir = tempdir().unwrap();
    let paths = fixtures::generate_test_scenario(dir.path()).unwrap();

    let upper = paths.anchor.to_hex().to_uppercase().replacen("0X", "0x", 1);
    let proof = prove::run(&paths.config_json, &upper, 0.005).unwrap();
    assert!(proof.hash_match);
    assert_eq!(proof.status, AuditStatus::Ok);
    assert_eq!(proof.serialization, r#"["1","2","3"]"#);

    let foreign = format!("0x{}", "00".repeat(32));
    let proof = prove::run(&paths.config_json, &foreign, 0.005).unwrap();
    assert!(!proof.hash_match);
    assert_eq!(proof.divergence_score, 1.0);
    assert_eq!(proof.status, AuditStatus::Drift);
}

#[test]
fn test_prove_rejects_bad_input() {
    let dir = tempdir().unwrap();
    let paths = fixtures::generate_test_scenario(dir.path()).unwrap();

    assert!(prove::run(&paths.config_json, "0x1234", 0.005).is_err());
    assert!(prove::run(&paths.config_json, &paths.anchor.to_hex(), 2.0).is_err());

    let empty = dir.path().join("empty.json");
    fs::write(&empty, r#"{"weights": []}"#).unwrap();
    assert!(fingerprint::run(&empty).is_err());
}
