// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
use crate::axioms::AxiomConfiguration;
use crate::canonical::canonical_serialization;
use crate::fingerprint::{compute_fingerprint, keccak256, Fingerprint};
use serde_json::json;
use std::collections::HashSet;

/// A simple deterministic RNG for tests.
struct Pcg32 {
    state: u64,
    inc: u64,
}

impl Pcg32 {
    fn new(seed: u64) -> Self {
        Self { state: seed, inc: 1 }
    }

    fn next_u32(&mut self) -> u32 {
        let oldstate = self.state;
        self.state = oldstate.wrapping_mul(6364136223846793005).wrapping_add(self.inc);
        let xorshifted = (((oldstate >> 18) ^ oldstate) >> 27) as u32;
        let rot = (oldstate >> 59) as u32;
        xorshifted.rotate_right(rot)
    }

    fn next_weight(&mut self) -> f64 {
        (self.next_u32() % 1_000_000) as f64 / 997.0
    }
}

fn cfg(weights: &[f64]) -> AxiomConfiguration {
    AxiomConfiguration::new(weights.to_vec()).unwrap()
}

#[test]
fn test_fingerprint_is_repeatable() {
    let a = compute_fingerprint(&cfg(&[1.0, 2.0, 3.0]));
    let b = compute_fingerprint(&cfg(&[1.0, 2.0, 3.0]));
    assert_eq!(a, b);
}

#[test]
fn test_fingerprint_pins_canonical_bytes() {
    // The digest must be Keccak-256 over exactly `["1","2","3"]`.
    let config = cfg(&[1.0, 2.0, 3.0]);
    assert_eq!(canonical_serialization(&config), r#"["1","2","3"]"#);
    assert_eq!(compute_fingerprint(&config), Fingerprint(keccak256(br#"["1","2","3"]"#)));
}

#[test]
fn test_integer_and_float_forms_agree() {
    // `1` and `1.0` in the stored document parse to the same number.
    let from_ints = AxiomConfiguration::from_document(Some(&json!({ "weights": [1, 2, 3] }))).unwrap();
    let from_floats = AxiomConfiguration::from_document(Some(&json!({ "weights": [1.0, 2.0, 3.0] }))).unwrap();
    assert_eq!(compute_fingerprint(&from_ints), compute_fingerprint(&from_floats));
}

#[test]
fn test_tiny_change_changes_hash() {
    let base = compute_fingerprint(&cfg(&[1.0, 2.0, 3.0]));
    let nudged = compute_fingerprint(&cfg(&[1.0, 2.0, 3.0000001]));
    assert_ne!(base, nudged);
}

#[test]
fn test_order_and_count_matter() {
    let base = compute_fingerprint(&cfg(&[1.0, 2.0, 3.0]));
    assert_ne!(base, compute_fingerprint(&cfg(&[3.0, 2.0, 1.0])));
    assert_ne!(base, compute_fingerprint(&cfg(&[1.0, 2.0])));
    assert_ne!(base, compute_fingerprint(&cfg(&[1.0, 2.0, 3.0, 0.0])));
}

#[test]
fn test_random_vectors_are_stable_and_distinct() {
    let mut rng = Pcg32::new(42);
    let mut seen = HashSet::new();

    for len in 1..=64usize {
        let weights: Vec<f64> = (0..len).map(|_| rng.next_weight()).collect();
        let first = compute_fingerprint(&cfg(&weights));
        let second = compute_fingerprint(&cfg(&weights.clone()));
        assert_eq!(first, second, "fingerprint not stable for len {}", len);
        assert!(seen.insert(first), "collision at len {}", len);
    }
}

#[test]
fn test_serialization_survives_reparse() {
    // Every canonical string parses back to the same f64, so no information is lost.
    let mut rng = Pcg32::new(7);
    let weights: Vec<f64> = (0..256).map(|_| rng.next_weight() * 1e-3).collect();
    let encoded = canonical_serialization(&cfg(&weights));
    let decoded: Vec<String> = serde_json::from_str(&encoded).unwrap();
    for (w, s) in weights.iter().zip(decoded.iter()) {
        assert_eq!(*w, s.parse::<f64>().unwrap());
    }
}
