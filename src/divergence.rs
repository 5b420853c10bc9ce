// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Divergence scoring between the local fingerprint and the ledger anchor.

use serde::{Deserialize, Serialize};

use crate::config::DEFAULT_DIVERGENCE_THRESHOLD;

/// Outcome class of one audit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AuditStatus {
    Ok,
    Drift,
}

impl AuditStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AuditStatus::Ok => "OK",
            AuditStatus::Drift => "DRIFT",
        }
    }
}

/// Result of comparing two fingerprints.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Divergence {
    /// 0.0 on exact match, 1.0 otherwise.
    pub score: f64,
    pub status: AuditStatus,
    /// Case-insensitive equality of the two hex strings.
    pub hash_match: bool,
}

/// Scores divergence against a fixed threshold.
///
/// The score is binary today. The threshold comparison is kept so a graded
/// similarity metric can replace [`DivergenceEvaluator::score`] without changing callers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DivergenceEvaluator {
    threshold: f64,
}

impl Default for DivergenceEvaluator {
    fn default() -> Self {
        Self::new(DEFAULT_DIVERGENCE_THRESHOLD)
    }
}

impl DivergenceEvaluator {
    pub fn new(threshold: f64) -> Self {
        Self { threshold }
    }

    pub fn score(&self, hash_match: bool) -> f64 {
        if hash_match {
            0.0
        } else {
            1.0
        }
    }

    pub fn evaluate(&self, local_hash: &str, anchored_hash: &str) -> Divergence {
        let hash_match = hashes_match(local_hash, anchored_hash);
        let score = self.score(hash_match);
        let status = if score <= self.threshold {
            AuditStatus::Ok
        } else {
            AuditStatus::Drift
        };
        Divergence { score, status, hash_match }
    }
}

/// Compares two hex digests ignoring case and surrounding whitespace.
pub fn hashes_match(a: &str, b: &str) -> bool {
    a.trim().eq_ignore_ascii_case(b.trim())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_match_is_ok() {
        let d = DivergenceEvaluator::default().evaluate("0xabc", "0xABC");
        assert_eq!(d.score, 0.0);
        assert_eq!(d.status, AuditStatus::Ok);
        assert!(d.hash_match);
    }

    #[test]
    fn test_mismatch_is_drift() {
        let d = DivergenceEvaluator::default().evaluate("0xabc", "0xabd");
        assert_eq!(d.score, 1.0);
        assert_eq!(d.status, AuditStatus::Drift);
        assert!(!d.hash_match);
    }

    #[test]
    fn test_status_serializes_uppercase() {
        assert_eq!(serde_json::to_string(&AuditStatus::Drift).unwrap(), "\"DRIFT\"");
        assert_eq!(AuditStatus::Ok.as_str(), "OK");
    }
}
