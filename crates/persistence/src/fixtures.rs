// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
use crate::error::{PersistenceError, Result};
use crate::store::FileStore;
use crate::wal;

use axiom_kernel::config::{collections, CONFIG_KEY, PROTOCOL_ID};
use axiom_kernel::divergence::DivergenceEvaluator;
use axiom_kernel::fingerprint::{compute_fingerprint, Fingerprint};
use axiom_kernel::records::{AlertRecord, AuditRecord, ErrorRecord, ProtocolStatusUpdate};
use axiom_kernel::AxiomConfiguration;
use chrono::{DateTime, TimeZone, Utc};
use serde_json::json;

use std::fs;
use std::path::{Path, PathBuf};

pub struct FixturePaths {
    pub root: PathBuf,
    pub config_json: PathBuf,
    pub anchor: Fingerprint,
}

/// Weights stored by every fixture.
pub const FIXTURE_WEIGHTS: [f64; 3] = [1.0, 2.0, 3.0];

/// Builds a store directory with three hours of history: two clean audits,
/// one drift audit with its alert, the alarmed protocol record and one failure.
pub fn generate_test_scenario(dir: &Path) -> Result<FixturePaths> {
    if !dir.exists() {
        fs::create_dir_all(dir)?;
    }
    let store = FileStore::open(dir)?;

    let config = json!({ "weights": FIXTURE_WEIGHTS, "revision": 7 });
    store.put_document(collections::SYSTEM_CONFIG, CONFIG_KEY, &config, ts(0).timestamp_millis())?;
    store.put_document(
        collections::GOVERNANCE_PROTOCOLS,
        PROTOCOL_ID,
        &json!({ "name": "Core Governance", "status": "ACTIVE" }),
        ts(0).timestamp_millis(),
    )?;

    // The local configuration computes to this fingerprint, which is also the anchor.
    let weights = AxiomConfiguration::new(FIXTURE_WEIGHTS.to_vec())
        .map_err(|e| PersistenceError::InvalidFormat(e.to_string()))?;
    let anchor = compute_fingerprint(&weights);
    let local = anchor.to_hex();
    let tampered = format!("0x{}", "ee".repeat(32));
    let evaluator = DivergenceEvaluator::default();

    for (hour, local_hash) in [(1, &local), (2, &local), (3, &tampered)] {
        let divergence = evaluator.evaluate(local_hash, &local);
        let record = AuditRecord::new(ts(hour), local_hash.clone(), local.clone(), &divergence);
        store.append(collections::AUDIT_HISTORY, record.timestamp.timestamp_millis(), &record)?;

        if !divergence.hash_match {
            let alert = AlertRecord::core_drift(&record);
            let update = serde_json::to_value(ProtocolStatusUpdate::alarm(&alert))?;
            if let Some(patch) = update.as_object() {
                store.merge_document(
                    collections::GOVERNANCE_PROTOCOLS,
                    PROTOCOL_ID,
                    patch,
                    alert.timestamp.timestamp_millis(),
                )?;
            }
            store.append(collections::ALERTS, alert.timestamp.timestamp_millis(), &alert)?;
        }
    }

    let failure = ErrorRecord::audit_failure(ts(4), "Network error: anchor read failed after 3 attempts".into(), None);
    store.append(collections::SYSTEM_ERRORS, failure.timestamp.timestamp_millis(), &failure)?;

    let config_json = dir.join("axioms.json");
    fs::write(&config_json, serde_json::to_vec_pretty(&config)?)?;

    Ok(FixturePaths {
        root: dir.to_path_buf(),
        config_json,
        anchor,
    })
}

/// Same as [`generate_test_scenario`] with one flipped payload byte in the audit log.
pub fn generate_corrupt_scenario(dir: &Path) -> Result<FixturePaths> {
    let paths = generate_test_scenario(dir)?;
    let log = FileStore::open(dir)?.log_path(collections::AUDIT_HISTORY)?;

    let mut data = fs::read(&log)?;
    let idx = wal::WalEntryHeader::SIZE + 2;
    data[idx] ^= 0x01;
    fs::write(&log, &data)?;

    Ok(paths)
}

/// Fixture clock: `hour` hours after 2026-01-01T00:00:00Z.
fn ts(hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 1, 1, hour, 0, 0)
        .single()
        .unwrap_or(DateTime::<Utc>::UNIX_EPOCH)
}
