// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
use axiom_kernel::config::collections;
use axiom_kernel::records::AuditRecord;
use axiom_persistence::{FileStore, Stored};
use std::path::Path;

use super::{short_hash, table};

/// Prints the newest `limit` audits, oldest first. Returns how many were shown.
pub fn run(dir: &Path, limit: usize) -> anyhow::Result<usize> {
    let store = FileStore::open(dir)?;
    let rows: Vec<Stored<AuditRecord>> = store.scan(collections::AUDIT_HISTORY)?;
    let skip = rows.len().saturating_sub(limit);

    let mut timeline = table(vec!["Timestamp", "Status", "Score", "Match", "Local", "Anchor"]);
    let mut shown = 0;
    for row in rows.into_iter().skip(skip) {
        let audit = row.value;
        timeline.add_row(vec![
            audit.timestamp.to_rfc3339(),
            audit.status.as_str().to_string(),
            format!("{:.1}", audit.divergence_score),
            audit.hash_match.to_string(),
            short_hash(&audit.local_hash),
            short_hash(&audit.anchored_hash),
        ]);
        shown += 1;
    }

    println!("\nAudit history ({} shown)", shown);
    println!("{timeline}\n");
    Ok(shown)
}
