// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
use axiom_kernel::config::collections;
use axiom_kernel::records::AlertRecord;
use axiom_persistence::{FileStore, Stored};
use std::path::Path;

use super::table;

pub fn run(dir: &Path) -> anyhow::Result<usize> {
    let store = FileStore::open(dir)?;
    let rows: Vec<Stored<AlertRecord>> = store.scan(collections::ALERTS)?;

    let mut alerts = table(vec!["Timestamp", "Severity", "Acknowledged", "Score", "Message"]);
    for row in &rows {
        let alert = &row.value;
        alerts.add_row(vec![
            alert.timestamp.to_rfc3339(),
            format!("{:?}", alert.severity).to_uppercase(),
            alert.acknowledged.to_string(),
            format!("{:.1}", alert.divergence_score),
            alert.message.clone(),
        ]);
    }

    println!("\nCORE_DRIFT alerts: {}", rows.len());
    println!("{alerts}\n");
    Ok(rows.len())
}
