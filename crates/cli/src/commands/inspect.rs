// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
use axiom_kernel::config::{collections, PROTOCOL_ID};
use axiom_persistence::FileStore;
use std::path::Path;

use super::table;

pub fn run(dir: &Path) -> anyhow::Result<()> {
    if !dir.is_dir() {
        anyhow::bail!("store directory {} does not exist", dir.display());
    }
    let store = FileStore::open(dir)?;

    println!("\nAxiom Store Report: {}", store.root().display());
    println!("--------------------");

    let mut logs = table(vec!["Collection", "Status", "Details"]);
    for name in store.collections()? {
        match store.verify_collection(&name) {
            Ok(report) if report.torn_tail => {
                logs.add_row(vec![
                    name,
                    "TORN".to_string(),
                    format!("{} entries, incomplete trailing entry", report.entries),
                ]);
            }
            Ok(report) => {
                logs.add_row(vec![
                    name,
                    "OK".to_string(),
                    format!("{} entries, {} bytes", report.entries, report.bytes),
                ]);
            }
            Err(e) => {
                logs.add_row(vec![name, "CORRUPT".to_string(), e.to_string()]);
            }
        }
    }
    println!("{logs}\n");

    let mut status = table(vec!["Field", "Value"]);
    match store.read_document(collections::GOVERNANCE_PROTOCOLS, PROTOCOL_ID) {
        Ok(Some(doc)) => {
            if let Some(fields) = doc.as_object() {
                for (k, v) in fields {
                    let shown = v.as_str().map(str::to_string).unwrap_or_else(|| v.to_string());
                    status.add_row(vec![k.clone(), shown]);
                }
            }
        }
        Ok(None) => {
            status.add_row(vec!["protocol".to_string(), "MISSING".to_string()]);
        }
        Err(e) => {
            status.add_row(vec!["protocol".to_string(), format!("CORRUPT: {}", e)]);
        }
    }
    println!("Protocol `{}`", PROTOCOL_ID);
    println!("{status}\n");

    Ok(())
}
