// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
use axiom_persistence::FileStore;
use std::path::Path;

/// Re-checks every log frame and document checksum under `dir`.
///
/// A torn trailing log entry is reported but not fatal; any checksum or format
/// failure is.
pub fn run(dir: &Path) -> anyhow::Result<()> {
    let store = FileStore::open(dir)?;
    let mut failures = Vec::new();

    for name in store.collections()? {
        match store.verify_collection(&name) {
            Ok(report) => {
                println!("  {:<24} {:>6} entries  OK", name, report.entries);
                if report.torn_tail {
                    println!("  {:<24} warning: incomplete trailing entry (cut on next append)", "");
                }
            }
            Err(e) => {
                println!("  {:<24} CORRUPT ({})", name, e);
                failures.push(format!("{}.log: {}", name, e));
            }
        }
    }

    for (collection, key) in store.documents()? {
        let label = format!("{}/{}", collection, key);
        match store.verify_document(&collection, &key) {
            Ok(header) => println!("  {:<24} checksum {:016x}  OK", label, header.checksum),
            Err(e) => {
                println!("  {:<24} CORRUPT ({})", label, e);
                failures.push(format!("{}.doc: {}", label, e));
            }
        }
    }

    if failures.is_empty() {
        println!("\n✅ VERIFIED (CRC64)\n");
        Ok(())
    } else {
        println!("\n❌ CORRUPTED\n");
        anyhow::bail!("{} integrity failure(s): {}", failures.len(), failures.join("; "))
    }
}
