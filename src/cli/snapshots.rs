//! Snapshots command implementation

use anyhow::Result;

use crate::store::ArchiveStore;

pub fn run(store: &ArchiveStore) -> Result<()> {
    let snapshots = store.list_snapshots()?;

    if snapshots.is_empty() {
        println!("No snapshots imported yet.");
        return Ok(());
    }

    println!(
        "{:<6} {:<20} {:<8} {:<14} {:<8} {}",
        "ID", "Imported", "Season", "Fingerprint", "Active", "File"
    );
    println!("{}", "-".repeat(80));

    for s in snapshots {
        println!(
            "{:<6} {:<20} {:<8} {:<14} {:<8} {}",
            s.id,
            s.created_at,
            s.season.map(|v| v.to_string()).unwrap_or_else(|| "-".into()),
            &s.sha256[..12.min(s.sha256.len())],
            if s.is_active { "yes" } else { "" },
            s.file_name.as_deref().unwrap_or("-"),
        );
    }

    Ok(())
}
