//! Status command implementation

use anyhow::Result;

use crate::store::ArchiveStore;

pub fn run(store: &ArchiveStore) -> Result<()> {
    match store.active_meta()? {
        Some(meta) => {
            println!("Active snapshot: {} (imported {})", meta.snapshot_id, meta.imported_at);
            println!("  sha256 {}", &meta.sha256[..12]);
            println!("  Season {} / phase {}", meta.season, meta.phase);
            if let Some(start) = meta.starting_season {
                println!("  League started {}", start);
            }
        }
        None => {
            println!("No active snapshot. Run 'courtvault import <file>' first.");
            return Ok(());
        }
    }

    println!("\n{:<20} {:>10}", "Table", "Rows");
    println!("{}", "-".repeat(31));
    for (table, count) in store.table_counts()? {
        println!("{:<20} {:>10}", table, count);
    }

    Ok(())
}
