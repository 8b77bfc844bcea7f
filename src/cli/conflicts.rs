//! Conflicts command implementation

use anyhow::Result;

use crate::store::ArchiveStore;

pub fn run(store: &ArchiveStore) -> Result<()> {
    let conflicts = store.list_conflicts()?;

    if conflicts.is_empty() {
        println!("No gid conflicts recorded.");
        return Ok(());
    }

    println!("{} quarantined gid conflict(s):\n", conflicts.len());

    for c in conflicts {
        println!("#{} gid={} ({})", c.id, c.gid, c.created_at);
        println!(
            "  archived: season={} {} vs {}",
            fmt(c.existing_season),
            fmt(c.existing_home_tid),
            fmt(c.existing_away_tid)
        );
        println!(
            "  incoming: season={} {} vs {}",
            fmt(c.incoming_season),
            fmt(c.incoming_home_tid),
            fmt(c.incoming_away_tid)
        );
    }

    Ok(())
}

fn fmt(value: Option<i64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_else(|| "?".into())
}
