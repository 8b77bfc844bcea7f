//! Import command implementation

use anyhow::Result;
use std::path::Path;

use crate::config::Config;
use crate::export::{load_export_from_file, persist_raw_export};
use crate::import::run_import;
use crate::store::ArchiveStore;

pub fn run(store: &mut ArchiveStore, config: &Config, file: &str) -> Result<()> {
    let loaded = load_export_from_file(Path::new(file))?;
    println!(
        "Loaded {} ({} bytes, sha256 {})",
        loaded.file_name,
        loaded.raw.len(),
        &loaded.fingerprint[..12]
    );

    let storage_key = persist_raw_export(&config.exports_dir(), &loaded.raw, &loaded.fingerprint)?;
    println!("Raw export stored as {}", storage_key);

    let summary = run_import(store, &loaded, &storage_key)?;

    println!("\n✅ Import complete (snapshot {})", summary.snapshot_id);
    println!("   Season {} / phase {}", summary.season, summary.phase);
    println!(
        "   Taxonomy: {} conferences, {} divisions",
        summary.conferences, summary.divisions
    );
    println!(
        "   Identity: {} teams, {} players",
        summary.teams, summary.players
    );
    println!(
        "   Archive:  {} team seasons, {} team stats, {} ratings, {} player stats, {} awards",
        summary.team_seasons,
        summary.team_stats,
        summary.player_ratings,
        summary.player_stats,
        summary.player_awards
    );
    println!("   Schedule: {} games", summary.schedule_games);
    println!(
        "   Games:    {} archived, {} already archived",
        summary.games_archived, summary.games_skipped
    );
    if summary.games_dropped > 0 {
        println!(
            "   Dropped:  {} game(s) missing team data",
            summary.games_dropped
        );
    }

    if summary.conflicts > 0 {
        println!(
            "⚠️  {} gid conflict(s) quarantined - run 'courtvault conflicts' to review",
            summary.conflicts
        );
    }

    Ok(())
}
