//! Archival import engine
//!
//! Applies one parsed export to the archive inside a single transaction:
//!
//!   snapshot row -> league meta -> taxonomy -> team/player identity ->
//!   season-scoped archive tables -> schedule -> played games -> activate
//!
//! Identity tables are latest-wins. Season-scoped tables follow the archive
//! policy: only the export's declared current season may be rewritten, past
//! seasons keep their first committed values. Played games are insert-only;
//! a reused gid pointing at a different game is quarantined, never merged.
//! Any error rolls the whole import back.

mod archive;
mod class_year;
mod games;
mod meta;
mod players;
mod provenance;
mod schedule;
mod teams;

pub use class_year::class_label;
pub use games::GameCounts;

use anyhow::{Context, Result};
use thiserror::Error;

use crate::export::LoadedExport;
use crate::store::ArchiveStore;

/// Import failure taxonomy. Everything here aborts the import; the one
/// recoverable condition (gid reuse) never surfaces as an error, it is
/// quarantined in gid_conflicts instead.
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("export missing {0}")]
    MissingCollection(&'static str),

    #[error("team missing tid (name={0})")]
    TeamMissingId(String),

    #[error("player missing pid (name={0})")]
    PlayerMissingId(String),

    #[error("database error: {0}")]
    Db(#[from] rusqlite::Error),
}

/// What one committed import did, per entity type
#[derive(Debug, Default)]
pub struct ImportSummary {
    pub snapshot_id: i64,
    pub season: i64,
    pub phase: i64,
    pub teams: usize,
    pub players: usize,
    pub conferences: usize,
    pub divisions: usize,
    pub team_seasons: usize,
    pub team_stats: usize,
    pub player_ratings: usize,
    pub player_stats: usize,
    pub player_awards: usize,
    pub schedule_games: usize,
    pub games_archived: usize,
    pub games_skipped: usize,
    pub games_dropped: usize,
    pub conflicts: usize,
}

/// Run one import as a single atomic unit of work. On success the snapshot
/// is the new active one; on any error the archive is untouched.
pub fn run_import(
    store: &mut ArchiveStore,
    export: &LoadedExport,
    storage_key: &str,
) -> Result<ImportSummary> {
    let doc = &export.doc;
    let season = doc.game_attributes.season;
    let phase = doc.game_attributes.phase;

    let tx = store.transaction().context("Failed to begin import transaction")?;

    let snapshot_id = provenance::register_snapshot(
        &tx,
        &export.fingerprint,
        season,
        &export.file_name,
        storage_key,
    )
    .context("Failed to register snapshot")?;

    meta::merge_meta(&tx, snapshot_id, &doc.game_attributes)
        .context("Failed to merge league meta")?;
    let (conferences, divisions) =
        meta::merge_taxonomy(&tx, &doc.game_attributes).context("Failed to merge taxonomy")?;

    teams::ensure_pool_teams(&tx).context("Failed to ensure pool teams")?;
    let teams_merged = teams::merge_teams(&tx, &doc.teams).context("Failed to merge teams")?;
    let players_merged = players::merge_players(&tx, &doc.players, season)
        .context("Failed to merge players")?;

    let team_seasons = teams::merge_team_seasons(&tx, &doc.teams, season)
        .context("Failed to merge team seasons")?;
    let team_stats =
        teams::merge_team_stats(&tx, &doc.teams, season).context("Failed to merge team stats")?;
    let player_ratings = players::merge_player_ratings(&tx, &doc.players, season)
        .context("Failed to merge player ratings")?;
    let player_stats = players::merge_player_stats(&tx, &doc.players, season)
        .context("Failed to merge player stats")?;
    let player_awards =
        players::merge_player_awards(&tx, &doc.players).context("Failed to merge player awards")?;

    let schedule_games = schedule::replace_schedule(&tx, season, &doc.schedule)
        .context("Failed to replace schedule")?;
    let game_counts = games::archive_games(&tx, &doc.games).context("Failed to archive games")?;

    provenance::activate(&tx, snapshot_id).context("Failed to activate snapshot")?;

    tx.commit().context("Failed to commit import")?;

    Ok(ImportSummary {
        snapshot_id,
        season,
        phase,
        teams: teams_merged,
        players: players_merged,
        conferences,
        divisions,
        team_seasons,
        team_stats,
        player_ratings,
        player_stats,
        player_awards,
        schedule_games,
        games_archived: game_counts.archived,
        games_skipped: game_counts.skipped,
        games_dropped: game_counts.dropped,
        conflicts: game_counts.conflicts,
    })
}

#[cfg(test)]
mod tests;
