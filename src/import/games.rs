//! Played-game archiving and gid collision quarantine
//!
//! Game ids come from the export source and are not guaranteed unique
//! across sources. An unseen gid is archived with its full box score; a
//! seen gid that matches on (season, home, away) is an idempotent re-import
//! and is skipped; a seen gid that differs on any of those is a collision,
//! logged to gid_conflicts with both representations and skipped. The
//! archived game is never touched either way.

use rusqlite::{params, Connection};
use serde::Serialize;

use super::ImportError;
use crate::export::{GameExport, GameSideExport, PlayerLineExport};

#[derive(Debug, Default)]
pub struct GameCounts {
    pub archived: usize,
    /// Already archived with matching identity
    pub skipped: usize,
    /// Entries missing a side or a side's tid; not archivable
    pub dropped: usize,
    pub conflicts: usize,
}

/// Archived representation captured into a conflict record
#[derive(Debug, Serialize)]
struct ExistingGame {
    gid: i64,
    season: i64,
    home_tid: i64,
    away_tid: i64,
    home_pts: i64,
    away_pts: i64,
}

pub fn archive_games(conn: &Connection, games: &[GameExport]) -> Result<GameCounts, ImportError> {
    let mut counts = GameCounts::default();

    for g in games {
        // Home side is always teams[0]
        let (Some(home), Some(away)) = (g.teams.first(), g.teams.get(1)) else {
            counts.dropped += 1;
            continue;
        };
        let (Some(home_tid), Some(away_tid)) = (home.tid, away.tid) else {
            counts.dropped += 1;
            continue;
        };

        if let Some(existing) = find_existing(conn, g.gid)? {
            let looks_different = existing.season != g.season
                || existing.home_tid != home_tid
                || existing.away_tid != away_tid;

            if looks_different {
                eprintln!(
                    "[GID COLLISION] gid={} archived as season={} ({} vs {}), incoming season={} ({} vs {}); skipping incoming game",
                    g.gid,
                    existing.season,
                    existing.home_tid,
                    existing.away_tid,
                    g.season,
                    home_tid,
                    away_tid
                );
                quarantine(conn, &existing, g, home_tid, away_tid)?;
                counts.conflicts += 1;
            } else {
                counts.skipped += 1;
            }

            // Never overwrite an archived gid
            continue;
        }

        let home_pts = resolve_points(home, home_tid, g);
        let away_pts = resolve_points(away, away_tid, g);

        conn.execute(
            r#"INSERT INTO games
                 (gid, season, day, home_tid, away_tid, home_pts, away_pts, num_periods, overtimes)
               VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
               ON CONFLICT(gid) DO NOTHING"#,
            params![
                g.gid,
                g.season,
                g.day,
                home_tid,
                away_tid,
                home_pts,
                away_pts,
                g.num_periods,
                g.overtimes
            ],
        )?;

        insert_team_totals(conn, g.gid, home_tid, true, home)?;
        insert_team_totals(conn, g.gid, away_tid, false, away)?;
        insert_player_lines(conn, g.gid, home_tid, true, &home.players)?;
        insert_player_lines(conn, g.gid, away_tid, false, &away.players)?;

        counts.archived += 1;
    }

    Ok(counts)
}

fn find_existing(conn: &Connection, gid: i64) -> Result<Option<ExistingGame>, ImportError> {
    let row = conn.query_row(
        "SELECT gid, season, home_tid, away_tid, home_pts, away_pts FROM games WHERE gid = ?",
        params![gid],
        |row| {
            Ok(ExistingGame {
                gid: row.get(0)?,
                season: row.get(1)?,
                home_tid: row.get(2)?,
                away_tid: row.get(3)?,
                home_pts: row.get(4)?,
                away_pts: row.get(5)?,
            })
        },
    );

    match row {
        Ok(game) => Ok(Some(game)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

fn quarantine(
    conn: &Connection,
    existing: &ExistingGame,
    incoming: &GameExport,
    incoming_home_tid: i64,
    incoming_away_tid: i64,
) -> Result<(), ImportError> {
    conn.execute(
        r#"INSERT INTO gid_conflicts
             (gid, existing_season, existing_home_tid, existing_away_tid,
              incoming_season, incoming_home_tid, incoming_away_tid,
              existing_game, incoming_game)
           VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)"#,
        params![
            existing.gid,
            existing.season,
            existing.home_tid,
            existing.away_tid,
            incoming.season,
            incoming_home_tid,
            incoming_away_tid,
            serde_json::to_string(existing)?,
            serde_json::to_string(incoming)?,
        ],
    )?;
    Ok(())
}

/// Prefer the side's own score; fall back to the win/loss summary matched
/// by tid.
fn resolve_points(side: &GameSideExport, tid: i64, g: &GameExport) -> i64 {
    if let Some(pts) = side.pts {
        return pts;
    }
    let winner = g.won.as_ref().filter(|w| w.tid == Some(tid));
    match winner {
        Some(w) => w.pts.unwrap_or(0),
        None => g.lost.as_ref().and_then(|l| l.pts).unwrap_or(0),
    }
}

fn insert_team_totals(
    conn: &Connection,
    gid: i64,
    tid: i64,
    is_home: bool,
    side: &GameSideExport,
) -> Result<(), ImportError> {
    conn.execute(
        r#"INSERT INTO game_team_totals (gid, tid, is_home, totals)
           VALUES (?, ?, ?, ?)
           ON CONFLICT(gid, tid) DO NOTHING"#,
        params![gid, tid, is_home, serde_json::to_string(side)?],
    )?;
    Ok(())
}

fn insert_player_lines(
    conn: &Connection,
    gid: i64,
    tid: i64,
    is_home: bool,
    lines: &[PlayerLineExport],
) -> Result<(), ImportError> {
    for line in lines {
        let Some(pid) = line.pid else { continue };

        // DO NOTHING also guards duplicate pids within one box score
        conn.execute(
            r#"INSERT INTO game_player_lines
                 (gid, tid, pid, is_home, gs, min, pts, orb, drb, ast, line)
               VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
               ON CONFLICT(gid, pid) DO NOTHING"#,
            params![
                gid,
                tid,
                pid,
                is_home,
                line.gs,
                line.min,
                line.pts,
                line.orb,
                line.drb,
                line.ast,
                serde_json::to_string(line)?
            ],
        )?;
    }
    Ok(())
}
