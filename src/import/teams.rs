//! Team identity and season archive merging

use rusqlite::{params, Connection, ToSql};

use super::archive::SeasonTable;
use super::ImportError;
use crate::export::TeamExport;

const TEAM_SEASONS: SeasonTable = SeasonTable {
    table: "team_seasons",
    key_cols: &["tid", "season"],
    data_cols: &[
        "won", "lost", "won_conf", "lost_conf", "won_div", "lost_div", "streak", "hype", "rid",
    ],
};

const TEAM_STATS: SeasonTable = SeasonTable {
    table: "team_stats",
    key_cols: &["tid", "season", "playoffs"],
    data_cols: &[
        "gp", "min", "fg", "fga", "tp", "tpa", "ft", "fta", "orb", "drb", "ast", "tov", "stl",
        "blk", "pf", "pts", "opp_pts",
    ],
};

/// Synthetic pool buckets players can point at when they are not on a real
/// roster. Plain disabled team rows, so every foreign reference works
/// without special cases downstream.
pub fn ensure_pool_teams(conn: &Connection) -> Result<(), ImportError> {
    const POOLS: &[(i64, &str, &str)] = &[
        (-1, "Transfers", "XFER"),
        (-2, "Prospects", "PROS"),
        (-3, "Graduated", "GRAD"),
    ];

    for (tid, region, abbrev) in POOLS {
        conn.execute(
            r#"INSERT INTO teams (tid, cid, did, region, name, abbrev, disabled, updated_at)
               VALUES (?, 0, 0, ?, 'Pool', ?, TRUE, datetime('now'))
               ON CONFLICT(tid) DO UPDATE SET
                   region = excluded.region,
                   name = excluded.name,
                   abbrev = excluded.abbrev,
                   disabled = excluded.disabled,
                   updated_at = datetime('now')"#,
            params![tid, region, abbrev],
        )?;
    }
    Ok(())
}

/// Latest-wins upsert of team identity, keyed by tid
pub fn merge_teams(conn: &Connection, teams: &[TeamExport]) -> Result<usize, ImportError> {
    for t in teams {
        let tid = t
            .tid
            .ok_or_else(|| ImportError::TeamMissingId(format!("{} {}", t.region, t.name)))?;

        let colors = t
            .colors
            .as_ref()
            .map(serde_json::to_string)
            .transpose()?;

        conn.execute(
            r#"INSERT INTO teams
                 (tid, cid, did, region, name, abbrev, img_url, colors, jersey, disabled, updated_at)
               VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, datetime('now'))
               ON CONFLICT(tid) DO UPDATE SET
                   cid = excluded.cid,
                   did = excluded.did,
                   region = excluded.region,
                   name = excluded.name,
                   abbrev = excluded.abbrev,
                   img_url = excluded.img_url,
                   colors = excluded.colors,
                   jersey = excluded.jersey,
                   disabled = excluded.disabled,
                   updated_at = datetime('now')"#,
            params![
                tid, t.cid, t.did, t.region, t.name, t.abbrev, t.img_url, colors, t.jersey,
                t.disabled
            ],
        )?;
    }
    Ok(teams.len())
}

/// Season records through the archive policy: current season rewritable,
/// past seasons first-write-wins.
pub fn merge_team_seasons(
    conn: &Connection,
    teams: &[TeamExport],
    current_season: i64,
) -> Result<usize, ImportError> {
    let mut merged = 0;
    for t in teams {
        for s in &t.seasons {
            let tid = s.tid.or(t.tid);
            let Some(tid) = tid else { continue };

            let values: &[&dyn ToSql] = &[
                &tid,
                &s.season,
                &s.won,
                &s.lost,
                &s.won_conf,
                &s.lost_conf,
                &s.won_div,
                &s.lost_div,
                &s.streak,
                &s.hype,
                &s.rid,
            ];
            TEAM_SEASONS.upsert(conn, s.season == current_season, values)?;
            merged += 1;
        }
    }
    Ok(merged)
}

pub fn merge_team_stats(
    conn: &Connection,
    teams: &[TeamExport],
    current_season: i64,
) -> Result<usize, ImportError> {
    let mut merged = 0;
    for t in teams {
        for s in &t.stats {
            let tid = s.tid.or(t.tid);
            let Some(tid) = tid else { continue };

            let values: &[&dyn ToSql] = &[
                &tid,
                &s.season,
                &s.playoffs,
                &s.gp,
                &s.min,
                &s.fg,
                &s.fga,
                &s.tp,
                &s.tpa,
                &s.ft,
                &s.fta,
                &s.orb,
                &s.drb,
                &s.ast,
                &s.tov,
                &s.stl,
                &s.blk,
                &s.pf,
                &s.pts,
                &s.opp_pts,
            ];
            TEAM_STATS.upsert(conn, s.season == current_season, values)?;
            merged += 1;
        }
    }
    Ok(merged)
}
