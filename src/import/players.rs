//! Player identity, ratings, stats and awards merging

use rusqlite::{params, Connection, ToSql};

use super::archive::SeasonTable;
use super::class_year::class_label;
use super::ImportError;
use crate::export::PlayerExport;

const PLAYER_RATINGS: SeasonTable = SeasonTable {
    table: "player_ratings",
    key_cols: &["pid", "season"],
    data_cols: &["pos", "ovr", "pot", "skills", "ratings"],
};

const PLAYER_STATS: SeasonTable = SeasonTable {
    table: "player_stats",
    key_cols: &["pid", "season", "playoffs"],
    data_cols: &[
        "tid", "gp", "gs", "min", "pts", "orb", "drb", "ast", "tov", "stl", "blk", "stats",
    ],
};

/// Latest-wins upsert of player identity. The class label is recomputed
/// every time; class_year itself is the draft year where known.
pub fn merge_players(
    conn: &Connection,
    players: &[PlayerExport],
    current_season: i64,
) -> Result<usize, ImportError> {
    for p in players {
        let pid = p
            .pid
            .ok_or_else(|| ImportError::PlayerMissingId(p.display_name()))?;

        let label = class_label(p.tid, p.draft_year(), &p.stats, current_season);
        let injury = p.injury.as_ref().map(serde_json::to_string).transpose()?;
        let face = p.face.as_ref().map(serde_json::to_string).transpose()?;

        conn.execute(
            r#"INSERT INTO players
                 (pid, first_name, last_name, born_year, born_loc, hgt_in, weight_lbs,
                  img_url, injury, class_year, class_year_label, college, face, current_tid,
                  updated_at)
               VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, datetime('now'))
               ON CONFLICT(pid) DO UPDATE SET
                   first_name = excluded.first_name,
                   last_name = excluded.last_name,
                   born_year = excluded.born_year,
                   born_loc = excluded.born_loc,
                   hgt_in = excluded.hgt_in,
                   weight_lbs = excluded.weight_lbs,
                   img_url = excluded.img_url,
                   injury = excluded.injury,
                   class_year = excluded.class_year,
                   class_year_label = excluded.class_year_label,
                   college = excluded.college,
                   face = excluded.face,
                   current_tid = excluded.current_tid,
                   updated_at = datetime('now')"#,
            params![
                pid,
                p.first_name,
                p.last_name,
                p.born.as_ref().and_then(|b| b.year),
                p.born.as_ref().and_then(|b| b.loc.clone()),
                p.hgt,
                p.weight,
                p.img_url,
                injury,
                p.draft_year(),
                label,
                p.college,
                face,
                p.tid,
            ],
        )?;
    }
    Ok(players.len())
}

pub fn merge_player_ratings(
    conn: &Connection,
    players: &[PlayerExport],
    current_season: i64,
) -> Result<usize, ImportError> {
    let mut merged = 0;
    for p in players {
        let Some(pid) = p.pid else { continue };
        for r in &p.ratings {
            let skills = match &r.skills {
                Some(v) => serde_json::to_string(v)?,
                None => "[]".to_string(),
            };
            // Full rating entry rides along for fields we do not break out
            let blob = serde_json::to_string(r)?;

            let values: &[&dyn ToSql] =
                &[&pid, &r.season, &r.pos, &r.ovr, &r.pot, &skills, &blob];
            PLAYER_RATINGS.upsert(conn, r.season == current_season, values)?;
            merged += 1;
        }
    }
    Ok(merged)
}

/// Season stat lines. Entries pointing at a synthetic pool (tid < 0) have no
/// valid team reference and are not archived; the player identity and
/// ratings still carry those players.
pub fn merge_player_stats(
    conn: &Connection,
    players: &[PlayerExport],
    current_season: i64,
) -> Result<usize, ImportError> {
    let mut merged = 0;
    for p in players {
        let Some(pid) = p.pid else { continue };
        for s in &p.stats {
            let Some(tid) = s.tid else { continue };
            if tid < 0 {
                continue;
            }

            let blob = serde_json::to_string(s)?;
            let values: &[&dyn ToSql] = &[
                &pid, &s.season, &s.playoffs, &tid, &s.gp, &s.gs, &s.min, &s.pts, &s.orb,
                &s.drb, &s.ast, &s.tov, &s.stl, &s.blk, &blob,
            ];
            PLAYER_STATS.upsert(conn, s.season == current_season, values)?;
            merged += 1;
        }
    }
    Ok(merged)
}

/// Awards are never re-issued for a (player, season, type), so latest-wins
/// on the detail payload is safe.
pub fn merge_player_awards(
    conn: &Connection,
    players: &[PlayerExport],
) -> Result<usize, ImportError> {
    let mut merged = 0;
    for p in players {
        let Some(pid) = p.pid else { continue };
        for a in &p.awards {
            let (Some(season), Some(kind)) = (a.season, a.kind.as_deref()) else {
                continue;
            };

            let details = serde_json::to_string(a)?;
            conn.execute(
                r#"INSERT INTO player_awards (pid, season, type, details)
                   VALUES (?, ?, ?, ?)
                   ON CONFLICT(pid, season, type) DO UPDATE SET
                       details = excluded.details"#,
                params![pid, season, kind, details],
            )?;
            merged += 1;
        }
    }
    Ok(merged)
}
