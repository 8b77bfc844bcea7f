//! Schedule replacement
//!
//! The schedule is a projection of games still to be played, not a record
//! of anything; the season's snapshot is replaced wholesale so postponed or
//! already-played entries never linger.

use rusqlite::{params, Connection};

use super::ImportError;
use crate::export::ScheduleEntry;

pub fn replace_schedule(
    conn: &Connection,
    season: i64,
    entries: &[ScheduleEntry],
) -> Result<usize, ImportError> {
    conn.execute("DELETE FROM schedule WHERE season = ?", params![season])?;

    let mut inserted = 0;
    for g in entries {
        let (Some(home_tid), Some(away_tid)) = (g.home_tid, g.away_tid) else {
            continue;
        };

        // gid is globally keyed; a gid migrating across seasons follows the
        // incoming export
        conn.execute(
            r#"INSERT INTO schedule (gid, season, day, home_tid, away_tid)
               VALUES (?, ?, ?, ?, ?)
               ON CONFLICT(gid) DO UPDATE SET
                   season = excluded.season,
                   day = excluded.day,
                   home_tid = excluded.home_tid,
                   away_tid = excluded.away_tid"#,
            params![g.gid, season, g.day, home_tid, away_tid],
        )?;
        inserted += 1;
    }
    Ok(inserted)
}
