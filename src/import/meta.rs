//! League meta and taxonomy merging, always latest-wins

use rusqlite::{params, Connection};

use super::ImportError;
use crate::export::GameAttributes;

/// One meta row per snapshot; the full gameAttributes blob rides along for
/// forward compatibility.
pub fn merge_meta(
    conn: &Connection,
    snapshot_id: i64,
    attrs: &GameAttributes,
) -> Result<(), ImportError> {
    let blob = serde_json::to_string(attrs)?;
    conn.execute(
        r#"INSERT INTO league_meta (snapshot_id, season, phase, starting_season, attrs)
           VALUES (?, ?, ?, ?, ?)
           ON CONFLICT(snapshot_id) DO UPDATE SET
               season = excluded.season,
               phase = excluded.phase,
               starting_season = excluded.starting_season,
               attrs = excluded.attrs"#,
        params![
            snapshot_id,
            attrs.season,
            attrs.phase,
            attrs.starting_season,
            blob
        ],
    )?;
    Ok(())
}

/// Upsert conferences and divisions by their integer keys. Entries without
/// a numeric key are placeholders some exports carry; skipped, not an error.
pub fn merge_taxonomy(
    conn: &Connection,
    attrs: &GameAttributes,
) -> Result<(usize, usize), ImportError> {
    let mut conferences = 0;
    for c in &attrs.confs {
        let Some(cid) = c.cid else { continue };
        let name = c
            .name
            .clone()
            .unwrap_or_else(|| format!("Conference {}", cid));
        conn.execute(
            "INSERT INTO conferences (cid, name) VALUES (?, ?)
             ON CONFLICT(cid) DO UPDATE SET name = excluded.name",
            params![cid, name],
        )?;
        conferences += 1;
    }

    let mut divisions = 0;
    for d in &attrs.divs {
        let Some(did) = d.did else { continue };
        let name = d.name.clone().unwrap_or_else(|| format!("Division {}", did));
        conn.execute(
            "INSERT INTO divisions (did, cid, name) VALUES (?, ?, ?)
             ON CONFLICT(did) DO UPDATE SET
                 cid = excluded.cid,
                 name = excluded.name",
            params![did, d.cid.unwrap_or(0), name],
        )?;
        divisions += 1;
    }

    Ok((conferences, divisions))
}
