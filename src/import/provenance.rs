//! Snapshot provenance
//!
//! One row per imported export, keyed by content fingerprint. Re-importing
//! byte-identical content reuses the existing row. Exactly one snapshot is
//! active at a time; activation happens last, inside the same transaction
//! as everything else.

use rusqlite::{params, Connection};

use super::ImportError;

pub fn register_snapshot(
    conn: &Connection,
    fingerprint: &str,
    season: i64,
    file_name: &str,
    storage_key: &str,
) -> Result<i64, ImportError> {
    let id = conn.query_row(
        r#"INSERT INTO snapshots (season, file_name, sha256, storage_key, is_active)
           VALUES (?, ?, ?, ?, FALSE)
           ON CONFLICT(sha256) DO UPDATE SET
               season = excluded.season,
               file_name = excluded.file_name,
               storage_key = excluded.storage_key
           RETURNING id"#,
        params![season, file_name, fingerprint, storage_key],
        |row| row.get(0),
    )?;
    Ok(id)
}

/// Deactivate everything, then activate exactly the given snapshot
pub fn activate(conn: &Connection, snapshot_id: i64) -> Result<(), ImportError> {
    conn.execute(
        "UPDATE snapshots SET is_active = FALSE WHERE is_active = TRUE",
        [],
    )?;
    conn.execute(
        "UPDATE snapshots SET is_active = TRUE WHERE id = ?",
        params![snapshot_id],
    )?;
    Ok(())
}
