//! Archive storage with SQLite
//!
//! The store owns the connection; the import engine borrows it for one
//! transaction per import. Everything here outside of `transaction` is the
//! read side used by the CLI.

mod schema;

use anyhow::Result;
use rusqlite::{Connection, Transaction};
use std::path::Path;

pub use schema::SCHEMA;

pub struct ArchiveStore {
    conn: Connection,
}

impl ArchiveStore {
    pub fn open(path: &Path) -> Result<Self> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let conn = Connection::open(path)?;
        let store = Self { conn };
        store.init_schema()?;
        Ok(store)
    }

    /// In-memory store, used by tests
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let store = Self { conn };
        store.init_schema()?;
        Ok(store)
    }

    fn init_schema(&self) -> Result<()> {
        self.conn.execute_batch(SCHEMA)?;
        Ok(())
    }

    /// Begin the unit of work for one import
    pub fn transaction(&mut self) -> Result<Transaction<'_>> {
        Ok(self.conn.transaction()?)
    }

    // ============================================
    // QUERIES
    // ============================================

    /// League meta of the active snapshot, if any import has committed yet
    pub fn active_meta(&self) -> Result<Option<ActiveMeta>> {
        let row = self.conn.query_row(
            r#"SELECT lm.snapshot_id, lm.season, lm.phase, lm.starting_season, s.sha256, s.created_at
               FROM league_meta lm
               JOIN snapshots s ON s.id = lm.snapshot_id
               WHERE s.is_active = TRUE
               LIMIT 1"#,
            [],
            |row| {
                Ok(ActiveMeta {
                    snapshot_id: row.get(0)?,
                    season: row.get(1)?,
                    phase: row.get(2)?,
                    starting_season: row.get(3)?,
                    sha256: row.get(4)?,
                    imported_at: row.get(5)?,
                })
            },
        );

        match row {
            Ok(meta) => Ok(Some(meta)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    pub fn list_snapshots(&self) -> Result<Vec<SnapshotRow>> {
        let mut stmt = self.conn.prepare(
            r#"SELECT id, created_at, season, file_name, sha256, storage_key, is_active
               FROM snapshots
               ORDER BY created_at DESC, id DESC"#,
        )?;

        let rows = stmt.query_map([], |row| {
            Ok(SnapshotRow {
                id: row.get(0)?,
                created_at: row.get(1)?,
                season: row.get(2)?,
                file_name: row.get(3)?,
                sha256: row.get(4)?,
                storage_key: row.get(5)?,
                is_active: row.get(6)?,
            })
        })?;

        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }

    pub fn list_conflicts(&self) -> Result<Vec<ConflictRow>> {
        let mut stmt = self.conn.prepare(
            r#"SELECT id, created_at, gid,
                      existing_season, existing_home_tid, existing_away_tid,
                      incoming_season, incoming_home_tid, incoming_away_tid
               FROM gid_conflicts
               ORDER BY created_at DESC, id DESC"#,
        )?;

        let rows = stmt.query_map([], |row| {
            Ok(ConflictRow {
                id: row.get(0)?,
                created_at: row.get(1)?,
                gid: row.get(2)?,
                existing_season: row.get(3)?,
                existing_home_tid: row.get(4)?,
                existing_away_tid: row.get(5)?,
                incoming_season: row.get(6)?,
                incoming_home_tid: row.get(7)?,
                incoming_away_tid: row.get(8)?,
            })
        })?;

        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }

    /// Row counts per archive table, for the status command
    pub fn table_counts(&self) -> Result<Vec<(&'static str, i64)>> {
        const TABLES: &[&str] = &[
            "snapshots",
            "teams",
            "team_seasons",
            "team_stats",
            "players",
            "player_ratings",
            "player_stats",
            "player_awards",
            "schedule",
            "games",
            "game_team_totals",
            "game_player_lines",
            "gid_conflicts",
        ];

        let mut counts = Vec::with_capacity(TABLES.len());
        for table in TABLES {
            let count: i64 = self.conn.query_row(
                &format!("SELECT COUNT(*) FROM {}", table),
                [],
                |row| row.get(0),
            )?;
            counts.push((*table, count));
        }
        Ok(counts)
    }

    #[cfg(test)]
    pub fn conn(&self) -> &Connection {
        &self.conn
    }
}

// ============================================
// ROW TYPES
// ============================================

#[derive(Debug)]
pub struct ActiveMeta {
    pub snapshot_id: i64,
    pub season: i64,
    pub phase: i64,
    pub starting_season: Option<i64>,
    pub sha256: String,
    pub imported_at: String,
}

#[derive(Debug)]
pub struct SnapshotRow {
    pub id: i64,
    pub created_at: String,
    pub season: Option<i64>,
    pub file_name: Option<String>,
    pub sha256: String,
    pub storage_key: String,
    pub is_active: bool,
}

#[derive(Debug)]
pub struct ConflictRow {
    pub id: i64,
    pub created_at: String,
    pub gid: i64,
    pub existing_season: Option<i64>,
    pub existing_home_tid: Option<i64>,
    pub existing_away_tid: Option<i64>,
    pub incoming_season: Option<i64>,
    pub incoming_home_tid: Option<i64>,
    pub incoming_away_tid: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_creates_parent_dirs_and_schema() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("archive.db");

        let store = ArchiveStore::open(&path).unwrap();
        assert!(path.exists());
        assert!(store.active_meta().unwrap().is_none());

        // Every archive table exists and starts empty
        for (_, rows) in store.table_counts().unwrap() {
            assert_eq!(rows, 0);
        }
    }

    #[test]
    fn test_reopen_preserves_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("archive.db");

        {
            let store = ArchiveStore::open(&path).unwrap();
            store
                .conn()
                .execute(
                    "INSERT INTO conferences (cid, name) VALUES (1, 'Midwest')",
                    [],
                )
                .unwrap();
        }

        // Re-applying the schema on open must not clobber existing data
        let store = ArchiveStore::open(&path).unwrap();
        let rows: i64 = store
            .conn()
            .query_row("SELECT COUNT(*) FROM conferences", [], |r| r.get(0))
            .unwrap();
        assert_eq!(rows, 1);
    }
}
