//! Archive merge policy for season-scoped tables
//!
//! One rule, four tables: a row whose season equals the import's current
//! season is fully rewritable, any other season is first-write-wins. Exports
//! only carry trustworthy numbers for the season in progress; once a season
//! closes, its rows must not drift under later re-imports.

use rusqlite::{Connection, ToSql};

use super::ImportError;

/// Key/data column layout of one season-scoped table
pub struct SeasonTable {
    pub table: &'static str,
    /// Key columns, season included; these decide which row a record hits
    pub key_cols: &'static [&'static str],
    /// Everything rewritten on a current-season upsert
    pub data_cols: &'static [&'static str],
}

impl SeasonTable {
    fn sql(&self, current_season: bool) -> String {
        let cols: Vec<&str> = self
            .key_cols
            .iter()
            .chain(self.data_cols.iter())
            .copied()
            .collect();
        let placeholders = vec!["?"; cols.len()].join(", ");

        let conflict = if current_season {
            let updates: Vec<String> = self
                .data_cols
                .iter()
                .map(|c| format!("{} = excluded.{}", c, c))
                .collect();
            format!(
                "ON CONFLICT({}) DO UPDATE SET {}",
                self.key_cols.join(", "),
                updates.join(", ")
            )
        } else {
            format!("ON CONFLICT({}) DO NOTHING", self.key_cols.join(", "))
        };

        format!(
            "INSERT INTO {} ({}) VALUES ({}) {}",
            self.table,
            cols.join(", "),
            placeholders,
            conflict
        )
    }

    /// Upsert one row. `values` must line up with key_cols then data_cols.
    pub fn upsert(
        &self,
        conn: &Connection,
        current_season: bool,
        values: &[&dyn ToSql],
    ) -> Result<(), ImportError> {
        debug_assert_eq!(values.len(), self.key_cols.len() + self.data_cols.len());
        conn.execute(&self.sql(current_season), values)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const T: SeasonTable = SeasonTable {
        table: "t",
        key_cols: &["tid", "season"],
        data_cols: &["won", "lost"],
    };

    #[test]
    fn test_current_season_sql_rewrites_data_columns() {
        assert_eq!(
            T.sql(true),
            "INSERT INTO t (tid, season, won, lost) VALUES (?, ?, ?, ?) \
             ON CONFLICT(tid, season) DO UPDATE SET won = excluded.won, lost = excluded.lost"
        );
    }

    #[test]
    fn test_past_season_sql_is_insert_only() {
        assert_eq!(
            T.sql(false),
            "INSERT INTO t (tid, season, won, lost) VALUES (?, ?, ?, ?) \
             ON CONFLICT(tid, season) DO NOTHING"
        );
    }
}
