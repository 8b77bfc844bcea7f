//! League export reading
//!
//! Loads an export file from disk, fingerprints the raw bytes, validates the
//! top-level document shape and decodes it into the typed model. Everything
//! here runs before the first database write, so a malformed export can
//! never leave a partial import behind.

mod model;

pub use model::*;

use anyhow::{Context, Result};
use chrono::Utc;
use serde_json::Value;
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};

use crate::import::ImportError;

/// Hex-encoded sha256 of the raw export bytes, used as the snapshot identity
pub fn sha256_hex(bytes: &[u8]) -> String {
    hex::encode(Sha256::digest(bytes))
}

/// A fully loaded export: raw bytes, content fingerprint and typed document
#[derive(Debug)]
pub struct LoadedExport {
    pub path: PathBuf,
    pub file_name: String,
    pub raw: Vec<u8>,
    pub fingerprint: String,
    pub doc: LeagueExport,
}

impl LoadedExport {
    pub fn from_bytes(file_name: &str, raw: Vec<u8>) -> Result<Self, ImportError> {
        let fingerprint = sha256_hex(&raw);
        let doc = parse_export(&raw)?;
        Ok(Self {
            path: PathBuf::from(file_name),
            file_name: file_name.to_string(),
            raw,
            fingerprint,
            doc,
        })
    }
}

pub fn load_export_from_file(path: &Path) -> Result<LoadedExport> {
    let abs = path
        .canonicalize()
        .with_context(|| format!("Failed to resolve export path {}", path.display()))?;
    let raw = std::fs::read(&abs)
        .with_context(|| format!("Failed to read export file {}", abs.display()))?;

    let file_name = abs
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("export.json")
        .to_string();

    let mut loaded = LoadedExport::from_bytes(&file_name, raw)
        .with_context(|| format!("Invalid export file {}", abs.display()))?;
    loaded.path = abs;
    Ok(loaded)
}

/// Validate the top-level shape, then decode the typed model
fn parse_export(raw: &[u8]) -> Result<LeagueExport, ImportError> {
    let value: Value = serde_json::from_slice(raw)?;

    if !value.get("gameAttributes").map_or(false, Value::is_object) {
        return Err(ImportError::MissingCollection("gameAttributes"));
    }
    for key in ["teams", "players", "schedule", "games"] {
        if !value.get(key).map_or(false, Value::is_array) {
            return Err(ImportError::MissingCollection(key));
        }
    }

    Ok(serde_json::from_value(value)?)
}

/// Keep a copy of the raw export next to the database so any snapshot can be
/// re-imported or inspected later. Returns the storage key recorded in the
/// snapshots table.
pub fn persist_raw_export(dir: &Path, raw: &[u8], fingerprint: &str) -> Result<String> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create export storage dir {}", dir.display()))?;

    let stamp = Utc::now().format("%Y-%m-%dT%H-%M-%S");
    let file_name = format!("{}-{}.json", stamp, fingerprint);
    let dest = dir.join(&file_name);
    std::fs::write(&dest, raw)
        .with_context(|| format!("Failed to write export backup {}", dest.display()))?;

    Ok(file_name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn minimal_export() -> Value {
        json!({
            "gameAttributes": {"season": 2027, "phase": 1, "confs": [], "divs": []},
            "teams": [],
            "players": [],
            "schedule": [],
            "games": []
        })
    }

    #[test]
    fn test_parse_minimal_export() {
        let raw = serde_json::to_vec(&minimal_export()).unwrap();
        let loaded = LoadedExport::from_bytes("league.json", raw).unwrap();
        assert_eq!(loaded.doc.game_attributes.season, 2027);
        assert_eq!(loaded.fingerprint.len(), 64);
    }

    #[test]
    fn test_missing_collection_is_rejected() {
        let mut value = minimal_export();
        value.as_object_mut().unwrap().remove("players");
        let raw = serde_json::to_vec(&value).unwrap();

        let err = LoadedExport::from_bytes("league.json", raw).unwrap_err();
        assert!(matches!(err, ImportError::MissingCollection("players")));
    }

    #[test]
    fn test_invalid_json_is_rejected() {
        let err = LoadedExport::from_bytes("league.json", b"not json".to_vec()).unwrap_err();
        assert!(matches!(err, ImportError::Json(_)));
    }

    #[test]
    fn test_unknown_rating_fields_survive() {
        let mut value = minimal_export();
        value["players"] = json!([{
            "pid": 9,
            "firstName": "A",
            "lastName": "B",
            "ratings": [{"season": 2027, "ovr": 55, "stre": 40, "spd": 61}]
        }]);
        let raw = serde_json::to_vec(&value).unwrap();
        let loaded = LoadedExport::from_bytes("league.json", raw).unwrap();

        let rating = &loaded.doc.players[0].ratings[0];
        assert_eq!(rating.extra.get("spd"), Some(&json!(61)));

        // and they come back out when the blob is re-encoded
        let blob = serde_json::to_value(rating).unwrap();
        assert_eq!(blob["stre"], json!(40));
        assert_eq!(blob["ovr"], json!(55));
    }
}
