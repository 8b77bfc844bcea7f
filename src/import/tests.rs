//! Import engine tests against an in-memory archive

use serde_json::{json, Value};

use super::run_import;
use crate::export::LoadedExport;
use crate::store::ArchiveStore;

fn export_from(value: &Value) -> LoadedExport {
    LoadedExport::from_bytes("test.json", serde_json::to_vec(value).unwrap()).unwrap()
}

fn base_export(season: i64) -> Value {
    json!({
        "gameAttributes": {
            "season": season,
            "phase": 1,
            "startingSeason": 2020,
            "confs": [{"cid": 0, "name": "Midwest"}],
            "divs": [{"did": 0, "cid": 0, "name": "Plains"}]
        },
        "teams": [
            {"tid": 3, "cid": 0, "did": 0, "region": "Kansas", "name": "Jayhawks", "abbrev": "KU"},
            {"tid": 9, "cid": 0, "did": 0, "region": "Gonzaga", "name": "Bulldogs", "abbrev": "GON"}
        ],
        "players": [],
        "schedule": [],
        "games": []
    })
}

fn count(store: &ArchiveStore, sql: &str) -> i64 {
    store.conn().query_row(sql, [], |r| r.get(0)).unwrap()
}

#[test]
fn test_minimal_import_activates_snapshot() {
    let mut store = ArchiveStore::open_in_memory().unwrap();
    let export = export_from(&base_export(2027));

    let summary = run_import(&mut store, &export, "key-1").unwrap();
    assert_eq!(summary.season, 2027);
    assert_eq!(summary.teams, 2);
    assert_eq!(summary.conferences, 1);
    assert_eq!(summary.divisions, 1);

    let meta = store.active_meta().unwrap().unwrap();
    assert_eq!(meta.snapshot_id, summary.snapshot_id);
    assert_eq!(meta.season, 2027);
    assert_eq!(meta.starting_season, Some(2020));

    // Pool buckets exist as plain disabled team rows
    assert_eq!(
        count(&store, "SELECT COUNT(*) FROM teams WHERE tid < 0 AND disabled"),
        3
    );
}

#[test]
fn test_reimport_is_idempotent() {
    let mut store = ArchiveStore::open_in_memory().unwrap();
    let mut value = base_export(2027);
    value["teams"][0]["seasons"] = json!([{"season": 2027, "won": 10, "lost": 2}]);
    value["games"] = json!([{
        "gid": 500, "season": 2027, "day": 40,
        "teams": [
            {"tid": 3, "pts": 80, "players": [{"pid": 1, "gs": 1, "min": 31.5, "pts": 22}]},
            {"tid": 9, "pts": 70, "players": []}
        ]
    }]);

    let export = export_from(&value);
    let first = run_import(&mut store, &export, "key-1").unwrap();
    let second = run_import(&mut store, &export, "key-1").unwrap();

    // Same snapshot row, same active pointer, no duplicated archive rows
    assert_eq!(first.snapshot_id, second.snapshot_id);
    assert_eq!(count(&store, "SELECT COUNT(*) FROM snapshots"), 1);
    assert_eq!(count(&store, "SELECT COUNT(*) FROM games"), 1);
    assert_eq!(count(&store, "SELECT COUNT(*) FROM game_player_lines"), 1);
    assert_eq!(count(&store, "SELECT COUNT(*) FROM team_seasons"), 1);
    assert_eq!(count(&store, "SELECT COUNT(*) FROM gid_conflicts"), 0);
    assert_eq!(second.games_skipped, 1);
    assert_eq!(second.games_archived, 0);
}

#[test]
fn test_past_season_rows_never_change() {
    let mut store = ArchiveStore::open_in_memory().unwrap();

    let mut value = base_export(2027);
    value["teams"][0]["seasons"] = json!([
        {"season": 2026, "won": 20, "lost": 11},
        {"season": 2027, "won": 5, "lost": 1}
    ]);
    run_import(&mut store, &export_from(&value), "key-1").unwrap();

    // A later export re-states the closed 2026 season differently and
    // updates the 2027 season in progress
    value["teams"][0]["seasons"] = json!([
        {"season": 2026, "won": 99, "lost": 0},
        {"season": 2027, "won": 8, "lost": 2}
    ]);
    run_import(&mut store, &export_from(&value), "key-2").unwrap();

    let won_2026: i64 = store
        .conn()
        .query_row(
            "SELECT won FROM team_seasons WHERE tid = 3 AND season = 2026",
            [],
            |r| r.get(0),
        )
        .unwrap();
    let won_2027: i64 = store
        .conn()
        .query_row(
            "SELECT won FROM team_seasons WHERE tid = 3 AND season = 2027",
            [],
            |r| r.get(0),
        )
        .unwrap();

    assert_eq!(won_2026, 20, "closed season must keep its first value");
    assert_eq!(won_2027, 8, "current season must refresh");
}

#[test]
fn test_current_season_player_stats_refresh() {
    let mut store = ArchiveStore::open_in_memory().unwrap();

    let mut value = base_export(2027);
    value["players"] = json!([{
        "pid": 7, "firstName": "Sam", "lastName": "Reed", "tid": 3,
        "draft": {"year": 2025},
        "ratings": [{"season": 2027, "ovr": 61, "pot": 74}],
        "stats": [{"season": 2027, "playoffs": false, "tid": 3, "gp": 10, "pts": 150}]
    }]);
    run_import(&mut store, &export_from(&value), "key-1").unwrap();

    value["players"][0]["stats"] = json!([
        {"season": 2027, "playoffs": false, "tid": 3, "gp": 14, "pts": 210}
    ]);
    run_import(&mut store, &export_from(&value), "key-2").unwrap();

    let pts: i64 = store
        .conn()
        .query_row(
            "SELECT pts FROM player_stats WHERE pid = 7 AND season = 2027 AND NOT playoffs",
            [],
            |r| r.get(0),
        )
        .unwrap();
    assert_eq!(pts, 210);
    assert_eq!(count(&store, "SELECT COUNT(*) FROM player_stats"), 1);
}

#[test]
fn test_pool_stat_entries_are_not_archived() {
    let mut store = ArchiveStore::open_in_memory().unwrap();

    let mut value = base_export(2027);
    value["players"] = json!([{
        "pid": 7, "firstName": "Sam", "lastName": "Reed", "tid": -1,
        "stats": [
            {"season": 2026, "playoffs": false, "tid": 3, "gp": 22, "pts": 300},
            {"season": 2027, "playoffs": false, "tid": -1, "gp": 0}
        ]
    }]);
    let summary = run_import(&mut store, &export_from(&value), "key-1").unwrap();

    assert_eq!(summary.player_stats, 1);
    assert_eq!(
        count(&store, "SELECT COUNT(*) FROM player_stats WHERE tid < 0"),
        0
    );
    // The player identity itself still lands
    assert_eq!(count(&store, "SELECT COUNT(*) FROM players"), 1);
}

#[test]
fn test_class_label_written_on_import() {
    let mut store = ArchiveStore::open_in_memory().unwrap();

    let mut value = base_export(2027);
    value["players"] = json!([
        {
            "pid": 1, "firstName": "No", "lastName": "Redshirt", "tid": 3,
            "draft": {"year": 2024},
            "stats": [{"season": 2025, "playoffs": false, "tid": 3, "gp": 20}]
        },
        {
            "pid": 2, "firstName": "Red", "lastName": "Shirt", "tid": 3,
            "draft": {"year": 2024},
            "stats": [{"season": 2026, "playoffs": false, "tid": 3, "gp": 20}]
        }
    ]);
    run_import(&mut store, &export_from(&value), "key-1").unwrap();

    let label = |pid: i64| -> String {
        store
            .conn()
            .query_row(
                "SELECT class_year_label FROM players WHERE pid = ?",
                [pid],
                |r| r.get(0),
            )
            .unwrap()
    };
    assert_eq!(label(1), "JR");
    assert_eq!(label(2), "RS SO");
}

#[test]
fn test_matching_gid_reimport_keeps_archived_scores() {
    let mut store = ArchiveStore::open_in_memory().unwrap();

    let mut value = base_export(2027);
    value["games"] = json!([{
        "gid": 500, "season": 2027, "day": 12,
        "teams": [{"tid": 3, "pts": 80, "players": []}, {"tid": 9, "pts": 70, "players": []}]
    }]);
    run_import(&mut store, &export_from(&value), "key-1").unwrap();

    // Same game identity, different score: idempotent skip, no quarantine
    value["games"][0]["teams"][0]["pts"] = json!(85);
    let summary = run_import(&mut store, &export_from(&value), "key-2").unwrap();

    assert_eq!(summary.games_skipped, 1);
    assert_eq!(summary.conflicts, 0);
    let home_pts: i64 = store
        .conn()
        .query_row("SELECT home_pts FROM games WHERE gid = 500", [], |r| {
            r.get(0)
        })
        .unwrap();
    assert_eq!(home_pts, 80);
    assert_eq!(count(&store, "SELECT COUNT(*) FROM gid_conflicts"), 0);
}

#[test]
fn test_divergent_gid_is_quarantined() {
    let mut store = ArchiveStore::open_in_memory().unwrap();

    let mut value = base_export(2027);
    value["games"] = json!([{
        "gid": 500, "season": 2027, "day": 12,
        "teams": [{"tid": 3, "pts": 80, "players": []}, {"tid": 9, "pts": 70, "players": []}]
    }]);
    run_import(&mut store, &export_from(&value), "key-1").unwrap();

    // Same gid, different season and teams
    value["games"] = json!([{
        "gid": 500, "season": 2026, "day": 3,
        "teams": [{"tid": 9, "pts": 60, "players": []}, {"tid": 3, "pts": 55, "players": []}]
    }]);
    let summary = run_import(&mut store, &export_from(&value), "key-2").unwrap();

    assert_eq!(summary.conflicts, 1);
    assert_eq!(summary.games_archived, 0);
    assert_eq!(count(&store, "SELECT COUNT(*) FROM gid_conflicts"), 1);

    // Original archived game untouched
    let (season, home_tid, home_pts): (i64, i64, i64) = store
        .conn()
        .query_row(
            "SELECT season, home_tid, home_pts FROM games WHERE gid = 500",
            [],
            |r| Ok((r.get(0)?, r.get(1)?, r.get(2)?)),
        )
        .unwrap();
    assert_eq!((season, home_tid, home_pts), (2027, 3, 80));

    // Both representations captured for review
    let (ex_season, in_season): (i64, i64) = store
        .conn()
        .query_row(
            "SELECT existing_season, incoming_season FROM gid_conflicts WHERE gid = 500",
            [],
            |r| Ok((r.get(0)?, r.get(1)?)),
        )
        .unwrap();
    assert_eq!((ex_season, in_season), (2027, 2026));
}

#[test]
fn test_score_recovered_from_win_loss_summary() {
    let mut store = ArchiveStore::open_in_memory().unwrap();

    let mut value = base_export(2027);
    value["games"] = json!([{
        "gid": 42, "season": 2027, "day": 5,
        "teams": [{"tid": 3, "players": []}, {"tid": 9, "players": []}],
        "won": {"tid": 9, "pts": 77},
        "lost": {"tid": 3, "pts": 71}
    }]);
    run_import(&mut store, &export_from(&value), "key-1").unwrap();

    let (home_pts, away_pts): (i64, i64) = store
        .conn()
        .query_row(
            "SELECT home_pts, away_pts FROM games WHERE gid = 42",
            [],
            |r| Ok((r.get(0)?, r.get(1)?)),
        )
        .unwrap();
    assert_eq!((home_pts, away_pts), (71, 77));
}

#[test]
fn test_activation_is_exclusive() {
    let mut store = ArchiveStore::open_in_memory().unwrap();

    let a = run_import(&mut store, &export_from(&base_export(2027)), "key-a").unwrap();
    let b = run_import(&mut store, &export_from(&base_export(2028)), "key-b").unwrap();
    assert_ne!(a.snapshot_id, b.snapshot_id);

    assert_eq!(
        count(&store, "SELECT COUNT(*) FROM snapshots WHERE is_active"),
        1
    );
    let active: i64 = store
        .conn()
        .query_row("SELECT id FROM snapshots WHERE is_active", [], |r| r.get(0))
        .unwrap();
    assert_eq!(active, b.snapshot_id);
}

#[test]
fn test_schedule_is_replaced_wholesale() {
    let mut store = ArchiveStore::open_in_memory().unwrap();

    let mut value = base_export(2027);
    value["schedule"] = json!([
        {"gid": 900, "day": 10, "homeTid": 3, "awayTid": 9},
        {"gid": 901, "day": 11, "homeTid": 9, "awayTid": 3}
    ]);
    run_import(&mut store, &export_from(&value), "key-1").unwrap();

    // Next export: 900 has been played and is gone, 902 got scheduled
    value["schedule"] = json!([
        {"gid": 901, "day": 11, "homeTid": 9, "awayTid": 3},
        {"gid": 902, "day": 14, "homeTid": 3, "awayTid": 9}
    ]);
    run_import(&mut store, &export_from(&value), "key-2").unwrap();

    assert_eq!(count(&store, "SELECT COUNT(*) FROM schedule"), 2);
    assert_eq!(
        count(&store, "SELECT COUNT(*) FROM schedule WHERE gid = 900"),
        0
    );
}

#[test]
fn test_player_missing_pid_rolls_back_everything() {
    let mut store = ArchiveStore::open_in_memory().unwrap();

    let mut value = base_export(2027);
    value["players"] = json!([{"firstName": "Ghost", "lastName": "Entry", "tid": 3}]);
    let err = run_import(&mut store, &export_from(&value), "key-1").unwrap_err();
    assert!(err.to_string().contains("Failed to merge players"));

    // Nothing from the aborted import is visible, pool teams included
    assert_eq!(count(&store, "SELECT COUNT(*) FROM snapshots"), 0);
    assert_eq!(count(&store, "SELECT COUNT(*) FROM teams"), 0);
    assert!(store.active_meta().unwrap().is_none());
}

#[test]
fn test_constraint_violation_rolls_back_everything() {
    let mut store = ArchiveStore::open_in_memory().unwrap();

    // Stat row pointing at a team that does not exist anywhere in the
    // export; the player_stats foreign key rejects it mid-import
    let mut value = base_export(2027);
    value["players"] = json!([{
        "pid": 7, "firstName": "Sam", "lastName": "Reed", "tid": 3,
        "stats": [{"season": 2027, "playoffs": false, "tid": 999, "gp": 4}]
    }]);
    let err = run_import(&mut store, &export_from(&value), "key-1").unwrap_err();
    assert!(err.to_string().contains("Failed to merge player stats"));

    // The whole unit of work rolled back, identity rows included
    assert_eq!(count(&store, "SELECT COUNT(*) FROM snapshots"), 0);
    assert_eq!(count(&store, "SELECT COUNT(*) FROM teams"), 0);
    assert_eq!(count(&store, "SELECT COUNT(*) FROM players"), 0);
    assert!(store.active_meta().unwrap().is_none());
}

#[test]
fn test_games_missing_team_data_are_counted_as_dropped() {
    let mut store = ArchiveStore::open_in_memory().unwrap();

    let mut value = base_export(2027);
    value["games"] = json!([
        {"gid": 600, "season": 2027, "day": 1,
         "teams": [{"tid": 3, "pts": 70, "players": []}]},
        {"gid": 601, "season": 2027, "day": 2,
         "teams": [{"pts": 70, "players": []}, {"tid": 9, "pts": 60, "players": []}]}
    ]);
    let summary = run_import(&mut store, &export_from(&value), "key-1").unwrap();

    assert_eq!(summary.games_dropped, 2);
    assert_eq!(summary.games_archived, 0);
    assert_eq!(count(&store, "SELECT COUNT(*) FROM games"), 0);
}

#[test]
fn test_taxonomy_entries_without_keys_are_skipped() {
    let mut store = ArchiveStore::open_in_memory().unwrap();

    let mut value = base_export(2027);
    value["gameAttributes"]["confs"] = json!([{"cid": 0, "name": "Midwest"}, {"name": "Placeholder"}]);
    let summary = run_import(&mut store, &export_from(&value), "key-1").unwrap();

    assert_eq!(summary.conferences, 1);
    assert_eq!(count(&store, "SELECT COUNT(*) FROM conferences"), 1);
}

#[test]
fn test_awards_are_latest_wins() {
    let mut store = ArchiveStore::open_in_memory().unwrap();

    let mut value = base_export(2027);
    value["players"] = json!([{
        "pid": 7, "firstName": "Sam", "lastName": "Reed", "tid": 3,
        "awards": [{"season": 2026, "type": "All-Conference", "team": "first"}]
    }]);
    run_import(&mut store, &export_from(&value), "key-1").unwrap();

    value["players"][0]["awards"] = json!([
        {"season": 2026, "type": "All-Conference", "team": "second"}
    ]);
    run_import(&mut store, &export_from(&value), "key-2").unwrap();

    assert_eq!(count(&store, "SELECT COUNT(*) FROM player_awards"), 1);
    let details: String = store
        .conn()
        .query_row(
            "SELECT details FROM player_awards WHERE pid = 7 AND season = 2026",
            [],
            |r| r.get(0),
        )
        .unwrap();
    assert!(details.contains("second"));
}
