//! SQLite schema definition
//!
//! Archive layout:
//! - snapshots: one row per imported export, exactly one marked active
//! - identity tables (teams, players) are latest-wins
//! - season-scoped tables (team_seasons, team_stats, player_ratings,
//!   player_stats) are archive tables: past seasons never change
//! - games and box-score tables are insert-only; gid reuse with different
//!   content lands in gid_conflicts for review

pub const SCHEMA: &str = r#"
PRAGMA foreign_keys = ON;

-- ============================================
-- SNAPSHOTS (import provenance)
-- ============================================

CREATE TABLE IF NOT EXISTS snapshots (
    id INTEGER PRIMARY KEY,
    created_at DATETIME NOT NULL DEFAULT CURRENT_TIMESTAMP,
    season INTEGER,
    file_name TEXT,
    sha256 TEXT NOT NULL UNIQUE,
    storage_key TEXT NOT NULL,
    is_active BOOLEAN NOT NULL DEFAULT FALSE
);

CREATE INDEX IF NOT EXISTS idx_snapshots_created ON snapshots(created_at);
CREATE INDEX IF NOT EXISTS idx_snapshots_season ON snapshots(season);
CREATE INDEX IF NOT EXISTS idx_snapshots_active ON snapshots(is_active);

-- One meta row per snapshot; attrs keeps the full gameAttributes blob
CREATE TABLE IF NOT EXISTS league_meta (
    snapshot_id INTEGER PRIMARY KEY,
    season INTEGER NOT NULL,
    phase INTEGER NOT NULL,
    starting_season INTEGER,
    attrs TEXT NOT NULL,
    FOREIGN KEY(snapshot_id) REFERENCES snapshots(id) ON DELETE CASCADE
);

-- ============================================
-- TAXONOMY
-- ============================================

CREATE TABLE IF NOT EXISTS conferences (
    cid INTEGER PRIMARY KEY,
    name TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS divisions (
    did INTEGER PRIMARY KEY,
    cid INTEGER NOT NULL,
    name TEXT NOT NULL,
    FOREIGN KEY(cid) REFERENCES conferences(cid)
);

CREATE INDEX IF NOT EXISTS idx_divisions_cid ON divisions(cid);

-- ============================================
-- TEAMS
-- ============================================

-- Team identity; negative tids are the synthetic pools
-- (-1 transfers, -2 prospects, -3 graduated), stored disabled
CREATE TABLE IF NOT EXISTS teams (
    tid INTEGER PRIMARY KEY,
    cid INTEGER NOT NULL,
    did INTEGER NOT NULL,
    region TEXT NOT NULL,
    name TEXT NOT NULL,
    abbrev TEXT NOT NULL,
    img_url TEXT,
    colors TEXT,
    jersey TEXT,
    disabled BOOLEAN NOT NULL DEFAULT FALSE,
    updated_at DATETIME NOT NULL DEFAULT CURRENT_TIMESTAMP
);

CREATE INDEX IF NOT EXISTS idx_teams_abbrev ON teams(abbrev);
CREATE INDEX IF NOT EXISTS idx_teams_cid ON teams(cid);
CREATE INDEX IF NOT EXISTS idx_teams_did ON teams(did);

CREATE TABLE IF NOT EXISTS team_seasons (
    tid INTEGER NOT NULL,
    season INTEGER NOT NULL,
    won INTEGER NOT NULL DEFAULT 0,
    lost INTEGER NOT NULL DEFAULT 0,
    won_conf INTEGER,
    lost_conf INTEGER,
    won_div INTEGER,
    lost_div INTEGER,
    streak INTEGER,
    hype REAL,
    rid INTEGER,
    PRIMARY KEY (tid, season),
    FOREIGN KEY(tid) REFERENCES teams(tid) ON DELETE CASCADE
);

CREATE INDEX IF NOT EXISTS idx_team_seasons_season ON team_seasons(season);

CREATE TABLE IF NOT EXISTS team_stats (
    tid INTEGER NOT NULL,
    season INTEGER NOT NULL,
    playoffs BOOLEAN NOT NULL DEFAULT FALSE,
    gp INTEGER NOT NULL DEFAULT 0,
    min REAL,
    fg INTEGER,
    fga INTEGER,
    tp INTEGER,
    tpa INTEGER,
    ft INTEGER,
    fta INTEGER,
    orb INTEGER,
    drb INTEGER,
    ast INTEGER,
    tov INTEGER,
    stl INTEGER,
    blk INTEGER,
    pf INTEGER,
    pts INTEGER,
    opp_pts INTEGER,
    PRIMARY KEY (tid, season, playoffs),
    FOREIGN KEY(tid) REFERENCES teams(tid) ON DELETE CASCADE
);

CREATE INDEX IF NOT EXISTS idx_team_stats_season ON team_stats(season, playoffs);

-- ============================================
-- PLAYERS
-- ============================================

CREATE TABLE IF NOT EXISTS players (
    pid INTEGER PRIMARY KEY,
    first_name TEXT NOT NULL,
    last_name TEXT NOT NULL,
    born_year INTEGER,
    born_loc TEXT,
    hgt_in INTEGER,
    weight_lbs INTEGER,
    img_url TEXT,
    injury TEXT,
    class_year INTEGER,
    class_year_label TEXT,
    college TEXT,
    face TEXT,
    current_tid INTEGER,
    updated_at DATETIME NOT NULL DEFAULT CURRENT_TIMESTAMP
);

CREATE INDEX IF NOT EXISTS idx_players_last_name ON players(last_name);
CREATE INDEX IF NOT EXISTS idx_players_class_year ON players(class_year);

CREATE TABLE IF NOT EXISTS player_ratings (
    pid INTEGER NOT NULL,
    season INTEGER NOT NULL,
    pos TEXT,
    ovr INTEGER,
    pot INTEGER,
    skills TEXT,
    ratings TEXT NOT NULL,
    PRIMARY KEY (pid, season),
    FOREIGN KEY(pid) REFERENCES players(pid) ON DELETE CASCADE
);

CREATE INDEX IF NOT EXISTS idx_player_ratings_season ON player_ratings(season);
CREATE INDEX IF NOT EXISTS idx_player_ratings_ovr ON player_ratings(ovr);

-- Requires a real team row; pool entries (tid < 0) are not archived here
CREATE TABLE IF NOT EXISTS player_stats (
    pid INTEGER NOT NULL,
    season INTEGER NOT NULL,
    playoffs BOOLEAN NOT NULL DEFAULT FALSE,
    tid INTEGER NOT NULL,
    gp INTEGER,
    gs INTEGER,
    min REAL,
    pts INTEGER,
    orb INTEGER,
    drb INTEGER,
    ast INTEGER,
    tov INTEGER,
    stl INTEGER,
    blk INTEGER,
    stats TEXT NOT NULL,
    PRIMARY KEY (pid, season, playoffs),
    FOREIGN KEY(pid) REFERENCES players(pid) ON DELETE CASCADE,
    FOREIGN KEY(tid) REFERENCES teams(tid)
);

CREATE INDEX IF NOT EXISTS idx_player_stats_season ON player_stats(season, playoffs);
CREATE INDEX IF NOT EXISTS idx_player_stats_tid ON player_stats(tid, season, playoffs);

CREATE TABLE IF NOT EXISTS player_awards (
    pid INTEGER NOT NULL,
    season INTEGER NOT NULL,
    type TEXT NOT NULL,
    details TEXT,
    PRIMARY KEY (pid, season, type),
    FOREIGN KEY(pid) REFERENCES players(pid) ON DELETE CASCADE
);

CREATE INDEX IF NOT EXISTS idx_player_awards_season ON player_awards(season);

-- ============================================
-- SCHEDULE (forward projection, replaced wholesale)
-- ============================================

CREATE TABLE IF NOT EXISTS schedule (
    gid INTEGER PRIMARY KEY,
    season INTEGER NOT NULL,
    day INTEGER NOT NULL,
    home_tid INTEGER NOT NULL,
    away_tid INTEGER NOT NULL,
    FOREIGN KEY(home_tid) REFERENCES teams(tid),
    FOREIGN KEY(away_tid) REFERENCES teams(tid)
);

CREATE INDEX IF NOT EXISTS idx_schedule_season_day ON schedule(season, day);

-- ============================================
-- GAME ARCHIVE (insert-only)
-- ============================================

CREATE TABLE IF NOT EXISTS games (
    gid INTEGER PRIMARY KEY,
    season INTEGER NOT NULL,
    day INTEGER NOT NULL,
    home_tid INTEGER NOT NULL,
    away_tid INTEGER NOT NULL,
    home_pts INTEGER NOT NULL,
    away_pts INTEGER NOT NULL,
    num_periods INTEGER,
    overtimes INTEGER,
    FOREIGN KEY(home_tid) REFERENCES teams(tid),
    FOREIGN KEY(away_tid) REFERENCES teams(tid)
);

CREATE INDEX IF NOT EXISTS idx_games_season_day ON games(season, day);
CREATE INDEX IF NOT EXISTS idx_games_home ON games(home_tid);
CREATE INDEX IF NOT EXISTS idx_games_away ON games(away_tid);

CREATE TABLE IF NOT EXISTS game_team_totals (
    gid INTEGER NOT NULL,
    tid INTEGER NOT NULL,
    is_home BOOLEAN NOT NULL,
    totals TEXT NOT NULL,
    PRIMARY KEY (gid, tid),
    FOREIGN KEY(gid) REFERENCES games(gid) ON DELETE CASCADE,
    FOREIGN KEY(tid) REFERENCES teams(tid)
);

CREATE TABLE IF NOT EXISTS game_player_lines (
    gid INTEGER NOT NULL,
    tid INTEGER NOT NULL,
    pid INTEGER NOT NULL,
    is_home BOOLEAN NOT NULL,
    gs INTEGER,
    min REAL,
    pts INTEGER,
    orb INTEGER,
    drb INTEGER,
    ast INTEGER,
    line TEXT NOT NULL,
    PRIMARY KEY (gid, pid),
    FOREIGN KEY(gid) REFERENCES games(gid) ON DELETE CASCADE,
    FOREIGN KEY(tid) REFERENCES teams(tid)
);

CREATE INDEX IF NOT EXISTS idx_game_player_lines_tid ON game_player_lines(tid);
CREATE INDEX IF NOT EXISTS idx_game_player_lines_pid ON game_player_lines(pid);

-- ============================================
-- QUARANTINE
-- ============================================

-- Reused gids pointing at a different game; append-only, reviewed by hand
CREATE TABLE IF NOT EXISTS gid_conflicts (
    id INTEGER PRIMARY KEY,
    created_at DATETIME NOT NULL DEFAULT CURRENT_TIMESTAMP,
    gid INTEGER NOT NULL,
    existing_season INTEGER,
    existing_home_tid INTEGER,
    existing_away_tid INTEGER,
    incoming_season INTEGER,
    incoming_home_tid INTEGER,
    incoming_away_tid INTEGER,
    existing_game TEXT NOT NULL,
    incoming_game TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_gid_conflicts_gid ON gid_conflicts(gid);
CREATE INDEX IF NOT EXISTS idx_gid_conflicts_created ON gid_conflicts(created_at);
"#;
