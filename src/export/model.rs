//! Typed view of a league export document
//!
//! Exports come out of the simulator as one large JSON document with
//! camelCase keys and plenty of fields we do not interpret. Everything we
//! merge is mapped here once, at the ingestion boundary; season-indexed
//! records that land in a blob column carry a flattened `extra` map so
//! unrecognized fields round-trip verbatim into storage.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Top-level export document
#[derive(Debug, Clone, Deserialize)]
pub struct LeagueExport {
    #[serde(rename = "gameAttributes")]
    pub game_attributes: GameAttributes,
    pub teams: Vec<TeamExport>,
    pub players: Vec<PlayerExport>,
    pub schedule: Vec<ScheduleEntry>,
    pub games: Vec<GameExport>,
}

/// League-wide attributes (season, phase, taxonomy, plus everything else)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameAttributes {
    pub season: i64,
    #[serde(default)]
    pub phase: i64,
    pub starting_season: Option<i64>,
    #[serde(default)]
    pub confs: Vec<ConfExport>,
    #[serde(default)]
    pub divs: Vec<DivExport>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfExport {
    pub cid: Option<i64>,
    pub name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DivExport {
    pub did: Option<i64>,
    pub cid: Option<i64>,
    pub name: Option<String>,
}

// ============================================
// TEAMS
// ============================================

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamExport {
    /// Stable team identifier. Absence aborts the import.
    pub tid: Option<i64>,
    #[serde(default)]
    pub cid: i64,
    #[serde(default)]
    pub did: i64,
    #[serde(default)]
    pub region: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub abbrev: String,
    #[serde(rename = "imgURL")]
    pub img_url: Option<String>,
    pub colors: Option<Value>,
    pub jersey: Option<String>,
    #[serde(default)]
    pub disabled: bool,
    #[serde(default)]
    pub seasons: Vec<TeamSeasonExport>,
    #[serde(default)]
    pub stats: Vec<TeamStatsExport>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamSeasonExport {
    pub tid: Option<i64>,
    pub season: i64,
    #[serde(default)]
    pub won: i64,
    #[serde(default)]
    pub lost: i64,
    pub won_conf: Option<i64>,
    pub lost_conf: Option<i64>,
    pub won_div: Option<i64>,
    pub lost_div: Option<i64>,
    pub streak: Option<i64>,
    pub hype: Option<f64>,
    pub rid: Option<i64>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamStatsExport {
    pub tid: Option<i64>,
    pub season: i64,
    #[serde(default)]
    pub playoffs: bool,
    #[serde(default)]
    pub gp: i64,
    pub min: Option<f64>,
    pub fg: Option<i64>,
    pub fga: Option<i64>,
    pub tp: Option<i64>,
    pub tpa: Option<i64>,
    pub ft: Option<i64>,
    pub fta: Option<i64>,
    pub orb: Option<i64>,
    pub drb: Option<i64>,
    pub ast: Option<i64>,
    pub tov: Option<i64>,
    pub stl: Option<i64>,
    pub blk: Option<i64>,
    pub pf: Option<i64>,
    pub pts: Option<i64>,
    pub opp_pts: Option<i64>,
}

// ============================================
// PLAYERS
// ============================================

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerExport {
    /// Stable player identifier. Absence aborts the import.
    pub pid: Option<i64>,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    pub born: Option<BornExport>,
    pub draft: Option<DraftExport>,
    pub hgt: Option<i64>,
    pub weight: Option<i64>,
    #[serde(rename = "imgURL")]
    pub img_url: Option<String>,
    pub injury: Option<Value>,
    pub college: Option<String>,
    pub face: Option<Value>,
    /// Current status tid from the export
    /// (-3 graduated, -2 prospect/HS, -1 transfer pool, >= 0 active roster)
    pub tid: Option<i64>,
    #[serde(default)]
    pub ratings: Vec<PlayerRatingExport>,
    #[serde(default)]
    pub stats: Vec<PlayerStatsExport>,
    #[serde(default)]
    pub awards: Vec<AwardExport>,
}

impl PlayerExport {
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }

    pub fn draft_year(&self) -> Option<i64> {
        self.draft.as_ref().and_then(|d| d.year)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct BornExport {
    pub year: Option<i64>,
    pub loc: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DraftExport {
    pub year: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerRatingExport {
    pub season: i64,
    pub pos: Option<String>,
    pub ovr: Option<i64>,
    pub pot: Option<i64>,
    pub skills: Option<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerStatsExport {
    pub season: i64,
    #[serde(default)]
    pub playoffs: bool,
    pub tid: Option<i64>,
    pub gp: Option<i64>,
    pub gs: Option<i64>,
    pub min: Option<f64>,
    pub pts: Option<i64>,
    pub orb: Option<i64>,
    pub drb: Option<i64>,
    pub ast: Option<i64>,
    pub tov: Option<i64>,
    pub stl: Option<i64>,
    pub blk: Option<i64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AwardExport {
    pub season: Option<i64>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

// ============================================
// SCHEDULE & GAMES
// ============================================

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleEntry {
    pub gid: i64,
    #[serde(default)]
    pub day: i64,
    pub home_tid: Option<i64>,
    pub away_tid: Option<i64>,
}

/// A played game. teams[0] is the home side, teams[1] the away side.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameExport {
    pub gid: i64,
    pub season: i64,
    #[serde(default)]
    pub day: i64,
    #[serde(default)]
    pub teams: Vec<GameSideExport>,
    pub won: Option<GameResultExport>,
    pub lost: Option<GameResultExport>,
    pub num_periods: Option<i64>,
    pub overtimes: Option<i64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One side of a box score; the full object (players included) is archived
/// as the team-totals blob.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameSideExport {
    pub tid: Option<i64>,
    pub pts: Option<i64>,
    #[serde(default)]
    pub players: Vec<PlayerLineExport>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerLineExport {
    pub pid: Option<i64>,
    pub gs: Option<i64>,
    pub min: Option<f64>,
    pub pts: Option<i64>,
    pub orb: Option<i64>,
    pub drb: Option<i64>,
    pub ast: Option<i64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Win/loss summary used to recover a side's score when the side itself
/// does not carry one.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameResultExport {
    pub tid: Option<i64>,
    pub pts: Option<i64>,
}
