//! Output-contract types: lineups, exposure report, run result.
//!
//! Everything here is plain serializable data. Lineups are immutable once
//! produced; the engine hands ownership to the caller and keeps nothing.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::Serialize;

use crate::player::PlayerId;

/// One selected player as presented in a lineup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LineupPlayer {
    pub id: PlayerId,
    pub name: String,
    pub team: String,
    pub opponent: Option<String>,
    pub salary: u32,
    pub projection: Decimal,
}

/// A filled slot: which player occupies which roster position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LineupSlot {
    /// Slot label from the plan, e.g. `"UTIL"`.
    pub slot: String,
    pub player: LineupPlayer,
}

/// A completed lineup for one solve, in slot-plan order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Lineup {
    pub slots: Vec<LineupSlot>,
    pub total_salary: u32,
    pub total_projection: Decimal,
}

impl Lineup {
    /// Returns true if the given player occupies any slot of this lineup.
    pub fn contains(&self, id: &PlayerId) -> bool {
        self.slots.iter().any(|s| &s.player.id == id)
    }
}

/// Final per-player exposure across a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerExposure {
    pub player_name: String,
    pub team: String,
    pub appearance_count: u32,
    /// `floor(appearances / lineups actually produced * 100)`.
    pub exposure_percent: u32,
}

/// Result of one optimization run.
///
/// `complete` is true only when every requested lineup solved; on an
/// infeasible iteration the run stops early and the lineups produced so far
/// are returned as a usable partial outcome.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunResult {
    pub lineups: Vec<Lineup>,
    pub exposures: BTreeMap<PlayerId, PlayerExposure>,
    pub requested: u32,
    pub complete: bool,
}

impl RunResult {
    /// Number of lineups actually produced.
    pub fn produced(&self) -> usize {
        self.lineups.len()
    }
}
