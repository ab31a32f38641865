//! Player records, per-user overrides, and the pool builder.
//!
//! The pool builder is a pure transform: raw slate records plus an override
//! map in, optimization-ready candidates out. Removed players are filtered
//! here so the constraint model never sees them, and slot labels are
//! resolved to dense [`SlotId`]s exactly once.

use std::collections::HashMap;
use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::error::{EngineError, Result};
use crate::slot::{SlotId, SlotPlan};

/// Unique player identity within one slate.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(String);

impl PlayerId {
    /// Creates a player id.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PlayerId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// One roster entrant as ingested from a slate feed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawPlayer {
    pub id: PlayerId,
    pub name: String,
    pub team: String,
    /// Opposing team on this slate, when the feed carries game data.
    #[serde(default)]
    pub opponent: Option<String>,
    pub salary: u32,
    pub base_projection: Decimal,
    /// Slot labels the player may occupy, e.g. `["PG", "G", "UTIL"]`.
    pub eligible_slots: Vec<String>,
}

/// Per-user adjustments applied on top of a raw record.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PlayerOverride {
    /// Force the player into every generated lineup.
    pub locked: bool,
    /// Exclude the player from the pool entirely.
    pub removed: bool,
    /// Percentage of generated lineups the player may appear in; 100 means
    /// unconstrained.
    pub exposure_cap: Option<u8>,
    /// Replaces the base projection in the objective.
    pub projection: Option<Decimal>,
    /// Projected field ownership; carried through for presentation only.
    pub ownership: Option<Decimal>,
}

/// One optimization-ready pool entrant.
#[derive(Debug, Clone)]
pub struct PlayerCandidate {
    pub id: PlayerId,
    pub name: String,
    pub team: String,
    pub opponent: Option<String>,
    pub salary: u32,
    /// Objective value: the override projection when present, otherwise the
    /// base projection.
    pub projection: Decimal,
    pub eligible: SmallVec<[SlotId; 8]>,
    pub locked: bool,
    /// 0..=100; 100 means unconstrained.
    pub exposure_cap: u8,
    pub ownership: Option<Decimal>,
}

impl PlayerCandidate {
    /// Returns true if the player may occupy the given slot.
    pub fn is_eligible(&self, slot: SlotId) -> bool {
        self.eligible.contains(&slot)
    }
}

/// Builds the candidate pool for one optimization run.
///
/// Applies overrides by player id, filters `removed` players, resolves slot
/// labels against the plan, and fills in defaults (`locked = false`,
/// `exposure_cap = 100`, projection = base projection).
///
/// # Errors
///
/// - [`EngineError::UnknownPlayer`] if an override references an id absent
///   from `raw`.
/// - [`EngineError::Configuration`] for a duplicated player id, a slot
///   label missing from the plan, an exposure cap above 100, or a player
///   with no eligible slot.
pub fn build_pool(
    raw: &[RawPlayer],
    overrides: &HashMap<PlayerId, PlayerOverride>,
    plan: &SlotPlan,
) -> Result<Vec<PlayerCandidate>> {
    for id in overrides.keys() {
        if !raw.iter().any(|p| &p.id == id) {
            return Err(EngineError::UnknownPlayer(id.clone()));
        }
    }

    let mut pool: Vec<PlayerCandidate> = Vec::with_capacity(raw.len());
    for record in raw {
        if pool.iter().any(|c| c.id == record.id) {
            return Err(EngineError::Configuration(format!(
                "duplicate player id '{}' in slate",
                record.id
            )));
        }
        let user = overrides.get(&record.id);
        if user.is_some_and(|o| o.removed) {
            continue;
        }

        let mut eligible: SmallVec<[SlotId; 8]> = SmallVec::new();
        for label in &record.eligible_slots {
            let slot = plan.id_of(label).ok_or_else(|| {
                EngineError::Configuration(format!(
                    "player '{}' lists slot '{label}' not present in the plan",
                    record.id
                ))
            })?;
            if !eligible.contains(&slot) {
                eligible.push(slot);
            }
        }
        eligible.sort_unstable();
        if eligible.is_empty() {
            return Err(EngineError::Configuration(format!(
                "player '{}' has no eligible slot",
                record.id
            )));
        }

        let exposure_cap = match user.and_then(|o| o.exposure_cap) {
            Some(cap) if cap > 100 => {
                return Err(EngineError::Configuration(format!(
                    "player '{}' has exposure cap {cap} outside 0..=100",
                    record.id
                )));
            }
            Some(cap) => cap,
            None => 100,
        };

        pool.push(PlayerCandidate {
            id: record.id.clone(),
            name: record.name.clone(),
            team: record.team.clone(),
            opponent: record.opponent.clone(),
            salary: record.salary,
            projection: user
                .and_then(|o| o.projection)
                .unwrap_or(record.base_projection),
            eligible,
            locked: user.is_some_and(|o| o.locked),
            exposure_cap,
            ownership: user.and_then(|o| o.ownership),
        });
    }
    Ok(pool)
}
