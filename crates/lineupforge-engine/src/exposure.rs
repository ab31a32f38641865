//! Run-local exposure tracking with reactive suppression.
//!
//! A player is suppressed only while their observed exposure exceeds their
//! cap, and only starting the iteration after the overshoot is observed.
//! When the running percentage falls back within the cap the player is
//! released again. This hysteresis makes the cap a soft, best-effort
//! ceiling over the run, never a hard per-lineup guarantee.
//!
//! All percentage math is integer cross-multiplication
//! (`appearances * 100` against `cap * lineups`), so tracking is exact.

use std::collections::BTreeMap;

use lineupforge_core::{PlayerCandidate, PlayerExposure, PlayerId};
use lineupforge_model::PlayerIx;

#[derive(Debug, Clone)]
struct Entry {
    cap: u8,
    locked: bool,
    appearances: u32,
    suppressed: bool,
}

/// Per-run exposure state, owned by the solver loop and discarded with it.
#[derive(Debug, Clone)]
pub struct ExposureTracker {
    entries: Vec<Entry>,
}

impl ExposureTracker {
    /// Initializes tracking for every player in the pool.
    pub fn new(pool: &[PlayerCandidate]) -> Self {
        Self {
            entries: pool
                .iter()
                .map(|candidate| Entry {
                    cap: candidate.exposure_cap,
                    locked: candidate.locked,
                    appearances: 0,
                    suppressed: false,
                })
                .collect(),
        }
    }

    /// Appearance count of one player so far.
    pub fn appearances(&self, player: PlayerIx) -> u32 {
        self.entries[player.index()].appearances
    }

    /// Players currently flagged over their cap.
    pub fn suppressed_players(&self) -> impl Iterator<Item = PlayerIx> + '_ {
        self.entries
            .iter()
            .enumerate()
            .filter(|(_, e)| e.suppressed)
            .map(|(i, _)| PlayerIx::new(i))
    }

    /// Re-evaluates every suppressed player against the lineups produced so
    /// far and releases those whose exposure has fallen back within cap.
    /// Returns the released players.
    pub fn reconcile(&mut self, produced: u32) -> Vec<PlayerIx> {
        let mut released = Vec::new();
        if produced == 0 {
            return released;
        }
        for (i, entry) in self.entries.iter_mut().enumerate() {
            if entry.suppressed && !over_cap(entry.appearances, entry.cap, produced) {
                entry.suppressed = false;
                released.push(PlayerIx::new(i));
            }
        }
        released
    }

    /// Folds one solved lineup's players in and flags any that are now over
    /// their cap. Returns the newly flagged players; suppression takes
    /// effect one iteration later by construction. Locked players are never
    /// flagged (the lock wins over the cap).
    pub fn record(&mut self, selected: &[PlayerIx], produced: u32) -> Vec<PlayerIx> {
        let mut flagged = Vec::new();
        for &player in selected {
            let entry = &mut self.entries[player.index()];
            entry.appearances += 1;
            if !entry.locked
                && !entry.suppressed
                && entry.cap < 100
                && over_cap(entry.appearances, entry.cap, produced)
            {
                entry.suppressed = true;
                flagged.push(player);
            }
        }
        flagged
    }

    /// Final per-player report: `floor(appearances / produced * 100)`.
    /// Players who never appeared are omitted.
    pub fn finalize(
        &self,
        pool: &[PlayerCandidate],
        produced: u32,
    ) -> BTreeMap<PlayerId, PlayerExposure> {
        let mut report = BTreeMap::new();
        if produced == 0 {
            return report;
        }
        for (entry, candidate) in self.entries.iter().zip(pool) {
            if entry.appearances == 0 {
                continue;
            }
            report.insert(
                candidate.id.clone(),
                PlayerExposure {
                    player_name: candidate.name.clone(),
                    team: candidate.team.clone(),
                    appearance_count: entry.appearances,
                    exposure_percent: entry.appearances * 100 / produced,
                },
            );
        }
        report
    }
}

fn over_cap(appearances: u32, cap: u8, produced: u32) -> bool {
    appearances * 100 > cap as u32 * produced
}
