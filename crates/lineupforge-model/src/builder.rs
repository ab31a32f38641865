//! Static model construction.
//!
//! Builds the objective and every static constraint of a run, and rejects
//! structurally unsatisfiable configurations before any solve is attempted.

use std::collections::BTreeMap;

use smallvec::SmallVec;

use lineupforge_core::{EngineError, OptimizationSettings, PlayerCandidate, Result, SlotPlan};

use crate::constraint::{CmpOp, Constraint};
use crate::model::LineupModel;
use crate::var::{PlayerIx, VarId, VarKey};

impl LineupModel {
    /// Builds the static model for one run.
    ///
    /// Decision variables are created per (player, eligible slot) pair in
    /// pool order, so variable ids are deterministic for a given pool.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Configuration`] when the run can be rejected
    /// without solving: contradictory settings, fewer eligible players than
    /// slots for some slot type, locked players that cannot fit the salary
    /// cap or the roster.
    pub fn build(
        pool: &[PlayerCandidate],
        settings: &OptimizationSettings,
        plan: &SlotPlan,
    ) -> Result<LineupModel> {
        settings.validate(plan)?;

        let num_slots = plan.len();
        if pool.len() < num_slots {
            return Err(EngineError::Configuration(format!(
                "pool has {} players for {num_slots} slots",
                pool.len()
            )));
        }
        check_slot_coverage(pool, plan)?;
        check_locks(pool, settings, num_slots)?;

        // Variables: pool order, then the player's eligible slots in order.
        let mut keys = Vec::new();
        let mut objective = Vec::new();
        let mut player_vars: Vec<SmallVec<[VarId; 8]>> = vec![SmallVec::new(); pool.len()];
        let mut slot_groups: Vec<Vec<VarId>> = vec![Vec::new(); num_slots];
        for (p, candidate) in pool.iter().enumerate() {
            let player = PlayerIx::new(p);
            for &slot in &candidate.eligible {
                let var = VarId::new(keys.len());
                keys.push(VarKey::new(player, slot));
                objective.push(candidate.projection);
                player_vars[p].push(var);
                slot_groups[slot.index()].push(var);
            }
        }

        let mut statics = Vec::new();
        for (slot, group) in plan.ids().zip(&slot_groups) {
            statics.push(Constraint::sum(
                format!("slot-fill/{}", plan.label_of(slot)),
                group,
                CmpOp::Eq,
                1,
            ));
        }
        for (p, candidate) in pool.iter().enumerate() {
            statics.push(Constraint::sum(
                format!("single-assignment/{}", candidate.id),
                &player_vars[p],
                CmpOp::Le,
                1,
            ));
        }

        let all_vars: Vec<VarId> = (0..keys.len()).map(VarId::new).collect();
        statics.push(Constraint::sum(
            "roster-size",
            &all_vars,
            CmpOp::Eq,
            num_slots as i64,
        ));

        let salary_terms: Vec<(VarId, i64)> = keys
            .iter()
            .enumerate()
            .map(|(v, key)| (VarId::new(v), pool[key.player.index()].salary as i64))
            .collect();
        if settings.min_salary > 0 {
            statics.push(Constraint::new(
                "salary-min",
                salary_terms.clone(),
                CmpOp::Ge,
                settings.min_salary as i64,
            ));
        }
        statics.push(Constraint::new(
            "salary-max",
            salary_terms,
            CmpOp::Le,
            settings.max_salary as i64,
        ));

        let mut team_vars: BTreeMap<&str, Vec<VarId>> = BTreeMap::new();
        for (v, key) in keys.iter().enumerate() {
            team_vars
                .entry(pool[key.player.index()].team.as_str())
                .or_default()
                .push(VarId::new(v));
        }
        for (team, vars) in team_vars {
            statics.push(Constraint::sum(
                format!("team-cap/{team}"),
                &vars,
                CmpOp::Le,
                settings.max_players_per_team as i64,
            ));
        }

        for (p, candidate) in pool.iter().enumerate() {
            if candidate.locked {
                statics.push(Constraint::sum(
                    format!("lock/{}", candidate.id),
                    &player_vars[p],
                    CmpOp::Eq,
                    1,
                ));
            }
        }

        Ok(LineupModel {
            keys,
            objective,
            player_vars,
            slot_groups,
            statics,
            dynamics: BTreeMap::new(),
        })
    }
}

/// Rejects plans where some slot type has fewer distinct eligible players
/// than slots to fill. Slots are grouped by identical eligible-player sets
/// (all three basketball flex slots collapse to one group, for example).
fn check_slot_coverage(pool: &[PlayerCandidate], plan: &SlotPlan) -> Result<()> {
    let mut groups: BTreeMap<Vec<usize>, Vec<&str>> = BTreeMap::new();
    for (slot, def) in plan.iter() {
        let eligible: Vec<usize> = pool
            .iter()
            .enumerate()
            .filter(|(_, c)| c.is_eligible(slot))
            .map(|(p, _)| p)
            .collect();
        groups.entry(eligible).or_default().push(&def.label);
    }
    for (eligible, labels) in groups {
        if eligible.len() < labels.len() {
            return Err(EngineError::Configuration(format!(
                "slots {} have only {} eligible players",
                labels.join("/"),
                eligible.len()
            )));
        }
    }
    Ok(())
}

/// Rejects lock sets that already violate the salary cap or the roster size.
fn check_locks(
    pool: &[PlayerCandidate],
    settings: &OptimizationSettings,
    num_slots: usize,
) -> Result<()> {
    let locked: Vec<&PlayerCandidate> = pool.iter().filter(|c| c.locked).collect();
    if locked.len() > num_slots {
        return Err(EngineError::Configuration(format!(
            "{} locked players for {num_slots} slots",
            locked.len()
        )));
    }
    let locked_salary: u64 = locked.iter().map(|c| c.salary as u64).sum();
    if locked_salary > settings.max_salary as u64 {
        return Err(EngineError::Configuration(format!(
            "locked players cost {locked_salary}, above maxSalary {}",
            settings.max_salary
        )));
    }
    Ok(())
}
