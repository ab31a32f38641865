//! The reusable per-run optimization model.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use smallvec::SmallVec;

use crate::constraint::{Constraint, ConstraintTag};
use crate::var::{PlayerIx, VarId, VarKey};

/// One binary optimization model, built once per run and re-solved once per
/// lineup.
///
/// Static constraints never change after construction. Dynamic constraints
/// (exposure suppression, previous-lineup overlap) live in a registry keyed
/// by [`ConstraintTag`] so the solver loop can add and retract them by
/// identity between solves. Registry iteration order is deterministic.
#[derive(Debug, Clone)]
pub struct LineupModel {
    pub(crate) keys: Vec<VarKey>,
    pub(crate) objective: Vec<Decimal>,
    pub(crate) player_vars: Vec<SmallVec<[VarId; 8]>>,
    pub(crate) slot_groups: Vec<Vec<VarId>>,
    pub(crate) statics: Vec<Constraint>,
    pub(crate) dynamics: BTreeMap<ConstraintTag, Constraint>,
}

impl LineupModel {
    /// Number of decision variables.
    pub fn num_vars(&self) -> usize {
        self.keys.len()
    }

    /// Number of slots in the plan this model was built against.
    pub fn num_slots(&self) -> usize {
        self.slot_groups.len()
    }

    /// Returns the structured identity of a variable.
    pub fn key(&self, var: VarId) -> VarKey {
        self.keys[var.index()]
    }

    /// Objective coefficient (projection) of a variable.
    pub fn objective_of(&self, var: VarId) -> Decimal {
        self.objective[var.index()]
    }

    /// All variables belonging to one player, across their eligible slots.
    pub fn player_vars(&self, player: PlayerIx) -> &[VarId] {
        &self.player_vars[player.index()]
    }

    /// The exactly-one branching groups: for each slot, the variables of the
    /// players eligible for it. These mirror the slot-fill constraints.
    pub fn exactly_one_groups(&self) -> &[Vec<VarId>] {
        &self.slot_groups
    }

    /// Iterates every active constraint: statics first, then dynamics in
    /// tag order.
    pub fn constraints(&self) -> impl Iterator<Item = &Constraint> {
        self.statics.iter().chain(self.dynamics.values())
    }

    /// Number of currently active constraints.
    pub fn num_constraints(&self) -> usize {
        self.statics.len() + self.dynamics.len()
    }

    /// Installs or replaces a dynamic constraint under the given tag.
    pub fn set_dynamic(&mut self, tag: ConstraintTag, constraint: Constraint) {
        self.dynamics.insert(tag, constraint);
    }

    /// Retracts a dynamic constraint; returns true if one was present.
    pub fn clear_dynamic(&mut self, tag: &ConstraintTag) -> bool {
        self.dynamics.remove(tag).is_some()
    }

    /// Returns true if a dynamic constraint is installed under the tag.
    pub fn has_dynamic(&self, tag: &ConstraintTag) -> bool {
        self.dynamics.contains_key(tag)
    }

    /// Objective value of a set of selected variables.
    pub fn objective_value(&self, selected: &[VarId]) -> Decimal {
        selected.iter().map(|&v| self.objective_of(v)).sum()
    }
}
