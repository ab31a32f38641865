//! Exact branch-and-bound backend for the models this engine emits.
//!
//! The search branches on the model's exactly-one groups (one level per
//! slot: which player's variable fills it), rather than on raw variables.
//! At each node every active constraint is checked by interval arithmetic
//! over the partial assignment, and subtrees are pruned when an admissible
//! objective bound cannot beat the incumbent. Candidate order within a
//! group is descending objective with ascending variable id as tie-break,
//! so solves are deterministic and ties resolve to the first-found leaf.

use std::time::{Duration, Instant};

use rust_decimal::Decimal;
use tracing::debug;

use lineupforge_model::{CmpOp, LineupModel, VarId};

use crate::outcome::{Assignment, SolveOutcome, SolveStats};
use crate::{ModelSolver, SolverError};

/// Default in-process solver.
///
/// Reusable across solves; holds no per-solve state. Limits apply per
/// invocation.
#[derive(Debug, Clone, Default)]
pub struct BnbSolver {
    node_limit: Option<u64>,
    time_limit: Option<Duration>,
}

impl BnbSolver {
    /// Creates a solver with no limits.
    pub fn new() -> Self {
        Self::default()
    }

    /// Caps the number of search nodes per solve.
    pub fn with_node_limit(mut self, limit: u64) -> Self {
        self.node_limit = Some(limit);
        self
    }

    /// Caps the wall-clock time per solve.
    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.time_limit = Some(limit);
        self
    }
}

impl ModelSolver for BnbSolver {
    fn solve(&mut self, model: &LineupModel) -> Result<SolveOutcome, SolverError> {
        let start = Instant::now();

        // Every variable must sit in exactly one branching group.
        let mut group_of = vec![false; model.num_vars()];
        for group in model.exactly_one_groups() {
            for &var in group {
                if std::mem::replace(&mut group_of[var.index()], true) {
                    return Err(SolverError::UnsupportedModel(format!(
                        "variable {} appears in multiple exactly-one groups",
                        var.index()
                    )));
                }
            }
        }
        if let Some(stray) = group_of.iter().position(|covered| !covered) {
            return Err(SolverError::UnsupportedModel(format!(
                "variable {stray} is outside every exactly-one group"
            )));
        }

        // Descending objective, ascending id: deterministic and greedy-first.
        let mut groups: Vec<Vec<VarId>> = model.exactly_one_groups().to_vec();
        for group in &mut groups {
            group.sort_by(|a, b| {
                model
                    .objective_of(*b)
                    .cmp(&model.objective_of(*a))
                    .then(a.cmp(b))
            });
        }

        let mut search = Search {
            model,
            groups,
            values: vec![None; model.num_vars()],
            current_obj: Decimal::ZERO,
            best: None,
            stats: SolveStats::default(),
            node_limit: self.node_limit,
            deadline: self.time_limit.map(|limit| start + limit),
            limit_hit: false,
        };
        search.seed_forced_zeros();
        search.dfs(0);

        let mut stats = search.stats;
        stats.elapsed = start.elapsed();
        debug!(
            nodes_explored = stats.nodes_explored,
            nodes_pruned = stats.nodes_pruned,
            limit_hit = search.limit_hit,
            found = search.best.is_some(),
            "branch-and-bound solve finished"
        );

        let incumbent = search
            .best
            .map(|(selected, objective)| Assignment::new(selected, objective));
        Ok(if search.limit_hit {
            SolveOutcome::limited(incumbent, stats)
        } else {
            match incumbent {
                Some(assignment) => SolveOutcome::optimal(assignment, stats),
                None => SolveOutcome::infeasible(stats),
            }
        })
    }
}

struct Search<'a> {
    model: &'a LineupModel,
    groups: Vec<Vec<VarId>>,
    values: Vec<Option<bool>>,
    current_obj: Decimal,
    best: Option<(Vec<VarId>, Decimal)>,
    stats: SolveStats,
    node_limit: Option<u64>,
    deadline: Option<Instant>,
    limit_hit: bool,
}

impl Search<'_> {
    /// Fixes to zero every variable of an all-positive `<= 0` or `== 0`
    /// constraint (the shape of suppression constraints). These fixings
    /// hold for the whole search and are never backtracked.
    fn seed_forced_zeros(&mut self) {
        for constraint in self.model.constraints() {
            if constraint.rhs == 0
                && matches!(constraint.op, CmpOp::Le | CmpOp::Eq)
                && constraint.terms.iter().all(|&(_, coeff)| coeff > 0)
            {
                for &(var, _) in &constraint.terms {
                    self.values[var.index()] = Some(false);
                }
            }
        }
    }

    fn dfs(&mut self, depth: usize) {
        if depth == self.groups.len() {
            // Interval checks are exact on a full assignment, so reaching
            // here means every constraint holds.
            if self
                .best
                .as_ref()
                .map_or(true, |(_, incumbent)| self.current_obj > *incumbent)
            {
                let selected: Vec<VarId> = self
                    .values
                    .iter()
                    .enumerate()
                    .filter(|(_, value)| **value == Some(true))
                    .map(|(index, _)| VarId::new(index))
                    .collect();
                self.best = Some((selected, self.current_obj));
            }
            return;
        }

        let candidates: Vec<VarId> = self.groups[depth]
            .iter()
            .copied()
            .filter(|var| self.values[var.index()] != Some(false))
            .collect();
        for var in candidates {
            self.stats.nodes_explored += 1;
            if self.limits_exceeded() {
                self.limit_hit = true;
                return;
            }

            // Fill the slot with this player: the group's other unfixed
            // variables go to zero for the subtree.
            let mut zeroed: Vec<VarId> = Vec::new();
            for &other in &self.groups[depth] {
                if other != var && self.values[other.index()].is_none() {
                    self.values[other.index()] = Some(false);
                    zeroed.push(other);
                }
            }
            self.values[var.index()] = Some(true);
            self.current_obj += self.model.objective_of(var);

            if self.feasible() && self.bound_beats_incumbent(depth + 1) {
                self.dfs(depth + 1);
            } else {
                self.stats.nodes_pruned += 1;
            }

            self.current_obj -= self.model.objective_of(var);
            self.values[var.index()] = None;
            for zero in zeroed {
                self.values[zero.index()] = None;
            }
            if self.limit_hit {
                return;
            }
        }
    }

    fn limits_exceeded(&self) -> bool {
        if self
            .node_limit
            .is_some_and(|limit| self.stats.nodes_explored > limit)
        {
            return true;
        }
        self.deadline.is_some_and(|deadline| Instant::now() > deadline)
    }

    /// Interval-arithmetic feasibility of the partial assignment: for each
    /// constraint, the achievable [min, max] of the left-hand side must
    /// still admit the right-hand side.
    fn feasible(&self) -> bool {
        for constraint in self.model.constraints() {
            let mut min = 0i64;
            let mut max = 0i64;
            for &(var, coeff) in &constraint.terms {
                match self.values[var.index()] {
                    Some(true) => {
                        min += coeff;
                        max += coeff;
                    }
                    Some(false) => {}
                    None => {
                        if coeff > 0 {
                            max += coeff;
                        } else {
                            min += coeff;
                        }
                    }
                }
            }
            let admissible = match constraint.op {
                CmpOp::Le => min <= constraint.rhs,
                CmpOp::Ge => max >= constraint.rhs,
                CmpOp::Eq => min <= constraint.rhs && max >= constraint.rhs,
            };
            if !admissible {
                return false;
            }
        }
        true
    }

    /// Admissible upper bound: current objective plus the best unfixed
    /// candidate of every remaining group. Groups are sorted descending, so
    /// the first unfixed variable is the group maximum.
    fn bound_beats_incumbent(&self, next_depth: usize) -> bool {
        let mut bound = self.current_obj;
        for group in &self.groups[next_depth..] {
            let Some(best) = group
                .iter()
                .find(|var| self.values[var.index()] != Some(false))
            else {
                // A future slot has no candidate left; dead subtree.
                return false;
            };
            bound += self.model.objective_of(*best);
        }
        match &self.best {
            None => true,
            Some((_, incumbent)) => bound > *incumbent,
        }
    }
}
