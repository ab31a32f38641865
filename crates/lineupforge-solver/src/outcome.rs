//! Solve outcomes, assignments, and per-solve statistics.

use std::time::Duration;

use rust_decimal::Decimal;

use lineupforge_model::VarId;

/// A solved 0/1 assignment: the variables set to one, with the objective
/// value they achieve.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
    selected: Vec<VarId>,
    objective: Decimal,
}

impl Assignment {
    /// Creates an assignment from selected variables and their objective.
    pub fn new(mut selected: Vec<VarId>, objective: Decimal) -> Self {
        selected.sort_unstable();
        Self {
            selected,
            objective,
        }
    }

    /// Variables with value one, in ascending id order.
    pub fn selected(&self) -> &[VarId] {
        &self.selected
    }

    /// Objective value of this assignment.
    pub fn objective(&self) -> Decimal {
        self.objective
    }
}

/// Why the search stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminationReason {
    /// The search tree was exhausted and the incumbent is optimal.
    OptimalityProven,
    /// The search tree was exhausted without finding any feasible leaf.
    InfeasibilityProven,
    /// A node or wall-clock limit stopped the search early.
    LimitReached,
}

/// What the solve produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SolveResult {
    /// Proven-optimal assignment.
    Optimal(Assignment),
    /// Best incumbent when a limit stopped the search; not proven optimal.
    Feasible(Assignment),
    /// No feasible assignment exists under the active constraints.
    Infeasible,
    /// A limit stopped the search before any incumbent was found.
    Aborted,
}

/// Counters describing one solve.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SolveStats {
    pub nodes_explored: u64,
    pub nodes_pruned: u64,
    pub elapsed: Duration,
}

/// Result of one solver invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolveOutcome {
    pub result: SolveResult,
    pub reason: TerminationReason,
    pub stats: SolveStats,
}

impl SolveOutcome {
    /// Creates a proven-optimal outcome.
    pub fn optimal(assignment: Assignment, stats: SolveStats) -> Self {
        Self {
            result: SolveResult::Optimal(assignment),
            reason: TerminationReason::OptimalityProven,
            stats,
        }
    }

    /// Creates a proven-infeasible outcome.
    pub fn infeasible(stats: SolveStats) -> Self {
        Self {
            result: SolveResult::Infeasible,
            reason: TerminationReason::InfeasibilityProven,
            stats,
        }
    }

    /// Creates a limit-terminated outcome, with or without an incumbent.
    pub fn limited(incumbent: Option<Assignment>, stats: SolveStats) -> Self {
        Self {
            result: match incumbent {
                Some(a) => SolveResult::Feasible(a),
                None => SolveResult::Aborted,
            },
            reason: TerminationReason::LimitReached,
            stats,
        }
    }

    /// The usable assignment, if the solve produced one.
    pub fn assignment(&self) -> Option<&Assignment> {
        match &self.result {
            SolveResult::Optimal(a) | SolveResult::Feasible(a) => Some(a),
            SolveResult::Infeasible | SolveResult::Aborted => None,
        }
    }
}
