//! Linear constraints and the dynamic-constraint tag vocabulary.

use crate::var::{PlayerIx, VarId};

/// Comparison operator of a linear constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CmpOp {
    /// Left-hand side must be less than or equal to the right-hand side.
    Le,
    /// Left-hand side must be greater than or equal to the right-hand side.
    Ge,
    /// Left-hand side must equal the right-hand side.
    Eq,
}

/// A linear (in)equality over binary decision variables with integer
/// coefficients.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Constraint {
    /// Human-readable identity for logging and diagnostics.
    pub label: String,
    pub terms: Vec<(VarId, i64)>,
    pub op: CmpOp,
    pub rhs: i64,
}

impl Constraint {
    /// Creates a constraint from its parts.
    pub fn new(label: impl Into<String>, terms: Vec<(VarId, i64)>, op: CmpOp, rhs: i64) -> Self {
        Self {
            label: label.into(),
            terms,
            op,
            rhs,
        }
    }

    /// Sum-of-variables shorthand: every coefficient is 1.
    pub fn sum(label: impl Into<String>, vars: &[VarId], op: CmpOp, rhs: i64) -> Self {
        Self::new(label, vars.iter().map(|&v| (v, 1)).collect(), op, rhs)
    }

    /// Evaluates the left-hand side under a complete 0/1 assignment.
    pub fn lhs_value(&self, selected: impl Fn(VarId) -> bool) -> i64 {
        self.terms
            .iter()
            .map(|&(v, c)| if selected(v) { c } else { 0 })
            .sum()
    }

    /// Checks the constraint under a complete 0/1 assignment.
    pub fn is_satisfied(&self, selected: impl Fn(VarId) -> bool) -> bool {
        let lhs = self.lhs_value(selected);
        match self.op {
            CmpOp::Le => lhs <= self.rhs,
            CmpOp::Ge => lhs >= self.rhs,
            CmpOp::Eq => lhs == self.rhs,
        }
    }
}

/// Stable identity of a dynamic constraint, so the solver loop can retract
/// exactly what it added in an earlier iteration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ConstraintTag {
    /// Forces all of one player's variables to zero while the player is
    /// observed over their exposure cap.
    Suppress(PlayerIx),
    /// Bounds how many of the previous lineup's players may reappear.
    /// Replaced wholesale every iteration; only one exists at a time.
    PreviousLineupOverlap,
}
