//! LineupForge Solver - the mixed-integer solving seam
//!
//! This crate provides:
//! - [`ModelSolver`], the boundary behind which any binary MIP solver can
//!   sit (the engine only ever talks to this trait)
//! - [`BnbSolver`], the default in-process exact backend: depth-first
//!   branch-and-bound over the model's exactly-one groups with interval
//!   feasibility pruning and an admissible objective bound
//! - Outcome, assignment, and statistics types shared by all backends

pub mod bnb;
pub mod outcome;

pub use bnb::BnbSolver;
pub use outcome::{Assignment, SolveOutcome, SolveResult, SolveStats, TerminationReason};

use lineupforge_model::LineupModel;
use thiserror::Error;

/// Failure to invoke a solver at all, as opposed to an infeasible model.
#[derive(Debug, Error)]
pub enum SolverError {
    /// The backend cannot run in this environment (missing binary or
    /// library). Fatal for the whole run.
    #[error("Solver unavailable: {0}")]
    Unavailable(String),

    /// The backend cannot express the given model.
    #[error("Unsupported model: {0}")]
    UnsupportedModel(String),
}

/// The external-solver boundary.
///
/// Implementations must be deterministic for a fixed model: the engine
/// relies on reproducible solves for idempotent materialization.
pub trait ModelSolver {
    /// Solves the model under its currently active constraint set.
    fn solve(&mut self, model: &LineupModel) -> Result<SolveOutcome, SolverError>;
}
