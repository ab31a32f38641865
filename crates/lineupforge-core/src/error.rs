//! Error types for LineupForge

use thiserror::Error;

use crate::player::PlayerId;

/// Main error type for LineupForge operations
#[derive(Debug, Error)]
pub enum EngineError {
    /// Malformed or contradictory settings, rejected before any solve
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// An override or lock references a player not present in the pool
    #[error("Unknown player: {0}")]
    UnknownPlayer(PlayerId),

    /// A single iteration's model had no feasible solution.
    ///
    /// The solver loop catches this internally and converts it into a
    /// partial result; callers of the engine never observe it directly.
    #[error("No feasible lineup at iteration {iteration}")]
    InfeasibleSolve { iteration: usize },

    /// The external solver could not be invoked at all
    #[error("Solver unavailable: {0}")]
    SolverUnavailable(String),
}

/// Result type alias for LineupForge operations
pub type Result<T> = std::result::Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configuration_display() {
        let err = EngineError::Configuration("minSalary exceeds maxSalary".into());
        assert_eq!(
            err.to_string(),
            "Configuration error: minSalary exceeds maxSalary"
        );
    }

    #[test]
    fn test_infeasible_display_carries_iteration() {
        let err = EngineError::InfeasibleSolve { iteration: 17 };
        assert_eq!(err.to_string(), "No feasible lineup at iteration 17");
    }
}
