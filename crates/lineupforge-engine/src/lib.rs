//! LineupForge Engine - iterative lineup optimization
//!
//! This crate ties the workspace together:
//! - [`Optimizer`]: the per-run state machine driving N sequential solves
//! - [`ExposureTracker`]: run-local reactive exposure accounting
//! - [`materialize`]: assignment-to-lineup conversion
//! - [`optimize`] / [`optimize_with_config`]: one-call entry points using
//!   the default branch-and-bound backend
//!
//! Logging levels:
//! - **INFO**: run start/end with problem scale and completion
//! - **DEBUG**: per-iteration lineups, suppression churn
//! - **WARN**: early termination on an infeasible iteration
//!
//! # Example
//!
//! ```
//! use std::collections::HashMap;
//! use lineupforge_engine::optimize;
//! use lineupforge_core::{nba, OptimizationSettings, PlayerId, RawPlayer, SlotPlan};
//! use rust_decimal::Decimal;
//!
//! let slate: Vec<RawPlayer> = (0..10)
//!     .map(|i| RawPlayer {
//!         id: PlayerId::new(format!("p{i}")),
//!         name: format!("Player {i}"),
//!         team: ["BOS", "NYK", "MIA", "LAL", "DEN"][i % 5].into(),
//!         opponent: None,
//!         salary: 4000 + 500 * i as u32,
//!         base_projection: Decimal::from(20 + i as i64),
//!         eligible_slots: nba::eligible_slots(&[["PG", "SG", "SF", "PF", "C"][i % 5]]),
//!     })
//!     .collect();
//! let settings = OptimizationSettings {
//!     min_salary: 0,
//!     max_salary: 50_000,
//!     max_players_per_team: 4,
//!     uniqueness: 0,
//!     num_lineups: 1,
//! };
//!
//! let result = optimize(&slate, &HashMap::new(), settings, SlotPlan::nba()).unwrap();
//! assert!(result.complete);
//! assert_eq!(result.lineups[0].slots.len(), 8);
//! ```

pub mod exposure;
pub mod materialize;
pub mod optimizer;

pub use exposure::ExposureTracker;
pub use materialize::materialize;
pub use optimizer::Optimizer;

// The types callers need to drive a run.
pub use lineupforge_config::EngineConfig;
pub use lineupforge_core::{
    build_pool, nba, EngineError, Lineup, OptimizationSettings, PlayerCandidate, PlayerExposure,
    PlayerId, PlayerOverride, RawPlayer, Result, RunResult, SlotPlan,
};
pub use lineupforge_model::LineupModel;
pub use lineupforge_solver::{BnbSolver, ModelSolver, SolveOutcome, SolverError};

use std::collections::HashMap;

/// Runs one optimization with the default branch-and-bound backend.
pub fn optimize(
    slate: &[RawPlayer],
    overrides: &HashMap<PlayerId, PlayerOverride>,
    settings: OptimizationSettings,
    plan: SlotPlan,
) -> Result<RunResult> {
    optimize_with_config(slate, overrides, settings, plan, &EngineConfig::default())
}

/// Runs one optimization with the default backend configured from an
/// [`EngineConfig`] (per-solve node and time limits).
pub fn optimize_with_config(
    slate: &[RawPlayer],
    overrides: &HashMap<PlayerId, PlayerOverride>,
    settings: OptimizationSettings,
    plan: SlotPlan,
    config: &EngineConfig,
) -> Result<RunResult> {
    let pool = build_pool(slate, overrides, &plan)?;
    let mut solver = BnbSolver::new();
    if let Some(nodes) = config.solve.node_limit {
        solver = solver.with_node_limit(nodes);
    }
    if let Some(limit) = config.solve_time_limit() {
        solver = solver.with_time_limit(limit);
    }
    Optimizer::new(pool, settings, plan)?.run(&mut solver)
}
