//! The iterative solver loop.
//!
//! One [`Optimizer`] drives one run: it owns the model and the exposure
//! tracker, re-solves the model once per requested lineup, and mutates the
//! dynamic constraint set between solves. Iterations are strictly
//! sequential; each one's constraints depend on the previous one's output.

use tracing::{debug, info, warn};

use lineupforge_core::{
    EngineError, Lineup, OptimizationSettings, PlayerCandidate, Result, RunResult, SlotPlan,
};
use lineupforge_model::{CmpOp, Constraint, ConstraintTag, LineupModel, PlayerIx, VarId};
use lineupforge_solver::{Assignment, ModelSolver, SolverError};

use crate::exposure::ExposureTracker;
use crate::materialize::materialize;

/// One optimization run's state machine.
///
/// Construction is fail-fast: settings and pool are validated and the
/// static model is built before any solve. The optimizer is consumed by
/// [`run`](Optimizer::run); neither the model nor the tracker outlive the
/// run or get shared across runs.
#[derive(Debug)]
pub struct Optimizer {
    pool: Vec<PlayerCandidate>,
    plan: SlotPlan,
    settings: OptimizationSettings,
    model: LineupModel,
    tracker: ExposureTracker,
}

impl Optimizer {
    /// Validates the configuration and builds the static model.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Configuration`] for contradictory settings or
    /// a structurally unsatisfiable pool, before any solving begins.
    pub fn new(
        pool: Vec<PlayerCandidate>,
        settings: OptimizationSettings,
        plan: SlotPlan,
    ) -> Result<Self> {
        let model = LineupModel::build(&pool, &settings, &plan)?;
        let tracker = ExposureTracker::new(&pool);
        Ok(Self {
            pool,
            plan,
            settings,
            model,
            tracker,
        })
    }

    /// Generates up to `num_lineups` lineups.
    ///
    /// An infeasible iteration ends the run early with the lineups produced
    /// so far and `complete = false`. A solver that cannot be invoked at
    /// all aborts the whole run with [`EngineError::SolverUnavailable`].
    pub fn run<S: ModelSolver>(mut self, solver: &mut S) -> Result<RunResult> {
        let requested = self.settings.num_lineups;
        info!(
            players = self.pool.len(),
            variables = self.model.num_vars(),
            requested,
            "starting optimization run"
        );

        let mut lineups: Vec<Lineup> = Vec::with_capacity(requested as usize);
        let mut previous: Option<Vec<PlayerIx>> = None;
        let mut complete = true;
        for iteration in 0..requested {
            self.reconcile_exposure(iteration);
            self.apply_suppressions();
            self.apply_uniqueness(previous.as_deref());

            match self.solve_iteration(solver, iteration as usize) {
                Ok(assignment) => {
                    let players: Vec<PlayerIx> = assignment
                        .selected()
                        .iter()
                        .map(|&var| self.model.key(var).player)
                        .collect();
                    for flagged in self.tracker.record(&players, iteration + 1) {
                        debug!(
                            player = %self.pool[flagged.index()].id,
                            "player over exposure cap, suppressing from next iteration"
                        );
                    }
                    let lineup = materialize(&self.pool, &self.plan, &self.model, &assignment);
                    debug!(
                        iteration,
                        salary = lineup.total_salary,
                        projection = %lineup.total_projection,
                        "lineup produced"
                    );
                    lineups.push(lineup);
                    previous = Some(players);
                }
                Err(EngineError::InfeasibleSolve { iteration }) => {
                    warn!(
                        iteration,
                        produced = lineups.len(),
                        "no feasible lineup, ending run early"
                    );
                    complete = false;
                    break;
                }
                Err(other) => return Err(other),
            }
        }

        let produced = lineups.len() as u32;
        let exposures = self.tracker.finalize(&self.pool, produced);
        info!(produced, complete, "optimization run finished");
        Ok(RunResult {
            lineups,
            exposures,
            requested,
            complete,
        })
    }

    /// Step 1: release suppression for players whose observed exposure has
    /// fallen back within their cap.
    fn reconcile_exposure(&mut self, produced: u32) {
        for released in self.tracker.reconcile(produced) {
            self.model
                .clear_dynamic(&ConstraintTag::Suppress(released));
            debug!(
                player = %self.pool[released.index()].id,
                "exposure back within cap, releasing suppression"
            );
        }
    }

    /// Step 2: force all variables of still-flagged players to zero.
    fn apply_suppressions(&mut self) {
        let flagged: Vec<PlayerIx> = self.tracker.suppressed_players().collect();
        for player in flagged {
            let tag = ConstraintTag::Suppress(player);
            if !self.model.has_dynamic(&tag) {
                let constraint = Constraint::sum(
                    format!("suppress/{}", self.pool[player.index()].id),
                    self.model.player_vars(player),
                    CmpOp::Eq,
                    0,
                );
                self.model.set_dynamic(tag, constraint);
            }
        }
    }

    /// Step 3: bound how many of the previous lineup's players may reappear,
    /// counting every eligible slot of theirs, not just the one they held.
    fn apply_uniqueness(&mut self, previous: Option<&[PlayerIx]>) {
        let Some(previous) = previous else {
            return;
        };
        if self.settings.uniqueness == 0 {
            return;
        }
        let mut vars: Vec<VarId> = Vec::new();
        for &player in previous {
            vars.extend_from_slice(self.model.player_vars(player));
        }
        let allowed_overlap = self.plan.len() as i64 - self.settings.uniqueness as i64;
        self.model.set_dynamic(
            ConstraintTag::PreviousLineupOverlap,
            Constraint::sum("previous-lineup-overlap", &vars, CmpOp::Le, allowed_overlap),
        );
    }

    /// Steps 4-5: solve under the current constraint set and extract the
    /// winning assignment.
    fn solve_iteration<S: ModelSolver>(
        &mut self,
        solver: &mut S,
        iteration: usize,
    ) -> Result<Assignment> {
        let outcome = solver.solve(&self.model).map_err(|err| match err {
            SolverError::Unavailable(msg) | SolverError::UnsupportedModel(msg) => {
                EngineError::SolverUnavailable(msg)
            }
        })?;
        match outcome.assignment() {
            Some(assignment) => Ok(assignment.clone()),
            None => Err(EngineError::InfeasibleSolve { iteration }),
        }
    }
}
