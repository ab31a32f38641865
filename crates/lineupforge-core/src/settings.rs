//! Per-run optimization settings.

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};
use crate::slot::SlotPlan;

/// Immutable-per-run configuration of one optimization.
///
/// # Example
///
/// ```
/// use lineupforge_core::{OptimizationSettings, SlotPlan};
///
/// let settings = OptimizationSettings {
///     min_salary: 0,
///     max_salary: 50_000,
///     max_players_per_team: 4,
///     uniqueness: 3,
///     num_lineups: 20,
/// };
/// assert!(settings.validate(&SlotPlan::nba()).is_ok());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptimizationSettings {
    /// Inclusive lower bound on total roster salary.
    pub min_salary: u32,
    /// Inclusive upper bound on total roster salary.
    pub max_salary: u32,
    /// Most players one real-world team may contribute to a lineup.
    pub max_players_per_team: u32,
    /// Minimum number of slot-assignments that must differ between two
    /// consecutively generated lineups.
    pub uniqueness: u32,
    /// Number of lineups to generate.
    pub num_lineups: u32,
}

impl OptimizationSettings {
    /// Checks the settings against a slot plan before any model is built.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Configuration`] when the settings are
    /// contradictory: salary bounds inverted, uniqueness larger than the
    /// slot count, a zero team cap, or zero requested lineups.
    pub fn validate(&self, plan: &SlotPlan) -> Result<()> {
        if self.min_salary > self.max_salary {
            return Err(EngineError::Configuration(format!(
                "minSalary {} exceeds maxSalary {}",
                self.min_salary, self.max_salary
            )));
        }
        if self.uniqueness as usize > plan.len() {
            return Err(EngineError::Configuration(format!(
                "uniqueness {} exceeds the {} slots in the plan",
                self.uniqueness,
                plan.len()
            )));
        }
        if self.max_players_per_team == 0 {
            return Err(EngineError::Configuration(
                "maxPlayersPerTeam must be at least 1".into(),
            ));
        }
        if self.num_lineups == 0 {
            return Err(EngineError::Configuration(
                "numLineups must be at least 1".into(),
            ));
        }
        Ok(())
    }
}
