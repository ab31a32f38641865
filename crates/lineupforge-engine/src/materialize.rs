//! Converts a solved assignment into a reportable lineup.

use lineupforge_core::{Lineup, LineupPlayer, LineupSlot, PlayerCandidate, SlotPlan};
use lineupforge_model::LineupModel;
use lineupforge_solver::Assignment;

use rust_decimal::Decimal;

/// Materializes a solved assignment against the pool it was built from.
///
/// Pure: the same assignment and pool always produce the same lineup, with
/// slots in plan order and totals summed per selected player.
pub fn materialize(
    pool: &[PlayerCandidate],
    plan: &SlotPlan,
    model: &LineupModel,
    assignment: &Assignment,
) -> Lineup {
    let mut slots: Vec<(usize, LineupSlot)> = assignment
        .selected()
        .iter()
        .map(|&var| {
            let key = model.key(var);
            let candidate = &pool[key.player.index()];
            (
                key.slot.index(),
                LineupSlot {
                    slot: plan.label_of(key.slot).to_string(),
                    player: LineupPlayer {
                        id: candidate.id.clone(),
                        name: candidate.name.clone(),
                        team: candidate.team.clone(),
                        opponent: candidate.opponent.clone(),
                        salary: candidate.salary,
                        projection: candidate.projection,
                    },
                },
            )
        })
        .collect();
    slots.sort_by_key(|(slot_index, _)| *slot_index);

    let total_salary = slots.iter().map(|(_, s)| s.player.salary).sum();
    let total_projection: Decimal = slots.iter().map(|(_, s)| s.player.projection).sum();
    Lineup {
        slots: slots.into_iter().map(|(_, s)| s).collect(),
        total_salary,
        total_projection,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lineupforge_core::{build_pool, OptimizationSettings, PlayerId, RawPlayer};
    use lineupforge_model::{PlayerIx, VarId, VarKey};
    use std::collections::HashMap;

    fn fixture() -> (Vec<PlayerCandidate>, SlotPlan, LineupModel) {
        let plan = SlotPlan::new(&["PG", "C"]).unwrap();
        let raw = vec![
            RawPlayer {
                id: PlayerId::from("a"),
                name: "Guard".into(),
                team: "BOS".into(),
                opponent: Some("NYK".into()),
                salary: 8000,
                base_projection: Decimal::new(405, 1),
                eligible_slots: vec!["PG".into()],
            },
            RawPlayer {
                id: PlayerId::from("b"),
                name: "Big".into(),
                team: "MIA".into(),
                opponent: Some("DEN".into()),
                salary: 7000,
                base_projection: Decimal::new(355, 1),
                eligible_slots: vec!["C".into()],
            },
        ];
        let pool = build_pool(&raw, &HashMap::new(), &plan).unwrap();
        let settings = OptimizationSettings {
            min_salary: 0,
            max_salary: 50_000,
            max_players_per_team: 4,
            uniqueness: 0,
            num_lineups: 1,
        };
        let model = LineupModel::build(&pool, &settings, &plan).unwrap();
        (pool, plan, model)
    }

    fn full_assignment(model: &LineupModel) -> Assignment {
        // Var ids follow pool order: (a, PG) then (b, C).
        assert_eq!(model.key(VarId::new(0)), VarKey::new(PlayerIx::new(0), lineupforge_core::SlotId::new(0)));
        Assignment::new(
            vec![VarId::new(1), VarId::new(0)],
            Decimal::new(760, 1),
        )
    }

    #[test]
    fn test_slots_in_plan_order_with_totals() {
        let (pool, plan, model) = fixture();
        let lineup = materialize(&pool, &plan, &model, &full_assignment(&model));
        assert_eq!(lineup.slots.len(), 2);
        assert_eq!(lineup.slots[0].slot, "PG");
        assert_eq!(lineup.slots[0].player.name, "Guard");
        assert_eq!(lineup.slots[1].slot, "C");
        assert_eq!(lineup.slots[1].player.opponent.as_deref(), Some("DEN"));
        assert_eq!(lineup.total_salary, 15_000);
        assert_eq!(lineup.total_projection, Decimal::new(760, 1));
    }

    #[test]
    fn test_materialization_is_idempotent() {
        let (pool, plan, model) = fixture();
        let assignment = full_assignment(&model);
        let first = materialize(&pool, &plan, &model, &assignment);
        let second = materialize(&pool, &plan, &model, &assignment);
        assert_eq!(first, second);
    }
}
