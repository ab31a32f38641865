//! End-to-end properties of the optimization engine: slot coverage, salary
//! bounds, team caps, locks, uniqueness distance, and reactive exposure.

use std::collections::{HashMap, HashSet};

use rust_decimal::Decimal;

use lineupforge_engine::{
    nba, optimize, BnbSolver, EngineError, Lineup, ModelSolver, OptimizationSettings,
    PlayerId, PlayerOverride, RawPlayer, RunResult, SlotPlan, SolverError,
};

fn init_logs() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}

fn raw(id: &str, team: &str, salary: u32, positions: &[&str], proj: i64) -> RawPlayer {
    RawPlayer {
        id: PlayerId::from(id),
        name: format!("Player {id}"),
        team: team.into(),
        opponent: None,
        salary,
        base_projection: Decimal::from(proj),
        eligible_slots: nba::eligible_slots(positions),
    }
}

fn settings(num_lineups: u32, uniqueness: u32) -> OptimizationSettings {
    OptimizationSettings {
        min_salary: 0,
        max_salary: 50_000,
        max_players_per_team: 4,
        uniqueness,
        num_lineups,
    }
}

/// Ten players for eight slots; the optimum is every player except the two
/// lowest projections ("9" and "10"), totalling 243.
fn ten_player_slate() -> Vec<RawPlayer> {
    vec![
        raw("1", "BOS", 8000, &["PG"], 40),
        raw("2", "BOS", 7000, &["SG"], 35),
        raw("3", "NYK", 6500, &["SF"], 33),
        raw("4", "NYK", 6000, &["PF"], 30),
        raw("5", "MIA", 7500, &["C"], 38),
        raw("6", "MIA", 5000, &["PG", "SG"], 25),
        raw("7", "LAL", 4500, &["SF", "PF"], 22),
        raw("8", "LAL", 4000, &["C"], 20),
        raw("9", "DEN", 3500, &["SG"], 18),
        raw("10", "DEN", 3000, &["PF"], 15),
    ]
}

/// Five teams with four players each: enough depth for multi-lineup runs
/// with real uniqueness pressure.
fn twenty_player_slate() -> Vec<RawPlayer> {
    let teams = ["BOS", "NYK", "MIA", "LAL", "DEN"];
    let mut slate = Vec::new();
    for (t, team) in teams.iter().enumerate() {
        let t = t as u32;
        slate.push(raw(
            &format!("pg{t}"),
            team,
            6000 - 200 * t,
            &["PG"],
            30 - t as i64,
        ));
        slate.push(raw(
            &format!("sg{t}"),
            team,
            5500 - 200 * t,
            &["SG"],
            28 - t as i64,
        ));
        slate.push(raw(
            &format!("fw{t}"),
            team,
            5000 - 200 * t,
            &["SF", "PF"],
            26 - t as i64,
        ));
        slate.push(raw(
            &format!("c{t}"),
            team,
            4500 - 200 * t,
            &["C"],
            24 - t as i64,
        ));
    }
    slate
}

/// Structural invariants every produced lineup must satisfy.
fn assert_valid_lineup(lineup: &Lineup, slate: &[RawPlayer], settings: &OptimizationSettings) {
    let plan = SlotPlan::nba();
    assert_eq!(lineup.slots.len(), plan.len(), "every slot filled once");

    let mut seen: HashSet<&PlayerId> = HashSet::new();
    let mut team_counts: HashMap<&str, u32> = HashMap::new();
    for (filled, (_, slot)) in lineup.slots.iter().zip(plan.iter()) {
        assert_eq!(filled.slot, slot.label, "slots in plan order");
        let record = slate
            .iter()
            .find(|r| r.id == filled.player.id)
            .expect("selected player exists in slate");
        assert!(
            record.eligible_slots.contains(&filled.slot),
            "player {} not eligible for slot {}",
            filled.player.id,
            filled.slot
        );
        assert!(seen.insert(&record.id), "player appears in one slot only");
        *team_counts.entry(record.team.as_str()).or_default() += 1;
    }
    for (team, count) in team_counts {
        assert!(
            count <= settings.max_players_per_team,
            "team {team} contributes {count} players"
        );
    }

    assert!(lineup.total_salary >= settings.min_salary);
    assert!(lineup.total_salary <= settings.max_salary);
    let salary: u32 = lineup.slots.iter().map(|s| s.player.salary).sum();
    assert_eq!(lineup.total_salary, salary);
}

fn shared_players(a: &Lineup, b: &Lineup) -> usize {
    b.slots.iter().filter(|s| a.contains(&s.player.id)).count()
}

fn run(
    slate: &[RawPlayer],
    overrides: &HashMap<PlayerId, PlayerOverride>,
    settings: OptimizationSettings,
) -> RunResult {
    optimize(slate, overrides, settings, SlotPlan::nba()).unwrap()
}

#[test]
fn scenario_a_single_lineup_is_the_optimum() {
    init_logs();
    let slate = ten_player_slate();
    let s = settings(1, 0);
    let result = run(&slate, &HashMap::new(), s.clone());

    assert!(result.complete);
    assert_eq!(result.requested, 1);
    assert_eq!(result.lineups.len(), 1);
    let lineup = &result.lineups[0];
    assert_valid_lineup(lineup, &slate, &s);
    assert_eq!(lineup.total_projection, Decimal::from(243));
    assert!(!lineup.contains(&PlayerId::from("9")));
    assert!(!lineup.contains(&PlayerId::from("10")));
}

#[test]
fn scenario_b_locked_player_always_selected() {
    let slate = ten_player_slate();
    let mut overrides = HashMap::new();
    overrides.insert(
        PlayerId::from("9"),
        PlayerOverride {
            locked: true,
            ..Default::default()
        },
    );
    let result = run(&slate, &overrides, settings(1, 0));
    assert!(result.complete);
    assert!(result.lineups[0].contains(&PlayerId::from("9")));
}

#[test]
fn scenario_b_locked_salary_over_cap_is_a_configuration_error() {
    let slate = ten_player_slate();
    let mut overrides = HashMap::new();
    for id in ["1", "2", "5"] {
        overrides.insert(
            PlayerId::from(id),
            PlayerOverride {
                locked: true,
                ..Default::default()
            },
        );
    }
    let mut s = settings(1, 0);
    s.max_salary = 20_000; // locks alone cost 22_500
    let err = optimize(&slate, &overrides, s, SlotPlan::nba()).unwrap_err();
    assert!(matches!(err, EngineError::Configuration(_)));
}

#[test]
fn scenario_c_consecutive_lineups_respect_uniqueness() {
    init_logs();
    let slate = twenty_player_slate();
    let s = settings(5, 3);
    let result = run(&slate, &HashMap::new(), s.clone());

    assert!(result.complete);
    assert_eq!(result.lineups.len(), 5);
    for lineup in &result.lineups {
        assert_valid_lineup(lineup, &slate, &s);
    }
    for pair in result.lineups.windows(2) {
        assert!(
            shared_players(&pair[0], &pair[1]) <= 8 - 3,
            "consecutive lineups share too many players"
        );
    }
}

#[test]
fn scenario_d_exposure_cap_is_a_reactive_soft_ceiling() {
    let mut slate = twenty_player_slate();
    // A strict standout so every unsuppressed solve wants them.
    slate[0].base_projection = Decimal::from(60);
    let star = slate[0].id.clone();

    let mut overrides = HashMap::new();
    overrides.insert(
        star.clone(),
        PlayerOverride {
            exposure_cap: Some(20),
            ..Default::default()
        },
    );
    let result = run(&slate, &overrides, settings(10, 0));
    assert!(result.complete);
    assert_eq!(result.lineups.len(), 10);

    // Reactive: the first lineup overshoots the cap before suppression can
    // engage, then the hysteresis holds the run-wide rate at the cap.
    assert!(result.lineups[0].contains(&star));
    assert!(!result.lineups[1].contains(&star));

    let exposure = result.exposures.get(&star).unwrap();
    assert_eq!(exposure.appearance_count, 2); // lineups 0 and 5
    assert_eq!(exposure.exposure_percent, 20);
}

#[test]
fn locked_player_appears_in_every_lineup_of_a_run() {
    let slate = twenty_player_slate();
    let mut overrides = HashMap::new();
    overrides.insert(
        PlayerId::from("c4"),
        PlayerOverride {
            locked: true,
            ..Default::default()
        },
    );
    let result = run(&slate, &overrides, settings(4, 2));
    assert!(result.complete);
    for lineup in &result.lineups {
        assert!(lineup.contains(&PlayerId::from("c4")));
    }
}

#[test]
fn infeasible_iteration_yields_a_partial_result() {
    // Exactly eight players: the only lineup uses all of them, so any
    // uniqueness requirement makes the second iteration infeasible.
    let slate = vec![
        raw("1", "T1", 6000, &["PG"], 30),
        raw("2", "T2", 6000, &["SG"], 28),
        raw("3", "T3", 6000, &["SF"], 26),
        raw("4", "T4", 6000, &["PF"], 24),
        raw("5", "T5", 6000, &["C"], 22),
        raw("6", "T6", 6000, &["PG"], 20),
        raw("7", "T7", 6000, &["SF"], 18),
        raw("8", "T8", 6000, &["C"], 16),
    ];
    let result = run(&slate, &HashMap::new(), settings(3, 1));

    assert!(!result.complete);
    assert_eq!(result.requested, 3);
    assert_eq!(result.lineups.len(), 1);
    // The partial exposure report covers the lineups that were produced.
    assert_eq!(
        result.exposures.get(&PlayerId::from("1")).unwrap().exposure_percent,
        100
    );
}

#[test]
fn repeated_runs_are_identical() {
    let slate = twenty_player_slate();
    let first = run(&slate, &HashMap::new(), settings(5, 3));
    let second = run(&slate, &HashMap::new(), settings(5, 3));
    assert_eq!(first.lineups, second.lineups);
}

#[test]
fn exposure_report_matches_lineup_membership() {
    let slate = twenty_player_slate();
    let result = run(&slate, &HashMap::new(), settings(5, 3));
    assert!(result.complete);
    for (id, exposure) in &result.exposures {
        let appearances = result
            .lineups
            .iter()
            .filter(|lineup| lineup.contains(id))
            .count() as u32;
        assert_eq!(exposure.appearance_count, appearances);
        assert_eq!(exposure.exposure_percent, appearances * 100 / 5);
    }
}

#[test]
fn uniqueness_above_slot_count_is_rejected() {
    let slate = ten_player_slate();
    let err = optimize(&slate, &HashMap::new(), settings(1, 9), SlotPlan::nba()).unwrap_err();
    assert!(matches!(err, EngineError::Configuration(_)));
}

#[test]
fn unavailable_solver_aborts_the_run() {
    struct MissingBackend;
    impl ModelSolver for MissingBackend {
        fn solve(
            &mut self,
            _model: &lineupforge_engine::LineupModel,
        ) -> Result<lineupforge_engine::SolveOutcome, SolverError> {
            Err(SolverError::Unavailable("cbc binary not found".into()))
        }
    }

    let slate = ten_player_slate();
    let pool =
        lineupforge_engine::build_pool(&slate, &HashMap::new(), &SlotPlan::nba()).unwrap();
    let optimizer =
        lineupforge_engine::Optimizer::new(pool, settings(1, 0), SlotPlan::nba()).unwrap();
    let err = optimizer.run(&mut MissingBackend).unwrap_err();
    assert!(matches!(err, EngineError::SolverUnavailable(_)));
}

#[test]
fn default_backend_under_node_limit_still_returns_partial() {
    let slate = twenty_player_slate();
    let pool =
        lineupforge_engine::build_pool(&slate, &HashMap::new(), &SlotPlan::nba()).unwrap();
    let optimizer =
        lineupforge_engine::Optimizer::new(pool, settings(2, 0), SlotPlan::nba()).unwrap();
    // One node is never enough to finish a solve with an incumbent.
    let mut solver = BnbSolver::new().with_node_limit(1);
    let result = optimizer.run(&mut solver).unwrap();
    assert!(!result.complete);
    assert!(result.lineups.is_empty());
}
