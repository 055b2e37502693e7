// ==========================================
// 量化不变量测试 (见 §8 Testable Properties)
// ==========================================

mod helpers;

use aps_engine::domain::SolverStatus;
use aps_engine::model::constraints::{
    add_capacity_constraint, add_material_lead_time_constraint, add_order_uniqueness_constraint,
};
use aps_engine::model::objectives::{assemble_objective, JitConfig, ObjectiveWeights, TardinessWeights};
use aps_engine::model::registry::build_registry;
use aps_engine::model::ModelBuilder;
use aps_engine::preprocess::Preprocessor;
use aps_engine::solver::{SolverConfig, SolverDriver};
use aps_engine::{decoder, domain::FixedAssignment};
use helpers::*;

fn build_and_solve(
    factories: Vec<aps_engine::domain::Factory>,
    orders: Vec<aps_engine::domain::Order>,
    base_date: &str,
) -> (aps_engine::domain::PreprocessedInput, aps_engine::model::registry::VariableRegistry, aps_engine::solver::SolveOutcome) {
    let input = Preprocessor::new().run(factories, orders, date(base_date)).unwrap();
    let mut model = ModelBuilder::new();
    let (registry, _) = build_registry(&mut model, &input);

    add_order_uniqueness_constraint(&mut model, &registry);
    add_capacity_constraint(&mut model, &input, &registry);
    add_material_lead_time_constraint(&mut model, &input, &registry);

    let objective = assemble_objective(
        &mut model,
        &input,
        &registry,
        ObjectiveWeights::default(),
        TardinessWeights::default(),
        JitConfig::default(),
    );
    let outcome = SolverDriver::new(SolverConfig::default()).solve(model, objective);
    (input, registry, outcome)
}

#[test]
fn uniqueness_invariant_holds_for_scheduled_orders() {
    let factory = simple_factory("F1", "CHINA", "2025-08-15", "2025-08-28", 5000);
    let order = simple_order(OrderSpec {
        order_id: "O1",
        sew_workload: 1000,
        eligible_factories: &["F1"],
        due_date: "2025-12-31",
        ..Default::default()
    });
    let (input, registry, outcome) = build_and_solve(vec![factory], vec![order], "2025-07-01");
    assert!(outcome.status.has_solution());

    let result = decoder::decode(&input, &registry, &outcome);
    assert_eq!(result.schedule.len(), 1);

    let keys = registry.keys_for_order("O1");
    let set_count = keys.iter().filter(|k| outcome.is_set(registry.var_for(k))).count();
    assert_eq!(set_count, 1);
}

#[test]
fn capacity_invariant_never_exceeded() {
    let factory = simple_factory("F1", "CHINA", "2025-08-15", "2025-08-28", 3000);
    let order_ids = ["O0", "O1", "O2"];
    let orders: Vec<_> = order_ids
        .into_iter()
        .map(|id| {
            simple_order(OrderSpec {
                order_id: id,
                sew_workload: 1000,
                eligible_factories: &["F1"],
                due_date: "2025-12-31",
                ..Default::default()
            })
        })
        .collect();

    let (input, registry, outcome) = build_and_solve(vec![factory], orders, "2025-07-01");
    assert!(outcome.status.has_solution());
    let result = decoder::decode(&input, &registry, &outcome);
    assert_eq!(result.schedule.len(), 3);

    let kpi = result.kpis.get("F1").unwrap();
    let rate = kpi.load_rate_by_period[&date("2025-08-15")];
    assert!(rate <= 1.0 + 1e-6);
}

#[test]
fn lead_time_invariant_forbids_early_start() {
    let factory = simple_factory("F1", "CHINA", "2025-08-15", "2025-08-28", 5000);
    let order = simple_order(OrderSpec {
        order_id: "O1",
        sew_workload: 1000,
        eligible_factories: &["F1"],
        due_date: "2025-12-31",
        purchasing_lt: 30,
        production_lt: 10,
        transport_lt: &[("CHINA", 20)],
        ..Default::default()
    });
    // total lead time = 60 days; base_date + 60 = 2025-08-30, after the period start.
    let (_, _, outcome) = build_and_solve(vec![factory], vec![order], "2025-07-01");
    assert_eq!(outcome.status, SolverStatus::Infeasible);
}

#[test]
fn lock_fidelity_invariant() {
    let factory = simple_factory("F1", "CHINA", "2025-08-15", "2025-08-28", 5000);
    let mut order = simple_order(OrderSpec {
        order_id: "O1",
        sew_workload: 1000,
        eligible_factories: &["F1"],
        due_date: "2025-12-31",
        ..Default::default()
    });
    order.fixed_assignment = Some(FixedAssignment {
        factory_id: Some("F1".to_string()),
        period_start_date: Some(date("2025-08-22")),
    });

    let (input, registry, outcome) = build_and_solve(vec![factory], vec![order], "2025-07-01");
    assert!(outcome.status.has_solution());
    let result = decoder::decode(&input, &registry, &outcome);
    assert_eq!(result.schedule.len(), 1);
    assert_eq!(result.schedule[0].factory_id, "F1");
    assert_eq!(result.schedule[0].planned_completion_date, date("2025-08-28"));
}

#[test]
fn unschedulable_order_with_no_eligible_factories_produces_no_variables() {
    let factory = simple_factory("F1", "CHINA", "2025-08-15", "2025-08-28", 5000);
    let order = simple_order(OrderSpec {
        order_id: "O1",
        sew_workload: 1000,
        eligible_factories: &[],
        due_date: "2025-12-31",
        ..Default::default()
    });

    let (_, registry, outcome) = build_and_solve(vec![factory], vec![order], "2025-07-01");
    assert!(registry.keys_for_order("O1").is_empty());
    assert!(outcome.status.has_solution());
}

#[test]
fn kpi_round_trip_matches_assigned_workload_over_capacity() {
    let factory = simple_factory("F1", "CHINA", "2025-08-15", "2025-08-28", 4000);
    let order = simple_order(OrderSpec {
        order_id: "O1",
        sew_workload: 1000,
        eligible_factories: &["F1"],
        due_date: "2025-12-31",
        ..Default::default()
    });

    let (input, registry, outcome) = build_and_solve(vec![factory], vec![order], "2025-07-01");
    let result = decoder::decode(&input, &registry, &outcome);
    let kpi = result.kpis.get("F1").unwrap();
    let rate = kpi.load_rate_by_period[&date("2025-08-15")];
    assert!((rate - 0.25).abs() < 1e-3);
}
