// ==========================================
// 端到端场景测试 (S1-S6)
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
use std::collections::HashMap;

fn run_with_constraints(
    factories: Vec<aps_engine::domain::Factory>,
    orders: Vec<aps_engine::domain::Order>,
    base_date: &str,
    weights: ObjectiveWeights,
) -> (SolverStatus, decoder::RunResult) {
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
        weights,
        TardinessWeights::default(),
        JitConfig::default(),
    );

    let outcome = SolverDriver::new(SolverConfig::default()).solve(model, objective);
    let result = if outcome.status.has_solution() {
        decoder::decode(&input, &registry, &outcome)
    } else {
        decoder::RunResult::default()
    };
    (outcome.status, result)
}

#[test]
fn s1_unique_assignment_no_tardiness() {
    let factory = simple_factory("F1", "CHINA", "2025-08-15", "2025-08-28", 5000);
    let order = simple_order(OrderSpec {
        order_id: "O1",
        quantity: 1000,
        due_date: "2025-09-30",
        sew_workload: 1500,
        eligible_factories: &["F1"],
        purchasing_lt: 10,
        production_lt: 5,
        transport_lt: &[("CHINA", 20)],
        ..Default::default()
    });

    let (status, result) = run_with_constraints(vec![factory], vec![order], "2025-07-01", ObjectiveWeights::default());

    assert!(status.has_solution());
    assert_eq!(result.schedule.len(), 1);
    let row = &result.schedule[0];
    assert_eq!(row.factory_id, "F1");
    assert_eq!(row.planned_completion_date, date("2025-08-28"));
    assert!(!row.is_tardy);

    let kpi = result.kpis.get("F1").unwrap();
    assert!((kpi.load_rate_by_period[&date("2025-08-15")] - 0.300).abs() < 1e-3);
}

#[test]
fn s2_lead_time_infeasibility() {
    let factory = simple_factory("F1", "CHINA", "2025-08-15", "2025-08-28", 5000);
    let order = simple_order(OrderSpec {
        order_id: "O1",
        quantity: 1000,
        due_date: "2025-09-30",
        sew_workload: 1500,
        eligible_factories: &["F1"],
        purchasing_lt: 10,
        production_lt: 5,
        transport_lt: &[("CHINA", 20)],
        ..Default::default()
    });

    // base_date 推后到 2025-08-10：最早可行开工日 2025-08-10+35=2025-09-14，
    // 晚于唯一周期的开始日，变量被清零 -> 唯一性约束不可满足。
    let (status, result) =
        run_with_constraints(vec![factory], vec![order], "2025-08-10", ObjectiveWeights::default());

    assert_eq!(status, SolverStatus::Infeasible);
    assert!(result.schedule.is_empty());
}

#[test]
fn s3_capacity_split_infeasible() {
    let factory = simple_factory("F1", "CHINA", "2025-08-15", "2025-08-28", 6000);
    let o1 = simple_order(OrderSpec {
        order_id: "O1",
        quantity: 1000,
        sew_workload: 4000,
        eligible_factories: &["F1"],
        due_date: "2025-12-31",
        ..Default::default()
    });
    let o2 = simple_order(OrderSpec {
        order_id: "O2",
        quantity: 1000,
        sew_workload: 4000,
        eligible_factories: &["F1"],
        due_date: "2025-12-31",
        ..Default::default()
    });

    let (status, _) =
        run_with_constraints(vec![factory], vec![o1, o2], "2025-07-01", ObjectiveWeights::default());

    assert_eq!(status, SolverStatus::Infeasible);
}

#[test]
fn s4_efficiency_tier_inflates_workload() {
    let factory = simple_factory("F1", "CHINA", "2025-08-15", "2025-08-28", 2000);
    let factory = with_efficiency_tier(factory, "T1", 0, 999, 0.5);
    let order = simple_order(OrderSpec {
        order_id: "O1",
        product_type: "T1",
        quantity: 800,
        sew_workload: 1000,
        eligible_factories: &["F1"],
        due_date: "2025-12-31",
        ..Default::default()
    });

    // floor(1000/0.5) = 2000，恰好等于周期产能，应当可行。
    let (status, result) =
        run_with_constraints(vec![factory], vec![order], "2025-07-01", ObjectiveWeights::default());
    assert!(status.has_solution());
    assert_eq!(result.schedule.len(), 1);
}

#[test]
fn s5_jit_balance_prefers_earlier_period() {
    let mut cap_a = HashMap::new();
    cap_a.insert("sew".to_string(), 5000);
    let mut cap_b = HashMap::new();
    cap_b.insert("sew".to_string(), 5000);

    let factory = aps_engine::domain::Factory {
        factory_id: "F1".to_string(),
        region: "CHINA".to_string(),
        production_efficiencies: HashMap::new(),
        capacity_periods: vec![
            aps_engine::domain::CapacityPeriod {
                start_date: date("2025-09-01"),
                end_date: date("2025-09-15"),
                capacity_by_process: cap_a,
            },
            aps_engine::domain::CapacityPeriod {
                start_date: date("2025-09-16"),
                end_date: date("2025-10-15"),
                capacity_by_process: cap_b,
            },
        ],
    };

    let o1 = simple_order(OrderSpec {
        order_id: "O1",
        quantity: 1000,
        sew_workload: 1000,
        eligible_factories: &["F1"],
        due_date: "2025-09-30",
        transport_lt: &[("CHINA", 0)],
        ..Default::default()
    });
    let o2 = simple_order(OrderSpec {
        order_id: "O2",
        quantity: 1000,
        sew_workload: 1000,
        eligible_factories: &["F1"],
        due_date: "2025-09-30",
        transport_lt: &[("CHINA", 0)],
        ..Default::default()
    });

    let weights = ObjectiveWeights { tardiness: 0.0, jit_deviation: 1.0, workload_balance: 0.0 };
    let (status, result) = run_with_constraints(vec![factory], vec![o1, o2], "2025-07-01", weights);

    assert!(status.has_solution());
    assert_eq!(result.schedule.len(), 2);
    for row in &result.schedule {
        assert_eq!(row.planned_completion_date, date("2025-09-15"));
    }
}

#[test]
fn s6_lock_override_pins_assignment() {
    let factory = simple_factory("F1", "CHINA", "2025-08-15", "2025-08-28", 5000);
    let mut order = simple_order(OrderSpec {
        order_id: "O1",
        quantity: 1000,
        due_date: "2025-09-30",
        sew_workload: 1500,
        eligible_factories: &["F1"],
        purchasing_lt: 10,
        production_lt: 5,
        transport_lt: &[("CHINA", 20)],
        ..Default::default()
    });
    order.fixed_assignment = Some(FixedAssignment {
        factory_id: Some("F1".to_string()),
        period_start_date: Some(date("2025-08-20")),
    });

    let (status, result) =
        run_with_constraints(vec![factory], vec![order], "2025-07-01", ObjectiveWeights::default());

    assert!(status.has_solution());
    assert_eq!(result.schedule.len(), 1);
    assert_eq!(result.schedule[0].factory_id, "F1");
    // 锁定日期 2025-08-20 落在 2025-08-15..2025-08-28 周期内，应被吸附到该周期。
    assert_eq!(result.schedule[0].planned_completion_date, date("2025-08-28"));
}
