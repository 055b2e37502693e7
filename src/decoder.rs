// ==========================================
// APS Engine - 结果解码器与 KPI 计算器
// ==========================================
// 依据: 第4.7节 Result Decoder & KPI Computer
// ==========================================

use crate::domain::PreprocessedInput;
use crate::model::constraints::capacity::workload_total;
use crate::model::registry::VariableRegistry;
use crate::solver::SolveOutcome;
use chrono::NaiveDate;
use std::collections::HashMap;
use tracing::warn;

/// 一条已排产结果，对应 §6 CSV 输出的一行。
#[derive(Debug, Clone, PartialEq)]
pub struct ScheduledAssignment {
    pub order_id: String,
    pub customer: String,
    pub quantity: i64,
    pub due_date: NaiveDate,
    pub factory_id: String,
    pub region: String,
    pub planned_completion_date: NaiveDate,
    pub is_tardy: bool,
    pub days_tardy: i64,
    pub material_ready_date: NaiveDate,
    pub latest_confirmation_date: NaiveDate,
}

/// 单个工厂的负载率 KPI，见 §6 KPI JSON。
#[derive(Debug, Clone, PartialEq)]
pub struct FactoryLoadKpi {
    pub max_load_rate: f64,
    pub min_load_rate_active_periods: f64,
    pub average_load_rate: f64,
    pub load_rate_by_period: HashMap<NaiveDate, f64>,
}

/// 一次运行的最终产物：排产表 + KPI + 全局准时率。
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunResult {
    pub schedule: Vec<ScheduledAssignment>,
    pub kpis: HashMap<String, FactoryLoadKpi>,
    pub on_time_rate: Option<f64>,
}

/// 走查变量注册表，抽取解中每个订单恰好取 1 的变量，重建排产表与 KPI。
///
/// `outcome.status` 不在 `{OPTIMAL, FEASIBLE}` 时，调用方不应调用本函数
/// （应直接视为"无排产结果"，见 §4.6）。
pub fn decode(
    input: &PreprocessedInput,
    registry: &VariableRegistry,
    outcome: &SolveOutcome,
) -> RunResult {
    let mut schedule = Vec::new();

    for order_id in registry.orders_with_variables() {
        let order = match input.order(order_id) {
            Some(o) => o,
            None => continue,
        };
        let keys = registry.keys_for_order(order_id);
        let chosen = keys.iter().find(|k| outcome.is_set(registry.var_for(k)));

        let Some(key) = chosen else {
            warn!(order_id, "no variable set to 1 for order with variables, treating as unschedulable");
            continue;
        };

        let Some(factory) = input.factory(&key.factory_id) else { continue };
        let Some(period) = factory.period_containing(key.period_start) else { continue };

        let completion_date = period.end_date;
        let is_tardy = completion_date > order.due_date;
        let days_tardy = (completion_date - order.due_date).num_days();
        let material_ready_date = period.start_date - chrono::Duration::days(order.production_lead_time);
        let transport_lt = order.transport_lead_time_to(&factory.region).unwrap_or(0);
        let latest_confirmation_date = material_ready_date
            - chrono::Duration::days(order.material_purchasing_lead_time + transport_lt);

        schedule.push(ScheduledAssignment {
            order_id: order.order_id.clone(),
            customer: order.customer.clone(),
            quantity: order.quantity,
            due_date: order.due_date,
            factory_id: factory.factory_id.clone(),
            region: factory.region.clone(),
            planned_completion_date: completion_date,
            is_tardy,
            days_tardy,
            material_ready_date,
            latest_confirmation_date,
        });
    }

    let on_time_rate = if schedule.is_empty() {
        None
    } else {
        let n_tardy = schedule.iter().filter(|a| a.is_tardy).count();
        Some((schedule.len() - n_tardy) as f64 / schedule.len() as f64)
    };

    let kpis = compute_load_kpis(input, registry, outcome);

    RunResult { schedule, kpis, on_time_rate }
}

fn compute_load_kpis(
    input: &PreprocessedInput,
    registry: &VariableRegistry,
    outcome: &SolveOutcome,
) -> HashMap<String, FactoryLoadKpi> {
    let mut kpis = HashMap::with_capacity(input.factories.len());

    for factory in &input.factories {
        let mut load_rate_by_period = HashMap::with_capacity(factory.capacity_periods.len());

        for period in &factory.capacity_periods {
            let capacity = period.total_capacity();
            let rate = if capacity <= 0 {
                0.0
            } else {
                let mut assigned_workload = 0i64;
                for order in &input.orders {
                    if let Some(var) = registry.get(&order.order_id, &factory.factory_id, period.start_date) {
                        if outcome.is_set(var) {
                            assigned_workload += workload_total(input, &order.order_id, &factory.factory_id);
                        }
                    }
                }
                assigned_workload as f64 / capacity as f64
            };
            load_rate_by_period.insert(period.start_date, round_3(rate));
        }

        let active: Vec<f64> = load_rate_by_period.values().filter(|r| **r > 0.0).copied().collect();
        let max_load_rate = load_rate_by_period.values().cloned().fold(0.0_f64, f64::max);
        let min_load_rate_active_periods = if active.is_empty() {
            0.0
        } else {
            active.iter().cloned().fold(f64::INFINITY, f64::min)
        };
        let average_load_rate = if load_rate_by_period.is_empty() {
            0.0
        } else {
            load_rate_by_period.values().sum::<f64>() / load_rate_by_period.len() as f64
        };

        kpis.insert(
            factory.factory_id.clone(),
            FactoryLoadKpi {
                max_load_rate: round_3(max_load_rate),
                min_load_rate_active_periods: round_3(min_load_rate_active_periods),
                average_load_rate: round_3(average_load_rate),
                load_rate_by_period,
            },
        );
    }

    kpis
}

fn round_3(v: f64) -> f64 {
    (v * 1000.0).round() / 1000.0
}
