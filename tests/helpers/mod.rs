// ==========================================
// 测试辅助函数
// ==========================================
// 职责: 提供 Factory/Order 测试夹具的简洁构造函数
// ==========================================

use aps_engine::domain::{CapacityPeriod, EfficiencyTier, Factory, Order};
use chrono::NaiveDate;
use std::collections::HashMap;

pub fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

/// 构造一个只有缝纫工序、单一产能周期、效率恒为 1.0 的工厂。
pub fn simple_factory(factory_id: &str, region: &str, period_start: &str, period_end: &str, sew_capacity: i64) -> Factory {
    let mut capacity_by_process = HashMap::new();
    capacity_by_process.insert("sew".to_string(), sew_capacity);

    Factory {
        factory_id: factory_id.to_string(),
        region: region.to_string(),
        production_efficiencies: HashMap::new(),
        capacity_periods: vec![CapacityPeriod {
            start_date: date(period_start),
            end_date: date(period_end),
            capacity_by_process,
        }],
    }
}

/// 为工厂追加一个效率档位。
pub fn with_efficiency_tier(
    mut factory: Factory,
    product_type: &str,
    min_quantity: i64,
    max_quantity: i64,
    efficiency: f64,
) -> Factory {
    factory
        .production_efficiencies
        .entry(product_type.to_string())
        .or_insert_with(Vec::new)
        .push(EfficiencyTier { min_quantity, max_quantity, efficiency });
    factory
}

pub struct OrderSpec<'a> {
    pub order_id: &'a str,
    pub product_type: &'a str,
    pub quantity: i64,
    pub due_date: &'a str,
    pub sew_workload: i64,
    pub eligible_factories: &'a [&'a str],
    pub purchasing_lt: i64,
    pub production_lt: i64,
    pub transport_lt: &'a [(&'a str, i64)],
}

impl<'a> Default for OrderSpec<'a> {
    fn default() -> Self {
        Self {
            order_id: "O1",
            product_type: "T1",
            quantity: 1000,
            due_date: "2025-09-30",
            sew_workload: 1000,
            eligible_factories: &[],
            purchasing_lt: 0,
            production_lt: 0,
            transport_lt: &[],
        }
    }
}

pub fn simple_order(spec: OrderSpec) -> Order {
    let mut total_process_capacity = HashMap::new();
    total_process_capacity.insert("sew".to_string(), spec.sew_workload);

    let mut transport = HashMap::new();
    for (region, days) in spec.transport_lt {
        transport.insert(region.to_string(), *days);
    }

    Order {
        order_id: spec.order_id.to_string(),
        customer: "ACME".to_string(),
        product_type: spec.product_type.to_string(),
        style: "S1".to_string(),
        quantity: spec.quantity,
        due_date: date(spec.due_date),
        material_purchasing_lead_time: spec.purchasing_lt,
        material_transportation_to_region_lead_time: transport,
        production_lead_time: spec.production_lt,
        total_process_capacity,
        eligible_factories: spec.eligible_factories.iter().map(|s| s.to_string()).collect(),
        order_type: 1,
        fixed_assignment: None,
    }
}
