// ==========================================
// APS Engine - 预处理器与校验器
// ==========================================
// 依据: 第4.1节 Preprocessor & Validator
// 红线: base_date 只从配置解析一次；日历天算术全部基于它的整数偏移
// ==========================================

use crate::domain::{Factory, Order, PreprocessedInput};
use crate::error::{AppError, AppResult};
use chrono::NaiveDate;
use std::collections::{HashMap, HashSet};
use tracing::{info, warn};

/// 预处理器：把原始（已反序列化）的工厂/订单列表转换为
/// [`PreprocessedInput`]，并在过程中剪枝不合格的工厂资格。
pub struct Preprocessor;

impl Preprocessor {
    pub fn new() -> Self {
        Self
    }

    /// 运行预处理管道。
    ///
    /// # 错误
    /// - 工厂或订单的 `*_id` 重复 -> `AppError::Configuration`。
    /// - `base_date` 不是合法的 `YYYY-MM-DD` -> `AppError::Configuration`。
    pub fn run(
        &self,
        mut factories: Vec<Factory>,
        mut orders: Vec<Order>,
        base_date: NaiveDate,
    ) -> AppResult<PreprocessedInput> {
        info!(factories = factories.len(), orders = orders.len(), "starting preprocessing");

        let mut factory_by_id = HashMap::with_capacity(factories.len());
        for (idx, f) in factories.iter().enumerate() {
            if factory_by_id.insert(f.factory_id.clone(), idx).is_some() {
                return Err(AppError::config(format!(
                    "duplicate factory_id: {}",
                    f.factory_id
                )));
            }
        }

        let mut order_by_id = HashMap::with_capacity(orders.len());
        for (idx, o) in orders.iter().enumerate() {
            if order_by_id.insert(o.order_id.clone(), idx).is_some() {
                return Err(AppError::config(format!("duplicate order_id: {}", o.order_id)));
            }
        }

        let mut all_processes: HashSet<String> = HashSet::new();
        let mut factory_total_capacity_by_period: HashMap<String, HashMap<NaiveDate, i64>> =
            HashMap::new();

        for factory in &factories {
            let mut by_period = HashMap::with_capacity(factory.capacity_periods.len());
            for period in &factory.capacity_periods {
                by_period.insert(period.start_date, period.total_capacity());
                all_processes.extend(period.capacity_by_process.keys().cloned());
            }
            factory_total_capacity_by_period.insert(factory.factory_id.clone(), by_period);
        }

        let mut order_total_base_workload: HashMap<String, i64> = HashMap::with_capacity(orders.len());
        for order in &orders {
            order_total_base_workload.insert(order.order_id.clone(), order.base_workload());
            all_processes.extend(order.total_process_capacity.keys().cloned());
        }

        let mut diagnostics = Vec::new();

        // 剪枝: 每个订单的 eligible_factories 中，
        //  1) 工厂 id 必须存在；
        //  2) 工厂支持的工序集合必须是该订单所需工序集合的超集。
        for order in &mut orders {
            let order_processes: HashSet<&str> =
                order.total_process_capacity.keys().map(String::as_str).collect();

            let before = order.eligible_factories.len();
            order.eligible_factories.retain(|fid| {
                let Some(&idx) = factory_by_id.get(fid) else {
                    warn!(order_id = %order.order_id, factory_id = %fid, "eligible factory does not exist, dropped");
                    return false;
                };
                let factory = &factories[idx];
                let supported = factory.supported_processes();
                let ok = order_processes.iter().all(|p| supported.contains(p));
                if !ok {
                    warn!(
                        order_id = %order.order_id,
                        factory_id = %fid,
                        "eligible factory lacks a required process, dropped"
                    );
                }
                ok
            });

            if order.eligible_factories.len() != before {
                diagnostics.push(format!(
                    "order {}: {} eligible factories dropped during validation",
                    order.order_id,
                    before - order.eligible_factories.len()
                ));
            }

            if order.eligible_factories.is_empty() && !order.is_locked() {
                let msg = format!(
                    "order {} has no eligible factories and no fixed assignment; unschedulable",
                    order.order_id
                );
                warn!("{msg}");
                diagnostics.push(msg);
            }
        }

        info!(all_processes = ?all_processes, "preprocessing complete");

        Ok(PreprocessedInput {
            factories,
            orders,
            factory_by_id,
            order_by_id,
            base_date,
            all_processes,
            order_total_base_workload,
            factory_total_capacity_by_period,
            diagnostics,
        })
    }
}

impl Default for Preprocessor {
    fn default() -> Self {
        Self::new()
    }
}

/// 按数量/品类查找某订单在某工厂的生产效率；未找到匹配品类或区间
/// 时回退为 1.0（见 §4.3.2）。
pub fn efficiency_for_order(order: &Order, factory: &Factory) -> f64 {
    factory.efficiency_for(&order.product_type, order.quantity)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CapacityPeriod, EfficiencyTier};
    use std::collections::HashMap;

    fn factory(id: &str, processes: &[&str]) -> Factory {
        let mut cap = HashMap::new();
        for p in processes {
            cap.insert(p.to_string(), 100);
        }
        Factory {
            factory_id: id.to_string(),
            region: "CHINA".to_string(),
            production_efficiencies: HashMap::new(),
            capacity_periods: vec![CapacityPeriod {
                start_date: NaiveDate::from_ymd_opt(2025, 8, 15).unwrap(),
                end_date: NaiveDate::from_ymd_opt(2025, 8, 28).unwrap(),
                capacity_by_process: cap,
            }],
        }
    }

    fn order(id: &str, processes: &[&str], eligible: &[&str]) -> Order {
        let mut proc_map = HashMap::new();
        for p in processes {
            proc_map.insert(p.to_string(), 10);
        }
        Order {
            order_id: id.to_string(),
            customer: "ACME".to_string(),
            product_type: "T1".to_string(),
            style: "S1".to_string(),
            quantity: 100,
            due_date: NaiveDate::from_ymd_opt(2025, 9, 30).unwrap(),
            material_purchasing_lead_time: 0,
            material_transportation_to_region_lead_time: HashMap::new(),
            production_lead_time: 0,
            total_process_capacity: proc_map,
            eligible_factories: eligible.iter().map(|s| s.to_string()).collect(),
            order_type: 1,
            fixed_assignment: None,
        }
    }

    #[test]
    fn drops_nonexistent_factory() {
        let f = factory("F1", &["sew"]);
        let o = order("O1", &["sew"], &["F1", "F2"]);
        let pp = Preprocessor::new()
            .run(vec![f], vec![o], NaiveDate::from_ymd_opt(2025, 7, 1).unwrap())
            .unwrap();
        let order = pp.order("O1").unwrap();
        assert_eq!(order.eligible_factories, vec!["F1".to_string()]);
    }

    #[test]
    fn drops_factory_missing_process() {
        let f = factory("F1", &["cut"]);
        let o = order("O1", &["sew"], &["F1"]);
        let pp = Preprocessor::new()
            .run(vec![f], vec![o], NaiveDate::from_ymd_opt(2025, 7, 1).unwrap())
            .unwrap();
        let order = pp.order("O1").unwrap();
        assert!(order.eligible_factories.is_empty());
        assert!(!pp.diagnostics.is_empty());
    }

    #[test]
    fn duplicate_factory_id_is_configuration_error() {
        let f1 = factory("F1", &["sew"]);
        let f2 = factory("F1", &["cut"]);
        let result = Preprocessor::new().run(
            vec![f1, f2],
            vec![],
            NaiveDate::from_ymd_opt(2025, 7, 1).unwrap(),
        );
        assert!(matches!(result, Err(AppError::Configuration(_))));
    }
}
