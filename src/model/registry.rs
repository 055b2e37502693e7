// ==========================================
// APS Engine - 变量注册表
// ==========================================
// 依据: 第4.2节 Variable Registry
// 红线: 变量创建顺序 = 订单 × 可生产工厂 × 周期 (§5 确定性保证)
// ==========================================

use super::{ModelBuilder, Var};
use crate::domain::PreprocessedInput;
use chrono::NaiveDate;
use std::collections::HashMap;
use tracing::warn;

/// 一个具体的 (订单, 工厂, 周期) 组合，对应一个布尔决策变量。
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AssignmentKey {
    pub order_id: String,
    pub factory_id: String,
    pub period_start: NaiveDate,
}

/// §9 所说的"扁平表"实现：稀疏的、预先剪枝过的变量格。遍历顺序由
/// `order_of` 记录的插入序决定，对给定输入是确定性的。
pub struct VariableRegistry {
    vars: HashMap<AssignmentKey, Var>,
    /// order_id -> 该订单的所有 assignment key，按插入顺序排列。
    by_order: HashMap<String, Vec<AssignmentKey>>,
    /// 所有曾经创建过变量的订单 id，按插入顺序排列 (用于唯一性约束遍历)。
    order_order: Vec<String>,
}

impl VariableRegistry {
    pub fn get(&self, order_id: &str, factory_id: &str, period_start: NaiveDate) -> Option<Var> {
        self.vars
            .get(&AssignmentKey {
                order_id: order_id.to_string(),
                factory_id: factory_id.to_string(),
                period_start,
            })
            .copied()
    }

    /// 某订单的全部 assignment key，按创建顺序返回；订单没有任何变量
    /// 时返回空切片。
    pub fn keys_for_order(&self, order_id: &str) -> &[AssignmentKey] {
        self.by_order
            .get(order_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn var_for(&self, key: &AssignmentKey) -> Var {
        *self.vars.get(key).expect("assignment key must exist in registry")
    }

    /// 所有拥有至少一个变量的订单 id，按创建顺序遍历。
    pub fn orders_with_variables(&self) -> impl Iterator<Item = &str> {
        self.order_order.iter().map(String::as_str)
    }

    pub fn total_variables(&self) -> usize {
        self.vars.len()
    }

    fn insert(&mut self, key: AssignmentKey, var: Var) {
        if !self.by_order.contains_key(&key.order_id) {
            self.order_order.push(key.order_id.clone());
        }
        self.by_order.entry(key.order_id.clone()).or_default().push(key.clone());
        self.vars.insert(key, var);
    }
}

/// 构建变量注册表；返回注册表本身以及本阶段产生的诊断信息
/// （越权锁定日期等，对应 §7 的 `LockError`）。
pub fn build_registry(
    model: &mut ModelBuilder,
    input: &PreprocessedInput,
) -> (VariableRegistry, Vec<String>) {
    let mut registry = VariableRegistry {
        vars: HashMap::new(),
        by_order: HashMap::new(),
        order_order: Vec::new(),
    };
    let mut diagnostics = Vec::new();

    for order in &input.orders {
        match &order.fixed_assignment {
            None => {
                if order.eligible_factories.is_empty() {
                    continue; // already diagnosed as unschedulable in preprocessing
                }
                for factory_id in &order.eligible_factories {
                    let Some(factory) = input.factory(factory_id) else { continue };
                    for period in &factory.capacity_periods {
                        let var = model.add_bool_var();
                        registry.insert(
                            AssignmentKey {
                                order_id: order.order_id.clone(),
                                factory_id: factory_id.clone(),
                                period_start: period.start_date,
                            },
                            var,
                        );
                    }
                }
            }
            Some(lock) => {
                // restrict outer factory set
                let candidate_factories: Vec<&String> = match &lock.factory_id {
                    Some(fid) => {
                        if !order.eligible_factories.iter().any(|f| f == fid) {
                            let msg = format!(
                                "order {}: locked factory {} is not in its eligible set; unschedulable",
                                order.order_id, fid
                            );
                            warn!("{msg}");
                            diagnostics.push(msg);
                            continue;
                        }
                        vec![fid]
                    }
                    None => order.eligible_factories.iter().collect(),
                };

                if candidate_factories.is_empty() {
                    continue;
                }

                // resolve (factory, period) pairs, applying date snapping if requested
                let mut pairs: Vec<(&String, NaiveDate)> = Vec::new();
                match lock.period_start_date {
                    Some(date) => {
                        for factory_id in &candidate_factories {
                            let Some(factory) = input.factory(factory_id) else { continue };
                            if let Some(period) = factory.period_containing(date) {
                                pairs.push((factory_id, period.start_date));
                            }
                        }
                        if pairs.is_empty() {
                            let msg = format!(
                                "order {}: locked date {} falls outside any period of its candidate factories; unschedulable",
                                order.order_id, date
                            );
                            warn!("{msg}");
                            diagnostics.push(msg);
                            continue;
                        }
                    }
                    None => {
                        for factory_id in &candidate_factories {
                            let Some(factory) = input.factory(factory_id) else { continue };
                            for period in &factory.capacity_periods {
                                pairs.push((factory_id, period.start_date));
                            }
                        }
                    }
                }

                let pin_exact = lock.factory_id.is_some() && lock.period_start_date.is_some();

                for (factory_id, period_start) in pairs {
                    let var = model.add_bool_var();
                    if pin_exact {
                        model.add_constraint(good_lp::constraint!(var == 1.0));
                    }
                    registry.insert(
                        AssignmentKey {
                            order_id: order.order_id.clone(),
                            factory_id: factory_id.clone(),
                            period_start,
                        },
                        var,
                    );
                }
            }
        }
    }

    (registry, diagnostics)
}
