// ==========================================
// APS Engine - 预处理输入容器
// ==========================================
// 依据: 第3节 数据模型 - PreprocessedInput
// 依据: 第4.1节 预处理器与校验器
// ==========================================

use super::factory::Factory;
use super::order::Order;
use chrono::NaiveDate;
use std::collections::{HashMap, HashSet};

/// 所有经过校验、可直接用于构建约束模型的数据的只读容器。
///
/// # 所有权
/// 本结构体独占拥有工厂与订单记录；下游的约束/目标构建器只借用它，
/// 只修改模型本身（模型独占拥有全部变量）。校验完成后本结构体不再
/// 发生变化。
pub struct PreprocessedInput {
    pub factories: Vec<Factory>,
    pub orders: Vec<Order>,

    pub factory_by_id: HashMap<String, usize>,
    pub order_by_id: HashMap<String, usize>,

    pub base_date: NaiveDate,
    pub all_processes: HashSet<String>,

    /// order_id -> 不考虑效率的标准总工作量。
    pub order_total_base_workload: HashMap<String, i64>,
    /// factory_id -> (period_start_date -> 周期总产能，所有工序之和)。
    pub factory_total_capacity_by_period: HashMap<String, HashMap<NaiveDate, i64>>,

    /// 预处理阶段产生的非致命诊断信息（丢弃的工厂资格、不可排产的订单等）。
    pub diagnostics: Vec<String>,
}

impl PreprocessedInput {
    pub fn factory(&self, factory_id: &str) -> Option<&Factory> {
        self.factory_by_id.get(factory_id).map(|&i| &self.factories[i])
    }

    pub fn order(&self, order_id: &str) -> Option<&Order> {
        self.order_by_id.get(order_id).map(|&i| &self.orders[i])
    }
}
