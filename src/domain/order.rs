// ==========================================
// APS Engine - 订单领域模型
// ==========================================
// 依据: 第3节 数据模型 - Order
// ==========================================

use super::types::{FixedAssignment, OrderType};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// 一个不可拆分的生产订单。
///
/// `eligible_factories` 在预处理阶段会被就地剪枝（见
/// [`crate::preprocess::Preprocessor`]）——这是数据模型中唯一一处
/// 校验后仍可变的字段，其余字段在预处理完成后视为不可变。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub order_id: String,
    pub customer: String,
    pub product_type: String,
    pub style: String,
    pub quantity: i64,
    pub due_date: NaiveDate,
    pub material_purchasing_lead_time: i64,
    pub material_transportation_to_region_lead_time: HashMap<String, i64>,
    pub production_lead_time: i64,
    pub total_process_capacity: HashMap<String, i64>,
    pub eligible_factories: Vec<String>,
    pub order_type: u8,
    #[serde(default)]
    pub fixed_assignment: Option<FixedAssignment>,
}

impl Order {
    pub fn order_type(&self) -> OrderType {
        OrderType::from(self.order_type)
    }

    /// 该订单不考虑效率的标准总工作量，即各工序工作量之和。
    pub fn base_workload(&self) -> i64 {
        self.total_process_capacity.values().sum()
    }

    /// 该订单是否带有锁定要求。
    pub fn is_locked(&self) -> bool {
        self.fixed_assignment.is_some()
    }

    /// 运往某区域的物料运输前置时间；区域未配置时视为 +∞
    /// （即该工厂上的所有分配都应被物料前置时间约束清零，见 §4.3.3）。
    pub fn transport_lead_time_to(&self, region: &str) -> Option<i64> {
        self.material_transportation_to_region_lead_time
            .get(region)
            .copied()
    }

    /// 该订单到货所需的总前置时间（采购 + 运输 + 生产），单位：天。
    /// 区域缺失运输前置时间时返回 `None`，表示不可行（+∞）。
    pub fn total_lead_time_days(&self, region: &str) -> Option<i64> {
        let transport = self.transport_lead_time_to(region)?;
        Some(self.material_purchasing_lead_time + transport + self.production_lead_time)
    }
}
