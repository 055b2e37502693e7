// ==========================================
// APS Engine - 工厂领域模型
// ==========================================
// 依据: 第3节 数据模型 - EfficiencyTier / CapacityPeriod / Factory
// ==========================================

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// 某一品类在某一数量区间内的生产效率。
///
/// 同一品类下的区间按 `min_quantity` 排序且互不重叠（由数据提供方保证，
/// 本引擎不做修复，只在查找不到匹配区间时回退为 1.0，见
/// [`crate::preprocess::efficiency_for_order`]）。
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EfficiencyTier {
    pub min_quantity: i64,
    pub max_quantity: i64,
    pub efficiency: f64,
}

impl EfficiencyTier {
    pub fn contains(&self, quantity: i64) -> bool {
        self.min_quantity <= quantity && quantity <= self.max_quantity
    }
}

/// 一个工厂在给定区间内，按工序划分的可用产能。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CapacityPeriod {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub capacity_by_process: HashMap<String, i64>,
}

impl CapacityPeriod {
    /// 该周期内所有工序产能之和，即负载均衡目标使用的"周期总产能"。
    pub fn total_capacity(&self) -> i64 {
        self.capacity_by_process.values().sum()
    }

    pub fn contains_date(&self, date: NaiveDate) -> bool {
        self.start_date <= date && date <= self.end_date
    }
}

/// 一个生产基地：区域、按品类的效率曲线、按时间排列的产能周期。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Factory {
    pub factory_id: String,
    pub region: String,
    pub production_efficiencies: HashMap<String, Vec<EfficiencyTier>>,
    pub capacity_periods: Vec<CapacityPeriod>,
}

impl Factory {
    /// 该工厂在任意周期中出现过的全部工序名称（用于资格剪枝，见
    /// [`crate::preprocess::Preprocessor`]）。
    pub fn supported_processes(&self) -> std::collections::HashSet<&str> {
        self.capacity_periods
            .iter()
            .flat_map(|p| p.capacity_by_process.keys())
            .map(String::as_str)
            .collect()
    }

    /// 查找包含给定日期的产能周期（各周期互不相交，至多一个匹配）。
    pub fn period_containing(&self, date: NaiveDate) -> Option<&CapacityPeriod> {
        self.capacity_periods.iter().find(|p| p.contains_date(date))
    }

    /// 按数量/品类查找该工厂的生产效率；未找到匹配品类或区间时返回 1.0。
    pub fn efficiency_for(&self, product_type: &str, quantity: i64) -> f64 {
        self.production_efficiencies
            .get(product_type)
            .and_then(|tiers| tiers.iter().find(|t| t.contains(quantity)))
            .map(|t| t.efficiency)
            .unwrap_or(1.0)
    }
}
