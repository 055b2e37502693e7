// ==========================================
// APS Engine - 约束构建器
// ==========================================
// 依据: 第4.3节 Constraint Builders
// ==========================================

pub mod capacity;
pub mod lead_time;
pub mod uniqueness;

pub use capacity::add_capacity_constraint;
pub use lead_time::add_material_lead_time_constraint;
pub use uniqueness::add_order_uniqueness_constraint;

/// 配置文件 `active_constraints` 列表里允许出现的约束名称，见 §6。
pub const ORDER_UNIQUE_ASSIGN: &str = "order_unique_assign";
pub const CAPACITY: &str = "capacity";
pub const MATERIAL_LEAD_TIME: &str = "material_lead_time";
