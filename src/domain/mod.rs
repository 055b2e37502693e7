// ==========================================
// APS Engine - 领域层
// ==========================================
// 职责: 纯数据的值类型，不包含约束/目标/求解逻辑。
// ==========================================

pub mod factory;
pub mod input;
pub mod order;
pub mod types;

pub use factory::{CapacityPeriod, EfficiencyTier, Factory};
pub use input::PreprocessedInput;
pub use order::Order;
pub use types::{FixedAssignment, OrderType, SolverStatus};
