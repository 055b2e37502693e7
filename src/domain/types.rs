// ==========================================
// APS Engine - 领域基础类型
// ==========================================
// 依据: 第3节 数据模型
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

/// 订单类型：正式单 (firm) 还是预测单 (forecast)。
///
/// 输入 JSON 的 `order_type` 字段是裸整数 (0/1)；`Order` 直接存储该
/// `u8`，这个枚举只用于内部逻辑分支，避免在延误率/组合目标等代码里
/// 反复写魔法数字。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OrderType {
    Forecast,
    Firm,
}

impl From<u8> for OrderType {
    fn from(raw: u8) -> Self {
        if raw == 1 {
            OrderType::Firm
        } else {
            OrderType::Forecast
        }
    }
}

impl fmt::Display for OrderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrderType::Forecast => write!(f, "forecast"),
            OrderType::Firm => write!(f, "firm"),
        }
    }
}

/// 订单的锁定/固定分配要求。两个字段均可独立缺省。
///
/// # 红线
/// 锁定日期在变量注册阶段会被"吸附"到其所在的产能周期；
/// 若吸附失败（日期落在任何周期之外），该订单被标记为不可排产
/// 而不是让流程失败（见 [`crate::error`] 与 `LockError` 诊断）。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FixedAssignment {
    #[serde(default)]
    pub factory_id: Option<String>,
    #[serde(default)]
    pub period_start_date: Option<chrono::NaiveDate>,
}

/// 求解器报告的模型状态，见第 4.6 节。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolverStatus {
    Optimal,
    Feasible,
    Infeasible,
    ModelInvalid,
    Unknown,
}

impl SolverStatus {
    /// `true` 当求解器产出了一个可用于解码的解 (OPTIMAL 或 FEASIBLE)。
    pub fn has_solution(self) -> bool {
        matches!(self, SolverStatus::Optimal | SolverStatus::Feasible)
    }
}

impl fmt::Display for SolverStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SolverStatus::Optimal => "OPTIMAL",
            SolverStatus::Feasible => "FEASIBLE",
            SolverStatus::Infeasible => "INFEASIBLE",
            SolverStatus::ModelInvalid => "MODEL_INVALID",
            SolverStatus::Unknown => "UNKNOWN",
        };
        write!(f, "{s}")
    }
}
