// ==========================================
// 组合目标装配器
// ==========================================
// 依据: §4.5 — 按配置权重对三个子目标求和；全部权重为 0 时模型
// 退化为纯可行性问题 (无目标函数)。
// ==========================================

use crate::domain::PreprocessedInput;
use crate::model::objectives::{
    add_balance_objective, add_jit_objective, add_tardiness_objective, JitConfig,
    TardinessWeights,
};
use crate::model::registry::VariableRegistry;
use crate::model::{Expr, ModelBuilder};
use good_lp::Expression;
use tracing::info;

/// `objective_weights.{tardiness,jit_deviation,workload_balance}`，见 §6。
#[derive(Debug, Clone, Copy, Default)]
pub struct ObjectiveWeights {
    pub tardiness: f64,
    pub jit_deviation: f64,
    pub workload_balance: f64,
}

/// 装配最终的组合目标表达式。权重全部为 0（或对应子目标没有产生
/// 任何可行项）时返回 `None`，由调用方据此跳过 `.minimise(...)`。
pub fn assemble_objective(
    model: &mut ModelBuilder,
    input: &PreprocessedInput,
    registry: &VariableRegistry,
    weights: ObjectiveWeights,
    tardiness_weights: TardinessWeights,
    jit_config: JitConfig,
) -> Option<Expr> {
    let mut total = Expression::from(0.0);
    let mut has_term = false;

    if weights.tardiness > 0.0 {
        if let Some(rate) = add_tardiness_objective(model, input, registry, tardiness_weights) {
            total += rate * weights.tardiness;
            has_term = true;
        }
    }

    if weights.jit_deviation > 0.0 {
        if let Some(rate) = add_jit_objective(model, input, registry, jit_config) {
            total += rate * weights.jit_deviation;
            has_term = true;
        }
    }

    if weights.workload_balance > 0.0 {
        if let Some(rate) = add_balance_objective(model, input, registry) {
            total += rate * weights.workload_balance;
            has_term = true;
        }
    }

    if !has_term {
        info!("no objective terms active, model reduces to pure feasibility");
        return None;
    }

    Some(total)
}
