// ==========================================
// JIT 偏差目标 (minimax 形式)
// ==========================================
// 依据: §4.4.2 — 每个订单持有提前量/延期量两个整数辅助变量，二者
// 之差固定为完工日与交期的偏移；全局 maxE/maxT 通过单向不等式在
// 最小化方向上自然收紧为真正的最大值 (无需 good_lp 不具备的
// AddMaxEquality 原语)。
// ==========================================

use crate::domain::PreprocessedInput;
use crate::model::registry::VariableRegistry;
use crate::model::{Expr, ModelBuilder, JIT_HORIZON_DAYS};
use good_lp::Expression;

/// JIT 目标的配置，见 §6 `jit_objective_config`。
#[derive(Debug, Clone, Copy)]
pub struct JitConfig {
    pub allowed_earliness_deviation_days: i64,
    pub allowed_tardiness_deviation_days: i64,
    pub earliness_weight: f64,
    pub lateness_weight: f64,
}

impl Default for JitConfig {
    fn default() -> Self {
        Self {
            allowed_earliness_deviation_days: 30,
            allowed_tardiness_deviation_days: 30,
            earliness_weight: 0.3,
            lateness_weight: 0.7,
        }
    }
}

/// 构建 JIT 偏差目标表达式。没有订单拥有变量时返回 `None`。
pub fn add_jit_objective(
    model: &mut ModelBuilder,
    input: &PreprocessedInput,
    registry: &VariableRegistry,
    config: JitConfig,
) -> Option<Expr> {
    let horizon = JIT_HORIZON_DAYS;
    let max_e = model.add_int_var(0, horizon);
    let max_t = model.add_int_var(0, horizon);
    let mut any_order = false;

    for order in &input.orders {
        let keys = registry.keys_for_order(&order.order_id);
        let e_o = model.add_int_var(0, horizon);
        let t_o = model.add_int_var(0, horizon);

        if keys.is_empty() {
            model.add_constraint(good_lp::constraint!(e_o == 0.0));
            model.add_constraint(good_lp::constraint!(t_o == 0.0));
            continue;
        }
        any_order = true;

        let due_offset = (order.due_date - input.base_date).num_days() as f64;

        let mut completion = Expression::from(0.0);
        for key in keys {
            let Some(factory) = input.factory(&key.factory_id) else { continue };
            let Some(period) = factory.period_containing(key.period_start) else { continue };
            let var = registry.var_for(key);
            let offset = (period.end_date - input.base_date).num_days() as f64;
            completion += offset * var;
        }

        // CD_o - DD_o = T_o - E_o
        model.add_constraint(good_lp::constraint!(
            completion - due_offset == t_o - e_o
        ));

        model.add_constraint(good_lp::constraint!(max_e >= e_o));
        model.add_constraint(good_lp::constraint!(max_t >= t_o));
    }

    if !any_order {
        return None;
    }

    let mut rate = Expression::from(0.0);
    rate += (config.earliness_weight / config.allowed_earliness_deviation_days as f64) * max_e;
    rate += (config.lateness_weight / config.allowed_tardiness_deviation_days as f64) * max_t;

    Some(rate)
}
