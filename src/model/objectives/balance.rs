// ==========================================
// 负载均衡目标 (minimax load ratio + "used" 指示变量)
// ==========================================
// 依据: §4.4.3 — 全局 maxR/minR 刻画各 (工厂, 周期) 负载比率的峰值
// 与谷值；未使用的周期只单向耦合进 maxR，不会把 minR 拖到 0
// (见 §9 Open Question b 的既定解)。
// ==========================================

use crate::domain::PreprocessedInput;
use crate::model::constraints::capacity::workload_total;
use crate::model::registry::VariableRegistry;
use crate::model::{Expr, ModelBuilder, RATIO_SCALE};
use good_lp::Expression;

/// 构建负载均衡目标表达式：`0.5*(maxR-minR) + 0.5*maxR`。
///
/// 没有任何总产能 > 0 的周期时返回 `None`（没有比率可言）。
pub fn add_balance_objective(
    model: &mut ModelBuilder,
    input: &PreprocessedInput,
    registry: &VariableRegistry,
) -> Option<Expr> {
    let max_r = model.add_int_var(0, (2.0 * RATIO_SCALE) as i64);
    let min_r = model.add_int_var(0, (2.0 * RATIO_SCALE) as i64);
    model.add_constraint(good_lp::constraint!(min_r <= max_r));

    let mut any_period = false;

    for factory in &input.factories {
        for period in &factory.capacity_periods {
            let capacity = period.total_capacity();
            if capacity <= 0 {
                continue;
            }
            any_period = true;
            let capacity = capacity as f64;

            let mut workload_expr = Expression::from(0.0);
            let mut scaled_workload_expr = Expression::from(0.0);
            for order in &input.orders {
                let Some(var) =
                    registry.get(&order.order_id, &factory.factory_id, period.start_date)
                else {
                    continue;
                };
                let workload = workload_total(input, &order.order_id, &factory.factory_id) as f64;
                workload_expr += workload * var;
                scaled_workload_expr += (workload * RATIO_SCALE) * var;
            }

            let used = model.add_bool_var();
            // W <= C * used：零工作量的周期可以自由选择 used=0。
            model.add_constraint(good_lp::constraint!(workload_expr <= capacity * used));

            // 上界耦合 (始终生效): maxR * C >= W * S
            model.add_constraint(good_lp::constraint!(
                capacity * max_r >= scaled_workload_expr.clone()
            ));

            // 下界耦合 (仅当 used=1 生效)，big-M = 2*S*C 足够松弛 used=0 的情形。
            let big_m = 2.0 * RATIO_SCALE * capacity;
            model.add_constraint(good_lp::constraint!(
                capacity * min_r - scaled_workload_expr + big_m * used <= big_m
            ));
        }
    }

    if !any_period {
        return None;
    }

    let mut cost = Expression::from(0.0);
    cost += 1.0 * max_r;
    cost += -0.5 * min_r;
    Some(cost)
}
