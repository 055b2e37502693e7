// ==========================================
// 产能约束
// ==========================================
// 依据: §4.3.2 — 对每个 (工厂, 周期, 工序)，已分配订单的折算工作量
// 之和不得超过该工序的产能。
// ==========================================

use crate::domain::PreprocessedInput;
use crate::model::registry::VariableRegistry;
use crate::model::ModelBuilder;
use crate::preprocess::efficiency_for_order;
use good_lp::Expression;
use tracing::debug;

/// 某订单在某工厂、某工序上的折算工作量：`floor(base_workload / efficiency)`。
///
/// 向下取整是保守选择：整数求解器只能表示整数工作量，向下取整会
/// 略微高估真实产能占用而不会低估，因此永远不会在整数近似后超出
/// 真实产能（见 §4.3.2 Rationale）。
pub fn workload_for_process(
    input: &PreprocessedInput,
    order_id: &str,
    factory_id: &str,
    process: &str,
) -> i64 {
    let order = input.order(order_id).expect("order must exist");
    let factory = input.factory(factory_id).expect("factory must exist");
    let base = *order.total_process_capacity.get(process).unwrap_or(&0);
    let efficiency = efficiency_for_order(order, factory);
    (base as f64 / efficiency).floor() as i64
}

/// 订单的折算总工作量（跨所有工序求和后取整），用于负载均衡目标
/// (§4.4.3)，与按工序分别取整再求和的产能约束口径不同。
pub fn workload_total(input: &PreprocessedInput, order_id: &str, factory_id: &str) -> i64 {
    let order = input.order(order_id).expect("order must exist");
    let factory = input.factory(factory_id).expect("factory must exist");
    let base = *input.order_total_base_workload.get(order_id).unwrap_or(&0);
    let efficiency = efficiency_for_order(order, factory);
    (base as f64 / efficiency).floor() as i64
}

pub fn add_capacity_constraint(
    model: &mut ModelBuilder,
    input: &PreprocessedInput,
    registry: &VariableRegistry,
) {
    for factory in &input.factories {
        for period in &factory.capacity_periods {
            for (process, &capacity) in &period.capacity_by_process {
                let mut sum = Expression::from(0.0);
                let mut any_term = false;

                for order in &input.orders {
                    if !order.total_process_capacity.contains_key(process) {
                        continue;
                    }
                    let Some(var) =
                        registry.get(&order.order_id, &factory.factory_id, period.start_date)
                    else {
                        continue;
                    };
                    let workload =
                        workload_for_process(input, &order.order_id, &factory.factory_id, process);
                    sum += workload as f64 * var;
                    any_term = true;
                }

                if !any_term {
                    continue;
                }

                model.add_constraint(good_lp::constraint!(sum <= capacity as f64));
                debug!(
                    factory_id = %factory.factory_id,
                    period_start = %period.start_date,
                    process,
                    capacity,
                    "added capacity constraint"
                );
            }
        }
    }
}
