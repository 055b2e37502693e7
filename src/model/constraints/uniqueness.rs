// ==========================================
// 订单唯一分配约束
// ==========================================
// 依据: §4.3.1 — 每个有至少一个变量的订单，恰好一个变量取 1。
// ==========================================

use crate::model::registry::VariableRegistry;
use crate::model::ModelBuilder;
use good_lp::Expression;
use tracing::warn;

/// 为每个拥有变量的订单添加"恰好选中一个 (工厂, 周期)"约束。
///
/// 没有任何变量的订单（无合格工厂、锁定失败等）只记一条警告，不添加
/// 约束——它们已经在预处理 / 变量注册阶段被标记为不可排产。
pub fn add_order_uniqueness_constraint(model: &mut ModelBuilder, registry: &VariableRegistry) {
    for order_id in registry.orders_with_variables().collect::<Vec<_>>() {
        let keys = registry.keys_for_order(order_id);
        if keys.is_empty() {
            warn!(order_id, "no assignment variables, skipping uniqueness constraint");
            continue;
        }
        let sum: Expression = keys.iter().map(|k| registry.var_for(k)).sum();
        model.add_constraint(good_lp::constraint!(sum == 1.0));
    }
}
