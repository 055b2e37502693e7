// ==========================================
// 物料前置时间约束
// ==========================================
// 依据: §4.3.3 — 若某 (工厂, 周期) 的开工日期早于订单的物料齐套日期
// (base_date + 采购前置时间 + 运输前置时间 + 生产前置时间)，则该
// 变量必须恒为 0。运输前置时间缺失（区域未配置）视为 +∞，等价于
// 该工厂上的全部周期都被清零。
// ==========================================

use crate::domain::PreprocessedInput;
use crate::model::registry::VariableRegistry;
use crate::model::ModelBuilder;
use tracing::warn;

pub fn add_material_lead_time_constraint(
    model: &mut ModelBuilder,
    input: &PreprocessedInput,
    registry: &VariableRegistry,
) {
    for order in &input.orders {
        let keys = registry.keys_for_order(&order.order_id);
        if keys.is_empty() {
            continue;
        }

        for key in keys {
            let Some(factory) = input.factory(&key.factory_id) else { continue };
            let var = registry.var_for(key);

            let total_lead_time = order.total_lead_time_days(&factory.region);
            let forbidden = match total_lead_time {
                None => {
                    warn!(
                        order_id = %order.order_id,
                        factory_id = %key.factory_id,
                        region = %factory.region,
                        "no transport lead time configured for region, forbidding assignment"
                    );
                    true
                }
                Some(days) => {
                    let ready_date = input.base_date + chrono::Duration::days(days);
                    key.period_start < ready_date
                }
            };

            if forbidden {
                model.add_constraint(good_lp::constraint!(var == 0.0));
            }
        }
    }
}
