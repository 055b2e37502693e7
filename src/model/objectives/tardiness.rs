// ==========================================
// 延期率目标 (按固定单/预测单拆分)
// ==========================================
// 依据: §4.4.1 — is_tardy[o] 由 is_tardy ≥ x[o,f,p] 在每个延期的
// (f,p) 上撑起下界；最小化压力会把它压到 0（能不延期就不延期）。
// ==========================================

use crate::domain::{OrderType, PreprocessedInput};
use crate::model::registry::VariableRegistry;
use crate::model::{Expr, ModelBuilder};
use good_lp::Expression;

/// 固定单 / 预测单延期率的加权系数，见 §6
/// `tardiness_objective_config.{firm_tardy_weight,forecast_tardy_weight}`。
#[derive(Debug, Clone, Copy)]
pub struct TardinessWeights {
    pub firm_tardy_weight: f64,
    pub forecast_tardy_weight: f64,
}

impl Default for TardinessWeights {
    fn default() -> Self {
        Self {
            firm_tardy_weight: 0.7,
            forecast_tardy_weight: 0.3,
        }
    }
}

/// 构建延期率目标表达式。没有任何订单拥有变量时返回 `None`
/// （两个子集都为空，见 §4.4.1 "Return None only if both subsets are empty"）。
pub fn add_tardiness_objective(
    model: &mut ModelBuilder,
    input: &PreprocessedInput,
    registry: &VariableRegistry,
    weights: TardinessWeights,
) -> Option<Expr> {
    let mut firm_vars: Vec<good_lp::Variable> = Vec::new();
    let mut forecast_vars: Vec<good_lp::Variable> = Vec::new();

    for order in &input.orders {
        let keys = registry.keys_for_order(&order.order_id);
        let is_tardy = model.add_bool_var();

        if keys.is_empty() {
            model.add_constraint(good_lp::constraint!(is_tardy == 0.0));
        } else {
            for key in keys {
                let Some(factory) = input.factory(&key.factory_id) else { continue };
                let Some(period) = factory.period_containing(key.period_start) else { continue };
                if period.end_date > order.due_date {
                    let var = registry.var_for(key);
                    model.add_constraint(good_lp::constraint!(is_tardy >= var));
                }
            }
        }

        match order.order_type() {
            OrderType::Firm => firm_vars.push(is_tardy),
            OrderType::Forecast => forecast_vars.push(is_tardy),
        }
    }

    if firm_vars.is_empty() && forecast_vars.is_empty() {
        return None;
    }

    let mut rate = Expression::from(0.0);
    if !firm_vars.is_empty() {
        let coef = weights.firm_tardy_weight / firm_vars.len() as f64;
        for var in firm_vars {
            rate += coef * var;
        }
    }
    if !forecast_vars.is_empty() {
        let coef = weights.forecast_tardy_weight / forecast_vars.len() as f64;
        for var in forecast_vars {
            rate += coef * var;
        }
    }

    Some(rate)
}
