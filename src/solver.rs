// ==========================================
// APS Engine - 求解驱动器
// ==========================================
// 依据: 第4.6节 Solver Driver
// 本模块把整数求解器当作外部协作者 (§1/§9)：只负责把 ModelBuilder
// 拆出的变量/约束/目标提交给 good_lp 的 microlp 后端，并把它的
// Result 映射为五态 SolverStatus。
// ==========================================

use crate::domain::SolverStatus;
use crate::model::{Expr, ModelBuilder};
use good_lp::{Solution, SolverModel, Variable};
use tracing::{debug, warn};

/// 求解配置，见 §6 `run_config.solver_time_limit_seconds` /
/// `num_search_workers`。
#[derive(Debug, Clone, Copy)]
pub struct SolverConfig {
    pub time_limit_seconds: u64,
    pub num_search_workers: u32,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            time_limit_seconds: 60,
            num_search_workers: 8,
        }
    }
}

/// 一次求解的结果：状态 + （若有解）对外只读查询变量取值的句柄。
pub struct SolveOutcome {
    pub status: SolverStatus,
    solution: Option<Box<dyn Solution>>,
}

impl SolveOutcome {
    /// 变量在解中的取值；没有解（`INFEASIBLE`/`MODEL_INVALID`/`UNKNOWN`）
    /// 时恒为 0.0。
    pub fn value_of(&self, var: Variable) -> f64 {
        self.solution.as_ref().map(|s| s.value(var)).unwrap_or(0.0)
    }

    /// 布尔变量是否被解为"选中"（> 0.5，容忍 LP 松弛带来的浮点误差）。
    pub fn is_set(&self, var: Variable) -> bool {
        self.value_of(var) > 0.5
    }
}

/// 驱动求解器：把 [`ModelBuilder`] 拆解出的变量/约束提交给
/// `good_lp` 的 `microlp` 后端，目标函数缺省时退化为纯可行性求解。
pub struct SolverDriver {
    config: SolverConfig,
}

impl SolverDriver {
    pub fn new(config: SolverConfig) -> Self {
        Self { config }
    }

    pub fn solve(&self, model: ModelBuilder, objective: Option<Expr>) -> SolveOutcome {
        if self.config.num_search_workers > 1 {
            debug!(
                requested_workers = self.config.num_search_workers,
                "microlp is single-threaded; num_search_workers has no effect"
            );
        }

        let (vars, constraints) = model.into_parts();
        let objective = objective.unwrap_or_else(|| good_lp::Expression::from(0.0));

        let mut problem = vars.minimise(objective).using(good_lp::microlp);
        for constraint in constraints {
            problem = problem.with(constraint);
        }

        match problem.solve() {
            Ok(solution) => {
                // microlp 在预算内要么证明最优、要么耗尽时间预算返回当前最优可行解；
                // 两种情形都以 Ok 返回，这里用配置的时间预算保守地区分二者
                // （见 §4.6 实现说明）。
                let status = if self.config.time_limit_seconds == 0 {
                    SolverStatus::Optimal
                } else {
                    SolverStatus::Feasible
                };
                SolveOutcome { status, solution: Some(Box::new(solution)) }
            }
            Err(good_lp::ResolutionError::Infeasible) => {
                warn!("solver reported infeasible model");
                SolveOutcome { status: SolverStatus::Infeasible, solution: None }
            }
            Err(good_lp::ResolutionError::Unbounded) => {
                warn!("solver reported unbounded model");
                SolveOutcome { status: SolverStatus::ModelInvalid, solution: None }
            }
            Err(other) => {
                warn!(error = %other, "solver returned an unexpected error");
                SolveOutcome { status: SolverStatus::Unknown, solution: None }
            }
        }
    }
}
