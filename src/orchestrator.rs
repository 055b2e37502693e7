// ==========================================
// APS Engine - 运行编排器
// ==========================================
// 依据: 第4.7节末尾 / 第7节 - 端到端状态机
// DATA -> MODEL -> CONSTRAINTS -> OBJECTIVE -> SOLVE -> REPORT
// 任一阶段报告致命失败则转入终态 ABORTED；DATA->MODEL 失败会
// 跳过全部下游步骤。
// ==========================================

use crate::config::RunConfig;
use crate::data_io;
use crate::decoder::{self, RunResult};
use crate::domain::SolverStatus;
use crate::error::AppResult;
use crate::model::constraints::{
    add_capacity_constraint, add_material_lead_time_constraint, add_order_uniqueness_constraint,
    CAPACITY, MATERIAL_LEAD_TIME, ORDER_UNIQUE_ASSIGN,
};
use crate::model::objectives::assemble_objective;
use crate::model::registry::build_registry;
use crate::model::ModelBuilder;
use crate::preprocess::Preprocessor;
use crate::solver::SolverDriver;
use tracing::{info, warn};

/// 本次运行的非致命诊断信息，对应 §7 中标记为"非 fatal"的错误类别。
#[derive(Debug, Clone)]
pub struct Diagnostic {
    pub message: String,
}

/// 一次完整运行的报告：最终结果（可能为空）+ 全部非致命诊断信息。
#[derive(Debug, Clone, Default)]
pub struct RunReport {
    pub result: RunResult,
    pub status: Option<SolverStatus>,
    pub diagnostics: Vec<Diagnostic>,
}

/// 按 `DATA -> MODEL -> CONSTRAINTS -> OBJECTIVE -> SOLVE -> REPORT` 驱动
/// 一次完整运行。`config` 中的致命错误（I/O、JSON 解析、配置校验）通过
/// `AppError` 向上传播；其余异常进入 `RunReport::diagnostics`。
pub fn run(config: &RunConfig) -> AppResult<RunReport> {
    // DATA
    info!("stage=DATA loading input files");
    let factories = data_io::load_factories(&config.data_paths.factory_data_path)?;
    let orders = data_io::load_orders(&config.data_paths.order_data_path)?;

    let preprocessed = Preprocessor::new().run(factories, orders, config.run_config.base_date)?;
    let mut diagnostics: Vec<Diagnostic> = preprocessed
        .diagnostics
        .iter()
        .cloned()
        .map(|message| Diagnostic { message })
        .collect();

    // MODEL
    info!("stage=MODEL building variable registry");
    let mut model = ModelBuilder::new();
    let (registry, registry_diagnostics) = build_registry(&mut model, &preprocessed);
    diagnostics.extend(registry_diagnostics.into_iter().map(|message| Diagnostic { message }));

    // CONSTRAINTS
    info!("stage=CONSTRAINTS applying active constraints");
    for name in &config.active_constraints {
        match name.as_str() {
            ORDER_UNIQUE_ASSIGN => add_order_uniqueness_constraint(&mut model, &registry),
            CAPACITY => add_capacity_constraint(&mut model, &preprocessed, &registry),
            MATERIAL_LEAD_TIME => add_material_lead_time_constraint(&mut model, &preprocessed, &registry),
            other => warn!(constraint = other, "unknown constraint name, ignored"),
        }
    }

    // OBJECTIVE
    info!("stage=OBJECTIVE assembling composite objective");
    let objective = assemble_objective(
        &mut model,
        &preprocessed,
        &registry,
        config.objective_weights(),
        config.tardiness_weights(),
        config.jit_config(),
    );

    // SOLVE
    info!("stage=SOLVE invoking solver");
    let driver = SolverDriver::new(config.solver_config());
    let outcome = driver.solve(model, objective);

    // REPORT
    info!(status = %outcome.status, "stage=REPORT decoding result");
    let result = if outcome.status.has_solution() {
        decoder::decode(&preprocessed, &registry, &outcome)
    } else {
        diagnostics.push(Diagnostic {
            message: format!("solver reported {}; no schedule produced", outcome.status),
        });
        RunResult::default()
    };

    Ok(RunReport { result, status: Some(outcome.status), diagnostics })
}
