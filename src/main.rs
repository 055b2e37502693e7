// ==========================================
// APS Engine - CLI 主入口
// ==========================================
// 依据: 第6节 External Interfaces - CLI surface
// 用法: aps-engine <config-path>
// 退出码: 0 = 成功 (含求解失败的非致命场景)；1 = 配置/IO 错误。
// ==========================================

use aps_engine::config::RunConfig;
use aps_engine::{logging, orchestrator};
use clap::Parser;
use std::process::ExitCode;
use tracing::{error, info, warn};

/// 多工厂订单分配排程引擎。
#[derive(Parser, Debug)]
#[command(name = "aps-engine", version, about)]
struct Cli {
    /// 运行配置文件路径 (JSON)。
    config_path: String,
}

fn main() -> ExitCode {
    logging::init();
    let cli = Cli::parse();

    info!("==================================================");
    info!("APS Engine v{}", aps_engine::VERSION);
    info!("==================================================");

    let config = match RunConfig::load(&cli.config_path) {
        Ok(config) => config,
        Err(err) => {
            error!(error = %err, "failed to load configuration");
            return ExitCode::FAILURE;
        }
    };

    let report = match orchestrator::run(&config) {
        Ok(report) => report,
        Err(err) => {
            error!(error = %err, "run aborted");
            return ExitCode::FAILURE;
        }
    };

    for diagnostic in &report.diagnostics {
        warn!("{}", diagnostic.message);
    }

    if let Err(err) = aps_engine::report::write_schedule_csv(&report.result, &config.output_paths.csv_result_path) {
        error!(error = %err, "failed to write schedule csv");
        return ExitCode::FAILURE;
    }
    if let Err(err) = aps_engine::report::write_kpi_json(&report.result.kpis, &config.output_paths.kpi_output_path) {
        error!(error = %err, "failed to write kpi json");
        return ExitCode::FAILURE;
    }

    info!(
        status = ?report.status,
        scheduled = report.result.schedule.len(),
        "run complete"
    );

    ExitCode::SUCCESS
}
