// ==========================================
// APS Engine - 运行配置
// ==========================================
// 依据: 第6节 External Interfaces - Configuration
// ==========================================

use crate::error::{AppError, AppResult};
use crate::model::objectives::{JitConfig, ObjectiveWeights, TardinessWeights};
use crate::solver::SolverConfig;
use chrono::NaiveDate;
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Clone, Deserialize)]
pub struct DataPaths {
    pub factory_data_path: String,
    pub order_data_path: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OutputPaths {
    pub csv_result_path: String,
    pub kpi_output_path: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RunParameters {
    pub base_date: NaiveDate,
    #[serde(default = "default_time_limit")]
    pub solver_time_limit_seconds: u64,
}

fn default_time_limit() -> u64 {
    60
}

#[derive(Debug, Clone, Deserialize)]
pub struct ObjectiveWeightsConfig {
    #[serde(default)]
    pub tardiness: f64,
    #[serde(default)]
    pub jit_deviation: f64,
    #[serde(default)]
    pub workload_balance: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TardinessObjectiveConfig {
    #[serde(default = "default_firm_weight")]
    pub firm_tardy_weight: f64,
    #[serde(default = "default_forecast_weight")]
    pub forecast_tardy_weight: f64,
}

fn default_firm_weight() -> f64 {
    0.7
}
fn default_forecast_weight() -> f64 {
    0.3
}

impl Default for TardinessObjectiveConfig {
    fn default() -> Self {
        Self {
            firm_tardy_weight: default_firm_weight(),
            forecast_tardy_weight: default_forecast_weight(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct JitObjectiveConfig {
    #[serde(default = "default_earliness_days")]
    pub allowed_earliness_deviation_days: i64,
    #[serde(default = "default_tardiness_days")]
    pub allowed_tardiness_deviation_days: i64,
    #[serde(default = "default_earliness_weight")]
    pub earliness_weight: f64,
    #[serde(default = "default_lateness_weight")]
    pub lateness_weight: f64,
}

fn default_earliness_days() -> i64 {
    30
}
fn default_tardiness_days() -> i64 {
    30
}
fn default_earliness_weight() -> f64 {
    0.3
}
fn default_lateness_weight() -> f64 {
    0.7
}

impl Default for JitObjectiveConfig {
    fn default() -> Self {
        Self {
            allowed_earliness_deviation_days: default_earliness_days(),
            allowed_tardiness_deviation_days: default_tardiness_days(),
            earliness_weight: default_earliness_weight(),
            lateness_weight: default_lateness_weight(),
        }
    }
}

/// 一次运行的完整配置，对应磁盘上的 JSON 配置文件。
#[derive(Debug, Clone, Deserialize)]
pub struct RunConfig {
    pub data_paths: DataPaths,
    pub output_paths: OutputPaths,
    pub run_config: RunParameters,
    #[serde(default)]
    pub active_constraints: Vec<String>,
    #[serde(default)]
    pub objective_weights: ObjectiveWeightsConfig,
    #[serde(default)]
    pub tardiness_objective_config: TardinessObjectiveConfig,
    #[serde(default)]
    pub jit_objective_config: JitObjectiveConfig,
    /// `good_lp`/`microlp` 是单线程后端，这个字段只为保留配置兼容性而存在，
    /// 真正求解时被忽略（记一条 `debug!`，见 [`crate::solver::SolverDriver`]）。
    #[serde(default = "default_workers")]
    pub num_search_workers: u32,
}

fn default_workers() -> u32 {
    8
}

impl Default for ObjectiveWeightsConfig {
    fn default() -> Self {
        Self { tardiness: 0.0, jit_deviation: 0.0, workload_balance: 0.0 }
    }
}

impl RunConfig {
    pub fn load(path: impl AsRef<Path>) -> AppResult<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| AppError::Io {
            path: path.display().to_string(),
            source,
        })?;
        serde_json::from_str(&raw).map_err(|source| AppError::Json {
            path: path.display().to_string(),
            source,
        })
    }

    pub fn objective_weights(&self) -> ObjectiveWeights {
        ObjectiveWeights {
            tardiness: self.objective_weights.tardiness,
            jit_deviation: self.objective_weights.jit_deviation,
            workload_balance: self.objective_weights.workload_balance,
        }
    }

    pub fn tardiness_weights(&self) -> TardinessWeights {
        TardinessWeights {
            firm_tardy_weight: self.tardiness_objective_config.firm_tardy_weight,
            forecast_tardy_weight: self.tardiness_objective_config.forecast_tardy_weight,
        }
    }

    pub fn jit_config(&self) -> JitConfig {
        JitConfig {
            allowed_earliness_deviation_days: self.jit_objective_config.allowed_earliness_deviation_days,
            allowed_tardiness_deviation_days: self.jit_objective_config.allowed_tardiness_deviation_days,
            earliness_weight: self.jit_objective_config.earliness_weight,
            lateness_weight: self.jit_objective_config.lateness_weight,
        }
    }

    pub fn solver_config(&self) -> SolverConfig {
        SolverConfig {
            time_limit_seconds: self.run_config.solver_time_limit_seconds,
            num_search_workers: self.num_search_workers,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_when_fields_are_missing() {
        let json = r#"{
            "data_paths": {"factory_data_path": "f.json", "order_data_path": "o.json"},
            "output_paths": {"csv_result_path": "out.csv", "kpi_output_path": "kpi.json"},
            "run_config": {"base_date": "2025-07-01"}
        }"#;
        let config: RunConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.run_config.solver_time_limit_seconds, 60);
        assert_eq!(config.tardiness_objective_config.firm_tardy_weight, 0.7);
        assert_eq!(config.jit_objective_config.allowed_earliness_deviation_days, 30);
        assert_eq!(config.objective_weights.tardiness, 0.0);
    }
}
