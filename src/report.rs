// ==========================================
// APS Engine - 结果写出
// ==========================================
// 依据: 第6节 External Interfaces - Output data schema
// ==========================================

use crate::decoder::{FactoryLoadKpi, RunResult};
use crate::error::{AppError, AppResult};
use serde::Serialize;
use std::collections::HashMap;
use std::path::Path;

/// CSV 排产表的一行，列顺序与 §6 一致。
#[derive(Debug, Serialize)]
struct ScheduleRow<'a> {
    order_id: &'a str,
    customer: &'a str,
    quantity: i64,
    due_date: String,
    factory_id: &'a str,
    region: &'a str,
    planned_completion_date: String,
    is_tardy: &'static str,
    deviation_days: i64,
    material_ready_date: String,
    latest_confirmation_date: String,
}

pub fn write_schedule_csv(result: &RunResult, path: impl AsRef<Path>) -> AppResult<()> {
    let path = path.as_ref();
    let mut writer = csv::Writer::from_path(path).map_err(|e| AppError::Io {
        path: path.display().to_string(),
        source: std::io::Error::new(std::io::ErrorKind::Other, e.to_string()),
    })?;

    for row in &result.schedule {
        writer
            .serialize(ScheduleRow {
                order_id: &row.order_id,
                customer: &row.customer,
                quantity: row.quantity,
                due_date: row.due_date.to_string(),
                factory_id: &row.factory_id,
                region: &row.region,
                planned_completion_date: row.planned_completion_date.to_string(),
                is_tardy: if row.is_tardy { "yes" } else { "no" },
                deviation_days: row.days_tardy.abs(),
                material_ready_date: row.material_ready_date.to_string(),
                latest_confirmation_date: row.latest_confirmation_date.to_string(),
            })
            .map_err(|e| AppError::Io {
                path: path.display().to_string(),
                source: std::io::Error::new(std::io::ErrorKind::Other, e.to_string()),
            })?;
    }

    writer.flush().map_err(|source| AppError::Io {
        path: path.display().to_string(),
        source,
    })
}

pub fn write_kpi_json(
    kpis: &HashMap<String, FactoryLoadKpi>,
    path: impl AsRef<Path>,
) -> AppResult<()> {
    let path = path.as_ref();

    let serializable: HashMap<&str, serde_json::Value> = kpis
        .iter()
        .map(|(factory_id, kpi)| {
            let period_map: HashMap<String, f64> = kpi
                .load_rate_by_period
                .iter()
                .map(|(date, rate)| (date.to_string(), *rate))
                .collect();
            let value = serde_json::json!({
                "max_load_rate": kpi.max_load_rate,
                "min_load_rate_active_periods": kpi.min_load_rate_active_periods,
                "average_load_rate": kpi.average_load_rate,
                "load_rate_by_period": period_map,
            });
            (factory_id.as_str(), value)
        })
        .collect();

    let json = serde_json::to_string_pretty(&serializable).map_err(|source| AppError::Json {
        path: path.display().to_string(),
        source,
    })?;

    std::fs::write(path, json).map_err(|source| AppError::Io {
        path: path.display().to_string(),
        source,
    })
}
