// ==========================================
// APS Engine - 数据加载
// ==========================================
// 依据: 第6节 External Interfaces - Input data schema
// ==========================================

use crate::domain::{Factory, Order};
use crate::error::{AppError, AppResult};
use std::path::Path;

/// 读取工厂数据文件（JSON 数组），见 §6 Input data schema。
pub fn load_factories(path: impl AsRef<Path>) -> AppResult<Vec<Factory>> {
    load_json_array(path)
}

/// 读取订单数据文件（JSON 数组）。
pub fn load_orders(path: impl AsRef<Path>) -> AppResult<Vec<Order>> {
    load_json_array(path)
}

fn load_json_array<T: serde::de::DeserializeOwned>(path: impl AsRef<Path>) -> AppResult<Vec<T>> {
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
