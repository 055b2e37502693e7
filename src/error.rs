// ==========================================
// APS Engine - 错误类型
// ==========================================
// 依据: 第7节 错误处理设计
// 策略: 配置/IO 错误是致命的并向上传播；数据/求解器异常
//       不致命，通过 RunReport 的诊断信息通道上报。
// ==========================================

use thiserror::Error;

/// 顶层错误类型。只收纳 §7 中标记为"fatal"的两类：
/// `ConfigurationError` 与 `IoError`。`LockError` 在运行时被
/// 记录为诊断信息而非传播（详见 [`crate::orchestrator::Diagnostic`]）。
#[derive(Error, Debug)]
pub enum AppError {
    #[error("configuration error: {0}")]
    Configuration(String),

    #[error("I/O error reading {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON parse error in {path}: {source}")]
    Json {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl AppError {
    pub fn config(msg: impl Into<String>) -> Self {
        AppError::Configuration(msg.into())
    }
}

pub type AppResult<T> = Result<T, AppError>;
