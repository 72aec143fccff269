// ==========================================
// 海上物流作业排程系统 - 管道层错误类型
// ==========================================
// 工具: thiserror 派生宏
// ==========================================

use thiserror::Error;

/// 事件溯源管道错误类型
#[derive(Error, Debug)]
pub enum PipelineError {
    // ===== 文件相关错误 =====
    #[error("文件不存在: {0}")]
    FileNotFound(String),

    #[error("文件读取失败: {0}")]
    FileReadError(String),

    #[error("CSV 解析失败: {0}")]
    CsvParseError(String),

    #[error("SSOT 文档解析失败: {0}")]
    DocumentParseError(String),

    // ===== 补丁应用错误 =====
    #[error("补丁目标活动不存在 (操作 {op_index}): {activity_id}")]
    PatchTargetNotFound {
        op_index: usize,
        activity_id: String,
    },

    #[error("补丁负载缺失 (操作 {op_index}, 类型 {op_type})")]
    PatchValueMissing { op_index: usize, op_type: String },

    #[error("补丁值非法 (操作 {op_index}): {message}")]
    PatchInvalidValue { op_index: usize, message: String },

    // ===== 报告输出错误 =====
    #[error("报告写出失败: {0}")]
    ReportWriteError(String),

    // ===== 通用错误 =====
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

// 实现 From<std::io::Error>
impl From<std::io::Error> for PipelineError {
    fn from(err: std::io::Error) -> Self {
        PipelineError::FileReadError(err.to_string())
    }
}

// 实现 From<csv::Error>
impl From<csv::Error> for PipelineError {
    fn from(err: csv::Error) -> Self {
        PipelineError::CsvParseError(err.to_string())
    }
}

// 实现 From<serde_json::Error>
impl From<serde_json::Error> for PipelineError {
    fn from(err: serde_json::Error) -> Self {
        PipelineError::DocumentParseError(err.to_string())
    }
}

/// Result 类型别名
pub type PipelineResult<T> = Result<T, PipelineError>;
