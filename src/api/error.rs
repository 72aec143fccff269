// ==========================================
// 海上物流作业排程系统 - API层错误类型
// ==========================================
// 职责: 定义API层错误类型,转换下层错误为用户友好的错误消息
// 红线: 所有错误信息必须包含显式原因 (可解释性)
// ==========================================

use crate::engine::EngineError;
use crate::pipeline::PipelineError;
use thiserror::Error;

/// API层错误类型
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("无效输入: {0}")]
    InvalidInput(String),

    #[error("资源未找到: {0}")]
    NotFound(String),

    #[error("数据验证失败: {0}")]
    ValidationError(String),

    #[error("内部错误: {0}")]
    InternalError(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

// ==========================================
// 从 EngineError 转换
// ==========================================
impl From<EngineError> for ApiError {
    fn from(err: EngineError) -> Self {
        match err {
            EngineError::AnchorNotFound { activity_id } => {
                ApiError::NotFound(format!("锚点活动{}不存在", activity_id))
            }
            EngineError::DurationInconsistent { .. } => ApiError::ValidationError(err.to_string()),
            EngineError::Other(err) => ApiError::Other(err),
        }
    }
}

// ==========================================
// 从 PipelineError 转换
// ==========================================
impl From<PipelineError> for ApiError {
    fn from(err: PipelineError) -> Self {
        match err {
            PipelineError::FileNotFound(path) => {
                ApiError::NotFound(format!("文件{}不存在", path))
            }
            PipelineError::CsvParseError(_) | PipelineError::DocumentParseError(_) => {
                ApiError::ValidationError(err.to_string())
            }
            PipelineError::PatchTargetNotFound { .. }
            | PipelineError::PatchValueMissing { .. }
            | PipelineError::PatchInvalidValue { .. } => ApiError::ValidationError(err.to_string()),
            PipelineError::FileReadError(_) | PipelineError::ReportWriteError(_) => {
                ApiError::InternalError(err.to_string())
            }
            PipelineError::Other(err) => ApiError::Other(err),
        }
    }
}

/// Result 类型别名
pub type ApiResult<T> = Result<T, ApiError>;
