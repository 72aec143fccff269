// ==========================================
// 海上物流作业排程系统 - 引擎层错误类型
// ==========================================
// 工具: thiserror 派生宏
// ==========================================

use thiserror::Error;

/// 引擎层错误类型
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("锚点活动不存在: {activity_id}")]
    AnchorNotFound { activity_id: String },

    #[error("活动工期与计划日期不一致: {activity_id} (duration={duration}, 跨度={span_days}天)")]
    DurationInconsistent {
        activity_id: String,
        duration: i64,
        span_days: i64,
    },

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result 类型别名
pub type EngineResult<T> = Result<T, EngineError>;
