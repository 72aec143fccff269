// ==========================================
// 海上物流作业排程系统 - API层
// ==========================================
// 职责: 业务操作入口;入参校验、错误转换、事件发布、审计
// 说明: HTTP 路由与请求验证在本层之外
// ==========================================

pub mod error;
pub mod pipeline_api;
pub mod reflow_api;
pub mod weather_api;

// 重导出核心API
pub use error::{ApiError, ApiResult};
pub use pipeline_api::{ApplyPatchOutcome, PipelineApi};
pub use reflow_api::{ReflowApi, ReflowRequest, ReflowResponse};
pub use weather_api::WeatherApi;
