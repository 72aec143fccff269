// ==========================================
// 海上物流作业排程系统 - 改期联动API
// ==========================================
// 职责: HTTP 处理器消费的纯函数边界;校验入参、触发引擎、
//       发布事件、落操作日志
// ==========================================

use crate::api::error::{ApiError, ApiResult};
use crate::domain::action_log::{ActionLog, ActionType};
use crate::domain::activity::{date_utils, ScheduleActivity};
use crate::domain::impact::ImpactReport;
use crate::engine::events::{OptionalEventPublisher, ScheduleEvent, ScheduleEventType};
use crate::engine::reflow::{ReflowEngine, ReflowOptions};
use crate::engine::ScheduleEventPublisher;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::instrument;
use uuid::Uuid;

// ==========================================
// ReflowRequest - 改期请求
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReflowRequest {
    pub activity_id: String, // 锚点活动ID
    pub new_start: String,   // 新开始日期 (ISO YYYY-MM-DD)
    pub actor: String,       // 操作人
}

// ==========================================
// ReflowResponse - 改期响应
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReflowResponse {
    pub activities: Vec<ScheduleActivity>, // 派生活动集
    pub impact_report: ImpactReport,       // 影响报告
    pub action_log: ActionLog,             // 审计日志
}

// ==========================================
// ReflowApi - 改期联动API
// ==========================================
pub struct ReflowApi {
    engine: ReflowEngine,
    event_publisher: OptionalEventPublisher,
}

impl Default for ReflowApi {
    fn default() -> Self {
        Self::new()
    }
}

impl ReflowApi {
    /// 创建API实例 (无事件发布)
    pub fn new() -> Self {
        Self {
            engine: ReflowEngine::new(),
            event_publisher: OptionalEventPublisher::none(),
        }
    }

    /// 创建带事件发布者的API实例
    pub fn with_event_publisher(publisher: Arc<dyn ScheduleEventPublisher>) -> Self {
        Self {
            engine: ReflowEngine::new(),
            event_publisher: OptionalEventPublisher::with_publisher(publisher),
        }
    }

    /// 执行锚点改期
    ///
    /// # 参数
    /// - `activities`: 当前活动集 (只读)
    /// - `request`: 改期请求
    /// - `options`: 改期选项
    ///
    /// # 返回
    /// 派生活动集 + 影响报告 + 审计日志
    #[instrument(skip(self, activities), fields(activity_id = %request.activity_id, actor = %request.actor))]
    pub fn apply_reflow(
        &self,
        activities: &[ScheduleActivity],
        request: &ReflowRequest,
        options: &ReflowOptions,
    ) -> ApiResult<ReflowResponse> {
        let new_start = date_utils::parse_iso_date(&request.new_start).map_err(|_| {
            ApiError::InvalidInput(format!(
                "new_start 日期格式错误: 期望 YYYY-MM-DD,实际 {}",
                request.new_start
            ))
        })?;

        let outcome = self.engine.reflow(activities, &request.activity_id, new_start, options)?;

        // 发布排程事件 (失败仅告警,不阻断改期结果返回)
        let affected: Vec<String> = outcome
            .impact_report
            .changes
            .iter()
            .map(|c| c.activity_id.clone())
            .collect();
        let event = ScheduleEvent::incremental(
            ScheduleEventType::ActivityShifted,
            Some("ReflowApi".to_string()),
            Some(affected),
            None,
        );
        if let Err(e) = self.event_publisher.publish(event) {
            tracing::warn!("排程事件发布失败(改期结果不受影响): {}", e);
        }

        let action_log = ActionLog {
            action_id: Uuid::new_v4().to_string(),
            action_type: ActionType::Reflow,
            action_ts: chrono::Utc::now().naive_utc(),
            actor: request.actor.clone(),
            payload_json: serde_json::to_value(request).ok(),
            impact_summary_json: serde_json::to_value(&outcome.impact_report).ok(),
            detail: Some(outcome.impact_report.readable_description("Reflow")),
        };

        Ok(ReflowResponse {
            activities: outcome.activities,
            impact_report: outcome.impact_report,
            action_log,
        })
    }
}
