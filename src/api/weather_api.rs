// ==========================================
// 海上物流作业排程系统 - 天气延误API
// ==========================================
// 职责: 天气延误预览与联动的入口;接收原始预报负载,
//       归一化后交给引擎
// ==========================================

use crate::adapter::weather::normalize_forecast;
use crate::api::error::{ApiError, ApiResult};
use crate::config::WeatherLimits;
use crate::domain::activity::ScheduleActivity;
use crate::engine::events::{OptionalEventPublisher, ScheduleEvent, ScheduleEventType};
use crate::engine::weather_chain::{WeatherChainEngine, WeatherPropagationOutcome};
use crate::engine::weather_delay::{WeatherDelayChange, WeatherDelayEngine};
use crate::engine::ScheduleEventPublisher;
use serde_json::Value as JsonValue;
use std::sync::Arc;
use tracing::instrument;

// ==========================================
// WeatherApi - 天气延误API
// ==========================================
pub struct WeatherApi {
    delay_engine: WeatherDelayEngine,
    chain_engine: WeatherChainEngine,
    event_publisher: OptionalEventPublisher,
}

impl Default for WeatherApi {
    fn default() -> Self {
        Self::new()
    }
}

impl WeatherApi {
    /// 创建API实例 (无事件发布)
    pub fn new() -> Self {
        Self {
            delay_engine: WeatherDelayEngine::new(),
            chain_engine: WeatherChainEngine::new(),
            event_publisher: OptionalEventPublisher::none(),
        }
    }

    /// 创建带事件发布者的API实例
    pub fn with_event_publisher(publisher: Arc<dyn ScheduleEventPublisher>) -> Self {
        Self {
            delay_engine: WeatherDelayEngine::new(),
            chain_engine: WeatherChainEngine::new(),
            event_publisher: OptionalEventPublisher::with_publisher(publisher),
        }
    }

    /// 天气延误预览
    ///
    /// # 参数
    /// - `activities`: 活动集
    /// - `forecast_raw`: 原始预报负载 (snake_case/camelCase 均可)
    /// - `limits`: 作业限值
    #[instrument(skip(self, activities, forecast_raw))]
    pub fn preview_delays(
        &self,
        activities: &[ScheduleActivity],
        forecast_raw: &JsonValue,
        limits: &WeatherLimits,
    ) -> ApiResult<Vec<WeatherDelayChange>> {
        let forecast = normalize_forecast(forecast_raw)
            .map_err(|e| ApiError::ValidationError(format!("预报负载归一化失败: {}", e)))?;

        let changes = self
            .delay_engine
            .build_delay_preview(activities, &forecast, limits);

        if !changes.is_empty() {
            let event = ScheduleEvent::incremental(
                ScheduleEventType::WeatherDelayDetected,
                Some("WeatherApi".to_string()),
                Some(changes.iter().map(|c| c.activity_id.clone()).collect()),
                None,
            );
            if let Err(e) = self.event_publisher.publish(event) {
                tracing::warn!("排程事件发布失败(预览结果不受影响): {}", e);
            }
        }

        Ok(changes)
    }

    /// 天气延误联动传播
    #[instrument(skip(self, activities, weather_changes), fields(weather_changes = weather_changes.len()))]
    pub fn propagate_delays(
        &self,
        activities: &[ScheduleActivity],
        weather_changes: &[WeatherDelayChange],
    ) -> ApiResult<WeatherPropagationOutcome> {
        let outcome = self
            .chain_engine
            .propagate_weather_delays(activities, weather_changes)?;

        if outcome.total_affected > 0 {
            let affected: Vec<String> = outcome
                .direct_changes
                .iter()
                .map(|c| c.activity_id.clone())
                .chain(
                    outcome
                        .propagated_changes
                        .iter()
                        .map(|c| c.activity_id.clone()),
                )
                .collect();
            let event = ScheduleEvent::incremental(
                ScheduleEventType::WeatherDelayPropagated,
                Some("WeatherApi".to_string()),
                Some(affected),
                None,
            );
            if let Err(e) = self.event_publisher.publish(event) {
                tracing::warn!("排程事件发布失败(联动结果不受影响): {}", e);
            }
        }

        Ok(outcome)
    }
}
