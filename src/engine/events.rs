// ==========================================
// 海上物流作业排程系统 - 引擎层事件发布
// ==========================================
// 职责: 定义排程事件发布 trait,实现依赖倒置
// 说明: Engine 层定义 trait,下游看板/刷新层实现适配器
// ==========================================

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::sync::Arc;

// ==========================================
// 排程事件类型
// ==========================================

/// 排程事件触发类型
///
/// Engine 层定义的事件类型,用于通知下游系统
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScheduleEventType {
    /// 锚点改期
    ActivityShifted,
    /// 检测到天气延误
    WeatherDelayDetected,
    /// 天气延误联动完成
    WeatherDelayPropagated,
    /// 补丁已应用
    PatchApplied,
    /// 手动触发
    ManualTrigger,
}

impl ScheduleEventType {
    /// 转换为字符串标识
    pub fn as_str(&self) -> &str {
        match self {
            ScheduleEventType::ActivityShifted => "ActivityShifted",
            ScheduleEventType::WeatherDelayDetected => "WeatherDelayDetected",
            ScheduleEventType::WeatherDelayPropagated => "WeatherDelayPropagated",
            ScheduleEventType::PatchApplied => "PatchApplied",
            ScheduleEventType::ManualTrigger => "ManualTrigger",
        }
    }
}

/// 排程事件
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleEvent {
    /// 事件类型
    pub event_type: ScheduleEventType,
    /// 事件来源描述
    pub source: Option<String>,
    /// 受影响的活动ID列表 (None 表示全部)
    pub affected_activities: Option<Vec<String>>,
    /// 受影响的日期范围
    pub affected_date_range: Option<(NaiveDate, NaiveDate)>,
    /// 是否需要全量处理
    pub is_full_scope: bool,
}

impl ScheduleEvent {
    /// 创建全量事件
    pub fn full_scope(event_type: ScheduleEventType, source: Option<String>) -> Self {
        Self {
            event_type,
            source,
            affected_activities: None,
            affected_date_range: None,
            is_full_scope: true,
        }
    }

    /// 创建增量事件
    pub fn incremental(
        event_type: ScheduleEventType,
        source: Option<String>,
        activities: Option<Vec<String>>,
        date_range: Option<(NaiveDate, NaiveDate)>,
    ) -> Self {
        Self {
            event_type,
            source,
            affected_activities: activities,
            affected_date_range: date_range,
            is_full_scope: false,
        }
    }
}

// ==========================================
// 事件发布 Trait
// ==========================================

/// 排程事件发布者 Trait
///
/// Engine 层定义,下游层实现
/// 通过 trait 实现依赖倒置,解除 Engine 对下游的直接依赖
pub trait ScheduleEventPublisher: Send + Sync {
    /// 发布排程事件
    ///
    /// # 返回
    /// - `Ok(task_id)`: 任务 ID (如果支持) 或空字符串
    /// - `Err`: 发布失败
    fn publish(&self, event: ScheduleEvent) -> Result<String, Box<dyn Error + Send + Sync>>;
}

/// 空操作事件发布者
///
/// 用于不需要事件发布的场景 (如单元测试)
#[derive(Debug, Clone, Default)]
pub struct NoOpEventPublisher;

impl ScheduleEventPublisher for NoOpEventPublisher {
    fn publish(&self, event: ScheduleEvent) -> Result<String, Box<dyn Error + Send + Sync>> {
        tracing::debug!(
            "NoOpEventPublisher: 跳过事件发布 - event_type={}",
            event.event_type.as_str()
        );
        Ok(String::new())
    }
}

/// 可选的事件发布者包装
///
/// 简化 Option<Arc<dyn ScheduleEventPublisher>> 的使用
pub struct OptionalEventPublisher {
    inner: Option<Arc<dyn ScheduleEventPublisher>>,
}

impl OptionalEventPublisher {
    /// 创建带发布者的实例
    pub fn with_publisher(publisher: Arc<dyn ScheduleEventPublisher>) -> Self {
        Self {
            inner: Some(publisher),
        }
    }

    /// 创建空实例 (不发布事件)
    pub fn none() -> Self {
        Self { inner: None }
    }

    /// 发布事件 (如果有发布者)
    pub fn publish(&self, event: ScheduleEvent) -> Result<String, Box<dyn Error + Send + Sync>> {
        match &self.inner {
            Some(publisher) => publisher.publish(event),
            None => {
                tracing::debug!(
                    "OptionalEventPublisher: 未配置发布者,跳过事件 - event_type={}",
                    event.event_type.as_str()
                );
                Ok(String::new())
            }
        }
    }

    /// 检查是否配置了发布者
    pub fn is_configured(&self) -> bool {
        self.inner.is_some()
    }
}

impl Default for OptionalEventPublisher {
    fn default() -> Self {
        Self::none()
    }
}
