// ==========================================
// 海上物流作业排程系统 - 天气延误联动链
// ==========================================
// 依据: Ops_Engine_Specs_v0.2.md - 7. Weather Reflow Chain
// ==========================================
// 职责: 将天气延误作为合成锚点送入改期联动引擎,
//       区分直接延误与联动顺延
// 红线: 已实际化活动先行锁定;输入不被修改
// ==========================================

use crate::domain::activity::ScheduleActivity;
use crate::domain::impact::ActivityChange;
use crate::engine::error::EngineResult;
use crate::engine::reflow::{ReflowEngine, ReflowOptions};
use crate::engine::weather_delay::WeatherDelayChange;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

// ==========================================
// WeatherPropagationOutcome - 联动结果
// ==========================================
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WeatherPropagationOutcome {
    pub direct_changes: Vec<WeatherDelayChange>, // 直接天气延误 (按 new_start/activity_id 排序)
    pub propagated_changes: Vec<ActivityChange>, // 联动顺延
    pub total_affected: usize,                   // 受影响活动总数
}

// ==========================================
// WeatherChainEngine - 天气延误联动引擎
// ==========================================
pub struct WeatherChainEngine {
    reflow_engine: ReflowEngine,
}

impl Default for WeatherChainEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl WeatherChainEngine {
    /// 创建新的天气延误联动引擎
    pub fn new() -> Self {
        Self {
            reflow_engine: ReflowEngine::new(),
        }
    }

    /// 传播天气延误
    ///
    /// # 参数
    /// - `activities`: 活动集
    /// - `weather_changes`: 天气延误预览输出
    ///
    /// # 返回
    /// 直接延误 + 联动顺延 + 受影响总数
    ///
    /// # 口径
    /// 多个并发天气延误按最早 new_start 串行化为单一改期枢轴
    /// (锚点改期已传递级联后续日期,无需逐一触发);
    /// 引擎输出中与天气延误重合的变更归为直接延误,其余重打
    /// 标签后作为联动顺延返回
    pub fn propagate_weather_delays(
        &self,
        activities: &[ScheduleActivity],
        weather_changes: &[WeatherDelayChange],
    ) -> EngineResult<WeatherPropagationOutcome> {
        // 短路: 无天气延误则不触发改期联动
        if weather_changes.is_empty() {
            return Ok(WeatherPropagationOutcome::default());
        }

        // (a) 已实际化活动打上显式锁定 (派生副本)
        let locked: Vec<ScheduleActivity> = activities
            .iter()
            .map(|activity| {
                let mut derived = activity.clone();
                if derived.actual_start.is_some() || derived.actual_finish.is_some() {
                    derived.is_locked = true;
                }
                derived
            })
            .collect();

        // (b) 按 new_start 升序、activity_id 升序取首个作为枢轴
        let mut sorted: Vec<WeatherDelayChange> = weather_changes.to_vec();
        sorted.sort_by(|a, b| {
            a.new_start
                .cmp(&b.new_start)
                .then_with(|| a.activity_id.cmp(&b.activity_id))
        });
        let pivot = &sorted[0];

        tracing::info!(
            pivot_activity_id = %pivot.activity_id,
            pivot_new_start = %pivot.new_start,
            weather_changes = weather_changes.len(),
            "天气延误联动: 选定改期枢轴"
        );

        // (c) 以枢轴触发改期联动
        let outcome = self.reflow_engine.reflow(
            &locked,
            &pivot.activity_id,
            pivot.new_start,
            &ReflowOptions {
                respect_locks: true,
                check_resource_conflicts: false,
            },
        )?;

        // (d) 剔除直接延误,其余重打标签为联动顺延
        let weather_ids: HashSet<&str> = weather_changes
            .iter()
            .map(|c| c.activity_id.as_str())
            .collect();

        let propagated_changes: Vec<ActivityChange> = outcome
            .impact_report
            .changes
            .into_iter()
            .filter(|change| !weather_ids.contains(change.activity_id.as_str()))
            .map(|mut change| {
                change.change_type = "propagated".to_string();
                change.reason = "天气延误联动顺延".to_string();
                change
            })
            .collect();

        let total_affected = weather_changes.len() + propagated_changes.len();

        Ok(WeatherPropagationOutcome {
            direct_changes: sorted,
            propagated_changes,
            total_affected,
        })
    }
}
