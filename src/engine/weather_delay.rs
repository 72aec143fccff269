// ==========================================
// 海上物流作业排程系统 - 天气延误预览引擎
// ==========================================
// 依据: Ops_Engine_Specs_v0.2.md - 6. Weather Delay Preview
// ==========================================
// 职责: 扫描海上作业的计划窗口与气象预报,计算直接顺延
// 输出: 每个受影响活动一条延误变更 (保持工期)
// 红线: 自 planned_start 起严格向前扫描,日粒度,结果确定
// ==========================================

use crate::config::WeatherLimits;
use crate::domain::activity::{date_utils, ScheduleActivity};
use crate::domain::weather::{WeatherForecast, WeatherSafety};
use crate::engine::marine::is_marine_activity;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

// ==========================================
// WeatherDelayChange - 天气延误变更
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeatherDelayChange {
    pub activity_id: String,    // 活动ID
    pub new_start: NaiveDate,   // 顺延后开始日期
    pub new_finish: NaiveDate,  // 顺延后结束日期
    pub reason: String,         // 顺延原因 (可读)
}

// ==========================================
// WeatherDelayEngine - 天气延误预览引擎
// ==========================================
// 红线: 无状态引擎,所有方法都是纯函数
pub struct WeatherDelayEngine;

impl Default for WeatherDelayEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl WeatherDelayEngine {
    /// 创建新的天气延误预览引擎
    pub fn new() -> Self {
        Self
    }

    /// 构建天气延误预览
    ///
    /// # 参数
    /// - `activities`: 活动集
    /// - `forecast`: 归一化逐时预报
    /// - `limits`: 作业限值
    ///
    /// # 返回
    /// 受影响海上活动的延误变更列表 (空列表为合法结果)
    ///
    /// # 口径
    /// 活动计划窗口内存在 NO_GO 时段即受影响;
    /// 自 planned_start + 1 日起向前扫描,取第一个整窗清洁的开始日
    pub fn build_delay_preview(
        &self,
        activities: &[ScheduleActivity],
        forecast: &WeatherForecast,
        limits: &WeatherLimits,
    ) -> Vec<WeatherDelayChange> {
        let no_go_days = Self::collect_no_go_days(forecast, limits);
        if no_go_days.is_empty() {
            return Vec::new();
        }

        let mut changes = Vec::new();

        for activity in activities {
            if !is_marine_activity(activity) {
                continue;
            }
            if !Self::window_blocked(
                activity.planned_start,
                activity.planned_finish,
                &no_go_days,
            ) {
                continue;
            }

            let new_start = Self::next_clear_start(
                activity.planned_start,
                activity.duration,
                &no_go_days,
            );
            let new_finish = date_utils::add_days(new_start, activity.duration - 1);

            tracing::debug!(
                activity_id = %activity.activity_id,
                %new_start,
                "天气窗口不满足作业限值,计算顺延"
            );

            changes.push(WeatherDelayChange {
                activity_id: activity.activity_id.clone(),
                new_start,
                new_finish,
                reason: format!(
                    "计划窗口{}~{}存在NO_GO时段,顺延至{}",
                    activity.planned_start, activity.planned_finish, new_start
                ),
            });
        }

        changes
    }

    /// 汇总预报中被判为 NO_GO 的日历日
    fn collect_no_go_days(
        forecast: &WeatherForecast,
        limits: &WeatherLimits,
    ) -> BTreeSet<NaiveDate> {
        forecast
            .series
            .iter()
            .filter(|point| WeatherSafety::classify(point, limits) == WeatherSafety::NoGo)
            .map(|point| point.ts.date())
            .collect()
    }

    /// 判断窗口 [start, finish] 是否含 NO_GO 日
    fn window_blocked(
        start: NaiveDate,
        finish: NaiveDate,
        no_go_days: &BTreeSet<NaiveDate>,
    ) -> bool {
        no_go_days.range(start..=finish).next().is_some()
    }

    /// 自 start + 1 日起线性向前扫描,返回首个整窗清洁的开始日
    ///
    /// 预报序列有限,最后一个 NO_GO 日之后必然清洁,扫描必然终止
    fn next_clear_start(
        start: NaiveDate,
        duration: i64,
        no_go_days: &BTreeSet<NaiveDate>,
    ) -> NaiveDate {
        let mut candidate = date_utils::add_days(start, 1);
        loop {
            let candidate_finish = date_utils::add_days(candidate, duration - 1);
            if !Self::window_blocked(candidate, candidate_finish, no_go_days) {
                return candidate;
            }
            candidate = date_utils::add_days(candidate, 1);
        }
    }
}
