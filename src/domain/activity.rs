// ==========================================
// 海上物流作业排程系统 - 作业活动领域模型
// ==========================================
// 依据: Marine_Ops_Master_Spec.md - 主实体定义
// 依据: Ops_Engine_Specs_v0.2.md - schedule_activity
// ==========================================

use crate::domain::types::{LockLevel, MarineOpType, PinStrength};
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

// ==========================================
// ReflowPin - 改期钉固
// ==========================================
// 用途: 人工在 Gantt 上对单个作业设置的钉固标记
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReflowPin {
    pub strength: PinStrength, // 钉固强度 (HARD/SOFT)
    #[serde(default)]
    pub note: Option<String>, // 钉固备注 (可选)
}

// ==========================================
// HistoryEntry - 作业履历条目
// ==========================================
// 用途: 事件溯源补丁 (APPEND_HISTORY) 的落点
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub ts: NaiveDateTime,  // 事件时间戳
    pub event_type: String, // 事件类型
    #[serde(default)]
    pub detail: Option<String>, // 事件详情 (可选)
}

// ==========================================
// ScheduleActivity - 排程作业活动
// ==========================================
// 红线: 活动日期只能由 Reflow Engine 在派生副本上改写,禁止原地修改
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleActivity {
    // ===== 主键字段 =====
    pub activity_id: String,   // 活动ID (全局唯一)
    pub activity_name: String, // 活动名称

    // ===== 层级分组 =====
    #[serde(default)]
    pub level1: String, // 一级分组 (联动链口径)
    #[serde(default)]
    pub level2: String, // 二级分组

    // ===== 计划日期 =====
    // 约束: planned_finish - planned_start == duration - 1 (duration 按含首尾日计)
    pub duration: i64,             // 工期 (天)
    pub planned_start: NaiveDate,  // 计划开始日期
    pub planned_finish: NaiveDate, // 计划结束日期

    // ===== 实际日期 (存在即永久冻结) =====
    #[serde(default)]
    pub actual_start: Option<NaiveDate>, // 实际开始日期
    #[serde(default)]
    pub actual_finish: Option<NaiveDate>, // 实际结束日期

    // ===== 锁定与钉固 =====
    #[serde(default)]
    pub lock_level: Option<LockLevel>, // 锁定等级 (HARD)
    #[serde(default)]
    pub reflow_pins: Vec<ReflowPin>, // 改期钉固列表 (有序)
    #[serde(default)]
    pub is_locked: bool, // 显式锁定标志 (天气联动链为已实际化活动打上)

    // ===== 海上作业属性 =====
    #[serde(default)]
    pub anchor_type: Option<MarineOpType>, // 海上作业类别
    #[serde(default)]
    pub resource_tags: Vec<String>, // 资源/关键字标签 (海上作业识别 + 资源冲突检测)

    // ===== 履历 (事件溯源补丁写入) =====
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub history: Vec<HistoryEntry>,
}

impl ScheduleActivity {
    /// 判断是否冻结 (已记录实际日期)
    pub fn is_frozen(&self) -> bool {
        self.actual_start.is_some() || self.actual_finish.is_some()
    }

    /// 判断是否硬锁定 (锁定等级 HARD / 硬钉固 / 显式锁定标志)
    pub fn is_hard_locked(&self) -> bool {
        self.lock_level == Some(LockLevel::Hard)
            || self.is_locked
            || self
                .reflow_pins
                .iter()
                .any(|pin| pin.strength == PinStrength::Hard)
    }

    /// 判断是否带软钉固
    pub fn has_soft_pin(&self) -> bool {
        self.reflow_pins
            .iter()
            .any(|pin| pin.strength == PinStrength::Soft)
    }

    /// 校验工期与计划日期一致性
    pub fn duration_consistent(&self) -> bool {
        date_utils::diff_days(self.planned_start, self.planned_finish) == self.duration - 1
    }

    /// 派生平移副本 (计划日期整体平移 delta_days 天,其余字段不变)
    pub fn shifted_by(&self, delta_days: i64) -> Self {
        let mut shifted = self.clone();
        shifted.planned_start = date_utils::add_days(self.planned_start, delta_days);
        shifted.planned_finish = date_utils::add_days(self.planned_finish, delta_days);
        shifted
    }
}

// ==========================================
// 日期工具
// ==========================================
// 红线: 仅做日历日运算,不引入时分秒与时区
pub mod date_utils {
    use chrono::NaiveDate;

    /// 有符号日历日差值 (to - from)
    pub fn diff_days(from: NaiveDate, to: NaiveDate) -> i64 {
        (to - from).num_days()
    }

    /// 日历日平移
    pub fn add_days(date: NaiveDate, days: i64) -> NaiveDate {
        date + chrono::Duration::days(days)
    }

    /// 解析 ISO 日期字符串 (YYYY-MM-DD)
    pub fn parse_iso_date(raw: &str) -> Result<NaiveDate, chrono::ParseError> {
        NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
    }
}
