// ==========================================
// 海上物流作业排程系统 - 外部事件日志领域模型
// ==========================================
// 说明: 事件日志为只读输入,按 activity_id 分组供链接管道使用
// ==========================================

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// ==========================================
// EventLogItem - 事件日志条目
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventLogItem {
    pub activity_id: String,   // 关联活动ID
    pub ts: NaiveDateTime,     // 事件时间戳
    pub event_type: String,    // 事件类型
    #[serde(default)]
    pub detail: Option<String>, // 事件详情 (可选)
    pub row_number: usize,     // 源文件行号 (诊断用)
}

/// 按 activity_id 分组 (组内保持源文件顺序)
pub fn group_by_activity(items: &[EventLogItem]) -> HashMap<String, Vec<EventLogItem>> {
    let mut grouped: HashMap<String, Vec<EventLogItem>> = HashMap::new();
    for item in items {
        grouped
            .entry(item.activity_id.clone())
            .or_default()
            .push(item.clone());
    }
    grouped
}
