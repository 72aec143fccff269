// ==========================================
// 海上物流作业排程系统 - SSOT 文档领域模型
// ==========================================
// 依据: Marine_Ops_Master_Spec.md - 单一事实源文档
// 红线: 核心只读消费,写回只能通过补丁应用返回的副本
// ==========================================

use crate::domain::activity::ScheduleActivity;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// ==========================================
// Location - 场地/泊位
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub location_id: String,   // 场地ID
    pub location_name: String, // 场地名称
    #[serde(default)]
    pub berth_count: Option<i32>, // 泊位数 (可选)
}

// ==========================================
// SsotEntities - 实体集合
// ==========================================
// 按ID键控的映射;BTreeMap 保证遍历顺序确定
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SsotEntities {
    #[serde(default)]
    pub activities: BTreeMap<String, ScheduleActivity>, // 按 activity_id 键控
    #[serde(default)]
    pub locations: BTreeMap<String, Location>, // 按 location_id 键控
}

// ==========================================
// SsotDocument - 单一事实源文档
// ==========================================
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SsotDocument {
    #[serde(default)]
    pub version: Option<String>, // 文档版本号 (如 v0.8.0)
    pub entities: SsotEntities,
}

impl SsotDocument {
    /// 按活动ID查找
    pub fn find_activity(&self, activity_id: &str) -> Option<&ScheduleActivity> {
        self.entities.activities.get(activity_id)
    }

    /// 按输入顺序 (键序) 导出活动列表
    pub fn activity_list(&self) -> Vec<ScheduleActivity> {
        self.entities.activities.values().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_minimal_document() {
        let json = r#"{
            "version": "v0.8.0",
            "entities": {
                "activities": {
                    "A001": {
                        "activity_id": "A001",
                        "activity_name": "驳船拖航",
                        "duration": 1,
                        "planned_start": "2026-02-05",
                        "planned_finish": "2026-02-05"
                    }
                },
                "locations": {
                    "L01": { "location_id": "L01", "location_name": "重件码头" }
                }
            }
        }"#;

        let document: SsotDocument = serde_json::from_str(json).unwrap();
        assert_eq!(document.version.as_deref(), Some("v0.8.0"));
        assert!(document.find_activity("A001").is_some());
        assert!(document.find_activity("A999").is_none());
        assert_eq!(document.activity_list().len(), 1);
        assert_eq!(document.entities.locations["L01"].location_name, "重件码头");
    }
}
