// ==========================================
// 海上物流作业排程系统 - 操作日志领域模型
// ==========================================
// 依据: Marine_Ops_Master_Spec.md - PART A3 审计增强
// 红线: 所有写入操作必须记录
// ==========================================

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

// ==========================================
// ActionLog - 操作日志
// ==========================================
// 用途: 审计追踪,影响分析
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionLog {
    // ===== 主键 =====
    pub action_id: String,        // 日志ID
    pub action_type: ActionType,  // 操作类型
    pub action_ts: NaiveDateTime, // 操作时间戳
    pub actor: String,            // 操作人

    // ===== 操作负载 =====
    pub payload_json: Option<JsonValue>, // 操作参数 (JSON)

    // ===== 影响摘要 =====
    pub impact_summary_json: Option<JsonValue>, // 影响摘要 (JSON)

    // ===== 扩展字段 =====
    pub detail: Option<String>, // 详细描述
}

// ==========================================
// ActionType - 操作类型
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActionType {
    Reflow,           // 锚点改期
    WeatherPreview,   // 天气延误预览
    WeatherPropagate, // 天气延误联动
    Pr1Link,          // 事件链接 (PR1)
    Pr2Patch,         // 补丁派生 (PR2)
    PatchApply,       // 补丁应用
}

impl ActionType {
    /// 转换为字符串标识
    pub fn as_str(&self) -> &'static str {
        match self {
            ActionType::Reflow => "Reflow",
            ActionType::WeatherPreview => "WeatherPreview",
            ActionType::WeatherPropagate => "WeatherPropagate",
            ActionType::Pr1Link => "Pr1Link",
            ActionType::Pr2Patch => "Pr2Patch",
            ActionType::PatchApply => "PatchApply",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_type_as_str() {
        assert_eq!(ActionType::Reflow.as_str(), "Reflow");
        assert_eq!(ActionType::PatchApply.as_str(), "PatchApply");
    }

    #[test]
    fn test_action_log_serialization() {
        let log = ActionLog {
            action_id: "a-001".to_string(),
            action_type: ActionType::Reflow,
            action_ts: chrono::NaiveDate::from_ymd_opt(2026, 2, 5)
                .unwrap()
                .and_hms_opt(10, 0, 0)
                .unwrap(),
            actor: "dispatcher".to_string(),
            payload_json: Some(serde_json::json!({"activity_id": "A001"})),
            impact_summary_json: None,
            detail: None,
        };

        let json = serde_json::to_string(&log).unwrap();
        assert!(json.contains("\"Reflow\""));
        assert!(json.contains("dispatcher"));
    }
}
