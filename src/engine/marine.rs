// ==========================================
// 海上物流作业排程系统 - 海上作业识别
// ==========================================
// 职责: 判定活动是否为气象/海况敏感作业
// 红线: 纯谓词,无副作用
// ==========================================

use crate::domain::activity::ScheduleActivity;
use crate::domain::types::MarineOpType;

// 海上资源标签词表 (忽略大小写,整词匹配)
const MARINE_TAGS: [&str; 5] = ["marine", "barge", "tow", "offshore", "sea"];

// 海上作业类别集合
const MARINE_OP_TYPES: [MarineOpType; 6] = [
    MarineOpType::SailAway,
    MarineOpType::Berthing,
    MarineOpType::Loadout,
    MarineOpType::Loadin,
    MarineOpType::Turning,
    MarineOpType::Jackdown,
];

// 分组关键字 (忽略大小写,子串匹配)
const MARINE_KEYWORDS: [&str; 5] = ["MARINE", "SEA", "BARGE", "TOW", "OFFSHORE"];

/// 判定是否为海上作业
///
/// 满足任一条件即为真:
/// 1. resource_tags 含海上资源标签
/// 2. anchor_type 属于海上作业类别
/// 3. level1/level2 含海上关键字
pub fn is_marine_activity(activity: &ScheduleActivity) -> bool {
    if activity.resource_tags.iter().any(|tag| {
        let normalized = tag.trim().to_lowercase();
        MARINE_TAGS.contains(&normalized.as_str())
    }) {
        return true;
    }

    if let Some(anchor_type) = activity.anchor_type {
        if MARINE_OP_TYPES.contains(&anchor_type) {
            return true;
        }
    }

    let level1 = activity.level1.to_uppercase();
    let level2 = activity.level2.to_uppercase();
    MARINE_KEYWORDS
        .iter()
        .any(|keyword| level1.contains(keyword) || level2.contains(keyword))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn make_activity(activity_id: &str) -> ScheduleActivity {
        ScheduleActivity {
            activity_id: activity_id.to_string(),
            activity_name: format!("作业_{}", activity_id),
            level1: String::new(),
            level2: String::new(),
            duration: 1,
            planned_start: NaiveDate::from_ymd_opt(2026, 2, 5).unwrap(),
            planned_finish: NaiveDate::from_ymd_opt(2026, 2, 5).unwrap(),
            actual_start: None,
            actual_finish: None,
            lock_level: None,
            reflow_pins: Vec::new(),
            is_locked: false,
            anchor_type: None,
            resource_tags: Vec::new(),
            history: Vec::new(),
        }
    }

    #[test]
    fn test_marine_by_resource_tag_case_insensitive() {
        let mut activity = make_activity("A001");
        activity.resource_tags = vec!["Barge".to_string()];
        assert!(is_marine_activity(&activity));

        activity.resource_tags = vec!["OFFSHORE".to_string()];
        assert!(is_marine_activity(&activity));

        // 非整词不算
        activity.resource_tags = vec!["towel".to_string()];
        assert!(!is_marine_activity(&activity));
    }

    #[test]
    fn test_marine_by_anchor_type() {
        let mut activity = make_activity("A001");
        activity.anchor_type = Some(MarineOpType::SailAway);
        assert!(is_marine_activity(&activity));

        activity.anchor_type = Some(MarineOpType::Jackdown);
        assert!(is_marine_activity(&activity));
    }

    #[test]
    fn test_marine_by_level_keyword_substring() {
        let mut activity = make_activity("A001");
        activity.level1 = "2期海缆 Sea Works".to_string();
        assert!(is_marine_activity(&activity));

        let mut activity = make_activity("A002");
        activity.level2 = "barge mobilization".to_string();
        assert!(is_marine_activity(&activity));
    }

    #[test]
    fn test_non_marine_activity() {
        let mut activity = make_activity("A001");
        activity.level1 = "ONSHORE CIVIL".to_string();
        activity.resource_tags = vec!["crane".to_string()];
        assert!(!is_marine_activity(&activity));
    }

    #[test]
    fn test_classifier_deterministic() {
        let mut activity = make_activity("A001");
        activity.resource_tags = vec!["tow".to_string()];
        let first = is_marine_activity(&activity);
        let second = is_marine_activity(&activity);
        assert_eq!(first, second);
        assert!(first);
    }
}
