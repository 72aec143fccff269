// ==========================================
// 海上物流作业排程系统 - 链接质量校验门 (PR1)
// ==========================================
// 依据: Ops_Pipeline_Specs.md - PR1 数据质量规则
// 职责: 固定命名校验门集合,逐门出报告
// 红线: 所有门全部运行,不短路
// ==========================================

use crate::config::PipelineConfig;
use crate::pipeline::event_log_parser::ParsedEventLog;
use crate::pipeline::linker::LinkedEvent;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

// 校验门名称常量
pub const GATE_PRIMARY_KEY: &str = "primary_key";
pub const GATE_TIMESTAMP_VALID: &str = "timestamp_valid";
pub const GATE_DUPLICATE_EVENT: &str = "duplicate_event";
pub const GATE_LINKAGE_RATE: &str = "linkage_rate";
pub const GATE_CHRONOLOGY: &str = "chronology";

// ==========================================
// GateResult - 单门校验结果
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GateResult {
    pub gate: String,        // 门名称
    pub valid: bool,         // 是否通过
    pub errors: Vec<String>, // 错误明细
}

impl GateResult {
    fn from_errors(gate: &str, errors: Vec<String>) -> Self {
        Self {
            gate: gate.to_string(),
            valid: errors.is_empty(),
            errors,
        }
    }
}

/// 运行全部校验门
///
/// 门集合固定: primary_key / timestamp_valid / duplicate_event /
/// linkage_rate / chronology,每门都出结果
pub fn run_validation_gates(
    parsed: &ParsedEventLog,
    linked: &[LinkedEvent],
    matching_rate: f64,
    config: &PipelineConfig,
) -> Vec<GateResult> {
    vec![
        gate_primary_key(parsed),
        gate_timestamp_valid(parsed),
        gate_duplicate_event(linked),
        gate_linkage_rate(matching_rate, config),
        gate_chronology(linked),
    ]
}

/// primary_key 门: 源文件中 activity_id 必须齐备
fn gate_primary_key(parsed: &ParsedEventLog) -> GateResult {
    let errors: Vec<String> = parsed
        .skipped
        .iter()
        .filter(|row| row.field == "activity_id")
        .map(|row| format!("行{}: {}", row.row_number, row.message))
        .collect();
    GateResult::from_errors(GATE_PRIMARY_KEY, errors)
}

/// timestamp_valid 门: 源文件中 ts 必须可解析
fn gate_timestamp_valid(parsed: &ParsedEventLog) -> GateResult {
    let errors: Vec<String> = parsed
        .skipped
        .iter()
        .filter(|row| row.field == "ts")
        .map(|row| format!("行{}: {}", row.row_number, row.message))
        .collect();
    GateResult::from_errors(GATE_TIMESTAMP_VALID, errors)
}

/// duplicate_event 门: 已链接集内 (活动, 时刻, 类型) 不得重复
fn gate_duplicate_event(linked: &[LinkedEvent]) -> GateResult {
    let mut seen: HashSet<(String, chrono::NaiveDateTime, String)> = HashSet::new();
    let mut errors = Vec::new();

    for item in linked {
        let key = (
            item.linked_activity_id.clone(),
            item.event.ts,
            item.event.event_type.clone(),
        );
        if !seen.insert(key) {
            errors.push(format!(
                "行{}: 重复事件 ({}, {}, {})",
                item.event.row_number, item.linked_activity_id, item.event.ts, item.event.event_type
            ));
        }
    }

    GateResult::from_errors(GATE_DUPLICATE_EVENT, errors)
}

/// linkage_rate 门: 链接率不得低于配置门槛
fn gate_linkage_rate(matching_rate: f64, config: &PipelineConfig) -> GateResult {
    let mut errors = Vec::new();
    if matching_rate < config.linkage_rate_threshold {
        errors.push(format!(
            "链接率{:.3}低于门槛{:.3}",
            matching_rate, config.linkage_rate_threshold
        ));
    }
    GateResult::from_errors(GATE_LINKAGE_RATE, errors)
}

/// chronology 门: 同一活动的事件在源文件中须按时间非降序出现
fn gate_chronology(linked: &[LinkedEvent]) -> GateResult {
    let mut last_ts: HashMap<&str, chrono::NaiveDateTime> = HashMap::new();
    let mut errors = Vec::new();

    for item in linked {
        let activity_id = item.linked_activity_id.as_str();
        if let Some(previous) = last_ts.get(activity_id) {
            if item.event.ts < *previous {
                errors.push(format!(
                    "行{}: 活动{}事件时间倒序 ({} < {})",
                    item.event.row_number, activity_id, item.event.ts, previous
                ));
            }
        }
        let entry = last_ts.entry(activity_id).or_insert(item.event.ts);
        if item.event.ts > *entry {
            *entry = item.event.ts;
        }
    }

    GateResult::from_errors(GATE_CHRONOLOGY, errors)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::event_log::EventLogItem;
    use crate::pipeline::event_log_parser::SkippedRow;
    use crate::pipeline::linker::MatchRule;
    use chrono::NaiveDate;

    fn make_linked(activity_id: &str, hour: u32, row_number: usize) -> LinkedEvent {
        LinkedEvent {
            event: EventLogItem {
                activity_id: activity_id.to_string(),
                ts: NaiveDate::from_ymd_opt(2026, 2, 5)
                    .unwrap()
                    .and_hms_opt(hour, 0, 0)
                    .unwrap(),
                event_type: "STATUS_UPDATE".to_string(),
                detail: None,
                row_number,
            },
            linked_activity_id: activity_id.to_string(),
            matched_rule: MatchRule::ExactId,
        }
    }

    #[test]
    fn test_gates_all_pass_on_clean_input() {
        let parsed = ParsedEventLog {
            events: Vec::new(),
            skipped: Vec::new(),
        };
        let linked = vec![make_linked("A001", 8, 2), make_linked("A001", 9, 3)];

        let results = run_validation_gates(&parsed, &linked, 1.0, &PipelineConfig::default());

        assert_eq!(results.len(), 5);
        assert!(results.iter().all(|g| g.valid));
    }

    #[test]
    fn test_gate_primary_key_and_timestamp_report_skips() {
        let parsed = ParsedEventLog {
            events: Vec::new(),
            skipped: vec![
                SkippedRow {
                    row_number: 3,
                    field: "activity_id".to_string(),
                    message: "activity_id 缺失".to_string(),
                },
                SkippedRow {
                    row_number: 4,
                    field: "ts".to_string(),
                    message: "时间戳格式错误: xx".to_string(),
                },
            ],
        };

        let results = run_validation_gates(&parsed, &[], 1.0, &PipelineConfig::default());

        let primary = results.iter().find(|g| g.gate == GATE_PRIMARY_KEY).unwrap();
        assert!(!primary.valid);
        assert_eq!(primary.errors.len(), 1);

        let ts = results
            .iter()
            .find(|g| g.gate == GATE_TIMESTAMP_VALID)
            .unwrap();
        assert!(!ts.valid);
        assert!(ts.errors[0].contains("行4"));
    }

    #[test]
    fn test_gate_duplicate_event() {
        let parsed = ParsedEventLog::default();
        let linked = vec![make_linked("A001", 8, 2), make_linked("A001", 8, 3)];

        let results = run_validation_gates(&parsed, &linked, 1.0, &PipelineConfig::default());

        let dup = results
            .iter()
            .find(|g| g.gate == GATE_DUPLICATE_EVENT)
            .unwrap();
        assert!(!dup.valid);
        assert_eq!(dup.errors.len(), 1);
        assert!(dup.errors[0].contains("行3"));
    }

    #[test]
    fn test_gate_linkage_rate_threshold() {
        let parsed = ParsedEventLog::default();

        let results = run_validation_gates(&parsed, &[], 0.5, &PipelineConfig::default());

        let rate = results.iter().find(|g| g.gate == GATE_LINKAGE_RATE).unwrap();
        assert!(!rate.valid);
        assert!(rate.errors[0].contains("0.500"));
    }

    #[test]
    fn test_gate_chronology_detects_out_of_order() {
        let parsed = ParsedEventLog::default();
        let linked = vec![
            make_linked("A001", 10, 2),
            make_linked("A001", 8, 3),
            make_linked("A002", 9, 4),
        ];

        let results = run_validation_gates(&parsed, &linked, 1.0, &PipelineConfig::default());

        let chronology = results.iter().find(|g| g.gate == GATE_CHRONOLOGY).unwrap();
        assert!(!chronology.valid);
        assert_eq!(chronology.errors.len(), 1);
        assert!(chronology.errors[0].contains("A001"));
    }
}
