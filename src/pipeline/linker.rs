// ==========================================
// 海上物流作业排程系统 - 事件链接管道 (PR1)
// ==========================================
// 依据: Ops_Pipeline_Specs.md - PR1 事件链接与质量校验
// ==========================================
// 职责: 将外部事件链接到 SSOT 活动,统计链接率,运行校验门
// 红线: 链接规则必须确定且可复现;所有校验门全部运行,不短路
// ==========================================

use crate::config::PipelineConfig;
use crate::domain::event_log::EventLogItem;
use crate::domain::ssot::SsotDocument;
use crate::pipeline::error::PipelineResult;
use crate::pipeline::event_log_parser::{EventLogParser, ParsedEventLog};
use crate::pipeline::validation::{run_validation_gates, GateResult};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

// ==========================================
// MatchRule - 链接规则
// ==========================================
// 规则按序尝试: 1) activity_id 精确匹配 2) activity_id 忽略大小写匹配
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MatchRule {
    ExactId,           // 精确匹配
    CaseInsensitiveId, // 忽略大小写匹配
}

// ==========================================
// LinkedEvent - 已链接事件
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinkedEvent {
    pub event: EventLogItem,      // 事件条目
    pub linked_activity_id: String, // 链接到的 SSOT 活动ID (规范化后)
    pub matched_rule: MatchRule,  // 命中的链接规则
}

// ==========================================
// LinkOutcome - 链接结果 (内部使用)
// ==========================================
#[derive(Debug, Clone, Default)]
pub struct LinkOutcome {
    pub linked: Vec<LinkedEvent>,     // 已链接事件 (保持源文件顺序)
    pub unlinked: Vec<EventLogItem>,  // 未能链接的事件
}

// ==========================================
// Pr1Report - PR1 管道报告
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pr1Report {
    pub total_events: usize,                  // 事件总数 (含坏行)
    pub linked_count: usize,                  // 已链接数
    pub unlinked_count: usize,                // 未链接数 (含坏行)
    pub matching_rate: f64,                   // 链接率 = linked / total (total=0 时为 0)
    pub validation_results: Vec<GateResult>,  // 校验门结果 (全部门)
}

impl Pr1Report {
    /// 判断所有校验门是否通过
    pub fn all_gates_valid(&self) -> bool {
        self.validation_results.iter().all(|g| g.valid)
    }
}

// ==========================================
// EventLinker - 事件链接器
// ==========================================
pub struct EventLinker;

impl Default for EventLinker {
    fn default() -> Self {
        Self::new()
    }
}

impl EventLinker {
    pub fn new() -> Self {
        Self
    }

    /// 按规则链接事件到 SSOT 活动
    ///
    /// 忽略大小写匹配的落点取键序最小的活动,保证确定性
    pub fn link(&self, events: &[EventLogItem], document: &SsotDocument) -> LinkOutcome {
        // 忽略大小写索引 (BTreeMap 键序保证首个键胜出)
        let mut lowercase_index: HashMap<String, &str> = HashMap::new();
        for activity_id in document.entities.activities.keys() {
            lowercase_index
                .entry(activity_id.to_lowercase())
                .or_insert(activity_id.as_str());
        }

        let mut outcome = LinkOutcome::default();

        for event in events {
            // 规则 1: 精确匹配
            if document.entities.activities.contains_key(&event.activity_id) {
                outcome.linked.push(LinkedEvent {
                    event: event.clone(),
                    linked_activity_id: event.activity_id.clone(),
                    matched_rule: MatchRule::ExactId,
                });
                continue;
            }

            // 规则 2: 忽略大小写匹配
            if let Some(canonical) = lowercase_index.get(&event.activity_id.to_lowercase()) {
                outcome.linked.push(LinkedEvent {
                    event: event.clone(),
                    linked_activity_id: (*canonical).to_string(),
                    matched_rule: MatchRule::CaseInsensitiveId,
                });
                continue;
            }

            outcome.unlinked.push(event.clone());
        }

        outcome
    }
}

/// 运行 PR1 管道 (文件入口)
///
/// # 参数
/// - `events_csv`: 事件日志文件路径
/// - `document`: SSOT 文档
/// - `config`: 管道配置
///
/// # 返回
/// - `Ok((Pr1Report, LinkOutcome))`: 报告与链接结果 (供 PR2 续用)
/// - `Err`: 文件不存在或不可解析 (顶层致命)
pub fn run_pr1_pipeline(
    events_csv: &Path,
    document: &SsotDocument,
    config: &PipelineConfig,
) -> PipelineResult<(Pr1Report, LinkOutcome)> {
    let parser = EventLogParser::new();
    let parsed = parser.parse_file(events_csv)?;
    Ok(run_pr1(&parsed, document, config))
}

/// 运行 PR1 管道 (内存入口)
pub fn run_pr1(
    parsed: &ParsedEventLog,
    document: &SsotDocument,
    config: &PipelineConfig,
) -> (Pr1Report, LinkOutcome) {
    let linker = EventLinker::new();
    let outcome = linker.link(&parsed.events, document);

    // 口径: 坏行计入总数与未链接数
    let total_events = parsed.total_rows();
    let linked_count = outcome.linked.len();
    let unlinked_count = total_events - linked_count;
    let matching_rate = if total_events == 0 {
        0.0
    } else {
        linked_count as f64 / total_events as f64
    };

    let validation_results =
        run_validation_gates(parsed, &outcome.linked, matching_rate, config);

    tracing::info!(
        total_events,
        linked_count,
        unlinked_count,
        matching_rate,
        "PR1 事件链接完成"
    );

    let report = Pr1Report {
        total_events,
        linked_count,
        unlinked_count,
        matching_rate,
        validation_results,
    };

    (report, outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::activity::ScheduleActivity;
    use crate::domain::ssot::SsotEntities;
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

    fn make_document(ids: &[&str]) -> SsotDocument {
        let mut entities = SsotEntities::default();
        for id in ids {
            entities
                .activities
                .insert(id.to_string(), make_activity(id));
        }
        SsotDocument {
            version: Some("v0.8.0".to_string()),
            entities,
        }
    }

    fn make_event(activity_id: &str, row_number: usize) -> EventLogItem {
        EventLogItem {
            activity_id: activity_id.to_string(),
            ts: NaiveDate::from_ymd_opt(2026, 2, 5)
                .unwrap()
                .and_hms_opt(8, 0, 0)
                .unwrap(),
            event_type: "STATUS_UPDATE".to_string(),
            detail: None,
            row_number,
        }
    }

    #[test]
    fn test_link_exact_and_case_insensitive() {
        let linker = EventLinker::new();
        let document = make_document(&["A001", "A002"]);
        let events = vec![
            make_event("A001", 2),
            make_event("a002", 3),
            make_event("A999", 4),
        ];

        let outcome = linker.link(&events, &document);

        assert_eq!(outcome.linked.len(), 2);
        assert_eq!(outcome.linked[0].matched_rule, MatchRule::ExactId);
        assert_eq!(outcome.linked[1].matched_rule, MatchRule::CaseInsensitiveId);
        assert_eq!(outcome.linked[1].linked_activity_id, "A002");
        assert_eq!(outcome.unlinked.len(), 1);
        assert_eq!(outcome.unlinked[0].activity_id, "A999");
    }

    #[test]
    fn test_matching_rate_zero_when_empty() {
        let document = make_document(&["A001"]);
        let parsed = ParsedEventLog::default();

        let (report, _) = run_pr1(&parsed, &document, &PipelineConfig::default());

        assert_eq!(report.total_events, 0);
        assert_eq!(report.matching_rate, 0.0);
    }

    #[test]
    fn test_matching_rate_exact_ratio() {
        let document = make_document(&["A001", "A002"]);
        let parsed = ParsedEventLog {
            events: vec![
                make_event("A001", 2),
                make_event("A002", 3),
                make_event("A999", 4),
                make_event("B777", 5),
            ],
            skipped: Vec::new(),
        };

        let (report, _) = run_pr1(&parsed, &document, &PipelineConfig::default());

        assert_eq!(report.total_events, 4);
        assert_eq!(report.linked_count, 2);
        assert_eq!(report.unlinked_count, 2);
        assert!((report.matching_rate - 0.5).abs() < 1e-9);
        assert!(report.matching_rate >= 0.0 && report.matching_rate <= 1.0);
    }

    #[test]
    fn test_skipped_rows_count_as_unlinked() {
        let document = make_document(&["A001"]);
        let parsed = ParsedEventLog {
            events: vec![make_event("A001", 2)],
            skipped: vec![crate::pipeline::event_log_parser::SkippedRow {
                row_number: 3,
                field: "ts".to_string(),
                message: "时间戳格式错误".to_string(),
            }],
        };

        let (report, _) = run_pr1(&parsed, &document, &PipelineConfig::default());

        assert_eq!(report.total_events, 2);
        assert_eq!(report.linked_count, 1);
        assert_eq!(report.unlinked_count, 1);
    }

    #[test]
    fn test_all_gates_always_run() {
        let document = make_document(&["A001"]);
        let parsed = ParsedEventLog {
            events: vec![make_event("A999", 2)],
            skipped: vec![crate::pipeline::event_log_parser::SkippedRow {
                row_number: 3,
                field: "activity_id".to_string(),
                message: "activity_id 缺失".to_string(),
            }],
        };

        let (report, _) = run_pr1(&parsed, &document, &PipelineConfig::default());

        // 即使前置门失败,全部校验门也都有结果
        assert_eq!(report.validation_results.len(), 5);
        assert!(!report.all_gates_valid());
    }
}
