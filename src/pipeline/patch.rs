// ==========================================
// 海上物流作业排程系统 - 补丁派生与应用 (PR2)
// ==========================================
// 依据: Ops_Pipeline_Specs.md - PR2 补丁派生
// ==========================================
// 职责: 从已链接事件派生类型化补丁操作,按序应用到 SSOT 副本
// 红线: 任一操作失败即中止,不得泄漏半应用状态;输入文档只读
// ==========================================

use crate::domain::activity::HistoryEntry;
use crate::domain::ssot::SsotDocument;
use crate::pipeline::error::{PipelineError, PipelineResult};
use crate::pipeline::linker::{LinkedEvent, Pr1Report};
use crate::pipeline::validation::GateResult;
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use uuid::Uuid;

// 实际开始类事件类型
const START_EVENT_TYPES: [&str; 3] = ["ACTIVITY_STARTED", "STARTED", "ACTUAL_START"];
// 实际结束类事件类型
const FINISH_EVENT_TYPES: [&str; 4] = [
    "ACTIVITY_COMPLETED",
    "COMPLETED",
    "FINISHED",
    "ACTUAL_FINISH",
];

// ==========================================
// PatchOpType - 补丁操作类型
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PatchOpType {
    SetActualStart,  // 写入实际开始日期
    SetActualFinish, // 写入实际结束日期
    AppendHistory,   // 追加履历条目
}

impl fmt::Display for PatchOpType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PatchOpType::SetActualStart => write!(f, "SET_ACTUAL_START"),
            PatchOpType::SetActualFinish => write!(f, "SET_ACTUAL_FINISH"),
            PatchOpType::AppendHistory => write!(f, "APPEND_HISTORY"),
        }
    }
}

// ==========================================
// PatchOperation - 补丁操作
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatchOperation {
    pub op_id: String,          // 操作ID (uuid)
    pub op_type: PatchOpType,   // 操作类型
    pub activity_id: String,    // 目标活动ID
    #[serde(default)]
    pub date_value: Option<NaiveDate>, // SET_ACTUAL_* 负载
    #[serde(default)]
    pub history_entry: Option<HistoryEntry>, // APPEND_HISTORY 负载
    pub source_ts: NaiveDateTime, // 来源事件时间戳
}

// ==========================================
// Pr2Report - PR2 管道报告
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pr2Report {
    pub total_operations: usize,                 // 补丁操作总数
    pub affected_activities: Vec<String>,        // 受影响活动 (升序去重)
    pub operations_by_type: BTreeMap<String, usize>, // 按类型统计
    pub validation_result: GateResult,           // 预检门结果
    pub patch_file: String,                      // 补丁工件文件名 (约定命名)
}

// ==========================================
// 补丁派生
// ==========================================

/// 从已链接事件派生补丁操作
///
/// 排序口径: (source_ts, activity_id, 源文件行号) 升序;
/// 同一活动多个同类事件按应用顺序后者覆盖前者
pub fn derive_patch_operations(linked: &[LinkedEvent]) -> Vec<PatchOperation> {
    let mut sorted: Vec<&LinkedEvent> = linked.iter().collect();
    sorted.sort_by(|a, b| {
        a.event
            .ts
            .cmp(&b.event.ts)
            .then_with(|| a.linked_activity_id.cmp(&b.linked_activity_id))
            .then_with(|| a.event.row_number.cmp(&b.event.row_number))
    });

    sorted
        .into_iter()
        .map(|item| {
            let event_type = item.event.event_type.to_uppercase();
            if START_EVENT_TYPES.contains(&event_type.as_str()) {
                PatchOperation {
                    op_id: Uuid::new_v4().to_string(),
                    op_type: PatchOpType::SetActualStart,
                    activity_id: item.linked_activity_id.clone(),
                    date_value: Some(item.event.ts.date()),
                    history_entry: None,
                    source_ts: item.event.ts,
                }
            } else if FINISH_EVENT_TYPES.contains(&event_type.as_str()) {
                PatchOperation {
                    op_id: Uuid::new_v4().to_string(),
                    op_type: PatchOpType::SetActualFinish,
                    activity_id: item.linked_activity_id.clone(),
                    date_value: Some(item.event.ts.date()),
                    history_entry: None,
                    source_ts: item.event.ts,
                }
            } else {
                PatchOperation {
                    op_id: Uuid::new_v4().to_string(),
                    op_type: PatchOpType::AppendHistory,
                    activity_id: item.linked_activity_id.clone(),
                    date_value: None,
                    history_entry: Some(HistoryEntry {
                        ts: item.event.ts,
                        event_type: item.event.event_type.clone(),
                        detail: item.event.detail.clone(),
                    }),
                    source_ts: item.event.ts,
                }
            }
        })
        .collect()
}

/// 运行 PR2 管道
///
/// # 参数
/// - `pr1_report`: PR1 报告 (链接质量上下文)
/// - `linked`: 已链接事件
/// - `document`: SSOT 文档 (预检用,只读)
///
/// # 返回
/// 报告与补丁操作序列
pub fn run_pr2_pipeline(
    pr1_report: &Pr1Report,
    linked: &[LinkedEvent],
    document: &SsotDocument,
) -> (Pr2Report, Vec<PatchOperation>) {
    let operations = derive_patch_operations(linked);

    let affected: BTreeSet<String> = operations
        .iter()
        .map(|op| op.activity_id.clone())
        .collect();

    let mut operations_by_type: BTreeMap<String, usize> = BTreeMap::new();
    for op in &operations {
        *operations_by_type.entry(op.op_type.to_string()).or_insert(0) += 1;
    }

    let validation_result = preflight_gate(&operations, document);
    let batch_id = Uuid::new_v4();
    let patch_file = format!("pr2-patch-{}.json", batch_id);

    tracing::info!(
        total_operations = operations.len(),
        affected_activities = affected.len(),
        preflight_valid = validation_result.valid,
        pr1_matching_rate = pr1_report.matching_rate,
        "PR2 补丁派生完成"
    );

    let report = Pr2Report {
        total_operations: operations.len(),
        affected_activities: affected.into_iter().collect(),
        operations_by_type,
        validation_result,
        patch_file,
    };

    (report, operations)
}

/// patch_preflight 门: 操作目标与负载齐备性预检 (不修改文档)
fn preflight_gate(operations: &[PatchOperation], document: &SsotDocument) -> GateResult {
    let mut errors = Vec::new();

    for (idx, op) in operations.iter().enumerate() {
        if document.find_activity(&op.activity_id).is_none() {
            errors.push(format!(
                "操作{}: 目标活动{}不存在",
                idx, op.activity_id
            ));
        }
        match op.op_type {
            PatchOpType::SetActualStart | PatchOpType::SetActualFinish => {
                if op.date_value.is_none() {
                    errors.push(format!("操作{}: 缺少日期负载", idx));
                }
            }
            PatchOpType::AppendHistory => {
                if op.history_entry.is_none() {
                    errors.push(format!("操作{}: 缺少履历负载", idx));
                }
            }
        }
    }

    GateResult {
        gate: "patch_preflight".to_string(),
        valid: errors.is_empty(),
        errors,
    }
}

// ==========================================
// 补丁应用
// ==========================================

/// 按序应用补丁操作到文档深拷贝
///
/// # 返回
/// - `Ok(SsotDocument)`: 应用后的完整新文档
/// - `Err`: 任一操作失败即中止;输入文档保持不变
pub fn apply_patches(
    document: &SsotDocument,
    operations: &[PatchOperation],
) -> PipelineResult<SsotDocument> {
    let mut patched = document.clone();

    for (idx, op) in operations.iter().enumerate() {
        let activity = patched
            .entities
            .activities
            .get_mut(&op.activity_id)
            .ok_or_else(|| PipelineError::PatchTargetNotFound {
                op_index: idx,
                activity_id: op.activity_id.clone(),
            })?;

        match op.op_type {
            PatchOpType::SetActualStart => {
                let date = op.date_value.ok_or_else(|| PipelineError::PatchValueMissing {
                    op_index: idx,
                    op_type: op.op_type.to_string(),
                })?;
                if let Some(finish) = activity.actual_finish {
                    if date > finish {
                        return Err(PipelineError::PatchInvalidValue {
                            op_index: idx,
                            message: format!(
                                "实际开始{}晚于已记录实际结束{}",
                                date, finish
                            ),
                        });
                    }
                }
                activity.actual_start = Some(date);
            }
            PatchOpType::SetActualFinish => {
                let date = op.date_value.ok_or_else(|| PipelineError::PatchValueMissing {
                    op_index: idx,
                    op_type: op.op_type.to_string(),
                })?;
                if let Some(start) = activity.actual_start {
                    if date < start {
                        return Err(PipelineError::PatchInvalidValue {
                            op_index: idx,
                            message: format!(
                                "实际结束{}早于已记录实际开始{}",
                                date, start
                            ),
                        });
                    }
                }
                activity.actual_finish = Some(date);
            }
            PatchOpType::AppendHistory => {
                let entry = op
                    .history_entry
                    .clone()
                    .ok_or_else(|| PipelineError::PatchValueMissing {
                        op_index: idx,
                        op_type: op.op_type.to_string(),
                    })?;
                activity.history.push(entry);
            }
        }
    }

    Ok(patched)
}
