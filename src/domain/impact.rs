// ==========================================
// 海上物流作业排程系统 - 影响报告领域模型
// ==========================================
// 依据: Ops_Engine_Specs_v0.2.md - Impact Report
// 红线: 同一活动在一次改期中只能出现在 changes 或
//       freeze_lock_violations 之一,不得同时出现
// ==========================================

use crate::domain::types::ViolationReason;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ==========================================
// ActivityChange - 活动变更记录
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityChange {
    pub activity_id: String,  // 活动ID
    pub old_start: NaiveDate, // 原计划开始
    pub new_start: NaiveDate, // 新计划开始
    pub change_type: String,  // 变更类型 (shifted/propagated)
    pub reason: String,       // 变更原因 (可读)
}

// ==========================================
// FreezeLockViolation - 冻结/锁定违例记录
// ==========================================
// 语义: 活动被计算为改期目标,但移动被冻结/锁定规则抑制
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FreezeLockViolation {
    pub activity_id: String,      // 活动ID
    pub old_start: NaiveDate,     // 原计划开始 (保持不变)
    pub new_start: NaiveDate,     // 被抑制的目标开始日期
    pub reason: ViolationReason,  // 违例原因 (机器可读)
    pub reason_label: String,     // 违例说明 (人工可读)
}

// ==========================================
// ResourceConflict - 资源冲突记录
// ==========================================
// 语义: 两个被移动的活动在新日期窗口内占用同一资源标签
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourceConflict {
    pub resource_tag: String,       // 冲突资源标签
    pub first_activity_id: String,  // 冲突活动A
    pub second_activity_id: String, // 冲突活动B
    pub overlap_start: NaiveDate,   // 重叠开始
    pub overlap_end: NaiveDate,     // 重叠结束
}

// ==========================================
// ImpactReport - 改期影响报告
// ==========================================
// 用途: 审计追踪,前端影响预览
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ImpactReport {
    pub changes: Vec<ActivityChange>, // 变更列表 (保持输入顺序)
    pub freeze_lock_violations: Vec<FreezeLockViolation>, // 违例列表 (按遍历遇到顺序)
    #[serde(default)]
    pub resource_conflicts: Vec<ResourceConflict>, // 资源冲突 (仅在开启检测时填充)
}

impl ImpactReport {
    /// 创建空报告
    pub fn new() -> Self {
        Self::default()
    }

    /// 移动活动数
    pub fn moved_count(&self) -> usize {
        self.changes.len()
    }

    /// 违例数
    pub fn violation_count(&self) -> usize {
        self.freeze_lock_violations.len()
    }

    /// 判断是否为纯空报告 (零位移改期的输出)
    pub fn is_noop(&self) -> bool {
        self.changes.is_empty()
            && self.freeze_lock_violations.is_empty()
            && self.resource_conflicts.is_empty()
    }

    /// 生成可读描述
    pub fn readable_description(&self, action_label: &str) -> String {
        let mut parts = vec![format!("操作类型: {}", action_label)];

        if !self.changes.is_empty() {
            parts.push(format!("移动{}个活动", self.changes.len()));
        }
        if !self.freeze_lock_violations.is_empty() {
            parts.push(format!(
                "冻结/锁定违例{}个",
                self.freeze_lock_violations.len()
            ));
        }
        if !self.resource_conflicts.is_empty() {
            parts.push(format!("资源冲突{}个", self.resource_conflicts.len()));
        }
        if parts.len() == 1 {
            parts.push("无影响".to_string());
        }

        parts.join("; ")
    }
}
