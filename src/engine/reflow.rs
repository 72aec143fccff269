// ==========================================
// 海上物流作业排程系统 - 改期联动引擎
// ==========================================
// 依据: Ops_Engine_Specs_v0.2.md - 5. Reflow Engine
// ==========================================
// 职责: 锚点活动改期后,重算联动链内所有活动的一致日期
// 输入: 活动集 + 锚点 + 新开始日期 + 选项
// 输出: 派生活动集 + 影响报告
// 红线: 输入活动集只读;冻结/锁定为无条件安全护栏
// ==========================================

use crate::domain::activity::{date_utils, ScheduleActivity};
use crate::domain::impact::{
    ActivityChange, FreezeLockViolation, ImpactReport, ResourceConflict,
};
use crate::domain::types::ViolationReason;
use crate::engine::error::{EngineError, EngineResult};
use std::collections::HashSet;

// ==========================================
// ReflowOptions - 改期选项
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReflowOptions {
    pub respect_locks: bool,           // 是否尊重软约束 (软钉固)
    pub check_resource_conflicts: bool, // 是否检测资源冲突
}

impl Default for ReflowOptions {
    fn default() -> Self {
        Self {
            respect_locks: true,
            check_resource_conflicts: false,
        }
    }
}

// ==========================================
// ReflowOutcome - 改期结果
// ==========================================
#[derive(Debug, Clone)]
pub struct ReflowOutcome {
    pub activities: Vec<ScheduleActivity>, // 派生活动集 (保持输入顺序)
    pub impact_report: ImpactReport,       // 影响报告
}

// ==========================================
// ReflowEngine - 改期联动引擎
// ==========================================
// 红线: 无状态引擎,所有方法都是纯函数
pub struct ReflowEngine;

impl Default for ReflowEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl ReflowEngine {
    /// 创建新的改期联动引擎
    pub fn new() -> Self {
        Self
    }

    /// 执行锚点改期联动
    ///
    /// # 参数
    /// - `activities`: 活动集 (activity_id 唯一,顺序即排程顺序)
    /// - `anchor_id`: 锚点活动ID
    /// - `new_start`: 锚点新开始日期
    /// - `options`: 改期选项
    ///
    /// # 返回
    /// - `Ok(ReflowOutcome)`: 派生活动集与影响报告
    /// - `Err(EngineError::AnchorNotFound)`: 锚点不存在
    ///
    /// # 联动链口径
    /// 排程顺序上位于锚点及其之后、且与锚点同属一个 level1 分组的活动;
    /// 锚点 level1 为空时,链为锚点及其之后的全部活动
    ///
    /// # 冻结/锁定判定优先级
    /// 1. 已记录实际日期 -> actual_frozen 违例,不改日期
    /// 2. 硬锁定/硬钉固/显式锁定 -> hard_lock_or_pin 违例,不改日期
    /// 3. 软钉固且 respect_locks -> soft_pin 违例,不改日期
    /// 4. 其余 -> 应用候选日期,记录 shifted 变更
    ///
    /// 规则 1-2 与 respect_locks 无关;锚点自身同样按此优先级判定,
    /// 被冻结/锁定的锚点记为违例而非错误,位移仍向链内其余活动传播
    pub fn reflow(
        &self,
        activities: &[ScheduleActivity],
        anchor_id: &str,
        new_start: chrono::NaiveDate,
        options: &ReflowOptions,
    ) -> EngineResult<ReflowOutcome> {
        let anchor_pos = activities
            .iter()
            .position(|a| a.activity_id == anchor_id)
            .ok_or_else(|| EngineError::AnchorNotFound {
                activity_id: anchor_id.to_string(),
            })?;
        let anchor = &activities[anchor_pos];

        let delta_days = date_utils::diff_days(anchor.planned_start, new_start);
        tracing::debug!(
            anchor_id = %anchor_id,
            delta_days,
            respect_locks = options.respect_locks,
            "开始改期联动"
        );

        let mut result: Vec<ScheduleActivity> = activities.to_vec();
        let mut report = ImpactReport::new();

        // 零位移: 遍历链等价于原样返回,不产生变更与违例
        if delta_days == 0 {
            return Ok(ReflowOutcome {
                activities: result,
                impact_report: report,
            });
        }

        let chain_level1 = anchor.level1.clone();

        for idx in anchor_pos..activities.len() {
            let activity = &activities[idx];

            // 联动链成员判定
            if !chain_level1.is_empty() && activity.level1 != chain_level1 {
                continue;
            }

            let is_anchor = idx == anchor_pos;
            let candidate_start = date_utils::add_days(activity.planned_start, delta_days);

            // ----- 优先级 1: 实际日期冻结 -----
            if activity.is_frozen() {
                report.freeze_lock_violations.push(Self::make_violation(
                    activity,
                    candidate_start,
                    ViolationReason::ActualFrozen,
                ));
                continue;
            }

            // ----- 优先级 2: 硬锁定/硬钉固 -----
            if activity.is_hard_locked() {
                report.freeze_lock_violations.push(Self::make_violation(
                    activity,
                    candidate_start,
                    ViolationReason::HardLockOrPin,
                ));
                continue;
            }

            // ----- 优先级 3: 软钉固 (仅锚点豁免) -----
            if !is_anchor && options.respect_locks && activity.has_soft_pin() {
                report.freeze_lock_violations.push(Self::make_violation(
                    activity,
                    candidate_start,
                    ViolationReason::SoftPin,
                ));
                continue;
            }

            // ----- 优先级 4: 应用候选日期 -----
            let reason = if is_anchor {
                format!(
                    "锚点改期: 从{}移动到{}",
                    activity.planned_start, candidate_start
                )
            } else {
                format!("随锚点{}联动平移{}天", anchor_id, delta_days)
            };

            result[idx] = activity.shifted_by(delta_days);
            report.changes.push(ActivityChange {
                activity_id: activity.activity_id.clone(),
                old_start: activity.planned_start,
                new_start: candidate_start,
                change_type: "shifted".to_string(),
                reason,
            });
        }

        // ----- 资源冲突检测 (仅在开启时扫描) -----
        if options.check_resource_conflicts {
            report.resource_conflicts = Self::detect_resource_conflicts(&result, &report.changes);
        }

        tracing::info!(
            anchor_id = %anchor_id,
            moved = report.moved_count(),
            violations = report.violation_count(),
            conflicts = report.resource_conflicts.len(),
            "改期联动完成"
        );

        Ok(ReflowOutcome {
            activities: result,
            impact_report: report,
        })
    }

    /// 构造违例记录
    fn make_violation(
        activity: &ScheduleActivity,
        candidate_start: chrono::NaiveDate,
        reason: ViolationReason,
    ) -> FreezeLockViolation {
        FreezeLockViolation {
            activity_id: activity.activity_id.clone(),
            old_start: activity.planned_start,
            new_start: candidate_start,
            reason,
            reason_label: reason.label().to_string(),
        }
    }

    /// 检测被移动活动之间的资源双重占用
    ///
    /// 口径: 两个被移动的活动共享同一资源标签 (忽略大小写),
    /// 且新日期窗口存在重叠
    fn detect_resource_conflicts(
        activities: &[ScheduleActivity],
        changes: &[ActivityChange],
    ) -> Vec<ResourceConflict> {
        let moved_ids: HashSet<&str> = changes.iter().map(|c| c.activity_id.as_str()).collect();
        let moved: Vec<&ScheduleActivity> = activities
            .iter()
            .filter(|a| moved_ids.contains(a.activity_id.as_str()))
            .collect();

        let mut conflicts = Vec::new();
        let mut seen: HashSet<(String, String, String)> = HashSet::new();

        for i in 0..moved.len() {
            for j in (i + 1)..moved.len() {
                let first = moved[i];
                let second = moved[j];

                for tag in &first.resource_tags {
                    let normalized = tag.trim().to_lowercase();
                    if normalized.is_empty() {
                        continue;
                    }
                    let shared = second
                        .resource_tags
                        .iter()
                        .any(|other| other.trim().eq_ignore_ascii_case(tag.trim()));
                    if !shared {
                        continue;
                    }

                    let overlap_start = first.planned_start.max(second.planned_start);
                    let overlap_end = first.planned_finish.min(second.planned_finish);
                    if overlap_start > overlap_end {
                        continue;
                    }

                    let key = (
                        first.activity_id.clone(),
                        second.activity_id.clone(),
                        normalized.clone(),
                    );
                    if !seen.insert(key) {
                        continue;
                    }

                    conflicts.push(ResourceConflict {
                        resource_tag: normalized.clone(),
                        first_activity_id: first.activity_id.clone(),
                        second_activity_id: second.activity_id.clone(),
                        overlap_start,
                        overlap_end,
                    });
                }
            }
        }

        conflicts
    }
}
