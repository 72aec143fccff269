// ==========================================
// 海上物流作业排程系统 - 排程密度统计
// ==========================================
// 职责: 按日历日统计窗口内并行活动数,供热力图消费
// 说明: 只读派生视图,不落库
// ==========================================

use crate::domain::activity::{date_utils, ScheduleActivity};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ==========================================
// DensityBucket - 单日密度桶
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DensityBucket {
    pub date: NaiveDate, // 日历日
    pub count: usize,    // 当日并行活动数
}

/// 构建 [project_start, project_end] 窗口的逐日密度桶
///
/// 口径: 活动计划窗口 [planned_start, planned_finish] 覆盖当日即计数
pub fn build_density_buckets(
    activities: &[ScheduleActivity],
    project_start: NaiveDate,
    project_end: NaiveDate,
) -> Vec<DensityBucket> {
    let mut buckets = Vec::new();
    if project_start > project_end {
        return buckets;
    }

    let mut day = project_start;
    while day <= project_end {
        let count = activities
            .iter()
            .filter(|a| a.planned_start <= day && day <= a.planned_finish)
            .count();
        buckets.push(DensityBucket { date: day, count });
        day = date_utils::add_days(day, 1);
    }

    buckets
}
