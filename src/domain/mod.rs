// ==========================================
// 海上物流作业排程系统 - 领域模型层
// ==========================================
// 依据: Marine_Ops_Master_Spec.md - PART C 数据与状态体系
// ==========================================
// 职责: 定义领域实体、类型、业务规则接口
// 红线: 不含数据访问逻辑,不含引擎逻辑
// ==========================================

pub mod action_log;
pub mod activity;
pub mod event_log;
pub mod impact;
pub mod ssot;
pub mod types;
pub mod weather;

// 重导出核心类型
pub use action_log::{ActionLog, ActionType};
pub use activity::{date_utils, HistoryEntry, ReflowPin, ScheduleActivity};
pub use event_log::{group_by_activity, EventLogItem};
pub use impact::{ActivityChange, FreezeLockViolation, ImpactReport, ResourceConflict};
pub use ssot::{Location, SsotDocument, SsotEntities};
pub use types::{LockLevel, MarineOpType, PinStrength, ViolationReason};
pub use weather::{ForecastPoint, TideStatus, TideWindow, WeatherForecast, WeatherSafety};
