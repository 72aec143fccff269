// ==========================================
// 海上物流作业排程系统 - 核心库
// ==========================================
// 依据: Marine_Ops_Master_Spec.md - 系统宪法
// 系统定位: 调度决策支持系统 (人工最终控制权)
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 引擎层 - 业务规则
pub mod engine;

// 管道层 - 事件溯源与补丁
pub mod pipeline;

// 边界适配层 - 外部数据形状归一化
pub mod adapter;

// 配置层 - 限值与管道配置
pub mod config;

// 缓存层 - 可注入存储的 TTL 缓存
pub mod cache;

// 日志系统
pub mod logging;

// API 层 - 业务接口
pub mod api;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::types::{LockLevel, MarineOpType, PinStrength, ViolationReason};

// 领域实体
pub use domain::{
    ActionLog, ActionType, ActivityChange, EventLogItem, ForecastPoint, FreezeLockViolation,
    HistoryEntry, ImpactReport, Location, ReflowPin, ResourceConflict, ScheduleActivity,
    SsotDocument, TideStatus, TideWindow, WeatherForecast, WeatherSafety,
};

// 引擎
pub use engine::{
    build_density_buckets, is_marine_activity, DensityBucket, EngineError, ReflowEngine,
    ReflowOptions, ReflowOutcome, WeatherChainEngine, WeatherDelayChange, WeatherDelayEngine,
    WeatherPropagationOutcome,
};

// 管道
pub use pipeline::{
    EventLinker, GateResult, LinkedEvent, MatchRule, ParsedEventLog, PatchOpType, PatchOperation,
    PipelineError, Pr1Report, Pr2Report,
};

// 配置
pub use config::{PipelineConfig, WeatherLimits};

// API
pub use api::{PipelineApi, ReflowApi, WeatherApi};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "海上物流作业排程系统";

// ==========================================
// 预编译检查
// ==========================================
