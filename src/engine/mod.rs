// ==========================================
// 海上物流作业排程系统 - 引擎层
// ==========================================
// 依据: Ops_Engine_Specs_v0.2.md - 模块拆分
// ==========================================
// 职责: 实现业务规则引擎,纯内存数据变换
// 红线: Engine 不做 I/O, 所有被抑制的规则必须输出 reason
// ==========================================

pub mod density;
pub mod error;
pub mod events;
pub mod marine;
pub mod reflow;
pub mod weather_chain;
pub mod weather_delay;

// 重导出核心引擎
pub use density::{build_density_buckets, DensityBucket};
pub use error::{EngineError, EngineResult};
pub use events::{
    NoOpEventPublisher, OptionalEventPublisher, ScheduleEvent, ScheduleEventPublisher,
    ScheduleEventType,
};
pub use marine::is_marine_activity;
pub use reflow::{ReflowEngine, ReflowOptions, ReflowOutcome};
pub use weather_chain::{WeatherChainEngine, WeatherPropagationOutcome};
pub use weather_delay::{WeatherDelayChange, WeatherDelayEngine};
