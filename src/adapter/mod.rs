// ==========================================
// 海上物流作业排程系统 - 边界适配层
// ==========================================
// 职责: 外部数据形状归一化,固定内部目标模式
// 红线: 形状归一只发生在边界,不进入算法核心
// ==========================================

pub mod weather;

pub use weather::{normalize_forecast, AdapterError};
