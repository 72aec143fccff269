// ==========================================
// 海上物流作业排程系统 - 配置层
// ==========================================
// 依据: Ops_Engine_Specs_v0.2.md - 配置项全集
// ==========================================
// 职责: 限值与管道配置管理,支持键值覆写
// ==========================================

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// ==========================================
// 配置键常量
// ==========================================
pub mod config_keys {
    pub const WEATHER_HS_LIMIT_M: &str = "weather_hs_limit_m";
    pub const WEATHER_WIND_LIMIT_KT: &str = "weather_wind_limit_kt";
    pub const WEATHER_WIND_GUST_LIMIT_KT: &str = "weather_wind_gust_limit_kt";
    pub const PIPELINE_LINKAGE_RATE_THRESHOLD: &str = "pipeline_linkage_rate_threshold";
}

// ==========================================
// WeatherLimits - 气象作业限值
// ==========================================
// 默认值: Hs 3.0m / 风速 20kt / 阵风 25kt
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherLimits {
    pub hs_limit_m: f64,        // 有效波高限值 (米)
    pub wind_limit_kt: f64,     // 风速限值 (节)
    pub wind_gust_limit_kt: f64, // 阵风限值 (节)
}

impl Default for WeatherLimits {
    fn default() -> Self {
        Self {
            hs_limit_m: 3.0,
            wind_limit_kt: 20.0,
            wind_gust_limit_kt: 25.0,
        }
    }
}

impl WeatherLimits {
    /// 从键值覆写构建 (无键或解析失败回退默认值)
    pub fn from_overrides(overrides: &HashMap<String, String>) -> Self {
        let defaults = Self::default();
        Self {
            hs_limit_m: parse_f64(
                overrides.get(config_keys::WEATHER_HS_LIMIT_M),
                defaults.hs_limit_m,
            ),
            wind_limit_kt: parse_f64(
                overrides.get(config_keys::WEATHER_WIND_LIMIT_KT),
                defaults.wind_limit_kt,
            ),
            wind_gust_limit_kt: parse_f64(
                overrides.get(config_keys::WEATHER_WIND_GUST_LIMIT_KT),
                defaults.wind_gust_limit_kt,
            ),
        }
    }
}

// ==========================================
// PipelineConfig - 事件溯源管道配置
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineConfig {
    pub linkage_rate_threshold: f64, // 链接率门槛 (linkage_rate 校验门)
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            linkage_rate_threshold: 0.9,
        }
    }
}

impl PipelineConfig {
    /// 从键值覆写构建
    pub fn from_overrides(overrides: &HashMap<String, String>) -> Self {
        let defaults = Self::default();
        Self {
            linkage_rate_threshold: parse_f64(
                overrides.get(config_keys::PIPELINE_LINKAGE_RATE_THRESHOLD),
                defaults.linkage_rate_threshold,
            )
            .clamp(0.0, 1.0),
        }
    }
}

/// 容错数值解析 (空值/非法值回退默认)
fn parse_f64(raw: Option<&String>, default: f64) -> f64 {
    raw.and_then(|s| s.trim().parse::<f64>().ok())
        .filter(|v| v.is_finite())
        .unwrap_or(default)
}
