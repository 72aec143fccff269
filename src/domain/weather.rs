// ==========================================
// 海上物流作业排程系统 - 气象安全领域模型
// ==========================================
// 依据: Ops_Engine_Specs_v0.2.md - Weather Safety
// 说明: 预报数据由外部采集,核心只消费其归一化形状
// ==========================================

use crate::config::WeatherLimits;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;

// 接近限值判定比例
const NEAR_LIMIT_RATIO: f64 = 0.9;

// ==========================================
// ForecastPoint - 逐时预报点
// ==========================================
// 数值字段缺失时按 UNKNOWN 处理,不参与限值判定
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastPoint {
    pub ts: NaiveDateTime, // 预报时刻 (逐时)
    #[serde(default)]
    pub hs_m: Option<f64>, // 有效波高 (米)
    #[serde(default)]
    pub wind_kt: Option<f64>, // 风速 (节)
    #[serde(default)]
    pub wind_gust_kt: Option<f64>, // 阵风 (节)
}

// ==========================================
// WeatherForecast - 气象预报
// ==========================================
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WeatherForecast {
    #[serde(default)]
    pub updated_at: Option<NaiveDateTime>, // 预报更新时刻
    #[serde(default)]
    pub series: Vec<ForecastPoint>, // 逐时序列 (时间升序)
}

// ==========================================
// WeatherSafety - 气象安全分级
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WeatherSafety {
    NoGo,      // 超限,禁止作业
    NearLimit, // 接近限值
    Safe,      // 安全
    Unknown,   // 数据缺失
}

impl fmt::Display for WeatherSafety {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WeatherSafety::NoGo => write!(f, "NO_GO"),
            WeatherSafety::NearLimit => write!(f, "NEAR_LIMIT"),
            WeatherSafety::Safe => write!(f, "SAFE"),
            WeatherSafety::Unknown => write!(f, "UNKNOWN"),
        }
    }
}

impl WeatherSafety {
    /// 按限值对单个预报点分级
    ///
    /// 规则: 任一读数超过对应限值即 NO_GO;
    ///       任一读数达到限值 90% 即 NEAR_LIMIT;
    ///       全部读数缺失为 UNKNOWN;其余为 SAFE
    pub fn classify(point: &ForecastPoint, limits: &WeatherLimits) -> WeatherSafety {
        let readings = [
            (point.hs_m, limits.hs_limit_m),
            (point.wind_kt, limits.wind_limit_kt),
            (point.wind_gust_kt, limits.wind_gust_limit_kt),
        ];

        if readings.iter().all(|(value, _)| value.is_none()) {
            return WeatherSafety::Unknown;
        }

        let mut near_limit = false;
        for (value, limit) in readings {
            if let Some(value) = value {
                if value > limit {
                    return WeatherSafety::NoGo;
                }
                if value >= limit * NEAR_LIMIT_RATIO {
                    near_limit = true;
                }
            }
        }

        if near_limit {
            WeatherSafety::NearLimit
        } else {
            WeatherSafety::Safe
        }
    }
}

// ==========================================
// TideWindow - 潮汐/航道窗口
// ==========================================
// 外部港务系统提供的窗口分级,仅做分级映射
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TideStatus {
    Safe,   // 可作业
    Danger, // 危险
    Closed, // 封航
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TideWindow {
    pub start: NaiveDateTime,  // 窗口开始
    pub end: NaiveDateTime,    // 窗口结束
    pub status: TideStatus,    // 窗口分级
}

impl TideStatus {
    /// 映射到统一气象安全分级
    pub fn to_safety(&self) -> WeatherSafety {
        match self {
            TideStatus::Safe => WeatherSafety::Safe,
            TideStatus::Danger => WeatherSafety::NearLimit,
            TideStatus::Closed => WeatherSafety::NoGo,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_point(hs: Option<f64>, wind: Option<f64>, gust: Option<f64>) -> ForecastPoint {
        ForecastPoint {
            ts: chrono::NaiveDate::from_ymd_opt(2026, 2, 5)
                .unwrap()
                .and_hms_opt(6, 0, 0)
                .unwrap(),
            hs_m: hs,
            wind_kt: wind,
            wind_gust_kt: gust,
        }
    }

    #[test]
    fn test_classify_no_go_on_wave_height() {
        let limits = WeatherLimits::default();
        let point = make_point(Some(3.5), Some(10.0), Some(12.0));
        assert_eq!(WeatherSafety::classify(&point, &limits), WeatherSafety::NoGo);
    }

    #[test]
    fn test_classify_no_go_on_gust_only() {
        let limits = WeatherLimits::default();
        let point = make_point(Some(1.0), Some(10.0), Some(26.0));
        assert_eq!(WeatherSafety::classify(&point, &limits), WeatherSafety::NoGo);
    }

    #[test]
    fn test_classify_near_limit() {
        let limits = WeatherLimits::default();
        // 风速 19kt >= 20 * 0.9
        let point = make_point(Some(1.0), Some(19.0), Some(15.0));
        assert_eq!(
            WeatherSafety::classify(&point, &limits),
            WeatherSafety::NearLimit
        );
    }

    #[test]
    fn test_classify_safe() {
        let limits = WeatherLimits::default();
        let point = make_point(Some(1.0), Some(10.0), Some(12.0));
        assert_eq!(WeatherSafety::classify(&point, &limits), WeatherSafety::Safe);
    }

    #[test]
    fn test_classify_unknown_when_all_missing() {
        let limits = WeatherLimits::default();
        let point = make_point(None, None, None);
        assert_eq!(
            WeatherSafety::classify(&point, &limits),
            WeatherSafety::Unknown
        );
    }

    #[test]
    fn test_partial_readings_still_classified() {
        let limits = WeatherLimits::default();
        // 仅波高一项,且安全
        let point = make_point(Some(0.5), None, None);
        assert_eq!(WeatherSafety::classify(&point, &limits), WeatherSafety::Safe);
    }

    #[test]
    fn test_tide_status_mapping() {
        assert_eq!(TideStatus::Safe.to_safety(), WeatherSafety::Safe);
        assert_eq!(TideStatus::Danger.to_safety(), WeatherSafety::NearLimit);
        assert_eq!(TideStatus::Closed.to_safety(), WeatherSafety::NoGo);
    }

    #[test]
    fn test_tide_window_deserialization() {
        let json = r#"{
            "start": "2026-02-05T04:00:00",
            "end": "2026-02-05T10:00:00",
            "status": "CLOSED"
        }"#;

        let window: TideWindow = serde_json::from_str(json).unwrap();
        assert_eq!(window.status, TideStatus::Closed);
        assert_eq!(window.status.to_safety(), WeatherSafety::NoGo);
        assert!(window.start < window.end);
    }
}
