// ==========================================
// 海上物流作业排程系统 - 气象预报形状归一化
// ==========================================
// 职责: snake_case/camelCase 字段变体 -> 统一内部形状
// 说明: 上游采集服务的字段命名不稳定,按别名表归一
// ==========================================

use crate::domain::weather::{ForecastPoint, WeatherForecast};
use chrono::NaiveDateTime;
use serde_json::Value as JsonValue;
use thiserror::Error;

// 支持的时间戳格式
const TS_FORMATS: [&str; 3] = ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M"];

/// 适配层错误类型
#[derive(Error, Debug)]
pub enum AdapterError {
    #[error("预报负载不是 JSON 对象")]
    NotAnObject,

    #[error("预报 series 字段缺失或不是数组")]
    SeriesMissing,
}

/// 归一化气象预报负载
///
/// 字段别名: updated_at/updatedAt, hs_m/hsM, wind_kt/windKt,
/// wind_gust_kt/windGustKt;数值字段缺失保留 None,
/// 时间戳非法的预报点跳过并记数
pub fn normalize_forecast(raw: &JsonValue) -> Result<WeatherForecast, AdapterError> {
    let object = raw.as_object().ok_or(AdapterError::NotAnObject)?;

    let updated_at = pick(object, &["updated_at", "updatedAt"])
        .and_then(JsonValue::as_str)
        .and_then(parse_ts);

    let series_raw = pick(object, &["series"])
        .and_then(JsonValue::as_array)
        .ok_or(AdapterError::SeriesMissing)?;

    let mut series = Vec::new();
    let mut dropped = 0usize;

    for point_raw in series_raw {
        let Some(point_obj) = point_raw.as_object() else {
            dropped += 1;
            continue;
        };

        let ts = pick(point_obj, &["ts", "timestamp"])
            .and_then(JsonValue::as_str)
            .and_then(parse_ts);
        let Some(ts) = ts else {
            dropped += 1;
            continue;
        };

        series.push(ForecastPoint {
            ts,
            hs_m: pick_f64(point_obj, &["hs_m", "hsM"]),
            wind_kt: pick_f64(point_obj, &["wind_kt", "windKt"]),
            wind_gust_kt: pick_f64(point_obj, &["wind_gust_kt", "windGustKt"]),
        });
    }

    if dropped > 0 {
        tracing::warn!(dropped, "预报点时间戳非法,已跳过");
    }

    // 保证时间升序
    series.sort_by_key(|p| p.ts);

    Ok(WeatherForecast { updated_at, series })
}

fn pick<'a>(
    object: &'a serde_json::Map<String, JsonValue>,
    aliases: &[&str],
) -> Option<&'a JsonValue> {
    aliases.iter().find_map(|alias| object.get(*alias))
}

fn pick_f64(object: &serde_json::Map<String, JsonValue>, aliases: &[&str]) -> Option<f64> {
    pick(object, aliases)
        .and_then(JsonValue::as_f64)
        .filter(|v| v.is_finite())
}

fn parse_ts(raw: &str) -> Option<NaiveDateTime> {
    for format in TS_FORMATS {
        if let Ok(ts) = NaiveDateTime::parse_from_str(raw.trim(), format) {
            return Some(ts);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_normalize_snake_case() {
        let raw = json!({
            "updated_at": "2026-02-05T00:00:00",
            "series": [
                { "ts": "2026-02-05T06:00:00", "hs_m": 3.5, "wind_kt": 18.0, "wind_gust_kt": 22.0 }
            ]
        });

        let forecast = normalize_forecast(&raw).unwrap();
        assert!(forecast.updated_at.is_some());
        assert_eq!(forecast.series.len(), 1);
        assert_eq!(forecast.series[0].hs_m, Some(3.5));
        assert_eq!(forecast.series[0].wind_gust_kt, Some(22.0));
    }

    #[test]
    fn test_normalize_camel_case_equivalent() {
        let snake = json!({
            "updated_at": "2026-02-05T00:00:00",
            "series": [
                { "ts": "2026-02-05T06:00:00", "hs_m": 2.0, "wind_kt": 15.0, "wind_gust_kt": 18.0 }
            ]
        });
        let camel = json!({
            "updatedAt": "2026-02-05T00:00:00",
            "series": [
                { "ts": "2026-02-05T06:00:00", "hsM": 2.0, "windKt": 15.0, "windGustKt": 18.0 }
            ]
        });

        let from_snake = normalize_forecast(&snake).unwrap();
        let from_camel = normalize_forecast(&camel).unwrap();

        assert_eq!(from_snake.series, from_camel.series);
    }

    #[test]
    fn test_normalize_missing_numeric_fields_stay_none() {
        let raw = json!({
            "series": [ { "ts": "2026-02-05T06:00:00" } ]
        });

        let forecast = normalize_forecast(&raw).unwrap();
        assert_eq!(forecast.series[0].hs_m, None);
        assert_eq!(forecast.series[0].wind_kt, None);
    }

    #[test]
    fn test_normalize_drops_bad_timestamps_and_sorts() {
        let raw = json!({
            "series": [
                { "ts": "2026-02-06T06:00:00", "hs_m": 1.0 },
                { "ts": "乱码", "hs_m": 9.9 },
                { "ts": "2026-02-05T06:00:00", "hs_m": 2.0 }
            ]
        });

        let forecast = normalize_forecast(&raw).unwrap();
        assert_eq!(forecast.series.len(), 2);
        assert!(forecast.series[0].ts < forecast.series[1].ts);
    }

    #[test]
    fn test_normalize_rejects_non_object() {
        assert!(matches!(
            normalize_forecast(&json!([1, 2, 3])),
            Err(AdapterError::NotAnObject)
        ));
        assert!(matches!(
            normalize_forecast(&json!({ "updated_at": "2026-02-05T00:00:00" })),
            Err(AdapterError::SeriesMissing)
        ));
    }
}
