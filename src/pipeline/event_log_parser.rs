// ==========================================
// 海上物流作业排程系统 - 事件日志解析器
// ==========================================
// 依据: Ops_Pipeline_Specs.md - 阶段 0: 事件日志读取与解析
// 支持: 分隔文本 (.csv),表头行必须含 activity_id 与 ts 列
// ==========================================
// 红线: 坏行跳过并计数,不中断整批解析
// ==========================================

use crate::domain::event_log::EventLogItem;
use crate::pipeline::error::{PipelineError, PipelineResult};
use chrono::NaiveDateTime;
use csv::ReaderBuilder;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

// 支持的时间戳格式 (按顺序尝试)
const TS_FORMATS: [&str; 3] = ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M"];

// ==========================================
// SkippedRow - 被跳过的坏行
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedRow {
    pub row_number: usize, // 源文件行号
    pub field: String,     // 问题字段
    pub message: String,   // 跳过原因
}

// ==========================================
// ParsedEventLog - 解析结果
// ==========================================
#[derive(Debug, Clone, Default)]
pub struct ParsedEventLog {
    pub events: Vec<EventLogItem>, // 合法事件 (保持源文件顺序)
    pub skipped: Vec<SkippedRow>,  // 被跳过的坏行
}

impl ParsedEventLog {
    /// 源文件总行数 (合法 + 跳过)
    pub fn total_rows(&self) -> usize {
        self.events.len() + self.skipped.len()
    }
}

// ==========================================
// EventLogParser - 事件日志解析器
// ==========================================
pub struct EventLogParser;

impl Default for EventLogParser {
    fn default() -> Self {
        Self::new()
    }
}

impl EventLogParser {
    pub fn new() -> Self {
        Self
    }

    /// 从文件解析事件日志
    pub fn parse_file(&self, file_path: &Path) -> PipelineResult<ParsedEventLog> {
        if !file_path.exists() {
            return Err(PipelineError::FileNotFound(
                file_path.display().to_string(),
            ));
        }
        let file = File::open(file_path)?;
        self.parse_reader(file)
    }

    /// 从任意 Reader 解析事件日志
    pub fn parse_reader<R: Read>(&self, reader: R) -> PipelineResult<ParsedEventLog> {
        let mut csv_reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true) // 允许行长度不一致
            .from_reader(reader);

        // 读取表头
        let headers: Vec<String> = csv_reader
            .headers()?
            .iter()
            .map(|h| h.trim().to_string())
            .collect();

        let mut parsed = ParsedEventLog::default();

        for (row_idx, result) in csv_reader.records().enumerate() {
            // 表头占第 1 行,数据行号从 2 起
            let row_number = row_idx + 2;

            let record = match result {
                Ok(record) => record,
                Err(err) => {
                    parsed.skipped.push(SkippedRow {
                        row_number,
                        field: "<row>".to_string(),
                        message: format!("行解析失败: {}", err),
                    });
                    continue;
                }
            };

            let mut row_map = HashMap::new();
            for (col_idx, value) in record.iter().enumerate() {
                if let Some(header) = headers.get(col_idx) {
                    row_map.insert(header.clone(), value.trim().to_string());
                }
            }

            // 跳过完全空白的行 (不计入坏行)
            if row_map.values().all(|v| v.is_empty()) {
                continue;
            }

            match Self::map_to_event(&row_map, row_number) {
                Ok(event) => parsed.events.push(event),
                Err(skipped) => parsed.skipped.push(skipped),
            }
        }

        tracing::debug!(
            events = parsed.events.len(),
            skipped = parsed.skipped.len(),
            "事件日志解析完成"
        );

        Ok(parsed)
    }

    /// 单行映射到事件条目
    fn map_to_event(
        row: &HashMap<String, String>,
        row_number: usize,
    ) -> Result<EventLogItem, SkippedRow> {
        let activity_id = row
            .get("activity_id")
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
            .ok_or_else(|| SkippedRow {
                row_number,
                field: "activity_id".to_string(),
                message: "activity_id 缺失".to_string(),
            })?
            .to_string();

        let raw_ts = row
            .get("ts")
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
            .ok_or_else(|| SkippedRow {
                row_number,
                field: "ts".to_string(),
                message: "ts 缺失".to_string(),
            })?;

        let ts = Self::parse_ts(raw_ts).ok_or_else(|| SkippedRow {
            row_number,
            field: "ts".to_string(),
            message: format!("时间戳格式错误: {}", raw_ts),
        })?;

        let event_type = row
            .get("event_type")
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
            .unwrap_or("STATUS_UPDATE")
            .to_string();

        let detail = row
            .get("detail")
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
            .map(|v| v.to_string());

        Ok(EventLogItem {
            activity_id,
            ts,
            event_type,
            detail,
            row_number,
        })
    }

    /// 容错时间戳解析 (多格式尝试,日期-only 按当日零点)
    fn parse_ts(raw: &str) -> Option<NaiveDateTime> {
        for format in TS_FORMATS {
            if let Ok(ts) = NaiveDateTime::parse_from_str(raw, format) {
                return Some(ts);
            }
        }
        chrono::NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .ok()
            .and_then(|d| d.and_hms_opt(0, 0, 0))
    }
}
