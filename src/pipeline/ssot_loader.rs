// ==========================================
// 海上物流作业排程系统 - SSOT 文档装载
// ==========================================
// 职责: 读取/解析版本化 SSOT JSON 文档
// 红线: 顶层解析失败对调用方致命,不做部分恢复
// ==========================================

use crate::domain::ssot::SsotDocument;
use crate::pipeline::error::{PipelineError, PipelineResult};
use std::fs;
use std::path::Path;

/// 装载 SSOT 文档
pub fn load_ssot_document(path: &Path) -> PipelineResult<SsotDocument> {
    if !path.exists() {
        return Err(PipelineError::FileNotFound(path.display().to_string()));
    }

    let content = fs::read_to_string(path)?;
    let mut document: SsotDocument = serde_json::from_str(&content)?;

    // 文档内未标版本时,回退到文件名约定
    if document.version.is_none() {
        document.version = parse_version_from_filename(path);
    }

    tracing::debug!(
        path = %path.display(),
        activities = document.entities.activities.len(),
        version = document.version.as_deref().unwrap_or("<未知>"),
        "SSOT 文档装载完成"
    );

    Ok(document)
}

/// 写出 SSOT 文档 (补丁应用后的副本回写)
pub fn save_ssot_document(path: &Path, document: &SsotDocument) -> PipelineResult<()> {
    let json = serde_json::to_string_pretty(document)?;
    fs::write(path, json)?;
    Ok(())
}

/// 从版本化文件名解析版本号 (如 option_c_v0.8.0.json -> v0.8.0)
pub fn parse_version_from_filename(path: &Path) -> Option<String> {
    let stem = path.file_stem()?.to_str()?;
    let idx = stem.rfind("_v")?;
    let version = &stem[idx + 1..];
    // 版本段须形如 v<数字>.<...>
    let digits = version.strip_prefix('v')?;
    if digits.chars().next()?.is_ascii_digit() {
        Some(version.to_string())
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_valid_document() {
        let mut temp_file = NamedTempFile::new().unwrap();
        write!(
            temp_file,
            r#"{{
                "version": "v0.8.0",
                "entities": {{
                    "activities": {{
                        "A001": {{
                            "activity_id": "A001",
                            "activity_name": "驳船拖航",
                            "duration": 1,
                            "planned_start": "2026-02-05",
                            "planned_finish": "2026-02-05"
                        }}
                    }},
                    "locations": {{}}
                }}
            }}"#
        )
        .unwrap();

        let document = load_ssot_document(temp_file.path()).unwrap();
        assert_eq!(document.version.as_deref(), Some("v0.8.0"));
        assert_eq!(document.entities.activities.len(), 1);
    }

    #[test]
    fn test_load_missing_file_fatal() {
        let result = load_ssot_document(Path::new("option_c_v9.9.9.json"));
        assert!(matches!(result, Err(PipelineError::FileNotFound(_))));
    }

    #[test]
    fn test_load_malformed_document_fatal() {
        let mut temp_file = NamedTempFile::new().unwrap();
        write!(temp_file, "{{ 不是合法JSON").unwrap();

        let result = load_ssot_document(temp_file.path());
        assert!(matches!(result, Err(PipelineError::DocumentParseError(_))));
    }

    #[test]
    fn test_parse_version_from_filename() {
        assert_eq!(
            parse_version_from_filename(Path::new("option_c_v0.8.0.json")),
            Some("v0.8.0".to_string())
        );
        assert_eq!(
            parse_version_from_filename(Path::new("plan.json")),
            None
        );
        assert_eq!(
            parse_version_from_filename(Path::new("option_verbose.json")),
            None
        );
    }

    #[test]
    fn test_save_round_trip() {
        let temp_file = NamedTempFile::new().unwrap();
        let document = SsotDocument {
            version: Some("v0.8.1".to_string()),
            entities: Default::default(),
        };

        save_ssot_document(temp_file.path(), &document).unwrap();
        let back = load_ssot_document(temp_file.path()).unwrap();

        assert_eq!(back.version.as_deref(), Some("v0.8.1"));
    }
}
