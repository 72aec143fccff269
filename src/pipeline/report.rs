// ==========================================
// 海上物流作业排程系统 - 管道报告工件输出
// ==========================================
// 职责: PR1/PR2 诊断报告与补丁工件的 JSON 写出
// 说明: 诊断用途,不参与正确性判定
// ==========================================

use crate::pipeline::error::{PipelineError, PipelineResult};
use crate::pipeline::linker::Pr1Report;
use crate::pipeline::patch::{PatchOperation, Pr2Report};
use std::fs;
use std::path::{Path, PathBuf};

// 约定文件名
pub const PR1_REPORT_FILENAME: &str = "pr1-test-report.json";
pub const PR2_REPORT_FILENAME: &str = "pr2-test-report.json";

/// 写出 PR1 报告 (pr1-test-report.json)
pub fn write_pr1_report(dir: &Path, report: &Pr1Report) -> PipelineResult<PathBuf> {
    write_json(dir, PR1_REPORT_FILENAME, report)
}

/// 写出 PR2 报告 (pr2-test-report.json)
pub fn write_pr2_report(dir: &Path, report: &Pr2Report) -> PipelineResult<PathBuf> {
    write_json(dir, PR2_REPORT_FILENAME, report)
}

/// 写出补丁工件 (文件名取报告中的 patch_file)
pub fn write_patch_file(
    dir: &Path,
    report: &Pr2Report,
    operations: &[PatchOperation],
) -> PipelineResult<PathBuf> {
    write_json(dir, &report.patch_file, operations)
}

fn write_json<T: serde::Serialize + ?Sized>(
    dir: &Path,
    filename: &str,
    payload: &T,
) -> PipelineResult<PathBuf> {
    let path = dir.join(filename);
    let json = serde_json::to_string_pretty(payload)
        .map_err(|e| PipelineError::ReportWriteError(e.to_string()))?;
    fs::write(&path, json).map_err(|e| PipelineError::ReportWriteError(e.to_string()))?;
    tracing::debug!(path = %path.display(), "报告工件已写出");
    Ok(path)
}
