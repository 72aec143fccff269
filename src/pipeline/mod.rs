// ==========================================
// 海上物流作业排程系统 - 事件溯源管道层
// ==========================================
// 依据: Ops_Pipeline_Specs.md - PR1/PR2 管道
// ==========================================
// 职责: 外部事件日志解析、链接、补丁派生与应用
// 红线: 坏行跳过不致命;补丁应用全有或全无
// ==========================================

pub mod error;
pub mod event_log_parser;
pub mod linker;
pub mod patch;
pub mod report;
pub mod ssot_loader;
pub mod validation;

// 重导出管道核心
pub use error::{PipelineError, PipelineResult};
pub use event_log_parser::{EventLogParser, ParsedEventLog, SkippedRow};
pub use linker::{run_pr1, run_pr1_pipeline, EventLinker, LinkOutcome, LinkedEvent, MatchRule, Pr1Report};
pub use patch::{
    apply_patches, derive_patch_operations, run_pr2_pipeline, PatchOpType, PatchOperation,
    Pr2Report,
};
pub use report::{write_patch_file, write_pr1_report, write_pr2_report};
pub use ssot_loader::{load_ssot_document, parse_version_from_filename, save_ssot_document};
pub use validation::{run_validation_gates, GateResult};
