// ==========================================
// 海上物流作业排程系统 - 事件溯源管道API
// ==========================================
// 职责: PR1/PR2 管道与补丁应用的入口;补丁应用结果
//       包装为 success/document/errors 结果对象
// ==========================================

use crate::api::error::ApiResult;
use crate::config::PipelineConfig;
use crate::domain::ssot::SsotDocument;
use crate::pipeline::linker::{run_pr1_pipeline, LinkOutcome, Pr1Report};
use crate::pipeline::patch::{apply_patches, run_pr2_pipeline, PatchOperation, Pr2Report};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::instrument;

// ==========================================
// ApplyPatchOutcome - 补丁应用结果对象
// ==========================================
// 失败不抛错,面向 HTTP 处理器的平铺结果
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplyPatchOutcome {
    pub success: bool,                  // 是否全部应用成功
    pub document: Option<SsotDocument>, // 成功时为应用后的新文档
    pub errors: Vec<String>,            // 失败原因 (中止时恰好一条)
}

// ==========================================
// PipelineApi - 事件溯源管道API
// ==========================================
pub struct PipelineApi {
    config: PipelineConfig,
}

impl Default for PipelineApi {
    fn default() -> Self {
        Self::new(PipelineConfig::default())
    }
}

impl PipelineApi {
    pub fn new(config: PipelineConfig) -> Self {
        Self { config }
    }

    /// 运行 PR1 管道 (事件解析 + 链接 + 校验门)
    #[instrument(skip(self, document), fields(events_csv = %events_csv.display()))]
    pub fn run_pr1(
        &self,
        events_csv: &Path,
        document: &SsotDocument,
    ) -> ApiResult<(Pr1Report, LinkOutcome)> {
        Ok(run_pr1_pipeline(events_csv, document, &self.config)?)
    }

    /// 运行 PR2 管道 (补丁派生 + 预检)
    #[instrument(skip(self, pr1_report, link_outcome, document))]
    pub fn run_pr2(
        &self,
        pr1_report: &Pr1Report,
        link_outcome: &LinkOutcome,
        document: &SsotDocument,
    ) -> ApiResult<(Pr2Report, Vec<PatchOperation>)> {
        Ok(run_pr2_pipeline(pr1_report, &link_outcome.linked, document))
    }

    /// 应用补丁操作
    ///
    /// 任一操作失败即中止: success=false,document=None,
    /// 输入文档不受影响
    #[instrument(skip(self, document, operations), fields(operations = operations.len()))]
    pub fn apply_patches(
        &self,
        document: &SsotDocument,
        operations: &[PatchOperation],
    ) -> ApplyPatchOutcome {
        match apply_patches(document, operations) {
            Ok(patched) => ApplyPatchOutcome {
                success: true,
                document: Some(patched),
                errors: Vec::new(),
            },
            Err(err) => {
                tracing::warn!("补丁应用中止: {}", err);
                ApplyPatchOutcome {
                    success: false,
                    document: None,
                    errors: vec![err.to_string()],
                }
            }
        }
    }
}
