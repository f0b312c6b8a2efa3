//! 答题卡处理流程 - 流程层
//!
//! 核心职责：定义"一份答题卡"的处理：提交 → 判断结果 → 生成 ProcessingResult
//!
//! 成功条件：HTTP 2xx 且响应体里没有 `error` 字段

use crate::clients::GradingApi;
use crate::models::{FailedSheet, GradingConfig, PendingFile, ProcessedSheet, ProcessingResult};
use crate::utils::truncate_text;
use crate::workflow::SheetCtx;
use tracing::{info, warn};

/// 服务器没有给出错误信息时使用
pub const GENERIC_PROCESSING_ERROR: &str = "Erro no processamento";

/// 答题卡处理流程
///
/// - 不持有文件列表，只处理传入的一份
/// - 失败只体现在返回的结果里，不向上传播
pub struct SheetFlow {
    verbose_logging: bool,
}

impl SheetFlow {
    pub fn new(verbose_logging: bool) -> Self {
        Self { verbose_logging }
    }

    pub async fn run<A: GradingApi + ?Sized>(
        &self,
        api: &A,
        file: &PendingFile,
        config: &GradingConfig,
        ctx: &SheetCtx,
    ) -> ProcessingResult {
        info!("{} 📤 正在提交阅卷...", ctx);

        match api.submit_sheet(file, config).await {
            Ok(response) => {
                if response.has_error() {
                    let error = response
                        .error_message()
                        .unwrap_or(GENERIC_PROCESSING_ERROR)
                        .to_string();
                    warn!("{} ⚠️ 阅卷失败: {}", ctx, truncate_text(&error, 120));
                    return failure(file, error);
                }

                let sheet = ProcessedSheet::from_response(&file.name, response);
                info!(
                    "{} ✓ 阅卷完成: 批次 {} | 学号 {} | {} 个 bloco",
                    ctx,
                    sheet.lote_or_na(),
                    sheet.matricula_or_na(),
                    sheet.respostas.len()
                );
                if self.verbose_logging {
                    for (i, block) in sheet.respostas.iter().enumerate() {
                        info!("{}   Bloco {}: {}", ctx, i + 1, block.join(" "));
                    }
                }
                ProcessingResult::Success(sheet)
            }
            Err(e) => {
                warn!("{} ❌ 提交失败: {}", ctx, e);
                let message = e
                    .server_message()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| GENERIC_PROCESSING_ERROR.to_string());
                failure(file, message)
            }
        }
    }
}

fn failure(file: &PendingFile, error: String) -> ProcessingResult {
    ProcessingResult::Failure(FailedSheet {
        filename: file.name.clone(),
        error,
    })
}
