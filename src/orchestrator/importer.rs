//! 导入到成绩录入系统（Lança Resultado）
//!
//! 单条导入先打开确认框，确认后才调用接口；批量导入直接提交所有成功的结果

use crate::error::AppError;
use crate::models::{GradingConfig, ImportResponse, ProcessedSheet};
use crate::orchestrator::CorrectionSession;
use crate::workflow::FileState;
use tracing::{info, warn};

/// 服务器没有给出原因时使用
pub const IMPORT_ERROR: &str = "Erro na importação";
pub const BATCH_IMPORT_ERROR: &str = "Erro na importação em lote";

/// 单条导入的确认框内容
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportPrompt {
    pub index: usize,
    pub filename: String,
    pub matricula: String,
    pub lote: String,
}

impl CorrectionSession {
    /// 点击"导入"按钮：只有成功的结果才能打开确认框
    pub fn request_import(&mut self, index: usize) -> Option<ImportPrompt> {
        let Some(sheet) = self.processed_sheet(index) else {
            self.toasts.error("Erro", "Resultado não encontrado");
            return None;
        };

        let prompt = ImportPrompt {
            index,
            filename: sheet.filename.clone(),
            matricula: sheet.matricula_or_na().to_string(),
            lote: sheet.lote_or_na().to_string(),
        };
        self.pending_import = Some(index);
        Some(prompt)
    }

    /// 当前打开的确认框
    pub fn pending_import(&self) -> Option<ImportPrompt> {
        let index = self.pending_import?;
        let sheet = self.processed_sheet(index)?;
        Some(ImportPrompt {
            index,
            filename: sheet.filename.clone(),
            matricula: sheet.matricula_or_na().to_string(),
            lote: sheet.lote_or_na().to_string(),
        })
    }

    pub fn cancel_import(&mut self) {
        self.pending_import = None;
    }

    /// 确认导入；无论成功与否确认框都会关闭
    pub async fn confirm_import(&mut self, config: &GradingConfig) -> bool {
        let Some(index) = self.pending_import.take() else {
            self.toasts.error("Erro", "Nenhum resultado selecionado");
            return false;
        };
        let Some(sheet) = self.processed_sheet(index).cloned() else {
            self.toasts.error("Erro", "Nenhum resultado selecionado");
            return false;
        };

        info!("📥 导入结果: {} (学号 {})", sheet.filename, sheet.matricula_or_na());

        match self.api.import_result(&sheet, config).await {
            Ok(response) if response.is_success() => {
                let mut message =
                    "Resultado importado com sucesso para o sistema de lança resultado".to_string();
                if let Some(name) = &response.aluno_nome {
                    message.push_str(&format!(" (Aluno: {})", name));
                }
                self.toasts.success("Importado", message);
                true
            }
            Ok(response) => {
                let message = rejection_message(&response, IMPORT_ERROR);
                warn!("导入被拒绝 {}: {}", sheet.filename, message);
                self.toasts
                    .error("Erro", format!("Erro na importação: {}", message));
                false
            }
            Err(e) => {
                warn!("导入失败 {}: {}", sheet.filename, e);
                self.toasts.error(
                    "Erro",
                    format!("Erro na importação: {}", failure_message(&e, IMPORT_ERROR)),
                );
                false
            }
        }
    }

    /// 把所有成功的结果一次性导入
    pub async fn import_all(&mut self, config: &GradingConfig) -> bool {
        let sheets: Vec<ProcessedSheet> = self
            .files
            .iter()
            .filter_map(|t| match &t.state {
                FileState::Processed(sheet) => Some(sheet.clone()),
                _ => None,
            })
            .collect();

        if sheets.is_empty() {
            self.toasts
                .warning("Atenção", "Nenhum resultado válido para importar");
            return false;
        }

        info!("📥 批量导入 {} 个结果", sheets.len());

        match self.api.import_results(&sheets, config).await {
            Ok(response) if response.is_success() => {
                self.toasts.success(
                    "Importado",
                    format!("{} resultado(s) importado(s) com sucesso", sheets.len()),
                );
                true
            }
            Ok(response) => {
                let message = rejection_message(&response, BATCH_IMPORT_ERROR);
                warn!("批量导入被拒绝: {}", message);
                self.toasts
                    .error("Erro", format!("Erro na importação em lote: {}", message));
                false
            }
            Err(e) => {
                warn!("批量导入失败: {}", e);
                self.toasts.error(
                    "Erro",
                    format!(
                        "Erro na importação em lote: {}",
                        failure_message(&e, BATCH_IMPORT_ERROR)
                    ),
                );
                false
            }
        }
    }

    fn processed_sheet(&self, index: usize) -> Option<&ProcessedSheet> {
        match &self.files.get(index)?.state {
            FileState::Processed(sheet) => Some(sheet),
            _ => None,
        }
    }
}

fn rejection_message(response: &ImportResponse, fallback: &str) -> String {
    response.rejection_message().unwrap_or(fallback).to_string()
}

/// 只把服务器给出的原因展示给用户，其余情况用固定文案
fn failure_message(error: &AppError, fallback: &str) -> String {
    error.server_message().unwrap_or(fallback).to_string()
}
