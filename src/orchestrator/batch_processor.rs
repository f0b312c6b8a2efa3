//! 批量答题卡处理器 - 编排层
//!
//! ## 职责
//!
//! `CorrectionSession` 对应一次页面会话，每次加载页面创建一个：
//!
//! 1. **文件接收**：选择 / 拖入，只接受 PDF，按文件名去重
//! 2. **顺序处理**：按当时的列表顺序逐个提交，两个文件之间固定间隔
//! 3. **状态管理**：每个文件一个 `FileState`，行和卡片都由它渲染
//! 4. **统计与通知**：每完成一个文件重新统计，结束时发一条汇总通知
//! 5. **预览与导入**：见 `importer` 和 `open_local_preview`
//!
//! 所有失败都在各自操作内处理并通过通知报告，不会让会话进入不可用状态

use crate::clients::GradingApi;
use crate::config::Config;
use crate::models::{GradingConfig, PendingFile, ProcessingResult};
use crate::orchestrator::queue::{CancelHandle, SequentialQueue};
use crate::services::{DocumentOpener, FailureWriter, LocalPreview, PreviewOutcome, SystemOpener, ToastCenter};
use crate::utils::logging::{log_batch_start, log_progress, print_final_stats};
use crate::utils::StatsCounters;
use crate::workflow::{
    render_card, render_row, BatchStats, FileRowView, FileState, ResultCardView, SheetCtx,
    SheetFlow, TrackedFile,
};
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

/// 一次批处理的汇总
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchSummary {
    /// 本次批处理包含的文件数
    pub total: usize,
    /// 全部结果中的成功数
    pub success: usize,
    /// 全部结果中的失败数
    pub errors: usize,
    pub cancelled: bool,
}

/// 一次页面会话
pub struct CorrectionSession {
    pub(crate) api: Arc<dyn GradingApi>,
    flow: SheetFlow,
    preview: LocalPreview,
    failure_writer: Option<FailureWriter>,
    pub(crate) files: Vec<TrackedFile>,
    pub(crate) toasts: ToastCenter,
    pub(crate) pending_import: Option<usize>,
    counters: StatsCounters,
    cancel: CancelHandle,
    inter_file_delay: Duration,
    counter_duration: Duration,
}

impl CorrectionSession {
    pub fn new(api: Arc<dyn GradingApi>, config: &Config) -> Self {
        let failure_writer = (!config.failure_log_file.is_empty())
            .then(|| FailureWriter::with_path(&config.failure_log_file));

        Self {
            api,
            flow: SheetFlow::new(config.verbose_logging),
            preview: LocalPreview::new(Arc::new(SystemOpener), config.preview_release_delay()),
            failure_writer,
            files: Vec::new(),
            toasts: ToastCenter::new(config.toast_duration()),
            pending_import: None,
            counters: StatsCounters::restart(BatchStats::default(), config.counter_animation()),
            cancel: CancelHandle::default(),
            inter_file_delay: config.inter_file_delay(),
            counter_duration: config.counter_animation(),
        }
    }

    /// 替换打开 PDF 的方式
    pub fn with_opener(mut self, opener: Arc<dyn DocumentOpener>, release_after: Duration) -> Self {
        self.preview = LocalPreview::new(opener, release_after);
        self
    }

    // ========== 查询 ==========

    pub fn files(&self) -> &[TrackedFile] {
        &self.files
    }

    pub fn pending_count(&self) -> usize {
        self.files.len()
    }

    pub fn state(&self, index: usize) -> Option<&FileState> {
        self.files.get(index).map(|t| &t.state)
    }

    /// 每个文件一个位置，未处理完的为 `None`
    pub fn result_slots(&self) -> Vec<Option<ProcessingResult>> {
        self.files.iter().map(TrackedFile::result).collect()
    }

    /// 已有的结果，按文件顺序
    pub fn results(&self) -> Vec<ProcessingResult> {
        self.files.iter().filter_map(TrackedFile::result).collect()
    }

    pub fn stats(&self) -> BatchStats {
        BatchStats::from_states(self.files.iter().map(|t| &t.state))
    }

    pub fn counters(&self) -> &StatsCounters {
        &self.counters
    }

    pub fn toasts(&self) -> &ToastCenter {
        &self.toasts
    }

    pub fn toasts_mut(&mut self) -> &mut ToastCenter {
        &mut self.toasts
    }

    pub fn cancel_handle(&self) -> CancelHandle {
        self.cancel.clone()
    }

    pub fn rows(&self) -> Vec<FileRowView> {
        self.files
            .iter()
            .enumerate()
            .map(|(i, t)| render_row(i, &t.file, &t.state))
            .collect()
    }

    pub fn cards(&self) -> Vec<ResultCardView> {
        self.files
            .iter()
            .enumerate()
            .map(|(i, t)| render_card(i, &t.file, &t.state))
            .collect()
    }

    // ========== 文件接收 ==========

    /// 文件选择框：只保留 PDF，已存在的文件名直接忽略，返回新增数量
    pub fn select_files(&mut self, files: Vec<PendingFile>) -> usize {
        let mut names: HashSet<String> = self.files.iter().map(|t| t.file.name.clone()).collect();

        let mut added = 0;
        for file in files {
            if !file.is_pdf() || names.contains(&file.name) {
                continue;
            }
            names.insert(file.name.clone());
            self.files.push(TrackedFile::waiting(file));
            added += 1;
        }

        self.refresh_counters();
        if added > 0 {
            self.toasts.success(
                "Arquivos adicionados",
                format!("{} arquivo(s) PDF selecionado(s)", added),
            );
        }
        added
    }

    /// 拖入文件：没有任何 PDF 时只发警告
    pub fn drop_files(&mut self, files: Vec<PendingFile>) -> usize {
        let pdfs: Vec<PendingFile> = files.into_iter().filter(PendingFile::is_pdf).collect();
        if pdfs.is_empty() {
            self.toasts.warning("Atenção", "Apenas arquivos PDF são aceitos");
            return 0;
        }
        self.select_files(pdfs)
    }

    /// 移除文件及其状态，后面的文件前移一位
    pub fn remove_file(&mut self, index: usize) -> Option<PendingFile> {
        if index >= self.files.len() {
            self.toasts.error("Erro", "Arquivo não encontrado");
            return None;
        }

        let removed = self.files.remove(index);
        self.pending_import = match self.pending_import {
            Some(i) if i == index => None,
            Some(i) if i > index => Some(i - 1),
            other => other,
        };
        self.refresh_counters();
        info!("🗑️ 已移除: {}", removed.file.name);
        Some(removed.file)
    }

    // ========== 处理 ==========

    /// 按调用时的列表顺序逐个处理所有文件
    ///
    /// 单个文件失败不会中断批处理
    pub async fn process_batch(&mut self, config: &GradingConfig) -> BatchSummary {
        if self.files.is_empty() {
            self.toasts.warning("Aviso", "Nenhum arquivo selecionado");
            return BatchSummary {
                total: 0,
                success: 0,
                errors: 0,
                cancelled: false,
            };
        }

        let total = self.files.len();
        log_batch_start(total, self.inter_file_delay.as_millis() as u64);

        self.cancel.reset();
        let mut queue = SequentialQueue::new(0..total, self.inter_file_delay, self.cancel.clone());
        let mut done = 0;
        while let Some(index) = queue.next().await {
            self.process_index(index, total, config).await;
            done += 1;
            let stats = self.stats();
            log_progress(done, total, stats.success, stats.errors);
        }

        let stats = self.stats();
        let cancelled = done < total;
        if cancelled {
            warn!("⏹️ 批处理已取消，完成 {}/{}", done, total);
            self.toasts.warning(
                "Interrompido",
                format!("Processamento interrompido: {} de {} arquivos processados.", done, total),
            );
        } else if stats.errors == 0 {
            self.toasts.success(
                "Concluído",
                format!("Todos os {} arquivos foram processados com sucesso!", stats.success),
            );
        } else {
            self.toasts.warning(
                "Concluído",
                format!(
                    "{} arquivos processados com sucesso, {} com erro.",
                    stats.success, stats.errors
                ),
            );
        }
        print_final_stats(stats.success, stats.errors, total);

        BatchSummary {
            total,
            success: stats.success,
            errors: stats.errors,
            cancelled,
        }
    }

    /// 单独处理一个文件（点击文件行）
    pub async fn process_file(&mut self, index: usize, config: &GradingConfig) -> Option<ProcessingResult> {
        if index >= self.files.len() {
            self.toasts.error("Erro", "Arquivo não encontrado");
            return None;
        }
        let total = self.files.len();
        Some(self.process_index(index, total, config).await)
    }

    async fn process_index(&mut self, index: usize, total: usize, config: &GradingConfig) -> ProcessingResult {
        let file = self.files[index].file.clone();
        let ctx = SheetCtx::new(index, total, file.name.clone());

        self.files[index].state = FileState::Processing;

        let result = self.flow.run(self.api.as_ref(), &file, config, &ctx).await;

        match &result {
            ProcessingResult::Success(_) => {
                self.toasts
                    .success("Sucesso", format!("{} processado com sucesso", file.name));
            }
            ProcessingResult::Failure(failed) => {
                self.toasts.error(
                    "Erro",
                    format!("Erro ao processar {}: {}", file.name, failed.error),
                );
                if let Some(writer) = &self.failure_writer {
                    if let Err(e) = writer.write(&file.name, &failed.error).await {
                        warn!("{} 写入失败清单失败: {}", ctx, e);
                    }
                }
            }
        }

        self.files[index].state = FileState::from_result(result.clone());
        self.refresh_counters();
        result
    }

    fn refresh_counters(&mut self) {
        self.counters = StatsCounters::restart(self.stats(), self.counter_duration);
    }

    // ========== 预览 ==========

    /// 用系统查看器打开原始 PDF
    pub async fn open_local_preview(&mut self, index: usize) -> PreviewOutcome {
        let Some(file) = self.files.get(index).map(|t| t.file.clone()) else {
            self.toasts.error("Erro", "Arquivo não encontrado");
            return PreviewOutcome::NotFound;
        };

        if !file.is_pdf() {
            self.toasts.warning("Aviso", "Este arquivo não é um PDF");
            return PreviewOutcome::NotPdf;
        }

        self.toasts
            .info("Abrindo PDF", format!("Abrindo {} no visualizador...", file.name));

        match self.preview.open(&file).await {
            Ok(PreviewOutcome::Blocked) => {
                self.toasts.warning(
                    "Visualizador bloqueado",
                    "Permita a abertura de janelas (popups) ou de um visualizador de PDF para ver o arquivo",
                );
                PreviewOutcome::Blocked
            }
            Ok(outcome) => outcome,
            Err(e) => {
                warn!("预览 {} 失败: {}", file.name, e);
                self.toasts.error("Erro", "Erro ao abrir o PDF. Tente novamente.");
                PreviewOutcome::Failed
            }
        }
    }
}
