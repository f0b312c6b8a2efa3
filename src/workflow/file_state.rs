use crate::models::{FailedSheet, PendingFile, ProcessedSheet, ProcessingResult};

/// 单个文件的处理状态
///
/// `Waiting → Processing → Processed | Failed`
#[derive(Debug, Clone, PartialEq)]
pub enum FileState {
    Waiting,
    Processing,
    Processed(ProcessedSheet),
    Failed(String),
}

impl FileState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, FileState::Processed(_) | FileState::Failed(_))
    }

    pub fn from_result(result: ProcessingResult) -> Self {
        match result {
            ProcessingResult::Success(sheet) => FileState::Processed(sheet),
            ProcessingResult::Failure(failed) => FileState::Failed(failed.error),
        }
    }

    /// 终态才有结果
    pub fn to_result(&self, filename: &str) -> Option<ProcessingResult> {
        match self {
            FileState::Processed(sheet) => Some(ProcessingResult::Success(sheet.clone())),
            FileState::Failed(error) => Some(ProcessingResult::Failure(FailedSheet {
                filename: filename.to_string(),
                error: error.clone(),
            })),
            FileState::Waiting | FileState::Processing => None,
        }
    }
}

/// 待处理文件和它的状态放在一起，删除文件时状态一并删除
#[derive(Debug, Clone)]
pub struct TrackedFile {
    pub file: PendingFile,
    pub state: FileState,
}

impl TrackedFile {
    pub fn waiting(file: PendingFile) -> Self {
        Self {
            file,
            state: FileState::Waiting,
        }
    }

    pub fn result(&self) -> Option<ProcessingResult> {
        self.state.to_result(&self.file.name)
    }
}

/// 累计统计，每次都从全部状态重新计算
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchStats {
    pub processed: usize,
    pub success: usize,
    pub errors: usize,
}

impl BatchStats {
    pub fn from_states<'a>(states: impl IntoIterator<Item = &'a FileState>) -> Self {
        let mut stats = Self::default();
        for state in states {
            match state {
                FileState::Processed(_) => stats.success += 1,
                FileState::Failed(_) => stats.errors += 1,
                FileState::Waiting | FileState::Processing => continue,
            }
            stats.processed += 1;
        }
        stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::GradingResponse;

    fn sheet(name: &str) -> ProcessedSheet {
        ProcessedSheet::from_response(name, GradingResponse::default())
    }

    #[test]
    fn test_only_terminal_states_have_results() {
        assert_eq!(FileState::Waiting.to_result("a.pdf"), None);
        assert_eq!(FileState::Processing.to_result("a.pdf"), None);

        let failed = FileState::Failed("Erro no processamento".into());
        let result = failed.to_result("b.pdf").unwrap();
        assert_eq!(result.filename(), "b.pdf");
        assert_eq!(result.error(), Some("Erro no processamento"));

        let ok = FileState::Processed(sheet("a.pdf"));
        assert!(ok.to_result("a.pdf").unwrap().is_success());
    }

    #[test]
    fn test_stats_from_states() {
        let states = vec![
            FileState::Processed(sheet("a.pdf")),
            FileState::Failed("x".into()),
            FileState::Waiting,
            FileState::Processing,
            FileState::Processed(sheet("c.pdf")),
        ];
        assert_eq!(
            BatchStats::from_states(&states),
            BatchStats {
                processed: 3,
                success: 2,
                errors: 1
            }
        );
    }
}
