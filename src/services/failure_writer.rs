//! 失败清单写入服务 - 业务能力层
//!
//! 只负责把处理失败的答题卡追加到清单文件，方便之后手动重传

use crate::error::{AppError, AppResult};
use std::path::PathBuf;
use tokio::io::AsyncWriteExt;
use tracing::debug;

pub struct FailureWriter {
    path: PathBuf,
}

impl FailureWriter {
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// 追加一行：`时间 | 文件名 | 错误`
    pub async fn write(&self, filename: &str, error: &str) -> AppResult<()> {
        debug!("写入失败清单: {} | {}", filename, error);

        let line = format!(
            "{} | {} | {}\n",
            chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
            filename,
            error.replace('\n', " ")
        );

        let mut file = tokio::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await
            .map_err(|e| AppError::file_write_failed(self.path.display().to_string(), e))?;

        file.write_all(line.as_bytes())
            .await
            .map_err(|e| AppError::file_write_failed(self.path.display().to_string(), e))?;

        Ok(())
    }
}
