//! 本地 PDF 预览 - 业务能力层
//!
//! 把文件内容写成临时 PDF，交给系统查看器打开；
//! 打开成功后延时删除临时文件，打开失败立即删除

use crate::error::{AppError, AppResult};
use crate::models::PendingFile;
use std::io::Write;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempPath;
use tracing::{debug, warn};

/// 打开文档的能力
pub trait DocumentOpener: Send + Sync {
    fn open(&self, path: &Path) -> std::io::Result<()>;
}

/// 使用系统默认程序打开
pub struct SystemOpener;

impl DocumentOpener for SystemOpener {
    fn open(&self, path: &Path) -> std::io::Result<()> {
        open::that(path)
    }
}

/// 预览结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreviewOutcome {
    /// 已打开，临时文件稍后释放
    Opened,
    /// 查看器没有打开（相当于浏览器拦截了弹窗），临时文件已释放
    Blocked,
    /// 不是 PDF
    NotPdf,
    /// 索引对应的文件不存在
    NotFound,
    /// 临时文件写入失败
    Failed,
}

pub struct LocalPreview {
    opener: Arc<dyn DocumentOpener>,
    release_after: Duration,
}

impl LocalPreview {
    pub fn new(opener: Arc<dyn DocumentOpener>, release_after: Duration) -> Self {
        Self {
            opener,
            release_after,
        }
    }

    /// 打开预览，只返回 `Opened` 或 `Blocked`
    pub async fn open(&self, file: &PendingFile) -> AppResult<PreviewOutcome> {
        let temp_path = write_temp_pdf(file).await?;
        let path_buf = temp_path.to_path_buf();
        debug!("预览临时文件: {}", path_buf.display());

        let opener = Arc::clone(&self.opener);
        let opened = tokio::task::spawn_blocking(move || opener.open(&path_buf)).await;

        match opened {
            Ok(Ok(())) => {
                let delay = self.release_after;
                tokio::spawn(async move {
                    tokio::time::sleep(delay).await;
                    release(temp_path);
                });
                Ok(PreviewOutcome::Opened)
            }
            Ok(Err(e)) => {
                warn!("无法打开 {}: {}", file.name, e);
                release(temp_path);
                Ok(PreviewOutcome::Blocked)
            }
            Err(e) => {
                warn!("打开 {} 的任务失败: {}", file.name, e);
                release(temp_path);
                Ok(PreviewOutcome::Blocked)
            }
        }
    }
}

async fn write_temp_pdf(file: &PendingFile) -> AppResult<TempPath> {
    let bytes = file.shared_bytes();
    let name = file.name.clone();

    let written = tokio::task::spawn_blocking(move || -> std::io::Result<TempPath> {
        let mut temp = tempfile::Builder::new()
            .prefix("gabarito-")
            .suffix(".pdf")
            .tempfile()?;
        temp.write_all(&bytes)?;
        temp.flush()?;
        Ok(temp.into_temp_path())
    })
    .await
    .map_err(|e| AppError::Other(format!("写入临时文件的任务失败: {}", e)))?;

    written.map_err(|e| AppError::file_write_failed(name, e))
}

fn release(temp_path: TempPath) {
    let shown = temp_path.display().to_string();
    if let Err(e) = temp_path.close() {
        warn!("删除临时文件失败 {}: {}", shown, e);
    } else {
        debug!("已释放预览文件: {}", shown);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use std::sync::Mutex;

    struct RecordingOpener {
        succeed: bool,
        opened: Mutex<Vec<PathBuf>>,
    }

    impl RecordingOpener {
        fn new(succeed: bool) -> Arc<Self> {
            Arc::new(Self {
                succeed,
                opened: Mutex::new(Vec::new()),
            })
        }
    }

    impl DocumentOpener for RecordingOpener {
        fn open(&self, path: &Path) -> std::io::Result<()> {
            assert!(path.exists());
            self.opened.lock().unwrap().push(path.to_path_buf());
            if self.succeed {
                Ok(())
            } else {
                Err(std::io::Error::new(std::io::ErrorKind::NotFound, "sem visualizador"))
            }
        }
    }

    #[tokio::test]
    async fn test_opened_file_is_released_later() {
        let opener = RecordingOpener::new(true);
        let preview = LocalPreview::new(opener.clone(), Duration::from_millis(50));
        let file = PendingFile::new("a.pdf", b"%PDF-1.4 conteudo".to_vec());

        let outcome = preview.open(&file).await.unwrap();
        assert_eq!(outcome, PreviewOutcome::Opened);

        let path = opener.opened.lock().unwrap()[0].clone();
        assert!(path.exists());
        assert_eq!(std::fs::read(&path).unwrap(), b"%PDF-1.4 conteudo");
        assert_eq!(path.extension().and_then(|e| e.to_str()), Some("pdf"));

        tokio::time::sleep(Duration::from_millis(300)).await;
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn test_blocked_file_is_released_immediately() {
        let opener = RecordingOpener::new(false);
        let preview = LocalPreview::new(opener.clone(), Duration::from_secs(60));
        let file = PendingFile::new("a.pdf", b"%PDF".to_vec());

        let outcome = preview.open(&file).await.unwrap();
        assert_eq!(outcome, PreviewOutcome::Blocked);

        let path = opener.opened.lock().unwrap()[0].clone();
        assert!(!path.exists());
    }
}
