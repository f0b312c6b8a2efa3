use crate::models::PendingFile;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tokio::fs;

/// 从磁盘读取单个文件
pub async fn load_pending_file(path: &Path) -> Result<PendingFile> {
    let bytes = fs::read(path)
        .await
        .with_context(|| format!("无法读取文件: {}", path.display()))?;

    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .with_context(|| format!("无效的文件名: {}", path.display()))?;

    Ok(PendingFile::new(name, bytes))
}

/// 读取文件夹下的所有文件（不递归），按文件名排序
///
/// 是否为 PDF 由调用方过滤；读取失败的文件只记录警告
pub async fn load_folder(folder: &Path) -> Result<Vec<PendingFile>> {
    if !folder.exists() {
        anyhow::bail!("文件夹不存在: {}", folder.display());
    }

    let mut paths = Vec::new();
    let mut entries = fs::read_dir(folder)
        .await
        .with_context(|| format!("无法读取文件夹: {}", folder.display()))?;

    while let Some(entry) = entries.next_entry().await? {
        let path = entry.path();
        if path.is_file() {
            paths.push(path);
        }
    }
    paths.sort();

    let mut files = Vec::with_capacity(paths.len());
    for path in paths {
        match load_pending_file(&path).await {
            Ok(file) => {
                tracing::debug!("已加载: {} ({} 字节)", file.name, file.size);
                files.push(file);
            }
            Err(e) => {
                tracing::warn!("加载文件失败 {}: {}", path.display(), e);
            }
        }
    }

    Ok(files)
}

/// 读取命令行给出的路径，文件夹展开为其中的文件
pub async fn load_paths(paths: &[PathBuf]) -> Result<Vec<PendingFile>> {
    let mut files = Vec::new();
    for path in paths {
        if path.is_dir() {
            files.extend(load_folder(path).await?);
        } else {
            files.push(load_pending_file(path).await?);
        }
    }
    Ok(files)
}
