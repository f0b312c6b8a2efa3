use std::path::Path;
use std::sync::Arc;

pub const PDF_MIME: &str = "application/pdf";

/// 等待处理的文件
///
/// 选择或拖入时创建，用户移除时删除，提交后不再修改
#[derive(Debug, Clone)]
pub struct PendingFile {
    pub name: String,
    pub size: u64,
    pub mime_type: String,
    bytes: Arc<Vec<u8>>,
}

impl PendingFile {
    /// 用文件名推断 MIME 类型
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        let name = name.into();
        let mime_type = mime_from_name(&name).to_string();
        Self::with_mime(name, mime_type, bytes)
    }

    pub fn with_mime(name: impl Into<String>, mime_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            size: bytes.len() as u64,
            mime_type: mime_type.into(),
            bytes: Arc::new(bytes),
        }
    }

    pub fn is_pdf(&self) -> bool {
        self.mime_type == PDF_MIME
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// 共享的文件内容，不复制
    pub fn shared_bytes(&self) -> Arc<Vec<u8>> {
        Arc::clone(&self.bytes)
    }
}

/// 按扩展名推断 MIME 类型
pub fn mime_from_name(name: &str) -> &'static str {
    let ext = Path::new(name)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();

    match ext.as_str() {
        "pdf" => PDF_MIME,
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "txt" => "text/plain",
        "doc" => "application/msword",
        "docx" => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        _ => "application/octet-stream",
    }
}
