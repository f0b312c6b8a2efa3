//! 答题卡处理上下文
//!
//! 封装"正在处理第几份、哪个文件"这一信息，只用于日志

use std::fmt::Display;

#[derive(Debug, Clone)]
pub struct SheetCtx {
    /// 在待处理列表中的位置（从0开始）
    pub index: usize,
    /// 本次批处理的总数
    pub total: usize,
    pub filename: String,
}

impl SheetCtx {
    pub fn new(index: usize, total: usize, filename: impl Into<String>) -> Self {
        Self {
            index,
            total,
            filename: filename.into(),
        }
    }
}

impl Display for SheetCtx {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[答题卡 {}/{} {}]", self.index + 1, self.total, self.filename)
    }
}
