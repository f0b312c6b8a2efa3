/// 日志工具模块
///
/// 提供日志初始化和批处理进度输出的辅助函数
use anyhow::Result;
use std::fs::{self, File, OpenOptions};
use std::sync::Mutex;
use tracing::info;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

/// 初始化日志系统
///
/// 读取 `RUST_LOG`，默认 `info`；`log_file` 非空时同时写入该文件（不带颜色）
pub fn init(log_file: &str) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let file = if log_file.is_empty() {
        None
    } else {
        Some(init_log_file(log_file)?)
    };

    build_subscriber(filter, file).try_init()?;
    Ok(())
}

/// 测试用的日志初始化，可重复调用
pub fn init_test() {
    let _ = fmt()
        .with_env_filter(EnvFilter::new("debug"))
        .with_test_writer()
        .try_init();
}

/// 初始化日志文件：写入表头，返回追加写入的句柄
pub fn init_log_file(log_file_path: &str) -> Result<File> {
    let log_header = format!(
        "{}\n答题卡处理日志 - {}\n{}\n\n",
        "=".repeat(60),
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
        "=".repeat(60)
    );
    fs::write(log_file_path, log_header)?;
    Ok(OpenOptions::new().append(true).open(log_file_path)?)
}

fn build_subscriber(
    filter: EnvFilter,
    file: Option<File>,
) -> impl tracing::Subscriber + Send + Sync + 'static {
    let file_layer = file.map(|file| {
        fmt::layer()
            .with_ansi(false)
            .with_target(false)
            .with_writer(Mutex::new(file))
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false))
        .with(file_layer)
}

/// 记录批处理开始
pub fn log_batch_start(total: usize, delay_ms: u64) {
    info!("{}", "=".repeat(60));
    info!("📦 开始处理 {} 份答题卡（逐个提交）", total);
    info!("⏱️ 每份之间间隔 {} 毫秒", delay_ms);
    info!("{}", "=".repeat(60));
}

/// 记录单份答题卡完成后的累计统计
pub fn log_progress(done: usize, total: usize, success: usize, errors: usize) {
    info!(
        "📊 进度 {}/{} | ✅ 成功 {} | ❌ 失败 {}",
        done, total, success, errors
    );
}

/// 打印最终统计信息
pub fn print_final_stats(success: usize, failed: usize, total: usize) {
    info!("\n{}", "=".repeat(60));
    info!("📊 全部处理完成统计");
    info!(
        "完成时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("{}", "=".repeat(60));
    info!("✅ 成功: {}/{}", success, total);
    info!("❌ 失败: {}", failed);
    info!("{}", "=".repeat(60));
}
