use anyhow::{bail, Result};
use gabarito_submit::models::load_paths;
use gabarito_submit::models::period::is_known_period;
use gabarito_submit::utils::logging;
use gabarito_submit::{Config, CorrectionSession, HttpGradingClient};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    // 加载配置
    let config = Config::load()?;

    // 初始化日志，同时写入运行日志文件
    logging::init(&config.output_log_file)?;

    let mut import_all = false;
    let mut paths = Vec::new();
    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--import-all" => import_all = true,
            _ => paths.push(PathBuf::from(arg)),
        }
    }
    if paths.is_empty() {
        bail!("用法: gabarito_submit [--import-all] <PDF 文件或文件夹>...");
    }

    if !is_known_period(&config.periodo_avaliacao) {
        warn!("⚠️ 未知的评估周期代码: {}", config.periodo_avaliacao);
    }

    let files = load_paths(&paths).await?;
    info!("📂 读取到 {} 个文件", files.len());

    let client = HttpGradingClient::new(&config)?;
    let mut session = CorrectionSession::new(Arc::new(client), &config);

    // Ctrl-C 在两个文件之间停止
    let cancel = session.cancel_handle();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("⏹️ 收到中断信号，当前文件完成后停止");
            cancel.cancel();
        }
    });

    session.drop_files(files);
    let summary = session.process_batch(&config.grading_config()).await;

    for card in session.cards() {
        info!("\n{}", card);
    }

    if import_all && !summary.cancelled {
        session.import_all(&config.grading_config()).await;
    }

    Ok(())
}
