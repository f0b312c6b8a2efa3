use crate::error::{AppError, AppResult, ConfigError, FileError};
use crate::models::GradingConfig;
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

/// 默认配置文件名，可用 `CORRECAO_CONFIG` 覆盖
pub const DEFAULT_CONFIG_FILE: &str = "correcao.toml";

/// 程序配置文件
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 后端地址
    pub base_url: String,
    /// 阅卷接口路径
    pub grading_path: String,
    /// 单条导入接口路径
    pub import_path: String,
    /// 批量导入接口路径
    pub import_all_path: String,
    /// 两个文件之间的等待时间（毫秒）
    pub inter_file_delay_ms: u64,
    /// 本地预览临时文件的保留时间（毫秒）
    pub preview_release_delay_ms: u64,
    /// 通知自动关闭时间（毫秒）
    pub toast_duration_ms: u64,
    /// 统计数字动画时长（毫秒）
    pub counter_animation_ms: u64,
    /// 请求超时（秒），0 表示不设超时
    pub request_timeout_secs: u64,
    /// 是否显示详细日志
    pub verbose_logging: bool,
    /// 输出日志文件
    pub output_log_file: String,
    /// 处理失败的文件清单
    pub failure_log_file: String,
    // --- 阅卷参数 ---
    pub num_quadrilateros: u32,
    pub num_questoes: u32,
    pub num_alternativas: u32,
    pub ano_avaliacao: String,
    pub periodo_avaliacao: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5000".to_string(),
            grading_path: "/api/correcao-automatica/processar".to_string(),
            import_path: "/api/correcao-automatica/importar-resultado".to_string(),
            import_all_path: "/api/correcao-automatica/importar-resultado".to_string(),
            inter_file_delay_ms: 500,
            preview_release_delay_ms: 2000,
            toast_duration_ms: 5000,
            counter_animation_ms: 1000,
            request_timeout_secs: 0,
            verbose_logging: false,
            output_log_file: "output.txt".to_string(),
            failure_log_file: "falhas.txt".to_string(),
            num_quadrilateros: 4,
            num_questoes: 11,
            num_alternativas: 4,
            ano_avaliacao: chrono::Local::now().format("%Y").to_string(),
            periodo_avaliacao: "1".to_string(),
        }
    }
}

impl Config {
    /// 先读配置文件（可选），再用环境变量覆盖
    pub fn load() -> AppResult<Self> {
        let path = std::env::var("CORRECAO_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_FILE.to_string());
        let base = if Path::new(&path).exists() {
            Self::from_toml_file(&path)?
        } else {
            Self::default()
        };
        let config = base.with_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// 后端地址必须是 http(s)
    pub fn validate(&self) -> AppResult<()> {
        if self.base_url.starts_with("http://") || self.base_url.starts_with("https://") {
            Ok(())
        } else {
            Err(ConfigError::InvalidUrl {
                url: self.base_url.clone(),
            }
            .into())
        }
    }

    /// 从 TOML 文件读取，缺失的字段使用默认值
    pub fn from_toml_file(path: impl AsRef<Path>) -> AppResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| AppError::file_read_failed(path.display().to_string(), e))?;
        toml::from_str(&content).map_err(|e| {
            AppError::File(FileError::TomlParseFailed {
                path: path.display().to_string(),
                source: Box::new(e),
            })
        })
    }

    pub fn from_env() -> Self {
        Self::default().with_env_overrides()
    }

    fn with_env_overrides(self) -> Self {
        let default = self;
        Self {
            base_url: std::env::var("BASE_URL").unwrap_or(default.base_url),
            grading_path: std::env::var("GRADING_PATH").unwrap_or(default.grading_path),
            import_path: std::env::var("IMPORT_PATH").unwrap_or(default.import_path),
            import_all_path: std::env::var("IMPORT_ALL_PATH").unwrap_or(default.import_all_path),
            inter_file_delay_ms: std::env::var("INTER_FILE_DELAY_MS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.inter_file_delay_ms),
            preview_release_delay_ms: std::env::var("PREVIEW_RELEASE_DELAY_MS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.preview_release_delay_ms),
            toast_duration_ms: std::env::var("TOAST_DURATION_MS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.toast_duration_ms),
            counter_animation_ms: std::env::var("COUNTER_ANIMATION_MS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.counter_animation_ms),
            request_timeout_secs: std::env::var("REQUEST_TIMEOUT_SECS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.request_timeout_secs),
            verbose_logging: std::env::var("VERBOSE_LOGGING").ok().and_then(|v| v.parse().ok()).unwrap_or(default.verbose_logging),
            output_log_file: std::env::var("OUTPUT_LOG_FILE").unwrap_or(default.output_log_file),
            failure_log_file: std::env::var("FAILURE_LOG_FILE").unwrap_or(default.failure_log_file),
            num_quadrilateros: std::env::var("NUM_QUADRILATEROS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.num_quadrilateros),
            num_questoes: std::env::var("NUM_QUESTOES").ok().and_then(|v| v.parse().ok()).unwrap_or(default.num_questoes),
            num_alternativas: std::env::var("NUM_ALTERNATIVAS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.num_alternativas),
            ano_avaliacao: std::env::var("ANO_AVALIACAO").unwrap_or(default.ano_avaliacao),
            periodo_avaliacao: std::env::var("PERIODO_AVALIACAO").unwrap_or(default.periodo_avaliacao),
        }
    }

    /// 表单里的阅卷参数
    pub fn grading_config(&self) -> GradingConfig {
        GradingConfig {
            num_quadrilateros: self.num_quadrilateros,
            num_questoes: self.num_questoes,
            num_alternativas: self.num_alternativas,
            ano_avaliacao: self.ano_avaliacao.clone(),
            periodo_avaliacao: self.periodo_avaliacao.clone(),
        }
    }

    /// 拼接完整地址
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), path.trim_start_matches('/'))
    }

    pub fn inter_file_delay(&self) -> Duration {
        Duration::from_millis(self.inter_file_delay_ms)
    }

    pub fn preview_release_delay(&self) -> Duration {
        Duration::from_millis(self.preview_release_delay_ms)
    }

    pub fn toast_duration(&self) -> Duration {
        Duration::from_millis(self.toast_duration_ms)
    }

    pub fn counter_animation(&self) -> Duration {
        Duration::from_millis(self.counter_animation_ms)
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        (self.request_timeout_secs > 0).then(|| Duration::from_secs(self.request_timeout_secs))
    }
}
