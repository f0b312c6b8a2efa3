//! 阅卷 / 导入 API 客户端
//!
//! 封装与后端的三个接口：
//! - 阅卷：上传单个 PDF（multipart），返回识别结果
//! - 单条导入：把一个结果写入成绩录入系统
//! - 批量导入：把所有成功的结果一次写入

use crate::config::Config;
use crate::error::{AppError, AppResult};
use crate::models::grading::non_blank;
use crate::models::{GradingConfig, GradingResponse, ImportResponse, PendingFile, ProcessedSheet, PDF_MIME};
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::StatusCode;
use serde_json::{json, Value};
use tracing::debug;

/// 外部阅卷系统的能力
///
/// 只返回 2xx 响应体；响应体里是否带 `error` 由调用方判断
#[async_trait]
pub trait GradingApi: Send + Sync {
    /// 提交一份答题卡
    async fn submit_sheet(
        &self,
        file: &PendingFile,
        config: &GradingConfig,
    ) -> AppResult<GradingResponse>;

    /// 导入单个结果
    async fn import_result(
        &self,
        sheet: &ProcessedSheet,
        config: &GradingConfig,
    ) -> AppResult<ImportResponse>;

    /// 批量导入
    async fn import_results(
        &self,
        sheets: &[ProcessedSheet],
        config: &GradingConfig,
    ) -> AppResult<ImportResponse>;
}

/// 基于 reqwest 的实现
pub struct HttpGradingClient {
    http: reqwest::Client,
    config: Config,
}

impl HttpGradingClient {
    pub fn new(config: &Config) -> AppResult<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.request_timeout() {
            builder = builder.timeout(timeout);
        }
        let http = builder.build()?;

        Ok(Self {
            http,
            config: config.clone(),
        })
    }

    async fn post_json<T: serde::de::DeserializeOwned>(&self, path: &str, payload: &Value) -> AppResult<T> {
        let url = self.config.endpoint(path);
        debug!("POST {} ({} 字节)", url, payload.to_string().len());

        let response = self
            .http
            .post(&url)
            .json(payload)
            .send()
            .await
            .map_err(|e| AppError::api_request_failed(path, e))?;

        read_body(path, response).await
    }
}

#[async_trait]
impl GradingApi for HttpGradingClient {
    async fn submit_sheet(
        &self,
        file: &PendingFile,
        config: &GradingConfig,
    ) -> AppResult<GradingResponse> {
        let path = self.config.grading_path.as_str();
        let url = self.config.endpoint(path);

        let part = Part::bytes(file.bytes().to_vec())
            .file_name(file.name.clone())
            .mime_str(PDF_MIME)?;

        let form = Form::new()
            .part("files", part)
            .text("num_quadrilateros", config.num_quadrilateros.to_string())
            .text("num_questoes", config.num_questoes.to_string())
            .text("num_alternativas", config.num_alternativas.to_string());

        debug!("上传 {} ({} 字节) -> {}", file.name, file.size, url);

        let response = self
            .http
            .post(&url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| AppError::api_request_failed(path, e))?;

        read_body(path, response).await
    }

    async fn import_result(
        &self,
        sheet: &ProcessedSheet,
        config: &GradingConfig,
    ) -> AppResult<ImportResponse> {
        let payload = json!({
            "resultado": sheet_payload(sheet)?,
            "config": config,
        });
        self.post_json(&self.config.import_path, &payload).await
    }

    async fn import_results(
        &self,
        sheets: &[ProcessedSheet],
        config: &GradingConfig,
    ) -> AppResult<ImportResponse> {
        let resultados = sheets
            .iter()
            .map(sheet_payload)
            .collect::<AppResult<Vec<_>>>()?;

        let payload = json!({
            "resultados": resultados,
            "config": config,
        });
        self.post_json(&self.config.import_all_path, &payload).await
    }
}

/// 导入时提交的单个结果，带上 `success: true`
pub fn sheet_payload(sheet: &ProcessedSheet) -> AppResult<Value> {
    let mut value = serde_json::to_value(sheet)?;
    if let Some(obj) = value.as_object_mut() {
        obj.insert("success".to_string(), Value::Bool(true));
    }
    Ok(value)
}

/// 从响应体里取出错误信息（`error` 或 `erro`），空白的不算
pub fn error_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    ["error", "erro"]
        .iter()
        .find_map(|key| non_blank(value.get(*key).and_then(|v| v.as_str())))
        .map(|s| s.to_string())
}

async fn read_body<T: serde::de::DeserializeOwned>(
    path: &str,
    response: reqwest::Response,
) -> AppResult<T> {
    let status: StatusCode = response.status();
    let body = response
        .text()
        .await
        .map_err(|e| AppError::api_request_failed(path, e))?;

    if !status.is_success() {
        return Err(AppError::bad_response(
            path,
            Some(status.as_u16()),
            error_message(&body),
        ));
    }

    Ok(serde_json::from_str(&body)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// 起一个只应答一次的 HTTP 服务，返回地址
    async fn serve_once(status_line: &'static str, body: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = Vec::new();
            let mut chunk = [0u8; 4096];
            // 读完请求头和请求体再应答
            loop {
                let n = socket.read(&mut chunk).await.unwrap();
                if n == 0 {
                    break;
                }
                buf.extend_from_slice(&chunk[..n]);
                if let Some(header_end) = find(&buf, b"\r\n\r\n") {
                    let headers = String::from_utf8_lossy(&buf[..header_end]).to_lowercase();
                    let content_length = headers
                        .lines()
                        .find_map(|l| l.strip_prefix("content-length:"))
                        .and_then(|v| v.trim().parse::<usize>().ok())
                        .unwrap_or(0);
                    if buf.len() >= header_end + 4 + content_length {
                        break;
                    }
                }
            }
            let response = format!(
                "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status_line,
                body.len(),
                body
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.ok();
        });

        format!("http://{}", addr)
    }

    fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
        haystack.windows(needle.len()).position(|w| w == needle)
    }

    fn client_for(base_url: String) -> HttpGradingClient {
        let config = Config {
            base_url,
            ..Config::default()
        };
        HttpGradingClient::new(&config).unwrap()
    }

    #[test]
    fn test_error_message_reads_both_keys() {
        assert_eq!(error_message(r#"{"error":"PDF inválido"}"#).as_deref(), Some("PDF inválido"));
        assert_eq!(error_message(r#"{"erro":"Caderno não encontrado"}"#).as_deref(), Some("Caderno não encontrado"));
        assert_eq!(error_message(r#"{"ok":true}"#), None);
        assert_eq!(error_message("<html>500</html>"), None);
        assert_eq!(error_message(r#"{"error":""}"#), None);
        assert_eq!(error_message(r#"{"error":" ","erro":"Lote inválido"}"#).as_deref(), Some("Lote inválido"));
    }

    #[test]
    fn test_sheet_payload_marks_success() {
        let sheet = ProcessedSheet::from_response("a.pdf", GradingResponse::default());
        let payload = sheet_payload(&sheet).unwrap();
        assert_eq!(payload["success"], true);
        assert_eq!(payload["filename"], "a.pdf");
    }

    #[tokio::test]
    async fn test_submit_sheet_parses_success_body() {
        let base = serve_once(
            "200 OK",
            r#"{"lote":"434","registration":"226035","answers":[["C","D"]]}"#,
        )
        .await;
        let client = client_for(base);

        let file = PendingFile::new("a.pdf", b"%PDF-1.4".to_vec());
        let response = client
            .submit_sheet(&file, &GradingConfig::default())
            .await
            .unwrap();

        assert_eq!(response.lote.as_deref(), Some("434"));
        assert_eq!(response.matricula.as_deref(), Some("226035"));
        assert_eq!(response.respostas, Some(vec![vec!["C".to_string(), "D".to_string()]]));
    }

    #[tokio::test]
    async fn test_submit_sheet_non_2xx_carries_server_message() {
        let base = serve_once("500 Internal Server Error", r#"{"error":"Erro interno do servidor"}"#).await;
        let client = client_for(base);

        let file = PendingFile::new("b.pdf", b"%PDF-1.4".to_vec());
        let err = client
            .submit_sheet(&file, &GradingConfig::default())
            .await
            .unwrap_err();

        assert_eq!(err.server_message(), Some("Erro interno do servidor"));
        assert!(matches!(
            err,
            AppError::Api(crate::error::ApiError::BadResponse { status: Some(500), .. })
        ));
    }

    #[tokio::test]
    async fn test_submit_sheet_blank_server_message_is_dropped() {
        let base = serve_once("400 Bad Request", r#"{"error":""}"#).await;
        let client = client_for(base);

        let file = PendingFile::new("a.pdf", b"%PDF-1.4".to_vec());
        let err = client
            .submit_sheet(&file, &GradingConfig::default())
            .await
            .unwrap_err();

        assert_eq!(err.server_message(), None);
    }

    #[tokio::test]
    async fn test_import_result_returns_body() {
        let base = serve_once("200 OK", r#"{"sucesso":true,"aluno_nome":"Ana","total_acertos":9}"#).await;
        let client = client_for(base);

        let sheet = ProcessedSheet::from_response("a.pdf", GradingResponse::default());
        let response = client
            .import_result(&sheet, &GradingConfig::default())
            .await
            .unwrap();

        assert!(response.is_success());
        assert_eq!(response.aluno_nome.as_deref(), Some("Ana"));
        assert_eq!(response.total_acertos, Some(9));
    }

    #[tokio::test]
    async fn test_unreachable_server_is_request_failure() {
        // 端口 9 (discard) 在测试环境里通常没有监听
        let client = client_for("http://127.0.0.1:9".to_string());
        let file = PendingFile::new("a.pdf", b"%PDF".to_vec());
        let err = client
            .submit_sheet(&file, &GradingConfig::default())
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            AppError::Api(crate::error::ApiError::RequestFailed { .. })
        ));
    }
}
