use crate::models::GradingResponse;
use serde::Serialize;

/// 缺失字段的占位文字
pub const NOT_AVAILABLE: &str = "N/A";

/// 处理成功的答题卡
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProcessedSheet {
    pub filename: String,
    pub lote: Option<String>,
    pub matricula: Option<String>,
    pub ano: Option<String>,
    pub periodo: Option<String>,
    /// 每个 bloco 一组答案，按题号排列
    pub respostas: Vec<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub info: Option<String>,
}

impl ProcessedSheet {
    pub fn from_response(filename: impl Into<String>, response: GradingResponse) -> Self {
        Self {
            filename: filename.into(),
            lote: response.lote,
            matricula: response.matricula,
            ano: response.ano,
            periodo: response.periodo,
            respostas: response.respostas.unwrap_or_default(),
            info: response.info,
        }
    }

    pub fn lote_or_na(&self) -> &str {
        self.lote.as_deref().unwrap_or(NOT_AVAILABLE)
    }

    pub fn matricula_or_na(&self) -> &str {
        self.matricula.as_deref().unwrap_or(NOT_AVAILABLE)
    }

    pub fn ano_or_na(&self) -> &str {
        self.ano.as_deref().unwrap_or(NOT_AVAILABLE)
    }
}

/// 处理失败的答题卡
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FailedSheet {
    pub filename: String,
    pub error: String,
}

/// 单个文件的处理结果，创建后不再修改
#[derive(Debug, Clone, PartialEq)]
pub enum ProcessingResult {
    Success(ProcessedSheet),
    Failure(FailedSheet),
}

impl ProcessingResult {
    pub fn filename(&self) -> &str {
        match self {
            ProcessingResult::Success(sheet) => &sheet.filename,
            ProcessingResult::Failure(failed) => &failed.filename,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, ProcessingResult::Success(_))
    }

    pub fn as_success(&self) -> Option<&ProcessedSheet> {
        match self {
            ProcessingResult::Success(sheet) => Some(sheet),
            ProcessingResult::Failure(_) => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            ProcessingResult::Success(_) => None,
            ProcessingResult::Failure(failed) => Some(&failed.error),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fields_fall_back_to_placeholder() {
        let sheet = ProcessedSheet::from_response(
            "a.pdf",
            GradingResponse {
                lote: Some("434".into()),
                ..Default::default()
            },
        );

        assert_eq!(sheet.lote_or_na(), "434");
        assert_eq!(sheet.matricula_or_na(), NOT_AVAILABLE);
        assert_eq!(sheet.ano_or_na(), NOT_AVAILABLE);
        assert!(sheet.respostas.is_empty());
    }

    #[test]
    fn test_sheet_serializes_without_empty_info() {
        let sheet = ProcessedSheet::from_response("a.pdf", GradingResponse::default());
        let value = serde_json::to_value(&sheet).unwrap();
        assert_eq!(value["filename"], "a.pdf");
        assert!(value.get("info").is_none());
        assert!(value["lote"].is_null());
    }
}
