use serde::{Deserialize, Serialize};

/// 阅卷参数（来自表单）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradingConfig {
    pub num_quadrilateros: u32,
    pub num_questoes: u32,
    pub num_alternativas: u32,
    pub ano_avaliacao: String,
    pub periodo_avaliacao: String,
}

impl Default for GradingConfig {
    fn default() -> Self {
        Self {
            num_quadrilateros: 4,
            num_questoes: 11,
            num_alternativas: 4,
            ano_avaliacao: String::new(),
            periodo_avaliacao: String::new(),
        }
    }
}

/// 阅卷接口的响应
///
/// 兼容两种字段名：`matricula`/`respostas` 和后端实际返回的 `registration`/`answers`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GradingResponse {
    #[serde(default, deserialize_with = "deserialize_scalar")]
    pub lote: Option<String>,
    #[serde(default, alias = "registration", deserialize_with = "deserialize_scalar")]
    pub matricula: Option<String>,
    #[serde(default, deserialize_with = "deserialize_scalar")]
    pub ano: Option<String>,
    #[serde(default, deserialize_with = "deserialize_scalar")]
    pub periodo: Option<String>,
    #[serde(default, alias = "answers")]
    pub respostas: Option<Vec<Vec<String>>>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub erro: Option<String>,
    #[serde(default)]
    pub info: Option<String>,
}

impl GradingResponse {
    /// 带 `error` 或 `erro` 键就算失败，内容为空也一样
    pub fn has_error(&self) -> bool {
        self.error.is_some() || self.erro.is_some()
    }

    /// 第一个非空的错误信息，`error` 优先
    pub fn error_message(&self) -> Option<&str> {
        first_non_blank(&self.error, &self.erro)
    }
}

/// 导入接口的响应
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ImportResponse {
    #[serde(default)]
    pub sucesso: Option<bool>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub erro: Option<String>,
    #[serde(default)]
    pub aluno_nome: Option<String>,
    #[serde(default)]
    pub total_questoes: Option<u32>,
    #[serde(default)]
    pub total_acertos: Option<u32>,
    #[serde(default)]
    pub percentual_acertos: Option<f64>,
}

impl ImportResponse {
    pub fn is_success(&self) -> bool {
        self.error.is_none() && self.erro.is_none() && self.sucesso != Some(false)
    }

    /// 拒绝原因：`error` / `erro`，其次 `message`
    pub fn rejection_message(&self) -> Option<&str> {
        first_non_blank(&self.error, &self.erro).or_else(|| non_blank(self.message.as_deref()))
    }
}

/// 空白字符串视为没有
pub fn non_blank(text: Option<&str>) -> Option<&str> {
    text.filter(|s| !s.trim().is_empty())
}

fn first_non_blank<'a>(first: &'a Option<String>, second: &'a Option<String>) -> Option<&'a str> {
    non_blank(first.as_deref()).or_else(|| non_blank(second.as_deref()))
}

// 字符串或数字都接受，统一转成字符串；null 视为缺失
fn deserialize_scalar<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::Visitor;
    use std::fmt;

    struct ScalarVisitor;

    impl<'de> Visitor<'de> for ScalarVisitor {
        type Value = Option<String>;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a string, a number or null")
        }

        fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            let trimmed = value.trim();
            Ok((!trimmed.is_empty()).then(|| trimmed.to_string()))
        }

        fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(Some(value.to_string()))
        }

        fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(Some(value.to_string()))
        }

        fn visit_f64<E>(self, value: f64) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(Some(value.to_string()))
        }

        fn visit_none<E>(self) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(None)
        }

        fn visit_unit<E>(self) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(None)
        }
    }

    deserializer.deserialize_any(ScalarVisitor)
}
