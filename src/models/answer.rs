/// 识别出的单题作答
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnswerMark {
    /// A 到 E
    Letter(char),
    /// 未作答
    Blank,
    /// 多选（算错）
    Multiple(String),
    /// 无法识别
    Invalid(String),
}

impl AnswerMark {
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("blank") {
            return AnswerMark::Blank;
        }
        if let Some(rest) = trimmed.strip_prefix("Multiple:") {
            return AnswerMark::Multiple(rest.trim().to_string());
        }

        let mut chars = trimmed.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) if ('A'..='E').contains(&c.to_ascii_uppercase()) => {
                AnswerMark::Letter(c.to_ascii_uppercase())
            }
            _ => AnswerMark::Invalid(trimmed.to_string()),
        }
    }

    /// 卡片上显示的字符
    pub fn glyph(&self) -> String {
        match self {
            AnswerMark::Letter(c) => c.to_string(),
            AnswerMark::Blank => "-".to_string(),
            AnswerMark::Multiple(_) => "X".to_string(),
            AnswerMark::Invalid(_) => "?".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_codes() {
        assert_eq!(AnswerMark::parse("C"), AnswerMark::Letter('C'));
        assert_eq!(AnswerMark::parse("e"), AnswerMark::Letter('E'));
        assert_eq!(AnswerMark::parse("Blank"), AnswerMark::Blank);
        assert_eq!(AnswerMark::parse(""), AnswerMark::Blank);
        assert_eq!(
            AnswerMark::parse("Multiple:A,C"),
            AnswerMark::Multiple("A,C".to_string())
        );
        assert_eq!(AnswerMark::parse("F"), AnswerMark::Invalid("F".to_string()));
        assert_eq!(AnswerMark::parse("AB"), AnswerMark::Invalid("AB".to_string()));
    }

    #[test]
    fn test_glyphs() {
        assert_eq!(AnswerMark::parse("b").glyph(), "B");
        assert_eq!(AnswerMark::Blank.glyph(), "-");
        assert_eq!(AnswerMark::parse("Multiple:B,D").glyph(), "X");
        assert_eq!(AnswerMark::parse("??").glyph(), "?");
    }
}
