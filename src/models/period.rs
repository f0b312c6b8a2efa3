use phf::phf_map;

/// 评估周期代码 → 显示名称
static PERIOD_LABELS: phf::Map<&'static str, &'static str> = phf_map! {
    "1" => "1º Bimestre",
    "2" => "2º Bimestre",
    "3" => "3º Bimestre",
    "4" => "4º Bimestre",
    "diagnostica" => "Avaliação Diagnóstica",
    "recuperacao" => "Recuperação",
    "final" => "Avaliação Final",
};

/// 未知代码原样返回
pub fn period_label(code: &str) -> &str {
    PERIOD_LABELS.get(code).copied().unwrap_or(code)
}

pub fn is_known_period(code: &str) -> bool {
    PERIOD_LABELS.contains_key(code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_codes() {
        assert_eq!(period_label("1"), "1º Bimestre");
        assert_eq!(period_label("4"), "4º Bimestre");
        assert_eq!(period_label("diagnostica"), "Avaliação Diagnóstica");
        assert_eq!(period_label("recuperacao"), "Recuperação");
        assert_eq!(period_label("final"), "Avaliação Final");
    }

    #[test]
    fn test_unknown_code_passes_through() {
        assert_eq!(period_label("5"), "5");
        assert_eq!(period_label("Final"), "Final");
        assert!(!is_known_period("semestral"));
    }
}
