//! 视图层：状态 → 显示数据的纯函数
//!
//! 文件列表的一行和结果卡片都只由 (文件, 状态) 决定，不保存任何显示状态

use crate::models::{period_label, AnswerMark, PendingFile, NOT_AVAILABLE};
use crate::utils::format_file_size;
use crate::workflow::FileState;
use std::fmt;

/// 占位卡片的 bloco 数和每个 bloco 的题数
pub const PLACEHOLDER_BLOCKS: usize = 2;
pub const PLACEHOLDER_QUESTIONS: usize = 12;

const EMPTY_VALUE: &str = "-";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusTag {
    Waiting,
    Processing,
    Success,
    Error,
}

impl StatusTag {
    fn of(state: &FileState) -> Self {
        match state {
            FileState::Waiting => StatusTag::Waiting,
            FileState::Processing => StatusTag::Processing,
            FileState::Processed(_) => StatusTag::Success,
            FileState::Failed(_) => StatusTag::Error,
        }
    }

    pub fn text(self) -> &'static str {
        match self {
            StatusTag::Waiting => "Aguardando processamento",
            StatusTag::Processing => "Processando...",
            StatusTag::Success => "Processado com sucesso",
            StatusTag::Error => "Erro no processamento",
        }
    }
}

/// 文件列表中的一行
#[derive(Debug, Clone, PartialEq)]
pub struct FileRowView {
    pub index: usize,
    pub name: String,
    pub size_label: String,
    pub status: StatusTag,
    pub status_text: &'static str,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CardField {
    pub label: &'static str,
    pub value: String,
}

/// 一道题；占位卡片的 `glyph` 为 `None`
#[derive(Debug, Clone, PartialEq)]
pub struct AnswerCell {
    pub number: usize,
    pub glyph: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AnswerBlockView {
    pub title: String,
    pub cells: Vec<AnswerCell>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ActionView {
    pub label: &'static str,
    pub enabled: bool,
}

/// 结果卡片
#[derive(Debug, Clone, PartialEq)]
pub struct ResultCardView {
    pub index: usize,
    pub title: String,
    pub status: StatusTag,
    pub subtitle: &'static str,
    /// 失败时的错误信息
    pub error: Option<String>,
    pub fields: Vec<CardField>,
    pub blocks: Vec<AnswerBlockView>,
    pub import_action: ActionView,
    pub preview_action: ActionView,
}

impl ResultCardView {
    pub fn field(&self, label: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|f| f.label == label)
            .map(|f| f.value.as_str())
    }
}

pub fn render_row(index: usize, file: &PendingFile, state: &FileState) -> FileRowView {
    let status = StatusTag::of(state);
    FileRowView {
        index,
        name: file.name.clone(),
        size_label: format_file_size(file.size),
        status,
        status_text: status.text(),
    }
}

pub fn render_card(index: usize, file: &PendingFile, state: &FileState) -> ResultCardView {
    let status = StatusTag::of(state);

    let (values, blocks) = match state {
        FileState::Processed(sheet) => {
            let periodo = sheet
                .periodo
                .as_deref()
                .map(period_label)
                .unwrap_or(NOT_AVAILABLE);
            let values = [
                sheet.lote_or_na().to_string(),
                sheet.matricula_or_na().to_string(),
                sheet.ano_or_na().to_string(),
                periodo.to_string(),
            ];
            let blocks = sheet
                .respostas
                .iter()
                .enumerate()
                .map(|(i, answers)| AnswerBlockView {
                    title: format!("Bloco {}", i + 1),
                    cells: answers
                        .iter()
                        .enumerate()
                        .map(|(j, raw)| AnswerCell {
                            number: j + 1,
                            glyph: Some(AnswerMark::parse(raw).glyph()),
                        })
                        .collect(),
                })
                .collect();
            (values, blocks)
        }
        FileState::Waiting | FileState::Processing | FileState::Failed(_) => {
            (std::array::from_fn(|_| EMPTY_VALUE.to_string()), placeholder_blocks())
        }
    };

    let [lote, matricula, ano, periodo] = values;
    let fields = vec![
        CardField { label: "LOTE/CADERNO", value: lote },
        CardField { label: "MATRÍCULA", value: matricula },
        CardField { label: "ANO", value: ano },
        CardField { label: "PERÍODO", value: periodo },
    ];

    let import_action = match status {
        StatusTag::Success => ActionView {
            label: "Importar para Lança Resultado",
            enabled: true,
        },
        other => ActionView {
            label: other.text(),
            enabled: false,
        },
    };

    ResultCardView {
        index,
        title: file.name.clone(),
        status,
        subtitle: status.text(),
        error: match state {
            FileState::Failed(error) => Some(error.clone()),
            _ => None,
        },
        fields,
        blocks,
        import_action,
        preview_action: ActionView {
            label: "Ver PDF",
            enabled: true,
        },
    }
}

fn placeholder_blocks() -> Vec<AnswerBlockView> {
    (0..PLACEHOLDER_BLOCKS)
        .map(|i| AnswerBlockView {
            title: format!("Bloco {}", i + 1),
            cells: (0..PLACEHOLDER_QUESTIONS)
                .map(|j| AnswerCell {
                    number: j + 1,
                    glyph: None,
                })
                .collect(),
        })
        .collect()
}

impl fmt::Display for FileRowView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:>3}. {} ({}) - {}",
            self.index + 1,
            self.name,
            self.size_label,
            self.status_text
        )
    }
}

impl fmt::Display for ResultCardView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "📄 {} | {}", self.title, self.subtitle)?;
        if let Some(error) = &self.error {
            writeln!(f, "   ⚠️ {}", error)?;
        }
        let fields: Vec<String> = self
            .fields
            .iter()
            .map(|field| format!("{}: {}", field.label, field.value))
            .collect();
        writeln!(f, "   {}", fields.join(" | "))?;
        for block in &self.blocks {
            let cells: Vec<String> = block
                .cells
                .iter()
                .map(|c| format!("{}{}", c.number, c.glyph.as_deref().unwrap_or("·")))
                .collect();
            writeln!(f, "   {}: {}", block.title, cells.join(" "))?;
        }
        write!(
            f,
            "   [{}{}] [{}]",
            self.import_action.label,
            if self.import_action.enabled { "" } else { " (desabilitado)" },
            self.preview_action.label
        )
    }
}
