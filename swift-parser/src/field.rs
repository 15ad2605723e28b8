use crate::error::ParseError;
use once_cell::sync::Lazy;
use regex::Regex;

/// Зарезервированный тег разделителя между повторяющимися сообщениями внутри блока 4
pub const SEPARATOR_TAG: &str = "-";

static TAG_LINE_RE: Lazy<Regex> = Lazy::new(|| {
    // :20:, :28C:, :90D: - 2 цифры и необязательная заглавная буква
    Regex::new(r"^:(\d{2}[A-Z]?):(.*)$").unwrap()
});

/// Поле блока 4: тег и сырое значение
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneralField {
    /// тег без двоеточий, напр. "28C", или [`SEPARATOR_TAG`]
    pub tag: String,
    /// значение как есть; строки продолжения склеены через '\n'
    pub content: String,
    /// порядковый номер поля в последовательности (с 1)
    pub ordinal: usize,
    /// строка (с 1), на которой поле начинается
    pub line: usize,
}

impl GeneralField {
    pub fn is_separator(&self) -> bool {
        self.tag == SEPARATOR_TAG
    }
}

/// Разбивает содержимое блока 4 на поля
///
/// `first_line` - номер строки, с которой начинается содержимое,
/// чтобы ошибки указывали на строку всего сообщения.
pub fn parse_fields(content: &str, first_line: usize) -> Result<Vec<GeneralField>, ParseError> {
    let mut fields: Vec<GeneralField> = Vec::new();

    for (idx, raw_line) in content.split('\n').enumerate() {
        let line_number = first_line + idx;
        let line = raw_line.trim_end_matches('\r');

        if line.trim().is_empty() {
            continue;
        }

        let ordinal = fields.len() + 1;

        if line.trim() == SEPARATOR_TAG {
            fields.push(GeneralField {
                tag: SEPARATOR_TAG.to_string(),
                content: String::new(),
                ordinal,
                line: line_number,
            });
            continue;
        }

        // перед тегом допустим отступ; строка с отступом, не похожая на тег, - продолжение
        let trimmed = line.trim_start();
        let is_indented = trimmed.len() != line.len();
        let tag_line = if is_indented {
            TAG_LINE_RE.captures(trimmed)
        } else if line.starts_with(':') {
            Some(TAG_LINE_RE.captures(line).ok_or_else(|| ParseError::FieldSyntax {
                line: line_number,
                message: format!("bad field tag line: '{line}'"),
            })?)
        } else {
            None
        };

        if let Some(caps) = tag_line {
            fields.push(GeneralField {
                tag: caps[1].to_string(),
                content: caps[2].to_string(),
                ordinal,
                line: line_number,
            });
            continue;
        }

        // строка без тега - продолжение значения текущего поля
        match fields.last_mut() {
            Some(field) if !field.is_separator() => {
                field.content.push('\n');
                field.content.push_str(line);
            }
            _ => {
                return Err(ParseError::FieldSyntax {
                    line: line_number,
                    message: format!("text outside of a field: '{line}'"),
                });
            }
        }
    }

    tracing::trace!(fields = fields.len(), "text block split into fields");
    Ok(fields)
}
