use std::{io::Error as IoError, num::ParseIntError};
use thiserror::Error;

/// Ошибки разбора значения отдельного поля (фабрики полей в [`crate::fields`])
#[derive(Debug, Error)]
pub enum FieldValueError {
    // обёртки

    /// обёртка chrono::ParseError
    #[error("date parse error: {0}")]
    Date(#[from] chrono::ParseError),
    /// обёртка std::num::ParseIntError
    #[error("number parse error: {0}")]
    Int(#[from] ParseIntError),

    // логические ошибки

    /// ошибка при парсинге кода валюты
    #[error("invalid currency: {0}")]
    InvalidCurrency(String),
    /// ошибка при парсинге денежной суммы
    #[error("invalid amount: {0}")]
    InvalidAmount(String),
    /// ошибка при парсинге признака дебет/кредит
    #[error("invalid debit/credit mark: {0}")]
    InvalidDirection(String),
    /// фабрике передано поле с чужим тегом
    #[error("unexpected tag :{found}:, expected :{expected}:")]
    TagMismatch {
        expected: &'static str,
        found: String,
    },
    /// общая ошибка формата значения
    #[error("bad input: {0}")]
    BadInput(String),
}

/// Нарушения структуры конверта `{1:...}{2:...}...{5:...}`
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EnvelopeErrorKind {
    /// вместо `{` встретился другой символ
    #[error("expected '{{' at start of block, found '{0}'")]
    ExpectedBlockStart(char),
    /// после `{` нет номера блока и двоеточия
    #[error("malformed block header, expected '{{<number>:'")]
    MalformedBlockHeader,
    /// номер блока вне 1..=5
    #[error("unknown block {0}")]
    UnknownBlock(String),
    /// блок с таким номером уже был
    #[error("block {0} appears more than once")]
    DuplicateBlock(u8),
    /// вход кончился раньше терминатора блока
    #[error("block {0} is not terminated")]
    UnterminatedBlock(u8),
}

/// Ошибки разбора SWIFT-сообщения
///
/// Каждая ошибка несёт своё положение: номер строки для ошибок конверта и синтаксиса полей,
/// порядковый номер поля и тег для ошибок последовательности и значений полей.
#[derive(Debug, Error)]
pub enum ParseError {
    /// обёртка std::io::Error
    #[error("io error: {0}")]
    Io(#[from] IoError),

    /// ошибка структуры конверта
    #[error("line {line}: {kind}")]
    Envelope { line: usize, kind: EnvelopeErrorKind },

    /// в сообщении нет блока 4
    #[error("message has no text block {{4:...-}}")]
    MissingTextBlock,

    /// ошибка разбиения блока 4 на поля
    #[error("line {line}: {message}")]
    FieldSyntax { line: usize, message: String },

    /// поле не допускается грамматикой в текущем состоянии
    #[error("field {ordinal} :{tag}: {message}")]
    FieldSequence {
        ordinal: usize,
        tag: String,
        message: String,
    },

    /// тег, неизвестный грамматике сообщения
    #[error("field {ordinal}: unexpected field :{tag}:")]
    UnexpectedField { ordinal: usize, tag: String },

    /// тег допустим, но значение поля не разобралось
    #[error("field {ordinal} :{tag}: subfield parse error: {source}")]
    FieldValue {
        ordinal: usize,
        tag: String,
        source: FieldValueError,
    },
}

impl ParseError {
    /// Номер строки (с 1), если ошибка привязана к строке
    pub fn line_number(&self) -> Option<usize> {
        match self {
            ParseError::Envelope { line, .. } | ParseError::FieldSyntax { line, .. } => Some(*line),
            _ => None,
        }
    }

    /// Порядковый номер поля (с 1), если ошибка привязана к полю
    pub fn field_number(&self) -> Option<usize> {
        match self {
            ParseError::FieldSequence { ordinal, .. }
            | ParseError::UnexpectedField { ordinal, .. }
            | ParseError::FieldValue { ordinal, .. } => Some(*ordinal),
            _ => None,
        }
    }

    /// Тег поля, на котором произошла ошибка
    pub fn field_tag(&self) -> Option<&str> {
        match self {
            ParseError::FieldSequence { tag, .. }
            | ParseError::UnexpectedField { tag, .. }
            | ParseError::FieldValue { tag, .. } => Some(tag),
            _ => None,
        }
    }

    pub(crate) fn envelope(line: usize, kind: EnvelopeErrorKind) -> Self {
        ParseError::Envelope { line, kind }
    }
}
