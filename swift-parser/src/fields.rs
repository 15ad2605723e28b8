//! Типизированные значения полей блока 4.
//!
//! Каждый тип разбирает своё поле через `TryFrom<&GeneralField>`
//! и отказывается от поля с чужим тегом.

mod account_identification;
mod date_time_indicator;
mod floor_limit_indicator;
mod information;
mod reference;
mod statement_line;
mod statement_number;
mod transaction_summary;

pub use account_identification::AccountIdentification;
pub use date_time_indicator::DateTimeIndicator;
pub use floor_limit_indicator::FloorLimitIndicator;
pub use information::InformationToAccountOwner;
pub use reference::{RelatedReference, TransactionReferenceNumber};
pub use statement_line::StatementLine;
pub use statement_number::StatementNumber;
pub use transaction_summary::TransactionSummary;

use crate::error::FieldValueError;
use crate::field::GeneralField;

pub(crate) fn expect_tag(field: &GeneralField, expected: &'static str) -> Result<(), FieldValueError> {
    if field.tag == expected {
        Ok(())
    } else {
        Err(FieldValueError::TagMismatch {
            expected,
            found: field.tag.clone(),
        })
    }
}

/// Проверка формата `Nx`: одна непустая строка не длиннее `max_len` символов
pub(crate) fn single_line<'a>(
    value: &'a str,
    max_len: usize,
    what: &str,
) -> Result<&'a str, FieldValueError> {
    if value.is_empty() {
        return Err(FieldValueError::BadInput(format!("empty {what}")));
    }
    if value.contains('\n') {
        return Err(FieldValueError::BadInput(format!("{what} must be a single line")));
    }
    let len = value.chars().count();
    if len > max_len {
        return Err(FieldValueError::BadInput(format!(
            "{what} longer than {max_len} characters ({len}): '{value}'"
        )));
    }
    Ok(value)
}

#[cfg(test)]
pub(crate) fn field(tag: &str, content: &str) -> GeneralField {
    GeneralField {
        tag: tag.to_string(),
        content: content.to_string(),
        ordinal: 1,
        line: 1,
    }
}
