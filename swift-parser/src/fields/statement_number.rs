use super::expect_tag;
use crate::error::FieldValueError;
use crate::field::GeneralField;
use lazy_regex::regex_captures;
use serde::Serialize;

/// :28C: Statement Number/Sequence Number, формат `5n[/5n]`, напр. "49/2" или "00001"
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StatementNumber {
    pub statement_number: u32,
    pub sequence_number: Option<u32>,
}

impl StatementNumber {
    pub const TAG: &'static str = "28C";
}

impl TryFrom<&GeneralField> for StatementNumber {
    type Error = FieldValueError;

    fn try_from(field: &GeneralField) -> Result<Self, Self::Error> {
        expect_tag(field, Self::TAG)?;

        let (_, statement, sequence) = regex_captures!(r"^(\d{1,5})(?:/(\d{1,5}))?$", &field.content)
            .ok_or_else(|| {
                FieldValueError::BadInput(format!("invalid statement number: '{}'", field.content))
            })?;

        let sequence_number = if sequence.is_empty() {
            None
        } else {
            Some(sequence.parse()?)
        };

        Ok(StatementNumber {
            statement_number: statement.parse()?,
            sequence_number,
        })
    }
}
