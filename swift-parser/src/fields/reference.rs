use super::{expect_tag, single_line};
use crate::error::FieldValueError;
use crate::field::GeneralField;
use serde::Serialize;

/// :20: Transaction Reference Number, формат `16x`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransactionReferenceNumber {
    pub reference: String,
}

impl TransactionReferenceNumber {
    pub const TAG: &'static str = "20";
}

impl TryFrom<&GeneralField> for TransactionReferenceNumber {
    type Error = FieldValueError;

    fn try_from(field: &GeneralField) -> Result<Self, Self::Error> {
        expect_tag(field, Self::TAG)?;
        Ok(TransactionReferenceNumber {
            reference: parse_reference(&field.content)?,
        })
    }
}

/// :21: Related Reference, формат `16x`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RelatedReference {
    pub reference: String,
}

impl RelatedReference {
    pub const TAG: &'static str = "21";
}

impl TryFrom<&GeneralField> for RelatedReference {
    type Error = FieldValueError;

    fn try_from(field: &GeneralField) -> Result<Self, Self::Error> {
        expect_tag(field, Self::TAG)?;
        Ok(RelatedReference {
            reference: parse_reference(&field.content)?,
        })
    }
}

/// Референс не начинается и не заканчивается на '/' и не содержит "//"
fn parse_reference(value: &str) -> Result<String, FieldValueError> {
    let value = single_line(value, 16, "reference")?;

    if value.starts_with('/') || value.ends_with('/') || value.contains("//") {
        return Err(FieldValueError::BadInput(format!(
            "reference must not start or end with '/' or contain '//': '{value}'"
        )));
    }

    Ok(value.to_string())
}
