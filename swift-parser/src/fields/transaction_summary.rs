use crate::error::FieldValueError;
use crate::field::GeneralField;
use crate::model::{Amount, Currency, Direction};
use crate::utils::{parse_amount, parse_currency};
use lazy_regex::regex_captures;
use serde::Serialize;

/// :90D: / :90C: Number and Sum of Entries, формат `5n3!a15d`
///
/// Направление берётся из тега: 90D - дебетовые проводки, 90C - кредитовые.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransactionSummary {
    pub direction: Direction,
    pub number_of_entries: u32,
    pub currency: Currency,
    pub amount: Amount,
}

impl TransactionSummary {
    pub const TAG_DEBIT: &'static str = "90D";
    pub const TAG_CREDIT: &'static str = "90C";
}

impl TryFrom<&GeneralField> for TransactionSummary {
    type Error = FieldValueError;

    fn try_from(field: &GeneralField) -> Result<Self, Self::Error> {
        let direction = match field.tag.as_str() {
            Self::TAG_DEBIT => Direction::Debit,
            Self::TAG_CREDIT => Direction::Credit,
            other => {
                return Err(FieldValueError::TagMismatch {
                    expected: "90D/90C",
                    found: other.to_string(),
                });
            }
        };

        let (_, count, currency, amount) =
            regex_captures!(r"^(\d{1,5})([A-Z]{3})([0-9,]+)$", &field.content).ok_or_else(|| {
                FieldValueError::BadInput(format!("invalid transaction summary: '{}'", field.content))
            })?;

        Ok(TransactionSummary {
            direction,
            number_of_entries: count.parse()?,
            currency: parse_currency(currency)?,
            amount: parse_amount(amount)?,
        })
    }
}
