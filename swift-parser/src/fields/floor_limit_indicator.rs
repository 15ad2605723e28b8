use super::expect_tag;
use crate::error::FieldValueError;
use crate::field::GeneralField;
use crate::model::{Amount, Currency, Direction};
use crate::utils::{parse_amount, parse_currency};
use lazy_regex::regex_captures;
use serde::Serialize;

/// :34F: Floor Limit Indicator, формат `3!a[1!a]15d`
///
/// Проводки на сумму ниже порога не попадают в выписку по отдельности.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FloorLimitIndicator {
    pub currency: Currency,
    /// `D` или `C`, если порог задан только для одного направления
    pub direction: Option<Direction>,
    pub amount: Amount,
}

impl FloorLimitIndicator {
    pub const TAG: &'static str = "34F";
}

impl TryFrom<&GeneralField> for FloorLimitIndicator {
    type Error = FieldValueError;

    fn try_from(field: &GeneralField) -> Result<Self, Self::Error> {
        expect_tag(field, Self::TAG)?;

        let (_, currency, mark, amount) =
            regex_captures!(r"^([A-Z]{3})([DC])?([0-9,]+)$", &field.content).ok_or_else(|| {
                FieldValueError::BadInput(format!("invalid floor limit indicator: '{}'", field.content))
            })?;

        let direction = match mark {
            "" => None,
            "D" => Some(Direction::Debit),
            _ => Some(Direction::Credit),
        };

        Ok(FloorLimitIndicator {
            currency: parse_currency(currency)?,
            direction,
            amount: parse_amount(amount)?,
        })
    }
}
