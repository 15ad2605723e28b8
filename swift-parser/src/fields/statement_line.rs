use super::{expect_tag, single_line};
use crate::error::FieldValueError;
use crate::field::GeneralField;
use crate::model::{Amount, DebitCreditMark};
use crate::utils::{derive_booking_date, parse_amount, parse_yy_mm_dd};
use chrono::NaiveDate;
use lazy_regex::regex_captures;
use serde::Serialize;

/// :61: Statement Line - одна проводка
///
/// Формат первой строки: `6!n[4!n]2a[1!a]15d1!a3!c16x[//16x]`,
/// вторая строка (необязательная): `34x` дополнительные сведения.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatementLine {
    /// дата валютирования
    pub value_date: NaiveDate,
    /// дата проводки; если в поле не указана - равна дате валютирования
    pub booking_date: NaiveDate,
    /// признак D/C/RD/RC
    pub mark: DebitCreditMark,
    /// третья буква кода валюты, если банк её указал
    pub funds_code: Option<char>,
    /// сумма (в "копейках")
    pub amount: Amount,
    /// тип операции, напр. "NTRF", "NMSC"
    pub transaction_type: String,
    /// референс для владельца счёта (часть до `//`)
    pub reference_for_account_owner: String,
    /// референс обслуживающего банка (часть после `//`)
    pub reference_of_servicing_institution: Option<String>,
    /// вторая строка поля
    pub supplementary_details: Option<String>,
}

impl StatementLine {
    pub const TAG: &'static str = "61";
}

impl TryFrom<&GeneralField> for StatementLine {
    type Error = FieldValueError;

    fn try_from(field: &GeneralField) -> Result<Self, Self::Error> {
        expect_tag(field, Self::TAG)?;

        let mut lines = field.content.split('\n');
        let first = lines.next().unwrap_or_default();
        let supplementary_details = lines
            .next()
            .map(|l| single_line(l, 34, "supplementary details").map(str::to_string))
            .transpose()?;
        if lines.next().is_some() {
            return Err(FieldValueError::BadInput(
                "statement line has more than 2 lines".into(),
            ));
        }

        let (_, value_date, entry_date, mark, funds_code, amount, transaction_type, references) =
            regex_captures!(
                r"^(\d{6})(\d{4})?(RC|RD|C|D)([A-Z])?([0-9,]+)([A-Z][A-Z0-9]{3})(.*)$",
                first
            )
            .ok_or_else(|| FieldValueError::BadInput(format!("invalid statement line: '{first}'")))?;

        let mark = match mark {
            "D" => DebitCreditMark::Debit,
            "C" => DebitCreditMark::Credit,
            "RD" => DebitCreditMark::ReversalOfDebit,
            "RC" => DebitCreditMark::ReversalOfCredit,
            other => return Err(FieldValueError::InvalidDirection(other.to_string())),
        };

        let value_date = parse_yy_mm_dd(value_date)?;
        let entry_date = (!entry_date.is_empty()).then_some(entry_date);
        let booking_date = derive_booking_date(value_date, entry_date)?;

        let (owner_ref, bank_ref) = match references.split_once("//") {
            Some((owner, bank)) => (owner, Some(single_line(bank, 16, "servicing institution reference")?)),
            None => (references, None),
        };
        let owner_ref = single_line(owner_ref, 16, "account owner reference")?;

        Ok(StatementLine {
            value_date,
            booking_date,
            mark,
            funds_code: funds_code.chars().next(),
            amount: parse_amount(amount)?,
            transaction_type: transaction_type.to_string(),
            reference_for_account_owner: owner_ref.to_string(),
            reference_of_servicing_institution: bank_ref.map(str::to_string),
            supplementary_details,
        })
    }
}
