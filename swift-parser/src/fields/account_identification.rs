use super::{expect_tag, single_line};
use crate::error::FieldValueError;
use crate::field::GeneralField;
use serde::Serialize;

/// :25: Account Identification, формат `35x` (номер счёта/IBAN как есть)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccountIdentification {
    pub account: String,
}

impl AccountIdentification {
    pub const TAG: &'static str = "25";
}

impl TryFrom<&GeneralField> for AccountIdentification {
    type Error = FieldValueError;

    fn try_from(field: &GeneralField) -> Result<Self, Self::Error> {
        expect_tag(field, Self::TAG)?;
        let account = single_line(&field.content, 35, "account identification")?;
        Ok(AccountIdentification {
            account: account.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields::field;

    #[test]
    fn account_identification_keeps_value_as_is() {
        let value = AccountIdentification::try_from(&field("25", "BANKDEFF/DE11112222333344445555")).unwrap();
        assert_eq!(value.account, "BANKDEFF/DE11112222333344445555");
    }

    #[test]
    fn account_identification_rejects_empty_and_long_values() {
        assert!(AccountIdentification::try_from(&field("25", "")).is_err());
        assert!(AccountIdentification::try_from(&field("25", &"1".repeat(36))).is_err());
    }
}
