use crate::error::FieldValueError;
use crate::model::{Amount, Currency};
use chrono::{Datelike, NaiveDate};

pub(crate) fn parse_currency(raw: &str) -> Result<Currency, FieldValueError> {
    if raw.len() != 3 || !raw.bytes().all(|b| b.is_ascii_uppercase()) {
        return Err(FieldValueError::InvalidCurrency(raw.to_string()));
    }

    let currency = match raw {
        "RUB" => Currency::RUB,
        "USD" => Currency::USD,
        "EUR" => Currency::EUR,
        "CNY" => Currency::CNY,

        // Всё остальное как есть:
        _ => Currency::Other(raw.to_string()),
    };

    Ok(currency)
}

/// Разбирает сумму SWIFT (`15d`): цифры, десятичная запятая, не больше двух знаков после неё
///
/// "123,45" -> 12345, "100," -> 10000, "0,5" -> 50
pub(crate) fn parse_amount(raw: &str) -> Result<Amount, FieldValueError> {
    if raw.is_empty() {
        return Err(FieldValueError::InvalidAmount("empty amount".into()));
    }
    if raw.len() > 15 {
        return Err(FieldValueError::InvalidAmount(format!(
            "amount longer than 15 characters: {raw}"
        )));
    }

    let Some((int_part, dec_part)) = raw.split_once(',') else {
        return Err(FieldValueError::InvalidAmount(format!(
            "missing decimal comma in amount: {raw}"
        )));
    };

    if int_part.is_empty() || !int_part.bytes().all(|b| b.is_ascii_digit()) {
        return Err(FieldValueError::InvalidAmount(format!(
            "invalid integer part: {raw}"
        )));
    }
    if !dec_part.bytes().all(|b| b.is_ascii_digit()) {
        // заодно ловит вторую запятую
        return Err(FieldValueError::InvalidAmount(format!(
            "invalid fractional part: {raw}"
        )));
    }

    let int_part: u64 = int_part.parse()?;

    let dec_part: u64 = match dec_part.len() {
        0 => 0,
        1 => dec_part.parse::<u64>()? * 10,
        2 => dec_part.parse()?,
        _ => {
            return Err(FieldValueError::InvalidAmount(format!(
                "too many fractional digits in amount: {raw}"
            )));
        }
    };

    int_part
        .checked_mul(100)
        .and_then(|minor| minor.checked_add(dec_part))
        .ok_or_else(|| FieldValueError::InvalidAmount(format!("amount overflow: {raw}")))
}

pub(crate) fn parse_yy_mm_dd(s: &str) -> Result<NaiveDate, FieldValueError> {
    if s.len() != 6 || !s.bytes().all(|b| b.is_ascii_digit()) {
        return Err(FieldValueError::BadInput(format!("invalid YYMMDD date: '{s}'")));
    }

    Ok(NaiveDate::parse_from_str(s, "%y%m%d")?)
}

/// Восстанавливает дату проводки из `MMDD` строки :61:
///
/// Год в поле не указан, поэтому берётся тот из соседних годов,
/// при котором дата проводки ближе всего к дате валютирования
/// (проводка 31 декабря при валютировании 2 января относится к прошлому году).
pub(crate) fn derive_booking_date(
    value_date: NaiveDate,
    entry_date: Option<&str>,
) -> Result<NaiveDate, FieldValueError> {
    let Some(ed) = entry_date else {
        // считаем, что дата проводки = value_date
        return Ok(value_date);
    };

    if ed.len() != 4 || !ed.bytes().all(|b| b.is_ascii_digit()) {
        return Err(FieldValueError::BadInput(format!(
            "entry date must be 4 digits MMDD, got '{ed}'"
        )));
    }

    let mm: u32 = ed[0..2].parse()?;
    let dd: u32 = ed[2..4].parse()?;

    let year = value_date.year();
    [year, year - 1, year + 1]
        .into_iter()
        .filter_map(|y| NaiveDate::from_ymd_opt(y, mm, dd))
        .min_by_key(|candidate| (*candidate - value_date).num_days().abs())
        .ok_or_else(|| FieldValueError::BadInput(format!("invalid MMDD entry date: '{ed}'")))
}

#[cfg(test)]
mod tests {
    use super::*;

    // parse_currency

    #[test]
    fn parse_currency_maps_known_codes() {
        assert_eq!(parse_currency("EUR").unwrap(), Currency::EUR);
        assert_eq!(parse_currency("RUB").unwrap(), Currency::RUB);
        assert_eq!(parse_currency("CHF").unwrap(), Currency::Other("CHF".into()));
    }

    #[test]
    fn parse_currency_rejects_malformed_codes() {
        for raw in ["eur", "EU", "EURO", "E1R", ""] {
            assert!(
                matches!(parse_currency(raw), Err(FieldValueError::InvalidCurrency(_))),
                "currency {raw:?} should be rejected"
            );
        }
    }

    // parse_amount

    #[test]
    fn parse_amount_parses_swift_decimals() {
        assert_eq!(parse_amount("123,45").unwrap(), 12_345);
        assert_eq!(parse_amount("100,").unwrap(), 10_000);
        assert_eq!(parse_amount("0,5").unwrap(), 50);
        assert_eq!(parse_amount("0,05").unwrap(), 5);
    }

    #[test]
    fn parse_amount_fails_when_expected() {
        for raw in ["", "100", ",50", "1,2,3", "1,234", "12a,00", "-1,00", "1234567890123456,"] {
            assert!(
                matches!(parse_amount(raw), Err(FieldValueError::InvalidAmount(_))),
                "amount {raw:?} should be rejected"
            );
        }
    }

    // parse_yy_mm_dd

    #[test]
    fn parse_yy_mm_dd_parses_valid_strings() {
        assert_eq!(
            parse_yy_mm_dd("251101").unwrap(),
            NaiveDate::from_ymd_opt(2025, 11, 1).unwrap()
        );
    }

    #[test]
    fn parse_yy_mm_dd_fails_when_expected() {
        assert!(matches!(parse_yy_mm_dd("251301"), Err(FieldValueError::Date(_))));
        assert!(matches!(parse_yy_mm_dd("251150"), Err(FieldValueError::Date(_))));
        assert!(matches!(parse_yy_mm_dd("abdbef"), Err(FieldValueError::BadInput(_))));
        assert!(matches!(parse_yy_mm_dd("1101"), Err(FieldValueError::BadInput(_))));
    }

    // derive_booking_date

    #[test]
    fn derive_booking_date_defaults_to_value_date_when_none() {
        let vd = NaiveDate::from_ymd_opt(2025, 11, 1).unwrap();
        assert_eq!(derive_booking_date(vd, None).unwrap(), vd);
    }

    #[test]
    fn derive_booking_date_uses_year_of_value_date() {
        let vd = NaiveDate::from_ymd_opt(2025, 11, 1).unwrap();
        let bd = derive_booking_date(vd, Some("1102")).unwrap();
        assert_eq!(bd, NaiveDate::from_ymd_opt(2025, 11, 2).unwrap());
    }

    #[test]
    fn derive_booking_date_crosses_year_boundary() {
        let vd = NaiveDate::from_ymd_opt(2025, 1, 2).unwrap();
        let bd = derive_booking_date(vd, Some("1231")).unwrap();
        assert_eq!(bd, NaiveDate::from_ymd_opt(2024, 12, 31).unwrap());

        let vd = NaiveDate::from_ymd_opt(2024, 12, 31).unwrap();
        let bd = derive_booking_date(vd, Some("0102")).unwrap();
        assert_eq!(bd, NaiveDate::from_ymd_opt(2025, 1, 2).unwrap());
    }

    #[test]
    fn derive_booking_date_fails_on_invalid_input() {
        let vd = NaiveDate::from_ymd_opt(2025, 11, 1).unwrap();
        assert!(matches!(derive_booking_date(vd, Some("15")), Err(FieldValueError::BadInput(_))));
        assert!(matches!(derive_booking_date(vd, Some("99aa")), Err(FieldValueError::BadInput(_))));
        assert!(matches!(derive_booking_date(vd, Some("1340")), Err(FieldValueError::BadInput(_))));
    }
}
