use super::expect_tag;
use crate::error::FieldValueError;
use crate::field::GeneralField;
use chrono::{DateTime, FixedOffset};
use lazy_regex::regex_is_match;
use serde::Serialize;

/// :13D: Date/Time Indication, формат `6!n4!n1!x4!n` (YYMMDDHHMM±HHMM)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateTimeIndicator {
    pub date_time: DateTime<FixedOffset>,
}

impl DateTimeIndicator {
    pub const TAG: &'static str = "13D";
}

impl TryFrom<&GeneralField> for DateTimeIndicator {
    type Error = FieldValueError;

    fn try_from(field: &GeneralField) -> Result<Self, Self::Error> {
        expect_tag(field, Self::TAG)?;

        let value = field.content.as_str();
        if !regex_is_match!(r"^\d{10}[+-]\d{4}$", value) {
            return Err(FieldValueError::BadInput(format!(
                "invalid date/time indication: '{value}'"
            )));
        }

        Ok(DateTimeIndicator {
            date_time: DateTime::parse_from_str(value, "%y%m%d%H%M%z")?,
        })
    }
}
