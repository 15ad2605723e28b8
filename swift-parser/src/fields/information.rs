use super::expect_tag;
use crate::error::FieldValueError;
use crate::field::GeneralField;
use serde::Serialize;

const MAX_LINES: usize = 6;
const MAX_LINE_LEN: usize = 65;

/// :86: Information to Account Owner, формат `6*65x`
///
/// Относится либо к предшествующей строке :61:, либо ко всей выписке.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InformationToAccountOwner {
    /// Строки текста без служебного префикса ":86:"
    pub lines: Vec<String>,
}

impl InformationToAccountOwner {
    pub const TAG: &'static str = "86";

    /// Текст одной строкой, строки через пробел
    pub fn text(&self) -> String {
        self.lines.join(" ")
    }
}

impl TryFrom<&GeneralField> for InformationToAccountOwner {
    type Error = FieldValueError;

    fn try_from(field: &GeneralField) -> Result<Self, Self::Error> {
        expect_tag(field, Self::TAG)?;

        if field.content.is_empty() {
            return Err(FieldValueError::BadInput("empty information to account owner".into()));
        }

        let lines: Vec<String> = field.content.split('\n').map(str::to_string).collect();
        if lines.len() > MAX_LINES {
            return Err(FieldValueError::BadInput(format!(
                "information to account owner has {} lines, at most {MAX_LINES} allowed",
                lines.len()
            )));
        }
        if let Some(long) = lines.iter().find(|l| l.chars().count() > MAX_LINE_LEN) {
            return Err(FieldValueError::BadInput(format!(
                "information line longer than {MAX_LINE_LEN} characters: '{long}'"
            )));
        }

        Ok(InformationToAccountOwner { lines })
    }
}
