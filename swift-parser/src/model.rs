use serde::{Serialize, Serializer};
use std::fmt;

/// Денежная сумма в минимальных единицах валюты ("копейках"), unsigned
///
/// SWIFT-поля хранят сумму без знака, направление задаётся отдельным признаком.
pub type Amount = u64;

/// Валюта по коду ISO 4217
///
/// Принадлежность кода реестру ISO не проверяется:
/// любой корректный по форме код, кроме перечисленных, попадает в [`Currency::Other`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Currency {
    /// Российский рубль
    RUB,
    /// Евро
    EUR,
    /// Американский доллар
    USD,
    /// Китайский юань
    CNY,

    /// Любая другая валюта
    ///
    /// Содержится как строка из трёх заглавных латинских букв
    Other(String),
}

impl Currency {
    /// Трёхбуквенный код валюты
    pub fn code(&self) -> &str {
        match self {
            Currency::RUB => "RUB",
            Currency::EUR => "EUR",
            Currency::USD => "USD",
            Currency::CNY => "CNY",
            Currency::Other(code) => code,
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.code())
    }
}

impl Serialize for Currency {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.code())
    }
}

/// Направление (Дебет/Кредит)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Direction {
    /// Дебет
    Debit,
    /// Кредит
    Credit,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Credit => write!(f, "Credit"),
            Direction::Debit => write!(f, "Debit"),
        }
    }
}

/// Признак дебет/кредит в строке выписки :61:, включая сторно
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DebitCreditMark {
    /// `D`
    Debit,
    /// `C`
    Credit,
    /// `RD` - сторно дебета
    ReversalOfDebit,
    /// `RC` - сторно кредита
    ReversalOfCredit,
}

impl DebitCreditMark {
    /// Фактическое направление движения средств
    ///
    /// Сторно дебета зачисляет деньги обратно, сторно кредита списывает.
    pub fn direction(self) -> Direction {
        match self {
            DebitCreditMark::Debit | DebitCreditMark::ReversalOfCredit => Direction::Debit,
            DebitCreditMark::Credit | DebitCreditMark::ReversalOfDebit => Direction::Credit,
        }
    }

    pub fn is_reversal(self) -> bool {
        matches!(
            self,
            DebitCreditMark::ReversalOfDebit | DebitCreditMark::ReversalOfCredit
        )
    }

    /// Обозначение признака как в тексте сообщения
    pub fn code(self) -> &'static str {
        match self {
            DebitCreditMark::Debit => "D",
            DebitCreditMark::Credit => "C",
            DebitCreditMark::ReversalOfDebit => "RD",
            DebitCreditMark::ReversalOfCredit => "RC",
        }
    }
}

impl fmt::Display for DebitCreditMark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reversal_marks_flip_direction() {
        assert_eq!(DebitCreditMark::Debit.direction(), Direction::Debit);
        assert_eq!(DebitCreditMark::Credit.direction(), Direction::Credit);
        assert_eq!(DebitCreditMark::ReversalOfDebit.direction(), Direction::Credit);
        assert_eq!(DebitCreditMark::ReversalOfCredit.direction(), Direction::Debit);

        assert!(DebitCreditMark::ReversalOfDebit.is_reversal());
        assert!(!DebitCreditMark::Credit.is_reversal());
    }

    #[test]
    fn currency_code_roundtrips_through_display() {
        assert_eq!(Currency::EUR.to_string(), "EUR");
        assert_eq!(Currency::Other("CHF".into()).to_string(), "CHF");
    }
}
