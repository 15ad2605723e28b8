use crate::envelope::SwiftEnvelope;
use crate::error::{FieldValueError, ParseError};
use crate::field::{GeneralField, SEPARATOR_TAG, parse_fields};
use crate::fields::{
    AccountIdentification, DateTimeIndicator, FloorLimitIndicator, InformationToAccountOwner,
    RelatedReference, StatementLine, StatementNumber, TransactionReferenceNumber,
    TransactionSummary,
};
use serde::Serialize;
use std::io::Read;
use std::str::FromStr;

/// Одна промежуточная выписка MT942
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Mt942Message {
    /// :20: Transaction Reference Number
    pub transaction_reference: TransactionReferenceNumber,

    /// :21: Related Reference
    pub related_reference: Option<RelatedReference>,

    /// :25: Account Identification
    pub account_identification: AccountIdentification,

    /// :28C: Statement Number/Sequence Number
    pub statement_number: StatementNumber,

    /// первый :34F: - порог для дебета и кредита
    pub floor_limit_debit_credit: Option<FloorLimitIndicator>,

    /// второй :34F: - отдельный порог для кредита
    pub floor_limit_credit: Option<FloorLimitIndicator>,

    /// :13D: Date/Time Indication
    pub date_time_indicator: DateTimeIndicator,

    /// проводки (:61: и относящиеся к ним :86:) в порядке появления
    pub transactions: Vec<TransactionGroup>,

    /// :90D: Number and Sum of Debit Entries
    pub summary_debit: Option<TransactionSummary>,

    /// :90C: Number and Sum of Credit Entries
    pub summary_credit: Option<TransactionSummary>,

    /// :86: в конце выписки, относится ко всей выписке
    pub information_to_account_owner: Option<InformationToAccountOwner>,
}

impl Mt942Message {
    /// Порог для дебетовых проводок
    pub fn floor_limit_debit(&self) -> Option<&FloorLimitIndicator> {
        self.floor_limit_debit_credit.as_ref()
    }

    /// Порог для кредитовых проводок: второй :34F:, если он есть, иначе общий
    pub fn floor_limit_credit(&self) -> Option<&FloorLimitIndicator> {
        self.floor_limit_credit
            .as_ref()
            .or(self.floor_limit_debit_credit.as_ref())
    }
}

/// Проводка :61: и, если есть, относящаяся именно к ней :86:
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransactionGroup {
    statement_line: StatementLine,
    information_to_account_owner: Option<InformationToAccountOwner>,
}

impl TransactionGroup {
    pub fn new(
        statement_line: StatementLine,
        information_to_account_owner: Option<InformationToAccountOwner>,
    ) -> Self {
        TransactionGroup {
            statement_line,
            information_to_account_owner,
        }
    }

    pub fn statement_line(&self) -> &StatementLine {
        &self.statement_line
    }

    pub fn information_to_account_owner(&self) -> Option<&InformationToAccountOwner> {
        self.information_to_account_owner.as_ref()
    }

    fn with_information(self, information: InformationToAccountOwner) -> Self {
        TransactionGroup::new(self.statement_line, Some(information))
    }
}

/// Теги, известные грамматике MT942
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FieldTag {
    TransactionReference,
    RelatedReference,
    AccountIdentification,
    StatementNumber,
    FloorLimitIndicator,
    DateTimeIndicator,
    StatementLine,
    DebitSummary,
    CreditSummary,
    InformationToAccountOwner,
    Separator,
}

impl FieldTag {
    fn from_tag(tag: &str) -> Option<Self> {
        let tag = match tag {
            TransactionReferenceNumber::TAG => FieldTag::TransactionReference,
            RelatedReference::TAG => FieldTag::RelatedReference,
            AccountIdentification::TAG => FieldTag::AccountIdentification,
            StatementNumber::TAG => FieldTag::StatementNumber,
            FloorLimitIndicator::TAG => FieldTag::FloorLimitIndicator,
            DateTimeIndicator::TAG => FieldTag::DateTimeIndicator,
            StatementLine::TAG => FieldTag::StatementLine,
            TransactionSummary::TAG_DEBIT => FieldTag::DebitSummary,
            TransactionSummary::TAG_CREDIT => FieldTag::CreditSummary,
            InformationToAccountOwner::TAG => FieldTag::InformationToAccountOwner,
            SEPARATOR_TAG => FieldTag::Separator,
            _ => return None,
        };
        Some(tag)
    }

    fn as_str(self) -> &'static str {
        match self {
            FieldTag::TransactionReference => TransactionReferenceNumber::TAG,
            FieldTag::RelatedReference => RelatedReference::TAG,
            FieldTag::AccountIdentification => AccountIdentification::TAG,
            FieldTag::StatementNumber => StatementNumber::TAG,
            FieldTag::FloorLimitIndicator => FloorLimitIndicator::TAG,
            FieldTag::DateTimeIndicator => DateTimeIndicator::TAG,
            FieldTag::StatementLine => StatementLine::TAG,
            FieldTag::DebitSummary => TransactionSummary::TAG_DEBIT,
            FieldTag::CreditSummary => TransactionSummary::TAG_CREDIT,
            FieldTag::InformationToAccountOwner => InformationToAccountOwner::TAG,
            FieldTag::Separator => SEPARATOR_TAG,
        }
    }
}

/// Множество тегов, допустимых следующим полем
type FieldSet = &'static [FieldTag];

const MESSAGE_START: FieldSet = &[FieldTag::TransactionReference];
const AFTER_TRANSACTION_REFERENCE: FieldSet =
    &[FieldTag::RelatedReference, FieldTag::AccountIdentification];
const AFTER_RELATED_REFERENCE: FieldSet = &[FieldTag::AccountIdentification];
const AFTER_ACCOUNT_IDENTIFICATION: FieldSet = &[FieldTag::StatementNumber];
const AFTER_STATEMENT_NUMBER: FieldSet = &[FieldTag::FloorLimitIndicator];
const AFTER_FIRST_FLOOR_LIMIT: FieldSet =
    &[FieldTag::FloorLimitIndicator, FieldTag::DateTimeIndicator];
const AFTER_SECOND_FLOOR_LIMIT: FieldSet = &[FieldTag::DateTimeIndicator];
const TRANSACTIONS: FieldSet = &[
    FieldTag::StatementLine,
    FieldTag::DebitSummary,
    FieldTag::CreditSummary,
    FieldTag::InformationToAccountOwner,
    FieldTag::Separator,
];
const AFTER_TRANSACTION_INFORMATION: FieldSet = &[
    FieldTag::StatementLine,
    FieldTag::DebitSummary,
    FieldTag::CreditSummary,
    FieldTag::InformationToAccountOwner,
];
const AFTER_DEBIT_SUMMARY: FieldSet = &[
    FieldTag::CreditSummary,
    FieldTag::InformationToAccountOwner,
    FieldTag::Separator,
];
const AFTER_CREDIT_SUMMARY: FieldSet =
    &[FieldTag::InformationToAccountOwner, FieldTag::Separator];
const AFTER_MESSAGE_INFORMATION: FieldSet = &[FieldTag::Separator];

/// Накопитель полей текущей выписки
#[derive(Debug, Default)]
struct Mt942Draft {
    transaction_reference: Option<TransactionReferenceNumber>,
    related_reference: Option<RelatedReference>,
    account_identification: Option<AccountIdentification>,
    statement_number: Option<StatementNumber>,
    floor_limit_debit_credit: Option<FloorLimitIndicator>,
    floor_limit_credit: Option<FloorLimitIndicator>,
    date_time_indicator: Option<DateTimeIndicator>,
    transactions: Vec<TransactionGroup>,
    summary_debit: Option<TransactionSummary>,
    summary_credit: Option<TransactionSummary>,
    information_to_account_owner: Option<InformationToAccountOwner>,
}

impl Mt942Draft {
    /// Собирает выписку; при нехватке обязательного поля возвращает его тег
    fn finish(self) -> Result<Mt942Message, &'static str> {
        Ok(Mt942Message {
            transaction_reference: self
                .transaction_reference
                .ok_or(TransactionReferenceNumber::TAG)?,
            related_reference: self.related_reference,
            account_identification: self
                .account_identification
                .ok_or(AccountIdentification::TAG)?,
            statement_number: self.statement_number.ok_or(StatementNumber::TAG)?,
            floor_limit_debit_credit: self.floor_limit_debit_credit,
            floor_limit_credit: self.floor_limit_credit,
            date_time_indicator: self.date_time_indicator.ok_or(DateTimeIndicator::TAG)?,
            transactions: self.transactions,
            summary_debit: self.summary_debit,
            summary_credit: self.summary_credit,
            information_to_account_owner: self.information_to_account_owner,
        })
    }
}

/// Конечный автомат, собирающий выписки из последовательности полей
struct Mt942Builder {
    valid_fields: FieldSet,
    previous: Option<FieldTag>,
    draft: Mt942Draft,
    messages: Vec<Mt942Message>,
}

impl Mt942Builder {
    fn new() -> Self {
        Mt942Builder {
            valid_fields: MESSAGE_START,
            previous: None,
            draft: Mt942Draft::default(),
            messages: Vec::new(),
        }
    }

    fn push(&mut self, field: &GeneralField, is_last: bool) -> Result<(), ParseError> {
        tracing::trace!(ordinal = field.ordinal, tag = %field.tag, "mt942 field");

        let tag = FieldTag::from_tag(&field.tag).ok_or_else(|| ParseError::UnexpectedField {
            ordinal: field.ordinal,
            tag: field.tag.clone(),
        })?;

        if !self.valid_fields.contains(&tag) {
            let message = match self.previous {
                None => format!("field :{}: is not allowed as first field", field.tag),
                Some(previous) => format!(
                    "field :{}: is not allowed after field :{}:",
                    field.tag,
                    previous.as_str()
                ),
            };
            return Err(ParseError::FieldSequence {
                ordinal: field.ordinal,
                tag: field.tag.clone(),
                message,
            });
        }

        let next = self
            .apply(tag, field)
            .map_err(|source| ParseError::FieldValue {
                ordinal: field.ordinal,
                tag: field.tag.clone(),
                source,
            })?;

        if is_last || tag == FieldTag::Separator {
            self.finish_message(field)?;
        }

        self.previous = Some(tag);
        self.valid_fields = next;
        Ok(())
    }

    /// Применяет поле к накопителю и возвращает множество допустимых следующих тегов
    fn apply(&mut self, tag: FieldTag, field: &GeneralField) -> Result<FieldSet, FieldValueError> {
        let draft = &mut self.draft;

        let next = match tag {
            FieldTag::TransactionReference => {
                draft.transaction_reference = Some(field.try_into()?);
                AFTER_TRANSACTION_REFERENCE
            }
            FieldTag::RelatedReference => {
                draft.related_reference = Some(field.try_into()?);
                AFTER_RELATED_REFERENCE
            }
            FieldTag::AccountIdentification => {
                draft.account_identification = Some(field.try_into()?);
                AFTER_ACCOUNT_IDENTIFICATION
            }
            FieldTag::StatementNumber => {
                draft.statement_number = Some(field.try_into()?);
                AFTER_STATEMENT_NUMBER
            }
            FieldTag::FloorLimitIndicator => {
                let floor_limit = FloorLimitIndicator::try_from(field)?;
                if draft.floor_limit_debit_credit.is_none() {
                    draft.floor_limit_debit_credit = Some(floor_limit);
                    AFTER_FIRST_FLOOR_LIMIT
                } else {
                    draft.floor_limit_credit = Some(floor_limit);
                    AFTER_SECOND_FLOOR_LIMIT
                }
            }
            FieldTag::DateTimeIndicator => {
                draft.date_time_indicator = Some(field.try_into()?);
                TRANSACTIONS
            }
            FieldTag::StatementLine => {
                let statement_line = StatementLine::try_from(field)?;
                draft.transactions.push(TransactionGroup::new(statement_line, None));
                TRANSACTIONS
            }
            FieldTag::DebitSummary => {
                draft.summary_debit = Some(field.try_into()?);
                AFTER_DEBIT_SUMMARY
            }
            FieldTag::CreditSummary => {
                draft.summary_credit = Some(field.try_into()?);
                AFTER_CREDIT_SUMMARY
            }
            FieldTag::InformationToAccountOwner => {
                let information = InformationToAccountOwner::try_from(field)?;
                if self.previous == Some(FieldTag::StatementLine) {
                    // :86: сразу после :61: относится к этой проводке
                    if let Some(group) = draft.transactions.pop() {
                        draft.transactions.push(group.with_information(information));
                    }
                    AFTER_TRANSACTION_INFORMATION
                } else {
                    draft.information_to_account_owner = Some(information);
                    AFTER_MESSAGE_INFORMATION
                }
            }
            // выписка закрывается в push
            FieldTag::Separator => MESSAGE_START,
        };

        Ok(next)
    }

    fn finish_message(&mut self, field: &GeneralField) -> Result<(), ParseError> {
        let draft = std::mem::take(&mut self.draft);
        let message = draft.finish().map_err(|missing| ParseError::FieldSequence {
            ordinal: field.ordinal,
            tag: field.tag.clone(),
            message: format!("message is incomplete, missing mandatory field :{missing}:"),
        })?;

        tracing::debug!(
            reference = %message.transaction_reference.reference,
            transactions = message.transactions.len(),
            "mt942 message finished"
        );
        self.messages.push(message);
        Ok(())
    }
}

/// Собирает выписки MT942 из последовательности полей блока 4
///
/// Выписка закрывается на разделителе или на последнем поле.
/// Любая ошибка прерывает разбор целиком: уже собранные выписки не возвращаются.
pub fn parse_messages(fields: &[GeneralField]) -> Result<Vec<Mt942Message>, ParseError> {
    let mut builder = Mt942Builder::new();

    for (idx, field) in fields.iter().enumerate() {
        builder.push(field, idx + 1 == fields.len())?;
    }

    Ok(builder.messages)
}

/// Структура с выписками из одного SWIFT-сообщения MT942.
///
/// Для парсинга используйте [`Mt942Data::parse`].
///
/// Пример:
/// ```rust
/// use std::io::Cursor;
/// use swift_parser::Mt942Data;
/// # use swift_parser::ParseError;
/// # fn main() -> Result<(), ParseError> {
/// let reader = Cursor::new(
///     "{1:F01BANKDEFFAXXX0000000000}{2:O942BANKDEFFXXXXN}{4:\n\
///      :20:REF123\n\
///      :25:DE11112222333344445555\n\
///      :28C:1/1\n\
///      :34F:EUR0,\n\
///      :13D:1605191047+0100\n\
///      -}",
/// );
/// let data = Mt942Data::parse(reader)?;
/// assert_eq!(data.messages.len(), 1);
/// #     Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Mt942Data {
    /// Выписки в порядке появления в блоке 4
    pub messages: Vec<Mt942Message>,
}

impl Mt942Data {
    /// Парсит при помощи переданного reader полное сообщение (с конвертом) в [`Mt942Data`]
    ///
    /// При ошибке возвращает [`ParseError`]
    pub fn parse<R: Read>(mut reader: R) -> Result<Self, ParseError> {
        let mut text = String::new();
        reader.read_to_string(&mut text)?;
        Self::from_swift_text(&text)
    }

    /// Разбирает полное сообщение `{1:...}...{4:...-}...`
    pub fn from_swift_text(text: &str) -> Result<Self, ParseError> {
        let envelope = SwiftEnvelope::parse(text)?;
        let block = envelope.text_block().ok_or(ParseError::MissingTextBlock)?;

        let fields = parse_fields(&block.content, block.line)?;
        let messages = parse_messages(&fields)?;

        Ok(Mt942Data { messages })
    }

    /// Разбирает содержимое блока 4 без конверта
    pub fn from_text_block(content: &str) -> Result<Self, ParseError> {
        let fields = parse_fields(content, 1)?;
        let messages = parse_messages(&fields)?;

        Ok(Mt942Data { messages })
    }
}

impl FromStr for Mt942Data {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_swift_text(s)
    }
}
