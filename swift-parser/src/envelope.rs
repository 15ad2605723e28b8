use crate::error::{EnvelopeErrorKind, ParseError};
use std::collections::BTreeMap;
use std::iter::Peekable;
use std::str::Chars;

/// Номер текстового блока (тело сообщения с полями)
pub const TEXT_BLOCK: u8 = 4;

/// Один блок конверта `{N:...}`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    /// номер блока, 1..=5
    pub number: u8,
    /// содержимое между `N:` и терминатором, как есть
    pub content: String,
    /// строка (с 1), на которой открывается блок
    pub line: usize,
}

/// Конверт SWIFT-сообщения: блоки по номерам
///
/// Разбор только структурный. Наличие обязательных блоков, кроме блока 4,
/// и содержимое заголовков здесь не проверяются.
///
/// ```rust
/// use swift_parser::SwiftEnvelope;
/// # use swift_parser::ParseError;
/// # fn main() -> Result<(), ParseError> {
/// let envelope = SwiftEnvelope::parse("{1:F01BANK}{2:I942BANK}{4:\n:20:REF\n-}")?;
/// assert_eq!(envelope.block(1).map(|b| b.content.as_str()), Some("F01BANK"));
/// assert_eq!(envelope.text_block().map(|b| b.content.as_str()), Some("\n:20:REF\n"));
/// #     Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SwiftEnvelope {
    blocks: BTreeMap<u8, Block>,
}

impl SwiftEnvelope {
    /// Разбивает текст сообщения на блоки
    ///
    /// Пробелы, табуляции и переводы строк между блоками игнорируются.
    /// При ошибке возвращает [`ParseError::Envelope`] с номером строки.
    pub fn parse(text: &str) -> Result<Self, ParseError> {
        let mut scanner = Scanner::new(text);
        let mut blocks: BTreeMap<u8, Block> = BTreeMap::new();

        loop {
            scanner.skip_whitespace();

            let line = scanner.line;
            let Some(c) = scanner.next() else {
                break;
            };
            if c != '{' {
                return Err(ParseError::envelope(line, EnvelopeErrorKind::ExpectedBlockStart(c)));
            }

            let digits = scanner.take_digits();
            if digits.is_empty() || scanner.next() != Some(':') {
                return Err(ParseError::envelope(line, EnvelopeErrorKind::MalformedBlockHeader));
            }

            // номер блока - ровно одна цифра 1..5, "04" не равно "4"
            let number = match digits.parse::<u8>() {
                Ok(n @ 1..=5) if !digits.starts_with('0') => n,
                _ => return Err(ParseError::envelope(line, EnvelopeErrorKind::UnknownBlock(digits))),
            };
            if blocks.contains_key(&number) {
                return Err(ParseError::envelope(line, EnvelopeErrorKind::DuplicateBlock(number)));
            }

            let content = if number == TEXT_BLOCK {
                scanner.take_text_block()
            } else {
                scanner.take_header_block()
            }
            .ok_or_else(|| ParseError::envelope(line, EnvelopeErrorKind::UnterminatedBlock(number)))?;

            tracing::trace!(block = number, line, len = content.len(), "envelope block");
            blocks.insert(number, Block { number, content, line });
        }

        tracing::debug!(blocks = blocks.len(), "envelope parsed");
        Ok(SwiftEnvelope { blocks })
    }

    /// Блок по номеру
    pub fn block(&self, number: u8) -> Option<&Block> {
        self.blocks.get(&number)
    }

    /// Блок 4
    pub fn text_block(&self) -> Option<&Block> {
        self.block(TEXT_BLOCK)
    }

    /// Все блоки в порядке номеров
    pub fn blocks(&self) -> impl Iterator<Item = &Block> {
        self.blocks.values()
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }
}

/// Посимвольный проход по тексту с подсчётом строк
struct Scanner<'a> {
    chars: Peekable<Chars<'a>>,
    line: usize,
}

impl<'a> Scanner<'a> {
    fn new(text: &'a str) -> Self {
        Scanner {
            chars: text.chars().peekable(),
            line: 1,
        }
    }

    fn next(&mut self) -> Option<char> {
        let c = self.chars.next()?;
        if c == '\n' {
            self.line += 1;
        }
        Some(c)
    }

    fn skip_whitespace(&mut self) {
        while self
            .chars
            .peek()
            .is_some_and(|c| matches!(c, ' ' | '\t' | '\r' | '\n'))
        {
            self.next();
        }
    }

    fn take_digits(&mut self) -> String {
        let mut digits = String::new();
        while let Some(d) = self.chars.next_if(char::is_ascii_digit) {
            digits.push(d);
        }
        digits
    }

    /// Блок 4: всё до `-}`, включая переводы строк и одиночные `}`
    fn take_text_block(&mut self) -> Option<String> {
        let mut content = String::new();
        loop {
            let c = self.next()?;
            if c == '-' && self.chars.next_if_eq(&'}').is_some() {
                return Some(content);
            }
            content.push(c);
        }
    }

    /// Блоки заголовков: всё до `}`, закрывающей блок
    ///
    /// Вложенные группы `{тег:...}` (например `{3:{108:MT942}}`) входят в содержимое.
    /// Одиночная `{` без тега группу не открывает: `{2:a{b}` - блок с содержимым `a{b`.
    fn take_header_block(&mut self) -> Option<String> {
        let mut content = String::new();
        let mut depth = 0usize;
        loop {
            let c = self.next()?;
            match c {
                '{' if self.at_group_tag() => depth += 1,
                '}' if depth == 0 => return Some(content),
                '}' => depth -= 1,
                _ => {}
            }
            content.push(c);
        }
    }

    /// Стоит ли сканер на теге вложенной группы: `108:`, `CHK:`
    fn at_group_tag(&self) -> bool {
        let mut ahead = self.chars.clone();
        let mut len = 0;
        while ahead.next_if(char::is_ascii_alphanumeric).is_some() {
            len += 1;
        }
        len > 0 && ahead.next() == Some(':')
    }
}
