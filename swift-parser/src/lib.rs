pub mod envelope;
pub mod error;
pub mod field;
pub mod fields;
pub mod model;
pub mod mt942;

mod utils;

pub use crate::envelope::{Block, SwiftEnvelope};
pub use crate::error::{EnvelopeErrorKind, FieldValueError, ParseError};
pub use crate::field::{GeneralField, parse_fields};
pub use crate::model::{Amount, Currency, DebitCreditMark, Direction};
pub use crate::mt942::{Mt942Data, Mt942Message, TransactionGroup, parse_messages};
