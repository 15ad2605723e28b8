use swift_parser::{EnvelopeErrorKind, Mt942Data, ParseError, SwiftEnvelope};

fn envelope_error(text: &str) -> (usize, EnvelopeErrorKind) {
    match Mt942Data::from_swift_text(text).unwrap_err() {
        ParseError::Envelope { line, kind } => (line, kind),
        other => panic!("expected Envelope error, got {other:?}"),
    }
}

#[test]
fn whitespace_between_blocks_is_ignored() {
    let envelope = SwiftEnvelope::parse("{1:} {2:}\t{3:}\n{4:x\nx x   x   -} {5:}").unwrap();

    let text = envelope.text_block().expect("block 4 present");
    assert_eq!(text.content, "x\nx x   x   ");

    let numbers: Vec<u8> = envelope.blocks().map(|b| b.number).collect();
    assert_eq!(numbers, vec![1, 2, 3, 4, 5]);
}

#[test]
fn block4_without_termination_fails_at_its_line() {
    let (line, kind) = envelope_error("{1:}\n{2:}\n{3:}\n{4:}\n{5:}");
    assert_eq!(line, 4);
    assert_eq!(kind, EnvelopeErrorKind::UnterminatedBlock(4));
}

#[test]
fn missing_first_bracket_fails_at_line_1() {
    let (line, _) = envelope_error("1:}\n{2:}\n{3:}\n{4:-}\n{5:}");
    assert_eq!(line, 1);
}

#[test]
fn colon_before_block_number_fails_at_line_1() {
    let (line, kind) = envelope_error("{:1:}\n{2:}\n{3:}\n{4:-}\n{5:}");
    assert_eq!(line, 1);
    assert_eq!(kind, EnvelopeErrorKind::MalformedBlockHeader);
}

#[test]
fn repeated_block_fails_at_second_occurrence() {
    let (line, kind) = envelope_error("{1:}\n{2:}\n{3:}\n{4:-}\n{5:}\n{1:}");
    assert_eq!(line, 6);
    assert_eq!(kind, EnvelopeErrorKind::DuplicateBlock(1));
}

#[test]
fn unknown_block_fails_at_its_line() {
    let (line, kind) = envelope_error("{1:}\n{2:}\n{3:}\n{4:-}\n{5:}\n{6:}");
    assert_eq!(line, 6);
    assert_eq!(kind, EnvelopeErrorKind::UnknownBlock("6".into()));
}

#[test]
fn unbalanced_brackets_fail_at_end_of_input() {
    let err = Mt942Data::from_swift_text("{1:}\n{2:}\n{3:}\n{4:-}\n{5:").unwrap_err();

    assert_eq!(err.line_number(), Some(5));
    assert_eq!(err.field_number(), None);
}

#[test]
fn empty_text_block_yields_no_messages() {
    let data = Mt942Data::from_swift_text("{1:}\n{2:}\n{3:}\n{4:-}\n{5:}").unwrap();
    assert!(data.messages.is_empty());
}
