use chrono::NaiveDate;
use pretty_assertions::assert_eq;
use std::{fs::File, io::BufReader, path::PathBuf, thread};
use swift_parser::{Currency, DebitCreditMark, Direction, Mt942Data, ParseError};

fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join("mt942")
        .join(name)
}

fn fixture_text(name: &str) -> String {
    let path = fixture_path(name);
    std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("failed to read MT942 fixture {path:?}: {e}"))
}

fn parse_fixture(name: &str) -> Result<Mt942Data, ParseError> {
    let path = fixture_path(name);
    let file = File::open(&path)
        .unwrap_or_else(|e| panic!("failed to open MT942 fixture {path:?}: {e}"));
    Mt942Data::parse(BufReader::new(file))
}

#[test]
fn mt942_example_parses_into_one_message() {
    let data = parse_fixture("example.mt942").expect("failed to parse MT942 fixture");

    assert_eq!(data.messages.len(), 1, "example.mt942 contains a single statement");
    let msg = &data.messages[0];

    assert_eq!(msg.transaction_reference.reference, "STMTREF160519");
    assert_eq!(
        msg.related_reference.as_ref().map(|r| r.reference.as_str()),
        Some("NONREF")
    );
    assert_eq!(msg.account_identification.account, "DE89370400440532013000");
    assert_eq!(msg.statement_number.statement_number, 49);
    assert_eq!(msg.statement_number.sequence_number, Some(2));

    // :34F:EURD100, / :34F:EURC50,
    let debit_limit = msg.floor_limit_debit().expect("debit floor limit");
    assert_eq!(debit_limit.currency, Currency::EUR);
    assert_eq!(debit_limit.amount, 10_000);
    assert_eq!(msg.floor_limit_credit().map(|f| f.amount), Some(5_000));

    assert_eq!(
        msg.date_time_indicator.date_time.date_naive(),
        NaiveDate::from_ymd_opt(2016, 5, 19).unwrap()
    );
}

#[test]
fn mt942_example_groups_transactions_with_their_information() {
    let data = parse_fixture("example.mt942").unwrap();
    let msg = &data.messages[0];

    assert_eq!(msg.transactions.len(), 3, "example.mt942 has three :61: lines");

    let first = &msg.transactions[0];
    assert_eq!(first.statement_line().mark, DebitCreditMark::Debit);
    assert_eq!(first.statement_line().amount, 1_201);
    assert_eq!(
        first.statement_line().supplementary_details.as_deref(),
        Some("PAYMENT ORDER")
    );
    assert_eq!(
        first.information_to_account_owner().map(|i| i.lines.clone()),
        Some(vec![
            "?00ONLINE PAYMENT?20INVOICE 4711".to_string(),
            "DE02123412341234123412 JOHN DOE".to_string(),
        ])
    );

    let second = &msg.transactions[1];
    assert_eq!(second.statement_line().mark.direction(), Direction::Credit);
    assert_eq!(second.statement_line().reference_for_account_owner, "INV4711");
    assert_eq!(
        second.information_to_account_owner().map(|i| i.text()),
        Some("SALARY MAY 2016".to_string())
    );

    // :61: сразу перед :90D: остаётся без :86:
    let third = &msg.transactions[2];
    assert_eq!(third.statement_line().mark, DebitCreditMark::ReversalOfCredit);
    assert_eq!(third.information_to_account_owner(), None);
}

#[test]
fn mt942_example_has_summaries_and_trailing_information() {
    let data = parse_fixture("example.mt942").unwrap();
    let msg = &data.messages[0];

    let debit = msg.summary_debit.as_ref().expect(":90D: present");
    assert_eq!(debit.number_of_entries, 2);
    assert_eq!(debit.amount, 3_701);

    let credit = msg.summary_credit.as_ref().expect(":90C: present");
    assert_eq!(credit.number_of_entries, 1);
    assert_eq!(credit.amount, 150_000);

    assert_eq!(
        msg.information_to_account_owner.as_ref().map(|i| i.text()),
        Some("INTERIM STATEMENT 49/2".to_string())
    );
}

#[test]
fn mt942_repeated_messages_are_split_in_source_order() {
    let data = parse_fixture("repeated.mt942").unwrap();

    assert_eq!(data.messages.len(), 2);

    let first = &data.messages[0];
    assert_eq!(first.transaction_reference.reference, "FIRST");
    assert_eq!(first.transactions.len(), 1);
    assert_eq!(first.information_to_account_owner, None);

    let second = &data.messages[1];
    assert_eq!(second.transaction_reference.reference, "SECOND");
    assert!(second.transactions.is_empty());
    assert_eq!(
        second.information_to_account_owner.as_ref().map(|i| i.text()),
        Some("NO MOVEMENTS".to_string())
    );
}

#[test]
fn mt942_out_of_order_field_names_both_tags() {
    let err = parse_fixture("out_of_order.mt942").unwrap_err();

    assert_eq!(err.field_number(), Some(5));
    assert_eq!(err.field_tag(), Some("61"));
    assert_eq!(
        err.to_string(),
        "field 5 :61: field :61: is not allowed after field :34F:"
    );
}

#[test]
fn mt942_parsing_is_deterministic() {
    let text = fixture_text("example.mt942");

    let first = Mt942Data::from_swift_text(&text).unwrap();
    let second = Mt942Data::from_swift_text(&text).unwrap();

    assert_eq!(first, second);
}

#[test]
fn mt942_parsing_is_independent_across_threads() {
    let example = fixture_text("example.mt942");
    let repeated = fixture_text("repeated.mt942");

    let expected_example = Mt942Data::from_swift_text(&example).unwrap();
    let expected_repeated = Mt942Data::from_swift_text(&repeated).unwrap();

    thread::scope(|s| {
        for _ in 0..4 {
            s.spawn(|| {
                assert_eq!(Mt942Data::from_swift_text(&example).unwrap(), expected_example);
                assert_eq!(Mt942Data::from_swift_text(&repeated).unwrap(), expected_repeated);
            });
        }
    });
}

#[test]
fn mt942_value_error_wraps_cause() {
    let text = fixture_text("repeated.mt942").replace(":28C:2/1", ":28C:2/X");

    let err = Mt942Data::from_swift_text(&text).unwrap_err();
    match err {
        ParseError::FieldValue { ordinal, tag, source } => {
            assert_eq!(ordinal, 10);
            assert_eq!(tag, "28C");
            assert!(source.to_string().contains("invalid statement number"));
        }
        other => panic!("expected FieldValue, got {other:?}"),
    }
}
