use rust_decimal::Decimal;
use wedpaylib::{
    error::WedpayError,
    formats::csv::Csv,
    traits::{ReadFormat, WriteFormat},
};
use std::io::Cursor;

#[test]
fn csv_read_generate_write() {
    let input = r#"target,amount
081-234-5678,100.00
1234567890123,
no digits here,5
"#;
    let mut b = Csv::read(Cursor::new(input)).expect("read csv");
    assert_eq!(b.entries.len(), 3);
    assert_eq!(b.entries[0].amount, Some(Decimal::new(10000, 2)));
    assert_eq!(b.entries[1].amount, None);

    b.generate();
    assert_eq!(b.failed().count(), 1);

    let mut out = Vec::new();
    Csv::write(&mut out, &b).expect("write csv");
    let text = String::from_utf8(out).unwrap();
    let mut lines = text.lines();
    assert_eq!(lines.next(), Some("target,amount,payload"));
    assert_eq!(
        lines.next(),
        Some("081-234-5678,100.00,00020101021129370016A000000677010111011300668123456785802TH53037645406100.0063041BA1")
    );
    assert_eq!(
        lines.next(),
        Some("1234567890123,,00020101021229370016A000000677010111011312345678901235802TH5303764630495C6")
    );
}

#[test]
fn csv_written_batch_reads_back() {
    let input = "target\n0812345678\n";
    let mut b = Csv::read(Cursor::new(input)).expect("read csv");
    b.generate();

    let mut out = Vec::new();
    Csv::write(&mut out, &b).expect("write csv");
    let b2 = Csv::read(Cursor::new(out)).expect("read back");
    assert_eq!(b2, b);
}

#[test]
fn csv_bad_amount_is_parse_error() {
    let input = "target,amount\n0812345678,ten baht\n";
    match Csv::read(Cursor::new(input)) {
        Err(WedpayError::Parse(msg)) => assert!(msg.contains("amount")),
        other => panic!("expected parse error, got {other:?}"),
    }
}

#[test]
fn csv_read_generated_fills_payloads() {
    let input = "target,amount\n0812345678,\n---,1\n";
    let b = Csv::read_generated(Cursor::new(input)).expect("read csv");
    assert_eq!(
        b.entries[0].payload.as_deref(),
        Some("00020101021229370016A000000677010111011300668123456785802TH53037646304A241")
    );
    assert_eq!(b.entries[1].payload.as_deref(), Some(""));
    assert_eq!(b.failed().count(), 1);
}
