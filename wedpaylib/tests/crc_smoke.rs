use wedpaylib::emv::{crc::{checksum, crc16}, tlv::{encode_all, encode_field}};
use wedpaylib::model::Field;

/// Побитовая эталонная реализация CRC-16/CCITT-FALSE.
fn reference(data: &[u8]) -> u16 {
    let mut crc: u16 = 0xFFFF;
    for &byte in data {
        crc ^= (byte as u16) << 8;
        for _ in 0..8 {
            if crc & 0x8000 != 0 {
                crc = (crc << 1) ^ 0x1021;
            } else {
                crc <<= 1;
            }
        }
    }
    crc
}

#[test]
fn ccitt_false_check_value() {
    assert_eq!(checksum("123456789"), 0x29B1);
    assert_eq!(crc16("123456789"), "29B1");
}

#[test]
fn empty_input_is_init_value() {
    assert_eq!(crc16(""), "FFFF");
}

#[test]
fn matches_bitwise_reference() {
    for s in ["A", "0002010102115802TH", "hello, world", "00020101021229370016A0000006770101116304"] {
        assert_eq!(checksum(s), reference(s.as_bytes()), "{s}");
    }
}

#[test]
fn rendering_is_four_uppercase_hex_digits() {
    for s in ["a", "ab", "abc", "abcd", "6304"] {
        let c = crc16(s);
        assert_eq!(c.len(), 4);
        assert_eq!(c, format!("{:04X}", reference(s.as_bytes())));
    }
}

#[test]
fn field_encoding() {
    assert_eq!(encode_field("58", "TH"), "5802TH");
    assert_eq!(encode_field("53", "764"), "5303764");
    assert_eq!(encode_field("63", ""), "6300");
    assert_eq!(encode_field("01", &"9".repeat(16)), format!("0116{}", "9".repeat(16)));
    assert_eq!(
        encode_all(&[Field::new("00", "01"), Field::new("01", "12")]),
        "000201010212"
    );
}

#[test]
fn length_counts_characters_not_bytes() {
    // "ไทย" — 3 символа, 9 байт в UTF-8
    assert_eq!(encode_field("59", "ไทย"), "5903ไทย");
}
