use proptest::prelude::*;
use rust_decimal::Decimal;
use wedpaylib::{emv::crc::crc16, generate_payload};

fn split_fields(mut s: &str) -> Vec<(String, String)> {
    let mut out = Vec::new();
    while !s.is_empty() {
        let len: usize = s[2..4].parse().unwrap();
        out.push((s[0..2].to_string(), s[4..4 + len].to_string()));
        s = &s[4 + len..];
    }
    out
}

fn target() -> impl Strategy<Value = String> {
    prop_oneof![
        "0[0-9]{9}",
        "[0-9]{13}",
        "[0-9]{15,20}",
        "[0-9]{1,14}",
        "[0-9]{3}-[0-9]{3}-[0-9]{4}",
        "[ a-z()+-]{0,5}[0-9]{1,16}[ a-z-]{0,5}",
    ]
}

fn amount() -> impl Strategy<Value = Option<Decimal>> {
    prop::option::of((1i64..10_000_000, 0u32..4).prop_map(|(m, s)| Decimal::new(m, s)))
}

proptest! {
    #[test]
    fn checksum_is_self_consistent(t in target(), a in amount()) {
        let p = generate_payload(&t, a);
        prop_assert!(!p.is_empty());
        let (body, crc) = p.split_at(p.len() - 4);
        prop_assert!(body.ends_with("6304"));
        prop_assert_eq!(crc16(body), crc);
    }

    #[test]
    fn lengths_and_order_hold(t in target(), a in amount()) {
        let p = generate_payload(&t, a);
        let fields = split_fields(&p);
        let tags: Vec<&str> = fields.iter().map(|(t, _)| t.as_str()).collect();

        if a.is_some() {
            prop_assert_eq!(tags, vec!["00", "01", "29", "58", "53", "54", "63"]);
            prop_assert_eq!(fields[1].1.as_str(), "11");
            let amt = &fields[5].1;
            prop_assert_eq!(amt.split('.').nth(1).map(str::len), Some(2));
        } else {
            prop_assert_eq!(tags, vec!["00", "01", "29", "58", "53", "63"]);
            prop_assert_eq!(fields[1].1.as_str(), "12");
        }

        let nested = split_fields(&fields[2].1);
        prop_assert_eq!(nested.len(), 2);
        prop_assert_eq!(nested[0].0.as_str(), "00");
        prop_assert_eq!(nested[1].0.as_str(), "01");
        prop_assert!(nested[1].1.chars().all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn digit_free_targets_yield_nothing(t in "[^0-9]{0,12}", a in amount()) {
        prop_assert_eq!(generate_payload(&t, a), "");
    }
}
