//! End-to-end scenarios across the number and unit layers.

use std::cmp::Ordering;

use eng_notation::{EngNumber, EngUnit, Equality, Error, VERSION};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

#[test]
fn version_constant() {
    assert!(!VERSION.is_empty());
    assert_eq!(VERSION.split('.').count(), 3);
}

#[test]
fn round_trip_every_prefix() {
    let prefixes: &[(&str, i32)] = &[
        ("y", -24),
        ("z", -21),
        ("a", -18),
        ("f", -15),
        ("p", -12),
        ("n", -9),
        ("u", -6),
        ("m", -3),
        ("", 0),
        ("k", 3),
        ("M", 6),
        ("G", 9),
        ("T", 12),
        ("P", 15),
        ("E", 18),
        ("Z", 21),
    ];
    for &(symbol, exponent) in prefixes {
        let input = format!("220{symbol}");
        let parsed = EngNumber::parse(input.as_str()).unwrap();
        let expected = Decimal::from_scientific(&format!("220e{exponent}")).unwrap();
        assert_eq!(parsed.value(), expected, "prefix '{}'", symbol);
        assert_eq!(parsed.to_eng_string().unwrap(), input);

        // Fractional mantissas survive numerically; the default policy pads
        // to two decimals on display (12.5k -> 12.50k).
        let fractional = EngNumber::parse(format!("12.5{symbol}").as_str()).unwrap();
        let reparsed = EngNumber::parse(fractional.to_eng_string().unwrap().as_str()).unwrap();
        assert_eq!(fractional, reparsed, "prefix '{}'", symbol);
    }
}

#[test]
fn format_then_reparse_is_stable() {
    for input in ["220k", "-220k", "1.2", "470n", "999Z", "1y", "0"] {
        let first = EngNumber::parse(input).unwrap();
        let text = first.to_eng_string().unwrap();
        let second = EngNumber::parse(text.as_str()).unwrap();
        assert_eq!(first, second, "input '{}'", input);
    }
}

#[test]
fn sign_preservation() {
    let positive = EngNumber::parse("220k").unwrap().to_eng_string().unwrap();
    let negative = EngNumber::parse("-220k").unwrap().to_eng_string().unwrap();
    assert!(negative.starts_with('-'));
    assert_eq!(&negative[1..], positive);
}

#[test]
fn small_term_below_display_resolution() {
    let sum = (EngNumber::parse("220k").unwrap() + EngNumber::parse("10m").unwrap()).unwrap();
    assert_eq!(sum.value(), dec!(220000.01));
    assert_eq!(sum.to_eng_string().unwrap(), "220k");
}

#[test]
fn significant_digit_scenario() {
    let n = EngNumber::parse("220m").unwrap().with_significant(4);
    assert_eq!(n.to_eng_string().unwrap(), "220.0m");
}

#[test]
fn part_number_scenario() {
    let n = EngNumber::parse("1.2k").unwrap();
    assert_eq!(n.to_part_number(None).unwrap(), "1k20");
}

#[test]
fn unit_mismatch_is_an_error() {
    let result = EngUnit::parse("220mHz").unwrap() + EngUnit::parse("10m").unwrap();
    assert!(matches!(result, Err(Error::UnitMismatch { .. })));
}

#[test]
fn unit_label_derivation() {
    let product = (EngUnit::parse("220ms").unwrap() * EngUnit::parse("2Hz").unwrap()).unwrap();
    assert_eq!(product.to_eng_string().unwrap(), "440msHz");

    let quotient = (EngUnit::parse("220ms").unwrap() / EngUnit::parse("2s").unwrap()).unwrap();
    assert_eq!(quotient.to_eng_string().unwrap(), "110ms/s");
}

#[test]
fn extreme_exponent_boundaries() {
    assert_eq!(
        EngUnit::parse("220yF").unwrap().to_eng_string().unwrap(),
        "220yF"
    );
    assert_eq!(
        EngUnit::parse("220ZHz").unwrap().to_eng_string().unwrap(),
        "220ZHz"
    );

    let over = (EngNumber::parse("500Z").unwrap() * 10_000).unwrap();
    assert!(matches!(over.to_eng_string(), Err(Error::Range { .. })));
    let under = (EngNumber::parse("1y").unwrap() / 10).unwrap();
    assert!(matches!(under.to_eng_string(), Err(Error::Range { .. })));
}

#[test]
fn mixed_operand_chain() {
    // Raw scalars and strings are accepted on either side of every operator.
    let n = EngNumber::parse("220m").unwrap();
    let n = (n + 0.01).unwrap();
    let n = (2i32 * n).unwrap();
    let n = (n - "60m").unwrap();
    assert_eq!(n.to_eng_string().unwrap(), "400m");
    assert_eq!(n.try_cmp(0.4), Ok(Ordering::Equal));
    assert_eq!(n.equality("bogus"), Equality::NotComparable);
}

#[test]
fn serde_round_trip() {
    let n = EngNumber::parse("4.7k").unwrap().with_significant(3);
    let json = serde_json::to_string(&n).unwrap();
    let back: EngNumber = serde_json::from_str(&json).unwrap();
    assert_eq!(back, n);
    assert_eq!(back.to_eng_string().unwrap(), "4.70k");

    let u = EngUnit::parse("100nF").unwrap();
    let json = serde_json::to_string(&u).unwrap();
    let back: EngUnit = serde_json::from_str(&json).unwrap();
    assert_eq!(back, u);
    assert_eq!(back.to_eng_string().unwrap(), "100nF");
}
