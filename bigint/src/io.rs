//! Text I/O (spec.md §6): the input grammar, output format, and a
//! `parse_literal` helper standing in for the C++ `operator""_bigint`
//! user-defined literal (Rust has no numeric literal suffixes to hook —
//! spec.md §1 excludes that mechanism, not the existence of literal
//! parsing).
//!
//! Grounded in `algebra-core/src/biginteger/mod.rs`'s `FromStr`/`Display`
//! impls for the trait shape (hand-rolled parsing loop, no external
//! parser-combinator crate), generalized from the teacher's fixed radix
//! (always decimal) to spec.md's full prefix/radix grammar.

use crate::radix::consumer::DigitConsumer;
use crate::radix::producer::DigitProducer;
use crate::value::BigInt;
use bigint_core::BigIntError;
use core::fmt;
use core::str::FromStr;

fn digit_char(d: u64, uppercase: bool) -> char {
    match d {
        0..=9 => (b'0' + d as u8) as char,
        10..=35 => {
            let base = if uppercase { b'A' } else { b'a' };
            (base + (d as u8 - 10)) as char
        }
        _ => unreachable!("radix digits are always < 36 for this crate's supported radices"),
    }
}

fn digit_value(c: char) -> Option<u64> {
    match c {
        '0'..='9' => Some(c as u64 - '0' as u64),
        'a'..='z' => Some(c as u64 - 'a' as u64 + 10),
        'A'..='Z' => Some(c as u64 - 'A' as u64 + 10),
        _ => None,
    }
}

fn format_radix(value: &BigInt, radix: u32, uppercase: bool) -> String {
    let mut producer = DigitProducer::new(value, radix).expect("radix already validated by caller");
    let mut s = String::new();
    while let Some(d) = producer.next_digit() {
        s.push(digit_char(d, uppercase));
    }
    s
}

/// Parses digits (optionally apostrophe-separated, thousands-grouped) of
/// the given `radix` into a nonnegative [`BigInt`]. `InputFailure` on an
/// empty body, an invalid digit, or a grouping pattern mismatch.
fn parse_digits(body: &str, radix: u32) -> Result<BigInt, BigIntError> {
    if body.is_empty() {
        return Err(BigIntError::InputFailure("empty digit sequence"));
    }

    if body.contains('\'') {
        let groups: Vec<&str> = body.split('\'').collect();
        if groups.iter().any(|g| g.is_empty()) {
            return Err(BigIntError::InputFailure("empty group in thousands separator"));
        }
        if !(1..=3).contains(&groups[0].len()) {
            return Err(BigIntError::InputFailure("first grouping too wide"));
        }
        if groups[1..].iter().any(|g| g.len() != 3) {
            return Err(BigIntError::InputFailure("grouping pattern mismatch"));
        }
    }

    let mut consumer = DigitConsumer::new(radix)?;
    let mut any = false;
    for c in body.chars() {
        if c == '\'' {
            continue;
        }
        any = true;
        let d = digit_value(c).ok_or(BigIntError::InputFailure("invalid digit"))?;
        if d >= radix as u64 {
            return Err(BigIntError::InputFailure("digit out of range for radix"));
        }
        consumer.read_digit(d)?;
    }
    if !any {
        return Err(BigIntError::InputFailure("empty digit sequence"));
    }
    Ok(BigInt::from_parts(consumer.finish()?, true))
}

fn detect_prefix(s: &str) -> (u32, &str) {
    let lower_prefix = |p: &str| s.len() >= p.len() && s[..p.len()].eq_ignore_ascii_case(p);
    if lower_prefix("0x") {
        (16, &s[2..])
    } else if lower_prefix("0b") {
        (2, &s[2..])
    } else if lower_prefix("0o") {
        (8, &s[2..])
    } else if s.len() > 1 && s.as_bytes()[0] == b'0' {
        (8, &s[1..])
    } else {
        (10, s)
    }
}

/// Parses a bare literal (no sign, no surrounding whitespace): an
/// optional `0x`/`0X`/`0b`/`0B` prefix or leading `0` for octal, else
/// decimal, with apostrophes permitted anywhere in the body as digit
/// separators (spec.md §6's literal-parser grammar).
pub fn parse_literal(s: &str) -> Result<BigInt, BigIntError> {
    let (radix, rest) = detect_prefix(s);
    let body: String = rest.chars().filter(|&c| c != '\'').collect();
    parse_digits(&body, radix)
}

impl FromStr for BigInt {
    type Err = BigIntError;

    /// The full input grammar of spec.md §6: optional leading/trailing
    /// whitespace, optional sign, an auto-detected radix prefix, and a
    /// thousands-grouped decimal body.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let (sign, rest) = match trimmed.as_bytes().first() {
            Some(b'+') => (true, &trimmed[1..]),
            Some(b'-') => (false, &trimmed[1..]),
            _ => (true, trimmed),
        };
        if rest.is_empty() {
            return Err(BigIntError::InputFailure("sign with no digits"));
        }
        let (radix, body) = detect_prefix(rest);
        let magnitude = parse_digits(body, radix)?;
        Ok(BigInt::from_parts(magnitude.magnitude().clone(), sign))
    }
}

impl fmt::Display for BigInt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_negative() {
            write!(f, "-")?;
        }
        write!(f, "{}", format_radix(self, 10, false))
    }
}

impl fmt::Binary for BigInt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_negative() {
            write!(f, "-")?;
        }
        if f.alternate() {
            write!(f, "0b")?;
        }
        write!(f, "{}", format_radix(self, 2, false))
    }
}

impl fmt::Octal for BigInt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_negative() {
            write!(f, "-")?;
        }
        if f.alternate() {
            write!(f, "0")?;
        }
        write!(f, "{}", format_radix(self, 8, false))
    }
}

impl fmt::LowerHex for BigInt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_negative() {
            write!(f, "-")?;
        }
        if f.alternate() {
            write!(f, "0x")?;
        }
        write!(f, "{}", format_radix(self, 16, false))
    }
}

impl fmt::UpperHex for BigInt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_negative() {
            write!(f, "-")?;
        }
        if f.alternate() {
            write!(f, "0X")?;
        }
        write!(f, "{}", format_radix(self, 16, true))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_round_trips_decimal() {
        let v = BigInt::from(-123456789i64);
        assert_eq!(v.to_string(), "-123456789");
        let parsed: BigInt = "-123456789".parse().unwrap();
        assert_eq!(parsed, v);
    }

    #[test]
    fn zero_displays_as_zero() {
        assert_eq!(BigInt::zero().to_string(), "0");
    }

    #[test]
    fn hex_and_binary_formatting() {
        let v = BigInt::from(0xDEADu32);
        assert_eq!(format!("{:x}", v), "dead");
        assert_eq!(format!("{:X}", v), "DEAD");
        assert_eq!(format!("{:#x}", v), "0xdead");
        assert_eq!(format!("{:b}", v), "1101111010101101");
    }

    #[test]
    fn parse_hex_and_binary_literals() {
        assert_eq!(parse_literal("0xFF").unwrap(), BigInt::from(255u32));
        assert_eq!(parse_literal("0b1010").unwrap(), BigInt::from(10u32));
        assert_eq!(parse_literal("017").unwrap(), BigInt::from(15u32)); // octal
    }

    #[test]
    fn literal_apostrophes_are_discarded() {
        assert_eq!(parse_literal("1'000'000").unwrap(), BigInt::from(1_000_000u32));
    }

    #[test]
    fn from_str_rejects_bad_grouping() {
        assert!("1'23'456".parse::<BigInt>().is_err());
        assert!("12'345".parse::<BigInt>().is_ok());
    }

    #[test]
    fn from_str_handles_sign_and_whitespace() {
        let v: BigInt = "  +42  ".parse().unwrap();
        assert_eq!(v, BigInt::from(42u32));
    }

    #[test]
    fn empty_input_is_input_failure() {
        assert!("".parse::<BigInt>().is_err());
        assert!("-".parse::<BigInt>().is_err());
    }
}
