//! Integer literal parsing shared by the vector and coefficient loaders.
//!
//! # Accepted forms
//! - `42`, `-7`, `+3` - decimal
//! - `0x2A` / `0X2a` - hexadecimal
//! - `0b101010` - binary
//! - `0o52` - octal
//!
//! A sign may precede the prefix (`-0x10`), and single underscores may
//! separate digits (`1_000`).

use std::fmt;
use std::str::FromStr;

/// Integer parsed with base auto-detection
///
/// # Example
/// ```
/// use firlab::io::IntLiteral;
///
/// let lit: IntLiteral = "0b1010".parse().unwrap();
/// assert_eq!(lit.value(), 10);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntLiteral(i64);

impl IntLiteral {
    pub fn value(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for IntLiteral {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for IntLiteral {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_int(s).map(Self)
    }
}

impl From<IntLiteral> for i64 {
    fn from(lit: IntLiteral) -> Self {
        lit.0
    }
}

/// Parse an integer, detecting the base from a `0x`/`0b`/`0o` prefix.
pub fn parse_int(s: &str) -> Result<i64, String> {
    let (negative, body) = split_sign(s.trim());
    let (radix, digits) = strip_radix_prefix(body).unwrap_or((10, body));
    let magnitude = parse_magnitude(digits, radix)?;
    apply_sign(negative, magnitude)
}

/// Parse a hexadecimal integer; the `0x` prefix is optional.
pub fn parse_hex(s: &str) -> Result<i64, String> {
    let (negative, body) = split_sign(s.trim());
    let digits = body
        .strip_prefix("0x")
        .or_else(|| body.strip_prefix("0X"))
        .unwrap_or(body);
    let magnitude = parse_magnitude(digits, 16)?;
    apply_sign(negative, magnitude)
}

fn split_sign(s: &str) -> (bool, &str) {
    match s.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, s.strip_prefix('+').unwrap_or(s)),
    }
}

fn strip_radix_prefix(s: &str) -> Option<(u32, &str)> {
    let radix = match s.get(..2)? {
        "0x" | "0X" => 16,
        "0b" | "0B" => 2,
        "0o" | "0O" => 8,
        _ => return None,
    };
    Some((radix, &s[2..]))
}

fn parse_magnitude(digits: &str, radix: u32) -> Result<u64, String> {
    if digits.is_empty() {
        return Err("missing digits".to_string());
    }
    if digits.starts_with('_') || digits.ends_with('_') || digits.contains("__") {
        return Err(format!("misplaced underscore in {:?}", digits));
    }

    let cleaned: String = digits.chars().filter(|&c| c != '_').collect();
    if let Some(bad) = cleaned.chars().find(|c| !c.is_digit(radix)) {
        return Err(format!("invalid digit {:?} for base {}", bad, radix));
    }

    u64::from_str_radix(&cleaned, radix).map_err(|e| format!("{} (base {})", e, radix))
}

fn apply_sign(negative: bool, magnitude: u64) -> Result<i64, String> {
    let value = if negative {
        -i128::from(magnitude)
    } else {
        i128::from(magnitude)
    };
    i64::try_from(value).map_err(|_| format!("{} does not fit in 64 bits", value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auto_base_detection() {
        assert_eq!(parse_int("10"), Ok(10));
        assert_eq!(parse_int("0xA"), Ok(10));
        assert_eq!(parse_int("0XA"), Ok(10));
        assert_eq!(parse_int("0b1010"), Ok(10));
        assert_eq!(parse_int("0o12"), Ok(10));
    }

    #[test]
    fn test_signs_and_whitespace() {
        assert_eq!(parse_int("  -42 "), Ok(-42));
        assert_eq!(parse_int("+7"), Ok(7));
        assert_eq!(parse_int("-0x10"), Ok(-16));
        assert_eq!(parse_int("1_000"), Ok(1000));
    }

    #[test]
    fn test_extremes() {
        assert_eq!(parse_int("-9223372036854775808"), Ok(i64::MIN));
        assert!(parse_int("9223372036854775808").is_err());
    }

    #[test]
    fn test_invalid_literals() {
        assert!(parse_int("").is_err());
        assert!(parse_int("0x").is_err());
        assert!(parse_int("0b102").is_err());
        assert!(parse_int("12abc").is_err());
        assert!(parse_int("0x+5").is_err());
        assert!(parse_int("--5").is_err());
        assert!(parse_int("1__0").is_err());
    }

    #[test]
    fn test_hex_prefix_optional() {
        assert_eq!(parse_hex("0x10"), Ok(16));
        assert_eq!(parse_hex("10"), Ok(16));
        assert_eq!(parse_hex("ff"), Ok(255));
        // No binary detection in hex-only fields
        assert_eq!(parse_hex("0b1"), Ok(0xB1));
        assert!(parse_hex("0xg").is_err());
    }

    #[test]
    fn test_int_literal_from_str() {
        let lit: IntLiteral = "0x20".parse().unwrap();
        assert_eq!(lit.value(), 32);
        assert_eq!(i64::from(lit), 32);
        assert!("nope".parse::<IntLiteral>().is_err());
    }
}
