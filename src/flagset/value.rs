use std::fmt;
use std::num::ParseIntError;

/// The value held by a single flag.
///
/// The variant is fixed when the flag is defined; later assignments parse
/// the raw text as that same variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlagValue {
    Int(i64),
    Str(String),
    Bool(bool),
}

impl FlagValue {
    /// Name shown for the flag's type in usage output.
    pub fn type_name(&self) -> &'static str {
        match self {
            FlagValue::Int(_) => "int",
            FlagValue::Str(_) => "string",
            FlagValue::Bool(_) => "bool",
        }
    }

    /// Whether this is the zero value of its variant (`0`, `""`, `false`).
    pub fn is_zero(&self) -> bool {
        match self {
            FlagValue::Int(n) => *n == 0,
            FlagValue::Str(s) => s.is_empty(),
            FlagValue::Bool(b) => !b,
        }
    }

    /// Parses `raw` as a value of the same variant as `self`.
    pub(crate) fn parse_as(&self, raw: &str) -> Result<FlagValue, String> {
        match self {
            FlagValue::Int(_) => parse_int(raw)
                .map(FlagValue::Int)
                .map_err(|e| e.to_string()),
            FlagValue::Str(_) => Ok(FlagValue::Str(raw.to_string())),
            FlagValue::Bool(_) => parse_bool(raw)
                .map(FlagValue::Bool)
                .ok_or_else(|| "invalid boolean syntax".to_string()),
        }
    }
}

impl fmt::Display for FlagValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FlagValue::Int(n) => write!(f, "{n}"),
            FlagValue::Str(s) => f.write_str(s),
            FlagValue::Bool(b) => write!(f, "{b}"),
        }
    }
}

/// Permissive boolean parsing.
///
/// Accepts `1`, `t`, `T`, `TRUE`, `true`, `True` and their false
/// counterparts `0`, `f`, `F`, `FALSE`, `false`, `False`.
pub fn parse_bool(s: &str) -> Option<bool> {
    match s {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Some(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Some(false),
        _ => None,
    }
}

/// Parses a signed integer, honouring `0x`, `0o` and `0b` radix prefixes.
pub fn parse_int(s: &str) -> Result<i64, ParseIntError> {
    let (sign, unsigned) = match s.as_bytes().first() {
        Some(b'-' | b'+') => s.split_at(1),
        _ => ("", s),
    };

    let (radix, digits) = match unsigned.get(..2) {
        Some("0x" | "0X") => (16, &unsigned[2..]),
        Some("0o" | "0O") => (8, &unsigned[2..]),
        Some("0b" | "0B") => (2, &unsigned[2..]),
        _ => (10, unsigned),
    };

    // A second sign after the first one is rejected by from_str_radix.
    i64::from_str_radix(&format!("{sign}{digits}"), radix)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("42", 42)]
    #[case("-7", -7)]
    #[case("+7", 7)]
    #[case("0x1F", 31)]
    #[case("-0x10", -16)]
    #[case("0o17", 15)]
    #[case("0b101", 5)]
    #[case("-9223372036854775808", i64::MIN)]
    fn test_parse_int_accepts(#[case] raw: &str, #[case] expected: i64) {
        assert_eq!(parse_int(raw).unwrap(), expected);
    }

    #[rstest]
    #[case("")]
    #[case("ten")]
    #[case("--5")]
    #[case("0x")]
    #[case("1.5")]
    #[case("9223372036854775808")]
    fn test_parse_int_rejects(#[case] raw: &str) {
        assert!(parse_int(raw).is_err());
    }

    #[test]
    fn test_parse_bool_shorthand() {
        for raw in ["1", "t", "T", "TRUE", "true", "True"] {
            assert_eq!(parse_bool(raw), Some(true), "{raw}");
        }
        for raw in ["0", "f", "F", "FALSE", "false", "False"] {
            assert_eq!(parse_bool(raw), Some(false), "{raw}");
        }
        assert_eq!(parse_bool("yes"), None);
        assert_eq!(parse_bool("tRUE"), None);
        assert_eq!(parse_bool(""), None);
    }

    #[test]
    fn test_parse_as_keeps_variant() {
        assert_eq!(
            FlagValue::Int(0).parse_as("12").unwrap(),
            FlagValue::Int(12)
        );
        assert_eq!(
            FlagValue::Str("x".into()).parse_as("12").unwrap(),
            FlagValue::Str("12".into())
        );
        assert!(FlagValue::Bool(false).parse_as("12").is_err());
    }

    #[test]
    fn test_zero_values() {
        assert!(FlagValue::Int(0).is_zero());
        assert!(FlagValue::Str(String::new()).is_zero());
        assert!(FlagValue::Bool(false).is_zero());
        assert!(!FlagValue::Bool(true).is_zero());
    }
}
