//! Per-field flag descriptors.
//!
//! A record is inspected through its serialized form: every entry of the
//! serialized table is a field, and the TOML value type decides the field's
//! [`Kind`]. Fields of any other type are not flags and are skipped.

mod annotation;
mod error;

use std::fmt;

use toml::Value;

use crate::flagset::{parse_bool, FlagValue};

pub use annotation::Annotation;
pub use error::StructError;

/// The closed set of field types that can be bound to a flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    Int,
    Str,
    Bool,
}

impl Kind {
    /// The kind of a serialized field, or `None` if it cannot be a flag.
    pub fn of(value: &Value) -> Option<Kind> {
        match value {
            Value::Integer(_) => Some(Kind::Int),
            Value::String(_) => Some(Kind::Str),
            Value::Boolean(_) => Some(Kind::Bool),
            Value::Float(_) | Value::Datetime(_) | Value::Array(_) | Value::Table(_) => None,
        }
    }

    pub fn zero(self) -> FlagValue {
        match self {
            Kind::Int => FlagValue::Int(0),
            Kind::Str => FlagValue::Str(String::new()),
            Kind::Bool => FlagValue::Bool(false),
        }
    }

    /// Parses an annotated default. An empty string yields the zero value.
    pub fn parse_default(self, raw: &str) -> Option<FlagValue> {
        if raw.is_empty() {
            return Some(self.zero());
        }
        self.zero().parse_as(raw).ok()
    }

    /// Reads a serialized field value as a flag value of this kind.
    pub fn from_toml(self, value: &Value) -> Option<FlagValue> {
        match (self, value) {
            (Kind::Int, Value::Integer(n)) => Some(FlagValue::Int(*n)),
            (Kind::Str, Value::String(s)) => Some(FlagValue::Str(s.clone())),
            (Kind::Bool, Value::Boolean(b)) => Some(FlagValue::Bool(*b)),
            _ => None,
        }
    }

    /// Converts a flag value back into a serialized field value, if the
    /// flag value is of this kind.
    pub fn to_toml(self, value: &FlagValue) -> Option<Value> {
        match (self, value) {
            (Kind::Int, FlagValue::Int(n)) => Some(Value::Integer(*n)),
            (Kind::Str, FlagValue::Str(s)) => Some(Value::String(s.clone())),
            (Kind::Bool, FlagValue::Bool(b)) => Some(Value::Boolean(*b)),
            _ => None,
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Kind::Int => "int",
            Kind::Str => "string",
            Kind::Bool => "bool",
        })
    }
}

/// Read-only view of one bindable record field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDescriptor {
    ident: String,
    name: String,
    default_value: String,
    usage: String,
    required: bool,
    kind: Kind,
    static_default: FlagValue,
}

impl FieldDescriptor {
    /// Builds the descriptor for the field serialized as `ident`.
    ///
    /// Returns `Ok(None)` when the field's type is not a supported [`Kind`].
    /// A malformed default or `required` token is a [`StructError`].
    pub fn extract(
        ident: &str,
        value: &Value,
        annotation: Option<&Annotation>,
    ) -> Result<Option<Self>, StructError> {
        let Some(kind) = Kind::of(value) else {
            return Ok(None);
        };

        let name = annotation
            .and_then(Annotation::flag_name)
            .map_or_else(|| ident.to_lowercase(), str::to_string);
        let default_value = annotation
            .and_then(Annotation::default_value)
            .unwrap_or_default()
            .to_string();
        let usage = annotation
            .and_then(Annotation::usage_text)
            .unwrap_or_default()
            .to_string();

        let required_token = match annotation.and_then(Annotation::required_token) {
            Some(token) => parse_bool(token).ok_or_else(|| StructError::InvalidRequired {
                field: ident.to_string(),
                value: token.to_string(),
            })?,
            None => false,
        };
        let required = required_token || annotation.is_some_and(|a| a.has_tag("required"));

        let static_default =
            kind.parse_default(&default_value)
                .ok_or_else(|| StructError::InvalidDefault {
                    field: ident.to_string(),
                    kind,
                    value: default_value.clone(),
                })?;

        Ok(Some(Self {
            ident: ident.to_string(),
            name,
            default_value,
            usage,
            required,
            kind,
            static_default,
        }))
    }

    /// The field's serialized name.
    pub fn ident(&self) -> &str {
        &self.ident
    }

    /// The flag name used on the command line.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The annotated default as written, possibly empty.
    pub fn default_value(&self) -> &str {
        &self.default_value
    }

    pub fn usage(&self) -> &str {
        &self.usage
    }

    pub fn required(&self) -> bool {
        self.required
    }

    pub fn kind(&self) -> Kind {
        self.kind
    }

    /// The annotated default parsed as the field's kind, or its zero value.
    pub fn static_default(&self) -> &FlagValue {
        &self.static_default
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Value::Integer(3), Some(Kind::Int))]
    #[case(Value::String("x".into()), Some(Kind::Str))]
    #[case(Value::Boolean(true), Some(Kind::Bool))]
    #[case(Value::Float(1.5), None)]
    #[case(Value::Array(vec![]), None)]
    #[case(Value::Table(toml::Table::new()), None)]
    fn test_kind_of(#[case] value: Value, #[case] expected: Option<Kind>) {
        assert_eq!(Kind::of(&value), expected);
    }

    #[test]
    fn test_unannotated_field_uses_lowercased_ident() {
        let descriptor = FieldDescriptor::extract("FizzOn", &Value::Integer(0), None)
            .unwrap()
            .unwrap();

        assert_eq!(descriptor.ident(), "FizzOn");
        assert_eq!(descriptor.name(), "fizzon");
        assert_eq!(descriptor.default_value(), "");
        assert_eq!(descriptor.usage(), "");
        assert!(!descriptor.required());
        assert_eq!(descriptor.static_default(), &FlagValue::Int(0));
    }

    #[test]
    fn test_annotated_field() {
        let annotation = Annotation::field("count")
            .name("c")
            .value("10")
            .usage("how many");
        let descriptor = FieldDescriptor::extract("count", &Value::Integer(0), Some(&annotation))
            .unwrap()
            .unwrap();

        assert_eq!(descriptor.name(), "c");
        assert_eq!(descriptor.default_value(), "10");
        assert_eq!(descriptor.usage(), "how many");
        assert_eq!(descriptor.kind(), Kind::Int);
        assert_eq!(descriptor.static_default(), &FlagValue::Int(10));
    }

    #[test]
    fn test_unsupported_kind_is_skipped() {
        let annotation = Annotation::field("ratio").value("not a float");
        let descriptor =
            FieldDescriptor::extract("ratio", &Value::Float(0.5), Some(&annotation)).unwrap();

        assert!(descriptor.is_none());
    }

    #[rstest]
    #[case(Value::Integer(0), "ten")]
    #[case(Value::Boolean(false), "maybe")]
    fn test_bad_default(#[case] value: Value, #[case] raw: &str) {
        let annotation = Annotation::field("f").value(raw);
        let err = FieldDescriptor::extract("f", &value, Some(&annotation)).unwrap_err();

        assert!(matches!(err, StructError::InvalidDefault { value, .. } if value == raw));
    }

    #[test]
    fn test_string_default_is_taken_verbatim() {
        let annotation = Annotation::field("word").value("0x10");
        let descriptor =
            FieldDescriptor::extract("word", &Value::String(String::new()), Some(&annotation))
                .unwrap()
                .unwrap();

        assert_eq!(descriptor.static_default(), &FlagValue::Str("0x10".into()));
    }

    #[rstest]
    #[case(Annotation::field("f").required("true"), true)]
    #[case(Annotation::field("f").required("T"), true)]
    #[case(Annotation::field("f").required("1"), true)]
    #[case(Annotation::field("f").required("false"), false)]
    #[case(Annotation::field("f").tags("required"), true)]
    #[case(Annotation::field("f").required("0").tags("required"), true)]
    #[case(Annotation::field("f"), false)]
    fn test_required(#[case] annotation: Annotation, #[case] expected: bool) {
        let descriptor = FieldDescriptor::extract("f", &Value::Integer(0), Some(&annotation))
            .unwrap()
            .unwrap();

        assert_eq!(descriptor.required(), expected);
    }

    #[test]
    fn test_bad_required_token() {
        let annotation = Annotation::field("f").required("yes please");
        let err = FieldDescriptor::extract("f", &Value::Integer(0), Some(&annotation)).unwrap_err();

        assert_eq!(
            err,
            StructError::InvalidRequired {
                field: "f".into(),
                value: "yes please".into(),
            }
        );
    }

    #[test]
    fn test_toml_conversions_check_kind() {
        assert_eq!(Kind::Int.to_toml(&FlagValue::Int(4)), Some(Value::Integer(4)));
        assert_eq!(Kind::Int.to_toml(&FlagValue::Str("4".into())), None);
        assert_eq!(
            Kind::Bool.from_toml(&Value::Boolean(true)),
            Some(FlagValue::Bool(true))
        );
        assert_eq!(Kind::Str.from_toml(&Value::Integer(1)), None);
    }
}
