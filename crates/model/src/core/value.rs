use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// A value bound to a named query parameter.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum Value {
    Int(i64),
    Decimal(BigDecimal),
    String(String),
    Null,
}

impl Value {
    /// Interprets a numeric literal typed by a user.
    ///
    /// Literals such as `.5` or `-.5` are accepted. Anything that does not parse
    /// as a decimal is kept verbatim as a string so the database decides.
    pub fn from_number_literal(literal: &str) -> Value {
        let literal = literal.trim();
        let normalized = if let Some(rest) = literal.strip_prefix("-.") {
            format!("-0.{rest}")
        } else if let Some(rest) = literal.strip_prefix('.') {
            format!("0.{rest}")
        } else {
            literal.to_string()
        };

        match BigDecimal::from_str(&normalized) {
            Ok(d) => Value::Decimal(d),
            Err(_) => Value::String(literal.to_string()),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<BigDecimal> for Value {
    fn from(v: BigDecimal) -> Self {
        Value::Decimal(v)
    }
}

/// Renders the value as an SQL literal.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Int(v) => write!(f, "{v}"),
            Value::Decimal(v) => write!(f, "{v}"),
            Value::String(v) => write!(f, "'{}'", v.replace('\'', "''")),
            Value::Null => write!(f, "NULL"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_number_literal_parses_decimal() {
        let v = Value::from_number_literal("10");
        assert_eq!(v, Value::Decimal(BigDecimal::from(10)));
    }

    #[test]
    fn test_number_literal_leading_dot() {
        let v = Value::from_number_literal("-.5");
        assert_eq!(v, Value::Decimal(BigDecimal::from_str("-0.5").unwrap()));

        let v = Value::from_number_literal(".25");
        assert_eq!(v, Value::Decimal(BigDecimal::from_str("0.25").unwrap()));
    }

    #[test]
    fn test_number_literal_falls_back_to_string() {
        let v = Value::from_number_literal("12abc");
        assert_eq!(v, Value::String("12abc".to_string()));
    }

    #[test]
    fn test_display_escapes_quotes() {
        let v = Value::from("O'Brien");
        assert_eq!(v.to_string(), "'O''Brien'");
        assert_eq!(Value::Null.to_string(), "NULL");
    }
}
