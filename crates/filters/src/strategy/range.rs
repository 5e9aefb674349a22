//! Numeric ranges: `1 to 5`, `<5`, `<=5`, `>5`, `>=5` and `=5`.

use super::{FilterStrategy, SegmentInput, parse_options};
use crate::{
    config::RANGE,
    error::{ConfigError, FilterError},
};
use async_trait::async_trait;
use model::core::value::Value;
use query::{
    ast::{
        condition::{CompareOp, Condition},
        expr::Expr,
    },
    fragment::{ConditionFragment, Params, param_name},
};
use regex::Regex;
use serde::Deserialize;
use serde_json::{Map, Value as JsonValue};

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct RangeOptions {
    pub between_prefix: String,
    pub between_infix: String,
    pub between_suffix: String,
    pub less_than_prefix: String,
    pub less_than_suffix: String,
    pub less_than_equal_prefix: String,
    pub less_than_equal_suffix: String,
    pub greater_than_prefix: String,
    pub greater_than_suffix: String,
    pub greater_than_equal_prefix: String,
    pub greater_than_equal_suffix: String,
    pub equal_prefix: String,
    pub equal_suffix: String,

    /// Regular expression a single number must match.
    pub number_pattern: String,

    /// Total digits of the decimal the column is converted to.
    pub conversion_num_digits: u32,
    pub conversion_decimal_places: u32,

    /// When false, rows whose column isn't numeric never match.
    pub treat_non_numeric_values_as_zero: bool,

    pub treat_null_as_empty_string: bool,
}

impl Default for RangeOptions {
    fn default() -> Self {
        Self {
            between_prefix: String::new(),
            between_infix: " to ".into(),
            between_suffix: String::new(),
            less_than_prefix: "<".into(),
            less_than_suffix: String::new(),
            less_than_equal_prefix: "<=".into(),
            less_than_equal_suffix: String::new(),
            greater_than_prefix: ">".into(),
            greater_than_suffix: String::new(),
            greater_than_equal_prefix: ">=".into(),
            greater_than_equal_suffix: String::new(),
            equal_prefix: "=".into(),
            equal_suffix: String::new(),
            number_pattern: r"-?\d*\.?\d+".into(),
            conversion_num_digits: 20,
            conversion_decimal_places: 4,
            treat_non_numeric_values_as_zero: false,
            treat_null_as_empty_string: true,
        }
    }
}

/// The bound shape a single-number pattern produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Shape {
    LessThan,
    LessThanEqual,
    GreaterThan,
    GreaterThanEqual,
    Equal,
}

impl Shape {
    fn bounds(self) -> &'static [CompareOp] {
        match self {
            Shape::LessThan => &[CompareOp::Lt],
            Shape::LessThanEqual => &[CompareOp::LtEq],
            Shape::GreaterThan => &[CompareOp::Gt],
            Shape::GreaterThanEqual => &[CompareOp::GtEq],
            Shape::Equal => &[CompareOp::GtEq, CompareOp::LtEq],
        }
    }
}

#[derive(Debug)]
pub struct RangeStrategy {
    options: RangeOptions,
    between: Regex,
    /// Tried in order after `between`; the first match wins.
    single: Vec<(Shape, Regex)>,
}

impl RangeStrategy {
    pub fn new(name: &str, options: RangeOptions) -> Result<Self, ConfigError> {
        let number = &options.number_pattern;
        let compile = |pattern: String| {
            Regex::new(&pattern).map_err(|e| ConfigError::InvalidOptions {
                name: name.to_string(),
                message: e.to_string(),
            })
        };

        let between = compile(format!(
            r"(?i)^{}\s*(?P<start>{number})\s*{}\s*(?P<end>{number})\s*{}$",
            regex::escape(&options.between_prefix),
            regex::escape(&options.between_infix),
            regex::escape(&options.between_suffix),
        ))?;

        let single_pattern = |prefix: &str, suffix: &str| {
            format!(
                r"(?i)^{}\s*(?P<start>{number})\s*{}$",
                regex::escape(prefix),
                regex::escape(suffix),
            )
        };

        let single = vec![
            (
                Shape::LessThan,
                compile(single_pattern(&options.less_than_prefix, &options.less_than_suffix))?,
            ),
            (
                Shape::LessThanEqual,
                compile(single_pattern(
                    &options.less_than_equal_prefix,
                    &options.less_than_equal_suffix,
                ))?,
            ),
            (
                Shape::GreaterThan,
                compile(single_pattern(
                    &options.greater_than_prefix,
                    &options.greater_than_suffix,
                ))?,
            ),
            (
                Shape::GreaterThanEqual,
                compile(single_pattern(
                    &options.greater_than_equal_prefix,
                    &options.greater_than_equal_suffix,
                ))?,
            ),
            (
                Shape::Equal,
                compile(single_pattern(&options.equal_prefix, &options.equal_suffix))?,
            ),
        ];

        Ok(Self {
            options,
            between,
            single,
        })
    }

    pub fn from_options(
        name: &str,
        options: &Map<String, JsonValue>,
    ) -> Result<Box<dyn FilterStrategy>, ConfigError> {
        let options = parse_options(name, options)?;
        Ok(Box::new(Self::new(name, options)?))
    }

    /// Comparisons (operator, number) the text describes, lower bound first.
    fn parse(&self, text: &str) -> Option<Vec<(CompareOp, String)>> {
        if let Some(caps) = self.between.captures(text) {
            return Some(vec![
                (CompareOp::GtEq, caps["start"].to_string()),
                (CompareOp::LtEq, caps["end"].to_string()),
            ]);
        }

        self.single.iter().find_map(|(shape, pattern)| {
            let caps = pattern.captures(text)?;
            let number = &caps["start"];
            Some(
                shape
                    .bounds()
                    .iter()
                    .map(|op| (*op, number.to_string()))
                    .collect(),
            )
        })
    }

    fn column(&self, input: &SegmentInput<'_>) -> Expr {
        let fallback = if self.options.treat_non_numeric_values_as_zero {
            Some(0)
        } else {
            None
        };

        input.dialect.cast_to_decimal(
            input.column_expr(self.options.treat_null_as_empty_string),
            self.options.conversion_num_digits,
            self.options.conversion_decimal_places,
            fallback,
        )
    }
}

#[async_trait]
impl FilterStrategy for RangeStrategy {
    fn kind(&self) -> &'static str {
        RANGE
    }

    async fn accept(
        &self,
        input: &SegmentInput<'_>,
    ) -> Result<Option<ConditionFragment>, FilterError> {
        let Some(bounds) = self.parse(input.text) else {
            return Ok(None);
        };

        let column = self.column(input);
        let mut params = Params::new();
        let mut comparisons = Vec::with_capacity(bounds.len());

        for (op, number) in bounds {
            let kind = match op {
                CompareOp::Gt | CompareOp::GtEq => "rangeStart",
                _ => "rangeEnd",
            };
            let name = param_name(kind, input.text, input.column);
            params.insert(name.as_str(), Value::from_number_literal(&number));
            comparisons.push(Condition::compare(column.clone(), op, Expr::param(&name)));
        }

        let condition = Condition::and(comparisons).negate_if(input.negate);
        Ok(Some(ConditionFragment::new(condition, params)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strategy::testing::{input, render};

    fn plain() -> RangeStrategy {
        let options = RangeOptions {
            treat_non_numeric_values_as_zero: true,
            treat_null_as_empty_string: false,
            ..RangeOptions::default()
        };
        RangeStrategy::new("range", options).unwrap()
    }

    async fn compile(
        strategy: &RangeStrategy,
        text: &str,
        negate: bool,
    ) -> Option<(String, Vec<Value>)> {
        strategy
            .accept(&input(text, negate))
            .await
            .unwrap()
            .map(render)
    }

    fn dec(s: &str) -> Value {
        Value::from_number_literal(s)
    }

    const COL: &str = "CAST(t.price AS DECIMAL(20, 4))";

    #[tokio::test]
    async fn test_single_bounds() {
        let s = plain();
        let cases = [
            ("<5", "<"),
            ("<=5", "<="),
            (">5", ">"),
            (">=5", ">="),
            (">= 5", ">="),
        ];

        for (text, op) in cases {
            let (sql_text, params) = compile(&s, text, false).await.unwrap();
            assert_eq!(sql_text, format!("{COL} {op} ?"), "{text}");
            assert_eq!(params, vec![dec("5")]);
        }
    }

    #[tokio::test]
    async fn test_negated_single_bound_flips_operator() {
        let (sql_text, _) = compile(&plain(), ">=10", true).await.unwrap();
        assert_eq!(sql_text, format!("{COL} < ?"));

        let (sql_text, _) = compile(&plain(), "<10", true).await.unwrap();
        assert_eq!(sql_text, format!("{COL} >= ?"));
    }

    #[tokio::test]
    async fn test_between() {
        let (sql_text, params) = compile(&plain(), "1 to 5", false).await.unwrap();
        assert_eq!(sql_text, format!("({COL} >= ? AND {COL} <= ?)"));
        assert_eq!(params, vec![dec("1"), dec("5")]);

        let (sql_text, _) = compile(&plain(), "1 TO 5", true).await.unwrap();
        assert_eq!(sql_text, format!("({COL} < ? OR {COL} > ?)"));
    }

    #[tokio::test]
    async fn test_equal_is_inclusive_range() {
        let (sql_text, params) = compile(&plain(), "=-.5", false).await.unwrap();
        assert_eq!(sql_text, format!("({COL} >= ? AND {COL} <= ?)"));
        assert_eq!(params, vec![dec("-0.5"), dec("-0.5")]);
    }

    #[tokio::test]
    async fn test_rejects_other_syntax() {
        let s = plain();
        for text in ["5", "abc", "<", "1 to", "<>5", "1 - 5", "\"5\""] {
            assert!(compile(&s, text, false).await.is_none(), "{text}");
        }
    }

    #[test]
    fn test_custom_markers() {
        let options = RangeOptions {
            between_prefix: "[".into(),
            between_infix: "..".into(),
            between_suffix: "]".into(),
            ..RangeOptions::default()
        };
        let s = RangeStrategy::new("range", options).unwrap();

        assert!(s.parse("[1..5]").is_some());
        assert!(s.parse("[ 1 .. 5 ]").is_some());
        assert!(s.parse("1 to 5").is_none());
    }

    #[tokio::test]
    async fn test_null_fallback_guards_cast() {
        let s = RangeStrategy::new("range", RangeOptions::default()).unwrap();
        let (sql_text, _) = compile(&s, ">1", true).await.unwrap();
        assert!(sql_text.starts_with("CASE WHEN COALESCE(t.price, '') REGEXP"));
        assert!(sql_text.ends_with("ELSE NULL END <= ?"));
    }

    #[test]
    fn test_invalid_number_pattern() {
        let options = RangeOptions {
            number_pattern: "(".into(),
            ..RangeOptions::default()
        };
        assert!(matches!(
            RangeStrategy::new("range", options),
            Err(ConfigError::InvalidOptions { .. })
        ));
    }

    #[test]
    fn test_options_from_json() {
        let mut options = Map::new();
        options.insert("betweenInfix".into(), JsonValue::from(" - "));
        options.insert("conversionNumDigits".into(), JsonValue::from(12));
        assert!(RangeStrategy::from_options("range", &options).is_ok());

        options.insert("betwenInfix".into(), JsonValue::from(" - "));
        assert!(RangeStrategy::from_options("range", &options).is_err());
    }
}
