use crate::{
    ast::{
        condition::{CompareOp, Condition},
        expr::Expr,
    },
    dialect::DialectAdapter,
    fragment::{ConditionFragment, Params},
};
use async_trait::async_trait;
use model::core::value::Value;

const NUMERIC_PATTERN: &str = r"^\s*-?[0-9]*\.?[0-9]+\s*$";

/// PostgreSQL. Regular expressions use POSIX `~` (case-sensitive); `LIKE`
/// is spelled `ILIKE` so substring matches ignore case.
#[derive(Debug, Clone, Copy, Default)]
pub struct Postgres;

#[async_trait]
impl DialectAdapter for Postgres {
    fn name(&self) -> &'static str {
        "PostgreSQL"
    }

    fn get_placeholder(&self, index: usize) -> String {
        // PostgreSQL uses $1, $2, etc.
        format!("${}", index + 1)
    }

    fn compare_operator(&self, op: CompareOp) -> &'static str {
        match op {
            CompareOp::Like => "ILIKE",
            CompareOp::NotLike => "NOT ILIKE",
            CompareOp::Regexp => "~",
            CompareOp::NotRegexp => "!~",
            other => other.as_sql(),
        }
    }

    /// Casts to text first since `COALESCE` needs matching argument types.
    fn null_to_empty(&self, expr: Expr) -> Expr {
        Expr::call("COALESCE", vec![expr.cast("TEXT"), Expr::string("")])
    }

    fn empty_to_null(&self, expr: Expr) -> Expr {
        Expr::call("NULLIF", vec![expr.cast("TEXT"), Expr::string("")])
    }

    fn cast_to_decimal(
        &self,
        expr: Expr,
        num_digits: u32,
        decimal_places: u32,
        fallback: Option<i64>,
    ) -> Expr {
        let as_text = expr.cast("TEXT");
        let integer_digits = num_digits.saturating_sub(decimal_places);

        // Guard both the shape and the integer width so the cast can't overflow
        let looks_numeric = Condition::and(vec![
            Condition::compare(as_text.clone(), CompareOp::Regexp, Expr::string(NUMERIC_PATTERN)),
            Condition::compare(
                Expr::call(
                    "LENGTH",
                    vec![Expr::call(
                        "SPLIT_PART",
                        vec![
                            Expr::call("TRIM", vec![as_text.clone()]),
                            Expr::string("."),
                            Expr::literal("1"),
                        ],
                    )],
                ),
                CompareOp::LtEq,
                Expr::literal((integer_digits + 1).to_string()),
            ),
        ]);

        Expr::case(
            looks_numeric,
            as_text.cast(&format!("NUMERIC({num_digits}, {decimal_places})")),
            Expr::fallback(fallback),
        )
    }

    fn regex_probe_sql(&self) -> &'static str {
        "SELECT '1' ~ $1"
    }

    fn build_regex_fragment(
        &self,
        column: Expr,
        pattern: &str,
        negate: bool,
        param: &str,
    ) -> ConditionFragment {
        let op = if negate {
            CompareOp::NotRegexp
        } else {
            CompareOp::Regexp
        };

        let mut params = Params::new();
        params.insert(param, Value::from(pattern));
        ConditionFragment::new(
            Condition::compare(column.cast("TEXT"), op, Expr::param(param)),
            params,
        )
    }
}
