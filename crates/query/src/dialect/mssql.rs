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

/// Microsoft SQL Server before 2012.
///
/// There is no regular expression operator, so patterns use the `PATINDEX`
/// wildcard subset: `%`, `_`, `[abc]`, `[a-z]` and `[^abc]`. A pattern must
/// cover the whole value unless it starts and ends with `%`.
#[derive(Debug, Clone, Copy, Default)]
pub struct MsSql;

#[async_trait]
impl DialectAdapter for MsSql {
    fn name(&self) -> &'static str {
        "SQL Server"
    }

    fn get_placeholder(&self, index: usize) -> String {
        format!("@P{}", index + 1)
    }

    fn like_escape_clause(&self) -> Option<&'static str> {
        Some(r"ESCAPE '\'")
    }

    fn cast_to_decimal(
        &self,
        expr: Expr,
        num_digits: u32,
        decimal_places: u32,
        fallback: Option<i64>,
    ) -> Expr {
        // ISNUMERIC accepts currency symbols and exponents on their own;
        // appending 'e0' rejects anything that already has an exponent.
        let looks_numeric = Condition::and(vec![
            Condition::compare(
                Expr::call("LEN", vec![expr.clone()]),
                CompareOp::LtEq,
                Expr::literal(num_digits.to_string()),
            ),
            Condition::compare(
                Expr::call(
                    "ISNUMERIC",
                    vec![Expr::call("CONCAT", vec![expr.clone(), Expr::string("e0")])],
                ),
                CompareOp::Eq,
                Expr::literal("1"),
            ),
        ]);

        Expr::case(
            looks_numeric,
            expr.cast(&format!("DECIMAL({num_digits}, {decimal_places})")),
            Expr::fallback(fallback),
        )
    }

    fn regex_probe_sql(&self) -> &'static str {
        "SELECT PATINDEX(@P1, '1')"
    }

    fn build_regex_fragment(
        &self,
        column: Expr,
        pattern: &str,
        negate: bool,
        param: &str,
    ) -> ConditionFragment {
        patindex_fragment(column, pattern, negate, param)
    }
}

fn patindex_fragment(column: Expr, pattern: &str, negate: bool, param: &str) -> ConditionFragment {
    // PATINDEX returns 0 when there is no match
    let op = if negate { CompareOp::Eq } else { CompareOp::Gt };

    let mut params = Params::new();
    params.insert(param, Value::from(pattern));
    ConditionFragment::new(
        Condition::compare(
            Expr::call("PATINDEX", vec![Expr::param(param), column]),
            op,
            Expr::literal("0"),
        ),
        params,
    )
}

/// SQL Server 2012 and later, which has `TRY_CAST`.
#[derive(Debug, Clone, Copy, Default)]
pub struct MsSql2012;

#[async_trait]
impl DialectAdapter for MsSql2012 {
    fn name(&self) -> &'static str {
        "SQL Server 2012"
    }

    fn get_placeholder(&self, index: usize) -> String {
        MsSql.get_placeholder(index)
    }

    fn like_escape_clause(&self) -> Option<&'static str> {
        MsSql.like_escape_clause()
    }

    fn cast_to_decimal(
        &self,
        expr: Expr,
        num_digits: u32,
        decimal_places: u32,
        fallback: Option<i64>,
    ) -> Expr {
        // TRY_CAST already yields NULL for anything it can't convert
        let cast = expr.try_cast(&format!("DECIMAL({num_digits}, {decimal_places})"));
        match fallback {
            Some(_) => Expr::call("COALESCE", vec![cast, Expr::fallback(fallback)]),
            None => cast,
        }
    }

    fn regex_probe_sql(&self) -> &'static str {
        MsSql.regex_probe_sql()
    }

    fn build_regex_fragment(
        &self,
        column: Expr,
        pattern: &str,
        negate: bool,
        param: &str,
    ) -> ConditionFragment {
        patindex_fragment(column, pattern, negate, param)
    }
}
