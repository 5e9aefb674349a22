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

/// Matches strings MySQL can cast to a decimal without truncation warnings.
const NUMERIC_PATTERN: &str = "^-?[0-9]*[.]?[0-9]+$";

/// MySQL and MariaDB. `REGEXP` gives full regular expression support; with the
/// default collations both `LIKE` and `REGEXP` match case-insensitively.
#[derive(Debug, Clone, Copy, Default)]
pub struct MySql;

#[async_trait]
impl DialectAdapter for MySql {
    fn name(&self) -> &'static str {
        "MySQL"
    }

    fn get_placeholder(&self, _index: usize) -> String {
        // MySQL uses ?
        "?".into()
    }

    fn cast_to_decimal(
        &self,
        expr: Expr,
        num_digits: u32,
        decimal_places: u32,
        fallback: Option<i64>,
    ) -> Expr {
        let data_type = format!("DECIMAL({num_digits}, {decimal_places})");

        // A plain CAST already yields zero for non-numeric strings
        if fallback == Some(0) {
            return expr.cast(&data_type);
        }

        let looks_numeric =
            Condition::compare(expr.clone(), CompareOp::Regexp, Expr::string(NUMERIC_PATTERN));
        Expr::case(looks_numeric, expr.cast(&data_type), Expr::fallback(fallback))
    }

    fn regex_probe_sql(&self) -> &'static str {
        "SELECT '1' REGEXP ?"
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
        ConditionFragment::new(Condition::compare(column, op, Expr::param(param)), params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fragment::ConditionTree;

    fn render(fragment: ConditionFragment) -> (String, Vec<Value>) {
        let mut tree = ConditionTree::new();
        tree.push_group(vec![fragment]);
        tree.render(&MySql).unwrap().unwrap()
    }

    #[test]
    fn test_cast_with_zero_fallback_is_plain_cast() {
        let expr = MySql.cast_to_decimal(Expr::column("amount"), 20, 4, Some(0));
        assert_eq!(expr, Expr::column("amount").cast("DECIMAL(20, 4)"));
    }

    #[test]
    fn test_cast_with_null_fallback_is_guarded() {
        let expr = MySql.cast_to_decimal(Expr::column("amount"), 10, 2, None);
        let fragment = ConditionFragment::new(
            Condition::compare(expr, CompareOp::Gt, Expr::literal("0")),
            Params::new(),
        );
        let (sql, _) = render(fragment);
        assert_eq!(
            sql,
            "CASE WHEN amount REGEXP '^-?[0-9]*[.]?[0-9]+$' THEN CAST(amount AS DECIMAL(10, 2)) ELSE NULL END > 0"
        );
    }

    #[test]
    fn test_cast_with_integer_fallback() {
        let expr = MySql.cast_to_decimal(Expr::column("amount"), 10, 2, Some(-1));
        match expr {
            Expr::Case { otherwise, .. } => assert_eq!(*otherwise, Expr::literal("-1")),
            other => panic!("unexpected expression: {other:?}"),
        }
    }

    #[test]
    fn test_regex_fragment() {
        let (sql, params) =
            render(MySql.build_regex_fragment(Expr::column("code"), "^A", false, "re"));
        assert_eq!(sql, "code REGEXP ?");
        assert_eq!(params, vec![Value::from("^A")]);

        let (sql, _) = render(MySql.build_regex_fragment(Expr::column("code"), "^A", true, "re"));
        assert_eq!(sql, "code NOT REGEXP ?");
    }
}
