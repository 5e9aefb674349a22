//! Tests for inverted segments

use crate::common::{CAST, compile, num, plain_config, render};
use filters::FilterConfig;
use model::core::value::Value;
use query::ast::condition::{CompareOp, Condition};

#[tokio::test]
async fn test_negated_lower_bound() {
    let config = plain_config("mysql");

    let (sql, params) = render(">=10", &config).await.unwrap();
    assert_eq!(sql, format!("{CAST} >= ?"));
    assert_eq!(params, vec![num("10")]);

    let (sql, _) = render("!>=10", &config).await.unwrap();
    assert_eq!(sql, format!("{CAST} < ?"));
}

#[tokio::test]
async fn test_negated_between() {
    let config = plain_config("mysql");

    let (sql, params) = render("1 to 5", &config).await.unwrap();
    assert_eq!(sql, format!("({CAST} >= ? AND {CAST} <= ?)"));
    assert_eq!(params, vec![num("1"), num("5")]);

    let (sql, params) = render("!1 to 5", &config).await.unwrap();
    assert_eq!(sql, format!("({CAST} < ? OR {CAST} > ?)"));
    assert_eq!(params, vec![num("1"), num("5")]);
}

#[tokio::test]
async fn test_exact_in_and_not_in() {
    let config = plain_config("mysql");

    let (sql, params) = render(r#""foo""#, &config).await.unwrap();
    assert_eq!(sql, "price IN (?)");
    assert_eq!(params, vec![Value::from("foo")]);

    let (sql, params) = render(r#"!"foo""#, &config).await.unwrap();
    assert_eq!(sql, "price NOT IN (?)");
    assert_eq!(params, vec![Value::from("foo")]);
}

#[tokio::test]
async fn test_negated_substring_is_one_fragment() {
    let tree = compile("!#abc#", &plain_config("mysql")).await;

    assert_eq!(tree.groups().len(), 1);
    assert_eq!(tree.groups()[0].len(), 1);

    let fragment = &tree.groups()[0][0];
    assert!(matches!(
        fragment.condition,
        Condition::Compare { op: CompareOp::NotLike, .. }
    ));
    let bound: Vec<&Value> = fragment.params.iter().map(|(_, v)| v).collect();
    assert_eq!(bound, vec![&Value::from("%abc%")]);
}

#[tokio::test]
async fn test_empty_substring_matches_every_row() {
    let config = plain_config("mysql");
    for expression in ["##", "!##"] {
        assert!(render(expression, &config).await.is_none());
    }

    let (sql, params) = render(r#"!## & "foo""#, &config).await.unwrap();
    assert_eq!(sql, "price IN (?)");
    assert_eq!(params, vec![Value::from("foo")]);
}

#[tokio::test]
async fn test_negation_marker_with_whitespace() {
    let config = plain_config("mysql");
    let (sql, _) = render(r#"! "foo""#, &config).await.unwrap();
    assert_eq!(sql, "price NOT IN (?)");
}

#[tokio::test]
async fn test_disabled_negation_keeps_marker() {
    let mut config = plain_config("mysql");
    config.invert_logic_prefix = String::new();

    let (sql, params) = render("!abc", &config).await.unwrap();
    assert_eq!(sql, "price LIKE ?");
    assert_eq!(params, vec![Value::from("%!abc%")]);
}

#[tokio::test]
async fn test_null_fallback_excludes_non_numeric_rows_both_ways() {
    // Non-numeric values become NULL, and a comparison with NULL is never
    // true, negated or not.
    let config = FilterConfig::default().with_dialect("mysql");
    let guarded = "CASE WHEN COALESCE(price, '') REGEXP '^-?[0-9]*[.]?[0-9]+$' \
                   THEN CAST(COALESCE(price, '') AS DECIMAL(20, 4)) ELSE NULL END";

    let (sql, _) = render(">5", &config).await.unwrap();
    assert_eq!(sql, format!("{guarded} > ?"));

    let (sql, _) = render("!>5", &config).await.unwrap();
    assert_eq!(sql, format!("{guarded} <= ?"));
}

#[tokio::test]
async fn test_zero_fallback_skips_guard() {
    let config = plain_config("mysql");
    let (sql, _) = render("!<0", &config).await.unwrap();
    assert_eq!(sql, format!("{CAST} >= ?"));
}
