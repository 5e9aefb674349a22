//! Tests for splitting, strategy dispatch and combination

use crate::common::{CAST, COLUMN, compile, num, plain_config, render};
use filters::{Compiler, FilterConfig, StrategyDescriptor};
use indexmap::IndexMap;
use model::core::value::Value;

#[tokio::test]
async fn test_ranges_and_exact_match() {
    let config = plain_config("mysql");
    let (sql, params) = render(r#">=10 & <100 | "special""#, &config).await.unwrap();

    assert_eq!(
        sql,
        format!("(({CAST} >= ? AND {CAST} < ?) OR price IN (?))")
    );
    assert_eq!(params, vec![num("10"), num("100"), Value::from("special")]);
}

#[tokio::test]
async fn test_tree_shape_follows_groups() {
    let tree = compile(r#">=10 & <100 | "special" | #a# & /b/"#, &plain_config("mysql")).await;
    let shape: Vec<usize> = tree.groups().iter().map(Vec::len).collect();
    assert_eq!(shape, vec![2, 1, 2]);
    assert_eq!(tree.params().len(), 5);
}

#[tokio::test]
async fn test_empty_expression_means_no_filtering() {
    let config = plain_config("mysql");
    for expression in ["", "  ", "| |", "&"] {
        let tree = compile(expression, &config).await;
        assert!(tree.is_empty(), "{expression:?}");
        assert!(render(expression, &config).await.is_none());
    }
}

#[tokio::test]
async fn test_escaped_delimiters_reach_the_catch_all() {
    let config = plain_config("mysql");
    let (sql, params) = render(r"a\|b|c", &config).await.unwrap();
    assert_eq!(sql, "(price LIKE ? OR price LIKE ?)");
    assert_eq!(params, vec![Value::from("%a|b%"), Value::from("%c%")]);

    let (_, params) = render(r"a\\|b", &config).await.unwrap();
    assert_eq!(params, vec![Value::from("%a\\\\%"), Value::from("%b%")]);
}

#[tokio::test]
async fn test_blank_catch_all_group_lifts_restriction() {
    // `!` alone is a negated empty segment, which matches every row
    let config = plain_config("mysql");
    let tree = compile(r#""x" | !"#, &config).await;
    assert_eq!(tree.groups().len(), 2);
    assert!(tree.condition().is_none());
}

#[tokio::test]
async fn test_custom_delimiters() {
    let mut config = plain_config("mysql");
    config.or_delimiter = " or ".into();
    config.and_delimiter = ",".into();
    config.invert_logic_prefix = "not(".into();
    config.invert_logic_suffix = ")".into();

    let (sql, _) = render(r#"NOT("a") , >1 OR #b#"#, &config).await.unwrap();
    assert_eq!(sql, format!("((price NOT IN (?) AND {CAST} > ?) OR price LIKE ?)"));
}

fn ordered(names: &[&str]) -> FilterConfig {
    let defaults = FilterConfig::default();
    let filter_config: IndexMap<String, StrategyDescriptor> = names
        .iter()
        .map(|name| (name.to_string(), defaults.filter_config[*name].clone()))
        .collect();

    FilterConfig {
        filter_config,
        ..FilterConfig::default().with_dialect("mysql")
    }
}

#[tokio::test]
async fn test_priority_not_declaration_order_decides() {
    let forward = ordered(&["range", "exact", "substring", "regex", "default"]);
    let reversed = ordered(&["default", "regex", "substring", "exact", "range"]);
    let compiler = Compiler::default();

    for expression in [r#"1 to 2 | "q" | #s# | /r/ | plain"#, "!>=3 & #x#"] {
        let a = compiler.compile(COLUMN, expression, &forward, None).await.unwrap();
        let b = compiler.compile(COLUMN, expression, &reversed, None).await.unwrap();
        assert_eq!(a, b, "{expression}");
    }
}

#[tokio::test]
async fn test_catch_all_outranking_everything_takes_all_segments() {
    let mut config = plain_config("mysql");
    config.filter_config["default"].priority = -1;

    let (sql, params) = render(r#"">=1""#, &config).await.unwrap();
    assert_eq!(sql, "price LIKE ?");
    assert_eq!(params, vec![Value::from("%\">=1\"%")]);
}

#[tokio::test]
async fn test_deactivated_strategy_passes_segments_on() {
    let mut config = plain_config("mysql");
    config.filter_config["exact"].active = false;
    config.filter_config["default"].active = false;

    let (sql, params) = render(r#""foo""#, &config).await.unwrap();
    assert_eq!(sql, "price LIKE ?");
    assert_eq!(params, vec![Value::from("%\"foo\"%")]);
}

#[tokio::test]
async fn test_repeated_segments_share_parameters() {
    let config = plain_config("mysql");
    let tree = compile(r#""a" | "a" & "b""#, &config).await;
    assert_eq!(tree.params().len(), 2);

    let (sql, params) = render(r#""a" | "a" & "b""#, &config).await.unwrap();
    assert_eq!(sql, "(price IN (?) OR (price IN (?) AND price IN (?)))");
    assert_eq!(params.len(), 3);
}
