//! Tests for live pattern validation

use crate::common::{COLUMN, ScriptedConnection, plain_config};
use filters::{Compiler, FilterError};
use model::core::value::Value;
use query::connection::ProbeError;

#[tokio::test]
async fn test_valid_pattern_is_checked_once() {
    let conn = ScriptedConnection::new("mysql", || Ok(()));
    let config = plain_config("mysql");

    let tree = Compiler::default()
        .compile(COLUMN, "/^a+$/", &config, Some(&conn))
        .await
        .unwrap();

    assert_eq!(
        conn.probes(),
        vec![("SELECT '1' REGEXP ?".to_string(), vec![Value::from("^a+$")])]
    );

    let (sql, params) = tree.render(&query::dialect::mysql::MySql).unwrap().unwrap();
    assert_eq!(sql, "price REGEXP ?");
    assert_eq!(params, vec![Value::from("^a+$")]);
}

#[tokio::test]
async fn test_rejected_pattern_falls_through_to_catch_all() {
    let conn = ScriptedConnection::new("mysql", || Err(ProbeError::Rejected("syntax".into())));
    let config = plain_config("mysql");

    let tree = Compiler::default()
        .compile(COLUMN, "/[a/", &config, Some(&conn))
        .await
        .unwrap();

    let (sql, params) = tree.render(&query::dialect::mysql::MySql).unwrap().unwrap();
    assert_eq!(sql, "price LIKE ?");
    assert_eq!(params, vec![Value::from("%/[a/%")]);
}

#[tokio::test]
async fn test_unreachable_database_aborts_compilation() {
    let conn = ScriptedConnection::new("pgsql", || Err(ProbeError::Unavailable("timeout".into())));
    let config = plain_config("postgres");

    let result = Compiler::default()
        .compile(COLUMN, r#""ok" | /x/"#, &config, Some(&conn))
        .await;

    assert!(matches!(result, Err(FilterError::RegexValidation(_))));
    assert_eq!(conn.probes()[0].0, "SELECT '1' ~ $1");
}

#[tokio::test]
async fn test_no_probe_without_regex_segments() {
    let conn = ScriptedConnection::new("mysql", || Err(ProbeError::Unavailable("down".into())));
    let config = plain_config("mysql");

    let result = Compiler::default()
        .compile(COLUMN, r#">1 & "a" | #b# | c"#, &config, Some(&conn))
        .await;

    assert!(result.is_ok());
    assert!(conn.probes().is_empty());
}
