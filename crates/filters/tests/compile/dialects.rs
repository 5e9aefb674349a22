//! Tests for dialect selection and dialect-specific SQL

use crate::common::{COLUMN, ScriptedConnection, num, plain_config, render};
use filters::{Compiler, ConfigError, FilterConfig, FilterError};
use model::core::value::Value;

#[tokio::test]
async fn test_postgres_uses_ilike_and_numbered_placeholders() {
    let config = plain_config("postgres");
    let (sql, params) = render(r#""foo" | !#b_r#"#, &config).await.unwrap();

    assert_eq!(sql, "(price IN ($1) OR price NOT ILIKE $2)");
    assert_eq!(params, vec![Value::from("foo"), Value::from("%b\\_r%")]);
}

#[tokio::test]
async fn test_postgres_null_coalescing_casts_to_text() {
    let config = FilterConfig::default().with_dialect("postgres");
    let (sql, _) = render("#x#", &config).await.unwrap();
    assert_eq!(sql, "COALESCE(CAST(price AS TEXT), '') ILIKE $1");
}

#[tokio::test]
async fn test_mssql_like_declares_escape() {
    let config = plain_config("mssql");
    let (sql, params) = render("#50%#", &config).await.unwrap();

    assert_eq!(sql, r"price LIKE @P1 ESCAPE '\'");
    assert_eq!(params, vec![Value::from("%50\\%%")]);
}

#[tokio::test]
async fn test_mssql_regex_uses_patindex() {
    let config = plain_config("mssql");

    let (sql, _) = render("/%[0-9]%/", &config).await.unwrap();
    assert_eq!(sql, "PATINDEX(@P1, price) > 0");

    let (sql, _) = render("!/%[0-9]%/", &config).await.unwrap();
    assert_eq!(sql, "PATINDEX(@P1, price) = 0");
}

#[tokio::test]
async fn test_mssql2012_uses_try_cast() {
    let config = plain_config("mssql2012");
    let (sql, params) = render(">1", &config).await.unwrap();

    assert_eq!(sql, "COALESCE(TRY_CAST(price AS DECIMAL(20, 4)), 0) > @P1");
    assert_eq!(params, vec![num("1")]);
}

#[tokio::test]
async fn test_dialect_from_connection_driver() {
    let compiler = Compiler::default();
    let config = FilterConfig::default();
    let conn = ScriptedConnection::new("sqlsrv", || Ok(()));

    let dialect = compiler.dialect(&config, Some(&conn)).unwrap();
    assert_eq!(dialect.name(), "SQL Server");

    let tree = compiler
        .compile(COLUMN, "#a#", &config, Some(&conn))
        .await
        .unwrap();
    let (sql, _) = tree.render(dialect.as_ref()).unwrap().unwrap();
    assert_eq!(sql, r"COALESCE(price, '') LIKE @P1 ESCAPE '\'");
}

#[tokio::test]
async fn test_driver_without_dialect_is_configuration_error() {
    let conn = ScriptedConnection::new("sqlite", || Ok(()));
    let result = Compiler::default()
        .compile(COLUMN, "a", &FilterConfig::default(), Some(&conn))
        .await;

    assert!(matches!(
        result,
        Err(FilterError::Configuration(ConfigError::UnsupportedDriver(ref d))) if d == "sqlite"
    ));
}

#[tokio::test]
async fn test_dialect_identifier_is_case_insensitive() {
    let config = plain_config(" MySQL ");
    assert!(render("a", &config).await.is_some());
}
