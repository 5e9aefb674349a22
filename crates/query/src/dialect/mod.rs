//! Defines the `DialectAdapter` trait for database-specific SQL syntax.
//!
//! Filter strategies never spell engine-specific SQL themselves. Anything that
//! differs between engines (null handling, safe numeric casts, regular
//! expressions, placeholders) goes through an adapter.

use crate::{
    ast::{
        condition::CompareOp,
        expr::Expr,
    },
    connection::{LiveConnection, ProbeError},
    error::QueryError,
    fragment::ConditionFragment,
};
use async_trait::async_trait;
use model::core::value::Value;
use tracing::debug;

pub mod mssql;
pub mod mysql;
pub mod postgres;
pub mod registry;

#[async_trait]
pub trait DialectAdapter: Send + Sync {
    /// Returns the name of the dialect (e.g., "PostgreSQL", "MySQL").
    fn name(&self) -> &'static str;

    /// Returns the placeholder for a parameterized query.
    ///
    /// - PostgreSQL uses `$1`, `$2`, etc.
    /// - MySQL uses `?`
    /// - SQL Server uses `@P1`, `@P2`, etc.
    fn get_placeholder(&self, index: usize) -> String;

    /// Spells a comparison operator. `Like` is expected to match
    /// case-insensitively.
    fn compare_operator(&self, op: CompareOp) -> &'static str {
        op.as_sql()
    }

    /// Trailing clause naming `\` as the LIKE escape character, for engines
    /// that have no default escape.
    fn like_escape_clause(&self) -> Option<&'static str> {
        None
    }

    /// Alters an expression so that NULL becomes an empty string.
    fn null_to_empty(&self, expr: Expr) -> Expr {
        Expr::call("COALESCE", vec![expr, Expr::string("")])
    }

    /// Alters an expression so that an empty string becomes NULL.
    fn empty_to_null(&self, expr: Expr) -> Expr {
        Expr::call("NULLIF", vec![expr, Expr::string("")])
    }

    /// Converts an expression to a decimal with `num_digits` total digits and
    /// `decimal_places` after the point.
    ///
    /// Values that don't look numeric become `fallback` (an integer, or NULL
    /// when `None`). The resulting expression must never make the enclosing
    /// query fail on non-numeric input.
    fn cast_to_decimal(
        &self,
        expr: Expr,
        num_digits: u32,
        decimal_places: u32,
        fallback: Option<i64>,
    ) -> Expr;

    /// Statement used to test a pattern against the live database, with the
    /// pattern as its only parameter.
    fn regex_probe_sql(&self) -> &'static str;

    /// Checks that `pattern` is valid syntax for this engine.
    ///
    /// A pattern the server refuses yields `Ok(false)`. Failing to reach the
    /// server is an error. Without a connection no round-trip is made and the
    /// pattern is accepted.
    async fn check_regex_syntax(
        &self,
        connection: Option<&dyn LiveConnection>,
        pattern: &str,
    ) -> Result<bool, QueryError> {
        let Some(connection) = connection else {
            return Ok(true);
        };

        let params = [Value::from(pattern)];
        match connection.probe(self.regex_probe_sql(), &params).await {
            Ok(()) => Ok(true),
            Err(ProbeError::Rejected(reason)) => {
                debug!(dialect = self.name(), %pattern, %reason, "Pattern rejected by database");
                Ok(false)
            }
            Err(ProbeError::Unavailable(reason)) => Err(QueryError::ProbeUnavailable {
                dialect: self.name().to_string(),
                reason,
            }),
        }
    }

    /// Builds the condition matching `column` against `pattern`, bound to the
    /// parameter `param`. The adapter decides how negation is expressed.
    fn build_regex_fragment(
        &self,
        column: Expr,
        pattern: &str,
        negate: bool,
        param: &str,
    ) -> ConditionFragment;
}
