//! Filter strategies: each recognizes one segment syntax and turns an accepted
//! segment into a condition fragment.

use crate::error::{ConfigError, FilterError};
use async_trait::async_trait;
use query::{
    ast::expr::Expr, connection::LiveConnection, dialect::DialectAdapter,
    fragment::ConditionFragment,
};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value as JsonValue};

pub mod default;
pub mod exact;
pub mod range;
pub mod regex;
pub mod registry;
pub mod substring;

/// One segment offered to a strategy, with everything needed to build its
/// fragment.
#[derive(Clone, Copy)]
pub struct SegmentInput<'a> {
    /// Column or SQL expression being filtered.
    pub column: &'a str,

    /// Segment text with any negation wrapper already removed.
    pub text: &'a str,

    pub negate: bool,
    pub dialect: &'a dyn DialectAdapter,
    pub connection: Option<&'a dyn LiveConnection>,
}

impl<'a> SegmentInput<'a> {
    /// The column reference, coalesced to an empty string when requested.
    pub fn column_expr(&self, treat_null_as_empty: bool) -> Expr {
        let column = Expr::column(self.column);
        if treat_null_as_empty {
            self.dialect.null_to_empty(column)
        } else {
            column
        }
    }
}

#[async_trait]
pub trait FilterStrategy: Send + Sync {
    /// Registered kind, e.g. `range`.
    fn kind(&self) -> &'static str;

    /// Parses `input` once. Returns the fragment when the segment is in this
    /// strategy's syntax, or `None` to pass it down the chain.
    async fn accept(
        &self,
        input: &SegmentInput<'_>,
    ) -> Result<Option<ConditionFragment>, FilterError>;
}

/// Deserializes strategy options, reporting failures against the filter name.
pub fn parse_options<T: DeserializeOwned>(
    name: &str,
    options: &Map<String, JsonValue>,
) -> Result<T, ConfigError> {
    serde_json::from_value(JsonValue::Object(options.clone())).map_err(|e| {
        ConfigError::InvalidOptions {
            name: name.to_string(),
            message: e.to_string(),
        }
    })
}

/// Escapes LIKE wildcards and the escape character itself, then wraps the
/// result in `%` for a substring match.
pub fn like_pattern(text: &str) -> String {
    let mut pattern = String::with_capacity(text.len() + 2);
    pattern.push('%');
    for c in text.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}
