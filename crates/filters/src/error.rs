use query::error::QueryError;
use thiserror::Error;

/// Errors raised while compiling a filter expression.
#[derive(Debug, Error)]
pub enum FilterError {
    /// The configuration can't be used; fatal and not retried.
    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigError),

    /// A live regex check could not reach the database.
    #[error("Regex validation failed: {0}")]
    RegexValidation(QueryError),

    /// Any other query-layer failure.
    #[error("Query error: {0}")]
    Query(QueryError),
}

impl From<QueryError> for FilterError {
    fn from(err: QueryError) -> Self {
        match err {
            QueryError::UnknownDialect(id) => {
                FilterError::Configuration(ConfigError::UnknownDialect(id))
            }
            QueryError::ProbeUnavailable { .. } => FilterError::RegexValidation(err),
            other => FilterError::Query(other),
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("No dialect adapter registered for '{0}'")]
    UnknownDialect(String),

    #[error("No dialect available for driver '{0}'")]
    UnsupportedDriver(String),

    #[error("No dialect configured and no connection to infer one from")]
    MissingDialect,

    #[error("Filter '{name}' uses unknown strategy kind '{kind}'")]
    UnknownStrategyKind { name: String, kind: String },

    #[error("Invalid options for filter '{name}': {message}")]
    InvalidOptions { name: String, message: String },
}
