use thiserror::Error;

/// Errors happening during connection setup.
#[derive(Debug, Error)]
pub enum ConnectorError {
    /// The URL could not be parsed.
    #[error("Invalid connection URL: {0}")]
    InvalidUrl(String),

    /// The URL names an engine without a connector.
    #[error("Unsupported database scheme: {0}")]
    UnsupportedScheme(String),

    /// MySQL driver error.
    #[error("MySQL error: {0}")]
    MySql(#[from] mysql_async::Error),

    /// PostgreSQL driver error.
    #[error("PostgreSQL error: {0}")]
    Postgres(#[from] tokio_postgres::Error),

    /// A value that cannot be bound as a driver parameter.
    #[error("Unsupported parameter value: {0}")]
    UnsupportedParam(String),

    /// TLS setup failed.
    #[error("TLS error: {0}")]
    Tls(#[from] native_tls::Error),
}
