//! Live database connections used to validate filter patterns.

use crate::{
    error::ConnectorError,
    sql::{mysql::connection::MySqlConnection, postgres::connection::PgConnection},
};
use query::connection::LiveConnection;
use tracing::info;

pub mod error;
pub mod sql;

/// Database engine named by a connection URL scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatabaseKind {
    MySql,
    Postgres,
}

impl DatabaseKind {
    pub fn from_url(url: &str) -> Result<Self, ConnectorError> {
        let (scheme, _) = url
            .split_once("://")
            .ok_or_else(|| ConnectorError::InvalidUrl(url.to_string()))?;

        match scheme.to_lowercase().as_str() {
            "mysql" | "mariadb" => Ok(DatabaseKind::MySql),
            "pg" | "postgres" | "postgresql" => Ok(DatabaseKind::Postgres),
            other => Err(ConnectorError::UnsupportedScheme(other.to_string())),
        }
    }
}

/// Opens a connection for the engine named by the URL scheme.
pub async fn connect(url: &str) -> Result<Box<dyn LiveConnection>, ConnectorError> {
    let kind = DatabaseKind::from_url(url)?;
    info!(?kind, "Opening live connection");

    match kind {
        DatabaseKind::MySql => Ok(Box::new(MySqlConnection::connect(url)?)),
        DatabaseKind::Postgres => Ok(Box::new(PgConnection::connect(url).await?)),
    }
}
