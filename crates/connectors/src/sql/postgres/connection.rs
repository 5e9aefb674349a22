use crate::{
    error::ConnectorError,
    sql::postgres::{params::PgParamStore, utils::connect_client},
};
use async_trait::async_trait;
use model::core::value::Value;
use query::connection::{LiveConnection, ProbeError};
use std::sync::Arc;
use tokio_postgres::Client;
use tracing::debug;

#[derive(Clone)]
pub struct PgConnection {
    client: Arc<Client>,
}

impl PgConnection {
    pub async fn connect(url: &str) -> Result<Self, ConnectorError> {
        let client = connect_client(url).await?;
        Ok(Self {
            client: Arc::new(client),
        })
    }
}

/// Errors carrying a server response mean the statement was refused.
pub(crate) fn classify(err: tokio_postgres::Error) -> ProbeError {
    match err.as_db_error() {
        Some(db) => ProbeError::Rejected(format!("{} ({})", db.message(), db.code().code())),
        None => ProbeError::Unavailable(err.to_string()),
    }
}

#[async_trait]
impl LiveConnection for PgConnection {
    fn driver_name(&self) -> &str {
        "pgsql"
    }

    async fn probe(&self, sql: &str, params: &[Value]) -> Result<(), ProbeError> {
        debug!(sql, "Running Postgres probe");

        let store = PgParamStore::from_values(params)
            .map_err(|e| ProbeError::Unavailable(e.to_string()))?;
        self.client
            .execute(sql, &store.as_refs())
            .await
            .map(|_| ())
            .map_err(classify)
    }
}
