use crate::{error::ConnectorError, sql::mysql::params::MySqlParamStore};
use async_trait::async_trait;
use model::core::value::Value;
use mysql_async::{Opts, Pool, prelude::Queryable};
use query::connection::{LiveConnection, ProbeError};
use tracing::{debug, error};

/// A MySQL or MariaDB connection pool. Connections are opened on first probe.
#[derive(Clone)]
pub struct MySqlConnection {
    pool: Pool,
}

impl MySqlConnection {
    pub fn connect(url: &str) -> Result<Self, ConnectorError> {
        let opts = Opts::from_url(url).map_err(|e| {
            error!("MySQL connection string parse failed: {}", e);
            ConnectorError::MySql(mysql_async::Error::Url(e))
        })?;
        Ok(Self {
            pool: Pool::new(opts),
        })
    }
}

/// Errors reported by the server mean it refused the statement; anything
/// else means it could not be asked.
pub(crate) fn classify(err: mysql_async::Error) -> ProbeError {
    match err {
        mysql_async::Error::Server(server) => {
            ProbeError::Rejected(format!("{} ({})", server.message, server.code))
        }
        other => ProbeError::Unavailable(other.to_string()),
    }
}

#[async_trait]
impl LiveConnection for MySqlConnection {
    fn driver_name(&self) -> &str {
        "mysql"
    }

    async fn probe(&self, sql: &str, params: &[Value]) -> Result<(), ProbeError> {
        debug!(sql, "Running MySQL probe");

        let mut conn = self.pool.get_conn().await.map_err(|e| {
            error!("MySQL connection failed: {}", e);
            classify(e)
        })?;

        conn.exec_drop(sql, MySqlParamStore::from_values(params).params())
            .await
            .map_err(classify)
    }
}
