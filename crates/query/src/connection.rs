//! The seam between dialect adapters and a live database.

use async_trait::async_trait;
use model::core::value::Value;
use thiserror::Error;

/// Outcome of a failed probe statement.
#[derive(Debug, Error)]
pub enum ProbeError {
    /// The server received the statement and refused it, e.g. a syntax error
    /// in a bound pattern.
    #[error("Statement rejected: {0}")]
    Rejected(String),

    /// The server could not be reached or the connection failed mid-flight.
    #[error("Connection unavailable: {0}")]
    Unavailable(String),
}

/// A database connection able to run a throwaway statement.
#[async_trait]
pub trait LiveConnection: Send + Sync {
    /// Driver name, e.g. `mysql` or `pgsql`, used to pick a dialect when none
    /// is configured.
    fn driver_name(&self) -> &str;

    /// Executes `sql` with positional `params` and discards any result.
    async fn probe(&self, sql: &str, params: &[Value]) -> Result<(), ProbeError>;
}
