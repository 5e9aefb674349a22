use connectors::error::ConnectorError;
use filters::FilterError;
use query::{connection::ProbeError, error::QueryError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("Failed to read the configuration file: {0}")]
    ConfigFileRead(#[from] std::io::Error),

    #[error("Failed to deserialize the configuration file as JSON: {0}")]
    ConfigDeserialize(#[from] serde_json::Error),

    #[error("Failed to serialize data to JSON: {0}")]
    JsonSerialize(serde_json::Error),

    #[error("Failed to compile the filter expression: {0}")]
    Compile(#[from] FilterError),

    #[error("Failed to render the condition: {0}")]
    Render(#[from] QueryError),

    #[error("Connection error: {0}")]
    Connector(#[from] ConnectorError),

    #[error("Connection test failed: {0}")]
    Probe(#[from] ProbeError),
}
