use thiserror::Error;

/// Errors coming from the query layer.
#[derive(Debug, Error)]
pub enum QueryError {
    /// No adapter is registered for the requested dialect.
    #[error("No dialect adapter registered for '{0}'")]
    UnknownDialect(String),

    /// The live connection could not be reached to validate a pattern.
    #[error("{dialect} connection unavailable while validating pattern: {reason}")]
    ProbeUnavailable { dialect: String, reason: String },

    /// A condition references a parameter with no binding.
    #[error("Unbound parameter: {0}")]
    UnknownParam(String),
}
