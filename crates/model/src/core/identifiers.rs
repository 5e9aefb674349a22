use serde::{Deserialize, Serialize};
use std::{fmt, sync::Arc};

/// Identifier of a SQL dialect, e.g. `mysql` or `postgres`.
///
/// Identifiers compare case-insensitively; they are stored lowercased.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct DialectId(Arc<str>);

impl DialectId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(Arc::from(id.into().trim().to_lowercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for DialectId {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<&str> for DialectId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<DialectId> for String {
    fn from(id: DialectId) -> Self {
        id.0.to_string()
    }
}

impl fmt::Display for DialectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
