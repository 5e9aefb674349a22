//! In-memory connections for exercising dialect probes without a database.

use crate::connection::{LiveConnection, ProbeError};
use async_trait::async_trait;
use model::core::value::Value;
use std::sync::{Mutex, PoisonError};

/// Answers every probe with a fixed outcome and records what it was asked.
pub struct ScriptedConnection {
    driver: &'static str,
    outcome: fn() -> Result<(), ProbeError>,
    probes: Mutex<Vec<(String, Vec<Value>)>>,
}

impl ScriptedConnection {
    pub fn new(driver: &'static str, outcome: fn() -> Result<(), ProbeError>) -> Self {
        Self {
            driver,
            outcome,
            probes: Mutex::new(Vec::new()),
        }
    }

    /// Statements and their bound values, in the order they ran.
    pub fn probes(&self) -> Vec<(String, Vec<Value>)> {
        self.probes
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn statements(&self) -> Vec<String> {
        self.probes().into_iter().map(|(sql, _)| sql).collect()
    }
}

#[async_trait]
impl LiveConnection for ScriptedConnection {
    fn driver_name(&self) -> &str {
        self.driver
    }

    async fn probe(&self, sql: &str, params: &[Value]) -> Result<(), ProbeError> {
        self.probes
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((sql.to_string(), params.to_vec()));
        (self.outcome)()
    }
}
