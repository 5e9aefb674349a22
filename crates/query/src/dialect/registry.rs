//! Lazily built, shared dialect adapters keyed by dialect identifier.

use crate::{
    dialect::{
        DialectAdapter,
        mssql::{MsSql, MsSql2012},
        mysql::MySql,
        postgres::Postgres,
    },
    error::QueryError,
};
use model::core::identifiers::DialectId;
use std::{
    collections::HashMap,
    sync::{Arc, PoisonError, RwLock},
};
use tracing::debug;

/// Constructor for an adapter.
pub type DialectFactory = fn() -> Arc<dyn DialectAdapter>;

/// Maps dialect identifiers to adapter factories and caches one adapter per
/// identifier. Adapters are stateless, so a racing first use that builds the
/// same adapter twice simply keeps whichever landed first.
pub struct DialectRegistry {
    factories: HashMap<DialectId, DialectFactory>,
    adapters: RwLock<HashMap<DialectId, Arc<dyn DialectAdapter>>>,
}

impl DialectRegistry {
    /// Creates an empty registry.
    pub fn empty() -> Self {
        Self {
            factories: HashMap::new(),
            adapters: RwLock::new(HashMap::new()),
        }
    }

    /// Creates a registry with the built-in dialects.
    pub fn new() -> Self {
        let mut registry = Self::empty();

        registry.register("mysql", || Arc::new(MySql));
        registry.register("postgres", || Arc::new(Postgres));
        registry.register("mssql", || Arc::new(MsSql));
        registry.register("mssql2012", || Arc::new(MsSql2012));

        registry
    }

    pub fn register(&mut self, id: impl Into<DialectId>, factory: DialectFactory) {
        let id = id.into();
        self.adapters
            .get_mut()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&id);
        self.factories.insert(id, factory);
    }

    pub fn contains(&self, id: &DialectId) -> bool {
        self.factories.contains_key(id)
    }

    /// Returns the shared adapter for `id`, building it on first use.
    pub fn get(&self, id: &DialectId) -> Result<Arc<dyn DialectAdapter>, QueryError> {
        {
            let adapters = self.adapters.read().unwrap_or_else(PoisonError::into_inner);
            if let Some(adapter) = adapters.get(id) {
                return Ok(Arc::clone(adapter));
            }
        }

        let factory = self
            .factories
            .get(id)
            .ok_or_else(|| QueryError::UnknownDialect(id.to_string()))?;

        let mut adapters = self.adapters.write().unwrap_or_else(PoisonError::into_inner);
        let adapter = adapters.entry(id.clone()).or_insert_with(|| {
            debug!(dialect = %id, "Instantiating dialect adapter");
            factory()
        });
        Ok(Arc::clone(adapter))
    }
}

impl Default for DialectRegistry {
    fn default() -> Self {
        Self::new()
    }
}
