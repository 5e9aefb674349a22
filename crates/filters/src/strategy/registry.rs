use super::{
    FilterStrategy, default::DefaultStrategy, exact::ExactStrategy, range::RangeStrategy,
    regex::RegexStrategy, substring::SubstringStrategy,
};
use crate::{
    config::{DEFAULT, EXACT, RANGE, REGEX, SUBSTRING},
    error::ConfigError,
};
use serde_json::{Map, Value as JsonValue};
use std::collections::HashMap;

/// Builds a strategy from a filter name and its options.
pub type StrategyFactory =
    fn(&str, &Map<String, JsonValue>) -> Result<Box<dyn FilterStrategy>, ConfigError>;

/// Registry of strategy kinds available to filter configurations.
pub struct StrategyRegistry {
    factories: HashMap<String, StrategyFactory>,
}

impl StrategyRegistry {
    /// Create a new registry with all built-in strategies
    pub fn new() -> Self {
        let mut registry = Self::empty();

        registry.register(RANGE, RangeStrategy::from_options);
        registry.register(EXACT, ExactStrategy::from_options);
        registry.register(SUBSTRING, SubstringStrategy::from_options);
        registry.register(REGEX, RegexStrategy::from_options);
        registry.register(DEFAULT, DefaultStrategy::from_options);

        registry
    }

    pub fn empty() -> Self {
        Self {
            factories: HashMap::new(),
        }
    }

    pub fn register(&mut self, kind: &str, factory: StrategyFactory) {
        self.factories.insert(kind.to_lowercase(), factory);
    }

    pub fn has_kind(&self, kind: &str) -> bool {
        self.factories.contains_key(&kind.to_lowercase())
    }

    pub fn kinds(&self) -> Vec<&str> {
        self.factories.keys().map(|s| s.as_str()).collect()
    }

    /// Instantiates the strategy registered for `kind`.
    pub fn create(
        &self,
        name: &str,
        kind: &str,
        options: &Map<String, JsonValue>,
    ) -> Result<Box<dyn FilterStrategy>, ConfigError> {
        let factory = self.factories.get(&kind.to_lowercase()).ok_or_else(|| {
            ConfigError::UnknownStrategyKind {
                name: name.to_string(),
                kind: kind.to_string(),
            }
        })?;

        factory(name, options)
    }
}

impl Default for StrategyRegistry {
    fn default() -> Self {
        Self::new()
    }
}
