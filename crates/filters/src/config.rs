//! Compiler configuration and per-call overrides.

use crate::{error::ConfigError, tokenizer::Tokenizer};
use indexmap::IndexMap;
use model::core::identifiers::DialectId;
use query::connection::LiveConnection;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};

pub const RANGE: &str = "range";
pub const EXACT: &str = "exact";
pub const SUBSTRING: &str = "substring";
pub const REGEX: &str = "regex";
pub const DEFAULT: &str = "default";

/// Describes one strategy in the filter chain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StrategyDescriptor {
    /// Registered strategy kind, e.g. `range`.
    pub kind: String,

    /// Lower values are offered segments first.
    #[serde(default)]
    pub priority: i64,

    #[serde(default = "default_active")]
    pub active: bool,

    /// Strategy-specific options, deserialized by the strategy itself.
    #[serde(default)]
    pub options: Map<String, JsonValue>,
}

fn default_active() -> bool {
    true
}

impl StrategyDescriptor {
    pub fn new(kind: &str, priority: i64) -> Self {
        Self {
            kind: kind.to_string(),
            priority,
            active: true,
            options: Map::new(),
        }
    }

    pub fn with_option(mut self, key: &str, value: impl Into<JsonValue>) -> Self {
        self.options.insert(key.to_string(), value.into());
        self
    }

    pub fn inactive(mut self) -> Self {
        self.active = false;
        self
    }
}

/// Full configuration for compiling filter expressions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FilterConfig {
    /// Joins segments with OR. Empty disables OR splitting.
    pub or_delimiter: String,

    /// Joins segments with AND. Empty disables AND splitting.
    pub and_delimiter: String,

    /// Prepended to a delimiter to use it literally. Empty disables escaping.
    pub escape_sequence: String,

    /// Wraps a segment, together with the suffix, to invert its logic.
    pub invert_logic_prefix: String,
    pub invert_logic_suffix: String,

    /// Dialect to compile for. When unset it is derived from the live
    /// connection's driver name through `driver_map`.
    pub dialect: Option<DialectId>,

    /// Driver name to dialect. A driver mapped to `null` has no adapter.
    pub driver_map: IndexMap<String, Option<DialectId>>,

    /// Strategy descriptors by name, in declaration order.
    pub filter_config: IndexMap<String, StrategyDescriptor>,
}

impl Default for FilterConfig {
    fn default() -> Self {
        let driver_map = [
            ("pgsql", Some("postgres")),
            ("postgres", Some("postgres")),
            ("mysqli", Some("mysql")),
            ("mysql", Some("mysql")),
            ("sqlite", None),
            ("sqlite2", None),
            ("mssql", Some("mssql")),
            ("dblib", Some("mssql")),
            ("sqlsrv", Some("mssql")),
            ("oci", None),
        ]
        .into_iter()
        .map(|(driver, dialect)| (driver.to_string(), dialect.map(DialectId::from)))
        .collect();

        let filter_config = [
            (RANGE, StrategyDescriptor::new(RANGE, 10)),
            (EXACT, StrategyDescriptor::new(EXACT, 20)),
            (SUBSTRING, StrategyDescriptor::new(SUBSTRING, 30)),
            (REGEX, StrategyDescriptor::new(REGEX, 40)),
            (DEFAULT, StrategyDescriptor::new(DEFAULT, 50)),
        ]
        .into_iter()
        .map(|(name, descriptor)| (name.to_string(), descriptor))
        .collect();

        Self {
            or_delimiter: "|".into(),
            and_delimiter: "&".into(),
            escape_sequence: "\\".into(),
            invert_logic_prefix: "!".into(),
            invert_logic_suffix: String::new(),
            dialect: None,
            driver_map,
            filter_config,
        }
    }
}

impl FilterConfig {
    /// Parses a JSON document as [`ConfigOverrides`] over the defaults, so a
    /// file naming a single strategy keeps the built-in chain.
    pub fn from_json(source: &str) -> Result<FilterConfig, serde_json::Error> {
        let overrides: ConfigOverrides = serde_json::from_str(source)?;
        Ok(FilterConfig::default().merged(&overrides))
    }

    pub fn with_dialect(mut self, dialect: impl Into<DialectId>) -> Self {
        self.dialect = Some(dialect.into());
        self
    }

    pub fn tokenizer(&self) -> Tokenizer {
        Tokenizer {
            or_delimiter: self.or_delimiter.clone(),
            and_delimiter: self.and_delimiter.clone(),
            escape_sequence: self.escape_sequence.clone(),
            invert_prefix: self.invert_logic_prefix.clone(),
            invert_suffix: self.invert_logic_suffix.clone(),
        }
    }

    /// Picks the dialect: the configured one, else the connection's driver
    /// name looked up in `driver_map`.
    pub fn resolve_dialect(
        &self,
        connection: Option<&dyn LiveConnection>,
    ) -> Result<DialectId, ConfigError> {
        if let Some(dialect) = &self.dialect {
            return Ok(dialect.clone());
        }

        let connection = connection.ok_or(ConfigError::MissingDialect)?;
        let driver = connection.driver_name();
        self.driver_map
            .get(driver)
            .cloned()
            .flatten()
            .ok_or_else(|| ConfigError::UnsupportedDriver(driver.to_string()))
    }

    /// Returns a copy with `overrides` applied.
    pub fn merged(&self, overrides: &ConfigOverrides) -> FilterConfig {
        let mut config = self.clone();

        if let Some(v) = &overrides.or_delimiter {
            config.or_delimiter = v.clone();
        }
        if let Some(v) = &overrides.and_delimiter {
            config.and_delimiter = v.clone();
        }
        if let Some(v) = &overrides.escape_sequence {
            config.escape_sequence = v.clone();
        }
        if let Some(v) = &overrides.invert_logic_prefix {
            config.invert_logic_prefix = v.clone();
        }
        if let Some(v) = &overrides.invert_logic_suffix {
            config.invert_logic_suffix = v.clone();
        }
        if let Some(v) = &overrides.dialect {
            config.dialect = Some(v.clone());
        }

        for (driver, dialect) in &overrides.driver_map {
            config.driver_map.insert(driver.clone(), dialect.clone());
        }

        for (name, patch) in &overrides.filter_config {
            match config.filter_config.get_mut(name) {
                Some(descriptor) => patch.apply_to(descriptor),
                None => {
                    let mut descriptor = StrategyDescriptor::new(name, 0);
                    patch.apply_to(&mut descriptor);
                    config.filter_config.insert(name.clone(), descriptor);
                }
            }
        }

        config
    }
}

/// Partial configuration layered over a [`FilterConfig`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ConfigOverrides {
    pub or_delimiter: Option<String>,
    pub and_delimiter: Option<String>,
    pub escape_sequence: Option<String>,
    pub invert_logic_prefix: Option<String>,
    pub invert_logic_suffix: Option<String>,
    pub dialect: Option<DialectId>,
    pub driver_map: IndexMap<String, Option<DialectId>>,
    pub filter_config: IndexMap<String, DescriptorOverride>,
}

/// Changes to one strategy descriptor. A new name without a `kind` uses the
/// name as its kind.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DescriptorOverride {
    pub kind: Option<String>,
    pub priority: Option<i64>,
    pub active: Option<bool>,
    pub options: Map<String, JsonValue>,
}

impl DescriptorOverride {
    fn apply_to(&self, descriptor: &mut StrategyDescriptor) {
        if let Some(kind) = &self.kind {
            descriptor.kind = kind.clone();
        }
        if let Some(priority) = self.priority {
            descriptor.priority = priority;
        }
        if let Some(active) = self.active {
            descriptor.active = active;
        }
        for (key, value) in &self.options {
            descriptor.options.insert(key.clone(), value.clone());
        }
    }
}
