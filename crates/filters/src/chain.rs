//! Priority-ordered dispatch of segments to filter strategies.

use crate::{
    config::{DEFAULT, FilterConfig},
    error::{ConfigError, FilterError},
    strategy::{
        FilterStrategy, SegmentInput,
        default::{DefaultOptions, DefaultStrategy},
        registry::StrategyRegistry,
    },
};
use query::fragment::ConditionFragment;
use tracing::{debug, trace};

struct Entry {
    name: String,
    priority: i64,
    strategy: Box<dyn FilterStrategy>,
}

/// Strategies sorted by ascending priority, with declaration order breaking
/// ties. The first strategy that accepts a segment builds its fragment.
pub struct FilterChain {
    entries: Vec<Entry>,
    /// Used when no configured strategy accepts.
    fallback: DefaultStrategy,
}

impl FilterChain {
    /// Instantiates every active strategy in `config`. Strategies of the
    /// catch-all kind are kept even when marked inactive.
    pub fn build(config: &FilterConfig, registry: &StrategyRegistry) -> Result<Self, ConfigError> {
        let mut entries = Vec::with_capacity(config.filter_config.len());

        for (name, descriptor) in &config.filter_config {
            let is_catch_all = descriptor.kind.eq_ignore_ascii_case(DEFAULT);
            if !descriptor.active && !is_catch_all {
                trace!(filter = %name, "Skipping inactive filter");
                continue;
            }

            let strategy = registry.create(name, &descriptor.kind, &descriptor.options)?;
            entries.push(Entry {
                name: name.clone(),
                priority: descriptor.priority,
                strategy,
            });
        }

        // Stable, so equal priorities keep declaration order
        entries.sort_by_key(|entry| entry.priority);

        Ok(Self {
            entries,
            fallback: DefaultStrategy::new(DEFAULT, DefaultOptions::default())?,
        })
    }

    /// Names of the strategies in the order they are tried.
    pub fn names(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.name.as_str()).collect()
    }

    /// Builds the fragment for one segment.
    pub async fn resolve(
        &self,
        input: &SegmentInput<'_>,
    ) -> Result<ConditionFragment, FilterError> {
        for entry in &self.entries {
            if let Some(fragment) = entry.strategy.accept(input).await? {
                debug!(
                    filter = %entry.name,
                    kind = entry.strategy.kind(),
                    segment = input.text,
                    negate = input.negate,
                    "Segment accepted"
                );
                return Ok(fragment);
            }
        }

        debug!(segment = input.text, "No filter accepted segment, using catch-all");
        let fragment = self.fallback.accept(input).await?;
        Ok(fragment.unwrap_or_else(ConditionFragment::always))
    }
}
