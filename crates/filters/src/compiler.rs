//! Turns a filter expression into a condition tree.

use crate::{
    chain::FilterChain,
    config::FilterConfig,
    error::FilterError,
    strategy::{SegmentInput, registry::StrategyRegistry},
};
use query::{
    connection::LiveConnection, dialect::DialectAdapter, dialect::registry::DialectRegistry,
    fragment::ConditionTree,
};
use std::sync::Arc;
use tracing::{debug, info};

/// Compiles filter expressions against shared dialect and strategy
/// registries. Cheap to clone and safe to use from many tasks.
#[derive(Clone)]
pub struct Compiler {
    dialects: Arc<DialectRegistry>,
    strategies: Arc<StrategyRegistry>,
}

impl Compiler {
    pub fn new(dialects: Arc<DialectRegistry>, strategies: Arc<StrategyRegistry>) -> Self {
        Self {
            dialects,
            strategies,
        }
    }

    /// The adapter `config` selects, directly or through the connection's
    /// driver name.
    pub fn dialect(
        &self,
        config: &FilterConfig,
        connection: Option<&dyn LiveConnection>,
    ) -> Result<Arc<dyn DialectAdapter>, FilterError> {
        let id = config.resolve_dialect(connection)?;
        Ok(self.dialects.get(&id)?)
    }

    /// Compiles `expression` as a filter on `column`.
    ///
    /// Segments within an OR-group are ANDed and the groups are ORed. An empty
    /// expression yields an empty tree. Configuration problems are reported
    /// before any segment is looked at.
    ///
    /// `connection` is only used to pick a dialect when `config` names none,
    /// and to let the database validate regular expressions.
    pub async fn compile(
        &self,
        column: &str,
        expression: &str,
        config: &FilterConfig,
        connection: Option<&dyn LiveConnection>,
    ) -> Result<ConditionTree, FilterError> {
        let dialect = self.dialect(config, connection)?;
        let chain = FilterChain::build(config, &self.strategies)?;
        let parsed = config.tokenizer().tokenize(expression);

        info!(
            column,
            dialect = dialect.name(),
            groups = parsed.len(),
            "Compiling filter expression"
        );

        let mut tree = ConditionTree::new();
        for (index, group) in parsed.iter().enumerate() {
            debug!(group = index, segments = group.len(), "Resolving OR-group");

            let mut fragments = Vec::with_capacity(group.len());
            for segment in group {
                let input = SegmentInput {
                    column,
                    text: &segment.text,
                    negate: segment.negate,
                    dialect: dialect.as_ref(),
                    connection,
                };
                fragments.push(chain.resolve(&input).await?);
            }

            tree.push_group(fragments);
        }

        Ok(tree)
    }
}

impl Default for Compiler {
    fn default() -> Self {
        Self::new(
            Arc::new(DialectRegistry::new()),
            Arc::new(StrategyRegistry::new()),
        )
    }
}
