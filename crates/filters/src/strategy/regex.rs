//! Regular expressions: `/^a.*z$/`. Syntax and semantics belong to the
//! target database, which may be asked to validate the pattern first.

use super::{FilterStrategy, SegmentInput, parse_options};
use crate::{
    config::REGEX,
    error::{ConfigError, FilterError},
    tokenizer::strip_prefix_suffix,
};
use async_trait::async_trait;
use query::fragment::{ConditionFragment, param_name};
use serde::Deserialize;
use serde_json::{Map, Value as JsonValue};
use tracing::debug;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct RegexOptions {
    pub prefix: String,
    pub suffix: String,
    pub treat_null_as_empty_string: bool,
}

impl Default for RegexOptions {
    fn default() -> Self {
        Self {
            prefix: "/".into(),
            suffix: "/".into(),
            treat_null_as_empty_string: true,
        }
    }
}

#[derive(Debug, Default)]
pub struct RegexStrategy {
    options: RegexOptions,
}

impl RegexStrategy {
    pub fn new(options: RegexOptions) -> Self {
        Self { options }
    }

    pub fn from_options(
        name: &str,
        options: &Map<String, JsonValue>,
    ) -> Result<Box<dyn FilterStrategy>, ConfigError> {
        Ok(Box::new(Self::new(parse_options(name, options)?)))
    }
}

#[async_trait]
impl FilterStrategy for RegexStrategy {
    fn kind(&self) -> &'static str {
        REGEX
    }

    async fn accept(
        &self,
        input: &SegmentInput<'_>,
    ) -> Result<Option<ConditionFragment>, FilterError> {
        let Some(pattern) =
            strip_prefix_suffix(input.text, &self.options.prefix, &self.options.suffix)
        else {
            return Ok(None);
        };

        if !input
            .dialect
            .check_regex_syntax(input.connection, pattern)
            .await?
        {
            debug!(%pattern, dialect = input.dialect.name(), "Regex pattern rejected");
            return Ok(None);
        }

        let name = param_name(REGEX, input.text, input.column);
        let column = input.column_expr(self.options.treat_null_as_empty_string);
        Ok(Some(input.dialect.build_regex_fragment(
            column,
            pattern,
            input.negate,
            &name,
        )))
    }
}
