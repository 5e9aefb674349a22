//! Exact matches: `"foo"` selects rows whose column equals `foo`.

use super::{FilterStrategy, SegmentInput, parse_options};
use crate::{
    config::EXACT,
    error::{ConfigError, FilterError},
    tokenizer::strip_prefix_suffix,
};
use async_trait::async_trait;
use model::core::value::Value;
use query::{
    ast::{condition::Condition, expr::Expr},
    fragment::{ConditionFragment, Params, param_name},
};
use serde::Deserialize;
use serde_json::{Map, Value as JsonValue};

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct ExactOptions {
    pub prefix: String,
    pub suffix: String,
    pub treat_null_as_empty_string: bool,
}

impl Default for ExactOptions {
    fn default() -> Self {
        Self {
            prefix: "\"".into(),
            suffix: "\"".into(),
            treat_null_as_empty_string: true,
        }
    }
}

#[derive(Debug, Default)]
pub struct ExactStrategy {
    options: ExactOptions,
}

impl ExactStrategy {
    pub fn new(options: ExactOptions) -> Self {
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
impl FilterStrategy for ExactStrategy {
    fn kind(&self) -> &'static str {
        EXACT
    }

    async fn accept(
        &self,
        input: &SegmentInput<'_>,
    ) -> Result<Option<ConditionFragment>, FilterError> {
        let Some(search) =
            strip_prefix_suffix(input.text, &self.options.prefix, &self.options.suffix)
        else {
            return Ok(None);
        };

        let name = param_name(EXACT, input.text, input.column);
        let mut params = Params::new();
        params.insert(name.as_str(), Value::from(search));

        let column = input.column_expr(self.options.treat_null_as_empty_string);
        let condition = Condition::is_in(column, vec![Expr::param(&name)]).negate_if(input.negate);
        Ok(Some(ConditionFragment::new(condition, params)))
    }
}
