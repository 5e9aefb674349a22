//! Substring matches: `#foo#` selects rows whose column contains `foo`.

use super::{FilterStrategy, SegmentInput, like_pattern, parse_options};
use crate::{
    config::SUBSTRING,
    error::{ConfigError, FilterError},
    tokenizer::strip_prefix_suffix,
};
use async_trait::async_trait;
use model::core::value::Value;
use query::{
    ast::{
        condition::{CompareOp, Condition},
        expr::Expr,
    },
    fragment::{ConditionFragment, Params, param_name},
};
use serde::Deserialize;
use serde_json::{Map, Value as JsonValue};

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct SubstringOptions {
    pub prefix: String,
    pub suffix: String,
    pub treat_null_as_empty_string: bool,
}

impl Default for SubstringOptions {
    fn default() -> Self {
        Self {
            prefix: "#".into(),
            suffix: "#".into(),
            treat_null_as_empty_string: true,
        }
    }
}

#[derive(Debug, Default)]
pub struct SubstringStrategy {
    options: SubstringOptions,
}

impl SubstringStrategy {
    pub fn new(options: SubstringOptions) -> Self {
        Self { options }
    }

    pub fn from_options(
        name: &str,
        options: &Map<String, JsonValue>,
    ) -> Result<Box<dyn FilterStrategy>, ConfigError> {
        Ok(Box::new(Self::new(parse_options(name, options)?)))
    }
}

/// A case-insensitive `LIKE '%text%'` condition, inverted when `negate`.
pub(crate) fn contains(
    column: Expr,
    text: &str,
    negate: bool,
    param: &str,
    params: &mut Params,
) -> Condition {
    params.insert(param, Value::from(like_pattern(text)));
    Condition::compare(column, CompareOp::Like, Expr::param(param)).negate_if(negate)
}

#[async_trait]
impl FilterStrategy for SubstringStrategy {
    fn kind(&self) -> &'static str {
        SUBSTRING
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

        // An empty search term places no restriction, negated or not.
        if search.is_empty() {
            return Ok(Some(ConditionFragment::always()));
        }

        let name = param_name(SUBSTRING, input.text, input.column);
        let mut params = Params::new();
        let column = input.column_expr(self.options.treat_null_as_empty_string);
        let condition = contains(column, search, input.negate, &name, &mut params);
        Ok(Some(ConditionFragment::new(condition, params)))
    }
}
