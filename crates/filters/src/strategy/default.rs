//! The catch-all: every word of the segment must appear in the column.

use super::{FilterStrategy, SegmentInput, parse_options, substring::contains};
use crate::{
    config::DEFAULT,
    error::{ConfigError, FilterError},
};
use async_trait::async_trait;
use query::{
    ast::condition::Condition,
    fragment::{ConditionFragment, Params, param_name},
};
use regex::Regex;
use serde::Deserialize;
use serde_json::{Map, Value as JsonValue};

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct DefaultOptions {
    /// Separates words. Surrounding whitespace is ignored.
    pub word_delimiter: String,
    pub treat_null_as_empty_string: bool,
}

impl Default for DefaultOptions {
    fn default() -> Self {
        Self {
            word_delimiter: " ".into(),
            treat_null_as_empty_string: true,
        }
    }
}

#[derive(Debug)]
pub struct DefaultStrategy {
    options: DefaultOptions,
    /// `None` when the delimiter is empty and the segment is a single word.
    splitter: Option<Regex>,
}

impl DefaultStrategy {
    pub fn new(name: &str, options: DefaultOptions) -> Result<Self, ConfigError> {
        let splitter = if options.word_delimiter.is_empty() {
            None
        } else {
            let pattern = format!(r"(?i)\s*{}\s*", regex::escape(&options.word_delimiter));
            let regex = Regex::new(&pattern).map_err(|e| ConfigError::InvalidOptions {
                name: name.to_string(),
                message: e.to_string(),
            })?;
            Some(regex)
        };

        Ok(Self { options, splitter })
    }

    pub fn from_options(
        name: &str,
        options: &Map<String, JsonValue>,
    ) -> Result<Box<dyn FilterStrategy>, ConfigError> {
        let options = parse_options(name, options)?;
        Ok(Box::new(Self::new(name, options)?))
    }

    fn words<'a>(&self, text: &'a str) -> Vec<&'a str> {
        let text = text.trim();
        match &self.splitter {
            Some(splitter) => splitter.split(text).filter(|w| !w.is_empty()).collect(),
            None if text.is_empty() => Vec::new(),
            None => vec![text],
        }
    }
}

#[async_trait]
impl FilterStrategy for DefaultStrategy {
    fn kind(&self) -> &'static str {
        DEFAULT
    }

    /// Always accepts. A segment with no words places no restriction.
    async fn accept(
        &self,
        input: &SegmentInput<'_>,
    ) -> Result<Option<ConditionFragment>, FilterError> {
        let words = self.words(input.text);
        if words.is_empty() {
            return Ok(Some(ConditionFragment::always()));
        }

        let column = input.column_expr(self.options.treat_null_as_empty_string);
        let mut params = Params::new();
        let conditions = words
            .into_iter()
            .map(|word| {
                let name = param_name(DEFAULT, word, input.column);
                contains(column.clone(), word, false, &name, &mut params)
            })
            .collect();

        let condition = Condition::and(conditions).negate_if(input.negate);
        Ok(Some(ConditionFragment::new(condition, params)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strategy::testing::{input, render};
    use model::core::value::Value;

    fn strategy() -> DefaultStrategy {
        DefaultStrategy::new("default", DefaultOptions::default()).unwrap()
    }

    #[tokio::test]
    async fn test_words_are_anded() {
        let strategy = strategy();
        let fragment = strategy.accept(&input("red  car", false)).await.unwrap().unwrap();
        assert_eq!(
            render(fragment),
            (
                "(COALESCE(t.price, '') LIKE ? AND COALESCE(t.price, '') LIKE ?)".to_string(),
                vec![Value::from("%red%"), Value::from("%car%")]
            )
        );
    }

    #[tokio::test]
    async fn test_negated_words_are_ored() {
        let strategy = strategy();
        let fragment = strategy.accept(&input("red car", true)).await.unwrap().unwrap();
        assert_eq!(
            render(fragment).0,
            "(COALESCE(t.price, '') NOT LIKE ? OR COALESCE(t.price, '') NOT LIKE ?)"
        );
    }

    #[tokio::test]
    async fn test_no_words_is_unrestricted() {
        let strategy = strategy();
        for negate in [false, true] {
            let fragment = strategy.accept(&input("   ", negate)).await.unwrap().unwrap();
            assert!(fragment.is_always());
        }
    }

    #[tokio::test]
    async fn test_accepts_any_syntax() {
        let strategy = strategy();
        for text in ["#", "/[/", ">=", "\"x", "50%"] {
            assert!(strategy.accept(&input(text, false)).await.unwrap().is_some(), "{text}");
        }
    }

    #[test]
    fn test_custom_word_delimiter() {
        let options = DefaultOptions {
            word_delimiter: "AND".into(),
            ..DefaultOptions::default()
        };
        let strategy = DefaultStrategy::new("default", options).unwrap();
        assert_eq!(strategy.words("red and  blue AND"), vec!["red", "blue"]);

        let options = DefaultOptions {
            word_delimiter: String::new(),
            ..DefaultOptions::default()
        };
        let strategy = DefaultStrategy::new("default", options).unwrap();
        assert_eq!(strategy.words(" red car "), vec!["red car"]);
    }
}
