use filters::{Compiler, ConfigOverrides, FilterConfig};
use model::core::value::Value;
use query::fragment::ConditionTree;

pub use query::testing::ScriptedConnection;

pub const COLUMN: &str = "price";

/// Defaults for `dialect`, with numeric casts and null coalescing turned off
/// so rendered SQL stays short.
pub fn plain_config(dialect: &str) -> FilterConfig {
    let overrides: ConfigOverrides = serde_json::from_str(
        r#"{
            "filterConfig": {
                "range": { "options": { "treatNonNumericValuesAsZero": true, "treatNullAsEmptyString": false } },
                "exact": { "options": { "treatNullAsEmptyString": false } },
                "substring": { "options": { "treatNullAsEmptyString": false } },
                "regex": { "options": { "treatNullAsEmptyString": false } },
                "default": { "options": { "treatNullAsEmptyString": false } }
            }
        }"#,
    )
    .unwrap();

    FilterConfig::default()
        .with_dialect(dialect)
        .merged(&overrides)
}

pub async fn compile(expression: &str, config: &FilterConfig) -> ConditionTree {
    Compiler::default()
        .compile(COLUMN, expression, config, None)
        .await
        .unwrap()
}

/// Compiles and renders for the dialect named in `config`.
pub async fn render(expression: &str, config: &FilterConfig) -> Option<(String, Vec<Value>)> {
    let compiler = Compiler::default();
    let tree = compiler
        .compile(COLUMN, expression, config, None)
        .await
        .unwrap();
    let dialect = compiler.dialect(config, None).unwrap();
    tree.render(dialect.as_ref()).unwrap()
}

pub fn num(literal: &str) -> Value {
    Value::from_number_literal(literal)
}

pub const CAST: &str = "CAST(price AS DECIMAL(20, 4))";
