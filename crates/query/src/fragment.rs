//! Condition fragments, their parameter bindings, and the OR-of-ANDs tree
//! that a compiled filter expression produces.

use crate::{
    ast::condition::Condition,
    dialect::DialectAdapter,
    error::QueryError,
    renderer::{Render, Renderer},
};
use indexmap::IndexMap;
use model::core::value::Value;
use tracing::warn;

/// Builds a parameter name that is stable for the same content and column.
///
/// Two bindings with the same name always carry the same value, so merging
/// fragments of one expression never produces a conflicting binding.
pub fn param_name(kind: &str, content: &str, column: &str) -> String {
    let digest = md5::compute(format!("{content}{column}"));
    format!("{kind}{digest:x}")
}

/// Named parameter bindings, in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params(IndexMap<String, Value>);

impl Params {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, value: Value) {
        let name = name.into();
        if let Some(existing) = self.0.get(&name) {
            if existing != &value {
                warn!(param = %name, "Conflicting binding ignored for parameter");
            }
            return;
        }
        self.0.insert(name, value);
    }

    pub fn extend(&mut self, other: Params) {
        for (name, value) in other.0 {
            self.insert(name, value);
        }
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }
}

impl FromIterator<(String, Value)> for Params {
    fn from_iter<T: IntoIterator<Item = (String, Value)>>(iter: T) -> Self {
        let mut params = Params::new();
        for (name, value) in iter {
            params.insert(name, value);
        }
        params
    }
}

/// A single boolean condition plus the parameters it references.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConditionFragment {
    pub condition: Condition,
    pub params: Params,
}

impl ConditionFragment {
    pub fn new(condition: Condition, params: Params) -> Self {
        Self { condition, params }
    }

    /// A fragment that does not restrict rows.
    pub fn always() -> Self {
        Self::new(Condition::always(), Params::new())
    }

    pub fn is_always(&self) -> bool {
        self.condition.is_always()
    }
}

/// The result of compiling one filter expression: an OR of AND-groups.
///
/// An empty tree means "no filtering".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConditionTree {
    groups: Vec<Vec<ConditionFragment>>,
}

impl ConditionTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_group(&mut self, fragments: Vec<ConditionFragment>) {
        if !fragments.is_empty() {
            self.groups.push(fragments);
        }
    }

    pub fn groups(&self) -> &[Vec<ConditionFragment>] {
        &self.groups
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// All parameter bindings, in the order they first appear.
    pub fn params(&self) -> Params {
        let mut params = Params::new();
        for fragment in self.groups.iter().flatten() {
            params.extend(fragment.params.clone());
        }
        params
    }

    /// The combined condition, or `None` when the tree places no restriction.
    pub fn condition(&self) -> Option<Condition> {
        if self.groups.is_empty() {
            return None;
        }

        let combined = Condition::or(
            self.groups
                .iter()
                .map(|group| {
                    Condition::and(group.iter().map(|f| f.condition.clone()).collect())
                })
                .collect(),
        );

        if combined.is_always() {
            None
        } else {
            Some(combined)
        }
    }

    /// Renders the combined condition as SQL with positional placeholders in
    /// the dialect's style. Returns `None` when there is nothing to filter.
    pub fn render(
        &self,
        dialect: &dyn DialectAdapter,
    ) -> Result<Option<(String, Vec<Value>)>, QueryError> {
        let Some(condition) = self.condition() else {
            return Ok(None);
        };

        let params = self.params();
        let mut renderer = Renderer::new(dialect, &params);
        condition.render(&mut renderer);
        renderer.finish().map(Some)
    }
}
