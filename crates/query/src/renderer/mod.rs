//! Defines the core rendering trait and context for converting conditions to SQL.

use crate::{dialect::DialectAdapter, error::QueryError, fragment::Params};
use model::core::value::Value;

pub mod condition;
pub mod expr;

/// A trait for any AST node that can be rendered into a SQL string.
pub trait Render {
    fn render(&self, renderer: &mut Renderer);
}

/// A context that holds the state during the rendering process.
///
/// It accumulates the SQL string and the positional parameters, resolving
/// named parameters against the bindings of the fragments being rendered.
pub struct Renderer<'a> {
    pub sql: String,
    pub params: Vec<Value>,
    pub dialect: &'a dyn DialectAdapter,
    bindings: &'a Params,
    unresolved: Vec<String>,
}

impl<'a> Renderer<'a> {
    pub fn new(dialect: &'a dyn DialectAdapter, bindings: &'a Params) -> Self {
        Self {
            sql: String::new(),
            params: Vec::new(),
            dialect,
            bindings,
            unresolved: Vec::new(),
        }
    }

    /// Consumes the renderer and returns the final SQL string and parameters.
    pub fn finish(self) -> Result<(String, Vec<Value>), QueryError> {
        if let Some(name) = self.unresolved.into_iter().next() {
            return Err(QueryError::UnknownParam(name));
        }
        Ok((self.sql, self.params))
    }

    pub fn add_param(&mut self, value: Value) {
        self.params.push(value);
        let placeholder = self.dialect.get_placeholder(self.params.len() - 1);
        self.sql.push_str(&placeholder);
    }

    pub fn add_named_param(&mut self, name: &str) {
        match self.bindings.get(name) {
            Some(value) => self.add_param(value.clone()),
            None => {
                self.unresolved.push(name.to_string());
                self.sql.push_str(":");
                self.sql.push_str(name);
            }
        }
    }
}
