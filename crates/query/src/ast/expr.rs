//! Defines the AST for the value side of filter conditions.

use crate::ast::condition::Condition;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    /// A column name or SQL expression supplied by the caller, emitted verbatim.
    Column(String),

    /// A named parameter, bound through the fragment's parameter set.
    Param(String),

    /// Raw SQL literal text such as `''`, `0` or `NULL`.
    Literal(String),

    /// A function call, e.g. `COALESCE(price, '')`.
    FunctionCall(FunctionCall),

    /// `CAST(expr AS data_type)`.
    Cast { expr: Box<Expr>, data_type: String },

    /// `TRY_CAST(expr AS data_type)`, yielding NULL when conversion fails.
    TryCast { expr: Box<Expr>, data_type: String },

    /// `CASE WHEN condition THEN then ELSE otherwise END`.
    Case {
        when: Box<Condition>,
        then: Box<Expr>,
        otherwise: Box<Expr>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionCall {
    pub name: String,
    pub args: Vec<Expr>,
}

impl Expr {
    pub fn column(expr: &str) -> Self {
        Expr::Column(expr.to_string())
    }

    pub fn param(name: &str) -> Self {
        Expr::Param(name.to_string())
    }

    pub fn literal(text: impl Into<String>) -> Self {
        Expr::Literal(text.into())
    }

    pub fn null() -> Self {
        Expr::Literal("NULL".to_string())
    }

    /// A quoted SQL string literal.
    pub fn string(text: &str) -> Self {
        Expr::Literal(format!("'{}'", text.replace('\'', "''")))
    }

    pub fn call(name: &str, args: Vec<Expr>) -> Self {
        Expr::FunctionCall(FunctionCall {
            name: name.to_string(),
            args,
        })
    }

    pub fn cast(self, data_type: &str) -> Self {
        Expr::Cast {
            expr: Box::new(self),
            data_type: data_type.to_string(),
        }
    }

    pub fn try_cast(self, data_type: &str) -> Self {
        Expr::TryCast {
            expr: Box::new(self),
            data_type: data_type.to_string(),
        }
    }

    pub fn case(when: Condition, then: Expr, otherwise: Expr) -> Self {
        Expr::Case {
            when: Box::new(when),
            then: Box::new(then),
            otherwise: Box::new(otherwise),
        }
    }

    /// The literal used when a conversion has no usable result: an integer or NULL.
    pub fn fallback(value: Option<i64>) -> Self {
        match value {
            Some(v) => Expr::Literal(v.to_string()),
            None => Expr::null(),
        }
    }
}
