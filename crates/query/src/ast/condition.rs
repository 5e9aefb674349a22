//! Boolean condition trees and the negation combinator.

use crate::ast::expr::Expr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompareOp {
    Eq,    // =
    NotEq, // <>
    Lt,    // <
    LtEq,  // <=
    Gt,    // >
    GtEq,  // >=

    /// Case-insensitive pattern match.
    Like,
    NotLike,

    /// Regular expression match, spelled per dialect.
    Regexp,
    NotRegexp,
}

impl CompareOp {
    /// The operator selecting exactly the rows this one rejects.
    pub fn inverse(self) -> CompareOp {
        match self {
            CompareOp::Eq => CompareOp::NotEq,
            CompareOp::NotEq => CompareOp::Eq,
            CompareOp::Lt => CompareOp::GtEq,
            CompareOp::GtEq => CompareOp::Lt,
            CompareOp::LtEq => CompareOp::Gt,
            CompareOp::Gt => CompareOp::LtEq,
            CompareOp::Like => CompareOp::NotLike,
            CompareOp::NotLike => CompareOp::Like,
            CompareOp::Regexp => CompareOp::NotRegexp,
            CompareOp::NotRegexp => CompareOp::Regexp,
        }
    }

    pub fn as_sql(self) -> &'static str {
        match self {
            CompareOp::Eq => "=",
            CompareOp::NotEq => "<>",
            CompareOp::Lt => "<",
            CompareOp::LtEq => "<=",
            CompareOp::Gt => ">",
            CompareOp::GtEq => ">=",
            CompareOp::Like => "LIKE",
            CompareOp::NotLike => "NOT LIKE",
            CompareOp::Regexp => "REGEXP",
            CompareOp::NotRegexp => "NOT REGEXP",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Condition {
    /// `left op right`
    Compare { left: Expr, op: CompareOp, right: Expr },

    /// `expr IN (values)` or `expr NOT IN (values)`
    In {
        expr: Expr,
        values: Vec<Expr>,
        negated: bool,
    },

    /// Conjunction. An empty conjunction is always true.
    And(Vec<Condition>),

    /// Disjunction. An empty disjunction is always false.
    Or(Vec<Condition>),
}

impl Condition {
    pub fn compare(left: Expr, op: CompareOp, right: Expr) -> Self {
        Condition::Compare { left, op, right }
    }

    pub fn is_in(expr: Expr, values: Vec<Expr>) -> Self {
        Condition::In {
            expr,
            values,
            negated: false,
        }
    }

    /// The condition that places no restriction on rows.
    pub fn always() -> Self {
        Condition::And(Vec::new())
    }

    pub fn is_always(&self) -> bool {
        matches!(self, Condition::And(items) if items.is_empty())
    }

    /// Conjunction of `items`, flattening nested conjunctions and dropping
    /// members that are always true.
    pub fn and(items: Vec<Condition>) -> Self {
        let mut flat = Vec::with_capacity(items.len());
        for item in items {
            match item {
                Condition::And(inner) => flat.extend(inner),
                other => flat.push(other),
            }
        }

        if flat.len() == 1 {
            flat.remove(0)
        } else {
            Condition::And(flat)
        }
    }

    /// Disjunction of `items`. If any member is always true, so is the result.
    pub fn or(items: Vec<Condition>) -> Self {
        if items.iter().any(Condition::is_always) {
            return Condition::always();
        }

        let mut flat = Vec::with_capacity(items.len());
        for item in items {
            match item {
                Condition::Or(inner) => flat.extend(inner),
                other => flat.push(other),
            }
        }

        if flat.len() == 1 {
            flat.remove(0)
        } else {
            Condition::Or(flat)
        }
    }

    /// Logical negation, pushed down to the leaves with De Morgan's laws.
    ///
    /// Leaves flip their operator rather than gaining a `NOT` wrapper, so a
    /// negated range `a >= 1 AND a <= 5` becomes `a < 1 OR a > 5`.
    pub fn negate(self) -> Condition {
        match self {
            Condition::Compare { left, op, right } => Condition::Compare {
                left,
                op: op.inverse(),
                right,
            },
            Condition::In {
                expr,
                values,
                negated,
            } => Condition::In {
                expr,
                values,
                negated: !negated,
            },
            Condition::And(items) => {
                Condition::Or(items.into_iter().map(Condition::negate).collect())
            }
            Condition::Or(items) => {
                Condition::And(items.into_iter().map(Condition::negate).collect())
            }
        }
    }

    /// Applies [`Condition::negate`] only when `negate` is set.
    pub fn negate_if(self, negate: bool) -> Condition {
        if negate { self.negate() } else { self }
    }
}
