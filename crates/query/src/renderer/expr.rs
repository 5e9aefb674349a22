use crate::{
    ast::expr::{Expr, FunctionCall},
    renderer::{Render, Renderer},
};

/// Caller-supplied column expressions are wrapped in parentheses unless they
/// are a plain (possibly qualified or quoted) identifier.
fn is_plain_reference(expr: &str) -> bool {
    !expr.is_empty()
        && expr
            .chars()
            .all(|c| c.is_alphanumeric() || matches!(c, '_' | '.' | '`' | '"' | '[' | ']'))
}

impl Render for Expr {
    fn render(&self, r: &mut Renderer) {
        match self {
            Expr::Column(column) => {
                if is_plain_reference(column) {
                    r.sql.push_str(column);
                } else {
                    r.sql.push('(');
                    r.sql.push_str(column);
                    r.sql.push(')');
                }
            }
            Expr::Param(name) => r.add_named_param(name),
            Expr::Literal(text) => r.sql.push_str(text),
            Expr::FunctionCall(func) => func.render(r),
            Expr::Cast { expr, data_type } => {
                r.sql.push_str("CAST(");
                expr.render(r);
                r.sql.push_str(" AS ");
                r.sql.push_str(data_type);
                r.sql.push(')');
            }
            Expr::TryCast { expr, data_type } => {
                r.sql.push_str("TRY_CAST(");
                expr.render(r);
                r.sql.push_str(" AS ");
                r.sql.push_str(data_type);
                r.sql.push(')');
            }
            Expr::Case {
                when,
                then,
                otherwise,
            } => {
                r.sql.push_str("CASE WHEN ");
                when.render(r);
                r.sql.push_str(" THEN ");
                then.render(r);
                r.sql.push_str(" ELSE ");
                otherwise.render(r);
                r.sql.push_str(" END");
            }
        }
    }
}

impl Render for FunctionCall {
    fn render(&self, r: &mut Renderer) {
        r.sql.push_str(&self.name);
        r.sql.push('(');
        for (i, arg) in self.args.iter().enumerate() {
            if i > 0 {
                r.sql.push_str(", ");
            }
            arg.render(r);
        }
        r.sql.push(')');
    }
}
