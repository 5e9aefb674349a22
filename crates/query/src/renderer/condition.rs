use crate::{
    ast::condition::{CompareOp, Condition},
    renderer::{Render, Renderer},
};

impl Render for Condition {
    fn render(&self, r: &mut Renderer) {
        match self {
            Condition::Compare { left, op, right } => {
                left.render(r);
                r.sql.push(' ');
                r.sql.push_str(r.dialect.compare_operator(*op));
                r.sql.push(' ');
                right.render(r);

                if matches!(op, CompareOp::Like | CompareOp::NotLike)
                    && let Some(escape) = r.dialect.like_escape_clause()
                {
                    r.sql.push(' ');
                    r.sql.push_str(escape);
                }
            }
            Condition::In {
                expr,
                values,
                negated,
            } => {
                if values.is_empty() {
                    r.sql.push_str(if *negated { "1 = 1" } else { "1 = 0" });
                    return;
                }

                expr.render(r);
                r.sql.push_str(if *negated { " NOT IN (" } else { " IN (" });
                for (i, value) in values.iter().enumerate() {
                    if i > 0 {
                        r.sql.push_str(", ");
                    }
                    value.render(r);
                }
                r.sql.push(')');
            }
            Condition::And(items) => render_joined(r, items, " AND ", "1 = 1"),
            Condition::Or(items) => render_joined(r, items, " OR ", "1 = 0"),
        }
    }
}

fn render_joined(r: &mut Renderer, items: &[Condition], separator: &str, empty: &str) {
    match items {
        [] => r.sql.push_str(empty),
        [only] => only.render(r),
        _ => {
            r.sql.push('(');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    r.sql.push_str(separator);
                }
                item.render(r);
            }
            r.sql.push(')');
        }
    }
}
