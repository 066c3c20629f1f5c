//! SQL rendering for accumulated predicates

use crate::query_builder::predicate::Predicate;
use crate::quoting::quote_string;
use serde_json::Value;

pub struct SqlGenerator;

impl SqlGenerator {
    /// Build WHERE clause from predicates
    pub fn build_where_clause(predicates: &[Predicate]) -> String {
        let conditions = Self::build_conditions(predicates);

        match conditions.len() {
            0 => "".to_string(),
            1 => format!("WHERE {}", conditions[0]),
            _ => {
                let joined = conditions
                    .iter()
                    .map(|condition| {
                        if Self::is_enclosed(condition) {
                            condition.clone()
                        } else {
                            format!("({})", condition)
                        }
                    })
                    .collect::<Vec<_>>()
                    .join(" AND ");
                format!("WHERE {}", joined)
            }
        }
    }

    /// Whether the whole fragment sits inside one pair of parentheses.
    ///
    /// Parentheses inside single-quoted literals are ignored.
    fn is_enclosed(sql: &str) -> bool {
        if !sql.starts_with('(') || !sql.ends_with(')') {
            return false;
        }

        let mut depth = 0usize;
        let mut in_literal = false;
        let last = sql.len() - 1;

        for (i, c) in sql.char_indices() {
            match c {
                '\'' => in_literal = !in_literal,
                '(' if !in_literal => depth += 1,
                ')' if !in_literal => {
                    depth = depth.saturating_sub(1);
                    if depth == 0 {
                        return i == last;
                    }
                }
                _ => {}
            }
        }

        false
    }

    /// Render every predicate, skipping empty fragments
    pub fn build_conditions(predicates: &[Predicate]) -> Vec<String> {
        predicates
            .iter()
            .map(Self::render_predicate)
            .filter(|sql| !sql.is_empty())
            .collect()
    }

    /// Render a single predicate to SQL
    pub fn render_predicate(predicate: &Predicate) -> String {
        match predicate {
            Predicate::Raw(sql) => sql.clone(),
            Predicate::Template { template, args } => Self::render_template(template, args),
        }
    }

    /// Substitute `%s` placeholders in order.
    ///
    /// Missing arguments render empty and surplus ones are ignored. `%%` is a
    /// literal percent sign; any other `%` sequence is copied unchanged.
    fn render_template(template: &str, args: &[Value]) -> String {
        let mut rendered = String::with_capacity(template.len());
        let mut args = args.iter();
        let mut chars = template.chars().peekable();

        while let Some(c) = chars.next() {
            if c != '%' {
                rendered.push(c);
                continue;
            }
            match chars.peek() {
                Some('s') => {
                    chars.next();
                    if let Some(arg) = args.next() {
                        rendered.push_str(&Self::render_argument(arg));
                    }
                }
                Some('%') => {
                    chars.next();
                    rendered.push('%');
                }
                _ => rendered.push('%'),
            }
        }

        rendered
    }

    fn render_argument(arg: &Value) -> String {
        match arg {
            Value::Null => String::new(),
            Value::String(s) => quote_string(s),
            Value::Number(n) => n.to_string(),
            Value::Bool(b) => b.to_string(),
            other => quote_string(&other.to_string()),
        }
    }
}
