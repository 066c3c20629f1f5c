//! Built-in operators
//!
//! Registered by [`OperatorRegistry::load`]. Registration order does not
//! matter for lookup, but an operator registered here never replaces one the
//! caller registered first.

use query_object::dates::{add_days, beginning_of_week, parse_date};
use query_object::quoting::{clean_currency, collection, quote_string, quoted_date};
use query_object::validation::is_blank;
use query_object::{Predicate, PredicateSink, ValidationError, Validator};
use serde_json::json;

use crate::core::OperatorRegistry;
use crate::date_range::{date_range, parse_offset, relative_range};
use crate::errors::ReportFilterError;
use crate::operator::{Arity, Behavior, Context, OperatorOptions, Signature};

pub(crate) fn define_operators(registry: &mut OperatorRegistry) {
    define_equality_operators(registry);
    define_string_operators(registry);
    define_comparison_operators(registry);
    define_null_operators(registry);
    define_relative_date_operators(registry);
    define_absolute_date_operators(registry);
}

fn options(label: &str) -> OperatorOptions {
    OperatorOptions::new().label(label)
}

fn first<'v>(values: &[&'v str]) -> &'v str {
    values.first().copied().unwrap_or("")
}

fn define_equality_operators(registry: &mut OperatorRegistry) {
    registry.register(
        "=",
        options("label_equals"),
        Some(Behavior::new(Signature::variadic(2), |_, query, field, values| {
            if values.is_empty() {
                query.append(Predicate::raw("1=0"));
            } else {
                query.append(Predicate::raw(format!("{} IN {}", field, collection(values))));
            }
            Ok(())
        })),
    );

    registry.register(
        "!",
        options("label_not_equals"),
        Some(Behavior::new(Signature::variadic(2), |_, query, field, values| {
            let present: Vec<&str> = values.iter().copied().filter(|v| !is_blank(v)).collect();
            if present.is_empty() {
                query.append(Predicate::raw(format!("{} IS NULL", field)));
            } else {
                // Enclosed so the OR cannot leak into whatever the sink ANDs it with
                query.append(Predicate::raw(format!(
                    "({} IS NULL OR {} NOT IN {})",
                    field,
                    field,
                    collection(&present)
                )));
            }
            Ok(())
        })),
    );

    registry.register(
        "=n",
        options("label_equals"),
        Some(Behavior::new(Signature::fixed(3), |_, query, field, values| {
            let value = first(values);
            let number = clean_currency(value)
                .ok_or_else(|| ValidationError::InvalidNumber(value.to_string()))?;
            query.append(Predicate::raw(format!("{} = {}", field, number)));
            Ok(())
        })),
    );
}

fn define_string_operators(registry: &mut OperatorRegistry) {
    registry.register(
        "~",
        options("label_contains").arity(Arity::Fixed(1)),
        Some(Behavior::new(Signature::variadic(2), |_, query, field, values| {
            query.append(Predicate::raw(format!(
                "LOWER({}) LIKE '%{}%'",
                field,
                quote_string(&first(values).to_lowercase())
            )));
            Ok(())
        })),
    );

    registry.register(
        "!~",
        options("label_not_contains").arity(Arity::Fixed(1)),
        Some(Behavior::new(Signature::variadic(2), |_, query, field, values| {
            query.append(Predicate::raw(format!(
                "LOWER({}) NOT LIKE '%{}%'",
                field,
                quote_string(&first(values).to_lowercase())
            )));
            Ok(())
        })),
    );
}

fn define_comparison_operators(registry: &mut OperatorRegistry) {
    for (name, label) in [
        ("<", "label_less"),
        (">", "label_greater"),
        ("<=", "label_less_or_equal"),
        (">=", "label_greater_or_equal"),
    ] {
        registry.register(name, options(label).arity(Arity::Fixed(1)), None);
    }

    registry.register(
        "0",
        options("label_none")
            .arity(Arity::Fixed(1))
            .where_clause("%s = 0"),
        None,
    );
}

fn define_null_operators(registry: &mut OperatorRegistry) {
    for (name, label, where_clause) in [
        ("*", "label_all", "%s IS NOT NULL"),
        ("!*", "label_none", "%s IS NULL"),
        ("y", "label_yes", "%s IS NOT NULL"),
        ("n", "label_no", "%s IS NULL"),
    ] {
        registry.register(
            name,
            options(label).arity(Arity::Fixed(0)).where_clause(where_clause),
            None,
        );
    }
}

fn define_relative_date_operators(registry: &mut OperatorRegistry) {
    registry.register(
        "t",
        options("label_today"),
        Some(Behavior::new(Signature::fixed(2), |context, query, field, _| {
            date_range(context, query, field, Some(0), Some(0))
        })),
    );

    registry.register(
        "w",
        options("label_this_week").arity(Arity::Fixed(0)),
        Some(Behavior::new(Signature::with_optional(2, 1), this_week)),
    );

    registry.register(
        "t-",
        options("label_ago"),
        Some(relative_range(|days| (Some(-days), Some(-days)))),
    );
    registry.register(
        "t+",
        options("label_in"),
        Some(relative_range(|days| (Some(days), Some(days)))),
    );
    registry.register(
        "<t-",
        options("label_more_than_ago"),
        Some(relative_range(|days| (None, Some(-days)))),
    );
    registry.register(
        ">t-",
        options("label_less_than_ago"),
        Some(relative_range(|days| (Some(-days), Some(0)))),
    );
    registry.register(
        "<t+",
        options("label_in_less_than"),
        Some(relative_range(|days| (Some(0), Some(days)))),
    );
    registry.register(
        ">t+",
        options("label_in_more_than"),
        Some(relative_range(|days| (Some(days), None))),
    );
}

/// Current week from the configured start day, shifted back by an optional
/// number of days, as a seven day `<>d` range
fn this_week(
    context: &Context<'_>,
    query: &mut dyn PredicateSink,
    field: &str,
    values: &[&str],
) -> Result<(), ReportFilterError> {
    let offset = parse_offset(values.first().copied());
    let today = context.today();

    let from = beginning_of_week(today, context.week_start())
        .and_then(|start| add_days(start, offset.saturating_neg()))
        .ok_or(ValidationError::OffsetOutOfRange(offset))?;
    let to = add_days(from, 7).ok_or(ValidationError::OffsetOutOfRange(offset))?;

    let (from, to) = (quoted_date(from), quoted_date(to));
    context.delegate("<>d", query, field, &[from.as_str(), to.as_str()])
}

fn define_absolute_date_operators(registry: &mut OperatorRegistry) {
    for (name, label, target) in [
        ("<d", "label_less_or_equal", "<="),
        (">d", "label_greater_or_equal", ">="),
        ("=d", "label_date_on", "="),
    ] {
        registry.register(
            name,
            options(label).validate(Validator::Dates),
            Some(Behavior::new(
                Signature::fixed(3),
                move |context, query, field, values| {
                    let value = first(values);
                    if is_blank(value) {
                        return Ok(());
                    }
                    let date = require_date(value)?;
                    context.delegate(target, query, field, &[quoted_date(date).as_str()])
                },
            )),
        );
    }

    registry.register(
        "<>d",
        options("label_between").validate(Validator::Dates),
        Some(Behavior::new(Signature::fixed(4), |_, query, field, values| {
            let from = first(values);
            let to = values.get(1).copied().unwrap_or("");
            if is_blank(from) || is_blank(to) {
                return Ok(());
            }

            let (from, to) = (require_date(from)?, require_date(to)?);
            query.append(Predicate::template(
                "%s BETWEEN '%s' AND '%s'",
                vec![json!(field), json!(quoted_date(from)), json!(quoted_date(to))],
            ));
            Ok(())
        })),
    );
}

/// Parse a date that skipped validation
fn require_date(value: &str) -> Result<chrono::NaiveDate, ValidationError> {
    parse_date(value).ok_or_else(|| ValidationError::InvalidDates(vec![value.to_string()]))
}
