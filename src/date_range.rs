//! Relative date ranges
//!
//! Every relative date operator reduces its user offset to a `(from, to)` pair
//! of day offsets from today and lets [`date_range`] turn that into bounds.

use query_object::dates::{add_days, end_of_day};
use query_object::quoting::quoted_datetime;
use query_object::{Predicate, PredicateSink, ValidationError};
use serde_json::json;

use crate::errors::ReportFilterError;
use crate::operator::{Behavior, Context, Signature};

/// Append the bounds of a day range relative to today.
///
/// `from` adds `field > end of (yesterday + from)`, `to` adds
/// `field <= end of (today + to)`. `None` leaves that side open. Both bounds
/// are computed before anything is appended.
pub fn date_range(
    context: &Context<'_>,
    query: &mut dyn PredicateSink,
    field: &str,
    from: Option<i64>,
    to: Option<i64>,
) -> Result<(), ReportFilterError> {
    let today = context.today();

    let lower = from
        .map(|days| {
            add_days(today, -1)
                .and_then(|yesterday| add_days(yesterday, days))
                .ok_or(ValidationError::OffsetOutOfRange(days))
        })
        .transpose()?;
    let upper = to
        .map(|days| add_days(today, days).ok_or(ValidationError::OffsetOutOfRange(days)))
        .transpose()?;

    if let Some(day) = lower {
        query.append(Predicate::template(
            "%s > '%s'",
            vec![json!(field), json!(quoted_datetime(end_of_day(day)))],
        ));
    }
    if let Some(day) = upper {
        query.append(Predicate::template(
            "%s <= '%s'",
            vec![json!(field), json!(quoted_datetime(end_of_day(day)))],
        ));
    }

    Ok(())
}

/// Behavior taking one day offset and mapping it to a `(from, to)` range
pub fn relative_range<F>(range: F) -> Behavior
where
    F: Fn(i64) -> (Option<i64>, Option<i64>) + Send + Sync + 'static,
{
    Behavior::new(Signature::fixed(3), move |context, query, field, values| {
        let (from, to) = range(parse_offset(values.first().copied()));
        date_range(context, query, field, from, to)
    })
}

/// Lenient day count: the leading integer of the value, or 0.
///
/// `"3"`, `" 3 days"` and `"+3"` all give 3; blank or non-numeric input gives 0.
/// Values beyond `i64` saturate.
pub fn parse_offset(value: Option<&str>) -> i64 {
    let Some(value) = value else {
        return 0;
    };

    let trimmed = value.trim_start();
    let (negative, digits) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let magnitude = digits
        .chars()
        .map_while(|c| c.to_digit(10))
        .fold(0i64, |acc, digit| {
            acc.saturating_mul(10).saturating_add(i64::from(digit))
        });

    if negative { -magnitude } else { magnitude }
}
