//! Operator records
//!
//! An [`Operator`] is an immutable rule turning a field and user values into a
//! predicate. Operators without an explicit [`Behavior`] use the default
//! template modify; the others carry their own closure.

use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

use chrono::{NaiveDate, NaiveDateTime, Weekday};
use query_object::{Predicate, PredicateSink, ValidationError, Validator};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::core::OperatorRegistry;
use crate::errors::ReportFilterError;

/// Default predicate template: field, SQL operator, quoted value
pub const DEFAULT_WHERE_CLAUSE: &str = "%s %s '%s'";

/// Number of user values an operator expects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Arity {
    Fixed(usize),
    /// Any number of values, including none
    Variadic,
}

impl Arity {
    /// Numeric form, `-1` for variadic
    pub fn as_i32(&self) -> i32 {
        match self {
            Arity::Fixed(count) => i32::try_from(*count).unwrap_or(i32::MAX),
            Arity::Variadic => -1,
        }
    }

    pub fn is_variadic(&self) -> bool {
        matches!(self, Arity::Variadic)
    }
}

/// Parameter shape of a modify behavior.
///
/// Counts include the query and field parameters, which arity inference
/// subtracts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Signature {
    pub required: usize,
    pub optional: usize,
    pub rest: bool,
}

impl Signature {
    /// Exactly `params` parameters
    pub const fn fixed(params: usize) -> Self {
        Self {
            required: params,
            optional: 0,
            rest: false,
        }
    }

    /// `required` parameters followed by a rest list
    pub const fn variadic(required: usize) -> Self {
        Self {
            required,
            optional: 0,
            rest: true,
        }
    }

    /// `required` parameters followed by `optional` defaulted ones
    pub const fn with_optional(required: usize, optional: usize) -> Self {
        Self {
            required,
            optional,
            rest: false,
        }
    }

    /// Arity advertised to callers
    pub fn arity(&self) -> Arity {
        if self.rest || self.optional > 0 {
            Arity::Variadic
        } else {
            Arity::Fixed(self.required.saturating_sub(2))
        }
    }
}

/// Signature of the default modify: query, field, values...
const DEFAULT_SIGNATURE: Signature = Signature::variadic(2);

pub type ModifyFn = dyn Fn(&Context<'_>, &mut dyn PredicateSink, &str, &[&str]) -> Result<(), ReportFilterError>
    + Send
    + Sync;

/// Per-operator override of the default modify
#[derive(Clone)]
pub struct Behavior {
    signature: Signature,
    modify: Arc<ModifyFn>,
}

impl Behavior {
    pub fn new<F>(signature: Signature, modify: F) -> Self
    where
        F: Fn(&Context<'_>, &mut dyn PredicateSink, &str, &[&str]) -> Result<(), ReportFilterError>
            + Send
            + Sync
            + 'static,
    {
        Self {
            signature,
            modify: Arc::new(modify),
        }
    }

    pub fn signature(&self) -> Signature {
        self.signature
    }
}

impl fmt::Debug for Behavior {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Behavior")
            .field("signature", &self.signature)
            .finish_non_exhaustive()
    }
}

/// What an operator runs against while modifying a query
pub struct Context<'a> {
    pub operator: &'a Operator,
    pub registry: &'a OperatorRegistry,
}

impl Context<'_> {
    pub fn now(&self) -> NaiveDateTime {
        self.registry.clock().now()
    }

    pub fn today(&self) -> NaiveDate {
        self.registry.clock().today()
    }

    pub fn week_start(&self) -> Weekday {
        self.registry.week_start()
    }

    /// Run another registered operator's modify on the same query
    pub fn delegate(
        &self,
        name: &str,
        query: &mut dyn PredicateSink,
        field: &str,
        values: &[&str],
    ) -> Result<(), ReportFilterError> {
        trace_log!("[OPERATOR] {} delegates to {}", self.operator.name(), name);
        self.registry
            .find(name)?
            .modify(self.registry, query, field, values)
    }
}

/// Declared options of an operator; everything unset falls back to a default
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OperatorOptions {
    arity: Option<Arity>,
    label: Option<String>,
    sql_operator: Option<String>,
    where_clause: Option<String>,
    validators: Vec<Validator>,
}

impl OperatorOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn arity(mut self, arity: Arity) -> Self {
        self.arity = Some(arity);
        self
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn sql_operator(mut self, sql_operator: impl Into<String>) -> Self {
        self.sql_operator = Some(sql_operator.into());
        self
    }

    pub fn where_clause(mut self, where_clause: impl Into<String>) -> Self {
        self.where_clause = Some(where_clause.into());
        self
    }

    /// Run `validator` before modify; may be given more than once
    pub fn validate(mut self, validator: Validator) -> Self {
        self.validators.push(validator);
        self
    }
}

/// Outcome of [`Operator::apply`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Modification {
    /// This many predicates were appended
    Appended(usize),
    /// Blank input, the query was left alone
    Unchanged,
}

impl Modification {
    pub fn is_unchanged(&self) -> bool {
        matches!(self, Modification::Unchanged)
    }
}

struct CountingSink<'a, Q: ?Sized> {
    inner: &'a mut Q,
    appended: usize,
}

impl<Q: PredicateSink + ?Sized> PredicateSink for CountingSink<'_, Q> {
    fn append(&mut self, predicate: Predicate) {
        self.appended += 1;
        self.inner.append(predicate);
    }
}

/// What a value-input interface needs to know about an operator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperatorDescriptor {
    pub name: String,
    pub label: String,
    /// `-1` for variadic
    pub arity: i32,
}

/// Named filter rule
#[derive(Clone)]
pub struct Operator {
    name: String,
    arity: Arity,
    label: String,
    sql_operator: String,
    where_clause: String,
    validators: Vec<Validator>,
    behavior: Option<Behavior>,
}

impl Operator {
    pub fn new(name: impl Into<String>, options: OperatorOptions, behavior: Option<Behavior>) -> Self {
        let name = name.into();
        let signature = behavior
            .as_ref()
            .map(Behavior::signature)
            .unwrap_or(DEFAULT_SIGNATURE);

        Self {
            arity: options.arity.unwrap_or_else(|| signature.arity()),
            label: options.label.unwrap_or_else(|| name.clone()),
            sql_operator: options.sql_operator.unwrap_or_else(|| name.clone()),
            where_clause: options
                .where_clause
                .unwrap_or_else(|| DEFAULT_WHERE_CLAUSE.to_string()),
            validators: options.validators,
            behavior,
            name,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn arity(&self) -> Arity {
        self.arity
    }

    /// Translation key for the presentation layer
    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn sql_operator(&self) -> &str {
        &self.sql_operator
    }

    pub fn where_clause(&self) -> &str {
        &self.where_clause
    }

    pub fn validators(&self) -> &[Validator] {
        &self.validators
    }

    pub fn describe(&self) -> OperatorDescriptor {
        OperatorDescriptor {
            name: self.name.clone(),
            label: self.label.clone(),
            arity: self.arity.as_i32(),
        }
    }

    /// Run every declared validator, in declaration order
    pub fn validate(&self, values: &[&str]) -> Result<(), ValidationError> {
        self.validators
            .iter()
            .try_for_each(|validator| validator.validate(values))
    }

    /// Append this operator's predicate for `field` to `query`.
    ///
    /// Validators are not run; see [`Operator::apply`].
    pub fn modify(
        &self,
        registry: &OperatorRegistry,
        query: &mut dyn PredicateSink,
        field: &str,
        values: &[&str],
    ) -> Result<(), ReportFilterError> {
        trace_log!("[OPERATOR] {} on {} with {:?}", self.name, field, values);

        match &self.behavior {
            Some(behavior) => {
                let context = Context {
                    operator: self,
                    registry,
                };
                (behavior.modify)(&context, query, field, values)
            }
            None => {
                self.default_modify(query, field, values);
                Ok(())
            }
        }
    }

    /// Validate `values`, then modify `query`
    pub fn apply<Q: PredicateSink + ?Sized>(
        &self,
        registry: &OperatorRegistry,
        query: &mut Q,
        field: &str,
        values: &[&str],
    ) -> Result<Modification, ReportFilterError> {
        self.validate(values)?;

        let mut sink = CountingSink {
            inner: query,
            appended: 0,
        };
        self.modify(registry, &mut sink, field, values)?;

        Ok(match sink.appended {
            0 => Modification::Unchanged,
            count => Modification::Appended(count),
        })
    }

    fn default_modify(&self, query: &mut dyn PredicateSink, field: &str, values: &[&str]) {
        let value = values.first().copied().unwrap_or("");
        query.append(Predicate::template(
            self.where_clause.clone(),
            vec![json!(field), json!(self.sql_operator), json!(value)],
        ));
    }
}

impl fmt::Debug for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Operator")
            .field("name", &self.name)
            .field("arity", &self.arity)
            .field("label", &self.label)
            .field("sql_operator", &self.sql_operator)
            .field("where_clause", &self.where_clause)
            .field("validators", &self.validators)
            .finish_non_exhaustive()
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

impl PartialEq for Operator {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for Operator {}

impl PartialOrd for Operator {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Operator {
    fn cmp(&self, other: &Self) -> Ordering {
        self.name.cmp(&other.name)
    }
}
