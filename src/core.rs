//! Core registry functionality
//!
//! This module contains the operator registry: the table of every known
//! operator, its one-time population with the built-ins, and the process-wide
//! instance most callers resolve operators through.

use std::collections::btree_map::Entry;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::{Arc, OnceLock};

use chrono::Weekday;
use config::AppConfig;
use query_object::dates::weekday_from_number;
use query_object::{Clock, PredicateSink, QueryBuilder, SystemClock};

use crate::builtins;
use crate::errors::ReportFilterError;
use crate::operator::{Behavior, Modification, Operator, OperatorDescriptor, OperatorOptions};

const DEFAULT_OPERATOR: &str = "=";
const INTEGER_OPERATORS: [&str; 4] = ["<", ">", "<=", ">="];
const NULL_OPERATORS: [&str; 2] = ["*", "!*"];
const STRING_OPERATORS: [&str; 2] = ["!~", "~"];
const TIME_OPERATORS: [&str; 6] = ["t", "w", "<>d", ">d", "<d", "=d"];
const DEFAULT_OPERATORS: [&str; 2] = ["=", "!"];

/// Calendar the date operators evaluate against
#[derive(Clone)]
pub struct OperatorSettings {
    week_start: Weekday,
    clock: Arc<dyn Clock>,
}

impl OperatorSettings {
    pub fn new(week_start: Weekday, clock: Arc<dyn Clock>) -> Self {
        Self { week_start, clock }
    }

    /// Settings from loaded configuration, on the system clock.
    ///
    /// An unusable week start falls back to Monday.
    pub fn from_config(config: &AppConfig) -> Self {
        let day = config.operators.first_day_of_week;
        let week_start = weekday_from_number(day).unwrap_or_else(|| {
            debug_log!("[REGISTRY] first_day_of_week {} unusable, assuming Monday", day);
            Weekday::Mon
        });

        Self::new(week_start, Arc::new(SystemClock))
    }

    pub fn with_week_start(mut self, week_start: Weekday) -> Self {
        self.week_start = week_start;
        self
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn week_start(&self) -> Weekday {
        self.week_start
    }

    pub fn clock(&self) -> &dyn Clock {
        self.clock.as_ref()
    }
}

impl Default for OperatorSettings {
    fn default() -> Self {
        Self::new(Weekday::Mon, Arc::new(SystemClock))
    }
}

impl fmt::Debug for OperatorSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OperatorSettings")
            .field("week_start", &self.week_start)
            .finish_non_exhaustive()
    }
}

/// Table of operators keyed by name
#[derive(Debug)]
pub struct OperatorRegistry {
    operators: BTreeMap<String, Operator>,
    settings: OperatorSettings,
    loaded: bool,
}

impl OperatorRegistry {
    /// Empty registry
    pub fn new(settings: OperatorSettings) -> Self {
        Self {
            operators: BTreeMap::new(),
            settings,
            loaded: false,
        }
    }

    /// Registry holding every built-in operator
    pub fn with_builtins(settings: OperatorSettings) -> Self {
        let mut registry = Self::new(settings);
        registry.load();
        registry
    }

    /// Register the built-in operators; only the first call does anything
    pub fn load(&mut self) {
        if self.loaded {
            return;
        }
        self.loaded = true;

        builtins::define_operators(self);
        debug_log!("[REGISTRY] loaded {} operators", self.operators.len());
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// Register an operator under `name` unless one already exists.
    ///
    /// Returns the operator that is registered under `name` afterwards, which is
    /// the earlier one when the name was taken.
    pub fn register(
        &mut self,
        name: impl Into<String>,
        options: OperatorOptions,
        behavior: Option<Behavior>,
    ) -> &Operator {
        match self.operators.entry(name.into()) {
            Entry::Occupied(entry) => {
                debug_log!("[REGISTRY] {:?} already registered, keeping the first", entry.key());
                entry.into_mut()
            }
            Entry::Vacant(entry) => {
                debug_log!("[REGISTRY] registering {:?}", entry.key());
                let operator = Operator::new(entry.key().clone(), options, behavior);
                entry.insert(operator)
            }
        }
    }

    /// Get a registered operator by exact name
    pub fn find(&self, name: &str) -> Result<&Operator, ReportFilterError> {
        self.operators.get(name).ok_or_else(|| {
            debug_log!("[REGISTRY] lookup of undefined operator {:?}", name);
            ReportFilterError::OperatorNotFound(name.to_string())
        })
    }

    pub fn contains(&self, name: &str) -> bool {
        self.operators.contains_key(name)
    }

    /// Every operator, ordered by name
    pub fn all(&self) -> Vec<&Operator> {
        self.operators.values().collect()
    }

    /// Descriptors of every operator, ordered by name
    pub fn descriptors(&self) -> Vec<OperatorDescriptor> {
        self.operators.values().map(Operator::describe).collect()
    }

    pub fn names(&self) -> Vec<&str> {
        self.operators.keys().map(String::as_str).collect()
    }

    pub fn len(&self) -> usize {
        self.operators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operators.is_empty()
    }

    pub fn settings(&self) -> &OperatorSettings {
        &self.settings
    }

    pub fn clock(&self) -> &dyn Clock {
        self.settings.clock()
    }

    pub fn week_start(&self) -> Weekday {
        self.settings.week_start()
    }

    /// The `=` operator
    pub fn default_operator(&self) -> Result<&Operator, ReportFilterError> {
        self.find(DEFAULT_OPERATOR)
    }

    /// `<`, `>`, `<=`, `>=`
    pub fn integer_operators(&self) -> Result<Vec<&Operator>, ReportFilterError> {
        self.find_all(&INTEGER_OPERATORS)
    }

    /// `*`, `!*`
    pub fn null_operators(&self) -> Result<Vec<&Operator>, ReportFilterError> {
        self.find_all(&NULL_OPERATORS)
    }

    /// `!~`, `~`
    pub fn string_operators(&self) -> Result<Vec<&Operator>, ReportFilterError> {
        self.find_all(&STRING_OPERATORS)
    }

    /// `t`, `w`, `<>d`, `>d`, `<d`, `=d`
    pub fn time_operators(&self) -> Result<Vec<&Operator>, ReportFilterError> {
        self.find_all(&TIME_OPERATORS)
    }

    /// `=`, `!`
    pub fn default_operators(&self) -> Result<Vec<&Operator>, ReportFilterError> {
        self.find_all(&DEFAULT_OPERATORS)
    }

    fn find_all(&self, names: &[&str]) -> Result<Vec<&Operator>, ReportFilterError> {
        names.iter().map(|name| self.find(name)).collect()
    }

    /// Run the named operator's modify without validation
    pub fn modify(
        &self,
        name: &str,
        query: &mut dyn PredicateSink,
        field: &str,
        values: &[&str],
    ) -> Result<(), ReportFilterError> {
        self.find(name)?.modify(self, query, field, values)
    }

    /// Validate and apply the named operator
    pub fn apply<Q: PredicateSink + ?Sized>(
        &self,
        name: &str,
        query: &mut Q,
        field: &str,
        values: &[&str],
    ) -> Result<Modification, ReportFilterError> {
        self.find(name)?.apply(self, query, field, values)
    }

    /// Builder-style [`OperatorRegistry::apply`]: the query comes back with
    /// the predicate appended, or unchanged for blank input
    pub fn filter(
        &self,
        mut query: QueryBuilder,
        name: &str,
        field: &str,
        values: &[&str],
    ) -> Result<QueryBuilder, ReportFilterError> {
        self.apply(name, &mut query, field, values)?;
        Ok(query)
    }
}

static REGISTRY: OnceLock<OperatorRegistry> = OnceLock::new();

/// Process-wide registry with the built-ins, built on first use
pub fn load() -> &'static OperatorRegistry {
    REGISTRY.get_or_init(|| OperatorRegistry::with_builtins(OperatorSettings::default()))
}

/// Build the process-wide registry with explicit settings.
///
/// The first initialization wins; when the registry already exists it is
/// returned unchanged and `settings` is dropped.
pub fn init_registry(settings: OperatorSettings) -> &'static OperatorRegistry {
    let mut settings = Some(settings);
    let registry = REGISTRY.get_or_init(|| {
        OperatorRegistry::with_builtins(settings.take().unwrap_or_default())
    });
    if settings.is_some() {
        debug_log!("[REGISTRY] already initialized, ignoring new settings");
    }
    registry
}

/// Look up an operator in the process-wide registry
pub fn find(name: &str) -> Result<&'static Operator, ReportFilterError> {
    load().find(name)
}

/// Resolve an operator name, e.g. `operator_for("t-")`
pub fn operator_for(name: &str) -> Result<&'static Operator, ReportFilterError> {
    find(name)
}
