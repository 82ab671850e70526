//! Named predicates narrowing a base type, plus the built-in catalog.
//!
//! A constraint never panics and never inspects anything but the value it is
//! handed: a number predicate simply returns `false` for a string. Grouped by
//! the base type they are meant for:
//! - [`generic`]: any value
//! - [`number`]: bounds, integrality, finiteness
//! - [`string`]: emptiness, length, regex, affixes
//! - [`array`]: length, membership
//! - [`map`]: entry count
pub mod array;
pub mod generic;
pub mod map;
pub mod number;
pub mod string;

use std::fmt;
use std::sync::Arc;

use crate::value::Value;

pub type Check = Arc<dyn Fn(&Value) -> bool + Send + Sync>;

/// Failure message: either fixed, or rendered from the rejected value.
#[derive(Clone)]
pub enum Reason {
    Fixed(String),
    Rendered(Arc<dyn Fn(&Value) -> String + Send + Sync>),
}

#[derive(Clone)]
pub struct Constraint {
    name: String,
    check: Check,
    reason: Reason,
}

impl Constraint {
    pub fn new<F>(name: impl Into<String>, check: F, reason: impl Into<String>) -> Self
    where
        F: Fn(&Value) -> bool + Send + Sync + 'static,
    {
        Self { name: name.into(), check: Arc::new(check), reason: Reason::Fixed(reason.into()) }
    }

    pub fn with_reason_fn<F, R>(name: impl Into<String>, check: F, reason: R) -> Self
    where
        F: Fn(&Value) -> bool + Send + Sync + 'static,
        R: Fn(&Value) -> String + Send + Sync + 'static,
    {
        Self { name: name.into(), check: Arc::new(check), reason: Reason::Rendered(Arc::new(reason)) }
    }

    pub fn name(&self) -> &str { &self.name }

    pub fn check(&self, value: &Value) -> bool { (self.check)(value) }

    pub fn reason_for(&self, value: &Value) -> String {
        match &self.reason {
            Reason::Fixed(s) => s.clone(),
            Reason::Rendered(f) => f(value),
        }
    }
}

impl fmt::Debug for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Constraint").field(&self.name).finish()
    }
}

// -------------------------------- Bounds ---------------------------------- //

/// Inclusive size bounds; either end may be open.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Bounds {
    pub min: Option<usize>,
    pub max: Option<usize>,
}

impl Bounds {
    pub fn min(min: usize) -> Self { Self { min: Some(min), max: None } }
    pub fn max(max: usize) -> Self { Self { min: None, max: Some(max) } }
    pub fn between(min: usize, max: usize) -> Self { Self { min: Some(min), max: Some(max) } }

    pub fn contains(&self, n: usize) -> bool {
        self.min.is_none_or(|min| n >= min) && self.max.is_none_or(|max| n <= max)
    }
}

impl fmt::Display for Bounds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.min, self.max) {
            (Some(lo), Some(hi)) if lo == hi => write!(f, "exactly {lo}"),
            (Some(lo), Some(hi)) => write!(f, "between {lo} and {hi}"),
            (Some(lo), None) => write!(f, "at least {lo}"),
            (None, Some(hi)) => write!(f, "at most {hi}"),
            (None, None) => f.write_str("any"),
        }
    }
}
