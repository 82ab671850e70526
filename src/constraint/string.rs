//! String predicates. Lengths count Unicode scalar values.
use regex::Regex;

use crate::error::Error;
use crate::value::Value;
use super::{Bounds, Constraint};

fn char_count(v: &Value) -> Option<usize> {
    v.as_str().map(|s| s.chars().count())
}

pub fn not_empty() -> Constraint {
    Constraint::new("not_empty", |v| v.as_str().is_some_and(|s| !s.is_empty()), "must not be empty")
}

pub fn length(bounds: Bounds) -> Constraint {
    Constraint::with_reason_fn(
        "length",
        move |v| char_count(v).is_some_and(|n| bounds.contains(n)),
        move |v| match char_count(v) {
            Some(n) => format!("length must be {bounds}, got {n}"),
            None => format!("length must be {bounds}"),
        },
    )
}

/// Compiles `pattern` once. Anchor it (`^…$`) for a full match; otherwise any
/// match inside the string is enough.
pub fn regex(pattern: &str) -> Result<Constraint, Error> {
    let rx = Regex::new(pattern).map_err(|source| Error::Regex {
        pattern: pattern.to_string(),
        source,
    })?;
    Ok(matches(rx))
}

pub fn matches(rx: Regex) -> Constraint {
    let reason = format!("must match /{}/", rx.as_str());
    Constraint::new("regex", move |v| v.as_str().is_some_and(|s| rx.is_match(s)), reason)
}

pub fn starts_with(prefix: impl Into<String>) -> Constraint {
    let prefix = prefix.into();
    let reason = format!("must start with {:?}", prefix);
    Constraint::new("starts_with", move |v| v.as_str().is_some_and(|s| s.starts_with(prefix.as_str())), reason)
}

pub fn ends_with(suffix: impl Into<String>) -> Constraint {
    let suffix = suffix.into();
    let reason = format!("must end with {:?}", suffix);
    Constraint::new("ends_with", move |v| v.as_str().is_some_and(|s| s.ends_with(suffix.as_str())), reason)
}
