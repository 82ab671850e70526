use crate::value::Value;
use super::{Bounds, Constraint};

pub fn length(bounds: Bounds) -> Constraint {
    Constraint::with_reason_fn(
        "length",
        move |v| v.as_array().is_some_and(|xs| bounds.contains(xs.len())),
        move |v| match v.as_array() {
            Some(xs) => format!("must have {bounds} elements, got {}", xs.len()),
            None => format!("must have {bounds} elements"),
        },
    )
}

/// Membership by strict equality; composite elements compare structurally.
pub fn includes(needle: impl Into<Value>) -> Constraint {
    let needle = needle.into();
    let reason = format!("must include {needle}");
    Constraint::new(
        "includes",
        move |v| v.as_array().is_some_and(|xs| xs.iter().any(|x| x.strict_eq(&needle))),
        reason,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn accepts(c: &Constraint, v: serde_json::Value) -> bool { c.check(&Value::from(v)) }

    #[test]
    fn length_is_inclusive() {
        let range = length(Bounds::between(3, 5));
        assert!(accepts(&range, json!([1, 2, 3])));
        assert!(accepts(&range, json!([1, 2, 3, 4, 5])));
        assert!(!accepts(&range, json!([1, 2])));
        assert!(!accepts(&range, json!([1, 2, 3, 4, 5, 6])));
        assert!(!accepts(&range, json!("abc")));
    }

    #[test]
    fn includes_finds_scalars_and_composites() {
        let has999 = includes(999);
        assert!(accepts(&has999, json!([1, 2, 999, 4])));
        assert!(accepts(&has999, json!([999])));
        assert!(!accepts(&has999, json!([1, 2, 3])));

        let has_pair = includes(Value::from(json!([1, 2])));
        assert!(accepts(&has_pair, json!([[0], [1, 2]])));
        assert!(!accepts(&has_pair, json!([[2, 1]])));
    }
}
