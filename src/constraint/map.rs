use super::{Bounds, Constraint};

/// Entry count within `bounds`. Applies to any object value, so it works on
/// `object` records as well as `map` types.
pub fn size(bounds: Bounds) -> Constraint {
    Constraint::with_reason_fn(
        "size",
        move |v| v.as_object().is_some_and(|m| bounds.contains(m.len())),
        move |v| match v.as_object() {
            Some(m) => format!("must have {bounds} entries, got {}", m.len()),
            None => format!("must have {bounds} entries"),
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Value;
    use serde_json::json;

    fn accepts(c: &Constraint, v: serde_json::Value) -> bool { c.check(&Value::from(v)) }

    #[test]
    fn size_is_inclusive() {
        let at_least2 = size(Bounds::min(2));
        assert!(accepts(&at_least2, json!({"a": 1, "b": 2})));
        assert!(!accepts(&at_least2, json!({"a": 1})));
        assert!(!accepts(&at_least2, json!({})));

        let two_to_four = size(Bounds::between(2, 4));
        assert!(accepts(&two_to_four, json!({"a": 1, "b": 2, "c": 3, "d": 4})));
        assert!(!accepts(&two_to_four, json!({"a": 1, "b": 2, "c": 3, "d": 4, "e": 5})));
        assert_eq!(
            two_to_four.reason_for(&Value::from(json!({"a": 1}))),
            "must have between 2 and 4 entries, got 1"
        );
    }
}
