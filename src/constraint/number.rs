//! Numeric predicates.
//!
//! `NaN` fails every one of them. Bounds compare directly, so `Infinity`
//! satisfies `above`/`at_least` and `-Infinity` satisfies `below`/`at_most`
//! for any finite limit; `integer` and `finite` reject both infinities.
use crate::value::Value;
use super::Constraint;

fn number(v: &Value) -> Option<f64> {
    v.as_f64().filter(|n| !n.is_nan())
}

pub fn integer() -> Constraint {
    Constraint::with_reason_fn(
        "integer",
        |v| number(v).is_some_and(|n| n.is_finite() && n.fract() == 0.0),
        |v| format!("must be an integer, got {v}"),
    )
}

pub fn finite() -> Constraint {
    Constraint::with_reason_fn(
        "finite",
        |v| number(v).is_some_and(f64::is_finite),
        |v| format!("must be a finite number, got {v}"),
    )
}

pub fn above(limit: impl Into<f64>) -> Constraint {
    let limit = limit.into();
    Constraint::new("above", move |v| number(v).is_some_and(|n| n > limit), format!("must be above {limit}"))
}

pub fn below(limit: impl Into<f64>) -> Constraint {
    let limit = limit.into();
    Constraint::new("below", move |v| number(v).is_some_and(|n| n < limit), format!("must be below {limit}"))
}

pub fn at_least(limit: impl Into<f64>) -> Constraint {
    let limit = limit.into();
    Constraint::new("at_least", move |v| number(v).is_some_and(|n| n >= limit), format!("must be at least {limit}"))
}

pub fn at_most(limit: impl Into<f64>) -> Constraint {
    let limit = limit.into();
    Constraint::new("at_most", move |v| number(v).is_some_and(|n| n <= limit), format!("must be at most {limit}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    const INF: f64 = f64::INFINITY;

    fn accepts(c: &Constraint, n: f64) -> bool { c.check(&Value::from(n)) }

    #[test]
    fn integer_accepts_whole_numbers() {
        let int = integer();
        for n in [1.0, 0.0, 123.0, -456.0, 789.00] {
            assert!(accepts(&int, n), "{n}");
        }
        for n in [3.5, -2.4, f64::NAN, INF, -INF] {
            assert!(!accepts(&int, n), "{n}");
        }
        assert_eq!(int.reason_for(&Value::from(3.5)), "must be an integer, got 3.5");
    }

    #[test]
    fn finite_rejects_nan_and_infinities() {
        let fin = finite();
        for n in [1.0, -1.0, 123.456, -789.012] {
            assert!(accepts(&fin, n));
        }
        for n in [f64::NAN, INF, -INF] {
            assert!(!accepts(&fin, n));
        }
    }

    #[test]
    fn above_and_below_are_strict() {
        let above25 = above(25);
        for n in [26.0, 1234.0, INF] { assert!(accepts(&above25, n), "{n}"); }
        for n in [24.0, 25.0, -1.0, -INF, f64::NAN] { assert!(!accepts(&above25, n), "{n}"); }

        let below25 = below(25);
        for n in [24.0, -1234.0, -INF] { assert!(accepts(&below25, n), "{n}"); }
        for n in [26.0, 25.0, 1234.0, INF, f64::NAN] { assert!(!accepts(&below25, n), "{n}"); }
    }

    #[test]
    fn at_least_and_at_most_include_the_limit() {
        let at_least25 = at_least(25);
        for n in [25.0, 26.0, 1234.0, INF] { assert!(accepts(&at_least25, n), "{n}"); }
        for n in [24.0, -1.0, -INF, f64::NAN] { assert!(!accepts(&at_least25, n), "{n}"); }

        let at_most25 = at_most(25);
        for n in [24.0, 25.0, -1234.0, -INF] { assert!(accepts(&at_most25, n), "{n}"); }
        for n in [26.0, 1234.0, INF, f64::NAN] { assert!(!accepts(&at_most25, n), "{n}"); }
    }

    #[test]
    fn non_numbers_are_rejected_not_coerced() {
        assert!(!above(0).check(&Value::from("5")));
        assert!(!integer().check(&Value::Null));
    }
}
