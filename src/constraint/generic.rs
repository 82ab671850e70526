use crate::value::Value;
use super::Constraint;

/// Accepts a value strictly equal to one of `allowed`.
pub fn one_of<I, V>(allowed: I) -> Constraint
where
    I: IntoIterator<Item = V>,
    V: Into<Value>,
{
    let allowed: Vec<Value> = allowed.into_iter().map(Into::into).collect();
    let listed = allowed.iter().map(Value::to_string).collect::<Vec<_>>().join(", ");
    Constraint::new(
        "one_of",
        move |v| allowed.iter().any(|a| a.strict_eq(v)),
        format!("must be one of {listed}"),
    )
}
