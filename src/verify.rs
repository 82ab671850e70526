//! Verification engine.
//!
//! Walks a spec tree and a value tree together. Every call is independent:
//! the only state is the path being built and the resolved options, both
//! local to the call.
//!
//! Order of work at a Base node:
//! 1. shape (runtime kind vs type tag), recursing into elements, map entries
//!    or object fields
//! 2. constraints, in declared order, against the input value
//!
//! A failing step skips the rest of the node.
use rayon::prelude::*;
use serde::de::DeserializeOwned;
use tracing::{debug, trace};

use crate::constraint::Constraint;
use crate::error::{Error, FailureKind, ValidationError};
use crate::options::{GlobalOptions, ReasonFormat, SpecOptions};
use crate::path::PathSegment;
use crate::path_de;
use crate::spec::{Spec, SpecNode};
use crate::ty::Type;
use crate::value::{Object, Value};

// ------------------------------- Outcome ---------------------------------- //

/// Exactly one of a verified value or the error explaining the rejection.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Valid(Value),
    Invalid(ValidationError),
}

impl Outcome {
    pub fn is_valid(&self) -> bool { matches!(self, Outcome::Valid(_)) }

    /// The verified (possibly adjusted) value. Asking a failed outcome for
    /// its value is itself an error.
    pub fn value(&self) -> Result<&Value, Error> {
        match self {
            Outcome::Valid(v) => Ok(v),
            Outcome::Invalid(e) => Err(Error::NoValue(e.clone())),
        }
    }

    pub fn err(&self) -> Option<&ValidationError> {
        match self {
            Outcome::Valid(_) => None,
            Outcome::Invalid(e) => Some(e),
        }
    }

    pub fn into_result(self) -> Result<Value, ValidationError> {
        match self {
            Outcome::Valid(v) => Ok(v),
            Outcome::Invalid(e) => Err(e),
        }
    }

    /// Read the verified value into a hand-declared output type.
    pub fn deserialize<T: DeserializeOwned>(&self) -> Result<T, Error> {
        let json = self.value()?.to_json();
        path_de::from_value_with_path(json)
            .map_err(|e| Error::Deserialize { path: e.path, message: e.message })
    }
}

impl From<Outcome> for Result<Value, ValidationError> {
    fn from(outcome: Outcome) -> Self { outcome.into_result() }
}

// ------------------------------ Front API --------------------------------- //

/// Verify with default options (fail fast, plain reasons).
pub fn verify(spec: &Spec, value: &Value) -> Outcome {
    Verifier::default().verify(spec, value, &SpecOptions::default())
}

pub fn verify_with(spec: &Spec, value: &Value, options: &SpecOptions) -> Outcome {
    Verifier::default().verify(spec, value, options)
}

/// Carries the process-wide [`GlobalOptions`]; per-call [`SpecOptions`]
/// are layered on top.
#[derive(Debug, Clone, Default)]
pub struct Verifier {
    global: GlobalOptions,
}

impl Verifier {
    pub fn new(global: GlobalOptions) -> Self { Self { global } }

    pub fn global(&self) -> &GlobalOptions { &self.global }

    pub fn verify(&self, spec: &Spec, value: &Value, options: &SpecOptions) -> Outcome {
        let options = options.resolve(&self.global);
        let mut walk = Walk { options, path: Vec::new() };
        let outcome = match walk.check(spec, Some(value)) {
            Ok(Slot::Present(v)) => Outcome::Valid(v),
            // a present input never verifies to absent
            Ok(Slot::Absent) => Outcome::Valid(value.clone()),
            Err(e) => Outcome::Invalid(e),
        };
        match outcome.err() {
            None => debug!(spec = spec.name().unwrap_or("<anonymous>"), "value verified"),
            Some(e) => debug!(
                spec = spec.name().unwrap_or("<anonymous>"),
                path = %e.display_path(),
                kind = ?e.kind,
                "value rejected"
            ),
        }
        outcome
    }

    /// Verify many values against one spec in parallel. Outcomes come back
    /// in input order.
    pub fn verify_batch(&self, spec: &Spec, values: &[Value], options: &SpecOptions) -> Vec<Outcome> {
        values.par_iter().map(|v| self.verify(spec, v, options)).collect()
    }
}

// ------------------------------- Engine ----------------------------------- //

enum Slot {
    /// Optional field with no value; contributes nothing to its container.
    Absent,
    Present(Value),
}

struct Walk {
    options: GlobalOptions,
    path: Vec<PathSegment>,
}

impl Walk {
    fn at<T>(&mut self, seg: PathSegment, f: impl FnOnce(&mut Self) -> T) -> T {
        self.path.push(seg);
        let out = f(self);
        self.path.pop();
        out
    }

    fn check(&mut self, spec: &Spec, value: Option<&Value>) -> Result<Slot, ValidationError> {
        match spec.node() {
            SpecNode::Aliased { inner, .. } => self.check(inner, value),
            SpecNode::Optional(inner) => match value {
                None => Ok(Slot::Absent),
                Some(_) => self.check(inner, value),
            },
            SpecNode::Either(alternatives) => self.check_either(alternatives, value),
            SpecNode::Adjusted { inner, transform } => match self.check(inner, value)? {
                Slot::Present(v) => Ok(Slot::Present(transform(v))),
                Slot::Absent => Ok(Slot::Absent),
            },
            SpecNode::Base { ty, constraints } => {
                let Some(value) = value else {
                    return Err(ValidationError::missing(&self.path));
                };
                let out = self.check_shape(ty, value)?;
                self.check_constraints(constraints, value)?;
                Ok(Slot::Present(out))
            }
        }
    }

    fn check_either(&mut self, alternatives: &[Spec], value: Option<&Value>) -> Result<Slot, ValidationError> {
        let mut causes = Vec::with_capacity(alternatives.len());
        for (i, alt) in alternatives.iter().enumerate() {
            match self.check(alt, value) {
                Ok(slot) => {
                    trace!(alternative = i, name = alt.name(), "either matched");
                    return Ok(slot);
                }
                Err(e) => causes.push(e),
            }
        }
        let names: Vec<&str> = alternatives.iter().filter_map(Spec::name).collect();
        let mut reason = format!("none of {} alternatives matched", alternatives.len());
        if !names.is_empty() {
            reason.push_str(&format!(" ({})", names.join(", ")));
        }
        Err(ValidationError::composite(&self.path, reason, causes))
    }

    fn check_shape(&mut self, ty: &Type, value: &Value) -> Result<Value, ValidationError> {
        match (ty, value) {
            (Type::Any, v) => Ok(v.clone()),
            (Type::Null, Value::Null)
            | (Type::Boolean, Value::Bool(_))
            | (Type::Number, Value::Number(_))
            | (Type::String, Value::String(_)) => Ok(value.clone()),
            (Type::Array(element), Value::Array(items)) => self.check_array(element, items),
            (Type::Map { key, value: val }, Value::Object(entries)) => self.check_map(key, val, entries),
            (Type::Object(fields), Value::Object(entries)) => self.check_object(fields, entries),
            (ty, v) => Err(ValidationError::shape(&self.path, ty, v.kind())),
        }
    }

    fn check_array(&mut self, element: &Spec, items: &[Value]) -> Result<Value, ValidationError> {
        let mut out = Vec::with_capacity(items.len());
        let mut failures = Vec::new();
        for (i, item) in items.iter().enumerate() {
            match self.at(PathSegment::Index(i), |w| w.check(element, Some(item))) {
                Ok(Slot::Present(v)) => out.push(v),
                Ok(Slot::Absent) => {}
                Err(e) => self.gather(&mut failures, e)?,
            }
        }
        self.finish(failures.len(), items.len(), "elements", failures)?;
        Ok(Value::Array(out))
    }

    fn check_map(&mut self, key: &Spec, value: &Spec, entries: &Object) -> Result<Value, ValidationError> {
        let mut out = Object::with_capacity(entries.len());
        let mut failures = Vec::new();
        let mut failed = 0;
        for (k, v) in entries {
            let checked = self.at(PathSegment::Key(k.clone()), |w| {
                let key_out = w.check(key, Some(&Value::String(k.clone())));
                let value_out = w.check(value, Some(v));
                (key_out, value_out)
            });
            match checked {
                (Ok(key_out), Ok(Slot::Present(value_out))) => {
                    let renamed = map_key(key_out, k);
                    if out.contains_key(&renamed) {
                        failed += 1;
                        let e = self.at(PathSegment::Key(k.clone()), |w| {
                            let reason = format!("duplicate key {renamed:?} after adjustment");
                            ValidationError::new(FailureKind::Constraint, w.path.clone(), vec![reason])
                        });
                        self.gather(&mut failures, e)?;
                    } else {
                        out.insert(renamed, value_out);
                    }
                }
                (Ok(_), Ok(Slot::Absent)) => {}
                (key_out, value_out) => {
                    failed += 1;
                    // a bad key and a bad value are two causes at the same path
                    for e in [key_out.err(), value_out.err()].into_iter().flatten() {
                        self.gather(&mut failures, e)?;
                    }
                }
            }
        }
        self.finish(failed, entries.len(), "entries", failures)?;
        Ok(Value::Object(out))
    }

    fn check_object(&mut self, fields: &indexmap::IndexMap<String, Spec>, entries: &Object) -> Result<Value, ValidationError> {
        let mut out = Object::with_capacity(fields.len());
        let mut failures = Vec::new();
        for (name, spec) in fields {
            match self.at(PathSegment::Key(name.clone()), |w| w.check(spec, entries.get(name))) {
                Ok(Slot::Present(v)) => {
                    out.insert(name.clone(), v);
                }
                Ok(Slot::Absent) => {}
                Err(e) => self.gather(&mut failures, e)?,
            }
        }
        self.finish(failures.len(), fields.len(), "fields", failures)?;
        Ok(Value::Object(out))
    }

    fn check_constraints(&self, constraints: &[Constraint], value: &Value) -> Result<(), ValidationError> {
        let mut reasons = Vec::new();
        for c in constraints {
            if c.check(value) {
                continue;
            }
            trace!(constraint = c.name(), "constraint failed");
            reasons.push(self.render(c, value));
            if !self.options.collect_all_errors {
                break;
            }
        }
        if reasons.is_empty() {
            Ok(())
        } else {
            Err(ValidationError::new(FailureKind::Constraint, self.path.clone(), reasons))
        }
    }

    fn render(&self, c: &Constraint, value: &Value) -> String {
        match self.options.reason_format {
            ReasonFormat::Plain => c.reason_for(value),
            ReasonFormat::Named => format!("{}: {}", c.name(), c.reason_for(value)),
        }
    }

    /// Fail fast hands the child error straight back; collect-all keeps it.
    fn gather(&self, failures: &mut Vec<ValidationError>, e: ValidationError) -> Result<(), ValidationError> {
        if self.options.collect_all_errors {
            failures.push(e);
            Ok(())
        } else {
            Err(e)
        }
    }

    fn finish(&self, failed: usize, total: usize, what: &str, failures: Vec<ValidationError>) -> Result<(), ValidationError> {
        if failures.is_empty() {
            return Ok(());
        }
        let reason = format!("{failed} of {total} {what} invalid");
        Err(ValidationError::composite(&self.path, reason, failures))
    }
}

// an adjusted key may come back as a non-string; its JSON text stands in
fn map_key(key_out: Slot, original: &str) -> String {
    match key_out {
        Slot::Present(Value::String(s)) => s,
        Slot::Present(other) => other.to_string(),
        Slot::Absent => original.to_string(),
    }
}

// ------------------------------- Tests ------------------------------------ //


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::constraint::{number, string, Bounds};
    use crate::spec::{constrain, either, optional};
    use proptest::prelude::*;

    fn any_value() -> impl Strategy<Value = Value> {
        let leaf = prop_oneof![
            Just(Value::Null),
            any::<bool>().prop_map(Value::Bool),
            any::<f64>().prop_map(Value::Number),
            "[a-z0-9 ]{0,12}".prop_map(Value::String),
        ];
        leaf.prop_recursive(3, 32, 6, |inner| {
            prop_oneof![
                prop::collection::vec(inner.clone(), 0..6).prop_map(Value::Array),
                prop::collection::vec(("[a-c]{1,2}", inner), 0..6)
                    .prop_map(|kv| Value::Object(kv.into_iter().collect())),
            ]
        })
    }

    fn mixed_spec() -> Spec {
        either([
            constrain(Type::Number, [number::finite(), number::at_most(1000)]),
            constrain(Type::String, [string::length(Bounds::max(8))]),
            Spec::from(Type::array(optional(Type::Number))),
            Spec::from(Type::map(Type::String, Type::Any)),
            Spec::from(Type::object([("a", optional(Type::Boolean))])),
        ])
    }

    proptest! {
        /// Bare type specs hand back exactly what they were given.
        #[test]
        fn any_returns_input_unchanged(value in any_value()) {
            let out = verify(&Spec::from(Type::Any), &value);
            // Debug text so that NaN compares equal to itself
            prop_assert_eq!(format!("{:?}", out.value().unwrap()), format!("{value:?}"));
        }

        /// Same input, same outcome.
        #[test]
        fn verification_is_deterministic(value in any_value()) {
            let spec = mixed_spec();
            let a = verify(&spec, &value);
            let b = verify(&spec, &value);
            prop_assert_eq!(a.is_valid(), b.is_valid());
            prop_assert_eq!(a.err(), b.err());
        }

        /// Reporting policy never flips acceptance.
        #[test]
        fn policies_agree_on_acceptance(value in any_value()) {
            let spec = mixed_spec();
            let fast = verify_with(&spec, &value, &SpecOptions::fail_fast());
            let all = verify_with(&spec, &value, &SpecOptions::collect_all());
            prop_assert_eq!(fast.is_valid(), all.is_valid());
        }
    }
}
