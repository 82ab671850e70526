//! Composable value specs and a verifier for them.
//!
//! Build a [`Spec`] once from a [`Type`] plus [`Constraint`]s, decorate it
//! with combinators, then check any number of [`Value`]s against it:
//!
//! ```
//! use json_spec::{constrain, optional, verify, Spec, Type, Value};
//! use json_spec::constraint::{number, string};
//!
//! let user: Spec = Type::object([
//!     ("name", constrain(Type::String, [string::not_empty()])),
//!     ("age", optional(constrain(Type::Number, [number::integer(), number::at_least(0)]))),
//! ]).into();
//! let value = Value::from(serde_json::json!({"name": "Ada", "age": -1}));
//! let err = verify(&user, &value).into_result().unwrap_err();
//! assert_eq!(err.to_string(), "$.age: must be at least 0");
//! ```
pub mod constraint;
pub mod error;
pub mod options;
pub mod path;
pub mod spec;
pub mod ty;
pub mod value;
pub mod verify;

mod path_de;

pub use constraint::{Bounds, Constraint};
pub use error::{Error, FailureKind, ValidationError};
pub use options::{GlobalOptions, ReasonFormat, SpecOptions};
pub use path::PathSegment;
pub use spec::{
    adjust, alias, constrain, definition_of, either, extract_aliases, optional, try_either,
    AliasMap, Spec, SpecNode,
};
pub use ty::Type;
pub use value::Value;
pub use verify::{verify, verify_with, Outcome, Verifier};
