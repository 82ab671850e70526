// Base shapes a spec node can expect. Container tags carry child specs, so
// the element/key/value/field positions can themselves be fully constrained.

use std::fmt;

use indexmap::IndexMap;

use crate::spec::Spec;

#[derive(Debug, Clone)]
pub enum Type {
    Any,                                // accepts every value, no shape check
    Null,                               // exactly null
    Boolean,
    Number,
    String,
    Array(Spec),                        // homogeneous list
    Map { key: Spec, value: Spec },     // open-ended string-keyed dictionary
    Object(IndexMap<String, Spec>),     // fixed-key record, fields in declared order
}

impl Type {
    pub fn array(element: impl Into<Spec>) -> Self {
        Type::Array(element.into())
    }

    pub fn map(key: impl Into<Spec>, value: impl Into<Spec>) -> Self {
        Type::Map { key: key.into(), value: value.into() }
    }

    pub fn object<I, K, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = (K, S)>,
        K: Into<String>,
        S: Into<Spec>,
    {
        Type::Object(fields.into_iter().map(|(k, s)| (k.into(), s.into())).collect())
    }

    pub fn name(&self) -> &'static str {
        match self {
            Type::Any => "any",
            Type::Null => "null",
            Type::Boolean => "boolean",
            Type::Number => "number",
            Type::String => "string",
            Type::Array(_) => "array",
            Type::Map { .. } => "map",
            Type::Object(_) => "object",
        }
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
