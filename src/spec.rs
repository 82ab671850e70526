//! Spec tree and its combinators.
//!
//! A [`Spec`] is an immutable, reference-counted node. Combinators never
//! mutate: `optional`, `either`, `adjust` and `alias` each return a new node
//! wrapping their input, so trees are acyclic by construction and can be
//! shared freely, across threads included.
use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;

use crate::constraint::Constraint;
use crate::error::Error;
use crate::ty::Type;
use crate::value::Value;

pub type Transform = Arc<dyn Fn(Value) -> Value + Send + Sync>;

/// `{alias name → aliased spec}`; keys in first-discovery order.
pub type AliasMap = IndexMap<String, Spec>;

#[derive(Clone)]
pub struct Spec(Arc<SpecNode>);

pub enum SpecNode {
    /// Shape plus constraints, evaluated in order.
    Base { ty: Type, constraints: Vec<Constraint> },
    /// The field may be absent.
    Optional(Spec),
    /// First alternative to succeed wins. Never empty.
    Either(Vec<Spec>),
    /// `transform` runs on the inner spec's successful, present output.
    Adjusted { inner: Spec, transform: Transform },
    /// Naming only; verification ignores it.
    Aliased { name: String, inner: Spec },
}

impl Spec {
    fn wrap(node: SpecNode) -> Self { Spec(Arc::new(node)) }

    pub fn node(&self) -> &SpecNode { &self.0 }

    pub fn optional(self) -> Spec { optional(self) }

    pub fn adjust<F>(self, transform: F) -> Spec
    where
        F: Fn(Value) -> Value + Send + Sync + 'static,
    {
        adjust(self, transform)
    }

    pub fn alias(self, name: impl Into<String>) -> Spec { alias(name, self) }

    pub fn definition(&self) -> Spec { definition_of(self) }

    pub fn aliases(&self) -> AliasMap { extract_aliases(self) }

    /// First alias found looking through alias/adjust layers.
    pub fn name(&self) -> Option<&str> {
        match self.node() {
            SpecNode::Aliased { name, .. } => Some(name.as_str()),
            SpecNode::Adjusted { inner, .. } => inner.name(),
            _ => None,
        }
    }

    /// Same node, not merely an equal-looking one.
    pub fn ptr_eq(&self, other: &Spec) -> bool { Arc::ptr_eq(&self.0, &other.0) }
}

impl From<Type> for Spec {
    fn from(ty: Type) -> Self { constrain(ty, []) }
}

impl fmt::Debug for Spec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { fmt::Debug::fmt(self.node(), f) }
}

impl fmt::Debug for SpecNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SpecNode::Base { ty, constraints } => f
                .debug_struct("Base")
                .field("ty", ty)
                .field("constraints", constraints)
                .finish(),
            SpecNode::Optional(inner) => f.debug_tuple("Optional").field(inner).finish(),
            SpecNode::Either(alts) => f.debug_tuple("Either").field(alts).finish(),
            SpecNode::Adjusted { inner, .. } => f.debug_struct("Adjusted").field("inner", inner).finish_non_exhaustive(),
            SpecNode::Aliased { name, inner } => f
                .debug_struct("Aliased")
                .field("name", name)
                .field("inner", inner)
                .finish(),
        }
    }
}

// ------------------------------ Combinators ------------------------------- //

pub fn constrain(ty: Type, constraints: impl IntoIterator<Item = Constraint>) -> Spec {
    Spec::wrap(SpecNode::Base { ty, constraints: constraints.into_iter().collect() })
}

pub fn optional(spec: impl Into<Spec>) -> Spec {
    Spec::wrap(SpecNode::Optional(spec.into()))
}

/// Panics when `alternatives` is empty; see [`try_either`].
pub fn either(alternatives: impl IntoIterator<Item = Spec>) -> Spec {
    match try_either(alternatives) {
        Ok(spec) => spec,
        Err(err) => panic!("{err}"),
    }
}

pub fn try_either(alternatives: impl IntoIterator<Item = Spec>) -> Result<Spec, Error> {
    let alternatives: Vec<Spec> = alternatives.into_iter().collect();
    if alternatives.is_empty() {
        return Err(Error::EmptyEither);
    }
    Ok(Spec::wrap(SpecNode::Either(alternatives)))
}

pub fn adjust<F>(spec: impl Into<Spec>, transform: F) -> Spec
where
    F: Fn(Value) -> Value + Send + Sync + 'static,
{
    Spec::wrap(SpecNode::Adjusted { inner: spec.into(), transform: Arc::new(transform) })
}

pub fn alias(name: impl Into<String>, spec: impl Into<Spec>) -> Spec {
    Spec::wrap(SpecNode::Aliased { name: name.into(), inner: spec.into() })
}

/// Strips alias and adjust layers down to the nearest Base, Optional or
/// Either node.
pub fn definition_of(spec: &Spec) -> Spec {
    let mut current = spec;
    loop {
        match current.node() {
            SpecNode::Aliased { inner, .. } | SpecNode::Adjusted { inner, .. } => current = inner,
            _ => return current.clone(),
        }
    }
}

/// Depth-first, left-to-right walk collecting every alias. A repeated name
/// keeps its first position but takes the last spec seen.
pub fn extract_aliases(spec: &Spec) -> AliasMap {
    let mut out = AliasMap::new();
    collect_aliases(spec, &mut out);
    out
}

fn collect_aliases(spec: &Spec, out: &mut AliasMap) {
    match spec.node() {
        SpecNode::Aliased { name, inner } => {
            out.insert(name.clone(), inner.clone());
            collect_aliases(inner, out);
        }
        SpecNode::Optional(inner) | SpecNode::Adjusted { inner, .. } => collect_aliases(inner, out),
        SpecNode::Either(alts) => {
            for alt in alts {
                collect_aliases(alt, out);
            }
        }
        SpecNode::Base { ty, .. } => match ty {
            Type::Array(element) => collect_aliases(element, out),
            Type::Map { key, value } => {
                collect_aliases(key, out);
                collect_aliases(value, out);
            }
            Type::Object(fields) => {
                for field in fields.values() {
                    collect_aliases(field, out);
                }
            }
            Type::Any | Type::Null | Type::Boolean | Type::Number | Type::String => {}
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constraint::number;

    fn int() -> Spec { constrain(Type::Number, [number::integer()]) }

    #[test]
    fn combinators_wrap_without_touching_the_input() {
        let base = int();
        let opt = optional(base.clone());
        match opt.node() {
            SpecNode::Optional(inner) => assert!(inner.ptr_eq(&base)),
            other => panic!("unexpected {other:?}"),
        }
        assert!(matches!(base.node(), SpecNode::Base { constraints, .. } if constraints.len() == 1));
    }

    #[test]
    #[should_panic(expected = "at least one alternative")]
    fn either_without_alternatives_panics() {
        either(Vec::<Spec>::new());
    }

    #[test]
    fn try_either_reports_empty_alternatives() {
        assert!(matches!(try_either([]), Err(Error::EmptyEither)));
        assert!(try_either([int()]).is_ok());
    }

    #[test]
    fn definition_of_strips_alias_and_adjust_layers() {
        let base = int();
        let decorated = alias("outer", adjust(alias("inner", base.clone()), |v| v));
        assert!(definition_of(&decorated).ptr_eq(&base));

        let opt = optional(base);
        assert!(definition_of(&alias("o", opt.clone())).ptr_eq(&opt));
    }

    #[test]
    fn name_looks_through_adjustments() {
        let spec = alias("count", int()).adjust(|v| v);
        assert_eq!(spec.name(), Some("count"));
        assert_eq!(int().name(), None);
    }

    #[test]
    fn extract_aliases_reaches_every_child_position() {
        let id = alias("id", Type::String);
        let tag = alias("tag", Type::String);
        let score = alias("score", int());
        let root = alias(
            "root",
            Type::object([
                ("id", optional(id)),
                ("tags", Spec::from(Type::array(tag))),
                ("scores", Spec::from(Type::map(Type::String, adjust(score, |v| v)))),
                ("either", either([alias("left", Type::Null), alias("right", Type::Boolean)])),
            ]),
        );
        let aliases = extract_aliases(&root);
        let names: Vec<&str> = aliases.keys().map(String::as_str).collect();
        assert_eq!(names, ["root", "id", "tag", "score", "left", "right"]);
    }

    #[test]
    fn extract_aliases_last_write_wins() {
        let first = int();
        let second = constrain(Type::String, []);
        let root = either([alias("dup", first), alias("dup", second.clone())]);
        let aliases = extract_aliases(&root);
        assert_eq!(aliases.len(), 1);
        assert!(aliases["dup"].ptr_eq(&second));
    }
}
