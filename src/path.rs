use std::fmt;

use serde::Serialize;

/// One step from the verification root: an object/map key or an array index.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(untagged)]
pub enum PathSegment {
    Key(String),
    Index(usize),
}

impl From<&str> for PathSegment {
    fn from(k: &str) -> Self { PathSegment::Key(k.to_string()) }
}

impl From<String> for PathSegment {
    fn from(k: String) -> Self { PathSegment::Key(k) }
}

impl From<usize> for PathSegment {
    fn from(i: usize) -> Self { PathSegment::Index(i) }
}

/// Renders a path JSONPath-style: `$`, `$.items[2].name`, `$["odd key"]`.
pub struct DisplayPath<'a>(pub &'a [PathSegment]);

impl fmt::Display for DisplayPath<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("$")?;
        for seg in self.0 {
            match seg {
                PathSegment::Index(i) => write!(f, "[{i}]")?,
                PathSegment::Key(k) if is_plain_key(k) => write!(f, ".{k}")?,
                PathSegment::Key(k) => write!(f, "[{}]", serde_json::Value::from(k.as_str()))?,
            }
        }
        Ok(())
    }
}

fn is_plain_key(k: &str) -> bool {
    let mut chars = k.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_keys_and_indices() {
        let path = vec![PathSegment::from("items"), PathSegment::from(2usize), PathSegment::from("name")];
        assert_eq!(DisplayPath(&path).to_string(), "$.items[2].name");
        assert_eq!(DisplayPath(&[]).to_string(), "$");
    }

    #[test]
    fn quotes_keys_that_are_not_identifiers() {
        let path = vec![PathSegment::from("odd key"), PathSegment::from("2x")];
        assert_eq!(DisplayPath(&path).to_string(), r#"$["odd key"]["2x"]"#);
    }
}
