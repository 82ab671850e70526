use std::fmt;

use serde::Serialize;
use thiserror::Error;

use crate::path::{DisplayPath, PathSegment};

// ------------------------------ Taxonomy ---------------------------------- //

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// Runtime kind does not match the spec's type tag.
    Shape,
    /// A required object field is absent.
    Missing,
    /// Shape matched but one or more constraints rejected the value.
    Constraint,
    /// Every `either` alternative failed, or several children failed under
    /// collect-all reporting. Details live in `causes`.
    Composite,
}

// ---------------------------- ValidationError ----------------------------- //

/// A failure located at `path` (root → failing node).
///
/// Composite failures are not flattened: each cause keeps its own, usually
/// deeper, path. Use [`ValidationError::leaves`] for a flat list.
#[derive(Debug, Clone, PartialEq, Serialize, Error)]
#[error("{}: {}", self.display_path(), self.reasons.join("; "))]
pub struct ValidationError {
    pub path: Vec<PathSegment>,
    pub reasons: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub causes: Vec<ValidationError>,
    pub kind: FailureKind,
}

impl ValidationError {
    pub fn new(kind: FailureKind, path: Vec<PathSegment>, reasons: Vec<String>) -> Self {
        Self { path, reasons, causes: Vec::new(), kind }
    }

    pub(crate) fn shape(path: &[PathSegment], expected: impl fmt::Display, found: impl fmt::Display) -> Self {
        Self::new(FailureKind::Shape, path.to_vec(), vec![format!("expected {expected}, found {found}")])
    }

    pub(crate) fn missing(path: &[PathSegment]) -> Self {
        Self::new(FailureKind::Missing, path.to_vec(), vec!["is required".to_string()])
    }

    pub(crate) fn composite(path: &[PathSegment], reason: String, causes: Vec<ValidationError>) -> Self {
        Self { path: path.to_vec(), reasons: vec![reason], causes, kind: FailureKind::Composite }
    }

    pub fn display_path(&self) -> DisplayPath<'_> {
        DisplayPath(&self.path)
    }

    /// Failures with no further causes, depth-first in cause order.
    pub fn leaves(&self) -> Vec<&ValidationError> {
        fn walk<'a>(e: &'a ValidationError, out: &mut Vec<&'a ValidationError>) {
            if e.causes.is_empty() {
                out.push(e);
            }
            for c in &e.causes {
                walk(c, out);
            }
        }
        let mut out = Vec::new();
        walk(self, &mut out);
        out
    }

    /// Multi-line, indented rendering of the whole cause tree.
    pub fn report(&self) -> String {
        fn walk(e: &ValidationError, depth: usize, out: &mut String) {
            out.push_str(&format!("{:indent$}{e}\n", "", indent = depth * 2));
            for c in &e.causes {
                walk(c, depth + 1, out);
            }
        }
        let mut out = String::new();
        walk(self, 0, &mut out);
        out
    }
}

// ------------------------------- Error ------------------------------------ //

/// Operational errors: misuse of the API, bad spec construction input, or
/// failures of the serde edges. Never used for a rejected value.
#[derive(Debug, Error)]
pub enum Error {
    #[error("value requested from a failed verification: {0}")]
    NoValue(ValidationError),

    #[error("`either` needs at least one alternative")]
    EmptyEither,

    #[error("invalid regex pattern `{pattern}`: {source}")]
    Regex {
        pattern: String,
        source: regex::Error,
    },

    #[error("at JSON path {path} → {message}")]
    Deserialize { path: String, message: String },

    #[error("invalid options at {path} → {message}")]
    Config { path: String, message: String },
}
