//! Reporting options.
//!
//! [`GlobalOptions`] are the process-wide defaults; they are passed around
//! explicitly (see [`crate::Verifier`]) rather than living in a static.
//! [`SpecOptions`] override them for a single call. Neither changes what is
//! accepted, only how failures are reported.
use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::path_de;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReasonFormat {
    /// The constraint's reason as-is.
    #[default]
    Plain,
    /// Prefixed with the constraint name: `"at_least: must be at least 25"`.
    Named,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GlobalOptions {
    /// Keep going after the first failing constraint, element, entry or
    /// field, aggregating everything found.
    pub collect_all_errors: bool,
    pub reason_format: ReasonFormat,
}

impl GlobalOptions {
    /// Load from JSON text, e.g. `{"collect_all_errors": true}`. Missing keys
    /// take their defaults; unknown keys are rejected with their path.
    pub fn from_json_str(src: &str) -> Result<Self, Error> {
        path_de::from_str_with_path(src)
            .map_err(|e| Error::Config { path: e.path, message: e.message })
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SpecOptions {
    pub collect_all_errors: Option<bool>,
    pub reason_format: Option<ReasonFormat>,
}

impl SpecOptions {
    pub fn collect_all() -> Self {
        Self { collect_all_errors: Some(true), ..Self::default() }
    }

    pub fn fail_fast() -> Self {
        Self { collect_all_errors: Some(false), ..Self::default() }
    }

    pub fn with_reason_format(mut self, format: ReasonFormat) -> Self {
        self.reason_format = Some(format);
        self
    }

    /// Per-call settings layered over `global`.
    pub fn resolve(&self, global: &GlobalOptions) -> GlobalOptions {
        GlobalOptions {
            collect_all_errors: self.collect_all_errors.unwrap_or(global.collect_all_errors),
            reason_format: self.reason_format.unwrap_or(global.reason_format),
        }
    }
}
