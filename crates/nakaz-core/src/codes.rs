//! Sub-code sets as they appear in form fields and sanction columns.
//!
//! Fields such as `fs1r64` ("0105061112") or `article_parts` ("01,03") hold
//! short codes either comma-joined or simply concatenated. The source data is
//! not reliably delimited, so membership is tested by containment rather than
//! by tokenising: `"0105".contains("05")` is a hit, and so is `"105"`.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A set of short codes stored in its raw legacy string form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CodeSet(String);

impl CodeSet {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// True when `code` occurs anywhere in the raw field.
    ///
    /// An empty field contains nothing, and neither does an empty code.
    pub fn contains(&self, code: &str) -> bool {
        !self.0.is_empty() && !code.is_empty() && self.0.contains(code)
    }

    /// True when any of `codes` is contained.
    pub fn contains_any(&self, codes: &[&str]) -> bool {
        codes.iter().any(|c| self.contains(c))
    }

    /// True when the field carries anything besides commas and whitespace.
    pub fn has_value(&self) -> bool {
        self.0.chars().any(|c| c != ',' && !c.is_whitespace())
    }

    /// Exact comparison against a single code, for fields that hold one value.
    pub fn is(&self, code: &str) -> bool {
        self.0 == code
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<&str> for CodeSet {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for CodeSet {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl fmt::Display for CodeSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
