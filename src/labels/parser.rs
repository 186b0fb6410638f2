//! Parsing of the flat `k1=v1,k2=v2` selector grammar into a LabelSet.

use super::set::LabelSet;
use crate::field::{FieldError, Path};
use crate::validation::{LabelValidator, Validator};
use std::str::FromStr;
use thiserror::Error;
use tracing::{debug, trace};

/// ParseError describes why a selector string was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// A comma separated token did not contain exactly one `=`.
    #[error("invalid selector: [{}]", .fragments.join(" "))]
    Syntax { fragments: Vec<String> },

    /// The validator rejected a key or value.
    #[error(transparent)]
    Validation(#[from] FieldError),
}

impl ParseError {
    /// Creates a syntax error from the pieces a token split into.
    pub fn syntax<I, S>(fragments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        ParseError::Syntax {
            fragments: fragments.into_iter().map(Into::into).collect(),
        }
    }

    /// Returns true if this is a syntax error.
    pub fn is_syntax(&self) -> bool {
        matches!(self, ParseError::Syntax { .. })
    }

    /// Returns true if this is a validation error.
    pub fn is_validation(&self) -> bool {
        matches!(self, ParseError::Validation(_))
    }
}

/// ParseResult is the outcome of parsing a selector.
///
/// On failure `labels` still holds every entry accepted before the failing
/// token, so callers can inspect partial progress.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseResult {
    pub labels: LabelSet,
    pub error: Option<ParseError>,
}

impl ParseResult {
    fn ok(labels: LabelSet) -> Self {
        ParseResult {
            labels,
            error: None,
        }
    }

    fn failed(labels: LabelSet, error: ParseError) -> Self {
        ParseResult {
            labels,
            error: Some(error),
        }
    }

    /// Returns true if parsing completed without error.
    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }

    /// Converts into a Result, discarding any partial labels on failure.
    pub fn into_result(self) -> Result<LabelSet, ParseError> {
        match self.error {
            None => Ok(self.labels),
            Some(err) => Err(err),
        }
    }

    /// Returns the (possibly partial) labels and the error, if any.
    pub fn into_parts(self) -> (LabelSet, Option<ParseError>) {
        (self.labels, self.error)
    }
}

/// Converts a selector string such as `"app=web,tier=frontend"` into a
/// LabelSet, validating keys and values with the standard label rules.
///
/// Errors are attributed to `path`.
pub fn convert_selector_to_labels_map(selector: &str, path: &Path) -> ParseResult {
    convert_selector_to_labels_map_with(selector, &LabelValidator, path)
}

/// Converts a selector string into a LabelSet using a caller supplied
/// validator.
///
/// Parsing stops at the first bad token. A key repeated later in the
/// selector overwrites the earlier value.
pub fn convert_selector_to_labels_map_with<V>(selector: &str, validator: &V, path: &Path) -> ParseResult
where
    V: Validator + ?Sized,
{
    let mut labels = LabelSet::new();

    if selector.is_empty() {
        return ParseResult::ok(labels);
    }

    for token in selector.split(',') {
        let parts: Vec<&str> = token.split('=').collect();
        let [key, value] = parts.as_slice() else {
            debug!(token, "selector token is not a single key=value pair");
            return ParseResult::failed(labels, ParseError::syntax(parts.iter().copied()));
        };

        let key = key.trim();
        if let Err(err) = validator.validate_key(key, path) {
            debug!(key, error = %err, "selector key rejected");
            return ParseResult::failed(labels, err.into());
        }
        let value = value.trim();
        if let Err(err) = validator.validate_value(key, value, path) {
            debug!(key, value, error = %err, "selector value rejected");
            return ParseResult::failed(labels, err.into());
        }

        trace!(key, value, "parsed selector label");
        labels.insert(key, value);
    }

    ParseResult::ok(labels)
}

impl FromStr for LabelSet {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        convert_selector_to_labels_map(s, &Path::new()).into_result()
    }
}
