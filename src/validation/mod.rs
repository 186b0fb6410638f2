//! Validation module - Syntax rules for label keys and values.
//!
//! Parsing and selector construction call into a [`Validator`] rather than
//! hard-coding the rules, so callers with stricter or looser requirements
//! can substitute their own. [`LabelValidator`] implements the platform's
//! standard rules.

mod rules;

pub use rules::*;

use crate::field::{ErrorList, FieldError, Path};
use crate::labels::LabelSet;

/// Validator decides which label keys and values are acceptable.
pub trait Validator {
    /// Validates a label key. Errors are attributed to `path`.
    fn validate_key(&self, key: &str, path: &Path) -> Result<(), FieldError>;

    /// Validates the value stored under `key`. Errors are attributed to
    /// `path[key]`.
    fn validate_value(&self, key: &str, value: &str, path: &Path) -> Result<(), FieldError>;

    /// Validates every entry of a set in canonical key order, collecting
    /// all errors.
    fn validate_set(&self, labels: &LabelSet, path: &Path) -> ErrorList {
        let mut errs = ErrorList::new();
        for (key, value) in labels.sorted_entries() {
            if let Err(err) = self.validate_key(key, path) {
                errs.add(err);
            }
            if let Err(err) = self.validate_value(key, value, path) {
                errs.add(err);
            }
        }
        errs
    }
}

/// LabelValidator applies the standard label rules: keys are qualified
/// names and values are at most 63 characters of `[-A-Za-z0-9_.]`,
/// starting and ending with an alphanumeric.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LabelValidator;

impl Validator for LabelValidator {
    fn validate_key(&self, key: &str, path: &Path) -> Result<(), FieldError> {
        validate_label_key(key, path)
    }

    fn validate_value(&self, key: &str, value: &str, path: &Path) -> Result<(), FieldError> {
        validate_label_value(key, value, path)
    }
}

/// Validates a label key against the qualified name rules.
pub fn validate_label_key(key: &str, path: &Path) -> Result<(), FieldError> {
    let errs = is_qualified_name(key);
    if errs.is_empty() {
        Ok(())
    } else {
        Err(FieldError::invalid(path.clone(), key, errs.join("; ")))
    }
}

/// Validates a label value against the label value rules.
pub fn validate_label_value(key: &str, value: &str, path: &Path) -> Result<(), FieldError> {
    let errs = is_valid_label_value(value);
    if errs.is_empty() {
        Ok(())
    } else {
        Err(FieldError::invalid(path.key(key), value, errs.join("; ")))
    }
}
