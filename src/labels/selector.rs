//! Equality selectors built from a LabelSet.

use super::set::{LabelSet, Labels};
use crate::field::{ErrorList, Path};
use crate::validation::{LabelValidator, Validator};
use std::fmt;
use tracing::debug;

/// Selector is a predicate over labels.
pub trait Selector: fmt::Display {
    /// Returns true if `labels` satisfies every requirement of the selector.
    fn matches(&self, labels: &dyn Labels) -> bool;

    /// Returns true if the selector has no requirements, and so matches
    /// everything.
    fn is_empty(&self) -> bool;
}

fn set_matches(requirements: &LabelSet, labels: &dyn Labels) -> bool {
    requirements
        .iter()
        .all(|(key, value)| labels.lookup(key) == Some(value))
}

/// SetSelector owns a copy of the set it was built from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetSelector {
    requirements: LabelSet,
}

impl SetSelector {
    /// Returns the labels every match must carry.
    pub fn requirements(&self) -> &LabelSet {
        &self.requirements
    }
}

impl Selector for SetSelector {
    fn matches(&self, labels: &dyn Labels) -> bool {
        set_matches(&self.requirements, labels)
    }

    fn is_empty(&self) -> bool {
        self.requirements.is_empty()
    }
}

impl fmt::Display for SetSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.requirements, f)
    }
}

/// ValidatedSetSelector borrows a set the caller has already validated.
#[derive(Debug, Clone, Copy)]
pub struct ValidatedSetSelector<'a> {
    requirements: &'a LabelSet,
}

impl Selector for ValidatedSetSelector<'_> {
    fn matches(&self, labels: &dyn Labels) -> bool {
        set_matches(self.requirements, labels)
    }

    fn is_empty(&self) -> bool {
        self.requirements.is_empty()
    }
}

impl fmt::Display for ValidatedSetSelector<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.requirements, f)
    }
}

/// Builds a selector from a set without validating it.
pub fn selector_from_set(labels: &LabelSet) -> SetSelector {
    SetSelector {
        requirements: labels.clone(),
    }
}

/// Builds a selector from a set, validating every key and value first.
///
/// Entries are checked in key order. The first entry that fails is reported
/// with both its key and value errors.
pub fn validated_selector_from_set(labels: &LabelSet) -> Result<SetSelector, ErrorList> {
    let validator = LabelValidator;
    let path = Path::new();
    for (key, value) in labels.sorted_entries() {
        let mut errs = ErrorList::new();
        if let Err(err) = validator.validate_key(key, &path) {
            errs.add(err);
        }
        if let Err(err) = validator.validate_value(key, value, &path) {
            errs.add(err);
        }
        if !errs.is_empty() {
            debug!(key, errors = errs.len(), "label set failed selector validation");
            return Err(errs);
        }
    }
    Ok(selector_from_set(labels))
}

/// Builds a selector over a set the caller vouches for. Nothing is copied
/// or validated.
pub fn selector_from_validated_set(labels: &LabelSet) -> ValidatedSetSelector<'_> {
    ValidatedSetSelector {
        requirements: labels,
    }
}

impl LabelSet {
    /// Converts the set into a selector without validation.
    pub fn as_selector(&self) -> SetSelector {
        selector_from_set(self)
    }

    /// Converts the set into a selector, validating it first.
    pub fn as_validated_selector(&self) -> Result<SetSelector, ErrorList> {
        validated_selector_from_set(self)
    }

    /// Converts the set into a borrowing selector, assuming it is valid.
    pub fn as_selector_pre_validated(&self) -> ValidatedSetSelector<'_> {
        selector_from_validated_set(self)
    }
}
