//! # Labels
//!
//! A Rust implementation of Kubernetes label sets.
//!
//! Labels are unordered key/value pairs attached to resources. This library
//! gives them a canonical string form, compares and combines sets, and parses
//! the flat `k1=v1,k2=v2` selector grammar into validated sets.
//!
//! ## Modules
//!
//! - [`labels`] - The label set type, set algebra, selector parsing and equality selectors
//! - [`validation`] - Syntax rules for label keys and values
//! - [`field`] - Field paths used to attribute validation errors

pub mod field;
pub mod labels;
pub mod validation;

pub use field::{ErrorList, FieldError, Path as FieldPath};
pub use labels::{
    conflicts, convert_selector_to_labels_map, convert_selector_to_labels_map_with, equals,
    format_labels, merge, LabelSet, Labels, ParseError, ParseResult, Selector, SetSelector,
    ValidatedSetSelector,
};
pub use validation::{LabelValidator, Validator};
