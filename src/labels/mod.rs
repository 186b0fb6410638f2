//! Labels module - Label sets, their algebra and the flat selector grammar.
//!
//! A [`LabelSet`] is an unordered key/value map with a canonical, sorted
//! string form `k1=v1,k2=v2`. The same form is accepted back by
//! [`convert_selector_to_labels_map`].

mod algebra;
mod parser;
mod selector;
mod set;


pub use algebra::*;
pub use parser::*;
pub use selector::*;
pub use set::*;
