//! Field validation errors.

use super::path::Path;
use std::fmt;
use thiserror::Error;

/// FieldError reports a value rejected at a particular field path.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{}Invalid value: {value:?}: {detail}", path_prefix(.path))]
pub struct FieldError {
    /// Where the rejected value lives.
    pub path: Path,
    /// The rejected value.
    pub value: String,
    /// Human readable description of every rule the value broke.
    pub detail: String,
}

fn path_prefix(path: &Path) -> String {
    if path.is_empty() {
        String::new()
    } else {
        format!("{}: ", path)
    }
}

impl FieldError {
    /// Creates an invalid value error.
    pub fn invalid(path: Path, value: impl Into<String>, detail: impl Into<String>) -> Self {
        FieldError {
            path,
            value: value.into(),
            detail: detail.into(),
        }
    }
}

/// ErrorList is an ordered collection of field errors.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorList {
    errors: Vec<FieldError>,
}

impl ErrorList {
    /// Creates a new empty ErrorList.
    pub fn new() -> Self {
        ErrorList { errors: Vec::new() }
    }

    /// Adds an error.
    pub fn add(&mut self, error: FieldError) {
        self.errors.push(error);
    }

    /// Returns true if there are no errors.
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Returns the number of errors.
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Returns the first error, if any.
    pub fn first(&self) -> Option<&FieldError> {
        self.errors.first()
    }

    /// Returns an iterator over the errors.
    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.errors.iter()
    }

    /// Converts to a Result, failing if any error was recorded.
    pub fn into_result(self) -> Result<(), ErrorList> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl IntoIterator for ErrorList {
    type Item = FieldError;
    type IntoIter = std::vec::IntoIter<FieldError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.into_iter()
    }
}

impl fmt::Display for ErrorList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, err) in self.errors.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{}", err)?;
        }
        Ok(())
    }
}

impl std::error::Error for ErrorList {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_error_display() {
        let err = FieldError::invalid(
            Path::root("metadata").child("labels").key("app"),
            "bad value",
            "must be short",
        );
        assert_eq!(
            err.to_string(),
            r#"metadata.labels[app]: Invalid value: "bad value": must be short"#
        );
    }

    #[test]
    fn test_field_error_display_at_root() {
        let err = FieldError::invalid(Path::new(), "-x", "bad");
        assert_eq!(err.to_string(), r#"Invalid value: "-x": bad"#);
    }

    #[test]
    fn test_error_list_collection() {
        let mut errs = ErrorList::new();
        assert!(errs.is_empty());
        assert!(errs.clone().into_result().is_ok());

        errs.add(FieldError::invalid(Path::new(), "a", "first"));
        errs.add(FieldError::invalid(Path::new(), "b", "second"));
        assert_eq!(errs.len(), 2);
        assert_eq!(errs.first().map(|e| e.value.as_str()), Some("a"));
        assert_eq!(
            errs.to_string(),
            "Invalid value: \"a\": first\nInvalid value: \"b\": second"
        );
        assert!(errs.into_result().is_err());
    }
}
