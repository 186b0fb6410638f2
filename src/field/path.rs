//! Field path element and path types.

/// PathElement represents one step from a parent field to a child.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathElement {
    /// Named child field of a struct or object.
    Child(String),
    /// Map key, rendered as `[key]`.
    Key(String),
    /// List index, rendered as `[i]`.
    Index(usize),
}

impl PathElement {
    /// Creates a new child path element.
    pub fn child(name: impl Into<String>) -> Self {
        PathElement::Child(name.into())
    }

    /// Creates a new map key path element.
    pub fn key(key: impl Into<String>) -> Self {
        PathElement::Key(key.into())
    }

    /// Creates a new index path element.
    pub fn index(i: usize) -> Self {
        PathElement::Index(i)
    }

    /// Returns true if this is a child element.
    pub fn is_child(&self) -> bool {
        matches!(self, PathElement::Child(_))
    }
}

/// Path locates a field inside an object, for attributing errors.
///
/// An empty path is the root and renders as the empty string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Path {
    elements: Vec<PathElement>,
}

impl Path {
    /// Creates a new empty (root) path.
    pub fn new() -> Self {
        Path {
            elements: Vec::new(),
        }
    }

    /// Creates a path rooted at a single named field.
    pub fn root(name: impl Into<String>) -> Self {
        Path {
            elements: vec![PathElement::child(name)],
        }
    }

    /// Builds a path of child fields from a dotted string such as
    /// `metadata.labels`. Empty segments are skipped.
    pub fn from_dotted(s: &str) -> Self {
        s.split('.')
            .filter(|segment| !segment.is_empty())
            .map(PathElement::child)
            .collect()
    }

    /// Returns the number of elements in the path.
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Returns true if the path is the root.
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Appends a path element.
    pub fn push(&mut self, element: PathElement) {
        self.elements.push(element);
    }

    /// Returns the last path element.
    pub fn last(&self) -> Option<&PathElement> {
        self.elements.last()
    }

    /// Creates a new path with the given element appended.
    pub fn with(&self, element: PathElement) -> Self {
        let mut new_path = self.clone();
        new_path.push(element);
        new_path
    }

    /// Creates a new path for a named child field.
    pub fn child(&self, name: impl Into<String>) -> Self {
        self.with(PathElement::child(name))
    }

    /// Creates a new path for a map key.
    pub fn key(&self, key: impl Into<String>) -> Self {
        self.with(PathElement::key(key))
    }

    /// Creates a new path for a list index.
    pub fn index(&self, i: usize) -> Self {
        self.with(PathElement::index(i))
    }
}

impl FromIterator<PathElement> for Path {
    fn from_iter<T: IntoIterator<Item = PathElement>>(iter: T) -> Self {
        Path {
            elements: iter.into_iter().collect(),
        }
    }
}

impl std::fmt::Display for PathElement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathElement::Child(name) => write!(f, ".{}", name),
            PathElement::Key(key) => write!(f, "[{}]", key),
            PathElement::Index(i) => write!(f, "[{}]", i),
        }
    }
}

impl std::fmt::Display for Path {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, element) in self.elements.iter().enumerate() {
            match element {
                // The leading field carries no separator.
                PathElement::Child(name) if i == 0 => write!(f, "{}", name)?,
                _ => write!(f, "{}", element)?,
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_element_child() {
        let pe = PathElement::child("labels");
        assert!(pe.is_child());
        assert!(!PathElement::key("app").is_child());
    }

    #[test]
    fn test_path_display() {
        let path = Path::root("metadata").child("labels").key("app");
        assert_eq!(path.to_string(), "metadata.labels[app]");

        let path = Path::root("spec").child("containers").index(2).child("name");
        assert_eq!(path.to_string(), "spec.containers[2].name");
    }

    #[test]
    fn test_root_path_is_empty_string() {
        let path = Path::new();
        assert!(path.is_empty());
        assert_eq!(path.to_string(), "");
        assert_eq!(path.key("app").to_string(), "[app]");
    }

    #[test]
    fn test_from_dotted() {
        let path = Path::from_dotted("metadata.labels");
        assert_eq!(path.len(), 2);
        assert_eq!(path.last(), Some(&PathElement::child("labels")));
        assert_eq!(path, Path::root("metadata").child("labels"));
        assert!(Path::from_dotted("").is_empty());
    }

    #[test]
    fn test_with_does_not_mutate() {
        let base = Path::root("metadata");
        let extended = base.child("labels");
        assert_eq!(base.len(), 1);
        assert_eq!(extended.len(), 2);
    }
}
