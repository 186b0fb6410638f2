//! Comparison and combination of label sets.

use super::set::{LabelSet, Labels};

/// Returns true if some key is present in both sets with different values.
///
/// Disjoint sets and identical sets never conflict.
pub fn conflicts(labels1: &LabelSet, labels2: &LabelSet) -> bool {
    let (small, big) = if labels2.len() < labels1.len() {
        (labels2, labels1)
    } else {
        (labels1, labels2)
    };

    small
        .iter()
        .any(|(key, value)| big.lookup(key).is_some_and(|other| other != value))
}

/// Combines two sets into a new one without checking for conflicts.
///
/// On a shared key the value from `labels2` wins. Call [`conflicts`] first
/// if that matters.
pub fn merge(labels1: &LabelSet, labels2: &LabelSet) -> LabelSet {
    let mut merged = LabelSet::with_capacity(labels1.len() + labels2.len());
    merged.extend(labels1.iter());
    merged.extend(labels2.iter());
    merged
}

/// Returns true if both sets hold exactly the same labels.
pub fn equals(labels1: &LabelSet, labels2: &LabelSet) -> bool {
    if labels1.len() != labels2.len() {
        return false;
    }

    labels1
        .iter()
        .all(|(key, value)| labels2.lookup(key) == Some(value))
}

impl LabelSet {
    /// Returns true if `other` maps a shared key to a different value.
    pub fn conflicts_with(&self, other: &LabelSet) -> bool {
        conflicts(self, other)
    }

    /// Returns a new set with `other`'s labels written over this one's.
    pub fn merged_with(&self, other: &LabelSet) -> LabelSet {
        merge(self, other)
    }

    /// Returns true if both sets hold exactly the same labels.
    pub fn equals(&self, other: &LabelSet) -> bool {
        equals(self, other)
    }
}

impl PartialEq for LabelSet {
    fn eq(&self, other: &Self) -> bool {
        self.equals(other)
    }
}

impl Eq for LabelSet {}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(pairs: &[(&str, &str)]) -> LabelSet {
        pairs.iter().copied().collect()
    }

    #[test]
    fn test_conflicts() {
        let cases = [
            // empty sets
            (set(&[]), set(&[]), false),
            // one empty set
            (set(&[("env", "test")]), set(&[]), false),
            // disjoint
            (set(&[("env", "test")]), set(&[("infra", "true")]), false),
            // same key, different value
            (set(&[("env", "test")]), set(&[("env", "dev")]), true),
            // same key, same value
            (set(&[("env", "test")]), set(&[("env", "test")]), false),
            // shared key mismatch buried among others
            (
                set(&[("env", "test"), ("infra", "false")]),
                set(&[("infra", "true"), ("color", "blue")]),
                true,
            ),
            // different sizes, compatible
            (
                set(&[("env", "test"), ("infra", "false")]),
                set(&[("env", "test")]),
                false,
            ),
        ];

        for (i, (a, b, expected)) in cases.iter().enumerate() {
            assert_eq!(conflicts(a, b), *expected, "case {}: {} vs {}", i, a, b);
            assert_eq!(conflicts(b, a), *expected, "case {} reversed: {} vs {}", i, b, a);
        }
    }

    #[test]
    fn test_merge() {
        let cases = [
            (set(&[]), set(&[]), set(&[])),
            (set(&[("infra", "true")]), set(&[]), set(&[("infra", "true")])),
            (
                set(&[("infra", "true")]),
                set(&[("env", "test"), ("color", "blue")]),
                set(&[("infra", "true"), ("env", "test"), ("color", "blue")]),
            ),
            // second set wins
            (
                set(&[("env", "prod"), ("tier", "web")]),
                set(&[("env", "test")]),
                set(&[("env", "test"), ("tier", "web")]),
            ),
        ];

        for (a, b, expected) in &cases {
            let merged = merge(a, b);
            assert!(equals(&merged, expected), "merge({}, {}) = {}, want {}", a, b, merged, expected);
        }
    }

    #[test]
    fn test_merge_leaves_inputs_untouched() {
        let a = set(&[("env", "prod")]);
        let b = set(&[("env", "test"), ("tier", "web")]);
        let merged = a.merged_with(&b);

        assert_eq!(a.to_string(), "env=prod");
        assert_eq!(b.to_string(), "env=test,tier=web");
        assert_eq!(merged.to_string(), "env=test,tier=web");
    }

    #[test]
    fn test_equals() {
        let cases = [
            (set(&[]), set(&[]), true),
            (set(&[("env", "test")]), set(&[]), false),
            (set(&[]), set(&[("env", "test")]), false),
            (set(&[("env", "test")]), set(&[("env", "test")]), true),
            (set(&[("env", "test")]), set(&[("env", "dev")]), false),
            (set(&[("env", "test")]), set(&[("infra", "test")]), false),
            (
                set(&[("env", "test"), ("infra", "true")]),
                set(&[("infra", "true"), ("env", "test")]),
                true,
            ),
            // empty value is not the same as absent
            (set(&[("a", "")]), set(&[("b", "")]), false),
        ];

        for (a, b, expected) in &cases {
            assert_eq!(equals(a, b), *expected, "equals({}, {})", a, b);
            assert_eq!(a == b, *expected);
        }
    }

    #[test]
    fn test_method_forms() {
        let a = set(&[("env", "prod")]);
        let b = set(&[("env", "dev")]);
        assert!(a.conflicts_with(&b));
        assert!(!a.equals(&b));
        assert!(a.equals(&a.clone()));
    }
}
