//! The Labels capability and its canonical implementation, LabelSet.

use serde::{Deserialize, Serialize, Serializer};
use std::collections::{BTreeMap, HashMap};
use std::fmt;

/// Placeholder rendered by [`format_labels`] for an empty set.
pub const NO_LABELS: &str = "<none>";

/// Labels presents labels independently from their storage.
pub trait Labels {
    /// Returns whether the provided label exists.
    fn has(&self, key: &str) -> bool;

    /// Returns the value for the provided label, or `""` if it is absent.
    fn get(&self, key: &str) -> &str;

    /// Returns the value for the provided label if it exists.
    fn lookup(&self, key: &str) -> Option<&str>;
}

/// LabelSet is a map of label key to value.
///
/// Storage order is unspecified; everything observable (`Display`,
/// serialization, [`LabelSet::sorted_entries`]) is sorted by key.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct LabelSet {
    labels: HashMap<String, String>,
}

impl LabelSet {
    /// Creates a new empty LabelSet.
    pub fn new() -> Self {
        LabelSet {
            labels: HashMap::new(),
        }
    }

    /// Creates an empty LabelSet with room for `capacity` labels.
    pub fn with_capacity(capacity: usize) -> Self {
        LabelSet {
            labels: HashMap::with_capacity(capacity),
        }
    }

    /// Returns the number of labels.
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Returns true if there are no labels.
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Inserts or overwrites a label, returning the previous value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.labels.insert(key.into(), value.into())
    }

    /// Removes a label, returning its value.
    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.labels.remove(key)
    }

    /// Returns an iterator over the labels in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.labels.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Returns the labels sorted by key.
    pub fn sorted_entries(&self) -> Vec<(&str, &str)> {
        let mut entries: Vec<(&str, &str)> = self.iter().collect();
        entries.sort_unstable_by(|a, b| a.0.cmp(b.0));
        entries
    }
}

impl Labels for LabelSet {
    fn has(&self, key: &str) -> bool {
        self.labels.contains_key(key)
    }

    fn get(&self, key: &str) -> &str {
        self.labels.get(key).map(String::as_str).unwrap_or("")
    }

    fn lookup(&self, key: &str) -> Option<&str> {
        self.labels.get(key).map(String::as_str)
    }
}

impl Labels for HashMap<String, String> {
    fn has(&self, key: &str) -> bool {
        self.contains_key(key)
    }

    fn get(&self, key: &str) -> &str {
        HashMap::get(self, key).map(String::as_str).unwrap_or("")
    }

    fn lookup(&self, key: &str) -> Option<&str> {
        HashMap::get(self, key).map(String::as_str)
    }
}

impl Labels for BTreeMap<String, String> {
    fn has(&self, key: &str) -> bool {
        self.contains_key(key)
    }

    fn get(&self, key: &str) -> &str {
        BTreeMap::get(self, key).map(String::as_str).unwrap_or("")
    }

    fn lookup(&self, key: &str) -> Option<&str> {
        BTreeMap::get(self, key).map(String::as_str)
    }
}

impl From<HashMap<String, String>> for LabelSet {
    fn from(labels: HashMap<String, String>) -> Self {
        LabelSet { labels }
    }
}

impl From<BTreeMap<String, String>> for LabelSet {
    fn from(labels: BTreeMap<String, String>) -> Self {
        labels.into_iter().collect()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for LabelSet {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        LabelSet {
            labels: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl<K: Into<String>, V: Into<String>> Extend<(K, V)> for LabelSet {
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        self.labels
            .extend(iter.into_iter().map(|(k, v)| (k.into(), v.into())));
    }
}

impl fmt::Display for LabelSet {
    /// Writes `k1=v1,k2=v2,...` sorted by key, the format the selector
    /// parser accepts.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (key, value)) in self.sorted_entries().into_iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{}={}", key, value)?;
        }
        Ok(())
    }
}

impl Serialize for LabelSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.sorted_entries())
    }
}

/// Formats a set for humans; an empty set renders as `<none>`.
pub fn format_labels(labels: &LabelSet) -> String {
    let l = labels.to_string();
    if l.is_empty() {
        NO_LABELS.to_string()
    } else {
        l
    }
}

/// Formats a raw label map the way [`format_labels`] does.
pub fn format_label_map(labels: &HashMap<String, String>) -> String {
    let set: LabelSet = labels.iter().map(|(k, v)| (k.as_str(), v.as_str())).collect();
    format_labels(&set)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(pairs: &[(&str, &str)]) -> LabelSet {
        pairs.iter().copied().collect()
    }

    #[test]
    fn test_display_is_sorted() {
        assert_eq!(set(&[("x", "a"), ("y", "b"), ("z", "c")]).to_string(), "x=a,y=b,z=c");
        assert_eq!(set(&[("z", "c"), ("x", "a"), ("y", "b")]).to_string(), "x=a,y=b,z=c");
        assert_eq!(set(&[("foo", "bar")]).to_string(), "foo=bar");
        assert_eq!(LabelSet::new().to_string(), "");
    }

    #[test]
    fn test_sorted_by_key_not_entry() {
        // "a-b=y" < "a=x" as entries, but "a" < "a-b" as keys.
        assert_eq!(set(&[("a-b", "y"), ("a", "x")]).to_string(), "a=x,a-b=y");
    }

    #[test]
    fn test_format_labels() {
        assert_eq!(format_labels(&LabelSet::new()), "<none>");
        assert_eq!(format_labels(&set(&[("a", "b")])), "a=b");
        assert_eq!(format_labels(&set(&[("b", "2"), ("a", "1")])), "a=1,b=2");

        let mut raw = HashMap::new();
        assert_eq!(format_label_map(&raw), NO_LABELS);
        raw.insert("k".to_string(), "v".to_string());
        assert_eq!(format_label_map(&raw), "k=v");
    }

    #[test]
    fn test_labels_capability() {
        let ls = set(&[("present", "value"), ("blank", "")]);
        assert!(ls.has("present"));
        assert!(ls.has("blank"));
        assert!(!ls.has("absent"));

        assert_eq!(Labels::get(&ls, "present"), "value");
        assert_eq!(Labels::get(&ls, "blank"), "");
        assert_eq!(Labels::get(&ls, "absent"), "");

        assert_eq!(ls.lookup("blank"), Some(""));
        assert_eq!(ls.lookup("absent"), None);
    }

    #[test]
    fn test_map_adapters() {
        let mut hash = HashMap::new();
        hash.insert("app".to_string(), "web".to_string());
        let btree: BTreeMap<String, String> = hash.clone().into_iter().collect();

        let views: [&dyn Labels; 2] = [&hash, &btree];
        for view in views {
            assert!(view.has("app"));
            assert_eq!(view.get("app"), "web");
            assert_eq!(view.get("tier"), "");
            assert_eq!(view.lookup("tier"), None);
        }
    }

    #[test]
    fn test_from_maps() {
        let mut hash = HashMap::new();
        hash.insert("app".to_string(), "web".to_string());
        hash.insert("tier".to_string(), "db".to_string());
        let btree: BTreeMap<String, String> = hash.clone().into_iter().collect();

        let from_hash = LabelSet::from(hash);
        let from_btree = LabelSet::from(btree);
        assert_eq!(from_hash.to_string(), "app=web,tier=db");
        assert_eq!(from_hash, from_btree);
    }

    #[test]
    fn test_insert_overwrites() {
        let mut ls = LabelSet::new();
        assert_eq!(ls.insert("a", "1"), None);
        assert_eq!(ls.insert("a", "2"), Some("1".to_string()));
        assert_eq!(ls.len(), 1);
        assert_eq!(ls.lookup("a"), Some("2"));
        assert_eq!(ls.remove("a"), Some("2".to_string()));
        assert!(ls.is_empty());
    }

    #[test]
    fn test_serde_uses_canonical_order() {
        let ls = set(&[("z", "1"), ("a", "2"), ("m", "3")]);
        let json = serde_json::to_string(&ls).unwrap();
        assert_eq!(json, r#"{"a":"2","m":"3","z":"1"}"#);

        let back: LabelSet = serde_json::from_str(&json).unwrap();
        assert_eq!(back.to_string(), "a=2,m=3,z=1");

        let from_yaml: LabelSet = serde_yaml::from_str("app: web\ntier: frontend\n").unwrap();
        assert_eq!(from_yaml.to_string(), "app=web,tier=frontend");
    }
}
