//! Insertion-ordered keyword argument mapping.

use serde::{Deserialize, Serialize};

use crate::Value;

/// An insertion-ordered mapping from argument name to [`Value`].
///
/// Used both for caller input and as the storage behind a
/// [`ValidationResult`](crate::ValidationResult). Iteration follows insertion
/// order; inserting an existing key replaces its value in place.
///
/// # Examples
///
/// ```
/// use keyword_args_core::{Kwargs, Value};
///
/// let args = Kwargs::new()
///     .with("a", 17)
///     .with("b", Value::symbol("OK"))
///     .with("a", 18);
///
/// assert_eq!(args.len(), 2);
/// assert_eq!(args.get("a"), Some(&Value::from(18)));
/// assert_eq!(args.keys().collect::<Vec<_>>(), vec!["a", "b"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Kwargs {
    entries: Vec<(String, Value)>,
}

impl Kwargs {
    /// Creates an empty mapping.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces an entry, builder style.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    /// Adds or replaces an entry, returning the previous value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, slot)) => Some(std::mem::replace(slot, value)),
            None => {
                self.entries.push((key, value));
                None
            }
        }
    }

    /// Looks up a value by key.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// Returns `true` if the key is present.
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.iter().any(|(k, _)| k == key)
    }

    /// Keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    /// Entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if there are no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Kwargs {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut kwargs = Kwargs::new();
        for (k, v) in iter {
            kwargs.insert(k, v);
        }
        kwargs
    }
}

impl IntoIterator for Kwargs {
    type Item = (String, Value);
    type IntoIter = std::vec::IntoIter<(String, Value)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_replaces_in_place() {
        let mut args = Kwargs::new().with("a", 1).with("b", 2);
        assert_eq!(args.insert("a", 3), Some(Value::from(1)));
        assert_eq!(
            args.iter().collect::<Vec<_>>(),
            vec![("a", &Value::from(3)), ("b", &Value::from(2))]
        );
    }

    #[test]
    fn test_from_iterator_keeps_order() {
        let args: Kwargs = [("z", 1), ("a", 2), ("m", 3)].into_iter().collect();
        assert_eq!(args.keys().collect::<Vec<_>>(), vec!["z", "a", "m"]);
    }

    #[test]
    fn test_serializes_as_ordered_pairs() {
        let args = Kwargs::new().with("b", 1).with("a", Value::Null);
        let json = serde_json::to_value(&args).unwrap();
        assert_eq!(
            json,
            serde_json::json!([["b", { "Integer": 1 }], ["a", "Null"]])
        );
        let back: Kwargs = serde_json::from_value(json).unwrap();
        assert_eq!(back, args);
    }
}
