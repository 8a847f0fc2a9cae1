use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;
use core::ops::Index;

use f_utils::hash::HashMap;

use crate::Value;
use crate::error::DuplicateKeyError;

// -----------------------------------------------------------------------------
// Mapping

/// An insertion-ordered map from string keys to [`Value`]s.
///
/// This is the dictionary side of object⇄mapping conversion. Iteration
/// follows insertion order; [`insert`](Mapping::insert) on an existing key
/// replaces the value but keeps its position.
///
/// Two mappings are equal when they hold the same entries, in any order.
///
/// # Examples
///
/// ```
/// use f_reflect::{Mapping, Value};
///
/// let mut m = Mapping::new();
/// m.insert("b", 1_i32);
/// m.insert("a", 2_i32);
/// m.insert("b", 3_i32);
///
/// assert_eq!(m.keys().collect::<Vec<_>>(), ["b", "a"]);
/// assert_eq!(m["b"], Value::Int(3));
/// assert!(m.try_insert("a", 0_i32).is_err());
/// ```
#[derive(Clone, Default)]
pub struct Mapping {
    entries: Vec<(String, Value)>,
    indices: HashMap<String, usize>,
}

impl Mapping {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
            indices: HashMap::with_capacity_and_hasher(capacity, Default::default()),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[inline]
    pub fn contains_key(&self, key: &str) -> bool {
        self.indices.contains_key(key)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        match self.indices.get(key) {
            Some(&index) => Some(&self.entries[index].1),
            None => None,
        }
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut Value> {
        match self.indices.get(key) {
            Some(&index) => Some(&mut self.entries[index].1),
            None => None,
        }
    }

    /// Insert or replace, returning the previous value.
    ///
    /// A replaced entry keeps its position.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        let key = key.into();
        let value = value.into();
        match self.indices.get(&key) {
            Some(&index) => Some(core::mem::replace(&mut self.entries[index].1, value)),
            None => {
                self.indices.insert(key.clone(), self.entries.len());
                self.entries.push((key, value));
                None
            }
        }
    }

    /// Add-only insert.
    ///
    /// Fails without touching the mapping if `key` is already present.
    pub fn try_insert(
        &mut self,
        key: impl Into<String>,
        value: impl Into<Value>,
    ) -> Result<(), DuplicateKeyError> {
        let key = key.into();
        if self.indices.contains_key(&key) {
            return Err(DuplicateKeyError { key });
        }
        self.indices.insert(key.clone(), self.entries.len());
        self.entries.push((key, value.into()));
        Ok(())
    }

    /// Remove an entry, shifting later entries forward.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        let index = self.indices.remove(key)?;
        let (_, value) = self.entries.remove(index);
        for (key, _) in &self.entries[index..] {
            if let Some(slot) = self.indices.get_mut(key.as_str()) {
                *slot -= 1;
            }
        }
        Some(value)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.indices.clear();
    }

    #[inline]
    pub fn keys(&self) -> impl ExactSizeIterator<Item = &str> + Clone {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    #[inline]
    pub fn values(&self) -> impl ExactSizeIterator<Item = &Value> + Clone {
        self.entries.iter().map(|(_, v)| v)
    }

    #[inline]
    pub fn iter(&self) -> impl ExactSizeIterator<Item = (&str, &Value)> + Clone {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Consume into `(key, value)` pairs in insertion order.
    #[inline]
    pub fn into_entries(self) -> Vec<(String, Value)> {
        self.entries
    }
}

impl PartialEq for Mapping {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self
                .iter()
                .all(|(key, value)| other.get(key).is_some_and(|v| v == value))
    }
}

impl fmt::Debug for Mapping {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl Index<&str> for Mapping {
    type Output = Value;

    /// # Panics
    ///
    /// Panics if `key` is not present.
    fn index(&self, key: &str) -> &Value {
        match self.get(key) {
            Some(value) => value,
            None => panic!("key `{key}` is not present in the mapping"),
        }
    }
}

impl<K: Into<String>, V: Into<Value>> Extend<(K, V)> for Mapping {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

/// Later duplicates replace earlier ones, see [`Mapping::insert`].
impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Mapping {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut mapping = Self::new();
        mapping.extend(iter);
        mapping
    }
}

impl IntoIterator for Mapping {
    type Item = (String, Value);
    type IntoIter = alloc::vec::IntoIter<(String, Value)>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use super::Mapping;
    use crate::Value;

    #[test]
    fn remove_keeps_order_and_indices() {
        let mut m: Mapping = [("a", 1_i32), ("b", 2), ("c", 3)].into_iter().collect();
        assert_eq!(m.remove("a"), Some(Value::Int(1)));
        assert_eq!(m.remove("a"), None);
        assert_eq!(m.keys().collect::<Vec<_>>(), ["b", "c"]);
        assert_eq!(m["c"], Value::Int(3));
        m.insert("a", 4_i32);
        assert_eq!(m.keys().collect::<Vec<_>>(), ["b", "c", "a"]);
    }

    #[test]
    fn equality_ignores_order() {
        let a: Mapping = [("x", 1_i32), ("y", 2)].into_iter().collect();
        let b: Mapping = [("y", 2_i32), ("x", 1)].into_iter().collect();
        let c: Mapping = [("y", 2_i32)].into_iter().collect();
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn try_insert_leaves_existing_value() {
        let mut m = Mapping::new();
        m.try_insert("k", "v").unwrap();
        let err = m.try_insert("k", "w").unwrap_err();
        assert_eq!(err.key, "k");
        assert_eq!(m["k"].as_str(), Some("v"));
        assert_eq!(m.len(), 1);
    }
}
