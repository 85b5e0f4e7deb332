//! Insertion-ordered, duplicate-free registry
//!
//! [`OrderedRegistry`] keeps its elements in a `Vec`, which is the source of truth for
//! ordering, plus a `HashMap` from element to position so membership and index lookups
//! are O(1). Every mutating operation updates both in lockstep.
//!
//! Out-of-range indices passed to [`OrderedRegistry::insert`], [`OrderedRegistry::set`] or
//! [`OrderedRegistry::element_at`] are contract violations and panic. Callers are expected to
//! validate bounds first.
//!
//! The registry has no internal locking. Mutation takes `&mut self`; share an instance
//! across threads behind a mutex.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::borrow::Borrow;
use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;
use std::ops::Index;

/// Borrowing iterator over an [`OrderedRegistry`], in insertion order
pub type Iter<'a, T> = std::slice::Iter<'a, T>;

/// Owning iterator over an [`OrderedRegistry`], in insertion order
pub type IntoIter<T> = std::vec::IntoIter<T>;

/// An insertion-ordered collection that never holds two equal elements
#[derive(Clone)]
pub struct OrderedRegistry<T> {
    items: Vec<T>,
    positions: HashMap<T, usize>,
}

impl<T> OrderedRegistry<T> {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            positions: HashMap::new(),
        }
    }

    /// Number of elements
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// The full ordered sequence as a read-only view
    pub fn elements(&self) -> &[T] {
        &self.items
    }

    /// Iterate elements in insertion order
    pub fn iter(&self) -> Iter<'_, T> {
        self.items.iter()
    }

    /// Element at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= self.len()`.
    pub fn element_at(&self, index: usize) -> &T {
        assert!(
            index < self.items.len(),
            "index {} out of range for registry of length {}",
            index,
            self.items.len()
        );
        &self.items[index]
    }

    /// Consume the registry, returning the ordered elements
    pub fn into_vec(self) -> Vec<T> {
        self.items
    }
}

impl<T: Hash + Eq + Clone> OrderedRegistry<T> {
    /// Create an empty registry with room for `capacity` elements
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            items: Vec::with_capacity(capacity),
            positions: HashMap::with_capacity(capacity),
        }
    }

    /// Append `value` at the end.
    ///
    /// Returns `false` and leaves the registry untouched if `value` is already present.
    pub fn append(&mut self, value: T) -> bool {
        if self.positions.contains_key(&value) {
            return false;
        }

        self.positions.insert(value.clone(), self.items.len());
        self.items.push(value);
        true
    }

    /// Insert `value` at `index`, shifting later elements right.
    ///
    /// Returns `false` if `value` is already present, in which case nothing moves.
    ///
    /// # Panics
    ///
    /// Panics if `index > self.len()`.
    pub fn insert(&mut self, value: T, index: usize) -> bool {
        assert!(
            index <= self.items.len(),
            "insertion index {} out of range for registry of length {}",
            index,
            self.items.len()
        );

        if self.positions.contains_key(&value) {
            return false;
        }

        self.items.insert(index, value);
        self.renumber_from(index);
        true
    }

    /// Replace the element at `index` with `value`.
    ///
    /// Returns `false` if `value` is already present anywhere in the registry; the slot
    /// keeps its current element in that case.
    ///
    /// # Panics
    ///
    /// Panics if `index >= self.len()`.
    pub fn set(&mut self, value: T, index: usize) -> bool {
        assert!(
            index < self.items.len(),
            "index {} out of range for registry of length {}",
            index,
            self.items.len()
        );

        if self.positions.contains_key(&value) {
            return false;
        }

        self.positions.insert(value.clone(), index);
        let replaced = std::mem::replace(&mut self.items[index], value);
        self.positions.remove(&replaced);
        true
    }

    /// Remove `value`, compacting the sequence. Returns the removed element, if any.
    pub fn remove<Q>(&mut self, value: &Q) -> Option<T>
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let index = self.positions.remove(value)?;
        let removed = self.items.remove(index);
        self.renumber_from(index);
        Some(removed)
    }

    /// Position of `value`, or `None` if it is not present
    pub fn index_of<Q>(&self, value: &Q) -> Option<usize>
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.positions.get(value).copied()
    }

    pub fn contains<Q>(&self, value: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.positions.contains_key(value)
    }

    /// Remove every element
    pub fn clear(&mut self) {
        self.items.clear();
        self.positions.clear();
    }

    fn renumber_from(&mut self, start: usize) {
        for (offset, item) in self.items[start..].iter().enumerate() {
            self.positions.insert(item.clone(), start + offset);
        }
    }
}

impl<T> Default for OrderedRegistry<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Debug> fmt::Debug for OrderedRegistry<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.items.iter()).finish()
    }
}

// Equality is order-sensitive; the position index is derived from `items`.
impl<T: PartialEq> PartialEq for OrderedRegistry<T> {
    fn eq(&self, other: &Self) -> bool {
        self.items == other.items
    }
}

impl<T: Eq> Eq for OrderedRegistry<T> {}

impl<T> Index<usize> for OrderedRegistry<T> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        self.element_at(index)
    }
}

impl<T: Hash + Eq + Clone> FromIterator<T> for OrderedRegistry<T> {
    /// Duplicates collapse; the first occurrence keeps its position.
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut registry = Self::new();
        registry.extend(iter);
        registry
    }
}

impl<T: Hash + Eq + Clone> Extend<T> for OrderedRegistry<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.append(value);
        }
    }
}

impl<T: Hash + Eq + Clone> From<Vec<T>> for OrderedRegistry<T> {
    fn from(values: Vec<T>) -> Self {
        values.into_iter().collect()
    }
}

impl<T> IntoIterator for OrderedRegistry<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a OrderedRegistry<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl<T: Serialize> Serialize for OrderedRegistry<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_seq(&self.items)
    }
}

impl<'de, T> Deserialize<'de> for OrderedRegistry<T>
where
    T: Deserialize<'de> + Hash + Eq + Clone,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let values = Vec::<T>::deserialize(deserializer)?;
        Ok(values.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry(values: &[&str]) -> OrderedRegistry<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    fn assert_consistent(registry: &OrderedRegistry<String>) {
        assert_eq!(registry.items.len(), registry.positions.len());
        for (index, item) in registry.items.iter().enumerate() {
            assert_eq!(registry.positions.get(item), Some(&index));
        }
    }

    #[test]
    fn test_append_preserves_order() {
        let mut reg = OrderedRegistry::new();
        assert!(reg.append("a".to_string()));
        assert!(reg.append("b".to_string()));
        assert!(reg.append("c".to_string()));

        assert_eq!(reg.elements(), &["a", "b", "c"]);
        assert_eq!(reg.index_of("a"), Some(0));
        assert_eq!(reg.index_of("b"), Some(1));
        assert_eq!(reg.index_of("c"), Some(2));
        assert_consistent(&reg);
    }

    #[test]
    fn test_append_duplicate_is_noop() {
        let mut reg = registry(&["a", "b"]);
        assert!(!reg.append("a".to_string()));

        assert_eq!(reg.len(), 2);
        assert_eq!(reg.elements(), &["a", "b"]);
        assert_consistent(&reg);
    }

    #[test]
    fn test_from_sequence_collapses_duplicates() {
        let reg = registry(&["p1", "p2", "p2", "p1", "sub1"]);
        assert_eq!(reg.elements(), &["p1", "p2", "sub1"]);
        assert_consistent(&reg);
    }

    #[test]
    fn test_remove_renumbers() {
        let mut reg = registry(&["a", "b", "c"]);
        assert_eq!(reg.remove("b"), Some("b".to_string()));

        assert_eq!(reg.elements(), &["a", "c"]);
        assert_eq!(reg.index_of("c"), Some(1));
        assert_eq!(reg.index_of("b"), None);
        assert_consistent(&reg);
    }

    #[test]
    fn test_remove_missing_is_noop() {
        let mut reg = registry(&["a"]);
        assert_eq!(reg.remove("zzz"), None);
        assert_eq!(reg.elements(), &["a"]);
    }

    #[test]
    fn test_insert_in_middle() {
        let mut reg = registry(&["a", "c"]);
        assert!(reg.insert("x".to_string(), 1));

        assert_eq!(reg.elements(), &["a", "x", "c"]);
        assert_eq!(reg.index_of("c"), Some(2));
        assert_consistent(&reg);
    }

    #[test]
    fn test_insert_at_end_and_start() {
        let mut reg = registry(&["b"]);
        assert!(reg.insert("c".to_string(), 1));
        assert!(reg.insert("a".to_string(), 0));

        assert_eq!(reg.elements(), &["a", "b", "c"]);
        assert_consistent(&reg);
    }

    #[test]
    fn test_insert_existing_is_noop() {
        let mut reg = registry(&["a", "b", "c"]);
        for index in 0..=3 {
            assert!(!reg.insert("b".to_string(), index));
        }
        assert_eq!(reg.elements(), &["a", "b", "c"]);
        assert_consistent(&reg);
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn test_insert_out_of_range_panics() {
        let mut reg = registry(&["a"]);
        reg.insert("b".to_string(), 2);
    }

    #[test]
    fn test_set_replaces_slot() {
        let mut reg = registry(&["a", "b", "c"]);
        assert!(reg.set("x".to_string(), 1));

        assert_eq!(reg.elements(), &["a", "x", "c"]);
        assert!(!reg.contains("b"));
        assert_eq!(reg.index_of("x"), Some(1));
        assert_consistent(&reg);
    }

    #[test]
    fn test_set_existing_value_is_noop() {
        let mut reg = registry(&["a", "b", "c"]);
        assert!(!reg.set("c".to_string(), 0));
        assert!(!reg.set("b".to_string(), 1));

        assert_eq!(reg.elements(), &["a", "b", "c"]);
        assert_consistent(&reg);
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn test_set_out_of_range_panics() {
        let mut reg = registry(&["a"]);
        reg.set("b".to_string(), 1);
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn test_element_at_out_of_range_panics() {
        let reg = registry(&["a"]);
        reg.element_at(1);
    }

    #[test]
    fn test_iteration_is_restartable() {
        let reg = registry(&["a", "b", "c"]);
        let first: Vec<_> = reg.iter().cloned().collect();
        let second: Vec<_> = (&reg).into_iter().cloned().collect();
        assert_eq!(first, second);
        assert_eq!(reg[2], "c");
        assert_eq!(reg.element_at(0), "a");
    }

    #[test]
    fn test_serde_roundtrip_collapses_duplicates() {
        let reg: OrderedRegistry<String> = serde_json::from_str(r#"["a","b","a"]"#).unwrap();
        assert_eq!(reg.elements(), &["a", "b"]);
        assert_eq!(serde_json::to_string(&reg).unwrap(), r#"["a","b"]"#);
    }
}
