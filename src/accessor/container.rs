/*!
 * Container Abstractions
 *
 * What the mutation protocol needs to know about field values and the
 * collections it mutates in place
 */

use crate::core::types::{ContainerKind, Nullable};
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, VecDeque};
use std::hash::{BuildHasher, Hash};

/// A value stored in an accessor-managed field
///
/// Recognized containers report their [`ContainerKind`] and whether they hold
/// null elements, keys or values. Scalars keep the defaults.
pub trait FieldValue: Nullable + Clone {
    fn container_kind(&self) -> Option<ContainerKind> {
        None
    }

    /// A list or set element, or a map key, is null
    fn has_null_element(&self) -> bool {
        false
    }

    /// A map value is null
    fn has_null_value(&self) -> bool {
        false
    }
}

crate::impl_non_null!(
    bool, char, u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize, f32, f64, String,
);

impl<T: FieldValue> FieldValue for Option<T> {
    fn container_kind(&self) -> Option<ContainerKind> {
        self.as_ref().and_then(FieldValue::container_kind)
    }

    fn has_null_element(&self) -> bool {
        self.as_ref().is_some_and(FieldValue::has_null_element)
    }

    fn has_null_value(&self) -> bool {
        self.as_ref().is_some_and(FieldValue::has_null_value)
    }
}

impl<T: Nullable + Clone> FieldValue for Vec<T> {
    fn container_kind(&self) -> Option<ContainerKind> {
        Some(ContainerKind::List)
    }

    fn has_null_element(&self) -> bool {
        self.iter().any(Nullable::is_null)
    }
}

impl<T: Nullable + Clone> FieldValue for VecDeque<T> {
    fn container_kind(&self) -> Option<ContainerKind> {
        Some(ContainerKind::List)
    }

    fn has_null_element(&self) -> bool {
        self.iter().any(Nullable::is_null)
    }
}

impl<T: Nullable + Clone, S: Clone> FieldValue for HashSet<T, S> {
    fn container_kind(&self) -> Option<ContainerKind> {
        Some(ContainerKind::Set)
    }

    fn has_null_element(&self) -> bool {
        self.iter().any(Nullable::is_null)
    }
}

impl<T: Nullable + Clone> FieldValue for BTreeSet<T> {
    fn container_kind(&self) -> Option<ContainerKind> {
        Some(ContainerKind::SortedSet)
    }

    fn has_null_element(&self) -> bool {
        self.iter().any(Nullable::is_null)
    }
}

impl<K: Nullable + Clone, V: Nullable + Clone, S: Clone> FieldValue for HashMap<K, V, S> {
    fn container_kind(&self) -> Option<ContainerKind> {
        Some(ContainerKind::Map)
    }

    fn has_null_element(&self) -> bool {
        self.keys().any(Nullable::is_null)
    }

    fn has_null_value(&self) -> bool {
        self.values().any(Nullable::is_null)
    }
}

impl<K: Nullable + Clone, V: Nullable + Clone> FieldValue for BTreeMap<K, V> {
    fn container_kind(&self) -> Option<ContainerKind> {
        Some(ContainerKind::SortedMap)
    }

    fn has_null_element(&self) -> bool {
        self.keys().any(Nullable::is_null)
    }

    fn has_null_value(&self) -> bool {
        self.values().any(Nullable::is_null)
    }
}

/// List- or set-like container mutated by adders and removers
///
/// Set-like containers ignore insertion indices and never report positions.
pub trait ElementContainer<E> {
    fn kind(&self) -> ContainerKind;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn contains_element(&self, element: &E) -> bool;

    /// Snapshot of the current elements in iteration order
    fn elements(&self) -> Vec<E>;

    /// Insert one element; `false` if the container rejected it
    fn insert_at(&mut self, index: usize, element: E) -> bool;

    /// Insert all elements starting at `index`
    fn insert_all(&mut self, index: usize, elements: Vec<E>);

    /// Remove the first element equal to `element`
    fn remove_element(&mut self, element: &E) -> bool;

    /// Remove the element at `index`; `None` when out of range or not a list
    fn remove_at(&mut self, index: usize) -> Option<E>;
}

impl<E: Clone + PartialEq> ElementContainer<E> for Vec<E> {
    fn kind(&self) -> ContainerKind {
        ContainerKind::List
    }

    fn len(&self) -> usize {
        Vec::len(self)
    }

    fn contains_element(&self, element: &E) -> bool {
        self.contains(element)
    }

    fn elements(&self) -> Vec<E> {
        self.clone()
    }

    fn insert_at(&mut self, index: usize, element: E) -> bool {
        if index > Vec::len(self) {
            return false;
        }
        self.insert(index, element);
        true
    }

    fn insert_all(&mut self, index: usize, elements: Vec<E>) {
        let tail = self.split_off(index.min(Vec::len(self)));
        self.extend(elements);
        self.extend(tail);
    }

    fn remove_element(&mut self, element: &E) -> bool {
        match self.iter().position(|item| item == element) {
            Some(index) => {
                self.remove(index);
                true
            }
            None => false,
        }
    }

    fn remove_at(&mut self, index: usize) -> Option<E> {
        (index < Vec::len(self)).then(|| self.remove(index))
    }
}

impl<E: Clone + PartialEq> ElementContainer<E> for VecDeque<E> {
    fn kind(&self) -> ContainerKind {
        ContainerKind::List
    }

    fn len(&self) -> usize {
        VecDeque::len(self)
    }

    fn contains_element(&self, element: &E) -> bool {
        self.contains(element)
    }

    fn elements(&self) -> Vec<E> {
        self.iter().cloned().collect()
    }

    fn insert_at(&mut self, index: usize, element: E) -> bool {
        if index > VecDeque::len(self) {
            return false;
        }
        self.insert(index, element);
        true
    }

    fn insert_all(&mut self, index: usize, elements: Vec<E>) {
        let mut index = index.min(VecDeque::len(self));
        for element in elements {
            self.insert(index, element);
            index += 1;
        }
    }

    fn remove_element(&mut self, element: &E) -> bool {
        match self.iter().position(|item| item == element) {
            Some(index) => self.remove(index).is_some(),
            None => false,
        }
    }

    fn remove_at(&mut self, index: usize) -> Option<E> {
        self.remove(index)
    }
}

impl<E: Clone + Eq + Hash, S: BuildHasher> ElementContainer<E> for HashSet<E, S> {
    fn kind(&self) -> ContainerKind {
        ContainerKind::Set
    }

    fn len(&self) -> usize {
        HashSet::len(self)
    }

    fn contains_element(&self, element: &E) -> bool {
        self.contains(element)
    }

    fn elements(&self) -> Vec<E> {
        self.iter().cloned().collect()
    }

    fn insert_at(&mut self, _index: usize, element: E) -> bool {
        self.insert(element)
    }

    fn insert_all(&mut self, _index: usize, elements: Vec<E>) {
        self.extend(elements);
    }

    fn remove_element(&mut self, element: &E) -> bool {
        self.remove(element)
    }

    fn remove_at(&mut self, _index: usize) -> Option<E> {
        None
    }
}

impl<E: Clone + Ord> ElementContainer<E> for BTreeSet<E> {
    fn kind(&self) -> ContainerKind {
        ContainerKind::SortedSet
    }

    fn len(&self) -> usize {
        BTreeSet::len(self)
    }

    fn contains_element(&self, element: &E) -> bool {
        self.contains(element)
    }

    fn elements(&self) -> Vec<E> {
        self.iter().cloned().collect()
    }

    fn insert_at(&mut self, _index: usize, element: E) -> bool {
        self.insert(element)
    }

    fn insert_all(&mut self, _index: usize, elements: Vec<E>) {
        self.extend(elements);
    }

    fn remove_element(&mut self, element: &E) -> bool {
        self.remove(element)
    }

    fn remove_at(&mut self, _index: usize) -> Option<E> {
        None
    }
}

/// Map-like container mutated by the map operations
pub trait KeyedContainer<K, V> {
    fn kind(&self) -> ContainerKind;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Insert one entry, returning the value it replaced
    fn put(&mut self, key: K, value: V) -> Option<V>;

    fn put_all(&mut self, entries: Vec<(K, V)>);

    fn remove_key(&mut self, key: &K) -> Option<V>;

    fn clear_entries(&mut self);
}

impl<K: Eq + Hash, V, S: BuildHasher> KeyedContainer<K, V> for HashMap<K, V, S> {
    fn kind(&self) -> ContainerKind {
        ContainerKind::Map
    }

    fn len(&self) -> usize {
        HashMap::len(self)
    }

    fn put(&mut self, key: K, value: V) -> Option<V> {
        self.insert(key, value)
    }

    fn put_all(&mut self, entries: Vec<(K, V)>) {
        self.extend(entries);
    }

    fn remove_key(&mut self, key: &K) -> Option<V> {
        self.remove(key)
    }

    fn clear_entries(&mut self) {
        self.clear();
    }
}

impl<K: Ord, V> KeyedContainer<K, V> for BTreeMap<K, V> {
    fn kind(&self) -> ContainerKind {
        ContainerKind::SortedMap
    }

    fn len(&self) -> usize {
        BTreeMap::len(self)
    }

    fn put(&mut self, key: K, value: V) -> Option<V> {
        self.insert(key, value)
    }

    fn put_all(&mut self, entries: Vec<(K, V)>) {
        self.extend(entries);
    }

    fn remove_key(&mut self, key: &K) -> Option<V> {
        self.remove(key)
    }

    fn clear_entries(&mut self) {
        self.clear();
    }
}
