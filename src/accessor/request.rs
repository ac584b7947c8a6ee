/*!
 * Mutation Requests
 *
 * Per-call hooks, not-null policy and counterpart capability for each
 * accessor operation. Every hook is optional; a missing `before` hook
 * accepts, a missing `after` hook does nothing.
 */

use super::opposite::Opposite;
use crate::core::data_structures::IndexSequence;
use crate::core::types::{CollectionGetterPolicy, Nullable};
use serde::{Deserialize, Serialize};

fn is_null<T: Nullable>(value: &T) -> bool {
    value.is_null()
}

/// Options for [`get_value`](crate::AccessorRuntime::get_value)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GetOptions {
    pub policy: CollectionGetterPolicy,
    /// The value itself must not be null
    pub not_null_self: bool,
    /// No element (or map key) may be null
    pub not_null_key_or_element: bool,
    /// No map value may be null
    pub not_null_value: bool,
}

impl GetOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_policy(mut self, policy: CollectionGetterPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn not_null(mut self) -> Self {
        self.not_null_self = true;
        self
    }

    pub fn not_null_elements(mut self) -> Self {
        self.not_null_key_or_element = true;
        self
    }

    pub fn not_null_values(mut self) -> Self {
        self.not_null_value = true;
        self
    }
}

type Equals<'a, V> = Box<dyn Fn(&V, &V) -> bool + 'a>;
type BeforeChange<'a, V> = Box<dyn FnMut(&V, &V) -> bool + 'a>;
type AfterChange<'a, V> = Box<dyn FnMut(&V, &V) + 'a>;

/// Request for [`set_value`](crate::AccessorRuntime::set_value)
pub struct SetValue<'a, V: Nullable> {
    pub(crate) not_null: bool,
    pub(crate) equals: Option<Equals<'a, V>>,
    pub(crate) before_change: Option<BeforeChange<'a, V>>,
    pub(crate) after_change: Option<AfterChange<'a, V>>,
    pub(crate) opposite: Option<&'a dyn Opposite<V::Target>>,
}

impl<'a, V: Nullable> SetValue<'a, V> {
    pub fn new() -> Self {
        Self {
            not_null: false,
            equals: None,
            before_change: None,
            after_change: None,
            opposite: None,
        }
    }

    /// Reject null new values
    pub fn not_null(mut self) -> Self {
        self.not_null = true;
        self
    }

    /// Skip the assignment when `equals(old, new)` holds
    ///
    /// Without a comparator every call counts as a change.
    pub fn compare_with(mut self, equals: impl Fn(&V, &V) -> bool + 'a) -> Self {
        self.equals = Some(Box::new(equals));
        self
    }

    /// [`compare_with`](Self::compare_with) using `PartialEq`
    pub fn compare_eq(self) -> Self
    where
        V: PartialEq,
    {
        self.compare_with(|old, new| old == new)
    }

    /// Veto hook, called with (old, new)
    pub fn before_change(mut self, hook: impl FnMut(&V, &V) -> bool + 'a) -> Self {
        self.before_change = Some(Box::new(hook));
        self
    }

    /// Notification hook, called with (old, new) once assigned
    pub fn after_change(mut self, hook: impl FnMut(&V, &V) + 'a) -> Self {
        self.after_change = Some(Box::new(hook));
        self
    }

    pub fn with_opposite(mut self, opposite: &'a dyn Opposite<V::Target>) -> Self {
        self.opposite = Some(opposite);
        self
    }
}

impl<V: Nullable> Default for SetValue<'_, V> {
    fn default() -> Self {
        Self::new()
    }
}

type BeforeAddElement<'a, E> = Box<dyn FnMut(&E, usize, &[E]) -> bool + 'a>;
type BeforeAdd<'a, E> = Box<dyn FnMut(&[E], &IndexSequence) -> bool + 'a>;
type AfterAddElement<'a, E> = Box<dyn FnMut(&E, usize, &[E], &[E]) + 'a>;
type AfterAdd<'a, E> = Box<dyn FnMut(&[E], &IndexSequence, &[E], &[E]) + 'a>;

/// Request for [`add_to_collection`](crate::AccessorRuntime::add_to_collection)
/// and [`add_to_list`](crate::AccessorRuntime::add_to_list)
pub struct AddElements<'a, E> {
    pub(crate) not_null: Option<fn(&E) -> bool>,
    pub(crate) before_element: Option<BeforeAddElement<'a, E>>,
    pub(crate) before: Option<BeforeAdd<'a, E>>,
    pub(crate) after_element: Option<AfterAddElement<'a, E>>,
    pub(crate) after: Option<AfterAdd<'a, E>>,
    pub(crate) opposite: Option<&'a dyn Opposite<E>>,
}

impl<'a, E> AddElements<'a, E> {
    pub fn new() -> Self {
        Self {
            not_null: None,
            before_element: None,
            before: None,
            after_element: None,
            after: None,
            opposite: None,
        }
    }

    /// Per-element veto, called with (element, prospective index, old elements)
    pub fn before_element(mut self, hook: impl FnMut(&E, usize, &[E]) -> bool + 'a) -> Self {
        self.before_element = Some(Box::new(hook));
        self
    }

    /// Batch veto, called with the accepted elements and their indices
    pub fn before(mut self, hook: impl FnMut(&[E], &IndexSequence) -> bool + 'a) -> Self {
        self.before = Some(Box::new(hook));
        self
    }

    /// Called per added element with (element, index, old elements, new elements)
    pub fn after_element(mut self, hook: impl FnMut(&E, usize, &[E], &[E]) + 'a) -> Self {
        self.after_element = Some(Box::new(hook));
        self
    }

    /// Called once with (elements, indices, old elements, new elements)
    pub fn after(mut self, hook: impl FnMut(&[E], &IndexSequence, &[E], &[E]) + 'a) -> Self {
        self.after = Some(Box::new(hook));
        self
    }

    pub fn with_opposite(mut self, opposite: &'a dyn Opposite<E>) -> Self {
        self.opposite = Some(opposite);
        self
    }
}

impl<E: Nullable> AddElements<'_, E> {
    /// Reject null candidates
    pub fn not_null(mut self) -> Self {
        self.not_null = Some(is_null::<E> as fn(&E) -> bool);
        self
    }
}

impl<E> Default for AddElements<'_, E> {
    fn default() -> Self {
        Self::new()
    }
}

type BeforeRemoveElement<'a, E> = Box<dyn FnMut(&E, Option<usize>, &[E]) -> bool + 'a>;
type BeforeRemove<'a, E> = Box<dyn FnMut(&[E], Option<&[usize]>) -> bool + 'a>;
type AfterRemoveElement<'a, E> = Box<dyn FnMut(&E, Option<usize>, &[E], &[E]) + 'a>;
type AfterRemove<'a, E> = Box<dyn FnMut(&[E], Option<&[usize]>, &[E], &[E]) + 'a>;

/// What to remove from a collection
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Removal<E> {
    /// Remove these values
    Elements(Vec<E>),
    /// Remove the element at this position (lists only)
    Index(usize),
}

/// Request for [`remove_from_collection`](crate::AccessorRuntime::remove_from_collection)
///
/// Positions are `None` for containers without meaningful positions.
pub struct RemoveElements<'a, E> {
    pub(crate) remove_all: bool,
    pub(crate) before_element: Option<BeforeRemoveElement<'a, E>>,
    pub(crate) before: Option<BeforeRemove<'a, E>>,
    pub(crate) after_element: Option<AfterRemoveElement<'a, E>>,
    pub(crate) after: Option<AfterRemove<'a, E>>,
    pub(crate) opposite: Option<&'a dyn Opposite<E>>,
}

impl<'a, E> RemoveElements<'a, E> {
    pub fn new() -> Self {
        Self {
            remove_all: false,
            before_element: None,
            before: None,
            after_element: None,
            after: None,
            opposite: None,
        }
    }

    /// Remove every occurrence of each value from lists, not only the first
    pub fn remove_all(mut self) -> Self {
        self.remove_all = true;
        self
    }

    /// Per-element veto, called with (element, position, old elements)
    pub fn before_element(
        mut self,
        hook: impl FnMut(&E, Option<usize>, &[E]) -> bool + 'a,
    ) -> Self {
        self.before_element = Some(Box::new(hook));
        self
    }

    /// Batch veto, called with the accepted elements and their positions
    pub fn before(mut self, hook: impl FnMut(&[E], Option<&[usize]>) -> bool + 'a) -> Self {
        self.before = Some(Box::new(hook));
        self
    }

    /// Called per removed element with (element, position, old elements, new elements)
    pub fn after_element(
        mut self,
        hook: impl FnMut(&E, Option<usize>, &[E], &[E]) + 'a,
    ) -> Self {
        self.after_element = Some(Box::new(hook));
        self
    }

    /// Called once with (elements, positions, old elements, new elements)
    pub fn after(
        mut self,
        hook: impl FnMut(&[E], Option<&[usize]>, &[E], &[E]) + 'a,
    ) -> Self {
        self.after = Some(Box::new(hook));
        self
    }

    pub fn with_opposite(mut self, opposite: &'a dyn Opposite<E>) -> Self {
        self.opposite = Some(opposite);
        self
    }
}

impl<E> Default for RemoveElements<'_, E> {
    fn default() -> Self {
        Self::new()
    }
}

/// Request for [`put_to_map`](crate::AccessorRuntime::put_to_map)
pub struct PutEntries<K, V> {
    pub(crate) not_null_keys: Option<fn(&K) -> bool>,
    pub(crate) not_null_values: Option<fn(&V) -> bool>,
}

impl<K, V> PutEntries<K, V> {
    pub fn new() -> Self {
        Self {
            not_null_keys: None,
            not_null_values: None,
        }
    }
}

impl<K: Nullable, V> PutEntries<K, V> {
    pub fn not_null_keys(mut self) -> Self {
        self.not_null_keys = Some(is_null::<K> as fn(&K) -> bool);
        self
    }
}

impl<K, V: Nullable> PutEntries<K, V> {
    pub fn not_null_values(mut self) -> Self {
        self.not_null_values = Some(is_null::<V> as fn(&V) -> bool);
        self
    }
}

impl<K, V> Default for PutEntries<K, V> {
    fn default() -> Self {
        Self::new()
    }
}
