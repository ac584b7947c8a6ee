/*!
 * Core Types
 * Common types shared by the guard, the lock registry and the accessor protocol
 */

use crate::core::sync::ExecutionContext;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, VecDeque};
use std::rc::Rc;
use std::sync::Arc;

/// Field name as generated into accessor calls
pub type FieldName = super::data_structures::InlineString;

/// Synchronization lock name
pub type LockName = super::data_structures::InlineString;

/// Identity of an owning object
///
/// Derived from the object's address, so two equal but distinct objects have
/// different identities. The owner must stay in place for the duration of the
/// accessor call, which holding a reference to it guarantees.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ObjectId(usize);

impl ObjectId {
    /// Identity of the object behind `object`
    #[inline]
    pub fn of<T: ?Sized>(object: &T) -> Self {
        Self(object as *const T as *const () as usize)
    }

    #[inline]
    pub const fn from_raw(raw: usize) -> Self {
        Self(raw)
    }

    #[inline]
    pub const fn as_raw(self) -> usize {
        self.0
    }
}

/// What a generated getter hands back for container-valued fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CollectionGetterPolicy {
    /// The live field handle
    #[default]
    Plain,
    /// Read-only view of the live container; later mutations stay visible
    Unmodifiable,
    /// Read-only view of a snapshot taken at read time
    UnmodifiableCopy,
}

/// Recognized container shapes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContainerKind {
    List,
    Set,
    SortedSet,
    Map,
    SortedMap,
}

impl ContainerKind {
    /// Positions are meaningful
    #[inline]
    pub const fn is_list(self) -> bool {
        matches!(self, ContainerKind::List)
    }

    /// Elements are unique
    #[inline]
    pub const fn is_set(self) -> bool {
        matches!(self, ContainerKind::Set | ContainerKind::SortedSet)
    }

    #[inline]
    pub const fn is_keyed(self) -> bool {
        matches!(self, ContainerKind::Map | ContainerKind::SortedMap)
    }

    #[inline]
    pub const fn is_sorted(self) -> bool {
        matches!(self, ContainerKind::SortedSet | ContainerKind::SortedMap)
    }
}

/// Values that may be absent
///
/// `Option<T>` is null when `None`; every other implementor is never null.
/// Use [`impl_non_null!`](crate::impl_non_null) for your own types.
pub trait Nullable {
    /// Type of the present value
    type Target: ?Sized;

    fn present(&self) -> Option<&Self::Target>;

    #[inline]
    fn is_null(&self) -> bool {
        self.present().is_none()
    }
}

impl<T> Nullable for Option<T> {
    type Target = T;

    #[inline]
    fn present(&self) -> Option<&T> {
        self.as_ref()
    }
}

impl<'a, T: ?Sized> Nullable for &'a T {
    type Target = T;

    #[inline]
    fn present(&self) -> Option<&T> {
        Some(*self)
    }
}

/// Implements [`Nullable`] (never null) and the scalar form of
/// [`FieldValue`](crate::accessor::FieldValue) for the listed types.
#[macro_export]
macro_rules! impl_non_null {
    ($($ty:ty),* $(,)?) => {
        $(
            impl $crate::core::Nullable for $ty {
                type Target = Self;

                #[inline]
                fn present(&self) -> ::std::option::Option<&Self> {
                    ::std::option::Option::Some(self)
                }
            }

            impl $crate::accessor::FieldValue for $ty {}
        )*
    };
}

macro_rules! non_null_generic {
    ($($ty:ident<$($param:ident),+>),* $(,)?) => {
        $(
            impl<$($param: ?Sized),+> Nullable for $ty<$($param),+> {
                type Target = Self;

                #[inline]
                fn present(&self) -> Option<&Self> {
                    Some(self)
                }
            }
        )*
    };
}

non_null_generic!(Arc<T>, Rc<T>, Box<T>);

macro_rules! non_null_container {
    ($($ty:ident<$($param:ident),+>),* $(,)?) => {
        $(
            impl<$($param),+> Nullable for $ty<$($param),+> {
                type Target = Self;

                #[inline]
                fn present(&self) -> Option<&Self> {
                    Some(self)
                }
            }
        )*
    };
}

non_null_container!(
    Vec<T>,
    VecDeque<T>,
    HashSet<T, S>,
    BTreeSet<T>,
    HashMap<K, V, S>,
    BTreeMap<K, V>,
);

/// Common part of every accessor request
///
/// Names the field being accessed, the identity of its owner, the optional
/// synchronization lock and the execution context the call runs in.
#[derive(Debug, Clone, Copy)]
pub struct Access<'a> {
    field: &'a str,
    owner: ObjectId,
    lock: Option<&'a str>,
    context: ExecutionContext,
}

impl<'a> Access<'a> {
    /// Access `field` of `owner` from the current thread's context
    pub fn new<O: ?Sized>(owner: &O, field: &'a str) -> Self {
        Self::for_owner(ObjectId::of(owner), field)
    }

    pub fn for_owner(owner: ObjectId, field: &'a str) -> Self {
        Self {
            field,
            owner,
            lock: None,
            context: ExecutionContext::current(),
        }
    }

    /// Serialize this call on the named lock; an empty name means none
    pub fn with_lock(mut self, name: &'a str) -> Self {
        self.lock = (!name.is_empty()).then_some(name);
        self
    }

    pub fn with_optional_lock(mut self, name: Option<&'a str>) -> Self {
        self.lock = name.filter(|name| !name.is_empty());
        self
    }

    /// Run this call as `context` instead of the current thread
    pub fn in_context(mut self, context: ExecutionContext) -> Self {
        self.context = context;
        self
    }

    #[inline]
    pub fn field(&self) -> &'a str {
        self.field
    }

    #[inline]
    pub fn owner(&self) -> ObjectId {
        self.owner
    }

    #[inline]
    pub fn lock_name(&self) -> Option<&'a str> {
        self.lock
    }

    #[inline]
    pub fn context(&self) -> ExecutionContext {
        self.context
    }
}
