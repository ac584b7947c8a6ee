/*!
 * Field Views
 *
 * What a getter hands back: the live field or a read-only view of it
 */

use super::container::FieldValue;
use crate::core::types::ContainerKind;
use parking_lot::{RwLock, RwLockReadGuard};
use std::sync::Arc;

/// Shared, interiorly mutable field storage
pub type SharedField<V> = Arc<RwLock<V>>;

/// Result of a getter call
#[derive(Debug)]
pub enum FieldView<V> {
    /// The field itself; writes through this handle change the field
    Live(SharedField<V>),
    /// Read-only access to the field or to a snapshot of it
    ReadOnly(ReadOnlyField<V>),
}

impl<V> FieldView<V> {
    #[inline]
    pub fn is_live(&self) -> bool {
        matches!(self, FieldView::Live(_))
    }

    pub fn read(&self) -> RwLockReadGuard<'_, V> {
        match self {
            FieldView::Live(field) => field.read(),
            FieldView::ReadOnly(view) => view.read(),
        }
    }

    /// Writable handle, only for live views
    pub fn into_live(self) -> Option<SharedField<V>> {
        match self {
            FieldView::Live(field) => Some(field),
            FieldView::ReadOnly(_) => None,
        }
    }

    pub fn snapshot(&self) -> V
    where
        V: Clone,
    {
        self.read().clone()
    }
}

/// Read-only view of a field value
///
/// A live view sees later mutations of the field. A detached view reads a
/// snapshot taken when the view was created.
pub struct ReadOnlyField<V> {
    source: SharedField<V>,
    detached: bool,
}

impl<V> ReadOnlyField<V> {
    /// View over the live field
    pub fn live(field: &SharedField<V>) -> Self {
        Self {
            source: Arc::clone(field),
            detached: false,
        }
    }

    /// View over a copy of `value`
    pub fn detached(value: V) -> Self {
        Self {
            source: Arc::new(RwLock::new(value)),
            detached: true,
        }
    }

    pub fn read(&self) -> RwLockReadGuard<'_, V> {
        self.source.read()
    }

    pub fn snapshot(&self) -> V
    where
        V: Clone,
    {
        self.source.read().clone()
    }

    #[inline]
    pub fn is_detached(&self) -> bool {
        self.detached
    }

    pub fn kind(&self) -> Option<ContainerKind>
    where
        V: FieldValue,
    {
        self.source.read().container_kind()
    }
}

impl<V: std::fmt::Debug> std::fmt::Debug for ReadOnlyField<V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReadOnlyField")
            .field("value", &*self.source.read())
            .field("detached", &self.detached)
            .finish()
    }
}
