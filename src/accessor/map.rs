/*!
 * Map Operations
 *
 * Map mutations serialize on the named lock only; the modification guard is
 * not consulted.
 */

use super::container::KeyedContainer;
use super::request::PutEntries;
use crate::core::errors::{AccessorError, AccessorResult};
use crate::core::types::Access;
use crate::runtime::AccessorRuntime;
use tracing::debug;

impl AccessorRuntime {
    /// Put entries into a map
    ///
    /// A single entry returns the value it replaced. Several entries are
    /// merged in one step and return `None`.
    pub fn put_to_map<K, V, M>(
        &self,
        access: Access<'_>,
        map: &mut M,
        mut entries: Vec<(K, V)>,
        request: PutEntries<K, V>,
    ) -> AccessorResult<Option<V>>
    where
        M: KeyedContainer<K, V> + ?Sized,
    {
        let _lock = self.named_locks.write(access.lock_name(), access.context())?;

        if let Some(is_null) = request.not_null_keys {
            self.check(
                || !entries.iter().any(|(key, _)| is_null(key)),
                || AccessorError::NullElement {
                    field: access.field().into(),
                },
            )?;
        }

        if let Some(is_null) = request.not_null_values {
            self.check(
                || !entries.iter().any(|(_, value)| is_null(value)),
                || AccessorError::NullMapValue {
                    field: access.field().into(),
                },
            )?;
        }

        if entries.len() == 1 {
            if let Some((key, value)) = entries.pop() {
                return Ok(map.put(key, value));
            }
        }

        debug!(field = access.field(), count = entries.len(), "Map entries put");
        map.put_all(entries);
        Ok(None)
    }

    /// Remove one key from a map, returning its value
    pub fn remove_from_map<K, V, M>(
        &self,
        access: Access<'_>,
        map: &mut M,
        key: &K,
    ) -> AccessorResult<Option<V>>
    where
        M: KeyedContainer<K, V> + ?Sized,
    {
        let _lock = self.named_locks.write(access.lock_name(), access.context())?;
        Ok(map.remove_key(key))
    }

    /// Empty a map
    ///
    /// Returns `false` when the map was already empty.
    pub fn clear_map<K, V, M>(&self, access: Access<'_>, map: &mut M) -> AccessorResult<bool>
    where
        M: KeyedContainer<K, V> + ?Sized,
    {
        let _lock = self.named_locks.write(access.lock_name(), access.context())?;

        if map.is_empty() {
            return Ok(false);
        }

        let cleared = map.len();
        map.clear_entries();
        let remaining = map.len();
        self.check(
            || remaining == 0,
            || AccessorError::MapNotCleared {
                field: access.field().into(),
                remaining,
            },
        )?;

        debug!(field = access.field(), cleared, "Map cleared");
        Ok(true)
    }
}
