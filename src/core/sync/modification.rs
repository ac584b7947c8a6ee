/*!
 * Concurrent-Modification Guard
 *
 * Per-context, per-field reentrancy tracking for accessor mutations
 */

use super::context::ExecutionContext;
use crate::core::errors::{AccessorError, AccessorResult};
use crate::core::guard::FieldGuard;
use crate::core::types::{FieldName, ObjectId};
use ahash::RandomState;
use parking_lot::Mutex;
use std::collections::HashMap;

type OwnerCounts = HashMap<ObjectId, usize, RandomState>;
type FieldBuckets = HashMap<FieldName, OwnerCounts, RandomState>;

/// Tracks which (owner, field) pairs each context is currently modifying
///
/// A mutation that finds its own field already locked for the calling context
/// is a nested modification (typically a hook or counterpart accessor writing
/// back into the field being changed) and is skipped instead of blocking.
///
/// Entries are reentrant counters. Empty owner, field and context buckets are
/// pruned on unlock, so an idle guard holds no memory.
#[derive(Default)]
pub struct ModificationGuard {
    entries: Mutex<HashMap<ExecutionContext, FieldBuckets, RandomState>>,
}

impl ModificationGuard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lock(&self, context: ExecutionContext, owner: ObjectId, field: &str) {
        let mut entries = self.entries.lock();
        Self::increment(&mut entries, context, owner, field);
    }

    pub fn unlock(&self, context: ExecutionContext, owner: ObjectId, field: &str) -> AccessorResult<()> {
        let mut entries = self.entries.lock();
        let not_locked = || AccessorError::FieldNotLocked {
            field: FieldName::from(field),
        };

        let fields = entries.get_mut(&context).ok_or_else(not_locked)?;
        let owners = fields.get_mut(field).ok_or_else(not_locked)?;
        let count = owners.get_mut(&owner).ok_or_else(not_locked)?;

        *count -= 1;
        if *count == 0 {
            owners.remove(&owner);
            if owners.is_empty() {
                fields.remove(field);
                if fields.is_empty() {
                    entries.remove(&context);
                }
            }
        }

        Ok(())
    }

    pub fn is_locked(&self, context: ExecutionContext, owner: ObjectId, field: &str) -> bool {
        self.depth(context, owner, field) > 0
    }

    /// Reentrancy count of the entry, 0 when unlocked
    pub fn depth(&self, context: ExecutionContext, owner: ObjectId, field: &str) -> usize {
        self.entries
            .lock()
            .get(&context)
            .and_then(|fields| fields.get(field))
            .and_then(|owners| owners.get(&owner))
            .copied()
            .unwrap_or(0)
    }

    /// Number of contexts with at least one locked field
    pub fn active_contexts(&self) -> usize {
        self.entries.lock().len()
    }

    /// Lock the entry unless this context already holds it
    ///
    /// The check and the lock happen under one acquisition of the guard's
    /// mutex. Returns `None` for a nested modification.
    pub fn try_enter(
        &self,
        context: ExecutionContext,
        owner: ObjectId,
        field: &str,
    ) -> Option<FieldGuard<'_>> {
        let mut entries = self.entries.lock();

        let nested = entries
            .get(&context)
            .and_then(|fields| fields.get(field))
            .is_some_and(|owners| owners.contains_key(&owner));
        if nested {
            return None;
        }

        Self::increment(&mut entries, context, owner, field);
        Some(FieldGuard::entered(self, context, owner, FieldName::from(field)))
    }

    fn increment(
        entries: &mut HashMap<ExecutionContext, FieldBuckets, RandomState>,
        context: ExecutionContext,
        owner: ObjectId,
        field: &str,
    ) {
        let fields = entries.entry(context).or_default();
        let owners = fields.entry(FieldName::from(field)).or_default();
        *owners.entry(owner).or_insert(0) += 1;
    }
}

impl std::fmt::Debug for ModificationGuard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModificationGuard")
            .field("active_contexts", &self.active_contexts())
            .finish()
    }
}
