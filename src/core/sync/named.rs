/*!
 * Named Synchronization Lock Registry
 *
 * Process-wide table of fair reentrant read/write locks keyed by name
 */

use super::context::ExecutionContext;
use super::fair_rwlock::{FairRwLock, LockMode};
use crate::core::errors::{AccessorError, AccessorResult};
use crate::core::guard::NamedLockGuard;
use crate::core::types::LockName;
use ahash::RandomState;
use dashmap::DashMap;
use std::sync::Arc;
use tracing::trace;

/// Registry of named locks
///
/// Locks are created on first use and live as long as the registry. Creation
/// goes through the shard lock of the underlying map, so a name always maps
/// to the same [`FairRwLock`].
///
/// A missing or empty name is a no-op for every operation: the caller did not
/// ask for serialization.
///
/// # Example
///
/// ```
/// use accessor_runtime::core::{ExecutionContext, NamedLockRegistry};
///
/// let registry = NamedLockRegistry::new();
/// let ctx = ExecutionContext::current();
/// {
///     let _guard = registry.write(Some("orders"), ctx).unwrap();
///     assert!(registry.get("orders").unwrap().is_write_locked());
/// }
/// assert!(!registry.get("orders").unwrap().is_write_locked());
/// ```
pub struct NamedLockRegistry {
    locks: DashMap<LockName, Arc<FairRwLock>, RandomState>,
}

impl NamedLockRegistry {
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            locks: DashMap::with_capacity_and_hasher(capacity, RandomState::new()),
        }
    }

    /// Lock registered under `name`, created on first use
    pub fn lock_for(&self, name: &str) -> Arc<FairRwLock> {
        if let Some(lock) = self.locks.get(name) {
            return lock.clone();
        }

        self.locks
            .entry(LockName::from(name))
            .or_insert_with(|| {
                trace!(lock = name, "Creating named lock");
                Arc::new(FairRwLock::new(name))
            })
            .clone()
    }

    /// Lock registered under `name`, if it was ever used
    pub fn get(&self, name: &str) -> Option<Arc<FairRwLock>> {
        self.locks.get(name).map(|lock| lock.clone())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.locks.contains_key(name)
    }

    /// Number of locks created so far
    pub fn len(&self) -> usize {
        self.locks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locks.is_empty()
    }

    pub fn acquire_read(&self, name: Option<&str>, context: ExecutionContext) {
        if let Some(name) = requested(name) {
            self.lock_for(name).acquire_read(context);
        }
    }

    pub fn acquire_write(
        &self,
        name: Option<&str>,
        context: ExecutionContext,
    ) -> AccessorResult<()> {
        match requested(name) {
            Some(name) => self.lock_for(name).acquire_write(context),
            None => Ok(()),
        }
    }

    pub fn release_read(&self, name: Option<&str>, context: ExecutionContext) -> AccessorResult<()> {
        match requested(name) {
            Some(name) => self.existing(name)?.release_read(context),
            None => Ok(()),
        }
    }

    pub fn release_write(
        &self,
        name: Option<&str>,
        context: ExecutionContext,
    ) -> AccessorResult<()> {
        match requested(name) {
            Some(name) => self.existing(name)?.release_write(context),
            None => Ok(()),
        }
    }

    /// Hold the read lock for the guard's scope
    pub fn read(
        &self,
        name: Option<&str>,
        context: ExecutionContext,
    ) -> AccessorResult<NamedLockGuard> {
        match requested(name) {
            Some(name) => {
                let lock = self.lock_for(name);
                lock.acquire_read(context);
                Ok(NamedLockGuard::held(lock, LockMode::Read, context))
            }
            None => Ok(NamedLockGuard::unlocked()),
        }
    }

    /// Hold the write lock for the guard's scope
    pub fn write(
        &self,
        name: Option<&str>,
        context: ExecutionContext,
    ) -> AccessorResult<NamedLockGuard> {
        match requested(name) {
            Some(name) => {
                let lock = self.lock_for(name);
                lock.acquire_write(context)?;
                Ok(NamedLockGuard::held(lock, LockMode::Write, context))
            }
            None => Ok(NamedLockGuard::unlocked()),
        }
    }

    fn existing(&self, name: &str) -> AccessorResult<Arc<FairRwLock>> {
        self.get(name).ok_or_else(|| AccessorError::LockNotHeld {
            name: LockName::from(name),
        })
    }
}

impl Default for NamedLockRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for NamedLockRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NamedLockRegistry")
            .field("locks", &self.locks.len())
            .finish()
    }
}

fn requested(name: Option<&str>) -> Option<&str> {
    name.filter(|name| !name.is_empty())
}
