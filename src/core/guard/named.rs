/*!
 * Named Lock Guards
 *
 * Scoped read or write hold on a registry lock
 */

use super::traits::Guard;
use super::{GuardError, GuardMetadata, GuardResult};
use crate::core::sync::{ExecutionContext, FairRwLock, LockMode};
use std::sync::Arc;
use tracing::{error, trace};

/// Hold on a named lock, released on drop
///
/// An unlocked guard stands in for calls that did not name a lock, so
/// callers can hold a guard unconditionally.
pub struct NamedLockGuard {
    lock: Option<(Arc<FairRwLock>, ExecutionContext)>,
    mode: LockMode,
    metadata: GuardMetadata,
}

impl NamedLockGuard {
    /// Wrap a hold that `context` already acquired in `mode`
    pub(crate) fn held(lock: Arc<FairRwLock>, mode: LockMode, context: ExecutionContext) -> Self {
        Self {
            lock: Some((lock, context)),
            mode,
            metadata: GuardMetadata::new().with_context(context),
        }
    }

    /// Guard that holds nothing
    pub(crate) fn unlocked() -> Self {
        Self {
            lock: None,
            mode: LockMode::Read,
            metadata: GuardMetadata::new(),
        }
    }

    #[inline]
    pub fn mode(&self) -> LockMode {
        self.mode
    }

    /// Name of the held lock
    pub fn name(&self) -> Option<&str> {
        self.lock.as_ref().map(|(lock, _)| lock.name())
    }
}

impl Guard for NamedLockGuard {
    fn resource_type(&self) -> &'static str {
        "named_lock"
    }

    fn metadata(&self) -> &GuardMetadata {
        &self.metadata
    }

    fn is_active(&self) -> bool {
        self.lock.is_some()
    }

    fn release(&mut self) -> GuardResult<()> {
        let (lock, context) = self.lock.take().ok_or(GuardError::AlreadyReleased)?;

        match self.mode {
            LockMode::Read => lock.release_read(context)?,
            LockMode::Write => lock.release_write(context)?,
        }
        trace!(
            resource = self.resource_type(),
            lock = lock.name(),
            mode = ?self.mode,
            held_micros = self.metadata.lifetime_micros(),
            "Guard released"
        );
        Ok(())
    }
}

impl Drop for NamedLockGuard {
    fn drop(&mut self) {
        if self.is_active() {
            if let Err(e) = self.release() {
                error!(error = %e, "Named lock release failed");
            }
        }
    }
}

impl std::fmt::Debug for NamedLockGuard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NamedLockGuard")
            .field("name", &self.name())
            .field("mode", &self.mode)
            .field("context", &self.metadata.context)
            .finish()
    }
}
