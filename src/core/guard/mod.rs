/*!
 * RAII Guards
 *
 * Scoped holds on the two accessor locking disciplines, released on every
 * exit path (return, veto, error, unwinding).
 *
 * ## Guard Types
 *
 * - **NamedLockGuard**: Read or write hold on a named lock
 * - **FieldGuard**: Modification-guard entry for one (context, owner, field)
 *
 * The rollback journal used by bidirectional mutations implements the same
 * [`Guard`] trait and lives with the accessor protocol.
 *
 * ## Example
 *
 * ```rust
 * use accessor_runtime::core::{ExecutionContext, ModificationGuard, ObjectId};
 *
 * let guard = ModificationGuard::new();
 * let ctx = ExecutionContext::current();
 * let owner = ObjectId::from_raw(0x10);
 * {
 *     let _entry = guard.try_enter(ctx, owner, "items").unwrap();
 *     // Nested mutation of the same field is refused
 *     assert!(guard.try_enter(ctx, owner, "items").is_none());
 * }
 * assert!(!guard.is_locked(ctx, owner, "items"));
 * ```
 */

mod field;
mod named;
mod traits;

pub use field::FieldGuard;
pub use named::NamedLockGuard;
pub use traits::Guard;

use crate::core::errors::AccessorError;
use crate::core::sync::ExecutionContext;

/// Result type for guard operations
pub type GuardResult<T> = Result<T, GuardError>;

/// Errors that can occur while releasing a guard
#[derive(Debug, thiserror::Error)]
pub enum GuardError {
    #[error("Resource already released")]
    AlreadyReleased,

    #[error("Release failed: {0}")]
    ReleaseFailed(#[from] AccessorError),
}

/// Guard metadata for observability
///
/// Guards report how long they were held when they release.
#[derive(Debug, Clone)]
pub struct GuardMetadata {
    pub creation_time: std::time::Instant,
    pub context: Option<ExecutionContext>,
}

impl GuardMetadata {
    #[inline]
    pub fn new() -> Self {
        Self {
            creation_time: std::time::Instant::now(),
            context: None,
        }
    }

    #[inline]
    pub fn with_context(mut self, context: ExecutionContext) -> Self {
        self.context = Some(context);
        self
    }

    #[inline]
    pub fn lifetime_micros(&self) -> u64 {
        self.creation_time.elapsed().as_micros() as u64
    }
}

impl Default for GuardMetadata {
    fn default() -> Self {
        Self::new()
    }
}
