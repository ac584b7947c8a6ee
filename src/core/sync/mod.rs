/*!
 * Synchronization Primitives
 *
 * The two locking disciplines every accessor call composes:
 * - Named locks: fair, reentrant read/write locks looked up by name and
 *   held for the whole accessor call (opt-in per field)
 * - Modification guard: non-blocking per-context, per-field reentrancy
 *   tracking that makes nested mutation of the same field a no-op
 *
 * # Architecture
 *
 * Both are keyed by an explicit [`ExecutionContext`] instead of an implicit
 * thread lookup, so callers (and tests) can name the context a call runs in.
 */

mod context;
mod fair_rwlock;
mod modification;
mod named;

pub use context::ExecutionContext;
pub use fair_rwlock::{FairRwLock, LockMode};
pub use modification::ModificationGuard;
pub use named::NamedLockRegistry;
