/*!
 * Execution Contexts
 *
 * Identity of the execution unit an accessor call runs in
 */

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_CONTEXT_ID: AtomicU64 = AtomicU64::new(1);

/// Handle naming the execution unit that owns guard entries and lock holds
///
/// [`ExecutionContext::current`] is stable for the lifetime of an OS thread and
/// never shared between two live threads. [`ExecutionContext::detached`] mints a
/// fresh context, which lets a single thread act as several independent
/// callers.
///
/// The id is never 0.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ExecutionContext(u64);

impl ExecutionContext {
    /// Context of the calling thread
    #[inline]
    pub fn current() -> Self {
        thread_local!(static CURRENT: ExecutionContext = ExecutionContext::detached());
        CURRENT.with(|context| *context)
    }

    /// Fresh context not bound to any thread
    #[inline]
    pub fn detached() -> Self {
        Self(NEXT_CONTEXT_ID.fetch_add(1, Ordering::Relaxed))
    }

    #[inline]
    pub const fn id(self) -> u64 {
        self.0
    }
}

impl fmt::Debug for ExecutionContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ctx#{}", self.0)
    }
}

impl fmt::Display for ExecutionContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}
