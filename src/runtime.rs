/*!
 * Accessor Runtime
 *
 * Owns the named lock registry, the modification guard and the assertion
 * policy shared by every accessor operation
 */

use crate::core::config::{AssertionMode, RuntimeConfig};
use crate::core::errors::{AccessorError, AccessorResult};
use crate::core::sync::{ModificationGuard, NamedLockRegistry};
use std::sync::OnceLock;
use tracing::{info, warn};

static GLOBAL: OnceLock<AccessorRuntime> = OnceLock::new();

/// Entry point for generated accessors
///
/// Independent runtimes share nothing: lock names and field entries are
/// scoped to the runtime they were used with. Generated code normally uses
/// [`AccessorRuntime::global`].
#[derive(Debug)]
pub struct AccessorRuntime {
    pub(crate) config: RuntimeConfig,
    pub(crate) named_locks: NamedLockRegistry,
    pub(crate) modifications: ModificationGuard,
}

impl AccessorRuntime {
    pub fn new(config: RuntimeConfig) -> Self {
        Self {
            named_locks: NamedLockRegistry::with_capacity(config.lock_registry_capacity),
            modifications: ModificationGuard::new(),
            config,
        }
    }

    /// Process-wide runtime, configured from the environment on first use
    pub fn global() -> &'static Self {
        GLOBAL.get_or_init(|| {
            let config = RuntimeConfig::from_env().unwrap_or_else(|e| {
                warn!(error = %e, "Invalid accessor environment, using defaults");
                RuntimeConfig::default()
            });
            Self::new(config)
        })
    }

    /// Install the process-wide runtime
    ///
    /// Fails once the global runtime exists, whether installed here or
    /// created lazily by [`global`](Self::global).
    pub fn init_global(config: RuntimeConfig) -> AccessorResult<&'static Self> {
        let mut installed = false;
        let runtime = GLOBAL.get_or_init(|| {
            installed = true;
            Self::new(config)
        });

        if !installed {
            return Err(AccessorError::AlreadyInitialized);
        }

        info!(assertions = ?runtime.config.assertions, "Accessor runtime initialized");
        Ok(runtime)
    }

    #[inline]
    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    #[inline]
    pub fn named_locks(&self) -> &NamedLockRegistry {
        &self.named_locks
    }

    #[inline]
    pub fn modifications(&self) -> &ModificationGuard {
        &self.modifications
    }

    /// Apply the assertion policy to an invariant
    ///
    /// `holds` is only evaluated when assertions are on.
    pub(crate) fn check(
        &self,
        holds: impl FnOnce() -> bool,
        violation: impl FnOnce() -> AccessorError,
    ) -> AccessorResult<()> {
        if self.config.assertions == AssertionMode::Disabled || holds() {
            return Ok(());
        }

        let error = violation();
        if self.config.assertions == AssertionMode::Warn {
            warn!(kind = error.kind(), error = %error, "Accessor invariant violated");
            return Ok(());
        }
        Err(error)
    }
}

impl Default for AccessorRuntime {
    fn default() -> Self {
        Self::new(RuntimeConfig::default())
    }
}
