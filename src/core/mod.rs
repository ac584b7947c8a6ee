/*!
 * Core Module
 * Fundamental runtime types, error handling, guards and lock primitives
 */

pub mod config;
pub mod data_structures;
pub mod errors;
pub mod guard;
pub mod sync;
pub mod types;

// Re-export for convenience
pub use config::{AssertionMode, RuntimeConfig, TelemetryConfig};
pub use data_structures::{IndexIter, IndexSequence, InlineString};
pub use errors::*;
pub use guard::{FieldGuard, Guard, GuardError, GuardMetadata, GuardResult, NamedLockGuard};
pub use sync::{ExecutionContext, FairRwLock, LockMode, ModificationGuard, NamedLockRegistry};
pub use types::*;
