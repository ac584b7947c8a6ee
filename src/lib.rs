/*!
 * Accessor Runtime Library
 * Guarded getter/setter/adder/remover support for generated accessors
 *
 * Every mutation runs under two independent disciplines:
 * - A caller-named, fair, reentrant read/write lock (opt-in)
 * - A per-context, per-field modification guard that turns nested
 *   re-entry into a "no change" result instead of a deadlock
 */

pub mod accessor;
pub mod core;
pub mod runtime;
pub mod telemetry;

// Re-exports
pub use crate::accessor::{
    AddElements, Counterpart, ElementContainer, FieldValue, FieldView, GetOptions,
    KeyedContainer, Opposite, PutEntries, ReadOnlyField, RemoveElements, Removal, SetValue,
    SharedField,
};
pub use crate::core::{
    Access, AccessorError, AccessorResult, AssertionMode, CallbackResult, CollectionGetterPolicy,
    ContainerKind, ExecutionContext, IndexSequence, Nullable, ObjectId, RuntimeConfig,
};
pub use crate::runtime::AccessorRuntime;
