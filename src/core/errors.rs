/*!
 * Error Types
 * Centralized error handling with thiserror, miette, and serde support
 */

use crate::core::data_structures::InlineString;
use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Unified accessor runtime error with miette diagnostics
#[derive(Error, Debug, Diagnostic)]
pub enum AccessorError {
    #[error("Field '{field}' must not be set to null")]
    #[diagnostic(
        code(accessor::null_value),
        help("The field is declared not-null. Supply a present value.")
    )]
    NullValue { field: InlineString },

    #[error("Field '{field}' must not contain null elements or keys")]
    #[diagnostic(
        code(accessor::null_element),
        help("The collection is declared not-null for its elements (or keys).")
    )]
    NullElement { field: InlineString },

    #[error("Field '{field}' must not contain null map values")]
    #[diagnostic(
        code(accessor::null_map_value),
        help("The map is declared not-null for its values.")
    )]
    NullMapValue { field: InlineString },

    #[error("Incomplete add on '{field}': expected {expected} elements, container holds {actual}")]
    #[diagnostic(
        code(accessor::incomplete_add),
        help("The container rejected an element or was mutated outside the accessor protocol.")
    )]
    IncompleteAdd {
        field: InlineString,
        expected: usize,
        actual: usize,
    },

    #[error("Incomplete remove on '{field}': expected {expected} elements, container holds {actual}")]
    #[diagnostic(
        code(accessor::incomplete_remove),
        help("The container kept an element or was mutated outside the accessor protocol.")
    )]
    IncompleteRemove {
        field: InlineString,
        expected: usize,
        actual: usize,
    },

    #[error("Map '{field}' still holds {remaining} entries after clear")]
    #[diagnostic(
        code(accessor::map_not_cleared),
        help("The map implementation did not honor clear().")
    )]
    MapNotCleared { field: InlineString, remaining: usize },

    #[error("Index {index} out of bounds for '{field}' (length {len})")]
    #[diagnostic(code(accessor::index_out_of_bounds))]
    IndexOutOfBounds {
        field: InlineString,
        index: usize,
        len: usize,
    },

    #[error("Field '{field}' is not an indexed container")]
    #[diagnostic(
        code(accessor::not_indexable),
        help("Position-based removal requires a list-like container.")
    )]
    NotIndexable { field: InlineString },

    #[error("Invalid index range: start {start}, length {len}")]
    #[diagnostic(code(accessor::invalid_index_range))]
    InvalidIndexRange { start: usize, len: usize },

    #[error("Lock '{name}' is not held by this execution context")]
    #[diagnostic(
        code(accessor::lock_not_held),
        help("Every release must match a prior acquire from the same context.")
    )]
    LockNotHeld { name: InlineString },

    #[error("Lock '{name}' cannot be upgraded from read to write")]
    #[diagnostic(
        code(accessor::lock_upgrade),
        help("Release the read lock before acquiring the write lock.")
    )]
    LockUpgrade { name: InlineString },

    #[error("Field '{field}' is not locked by this execution context")]
    #[diagnostic(
        code(accessor::field_not_locked),
        help("Every unlock must match a prior lock of the same field and owner.")
    )]
    FieldNotLocked { field: InlineString },

    #[error("Global accessor runtime is already initialized")]
    #[diagnostic(
        code(accessor::already_initialized),
        help("Call init_global() once at startup, before any accessor runs.")
    )]
    AlreadyInitialized,

    #[error("Configuration error: {0}")]
    #[diagnostic(
        code(accessor::configuration_error),
        help("Invalid configuration. Review configuration parameters.")
    )]
    Configuration(InlineString),

    /// Failure raised by a counterpart accessor or callback, kept as-is so the
    /// caller can downcast to the original error type.
    #[error(transparent)]
    #[diagnostic(code(accessor::callback))]
    Callback(#[from] anyhow::Error),
}

impl AccessorError {
    /// Whether this error reports a broken not-null or container invariant
    pub fn is_invariant_violation(&self) -> bool {
        matches!(
            self,
            AccessorError::NullValue { .. }
                | AccessorError::NullElement { .. }
                | AccessorError::NullMapValue { .. }
                | AccessorError::IncompleteAdd { .. }
                | AccessorError::IncompleteRemove { .. }
                | AccessorError::MapNotCleared { .. }
        )
    }

    /// Short machine-readable error kind
    pub fn kind(&self) -> &'static str {
        match self {
            AccessorError::NullValue { .. } => "null_value",
            AccessorError::NullElement { .. } => "null_element",
            AccessorError::NullMapValue { .. } => "null_map_value",
            AccessorError::IncompleteAdd { .. } => "incomplete_add",
            AccessorError::IncompleteRemove { .. } => "incomplete_remove",
            AccessorError::MapNotCleared { .. } => "map_not_cleared",
            AccessorError::IndexOutOfBounds { .. } => "index_out_of_bounds",
            AccessorError::NotIndexable { .. } => "not_indexable",
            AccessorError::InvalidIndexRange { .. } => "invalid_index_range",
            AccessorError::LockNotHeld { .. } => "lock_not_held",
            AccessorError::LockUpgrade { .. } => "lock_upgrade",
            AccessorError::FieldNotLocked { .. } => "field_not_locked",
            AccessorError::AlreadyInitialized => "already_initialized",
            AccessorError::Configuration(_) => "configuration_error",
            AccessorError::Callback(_) => "callback_error",
        }
    }
}

impl From<serde_json::Error> for AccessorError {
    fn from(err: serde_json::Error) -> Self {
        AccessorError::Configuration(err.to_string().into())
    }
}

/// Serializable error representation for reporting
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub struct SerializableError {
    pub error_type: InlineString,
    pub message: InlineString,
}

impl SerializableError {
    pub fn new(error_type: impl Into<InlineString>, message: impl Into<InlineString>) -> Self {
        Self {
            error_type: error_type.into(),
            message: message.into(),
        }
    }
}

impl From<&AccessorError> for SerializableError {
    fn from(err: &AccessorError) -> Self {
        SerializableError::new(err.kind(), err.to_string())
    }
}

/// Result type for accessor operations
pub type AccessorResult<T> = std::result::Result<T, AccessorError>;

/// Result returned by counterpart accessors and other fallible callbacks
pub type CallbackResult = anyhow::Result<()>;
