/*!
 * Accessor Protocol
 *
 * Guarded get/set/add/remove/put operations backing generated accessors.
 *
 * # Architecture
 *
 * Each operation is a method on [`AccessorRuntime`](crate::AccessorRuntime):
 *
 * 1. Acquire the named lock (read for getters, write for mutations)
 * 2. Enter the field's modification guard (nested calls return `false`)
 * 3. Run not-null checks and `before` hooks
 * 4. Mutate the field or container
 * 5. Link/unlink counterparts through an [`Opposite`] capability
 * 6. Run `after` hooks
 *
 * Guard and lock are released by RAII on every exit path, in reverse order.
 */

mod adder;
mod container;
mod getter;
mod journal;
mod map;
mod opposite;
mod remover;
mod request;
mod setter;
mod view;

pub use container::{ElementContainer, FieldValue, KeyedContainer};
pub use journal::{JournalState, MutationJournal};
pub use opposite::{Counterpart, Opposite};
pub use request::{AddElements, GetOptions, PutEntries, RemoveElements, Removal, SetValue};
pub use view::{FieldView, ReadOnlyField, SharedField};
