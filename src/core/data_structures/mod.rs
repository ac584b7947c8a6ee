/*!
 * Data Structures
 *
 * Specialized data structures for accessor operations:
 * - Inline strings for field and lock names (no heap allocation when short)
 * - Lazy index sequences reporting inserted positions without materializing them
 */

mod index_sequence;
mod inline_string;

pub use index_sequence::{IndexIter, IndexSequence};
pub use inline_string::InlineString;
