/*!
 * Adders
 */

use super::container::ElementContainer;
use super::journal::MutationJournal;
use super::request::AddElements;
use crate::core::data_structures::IndexSequence;
use crate::core::errors::{AccessorError, AccessorResult};
use crate::core::types::Access;
use crate::runtime::AccessorRuntime;
use tracing::{debug, trace};

impl AccessorRuntime {
    /// Append elements to a collection
    ///
    /// Same as [`add_to_collection`](Self::add_to_collection) starting at the
    /// current end of the collection.
    pub fn add_to_list<E, C>(
        &self,
        access: Access<'_>,
        collection: &mut C,
        elements: Vec<E>,
        request: AddElements<'_, E>,
    ) -> AccessorResult<bool>
    where
        E: Clone + PartialEq,
        C: ElementContainer<E> + ?Sized,
    {
        let start_index = collection.len();
        self.add_to_collection(access, collection, elements, start_index, request)
    }

    /// Add elements to a collection starting at `start_index`
    ///
    /// Set-like collections skip candidates they already hold, and repeated
    /// candidates, before any hook runs. `before_element` sees each remaining
    /// candidate with the index it would get; rejected candidates do not use
    /// up an index. Returns `false` when nothing was accepted, the batch was
    /// vetoed, or the call is a nested modification of the same field.
    ///
    /// With an opposite capability elements are inserted and linked one at a
    /// time, and a failed link undoes every insert and link of the call.
    pub fn add_to_collection<E, C>(
        &self,
        access: Access<'_>,
        collection: &mut C,
        elements: Vec<E>,
        start_index: usize,
        mut request: AddElements<'_, E>,
    ) -> AccessorResult<bool>
    where
        E: Clone + PartialEq,
        C: ElementContainer<E> + ?Sized,
    {
        let field = access.field();
        let _lock = self.named_locks.write(access.lock_name(), access.context())?;
        let Some(_entry) = self
            .modifications
            .try_enter(access.context(), access.owner(), field)
        else {
            trace!(field, "Nested modification skipped");
            return Ok(false);
        };

        if let Some(is_null) = request.not_null {
            self.check(
                || !elements.iter().any(is_null),
                || AccessorError::NullElement {
                    field: field.into(),
                },
            )?;
        }

        let kind = collection.kind();
        if kind.is_list() && start_index > collection.len() {
            return Err(AccessorError::IndexOutOfBounds {
                field: field.into(),
                index: start_index,
                len: collection.len(),
            });
        }

        let old = collection.elements();

        let candidates = if kind.is_set() {
            let mut fresh: Vec<E> = Vec::with_capacity(elements.len());
            for element in elements {
                if !collection.contains_element(&element) && !fresh.contains(&element) {
                    fresh.push(element);
                }
            }
            fresh
        } else {
            elements
        };

        let mut accepted = Vec::with_capacity(candidates.len());
        for element in candidates {
            let index = start_index + accepted.len();
            let keep = match request.before_element.as_mut() {
                Some(hook) => hook(&element, index, &old),
                None => true,
            };
            if keep {
                accepted.push(element);
            }
        }

        if accepted.is_empty() {
            trace!(field, "No elements accepted");
            return Ok(false);
        }

        let indices = IndexSequence::new(start_index, accepted.len())?;
        if let Some(hook) = request.before.as_mut() {
            if !hook(&accepted, &indices) {
                trace!(field, count = accepted.len(), "Addition vetoed");
                return Ok(false);
            }
        }

        match request.opposite {
            Some(opposite) => {
                let mut journal = MutationJournal::new(field, &mut *collection, opposite);
                for (index, element) in indices.iter().zip(&accepted) {
                    let before = journal.len();
                    let inserted = journal.insert(kind.is_list().then_some(index), element.clone());
                    self.check(
                        || inserted,
                        || AccessorError::IncompleteAdd {
                            field: field.into(),
                            expected: before + 1,
                            actual: journal.len(),
                        },
                    )?;
                    if inserted {
                        journal.link(element)?;
                    }
                }
                journal.commit();
            }
            None => {
                let expected = old.len() + accepted.len();
                collection.insert_all(start_index, accepted.clone());
                let actual = collection.len();
                self.check(
                    || actual == expected,
                    || AccessorError::IncompleteAdd {
                        field: field.into(),
                        expected,
                        actual,
                    },
                )?;
            }
        }

        if request.after_element.is_some() || request.after.is_some() {
            let new = collection.elements();
            if let Some(hook) = request.after_element.as_mut() {
                for (index, element) in indices.iter().zip(&accepted) {
                    hook(element, index, &old, &new);
                }
            }
            if let Some(hook) = request.after.as_mut() {
                hook(&accepted, &indices, &old, &new);
            }
        }

        debug!(field, count = accepted.len(), "Elements added");
        Ok(true)
    }
}
