/*!
 * Removers
 */

use super::container::ElementContainer;
use super::journal::MutationJournal;
use super::request::{RemoveElements, Removal};
use crate::core::errors::{AccessorError, AccessorResult};
use crate::core::types::{Access, ContainerKind};
use crate::runtime::AccessorRuntime;
use tracing::{debug, trace};

/// Candidates for removal with their positions in the old snapshot
struct Candidates<E> {
    elements: Vec<E>,
    positions: Option<Vec<usize>>,
}

impl<E: Clone + PartialEq> Candidates<E> {
    fn at_index(field: &str, kind: ContainerKind, old: &[E], index: usize) -> AccessorResult<Self> {
        if !kind.is_list() {
            return Err(AccessorError::NotIndexable { field: field.into() });
        }

        let element = old.get(index).cloned().ok_or_else(|| AccessorError::IndexOutOfBounds {
            field: field.into(),
            index,
            len: old.len(),
        })?;

        Ok(Self {
            elements: vec![element],
            positions: Some(vec![index]),
        })
    }

    /// Distinct present values; lists resolve each to its first position,
    /// or to every position with `remove_all`
    fn of_values(kind: ContainerKind, old: &[E], values: Vec<E>, remove_all: bool) -> Self {
        let mut distinct: Vec<E> = Vec::with_capacity(values.len());
        for value in values {
            if old.contains(&value) && !distinct.contains(&value) {
                distinct.push(value);
            }
        }

        if !kind.is_list() {
            return Self {
                elements: distinct,
                positions: None,
            };
        }

        let mut matched = vec![false; distinct.len()];
        let mut elements = Vec::new();
        let mut positions = Vec::new();
        for (position, item) in old.iter().enumerate() {
            if let Some(slot) = distinct.iter().position(|value| value == item) {
                if remove_all || !matched[slot] {
                    matched[slot] = true;
                    elements.push(item.clone());
                    positions.push(position);
                }
            }
        }

        Self {
            elements,
            positions: Some(positions),
        }
    }
}

impl AccessorRuntime {
    /// Remove elements from a collection, by value or by position
    ///
    /// By value, each distinct value present is a candidate: lists remove its
    /// first occurrence, or all of them when the request says `remove_all`.
    /// Positions refer to the collection as it was before the call and are
    /// `None` for non-list collections. Returns `false` when nothing was
    /// accepted, the batch was vetoed, or the call is a nested modification
    /// of the same field.
    ///
    /// With an opposite capability elements are removed and unlinked one at a
    /// time, and a failed unlink restores every element and link of the call.
    pub fn remove_from_collection<E, C>(
        &self,
        access: Access<'_>,
        collection: &mut C,
        removal: Removal<E>,
        mut request: RemoveElements<'_, E>,
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

        let kind = collection.kind();
        let old = collection.elements();

        let candidates = match removal {
            Removal::Index(index) => Candidates::at_index(field, kind, &old, index)?,
            Removal::Elements(values) => {
                Candidates::of_values(kind, &old, values, request.remove_all)
            }
        };

        let mut elements = Vec::with_capacity(candidates.elements.len());
        let mut positions = candidates.positions.as_ref().map(|_| Vec::new());
        for (slot, element) in candidates.elements.into_iter().enumerate() {
            let position = candidates.positions.as_ref().map(|all| all[slot]);
            let keep = match request.before_element.as_mut() {
                Some(hook) => hook(&element, position, &old),
                None => true,
            };
            if keep {
                elements.push(element);
                if let (Some(accepted), Some(position)) = (positions.as_mut(), position) {
                    accepted.push(position);
                }
            }
        }

        if elements.is_empty() {
            trace!(field, "No elements accepted");
            return Ok(false);
        }

        if let Some(hook) = request.before.as_mut() {
            if !hook(&elements, positions.as_deref()) {
                trace!(field, count = elements.len(), "Removal vetoed");
                return Ok(false);
            }
        }

        match request.opposite {
            Some(opposite) => {
                let mut journal = MutationJournal::new(field, &mut *collection, opposite);
                // Descending positions stay valid while earlier ones are removed
                for (slot, element) in elements.iter().enumerate().rev() {
                    let before = journal.len();
                    let removed = match &positions {
                        Some(positions) => journal.remove_at(positions[slot]).is_some(),
                        None => journal.remove_value(element),
                    };
                    self.check(
                        || removed,
                        || AccessorError::IncompleteRemove {
                            field: field.into(),
                            expected: before.saturating_sub(1),
                            actual: journal.len(),
                        },
                    )?;
                    if removed {
                        journal.unlink(element)?;
                    }
                }
                journal.commit();
            }
            None => {
                let expected = old.len().saturating_sub(elements.len());
                match &positions {
                    Some(positions) => {
                        for &position in positions.iter().rev() {
                            collection.remove_at(position);
                        }
                    }
                    None => {
                        for element in &elements {
                            collection.remove_element(element);
                        }
                    }
                }
                let actual = collection.len();
                self.check(
                    || actual == expected,
                    || AccessorError::IncompleteRemove {
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
                for (slot, element) in elements.iter().enumerate() {
                    let position = positions.as_ref().map(|all| all[slot]);
                    hook(element, position, &old, &new);
                }
            }
            if let Some(hook) = request.after.as_mut() {
                hook(&elements, positions.as_deref(), &old, &new);
            }
        }

        debug!(field, count = elements.len(), "Elements removed");
        Ok(true)
    }
}
