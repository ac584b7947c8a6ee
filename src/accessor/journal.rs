/*!
 * Mutation Journal
 *
 * Step-by-step collection mutation with automatic rollback
 */

use super::container::ElementContainer;
use super::opposite::Opposite;
use crate::core::errors::AccessorResult;
use crate::core::guard::{Guard, GuardError, GuardMetadata, GuardResult};
use crate::core::types::Nullable;
use tracing::{info, warn};

/// Journal state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JournalState {
    /// Steps are being recorded
    Active,
    /// Steps were kept
    Committed,
    /// Steps were undone
    RolledBack,
}

/// One applied step and the data needed to undo it
#[derive(Debug)]
enum Step<E> {
    Inserted { position: Option<usize>, element: E },
    Removed { position: Option<usize>, element: E },
    Linked(E),
    Unlinked(E),
}

/// Applies collection and counterpart changes one step at a time
///
/// Dropping an uncommitted journal undoes every recorded step in reverse
/// order, so a counterpart failure (or a panic unwinding through the
/// mutation) leaves neither the collection nor the counterparts half
/// changed.
///
/// # Example
///
/// ```
/// use accessor_runtime::accessor::MutationJournal;
/// use accessor_runtime::Counterpart;
///
/// let mut items = vec![1, 2];
/// let opposite = Counterpart::new("owner", ())
///     .with_setter(|item: &i32, _owner: Option<&()>| {
///         anyhow::ensure!(*item != 3, "item {} is frozen", item);
///         Ok(())
///     });
/// {
///     let mut journal = MutationJournal::new("items", &mut items, &opposite);
///     assert!(journal.insert(Some(2), 3));
///     assert!(journal.link(&3).is_err());
///     // dropped without commit
/// }
/// assert_eq!(items, vec![1, 2]);
/// ```
pub struct MutationJournal<'a, E, C: ElementContainer<E> + ?Sized> {
    field: &'a str,
    container: &'a mut C,
    opposite: &'a dyn Opposite<E>,
    steps: Vec<Step<E>>,
    state: JournalState,
    metadata: GuardMetadata,
}

impl<'a, E: Clone, C: ElementContainer<E> + ?Sized> MutationJournal<'a, E, C> {
    /// Insert at `position` (lists) or anywhere (sets)
    pub fn insert(&mut self, position: Option<usize>, element: E) -> bool {
        let index = position.unwrap_or_else(|| self.container.len());
        let inserted = self.container.insert_at(index, element.clone());
        if inserted {
            self.steps.push(Step::Inserted { position, element });
        }
        inserted
    }

    /// Remove the element at `position`
    pub fn remove_at(&mut self, position: usize) -> Option<E> {
        let element = self.container.remove_at(position)?;
        self.steps.push(Step::Removed {
            position: Some(position),
            element: element.clone(),
        });
        Some(element)
    }

    /// Remove the first element equal to `element`
    pub fn remove_value(&mut self, element: &E) -> bool {
        let removed = self.container.remove_element(element);
        if removed {
            self.steps.push(Step::Removed {
                position: None,
                element: element.clone(),
            });
        }
        removed
    }

    /// Point `element`'s counterpart field at the owner
    pub fn link(&mut self, element: &E) -> AccessorResult<()> {
        self.opposite.link(element)?;
        self.steps.push(Step::Linked(element.clone()));
        Ok(())
    }

    /// Clear `element`'s counterpart back-reference
    pub fn unlink(&mut self, element: &E) -> AccessorResult<()> {
        self.opposite.unlink(element)?;
        self.steps.push(Step::Unlinked(element.clone()));
        Ok(())
    }
}

impl<'a, E, C: ElementContainer<E> + ?Sized> MutationJournal<'a, E, C> {
    pub fn new(field: &'a str, container: &'a mut C, opposite: &'a dyn Opposite<E>) -> Self {
        Self {
            field,
            container,
            opposite,
            steps: Vec::new(),
            state: JournalState::Active,
            metadata: GuardMetadata::new(),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.container.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.container.is_empty()
    }

    /// Number of recorded steps
    pub fn steps(&self) -> usize {
        self.steps.len()
    }

    pub fn state(&self) -> JournalState {
        self.state
    }

    /// Keep every applied step
    pub fn commit(mut self) {
        self.state = JournalState::Committed;
        self.steps.clear();
    }

    /// Undo every applied step, newest first
    ///
    /// Undo keeps going past a failed step so that as much as possible is
    /// restored; failures are logged.
    fn rollback(&mut self) {
        let steps = std::mem::take(&mut self.steps);
        if !steps.is_empty() {
            info!(
                resource = self.resource_type(),
                field = self.field,
                steps = steps.len(),
                held_micros = self.metadata.lifetime_micros(),
                "Mutation journal rolling back"
            );
        }

        for step in steps.into_iter().rev() {
            match step {
                Step::Inserted { position, element } => {
                    let undone = match position {
                        Some(position) => self.container.remove_at(position).is_some(),
                        None => self.container.remove_element(&element),
                    };
                    if !undone {
                        warn!(field = self.field, "Rollback could not remove inserted element");
                    }
                }
                Step::Removed { position, element } => {
                    let index = position.unwrap_or_else(|| self.container.len());
                    if !self.container.insert_at(index, element) {
                        warn!(field = self.field, "Rollback could not restore removed element");
                    }
                }
                Step::Linked(element) => {
                    if let Err(e) = self.opposite.unlink(&element) {
                        warn!(
                            field = self.field,
                            opposite = self.opposite.field(),
                            error = %e,
                            "Rollback unlink failed"
                        );
                    }
                }
                Step::Unlinked(element) => {
                    if let Err(e) = self.opposite.link(&element) {
                        warn!(
                            field = self.field,
                            opposite = self.opposite.field(),
                            error = %e,
                            "Rollback link failed"
                        );
                    }
                }
            }
        }

        self.state = JournalState::RolledBack;
    }
}

impl<E, C: ElementContainer<E> + ?Sized> Guard for MutationJournal<'_, E, C> {
    fn resource_type(&self) -> &'static str {
        "mutation_journal"
    }

    fn metadata(&self) -> &GuardMetadata {
        &self.metadata
    }

    fn is_active(&self) -> bool {
        self.state == JournalState::Active
    }

    fn release(&mut self) -> GuardResult<()> {
        if self.state != JournalState::Active {
            return Err(GuardError::AlreadyReleased);
        }
        self.rollback();
        Ok(())
    }
}

impl<E, C: ElementContainer<E> + ?Sized> Drop for MutationJournal<'_, E, C> {
    fn drop(&mut self) {
        if self.state == JournalState::Active {
            self.rollback();
        }
    }
}

/// Single-valued field reassignment with its counterpart updates
///
/// Dropping an uncommitted reassignment links the old value again, unlinks
/// the new one if it was linked and assigns the old value back.
pub(crate) struct Reassignment<'a, V: Nullable + Clone, F: FnMut(V)> {
    field: &'a str,
    old: &'a V,
    new: &'a V,
    assign: F,
    opposite: &'a dyn Opposite<V::Target>,
    assigned: bool,
    unlinked: bool,
    linked: bool,
    state: JournalState,
}

impl<'a, V: Nullable + Clone, F: FnMut(V)> Reassignment<'a, V, F> {
    pub(crate) fn new(
        field: &'a str,
        old: &'a V,
        new: &'a V,
        opposite: &'a dyn Opposite<V::Target>,
        assign: F,
    ) -> Self {
        Self {
            field,
            old,
            new,
            assign,
            opposite,
            assigned: false,
            unlinked: false,
            linked: false,
            state: JournalState::Active,
        }
    }

    /// Assign the new value, unlink the old value, link the new value
    pub(crate) fn apply(&mut self) -> AccessorResult<()> {
        (self.assign)(self.new.clone());
        self.assigned = true;

        if let Some(previous) = self.old.present() {
            self.opposite.unlink(previous)?;
            self.unlinked = true;
        }
        if let Some(current) = self.new.present() {
            self.opposite.link(current)?;
            self.linked = true;
        }
        Ok(())
    }

    pub(crate) fn commit(mut self) {
        self.state = JournalState::Committed;
    }

    fn rollback(&mut self) {
        info!(field = self.field, "Reassignment rolling back");

        if self.linked {
            if let Some(current) = self.new.present() {
                if let Err(e) = self.opposite.unlink(current) {
                    warn!(
                        field = self.field,
                        opposite = self.opposite.field(),
                        error = %e,
                        "Rollback unlink failed"
                    );
                }
            }
        }
        if self.unlinked {
            if let Some(previous) = self.old.present() {
                if let Err(e) = self.opposite.link(previous) {
                    warn!(
                        field = self.field,
                        opposite = self.opposite.field(),
                        error = %e,
                        "Rollback link failed"
                    );
                }
            }
        }
        if self.assigned {
            (self.assign)(self.old.clone());
        }

        self.state = JournalState::RolledBack;
    }
}

impl<V: Nullable + Clone, F: FnMut(V)> Drop for Reassignment<'_, V, F> {
    fn drop(&mut self) {
        if self.state == JournalState::Active {
            self.rollback();
        }
    }
}
