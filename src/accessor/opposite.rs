/*!
 * Bidirectional References
 *
 * Keeps the counterpart side of an association in step with the side being
 * mutated
 */

use crate::core::errors::CallbackResult;
use crate::core::types::FieldName;

/// Capability to update the opposite end of an association
///
/// `link` makes `target` refer back to the owner being mutated, `unlink`
/// removes that back-reference. Errors propagate unchanged to the caller of
/// the mutation.
pub trait Opposite<T: ?Sized> {
    /// Name of the counterpart field on `T`
    fn field(&self) -> &str;

    fn link(&self, target: &T) -> CallbackResult;

    fn unlink(&self, target: &T) -> CallbackResult;
}

type CollectionAccessor<'a, T, O> = Box<dyn Fn(&T, &O) -> CallbackResult + 'a>;
type ValueAccessor<'a, T, O> = Box<dyn Fn(&T, Option<&O>) -> CallbackResult + 'a>;

/// [`Opposite`] built from the counterpart's own accessors
///
/// - link: `add_to(target, owner)`, else `set(target, Some(owner))`
/// - unlink: `remove_from(target, owner)`, else `set(target, None)`
///
/// Without a matching accessor the call does nothing.
///
/// # Example
///
/// ```
/// use accessor_runtime::{Counterpart, Opposite};
/// use std::cell::RefCell;
///
/// let parents = RefCell::new(Vec::new());
/// let parent = Counterpart::new("parent", "root")
///     .with_setter(|_child: &&str, owner: Option<&&str>| {
///         parents.borrow_mut().push(owner.copied());
///         Ok(())
///     });
///
/// parent.link(&"leaf").unwrap();
/// parent.unlink(&"leaf").unwrap();
/// assert_eq!(*parents.borrow(), vec![Some("root"), None]);
/// ```
pub struct Counterpart<'a, T: ?Sized, O> {
    field: FieldName,
    owner: O,
    add_to: Option<CollectionAccessor<'a, T, O>>,
    remove_from: Option<CollectionAccessor<'a, T, O>>,
    set: Option<ValueAccessor<'a, T, O>>,
}

impl<'a, T: ?Sized, O> Counterpart<'a, T, O> {
    pub fn new(field: impl Into<FieldName>, owner: O) -> Self {
        Self {
            field: field.into(),
            owner,
            add_to: None,
            remove_from: None,
            set: None,
        }
    }

    /// Counterpart adder, for a collection-valued opposite field
    pub fn with_adder(mut self, add_to: impl Fn(&T, &O) -> CallbackResult + 'a) -> Self {
        self.add_to = Some(Box::new(add_to));
        self
    }

    /// Counterpart remover, for a collection-valued opposite field
    pub fn with_remover(mut self, remove_from: impl Fn(&T, &O) -> CallbackResult + 'a) -> Self {
        self.remove_from = Some(Box::new(remove_from));
        self
    }

    /// Counterpart setter, for a single-valued opposite field
    pub fn with_setter(mut self, set: impl Fn(&T, Option<&O>) -> CallbackResult + 'a) -> Self {
        self.set = Some(Box::new(set));
        self
    }

    #[inline]
    pub fn owner(&self) -> &O {
        &self.owner
    }
}

impl<T: ?Sized, O> Opposite<T> for Counterpart<'_, T, O> {
    fn field(&self) -> &str {
        self.field.as_str()
    }

    fn link(&self, target: &T) -> CallbackResult {
        if let Some(add_to) = &self.add_to {
            add_to(target, &self.owner)
        } else if let Some(set) = &self.set {
            set(target, Some(&self.owner))
        } else {
            Ok(())
        }
    }

    fn unlink(&self, target: &T) -> CallbackResult {
        if let Some(remove_from) = &self.remove_from {
            remove_from(target, &self.owner)
        } else if let Some(set) = &self.set {
            set(target, None)
        } else {
            Ok(())
        }
    }
}
