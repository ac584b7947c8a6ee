/*!
 * Setter
 */

use super::journal::Reassignment;
use super::request::SetValue;
use super::view::SharedField;
use crate::core::errors::{AccessorError, AccessorResult};
use crate::core::types::{Access, Nullable};
use crate::runtime::AccessorRuntime;
use tracing::{debug, trace};

impl AccessorRuntime {
    /// Replace a field value
    ///
    /// Runs under the named write lock and the field's modification guard.
    /// Returns `false` without assigning when the call is a nested
    /// modification of the same field, the comparator finds the values equal,
    /// or the `before_change` hook vetoes. With an opposite capability the
    /// old value is unlinked and the new one linked after assignment; if
    /// either fails, the counterparts are restored and `assign` is called
    /// again with the old value before the error is returned.
    pub fn set_value<V>(
        &self,
        access: Access<'_>,
        old: V,
        new: V,
        mut request: SetValue<'_, V>,
        mut assign: impl FnMut(V),
    ) -> AccessorResult<bool>
    where
        V: Nullable + Clone,
    {
        let _lock = self.named_locks.write(access.lock_name(), access.context())?;
        let Some(_entry) =
            self.modifications
                .try_enter(access.context(), access.owner(), access.field())
        else {
            trace!(field = access.field(), "Nested modification skipped");
            return Ok(false);
        };

        if request.not_null {
            self.check(
                || !new.is_null(),
                || AccessorError::NullValue {
                    field: access.field().into(),
                },
            )?;
        }

        if let Some(equals) = &request.equals {
            if equals(&old, &new) {
                return Ok(false);
            }
        }

        if let Some(hook) = request.before_change.as_mut() {
            if !hook(&old, &new) {
                trace!(field = access.field(), "Change vetoed");
                return Ok(false);
            }
        }

        match request.opposite {
            Some(opposite) => {
                let mut reassignment =
                    Reassignment::new(access.field(), &old, &new, opposite, &mut assign);
                reassignment.apply()?;
                reassignment.commit();
            }
            None => assign(new.clone()),
        }

        if let Some(hook) = request.after_change.as_mut() {
            hook(&old, &new);
        }

        debug!(field = access.field(), "Field value changed");
        Ok(true)
    }

    /// [`set_value`](Self::set_value) on a shared field
    ///
    /// The old value is read under the same named lock that covers the
    /// assignment.
    pub fn set_field<V>(
        &self,
        access: Access<'_>,
        field: &SharedField<V>,
        new: V,
        request: SetValue<'_, V>,
    ) -> AccessorResult<bool>
    where
        V: Nullable + Clone,
    {
        let _lock = self.named_locks.write(access.lock_name(), access.context())?;
        let old = field.read().clone();
        self.set_value(access, old, new, request, |value| *field.write() = value)
    }
}
