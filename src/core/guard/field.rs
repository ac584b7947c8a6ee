/*!
 * Field Guards
 *
 * Scoped modification-guard entry for one field of one owner
 */

use super::traits::Guard;
use super::{GuardError, GuardMetadata, GuardResult};
use crate::core::sync::{ExecutionContext, ModificationGuard};
use crate::core::types::{FieldName, ObjectId};
use tracing::{error, trace};

/// Marks (context, owner, field) as being modified until dropped
///
/// Obtained from [`ModificationGuard::try_enter`].
pub struct FieldGuard<'a> {
    guard: &'a ModificationGuard,
    owner: ObjectId,
    field: FieldName,
    context: ExecutionContext,
    metadata: GuardMetadata,
    active: bool,
}

impl<'a> FieldGuard<'a> {
    /// Wrap an entry that was already locked
    pub(crate) fn entered(
        guard: &'a ModificationGuard,
        context: ExecutionContext,
        owner: ObjectId,
        field: FieldName,
    ) -> Self {
        Self {
            guard,
            owner,
            field,
            context,
            metadata: GuardMetadata::new().with_context(context),
            active: true,
        }
    }

    #[inline]
    pub fn field(&self) -> &str {
        self.field.as_str()
    }

    #[inline]
    pub fn owner(&self) -> ObjectId {
        self.owner
    }
}

impl Guard for FieldGuard<'_> {
    fn resource_type(&self) -> &'static str {
        "field"
    }

    fn metadata(&self) -> &GuardMetadata {
        &self.metadata
    }

    fn is_active(&self) -> bool {
        self.active
    }

    fn release(&mut self) -> GuardResult<()> {
        if !self.active {
            return Err(GuardError::AlreadyReleased);
        }
        self.active = false;
        self.guard.unlock(self.context, self.owner, &self.field)?;
        trace!(
            resource = self.resource_type(),
            field = %self.field,
            held_micros = self.metadata.lifetime_micros(),
            "Guard released"
        );
        Ok(())
    }
}

impl Drop for FieldGuard<'_> {
    fn drop(&mut self) {
        if self.active {
            if let Err(e) = self.release() {
                error!(field = %self.field, error = %e, "Field guard release failed");
            }
        }
    }
}

impl std::fmt::Debug for FieldGuard<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FieldGuard")
            .field("field", &self.field)
            .field("owner", &self.owner)
            .field("context", &self.context)
            .field("active", &self.active)
            .finish()
    }
}
