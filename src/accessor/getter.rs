/*!
 * Getter
 */

use super::container::FieldValue;
use super::request::GetOptions;
use super::view::{FieldView, ReadOnlyField, SharedField};
use crate::core::errors::{AccessorError, AccessorResult};
use crate::core::types::{Access, CollectionGetterPolicy};
use crate::runtime::AccessorRuntime;
use std::sync::Arc;

impl AccessorRuntime {
    /// Read a field under its named read lock
    ///
    /// Not-null options are checked per the assertion mode. Container values
    /// are wrapped according to the getter policy; any other value is
    /// returned live.
    pub fn get_value<V: FieldValue>(
        &self,
        access: Access<'_>,
        field: &SharedField<V>,
        options: GetOptions,
    ) -> AccessorResult<FieldView<V>> {
        let _lock = self.named_locks.read(access.lock_name(), access.context())?;
        let value = field.read();

        if options.not_null_self {
            self.check(
                || !value.is_null(),
                || AccessorError::NullValue {
                    field: access.field().into(),
                },
            )?;
        }

        if options.not_null_key_or_element {
            self.check(
                || !value.has_null_element(),
                || AccessorError::NullElement {
                    field: access.field().into(),
                },
            )?;
        }

        if options.not_null_value {
            self.check(
                || !value.has_null_value(),
                || AccessorError::NullMapValue {
                    field: access.field().into(),
                },
            )?;
        }

        let view = match (value.container_kind(), options.policy) {
            (Some(_), CollectionGetterPolicy::Unmodifiable) => {
                FieldView::ReadOnly(ReadOnlyField::live(field))
            }
            (Some(_), CollectionGetterPolicy::UnmodifiableCopy) => {
                FieldView::ReadOnly(ReadOnlyField::detached((*value).clone()))
            }
            _ => FieldView::Live(Arc::clone(field)),
        };

        Ok(view)
    }
}
