/*!
 * Setter Tests
 */

use accessor_runtime::{
    Access, AccessorError, AccessorRuntime, ExecutionContext, RuntimeConfig, SetValue,
    SharedField,
};
use parking_lot::RwLock;
use pretty_assertions::assert_eq;
use std::cell::{Cell, RefCell};
use std::sync::Arc;

#[derive(Default)]
struct Person {
    name: RefCell<String>,
}

fn strict() -> AccessorRuntime {
    AccessorRuntime::new(RuntimeConfig::strict())
}

#[test]
fn test_set_assigns_and_notifies() {
    let runtime = strict();
    let person = Person::default();
    let changes = RefCell::new(Vec::new());

    let request = SetValue::new().after_change(|old: &String, new: &String| {
        changes.borrow_mut().push((old.clone(), new.clone()));
    });

    let old = person.name.borrow().clone();
    let changed = runtime
        .set_value(
            Access::new(&person, "name"),
            old,
            "Ada".to_string(),
            request,
            |value| *person.name.borrow_mut() = value,
        )
        .unwrap();

    assert!(changed);
    assert_eq!(*person.name.borrow(), "Ada");
    assert_eq!(*changes.borrow(), vec![(String::new(), "Ada".to_string())]);
}

#[test]
fn test_equal_values_skip_assignment() {
    let runtime = strict();
    let person = Person::default();
    *person.name.borrow_mut() = "Ada".to_string();

    let changed = runtime
        .set_value(
            Access::new(&person, "name"),
            "Ada".to_string(),
            "Ada".to_string(),
            SetValue::new().compare_eq(),
            |_| panic!("equal values must not be assigned"),
        )
        .unwrap();
    assert!(!changed);
}

#[test]
fn test_without_comparator_every_call_changes() {
    let runtime = strict();
    let owner = 0u8;
    let assigned = Cell::new(0);

    for _ in 0..2 {
        let changed = runtime
            .set_value(
                Access::new(&owner, "level"),
                3u32,
                3u32,
                SetValue::new(),
                |_| assigned.set(assigned.get() + 1),
            )
            .unwrap();
        assert!(changed);
    }
    assert_eq!(assigned.get(), 2);
}

#[test]
fn test_before_change_veto() {
    let runtime = strict();
    let person = Person::default();
    let after_called = Cell::new(false);

    let request = SetValue::new()
        .before_change(|_: &String, new: &String| !new.is_empty())
        .after_change(|_, _| after_called.set(true));

    let changed = runtime
        .set_value(
            Access::new(&person, "name"),
            String::new(),
            String::new(),
            request,
            |_| panic!("vetoed change must not be assigned"),
        )
        .unwrap();

    assert!(!changed);
    assert!(!after_called.get());
}

#[test]
fn test_not_null_violation_releases_guard() {
    let runtime = strict();
    let owner = 0u8;
    let access = Access::new(&owner, "nickname");

    let err = runtime
        .set_value(
            access,
            Some("old".to_string()),
            None,
            SetValue::new().not_null(),
            |_| panic!("null must not be assigned"),
        )
        .unwrap_err();
    assert!(matches!(err, AccessorError::NullValue { .. }));
    assert!(!runtime
        .modifications()
        .is_locked(access.context(), access.owner(), "nickname"));

    let permissive = AccessorRuntime::new(RuntimeConfig::permissive());
    let assigned = Cell::new(false);
    let changed = permissive
        .set_value(
            access,
            Some("old".to_string()),
            None,
            SetValue::new().not_null(),
            |_| assigned.set(true),
        )
        .unwrap();
    assert!(changed);
    assert!(assigned.get());
}

#[test]
fn test_nested_modification_is_skipped() {
    let runtime = strict();
    let person = Person::default();
    let access = Access::new(&person, "name");
    let nested_result = Cell::new(None);

    let request = SetValue::new().before_change(|_: &String, _: &String| {
        let nested = runtime.set_value(
            access,
            String::new(),
            "inner".to_string(),
            SetValue::new(),
            |_| panic!("nested assignment must not run"),
        );
        nested_result.set(Some(nested.unwrap()));
        true
    });

    let changed = runtime
        .set_value(access, String::new(), "outer".to_string(), request, |value| {
            *person.name.borrow_mut() = value
        })
        .unwrap();

    assert!(changed);
    assert_eq!(nested_result.get(), Some(false));
    assert_eq!(*person.name.borrow(), "outer");
}

#[test]
fn test_other_context_is_not_nested() {
    let runtime = strict();
    let person = Person::default();
    let access = Access::new(&person, "name");
    let other = access.in_context(ExecutionContext::detached());
    let nested_result = Cell::new(None);

    let request = SetValue::new().before_change(|_: &String, _: &String| {
        let nested = runtime.set_value(other, String::new(), "other".to_string(), SetValue::new(), |_| {});
        nested_result.set(Some(nested.unwrap()));
        true
    });

    runtime
        .set_value(access, String::new(), "outer".to_string(), request, |_| {})
        .unwrap();
    assert_eq!(nested_result.get(), Some(true));
}

#[test]
fn test_set_field_reads_old_value() {
    let runtime = strict();
    let owner = 0u8;
    let field: SharedField<u32> = Arc::new(RwLock::new(7));
    let seen = Cell::new(None);

    let changed = runtime
        .set_field(
            Access::new(&owner, "count").with_lock("counter"),
            &field,
            8,
            SetValue::new()
                .compare_eq()
                .after_change(|old: &u32, new: &u32| seen.set(Some((*old, *new)))),
        )
        .unwrap();

    assert!(changed);
    assert_eq!(*field.read(), 8);
    assert_eq!(seen.get(), Some((7, 8)));
    assert!(!runtime.named_locks().get("counter").unwrap().is_write_locked());
}
